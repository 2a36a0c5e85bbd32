//! Game state and core simulation types
//!
//! Every entity owns its kinematic state and per-kind update rule; the
//! session-wide counters and collections live in [`GameState`], which is
//! owned by the frame driver and mutated only from the tick.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Aabb;
use crate::consts::*;

/// Current world extents; re-read from the canvas every frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
    /// Ground line, derived as floor(0.85 * height)
    pub ground_y: f32,
}

impl WorldBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ground_y: (height * GROUND_RATIO).floor(),
        }
    }

    /// Update extents after a resize, re-deriving the ground line
    pub fn resize(&mut self, width: f32, height: f32) {
        *self = Self::new(width, height);
    }
}

/// Weapon modes, cycled Normal -> Spread -> Heavy -> Normal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeaponKind {
    #[default]
    Normal,
    Spread,
    Heavy,
}

/// Dimensions, speed, and pierce budget of a spawned projectile
#[derive(Debug, Clone, Copy)]
pub struct ProjectileSpec {
    pub size: Vec2,
    pub speed: f32,
    pub pierce: u32,
}

impl WeaponKind {
    pub fn next(self) -> Self {
        match self {
            WeaponKind::Normal => WeaponKind::Spread,
            WeaponKind::Spread => WeaponKind::Heavy,
            WeaponKind::Heavy => WeaponKind::Normal,
        }
    }

    /// Seconds before the weapon can fire again
    pub fn cooldown_secs(self) -> f32 {
        match self {
            WeaponKind::Normal => 0.2,
            WeaponKind::Spread => 0.38,
            WeaponKind::Heavy => 0.6,
        }
    }

    pub fn projectile_spec(self) -> ProjectileSpec {
        match self {
            WeaponKind::Normal => ProjectileSpec {
                size: Vec2::new(30.0, 6.0),
                speed: 820.0,
                pierce: 0,
            },
            WeaponKind::Spread => ProjectileSpec {
                size: Vec2::new(26.0, 5.0),
                speed: 820.0,
                pierce: 0,
            },
            WeaponKind::Heavy => ProjectileSpec {
                size: Vec2::new(42.0, 10.0),
                speed: 700.0,
                pierce: 2,
            },
        }
    }

    /// Muzzle y-offsets of the projectiles spawned by one shot
    pub fn shot_offsets(self) -> &'static [f32] {
        match self {
            WeaponKind::Spread => &[-8.0, 0.0, 8.0],
            _ => &[0.0],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeaponKind::Normal => "normal",
            WeaponKind::Spread => "spread",
            WeaponKind::Heavy => "heavy",
        }
    }
}

/// The player character
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Horizontal facing, +1 right / -1 left
    pub facing: f32,
    pub grounded: bool,
    pub hp: f32,
    pub hp_max: f32,
    /// Remaining invulnerability window (seconds)
    pub invuln_timer: f32,
    pub weapon: WeaponKind,
    /// Countdown until the next shot is allowed (seconds)
    pub fire_cooldown: f32,
}

impl Player {
    pub fn new(bounds: &WorldBounds) -> Self {
        let size = Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT);
        Self {
            pos: Vec2::new(bounds.width * 0.2, bounds.ground_y - size.y),
            vel: Vec2::ZERO,
            size,
            facing: 1.0,
            grounded: true,
            hp: PLAYER_HP_MAX,
            hp_max: PLAYER_HP_MAX,
            invuln_timer: 0.0,
            weapon: WeaponKind::Normal,
            fire_cooldown: 0.0,
        }
    }

    /// Reset the existing instance for a fresh session (the player is never
    /// recreated mid-session)
    pub fn reset(&mut self, bounds: &WorldBounds) {
        *self = Player::new(bounds);
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Projectiles spawn here, facing-dependent rendering aside
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y + self.size.y * 0.4)
    }

    /// Grounded-only upward impulse; no-op mid-air
    pub fn jump(&mut self) {
        if self.grounded {
            self.vel.y = -JUMP_FORCE;
            self.grounded = false;
        }
    }

    pub fn cycle_weapon(&mut self) {
        self.weapon = self.weapon.next();
    }

    /// Apply held input, gravity, and bounds clamping for one frame
    pub fn update(&mut self, left: bool, right: bool, dt: f32, bounds: &WorldBounds) {
        if left && !right {
            self.vel.x = (self.vel.x - RUN_ACCEL * dt).max(-MAX_RUN_SPEED);
        } else if right && !left {
            self.vel.x = (self.vel.x + RUN_ACCEL * dt).min(MAX_RUN_SPEED);
        } else {
            self.vel.x *= FRICTION;
        }
        if self.vel.x.abs() < VELOCITY_DEADBAND {
            self.vel.x = 0.0;
        }
        if right {
            self.facing = 1.0;
        }
        if left {
            self.facing = -1.0;
        }

        self.vel.y += GRAVITY * dt;
        self.pos += self.vel * dt;

        if self.pos.y + self.size.y >= bounds.ground_y {
            self.pos.y = bounds.ground_y - self.size.y;
            self.vel.y = 0.0;
            self.grounded = true;
        }
        self.pos.x = self.pos.x.clamp(0.0, (bounds.width - self.size.x).max(0.0));

        if self.invuln_timer > 0.0 {
            self.invuln_timer -= dt;
        }
        if self.fire_cooldown > 0.0 {
            self.fire_cooldown -= dt;
        }
    }

    /// Apply contact damage. Returns true when this hit was lethal.
    /// No-op while the invulnerability window is open.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if self.invuln_timer > 0.0 {
            return false;
        }
        self.hp -= amount;
        self.invuln_timer = INVULN_WINDOW;
        if self.hp <= 0.0 {
            self.hp = 0.0;
            return true;
        }
        false
    }
}

/// Enemy behavior variants, chosen at spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    /// Stationary melee threat
    Flower,
    /// Drifts horizontally, bounces off the world edges
    Rock,
    /// Launches upward on a level-shortened timer
    Mushroom,
}

impl EnemyKind {
    /// Contact damage applied to an overlapping player, per frame while
    /// the invulnerability window allows it
    pub fn contact_damage(self) -> f32 {
        match self {
            EnemyKind::Flower => 8.0,
            EnemyKind::Rock => 12.0,
            EnemyKind::Mushroom => 16.0,
        }
    }

    /// Score awarded for a kill
    pub fn score_value(self) -> u32 {
        match self {
            EnemyKind::Flower => 10,
            EnemyKind::Rock => 15,
            EnemyKind::Mushroom => 20,
        }
    }
}

/// An enemy entity
#[derive(Debug, Clone)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub dead: bool,
    /// Accumulates after death; the enemy despawns past the grace period
    pub despawn_timer: f32,
    /// Time since the last jump launch (Mushroom only)
    pub jump_timer: f32,
}

impl Enemy {
    pub fn new(kind: EnemyKind, x: f32, bounds: &WorldBounds) -> Self {
        let size = Vec2::new(ENEMY_SIZE, ENEMY_SIZE);
        Self {
            kind,
            pos: Vec2::new(x, bounds.ground_y - size.y),
            vel: Vec2::ZERO,
            size,
            dead: false,
            despawn_timer: 0.0,
            jump_timer: 0.0,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Per-kind behavioral update. Dead enemies only age toward despawn.
    pub fn update(&mut self, dt: f32, level: u32, bounds: &WorldBounds) {
        if self.dead {
            self.despawn_timer += dt;
            return;
        }
        match self.kind {
            EnemyKind::Flower => {}
            EnemyKind::Rock => {
                self.pos.x += self.vel.x * dt;
                if self.pos.x < 0.0 || self.pos.x + self.size.x > bounds.width {
                    self.vel.x = -self.vel.x;
                }
            }
            EnemyKind::Mushroom => {
                self.jump_timer += dt;
                let interval = 1.2 - (level as f32 * 0.05).min(0.8);
                if self.jump_timer > interval {
                    self.vel.y = -(520.0 + level as f32 * 20.0);
                    self.jump_timer = 0.0;
                }
                self.vel.y += GRAVITY * dt;
                self.pos.y += self.vel.y * dt;
                if self.pos.y + self.size.y >= bounds.ground_y {
                    self.pos.y = bounds.ground_y - self.size.y;
                    self.vel.y = 0.0;
                }
            }
        }
    }

    /// Mark killed and restart the despawn grace timer
    pub fn kill(&mut self) {
        self.dead = true;
        self.despawn_timer = 0.0;
    }
}

/// A fired projectile
#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    /// Travel direction, +1 right / -1 left
    pub dir: f32,
    pub size: Vec2,
    pub speed: f32,
    /// Remaining hits before destruction
    pub pierce: u32,
    pub alive: bool,
}

impl Projectile {
    pub fn new(pos: Vec2, dir: f32, spec: ProjectileSpec) -> Self {
        Self {
            pos,
            dir,
            size: spec.size,
            speed: spec.speed,
            pierce: spec.pierce,
            alive: true,
        }
    }

    /// Hitbox; `pos` anchors the vertical centerline
    pub fn aabb(&self) -> Aabb {
        Aabb::new(
            Vec2::new(self.pos.x, self.pos.y - self.size.y / 2.0),
            self.size,
        )
    }

    /// Advance and cull once outside the world margin
    pub fn advance(&mut self, dt: f32, bounds: &WorldBounds) {
        self.pos.x += self.speed * self.dir * dt;
        if self.pos.x < -PROJECTILE_MARGIN || self.pos.x > bounds.width + PROJECTILE_MARGIN {
            self.alive = false;
        }
    }

    /// Spend one pierce charge on a hit; kills the projectile when the
    /// budget is exhausted
    pub fn consume_hit(&mut self) {
        if self.pierce > 0 {
            self.pierce -= 1;
        } else {
            self.alive = false;
        }
    }
}

/// Short-lived decorative particle spawned on enemy death
#[derive(Debug, Clone)]
pub struct BurstParticle {
    pub pos: Vec2,
    pub angle: f32,
    pub speed: f32,
    pub radius: f32,
    pub age: f32,
    pub max_life: f32,
}

impl BurstParticle {
    pub fn spawn(center: Vec2, rng: &mut Pcg32) -> Self {
        Self {
            pos: center,
            angle: rng.random::<f32>() * std::f32::consts::TAU,
            speed: 140.0 + rng.random::<f32>() * 260.0,
            radius: 2.0 + rng.random::<f32>() * 3.0,
            age: 0.0,
            max_life: 0.6 + rng.random::<f32>() * 0.4,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.age += dt;
        self.pos.x += self.angle.cos() * self.speed * dt;
        self.pos.y += self.angle.sin() * self.speed * dt;
        self.speed *= BURST_DRAG;
    }

    pub fn expired(&self) -> bool {
        self.age > self.max_life
    }
}

/// Cosmetic drifting mote; fixed pool, recycled at the top edge
#[derive(Debug, Clone)]
pub struct AmbientParticle {
    pub pos: Vec2,
    pub radius: f32,
    pub rise_speed: f32,
    pub alpha: f32,
    pub wobble: f32,
    pub wobble_speed: f32,
}

impl AmbientParticle {
    pub fn spawn(rng: &mut Pcg32, bounds: &WorldBounds) -> Self {
        Self {
            pos: Vec2::new(
                rng.random::<f32>() * bounds.width,
                rng.random::<f32>() * bounds.height,
            ),
            radius: 1.0 + rng.random::<f32>() * 2.0,
            rise_speed: 10.0 + rng.random::<f32>() * 20.0,
            alpha: 0.35 + rng.random::<f32>() * 0.4,
            wobble: rng.random::<f32>() * std::f32::consts::TAU,
            wobble_speed: 0.6 + rng.random::<f32>() * 0.8,
        }
    }

    pub fn update(&mut self, dt: f32, rng: &mut Pcg32, bounds: &WorldBounds) {
        self.pos.y -= self.rise_speed * dt;
        self.wobble += self.wobble_speed * dt;
        self.pos.x += self.wobble.sin() * 8.0 * dt;
        if self.pos.y < -10.0 {
            self.pos.y = bounds.height + 10.0;
            self.pos.x = rng.random::<f32>() * bounds.width;
        }
    }
}

/// Discrete events raised by the tick, drained by the driver for the
/// audio and persistence adapters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A shot was fired with the given weapon mode
    Fired(WeaponKind),
    /// An enemy was destroyed
    Explosion,
    /// The run ended
    GameOver,
    /// The persisted best score was beaten; carries the new best
    HighScore(u32),
}

/// Complete session state, owned by the frame driver
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub rng: Pcg32,
    pub bounds: WorldBounds,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub bursts: Vec<BurstParticle>,
    pub ambient: Vec<AmbientParticle>,
    pub level: u32,
    pub kills: u32,
    pub score: u32,
    /// Best score, loaded from persistence at session start
    pub high_score: u32,
    pub game_over: bool,
    events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64, bounds: WorldBounds) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let ambient = (0..AMBIENT_PARTICLE_COUNT)
            .map(|_| AmbientParticle::spawn(&mut rng, &bounds))
            .collect();
        Self {
            seed,
            rng,
            bounds,
            player: Player::new(&bounds),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            bursts: Vec::new(),
            ambient,
            level: 1,
            kills: 0,
            score: 0,
            high_score: 0,
            game_over: false,
            events: Vec::new(),
        }
    }

    /// Start a fresh session after game over. The ambient pool, RNG, and
    /// loaded high score carry over; everything else resets.
    pub fn reset(&mut self) {
        self.player.reset(&self.bounds);
        self.enemies.clear();
        self.projectiles.clear();
        self.bursts.clear();
        self.level = 1;
        self.kills = 0;
        self.score = 0;
        self.game_over = false;
        self.events.clear();
    }

    /// Enemies that still collide and can be damaged
    pub fn live_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|e| !e.dead).count()
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hand the frame's events to the driver
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
