//! Per-frame simulation tick
//!
//! Advances the whole world by one frame in a fixed order: ambient
//! particles, player, enemies, contact damage, projectiles, bursts,
//! cleanup, spawns. Later stages depend on positions updated earlier in
//! the same frame, so the order is load-bearing.

use rand::Rng;

use super::state::{BurstParticle, Enemy, EnemyKind, GameEvent, GameState, Projectile};
use crate::consts::*;

/// Input flags for a single tick. `left`/`right`/`fire` reflect held keys;
/// the rest are one-shot and cleared by the driver after the tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub jump: bool,
    pub cycle_weapon: bool,
    /// Start a fresh session; only honored while game over
    pub restart: bool,
}

/// Advance the game state by one frame of `dt` seconds (clamped to the
/// stall-protection maximum)
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = dt.clamp(0.0, MAX_FRAME_DT);
    let bounds = state.bounds;

    // Ambient motes keep drifting even on the game-over screen
    let mut ambient = std::mem::take(&mut state.ambient);
    for p in &mut ambient {
        p.update(dt, &mut state.rng, &bounds);
    }
    state.ambient = ambient;

    if state.game_over {
        if input.restart {
            state.reset();
        }
        return;
    }

    if input.cycle_weapon {
        state.player.cycle_weapon();
    }
    if input.jump {
        state.player.jump();
    }
    state.player.update(input.left, input.right, dt, &bounds);
    if input.fire {
        fire_weapon(state);
    }

    let level = state.level;
    for enemy in &mut state.enemies {
        enemy.update(dt, level, &bounds);
    }

    resolve_contact_damage(state);
    resolve_projectiles(state, dt);
    state.projectiles.retain(|p| p.alive);

    for burst in &mut state.bursts {
        burst.update(dt);
    }
    state.bursts.retain(|b| !b.expired());

    state
        .enemies
        .retain(|e| !(e.dead && e.despawn_timer > DESPAWN_GRACE));

    manage_spawns(state);
}

/// Spawn projectile(s) for the current weapon mode unless on cooldown
fn fire_weapon(state: &mut GameState) {
    if state.player.fire_cooldown > 0.0 {
        return;
    }
    let weapon = state.player.weapon;
    let spec = weapon.projectile_spec();
    let muzzle = state.player.muzzle();
    let dir = state.player.facing;

    for &offset in weapon.shot_offsets() {
        state.projectiles.push(Projectile::new(
            glam::Vec2::new(muzzle.x, muzzle.y + offset),
            dir,
            spec,
        ));
    }
    state.player.fire_cooldown = weapon.cooldown_secs();
    state.push_event(GameEvent::Fired(weapon));
}

/// Contact damage from every live enemy overlapping the player. The
/// invulnerability window inside `take_damage` means only the first hit
/// of a frame actually lands.
fn resolve_contact_damage(state: &mut GameState) {
    let player_box = state.player.aabb();
    let mut lethal = false;
    for enemy in &state.enemies {
        if !enemy.dead && player_box.intersects(&enemy.aabb()) {
            lethal |= state.player.take_damage(enemy.kind.contact_damage());
        }
    }
    if lethal {
        finish_run(state);
    }
}

/// End the run: raise game over once, and record a new best score if the
/// previous one was beaten
fn finish_run(state: &mut GameState) {
    state.game_over = true;
    state.push_event(GameEvent::GameOver);
    if state.score > state.high_score {
        state.high_score = state.score;
        state.push_event(GameEvent::HighScore(state.score));
    }
}

/// Advance projectiles and resolve their hits against live enemies. One
/// projectile may kill several enemies in a frame, up to its pierce budget.
fn resolve_projectiles(state: &mut GameState, dt: f32) {
    let bounds = state.bounds;
    let mut kill_centers = Vec::new();

    for projectile in &mut state.projectiles {
        projectile.advance(dt, &bounds);
        if !projectile.alive {
            continue;
        }
        for enemy in &mut state.enemies {
            if enemy.dead || !projectile.aabb().intersects(&enemy.aabb()) {
                continue;
            }
            projectile.consume_hit();
            enemy.kill();
            state.kills += 1;
            state.score += enemy.kind.score_value();
            kill_centers.push(enemy.aabb().center());
            if !projectile.alive {
                break;
            }
        }
    }

    for center in kill_centers {
        for _ in 0..BURST_COUNT {
            let burst = BurstParticle::spawn(center, &mut state.rng);
            state.bursts.push(burst);
        }
        state.push_event(GameEvent::Explosion);
    }
}

/// Spawn/progression manager: top up live enemies to the level-derived
/// target and advance the level when the kill threshold is met
pub(crate) fn manage_spawns(state: &mut GameState) {
    let target = (1 + state.level).min(MAX_LIVE_ENEMIES) as usize;
    while state.live_enemy_count() < target {
        spawn_enemy(state);
    }
    if state.kills >= state.level * KILLS_PER_LEVEL {
        state.level += 1;
    }
}

/// Spawn one enemy on the right half of the world. Kind thresholds are
/// nested overrides on a single draw: a jumping mushroom can only appear
/// at level 3+ and takes priority over the drifting-rock check.
fn spawn_enemy(state: &mut GameState) {
    let roll = state.rng.random::<f32>();
    let mut kind = EnemyKind::Flower;
    if state.level >= 2 && roll < 0.5 {
        kind = EnemyKind::Rock;
    }
    if state.level >= 3 && roll < 0.25 {
        kind = EnemyKind::Mushroom;
    }

    let x = state.bounds.width * (0.5 + state.rng.random::<f32>() * 0.45);
    let mut enemy = Enemy::new(kind, x, &state.bounds);
    if kind == EnemyKind::Rock {
        let dir = if state.rng.random::<bool>() { 1.0 } else { -1.0 };
        enemy.vel.x =
            dir * (60.0 + state.rng.random::<f32>() * 80.0 + state.level as f32 * 10.0);
    }
    state.enemies.push(enemy);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Player, WeaponKind, WorldBounds};
    use glam::Vec2;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    fn test_state() -> GameState {
        GameState::new(12345, WorldBounds::new(1280.0, 720.0))
    }

    fn place_enemy(state: &mut GameState, kind: EnemyKind, x: f32) -> usize {
        let enemy = Enemy::new(kind, x, &state.bounds);
        state.enemies.push(enemy);
        state.enemies.len() - 1
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let mut state = test_state();
        state.player.jump();
        assert_eq!(state.player.vel.y, -crate::consts::JUMP_FORCE);
        assert!(!state.player.grounded);

        // Mid-air jump is a no-op
        let vy = state.player.vel.y;
        state.player.jump();
        assert_eq!(state.player.vel.y, vy);
    }

    #[test]
    fn test_weapon_cycle_order() {
        let mut state = test_state();
        assert_eq!(state.player.weapon, WeaponKind::Normal);
        state.player.cycle_weapon();
        assert_eq!(state.player.weapon, WeaponKind::Spread);
        state.player.cycle_weapon();
        assert_eq!(state.player.weapon, WeaponKind::Heavy);
        state.player.cycle_weapon();
        assert_eq!(state.player.weapon, WeaponKind::Normal);
    }

    #[test]
    fn test_spread_fires_three_projectiles_at_offsets() {
        let mut state = test_state();
        state.player.weapon = WeaponKind::Spread;
        let muzzle = state.player.muzzle();

        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);

        assert_eq!(state.projectiles.len(), 3);
        let mut offsets: Vec<f32> = state
            .projectiles
            .iter()
            .map(|p| p.pos.y - muzzle.y)
            .collect();
        offsets.sort_by(|a, b| a.partial_cmp(b).unwrap());
        // Projectiles moved horizontally only; y offsets are the spread pattern
        assert!((offsets[0] - -8.0).abs() < 0.001);
        assert!(offsets[1].abs() < 0.001);
        assert!((offsets[2] - 8.0).abs() < 0.001);
        for p in &state.projectiles {
            assert_eq!(p.pierce, 0);
        }
        assert!(state
            .drain_events()
            .contains(&GameEvent::Fired(WeaponKind::Spread)));
    }

    #[test]
    fn test_fire_cooldown_blocks_repeat_shots() {
        let mut state = test_state();
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.projectiles.len(), 1);

        // Held fire during the 0.2s cooldown adds nothing
        tick(&mut state, &input, DT);
        assert_eq!(state.projectiles.len(), 1);

        // After the cooldown elapses a second shot goes out
        for _ in 0..12 {
            tick(&mut state, &input, DT);
        }
        assert_eq!(state.projectiles.len(), 2);
    }

    #[test]
    fn test_pierce_budget_kills_three_overlapped_enemies() {
        let mut state = test_state();
        // Three live enemies stacked at the same spot, away from spawns
        for _ in 0..3 {
            place_enemy(&mut state, EnemyKind::Flower, 300.0);
        }
        let enemy_center_y = state.bounds.ground_y - ENEMY_SIZE / 2.0;
        state.projectiles.push(Projectile::new(
            Vec2::new(290.0, enemy_center_y),
            1.0,
            WeaponKind::Heavy.projectile_spec(),
        ));

        tick(&mut state, &TickInput::default(), DT);

        assert_eq!(state.kills, 3);
        assert_eq!(state.enemies.iter().filter(|e| e.dead).count(), 3);
        // Pierce 2 means three hits total, then the projectile dies
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_mushroom_kill_scores_twenty() {
        let mut state = test_state();
        place_enemy(&mut state, EnemyKind::Mushroom, 300.0);
        let enemy_center_y = state.bounds.ground_y - ENEMY_SIZE / 2.0;
        state.projectiles.push(Projectile::new(
            Vec2::new(290.0, enemy_center_y),
            1.0,
            WeaponKind::Normal.projectile_spec(),
        ));

        tick(&mut state, &TickInput::default(), DT);

        assert_eq!(state.score, 20);
        assert_eq!(state.kills, 1);
        assert!(state.drain_events().contains(&GameEvent::Explosion));
        // A burst of 24 particles marks the death
        assert_eq!(state.bursts.len(), BURST_COUNT);
    }

    #[test]
    fn test_lethal_contact_damage_sets_game_over_once() {
        let mut state = test_state();
        state.player.hp = 8.0;
        let px = state.player.pos.x;
        place_enemy(&mut state, EnemyKind::Mushroom, px);

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.player.hp, 0.0);
        assert!(state.game_over);
        let events = state.drain_events();
        assert_eq!(
            events.iter().filter(|e| **e == GameEvent::GameOver).count(),
            1
        );

        // Further ticks stop simulating and never re-raise game over
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.player.hp, 0.0);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_invuln_window_blocks_repeat_contact_damage() {
        let mut state = test_state();
        let px = state.player.pos.x;
        place_enemy(&mut state, EnemyKind::Flower, px);

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.player.hp, 92.0);

        // Still overlapping, but the 0.8s window holds
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.player.hp, 92.0);
    }

    #[test]
    fn test_dead_enemies_do_not_collide() {
        let mut state = test_state();
        let px = state.player.pos.x;
        let idx = place_enemy(&mut state, EnemyKind::Mushroom, px);
        state.enemies[idx].kill();

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.player.hp, state.player.hp_max);
        assert!(!state.game_over);
    }

    #[test]
    fn test_dead_enemy_despawns_after_grace() {
        let mut state = test_state();
        let idx = place_enemy(&mut state, EnemyKind::Flower, 900.0);
        state.enemies[idx].kill();

        // Ride out most of the grace period; the corpse stays around
        let frames = (DESPAWN_GRACE / DT) as usize;
        for _ in 0..frames {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert!(state.enemies.iter().any(|e| e.dead));

        for _ in 0..4 {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert!(state.enemies.iter().all(|e| !e.dead));
    }

    #[test]
    fn test_live_enemy_count_never_exceeds_target() {
        let mut state = test_state();
        for i in 0..600 {
            // Walk the level up over time to exercise higher targets
            if i % 100 == 99 {
                state.kills += KILLS_PER_LEVEL * state.level;
            }
            tick(&mut state, &TickInput::default(), DT);
            let cap = (1 + state.level).min(MAX_LIVE_ENEMIES) as usize;
            assert!(state.live_enemy_count() <= cap);
        }
    }

    #[test]
    fn test_level_one_spawns_only_flowers() {
        let mut state = test_state();
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert_eq!(state.level, 1);
        assert!(state.enemies.iter().all(|e| e.kind == EnemyKind::Flower));
    }

    #[test]
    fn test_level_advances_monotonically_at_threshold() {
        let mut state = test_state();
        state.kills = 4;
        manage_spawns(&mut state);
        assert_eq!(state.level, 1);

        state.kills = 5;
        manage_spawns(&mut state);
        assert_eq!(state.level, 2);

        // One step per evaluation even if far past the next threshold
        state.kills = 50;
        manage_spawns(&mut state);
        assert_eq!(state.level, 3);
    }

    #[test]
    fn test_new_high_score_recorded_on_death() {
        let mut state = test_state();
        state.score = 50;
        state.high_score = 30;
        state.player.hp = 1.0;
        let px = state.player.pos.x;
        place_enemy(&mut state, EnemyKind::Flower, px);

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.high_score, 50);
        assert!(state.drain_events().contains(&GameEvent::HighScore(50)));
    }

    #[test]
    fn test_restart_resets_session_but_keeps_high_score() {
        let mut state = test_state();
        state.score = 80;
        state.high_score = 80;
        state.kills = 9;
        state.level = 2;
        state.game_over = true;

        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);

        assert!(!state.game_over);
        assert_eq!(state.score, 0);
        assert_eq!(state.kills, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.high_score, 80);
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.hp, state.player.hp_max);
    }

    #[test]
    fn test_ambient_particles_update_while_game_over() {
        let mut state = test_state();
        state.game_over = true;
        let before = state.ambient[0].pos;

        tick(&mut state, &TickInput::default(), DT);
        assert_ne!(state.ambient[0].pos, before);
        assert_eq!(state.ambient.len(), AMBIENT_PARTICLE_COUNT);
    }

    #[test]
    fn test_dt_clamped_against_stall_spikes() {
        let mut state = test_state();
        state.player.pos.y = 100.0;
        state.player.grounded = false;

        tick(&mut state, &TickInput::default(), 10.0);
        let expected = GRAVITY * MAX_FRAME_DT;
        assert!((state.player.vel.y - expected).abs() < 0.001);
    }

    #[test]
    fn test_projectile_culled_past_world_margin() {
        let mut state = test_state();
        state.projectiles.push(Projectile::new(
            Vec2::new(state.bounds.width + PROJECTILE_MARGIN + 1.0, 300.0),
            1.0,
            WeaponKind::Normal.projectile_spec(),
        ));
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_determinism() {
        // Two states with the same seed and input script stay identical
        let mut state1 = test_state();
        let mut state2 = test_state();

        let script = [
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput {
                right: true,
                fire: true,
                ..Default::default()
            },
            TickInput {
                jump: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..120 {
            for input in &script {
                tick(&mut state1, input, DT);
                tick(&mut state2, input, DT);
            }
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.kills, state2.kills);
        assert_eq!(state1.enemies.len(), state2.enemies.len());
        assert_eq!(state1.player.pos, state2.player.pos);
        for (a, b) in state1.enemies.iter().zip(state2.enemies.iter()) {
            assert_eq!(a.pos, b.pos);
            assert_eq!(a.kind, b.kind);
        }
    }

    proptest! {
        #[test]
        fn prop_airborne_velocity_integrates_gravity(
            dt in 0.0f32..=MAX_FRAME_DT,
            vy0 in -800.0f32..=0.0,
        ) {
            let bounds = WorldBounds::new(1280.0, 720.0);
            let mut player = Player::new(&bounds);
            player.pos.y = 100.0;
            player.grounded = false;
            player.vel.y = vy0;

            player.update(false, false, dt, &bounds);
            prop_assert!((player.vel.y - (vy0 + GRAVITY * dt)).abs() < 0.001);
        }

        #[test]
        fn prop_hp_never_leaves_valid_range(damages in proptest::collection::vec(0.0f32..=200.0, 1..20)) {
            let bounds = WorldBounds::new(1280.0, 720.0);
            let mut player = Player::new(&bounds);
            for amount in damages {
                player.take_damage(amount);
                // Expire the window so every hit can land
                player.invuln_timer = 0.0;
                prop_assert!(player.hp >= 0.0);
                prop_assert!(player.hp <= player.hp_max);
            }
        }
    }
}
