//! Canvas2D rendering
//!
//! Consumes read-only simulation snapshots each frame; the sim never
//! depends on anything in here.

mod background;
mod hud;

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::settings::Settings;
use crate::sim::{Enemy, EnemyKind, GameState, Player, Projectile};

/// Canvas2D render adapter
pub struct Renderer {
    ctx: CanvasRenderingContext2d,
}

impl Renderer {
    /// Grab the 2d context of the given canvas
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }

    /// Draw one full frame from the simulation snapshot
    pub fn render(&self, state: &GameState, settings: &Settings) {
        let ctx = &self.ctx;
        let bounds = &state.bounds;

        background::draw(ctx, bounds);
        if settings.ambient_motes {
            self.draw_ambient(state);
        }
        background::draw_ground(ctx, bounds);

        for enemy in &state.enemies {
            self.draw_enemy(enemy);
        }
        self.draw_player(&state.player);
        for projectile in &state.projectiles {
            self.draw_projectile(projectile);
        }
        if settings.particles {
            self.draw_bursts(state);
        }

        hud::draw(ctx, state);
        if state.game_over {
            hud::draw_overlay(ctx, bounds);
        }
    }

    fn draw_ambient(&self, state: &GameState) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str("#a4f0ff");
        for mote in &state.ambient {
            ctx.set_global_alpha(mote.alpha as f64);
            ctx.begin_path();
            let _ = ctx.arc(mote.pos.x as f64, mote.pos.y as f64, mote.radius as f64, 0.0, TAU);
            ctx.fill();
        }
        ctx.set_global_alpha(1.0);
    }

    fn draw_player(&self, player: &Player) {
        let ctx = &self.ctx;
        let w = player.size.x as f64;
        let h = player.size.y as f64;
        let px = player.pos.x.floor() as f64;
        let py = player.pos.y.floor() as f64;

        ctx.save();
        // Mirror around the center line when facing left
        let _ = ctx.translate(px + w / 2.0, py + h);
        let _ = ctx.scale(player.facing as f64, 1.0);
        let _ = ctx.translate(-w / 2.0, -h);

        // Hooded robe with a faint vertical shade
        let robe = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
        let _ = robe.add_color_stop(0.0, "#283a5a");
        let _ = robe.add_color_stop(1.0, "#1c2942");
        ctx.set_fill_style_canvas_gradient(&robe);
        ctx.fill_rect(0.0, 10.0, w, h - 10.0);

        // Face
        ctx.set_fill_style_str("#cfe8ff");
        ctx.begin_path();
        let _ = ctx.arc(w / 2.0, 8.0, 8.0, 0.0, TAU);
        ctx.fill();

        // Hood peak
        ctx.set_fill_style_str("#1a2540");
        ctx.begin_path();
        ctx.move_to(w / 2.0 - 18.0, 8.0);
        ctx.line_to(w / 2.0 + 18.0, 8.0);
        ctx.line_to(w / 2.0, -14.0);
        ctx.close_path();
        ctx.fill();

        // Staff
        ctx.set_fill_style_str("#a4b5ff");
        ctx.fill_rect(w - 6.0, 16.0, 4.0, 20.0);

        ctx.restore();
    }

    fn draw_enemy(&self, enemy: &Enemy) {
        if enemy.dead {
            return;
        }
        let ctx = &self.ctx;
        let w = enemy.size.x as f64;
        let h = enemy.size.y as f64;

        ctx.save();
        let _ = ctx.translate(enemy.pos.x as f64, enemy.pos.y as f64);

        match enemy.kind {
            EnemyKind::Flower => {
                ctx.set_fill_style_str("#356d3a");
                ctx.fill_rect(w / 2.0 - 3.0, 12.0, 6.0, h - 12.0);
                ctx.set_fill_style_str("#64b76b");
                for i in 0..6 {
                    let a = (i as f64 / 6.0) * TAU;
                    let px = w / 2.0 + a.cos() * 10.0;
                    let py = 12.0 + a.sin() * 10.0;
                    ctx.begin_path();
                    let _ = ctx.arc(px, py, 6.0, 0.0, TAU);
                    ctx.fill();
                }
                ctx.set_fill_style_str("#e9ffd6");
                ctx.begin_path();
                let _ = ctx.arc(w / 2.0, 12.0, 4.0, 0.0, TAU);
                ctx.fill();
            }
            EnemyKind::Rock => {
                ctx.set_fill_style_str("#4c4f5e");
                ctx.begin_path();
                ctx.move_to(4.0, h);
                ctx.line_to(w - 4.0, h);
                ctx.line_to(w - 8.0, 10.0);
                ctx.line_to(10.0, 6.0);
                ctx.close_path();
                ctx.fill();
            }
            EnemyKind::Mushroom => {
                ctx.set_fill_style_str("#7a2b2b");
                ctx.begin_path();
                let _ = ctx.arc(w / 2.0, 14.0, 16.0, std::f64::consts::PI, 0.0);
                ctx.fill();
                ctx.set_fill_style_str("#d9b77b");
                ctx.fill_rect(w / 2.0 - 6.0, 14.0, 12.0, h - 14.0);
            }
        }

        ctx.restore();
    }

    fn draw_projectile(&self, projectile: &Projectile) {
        let ctx = &self.ctx;
        let x = projectile.pos.x as f64;
        let y = projectile.pos.y as f64;
        let w = projectile.size.x as f64;
        let h = projectile.size.y as f64;
        let dir = projectile.dir as f64;

        let beam = ctx.create_linear_gradient(x, y, x + w * dir, y);
        let _ = beam.add_color_stop(0.0, "#7df0ff");
        let _ = beam.add_color_stop(1.0, "#c0ffea");
        ctx.set_fill_style_canvas_gradient(&beam);
        ctx.fill_rect(x, y - h / 2.0, w, h);

        // Additive glow at the beam head
        let _ = ctx.set_global_composite_operation("lighter");
        ctx.set_fill_style_str("rgba(180,255,255,0.25)");
        ctx.begin_path();
        let _ = ctx.arc(x + w * dir * 0.5, y, 8.0, 0.0, TAU);
        ctx.fill();
        let _ = ctx.set_global_composite_operation("source-over");
    }

    fn draw_bursts(&self, state: &GameState) {
        let ctx = &self.ctx;
        let _ = ctx.set_global_composite_operation("lighter");
        ctx.set_fill_style_str("rgba(180,255,220,0.6)");
        for burst in &state.bursts {
            ctx.begin_path();
            let _ = ctx.arc(
                burst.pos.x as f64,
                burst.pos.y as f64,
                burst.radius as f64,
                0.0,
                TAU,
            );
            ctx.fill();
        }
        let _ = ctx.set_global_composite_operation("source-over");
    }
}
