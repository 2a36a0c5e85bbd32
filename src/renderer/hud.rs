//! On-canvas HUD: session counters, health bar, game-over overlay

use web_sys::CanvasRenderingContext2d;

use crate::sim::{GameState, WorldBounds};

const HEALTH_BAR_WIDTH: f64 = 180.0;

pub fn draw(ctx: &CanvasRenderingContext2d, state: &GameState) {
    ctx.set_fill_style_str("#cfe8ff");
    ctx.set_font("16px system-ui, sans-serif");
    ctx.set_text_align("left");
    let _ = ctx.fill_text(&format!("Level {}", state.level), 16.0, 28.0);
    let _ = ctx.fill_text(&format!("Kills {}", state.kills), 16.0, 48.0);
    let _ = ctx.fill_text(&format!("Score {}", state.score), 16.0, 68.0);
    let _ = ctx.fill_text(&format!("Best {}", state.high_score), 16.0, 88.0);
    let _ = ctx.fill_text(
        &format!("Weapon {}", state.player.weapon.as_str()),
        16.0,
        108.0,
    );

    draw_health_bar(ctx, state);
}

fn draw_health_bar(ctx: &CanvasRenderingContext2d, state: &GameState) {
    let x = state.bounds.width as f64 - HEALTH_BAR_WIDTH - 20.0;
    let hp_frac = (state.player.hp / state.player.hp_max) as f64;

    ctx.set_fill_style_str("#15243a");
    ctx.fill_rect(x, 20.0, HEALTH_BAR_WIDTH, 12.0);
    ctx.set_fill_style_str("#64b76b");
    ctx.fill_rect(x, 20.0, (HEALTH_BAR_WIDTH * hp_frac).floor().max(0.0), 12.0);
}

pub fn draw_overlay(ctx: &CanvasRenderingContext2d, bounds: &WorldBounds) {
    let width = bounds.width as f64;
    let height = bounds.height as f64;

    ctx.set_fill_style_str("rgba(10,15,26,0.6)");
    ctx.fill_rect(0.0, 0.0, width, height);

    ctx.set_fill_style_str("#cfe8ff");
    ctx.set_font("bold 32px system-ui, sans-serif");
    ctx.set_text_align("center");
    let _ = ctx.fill_text("Game Over", width / 2.0, height / 2.0 - 20.0);
    ctx.set_font("18px system-ui, sans-serif");
    let _ = ctx.fill_text("Tap to restart", width / 2.0, height / 2.0 + 16.0);
}
