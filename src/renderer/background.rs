//! Forest backdrop: sky gradient, hill silhouette, tree line, haze, ground

use web_sys::CanvasRenderingContext2d;

use crate::sim::WorldBounds;

/// Draw everything behind the entities
pub fn draw(ctx: &CanvasRenderingContext2d, bounds: &WorldBounds) {
    draw_sky(ctx, bounds);
    draw_hills(ctx, bounds);
    draw_trees(ctx, bounds);
    draw_haze(ctx, bounds);
}

fn draw_sky(ctx: &CanvasRenderingContext2d, bounds: &WorldBounds) {
    let height = bounds.height as f64;
    let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, height);
    let _ = gradient.add_color_stop(0.0, "#0a0d1a");
    let _ = gradient.add_color_stop(0.5, "#111a2e");
    let _ = gradient.add_color_stop(1.0, "#15243a");
    ctx.set_fill_style_canvas_gradient(&gradient);
    ctx.fill_rect(0.0, 0.0, bounds.width as f64, height);
}

fn draw_hills(ctx: &CanvasRenderingContext2d, bounds: &WorldBounds) {
    let width = bounds.width as f64;
    let height = bounds.height as f64;
    let ground_y = bounds.ground_y as f64;

    ctx.set_fill_style_str("#0e1729");
    ctx.begin_path();
    ctx.move_to(0.0, ground_y);
    let mut x = 0.0;
    while x <= width {
        let y = ground_y - 40.0 - (x * 0.01).sin() * 20.0;
        ctx.line_to(x, y);
        x += 40.0;
    }
    ctx.line_to(width, height);
    ctx.line_to(0.0, height);
    ctx.close_path();
    ctx.fill();
}

fn draw_trees(ctx: &CanvasRenderingContext2d, bounds: &WorldBounds) {
    let width = bounds.width as f64;
    let ground_y = bounds.ground_y as f64;
    let count = ((bounds.width / 120.0).floor() as i32).max(12);

    for i in 0..count {
        let x = (i as f64 / count as f64) * width + (i as f64 * 1.7).sin() * 20.0;
        let h = 120.0 + (i % 5) as f64 * 30.0;

        // Trunk
        ctx.set_fill_style_str("#0a1324");
        ctx.fill_rect(x, ground_y - h, 6.0, h);

        // Canopy
        ctx.set_fill_style_str("#0d1528");
        ctx.begin_path();
        ctx.move_to(x - 20.0, ground_y - h + 20.0);
        ctx.line_to(x + 3.0, ground_y - h - 20.0);
        ctx.line_to(x + 26.0, ground_y - h + 20.0);
        ctx.close_path();
        ctx.fill();
    }
}

fn draw_haze(ctx: &CanvasRenderingContext2d, bounds: &WorldBounds) {
    ctx.set_fill_style_str("rgba(180,220,255,0.06)");
    ctx.fill_rect(
        0.0,
        (bounds.ground_y - 80.0) as f64,
        bounds.width as f64,
        200.0,
    );
}

/// Ground strip with a jagged grass fringe; drawn over the ambient motes
pub fn draw_ground(ctx: &CanvasRenderingContext2d, bounds: &WorldBounds) {
    let width = bounds.width as f64;
    let height = bounds.height as f64;
    let ground_y = bounds.ground_y as f64;

    ctx.set_fill_style_str("#1a263f");
    ctx.fill_rect(0.0, ground_y, width, height - ground_y);

    ctx.set_fill_style_str("#0f1830");
    let mut x = 0.0;
    while x < width {
        let h = 16.0 + (x * 0.1).sin() * 6.0;
        ctx.fill_rect(x, ground_y - h, 20.0, h);
        x += 26.0;
    }
}
