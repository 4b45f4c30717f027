//! Braille trend line with marching dashes and a pulsing arrow head.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine};

use signalsim_core::present::chart::{CHART_HEIGHT, CHART_WIDTH};
use signalsim_core::present::{ArrowPulse, ChartAnimation, ChartGlyph};

use crate::theme;

/// Sub-steps per polyline segment when dashing.
const DASH_STEPS: u32 = 8;

pub fn render(
    f: &mut Frame,
    area: Rect,
    glyph: ChartGlyph,
    animation: &ChartAnimation,
    pulse: &ArrowPulse,
) {
    let color = theme::direction_color(glyph.direction);
    let segments = dashed_segments(glyph, animation);
    let tip = scaled_tip(glyph, pulse.scale());

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, CHART_WIDTH])
        .y_bounds([0.0, CHART_HEIGHT])
        .paint(move |ctx| {
            for &((x1, y1), (x2, y2)) in &segments {
                ctx.draw(&CanvasLine::new(x1, flip(y1), x2, flip(y2), color));
            }
            for pair in tip.windows(2) {
                let (x1, y1) = pair[0];
                let (x2, y2) = pair[1];
                ctx.draw(&CanvasLine::new(x1, flip(y1), x2, flip(y2), color));
            }
        });
    f.render_widget(canvas, area);
}

/// The glyph uses screen coordinates (y down); the canvas has y up.
fn flip(y: f64) -> f64 {
    CHART_HEIGHT - y
}

type Segment = ((f64, f64), (f64, f64));

/// Visible pieces of the trend line. Static glyphs draw every piece.
fn dashed_segments(glyph: ChartGlyph, animation: &ChartAnimation) -> Vec<Segment> {
    let points = glyph.points();
    let mut out = Vec::new();
    let mut distance = 0u32;
    for pair in points.windows(2) {
        let (x1, y1) = pair[0];
        let (x2, y2) = pair[1];
        for step in 0..DASH_STEPS {
            let t0 = step as f64 / DASH_STEPS as f64;
            let t1 = (step + 1) as f64 / DASH_STEPS as f64;
            if !glyph.animated || animation.dash_visible(distance) {
                out.push((
                    (x1 + (x2 - x1) * t0, y1 + (y2 - y1) * t0),
                    (x1 + (x2 - x1) * t1, y1 + (y2 - y1) * t1),
                ));
            }
            distance += 1;
        }
    }
    out
}

/// Arrow head scaled about its middle vertex.
fn scaled_tip(glyph: ChartGlyph, scale: f64) -> [(f64, f64); 3] {
    let tip = glyph.arrow_tip();
    let (cx, cy) = tip[1];
    tip.map(|(x, y)| (cx + (x - cx) * scale, cy + (y - cy) * scale))
}
