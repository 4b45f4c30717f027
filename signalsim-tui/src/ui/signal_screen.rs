//! Step 4: the simulated signal.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use signalsim_core::Signal;
use signalsim_core::present::{ChartGlyph, StrengthBar};

use crate::app::AppState;
use crate::theme;
use crate::ui::widgets::{chart, strength_bar};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let session = &app.session;
    let Some(signal) = session.signal().copied() else {
        return;
    };

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let glyph = ChartGlyph::new(signal.direction, true);
    chart::render(f, cols[0], glyph, session.chart(), session.pulse());

    let mut lines = summary_lines(app, &signal);
    let cooldown = session.flow().cooldown();
    lines.push(Line::from(""));
    if cooldown.is_armed() {
        lines.push(Line::from(Span::styled(
            format!("next signal available in {}s", cooldown.remaining()),
            theme::warning(),
        )));
    } else {
        lines.push(Line::from(Span::styled("ready for a new signal", theme::accent())));
    }
    f.render_widget(Paragraph::new(lines), cols[1]);
}

fn summary_lines(app: &AppState, signal: &Signal) -> Vec<Line<'static>> {
    let selection = app.session.flow().selection();
    let subject = match (selection.pair, selection.timeframe) {
        (Some(pair), Some(tf)) => format!("{} · {}", pair.symbol, tf),
        _ => String::new(),
    };
    let glyph = ChartGlyph::new(signal.direction, false);
    let generated = app.session.clock().hms_of(signal.timestamp);

    vec![
        Line::from(""),
        Line::from(Span::styled(subject, theme::title())),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("{} ", glyph.arrow_char()), theme::direction(signal.direction)),
            Span::styled(signal.direction.action_label(), theme::direction(signal.direction)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Confidence ", theme::muted()),
            Span::styled(format!("{}%", signal.confidence), theme::bold()),
            Span::styled(" (random draw)", theme::dim()),
        ]),
        strength_bar::line(StrengthBar::new(signal.strength, Signal::MAX_STRENGTH)),
        Line::from(vec![
            Span::styled("Generated ", theme::muted()),
            Span::styled(generated, theme::dim()),
        ]),
    ]
}
