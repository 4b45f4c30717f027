//! Step 3: simulated analysis progress.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Gauge, Paragraph};

use signalsim_core::analysis::PROGRESS_MAX;
use signalsim_core::present::format_thousands;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let session = &app.session;
    let flow = session.flow();
    let Some(run) = flow.analysis() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(area);

    let selection = flow.selection();
    let subject = match (selection.pair, selection.timeframe) {
        (Some(pair), Some(tf)) => format!("  {} · {}", pair.symbol, tf),
        _ => String::new(),
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(subject, theme::title()))),
        chunks[0],
    );

    let ratio = (run.progress() / PROGRESS_MAX).clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .gauge_style(theme::accent())
        .ratio(ratio)
        .label(format!("{:.0}%", run.progress()));
    f.render_widget(gauge, chunks[1]);

    let details = vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {}", run.message()), theme::bold())),
        Line::from(vec![
            Span::styled("  data points: ", theme::muted()),
            Span::styled(
                format_thousands(session.data_counter().display()),
                theme::accent(),
            ),
        ]),
    ];
    f.render_widget(Paragraph::new(details), chunks[3]);
}
