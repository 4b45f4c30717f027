//! Step 2: timeframe list for the chosen pair.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use signalsim_core::catalog::TIMEFRAMES;

use crate::app::AppState;
use crate::theme;
use crate::ui::widgets::flag_pair;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let flow = app.session.flow();
    let selection = flow.selection();
    let mut lines: Vec<Line> = vec![Line::from("")];

    if let Some(pair) = selection.pair {
        let mut spans = vec![Span::raw("  ")];
        spans.extend(flag_pair::pair_spans(pair.flags));
        spans.push(Span::styled(format!("  {}", pair.symbol), theme::title()));
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    for (i, option) in TIMEFRAMES.iter().enumerate() {
        let at_cursor = i == app.timeframe_cursor;
        let marker = if at_cursor { "▶ " } else { "  " };
        let style = if selection.timeframe == Some(option.timeframe) {
            theme::selected()
        } else if at_cursor {
            theme::cursor_row()
        } else {
            theme::bold()
        };
        lines.push(Line::from(vec![
            Span::styled(marker, theme::accent()),
            Span::styled(format!("{:<12}", option.label), style),
            Span::styled(option.description, theme::dim()),
        ]));
    }

    lines.push(Line::from(""));
    if flow.auto_advance_pending() {
        lines.push(Line::from(Span::styled("  starting...", theme::accent())));
    }
    let cooldown = flow.cooldown();
    if cooldown.is_armed() {
        lines.push(Line::from(Span::styled(
            format!("  next signal available in {}s", cooldown.remaining()),
            theme::warning(),
        )));
    }

    f.render_widget(Paragraph::new(lines), area);
}
