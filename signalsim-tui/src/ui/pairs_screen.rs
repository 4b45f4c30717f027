//! Step 1: currency pair list.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use signalsim_core::catalog::CURRENCY_PAIRS;

use crate::app::AppState;
use crate::theme;
use crate::ui::widgets::flag_pair;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chosen = app.session.flow().selection().pair;
    let mut lines: Vec<Line> = vec![Line::from("")];

    for (i, pair) in CURRENCY_PAIRS.iter().enumerate() {
        let at_cursor = i == app.pair_cursor;
        let marker = if at_cursor { "▶ " } else { "  " };
        let mut spans = vec![Span::styled(marker, theme::accent())];
        spans.extend(flag_pair::pair_spans(pair.flags));
        spans.push(Span::raw("  "));

        let symbol_style = if chosen.as_ref() == Some(pair) {
            theme::selected()
        } else if at_cursor {
            theme::cursor_row()
        } else {
            theme::bold()
        };
        spans.push(Span::styled(format!("{:<9}", pair.symbol), symbol_style));
        spans.push(Span::styled(format!("{:<28}", pair.name), theme::dim()));
        spans.push(Span::styled(format!("{:>7}", pair.change), theme::change(pair.positive)));
        for tag in pair.tags {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(format!("[{tag}]"), theme::tag(tag)));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    f.render_widget(Paragraph::new(lines), area);
}
