//! Help overlay.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::input::key_bindings_help;
use crate::theme;
use crate::ui::centered_rect;

pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(70, 80, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Help ")
        .title_style(theme::title());

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled("Keys", theme::title())));
    for (keys, desc) in key_bindings_help() {
        lines.push(Line::from(vec![
            Span::styled(format!("  {keys:<18}"), theme::accent()),
            Span::styled(desc, theme::dim()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Every direction, confidence and strength shown here is a random draw.",
        theme::warning(),
    )));
    lines.push(Line::from(Span::styled(
        "No market data is read. Do not trade on it.",
        theme::warning(),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Esc or ? to close", theme::muted())));

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(para, popup);
}
