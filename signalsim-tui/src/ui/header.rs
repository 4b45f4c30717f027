//! Header strip: ambient counters, clock and the simulation notice.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use signalsim_core::present::format_thousands;

use crate::app::AppState;
use crate::theme;

pub const DISCLAIMER: &str = "SIMULATION - random output, not financial advice";

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let session = &app.session;
    let ambient = session.ambient();

    let top = Line::from(vec![
        Span::styled(" SIGNAL SIM ", theme::title()),
        Span::styled("│ ", theme::muted()),
        Span::styled(
            format!("{} online", format_thousands(session.user_counter().display())),
            theme::accent(),
        ),
        Span::styled("  │ watching ", theme::muted()),
        Span::styled(ambient.currently_analyzing().to_string(), theme::bold()),
        Span::styled("  │ next refresh ", theme::muted()),
        Span::styled(format!("{}s", ambient.countdown()), theme::warning()),
        Span::styled("  │ updated ", theme::muted()),
        Span::styled(ambient.last_update().to_string(), theme::dim()),
    ]);
    let notice = Line::from(Span::styled(format!(" {DISCLAIMER}"), theme::warning()));

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(theme::panel_border(false));
    f.render_widget(Paragraph::new(vec![top, notice]).block(block), area);
}
