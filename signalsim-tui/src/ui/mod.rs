//! Top-level UI layout: header, active screen and status bar.

pub mod analysis_screen;
pub mod header;
pub mod overlays;
pub mod pairs_screen;
pub mod signal_screen;
pub mod status_bar;
pub mod timeframe_screen;
pub mod widgets;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};

use signalsim_core::Screen;

use crate::app::{AppState, Overlay};
use crate::theme;

pub fn draw(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(f.area());

    header::render(f, chunks[0], app);
    draw_screen(f, chunks[1], app);
    status_bar::render(f, chunks[2], app);

    if app.overlay == Overlay::Help {
        overlays::render_help(f, chunks[1]);
    }
}

fn draw_screen(f: &mut Frame, area: Rect, app: &AppState) {
    let screen = app.screen();
    let step = match screen {
        Screen::Pairs => 1,
        Screen::Timeframe => 2,
        Screen::Analysis => 3,
        Screen::Signal => 4,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} [{step}/4] ", screen_title(screen)))
        .title_style(theme::title());

    let inner = block.inner(area);
    f.render_widget(block, area);

    match screen {
        Screen::Pairs => pairs_screen::render(f, inner, app),
        Screen::Timeframe => timeframe_screen::render(f, inner, app),
        Screen::Analysis => analysis_screen::render(f, inner, app),
        Screen::Signal => signal_screen::render(f, inner, app),
    }
}

fn screen_title(screen: Screen) -> &'static str {
    match screen {
        Screen::Pairs => "Choose Currency Pair",
        Screen::Timeframe => "Choose Time Frame",
        Screen::Analysis => "Simulating Analysis",
        Screen::Signal => "Simulated Signal",
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::app_with;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use signalsim_core::FlowVariant;

    fn render_text(app: &AppState) -> String {
        let backend = TestBackend::new(110, 36);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn pairs_screen_lists_catalog() {
        let app = app_with(FlowVariant::Auto);
        let text = render_text(&app);
        assert!(text.contains("EUR/USD"));
        assert!(text.contains("AUD/USD"));
        assert!(text.contains("SIMULATION"));
        assert!(text.contains("[1/4]"));
    }

    #[test]
    fn every_screen_renders() {
        let mut app = app_with(FlowVariant::Auto);
        app.choose();
        assert!(render_text(&app).contains("10 SECONDS"));
        app.choose();
        app.tick(400);
        assert!(render_text(&app).contains("[3/4]"));
        for _ in 0..200 {
            app.tick(50);
        }
        let text = render_text(&app);
        assert!(text.contains("[4/4]"));
        assert!(text.contains("/5"));
    }

    #[test]
    fn help_overlay_renders() {
        let mut app = app_with(FlowVariant::Auto);
        app.overlay = Overlay::Help;
        assert!(render_text(&app).contains("Toggle this help"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let app = app_with(FlowVariant::Auto);
        let mut terminal = Terminal::new(TestBackend::new(20, 6)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();
    }
}
