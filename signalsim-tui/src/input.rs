//! Keyboard input dispatch. The overlay sees keys first, then global keys, then the screen.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use signalsim_core::Screen;

use crate::app::{AppState, Overlay};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    if app.overlay == Overlay::Help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.overlay = Overlay::None;
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => {
            app.quit();
            return;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.quit();
            return;
        }
        KeyCode::Char('?') => {
            app.overlay = Overlay::Help;
            return;
        }
        KeyCode::Esc | KeyCode::Backspace => {
            app.back();
            return;
        }
        _ => {}
    }

    match app.screen() {
        Screen::Pairs | Screen::Timeframe => handle_list_key(app, key),
        Screen::Analysis => {}
        Screen::Signal => handle_signal_key(app, key),
    }
}

fn handle_list_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => app.cursor_down(),
        KeyCode::Enter | KeyCode::Char(' ') => app.choose(),
        KeyCode::Char('c') => app.confirm(),
        _ => {}
    }
}

fn handle_signal_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('n') | KeyCode::Enter => app.new_signal(),
        KeyCode::Char('p') => app.change_pair(),
        _ => {}
    }
}

/// Key bindings shown in the help overlay.
pub fn key_bindings_help() -> Vec<(&'static str, &'static str)> {
    vec![
        ("q / Ctrl+C", "Quit"),
        ("↑/k, ↓/j", "Move cursor"),
        ("Enter / Space", "Select highlighted pair or timeframe"),
        ("c", "Continue (manual flow)"),
        ("Esc / Backspace", "Back one screen"),
        ("n", "New signal (after cooldown)"),
        ("p", "Change trading pair"),
        ("?", "Toggle this help"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::app_with;
    use signalsim_core::FlowVariant;

    fn press(app: &mut AppState, code: KeyCode) {
        handle_key(app, KeyEvent::from(code));
    }

    #[test]
    fn quit_on_q() {
        let mut app = app_with(FlowVariant::Auto);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn quit_on_ctrl_c() {
        let mut app = app_with(FlowVariant::Auto);
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[test]
    fn vim_keys_move_cursor() {
        let mut app = app_with(FlowVariant::Auto);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.pair_cursor, 2);
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.pair_cursor, 1);
    }

    #[test]
    fn enter_selects_highlighted_pair() {
        let mut app = app_with(FlowVariant::Auto);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), Screen::Timeframe);
        let pair = app.session.flow().selection().pair.unwrap();
        assert_eq!(pair.symbol, "GBP/USD");
    }

    #[test]
    fn esc_goes_back() {
        let mut app = app_with(FlowVariant::Auto);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen(), Screen::Pairs);
    }

    #[test]
    fn help_overlay_swallows_keys() {
        let mut app = app_with(FlowVariant::Auto);
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.overlay, Overlay::Help);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), Screen::Pairs);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.overlay, Overlay::None);
        assert!(app.running);
    }

    #[test]
    fn new_signal_rejected_during_cooldown() {
        let mut app = app_with(FlowVariant::Auto);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        for _ in 0..200 {
            app.tick(50);
            if app.screen() == Screen::Signal {
                break;
            }
        }
        assert_eq!(app.screen(), Screen::Signal);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.screen(), Screen::Signal);
        let (msg, _) = app.status_message.clone().unwrap();
        assert!(msg.contains("next signal available in"), "{msg}");
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = app_with(FlowVariant::Auto);
        let mut key = KeyEvent::from(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        handle_key(&mut app, key);
        assert!(app.running);
    }

    #[test]
    fn key_bindings_help_lists_quit_first() {
        let bindings = key_bindings_help();
        assert_eq!(bindings[0].0, "q / Ctrl+C");
    }
}
