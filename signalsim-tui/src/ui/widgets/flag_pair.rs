//! Two-tone flag badges rendered as colored text cells.

use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

use signalsim_core::present::{FlagBadge, flag_pair};

use crate::theme;

/// One badge: the code on the primary color, with the symbol (if any)
/// on the secondary color.
pub fn badge_spans(badge: &FlagBadge) -> Vec<Span<'static>> {
    let mut spans = vec![Span::styled(
        format!(" {} ", badge.code),
        Style::default()
            .bg(theme::rgb(badge.primary))
            .fg(theme::rgb(badge.secondary))
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(symbol) = badge.symbol {
        spans.push(Span::styled(
            symbol.to_string(),
            Style::default()
                .bg(theme::rgb(badge.secondary))
                .fg(theme::rgb(badge.primary)),
        ));
    }
    spans
}

/// Both badges of a pair, base currency first.
pub fn pair_spans(codes: [&str; 2]) -> Vec<Span<'static>> {
    let [base, quote] = flag_pair(codes);
    let mut spans = badge_spans(&base);
    spans.push(Span::raw(" "));
    spans.extend(badge_spans(&quote));
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_code_gets_placeholder_text() {
        let spans = badge_spans(&FlagBadge::PLACEHOLDER);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].content, " ?? ");
    }

    #[test]
    fn pair_has_both_codes() {
        let text: String = pair_spans(["EU", "US"])
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert!(text.contains("EU"));
        assert!(text.contains("US"));
    }
}
