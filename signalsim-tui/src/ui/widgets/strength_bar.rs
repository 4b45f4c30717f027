use ratatui::style::Style;
use ratatui::text::{Line, Span};

use signalsim_core::present::StrengthBar;

use crate::theme;

const FILLED: &str = "██";
const EMPTY: &str = "░░";

pub fn line(bar: StrengthBar) -> Line<'static> {
    let mut spans = vec![Span::styled("Strength ", theme::muted())];
    for filled in bar.segments() {
        if filled {
            spans.push(Span::styled(FILLED, theme::warning()));
        } else {
            spans.push(Span::styled(EMPTY, Style::default().fg(theme::EMPTY_SEGMENT)));
        }
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(bar.label(), theme::bold()));
    Line::from(spans)
}
