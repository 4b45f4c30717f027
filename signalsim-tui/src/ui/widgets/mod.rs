//! Small reusable pieces shared by the screens.

pub mod chart;
pub mod flag_pair;
pub mod strength_bar;
