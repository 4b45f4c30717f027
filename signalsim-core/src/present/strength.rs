//! Segmented strength meter.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrengthBar {
    pub strength: u8,
    pub max: u8,
}

impl StrengthBar {
    pub fn new(strength: u8, max: u8) -> Self {
        Self { strength, max }
    }

    /// One entry per segment; `true` is filled.
    pub fn segments(&self) -> Vec<bool> {
        (0..self.max).map(|i| i < self.strength).collect()
    }

    pub fn label(&self) -> String {
        format!("{}/{}", self.strength.min(self.max), self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_leading_segments() {
        let bar = StrengthBar::new(3, 5);
        assert_eq!(bar.segments(), vec![true, true, true, false, false]);
        assert_eq!(bar.label(), "3/5");
    }

    #[test]
    fn overfull_strength_is_capped() {
        let bar = StrengthBar::new(9, 4);
        assert!(bar.segments().iter().all(|s| *s));
        assert_eq!(bar.label(), "4/4");
    }
}
