use std::{fmt::Display, ops::Deref};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Percentage(f64);

impl Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}%", self.0)
    }
}

impl Percentage {
    pub const ZERO: Percentage = Percentage(0.);

    pub fn new_opt(value: f64) -> Option<Percentage> {
        if value >= 0. {
            Some(Percentage(value))
        } else {
            None
        }
    }
}

impl Deref for Percentage {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Share of `value` in `whole`. Anything that can't form a share (an empty whole, NaN hours,
/// negative values) is reported as 0%.
pub fn hours_percentage(value: f64, whole: f64) -> Percentage {
    if whole <= 0. || whole.is_nan() {
        return Percentage::ZERO;
    }
    Percentage::new_opt(value / whole * 100.).unwrap_or(Percentage::ZERO)
}
