//! Escalation of response intensity from the recent sentiment trend.

use crate::sentiment::Sentiment;
use std::fmt;

/// Number of trailing labels considered when resolving intensity.
pub const INTENSITY_WINDOW: usize = 3;

/// How strongly a response should lean into the detected sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intensity {
    Mild,
    Moderate,
    Strong,
}

impl Intensity {
    /// All levels, weakest first.
    pub const ALL: [Intensity; 3] = [Intensity::Mild, Intensity::Moderate, Intensity::Strong];

    /// Lowercase name, also the key in response override files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Intensity::Mild => "mild",
            Intensity::Moderate => "moderate",
            Intensity::Strong => "strong",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve intensity from a trend, oldest label first.
///
/// Only the last [`INTENSITY_WINDOW`] labels count. Three positives or three
/// negatives are strong, exactly two of either are moderate, anything else is
/// mild. Neutral labels are never counted, so an all-neutral window is mild.
#[must_use]
pub fn resolve_intensity(trend: &[Sentiment]) -> Intensity {
    let recent = &trend[trend.len().saturating_sub(INTENSITY_WINDOW)..];
    let positive = recent.iter().filter(|s| **s == Sentiment::Positive).count();
    let negative = recent.iter().filter(|s| **s == Sentiment::Negative).count();

    if positive >= 3 || negative >= 3 {
        Intensity::Strong
    } else if positive == 2 || negative == 2 {
        Intensity::Moderate
    } else {
        Intensity::Mild
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::Sentiment::{Negative as N, Neutral as U, Positive as P};

    #[test]
    fn empty_trend_is_mild() {
        assert_eq!(resolve_intensity(&[]), Intensity::Mild);
    }

    #[test]
    fn three_of_a_kind_is_strong() {
        assert_eq!(resolve_intensity(&[P, P, P]), Intensity::Strong);
        assert_eq!(resolve_intensity(&[N, N, N]), Intensity::Strong);
    }

    #[test]
    fn two_of_a_kind_is_moderate() {
        assert_eq!(resolve_intensity(&[P, P, N]), Intensity::Moderate);
        assert_eq!(resolve_intensity(&[N, U, N]), Intensity::Moderate);
        assert_eq!(resolve_intensity(&[P, P]), Intensity::Moderate);
    }

    #[test]
    fn all_neutral_is_mild() {
        assert_eq!(resolve_intensity(&[U, U, U]), Intensity::Mild);
    }

    #[test]
    fn mixed_window_is_mild() {
        assert_eq!(resolve_intensity(&[P, N, U]), Intensity::Mild);
        assert_eq!(resolve_intensity(&[P]), Intensity::Mild);
    }

    #[test]
    fn only_last_three_labels_count() {
        assert_eq!(resolve_intensity(&[P, P, U, N, U]), Intensity::Mild);
        assert_eq!(resolve_intensity(&[U, U, N, N, N]), Intensity::Strong);
        assert_eq!(resolve_intensity(&[N, N, N, P, U]), Intensity::Mild);
    }
}
