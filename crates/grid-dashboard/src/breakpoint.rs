//! Viewport breakpoint tiers.
//!
//! The grid has three fixed tiers ordered by activation width. Exactly one
//! tier is active for any viewport width: the widest tier whose threshold
//! the width reaches, or the narrowest tier when the width is below every
//! threshold.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named viewport-width tier with its own column count and layout.
///
/// Variants are declared widest first, so the derived `Ord` sorts
/// `Lg < Md < Sm` and iteration over a `BTreeMap<Breakpoint, _>` visits
/// tiers from widest to narrowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    /// Desktop widths (>= 1200px).
    Lg,
    /// Laptop and tablet-landscape widths (>= 996px).
    Md,
    /// Everything narrower (>= 768px, and the fallback below that).
    Sm,
}

impl Breakpoint {
    /// All tiers, widest first.
    pub const ALL: [Breakpoint; 3] = [Breakpoint::Lg, Breakpoint::Md, Breakpoint::Sm];

    /// Minimum viewport width in pixels at which this tier activates.
    pub fn min_width(self) -> u32 {
        match self {
            Breakpoint::Lg => 1200,
            Breakpoint::Md => 996,
            Breakpoint::Sm => 768,
        }
    }

    /// Number of grid columns at this tier.
    pub fn columns(self) -> u32 {
        match self {
            Breakpoint::Lg | Breakpoint::Md | Breakpoint::Sm => 12,
        }
    }

    /// Wire name used as the key in the persisted layout.
    pub fn name(self) -> &'static str {
        match self {
            Breakpoint::Lg => "lg",
            Breakpoint::Md => "md",
            Breakpoint::Sm => "sm",
        }
    }

    /// Returns the tier active at the given viewport width.
    pub fn for_width(width: u32) -> Breakpoint {
        Self::ALL
            .into_iter()
            .find(|bp| width >= bp.min_width())
            .unwrap_or(Breakpoint::Sm)
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Error type for parsing a Breakpoint from its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBreakpointError(pub String);

impl fmt::Display for ParseBreakpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid breakpoint: {} (expected lg, md or sm)", self.0)
    }
}

impl std::error::Error for ParseBreakpointError {}

impl FromStr for Breakpoint {
    type Err = ParseBreakpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lg" => Ok(Breakpoint::Lg),
            "md" => Ok(Breakpoint::Md),
            "sm" => Ok(Breakpoint::Sm),
            _ => Err(ParseBreakpointError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_strictly_descending() {
        let widths: Vec<u32> = Breakpoint::ALL.iter().map(|bp| bp.min_width()).collect();
        assert!(widths.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn for_width_picks_widest_reached_tier() {
        assert_eq!(Breakpoint::for_width(1920), Breakpoint::Lg);
        assert_eq!(Breakpoint::for_width(1200), Breakpoint::Lg);
        assert_eq!(Breakpoint::for_width(1199), Breakpoint::Md);
        assert_eq!(Breakpoint::for_width(996), Breakpoint::Md);
        assert_eq!(Breakpoint::for_width(995), Breakpoint::Sm);
        assert_eq!(Breakpoint::for_width(768), Breakpoint::Sm);
    }

    #[test]
    fn for_width_below_all_thresholds_is_narrowest() {
        assert_eq!(Breakpoint::for_width(0), Breakpoint::Sm);
        assert_eq!(Breakpoint::for_width(320), Breakpoint::Sm);
    }

    #[test]
    fn ord_is_widest_first() {
        let mut tiers = vec![Breakpoint::Sm, Breakpoint::Lg, Breakpoint::Md];
        tiers.sort();
        assert_eq!(tiers, Breakpoint::ALL.to_vec());
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("LG".parse::<Breakpoint>(), Ok(Breakpoint::Lg));
        assert_eq!("md".parse::<Breakpoint>(), Ok(Breakpoint::Md));
        assert_eq!("Sm".parse::<Breakpoint>(), Ok(Breakpoint::Sm));
    }

    #[test]
    fn parse_rejects_unknown_name() {
        let err = "xl".parse::<Breakpoint>().expect_err("xl is not a tier");
        assert_eq!(err, ParseBreakpointError("xl".to_string()));
        assert!(err.to_string().contains("xl"));
    }

    #[test]
    fn serializes_as_lowercase_name() {
        let json = serde_json::to_string(&Breakpoint::Md).expect("serialize");
        assert_eq!(json, "\"md\"");
        for bp in Breakpoint::ALL {
            assert_eq!(bp.to_string(), bp.name());
        }
    }
}
