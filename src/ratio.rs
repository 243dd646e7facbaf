//! # Aspect Ratios
//!
//! The fixed set of aspect ratios the downstream generation service
//! supports, plus the resolver that maps arbitrary image dimensions onto
//! the closest member of that set.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CroquisError;

/// A supported target aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "4:3")]
    FourThree,
    #[serde(rename = "3:4")]
    ThreeFour,
    #[serde(rename = "16:9")]
    SixteenNine,
    #[serde(rename = "9:16")]
    NineSixteen,
}

impl AspectRatio {
    /// All supported ratios, in resolution priority order.
    ///
    /// [`AspectRatio::closest`] breaks ties by this order: the first entry
    /// with the minimal difference wins.
    pub const ALL: [AspectRatio; 5] = [
        AspectRatio::Square,
        AspectRatio::FourThree,
        AspectRatio::ThreeFour,
        AspectRatio::SixteenNine,
        AspectRatio::NineSixteen,
    ];

    /// Width/height quotient.
    pub fn value(self) -> f64 {
        match self {
            AspectRatio::Square => 1.0,
            AspectRatio::FourThree => 4.0 / 3.0,
            AspectRatio::ThreeFour => 3.0 / 4.0,
            AspectRatio::SixteenNine => 16.0 / 9.0,
            AspectRatio::NineSixteen => 9.0 / 16.0,
        }
    }

    /// The ratio name as the generation service expects it, e.g. `"16:9"`.
    pub fn name(self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::FourThree => "4:3",
            AspectRatio::ThreeFour => "3:4",
            AspectRatio::SixteenNine => "16:9",
            AspectRatio::NineSixteen => "9:16",
        }
    }

    /// Parse a `"w:h"` name from the supported set.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.name() == s)
    }

    /// Resolve arbitrary positive dimensions to the closest supported
    /// ratio (minimal absolute difference of quotients; first minimal
    /// entry in [`AspectRatio::ALL`] wins a tie).
    pub fn closest(width: u32, height: u32) -> Result<Self, CroquisError> {
        if width == 0 || height == 0 {
            return Err(CroquisError::InvalidDimensions {
                width: width as i64,
                height: height as i64,
            });
        }
        let ratio = width as f64 / height as f64;
        let mut best = Self::ALL[0];
        let mut best_diff = (best.value() - ratio).abs();
        for candidate in &Self::ALL[1..] {
            let diff = (candidate.value() - ratio).abs();
            if diff < best_diff {
                best = *candidate;
                best_diff = diff;
            }
        }
        Ok(best)
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ratio selection for the outpaint composer: an explicit ratio, or
/// "match the source image" (resolved against the source dimensions).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioTarget {
    Ratio(AspectRatio),
    MatchSource,
}
