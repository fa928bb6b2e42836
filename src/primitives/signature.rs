//! Plain time-signature value.

use std::fmt;
use std::str::FromStr;

use fraction::Fraction;
use serde::{Deserialize, Serialize};

use super::{MetricalError, MetricalResult};

/// Classical time signature: numerator over denominator.
///
/// Both parts are strictly positive. [`MeterInfo`] extends it
/// with the bar grouping; the signature itself only carries
/// the notated value.
///
/// [`MeterInfo`]: super::MeterInfo
#[derive(
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Clone,
    Copy,
    Hash,
    Serialize,
    Deserialize,
)]
pub struct Signature {
    numerator: u32,
    denominator: u32,
}
impl Signature {
    pub fn new(
        numerator: u32,
        denominator: u32,
    ) -> MetricalResult<Self> {
        if numerator == 0 || denominator == 0 {
            return Err(MetricalError::ZeroSignature);
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }
    pub fn numerator(&self) -> u32 {
        self.numerator
    }
    pub fn denominator(&self) -> u32 {
        self.denominator
    }
    /// Bar length in whole notes.
    pub fn as_fraction(&self) -> Fraction {
        Fraction::new(
            self.numerator as u64,
            self.denominator as u64,
        )
    }
}
impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}
impl FromStr for Signature {
    type Err = MetricalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err =
            || MetricalError::SignatureParse(s.to_string());
        let (numerator, denominator) =
            s.trim().split_once('/').ok_or_else(parse_err)?;
        let numerator =
            numerator.trim().parse().map_err(|_| parse_err())?;
        let denominator = denominator
            .trim()
            .parse()
            .map_err(|_| parse_err())?;
        Self::new(numerator, denominator)
    }
}
