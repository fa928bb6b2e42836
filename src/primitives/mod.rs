//! Value types of the metrical grid.
//!
//! Leaf-first: [`BeatInfo`] describes how one beat subdivides
//! into tatums, [`MeterInfo`] how a bar groups into beats on
//! top of a plain [`Signature`]. A [`MetricalContext`] pairs
//! the two, and a [`MetricalPosition`] addresses one instant
//! under such a context.
//!
//! Contexts are immutable and shared between positions through
//! `Arc`; every transforming operation builds a new value, so
//! two positions can never disagree about a grid they did not
//! both opt into.

pub mod beat_info;
pub mod context;
pub mod fraction_tools;
pub mod meter_info;
pub mod position;
pub mod proportions;
pub mod signature;

pub use beat_info::BeatInfo;
pub use context::MetricalContext;
pub use fraction_tools::{cumulative_fractions, find_position};
pub use meter_info::MeterInfo;
pub use position::MetricalPosition;
pub use proportions::Proportions;
pub use signature::Signature;

/// Decimal places considered significant when positions are
/// compared or matched against boundary tables.
static DECIMAL_PRECISION: i32 = 10;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetricalError {
    #[error("number of tatums must be positive")]
    ZeroTatums,
    #[error("beat duration can not be negative: {0}")]
    NegativeBeatDuration(f64),
    #[error("expected {expected} proportions, found {found}")]
    ProportionsLength { expected: usize, found: usize },
    #[error("proportions must be positive")]
    NonPositiveProportion,
    #[error(
        "period {period} is out of range for numerator {numerator}"
    )]
    InvalidPeriod { period: u32, numerator: u32 },
    #[error(
        "beat proportions sum up to {sum}, \
        more than the numerator {numerator}"
    )]
    ProportionsSum { sum: u32, numerator: u32 },
    #[error("beat {beat} is out of range for period {period}")]
    BeatOutOfRange { beat: u32, period: u32 },
    #[error(
        "tatum {tatum} is out of range for division {division}"
    )]
    TatumOutOfRange { tatum: u32, division: u32 },
    #[error("rescale factor must be positive")]
    ZeroFactor,
    #[error(
        "factor {factor} does not divide {tatums} tatums evenly"
    )]
    IndivisibleFactor { factor: u32, tatums: u32 },
    #[error(
        "can not rescale unequal proportions without force"
    )]
    UnequalRescale,
    #[error(
        "divisions {from} and {to} are not multiples of each other"
    )]
    IncompatibleDivision { from: u32, to: u32 },
    #[error("value {0} has no position on the metrical grid")]
    ConversionMiss(f64),
    #[error("can not parse time signature from `{0}`")]
    SignatureParse(String),
    #[error(
        "time signature needs positive numerator and denominator"
    )]
    ZeroSignature,
}
pub type MetricalResult<T> = Result<T, MetricalError>;
