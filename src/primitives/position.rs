//! Addresses of single instants on the metrical grid.
//!
//! A [`MetricalPosition`] is the `bar.beat.tatum.subtatum`
//! address of one instant under the [`MetricalContext`] in
//! force at that bar. Indices are 1-based except the
//! subtatum, a 0-based tie-break below tatum resolution that
//! carries no duration of its own.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use metrum::{
//!     BeatInfo, MeterInfo, MetricalContext, MetricalPosition,
//! };
//!
//! let context = Arc::new(MetricalContext::new(
//!     BeatInfo::new(4, 0.5)?,
//!     MeterInfo::new(4, 4)?,
//! ));
//! let position =
//!     MetricalPosition::new(2, 4, 4, 0, context.clone())?;
//!
//! // Carries roll through beats into bars, both directions.
//! assert_eq!(
//!     position.add_tatum(1),
//!     MetricalPosition::new(3, 1, 1, 0, context.clone())?
//! );
//! assert_eq!(
//!     position.add_beat(-4),
//!     MetricalPosition::new(1, 4, 4, 0, context.clone())?
//! );
//!
//! // Decimal form is bar-anchored: bar + offset in [0, 1).
//! assert_eq!(position.to_decimal(false), 2.9375);
//! let back = MetricalPosition::from_decimal(
//!     2.9375, &context,
//! )?;
//! assert_eq!(back, position);
//! # Ok::<(), metrum::MetricalError>(())
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use fraction::Fraction;
use serde::{Deserialize, Serialize};

use super::fraction_tools::{
    cumulative_fractions, find_position,
};
use super::{
    MetricalContext, MetricalError, MetricalResult,
    DECIMAL_PRECISION,
};

/// Address of one instant: bar, beat, tatum and subtatum
/// under the context in force at that bar.
///
/// The bar may be any integer — carry arithmetic is free to
/// leave the notated range. Beat and tatum stay inside the
/// context's period and division; constructing an address
/// outside of them fails instead of clamping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricalPosition {
    bar: i64,
    beat: u32,
    tatum: u32,
    subtatum: u32,
    context: Arc<MetricalContext>,
}
impl MetricalPosition {
    /// # Errors
    /// Fails when `beat` leaves `[1, period]` or `tatum`
    /// leaves `[1, division]`.
    pub fn new(
        bar: i64,
        beat: u32,
        tatum: u32,
        subtatum: u32,
        context: Arc<MetricalContext>,
    ) -> MetricalResult<Self> {
        let period = context.period();
        if beat < 1 || beat > period {
            return Err(MetricalError::BeatOutOfRange {
                beat,
                period,
            });
        }
        let division = context.division();
        if tatum < 1 || tatum > division {
            return Err(MetricalError::TatumOutOfRange {
                tatum,
                division,
            });
        }
        Ok(Self {
            bar,
            beat,
            tatum,
            subtatum,
            context,
        })
    }

    pub fn bar(&self) -> i64 {
        self.bar
    }
    /// 1-based beat inside the bar.
    pub fn beat(&self) -> u32 {
        self.beat
    }
    /// 1-based tatum inside the beat.
    pub fn tatum(&self) -> u32 {
        self.tatum
    }
    pub fn subtatum(&self) -> u32 {
        self.subtatum
    }
    pub fn context(&self) -> &Arc<MetricalContext> {
        &self.context
    }

    /// Moved by `count` tatums, carrying overflow into beats
    /// and bars. Negative counts move backwards.
    pub fn add_tatum(&self, count: i64) -> Self {
        let division = i64::from(self.context.division());
        let shifted = i64::from(self.tatum) - 1 + count;
        let mut moved =
            self.add_beat(shifted.div_euclid(division));
        moved.tatum =
            (shifted.rem_euclid(division) + 1) as u32;
        moved
    }
    /// Moved by `count` beats, carrying overflow into bars.
    pub fn add_beat(&self, count: i64) -> Self {
        let period = i64::from(self.context.period());
        let shifted = i64::from(self.beat) - 1 + count;
        let mut moved =
            self.add_bar(shifted.div_euclid(period));
        moved.beat = (shifted.rem_euclid(period) + 1) as u32;
        moved
    }
    pub fn add_bar(&self, count: i64) -> Self {
        let mut moved = self.clone();
        moved.bar += count;
        moved
    }

    /// The same instant re-addressed at a new tatum division.
    ///
    /// One of the divisions must be a multiple of the other;
    /// the factor between them rescales a copy of the context
    /// (holders of the shared one keep their grid) and the
    /// tatum index moves to the matching slot of the new
    /// grid.
    ///
    /// # Errors
    /// - divisions that are not multiples of each other;
    /// - unequal tatum proportions without `force`.
    pub fn rescale(
        &self,
        division: u32,
        force: bool,
    ) -> MetricalResult<Self> {
        if division == 0 {
            return Err(MetricalError::ZeroFactor);
        }
        let current = self.context.division();
        let (factor, upscale) = if division % current == 0 {
            (division / current, true)
        } else if current % division == 0 {
            (current / division, false)
        } else {
            return Err(MetricalError::IncompatibleDivision {
                from: current,
                to: division,
            });
        };
        let context =
            self.context.rescale(factor, force, upscale)?;
        let tatum = match upscale {
            true => (self.tatum - 1) * factor + 1,
            false => (self.tatum - 1) / factor + 1,
        };
        log::debug!(
            "rescaled position {}: division {} -> {}",
            self,
            current,
            division
        );
        Ok(Self {
            bar: self.bar,
            beat: self.beat,
            tatum,
            subtatum: self.subtatum,
            context: Arc::new(context),
        })
    }

    /// Bar-anchored decimal form: `bar + offset` with the
    /// offset in `[0, 1)`.
    ///
    /// With `exact` unequal tatum proportions contribute;
    /// without it tatums count as equal. The subtatum never
    /// contributes: below tatum resolution no timing exists.
    pub fn to_decimal(&self, exact: bool) -> f64 {
        let beat_bounds =
            self.context.meter_info().fractions(true);
        let beat_pos = beat_bounds[(self.beat - 1) as usize];
        let beat_dur =
            beat_bounds[self.beat as usize] - beat_pos;
        let tatum_bounds = match exact {
            true => {
                self.context.beat_info().fractions(true)
            }
            false => cumulative_fractions(
                &vec![
                    1.0;
                    self.context.division() as usize
                ],
                true,
            ),
        };
        let tatum_pos =
            beat_dur * tatum_bounds[(self.tatum - 1) as usize];
        self.bar as f64 + beat_pos + tatum_pos
    }

    /// The same address as an exact rational, immune to
    /// accumulated rounding over long sequences.
    pub fn to_fraction(&self) -> Fraction {
        let beat_bounds =
            self.context.meter_info().fractions_exact(true);
        let beat_pos = beat_bounds[(self.beat - 1) as usize];
        let beat_dur =
            beat_bounds[self.beat as usize] - beat_pos;
        let tatum_bounds =
            self.context.beat_info().fractions_exact(true);
        let bar = Fraction::new(self.bar.unsigned_abs(), 1u64);
        let bar = match self.bar < 0 {
            true => -bar,
            false => bar,
        };
        bar + beat_pos
            + beat_dur
                * tatum_bounds[(self.tatum - 1) as usize]
    }

    /// Inverse of [`MetricalPosition::to_decimal`]: the grid
    /// address of a bar-anchored decimal under the given
    /// context. The subtatum of the result is 0.
    ///
    /// # Errors
    /// [`MetricalError::ConversionMiss`] when the fractional
    /// part escapes every beat or tatum interval.
    pub fn from_decimal(
        value: f64,
        context: &Arc<MetricalContext>,
    ) -> MetricalResult<Self> {
        let bar = value.floor();
        let mut remainder = value - bar;
        let beat_bounds =
            context.meter_info().fractions(true);
        let (beat_index, beat_dur) =
            find_position(&beat_bounds, remainder)
                .ok_or(MetricalError::ConversionMiss(value))?;
        remainder =
            (remainder - beat_bounds[beat_index]) / beat_dur;
        let tatum_bounds =
            context.beat_info().fractions(true);
        let (tatum_index, _) =
            find_position(&tatum_bounds, remainder)
                .ok_or(MetricalError::ConversionMiss(value))?;
        Self::new(
            bar as i64,
            beat_index as u32 + 1,
            tatum_index as u32 + 1,
            0,
            context.clone(),
        )
    }

    /// True unless both addresses share bar and beat while
    /// their contexts subdivide that beat differently.
    pub fn has_consistent_beat_info(&self, other: &Self) -> bool {
        if self.bar != other.bar || self.beat != other.beat {
            return true;
        }
        self.context.beat_info() == other.context.beat_info()
    }
    /// True unless both addresses share a bar while their
    /// contexts group it differently.
    pub fn has_consistent_meter_info(
        &self,
        other: &Self,
    ) -> bool {
        if self.bar != other.bar {
            return true;
        }
        self.context.meter_info()
            == other.context.meter_info()
    }
    /// Addresses that may coexist in one sequence: wherever
    /// they share a bar (and beat), they agree on the grid.
    pub fn consistent(&self, other: &Self) -> bool {
        self.has_consistent_beat_info(other)
            && self.has_consistent_meter_info(other)
    }

    /// Three-level accent: 2 on super-beat starts, 1 on other
    /// beat starts, 0 off the beat.
    pub fn metrical_weight(&self) -> u8 {
        if self.tatum != 1 || self.subtatum > 1 {
            return 0;
        }
        let accented =
            self.context.meter_info().accented_positions();
        match accented.contains(&self.beat) {
            true => 2,
            false => 1,
        }
    }
}
impl fmt::Display for MetricalPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.bar, self.beat, self.tatum, self.subtatum
        )
    }
}
impl PartialEq for MetricalPosition {
    fn eq(&self, other: &Self) -> bool {
        self.bar == other.bar
            && self.beat == other.beat
            && self.tatum == other.tatum
            && self.subtatum == other.subtatum
    }
}
impl PartialOrd for MetricalPosition {
    /// Decimal forms compared at 10 decimal places, floating
    /// noise counting as equality; ties broken by subtatum.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let scale = 10f64.powi(DECIMAL_PRECISION);
        let diff = ((self.to_decimal(false)
            - other.to_decimal(false))
            * scale)
            .round();
        if diff < 0.0 {
            return Some(Ordering::Less);
        }
        if diff > 0.0 {
            return Some(Ordering::Greater);
        }
        self.subtatum.partial_cmp(&other.subtatum)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::MetricalPosition;
    use crate::primitives::{
        BeatInfo, MeterInfo, MetricalContext, MetricalError,
    };

    fn context() -> Arc<MetricalContext> {
        Arc::new(MetricalContext::new(
            BeatInfo::new(4, 0.5).unwrap(),
            MeterInfo::new(4, 4).unwrap(),
        ))
    }

    #[test]
    fn out_of_range_fails() {
        let ctx = context();
        assert_eq!(
            MetricalPosition::new(1, 5, 1, 0, ctx.clone())
                .unwrap_err(),
            MetricalError::BeatOutOfRange {
                beat: 5,
                period: 4
            }
        );
        assert_eq!(
            MetricalPosition::new(1, 1, 0, 0, ctx.clone())
                .unwrap_err(),
            MetricalError::TatumOutOfRange {
                tatum: 0,
                division: 4
            }
        );
    }
    #[test]
    fn carry_chain() {
        let ctx = context();
        let pos =
            MetricalPosition::new(1, 1, 1, 0, ctx.clone())
                .unwrap();
        // 17 tatums = a full bar and one tatum.
        let moved = pos.add_tatum(17);
        assert_eq!(
            moved,
            MetricalPosition::new(2, 1, 2, 0, ctx.clone())
                .unwrap()
        );
        assert_eq!(moved.add_tatum(-17), pos);
        let back = pos.add_beat(-1);
        assert_eq!(
            back,
            MetricalPosition::new(0, 4, 1, 0, ctx.clone())
                .unwrap()
        );
    }
    #[test]
    fn ordering_and_ties() {
        let ctx = context();
        let a =
            MetricalPosition::new(1, 2, 1, 0, ctx.clone())
                .unwrap();
        let b =
            MetricalPosition::new(1, 2, 2, 0, ctx.clone())
                .unwrap();
        assert!(a < b);
        assert!(b > a);
        let grace =
            MetricalPosition::new(1, 2, 1, 1, ctx.clone())
                .unwrap();
        assert!(a < grace);
        assert!(a != grace);
        assert!(a <= a);
    }
    #[test]
    fn consistency() {
        let ctx = context();
        let other = Arc::new(MetricalContext::new(
            BeatInfo::new(3, 0.5).unwrap(),
            MeterInfo::new(4, 4).unwrap(),
        ));
        let a =
            MetricalPosition::new(1, 2, 1, 0, ctx.clone())
                .unwrap();
        let same_beat =
            MetricalPosition::new(1, 2, 3, 0, other.clone())
                .unwrap();
        let other_bar =
            MetricalPosition::new(2, 2, 1, 0, other.clone())
                .unwrap();
        assert!(!a.has_consistent_beat_info(&same_beat));
        assert!(!a.consistent(&same_beat));
        assert!(a.has_consistent_beat_info(&other_bar));
        assert!(a.consistent(&other_bar));
    }
    #[test]
    fn weight_levels() {
        let ctx = context();
        let weight = |beat, tatum, subtatum| {
            MetricalPosition::new(
                1,
                beat,
                tatum,
                subtatum,
                ctx.clone(),
            )
            .unwrap()
            .metrical_weight()
        };
        assert_eq!(weight(1, 1, 0), 2);
        assert_eq!(weight(3, 1, 0), 2);
        assert_eq!(weight(2, 1, 0), 1);
        assert_eq!(weight(1, 2, 0), 0);
        assert_eq!(weight(1, 1, 1), 2);
        assert_eq!(weight(1, 1, 2), 0);
    }
    #[test]
    fn display() {
        let pos = MetricalPosition::new(
            4,
            2,
            3,
            0,
            context(),
        )
        .unwrap();
        assert_eq!(pos.to_string(), "4.2.3.0");
    }
}
