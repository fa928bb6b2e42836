//! Subdivision of a single beat.

use fraction::Fraction;
use serde::{Deserialize, Serialize};

use super::fraction_tools::cumulative_fractions;
use super::{MetricalError, MetricalResult, Proportions};

/// How one beat subdivides into tatums.
///
/// Carries the tempo as well: `beat_duration_sec` is the
/// length of the whole beat in seconds. Tatum weights may be
/// unequal (swing), in which case their count must match
/// `tatums`.
///
/// # Example
/// ```
/// use metrum::{BeatInfo, Proportions};
///
/// let swing = BeatInfo::with_proportions(
///     2,
///     0.5,
///     Proportions::from(vec![2.0, 1.0]),
/// )?;
/// assert!(!swing.has_equal_proportions());
/// assert_eq!(
///     swing.fractions(true),
///     vec![0.0, 2.0 / 3.0, 1.0]
/// );
/// # Ok::<(), metrum::MetricalError>(())
/// ```
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct BeatInfo {
    tatums: u32,
    beat_duration_sec: f64,
    proportions: Proportions<f64>,
}
impl BeatInfo {
    /// Equal subdivision into `tatums` parts.
    pub fn new(
        tatums: u32,
        beat_duration_sec: f64,
    ) -> MetricalResult<Self> {
        Self::with_proportions(
            tatums,
            beat_duration_sec,
            Proportions::Equal,
        )
    }
    pub fn with_proportions(
        tatums: u32,
        beat_duration_sec: f64,
        proportions: Proportions<f64>,
    ) -> MetricalResult<Self> {
        let mut info = Self {
            tatums: 1,
            beat_duration_sec: 0.0,
            proportions: Proportions::Equal,
        };
        info.set_tatums(tatums)?;
        info.set_beat_duration_sec(beat_duration_sec)?;
        info.set_proportions(proportions)?;
        Ok(info)
    }

    pub fn tatums(&self) -> u32 {
        self.tatums
    }
    pub fn beat_duration_sec(&self) -> f64 {
        self.beat_duration_sec
    }
    pub fn proportions(&self) -> &Proportions<f64> {
        &self.proportions
    }

    /// Fails on zero. Stored proportions are not re-validated:
    /// keeping their length in sync is on the caller.
    pub fn set_tatums(
        &mut self,
        tatums: u32,
    ) -> MetricalResult<()> {
        if tatums == 0 {
            return Err(MetricalError::ZeroTatums);
        }
        self.tatums = tatums;
        Ok(())
    }
    pub fn set_beat_duration_sec(
        &mut self,
        seconds: f64,
    ) -> MetricalResult<()> {
        if seconds < 0.0 {
            return Err(MetricalError::NegativeBeatDuration(
                seconds,
            ));
        }
        self.beat_duration_sec = seconds;
        Ok(())
    }
    pub fn set_proportions(
        &mut self,
        proportions: Proportions<f64>,
    ) -> MetricalResult<()> {
        if let Some(weights) = proportions.explicit() {
            if weights.len() != self.tatums as usize {
                return Err(MetricalError::ProportionsLength {
                    expected: self.tatums as usize,
                    found: weights.len(),
                });
            }
            if weights.iter().any(|weight| *weight <= 0.0) {
                return Err(
                    MetricalError::NonPositiveProportion,
                );
            }
        }
        self.proportions = proportions;
        Ok(())
    }

    /// True for `Equal` and for an explicit row of ones.
    pub fn has_equal_proportions(&self) -> bool {
        match self.proportions.explicit() {
            None => true,
            Some(weights) => {
                weights.iter().all(|weight| *weight == 1.0)
            }
        }
    }

    /// Cumulative tatum boundaries in `[0, 1]`.
    pub fn fractions(&self, close: bool) -> Vec<f64> {
        match self.proportions.explicit() {
            None => cumulative_fractions(
                &vec![1.0; self.tatums as usize],
                close,
            ),
            Some(weights) => {
                cumulative_fractions(weights, close)
            }
        }
    }
    /// The same table as [`BeatInfo::fractions`], kept exact.
    pub fn fractions_exact(&self, close: bool) -> Vec<Fraction> {
        let weights: Vec<Fraction> =
            match self.proportions.explicit() {
                None => vec![
                    Fraction::new(1u64, 1u64);
                    self.tatums as usize
                ],
                Some(weights) => weights
                    .iter()
                    .map(|weight| Fraction::from(*weight))
                    .collect(),
            };
        cumulative_fractions(&weights, close)
    }

    /// Replace the subdivision by a `factor` times finer
    /// (`upscale`) or coarser one. The returned value always
    /// carries equal proportions; the receiver is untouched.
    ///
    /// # Errors
    /// - zero factor;
    /// - downscale factor that does not divide the tatum
    ///   count;
    /// - unequal proportions without `force` — the rescaled
    ///   weights would be undefined.
    pub fn rescale(
        &self,
        factor: u32,
        force: bool,
        upscale: bool,
    ) -> MetricalResult<Self> {
        if factor == 0 {
            return Err(MetricalError::ZeroFactor);
        }
        if !upscale && self.tatums % factor != 0 {
            return Err(MetricalError::IndivisibleFactor {
                factor,
                tatums: self.tatums,
            });
        }
        if !force && !self.has_equal_proportions() {
            return Err(MetricalError::UnequalRescale);
        }
        let tatums = match upscale {
            true => self.tatums * factor,
            false => self.tatums / factor,
        };
        log::debug!(
            "rescaled beat: {} -> {} tatums",
            self.tatums,
            tatums
        );
        Ok(Self {
            tatums,
            beat_duration_sec: self.beat_duration_sec,
            proportions: Proportions::Equal,
        })
    }
}
