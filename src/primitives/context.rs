//! The metrical grid in force at one moment.

use serde::{Deserialize, Serialize};

use super::{BeatInfo, MeterInfo, MetricalResult};

/// Pairing of a beat subdivision and a bar grouping.
///
/// Positions on the same grid share one context through
/// `Arc`; the context itself is never mutated. Rescaling
/// builds a new context, so other holders of the shared one
/// keep their grid.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct MetricalContext {
    beat: BeatInfo,
    meter: MeterInfo,
}
impl MetricalContext {
    pub fn new(beat: BeatInfo, meter: MeterInfo) -> Self {
        Self { beat, meter }
    }
    pub fn beat_info(&self) -> &BeatInfo {
        &self.beat
    }
    pub fn meter_info(&self) -> &MeterInfo {
        &self.meter
    }
    /// Tatums per beat.
    pub fn division(&self) -> u32 {
        self.beat.tatums()
    }
    /// Beats per bar.
    pub fn period(&self) -> u32 {
        self.meter.period()
    }

    /// New context with the beat subdivision rescaled, meter
    /// kept.
    pub fn rescale(
        &self,
        factor: u32,
        force: bool,
        upscale: bool,
    ) -> MetricalResult<Self> {
        Ok(Self {
            beat: self.beat.rescale(factor, force, upscale)?,
            meter: self.meter.clone(),
        })
    }

    /// Rough bar length in seconds.
    ///
    /// Equal beats span `period * beat_duration_sec`; unequal
    /// beat weights span half their sum per beat duration, the
    /// scale the classical-signature convention uses.
    pub fn estimate_bar_length_sec(&self) -> f64 {
        if self.meter.has_equal_proportions() {
            return self.meter.period() as f64
                * self.beat.beat_duration_sec();
        }
        let sum: u32 = self
            .meter
            .proportions()
            .explicit()
            .unwrap_or_default()
            .iter()
            .sum();
        f64::from(sum) * self.beat.beat_duration_sec() / 2.0
    }
}
