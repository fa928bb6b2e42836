//! Grouping of a bar into beats.

use std::str::FromStr;

use fraction::Fraction;
use serde::{Deserialize, Serialize};

use super::fraction_tools::cumulative_fractions;
use super::{
    MetricalError, MetricalResult, Proportions, Signature,
};

/// Grouping of one bar into `period` beats on top of the
/// classical [`Signature`].
///
/// Asymmetric meters carry explicit beat weights: 5/8 played
/// 3+2 is `period = 2`, proportions `(3, 2)`. The period never
/// exceeds the numerator, and explicit weights never sum up to
/// more than the numerator.
///
/// # Example
/// ```
/// use metrum::MeterInfo;
///
/// let seven: MeterInfo = "7/8".parse()?;
/// assert_eq!(seven.period(), 3);
/// assert_eq!(
///     seven.fractions(true),
///     vec![0.0, 3.0 / 7.0, 5.0 / 7.0, 1.0]
/// );
/// assert_eq!(seven.accented_positions(), vec![1]);
/// # Ok::<(), metrum::MetricalError>(())
/// ```
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct MeterInfo {
    signature: Signature,
    period: u32,
    proportions: Proportions<u32>,
}
impl MeterInfo {
    /// Classical interpretation of the plain signature.
    pub fn new(
        numerator: u32,
        denominator: u32,
    ) -> MetricalResult<Self> {
        Ok(Self::from_signature(Signature::new(
            numerator,
            denominator,
        )?))
    }

    /// Classical interpretation: below a denominator of 8
    /// every numerator unit is a beat; from 8 up the bar
    /// groups into threes and twos (6/8 -> two equal beats,
    /// 7/8 -> 3+2+2).
    pub fn from_signature(signature: Signature) -> Self {
        let numerator = signature.numerator();
        if signature.denominator() < 8 {
            return Self {
                signature,
                period: numerator,
                proportions: Proportions::Equal,
            };
        }
        let groups = classical_beat_groups(numerator);
        let period = groups.len() as u32;
        let proportions =
            match groups.iter().all(|g| *g == groups[0]) {
                true => Proportions::Equal,
                false => Proportions::Explicit(groups),
            };
        Self {
            signature,
            period,
            proportions,
        }
    }

    /// Equal proportions assumed.
    pub fn with_period(
        signature: Signature,
        period: u32,
    ) -> MetricalResult<Self> {
        let mut meter = Self::from_signature(signature);
        meter.set_period(period)?;
        meter.proportions = Proportions::Equal;
        Ok(meter)
    }

    /// Period derived from the number of proportions.
    pub fn with_proportions(
        signature: Signature,
        proportions: Vec<u32>,
    ) -> MetricalResult<Self> {
        let mut meter = Self::from_signature(signature);
        meter.set_period(proportions.len() as u32)?;
        meter.set_proportions(proportions.into())?;
        Ok(meter)
    }

    pub fn signature(&self) -> Signature {
        self.signature
    }
    pub fn period(&self) -> u32 {
        self.period
    }
    pub fn proportions(&self) -> &Proportions<u32> {
        &self.proportions
    }

    /// Fails on zero or on a period above the numerator.
    /// Stored proportions are not re-validated: keeping their
    /// length in sync is on the caller.
    pub fn set_period(
        &mut self,
        period: u32,
    ) -> MetricalResult<()> {
        let numerator = self.signature.numerator();
        if period == 0 || period > numerator {
            return Err(MetricalError::InvalidPeriod {
                period,
                numerator,
            });
        }
        self.period = period;
        Ok(())
    }
    pub fn set_proportions(
        &mut self,
        proportions: Proportions<u32>,
    ) -> MetricalResult<()> {
        if let Some(weights) = proportions.explicit() {
            if weights.len() != self.period as usize {
                return Err(MetricalError::ProportionsLength {
                    expected: self.period as usize,
                    found: weights.len(),
                });
            }
            if weights.iter().any(|weight| *weight == 0) {
                return Err(
                    MetricalError::NonPositiveProportion,
                );
            }
            let sum = weights.iter().sum::<u32>();
            let numerator = self.signature.numerator();
            if sum > numerator {
                return Err(MetricalError::ProportionsSum {
                    sum,
                    numerator,
                });
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
                weights.iter().all(|weight| *weight == 1)
            }
        }
    }

    /// Cumulative beat boundaries in `[0, 1]`.
    pub fn fractions(&self, close: bool) -> Vec<f64> {
        match self.proportions.explicit() {
            None => cumulative_fractions(
                &vec![1.0; self.period as usize],
                close,
            ),
            Some(weights) => {
                let weights: Vec<f64> = weights
                    .iter()
                    .map(|weight| f64::from(*weight))
                    .collect();
                cumulative_fractions(&weights, close)
            }
        }
    }
    /// The same table as [`MeterInfo::fractions`], kept exact.
    pub fn fractions_exact(&self, close: bool) -> Vec<Fraction> {
        let weights: Vec<Fraction> =
            match self.proportions.explicit() {
                None => vec![
                    Fraction::new(1u64, 1u64);
                    self.period as usize
                ],
                Some(weights) => weights
                    .iter()
                    .map(|weight| {
                        Fraction::new(u64::from(*weight), 1u64)
                    })
                    .collect(),
            };
        cumulative_fractions(&weights, close)
    }

    /// Coarser grouping of the beats, used for accent
    /// placement.
    ///
    /// Below a denominator of 8 an explicit partition is taken
    /// verbatim; otherwise the period groups into twos with
    /// one trailing three when odd.
    pub fn super_beat_proportions(&self) -> Vec<u32> {
        if self.signature.denominator() < 8 {
            if let Some(weights) = self.proportions.explicit()
            {
                return weights.to_vec();
            }
        }
        super_beat_groups(self.period)
    }

    /// Beat indices at which a super-beat starts.
    ///
    /// Always contains 1. A one-beat bar (or a bare numerator
    /// of 1) is accented at 1 only.
    pub fn accented_positions(&self) -> Vec<u32> {
        if self.signature.numerator() == 1 || self.period == 1
        {
            return vec![1];
        }
        let groups = self.super_beat_proportions();
        let mut accents = vec![1];
        let mut next = 1;
        for group in &groups[..groups.len() - 1] {
            next += group;
            accents.push(next);
        }
        accents
    }
}
impl FromStr for MeterInfo {
    type Err = MetricalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_signature(s.parse()?))
    }
}

/// Threes-first decomposition of the numerator for compound
/// and additive meters: as many threes as leave an even rest
/// (5 -> 3+2, 7 -> 3+2+2, 8 -> 3+3+2).
fn classical_beat_groups(numerator: u32) -> Vec<u32> {
    if numerator < 2 {
        return vec![numerator];
    }
    let mut threes = numerator / 3;
    while (numerator - threes * 3) % 2 != 0 {
        threes -= 1;
    }
    let twos = (numerator - threes * 3) / 2;
    let mut groups = vec![3; threes as usize];
    groups.extend(vec![2; twos as usize]);
    groups
}

/// Twos-first grouping of the period, one trailing three when
/// odd (4 -> 2+2, 7 -> 2+2+3).
fn super_beat_groups(period: u32) -> Vec<u32> {
    if period < 2 {
        return vec![period];
    }
    let threes = period % 2;
    let twos = (period - threes * 3) / 2;
    let mut groups = vec![2; twos as usize];
    groups.extend(vec![3; threes as usize]);
    groups
}

#[cfg(test)]
mod tests {
    use super::{
        classical_beat_groups, super_beat_groups, MeterInfo,
    };
    use crate::primitives::{
        MetricalError, Proportions, Signature,
    };

    #[test]
    fn classical_groups() {
        assert_eq!(classical_beat_groups(1), vec![1]);
        assert_eq!(classical_beat_groups(4), vec![2, 2]);
        assert_eq!(classical_beat_groups(5), vec![3, 2]);
        assert_eq!(classical_beat_groups(6), vec![3, 3]);
        assert_eq!(classical_beat_groups(7), vec![3, 2, 2]);
        assert_eq!(classical_beat_groups(8), vec![3, 3, 2]);
        assert_eq!(classical_beat_groups(9), vec![3, 3, 3]);
    }
    #[test]
    fn super_groups() {
        assert_eq!(super_beat_groups(1), vec![1]);
        assert_eq!(super_beat_groups(2), vec![2]);
        assert_eq!(super_beat_groups(3), vec![3]);
        assert_eq!(super_beat_groups(4), vec![2, 2]);
        assert_eq!(super_beat_groups(7), vec![2, 2, 3]);
    }
    #[test]
    fn classical_interpretation() {
        let four: MeterInfo = "4/4".parse().unwrap();
        assert_eq!(four.period(), 4);
        assert_eq!(four.proportions(), &Proportions::Equal);

        let six: MeterInfo = "6/8".parse().unwrap();
        assert_eq!(six.period(), 2);
        assert_eq!(six.proportions(), &Proportions::Equal);

        let seven: MeterInfo = "7/8".parse().unwrap();
        assert_eq!(seven.period(), 3);
        assert_eq!(
            seven.proportions(),
            &Proportions::from(vec![3, 2, 2])
        );

        let three_eight: MeterInfo = "3/8".parse().unwrap();
        assert_eq!(three_eight.period(), 1);
        assert_eq!(
            three_eight.proportions(),
            &Proportions::Equal
        );
    }
    #[test]
    fn explicit_proportions() {
        let sig = Signature::new(8, 8).unwrap();
        let meter =
            MeterInfo::with_proportions(sig, vec![3, 3, 2])
                .unwrap();
        assert_eq!(meter.period(), 3);
        assert_eq!(
            meter.fractions(true),
            vec![0.0, 0.375, 0.75, 1.0]
        );
    }
    #[test]
    fn proportion_invariants() {
        let sig = Signature::new(5, 8).unwrap();
        assert_eq!(
            MeterInfo::with_proportions(sig, vec![3, 3])
                .unwrap_err(),
            MetricalError::ProportionsSum {
                sum: 6,
                numerator: 5
            }
        );
        assert_eq!(
            MeterInfo::with_proportions(sig, vec![3, 0])
                .unwrap_err(),
            MetricalError::NonPositiveProportion
        );
        assert_eq!(
            MeterInfo::with_period(sig, 6).unwrap_err(),
            MetricalError::InvalidPeriod {
                period: 6,
                numerator: 5
            }
        );
    }
    #[test]
    fn accents() {
        let four: MeterInfo = "4/4".parse().unwrap();
        assert_eq!(four.super_beat_proportions(), vec![2, 2]);
        assert_eq!(four.accented_positions(), vec![1, 3]);

        let seven: MeterInfo = "7/8".parse().unwrap();
        assert_eq!(seven.super_beat_proportions(), vec![3]);
        assert_eq!(seven.accented_positions(), vec![1]);

        let five = MeterInfo::with_proportions(
            Signature::new(5, 8).unwrap(),
            vec![3, 2],
        )
        .unwrap();
        assert_eq!(five.accented_positions(), vec![1]);

        let one: MeterInfo = "1/4".parse().unwrap();
        assert_eq!(one.accented_positions(), vec![1]);
    }
    #[test]
    fn explicit_partition_below_eight() {
        let waltz_pair = MeterInfo::with_proportions(
            Signature::new(6, 4).unwrap(),
            vec![3, 3],
        )
        .unwrap();
        assert_eq!(
            waltz_pair.super_beat_proportions(),
            vec![3, 3]
        );
        assert_eq!(
            waltz_pair.accented_positions(),
            vec![1, 4]
        );
    }
}
