//! Shared numeric helpers for the boundary tables.
//!
//! Beat and tatum grids are both described by the same kind of
//! table: cumulative normalized boundaries of a weighted split
//! of `[0, 1]`. The table is built once here, generically over
//! the numeric type, so the floating and the exact code paths
//! can not drift apart.

use fraction::Fraction;
use itertools::Itertools;

use super::DECIMAL_PRECISION;

/// Numbers a boundary table can be built from.
///
/// Implemented for `f64` (fast, approximate) and for
/// [`Fraction`] (exact). The `tolerance` widens interval
/// edges in [`find_position`]: values that picked up a few
/// ulps of conversion noise still land in the interval they
/// were generated from. The exact type needs none.
pub trait Unit:
    Copy
    + PartialOrd
    + std::ops::Add<Output = Self>
    + std::ops::Sub<Output = Self>
    + std::ops::Div<Output = Self>
{
    fn zero() -> Self;
    fn one() -> Self;
    fn tolerance() -> Self;
}
impl Unit for f64 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
    fn tolerance() -> Self {
        10f64.powi(-DECIMAL_PRECISION)
    }
}
impl Unit for Fraction {
    fn zero() -> Self {
        Fraction::new(0u64, 1u64)
    }
    fn one() -> Self {
        Fraction::new(1u64, 1u64)
    }
    fn tolerance() -> Self {
        Self::zero()
    }
}

/// Cumulative normalized boundaries of a weighted split of
/// `[0, 1]`.
///
/// # Returns
/// `[0, w0/W, (w0+w1)/W, …]` for total weight `W`; with
/// `close` the table is finished with `1`, giving one more
/// entry than there are weights.
///
/// # Example
/// ```
/// use metrum::primitives::cumulative_fractions;
///
/// assert_eq!(
///     cumulative_fractions(&[3.0, 3.0, 2.0], true),
///     vec![0.0, 0.375, 0.75, 1.0]
/// );
/// assert_eq!(
///     cumulative_fractions(&[1.0, 1.0], false),
///     vec![0.0, 0.5]
/// );
/// ```
pub fn cumulative_fractions<T: Unit>(
    weights: &[T],
    close: bool,
) -> Vec<T> {
    if weights.is_empty() {
        return Vec::new();
    }
    let total = weights
        .iter()
        .fold(T::zero(), |sum, weight| sum + *weight);
    let mut bounds = Vec::with_capacity(weights.len() + 1);
    bounds.push(T::zero());
    let mut running = T::zero();
    for weight in &weights[..weights.len() - 1] {
        running = running + *weight;
        bounds.push(running / total);
    }
    if close {
        bounds.push(T::one());
    }
    bounds
}

/// Locate the half-open interval of a boundary table that
/// contains `value`.
///
/// Exact-boundary ties resolve to the interval that *starts*
/// at the boundary.
///
/// # Returns
/// Interval index and its width, or `None` when `value` lies
/// outside `[0, 1)`.
///
/// # Example
/// ```
/// use metrum::primitives::find_position;
///
/// let bounds = [0.0, 0.375, 0.75, 1.0];
/// assert_eq!(find_position(&bounds, 0.5), Some((1, 0.375)));
/// assert_eq!(find_position(&bounds, 0.75), Some((2, 0.25)));
/// assert_eq!(find_position(&bounds, 1.0), None);
/// assert_eq!(find_position(&bounds, -0.5), None);
/// ```
pub fn find_position<T: Unit>(
    bounds: &[T],
    value: T,
) -> Option<(usize, T)> {
    bounds
        .iter()
        .tuple_windows()
        .find_position(|&(left, right)| {
            *left - T::tolerance() <= value
                && value < *right - T::tolerance()
        })
        .map(|(index, (left, right))| (index, *right - *left))
}
