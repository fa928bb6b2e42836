//! Relative duration weights of beats or tatums.

use serde::{Deserialize, Serialize};

/// Weights for an unequal split of a bar into beats or of a
/// beat into tatums.
///
/// `Equal` splits the parent evenly; `Explicit` carries one
/// weight per member. Length and positivity of explicit
/// weights are validated by the owning [`BeatInfo`] and
/// [`MeterInfo`] setters — the only construction paths.
///
/// [`BeatInfo`]: super::BeatInfo
/// [`MeterInfo`]: super::MeterInfo
#[derive(
    Debug, Default, PartialEq, Clone, Serialize, Deserialize,
)]
pub enum Proportions<T> {
    #[default]
    Equal,
    Explicit(Vec<T>),
}
impl<T> Proportions<T> {
    /// Explicit weights, if any.
    pub fn explicit(&self) -> Option<&[T]> {
        match self {
            Self::Equal => None,
            Self::Explicit(weights) => Some(weights),
        }
    }
}
impl<T> From<Vec<T>> for Proportions<T> {
    fn from(weights: Vec<T>) -> Self {
        Self::Explicit(weights)
    }
}
