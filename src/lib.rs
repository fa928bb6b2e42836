//! Exact addressing of musical time.
//!
//! Every musical event can be addressed two ways: as elapsed
//! real time, and as a hierarchical metrical position
//! `bar.beat.tatum.subtatum` under a (possibly irregular) time
//! signature. This crate holds the value types that make the
//! two address spaces convertible without cumulative rounding
//! error: [`BeatInfo`], [`MeterInfo`], [`MetricalContext`] and
//! [`MetricalPosition`].
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
//!     MetricalPosition::new(1, 3, 1, 0, context.clone())?;
//! assert_eq!(position.to_decimal(false), 1.5);
//! assert_eq!(position.metrical_weight(), 2);
//!
//! let back =
//!     MetricalPosition::from_decimal(1.5, &context)?;
//! assert_eq!(back, position);
//! # Ok::<(), metrum::MetricalError>(())
//! ```

pub mod primitives;

pub use primitives::{
    BeatInfo, MeterInfo, MetricalContext, MetricalError,
    MetricalPosition, MetricalResult, Proportions, Signature,
};
