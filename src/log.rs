//! Conditional logging macros.
//!
//! When the `tracing` feature is enabled, `debug!` is `tracing::debug!`.
//! When disabled, it expands to nothing, so layout code can log derived
//! values without the library pulling in a subscriber.

#[cfg(feature = "tracing")]
pub use tracing::debug;

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::debug;
