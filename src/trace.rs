//! Crate-internal logging shim.
//!
//! Expands to a `tracing::trace!` event when the `tracing` feature is enabled
//! and to nothing otherwise, so call sites carry no `cfg` attributes.

macro_rules! trace {
    ($($argument:tt)*) => {
        #[cfg(feature = "tracing")]
        {
            ::tracing::trace!($($argument)*);
        }
    };
}

pub(crate) use trace;
