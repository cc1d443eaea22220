#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// error types for the morphing operations.
pub mod error;

/// utilities for interpolation.
pub mod interpolation;

/// feature line based image morphing module.
pub mod morph;

/// module containing parallization utilities.
pub mod parallel;

pub use error::MorphError;
