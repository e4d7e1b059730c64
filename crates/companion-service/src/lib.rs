//! Weather Companion service layer.
//!
//! [`WeatherCompanion`] is the single entry point an outer surface (HTTP
//! handlers, CLI) calls into.

pub mod companion;
pub mod error;

pub use companion::{CompanionResult, WeatherCompanion};
pub use error::{Cause, CompanionError, Operation};
