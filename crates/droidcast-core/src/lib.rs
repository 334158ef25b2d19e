//! # droidcast-core - Dispatch Types
//!
//! Foundation crate for droidcast. Provides the broadcast dispatcher, its
//! platform capability trait, domain types, error handling, and logging
//! setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on
//! external crates (serde, thiserror, tracing, trait-variant).
//!
//! ## Public API
//!
//! ### Dispatch (`dispatch`)
//! - [`BroadcastDispatcher`] - Validates an action and attempts exactly one
//!   emission through its injected emitter
//! - [`IntentEmitter`] - The host platform's broadcast facility as a
//!   one-method capability trait
//!
//! ### Domain Types (`types`)
//! - [`BroadcastIntent`] - A validated per-call broadcast request
//! - [`DispatchReport`] - `{success, message?}` outcome returned to callers
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use droidcast_core::prelude::*;
//! ```

pub mod dispatch;
pub mod error;
pub mod logging;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;
pub mod types;

/// Prelude for common imports used throughout all droidcast crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use dispatch::{BroadcastDispatcher, IntentEmitter, LocalIntentEmitter};
pub use error::{Error, Result, ResultExt};
pub use types::{BroadcastIntent, DispatchReport};
