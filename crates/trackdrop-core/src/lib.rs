//! # trackdrop-core
//!
//! Core crate for Trackdrop. Contains configuration schemas, the tracing
//! setup helper, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Trackdrop crates.

pub mod config;
pub mod error;
pub mod logging;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
