//! # trackdrop-entity
//!
//! Domain entity models for Trackdrop. Every struct in this crate is
//! either a persisted document entry or a domain value object. All
//! entities derive `Debug`, `Clone`, `Serialize`, and `Deserialize`.

pub mod privilege;
pub mod share;

pub use privilege::Privilege;
pub use share::ShareRecord;
