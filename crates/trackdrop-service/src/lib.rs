//! # trackdrop-service
//!
//! Business logic service layer for Trackdrop. Services orchestrate the
//! path resolver, listings, and the persisted share store to implement
//! application-level use cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references. Every privileged operation
//! takes an explicit [`Privilege`](trackdrop_entity::Privilege) value.

pub mod library;
pub mod share;

pub use library::{DeleteOutcome, LibraryService, UploadOutcome};
pub use share::{CreatedShare, LinkService, ShareLinkEntry, ShareLinkService, ShareStore, ShareView};
