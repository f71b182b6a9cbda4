//! Library operations: browsing, uploads, folder management, downloads.

pub mod service;

pub use service::{DeleteOutcome, LibraryService, UploadOutcome};
