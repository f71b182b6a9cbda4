//! Share domain entities.

pub mod model;

pub use model::{SHARE_TTL_HOURS, ShareRecord};
