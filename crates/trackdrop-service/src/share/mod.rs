//! Share-link lifecycle: token generation, persistence, and resolution.

pub mod link;
pub mod service;
pub mod store;

pub use link::LinkService;
pub use service::{CreatedShare, ShareLinkEntry, ShareLinkService, ShareView, SharedFile};
pub use store::ShareStore;
