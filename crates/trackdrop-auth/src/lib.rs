//! # trackdrop-auth
//!
//! The credential gate for Trackdrop. There are no user accounts; a
//! single shared view password and a single shared edit password map a
//! submitted credential to a [`Privilege`] capability, which callers
//! thread through every service operation.
//!
//! [`Privilege`]: trackdrop_entity::Privilege

pub mod gate;

pub use gate::CredentialGate;
