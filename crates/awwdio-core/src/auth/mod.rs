//! Authentication state for the client session.
//!
//! This module provides:
//! - `AuthStore`: the current user, mirrored into durable storage
//! - `AuthEvent`: typed change notifications for subscribers
//!
//! The session survives restarts through the `user` and `token` storage keys.

pub mod events;
pub mod store;

pub use events::{AuthEvent, LogoutReason};
pub use store::{AuthStore, Subscription};
