//! Data models shared by the auth store and the API client.

pub mod user;

pub use user::{Channel, User};
