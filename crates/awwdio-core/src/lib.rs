//! awwdio-core - client library for awwdio.
//!
//! This crate holds the pieces a front end composes:
//! - `AuthStore`: the current user, persisted through a `DurableStore`
//! - `ApiClient`: requests carrying the bearer token, normalized into `ApiResponse`
//! - `theme`: the design tokens shared with the web client
//! - `Config` / `AppContext`: configuration and startup wiring

pub mod api;
pub mod auth;
pub mod config;
pub mod context;
pub mod models;
pub mod navigation;
pub mod storage;
pub mod theme;

pub use api::{ApiClient, ApiError, ApiResponse, RequestOptions};
pub use auth::{AuthEvent, AuthStore, LogoutReason, Subscription};
pub use config::{Config, StorageBackend};
pub use context::AppContext;
pub use models::{Channel, User};
pub use navigation::{Environment, Navigator, NoopNavigator, LOGIN_PATH};
pub use storage::{DurableStore, StorageError};
