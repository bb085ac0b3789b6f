//! REST API client module for the awwdio server.
//!
//! This module provides the `ApiClient` for making requests that carry
//! the current user's bearer token, plus typed helpers for the OTP login
//! and video endpoints.
//!
//! A 401 response is treated as an expired session.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod response;
pub mod transport;

pub use client::{ApiClient, RequestOptions};
pub use endpoints::{SendOtpResponse, VerifyOtpResponse, VideoTokenResponse};
pub use error::ApiError;
pub use response::ApiResponse;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError};
