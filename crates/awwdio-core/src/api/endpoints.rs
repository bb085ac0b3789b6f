//! Typed calls for the awwdio server API.

use reqwest::{Method, Url};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::models::{Channel, User};

use super::client::{ApiClient, RequestOptions};
use super::transport::Transport;
use super::{ApiError, ApiResponse};

const SEND_OTP_PATH: &str = "/auth/send-otp";
const VERIFY_OTP_PATH: &str = "/auth/verify-otp";
const VIDEO_TOKEN_PATH: &str = "/video/token";
const VIDEO_ROOM_PATH: &str = "/video/room";

#[derive(Debug, Clone, Serialize)]
pub struct SendOtpRequest<'a> {
    pub channel: Channel,
    pub to: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct SendOtpResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyOtpRequest<'a> {
    pub channel: Channel,
    pub to: &'a str,
    pub otp: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct VerifyOtpResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct VideoTokenRequest<'a> {
    room: &'a str,
}

/// Access token granting the current user entry to a video room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct VideoTokenResponse {
    pub token: String,
}

impl<T: Transport> ApiClient<T> {
    /// Ask the server to send a one-time password to `to`.
    pub async fn send_otp(&self, channel: Channel, to: &str) -> ApiResponse<SendOtpResponse> {
        self.post(SEND_OTP_PATH, &SendOtpRequest { channel, to }).await
    }

    /// Check a one-time password and, when the server issues a session
    /// token, log the user in with it.
    ///
    /// A 401 from this endpoint means the code was wrong, so it is reported
    /// as an ordinary failure instead of expiring the session.
    pub async fn verify_otp(&self, channel: Channel, to: &str, otp: &str) -> ApiResponse<VerifyOtpResponse> {
        let options = match RequestOptions::json(Method::POST, &VerifyOtpRequest { channel, to, otp }) {
            Ok(options) => options.without_session_expiry(),
            Err(e) => return e.into(),
        };

        let response: ApiResponse<VerifyOtpResponse> = self.fetch(VERIFY_OTP_PATH, options).await;
        if let ApiResponse::Data {
            data: VerifyOtpResponse {
                success: true,
                token: Some(token),
            },
            ..
        } = &response
        {
            let user = User::new(channel, to).with_token(token.clone());
            if let Err(e) = self.store().login(user) {
                warn!(error = %e, "Logged in, but the session could not be saved");
            }
            info!(channel = %channel, "OTP verified");
        }
        response
    }

    /// Fetch a video access token for `room`.
    pub async fn video_token(&self, room: &str) -> ApiResponse<VideoTokenResponse> {
        if room.trim().is_empty() {
            return ApiError::InvalidRequest("Room name is required".to_string()).into();
        }
        self.post(VIDEO_TOKEN_PATH, &VideoTokenRequest { room }).await
    }

    /// Fetch the details of a video room.
    pub async fn room(&self, room_name: &str) -> ApiResponse<serde_json::Value> {
        let mut url = match Url::parse(&self.resolve(VIDEO_ROOM_PATH)) {
            Ok(url) => url,
            Err(e) => return ApiError::InvalidRequest(format!("invalid room URL: {}", e)).into(),
        };
        url.query_pairs_mut().append_pair("roomName", room_name);
        self.get(url.as_str()).await
    }
}
