use serde::Serialize;

use super::ApiError;

/// Outcome of a single request: a typed payload or an error message,
/// always with the status code (`0` when no server response was seen).
///
/// Serializes as `{"data": ..., "status": ...}` or
/// `{"error": "...", "status": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ApiResponse<T> {
    Data { data: T, status: u16 },
    Error { error: String, status: u16 },
}

impl<T> ApiResponse<T> {
    pub fn status(&self) -> u16 {
        match self {
            ApiResponse::Data { status, .. } | ApiResponse::Error { status, .. } => *status,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ApiResponse::Data { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ApiResponse::Data { data, .. } => Some(data),
            ApiResponse::Error { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ApiResponse::Data { .. } => None,
            ApiResponse::Error { error, .. } => Some(error),
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            ApiResponse::Data { data, .. } => Some(data),
            ApiResponse::Error { .. } => None,
        }
    }

    /// Convert into a `Result` for callers that want to use `?`.
    ///
    /// The error kind is recovered from the status and message, so a
    /// status `0` error built from [`ApiError::InvalidResponse`] or
    /// [`ApiError::InvalidRequest`] comes back as that variant.
    pub fn into_result(self) -> Result<T, ApiError> {
        match self {
            ApiResponse::Data { data, .. } => Ok(data),
            ApiResponse::Error { error, status: 0 } => Err(no_response_error(error)),
            ApiResponse::Error { error, status: 401 } if error == ApiError::Unauthorized.to_string() => {
                Err(ApiError::Unauthorized)
            }
            ApiResponse::Error { error, status } => Err(ApiError::RequestFailed {
                status,
                message: error,
            }),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        match self {
            ApiResponse::Data { data, status } => ApiResponse::Data {
                data: f(data),
                status,
            },
            ApiResponse::Error { error, status } => ApiResponse::Error { error, status },
        }
    }
}

fn no_response_error(message: String) -> ApiError {
    if let Some(detail) = message.strip_prefix("Invalid response: ") {
        ApiError::InvalidResponse(detail.to_string())
    } else if let Some(detail) = message.strip_prefix("Invalid request: ") {
        ApiError::InvalidRequest(detail.to_string())
    } else {
        ApiError::Network(message)
    }
}

impl<T> From<ApiError> for ApiResponse<T> {
    fn from(err: ApiError) -> Self {
        ApiResponse::Error {
            status: err.status(),
            error: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_like_web_client_shape() {
        let ok: ApiResponse<serde_json::Value> = ApiResponse::Data {
            data: serde_json::json!({"x": 1}),
            status: 200,
        };
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            serde_json::json!({"data": {"x": 1}, "status": 200})
        );

        let err: ApiResponse<()> = ApiError::Unauthorized.into();
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            serde_json::json!({"error": "Authentication required", "status": 401})
        );
    }

    #[test]
    fn test_accessors() {
        let ok = ApiResponse::Data { data: 5, status: 201 };
        assert!(ok.is_ok());
        assert_eq!(ok.data(), Some(&5));
        assert_eq!(ok.error(), None);
        assert_eq!(ok.status(), 201);

        let err: ApiResponse<i32> = ApiError::network("timeout").into();
        assert!(!err.is_ok());
        assert_eq!(err.error(), Some("timeout"));
        assert_eq!(err.status(), 0);
    }

    #[test]
    fn test_into_result_restores_error_kind() {
        let unauthorized: ApiResponse<()> = ApiError::Unauthorized.into();
        assert_eq!(unauthorized.into_result(), Err(ApiError::Unauthorized));

        let failed: ApiResponse<()> = ApiError::from_status(404, r#"{"error":"gone"}"#).into();
        assert_eq!(
            failed.into_result(),
            Err(ApiError::RequestFailed {
                status: 404,
                message: "gone".to_string()
            })
        );

        let network: ApiResponse<()> = ApiError::network("").into();
        assert_eq!(network.into_result(), Err(ApiError::Network("Network error".to_string())));

        let malformed: ApiResponse<()> = ApiError::InvalidResponse("expected value at line 1".to_string()).into();
        assert_eq!(malformed.status(), 0);
        assert_eq!(
            malformed.into_result(),
            Err(ApiError::InvalidResponse("expected value at line 1".to_string()))
        );

        let rejected: ApiResponse<()> = ApiError::InvalidRequest("Room name is required".to_string()).into();
        assert_eq!(
            rejected.into_result(),
            Err(ApiError::InvalidRequest("Room name is required".to_string()))
        );

        assert_eq!(ApiResponse::Data { data: 1, status: 200 }.into_result(), Ok(1));
    }

    #[test]
    fn test_map_keeps_status() {
        let mapped = ApiResponse::Data { data: 2, status: 200 }.map(|n| n * 10);
        assert_eq!(mapped, ApiResponse::Data { data: 20, status: 200 });
    }
}
