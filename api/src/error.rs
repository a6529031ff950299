//! API error types, classified by HTTP status.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 401: the cookie session is missing or expired.
    #[error("unauthorized")]
    Unauthorized { body: Option<String> },

    /// 400: the backend rejected the request data.
    #[error("bad request")]
    BadRequest { body: Option<String> },

    /// 404
    #[error("not found")]
    NotFound { body: Option<String> },

    /// Any other non-2xx status.
    #[error("backend returned HTTP {status}")]
    Status { status: u16, body: Option<String> },

    /// A payload arrived but did not have the expected shape.
    #[error("unexpected response from backend: {0}")]
    MalformedResponse(String),

    /// No response at all (connection refused, timeout, ...).
    #[error("request failed: {0}")]
    Transport(String),
}

impl ApiError {
    /// Classify a non-success status with its (optional) response body.
    pub fn from_status(status: u16, body: Option<String>) -> Self {
        let body = body.filter(|b| !b.trim().is_empty());
        match status {
            401 => Self::Unauthorized { body },
            400 => Self::BadRequest { body },
            404 => Self::NotFound { body },
            status => Self::Status { status, body },
        }
    }

    /// The HTTP status, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::BadRequest { .. } => Some(400),
            Self::NotFound { .. } => Some(404),
            Self::Status { status, .. } => Some(*status),
            Self::MalformedResponse(_) | Self::Transport(_) => None,
        }
    }

    /// The backend-provided message, if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { body }
            | Self::BadRequest { body }
            | Self::NotFound { body }
            | Self::Status { body, .. } => body.as_deref(),
            Self::MalformedResponse(_) | Self::Transport(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_status() {
        assert!(matches!(ApiError::from_status(401, None), ApiError::Unauthorized { .. }));
        assert!(matches!(ApiError::from_status(400, None), ApiError::BadRequest { .. }));
        assert!(matches!(ApiError::from_status(404, None), ApiError::NotFound { .. }));
        assert_eq!(
            ApiError::from_status(503, Some("down".into())),
            ApiError::Status { status: 503, body: Some("down".into()) }
        );
    }

    #[test]
    fn blank_body_is_dropped() {
        let e = ApiError::from_status(500, Some("  ".into()));
        assert_eq!(e.body(), None);
        assert_eq!(e.status(), Some(500));
    }

    #[test]
    fn transport_has_no_status() {
        let e = ApiError::Transport("connection refused".into());
        assert_eq!(e.status(), None);
        assert_eq!(e.body(), None);
    }
}
