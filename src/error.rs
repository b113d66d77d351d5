//! Error types for the fetch layer.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{context}: {source}")]
    Transport {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{context} (status {status})")]
    Status { context: String, status: u16 },

    #[error("{context}: invalid JSON ({source})")]
    Decode {
        context: String,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{context}: {detail}")]
    Malformed { context: String, detail: String },

    #[error("{0}")]
    NotFound(String),
}

impl ApiError {
    pub fn malformed(context: &str, detail: impl Into<String>) -> Self {
        Self::Malformed {
            context: context.to_string(),
            detail: detail.into(),
        }
    }

    /// Whether another attempt at the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport { .. } => true,
            ApiError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_server_errors_are_retryable() {
        let server = ApiError::Status { context: "Gagal mengambil doa".to_string(), status: 503 };
        let client = ApiError::Status { context: "Gagal mengambil doa".to_string(), status: 404 };
        assert!(server.is_retryable());
        assert!(!client.is_retryable());
        assert!(!ApiError::NotFound("Kota tidak ditemukan".to_string()).is_retryable());
    }

    #[test]
    fn display_keeps_call_context() {
        let err = ApiError::malformed("Gagal mengambil jadwal sholat", "subuh: \"--:--\"");
        assert_eq!(err.to_string(), "Gagal mengambil jadwal sholat: subuh: \"--:--\"");
    }
}
