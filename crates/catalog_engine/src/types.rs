use std::fmt;

use catalog_core::FailureReason;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The catalog reported that the requested work does not exist.
    #[error("work {id} not found")]
    NotFound { id: String },
    #[error("{kind}: {message}")]
    Transport { kind: FailureKind, message: String },
}

impl FetchError {
    pub(crate) fn transport(kind: FailureKind, message: impl Into<String>) -> Self {
        FetchError::Transport {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> Option<&FailureKind> {
        match self {
            FetchError::NotFound { .. } => None,
            FetchError::Transport { kind, .. } => Some(kind),
        }
    }

    /// The coarse reason handed to the pure core.
    pub fn reason(&self) -> FailureReason {
        match self {
            FetchError::NotFound { .. } => FailureReason::NotFound,
            FetchError::Transport { .. } => FailureReason::Transport,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    MalformedBody,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::MalformedBody => write!(f, "malformed response body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FailureKind, FetchError};
    use catalog_core::FailureReason;

    #[test]
    fn reasons_collapse_transport_kinds() {
        let timeout = FetchError::transport(FailureKind::Timeout, "slow");
        let status = FetchError::transport(FailureKind::HttpStatus(503), "503");
        let missing = FetchError::NotFound {
            id: "bogus".to_string(),
        };

        assert_eq!(timeout.reason(), FailureReason::Transport);
        assert_eq!(status.reason(), FailureReason::Transport);
        assert_eq!(missing.reason(), FailureReason::NotFound);
        assert_eq!(missing.kind(), None);
    }

    #[test]
    fn display_includes_kind_and_message() {
        let err = FetchError::transport(FailureKind::HttpStatus(500), "Internal Server Error");
        assert_eq!(err.to_string(), "http status 500: Internal Server Error");
        assert_eq!(
            FetchError::NotFound {
                id: "OL1W".to_string()
            }
            .to_string(),
            "work OL1W not found"
        );
    }
}
