use tonic::{Code, Status};

/// Failure taxonomy for daemon-facing operations.
///
/// `Transport` and `InstanceInvalid` force the session handle to be
/// re-created before the next command; `Backend` is the daemon rejecting a
/// specific request and leaves the session alone.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("transport failure: {0}")]
    Transport(Status),
    #[error("daemon rejected the request: {0}")]
    Backend(Status),
    #[error("failed to reach the daemon: {0}")]
    Connect(#[from] tonic::transport::Error),
    #[error("daemon instance is no longer valid: {0}")]
    InstanceInvalid(Status),
    #[error("Init stream ended without delivering an instance handle")]
    InitIncomplete,
    #[error("command cancelled")]
    Cancelled,
    #[error("command task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("state storage failure: {0}")]
    Storage(#[from] std::io::Error),
    #[error("malformed daemon payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    pub fn from_status(status: Status) -> Self {
        if is_instance_stale(&status) {
            ClientError::InstanceInvalid(status)
        } else if is_transport_failure(&status) {
            ClientError::Transport(status)
        } else {
            ClientError::Backend(status)
        }
    }

    /// True when the next command must re-establish the daemon instance.
    pub fn invalidates_session(&self) -> bool {
        matches!(
            self,
            ClientError::Transport(_) | ClientError::InstanceInvalid(_) | ClientError::Connect(_)
        )
    }
}

/// The daemon restarted or dropped the handle we were holding.
fn is_instance_stale(status: &Status) -> bool {
    matches!(
        status.code(),
        Code::NotFound | Code::InvalidArgument | Code::FailedPrecondition
    ) && status.message().to_ascii_lowercase().contains("instance")
}

fn is_transport_failure(status: &Status) -> bool {
    matches!(status.code(), Code::Unavailable | Code::Internal)
}
