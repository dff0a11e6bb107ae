//! Download status reported by the media cache service.

use std::fmt;

/// Status of a tracked request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    /// The file is cached and can be streamed.
    Ready,
    /// Queued on the service, not started yet.
    Pending,
    /// The service is downloading the video.
    Downloading,
    /// The service is post-processing the download.
    Processing,
    /// The cached file was evicted; a re-fetch queues it again.
    Deleted,
    /// The download failed on the service.
    Failed,
    /// A response arrived but carried no recognisable status.
    #[default]
    Unknown,
    /// No endpoint produced a response.
    Unreachable,
}

impl Status {
    /// Interpret the service's `status` field. Missing or unrecognised
    /// values are `Unknown`.
    pub fn from_field(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("ready") => Self::Ready,
            Some("pending") => Self::Pending,
            Some("downloading") => Self::Downloading,
            Some("processing") => Self::Processing,
            Some("deleted") => Self::Deleted,
            Some("failed") => Self::Failed,
            _ => Self::Unknown,
        }
    }

    /// The service is still working on the request.
    pub const fn is_in_progress(&self) -> bool {
        matches!(
            self,
            Self::Pending | Self::Downloading | Self::Processing | Self::Deleted
        )
    }

    /// Polling stops on this status.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready | Self::Failed)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Pending => "pending",
            Self::Downloading => "downloading",
            Self::Processing => "processing",
            Self::Deleted => "deleted",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
            Self::Unreachable => "unreachable",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
