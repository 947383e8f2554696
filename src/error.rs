//! Result taxonomy shared by the bridge and the log retriever
//!
//! Every public operation distinguishes three outcomes:
//! - **Success**: the capability exists and the condition holds / the write went through
//! - **Failure**: the capability exists but the answer is negative (disabled, absent, I/O failed)
//! - **Error**: the capability does not exist at all (no surface, platform too old)

use std::path::PathBuf;
use thiserror::Error;

/// Tri-state status returned across the bridge boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Success,
    Failure,
    Error,
}

impl Status {
    /// Map a boolean answer from an available capability
    pub fn from_flag(value: bool) -> Self {
        if value { Status::Success } else { Status::Failure }
    }

    /// Wire code used by native callers (`1` / `0` / `-1`)
    pub fn code(self) -> i32 {
        match self {
            Status::Success => 1,
            Status::Failure => 0,
            Status::Error => -1,
        }
    }

    pub fn is_success(self) -> bool {
        self == Status::Success
    }

    pub fn is_error(self) -> bool {
        self == Status::Error
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Status::Success => "success",
            Status::Failure => "failure",
            Status::Error => "error",
        };
        f.write_str(label)
    }
}

/// Errors raised by property reads and writes
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BridgeError {
    #[error("overlay surface is not available")]
    SurfaceUnavailable,

    #[error("developer HUD properties are not supported on this platform")]
    PropertiesUnsupported,

    #[error("unknown alignment token '{0}'")]
    InvalidAlignment(String),

    #[error("alignment code {0} is out of range")]
    InvalidAlignmentCode(i32),

    #[error("unknown property name '{0}'")]
    UnknownProperty(String),

    #[error("failed to write overlay properties: {0}")]
    WriteFailed(String),

    #[error("refusing to store non-finite value for '{0}'")]
    NonFiniteValue(String),
}

impl BridgeError {
    /// Status this error reports to native callers
    pub fn status(&self) -> Status {
        match self {
            BridgeError::SurfaceUnavailable | BridgeError::PropertiesUnsupported => Status::Error,
            BridgeError::InvalidAlignment(_)
            | BridgeError::InvalidAlignmentCode(_)
            | BridgeError::UnknownProperty(_)
            | BridgeError::WriteFailed(_)
            | BridgeError::NonFiniteValue(_) => Status::Failure,
        }
    }
}

/// Errors raised while fetching overlay logs
#[derive(Debug, Error)]
pub enum LogError {
    #[error("past_seconds must not be negative (got {0})")]
    InvalidWindow(i64),

    #[error("output path is empty")]
    EmptyOutputPath,

    #[error("log store is not available on this platform")]
    StoreUnavailable,

    #[error("failed to open log store {path}")]
    OpenStore {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read log store {path}")]
    ReadStore {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write log artifact {path}")]
    WriteArtifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LogError {
    /// Structural problems are `Error`; anything that failed mid-retrieval is `Failure`
    pub fn status(&self) -> Status {
        match self {
            LogError::InvalidWindow(_) | LogError::EmptyOutputPath | LogError::StoreUnavailable => {
                Status::Error
            }
            LogError::OpenStore { .. } | LogError::ReadStore { .. } | LogError::WriteArtifact { .. } => {
                Status::Failure
            }
        }
    }
}
