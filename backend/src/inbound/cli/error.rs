//! CLI mapping for domain and output errors.
//!
//! Domain error codes become sysexits-style process exit codes so scripts can
//! tell a rejected request from a broken store.

use std::io;

use thiserror::Error;

use crate::domain::{EateryError, ErrorCode};

/// Failure of a single CLI invocation.
#[derive(Debug, Error)]
pub enum CliError {
    /// The domain rejected the operation.
    #[error("{0}")]
    Domain(#[from] EateryError),
    /// Writing the result to the terminal failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl CliError {
    /// Process exit code for this failure.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Domain(err) => exit_code_for(err.code()),
            Self::Output(_) => 74,
        }
    }
}

/// Exit code for a domain error code.
#[must_use]
pub const fn exit_code_for(code: ErrorCode) -> u8 {
    match code {
        ErrorCode::InvalidRequest => 65,
        ErrorCode::NotFound => 66,
        ErrorCode::InternalError => 70,
        ErrorCode::Storage => 74,
        ErrorCode::Forbidden => 77,
    }
}
