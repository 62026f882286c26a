// src/exit.rs
//! Standardized process exit codes for `coverlab`.
//!
//! Provides a stable contract for scripts that drive experiment runs.

use std::process::Termination;

use crate::error::CoverlabError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum CoverlabExit {
    /// Run completed successfully.
    Success = 0,
    /// Generic error (IO, plotting, serialization).
    Error = 1,
    /// Rejected input (bad flag values, malformed config, impossible graph parameters).
    InvalidInput = 2,
}

impl CoverlabExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Maps a failed run to an exit code, looking through `anyhow` context
    /// for the library error that caused it.
    #[must_use]
    pub fn from_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<CoverlabError>() {
            Some(
                CoverlabError::InvalidParameter(_)
                | CoverlabError::InvalidNetwork(_)
                | CoverlabError::InvalidLabel { .. }
                | CoverlabError::Config(_),
            ) => Self::InvalidInput,
            _ => Self::Error,
        }
    }
}

impl Termination for CoverlabExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_maps_to_invalid_input() {
        let err = anyhow::Error::new(CoverlabError::invalid("k > n"));
        assert_eq!(CoverlabExit::from_error(&err), CoverlabExit::InvalidInput);
    }

    #[test]
    fn context_is_looked_through() {
        let err = anyhow::Error::new(CoverlabError::Disconnected).context("walking graph");
        assert_eq!(CoverlabExit::from_error(&err), CoverlabExit::Error);
    }
}
