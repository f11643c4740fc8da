//! Failures of an `icon-machine` invocation and their exit codes.
//!
//! | code | meaning                                                        |
//! |------|----------------------------------------------------------------|
//! | 2    | clap rejected the command line                                 |
//! | 10   | the sheet is out of range (tile size, tile grid)               |
//! | 11   | the `--spec` file could not be read or the PNG not written     |
//! | 12   | a flag or spec document did not parse (class, params, JSON)    |
//! | 13   | JSON output for `--json` could not be produced                 |
//! | 14   | the rendered sheet could not be encoded as a PNG               |

use std::path::PathBuf;

use icon_machine_core::{IconClass, IconError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Tile dimension or grid size rejected by `IconSpec::validate`.
    #[error("{0}")]
    Sheet(#[source] IconError),

    #[error("unknown icon class `{given}` (expected one of: {})", IconClass::list_names().join(", "))]
    UnknownClass { given: String },

    #[error("invalid --params: {0}")]
    Params(String),

    #[error("cannot read spec file {}: {source}", path.display())]
    ReadSpec {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("spec file {} is not a valid icon sheet: {reason}", path.display())]
    SpecDocument { path: PathBuf, reason: String },

    #[error("cannot write {}: {reason}", path.display())]
    WritePng { path: PathBuf, reason: String },

    #[error("cannot encode {}: {reason}", path.display())]
    EncodePng { path: PathBuf, reason: String },

    /// Rendering `--json` output failed.
    #[error("cannot produce JSON output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Sheet(_) => 10,
            CliError::ReadSpec { .. } | CliError::WritePng { .. } => 11,
            CliError::UnknownClass { .. } | CliError::Params(_) | CliError::SpecDocument { .. } => 12,
            CliError::Output(_) => 13,
            CliError::EncodePng { .. } => 14,
        }
    }

    /// Sorts a `write_png` failure into a write or an encode failure.
    pub fn png(path: PathBuf, err: IconError) -> Self {
        match err {
            IconError::Io(reason) => CliError::WritePng { path, reason },
            other => CliError::EncodePng {
                path,
                reason: other.to_string(),
            },
        }
    }
}

impl From<IconError> for CliError {
    fn from(e: IconError) -> Self {
        CliError::Sheet(e)
    }
}
