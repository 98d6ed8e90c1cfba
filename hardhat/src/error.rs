use std::{io, path::PathBuf};

use async_process::ExitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HardhatError {
    #[error("{0} is not installed. Please install it to use this tool.")]
    ToolNotFound(String),

    #[error("No .sol files found in {}", .0.display())]
    NoSourcesFound(PathBuf),

    #[error("Error running solc: '{0}', {1}")]
    Spawn(String, io::Error),

    #[error("Error running solc: '{0}' {1}")]
    ChildProcess(String, ExitStatus),

    #[error("ABI file {} does not exist.", .0.display())]
    MissingAbiFile(PathBuf),

    #[error("Malformed ABI json {}, {}", .0.display(), .1)]
    MalformedAbiJson(PathBuf, serde_json::Error),
}
