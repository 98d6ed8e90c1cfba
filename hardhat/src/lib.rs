//! Convert solc generated ABI files into hardhat artifacts.
pub mod artifact;
pub mod cmds;
pub mod converter;
pub mod error;
pub mod source;
pub mod utils;

#[cfg(all(test, unix))]
mod testing;

pub use artifact::HardhatArtifact;
pub use converter::*;
pub use error::HardhatError;
pub use source::SourceFile;
