use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::HardhatError;

/// Solidity source file extension.
pub const SOURCE_EXTENSION: &str = "sol";

/// Extension of the abi file solc writes per source file.
pub const ABI_EXTENSION: &str = "abi";

/// Solidity source file found under a scanned root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: PathBuf,
}

impl SourceFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Source path as discovered, used as the artifact `sourceName`.
    pub fn source_name(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    /// File name without the `.sol` extension.
    pub fn base_name(&self) -> String {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let suffix = format!(".{}", SOURCE_EXTENSION);

        match file_name.strip_suffix(&suffix) {
            Some(base_name) => base_name.to_owned(),
            None => file_name,
        }
    }

    /// Directory solc writes into and the artifact lands in.
    pub fn output_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Expected `<output_dir>/<base_name>.abi` path.
    pub fn abi_file(&self) -> PathBuf {
        self.output_dir()
            .join(format!("{}.{}", self.base_name(), ABI_EXTENSION))
    }
}

fn is_source_file(name: &str) -> bool {
    name.ends_with(&format!(".{}", SOURCE_EXTENSION))
}

/// Recursively collect `.sol` files under `root` in directory walk order.
///
/// Returns [`HardhatError::NoSourcesFound`] if nothing matches.
pub fn discover<P: AsRef<Path>>(root: P) -> anyhow::Result<Vec<SourceFile>> {
    let root = root.as_ref();

    let mut sources = vec![];

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("skip unreadable entry under {}, {}", root.display(), err);
                continue;
            }
        };

        log::trace!("walk {}", entry.path().display());

        // follows symlinks, a linked `*.sol` directory is not a source
        if entry.path().is_dir() {
            continue;
        }

        if is_source_file(&entry.file_name().to_string_lossy()) {
            sources.push(SourceFile::new(entry.into_path()));
        }
    }

    if sources.is_empty() {
        return Err(HardhatError::NoSourcesFound(root.to_path_buf()).into());
    }

    log::debug!("found {} source files in {}", sources.len(), root.display());

    Ok(sources)
}
