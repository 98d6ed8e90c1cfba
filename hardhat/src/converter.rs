use std::{
    collections::HashSet,
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use futures::executor::block_on;
use serde_json::Value;

use crate::{
    artifact::HardhatArtifact,
    cmds::{check_solc_installed, compile_abi},
    error::HardhatError,
    source::{self, SourceFile},
    utils::DEFAULT_SOLC,
};

/// Artifact file name written into every output directory.
pub const ARTIFACT_FILE_NAME: &str = "abi.json";

/// Result of repackaging one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Artifact written to `artifact_path`, raw abi file removed.
    Repackaged { artifact_path: PathBuf },
    /// Solc did not produce `abi_file`, nothing written.
    Skipped { abi_file: PathBuf },
}

/// Progress reported by [`Converter::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress<'a> {
    /// About to compile the source.
    Processing(&'a SourceFile),
    /// Solc wrote no abi file for the source, it was skipped.
    Skipped(&'a SourceFile, &'a Path),
}

/// Converts solc abi output under a directory into hardhat artifacts.
#[derive(Debug, Clone)]
pub struct Converter {
    solc: PathBuf,
}

impl Converter {
    /// Create converter invoking `solc` from `PATH`.
    pub fn new() -> Self {
        Self::new_with(DEFAULT_SOLC)
    }

    /// Create converter with explicit solc program.
    pub fn new_with<P: Into<PathBuf>>(solc: P) -> Self {
        Self { solc: solc.into() }
    }

    pub fn solc(&self) -> &Path {
        &self.solc
    }

    /// Check solc is executable, returns [`HardhatError::ToolNotFound`] if not.
    pub async fn preflight(&self) -> anyhow::Result<()> {
        check_solc_installed(self.solc.clone()).await?;

        Ok(())
    }

    /// Find `.sol` files under `root`.
    pub fn discover<P: AsRef<Path>>(&self, root: P) -> anyhow::Result<Vec<SourceFile>> {
        source::discover(root)
    }

    /// Generate `<base_name>.abi` next to `source`.
    pub async fn compile(&self, source: &SourceFile) -> anyhow::Result<()> {
        compile_abi(self.solc.clone(), source).await?;

        Ok(())
    }

    /// Rewrap the generated abi file of `source` into `abi.json`.
    ///
    /// A missing abi file is not an error, the source is skipped.
    pub fn repackage(&self, source: &SourceFile) -> anyhow::Result<Outcome> {
        let abi_file = source.abi_file();

        if !abi_file.exists() {
            log::debug!("{}", HardhatError::MissingAbiFile(abi_file.clone()));

            return Ok(Outcome::Skipped { abi_file });
        }

        let abi = load_abi(&abi_file)?;

        let artifact = HardhatArtifact::new(source.base_name(), source.source_name(), abi);

        fs::remove_file(&abi_file)?;

        let artifact_path = source.output_dir().join(ARTIFACT_FILE_NAME);

        log::debug!("write artifact {}", artifact_path.display());

        let mut writer = BufWriter::new(File::create(&artifact_path)?);

        artifact.save(&mut writer)?;

        writer.flush()?;

        Ok(Outcome::Repackaged { artifact_path })
    }

    /// Preflight, discover then compile and repackage every source in order.
    ///
    /// `on_progress` is called before each source is compiled and for every skipped source.
    pub async fn run<P, F>(&self, root: P, mut on_progress: F) -> anyhow::Result<Vec<Outcome>>
    where
        P: AsRef<Path>,
        F: FnMut(Progress<'_>),
    {
        self.preflight().await?;

        let sources = self.discover(root)?;

        let mut written = HashSet::new();

        let mut outcomes = Vec::with_capacity(sources.len());

        for source in sources {
            on_progress(Progress::Processing(&source));

            self.compile(&source).await?;

            let outcome = self.repackage(&source)?;

            match &outcome {
                Outcome::Repackaged { artifact_path } => {
                    if !written.insert(artifact_path.clone()) {
                        log::warn!(
                            "{} overwrites the artifact of a previous source file",
                            artifact_path.display()
                        );
                    }
                }
                Outcome::Skipped { abi_file } => on_progress(Progress::Skipped(&source, abi_file)),
            }

            outcomes.push(outcome);
        }

        Ok(outcomes)
    }
}

fn load_abi(abi_file: &Path) -> anyhow::Result<Vec<Value>> {
    let content = fs::read(abi_file)?;

    serde_json::from_slice(&content)
        .map_err(|err| HardhatError::MalformedAbiJson(abi_file.to_path_buf(), err).into())
}

/// Helper fn to block run [`Converter::run`].
pub fn block_run<P, F>(converter: &Converter, root: P, on_progress: F) -> anyhow::Result<Vec<Outcome>>
where
    P: AsRef<Path>,
    F: FnMut(Progress<'_>),
{
    block_on(converter.run(root, on_progress))
}
