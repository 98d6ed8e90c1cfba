use std::{ffi::OsString, path::PathBuf};

use async_process::ExitStatus;

use crate::{
    source::SourceFile,
    utils::{SolcCommand, SolcCommandContext},
};

/// `solc --version`, used to check solc can be executed.
#[derive(Debug)]
pub struct VersionContext;

impl SolcCommandContext for VersionContext {
    type Input = ();

    fn args(_: &()) -> Vec<OsString> {
        vec!["--version".into()]
    }
}

/// Command helper printing solc version.
pub type SolcVersion = SolcCommand<VersionContext>;

/// `solc --abi --overwrite -o <output_dir> <source>`
#[derive(Debug)]
pub struct AbiContext;

impl SolcCommandContext for AbiContext {
    type Input = SourceFile;

    fn args(source: &SourceFile) -> Vec<OsString> {
        vec![
            "--abi".into(),
            "--overwrite".into(),
            "-o".into(),
            source.output_dir().into_os_string(),
            source.path().as_os_str().to_owned(),
        ]
    }
}

/// Command writing `<base_name>.abi` next to the source file.
pub type SolcAbi = SolcCommand<AbiContext>;

/// Check `program` can be executed, returns the reported version text.
pub async fn check_solc_installed<P: Into<PathBuf>>(program: P) -> anyhow::Result<String> {
    let output = SolcVersion::new_with(program, &())?.output().await?;

    let version = String::from_utf8_lossy(&output.stdout).trim().to_owned();

    log::debug!("solc version, {}", version);

    Ok(version)
}

/// Run solc abi generation for `source`, blocking until solc exits.
pub async fn compile_abi<P: Into<PathBuf>>(
    program: P,
    source: &SourceFile,
) -> anyhow::Result<ExitStatus> {
    let mut command = SolcAbi::new_with(program, source)?;

    command.start()?;

    command.status().await
}
