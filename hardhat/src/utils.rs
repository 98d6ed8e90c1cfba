use std::ffi::OsString;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::PathBuf;

use async_process::{Child, Command, ExitStatus, Output, Stdio};

use crate::error::HardhatError;

/// Default solc program, resolved from `PATH`.
pub const DEFAULT_SOLC: &str = "solc";

/// Arguments passed to solc for one invocation kind.
pub trait SolcCommandContext {
    type Input;

    /// Returns solc command line arguments for `input`.
    fn args(input: &Self::Input) -> Vec<OsString>;
}

/// Solc child process helper.
#[derive(Debug)]
pub struct SolcCommand<C: SolcCommandContext> {
    program: PathBuf,
    command: Command,
    /// Printable command line, used in error messages.
    command_line: String,
    /// Started solc process
    child_process: Option<Child>,

    _marked: PhantomData<C>,
}

impl<C> SolcCommand<C>
where
    C: SolcCommandContext,
{
    /// Create solc command with explicit solc program path.
    pub fn new_with<P>(program: P, input: &C::Input) -> anyhow::Result<Self>
    where
        P: Into<PathBuf>,
    {
        let program: PathBuf = program.into();

        let args = C::args(input);

        let command_line = std::iter::once(program.as_os_str())
            .chain(args.iter().map(|arg| arg.as_os_str()))
            .map(|arg| arg.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ");

        log::debug!("solc command: {}", command_line);

        let mut command = Command::new(&program);

        command.args(&args);

        Ok(Self {
            program,
            command,
            command_line,
            child_process: None,
            _marked: Default::default(),
        })
    }

    /// Returns if solc process started.
    pub fn is_started(&self) -> bool {
        self.child_process.is_some()
    }

    fn map_spawn_error(&self, err: std::io::Error) -> anyhow::Error {
        match err.kind() {
            ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                HardhatError::ToolNotFound(self.program.to_string_lossy().into_owned()).into()
            }
            _ => HardhatError::Spawn(self.command_line.clone(), err).into(),
        }
    }

    fn spawn(&mut self) -> anyhow::Result<Child> {
        match self.command.spawn() {
            Ok(child) => Ok(child),
            Err(err) => Err(self.map_spawn_error(err)),
        }
    }

    /// Start solc child process.
    ///
    /// If already started, returns false.
    pub fn start(&mut self) -> anyhow::Result<bool> {
        if self.is_started() {
            return Ok(false);
        }

        self.child_process = Some(self.spawn()?);

        Ok(true)
    }

    /// Wait until solc exits, non-zero status returns [`HardhatError::ChildProcess`].
    ///
    /// Starts the process first if [`start`](Self::start) was not called.
    pub async fn status(&mut self) -> anyhow::Result<ExitStatus> {
        let mut child_process = match self.child_process.take() {
            Some(child_process) => child_process,
            None => self.spawn()?,
        };

        let status = child_process.status().await?;

        if !status.success() {
            return Err(HardhatError::ChildProcess(self.command_line.clone(), status).into());
        }

        Ok(status)
    }

    /// Run solc to completion and collect its output.
    pub async fn output(&mut self) -> anyhow::Result<Output> {
        self.command.stdout(Stdio::piped()).stderr(Stdio::piped());

        let output = match self.command.output().await {
            Ok(output) => output,
            Err(err) => return Err(self.map_spawn_error(err)),
        };

        if !output.status.success() {
            return Err(HardhatError::ChildProcess(self.command_line.clone(), output.status).into());
        }

        Ok(output)
    }
}

impl<C> Drop for SolcCommand<C>
where
    C: SolcCommandContext,
{
    fn drop(&mut self) {
        if let Some(mut child_process) = self.child_process.take() {
            log::debug!("kill unfinished solc process, {}", self.command_line);

            _ = child_process.kill();
        }
    }
}
