use std::{path::PathBuf, process::exit};

use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use solc_hardhat_rs::{block_run, Converter, HardhatError, Progress};

/// Convert solidity contract ABIs into hardhat artifacts.
#[derive(Debug, Parser)]
#[command(name = "solc-to-hardhat", author, version, about, long_about = None)]
struct Cli {
    /// Directory scanned recursively for .sol files
    abi_path: PathBuf,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn main() {
    use colorable::*;

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { 1 } else { 0 };

            _ = err.print();

            exit(code);
        }
    };

    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    if let Err(err) = convert(cli) {
        eprintln!("{}", err.to_string().red());

        exit(1);
    }
}

fn convert(cli: Cli) -> anyhow::Result<()> {
    let converter = Converter::new();

    log::debug!(
        "convert sources in {} with {}",
        cli.abi_path.display(),
        converter.solc().display()
    );

    block_run(&converter, &cli.abi_path, |progress| match progress {
        Progress::Processing(source) => {
            println!("Processing {}...", source.path().display());
        }
        // printed regardless of verbosity, skips never change the exit code
        Progress::Skipped(_, abi_file) => {
            use colorable::*;

            let message = HardhatError::MissingAbiFile(abi_file.to_path_buf()).to_string();

            eprintln!("{}", message.yellow());
        }
    })?;

    Ok(())
}
