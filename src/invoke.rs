use miette::Diagnostic;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// Environment variable overriding where the patched framework CLI lives.
pub const PATCHED_BIN_ENV: &str = "BLITZ_NEXT_BIN";

const PATCHED_BIN_NAME: &str = "next-patched";

#[derive(Debug, Error, Diagnostic)]
pub enum InvokeError {
    #[error("Failed to launch '{program}'")]
    #[diagnostic(
        code(blitz::invoke::spawn),
        help("Make sure the patched framework CLI is installed next to the blitz binary, or point BLITZ_NEXT_BIN at it.")
    )]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with {status}")]
    #[diagnostic(code(blitz::invoke::exit))]
    Exit {
        program: PathBuf,
        status: std::process::ExitStatus,
    },
}

/// Launches the underlying framework CLI against a staged folder.
///
/// Injected into the `dev`/`build` entry points so tests can substitute a
/// fake that records calls instead of spawning processes.
pub trait Invoker {
    /// Starts the framework dev server inside `staged`. Resolves once the
    /// server process exits.
    fn start_dev(&self, bin: &Path, staged: &Path, watch: bool) -> Result<(), InvokeError>;

    /// Runs the framework production build inside `staged`.
    fn build(&self, bin: &Path, staged: &Path) -> Result<(), InvokeError>;
}

/// Production invoker: spawns the patched CLI binary with the staged folder
/// as its working directory and waits on it.
pub struct NextCli;

impl Invoker for NextCli {
    fn start_dev(&self, bin: &Path, staged: &Path, watch: bool) -> Result<(), InvokeError> {
        let mut command = Command::new(bin);
        command.arg("dev").current_dir(staged);

        if !watch {
            command.arg("--no-watch");
        }

        run(command, bin)
    }

    fn build(&self, bin: &Path, staged: &Path) -> Result<(), InvokeError> {
        let mut command = Command::new(bin);
        command.arg("build").current_dir(staged);

        run(command, bin)
    }
}

fn run(mut command: Command, bin: &Path) -> Result<(), InvokeError> {
    log::debug!("spawning {:?}", command);

    let status = command.status().map_err(|error| InvokeError::Spawn {
        program: bin.to_path_buf(),
        source: error,
    })?;

    if !status.success() {
        return Err(InvokeError::Exit {
            program: bin.to_path_buf(),
            status,
        });
    }

    Ok(())
}

/// Path of the patched framework CLI binary.
///
/// `BLITZ_NEXT_BIN` wins when set; otherwise the binary is expected next to
/// the current executable. The result is fixed for the process lifetime.
pub fn patched_binary() -> PathBuf {
    if let Ok(path) = std::env::var(PATCHED_BIN_ENV) {
        return PathBuf::from(path);
    }

    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(PATCHED_BIN_NAME)))
        .unwrap_or_else(|| PathBuf::from(PATCHED_BIN_NAME))
}
