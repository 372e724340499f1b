use crate::{
    config::{StageConfig, CONFIG_FILE, FRAMEWORK_CONFIG_FILE},
    errors::{FileOperation, IoError},
    manifest::Manifest,
    reporter::Reporter,
    transactions::{Active, RollbackOperation, Transaction},
};
use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error, Diagnostic)]
pub enum StageError {
    #[error("I/O error within staging domain")]
    #[diagnostic(code(blitz::stage::io))]
    Io(#[from] IoError),

    #[error("Blitz does not support next.config.js (found '{path}')")]
    #[diagnostic(
        code(blitz::stage::framework_config),
        help("Please rename your next.config.js to blitz.config.js")
    )]
    FrameworkConfigOnly { path: PathBuf },

    #[error("unable to strip prefix from directory")]
    #[diagnostic(code(blitz::stage::strip_prefix))]
    StripPrefix {
        path: PathBuf,
        dir: PathBuf,
        source: std::path::StripPrefixError,
    },

    #[error("unable to serialize the staging manifest")]
    #[diagnostic(code(blitz::stage::manifest))]
    ManifestSerialize {
        #[source]
        source: toml::ser::Error,
    },
}

/// Which staged folder a run materializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Dev,
    Build,
}

impl Mode {
    fn destination(self, config: &StageConfig) -> &Path {
        match self {
            Mode::Dev => &config.dev_folder,
            Mode::Build => &config.build_folder,
        }
    }
}

/// Default contents for a root that carries no tool config at all.
const GENERATED_CONFIG: &str = "module.exports = {};\n";

/// Framework config written into the staged folder when the root has none;
/// points the framework at the user's tool config.
const GENERATED_FRAMEWORK_SHIM: &str = "\
// Generated by blitz. Do not edit.
const config = require('./blitz.config.js');
module.exports = { ...config };
";

lazy_static::lazy_static! {
    static ref IGNORED_ENTRY: regex::Regex = regex::Regex::new(
        r"(?x)        # Enable extended mode
        ^(?:
            # dot-entries: VCS metadata, editor state, previously staged folders
            \..*
            |
            # installed packages; the framework resolves these from the root
            node_modules
        )$"
    ).expect("a valid regex pattern");
}

/// Materializes the staged folder for `mode` and returns its absolute path.
///
/// The destination is recreated from scratch: a stale folder from an earlier
/// run is removed first, every non-ignored file under the root is copied
/// with its directory structure intact, and the config files the framework
/// expects are materialized (copied, or generated when the root lacks them).
/// A failure after the copy pass has started rolls the destination back, so
/// no half-staged folder is left behind.
pub fn stage(
    config: &StageConfig,
    mode: Mode,
    reporter: &dyn Reporter,
) -> Result<PathBuf, StageError> {
    let root = std::path::absolute(&config.root_folder)
        .map_err(|error| IoError::new(FileOperation::Read, config.root_folder.clone(), error))?;

    if !root.is_dir() {
        let error = std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "project root is not a readable directory",
        );
        return Err(IoError::new(FileOperation::Read, root, error).into());
    }

    let has_tool_config = root.join(CONFIG_FILE).is_file();
    let framework_config = root.join(FRAMEWORK_CONFIG_FILE);
    let has_framework_config = framework_config.is_file();

    // User error, not something to tolerate or auto-rename. Checked before
    // any write happens.
    if has_framework_config && !has_tool_config {
        return Err(StageError::FrameworkConfigOnly {
            path: framework_config,
        });
    }

    let dev_folder = resolve(&root, &config.dev_folder);
    let build_folder = resolve(&root, &config.build_folder);
    let destination = resolve(&root, mode.destination(config));

    if destination.exists() {
        reporter.remove(&destination);
        std::fs::remove_dir_all(&destination)
            .map_err(|error| IoError::new(FileOperation::Remove, destination.clone(), error))?;
    }

    let mut trx = Transaction::<Active>::new();
    let mut manifest = Manifest::new(&root);

    create_directory(&mut trx, &destination)?;

    let walker = WalkDir::new(&root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            // The dot rule already hides the default staged folders; the
            // path checks guard custom destinations inside the root.
            let name = entry.file_name().to_string_lossy();
            !IGNORED_ENTRY.is_match(&name)
                && entry.path() != dev_folder
                && entry.path() != build_folder
        });

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(error) => {
                let path = error.path().unwrap_or_else(|| Path::new(""));

                Err(IoError::new(
                    FileOperation::Read,
                    path.to_path_buf(),
                    error.into(),
                ))?
            }
        };

        let full_path = entry.path();
        let relative = match full_path.strip_prefix(&root) {
            Ok(r) => r,
            Err(error) => Err(StageError::StripPrefix {
                path: full_path.to_path_buf(),
                dir: root.clone(),
                source: error,
            })?,
        };

        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            create_directory(&mut trx, &target)?;
        } else {
            let size = copy_file(&mut trx, reporter, full_path, &target)?;
            manifest.record(relative, size, false);
        }
    }

    if !has_tool_config {
        let size = write_generated(&mut trx, &destination.join(CONFIG_FILE), GENERATED_CONFIG)?;
        manifest.record(Path::new(CONFIG_FILE), size, true);
    }

    if !has_framework_config {
        let size = write_generated(
            &mut trx,
            &destination.join(FRAMEWORK_CONFIG_FILE),
            GENERATED_FRAMEWORK_SHIM,
        )?;
        manifest.record(Path::new(FRAMEWORK_CONFIG_FILE), size, true);
    }

    if config.write_manifest_file {
        let (path, contents) = manifest
            .render(&destination)
            .map_err(|source| StageError::ManifestSerialize { source })?;

        write_generated(&mut trx, &path, &contents)?;
    }

    let _committed = trx.commit();

    log::debug!(
        "staged {} into {}",
        root.display(),
        destination.display()
    );

    Ok(destination)
}

/// Staged folders are given relative to the root unless already absolute.
fn resolve(root: &Path, folder: &Path) -> PathBuf {
    if folder.is_absolute() {
        folder.to_path_buf()
    } else {
        root.join(folder)
    }
}

fn create_directory(trx: &mut Transaction<Active>, path: &Path) -> Result<(), StageError> {
    std::fs::create_dir_all(path)
        .map_err(|error| IoError::new(FileOperation::Mkdir, path.into(), error))?;

    trx.add_operation(RollbackOperation::RemoveDir(path.to_path_buf()));

    Ok(())
}

fn copy_file(
    trx: &mut Transaction<Active>,
    reporter: &dyn Reporter,
    from: &Path,
    to: &Path,
) -> Result<u64, StageError> {
    let size = std::fs::copy(from, to)
        .map_err(|error| IoError::new(FileOperation::Write, to.into(), error))?;

    reporter.copy(from, to);

    trx.add_operation(RollbackOperation::RemoveFile(to.to_path_buf()));

    Ok(size)
}

fn write_generated(
    trx: &mut Transaction<Active>,
    path: &Path,
    contents: &str,
) -> Result<u64, StageError> {
    std::fs::write(path, contents)
        .map_err(|error| IoError::new(FileOperation::Write, path.into(), error))?;

    trx.add_operation(RollbackOperation::RemoveFile(path.to_path_buf()));

    Ok(contents.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignore_rule_hides_dot_entries_and_packages() {
        for name in [".git", ".now", ".blitz", ".blitz-dev", "node_modules"] {
            assert!(IGNORED_ENTRY.is_match(name), "expected {name} ignored");
        }
    }

    #[test]
    fn ignore_rule_keeps_project_files() {
        for name in ["pages", "one", "blitz.config.js", "next.config.js", "node_modules_backup"] {
            assert!(!IGNORED_ENTRY.is_match(name), "expected {name} kept");
        }
    }
}
