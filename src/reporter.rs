use colored::Colorize;
use std::path::Path;

/// Hooks fired around file operations.
///
/// Purely informational: implementations must not fail staging, and staging
/// never depends on them having run.
pub trait Reporter {
    fn copy(&self, from: &Path, to: &Path);
    fn remove(&self, path: &Path);
}

/// Prints one colored line per file operation.
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn copy(&self, from: &Path, to: &Path) {
        log::debug!("copy {} -> {}", from.display(), to.display());

        let msg = format!("{} {}", "copy".green(), to.display());

        println!("{}", &msg);
    }

    fn remove(&self, path: &Path) {
        log::debug!("remove {}", path.display());

        let msg = format!("{} {}", "remove".yellow(), path.display());

        println!("{}", &msg);
    }
}

/// Reporter that stays quiet. Useful for embedding and tests.
pub struct Silent;

impl Reporter for Silent {
    fn copy(&self, _from: &Path, _to: &Path) {}
    fn remove(&self, _path: &Path) {}
}
