use std::path::PathBuf;

#[derive(Debug)]
pub enum ScanError {
    /// The requested path does not exist.
    NotFound(PathBuf),
    /// Reading an entry or its metadata failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScanError::NotFound(_) => None,
            ScanError::Io { source, .. } => Some(source),
        }
    }
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanError::NotFound(path) => {
                write!(f, "no such file or directory: {}", path.display())
            }
            ScanError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
        }
    }
}
