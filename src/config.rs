use std::path::{Path, PathBuf};

/// Config file users of this tool maintain at the project root.
pub const CONFIG_FILE: &str = "blitz.config.js";
/// Config file the underlying framework looks for in the staged folder.
pub const FRAMEWORK_CONFIG_FILE: &str = "next.config.js";

/// Default staged folder for `build`.
pub const DEFAULT_BUILD_FOLDER: &str = ".blitz";
/// Default staged folder for `dev`.
pub const DEFAULT_DEV_FOLDER: &str = ".blitz-dev";

/// Options for one `dev`/`build` invocation.
///
/// `root_folder` is the project being staged; `dev_folder` and
/// `build_folder` are the disposable destinations. Relative destinations are
/// resolved against the root.
#[derive(Debug, Clone)]
pub struct StageConfig {
    pub root_folder: PathBuf,
    pub build_folder: PathBuf,
    pub dev_folder: PathBuf,
    pub write_manifest_file: bool,
    pub watch: bool,
}

impl StageConfig {
    pub fn new<P: AsRef<Path>>(root_folder: P) -> Self {
        let root_folder = root_folder.as_ref().to_path_buf();
        let build_folder = root_folder.join(DEFAULT_BUILD_FOLDER);
        let dev_folder = root_folder.join(DEFAULT_DEV_FOLDER);

        Self {
            root_folder,
            build_folder,
            dev_folder,
            write_manifest_file: false,
            watch: true,
        }
    }
}
