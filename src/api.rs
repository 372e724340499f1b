use crate::{
    config::StageConfig,
    invoke::{self, Invoker},
    reporter::Reporter,
    stage::{self, Mode},
};

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum BlitzError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Stage(#[from] stage::StageError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Invoke(#[from] invoke::InvokeError),
}

/// Stages the project into the dev folder, then starts the framework dev
/// server against it.
///
/// The invoker runs exactly once, only after every file of the staged copy
/// is in place. The `watch` flag is handed to the dev server untouched.
///
/// # Errors
///
/// Returns a [`BlitzError`] if:
///
/// - The root carries a `next.config.js` without a `blitz.config.js`.
/// - The root is missing/unreadable or the staged copy cannot be written.
/// - The framework dev server fails to launch or exits with a failure.
pub fn dev(
    config: &StageConfig,
    invoker: &dyn Invoker,
    reporter: &dyn Reporter,
) -> Result<(), BlitzError> {
    let staged = stage::stage(config, Mode::Dev, reporter)?;

    log::debug!("starting dev server in {}", staged.display());

    invoker.start_dev(&invoke::patched_binary(), &staged, config.watch)?;

    Ok(())
}

/// Stages the project into the build folder, then runs the framework
/// production build against it.
///
/// # Errors
///
/// Returns a [`BlitzError`] if:
///
/// - The root carries a `next.config.js` without a `blitz.config.js`.
/// - The root is missing/unreadable or the staged copy cannot be written.
/// - The framework build fails to launch or exits with a failure.
pub fn build(
    config: &StageConfig,
    invoker: &dyn Invoker,
    reporter: &dyn Reporter,
) -> Result<(), BlitzError> {
    let staged = stage::stage(config, Mode::Build, reporter)?;

    log::debug!("building in {}", staged.display());

    invoker.build(&invoke::patched_binary(), &staged)?;

    Ok(())
}
