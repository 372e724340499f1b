use blitz::{
    config::{StageConfig, DEFAULT_BUILD_FOLDER, DEFAULT_DEV_FOLDER},
    invoke::NextCli,
    reporter::ConsoleReporter,
};
use clap::{
    crate_description, crate_name, crate_version, Arg, ArgAction, ArgMatches, Command,
};
use std::path::PathBuf;

// The CLI layer should only parse inputs and forward them to library code.
fn main() -> miette::Result<()> {
    let matches = Command::new(crate_name!())
        .about(crate_description!())
        .version(crate_version!())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("dev")
                .about("Stages the project and starts the framework dev server against it")
                .arg(Arg::new("root").help("Project root to stage").default_value("."))
                .arg(
                    Arg::new("dev-folder")
                        .long("dev-folder")
                        .help("Staged folder the dev server runs in")
                        .default_value(DEFAULT_DEV_FOLDER),
                )
                .arg(
                    Arg::new("build-folder")
                        .long("build-folder")
                        .help("Staged folder production builds run in")
                        .default_value(DEFAULT_BUILD_FOLDER),
                )
                .arg(
                    Arg::new("manifest")
                        .long("manifest")
                        .help("Write a staging manifest into the staged folder")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("no-watch")
                        .long("no-watch")
                        .help("Ask the dev server not to watch for file changes")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("build")
                .about("Stages the project and runs the framework production build against it")
                .arg(Arg::new("root").help("Project root to stage").default_value("."))
                .arg(
                    Arg::new("build-folder")
                        .long("build-folder")
                        .help("Staged folder production builds run in")
                        .default_value(DEFAULT_BUILD_FOLDER),
                )
                .arg(
                    Arg::new("manifest")
                        .long("manifest")
                        .help("Write a staging manifest into the staged folder")
                        .action(ArgAction::SetTrue),
                ),
        )
        .get_matches();

    init_logger(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("dev", args)) => handle_dev(args),
        Some(("build", args)) => handle_build(args),
        _ => unreachable!(),
    }
}

fn handle_dev(args: &ArgMatches) -> miette::Result<()> {
    let mut config = base_config(args);
    config.dev_folder = PathBuf::from(
        args.get_one::<String>("dev-folder")
            .expect("dev-folder has a default"),
    );
    config.watch = !args.get_flag("no-watch");

    blitz::dev(&config, &NextCli, &ConsoleReporter)?;

    Ok(())
}

fn handle_build(args: &ArgMatches) -> miette::Result<()> {
    let mut config = base_config(args);
    config.watch = false;

    blitz::build(&config, &NextCli, &ConsoleReporter)?;

    Ok(())
}

fn base_config(args: &ArgMatches) -> StageConfig {
    let root = args.get_one::<String>("root").expect("root has a default");

    let mut config = StageConfig::new(PathBuf::from(root));
    config.build_folder = PathBuf::from(
        args.get_one::<String>("build-folder")
            .expect("build-folder has a default"),
    );
    config.write_manifest_file = args.get_flag("manifest");

    config
}

fn init_logger(is_verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();

    if is_verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }

    builder.init();
}
