//! gitsweep: pull, fetch or clean every git repository under one or more roots

use anyhow::Result;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command as ClapCommand};

use gitsweep::commands::{handle_sweep_command, SweepArgs};
use gitsweep::core::DEFAULT_TIMEOUT_SECS;
use gitsweep::utils::setup_logging;

/// A `--flag [true|false]` switch; the bare flag means true
fn bool_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .help(help)
        .value_name("BOOL")
        .value_parser(value_parser!(bool))
        .num_args(0..=1)
        .default_value("false")
        .default_missing_value("true")
}

fn build_cli() -> ClapCommand {
    ClapCommand::new("gitsweep")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Pull, fetch or clean every git repository found under the given roots")
        .arg(
            Arg::new("path")
                .long("path")
                .value_name("P1[:P2...]")
                .help("Root folders to search for git repositories, separated by ':' (default: home directory)"),
        )
        .arg(
            Arg::new("filter")
                .long("filter")
                .value_name("SUBSTRING")
                .help("Only sync repositories whose .git/config contains this value (e.g. an enterprise git host)"),
        )
        .arg(bool_arg(
            "recursive",
            "Also search sub folders; never searches inside a repository's own working tree",
        ))
        .arg(bool_arg("fetch", "Run 'git fetch --prune' instead of 'git pull'"))
        .arg(bool_arg("clean", "Run 'git gc' instead of 'git pull' (takes precedence over --fetch)"))
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("SECS")
                .value_parser(value_parser!(u64))
                .help(format!("Global deadline for the whole run (default: {DEFAULT_TIMEOUT_SECS})")),
        )
        .arg(
            Arg::new("jobs")
                .long("jobs")
                .short('j')
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Maximum repositories processed at once (0 = based on CPU count, default: unbounded)"),
        )
        .arg(
            Arg::new("sequential")
                .long("sequential")
                .help("Process one repository at a time")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Abort the run when a repository's .git/config cannot be read while filtering")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Enable debug logging")
                .action(ArgAction::SetTrue),
        )
}

fn sweep_args(matches: &ArgMatches) -> SweepArgs {
    SweepArgs {
        path: matches.get_one::<String>("path").cloned(),
        filter: matches.get_one::<String>("filter").cloned(),
        recursive: matches.get_one::<bool>("recursive").copied().unwrap_or(false),
        fetch: matches.get_one::<bool>("fetch").copied().unwrap_or(false),
        clean: matches.get_one::<bool>("clean").copied().unwrap_or(false),
        timeout_secs: matches.get_one::<u64>("timeout").copied(),
        jobs: matches.get_one::<usize>("jobs").copied(),
        sequential: matches.get_flag("sequential"),
        strict: matches.get_flag("strict"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = build_cli().get_matches();

    setup_logging(matches.get_flag("verbose"));

    handle_sweep_command(sweep_args(&matches)).await?;

    Ok(())
}
