//! `hpc-blueprint` command-line entry point

use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use hpc_blueprint::{cost, export, Session};
use hpc_catalog::Catalog;
use hpc_cli::{commands, HpcConfig, Shell};
use hpc_orchestrator::OrchestratorHandle;
use hpc_services::HttpServiceClient;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    let session_arg = Arg::new("session")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("YAML session file listing components and option overrides");

    Command::new("hpc-blueprint")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Assemble HPC components into a blueprint, then validate and price it")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML config file"),
        )
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .global(true)
                .help("Base URL of the validation and cost services"),
        )
        .arg(Arg::new("region").long("region").global(true).help("Deployment region"))
        .arg(Arg::new("zone").long("zone").global(true).help("Deployment zone"))
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging"),
        )
        .subcommand(Command::new("catalog").about("List available components"))
        .subcommand(
            Command::new("render")
                .about("Print the blueprint document of a session file")
                .arg(session_arg.clone())
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_parser(value_parser!(PathBuf))
                        .help("Write the document to a file instead of stdout"),
                ),
        )
        .subcommand(
            Command::new("estimate")
                .about("Local price table of a session file")
                .arg(session_arg.clone()),
        )
        .subcommand(
            Command::new("check")
                .about("Validate and price a session file with the external services")
                .arg(session_arg),
        )
        .subcommand(Command::new("shell").about("Interactive editing session"))
}

fn init_tracing(verbose: bool, json: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn resolve_config(matches: &ArgMatches) -> anyhow::Result<HpcConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => HpcConfig::load(path)?,
        None => HpcConfig::default(),
    };
    config = config.with_env(|key| std::env::var(key).ok());
    if let Some(url) = matches.get_one::<String>("api-url") {
        config = config.with_api_base_url(url);
    }
    if let Some(region) = matches.get_one::<String>("region") {
        config = config.with_region(region);
    }
    if let Some(zone) = matches.get_one::<String>("zone") {
        config = config.with_zone(zone);
    }
    Ok(config)
}

fn session_from(args: &ArgMatches) -> anyhow::Result<Session> {
    let path = args
        .get_one::<PathBuf>("session")
        .context("session file argument missing")?;
    commands::load_session(path, Catalog::builtin())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"), matches.get_flag("log-json"));
    let config = resolve_config(&matches)?;
    tracing::debug!(?config, "configuration resolved");

    let mut stdout = std::io::stdout().lock();

    match matches.subcommand() {
        Some(("catalog", _)) => commands::write_catalog(&mut stdout, &Catalog::builtin())?,
        Some(("render", args)) => {
            let document = session_from(args)?.document();
            match args.get_one::<PathBuf>("output") {
                Some(path) => {
                    let written = export::write_document(path, &document)?;
                    tracing::info!(path = %written.display(), "blueprint written");
                }
                None => writeln!(stdout, "{document}")?,
            }
        }
        Some(("estimate", args)) => {
            let session = session_from(args)?;
            write!(stdout, "{}", cost::estimate(session.store().list()).render())?;
        }
        Some(("check", args)) => {
            let session = session_from(args)?;
            let client = Arc::new(HttpServiceClient::new(
                &config.api_base_url,
                config.request_timeout(),
            )?);
            let snapshot =
                commands::check(&config, session.document(), client.clone(), client).await?;
            commands::write_report(&mut stdout, &snapshot)?;
            stdout.flush()?;
            return Ok(commands::exit_code(&snapshot));
        }
        Some(("shell", _)) => {
            let client = Arc::new(HttpServiceClient::new(
                &config.api_base_url,
                config.request_timeout(),
            )?);
            let handle = OrchestratorHandle::spawn(config.pipeline(), client.clone(), client);
            let interactive = std::io::stdin().is_terminal();
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            Shell::new(Session::new(Catalog::builtin()), handle, stdout)
                .with_prompt(interactive)
                .run(input)
                .await?;
        }
        _ => {}
    }

    Ok(ExitCode::SUCCESS)
}
