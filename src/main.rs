mod adapters;
mod application;
mod bom_merge;
mod cli;
mod config;
mod ports;
mod shared;

use adapters::outbound::codec::CycloneDxJsonCodec;
use adapters::outbound::console::StderrProgressReporter;
use adapters::outbound::filesystem::FileSystemReader;
use adapters::outbound::validation::CycloneDxSchemaValidator;
use anyhow::Context;
use application::dto::MergeRequest;
use application::factories::{PresenterFactory, PresenterType};
use application::input_files::{report_input_files, InputFileSources};
use application::use_cases::MergeBomsUseCase;
use bom_merge::domain::{MergeMode, SubjectDescriptor};
use cli::Args;
use config::{discover_config, load_config_from_path, ConfigFile};
use owo_colors::OwoColorize;
use ports::inbound::BomMergePort;
use shared::error::ExitCode;
use shared::Result;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // clap exits with code 2 on invalid arguments
    let args = Args::parse_args();
    init_tracing(args.verbose);

    if let Err(e) = run(args).await {
        eprintln!("\n{}\n", "❌ An error occurred:".red().bold());
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(ExitCode::from_error(&e).as_i32());
    }
}

fn init_tracing(verbose: bool) {
    let log_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    // Create adapters (Dependency Injection)
    let bom_reader = FileSystemReader::new();
    let progress_reporter = StderrProgressReporter::new();

    let sources = InputFileSources {
        direct: args.input_files.clone(),
        lists: args.input_files_list.clone(),
        nul_lists: args.input_files_nul_list.clone(),
    };
    let input_files = sources.resolve(&bom_reader)?;
    report_input_files(&input_files, &progress_reporter);

    let request = build_request(&args, &config, input_files)?;
    let presenter = PresenterFactory::create(PresenterType::from_output_file(args.output_file));

    // Create use case with injected dependencies
    let use_case = MergeBomsUseCase::new(
        bom_reader,
        CycloneDxJsonCodec::new(),
        CycloneDxSchemaValidator::new(),
        presenter,
        progress_reporter,
    );

    use_case.merge(request).await?;
    Ok(())
}

/// Loads the config given with `--config`, or the one in the working directory
fn load_config(explicit: Option<&Path>) -> Result<ConfigFile> {
    let config = match explicit {
        Some(path) => Some(load_config_from_path(path)?),
        None => {
            let cwd = std::env::current_dir().context("Failed to determine current directory")?;
            discover_config(&cwd)?
        }
    };
    Ok(config.unwrap_or_default())
}

/// Combines CLI arguments with config defaults; CLI values win
fn build_request(
    args: &Args,
    config: &ConfigFile,
    input_files: Vec<PathBuf>,
) -> Result<MergeRequest> {
    let mode = if args.hierarchical || config.hierarchical.unwrap_or(false) {
        MergeMode::Hierarchical
    } else {
        MergeMode::Flat
    };

    let subject = SubjectDescriptor::new(
        args.group.clone().or_else(|| config.group.clone()),
        args.name.clone().or_else(|| config.name.clone()),
        args.version.clone().or_else(|| config.version.clone()),
    );

    let validation_mode = match args.validation {
        Some(mode) => mode,
        None => config.validation_mode()?.unwrap_or_default(),
    };
    let identity_policy = match args.identity {
        Some(policy) => policy,
        None => config.identity_policy()?.unwrap_or_default(),
    };
    let output_spec_version = match args.output_version {
        Some(version) => version,
        None => config.output_spec_version()?.unwrap_or_default(),
    };

    MergeRequest::builder()
        .input_files(input_files)
        .mode(mode)
        .subject(subject)
        .validation_mode(validation_mode)
        .identity_policy(identity_policy)
        .output_spec_version(output_spec_version)
        .build()
}
