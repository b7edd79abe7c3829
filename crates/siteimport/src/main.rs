mod cli;
mod config;
mod credential;
mod error;
mod output;

use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use siteimport_core::{Importer, load_records};

use crate::cli::{Cli, OutputFormat};
use crate::error::CliError;
use crate::output::ConsoleProgress;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let global = &cli.global;

    // Configuration and credentials are settled before any file or network work.
    let settings = config::resolve_settings(global)?;
    let admin_key = credential::resolve_admin_key(cli.admin_key.as_deref(), &settings.profile)?;
    let import_config = settings.import_config(admin_key)?;
    tracing::info!(
        profile = %settings.profile_name,
        base_url = %import_config.base_url,
        "starting import"
    );

    // Progress shares stdout with the text summary; JSON keeps stdout for the document.
    let (sink, sink_is_terminal) = output::progress_sink(global.output);
    let color = output::should_color(settings.color, sink_is_terminal);
    let mut progress = ConsoleProgress::new(sink, color, global.quiet);

    progress.line(&format!(
        "Loading sites from {}...",
        settings.sites_file.display()
    ));
    let records = load_records(&settings.sites_file)?;
    progress.line(&format!("Found {} sites to import", records.len()));

    let importer = Importer::new(&import_config)?;
    let summary = importer.run(&records, &mut progress).await;

    let rendered = match global.output {
        OutputFormat::Text => output::render_summary(&summary, color),
        OutputFormat::Json => output::render_summary_json(&summary)?,
    };
    output::print_output(&rendered);

    if global.fail_on_error && !summary.is_clean() {
        return Err(CliError::ImportIncomplete {
            failed: summary.failed(),
            attempted: summary.attempted(),
        });
    }

    Ok(())
}
