mod cli;
mod error;
mod fmt;
mod layout;
mod models;
mod pdf;
mod settings;
mod template;

use clap::Parser;
use colored::Colorize;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use cli::Cli;

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    // Usage errors share the exit status of every other failure; help and
    // version still exit cleanly.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    let (settings, settings_error) = match settings::load_settings() {
        Ok(s) => (s, None),
        Err(e) => (settings::Settings::default(), Some(e)),
    };
    init_tracing(&settings.log_level);
    if let Some(e) = settings_error {
        warn!(error = %e, "falling back to default settings");
    }

    let renderer = pdf::default_renderer();
    let result = cli::generate::run(cli.data, &settings, renderer.as_ref());

    match result {
        Ok(_) => {
            println!();
            println!("{}", "Done!".green().bold());
        }
        Err(e) => {
            let err = anyhow::Error::new(e);
            eprintln!();
            eprintln!("{} {err}", "Error:".red().bold());
            eprintln!("{err:?}");
            std::process::exit(1);
        }
    }
}
