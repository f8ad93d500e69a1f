use std::{
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use transcript_desk::{
    provider::HttpParseProvider,
    settings::{AppSettings, ResponseMode},
    state_machine::SubmissionController,
    status::StatusDisplay,
    store::SettingsStore,
    view::{FieldView, View},
};

#[derive(Parser, Debug)]
#[command(name = "transcript-desk", about = "Send transcripts to a parse server")]
struct Cli {
    /// Settings file (JSON). Defaults apply when it does not exist.
    #[arg(long, default_value = "transcript-desk.json")]
    config: PathBuf,

    /// Overrides the server root from the settings file.
    #[arg(long)]
    base_url: Option<String>,

    /// Treat any 2xx body as the result instead of a success envelope.
    #[arg(long)]
    bare: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit TEXT, or stdin when omitted, and print the parsed result.
    Submit { text: Option<String> },
    /// Print the effective settings.
    ShowConfig,
    /// Write the effective settings, flags included, to the settings file.
    SaveConfig,
}

fn load_settings(cli: &Cli) -> Result<AppSettings> {
    let mut settings = SettingsStore::new(cli.config.clone())
        .load()
        .context("failed loading settings")?;
    if let Some(base_url) = &cli.base_url {
        settings.base_url = base_url.clone();
    }
    if cli.bare {
        settings.response_mode = ResponseMode::Bare;
    }
    Ok(settings)
}

fn print_status(display: &StatusDisplay) {
    if let Some(message) = &display.message {
        eprintln!("[{}] {}", message.kind.class(), message.text);
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let settings = load_settings(&cli)?;

    match cli.command {
        Command::ShowConfig => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::SaveConfig => {
            SettingsStore::new(cli.config).save(&settings)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Submit { text } => {
            let input = match text {
                Some(text) => text,
                None => {
                    let mut buf = String::new();
                    io::stdin()
                        .read_to_string(&mut buf)
                        .context("failed reading transcript from stdin")?;
                    buf
                }
            };

            info!("Submitting to {}", settings.parse_url());
            let provider = HttpParseProvider::new(settings.parse_url());
            let view = FieldView::new(&settings.submit_label).with_input(input);
            let mut controller = SubmissionController::new(provider, view, settings);

            let outcome = controller.submit().await;
            let output = controller.view().output_text();
            if !output.is_empty() {
                println!("{}", output);
            }
            print_status(&controller.status().snapshot());

            Ok(if outcome.is_ok() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    run(Cli::parse()).await
}
