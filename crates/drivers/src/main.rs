mod config;
mod logging;
mod workflow;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::AppConfig;
use photo_flow_adapters::{
    present_event, present_feature_row, present_session, BroadcastEventBus, HttpRemoteClient,
    ImageFilterRenderer, InMemorySurface, LoggingControlPresenter,
};
use photo_flow_application::{WorkflowEvent, WorkflowService};
use tokio::sync::broadcast::{error::RecvError, Receiver};
use tracing::{info, warn};
use workflow::RunPlan;

#[derive(Parser, Debug)]
#[command(name = "photo-flow")]
#[command(about = "Step-by-step photo editing against a remote image service")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "PHOTO_FLOW_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long, env = "PHOTO_FLOW_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Sent as the Authorization header
    #[arg(long, env = "PHOTO_FLOW_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the configured feature sequence
    Features,
    /// Run every configured feature against a source image
    Run {
        #[arg(long)]
        source: String,
        /// Background for compositing, defaults to the first configured one
        #[arg(long)]
        background: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        hue: Option<f32>,
        #[arg(long)]
        saturation: Option<f32>,
    },
    /// Apply hue and saturation to a local file
    Preview {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long, allow_hyphen_values = true)]
        hue: Option<f32>,
        #[arg(long)]
        saturation: Option<f32>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init_logging();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("photo-flow: {error:#}");
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?
        .with_credentials(cli.api_key, cli.access_token);

    match cli.command {
        Command::Features => {
            if config.features.is_empty() {
                println!("no features configured");
            }
            for (index, feature) in config.features.iter().enumerate() {
                println!("{}", present_feature_row(index, feature));
            }
            Ok(())
        }
        Command::Run {
            source,
            background,
            hue,
            saturation,
        } => {
            let plan = RunPlan {
                background,
                hue,
                saturation,
            };
            run_workflow(config, source, plan).await
        }
        Command::Preview {
            input,
            output,
            hue,
            saturation,
        } => {
            let stack = RunPlan {
                hue,
                saturation,
                ..RunPlan::default()
            }
            .adjustment_stack()?;
            let (width, height) = ImageFilterRenderer
                .render_file(&input, &output, &stack)
                .context("preview failed")?;
            println!(
                "wrote {} ({}x{}, filter: {})",
                output.display(),
                width,
                height,
                stack.css_filter()
            );
            Ok(())
        }
    }
}

async fn run_workflow(config: AppConfig, source: String, plan: RunPlan) -> Result<()> {
    info!(source = %source, features = config.features.len(), "starting workflow");
    let bus = BroadcastEventBus::new(config.event_capacity);
    let printer = tokio::spawn(print_events(bus.subscribe()));

    let surface = InMemorySurface::new(source);
    let service = WorkflowService::new(
        config.features,
        Box::new(HttpRemoteClient::new(config.service)?),
        Box::new(bus),
        Box::new(LoggingControlPresenter::default()),
        Box::new(surface.clone()),
    );

    let outcome = workflow::drive(&service, &plan).await;
    drop(service);
    if let Err(error) = printer.await {
        warn!(%error, "event printer stopped");
    }

    let session = outcome?;
    println!("{}", present_session(&session));
    println!("displayed {}", surface.snapshot().displayed_url());
    Ok(())
}

async fn print_events(mut events: Receiver<WorkflowEvent>) {
    loop {
        match events.recv().await {
            Ok(event) => println!("{}", present_event(&event)),
            Err(RecvError::Lagged(skipped)) => warn!(skipped, "event printer lagged"),
            Err(RecvError::Closed) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_with_negative_hue() {
        let cli = Cli::try_parse_from([
            "photo-flow",
            "run",
            "--source",
            "https://page.example/cat.jpg",
            "--hue",
            "-45",
        ])
        .expect("run should parse");

        match cli.command {
            Command::Run {
                source,
                hue,
                background,
                ..
            } => {
                assert_eq!(source, "https://page.example/cat.jpg");
                assert_eq!(hue, Some(-45.0));
                assert!(background.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn preview_requires_input_and_output() {
        let result = Cli::try_parse_from(["photo-flow", "preview", "--input", "in.png"]);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(Cli::try_parse_from(["photo-flow", "import", "photos"]).is_err());
    }
}
