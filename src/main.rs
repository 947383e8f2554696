#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{Level as TraceLevel, error, info};
use tracing_subscriber::FmtSubscriber;

use metal_perfkit::adapter::{self, PerformanceHud};
use metal_perfkit::config::Settings;
use metal_perfkit::logs;
use metal_perfkit::{
    BridgeError, FileLayer, FileLogSource, FlagProperty, FloatProperty, HudAlignment, IntProperty,
    MetricElements, NormalizedPosition, PathProperty, Status,
};

#[derive(Parser)]
#[command(version, about = "Inspect and configure the Metal Performance HUD")]
struct Cli {
    /// Settings file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    #[command(flatten)]
    Hud(HudCommand),
}

#[derive(Subcommand)]
enum HudCommand {
    /// Print capabilities and the current overlay state
    Status,
    /// Query or toggle overlay visibility
    Visible {
        state: Option<Toggle>,
        /// Normalized horizontal position (0..1)
        #[arg(long, requires = "y", allow_hyphen_values = true)]
        x: Option<f32>,
        /// Normalized vertical position (0..1)
        #[arg(long, requires = "x", allow_hyphen_values = true)]
        y: Option<f32>,
    },
    /// Query or toggle overlay logging
    Logging { state: Option<Toggle> },
    /// Query or set a boolean option, e.g. `insights-enabled`
    Flag { name: String, state: Option<Toggle> },
    /// Query or set an integer option, e.g. `metric-timeout`
    Int {
        name: String,
        #[arg(allow_hyphen_values = true)]
        value: Option<i32>,
    },
    /// Query or set a float option (`opacity`, `scale`)
    Float {
        name: String,
        #[arg(allow_hyphen_values = true)]
        value: Option<f32>,
    },
    /// Query or set a path option (`report-path`, `config-file-path`)
    Path { name: String, value: Option<String> },
    /// Query or set the overlay anchor, e.g. `topright` or its code `2`
    Alignment { token: Option<String> },
    /// Query or set the comma-separated metric list
    Elements { list: Option<String> },
    /// Write recent overlay log lines to a report file
    FetchLogs {
        /// Window length in seconds, ending now
        #[arg(long, allow_hyphen_values = true)]
        past: i64,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the current (or default) settings to disk
    Init,
    /// Print the effective settings
    Show,
}

#[derive(Clone, Copy, ValueEnum)]
enum Toggle {
    On,
    Off,
}

impl Toggle {
    fn enabled(self) -> bool {
        matches!(self, Toggle::On)
    }
}

fn init_logging(settings: &Settings) -> Result<()> {
    let configured = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.log_level.clone());
    let log_level = match configured.to_lowercase().as_str() {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to install log subscriber")?;
    Ok(())
}

fn exit_code(status: Status) -> ExitCode {
    match status {
        Status::Success => ExitCode::SUCCESS,
        Status::Failure => ExitCode::from(1),
        Status::Error => ExitCode::from(2),
    }
}

/// Getter results print the value; `Failure` from a query just means "off"
fn report_query(status: Status) -> ExitCode {
    println!("{}", if status.is_success() { "on" } else { "off" });
    if status.is_error() { exit_code(status) } else { ExitCode::SUCCESS }
}

fn report_setter(status: Status) -> ExitCode {
    println!("{status}");
    exit_code(status)
}

fn report_value<T: std::fmt::Display>(result: Result<T, BridgeError>) -> ExitCode {
    match result {
        Ok(value) => {
            println!("{value}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Query failed");
            exit_code(e.status())
        }
    }
}

fn print_status(hud: &dyn PerformanceHud, settings: &Settings) -> Result<ExitCode> {
    let capabilities = settings.capabilities()?;
    println!("platform:           {} ({})", settings.os_version, hud.variant());
    println!("log store:          {}", capabilities.log_store);
    println!("hud properties:     {}", capabilities.hud_properties);
    println!("positioned overlay: {}", capabilities.positioned_overlay);

    let visible = hud.get_visible();
    println!("visible:            {visible}");
    if let Ok(position) = hud.get_position() {
        println!("position:           ({:.4}, {:.4})", position.x, position.y);
    }
    println!("logging:            {}", hud.get_logging_enabled());

    match hud.snapshot() {
        Ok(properties) => {
            let json = serde_json::to_string_pretty(&properties).context("Failed to serialize properties")?;
            println!("{json}");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!(error = %e, "Overlay properties unavailable");
            Ok(exit_code(e.status()))
        }
    }
}

fn run(command: HudCommand, hud: &mut dyn PerformanceHud, settings: &Settings) -> Result<ExitCode> {
    let code = match command {
        HudCommand::Status => return print_status(hud, settings),
        HudCommand::Visible { state: None, .. } => report_query(hud.get_visible()),
        HudCommand::Visible { state: Some(state), x: Some(x), y: Some(y) } => {
            report_setter(hud.set_visible_with_position(state.enabled(), NormalizedPosition::new(x, y)))
        }
        HudCommand::Visible { state: Some(state), .. } => report_setter(hud.set_visible(state.enabled())),
        HudCommand::Logging { state: None } => report_query(hud.get_logging_enabled()),
        HudCommand::Logging { state: Some(state) } => report_setter(hud.set_logging(state.enabled())),
        HudCommand::Flag { name, state } => {
            let property: FlagProperty = name.parse()?;
            match state {
                None => report_query(hud.get_flag(property)),
                Some(state) => report_setter(hud.set_flag(property, state.enabled())),
            }
        }
        HudCommand::Int { name, value } => {
            let property: IntProperty = name.parse()?;
            match value {
                None => report_value(hud.get_int(property)),
                Some(value) => report_setter(hud.set_int(property, value)),
            }
        }
        HudCommand::Float { name, value } => {
            let property: FloatProperty = name.parse()?;
            match value {
                None => report_value(hud.get_float(property)),
                Some(value) => report_setter(hud.set_float(property, value)),
            }
        }
        HudCommand::Path { name, value } => {
            let property: PathProperty = name.parse()?;
            match value {
                None => report_value(hud.get_path(property)),
                Some(value) => report_setter(hud.set_path(property, &value)),
            }
        }
        HudCommand::Alignment { token: None } => report_value(hud.get_alignment()),
        HudCommand::Alignment { token: Some(token) } => match token.parse::<i32>() {
            Ok(code) => report_setter(hud.set_alignment_code(code)),
            Err(_) => {
                let alignment: HudAlignment = token.parse()?;
                report_setter(hud.set_alignment(alignment))
            }
        },
        HudCommand::Elements { list: None } => report_value(hud.get_elements()),
        HudCommand::Elements { list: Some(list) } => {
            report_setter(hud.set_elements(MetricElements::parse_tokens(&list)))
        }
        HudCommand::FetchLogs { past, out } => {
            let out = out.unwrap_or_else(|| {
                logs::default_artifact_path(&settings.device_model, &settings.os_version, Local::now())
            });
            match hud.fetch_log_report(past, &out) {
                Ok(count) => {
                    println!("{count} line(s) written to {}", out.display());
                    if count > 0 { ExitCode::SUCCESS } else { ExitCode::from(1) }
                }
                Err(e) => {
                    error!(error = %e, "Log retrieval failed");
                    exit_code(e.status())
                }
            }
        }
    };
    Ok(code)
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(Settings::path);
    let settings = Settings::load(&config_path)?;

    init_logging(&settings)?;

    let command = match cli.command {
        Command::Config { action: ConfigAction::Init } => {
            settings.save(&config_path)?;
            return Ok(ExitCode::SUCCESS);
        }
        Command::Config { action: ConfigAction::Show } => {
            let json = serde_json::to_string_pretty(&settings).context("Failed to serialize config")?;
            println!("{json}");
            return Ok(ExitCode::SUCCESS);
        }
        Command::Hud(command) => command,
    };

    let capabilities = settings.capabilities()?;
    info!(os = %settings.os_version, capabilities = ?capabilities, "Starting");

    let layer = FileLayer::new(settings.properties_path.clone(), settings.surface());
    let source = FileLogSource::new(settings.log_path.clone());
    let mut hud = adapter::select(capabilities, layer, source, settings.scan_strategy);

    run(command, hud.as_mut(), &settings)
}
