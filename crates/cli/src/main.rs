//! `lims` developer CLI.
//!
//! Runs the front-end validation and normalisation rules against JSON payloads on disk, which
//! is handy for checking backend fixtures and reproducing form errors.
//!
//! # Environment Variables
//! - `LIMS_ACTING_ROLE`: role the CLI acts as (default: `cliente`); `--acting-role` overrides it
//! - `LIMS_OPERATOR`: operator name recorded in logs (default: `lims-cli`)
//! - `RUST_LOG`: tracing filter

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lims_core::{
    allowed_target_roles, backend_to_input_value, config::acting_role_from_env_value,
    date_time_to_backend, validate_sample, validate_user_registration, water_type_code,
    CoreConfig, FechaHoraMuestreo, FieldErrors, Role, SampleRecord, SampleStatus,
    UserRegistration,
};

#[derive(Parser)]
#[command(name = "lims")]
#[command(about = "Laboratory sample-management validation CLI")]
struct Cli {
    /// Role to act as (overrides LIMS_ACTING_ROLE)
    #[arg(long, global = true)]
    acting_role: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a sample registration payload
    ValidateSample {
        /// JSON file with the sample payload
        file: PathBuf,
    },
    /// Validate a user registration payload
    ValidateUser {
        /// JSON file with the registration payload
        file: PathBuf,
    },
    /// Convert a `YYYY-MM-DDTHH:mm` value to the backend {fecha, hora} shape
    ToBackend {
        /// Date/time as entered in the form
        value: String,
    },
    /// Convert a backend {fecha, hora} pair to a form value
    ToInput {
        /// Date (dd/MM/yyyy)
        fecha: String,
        /// Time (h:mm AM/PM)
        hora: String,
    },
    /// Print the classification code of a water type
    WaterCode {
        /// potable, natural, residual or otra
        tipo: String,
    },
    /// List the roles the acting role may register
    Targets,
    /// Apply a sample lifecycle move
    Transition {
        /// Current status (e.g. "Recibida")
        from: String,
        /// Requested status (e.g. "En análisis")
        to: String,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("lims=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let acting_role = match cli.acting_role {
        Some(role) => Role::parse(&role)?,
        None => acting_role_from_env_value(std::env::var("LIMS_ACTING_ROLE").ok())?,
    };
    let operator = std::env::var("LIMS_OPERATOR").unwrap_or_else(|_| "lims-cli".into());
    let cfg = CoreConfig::new(acting_role, operator)?;

    tracing::debug!("acting as {} ({})", cfg.acting_role(), cfg.operator());

    match cli.command {
        Some(Commands::ValidateSample { file }) => {
            let sample = SampleRecord::from_json(&read_payload(&file)?)?;
            print_errors(&validate_sample(&sample))
        }
        Some(Commands::ValidateUser { file }) => {
            let user = UserRegistration::from_json(&read_payload(&file)?)?;
            print_errors(&validate_user_registration(&user, cfg.acting_role()))
        }
        Some(Commands::ToBackend { value }) => match date_time_to_backend(value.as_str()) {
            Some(backend) => {
                println!("{}", serde_json::to_string_pretty(&backend)?);
                Ok(ExitCode::SUCCESS)
            }
            None => {
                eprintln!("Not a valid date/time: {}", value);
                Ok(ExitCode::FAILURE)
            }
        },
        Some(Commands::ToInput { fecha, hora }) => {
            let value = FechaHoraMuestreo::Parts {
                fecha: Some(fecha),
                hora: Some(hora),
            };
            match backend_to_input_value(&value) {
                Some(input) => {
                    println!("{}", input);
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    eprintln!("Not a valid backend date/time: {:?}", value);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Some(Commands::WaterCode { tipo }) => {
            println!("{}", water_type_code(&tipo));
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Targets) => {
            let targets = allowed_target_roles(cfg.acting_role());
            if targets.is_empty() {
                println!("{} cannot register users.", cfg.acting_role());
            } else {
                for role in targets {
                    println!("{}", role);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Transition { from, to }) => {
            let from = SampleStatus::parse(&from)?;
            let to = SampleStatus::parse(&to)?;
            match from.transition(to, cfg.acting_role()) {
                Ok(status) => {
                    tracing::info!("{} moved sample {} -> {}", cfg.operator(), from, status);
                    println!("{}", status);
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    let allowed = from.allowed_transitions(cfg.acting_role());
                    if !allowed.is_empty() {
                        let names: Vec<&str> = allowed.iter().map(SampleStatus::as_str).collect();
                        eprintln!("Allowed: {}", names.join(", "));
                    }
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        None => {
            println!("Use 'lims --help' for commands");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn read_payload(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn print_errors(errors: &FieldErrors) -> anyhow::Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(errors)?);
    Ok(if errors.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
