//! user-schemas - Command line entry point
//!
//! Validates a JSON document against one of the user schemas and prints either
//! the normalized record or the error report.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{builder::PossibleValuesParser, Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use user_schemas::{
    config::{Config, LogFormat},
    constants::schema_names,
    AppError, AppResult, LoginRequest, Schema, UserBase, UserCreate, UserListResponse,
    UserResponse, UserUpdate,
};

#[derive(Debug, Parser)]
#[command(name = "user-schemas", version, about = "Validate user records")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate a JSON object against a schema
    Validate {
        /// Schema to validate against
        #[arg(short, long, value_parser = PossibleValuesParser::new(schema_names::ALL.iter().copied()))]
        schema: String,

        /// JSON file to read; stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// List available schemas
    Schemas,
}

fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    init_tracing(&config);

    let cli = Cli::parse();
    match cli.command {
        Command::Schemas => {
            for name in schema_names::ALL {
                println!("{}", name);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate { schema, input } => {
            let raw = read_input(input.as_deref())?;
            match validate(&schema, &raw) {
                Ok(record) => {
                    println!("{}", serde_json::to_string_pretty(&record)?);
                    Ok(ExitCode::SUCCESS)
                }
                Err(AppError::Validation(report)) => {
                    tracing::info!("{}", report.summary());
                    println!("{}", serde_json::to_string_pretty(&report)?);
                    Ok(ExitCode::FAILURE)
                }
                Err(e) => Err(e.into()),
            }
        }
    }
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.log.rust_log.clone().into());

    // stdout carries the result, logs go to stderr
    let (json, text) = match config.log.format {
        LogFormat::Json => (Some(fmt::layer().json().with_writer(std::io::stderr)), None),
        LogFormat::Text => (None, Some(fmt::layer().with_writer(std::io::stderr))),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(text)
        .init();
}

fn read_input(path: Option<&Path>) -> AppResult<String> {
    match path {
        Some(path) => {
            tracing::debug!("Reading input from {}", path.display());
            Ok(std::fs::read_to_string(path)?)
        }
        None => {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;
            Ok(raw)
        }
    }
}

fn validate(schema: &str, raw: &str) -> AppResult<Value> {
    match schema {
        schema_names::USER_BASE => render::<UserBase>(raw),
        schema_names::USER_CREATE => render::<UserCreate>(raw),
        schema_names::USER_UPDATE => render::<UserUpdate>(raw),
        schema_names::USER_RESPONSE => render::<UserResponse>(raw),
        schema_names::USER_LIST_RESPONSE => render::<UserListResponse>(raw),
        schema_names::LOGIN_REQUEST => render::<LoginRequest>(raw),
        other => Err(AppError::InvalidInput(format!("Unknown schema: {}", other))),
    }
}

fn render<T: Schema + Serialize>(raw: &str) -> AppResult<Value> {
    let record = T::parse_json(raw)?;
    Ok(serde_json::to_value(&record)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_cli_parses_validate() {
        let cli = Cli::try_parse_from([
            "user-schemas",
            "validate",
            "--schema",
            "user-create",
            "--input",
            "payload.json",
        ])
        .unwrap();
        match cli.command {
            Command::Validate { schema, input } => {
                assert_eq!(schema, "user-create");
                assert_eq!(input, Some(PathBuf::from("payload.json")));
            }
            Command::Schemas => panic!("expected validate"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_schema() {
        assert!(Cli::try_parse_from(["user-schemas", "validate", "--schema", "order"]).is_err());
    }

    #[test]
    fn test_read_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"email": "a@b.io", "password": "x"}}"#).unwrap();

        let raw = read_input(Some(file.path())).unwrap();
        let record = validate(schema_names::LOGIN_REQUEST, &raw).unwrap();
        assert_eq!(record["email"], "a@b.io");
        assert!(record.get("password").is_none());
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input(Some(Path::new("/nonexistent/payload.json"))).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[test]
    fn test_validate_reports_errors() {
        let raw = r#"{"nickname": "us", "email": "john.doe.example.com"}"#;
        match validate(schema_names::USER_BASE, raw) {
            Err(AppError::Validation(report)) => {
                assert_eq!(report.len(), 2);
                assert!(report.to_string().contains("john.doe.example.com"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_validate_unknown_schema() {
        assert!(matches!(
            validate("order", "{}"),
            Err(AppError::InvalidInput(_))
        ));
    }
}
