//! `hookcheck`: inspect inbound webhook documents from the command line.
//!
//! ```text
//! hookcheck request [FILE]        decode a webhook payload and print it
//! hookcheck registration [FILE]   validate an incoming webhook registration
//! hookcheck migrate               create the registration table
//! ```
//!
//! Without `FILE` the document is read from stdin. `migrate` needs a
//! `[database]` section in the configuration.

use std::fs::File;
use std::io::{self, Read};
use std::process::ExitCode;

use hooks_common::{AppError, AppResult, Config};
use hooks_core::{IncomingWebhookRequest, RequestDecoder};
use hooks_db::entities::IncomingWebhookModel;
use tracing::{error, info, warn};

const USAGE: &str = "usage: hookcheck <request|registration> [FILE] | hookcheck migrate";

enum Command {
    Request,
    Registration,
    Migrate,
}

fn open_input(path: Option<&str>) -> AppResult<Box<dyn Read>> {
    match path {
        Some(path) => File::open(path)
            .map(|file| Box::new(file) as Box<dyn Read>)
            .map_err(|e| AppError::Internal(format!("failed to open {path}: {e}"))),
        None => Ok(Box::new(io::stdin().lock())),
    }
}

fn count_empty_attachments(request: &IncomingWebhookRequest) -> usize {
    request
        .attachments
        .iter()
        .filter(|attachment| attachment.is_empty())
        .count()
}

fn check_request(config: &Config, input: Box<dyn Read>) -> AppResult<String> {
    let decoder = RequestDecoder::from_config(&config.incoming_webhooks);
    let request = decoder.decode_reader(input)?;
    info!(
        attachments = request.attachments.len(),
        "Decoded webhook payload"
    );

    let empty = count_empty_attachments(&request);
    if empty > 0 {
        warn!(empty, "Payload contains attachments with no content");
    }

    serde_json::to_string_pretty(&request).map_err(|e| AppError::Internal(e.to_string()))
}

fn check_registration(input: Box<dyn Read>) -> AppResult<String> {
    let webhook = IncomingWebhookModel::from_reader(input)?;
    webhook.validate()?;
    info!(id = %webhook.id, "Registration is valid");
    Ok(format!("valid: {}", webhook.id))
}

fn run_migrations(config: &Config) -> AppResult<String> {
    let database = config
        .database
        .as_ref()
        .ok_or_else(|| AppError::Config("no [database] section configured".to_string()))?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| AppError::Internal(e.to_string()))?;

    runtime.block_on(async {
        let db = hooks_db::init(database).await?;
        hooks_db::migrate(&db).await
    })?;

    info!("Database migrations completed");
    Ok("migrations applied".to_string())
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match args.first().map(String::as_str) {
        Some("request") => Command::Request,
        Some("registration") => Command::Registration,
        Some("migrate") => Command::Migrate,
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed to load configuration: {e}");
            return ExitCode::from(2);
        }
    };
    if let Err(e) = hooks_common::telemetry::init(&config.logging) {
        eprintln!("failed to initialize logging: {e}");
    }

    let path = args.get(1).map(String::as_str);
    let result = match command {
        Command::Request => open_input(path).and_then(|input| check_request(&config, input)),
        Command::Registration => open_input(path).and_then(check_registration),
        Command::Migrate => run_migrations(&config),
    };

    match result {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(code = e.error_code(), "{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
