//! Console Client Entry Point
//!
//! Drives the credential gate from a terminal: the splash, the login and
//! registration forms and the main screen.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod command;
mod config;
mod render;

use std::sync::Arc;

use auth::{AppController, GateSignal, GateState, InMemoryIdentityProvider, Screen};
use kernel::error::app_error::{AppError, AppResult};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::command::{Command, HELP};
use crate::config::ConsoleConfig;
use crate::render::{Report, render_error};

type Controller = AppController<InMemoryIdentityProvider>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing (stderr keeps stdout for reports)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "console=info,auth=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ConsoleConfig::from_env()?;
    tracing::info!(
        splash_ms = config.gate.splash_duration_ms(),
        min_password_length = config.gate.password_policy.min_length(),
        provider_latency_ms = config.provider_latency.as_millis() as u64,
        "Configuration loaded"
    );

    let provider = InMemoryIdentityProvider::new().with_latency(config.provider_latency);
    let controller = AppController::new(Arc::new(provider), Arc::new(config.gate.clone()));

    print_report(&controller, None, None, config.json_output)?;
    controller.start().await;
    print_report(&controller, None, None, config.json_output)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                println!("{}", render_error(&err, config.json_output));
                continue;
            }
        };

        if matches!(command, Command::Quit) {
            break;
        }

        if let Err(err) = run(&controller, command, config.json_output).await {
            if !err.is_recoverable() {
                tracing::error!(error = ?err, "Command failed");
            }
            println!("{}", render_error(&err, config.json_output));
        }
    }

    tracing::info!("Console closed");
    Ok(())
}

async fn run(controller: &Controller, command: Command, json_output: bool) -> AppResult<()> {
    match command {
        Command::Login(fields) => {
            let signal = controller.submit_login(fields).await?;
            report_submit(controller, signal, controller.login_gate().state(), json_output)
        }
        Command::Register(fields) => {
            let signal = controller.submit_registration(fields).await?;
            let form = controller.registration_gate().state();
            report_submit(controller, signal, form, json_output)
        }
        Command::SignUp => {
            require(controller.open_registration(), controller, Screen::Login)?;
            controller.login_gate().field_edited();
            print_report(controller, None, None, json_output)
        }
        Command::Back => {
            require(controller.back_to_login(), controller, Screen::Registration)?;
            controller.registration_gate().field_edited();
            print_report(controller, None, None, json_output)
        }
        Command::Logout => {
            require(controller.screen() == Screen::Main, controller, Screen::Main)?;
            controller.logout();
            print_report(controller, None, None, json_output)
        }
        Command::Status => {
            let form = match controller.screen() {
                Screen::Registration => controller.registration_gate().state(),
                _ => controller.login_gate().state(),
            };
            print_report(controller, None, Some(form), json_output)
        }
        Command::Help => {
            println!("{HELP}");
            Ok(())
        }
        Command::Quit => Ok(()),
    }
}

/// Submits that were not carried out are reported as errors
fn report_submit(
    controller: &Controller,
    signal: GateSignal,
    form: GateState,
    json_output: bool,
) -> AppResult<()> {
    if let Some(err) = signal.to_app_error() {
        return Err(err);
    }
    print_report(controller, Some(signal), Some(form), json_output)
}

fn require(moved: bool, controller: &Controller, expected: Screen) -> AppResult<()> {
    if moved {
        return Ok(());
    }
    let current = controller.screen();
    Err(
        AppError::conflict(format!("Not available on the {current} screen"))
            .with_action(format!("Go to the {expected} screen first")),
    )
}

fn print_report(
    controller: &Controller,
    signal: Option<GateSignal>,
    form: Option<GateState>,
    json_output: bool,
) -> AppResult<()> {
    let report = Report {
        screen: controller.screen(),
        user_name: controller.session().user_name(),
        signal,
        form,
    };
    println!("{}", report.render(json_output)?);
    Ok(())
}
