use std::io::{BufRead, Write};

use clap::Parser;
use migration::MigratorTrait;

use crate::commands::Command;

mod commands;
mod presenter;

#[derive(Parser, Debug)]
#[command(name = "tally")]
#[command(about = "Interactive balance ledger with automatic IOU settlement")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite::memory:")]
    database_url: String,

    /// Log filter directive for `tracing-subscriber`.
    #[arg(long, default_value = "tally=info,engine=info")]
    log: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(cli.log.clone())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(database_url = %cli.database_url, "connecting to the ledger database");
    let db = sea_orm::Database::connect(&cli.database_url).await?;
    migration::Migrator::up(&db, None).await?;
    let engine = engine::Engine::builder().database(db).build().await?;

    // A crash before the exit logout leaves the session flag set; clear
    // stale flags before accepting commands.
    let cleared = engine.reset_sessions().await?;
    if cleared > 0 {
        tracing::info!(cleared, "cleared stale login sessions");
    }
    tracing::info!("ready");

    println!("{}", presenter::WELCOME);
    run_repl(&engine).await?;
    Ok(())
}

/// Reads commands line by line and runs them to completion, one at a time.
async fn run_repl(engine: &engine::Engine) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut session: Option<String> = None;
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("$ ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                presenter::print_error(&message);
                continue;
            }
        };

        if dispatch(engine, &mut session, command).await? {
            break;
        }
    }

    // Release the session so the user can log in on the next run; a
    // failure here is recovered by the startup reset.
    if let Some(name) = session {
        if let Err(err) = engine.logout(&name).await {
            tracing::warn!(user = %name, %err, "logout on exit failed");
        }
    }
    println!("{}", presenter::GOODBYE);
    Ok(())
}

/// Runs one command; returns `true` when the loop should exit.
async fn dispatch(
    engine: &engine::Engine,
    session: &mut Option<String>,
    command: Command,
) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
    match command {
        Command::Login { name } => {
            if session.is_some() {
                presenter::print_error(&engine::EngineError::AlreadyLoggedIn(name).to_string());
                return Ok(false);
            }
            match engine.login(&name).await {
                Ok(outcome) => {
                    *session = Some(outcome.username.clone());
                    presenter::print_lines(&presenter::login_messages(&outcome));
                }
                Err(err) => presenter::print_error(&err.to_string()),
            }
        }
        Command::Logout => match session.take() {
            Some(name) => match engine.logout(&name).await {
                Ok(()) => presenter::print_lines(&presenter::logout_messages(&name)),
                Err(err) => presenter::print_error(&err.to_string()),
            },
            None => {
                presenter::print_error(
                    &engine::EngineError::NotLoggedIn(String::new()).to_string(),
                );
            }
        },
        Command::Deposit { amount } => match session.as_deref() {
            Some(name) => match engine.deposit(name, amount).await {
                Ok(outcome) => presenter::print_lines(&presenter::deposit_messages(&outcome)),
                Err(err) => presenter::print_error(&err.to_string()),
            },
            None => {
                presenter::print_error(
                    &engine::EngineError::NotLoggedIn(String::new()).to_string(),
                );
            }
        },
        Command::Withdraw { amount } => match session.as_deref() {
            Some(name) => match engine.withdraw(name, amount).await {
                Ok(outcome) => presenter::print_lines(&presenter::withdraw_messages(&outcome)),
                Err(err) => presenter::print_error(&err.to_string()),
            },
            None => {
                presenter::print_error(
                    &engine::EngineError::NotLoggedIn(String::new()).to_string(),
                );
            }
        },
        Command::Transfer { target, amount } => match session.as_deref() {
            Some(name) => match engine.transfer(name, &target, amount).await {
                Ok(outcome) => presenter::print_lines(&presenter::transfer_messages(&outcome)),
                Err(err) => presenter::print_error(&err.to_string()),
            },
            None => {
                presenter::print_error(
                    &engine::EngineError::NotLoggedIn(String::new()).to_string(),
                );
            }
        },
        Command::Exit => return Ok(true),
    }
    Ok(false)
}
