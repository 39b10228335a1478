//! tasktrack command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the task store.
//! - Dispatch one user intent and print its result.

mod board;
mod cli;
mod config;
mod render;

use board::{BoardResponse, TaskBoard};
use clap::Parser;
use cli::{Cli, Command};
use config::AppConfig;
use log::info;
use mockable::{Clock, DefaultClock};
use std::process::ExitCode;
use tasktrack_core::db::open_db;
use tasktrack_core::{
    core_version, init_logging, KeyValueTaskRepository, SqliteStorage, TaskRepository,
    TaskService,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(message) => {
            eprintln!("tasktrack: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, String> {
    let config = AppConfig::from_env(&cli.overrides());
    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(&config.log_level, log_dir)?;
    }

    if matches!(cli.command, Command::Version) {
        println!("tasktrack_core {}", core_version());
        return Ok(ExitCode::SUCCESS);
    }

    let conn = open_db(&config.db_path)
        .map_err(|err| format!("failed to open `{}`: {err}", config.db_path.display()))?;
    info!(
        "event=cli_start module=cli status=ok db_path={}",
        config.db_path.display()
    );

    let service = TaskService::open(
        KeyValueTaskRepository::new(SqliteStorage::new(&conn)),
        DefaultClock,
    )
    .map_err(|err| err.to_string())?;
    let mut board = TaskBoard::new(service);
    Ok(dispatch(&mut board, cli.command))
}

fn dispatch<R: TaskRepository, C: Clock>(
    board: &mut TaskBoard<R, C>,
    command: Command,
) -> ExitCode {
    let response = match command {
        Command::Add {
            title,
            description,
            priority,
        } => board.add(&title, description.as_deref(), priority),
        Command::Advance { id } => board.advance(&id),
        Command::Delete { id } => board.delete(&id),
        Command::Edit { id, fields } => board.edit(&id, &fields.into_patch()),
        Command::List(args) => {
            board.set_filter(args.status);
            board.set_search(args.search);
            board.set_sort(args.sort);
            print!("{}", render::render_task_list(&board.visible_tasks()));
            return ExitCode::SUCCESS;
        }
        Command::Stats => {
            print!("{}", render::render_stats(&board.stats()));
            return ExitCode::SUCCESS;
        }
        Command::Version => unreachable!("version is answered before the store opens"),
    };
    report(&response)
}

fn report(response: &BoardResponse) -> ExitCode {
    if response.ok {
        match response.task_id.as_deref() {
            Some(id) => println!("{} ({id})", response.message),
            None => println!("{}", response.message),
        }
        ExitCode::SUCCESS
    } else {
        eprintln!("{}", response.message);
        ExitCode::FAILURE
    }
}
