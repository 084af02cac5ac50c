mod commands;
mod config;
mod table;
mod tui;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use taskboard_core::{FileTaskRepository, SystemClock, TaskBoard, TaskRepository};
use tracing::debug;
use tracing_appender::non_blocking::WorkerGuard;

use crate::commands::{describe_filters, FilterArgs};
use crate::config::{Config, Overrides};
use crate::tui::app::App;

const LOG_FILE_NAME: &str = "taskboard.log";

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "Task list with multi-criteria filtering", long_about = None)]
struct Cli {
    /// Path to a config.toml (default: ~/.taskboard/config.toml)
    #[arg(long, global = true, env = "TASKBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding tasks.json and the log file
    #[arg(long, global = true, env = "TASKBOARD_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level used when RUST_LOG is unset
    #[arg(long, global = true, env = "TASKBOARD_LOG")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a task (usage: add Fix login pri:h cat:frontend due:fri user:alice)
    Add {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        args: Vec<String>,
    },
    /// Edit a task by id prefix; new name words and key:value pairs
    Edit {
        id: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Delete a task by id prefix
    Delete { id: String },
    /// Flip a task between completed and incomplete
    Toggle { id: String },
    /// List tasks through the saved filters plus any one-off flags
    List {
        #[command(flatten)]
        filters: FilterArgs,
        /// Case-insensitive match on the task name
        #[arg(long)]
        search: Option<String>,
        /// Ignore the saved filters
        #[arg(long, short)]
        all: bool,
    },
    /// Show or change the saved filters
    Filter {
        #[command(subcommand)]
        action: FilterCommand,
    },
    /// Open the terminal user interface
    Tui,
}

#[derive(Subcommand)]
enum FilterCommand {
    Show,
    Set(FilterArgs),
    Reset,
}

fn init_logging(config: &Config) -> Result<WorkerGuard> {
    fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("Failed to create {}", config.data_dir.display()))?;
    let file_appender = tracing_appender::rolling::never(&config.data_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Ok(guard)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&Overrides {
        config: cli.config,
        data_dir: cli.data_dir,
        log_level: cli.log_level,
    })?;
    let _guard = init_logging(&config)?;
    debug!(?config, "configuration loaded");

    let repo = FileTaskRepository::new(Some(config.data_dir.clone()))?;
    let mut board = TaskBoard::from_snapshot(repo.load()?, SystemClock);

    match cli.command {
        Some(Commands::Add { args }) => {
            let id = commands::add(&mut board, &args)?;
            repo.save(&board.snapshot())?;
            if let Some(task) = board.find(&id) {
                println!("Task added: {} (ID: {})", task.task_name, table::short_id(task));
            }
        }
        Some(Commands::Edit { id, args }) => {
            let id = commands::edit(&mut board, &id, &args)?;
            repo.save(&board.snapshot())?;
            if let Some(task) = board.find(&id) {
                println!("Task updated: {} (ID: {})", task.task_name, table::short_id(task));
            }
        }
        Some(Commands::Delete { id }) => {
            let id = commands::delete(&mut board, &id)?;
            repo.save(&board.snapshot())?;
            println!("Task deleted: {id}");
        }
        Some(Commands::Toggle { id }) => {
            let completed = commands::toggle(&mut board, &id)?;
            repo.save(&board.snapshot())?;
            println!("Task marked {}", if completed { "completed" } else { "incomplete" });
        }
        Some(Commands::List { filters, search, all }) => {
            // One-off view: nothing here is saved
            let base = if all { Default::default() } else { board.filters().clone() };
            board.set_filters(filters.merge_into(base)?);
            board.set_search_term(search.unwrap_or_default());

            let tasks = board.get_filtered_tasks();
            if tasks.is_empty() {
                println!("No tasks found.");
            } else {
                println!("{}", table::render_tasks(&tasks, board.today(), &config.date_format));
            }
            println!("{}", describe_filters(board.filters(), board.search_term()));
        }
        Some(Commands::Filter { action }) => {
            match action {
                FilterCommand::Show => {}
                FilterCommand::Set(args) => {
                    let merged = args.merge_into(board.filters().clone())?;
                    board.set_filters(merged);
                    repo.save(&board.snapshot())?;
                }
                FilterCommand::Reset => {
                    board.reset_filters();
                    repo.save(&board.snapshot())?;
                }
            }
            println!("{}", describe_filters(board.filters(), board.search_term()));
        }
        Some(Commands::Tui) | None => {
            tui::run(App::new(board, repo, config.date_format))?;
        }
    }
    Ok(())
}
