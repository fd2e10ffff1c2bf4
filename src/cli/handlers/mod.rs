mod serve;
pub use serve::cmd_serve;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::api::HttpTaskApi;
use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::logging::{self, LogTarget};
use crate::model::{Config, Task, TaskId, TaskUpdate};
use crate::ops::{Applied, Controller};
use crate::tui::{self, TuiSettings};

/// What a client command produced, before formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Tasks(Vec<Task>),
    Task(Task),
    Deleted(TaskId),
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = config_io::load_config(cli.config.as_deref())?;
    let json = cli.json;

    let command = match cli.command {
        None => return cmd_tui(cli.url.as_deref(), cli.log_file, &config),
        Some(Commands::Serve(args)) => return cmd_serve(args, &config),
        Some(command) => command,
    };

    let log_target = log_file(cli.log_file, &config).map_or(LogTarget::Stderr, LogTarget::File);
    logging::init(log_target, config.log.filter.as_deref(), "warn")?;

    let base_url = config_io::resolve_base_url(cli.url.as_deref(), &config);
    debug!(%base_url, "connecting");
    let api = HttpTaskApi::new(&base_url, config.server.timeout())?;
    let mut controller = Controller::new(Arc::new(api));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let report = runtime.block_on(async {
        match command {
            Commands::List => cmd_list(&mut controller).await,
            Commands::Add(args) => cmd_add(&mut controller, &args.title).await,
            Commands::Toggle(args) => cmd_toggle(&mut controller, args.id).await,
            Commands::Title(args) => cmd_title(&mut controller, args.id, args.title).await,
            Commands::Delete(args) => cmd_delete(&mut controller, args.id).await,
            // Handled above
            Commands::Serve(_) => Err("serve is not a client command".into()),
        }
    })?;

    print_report(&report, json)?;
    Ok(())
}

/// Launch the terminal UI
fn cmd_tui(
    url_flag: Option<&str>,
    log_file_flag: Option<PathBuf>,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    // Stderr is the screen, so only log to a file
    let log_target = log_file(log_file_flag, config).map_or(LogTarget::Off, LogTarget::File);
    logging::init(log_target, config.log.filter.as_deref(), "info")?;

    tui::run(TuiSettings {
        base_url: config_io::resolve_base_url(url_flag, config),
        timeout: config.server.timeout(),
        ui: config.ui.clone(),
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn log_file(flag: Option<PathBuf>, config: &Config) -> Option<PathBuf> {
    flag.or_else(|| config.log.file.clone())
}

/// Turn a failed controller operation into the controller's error message
fn check(controller: &Controller, applied: Applied) -> Result<(), Box<dyn Error>> {
    match applied {
        Applied::Failed => Err(controller
            .error()
            .unwrap_or("request failed")
            .to_string()
            .into()),
        Applied::Applied | Applied::Stale => Ok(()),
    }
}

fn cached(controller: &Controller, id: TaskId) -> Result<Task, Box<dyn Error>> {
    controller
        .find(id)
        .cloned()
        .ok_or_else(|| format!("task not found: {}", id).into())
}

fn print_report(report: &Report, json: bool) -> Result<(), Box<dyn Error>> {
    match (report, json) {
        (Report::Tasks(tasks), true) => print_json(tasks)?,
        (Report::Task(task), true) => print_json(task)?,
        (Report::Deleted(id), true) => print_json(&DeletedJson { deleted: *id })?,
        (Report::Tasks(tasks), false) => {
            for line in format_task_list(tasks) {
                println!("{}", line);
            }
        }
        (Report::Task(task), false) => println!("{}", format_task_line(task)),
        (Report::Deleted(id), false) => println!("deleted {}", id),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Client commands
// ---------------------------------------------------------------------------

async fn cmd_list(controller: &mut Controller) -> Result<Report, Box<dyn Error>> {
    let applied = controller.load_all().await;
    check(controller, applied)?;
    Ok(Report::Tasks(controller.tasks().to_vec()))
}

async fn cmd_add(controller: &mut Controller, title: &str) -> Result<Report, Box<dyn Error>> {
    let title = title.trim();
    if title.is_empty() {
        return Err("title must not be empty".into());
    }
    let applied = controller.create(title).await;
    check(controller, applied)?;
    let task = controller
        .tasks()
        .last()
        .cloned()
        .ok_or("server returned no task")?;
    Ok(Report::Task(task))
}

async fn cmd_toggle(controller: &mut Controller, id: TaskId) -> Result<Report, Box<dyn Error>> {
    let applied = controller.load_all().await;
    check(controller, applied)?;
    let applied = controller
        .toggle_completion(id)
        .await
        .ok_or_else(|| format!("task not found: {}", id))?;
    check(controller, applied)?;
    Ok(Report::Task(cached(controller, id)?))
}

async fn cmd_title(
    controller: &mut Controller,
    id: TaskId,
    title: String,
) -> Result<Report, Box<dyn Error>> {
    let title = title.trim();
    if title.is_empty() {
        return Err("title must not be empty".into());
    }
    let applied = controller.load_all().await;
    check(controller, applied)?;
    let applied = controller.update(id, TaskUpdate::title(title)).await;
    check(controller, applied)?;
    Ok(Report::Task(cached(controller, id)?))
}

async fn cmd_delete(controller: &mut Controller, id: TaskId) -> Result<Report, Box<dyn Error>> {
    let applied = controller.delete(id).await;
    check(controller, applied)?;
    Ok(Report::Deleted(id))
}
