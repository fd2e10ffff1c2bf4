use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::TaskId;

#[derive(Parser)]
#[command(name = "td", about = concat!("[x] taskdeck v", env!("CARGO_PKG_VERSION"), " - a small task list client"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Task server base URL (overrides TASKDECK_URL and the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub url: Option<String>,

    /// Read configuration from this file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Append diagnostic logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all tasks
    List,
    /// Add a task
    Add(AddArgs),
    /// Flip a task between open and done
    Toggle(IdArgs),
    /// Change task title
    Title(TitleArgs),
    /// Delete a task
    Delete(IdArgs),
    /// Run a local task server
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
}

#[derive(Args)]
pub struct IdArgs {
    /// Task ID
    pub id: TaskId,
}

#[derive(Args)]
pub struct TitleArgs {
    /// Task ID
    pub id: TaskId,
    /// New title
    pub title: String,
}

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: IpAddr,
    /// Start with no tasks instead of the sample ones
    #[arg(long)]
    pub empty: bool,
}
