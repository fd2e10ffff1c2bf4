use std::error::Error;
use std::net::SocketAddr;

use crate::cli::commands::ServeArgs;
use crate::io::logging::{self, LogTarget};
use crate::model::Config;
use crate::server::{self, TaskStore};

/// Run the reference task server in the foreground
pub fn cmd_serve(args: ServeArgs, config: &Config) -> Result<(), Box<dyn Error>> {
    logging::init(LogTarget::Stderr, config.log.filter.as_deref(), "info")?;

    let store = if args.empty {
        TaskStore::default()
    } else {
        TaskStore::seeded()
    };
    let addr = SocketAddr::new(args.host, args.port);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(server::serve(addr, store))?;
    Ok(())
}
