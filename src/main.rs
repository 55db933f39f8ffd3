use std::sync::Arc;

use docserve::config::Config;
use docserve::http::connection::Services;
use docserve::http::mime::ContentTypes;
use docserve::server::Server;
use docserve::store::{AliasTable, DirStore, PathResolver};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;

    let aliases = match &cfg.alias_file {
        Some(path) => AliasTable::from_file(path)?,
        None => AliasTable::empty(),
    };

    let services = Services {
        store: Arc::new(DirStore::new(cfg.root_dir.clone())),
        resolver: PathResolver::new(aliases),
        content_types: ContentTypes::new(),
        idle_timeout: cfg.idle_timeout(),
    };

    let server = Server::bind(&cfg.listen_addr, services).await?;
    let handle = server.shutdown_handle();

    tokio::select! {
        res = server.serve() => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
            handle.shutdown();
        }
    }

    Ok(())
}
