mod wiring;

use crate::{cli, client::ApiClient, context, local_store::LocalStore, rest, storage};
use anyhow::{Context as AnyhowContext, Result};
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing_appender::non_blocking::WorkerGuard;

pub struct App {
    pub ctx: context::Context,
    pub storage: storage::SqliteStorage,
    pub client: ApiClient,
    pub store: LocalStore,
    _log_guard: Option<WorkerGuard>,
}

impl App {
    pub fn from_cli() -> Result<(Self, cli::Cli)> {
        let cli = crate::cli::parse();
        let ctx = context::Context::from_cli(&cli);

        let log_guard = crate::tracing::init(ctx.log_file.as_deref().map(Path::new));
        log::info!("🚀 Starting coursewise");
        log::info!("📂 Data dir: {}", ctx.data_dir.to_string_lossy());
        log::info!("📦 Bundled data: {}", ctx.bundled_dir.to_string_lossy());

        wiring::init_data_dir(&ctx).context("initializing data dir")?;
        let storage = wiring::init_storage(&ctx)?;
        let client = wiring::build_client(&ctx)?;
        let store = wiring::build_store(&ctx);

        Ok((
            Self {
                ctx,
                storage,
                client,
                store,
                _log_guard: log_guard,
            },
            cli,
        ))
    }
}

pub async fn run_daemon(app: App) -> Result<()> {
    log::info!("🌐 REST API: http://{}", app.ctx.api_listen);
    if let Some(path) = app.ctx.log_file.as_deref() {
        log::info!("📝 Log file: {}", path);
    }

    let shutdown = CancellationToken::new();

    let api_addr = app.ctx.api_listen;
    let rest_storage = app.storage.clone();
    let rest_shutdown = shutdown.clone();

    let mut rest_handle =
        tokio::spawn(async move { rest::serve(api_addr, rest_storage, rest_shutdown).await });

    let rest_result = tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            log::info!("🧨 Ctrl-C received, shutting down");
            shutdown.cancel();
            rest_handle.await
        }
        res = &mut rest_handle => res,
    };
    shutdown.cancel();

    match rest_result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            log::error!("REST server error: {}", e);
            return Err(e);
        }
        Err(e) => {
            log::error!("REST task failed: {}", e);
            return Err(e.into());
        }
    }

    log::info!("✅ Shutdown complete");
    Ok(())
}

pub async fn run() -> Result<()> {
    let (app, cli) = App::from_cli()?;

    if let Some(cmd) = &cli.cmd {
        // one-shot command mode
        cmd.run(&app).await?;
        return Ok(());
    }

    run_daemon(app).await
}
