use anyhow::{Context, Result};

use crate::{client::ApiClient, context, local_store::LocalStore, storage};

pub fn init_data_dir(ctx: &context::Context) -> Result<()> {
    std::fs::create_dir_all(&ctx.data_dir)?;
    Ok(())
}

pub fn init_storage(ctx: &context::Context) -> Result<storage::SqliteStorage> {
    let sqlite = storage::SqliteStorage::new(ctx.db_path());
    if ctx.reset {
        sqlite.reset_all().context("resetting storage")?;
    }
    sqlite.init().context("initializing storage")?;
    Ok(sqlite)
}

pub fn build_client(ctx: &context::Context) -> Result<ApiClient> {
    ApiClient::new(&ctx.api_url, &ctx.bundled_dir).context("building API client")
}

pub fn build_store(ctx: &context::Context) -> LocalStore {
    LocalStore::new(ctx.store_path())
}
