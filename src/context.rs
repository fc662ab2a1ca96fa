use std::{net::SocketAddr, path::PathBuf};

pub const DB_FILE: &str = "coursewise.sqlite";
pub const STORE_FILE: &str = "local_store.json";

pub struct Context {
    pub data_dir: PathBuf,
    pub bundled_dir: PathBuf,
    pub api_url: String,
    pub api_listen: SocketAddr,
    pub log_file: Option<String>,
    pub reset: bool,
}

impl Context {
    pub fn from_cli(cli: &crate::cli::Cli) -> Self {
        Self {
            data_dir: PathBuf::from(&cli.data_dir),
            bundled_dir: PathBuf::from(&cli.bundled_dir),
            api_url: cli.api_url.clone(),
            api_listen: cli.api_listen,
            log_file: cli.log_file.clone(),
            reset: cli.reset,
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE)
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE)
    }
}
