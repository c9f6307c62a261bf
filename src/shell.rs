use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::{self, BufReader};
use tokio::signal;
use tracing::info;

use crate::config::AppConfig;
use crate::error::Result;
use crate::store::Store;
use crate::{handle_session, Session};

pub struct Shell {
    store: Arc<Store>,
    data_path: PathBuf,
    threshold: i64,
    autosave: bool,
}

impl Shell {
    pub async fn new(config: &AppConfig) -> Self {
        let shell = Self {
            store: Arc::new(Store::new()),
            data_path: config.data_path(),
            threshold: config.threshold(),
            autosave: config.autosave(),
        };

        // Start from whatever is on disk; a missing file means an empty inventory.
        shell.store.load(&shell.data_path).await;

        shell
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    /// Serves commands from stdin until EOF, `QUIT` or Ctrl+C.
    pub async fn start(&self) -> Result<()> {
        let mut session = Session::new(
            Arc::clone(&self.store),
            self.data_path.clone(),
            self.threshold,
            self.autosave,
        );
        info!(path = %self.data_path.display(), "inventory shell ready");

        tokio::select! {
            result = handle_session(BufReader::new(io::stdin()), io::stdout(), &mut session) => {
                result?;
            }
            _ = signal::ctrl_c() => {
                info!("Ctrl+C pressed, shutting down...");
            }
        }

        Ok(())
    }
}
