use log::info;
use std::sync::Arc;

use crate::configuration::config::Config;
use crate::error_handling::types::ControllerError;
use crate::storage::{FileStorage, TimeStorage};
use crate::web_interface::WebServer;

/// Owns the resolved configuration and the store shared by every request.
pub struct Controller {
    pub config: Config,
    storage: Arc<dyn TimeStorage>,
}

impl Controller {
    /// Builds the file store and makes sure its backing file exists.
    pub fn new(config: Config) -> Result<Self, ControllerError> {
        let storage = FileStorage::new(&config.times_file);
        storage.initialize()?;
        Ok(Self {
            config,
            storage: Arc::new(storage),
        })
    }

    pub fn storage(&self) -> Arc<dyn TimeStorage> {
        self.storage.clone()
    }

    pub async fn run(&self) -> Result<(), ControllerError> {
        info!("Serving times from {}", self.config.times_file.display());
        WebServer::new(self.storage.clone())
            .start(self.config.socket_addr())
            .await?;
        Ok(())
    }
}
