//! Server lifecycle management.

use super::FileServer;
use crate::{config::AppConfig, debug, log, utils::mime::MimeMap, watch::AssetWatcher};
use anyhow::Result;
use crossbeam::channel::{self, Receiver};
use std::{net::SocketAddr, sync::Arc};

/// Install the Ctrl+C handler.
///
/// The returned receiver gets one message per signal.
pub fn setup_shutdown_handler() -> Result<Receiver<()>> {
    let (tx, rx) = channel::bounded(1);
    ctrlc::set_handler(move || {
        let _ = tx.try_send(());
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))?;
    Ok(rx)
}

/// The file server plus the optional asset watcher, owned together.
pub struct DevServer {
    server: FileServer,
    watcher: Option<AssetWatcher>,
}

impl DevServer {
    /// Bind the server and start both tasks.
    pub fn start(config: Arc<AppConfig>) -> Result<Self> {
        let bound = super::bind(&config.serve)?;
        let server = bound.spawn(&config.serve.root, MimeMap::with_script_overrides())?;

        let watcher = if config.watch.enable {
            match AssetWatcher::spawn(Arc::clone(&config)) {
                Ok(watcher) => Some(watcher),
                Err(e) => {
                    server.stop();
                    return Err(e);
                }
            }
        } else {
            debug!("watch"; "disabled");
            None
        };

        Ok(Self { server, watcher })
    }

    pub fn addr(&self) -> SocketAddr {
        self.server.addr()
    }

    /// Stop the watcher, then the server, waiting for both.
    pub fn shutdown(self) {
        log!("serve"; "shutting down...");
        if let Some(watcher) = self.watcher {
            let regenerations = watcher.stop();
            debug!("watch"; "stopped after {} regenerations", regenerations);
        }
        self.server.stop();
    }
}
