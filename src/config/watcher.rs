//! Configuration file watcher for hot reload.
//!
//! The watch is placed on the file's directory, not the file itself, so
//! editors that save by writing a temp file and renaming it over the config
//! keep triggering reloads. Events for other files in that directory are
//! ignored. A file that fails to load or validate is logged and counted as a
//! rejected reload; nothing is sent and the live route table stays.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::ServerConfig;
use crate::observability::metrics;

/// Watches the router config file and publishes validated updates.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<ServerConfig>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for validated configuration updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<ServerConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching. The returned watcher must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file_name = self
            .path
            .file_name()
            .map(OsString::from)
            .ok_or_else(|| {
                notify::Error::generic("config path has no file name").add_path(self.path.clone())
            })?;

        let tx = self.update_tx;
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => handle_event(&path, &file_name, &tx, &event),
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Config watcher started");
        Ok(watcher)
    }
}

fn handle_event(
    path: &Path,
    file_name: &OsString,
    tx: &mpsc::UnboundedSender<ServerConfig>,
    event: &Event,
) {
    if !(event.kind.is_modify() || event.kind.is_create()) {
        return;
    }
    if !event
        .paths
        .iter()
        .any(|p| p.file_name() == Some(file_name.as_os_str()))
    {
        return;
    }

    tracing::info!(path = ?path, "Config file change detected, reloading");
    match load_config(path) {
        Ok(new_config) => {
            if tx.send(new_config).is_err() {
                tracing::debug!("Config update receiver dropped");
            }
        }
        Err(e) => {
            metrics::record_reload(false);
            tracing::error!(
                error = %e,
                "Failed to reload config, keeping current route table"
            );
        }
    }
}
