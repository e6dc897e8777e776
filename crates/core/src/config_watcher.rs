use crate::config::AppConfig;
use crate::config_loader::ConfigLoader;
use anyhow::{Context, Result};
use notify::{Event, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::watch;

/// Broadcasts configuration reloads to running analysis loops.
///
/// A reload that fails to parse or validate is logged and dropped; receivers
/// keep the last good configuration.
pub struct ConfigWatcher {
    tx: watch::Sender<AppConfig>,
    config_path: PathBuf,
}

impl ConfigWatcher {
    /// Returns the watcher and the receiver that analysis loops poll.
    #[must_use]
    pub fn new(
        initial_config: AppConfig,
        config_path: impl Into<PathBuf>,
    ) -> (Self, watch::Receiver<AppConfig>) {
        let (tx, rx) = watch::channel(initial_config);
        let watcher = Self {
            tx,
            config_path: config_path.into(),
        };
        (watcher, rx)
    }

    /// Re-reads the configuration file and publishes it if it changed.
    ///
    /// Returns `true` when a new configuration was published.
    pub fn reload(&self) -> bool {
        reload_into(&self.tx, &self.config_path)
    }

    /// Blocks a worker thread on filesystem events until every receiver is gone.
    ///
    /// The parent directory is watched rather than the file itself so that
    /// editors which save by rename still trigger a reload.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be watched.
    pub async fn watch(&self) -> Result<()> {
        let tx = self.tx.clone();
        let config_path = self.config_path.clone();
        let dir = match config_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file_name = config_path
            .file_name()
            .map(ToOwned::to_owned)
            .with_context(|| format!("{} is not a file path", config_path.display()))?;

        tokio::task::spawn_blocking(move || {
            let (events_tx, events_rx) = std::sync::mpsc::channel::<Event>();
            let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
                if let Ok(event) = res {
                    let _ = events_tx.send(event);
                }
            })?;
            watcher.watch(&dir, RecursiveMode::NonRecursive)?;
            tracing::debug!(path = %config_path.display(), "watching config for changes");

            while let Ok(event) = events_rx.recv() {
                let touches_config = event
                    .paths
                    .iter()
                    .any(|p| p.file_name() == Some(file_name.as_os_str()));
                if !touches_config || !(event.kind.is_modify() || event.kind.is_create()) {
                    continue;
                }
                if tx.is_closed() {
                    break;
                }
                tracing::info!(path = %config_path.display(), "config changed, reloading");
                reload_into(&tx, &config_path);
            }

            Ok::<_, anyhow::Error>(())
        })
        .await
        .context("config watcher task panicked")??;

        Ok(())
    }
}

fn reload_into(tx: &watch::Sender<AppConfig>, path: &Path) -> bool {
    match ConfigLoader::load_from(path) {
        Ok(new_config) => {
            let changed = tx.send_if_modified(|current| {
                if *current == new_config {
                    false
                } else {
                    *current = new_config;
                    true
                }
            });
            if changed {
                tracing::info!(path = %path.display(), "published reloaded config");
            }
            changed
        }
        Err(e) => {
            tracing::error!(path = %path.display(), "config reload rejected: {:#}", e);
            false
        }
    }
}
