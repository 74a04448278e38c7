//! Asset watcher.
//!
//! Watches the asset root and regenerates the manifest on every change.
//!
//! ```text
//! notify ──▶ event channel ──▶ Debouncer (pure timing) ──▶ manifest::generate
//!                    ▲
//!            stop channel ─── AssetWatcher::stop()
//! ```
//!
//! Regeneration runs inline on the watcher thread, so a slow generation
//! delays the next event. A failed regeneration is reported and the watcher
//! keeps running; the next event retries.

mod debouncer;

use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};
use crossbeam::channel::{self, Receiver, Sender};
use notify::{EventKind, RecursiveMode, Watcher};

use crate::config::AppConfig;
use crate::manifest::{self, ManifestError, ManifestReport};
use crate::{debug, log};

use debouncer::Debouncer;

/// Raw notify results, as delivered by the watcher callback.
type NotifyRx = Receiver<notify::Result<notify::Event>>;

/// Owned handle to the watcher thread.
pub struct AssetWatcher {
    stop_tx: Sender<()>,
    thread: JoinHandle<usize>,
}

impl AssetWatcher {
    /// Start watching the configured asset root.
    ///
    /// The notify watcher is attached before this returns, so changes made
    /// right after the call are not lost.
    pub fn spawn(config: Arc<AppConfig>) -> Result<Self> {
        let root = config.assets.root.clone();
        let (notify_tx, notify_rx) = channel::unbounded();

        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = notify_tx.send(res);
        })
        .context("failed to create file watcher")?;

        watcher
            .watch(&root, RecursiveMode::Recursive)
            .with_context(|| format!("failed to watch {}", root.display()))?;

        let (stop_tx, stop_rx) = channel::bounded(1);
        let debounce = Duration::from_millis(config.watch.debounce_ms);

        let thread = thread::Builder::new()
            .name("asset-watcher".into())
            .spawn(move || {
                // Keep the watcher alive for the lifetime of the loop
                let _watcher = watcher;
                run_loop(&notify_rx, &stop_rx, debounce, || manifest::regenerate(&config))
            })
            .context("failed to spawn watcher thread")?;

        log!("watch"; "{}", root.display());
        Ok(Self { stop_tx, thread })
    }

    /// Stop the loop and wait for it. Returns the number of regenerations.
    pub fn stop(self) -> usize {
        let _ = self.stop_tx.send(());
        self.thread.join().unwrap_or_else(|_| {
            log!("error"; "watcher thread panicked");
            0
        })
    }
}

/// Event loop. Returns the number of regenerations performed.
///
/// Ends when a stop signal arrives or the event channel disconnects.
fn run_loop<F>(
    events: &NotifyRx,
    stop: &Receiver<()>,
    debounce: Duration,
    mut regenerate: F,
) -> usize
where
    F: FnMut() -> Result<ManifestReport, ManifestError>,
{
    let mut debouncer = Debouncer::new(debounce);
    let mut regenerations = 0;

    let mut run = |coalesced: usize, regenerations: &mut usize| {
        if coalesced > 1 {
            debug!("watch"; "coalesced {} events", coalesced);
        }
        *regenerations += 1;
        if let Err(e) = regenerate() {
            manifest::report_failure(&e);
        }
    };

    loop {
        channel::select! {
            recv(stop) -> _ => break,
            recv(events) -> msg => {
                let Ok(result) = msg else { break };
                if !is_change(&result) {
                    continue;
                }
                debouncer.add_event();
                if debouncer.is_immediate()
                    && let Some(coalesced) = debouncer.take_if_ready()
                {
                    run(coalesced, &mut regenerations);
                }
            },
            default(debouncer.timeout()) => {
                if let Some(coalesced) = debouncer.take_if_ready() {
                    run(coalesced, &mut regenerations);
                }
            },
        }
    }

    regenerations
}

/// Whether a notify result should trigger a regeneration.
///
/// Every create, modify, remove, or rename counts, whatever the path.
/// Access notifications (open/close) are not changes and are skipped;
/// otherwise reading the directory during a scan would feed back into the loop.
fn is_change(result: &notify::Result<notify::Event>) -> bool {
    match result {
        Ok(event) => {
            debug!("watch"; "{}: {}", kind_label(&event.kind), display_paths(&event.paths));
            !matches!(event.kind, EventKind::Access(_))
        }
        Err(e) => {
            log!("watch"; "notify error: {}", e);
            false
        }
    }
}

fn kind_label(kind: &EventKind) -> &'static str {
    match kind {
        EventKind::Create(_) => "created",
        EventKind::Modify(notify::event::ModifyKind::Name(_)) => "renamed",
        EventKind::Modify(_) => "modified",
        EventKind::Remove(_) => "removed",
        EventKind::Access(_) => "accessed",
        EventKind::Any | EventKind::Other => "changed",
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    let paths: Vec<_> = paths.iter().map(|p| p.display().to_string()).collect();
    paths.join(", ")
}
