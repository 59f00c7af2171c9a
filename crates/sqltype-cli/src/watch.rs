//! Watch mode: regenerate on relevant file changes, one run at a time.
//!
//! Debounced change batches feed a channel with room for a single trigger.
//! The loop below runs generations back to back, so at most one run is in
//! flight. Triggers that arrive during a run collapse into one pending re-run.
//! Ctrl-C is honoured at any point, including in the middle of a run.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::pin;
use std::time::Duration;

use anyhow::Context;
use notify_debouncer_full::{
    new_debouncer,
    notify::{EventKind, RecursiveMode},
    DebounceEventResult,
};
use sqltype_core::config::SqltypeConfig;
use sqltype_core::constants::WATCH_DEBOUNCE_MS;
use sqltype_core::events::EventDispatcher;
use tokio::sync::mpsc;

use crate::generate_once;

/// Decides whether a changed path should trigger a run.
#[derive(Debug, Clone)]
pub struct ChangeFilter {
    extensions: Vec<String>,
    exclude_dirs: Vec<String>,
    output_path: PathBuf,
}

impl ChangeFilter {
    pub fn new(root: &Path, config: &SqltypeConfig) -> Self {
        let mut extensions = config.scan.effective_extensions();
        extensions.push(config.database.effective_migration_extension().to_string());
        Self {
            extensions,
            exclude_dirs: config.scan.effective_exclude(),
            output_path: config.output_path(root),
        }
    }

    pub fn is_relevant(&self, path: &Path) -> bool {
        let ext_matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|want| want == ext));
        if !ext_matches || self.is_output(path) {
            return false;
        }
        !path.components().any(|c| {
            c.as_os_str()
                .to_str()
                .is_some_and(|name| self.exclude_dirs.iter().any(|d| d == name))
        })
    }

    fn is_output(&self, path: &Path) -> bool {
        if path == self.output_path {
            return true;
        }
        match (path.canonicalize(), self.output_path.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

/// Run once, then again after every relevant change, until interrupted.
/// A failed run is logged and the watcher keeps going.
pub async fn watch(
    root: &Path,
    config: &SqltypeConfig,
    events: &EventDispatcher,
) -> anyhow::Result<()> {
    let filter = ChangeFilter::new(root, config);
    let (trigger_tx, trigger_rx) = mpsc::channel::<()>(1);

    let mut debouncer = new_debouncer(
        Duration::from_millis(WATCH_DEBOUNCE_MS),
        None,
        move |result: DebounceEventResult| {
            let events = match result {
                Ok(events) => events,
                Err(errors) => {
                    for error in errors {
                        tracing::warn!(%error, "file watcher error");
                    }
                    return;
                }
            };
            let relevant = events.iter().any(|event| {
                matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                ) && event.paths.iter().any(|p| filter.is_relevant(p))
            });
            if relevant {
                // Full means a re-run is already pending.
                let _ = trigger_tx.try_send(());
            }
        },
    )
    .context("could not start the file watcher")?;

    for dir in [config.source_dir(root), config.migrations_dir(root)] {
        if dir.is_dir() {
            debouncer
                .watch(&dir, RecursiveMode::Recursive)
                .with_context(|| format!("could not watch {}", dir.display()))?;
            tracing::info!(dir = %dir.display(), "watching");
        } else {
            tracing::warn!(dir = %dir.display(), "not watching missing directory");
        }
    }

    let shutdown = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::warn!(%error, "could not listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };
    drive(trigger_rx, shutdown, || run_logged(root, config, events)).await;
    Ok(())
}

/// Runs `run` once and again per trigger, returning the number of completed
/// runs. `shutdown` is raced against both the wait and every run, so an
/// interrupt during a run abandons it.
async fn drive<S, R, F>(mut triggers: mpsc::Receiver<()>, shutdown: S, mut run: R) -> usize
where
    S: Future<Output = ()>,
    R: FnMut() -> F,
    F: Future<Output = ()>,
{
    let mut shutdown = pin!(shutdown);
    let mut completed = 0;
    loop {
        tokio::select! {
            _ = run() => completed += 1,
            _ = &mut shutdown => {
                tracing::info!("interrupted during a run, stopping watch");
                return completed;
            }
        }
        tokio::select! {
            trigger = triggers.recv() => {
                if trigger.is_none() {
                    return completed;
                }
                tracing::info!("change detected, regenerating");
            }
            _ = &mut shutdown => {
                tracing::info!("interrupted, stopping watch");
                return completed;
            }
        }
    }
}

async fn run_logged(root: &Path, config: &SqltypeConfig, events: &EventDispatcher) {
    if let Err(e) = generate_once(root, config, events).await {
        tracing::error!("{e:#}");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    fn filter(root: &Path) -> ChangeFilter {
        ChangeFilter::new(root, &SqltypeConfig::default())
    }

    #[test]
    fn source_and_migration_extensions_are_relevant() {
        let root = Path::new("/project");
        let f = filter(root);
        assert!(f.is_relevant(Path::new("/project/src/app.ts")));
        assert!(f.is_relevant(Path::new("/project/src/View.tsx")));
        assert!(f.is_relevant(Path::new("/project/migrations/1-create.sql")));
        assert!(!f.is_relevant(Path::new("/project/src/styles.css")));
        assert!(!f.is_relevant(Path::new("/project/src/app.ts~")));
    }

    #[test]
    fn generated_module_never_triggers() {
        let root = Path::new("/project");
        assert!(!filter(root).is_relevant(Path::new("/project/src/sqltype.generated.ts")));
    }

    #[test]
    fn generated_module_is_matched_through_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real");
        std::fs::create_dir_all(real.join("src")).unwrap();
        std::fs::write(real.join("src/sqltype.generated.ts"), "").unwrap();
        #[cfg(unix)]
        {
            let link = dir.path().join("link");
            std::os::unix::fs::symlink(&real, &link).unwrap();
            let f = filter(&link);
            assert!(!f.is_relevant(&real.join("src/sqltype.generated.ts")));
        }
    }

    #[test]
    fn excluded_directories_are_ignored() {
        let root = Path::new("/project");
        assert!(!filter(root).is_relevant(Path::new("/project/src/node_modules/x/index.ts")));
    }

    #[tokio::test]
    async fn interrupt_during_a_rerun_stops_the_loop() {
        let (tx, rx) = mpsc::channel::<()>(1);
        tx.try_send(()).unwrap();
        let started = Arc::new(AtomicUsize::new(0));
        let counter = started.clone();
        let run = move || {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) == 1 {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                }
            }
        };
        let shutdown = tokio::time::sleep(Duration::from_millis(50));
        let completed = tokio::time::timeout(Duration::from_secs(5), drive(rx, shutdown, run))
            .await
            .expect("shutdown should interrupt the running generation");
        assert_eq!(completed, 1);
        assert_eq!(started.load(Ordering::SeqCst), 2);
        drop(tx);
    }

    #[tokio::test]
    async fn closed_trigger_channel_ends_the_loop() {
        let (tx, rx) = mpsc::channel::<()>(1);
        tx.try_send(()).unwrap();
        drop(tx);
        let completed = drive(rx, std::future::pending::<()>(), || async {}).await;
        assert_eq!(completed, 2);
    }

    #[tokio::test]
    async fn full_channel_coalesces_triggers() {
        let (tx, mut rx) = mpsc::channel::<()>(1);
        for _ in 0..5 {
            let _ = tx.try_send(());
        }
        assert!(rx.recv().await.is_some());
        assert!(rx.try_recv().is_err());
    }
}
