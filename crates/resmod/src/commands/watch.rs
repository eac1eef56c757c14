//! Watch resources and regenerate declarations on change.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use indexmap::IndexSet;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use resmod_dts::Generator;

use super::generate::{generate_once, is_resource, resolve_options, GenerateArgs};
use crate::config::load_config;

/// Quiet period that ends a burst of file events.
const DEBOUNCE: Duration = Duration::from_millis(200);

/// Path to watch for an input: the input itself, or the directory part of a
/// glob pattern before its first wildcard.
fn watch_root(input: &str) -> PathBuf {
    let path = Path::new(input);
    if path.exists() {
        return path.to_path_buf();
    }

    let base: PathBuf = path
        .components()
        .take_while(|c| !c.as_os_str().to_string_lossy().contains(['*', '?', '[', '{']))
        .collect();
    if base.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        base
    }
}

/// Whether an event touches a resource file.
fn is_relevant(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|path| is_resource(path))
}

/// Run the watch command.
pub fn run(args: GenerateArgs, config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let root = env::current_dir().context("Failed to resolve working directory")?;
    let generator = Generator::new(resolve_options(&args, &config, root));

    if let Err(e) = generate_once(&generator, &args.inputs) {
        tracing::error!("{:#}", e);
    }

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })
    .context("Failed to create file watcher")?;

    let roots: IndexSet<PathBuf> = args.inputs.iter().map(|input| watch_root(input)).collect();
    for root in &roots {
        if !root.exists() {
            tracing::warn!("Not watching missing path {}", root.display());
            continue;
        }
        watcher
            .watch(root, RecursiveMode::Recursive)
            .with_context(|| format!("Failed to watch {}", root.display()))?;
        tracing::info!("Watching {}", root.display());
    }

    while let Ok(event) = rx.recv() {
        let mut changed = is_relevant(&event);

        // Debounce rapid events
        while let Ok(event) = rx.recv_timeout(DEBOUNCE) {
            changed |= is_relevant(&event);
        }

        if !changed {
            continue;
        }

        tracing::debug!("Resources changed, regenerating");
        if let Err(e) = generate_once(&generator, &args.inputs) {
            tracing::error!("{:#}", e);
        }
    }

    Ok(())
}
