//! Reload the page when the portfolio file changes on disk.

use std::path::{Path, PathBuf};

use log::{debug, warn};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// Watch the directory holding `file` and call `on_change` whenever an event
/// touches that file. Editors that save by renaming a temp file over the
/// original are covered because the parent is watched, not the file.
pub fn watch_file<F>(file: &Path, on_change: F) -> notify::Result<RecommendedWatcher>
where
    F: Fn() + Send + 'static,
{
    let target = file.to_path_buf();
    let dir = file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) if touches(&event, &target) => {
            debug!("{:?} on {}", event.kind, target.display());
            on_change();
        }
        Ok(_) => {}
        Err(e) => warn!("Watch error: {e}"),
    })?;
    watcher.watch(&dir, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

fn touches(event: &Event, target: &Path) -> bool {
    let relevant = matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Any
    );
    relevant
        && event
            .paths
            .iter()
            .any(|p| p == target || p.file_name() == target.file_name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind};

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn test_touches_only_the_watched_file() {
        let target = Path::new("/site/portfolio.md");
        assert!(touches(&event(EventKind::Modify(ModifyKind::Any), "/site/portfolio.md"), target));
        assert!(touches(&event(EventKind::Create(CreateKind::File), "/site/portfolio.md"), target));
        assert!(!touches(&event(EventKind::Modify(ModifyKind::Any), "/site/other.md"), target));
        assert!(!touches(&event(EventKind::Access(AccessKind::Any), "/site/portfolio.md"), target));
    }
}
