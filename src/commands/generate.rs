//! Generate static files

use anyhow::Result;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::generator::{GenerateStats, Generator};
use crate::{Site, CONFIG_FILE};

/// Generate the static site
pub fn run(site: &Site) -> Result<()> {
    run_with_stats(site).map(|_| ())
}

pub fn run_with_stats(site: &Site) -> Result<GenerateStats> {
    let start = Instant::now();

    let stats = Generator::new(site)?.generate()?;

    tracing::info!(
        "Generated {} files ({} posts) in {:.2}s",
        stats.files,
        stats.posts,
        start.elapsed().as_secs_f64()
    );
    Ok(stats)
}

/// Watch posts, static files and the config, regenerating on change
///
/// Blocks until the watcher shuts down. The site is reopened on every
/// change so config edits apply without a restart.
pub fn watch(site: &Site) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    // Create debouncer to avoid multiple rapid rebuilds
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    let config_path = site.base_dir.join(CONFIG_FILE);
    for (path, mode) in [
        (&site.posts_dir, RecursiveMode::Recursive),
        (&site.static_dir, RecursiveMode::Recursive),
        (&config_path, RecursiveMode::NonRecursive),
    ] {
        if path.exists() {
            debouncer.watcher().watch(path, mode)?;
            tracing::debug!("Watching: {:?}", path);
        }
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let changed: Vec<&PathBuf> = events
                    .iter()
                    .map(|e| &e.path)
                    .filter(|p| is_relevant(p))
                    .collect();
                if changed.is_empty() {
                    continue;
                }

                for path in &changed {
                    tracing::info!("File changed: {}", path.display());
                }

                match Site::new(&site.base_dir).and_then(|site| run(&site)) {
                    Ok(()) => tracing::info!("Regenerated successfully"),
                    Err(e) => tracing::error!("Generation failed: {:#}", e),
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

/// Editor droppings and VCS internals never trigger a rebuild
fn is_relevant(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    !path_str.contains(".git")
        && !path_str.contains(".DS_Store")
        && !path_str.ends_with('~')
        && !path_str.ends_with(".swp")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_is_relevant() {
        assert!(is_relevant(Path::new("content/posts/a.mdx")));
        assert!(!is_relevant(Path::new("content/posts/.a.mdx.swp")));
        assert!(!is_relevant(Path::new("content/posts/a.mdx~")));
        assert!(!is_relevant(Path::new(".git/index")));
    }

    #[test]
    fn test_run_with_stats() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        fs::create_dir_all(&site.posts_dir).unwrap();
        fs::write(
            site.posts_dir.join("one.mdx"),
            "---\ntitle: One\ndate: 2024-01-01\ndescription: d\n---\nbody\n",
        )
        .unwrap();

        let stats = run_with_stats(&site).unwrap();
        assert_eq!(stats.posts, 1);
        // home, listing, one post, sitemap, 404
        assert_eq!(stats.files, 5);
    }
}
