//! User Preferences
//!
//! Layered preference store for the editor:
//! - embedded defaults < user-global file < workspace file
//! - live reload via file watching
//! - cheap read handles injected into descriptor queries

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::{Arc, RwLock, RwLockReadGuard};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};

use crate::config::Config;

const DEFAULT_PREFS: &str = include_str!("../resources/prefs/defaults.toml");

/// The merged editor preferences in effect.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserPrefs {
    /// Soft-wrap long lines in R-markdown-family documents (Sweave,
    /// R Markdown).
    pub soft_wrap_rmd_files: bool,
    /// Shade embedded code chunks in literate documents.
    pub highlight_chunks: bool,
    /// Auto-insert matching brackets and quotes.
    pub insert_matching: bool,
    pub tab_width: u32,
}

impl Default for UserPrefs {
    fn default() -> Self {
        toml::from_str(DEFAULT_PREFS).expect("embedded preference defaults parse")
    }
}

/// One preference file, all keys optional. Present keys override the
/// layers below.
#[derive(Debug, Clone, Default, Deserialize)]
struct PrefsFile {
    soft_wrap_rmd_files: Option<bool>,
    highlight_chunks: Option<bool>,
    insert_matching: Option<bool>,
    tab_width: Option<u32>,
}

impl PrefsFile {
    fn apply(self, prefs: &mut UserPrefs) {
        if let Some(v) = self.soft_wrap_rmd_files {
            prefs.soft_wrap_rmd_files = v;
        }
        if let Some(v) = self.highlight_chunks {
            prefs.highlight_chunks = v;
        }
        if let Some(v) = self.insert_matching {
            prefs.insert_matching = v;
        }
        if let Some(v) = self.tab_width {
            prefs.tab_width = v;
        }
    }
}

/// Loading priority of the preference layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PrefsLayer {
    Defaults = 0,
    UserGlobal = 1,
    Workspace = 2,
}

/// Events from the file watcher.
#[derive(Debug)]
enum WatcherEvent {
    PrefsFileChanged(PathBuf),
    WatcherError(notify::Error),
}

/// Owns the merged preference value and keeps it current.
///
/// Descriptor queries never touch the store directly; they read through a
/// [`PrefsHandle`].
pub struct PreferencesStore {
    values: Arc<RwLock<UserPrefs>>,
    user_path: Option<PathBuf>,
    workspace_path: Option<PathBuf>,
    _watcher: Option<RecommendedWatcher>,
}

/// Cheaply clonable read handle over the live preferences.
#[derive(Debug, Clone)]
pub struct PrefsHandle {
    values: Arc<RwLock<UserPrefs>>,
}

impl PrefsHandle {
    pub fn snapshot(&self) -> UserPrefs {
        read_guard(&self.values).clone()
    }

    pub fn soft_wrap_rmd_files(&self) -> bool {
        read_guard(&self.values).soft_wrap_rmd_files
    }

    pub fn highlight_chunks(&self) -> bool {
        read_guard(&self.values).highlight_chunks
    }
}

fn read_guard(values: &RwLock<UserPrefs>) -> RwLockReadGuard<'_, UserPrefs> {
    values.read().unwrap_or_else(|e| e.into_inner())
}

impl PreferencesStore {
    /// Store reading the preference files named by the configuration.
    pub fn new(config: &Config) -> Self {
        Self::with_paths(
            config.user_prefs_path.clone(),
            config.workspace_prefs_path.clone(),
        )
    }

    /// Store over explicit file paths. Either layer may be absent.
    pub fn with_paths(user_path: Option<PathBuf>, workspace_path: Option<PathBuf>) -> Self {
        Self {
            values: Arc::new(RwLock::new(UserPrefs::default())),
            user_path,
            workspace_path,
            _watcher: None,
        }
    }

    /// Store holding the embedded defaults only: no files, no watcher.
    pub fn with_defaults() -> Self {
        Self::with_paths(None, None)
    }

    /// Load the layered preferences and start watching the files for
    /// changes.
    pub fn initialize(&mut self) -> Result<()> {
        self.reload();
        self.start_watching()?;
        Ok(())
    }

    /// Write the embedded defaults to the user preference file so users
    /// have something to edit. Never overwrites an existing file.
    pub fn seed_user_file(&self) -> Result<()> {
        let Some(path) = &self.user_path else {
            return Ok(());
        };
        if path.exists() {
            return Ok(());
        }
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create preference directory: {}", dir.display()))?;
        }
        std::fs::write(path, DEFAULT_PREFS)
            .with_context(|| format!("Failed to write preference file: {}", path.display()))?;
        log::info!("Created preference file: {}", path.display());
        Ok(())
    }

    /// Re-apply the full layered load: defaults, then the user file, then
    /// the workspace file.
    pub fn reload(&self) {
        Self::reload_into(
            &self.values,
            self.user_path.as_deref(),
            self.workspace_path.as_deref(),
        );
    }

    fn reload_into(
        values: &RwLock<UserPrefs>,
        user_path: Option<&Path>,
        workspace_path: Option<&Path>,
    ) {
        let mut prefs = UserPrefs::default();

        let layers = [
            (PrefsLayer::UserGlobal, user_path),
            (PrefsLayer::Workspace, workspace_path),
        ];
        for (layer, path) in layers {
            let Some(path) = path else { continue };
            match Self::load_layer(path) {
                Ok(Some(file)) => {
                    file.apply(&mut prefs);
                    log::debug!("Applied {:?} preferences from {}", layer, path.display());
                }
                Ok(None) => {}
                Err(e) => {
                    // Leave the lower layers in effect.
                    log::warn!("Skipping preference file {}: {:#}", path.display(), e);
                }
            }
        }

        let mut guard = values.write().unwrap_or_else(|e| e.into_inner());
        *guard = prefs;
    }

    /// Read and parse one preference file. `Ok(None)` when the file does
    /// not exist.
    fn load_layer(path: &Path) -> Result<Option<PrefsFile>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read preference file: {}", path.display()))?;
        let file = toml::from_str(&content)
            .with_context(|| format!("Failed to parse preference TOML: {}", path.display()))?;
        Ok(Some(file))
    }

    /// Watch the preference file directories and re-apply the layered
    /// load whenever a TOML file in them changes.
    fn start_watching(&mut self) -> Result<()> {
        let mut watch_dirs: Vec<PathBuf> = [&self.user_path, &self.workspace_path]
            .into_iter()
            .flatten()
            .filter_map(|p| p.parent().map(|d| d.to_path_buf()))
            .filter(|d| d.exists())
            .collect();
        watch_dirs.dedup();

        if watch_dirs.is_empty() {
            return Ok(());
        }

        let (tx, rx) = mpsc::channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) => {
                    if let EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) =
                        event.kind
                    {
                        for path in event.paths {
                            if path.extension().and_then(|s| s.to_str()) == Some("toml") {
                                let _ = tx.send(WatcherEvent::PrefsFileChanged(path));
                            }
                        }
                    }
                }
                Err(e) => {
                    let _ = tx.send(WatcherEvent::WatcherError(e));
                }
            },
            notify::Config::default().with_poll_interval(Duration::from_secs(1)),
        )?;

        for dir in &watch_dirs {
            watcher.watch(dir, RecursiveMode::NonRecursive)?;
        }
        self._watcher = Some(watcher);

        let values = self.values.clone();
        let user_path = self.user_path.clone();
        let workspace_path = self.workspace_path.clone();
        thread::spawn(move || {
            for event in rx {
                match event {
                    WatcherEvent::PrefsFileChanged(path) => {
                        log::info!("Preference file changed: {}", path.display());
                        // Reload everything on any change.
                        Self::reload_into(
                            &values,
                            user_path.as_deref(),
                            workspace_path.as_deref(),
                        );
                    }
                    WatcherEvent::WatcherError(e) => {
                        log::error!("Preference file watcher error: {}", e);
                    }
                }
            }
        });

        Ok(())
    }

    /// Read handle for injection into descriptor queries.
    pub fn handle(&self) -> PrefsHandle {
        PrefsHandle {
            values: self.values.clone(),
        }
    }

    pub fn snapshot(&self) -> UserPrefs {
        read_guard(&self.values).clone()
    }

    /// Apply a programmatic change (settings UI, tests). File-backed
    /// layers win again at the next reload.
    pub fn update(&self, f: impl FnOnce(&mut UserPrefs)) {
        let mut guard = self.values.write().unwrap_or_else(|e| e.into_inner());
        f(&mut guard);
    }
}
