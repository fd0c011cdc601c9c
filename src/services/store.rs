//! Bundle persistence.
//!
//! Bundles round-trip through JSON text. The layout strings inside a bundle
//! embed the editing surface's own serialization (quotes, escapes, markup);
//! the round trip must preserve them byte for byte, which the tests pin
//! down. Calls are fire-once: there are no retries at this layer.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::models::BuildBundle;

/// Storage boundary for published bundles.
///
/// A missing, malformed, or mismatched bundle is "not found" (`Ok(None)`),
/// never an error: the presentation session turns it into a blocking
/// informational state rather than a crash. Errors are reserved for the
/// storage medium itself failing.
pub trait BundleStore {
    /// Persists a bundle, keyed by its project id.
    fn save(&self, bundle: &BuildBundle) -> Result<()>;

    /// Loads the bundle for a project id, if one matches.
    fn load(&self, project_id: &str) -> Result<Option<BuildBundle>>;
}

/// File-backed store: one JSON document per project under a root directory.
#[derive(Debug)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at `root`, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.exists() {
            fs::create_dir_all(&root).with_context(|| {
                format!("Failed to create bundle directory: {}", root.display())
            })?;
        }
        Ok(Self { root })
    }

    fn bundle_path(&self, project_id: &str) -> PathBuf {
        self.root.join(format!("{}.json", sanitize_project_id(project_id)))
    }
}

impl BundleStore for JsonFileStore {
    /// Atomic write: serialize to a temp file, then rename over the target,
    /// so a crash mid-save never leaves a corrupted bundle behind.
    fn save(&self, bundle: &BuildBundle) -> Result<()> {
        let path = self.bundle_path(&bundle.project_id);
        let json = serde_json::to_string_pretty(bundle).context("Failed to serialize bundle")?;

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .with_context(|| format!("Failed to write bundle to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &path)
            .with_context(|| format!("Failed to move bundle into place at {}", path.display()))?;

        debug!(project_id = %bundle.project_id, path = %path.display(), "Saved bundle");
        Ok(())
    }

    fn load(&self, project_id: &str) -> Result<Option<BuildBundle>> {
        let path = self.bundle_path(project_id);
        if !path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read bundle from {}", path.display()))?;

        match serde_json::from_str::<BuildBundle>(&raw) {
            Ok(bundle) if bundle.project_id == project_id => Ok(Some(bundle)),
            Ok(bundle) => {
                warn!(
                    requested = project_id,
                    stored = %bundle.project_id,
                    "Bundle project id mismatch, treating as not found"
                );
                Ok(None)
            }
            Err(e) => {
                warn!(project_id, error = %e, "Malformed bundle, treating as not found");
                Ok(None)
            }
        }
    }
}

/// In-memory store holding serialized JSON text per project.
///
/// Stand-in for a future backing service. Values are kept as JSON strings,
/// not deserialized bundles, so the textual round trip is exercised exactly
/// as it would be against real storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl BundleStore for MemoryStore {
    fn save(&self, bundle: &BuildBundle) -> Result<()> {
        let json = serde_json::to_string(bundle).context("Failed to serialize bundle")?;
        let mut entries = self.entries.lock().expect("bundle store lock poisoned");
        entries.insert(bundle.project_id.clone(), json);
        Ok(())
    }

    fn load(&self, project_id: &str) -> Result<Option<BuildBundle>> {
        let entries = self.entries.lock().expect("bundle store lock poisoned");
        let Some(raw) = entries.get(project_id) else {
            return Ok(None);
        };

        match serde_json::from_str::<BuildBundle>(raw) {
            Ok(bundle) if bundle.project_id == project_id => Ok(Some(bundle)),
            _ => Ok(None),
        }
    }
}

/// Sanitizes a project id for use as a filename.
///
/// Replaces path separators and other problematic characters with
/// underscores; ids are caller-supplied and must never escape the root.
fn sanitize_project_id(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Validates a project id for use in routes and filenames.
pub fn validate_project_id(id: &str) -> Result<()> {
    if id.is_empty() {
        anyhow::bail!("Project id cannot be empty");
    }
    if id.len() > 100 {
        anyhow::bail!("Project id exceeds maximum length of 100 characters");
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        anyhow::bail!("Project id '{id}' must be alphanumeric with hyphens or underscores");
    }
    Ok(())
}
