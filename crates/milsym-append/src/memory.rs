//! JSON-backed in-memory workspace.
//!
//! A workspace file holds every feature class with its schema, features,
//! representation rules and the names of processes currently holding a
//! schema lock on it:
//!
//! ```json
//! {
//!   "feature_classes": [
//!     {
//!       "name": "Units",
//!       "dataset": "Military",
//!       "shape_type": "point",
//!       "fields": [{"name": "sic", "type": "string", "max_length": 15}],
//!       "features": [],
//!       "representation_rules": [],
//!       "lock_holders": []
//!     }
//!   ]
//! }
//! ```
//!
//! Edits are applied in memory. Committing an edit writes the workspace back
//! to its file, aborting restores the state captured when the edit began.

use crate::store::{ClassHandle, ClassInfo, Feature, FeatureId, FeatureStore, RepresentationRule};
use milsym_core::{MilsymError, Result, StoreError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredClass {
    #[serde(flatten)]
    pub info: ClassInfo,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub representation_rules: Vec<RepresentationRule>,
    /// Other sessions holding a schema lock
    #[serde(default)]
    pub lock_holders: Vec<String>,
}

impl StoredClass {
    pub fn new(info: ClassInfo) -> Self {
        Self {
            info,
            features: Vec::new(),
            representation_rules: Vec::new(),
            lock_holders: Vec::new(),
        }
    }

    fn next_id(&self) -> FeatureId {
        self.features.iter().map(|f| f.id).max().unwrap_or(0) + 1
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct WorkspaceData {
    #[serde(default)]
    feature_classes: Vec<StoredClass>,
}

/// In-memory feature store, optionally bound to a JSON file.
#[derive(Debug, Default)]
pub struct MemoryWorkspace {
    data: WorkspaceData,
    path: Option<PathBuf>,
    /// State captured by `begin_edit`
    snapshot: Option<WorkspaceData>,
}

impl MemoryWorkspace {
    /// Creates an empty workspace that is never written to disk.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a workspace file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::WorkspaceNotFound`] if the file does not exist,
    /// or a serialization error if it cannot be parsed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(StoreError::WorkspaceNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let contents = fs::read_to_string(path)?;
        let data: WorkspaceData = serde_json::from_str(&contents)
            .map_err(|e| StoreError::serialization(format!("{}: {}", path.display(), e)))?;

        info!(
            path = %path.display(),
            class_count = data.feature_classes.len(),
            "Opened workspace"
        );

        Ok(Self {
            data,
            path: Some(path.to_path_buf()),
            snapshot: None,
        })
    }

    /// Opens an input given as `workspace.json` or `workspace.json#Class`.
    ///
    /// Without a class name the workspace must hold exactly one class.
    /// Returns `None` if the file or the class cannot be opened.
    pub fn open_feature_class_from_string(location: &str) -> Option<(Self, ClassHandle)> {
        let (path, class) = match location.rsplit_once('#') {
            Some((path, class)) => (path, Some(class)),
            None => (location, None),
        };

        let workspace = match Self::open(path) {
            Ok(workspace) => workspace,
            Err(e) => {
                debug!(input = %location, error = %e, "Failed to open input workspace");
                return None;
            }
        };

        let handle = match class {
            Some(class) => workspace.find_feature_class(class)?,
            None => match workspace.data.feature_classes.as_slice() {
                [only] => ClassHandle::new(only.info.dataset.clone(), only.info.name.clone()),
                _ => return None,
            },
        };

        Some((workspace, handle))
    }

    /// Adds a feature class, replacing any class with the same handle.
    pub fn add_class(&mut self, class: StoredClass) -> ClassHandle {
        let handle = ClassHandle::new(class.info.dataset.clone(), class.info.name.clone());
        self.data
            .feature_classes
            .retain(|c| !(c.info.dataset == handle.dataset && c.info.name == handle.name));
        self.data.feature_classes.push(class);
        handle
    }

    /// Stored class for a handle.
    pub fn class(&self, class: &ClassHandle) -> Result<&StoredClass> {
        self.data
            .feature_classes
            .iter()
            .find(|c| c.info.dataset == class.dataset && c.info.name == class.name)
            .ok_or_else(|| StoreError::class_not_found(class.to_string()).into())
    }

    fn class_mut(&mut self, class: &ClassHandle) -> Result<&mut StoredClass> {
        self.data
            .feature_classes
            .iter_mut()
            .find(|c| c.info.dataset == class.dataset && c.info.name == class.name)
            .ok_or_else(|| StoreError::class_not_found(class.to_string()).into())
    }

    /// Handles of every class, in file order.
    pub fn classes(&self) -> Vec<ClassHandle> {
        self.data
            .feature_classes
            .iter()
            .map(|c| ClassHandle::new(c.info.dataset.clone(), c.info.name.clone()))
            .collect()
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_editing(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Writes the workspace to `path` and binds it there.
    pub fn save_as<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.path = Some(path.as_ref().to_path_buf());
        self.save()
    }

    fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| StoreError::serialization(e.to_string()))?;
        fs::write(path, json)?;

        debug!(path = %path.display(), "Workspace saved");
        Ok(())
    }

    fn require_editing(&self) -> Result<()> {
        if self.is_editing() {
            Ok(())
        } else {
            Err(MilsymError::Store(StoreError::NotEditing))
        }
    }
}

impl FeatureStore for MemoryWorkspace {
    fn describe(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None => "memory".to_string(),
        }
    }

    fn open_feature_class(&self, dataset: &str, class: &str) -> Option<ClassHandle> {
        self.data
            .feature_classes
            .iter()
            .find(|c| {
                c.info.name.eq_ignore_ascii_case(class)
                    && (dataset.is_empty() || c.info.dataset.eq_ignore_ascii_case(dataset))
            })
            .map(|c| ClassHandle::new(c.info.dataset.clone(), c.info.name.clone()))
    }

    fn class_info(&self, class: &ClassHandle) -> Result<ClassInfo> {
        Ok(self.class(class)?.info.clone())
    }

    fn read_all<'a>(
        &'a self,
        class: &ClassHandle,
    ) -> Result<Box<dyn Iterator<Item = Feature> + 'a>> {
        let stored = self.class(class)?;
        Ok(Box::new(stored.features.iter().cloned()))
    }

    fn schema_lock_available(&self, class: &ClassHandle) -> bool {
        self.class(class)
            .map(|c| c.lock_holders.is_empty())
            .unwrap_or(false)
    }

    fn begin_edit(&mut self) -> Result<()> {
        if self.is_editing() {
            return Err(StoreError::AlreadyEditing.into());
        }
        self.snapshot = Some(self.data.clone());
        Ok(())
    }

    fn end_edit(&mut self, commit: bool) -> Result<()> {
        let snapshot = self.snapshot.take().ok_or(StoreError::NotEditing)?;

        if commit {
            self.save()
        } else {
            self.data = snapshot;
            debug!(workspace = %self.describe(), "Edit aborted");
            Ok(())
        }
    }

    fn insert(&mut self, class: &ClassHandle, mut record: Feature) -> Result<FeatureId> {
        self.require_editing()?;

        let stored = self.class_mut(class)?;
        record.id = stored.next_id();
        let id = record.id;
        stored.features.push(record);
        Ok(id)
    }

    fn update_in_place(&mut self, class: &ClassHandle, feature: &Feature) -> Result<()> {
        self.require_editing()?;

        let stored = self.class_mut(class)?;
        let slot = stored
            .features
            .iter_mut()
            .find(|f| f.id == feature.id)
            .ok_or_else(|| StoreError::FeatureNotFound {
                class: class.to_string(),
                id: feature.id,
            })?;
        *slot = feature.clone();
        Ok(())
    }

    fn representation_rules(&self, class: &ClassHandle) -> Result<Vec<RepresentationRule>> {
        Ok(self.class(class)?.representation_rules.clone())
    }

    fn set_representation_rules(
        &mut self,
        class: &ClassHandle,
        rules: Vec<RepresentationRule>,
    ) -> Result<()> {
        self.require_editing()?;
        self.class_mut(class)?.representation_rules = rules;
        Ok(())
    }
}
