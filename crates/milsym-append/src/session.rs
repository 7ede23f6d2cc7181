//! Scoped edit sessions.

use crate::store::FeatureStore;
use milsym_core::Result;
use std::ops::{Deref, DerefMut};
use tracing::warn;

/// Edit session over a feature store.
///
/// Begins an edit on creation. [`EditSession::commit`] keeps the changes;
/// dropping the session without committing aborts them.
///
/// # Examples
///
/// ```rust
/// use milsym_append::{EditSession, MemoryWorkspace};
///
/// let mut workspace = MemoryWorkspace::new();
/// {
///     let session = EditSession::begin(&mut workspace).unwrap();
///     assert!(session.is_editing());
/// }
/// assert!(!workspace.is_editing());
/// ```
pub struct EditSession<'a, S: FeatureStore + ?Sized> {
    store: &'a mut S,
    finished: bool,
}

impl<'a, S: FeatureStore + ?Sized> EditSession<'a, S> {
    /// Starts an edit on `store`.
    pub fn begin(store: &'a mut S) -> Result<Self> {
        store.begin_edit()?;
        Ok(Self {
            store,
            finished: false,
        })
    }

    /// Ends the edit and keeps every change made through the session.
    pub fn commit(mut self) -> Result<()> {
        self.finished = true;
        self.store.end_edit(true)
    }

    /// Ends the edit and discards the changes.
    pub fn abort(mut self) -> Result<()> {
        self.finished = true;
        self.store.end_edit(false)
    }
}

impl<S: FeatureStore + ?Sized> Deref for EditSession<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        &*self.store
    }
}

impl<S: FeatureStore + ?Sized> DerefMut for EditSession<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut *self.store
    }
}

impl<S: FeatureStore + ?Sized> Drop for EditSession<'_, S> {
    fn drop(&mut self) {
        if !self.finished {
            warn!(store = %self.store.describe(), "Edit session dropped without commit, aborting");
            if let Err(e) = self.store.end_edit(false) {
                warn!(error = %e, "Failed to abort edit session");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryWorkspace, StoredClass};
    use crate::store::{ClassInfo, Feature};
    use milsym_core::ShapeType;

    fn workspace() -> (MemoryWorkspace, crate::store::ClassHandle) {
        let mut ws = MemoryWorkspace::new();
        let handle = ws.add_class(StoredClass::new(ClassInfo {
            name: "Units".into(),
            dataset: String::new(),
            shape_type: ShapeType::Point,
            fields: Vec::new(),
        }));
        (ws, handle)
    }

    #[test]
    fn test_commit_keeps_changes() {
        let (mut ws, units) = workspace();

        let mut session = EditSession::begin(&mut ws).unwrap();
        session.insert(&units, Feature::new()).unwrap();
        session.commit().unwrap();

        assert_eq!(ws.read_all(&units).unwrap().count(), 1);
        assert!(!ws.is_editing());
    }

    #[test]
    fn test_drop_aborts() {
        let (mut ws, units) = workspace();

        {
            let mut session = EditSession::begin(&mut ws).unwrap();
            session.insert(&units, Feature::new()).unwrap();
        }

        assert_eq!(ws.read_all(&units).unwrap().count(), 0);
        assert!(!ws.is_editing());
    }

    #[test]
    fn test_explicit_abort() {
        let (mut ws, units) = workspace();

        let mut session = EditSession::begin(&mut ws).unwrap();
        session.insert(&units, Feature::new()).unwrap();
        session.abort().unwrap();

        assert_eq!(ws.read_all(&units).unwrap().count(), 0);
    }
}
