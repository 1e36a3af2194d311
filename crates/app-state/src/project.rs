//! Project persistence collaborator interface.
//!
//! The engine never touches the filesystem itself. It hands a `ProjectFile`
//! value to a host-supplied `ProjectStore` and takes one back on load.

use cutline_common::{EngineError, EngineResult};
use cutline_timeline::Sequence;
use serde::{Deserialize, Serialize};

use crate::context::EditorContext;
use crate::snapshot::ProjectSnapshot;

/// Current project file format version.
pub const PROJECT_VERSION: &str = "10.0";

/// The full persistable project payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    pub version: String,
    pub project_name: String,
    pub sequences: Vec<Sequence>,
}

impl ProjectFile {
    /// Build the save payload from the live context.
    pub fn from_context(project_name: impl Into<String>, ctx: &EditorContext) -> Self {
        Self {
            version: PROJECT_VERSION.to_string(),
            project_name: project_name.into(),
            sequences: ctx.sequences.clone(),
        }
    }

    /// Load this file into the context, replacing the sequence collection
    /// and resetting the playhead.
    pub fn apply_to(&self, ctx: &mut EditorContext) {
        let snapshot = ProjectSnapshot {
            sequences: self.sequences.clone(),
            current_time: 0.0,
        };
        snapshot.restore(ctx);
        tracing::debug!(
            version = %self.version,
            sequences = self.sequences.len(),
            "Project loaded"
        );
    }
}

/// Host-side storage for project files. `load` returns `Ok(None)` when no
/// saved project exists.
pub trait ProjectStore {
    fn save(&mut self, file: &ProjectFile) -> EngineResult<()>;
    fn load(&mut self) -> EngineResult<Option<ProjectFile>>;
}

/// In-memory store, used in tests and as the autosave fallback.
#[derive(Default)]
pub struct MemoryStore {
    payload: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProjectStore for MemoryStore {
    fn save(&mut self, file: &ProjectFile) -> EngineResult<()> {
        let json = serde_json::to_string(file).map_err(|e| EngineError::Store(e.to_string()))?;
        self.payload = Some(json);
        Ok(())
    }

    fn load(&mut self) -> EngineResult<Option<ProjectFile>> {
        match &self.payload {
            None => Ok(None),
            Some(json) => {
                let file =
                    serde_json::from_str(json).map_err(|e| EngineError::Store(e.to_string()))?;
                Ok(Some(file))
            }
        }
    }
}
