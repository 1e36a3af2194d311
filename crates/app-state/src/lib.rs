//! `cutline-state` — Editor context, selection, undo history, and persistence.
//!
//! The state layer is deliberately explicit: every engine API takes a
//! `&mut EditorContext`, and the pieces with independent lifecycles are kept
//! out of it so history snapshots stay minimal.
//!
//! ```text
//!   EditorContext ──┬── sequences (cutline-timeline)
//!                   ├── playhead (current_time)
//!                   ├── SelectionState + Tool
//!                   └── clipboard
//!
//!   HistoryManager ─── bounded cursor list of ProjectSnapshot
//!   ProjectStore ───── host persistence (ProjectFile payloads)
//! ```

pub mod context;
pub mod history;
pub mod project;
pub mod selection;
pub mod snapshot;

// Re-export commonly used items at crate root
pub use context::EditorContext;
pub use history::HistoryManager;
pub use project::{MemoryStore, ProjectFile, ProjectStore, PROJECT_VERSION};
pub use selection::{SelectionState, Tool};
pub use snapshot::ProjectSnapshot;
