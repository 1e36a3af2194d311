//! `cutline-edit` — Edit operations over the timeline model.
//!
//! All operations take an explicit `&mut EditorContext`, validate first, and
//! leave the timeline untouched on error:
//!
//! - **ops**: insert (ripple), overwrite (trim/replace), split, move, delete,
//!   clipboard verbs, effect application, adjustment layers, compound clips
//! - **trim**: trim window, slip, and rate (speed) changes
//! - **ducking**: volume keyframe generation for dialog-over-music
//!
//! History is the caller's concern: commit a `ProjectSnapshot` after every
//! successful operation.

pub mod ducking;
pub mod ops;
pub mod trim;

// Re-export commonly used items at crate root
pub use ducking::{apply_audio_ducking, DuckingParams};
pub use ops::{
    add_adjustment_layer, apply_audio_effect, apply_effect, copy_clip, cut_clip, delete,
    duplicate, insert, insert_range, make_compound, move_clip, overwrite, overwrite_range, paste,
    split, MoveOutcome,
};
pub use trim::{set_speed, set_trim, slip};

#[cfg(test)]
pub(crate) mod test_util {
    use cutline_state::EditorContext;

    /// Fresh context with one active default sequence.
    pub fn make_context() -> EditorContext {
        let mut ctx = EditorContext::new();
        ctx.create_sequence("Sequence 1");
        ctx
    }
}
