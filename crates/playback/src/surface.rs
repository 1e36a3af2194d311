//! Render-surface collaborator: where composited frames land.

use cutline_common::{AssetId, ClipId, TimeCode};

/// One visual contribution to the current frame. Transform values are the
/// clip's evaluated (keyframe-aware) parameters; rotation is degrees about
/// the rendered center.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeOp {
    pub clip_id: ClipId,
    pub asset_id: AssetId,
    /// Source time of the frame to draw.
    pub source_time: TimeCode,
    /// 0.0..=1.0.
    pub opacity: f32,
    pub position: [f32; 2],
    /// Percent, 100 = natural size.
    pub scale: [f32; 2],
    pub rotation: f32,
}

/// Host-owned drawing target. The engine clears once per render pass and
/// composites active visual clips in clip-list order; later ops draw on top.
pub trait RenderSurface {
    fn clear(&mut self);

    fn composite(&mut self, op: &CompositeOp);
}
