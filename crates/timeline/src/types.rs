//! Timeline data model types: Sequence, Track, Clip, Marker.
//!
//! A sequence owns its tracks and a flat, insertion-ordered clip list; each
//! clip points at its track by id. The flat list is load-bearing: the playback
//! engine composites active clips in clip-list order, so insertion order is
//! part of the model, not an implementation detail.

use cutline_common::{
    AssetId, AssetInfo, ClipId, MediaKind, Rational, Resolution, SequenceId, TimeCode,
};
use serde::{Deserialize, Serialize};

use crate::effect::EffectInstance;
use crate::keyframe::Keyframe;

/// Marker color cycle (applied by creation index).
pub const MARKER_COLORS: [&str; 5] = ["#ef4444", "#f59e0b", "#10b981", "#3b82f6", "#8b5cf6"];

/// A complete sequence with tracks, clips, markers, and in/out points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    pub id: SequenceId,
    pub name: String,
    /// Tracks in top-down display order.
    pub tracks: Vec<Track>,
    /// All clips, in insertion order, across every track.
    pub clips: Vec<Clip>,
    pub markers: Vec<Marker>,
    /// Export/playback range start, set from the playhead.
    #[serde(default)]
    pub in_point: Option<TimeCode>,
    /// Export/playback range end, set from the playhead.
    #[serde(default)]
    pub out_point: Option<TimeCode>,
    pub fps: Rational,
    pub resolution: Resolution,
}

impl Sequence {
    /// Create a sequence with the default track layout: three video tracks
    /// (top-down V3, V2, V1) over two audio tracks (A1, A2).
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::with_format(id, name, Rational::FPS_30, Resolution::HD)
    }

    pub fn with_format(
        id: impl Into<String>,
        name: impl Into<String>,
        fps: Rational,
        resolution: Resolution,
    ) -> Self {
        Self {
            id: SequenceId::new(id),
            name: name.into(),
            tracks: vec![
                Track::new("v3", TrackKind::Video, "V3"),
                Track::new("v2", TrackKind::Video, "V2"),
                Track::new("v1", TrackKind::Video, "V1"),
                Track::new("a1", TrackKind::Audio, "A1"),
                Track::new("a2", TrackKind::Audio, "A2"),
            ],
            clips: Vec::new(),
            markers: Vec::new(),
            in_point: None,
            out_point: None,
            fps,
            resolution,
        }
    }

    /// Total duration: the latest clip end time, zero for an empty sequence.
    pub fn duration(&self) -> TimeCode {
        let secs = self
            .clips
            .iter()
            .map(|c| c.end_time().as_secs())
            .fold(0.0, f64::max);
        TimeCode::from_secs(secs)
    }

    pub fn track(&self, track_id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == track_id)
    }

    pub fn track_mut(&mut self, track_id: &str) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|t| t.id == track_id)
    }

    pub fn clip(&self, clip_id: &ClipId) -> Option<&Clip> {
        self.clips.iter().find(|c| &c.id == clip_id)
    }

    pub fn clip_mut(&mut self, clip_id: &ClipId) -> Option<&mut Clip> {
        self.clips.iter_mut().find(|c| &c.id == clip_id)
    }

    pub fn clip_index(&self, clip_id: &ClipId) -> Option<usize> {
        self.clips.iter().position(|c| &c.id == clip_id)
    }

    /// The track a clip currently sits on.
    pub fn track_for_clip(&self, clip_id: &ClipId) -> Option<&Track> {
        let clip = self.clip(clip_id)?;
        self.track(&clip.track_id)
    }

    pub fn clips_on_track<'a>(&'a self, track_id: &'a str) -> impl Iterator<Item = &'a Clip> + 'a {
        self.clips.iter().filter(move |c| c.track_id == track_id)
    }

    /// Clips on a track intersecting the half-open range `[start, end)`.
    pub fn clips_overlapping<'a>(
        &'a self,
        track_id: &'a str,
        start: TimeCode,
        end: TimeCode,
    ) -> impl Iterator<Item = &'a Clip> {
        self.clips_on_track(track_id)
            .filter(move |c| c.start_time.as_secs() < end.as_secs() && c.end_time().as_secs() > start.as_secs())
    }

    /// Clips active at a point in time, in clip-list order.
    pub fn clips_active_at(&self, time: TimeCode) -> impl Iterator<Item = &Clip> {
        self.clips.iter().filter(move |c| c.is_active_at(time))
    }

    /// Whether any two clips on the given track overlap.
    pub fn has_overlap_on_track(&self, track_id: &str) -> bool {
        let clips: Vec<&Clip> = self.clips_on_track(track_id).collect();
        for (i, a) in clips.iter().enumerate() {
            for b in clips.iter().skip(i + 1) {
                if a.start_time.as_secs() < b.end_time().as_secs()
                    && b.start_time.as_secs() < a.end_time().as_secs()
                {
                    return true;
                }
            }
        }
        false
    }

    /// Append a marker at `time` with an auto-generated label and the next
    /// color in the cycle.
    pub fn add_marker(&mut self, id: impl Into<String>, time: TimeCode) -> &Marker {
        let n = self.markers.len();
        self.markers.push(Marker {
            id: id.into(),
            time,
            label: format!("Marker {}", n + 1),
            color: MARKER_COLORS[n % MARKER_COLORS.len()].to_string(),
        });
        self.markers.last().expect("just pushed")
    }
}

/// What a track is allowed to carry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackKind {
    Video,
    Audio,
}

impl TrackKind {
    /// Audio clips belong on audio tracks; everything else on video tracks.
    pub fn accepts(self, kind: &ClipKind) -> bool {
        match self {
            TrackKind::Audio => matches!(kind, ClipKind::Audio),
            TrackKind::Video => !matches!(kind, ClipKind::Audio),
        }
    }
}

/// A single track. Clips live on the sequence; a track only carries identity
/// and playback/editing flags.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub kind: TrackKind,
    pub name: String,
    pub icon: String,
    pub muted: bool,
    pub solo: bool,
    pub locked: bool,
}

impl Track {
    pub fn new(id: impl Into<String>, kind: TrackKind, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            icon: match kind {
                TrackKind::Video => "🎥".to_string(),
                TrackKind::Audio => "🔊".to_string(),
            },
            muted: false,
            solo: false,
            locked: false,
        }
    }
}

/// Clip kind, carrying kind-specific payload where one exists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ClipKind {
    Video,
    Audio,
    Image,
    Text,
    /// Adjustment layer: occupies timeline space, produces no frame itself.
    Adjustment,
    /// Compound clip backed by a nested sequence.
    Compound { sequence_id: SequenceId },
}

impl ClipKind {
    /// Whether playback drives a media binding for this kind.
    pub fn is_playable(&self) -> bool {
        matches!(self, ClipKind::Video | ClipKind::Audio)
    }

    /// Whether the clip contributes a frame to the composite.
    pub fn produces_visual(&self) -> bool {
        matches!(self, ClipKind::Video | ClipKind::Image | ClipKind::Text)
    }
}

impl From<MediaKind> for ClipKind {
    fn from(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Video => ClipKind::Video,
            MediaKind::Audio => ClipKind::Audio,
            MediaKind::Image => ClipKind::Image,
            MediaKind::Text => ClipKind::Text,
        }
    }
}

fn default_speed() -> f64 {
    1.0
}

fn default_volume() -> f32 {
    100.0
}

fn default_opacity() -> f32 {
    100.0
}

fn default_scale() -> [f32; 2] {
    [100.0, 100.0]
}

/// A clip placed on a track. References a media asset and describes how its
/// trim window maps onto the timeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub id: ClipId,
    pub asset_id: AssetId,
    pub name: String,
    pub kind: ClipKind,
    pub track_id: String,
    /// Where this clip starts on the timeline. Never negative.
    pub start_time: TimeCode,
    /// Timeline duration. Equals `(trim_end - trim_start) / speed`.
    pub duration: TimeCode,
    /// Source in-point.
    pub trim_start: TimeCode,
    /// Source out-point. Always after `trim_start`.
    pub trim_end: TimeCode,
    /// Intrinsic length of the underlying source, kept for rate changes.
    pub source_duration: TimeCode,
    #[serde(default = "default_speed")]
    pub speed: f64,
    /// 0..=100, matching the mixer scale.
    #[serde(default = "default_volume")]
    pub volume: f32,
    /// 0..=100.
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    #[serde(default)]
    pub position: [f32; 2],
    #[serde(default = "default_scale")]
    pub scale: [f32; 2],
    #[serde(default)]
    pub rotation: f32,
    /// Parameter automation, in insertion order. Times are sequence times.
    #[serde(default)]
    pub keyframes: Vec<Keyframe>,
    /// Video effect chain, applied in list order by the host pipeline.
    #[serde(default)]
    pub effects: Vec<EffectInstance>,
    /// Audio effect chain, applied in list order by the host pipeline.
    #[serde(default)]
    pub audio_effects: Vec<EffectInstance>,
}

impl Clip {
    /// Create a clip from an asset, using the full source as the trim window.
    pub fn from_asset(
        id: impl Into<String>,
        asset: &AssetInfo,
        track_id: impl Into<String>,
        start_time: TimeCode,
        duration: TimeCode,
    ) -> Self {
        Self {
            id: ClipId::new(id),
            asset_id: asset.id.clone(),
            name: asset.name.clone(),
            kind: asset.kind.into(),
            track_id: track_id.into(),
            start_time,
            duration,
            trim_start: TimeCode::ZERO,
            trim_end: duration,
            source_duration: duration,
            speed: 1.0,
            volume: 100.0,
            opacity: 100.0,
            position: [0.0, 0.0],
            scale: [100.0, 100.0],
            rotation: 0.0,
            keyframes: Vec::new(),
            effects: Vec::new(),
            audio_effects: Vec::new(),
        }
    }

    pub fn end_time(&self) -> TimeCode {
        self.start_time + self.duration
    }

    /// Returns `true` if this clip is active at the given sequence time
    /// (half-open `[start, start + duration)`).
    pub fn is_active_at(&self, time: TimeCode) -> bool {
        time.as_secs() >= self.start_time.as_secs() && time.as_secs() < self.end_time().as_secs()
    }

    /// Source time a binding must sit at for the given sequence time.
    pub fn source_time_at(&self, time: TimeCode) -> TimeCode {
        time - self.start_time + self.trim_start
    }

    /// Whether a source time falls inside the trim window `[trim_start, trim_end)`.
    pub fn is_within_trim(&self, source_time: TimeCode) -> bool {
        source_time.as_secs() >= self.trim_start.as_secs()
            && source_time.as_secs() < self.trim_end.as_secs()
    }
}

/// A user-placed marker on the sequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: String,
    pub time: TimeCode,
    pub label: String,
    /// Hex display color.
    pub color: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutline_common::MediaKind;

    fn make_asset(kind: MediaKind, secs: f64) -> AssetInfo {
        AssetInfo::new("asset_1", "beach.mp4", kind).with_duration(TimeCode::from_secs(secs))
    }

    #[test]
    fn default_track_layout() {
        let seq = Sequence::new("seq_1", "Sequence 1");
        let ids: Vec<&str> = seq.tracks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["v3", "v2", "v1", "a1", "a2"]);
        assert_eq!(seq.tracks[0].kind, TrackKind::Video);
        assert_eq!(seq.tracks[3].kind, TrackKind::Audio);
    }

    #[test]
    fn clip_is_active_at() {
        let asset = make_asset(MediaKind::Video, 4.0);
        let clip = Clip::from_asset(
            "c1",
            &asset,
            "v1",
            TimeCode::from_secs(1.0),
            TimeCode::from_secs(4.0),
        );

        assert!(!clip.is_active_at(TimeCode::from_secs(0.5)));
        assert!(clip.is_active_at(TimeCode::from_secs(1.0)));
        assert!(clip.is_active_at(TimeCode::from_secs(3.0)));
        assert!(!clip.is_active_at(TimeCode::from_secs(5.0)));
    }

    #[test]
    fn clip_source_time() {
        let asset = make_asset(MediaKind::Video, 10.0);
        let mut clip = Clip::from_asset(
            "c1",
            &asset,
            "v1",
            TimeCode::from_secs(10.0),
            TimeCode::from_secs(10.0),
        );
        clip.trim_start = TimeCode::from_secs(5.0);
        clip.trim_end = TimeCode::from_secs(15.0);

        // At sequence 12.0s, source should be 12.0 - 10.0 + 5.0 = 7.0
        let src = clip.source_time_at(TimeCode::from_secs(12.0));
        assert!((src.as_secs() - 7.0).abs() < 1e-9);
        assert!(clip.is_within_trim(src));
        assert!(!clip.is_within_trim(TimeCode::from_secs(15.0)));
    }

    #[test]
    fn track_kind_guard() {
        assert!(TrackKind::Audio.accepts(&ClipKind::Audio));
        assert!(!TrackKind::Audio.accepts(&ClipKind::Video));
        assert!(!TrackKind::Video.accepts(&ClipKind::Audio));
        assert!(TrackKind::Video.accepts(&ClipKind::Image));
        assert!(TrackKind::Video.accepts(&ClipKind::Adjustment));
        assert!(TrackKind::Video.accepts(&ClipKind::Compound {
            sequence_id: SequenceId::new("seq_2")
        }));
    }

    #[test]
    fn sequence_duration_is_latest_clip_end() {
        let mut seq = Sequence::new("seq_1", "Sequence 1");
        assert_eq!(seq.duration(), TimeCode::ZERO);

        let asset = make_asset(MediaKind::Video, 5.0);
        seq.clips.push(Clip::from_asset(
            "c1",
            &asset,
            "v1",
            TimeCode::from_secs(2.0),
            TimeCode::from_secs(5.0),
        ));
        seq.clips.push(Clip::from_asset(
            "c2",
            &asset,
            "v2",
            TimeCode::from_secs(4.0),
            TimeCode::from_secs(5.0),
        ));
        assert!((seq.duration().as_secs() - 9.0).abs() < 1e-9);
    }

    #[test]
    fn clips_overlapping_is_half_open() {
        let mut seq = Sequence::new("seq_1", "Sequence 1");
        let asset = make_asset(MediaKind::Video, 5.0);
        seq.clips.push(Clip::from_asset(
            "c1",
            &asset,
            "v1",
            TimeCode::from_secs(0.0),
            TimeCode::from_secs(5.0),
        ));

        // Adjacent range does not overlap
        let hits: Vec<_> = seq
            .clips_overlapping("v1", TimeCode::from_secs(5.0), TimeCode::from_secs(8.0))
            .collect();
        assert!(hits.is_empty());

        let hits: Vec<_> = seq
            .clips_overlapping("v1", TimeCode::from_secs(4.0), TimeCode::from_secs(8.0))
            .collect();
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn marker_labels_and_colors_cycle() {
        let mut seq = Sequence::new("seq_1", "Sequence 1");
        for i in 0..6 {
            seq.add_marker(format!("m{i}"), TimeCode::from_secs(i as f64));
        }
        assert_eq!(seq.markers[0].label, "Marker 1");
        assert_eq!(seq.markers[5].label, "Marker 6");
        assert_eq!(seq.markers[0].color, seq.markers[5].color);
        assert_ne!(seq.markers[0].color, seq.markers[1].color);
    }

    #[test]
    fn serialization_roundtrip() {
        let mut seq = Sequence::new("seq_1", "Sequence 1");
        let asset = make_asset(MediaKind::Audio, 8.0);
        seq.clips.push(Clip::from_asset(
            "c1",
            &asset,
            "a1",
            TimeCode::ZERO,
            TimeCode::from_secs(8.0),
        ));
        seq.add_marker("m1", TimeCode::from_secs(3.0));
        seq.in_point = Some(TimeCode::from_secs(1.0));

        let json = serde_json::to_string(&seq).expect("serialize");
        let restored: Sequence = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, seq);
    }

    #[test]
    fn effect_lists_survive_serialization() {
        let asset = make_asset(MediaKind::Video, 6.0);
        let mut clip = Clip::from_asset("c1", &asset, "v1", TimeCode::ZERO, TimeCode::from_secs(6.0));
        clip.effects.push(EffectInstance::new(
            "fx_1",
            "crop",
            serde_json::json!({ "top": 10, "bottom": 0, "left": 0, "right": 0 }),
        ));
        clip.audio_effects.push(EffectInstance::new(
            "fx_2",
            "eq",
            serde_json::json!({ "low": -2, "mid": 0, "high": 3 }),
        ));

        let json = serde_json::to_string(&clip).expect("serialize");
        let restored: Clip = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, clip);
        assert_eq!(restored.effects.len(), 1);
        assert_eq!(restored.audio_effects[0].name, "eq");
    }

    #[test]
    fn payload_without_effect_lists_still_loads() {
        let asset = make_asset(MediaKind::Video, 6.0);
        let clip = Clip::from_asset("c1", &asset, "v1", TimeCode::ZERO, TimeCode::from_secs(6.0));
        let mut value = serde_json::to_value(&clip).expect("serialize");
        let obj = value.as_object_mut().expect("clip serializes to an object");
        obj.remove("effects");
        obj.remove("audio_effects");

        let restored: Clip = serde_json::from_value(value).expect("deserialize");
        assert!(restored.effects.is_empty());
        assert!(restored.audio_effects.is_empty());
    }
}
