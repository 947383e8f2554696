//! Value types shared across the property bridge

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::constants::{defaults, keys, tokens};
use crate::error::BridgeError;

/// A single scalar stored in the overlay's property map
///
/// Booleans are not a separate variant: flag properties are stored as the strings `"0"`/`"1"`.
/// Values set by someone else that fit none of the typed variants are carried as `Other` so a
/// read-modify-write hands them back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Int(i32),
    Float(f32),
    Str(String),
    Other(serde_json::Value),
}

impl PropertyValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Integer projection; numeric strings (launch-time environment toggles) are accepted
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            PropertyValue::Int(v) => Some(*v),
            PropertyValue::Str(s) => s.trim().parse().ok(),
            PropertyValue::Float(_) | PropertyValue::Other(_) => None,
        }
    }

    /// Float projection; integers widen and numeric strings are accepted
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            PropertyValue::Float(v) => Some(*v),
            PropertyValue::Int(v) => Some(*v as f32),
            PropertyValue::Str(s) => s.trim().parse().ok(),
            PropertyValue::Other(_) => None,
        }
    }

    pub fn flag(enabled: bool) -> Self {
        PropertyValue::Str(if enabled { tokens::FLAG_ON } else { tokens::FLAG_OFF }.to_string())
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Str(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Str(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Int(value)
    }
}

impl From<f32> for PropertyValue {
    fn from(value: f32) -> Self {
        PropertyValue::Float(value)
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Int(v) => write!(f, "{v}"),
            PropertyValue::Float(v) => write!(f, "{v}"),
            PropertyValue::Str(s) => write!(f, "{s}"),
            PropertyValue::Other(v) => write!(f, "{v}"),
        }
    }
}

/// Sparse overlay configuration snapshot (ordered so persisted snapshots are stable)
pub type PropertyMap = BTreeMap<String, PropertyValue>;

/// Size of the rendering surface in points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl SurfaceSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero-sized surfaces make the normalized space undefined
    pub fn is_degenerate(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}

/// Position relative to the surface, each axis in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedPosition {
    pub x: f32,
    pub y: f32,
}

impl NormalizedPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Position in surface points, as stored under `positionX`/`positionY`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AbsolutePosition {
    pub x: f32,
    pub y: f32,
}

impl AbsolutePosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Overlay anchor on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HudAlignment {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Centered,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl HudAlignment {
    pub const ALL: [HudAlignment; 9] = [
        HudAlignment::TopLeft,
        HudAlignment::TopCenter,
        HudAlignment::TopRight,
        HudAlignment::CenterLeft,
        HudAlignment::Centered,
        HudAlignment::CenterRight,
        HudAlignment::BottomLeft,
        HudAlignment::BottomCenter,
        HudAlignment::BottomRight,
    ];

    /// Anchor used by the overlay when no alignment is configured
    pub const DEFAULT: HudAlignment = HudAlignment::TopRight;

    pub fn token(self) -> &'static str {
        match self {
            HudAlignment::TopLeft => "topleft",
            HudAlignment::TopCenter => "topcenter",
            HudAlignment::TopRight => "topright",
            HudAlignment::CenterLeft => "centerleft",
            HudAlignment::Centered => "centered",
            HudAlignment::CenterRight => "centerright",
            HudAlignment::BottomLeft => "bottomleft",
            HudAlignment::BottomCenter => "bottomcenter",
            HudAlignment::BottomRight => "bottomright",
        }
    }

    /// Numeric code used by native callers (`0..=8`)
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl FromStr for HudAlignment {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HudAlignment::ALL
            .into_iter()
            .find(|a| a.token() == s)
            .ok_or_else(|| BridgeError::InvalidAlignment(s.to_string()))
    }
}

impl TryFrom<i32> for HudAlignment {
    type Error = BridgeError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| HudAlignment::ALL.get(idx).copied())
            .ok_or(BridgeError::InvalidAlignmentCode(code))
    }
}

impl fmt::Display for HudAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Set of metrics shown by the overlay, serialized as a comma-joined token list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MetricElements(u32);

impl MetricElements {
    pub const NONE: MetricElements = MetricElements(0);
    pub const DEVICE: MetricElements = MetricElements(1 << 0);
    pub const ROSETTA: MetricElements = MetricElements(1 << 1);
    pub const LAYER_SIZE: MetricElements = MetricElements(1 << 2);
    pub const LAYER_SCALE: MetricElements = MetricElements(1 << 3);
    pub const MEMORY: MetricElements = MetricElements(1 << 4);
    pub const FPS: MetricElements = MetricElements(1 << 5);
    pub const FRAME_INTERVAL: MetricElements = MetricElements(1 << 6);
    pub const GPU_TIME: MetricElements = MetricElements(1 << 7);
    pub const THERMAL: MetricElements = MetricElements(1 << 8);
    pub const FRAME_INTERVAL_GRAPH: MetricElements = MetricElements(1 << 9);
    pub const PRESENT_DELAY: MetricElements = MetricElements(1 << 10);
    pub const FRAME_INTERVAL_HISTOGRAM: MetricElements = MetricElements(1 << 11);
    pub const METAL_CPU: MetricElements = MetricElements(1 << 12);
    pub const GPU_TIMELINE: MetricElements = MetricElements(1 << 13);
    pub const SHADERS: MetricElements = MetricElements(1 << 14);
    pub const FRAME_NUMBER: MetricElements = MetricElements(1 << 15);
    pub const DISK: MetricElements = MetricElements(1 << 16);
    pub const FPS_GRAPH: MetricElements = MetricElements(1 << 17);
    pub const TOP_LABELED_COMMAND_BUFFERS: MetricElements = MetricElements(1 << 18);
    pub const TOP_LABELED_ENCODERS: MetricElements = MetricElements(1 << 19);
    pub const ALL: MetricElements = MetricElements((1 << 20) - 1);

    /// Token for each bit, in bit order
    const TOKENS: [(MetricElements, &'static str); 20] = [
        (Self::DEVICE, "device"),
        (Self::ROSETTA, "rosetta"),
        (Self::LAYER_SIZE, "layersize"),
        (Self::LAYER_SCALE, "layerscale"),
        (Self::MEMORY, "memory"),
        (Self::FPS, "fps"),
        (Self::FRAME_INTERVAL, "frameinterval"),
        (Self::GPU_TIME, "gputime"),
        (Self::THERMAL, "thermal"),
        (Self::FRAME_INTERVAL_GRAPH, "frameintervalgraph"),
        (Self::PRESENT_DELAY, "presentdelay"),
        (Self::FRAME_INTERVAL_HISTOGRAM, "frameintervalhistogram"),
        (Self::METAL_CPU, "metalcpu"),
        (Self::GPU_TIMELINE, "gputimeline"),
        (Self::SHADERS, "shaders"),
        (Self::FRAME_NUMBER, "framenumber"),
        (Self::DISK, "disk"),
        (Self::FPS_GRAPH, "fpsgraph"),
        (Self::TOP_LABELED_COMMAND_BUFFERS, "toplabeledcommandbuffers"),
        (Self::TOP_LABELED_ENCODERS, "toplabeledencoders"),
    ];

    /// Build from raw bits; bits above the 20 known flags are dropped
    pub fn from_bits(bits: u32) -> Self {
        MetricElements(bits & Self::ALL.0)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, other: MetricElements) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: MetricElements) {
        self.0 |= other.0;
    }

    /// Comma-joined tokens in bit order
    pub fn to_token_string(self) -> String {
        Self::TOKENS
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, token)| *token)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Parse a comma-separated token list; whitespace is trimmed and unknown tokens ignored
    pub fn parse_tokens(list: &str) -> Self {
        let mut elements = MetricElements::NONE;
        for token in list.split(',').map(str::trim) {
            if let Some((flag, _)) = Self::TOKENS.iter().find(|(_, t)| *t == token) {
                elements.insert(*flag);
            }
        }
        elements
    }
}

impl std::ops::BitOr for MetricElements {
    type Output = MetricElements;

    fn bitor(self, rhs: Self) -> Self::Output {
        MetricElements(self.0 | rhs.0)
    }
}

impl fmt::Display for MetricElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_token_string())
    }
}

/// Boolean properties stored as `"1"`/`"0"`; absence means disabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagProperty {
    ShowZeroMetrics,
    ShowMetricsRange,
    EncoderTimingEnabled,
    DisableMenuBar,
    InsightsEnabled,
    ShaderLoggingEnabled,
}

impl FlagProperty {
    pub const ALL: [FlagProperty; 6] = [
        FlagProperty::ShowZeroMetrics,
        FlagProperty::ShowMetricsRange,
        FlagProperty::EncoderTimingEnabled,
        FlagProperty::DisableMenuBar,
        FlagProperty::InsightsEnabled,
        FlagProperty::ShaderLoggingEnabled,
    ];

    pub fn key(self) -> &'static str {
        match self {
            FlagProperty::ShowZeroMetrics => keys::SHOW_ZERO_METRICS,
            FlagProperty::ShowMetricsRange => keys::SHOW_METRICS_RANGE,
            FlagProperty::EncoderTimingEnabled => keys::ENCODER_TIMING_ENABLED,
            FlagProperty::DisableMenuBar => keys::DISABLE_MENU_BAR,
            FlagProperty::InsightsEnabled => keys::INSIGHTS_ENABLED,
            FlagProperty::ShaderLoggingEnabled => keys::LOG_SHADER_ENABLED,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FlagProperty::ShowZeroMetrics => "show-zero-metrics",
            FlagProperty::ShowMetricsRange => "show-metrics-range",
            FlagProperty::EncoderTimingEnabled => "encoder-timing-enabled",
            FlagProperty::DisableMenuBar => "disable-menu-bar",
            FlagProperty::InsightsEnabled => "insights-enabled",
            FlagProperty::ShaderLoggingEnabled => "shader-logging-enabled",
        }
    }
}

impl FromStr for FlagProperty {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FlagProperty::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| BridgeError::UnknownProperty(s.to_string()))
    }
}

/// 32-bit integer properties with an overlay default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntProperty {
    MetricTimeout,
    EncoderGpuTimelineFrameCount,
    EncoderGpuTimelineSwapDelta,
    RusageUpdateInterval,
    InsightTimeout,
    InsightReportInterval,
}

impl IntProperty {
    pub const ALL: [IntProperty; 6] = [
        IntProperty::MetricTimeout,
        IntProperty::EncoderGpuTimelineFrameCount,
        IntProperty::EncoderGpuTimelineSwapDelta,
        IntProperty::RusageUpdateInterval,
        IntProperty::InsightTimeout,
        IntProperty::InsightReportInterval,
    ];

    pub fn key(self) -> &'static str {
        match self {
            IntProperty::MetricTimeout => keys::METRIC_TIMEOUT,
            IntProperty::EncoderGpuTimelineFrameCount => keys::ENCODER_GPU_TIMELINE_FRAME_COUNT,
            IntProperty::EncoderGpuTimelineSwapDelta => keys::ENCODER_GPU_TIMELINE_SWAP_DELTA,
            IntProperty::RusageUpdateInterval => keys::RUSAGE_UPDATE_INTERVAL,
            IntProperty::InsightTimeout => keys::INSIGHT_TIMEOUT,
            IntProperty::InsightReportInterval => keys::INSIGHT_REPORT_INTERVAL,
        }
    }

    pub fn default_value(self) -> i32 {
        match self {
            IntProperty::MetricTimeout => defaults::METRIC_TIMEOUT,
            IntProperty::EncoderGpuTimelineFrameCount => defaults::ENCODER_GPU_TIMELINE_FRAME_COUNT,
            IntProperty::EncoderGpuTimelineSwapDelta => defaults::ENCODER_GPU_TIMELINE_SWAP_DELTA,
            IntProperty::RusageUpdateInterval => defaults::RUSAGE_UPDATE_INTERVAL,
            IntProperty::InsightTimeout => defaults::INSIGHT_TIMEOUT,
            IntProperty::InsightReportInterval => defaults::INSIGHT_REPORT_INTERVAL,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            IntProperty::MetricTimeout => "metric-timeout",
            IntProperty::EncoderGpuTimelineFrameCount => "encoder-gpu-timeline-frame-count",
            IntProperty::EncoderGpuTimelineSwapDelta => "encoder-gpu-timeline-swap-delta",
            IntProperty::RusageUpdateInterval => "rusage-update-interval",
            IntProperty::InsightTimeout => "insight-timeout",
            IntProperty::InsightReportInterval => "insight-report-interval",
        }
    }
}

impl FromStr for IntProperty {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IntProperty::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| BridgeError::UnknownProperty(s.to_string()))
    }
}

/// 32-bit float properties with an overlay default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatProperty {
    Opacity,
    Scale,
}

impl FloatProperty {
    pub const ALL: [FloatProperty; 2] = [FloatProperty::Opacity, FloatProperty::Scale];

    pub fn key(self) -> &'static str {
        match self {
            FloatProperty::Opacity => keys::OPACITY,
            FloatProperty::Scale => keys::SCALE,
        }
    }

    pub fn default_value(self) -> f32 {
        match self {
            FloatProperty::Opacity => defaults::OPACITY,
            FloatProperty::Scale => defaults::SCALE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FloatProperty::Opacity => "opacity",
            FloatProperty::Scale => "scale",
        }
    }
}

impl FromStr for FloatProperty {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FloatProperty::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| BridgeError::UnknownProperty(s.to_string()))
    }
}

/// String path properties; absence reads as an empty path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathProperty {
    ReportPath,
    ConfigFilePath,
}

impl PathProperty {
    pub const ALL: [PathProperty; 2] = [PathProperty::ReportPath, PathProperty::ConfigFilePath];

    pub fn key(self) -> &'static str {
        match self {
            PathProperty::ReportPath => keys::REPORT_URL,
            PathProperty::ConfigFilePath => keys::CONFIG_FILE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PathProperty::ReportPath => "report-path",
            PathProperty::ConfigFilePath => "config-file-path",
        }
    }
}

impl FromStr for PathProperty {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PathProperty::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| BridgeError::UnknownProperty(s.to_string()))
    }
}
