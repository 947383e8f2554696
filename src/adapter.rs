//! Platform selection between the real bridge and a logging stand-in
//!
//! Call sites talk to `dyn PerformanceHud` and never branch on platform; the variant is
//! chosen once in [`select`].

use std::path::Path;
use tracing::info;

use crate::bridge::HudConfigBridge;
use crate::error::{BridgeError, LogError, Status};
use crate::layer::HudLayer;
use crate::logs::{LogRetriever, LogSource, ScanStrategy};
use crate::platform::Capabilities;
use crate::types::{
    FlagProperty, FloatProperty, HudAlignment, IntProperty, MetricElements, NormalizedPosition,
    PathProperty, PropertyMap,
};

/// Everything callers can do with the overlay
pub trait PerformanceHud {
    /// Short label of the selected variant
    fn variant(&self) -> &'static str;

    fn snapshot(&self) -> Result<PropertyMap, BridgeError>;

    fn get_visible(&self) -> Status;
    fn get_position(&self) -> Result<NormalizedPosition, BridgeError>;
    fn set_visible(&mut self, visible: bool) -> Status;
    fn set_visible_with_position(&mut self, visible: bool, position: NormalizedPosition) -> Status;

    fn get_logging_enabled(&self) -> Status;
    fn set_logging(&mut self, enabled: bool) -> Status;

    fn get_flag(&self, property: FlagProperty) -> Status;
    fn set_flag(&mut self, property: FlagProperty, enabled: bool) -> Status;
    fn get_int(&self, property: IntProperty) -> Result<i32, BridgeError>;
    fn set_int(&mut self, property: IntProperty, value: i32) -> Status;
    fn get_float(&self, property: FloatProperty) -> Result<f32, BridgeError>;
    fn set_float(&mut self, property: FloatProperty, value: f32) -> Status;
    fn get_path(&self, property: PathProperty) -> Result<String, BridgeError>;
    fn set_path(&mut self, property: PathProperty, path: &str) -> Status;
    fn get_alignment(&self) -> Result<HudAlignment, BridgeError>;
    fn set_alignment(&mut self, alignment: HudAlignment) -> Status;
    /// Numeric anchor code (`0..=8`) as sent by native callers
    fn set_alignment_code(&mut self, code: i32) -> Status;
    fn get_elements(&self) -> Result<MetricElements, BridgeError>;
    fn set_elements(&mut self, elements: MetricElements) -> Status;

    /// Fetch recent overlay lines into `out_path`, returning the number written
    fn fetch_log_report(&self, past_seconds: i64, out_path: &Path) -> Result<usize, LogError>;

    /// `true` only when retrieval succeeded and at least one line was written
    fn fetch_logs(&self, past_seconds: i64, out_path: &Path) -> bool {
        matches!(self.fetch_log_report(past_seconds, out_path), Ok(count) if count > 0)
    }
}

/// Pick the implementation once for the lifetime of the caller
pub fn select<L, S>(
    capabilities: Capabilities,
    layer: L,
    source: S,
    strategy: ScanStrategy,
) -> Box<dyn PerformanceHud>
where
    L: HudLayer + 'static,
    S: LogSource + 'static,
{
    if capabilities == Capabilities::none() {
        info!("No overlay capabilities on this platform, using stand-in");
        return Box::new(UnavailableHud);
    }
    info!(capabilities = ?capabilities, "Using native overlay bridge");
    Box::new(NativeHud::new(layer, source, capabilities).with_strategy(strategy))
}

/// Bridge + log retriever over a real (or faked) overlay
pub struct NativeHud<L: HudLayer, S: LogSource> {
    bridge: HudConfigBridge<L>,
    logs: LogRetriever<S>,
}

impl<L: HudLayer, S: LogSource> NativeHud<L, S> {
    pub fn new(layer: L, source: S, capabilities: Capabilities) -> Self {
        Self {
            bridge: HudConfigBridge::new(layer, capabilities),
            logs: LogRetriever::new(source, capabilities),
        }
    }

    pub fn with_strategy(mut self, strategy: ScanStrategy) -> Self {
        self.logs = self.logs.with_strategy(strategy);
        self
    }
}

impl<L: HudLayer, S: LogSource> PerformanceHud for NativeHud<L, S> {
    fn variant(&self) -> &'static str {
        "native"
    }

    fn snapshot(&self) -> Result<PropertyMap, BridgeError> {
        self.bridge.snapshot()
    }

    fn get_visible(&self) -> Status {
        self.bridge.get_visible()
    }

    fn get_position(&self) -> Result<NormalizedPosition, BridgeError> {
        self.bridge.get_position()
    }

    fn set_visible(&mut self, visible: bool) -> Status {
        self.bridge.set_visible(visible)
    }

    fn set_visible_with_position(&mut self, visible: bool, position: NormalizedPosition) -> Status {
        self.bridge.set_visible_with_position(visible, position)
    }

    fn get_logging_enabled(&self) -> Status {
        self.bridge.get_logging_enabled()
    }

    fn set_logging(&mut self, enabled: bool) -> Status {
        self.bridge.set_logging(enabled)
    }

    fn get_flag(&self, property: FlagProperty) -> Status {
        self.bridge.get_flag(property)
    }

    fn set_flag(&mut self, property: FlagProperty, enabled: bool) -> Status {
        self.bridge.set_flag(property, enabled)
    }

    fn get_int(&self, property: IntProperty) -> Result<i32, BridgeError> {
        self.bridge.get_int(property)
    }

    fn set_int(&mut self, property: IntProperty, value: i32) -> Status {
        self.bridge.set_int(property, value)
    }

    fn get_float(&self, property: FloatProperty) -> Result<f32, BridgeError> {
        self.bridge.get_float(property)
    }

    fn set_float(&mut self, property: FloatProperty, value: f32) -> Status {
        self.bridge.set_float(property, value)
    }

    fn get_path(&self, property: PathProperty) -> Result<String, BridgeError> {
        self.bridge.get_path(property)
    }

    fn set_path(&mut self, property: PathProperty, path: &str) -> Status {
        self.bridge.set_path(property, path)
    }

    fn get_alignment(&self) -> Result<HudAlignment, BridgeError> {
        self.bridge.get_alignment()
    }

    fn set_alignment(&mut self, alignment: HudAlignment) -> Status {
        self.bridge.set_alignment(alignment)
    }

    fn set_alignment_code(&mut self, code: i32) -> Status {
        self.bridge.set_alignment_code(code)
    }

    fn get_elements(&self) -> Result<MetricElements, BridgeError> {
        self.bridge.get_elements()
    }

    fn set_elements(&mut self, elements: MetricElements) -> Status {
        self.bridge.set_elements(elements)
    }

    fn fetch_log_report(&self, past_seconds: i64, out_path: &Path) -> Result<usize, LogError> {
        self.logs.fetch_logs(past_seconds, out_path)
    }
}

/// Stand-in for platforms without the overlay: logs each call and reports `Error`
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableHud;

impl UnavailableHud {
    fn unsupported(&self, operation: &str) {
        info!(operation = operation, "Metal Performance HUD is not supported on this platform");
    }
}

impl PerformanceHud for UnavailableHud {
    fn variant(&self) -> &'static str {
        "unavailable"
    }

    fn snapshot(&self) -> Result<PropertyMap, BridgeError> {
        self.unsupported("snapshot");
        Err(BridgeError::PropertiesUnsupported)
    }

    fn get_visible(&self) -> Status {
        self.unsupported("get_visible");
        Status::Error
    }

    fn get_position(&self) -> Result<NormalizedPosition, BridgeError> {
        self.unsupported("get_position");
        Err(BridgeError::PropertiesUnsupported)
    }

    fn set_visible(&mut self, visible: bool) -> Status {
        info!(visible = visible, "set_visible ignored: Metal Performance HUD is not supported on this platform");
        Status::Error
    }

    fn set_visible_with_position(&mut self, visible: bool, position: NormalizedPosition) -> Status {
        info!(
            visible = visible,
            x = position.x,
            y = position.y,
            "set_visible_with_position ignored: Metal Performance HUD is not supported on this platform"
        );
        Status::Error
    }

    fn get_logging_enabled(&self) -> Status {
        self.unsupported("get_logging_enabled");
        Status::Error
    }

    fn set_logging(&mut self, enabled: bool) -> Status {
        info!(enabled = enabled, "set_logging ignored: Metal Performance HUD is not supported on this platform");
        Status::Error
    }

    fn get_flag(&self, property: FlagProperty) -> Status {
        self.unsupported(property.name());
        Status::Error
    }

    fn set_flag(&mut self, property: FlagProperty, _enabled: bool) -> Status {
        self.unsupported(property.name());
        Status::Error
    }

    fn get_int(&self, property: IntProperty) -> Result<i32, BridgeError> {
        self.unsupported(property.name());
        Err(BridgeError::PropertiesUnsupported)
    }

    fn set_int(&mut self, property: IntProperty, _value: i32) -> Status {
        self.unsupported(property.name());
        Status::Error
    }

    fn get_float(&self, property: FloatProperty) -> Result<f32, BridgeError> {
        self.unsupported(property.name());
        Err(BridgeError::PropertiesUnsupported)
    }

    fn set_float(&mut self, property: FloatProperty, _value: f32) -> Status {
        self.unsupported(property.name());
        Status::Error
    }

    fn get_path(&self, property: PathProperty) -> Result<String, BridgeError> {
        self.unsupported(property.name());
        Err(BridgeError::PropertiesUnsupported)
    }

    fn set_path(&mut self, property: PathProperty, _path: &str) -> Status {
        self.unsupported(property.name());
        Status::Error
    }

    fn get_alignment(&self) -> Result<HudAlignment, BridgeError> {
        self.unsupported("get_alignment");
        Err(BridgeError::PropertiesUnsupported)
    }

    fn set_alignment(&mut self, _alignment: HudAlignment) -> Status {
        self.unsupported("set_alignment");
        Status::Error
    }

    fn set_alignment_code(&mut self, _code: i32) -> Status {
        self.unsupported("set_alignment_code");
        Status::Error
    }

    fn get_elements(&self) -> Result<MetricElements, BridgeError> {
        self.unsupported("get_elements");
        Err(BridgeError::PropertiesUnsupported)
    }

    fn set_elements(&mut self, _elements: MetricElements) -> Status {
        self.unsupported("set_elements");
        Status::Error
    }

    fn fetch_log_report(&self, past_seconds: i64, out_path: &Path) -> Result<usize, LogError> {
        info!(
            past_seconds = past_seconds,
            path = %out_path.display(),
            "fetch_logs ignored: Metal Performance HUD is not supported on this platform"
        );
        Err(LogError::StoreUnavailable)
    }
}
