//! Typed getters and setters over the overlay property map
//!
//! Getters re-read the live map and project one key; a missing key is the overlay's
//! default, never an error. Every accessor first checks that the surface exists and the
//! platform exposes the property map at all: if not, getters report `Status::Error` (or
//! `Err(SurfaceUnavailable)`) and setters skip the write with a warning.

use tracing::{debug, info, warn};

use crate::constants::{keys, tokens};
use crate::coords;
use crate::error::{BridgeError, Status};
use crate::layer::HudLayer;
use crate::platform::Capabilities;
use crate::store::PropertyStore;
use crate::types::{
    AbsolutePosition, FlagProperty, FloatProperty, HudAlignment, IntProperty, MetricElements,
    NormalizedPosition, PathProperty, PropertyMap, PropertyValue,
};

pub struct HudConfigBridge<L: HudLayer> {
    store: PropertyStore<L>,
}

impl<L: HudLayer> HudConfigBridge<L> {
    pub fn new(layer: L, capabilities: Capabilities) -> Self {
        Self {
            store: PropertyStore::new(layer, capabilities),
        }
    }

    pub fn store(&self) -> &PropertyStore<L> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut PropertyStore<L> {
        &mut self.store
    }

    pub fn capabilities(&self) -> Capabilities {
        self.store.capabilities()
    }

    /// Whether reads and writes can reach the overlay right now
    pub fn is_available(&self) -> bool {
        self.store.capabilities().hud_properties && self.store.layer().is_attached()
    }

    fn check_available(&self, operation: &str) -> Result<(), BridgeError> {
        if !self.store.capabilities().hud_properties {
            warn!(operation = operation, "Developer HUD properties are unavailable on this platform");
            return Err(BridgeError::PropertiesUnsupported);
        }
        if !self.store.layer().is_attached() {
            warn!(operation = operation, "Overlay surface not resolved");
            return Err(BridgeError::SurfaceUnavailable);
        }
        Ok(())
    }

    /// Full property snapshot
    pub fn snapshot(&self) -> Result<PropertyMap, BridgeError> {
        self.check_available("snapshot")?;
        Ok(self.store.get_all())
    }

    // ----- visibility & position -----

    /// `Success` when `mode` is `default` or `main`
    pub fn get_visible(&self) -> Status {
        if self.check_available("get_visible").is_err() {
            return Status::Error;
        }
        let visible = self
            .store
            .get(keys::MODE)
            .and_then(|v| v.as_str().map(|mode| mode == tokens::DEFAULT || mode == tokens::MAIN))
            .unwrap_or(false);
        Status::from_flag(visible)
    }

    /// Overlay position in normalized coordinates; `(0, 0)` when unset or not supported
    pub fn get_position(&self) -> Result<NormalizedPosition, BridgeError> {
        self.check_available("get_position")?;
        if !self.store.capabilities().positioned_overlay {
            return Ok(NormalizedPosition::default());
        }

        let properties = self.store.get_all();
        let x = properties.get(keys::POSITION_X).and_then(PropertyValue::as_f32);
        let y = properties.get(keys::POSITION_Y).and_then(PropertyValue::as_f32);
        let (Some(x), Some(y)) = (x, y) else {
            return Ok(NormalizedPosition::default());
        };

        let size = coords::reference_size(self.store.layer())?;
        if size.is_degenerate() {
            warn!(width = size.width, height = size.height, "Zero-sized surface, cannot normalize position");
            return Ok(NormalizedPosition::default());
        }
        coords::to_normalized(self.store.layer(), AbsolutePosition::new(x, y))
    }

    /// Show or hide the overlay at its default anchor
    ///
    /// On positioned overlays a previously written position keeps applying even after the
    /// user-facing toggle changes, so both position keys are stripped before `mode` is set.
    pub fn set_visible(&mut self, visible: bool) -> Status {
        if self.check_available("set_visible").is_err() {
            return Status::Error;
        }
        info!(visible = visible, "Setting overlay visibility");

        if self.store.capabilities().positioned_overlay {
            if let Err(e) = self.store.remove(&[keys::POSITION_X, keys::POSITION_Y]) {
                return e.status();
            }
            return status_of(self.store.merge(single(keys::MODE, mode_token(visible))));
        }
        self.set_legacy_mode(visible)
    }

    /// Show or hide the overlay at a normalized position
    ///
    /// `mode` and both position keys go out in one write. Platforms without positioned
    /// overlays ignore the position.
    pub fn set_visible_with_position(&mut self, visible: bool, position: NormalizedPosition) -> Status {
        if self.check_available("set_visible_with_position").is_err() {
            return Status::Error;
        }

        if !self.store.capabilities().positioned_overlay {
            debug!("Positioned overlay unsupported, ignoring position");
            return self.set_legacy_mode(visible);
        }
        if !(position.x.is_finite() && position.y.is_finite()) {
            warn!(x = position.x, y = position.y, "Rejecting non-finite overlay position");
            return BridgeError::NonFiniteValue(keys::POSITION_X.to_string()).status();
        }

        let absolute = coords::to_absolute(self.store.layer(), position);
        info!(visible = visible, x = absolute.x, y = absolute.y, "Setting overlay visibility with position");

        let mut updates = single(keys::MODE, mode_token(visible));
        updates.insert(keys::POSITION_X.to_string(), PropertyValue::Float(absolute.x));
        updates.insert(keys::POSITION_Y.to_string(), PropertyValue::Float(absolute.y));
        status_of(self.store.merge(updates))
    }

    /// Older overlays treat key presence as "on"
    fn set_legacy_mode(&mut self, visible: bool) -> Status {
        if visible {
            status_of(self.store.merge(single(keys::MODE, tokens::DEFAULT)))
        } else {
            status_of(self.store.remove(&[keys::MODE]))
        }
    }

    // ----- logging -----

    /// `Success` when `logging` is `default`
    pub fn get_logging_enabled(&self) -> Status {
        if self.check_available("get_logging_enabled").is_err() {
            return Status::Error;
        }
        let enabled = self
            .store
            .get(keys::LOGGING)
            .is_some_and(|v| v.as_str() == Some(tokens::DEFAULT));
        Status::from_flag(enabled)
    }

    /// Positioned overlays take an explicit `disabled` token; older ones drop the key
    pub fn set_logging(&mut self, enabled: bool) -> Status {
        if self.check_available("set_logging").is_err() {
            return Status::Error;
        }
        info!(enabled = enabled, "Setting overlay logging");

        if self.store.capabilities().positioned_overlay {
            let token = if enabled { tokens::DEFAULT } else { tokens::DISABLED };
            return status_of(self.store.merge(single(keys::LOGGING, token)));
        }
        if enabled {
            status_of(self.store.merge(single(keys::LOGGING, tokens::DEFAULT)))
        } else {
            status_of(self.store.remove(&[keys::LOGGING]))
        }
    }

    // ----- typed dimensions -----

    /// `Success` when the flag is `"1"`; absent or anything else is `Failure`
    pub fn get_flag(&self, property: FlagProperty) -> Status {
        if self.check_available(property.name()).is_err() {
            return Status::Error;
        }
        let enabled = self
            .store
            .get(property.key())
            .is_some_and(|v| v.as_str() == Some(tokens::FLAG_ON));
        Status::from_flag(enabled)
    }

    pub fn set_flag(&mut self, property: FlagProperty, enabled: bool) -> Status {
        if self.check_available(property.name()).is_err() {
            return Status::Error;
        }
        status_of(self.store.merge(single(property.key(), PropertyValue::flag(enabled))))
    }

    pub fn get_int(&self, property: IntProperty) -> Result<i32, BridgeError> {
        self.check_available(property.name())?;
        Ok(self
            .store
            .get(property.key())
            .and_then(|v| v.as_i32())
            .unwrap_or_else(|| property.default_value()))
    }

    pub fn set_int(&mut self, property: IntProperty, value: i32) -> Status {
        if self.check_available(property.name()).is_err() {
            return Status::Error;
        }
        status_of(self.store.merge(single(property.key(), value)))
    }

    pub fn get_float(&self, property: FloatProperty) -> Result<f32, BridgeError> {
        self.check_available(property.name())?;
        Ok(self
            .store
            .get(property.key())
            .and_then(|v| v.as_f32())
            .unwrap_or_else(|| property.default_value()))
    }

    /// NaN and infinities have no JSON form and are rejected as `Failure`
    pub fn set_float(&mut self, property: FloatProperty, value: f32) -> Status {
        if self.check_available(property.name()).is_err() {
            return Status::Error;
        }
        if !value.is_finite() {
            warn!(property = property.name(), value = value, "Rejecting non-finite value");
            return BridgeError::NonFiniteValue(property.key().to_string()).status();
        }
        status_of(self.store.merge(single(property.key(), value)))
    }

    /// Configured path, empty when unset
    pub fn get_path(&self, property: PathProperty) -> Result<String, BridgeError> {
        self.check_available(property.name())?;
        Ok(self
            .store
            .get(property.key())
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default())
    }

    pub fn set_path(&mut self, property: PathProperty, path: &str) -> Status {
        if self.check_available(property.name()).is_err() {
            return Status::Error;
        }
        status_of(self.store.merge(single(property.key(), path)))
    }

    /// Configured anchor, `TopRight` when unset
    ///
    /// A stored token outside the known set is reported as `InvalidAlignment` instead of
    /// silently falling back.
    pub fn get_alignment(&self) -> Result<HudAlignment, BridgeError> {
        self.check_available("alignment")?;
        match self.store.get(keys::ALIGNMENT) {
            Some(PropertyValue::Str(token)) => token.parse(),
            _ => Ok(HudAlignment::DEFAULT),
        }
    }

    pub fn set_alignment(&mut self, alignment: HudAlignment) -> Status {
        if self.check_available("alignment").is_err() {
            return Status::Error;
        }
        status_of(self.store.merge(single(keys::ALIGNMENT, alignment.token())))
    }

    /// Numeric entry point; out-of-range codes are a `Failure` and nothing is written
    pub fn set_alignment_code(&mut self, code: i32) -> Status {
        if self.check_available("alignment").is_err() {
            return Status::Error;
        }
        match HudAlignment::try_from(code) {
            Ok(alignment) => self.set_alignment(alignment),
            Err(e) => {
                warn!(code = code, "Rejecting unknown alignment code");
                e.status()
            }
        }
    }

    /// Metrics shown by the overlay, empty when unset
    pub fn get_elements(&self) -> Result<MetricElements, BridgeError> {
        self.check_available("elements")?;
        Ok(self
            .store
            .get(keys::ELEMENTS)
            .and_then(|v| v.as_str().map(MetricElements::parse_tokens))
            .unwrap_or_default())
    }

    pub fn set_elements(&mut self, elements: MetricElements) -> Status {
        if self.check_available("elements").is_err() {
            return Status::Error;
        }
        status_of(self.store.merge(single(keys::ELEMENTS, elements.to_token_string())))
    }
}

fn mode_token(visible: bool) -> &'static str {
    if visible { tokens::DEFAULT } else { tokens::DISABLED }
}

fn single(key: &str, value: impl Into<PropertyValue>) -> PropertyMap {
    PropertyMap::from([(key.to_string(), value.into())])
}

fn status_of(result: Result<(), BridgeError>) -> Status {
    match result {
        Ok(()) => Status::Success,
        Err(e) => e.status(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{FileLayer, MemoryLayer};
    use crate::platform::OsVersion;
    use crate::types::SurfaceSize;

    const SIZE: SurfaceSize = SurfaceSize { width: 400.0, height: 800.0 };

    fn bridge() -> HudConfigBridge<MemoryLayer> {
        HudConfigBridge::new(MemoryLayer::new(SIZE), Capabilities::full())
    }

    fn legacy_bridge() -> HudConfigBridge<MemoryLayer> {
        HudConfigBridge::new(
            MemoryLayer::new(SIZE),
            Capabilities::for_version(OsVersion::new(17, 0)),
        )
    }

    fn detached_bridge() -> HudConfigBridge<MemoryLayer> {
        HudConfigBridge::new(MemoryLayer::detached(), Capabilities::full())
    }

    fn raw(bridge: &HudConfigBridge<MemoryLayer>) -> PropertyMap {
        bridge.store().layer().snapshot().cloned().unwrap_or_default()
    }

    #[test]
    fn test_visible_defaults_to_hidden() {
        assert_eq!(bridge().get_visible(), Status::Failure);
    }

    #[test]
    fn test_visible_accepts_main_mode() {
        let mut b = bridge();
        b.store_mut().merge(single(keys::MODE, tokens::MAIN)).unwrap();
        assert_eq!(b.get_visible(), Status::Success);
    }

    #[test]
    fn test_set_visible_writes_mode_tokens() {
        let mut b = bridge();
        assert_eq!(b.set_visible(true), Status::Success);
        assert_eq!(b.get_visible(), Status::Success);
        assert_eq!(b.set_visible(false), Status::Success);
        assert_eq!(raw(&b).get(keys::MODE), Some(&PropertyValue::from(tokens::DISABLED)));
        assert_eq!(b.get_visible(), Status::Failure);
    }

    #[test]
    fn test_set_visible_with_position_writes_once() {
        let mut b = bridge();
        let status = b.set_visible_with_position(true, NormalizedPosition::new(0.25, 0.5));
        assert_eq!(status, Status::Success);
        assert_eq!(b.store().layer().write_count(), 1);

        let props = raw(&b);
        assert_eq!(props.get(keys::MODE), Some(&PropertyValue::from(tokens::DEFAULT)));
        assert_eq!(props.get(keys::POSITION_X), Some(&PropertyValue::Float(100.0)));
        assert_eq!(props.get(keys::POSITION_Y), Some(&PropertyValue::Float(400.0)));
    }

    #[test]
    fn test_visibility_clears_position() {
        let mut b = bridge();
        b.set_visible_with_position(true, NormalizedPosition::new(0.3, 0.4));
        assert_eq!(b.set_visible(true), Status::Success);

        let props = raw(&b);
        assert!(!props.contains_key(keys::POSITION_X));
        assert!(!props.contains_key(keys::POSITION_Y));
        assert_eq!(b.get_position(), Ok(NormalizedPosition::default()));
    }

    #[test]
    fn test_position_round_trips_through_absolute() {
        let mut b = bridge();
        b.set_visible_with_position(true, NormalizedPosition::new(0.3, 0.4));
        let position = b.get_position().unwrap();
        assert!((position.x - 0.3).abs() < 1e-5);
        assert!((position.y - 0.4).abs() < 1e-5);
    }

    #[test]
    fn test_position_follows_surface_resize() {
        let mut b = bridge();
        b.set_visible_with_position(true, NormalizedPosition::new(0.5, 0.5));
        b.store_mut().layer_mut().resize(SurfaceSize::new(800.0, 800.0));
        let position = b.get_position().unwrap();
        assert!((position.x - 0.25).abs() < 1e-5);
        assert!((position.y - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_position_on_zero_sized_surface_is_origin() {
        let mut b = bridge();
        b.set_visible_with_position(true, NormalizedPosition::new(0.5, 0.5));
        b.store_mut().layer_mut().resize(SurfaceSize::new(0.0, 0.0));
        assert_eq!(b.get_position(), Ok(NormalizedPosition::default()));
    }

    #[test]
    fn test_legacy_visibility_uses_key_presence() {
        let mut b = legacy_bridge();
        assert_eq!(b.set_visible(true), Status::Success);
        assert_eq!(raw(&b).get(keys::MODE), Some(&PropertyValue::from(tokens::DEFAULT)));

        assert_eq!(b.set_visible(false), Status::Success);
        assert!(!raw(&b).contains_key(keys::MODE));
        assert_eq!(b.get_visible(), Status::Failure);
    }

    #[test]
    fn test_legacy_position_is_ignored() {
        let mut b = legacy_bridge();
        assert_eq!(
            b.set_visible_with_position(true, NormalizedPosition::new(0.3, 0.4)),
            Status::Success
        );
        let props = raw(&b);
        assert!(!props.contains_key(keys::POSITION_X));
        assert_eq!(b.get_position(), Ok(NormalizedPosition::default()));
    }

    #[test]
    fn test_logging_token_on_positioned_overlay() {
        let mut b = bridge();
        assert_eq!(b.get_logging_enabled(), Status::Failure);
        b.set_logging(true);
        assert_eq!(b.get_logging_enabled(), Status::Success);
        b.set_logging(false);
        assert_eq!(raw(&b).get(keys::LOGGING), Some(&PropertyValue::from(tokens::DISABLED)));
        assert_eq!(b.get_logging_enabled(), Status::Failure);
    }

    #[test]
    fn test_logging_key_presence_on_legacy_overlay() {
        let mut b = legacy_bridge();
        b.set_logging(true);
        assert_eq!(raw(&b).get(keys::LOGGING), Some(&PropertyValue::from(tokens::DEFAULT)));
        b.set_logging(false);
        assert!(!raw(&b).contains_key(keys::LOGGING));
        assert_eq!(b.get_logging_enabled(), Status::Failure);
    }

    #[test]
    fn test_unavailable_is_distinct_from_disabled() {
        let mut b = detached_bridge();
        assert_eq!(b.get_visible(), Status::Error);
        assert_eq!(b.get_logging_enabled(), Status::Error);
        assert_eq!(b.get_flag(FlagProperty::InsightsEnabled), Status::Error);
        assert_eq!(b.get_position(), Err(BridgeError::SurfaceUnavailable));
        assert_eq!(b.get_int(IntProperty::MetricTimeout), Err(BridgeError::SurfaceUnavailable));

        assert_eq!(b.set_visible(true), Status::Error);
        assert_eq!(b.set_visible_with_position(true, NormalizedPosition::new(0.1, 0.1)), Status::Error);
        assert_eq!(b.set_logging(true), Status::Error);
        assert_eq!(b.store().layer().write_count(), 0);
    }

    #[test]
    fn test_old_platform_reports_error() {
        let mut b = HudConfigBridge::new(
            MemoryLayer::new(SIZE),
            Capabilities::for_version(OsVersion::new(15, 4)),
        );
        assert_eq!(b.get_visible(), Status::Error);
        assert_eq!(b.set_visible(true), Status::Error);
        assert_eq!(b.get_alignment(), Err(BridgeError::PropertiesUnsupported));
    }

    #[test]
    fn test_flags_round_trip() {
        let mut b = bridge();
        for flag in FlagProperty::ALL {
            assert_eq!(b.get_flag(flag), Status::Failure);
            assert_eq!(b.set_flag(flag, true), Status::Success);
            assert_eq!(b.get_flag(flag), Status::Success);
            assert_eq!(raw(&b).get(flag.key()), Some(&PropertyValue::from("1")));
            b.set_flag(flag, false);
            assert_eq!(b.get_flag(flag), Status::Failure);
        }
    }

    #[test]
    fn test_int_defaults_and_overrides() {
        let mut b = bridge();
        assert_eq!(b.get_int(IntProperty::MetricTimeout), Ok(5));
        assert_eq!(b.get_int(IntProperty::EncoderGpuTimelineFrameCount), Ok(6));
        assert_eq!(b.get_int(IntProperty::EncoderGpuTimelineSwapDelta), Ok(1));
        assert_eq!(b.get_int(IntProperty::RusageUpdateInterval), Ok(3));
        assert_eq!(b.get_int(IntProperty::InsightTimeout), Ok(10));
        assert_eq!(b.get_int(IntProperty::InsightReportInterval), Ok(5));

        b.set_int(IntProperty::InsightTimeout, 30);
        assert_eq!(b.get_int(IntProperty::InsightTimeout), Ok(30));
        assert_eq!(raw(&b).get(keys::INSIGHT_TIMEOUT), Some(&PropertyValue::Int(30)));
    }

    #[test]
    fn test_int_accepts_launch_environment_strings() {
        let mut b = bridge();
        b.store_mut().merge(single(keys::METRIC_TIMEOUT, "12")).unwrap();
        assert_eq!(b.get_int(IntProperty::MetricTimeout), Ok(12));
    }

    #[test]
    fn test_float_defaults_and_overrides() {
        let mut b = bridge();
        assert_eq!(b.get_float(FloatProperty::Opacity), Ok(1.0));
        assert_eq!(b.get_float(FloatProperty::Scale), Ok(0.2));
        b.set_float(FloatProperty::Opacity, 0.6);
        assert_eq!(b.get_float(FloatProperty::Opacity), Ok(0.6));
    }

    #[test]
    fn test_paths_default_empty() {
        let mut b = bridge();
        assert_eq!(b.get_path(PathProperty::ReportPath), Ok(String::new()));
        b.set_path(PathProperty::ConfigFilePath, "/var/mobile/hud.conf");
        assert_eq!(
            b.get_path(PathProperty::ConfigFilePath),
            Ok("/var/mobile/hud.conf".to_string())
        );
        assert_eq!(b.get_path(PathProperty::ReportPath), Ok(String::new()));
    }

    #[test]
    fn test_alignment_default_and_invalid() {
        let mut b = bridge();
        assert_eq!(b.get_alignment(), Ok(HudAlignment::TopRight));

        b.set_alignment(HudAlignment::BottomLeft);
        assert_eq!(b.get_alignment(), Ok(HudAlignment::BottomLeft));

        b.store_mut().merge(single(keys::ALIGNMENT, "upperleft")).unwrap();
        assert_eq!(
            b.get_alignment(),
            Err(BridgeError::InvalidAlignment("upperleft".to_string()))
        );
    }

    #[test]
    fn test_alignment_code_out_of_range_writes_nothing() {
        let mut b = bridge();
        assert_eq!(b.set_alignment_code(42), Status::Failure);
        assert_eq!(b.store().layer().write_count(), 0);
        assert_eq!(b.set_alignment_code(4), Status::Success);
        assert_eq!(b.get_alignment(), Ok(HudAlignment::Centered));
    }

    #[test]
    fn test_elements_round_trip() {
        let mut b = bridge();
        assert_eq!(b.get_elements(), Ok(MetricElements::NONE));

        let elements = MetricElements::FPS | MetricElements::MEMORY | MetricElements::TOP_LABELED_ENCODERS;
        b.set_elements(elements);
        assert_eq!(
            raw(&b).get(keys::ELEMENTS),
            Some(&PropertyValue::from("memory,fps,toplabeledencoders"))
        );
        assert_eq!(b.get_elements(), Ok(elements));
    }

    #[test]
    fn test_setters_leave_unrelated_keys() {
        let mut b = bridge();
        b.set_flag(FlagProperty::DisableMenuBar, true);
        b.set_float(FloatProperty::Scale, 0.5);
        b.set_visible(true);
        b.set_logging(true);

        let props = raw(&b);
        assert_eq!(props.get(keys::DISABLE_MENU_BAR), Some(&PropertyValue::from("1")));
        assert_eq!(props.get(keys::SCALE), Some(&PropertyValue::Float(0.5)));
        assert_eq!(props.len(), 4);
    }

    #[test]
    fn test_non_finite_floats_are_rejected_without_writing() {
        let mut b = bridge();
        b.set_float(FloatProperty::Opacity, 0.5);
        let writes = b.store().layer().write_count();

        assert_eq!(b.set_float(FloatProperty::Opacity, f32::NAN), Status::Failure);
        assert_eq!(b.set_float(FloatProperty::Scale, f32::INFINITY), Status::Failure);
        assert_eq!(
            b.set_visible_with_position(true, NormalizedPosition::new(f32::NAN, 0.5)),
            Status::Failure
        );

        assert_eq!(b.store().layer().write_count(), writes);
        assert_eq!(b.get_float(FloatProperty::Opacity), Ok(0.5));
        assert!(!raw(&b).contains_key(keys::POSITION_X));
    }

    #[test]
    fn test_file_backed_setters_keep_earlier_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("props.json");
        let mut b = HudConfigBridge::new(FileLayer::new(path.clone(), Some(SIZE)), Capabilities::full());

        assert_eq!(b.set_flag(FlagProperty::DisableMenuBar, true), Status::Success);
        assert_eq!(b.set_int(IntProperty::MetricTimeout, 9), Status::Success);
        assert_eq!(b.set_float(FloatProperty::Opacity, f32::NAN), Status::Failure);
        assert_eq!(b.set_visible(true), Status::Success);

        assert_eq!(b.get_flag(FlagProperty::DisableMenuBar), Status::Success);
        assert_eq!(b.get_int(IntProperty::MetricTimeout), Ok(9));
        assert_eq!(b.get_visible(), Status::Success);
        assert!(!std::fs::read_to_string(&path).unwrap().contains("null"));
    }

    #[test]
    fn test_file_backed_setter_keeps_foreign_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("props.json");
        std::fs::write(&path, r#"{"MTL_HUD_DISABLE_MENU_BAR":"1","vendor":true}"#).unwrap();
        let mut b = HudConfigBridge::new(FileLayer::new(path.clone(), Some(SIZE)), Capabilities::full());

        assert_eq!(b.set_logging(true), Status::Success);

        assert_eq!(b.get_flag(FlagProperty::DisableMenuBar), Status::Success);
        let props = b.snapshot().unwrap();
        assert_eq!(props.get("vendor"), Some(&PropertyValue::Other(serde_json::Value::Bool(true))));
        assert_eq!(props.get(keys::LOGGING), Some(&PropertyValue::from(tokens::DEFAULT)));
    }

    #[test]
    fn test_file_backed_setter_fails_on_corrupt_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("props.json");
        std::fs::write(&path, "{ \"mode\": \"default\", ").unwrap();
        let mut b = HudConfigBridge::new(FileLayer::new(path.clone(), Some(SIZE)), Capabilities::full());

        assert_eq!(b.set_logging(true), Status::Failure);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ \"mode\": \"default\", ");
    }
}
