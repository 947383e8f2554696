//! Read-modify-write access to the overlay property map
//!
//! The overlay only supports whole-map replacement, so every `merge`/`remove` re-reads the
//! live map, applies the change and writes the full map back. Nothing is cached between
//! calls: system settings can mutate the map behind our back.
//!
//! Not safe to call from several threads at once. Two overlapping writes race at whole-map
//! granularity and one of them is lost; callers must serialize mutation.

use tracing::{debug, error, info, warn};

use crate::error::BridgeError;
use crate::layer::HudLayer;
use crate::platform::Capabilities;
use crate::types::{PropertyMap, PropertyValue};

pub struct PropertyStore<L: HudLayer> {
    layer: L,
    capabilities: Capabilities,
}

impl<L: HudLayer> PropertyStore<L> {
    pub fn new(layer: L, capabilities: Capabilities) -> Self {
        Self { layer, capabilities }
    }

    pub fn layer(&self) -> &L {
        &self.layer
    }

    pub fn layer_mut(&mut self) -> &mut L {
        &mut self.layer
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Current property snapshot
    ///
    /// Returns an empty map when the platform predates the property map or the surface is
    /// missing: an absent map is indistinguishable from "nothing configured yet". An
    /// unreadable map also reads as empty here, but mutations refuse to write over it.
    pub fn get_all(&self) -> PropertyMap {
        if !self.capabilities.hud_properties {
            debug!("Developer HUD properties unsupported, reporting empty map");
            return PropertyMap::new();
        }
        if !self.layer.is_attached() {
            return PropertyMap::new();
        }
        match self.layer.read_properties() {
            Ok(properties) => properties.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Overlay properties unreadable, reporting empty map");
                PropertyMap::new()
            }
        }
    }

    /// Single key projection of a fresh snapshot
    pub fn get(&self, key: &str) -> Option<PropertyValue> {
        self.get_all().remove(key)
    }

    /// Insert or overwrite the given keys; every other key is left untouched
    pub fn merge(&mut self, updates: PropertyMap) -> Result<(), BridgeError> {
        self.ensure_writable()?;

        let mut properties = self.read_for_update()?;
        for (key, value) in updates {
            properties.insert(key, value);
        }

        info!(properties = ?properties, "Updating overlay properties");
        self.write(properties)
    }

    /// Delete exactly the named keys; absent keys are ignored
    pub fn remove(&mut self, keys: &[&str]) -> Result<(), BridgeError> {
        self.ensure_writable()?;

        let mut properties = self.read_for_update()?;
        for key in keys {
            properties.remove(*key);
        }

        info!(properties = ?properties, removed = ?keys, "Removed overlay properties");
        self.write(properties)
    }

    fn ensure_writable(&self) -> Result<(), BridgeError> {
        if !self.capabilities.hud_properties {
            warn!("Developer HUD properties are unavailable on this platform, skipping write");
            return Err(BridgeError::PropertiesUnsupported);
        }
        if !self.layer.is_attached() {
            warn!("Overlay surface not resolved, skipping write");
            return Err(BridgeError::SurfaceUnavailable);
        }
        Ok(())
    }

    /// Live map for a read-modify-write; a map that cannot be read is never replaced
    fn read_for_update(&self) -> Result<PropertyMap, BridgeError> {
        self.layer
            .read_properties()
            .map(Option::unwrap_or_default)
            .map_err(|e| {
                error!(error = %e, "Cannot read overlay properties, refusing to overwrite them");
                BridgeError::WriteFailed(e.to_string())
            })
    }

    fn write(&mut self, properties: PropertyMap) -> Result<(), BridgeError> {
        self.layer.write_properties(properties).map_err(|e| {
            error!(error = %e, "Failed to write overlay properties");
            BridgeError::WriteFailed(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{FileLayer, MemoryLayer};
    use crate::types::SurfaceSize;
    use std::fs;

    fn map(entries: &[(&str, PropertyValue)]) -> PropertyMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn store_with(entries: &[(&str, PropertyValue)]) -> PropertyStore<MemoryLayer> {
        let layer = MemoryLayer::with_properties(SurfaceSize::new(390.0, 844.0), map(entries));
        PropertyStore::new(layer, Capabilities::full())
    }

    #[test]
    fn test_get_all_unconfigured_is_empty() {
        let store = PropertyStore::new(MemoryLayer::new(SurfaceSize::new(1.0, 1.0)), Capabilities::full());
        assert!(store.get_all().is_empty());
    }

    #[test]
    fn test_get_all_detached_is_empty() {
        let store = PropertyStore::new(MemoryLayer::detached(), Capabilities::full());
        assert!(store.get_all().is_empty());
    }

    #[test]
    fn test_get_all_unsupported_platform_is_empty() {
        let layer = MemoryLayer::with_properties(
            SurfaceSize::new(1.0, 1.0),
            map(&[("mode", "default".into())]),
        );
        let store = PropertyStore::new(layer, Capabilities::none());
        assert!(store.get_all().is_empty());
    }

    #[test]
    fn test_merge_preserves_untouched_keys() {
        let mut store = store_with(&[
            ("mode", "default".into()),
            ("MTL_HUD_SCALE", PropertyValue::Float(0.4)),
            ("vendor-private", PropertyValue::Int(3)),
        ]);

        store
            .merge(map(&[
                ("mode", "disabled".into()),
                ("MTL_HUD_OPACITY", PropertyValue::Float(0.5)),
            ]))
            .unwrap();

        let expected = map(&[
            ("mode", "disabled".into()),
            ("MTL_HUD_SCALE", PropertyValue::Float(0.4)),
            ("vendor-private", PropertyValue::Int(3)),
            ("MTL_HUD_OPACITY", PropertyValue::Float(0.5)),
        ]);
        assert_eq!(store.get_all(), expected);
    }

    #[test]
    fn test_merge_into_unconfigured_surface() {
        let mut store = PropertyStore::new(MemoryLayer::new(SurfaceSize::new(1.0, 1.0)), Capabilities::full());
        store.merge(map(&[("logging", "default".into())])).unwrap();
        assert_eq!(store.get("logging"), Some("default".into()));
    }

    #[test]
    fn test_merge_is_one_whole_map_write() {
        let mut store = store_with(&[]);
        store
            .merge(map(&[("a", PropertyValue::Int(1)), ("b", PropertyValue::Int(2))]))
            .unwrap();
        assert_eq!(store.layer().write_count(), 1);
    }

    #[test]
    fn test_remove_is_exact() {
        let mut store = store_with(&[
            ("positionX", PropertyValue::Float(10.0)),
            ("positionY", PropertyValue::Float(20.0)),
            ("mode", "default".into()),
        ]);

        store.remove(&["positionX", "positionY", "never-set"]).unwrap();

        assert_eq!(store.get_all(), map(&[("mode", "default".into())]));
    }

    #[test]
    fn test_remove_absent_keys_is_noop() {
        let mut store = store_with(&[("mode", "default".into())]);
        assert!(store.remove(&["logging"]).is_ok());
        assert_eq!(store.get_all(), map(&[("mode", "default".into())]));
    }

    #[test]
    fn test_writes_without_surface_are_skipped() {
        let mut store = PropertyStore::new(MemoryLayer::detached(), Capabilities::full());
        assert_eq!(
            store.merge(map(&[("mode", "default".into())])),
            Err(BridgeError::SurfaceUnavailable)
        );
        assert_eq!(store.remove(&["mode"]), Err(BridgeError::SurfaceUnavailable));
        assert_eq!(store.layer().write_count(), 0);
    }

    #[test]
    fn test_writes_on_unsupported_platform_are_skipped() {
        let mut store = PropertyStore::new(MemoryLayer::new(SurfaceSize::new(1.0, 1.0)), Capabilities::none());
        assert_eq!(
            store.merge(map(&[("mode", "default".into())])),
            Err(BridgeError::PropertiesUnsupported)
        );
        assert_eq!(store.layer().write_count(), 0);
    }

    #[test]
    fn test_reads_are_not_cached() {
        let mut store = store_with(&[("mode", "default".into())]);

        // Someone else replaces the map (system settings, launch environment)
        store
            .layer_mut()
            .write_properties(map(&[("mode", "main".into())]))
            .unwrap();

        assert_eq!(store.get("mode"), Some("main".into()));
    }

    #[test]
    fn test_merge_over_unreadable_snapshot_leaves_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("props.json");
        let original = b"{\"MTL_HUD_SCALE\": 0.4, \"mode\": ";
        fs::write(&path, original).unwrap();

        let layer = FileLayer::new(path.clone(), Some(SurfaceSize::new(1.0, 1.0)));
        let mut store = PropertyStore::new(layer, Capabilities::full());

        let result = store.merge(map(&[("logging", "default".into())]));
        assert!(matches!(result, Err(BridgeError::WriteFailed(_))));
        assert!(store.remove(&["mode"]).is_err());
        assert!(store.get_all().is_empty());
        assert_eq!(fs::read(&path).unwrap(), original);
    }

    #[test]
    fn test_merge_keeps_untyped_values_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("props.json");
        fs::write(&path, r#"{"MTL_HUD_DISABLE_MENU_BAR":"1","vendor":true}"#).unwrap();

        let layer = FileLayer::new(path.clone(), Some(SurfaceSize::new(1.0, 1.0)));
        let mut store = PropertyStore::new(layer, Capabilities::full());
        store.merge(map(&[("logging", "default".into())])).unwrap();

        let on_disk: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            on_disk,
            serde_json::json!({"MTL_HUD_DISABLE_MENU_BAR": "1", "logging": "default", "vendor": true})
        );
    }
}
