//! Normalized <-> absolute coordinate conversion
//!
//! The reference size is queried from the surface on every call; the surface may resize
//! between calls so nothing is cached.

use crate::error::BridgeError;
use crate::layer::HudLayer;
use crate::types::{AbsolutePosition, NormalizedPosition, SurfaceSize};

/// Current reference size of the surface
pub fn reference_size<L: HudLayer>(layer: &L) -> Result<SurfaceSize, BridgeError> {
    layer.bounds().ok_or(BridgeError::SurfaceUnavailable)
}

/// Scale a normalized position by the current surface size
///
/// # Panics
///
/// Panics when the surface cannot be resolved. A missing reference size means every
/// coordinate written afterwards would be wrong, so the bridge treats it as fatal.
pub fn to_absolute<L: HudLayer>(layer: &L, position: NormalizedPosition) -> AbsolutePosition {
    match try_to_absolute(layer, position) {
        Ok(absolute) => absolute,
        Err(e) => panic!("cannot convert HUD position without a reference surface: {e}"),
    }
}

/// Fallible variant of [`to_absolute`]
pub fn try_to_absolute<L: HudLayer>(
    layer: &L,
    position: NormalizedPosition,
) -> Result<AbsolutePosition, BridgeError> {
    let size = reference_size(layer)?;
    Ok(scale(position, size))
}

/// Inverse of [`to_absolute`]; the result is meaningless for a zero-sized surface
pub fn to_normalized<L: HudLayer>(
    layer: &L,
    position: AbsolutePosition,
) -> Result<NormalizedPosition, BridgeError> {
    let size = reference_size(layer)?;
    Ok(unscale(position, size))
}

pub fn scale(position: NormalizedPosition, size: SurfaceSize) -> AbsolutePosition {
    AbsolutePosition::new(position.x * size.width, position.y * size.height)
}

pub fn unscale(position: AbsolutePosition, size: SurfaceSize) -> NormalizedPosition {
    NormalizedPosition::new(position.x / size.width, position.y / size.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::MemoryLayer;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_to_absolute_scales_each_axis() {
        let layer = MemoryLayer::new(SurfaceSize::new(400.0, 800.0));
        let abs = to_absolute(&layer, NormalizedPosition::new(0.25, 0.5));
        assert_eq!(abs, AbsolutePosition::new(100.0, 400.0));
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        let sizes = [
            SurfaceSize::new(1.0, 1.0),
            SurfaceSize::new(390.0, 844.0),
            SurfaceSize::new(2732.0, 2048.0),
            SurfaceSize::new(0.5, 3.0),
        ];
        for size in sizes {
            let layer = MemoryLayer::new(size);
            for i in 0..=10 {
                for j in 0..=10 {
                    let p = NormalizedPosition::new(i as f32 / 10.0, j as f32 / 10.0);
                    let back = to_normalized(&layer, to_absolute(&layer, p)).unwrap();
                    assert!((back.x - p.x).abs() < EPSILON, "x {p:?} -> {back:?} at {size:?}");
                    assert!((back.y - p.y).abs() < EPSILON, "y {p:?} -> {back:?} at {size:?}");
                }
            }
        }
    }

    #[test]
    fn test_reference_size_is_not_cached() {
        let mut layer = MemoryLayer::new(SurfaceSize::new(100.0, 100.0));
        let p = NormalizedPosition::new(0.5, 0.5);
        assert_eq!(to_absolute(&layer, p), AbsolutePosition::new(50.0, 50.0));

        layer.resize(SurfaceSize::new(200.0, 300.0));
        assert_eq!(to_absolute(&layer, p), AbsolutePosition::new(100.0, 150.0));
    }

    #[test]
    fn test_missing_surface_is_an_error_for_fallible_calls() {
        let layer = MemoryLayer::detached();
        assert_eq!(
            try_to_absolute(&layer, NormalizedPosition::new(0.1, 0.1)),
            Err(BridgeError::SurfaceUnavailable)
        );
        assert_eq!(
            to_normalized(&layer, AbsolutePosition::new(1.0, 1.0)),
            Err(BridgeError::SurfaceUnavailable)
        );
    }

    #[test]
    #[should_panic(expected = "reference surface")]
    fn test_to_absolute_without_surface_is_fatal() {
        let layer = MemoryLayer::detached();
        to_absolute(&layer, NormalizedPosition::new(0.3, 0.4));
    }
}
