#![forbid(unsafe_code)]

pub mod adapter;
pub mod bridge;
pub mod config;
pub mod constants;
pub mod coords;
pub mod error;
pub mod layer;
pub mod logs;
pub mod platform;
pub mod store;
pub mod types;

pub use adapter::{NativeHud, PerformanceHud, UnavailableHud, select};
pub use bridge::HudConfigBridge;
pub use error::{BridgeError, LogError, Status};
pub use layer::{FileLayer, HudLayer, MemoryLayer};
pub use logs::{FileLogSource, LogEntry, LogRetriever, LogSource, MemoryLogSource, ScanStrategy};
pub use platform::{Capabilities, OsVersion};
pub use store::PropertyStore;
pub use types::{
    AbsolutePosition, FlagProperty, FloatProperty, HudAlignment, IntProperty, MetricElements,
    NormalizedPosition, PathProperty, PropertyMap, PropertyValue, SurfaceSize,
};
