//! Native accessor seam for the overlay's property map
//!
//! The overlay owns a process-wide property map that can only be read or replaced as a
//! whole. `HudLayer` models that accessor so the bridge never touches global state directly:
//! the real surface, an in-memory fake, or a JSON snapshot on disk all plug in here.

use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::types::{PropertyMap, SurfaceSize};

/// Whole-map accessor for the overlay surface
pub trait HudLayer {
    /// Whether the rendering surface currently exists
    fn is_attached(&self) -> bool;

    /// Current property map, `Ok(None)` when the surface has never been configured
    ///
    /// An unreadable map is an error, never `None`: writing back over it would drop keys.
    fn read_properties(&self) -> io::Result<Option<PropertyMap>>;

    /// Replace the whole property map
    fn write_properties(&mut self, properties: PropertyMap) -> io::Result<()>;

    /// Surface size in points, `None` when the surface is missing
    fn bounds(&self) -> Option<SurfaceSize>;
}

/// In-process overlay stand-in
#[derive(Debug, Clone)]
pub struct MemoryLayer {
    attached: bool,
    properties: Option<PropertyMap>,
    size: SurfaceSize,
    writes: usize,
}

impl MemoryLayer {
    /// Attached surface with no properties configured yet
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            attached: true,
            properties: None,
            size,
            writes: 0,
        }
    }

    /// Surface that has not been created (or was torn down)
    pub fn detached() -> Self {
        Self {
            attached: false,
            properties: None,
            size: SurfaceSize::new(0.0, 0.0),
            writes: 0,
        }
    }

    /// Attached surface pre-seeded with properties (e.g. applied by launch environment)
    pub fn with_properties(size: SurfaceSize, properties: PropertyMap) -> Self {
        Self {
            properties: Some(properties),
            ..Self::new(size)
        }
    }

    pub fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    /// Raw snapshot, bypassing the attach check
    pub fn snapshot(&self) -> Option<&PropertyMap> {
        self.properties.as_ref()
    }

    /// Number of whole-map writes performed
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl HudLayer for MemoryLayer {
    fn is_attached(&self) -> bool {
        self.attached
    }

    fn read_properties(&self) -> io::Result<Option<PropertyMap>> {
        if !self.attached {
            return Ok(None);
        }
        Ok(self.properties.clone())
    }

    fn write_properties(&mut self, properties: PropertyMap) -> io::Result<()> {
        if !self.attached {
            return Err(io::Error::new(io::ErrorKind::NotConnected, "surface detached"));
        }
        self.properties = Some(properties);
        self.writes += 1;
        Ok(())
    }

    fn bounds(&self) -> Option<SurfaceSize> {
        self.attached.then_some(self.size)
    }
}

/// Property map persisted as a JSON snapshot between process runs
#[derive(Debug, Clone)]
pub struct FileLayer {
    path: PathBuf,
    size: Option<SurfaceSize>,
}

impl FileLayer {
    /// `size == None` models a missing surface
    pub fn new(path: PathBuf, size: Option<SurfaceSize>) -> Self {
        Self { path, size }
    }
}

impl HudLayer for FileLayer {
    fn is_attached(&self) -> bool {
        self.size.is_some()
    }

    fn read_properties(&self) -> io::Result<Option<PropertyMap>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No property snapshot yet");
                return Ok(None);
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read property snapshot");
                return Err(e);
            }
        };

        serde_json::from_str::<PropertyMap>(&contents).map(Some).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "Malformed property snapshot");
            io::Error::new(io::ErrorKind::InvalidData, e)
        })
    }

    fn write_properties(&mut self, properties: PropertyMap) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&properties).map_err(io::Error::other)?;
        fs::write(&self.path, json)
    }

    fn bounds(&self) -> Option<SurfaceSize> {
        self.size
    }
}
