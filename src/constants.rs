//! Property keys, tokens, thresholds and file names used across the crate

/// Property keys understood by the overlay's property map
pub mod keys {
    /// Overlay mode token (`default`, `main`, `disabled`)
    pub const MODE: &str = "mode";

    /// Absolute X position in surface points (positioned overlays only)
    pub const POSITION_X: &str = "positionX";

    /// Absolute Y position in surface points (positioned overlays only)
    pub const POSITION_Y: &str = "positionY";

    /// Logging token (`default`, `disabled`)
    pub const LOGGING: &str = "logging";

    pub const OPACITY: &str = "MTL_HUD_OPACITY";
    pub const SCALE: &str = "MTL_HUD_SCALE";
    pub const ALIGNMENT: &str = "MTL_HUD_ALIGNMENT";
    pub const ELEMENTS: &str = "MTL_HUD_ELEMENTS";
    pub const SHOW_ZERO_METRICS: &str = "MTL_HUD_SHOW_ZERO_METRICS";
    pub const SHOW_METRICS_RANGE: &str = "MTL_HUD_SHOW_METRICS_RANGE";
    pub const METRIC_TIMEOUT: &str = "MTL_HUD_METRIC_TIMEOUT";
    pub const ENCODER_TIMING_ENABLED: &str = "MTL_HUD_ENCODER_TIMING_ENABLED";
    pub const ENCODER_GPU_TIMELINE_FRAME_COUNT: &str = "MTL_HUD_ENCODER_GPU_TIMELINE_FRAME_COUNT";
    pub const ENCODER_GPU_TIMELINE_SWAP_DELTA: &str = "MTL_HUD_ENCODER_GPU_TIMELINE_SWAP_DELTA";
    pub const RUSAGE_UPDATE_INTERVAL: &str = "MTL_HUD_RUSAGE_UPDATE_INTERVAL";
    pub const DISABLE_MENU_BAR: &str = "MTL_HUD_DISABLE_MENU_BAR";
    pub const INSIGHTS_ENABLED: &str = "MTL_HUD_INSIGHTS_ENABLED";
    pub const INSIGHT_TIMEOUT: &str = "MTL_HUD_INSIGHT_TIMEOUT";
    pub const INSIGHT_REPORT_INTERVAL: &str = "MTL_HUD_INSIGHT_REPORT_INTERVAL";
    pub const REPORT_URL: &str = "MTL_HUD_REPORT_URL";
    pub const CONFIG_FILE: &str = "MTL_HUD_CONFIG_FILE";
    pub const LOG_SHADER_ENABLED: &str = "MTL_HUD_LOG_SHADER_ENABLED";
}

/// Values written under `mode` and `logging`
pub mod tokens {
    /// Overlay shown / logging on
    pub const DEFAULT: &str = "default";

    /// Alternate "shown" mode some system settings write
    pub const MAIN: &str = "main";

    /// Explicit off value (positioned overlays only; older levels remove the key instead)
    pub const DISABLED: &str = "disabled";

    /// Boolean-as-string encoding used by flag properties
    pub const FLAG_ON: &str = "1";
    pub const FLAG_OFF: &str = "0";
}

/// Defaults reported when a valued property is absent
pub mod defaults {
    pub const OPACITY: f32 = 1.0;
    pub const SCALE: f32 = 0.2;
    pub const METRIC_TIMEOUT: i32 = 5;
    pub const ENCODER_GPU_TIMELINE_FRAME_COUNT: i32 = 6;
    pub const ENCODER_GPU_TIMELINE_SWAP_DELTA: i32 = 1;
    pub const RUSAGE_UPDATE_INTERVAL: i32 = 3;
    pub const INSIGHT_TIMEOUT: i32 = 10;
    pub const INSIGHT_REPORT_INTERVAL: i32 = 5;
}

/// OS major versions that unlock overlay capabilities
pub mod capability {
    /// Process-scoped log store becomes queryable
    pub const LOG_STORE_MAJOR: u32 = 15;

    /// Developer HUD property map becomes readable/writable
    pub const HUD_PROPERTIES_MAJOR: u32 = 16;

    /// Position keys are honoured and `disabled` tokens replace key removal
    pub const POSITIONED_OVERLAY_MAJOR: u32 = 26;
}

/// Overlay log stream constants
pub mod log {
    /// Every overlay metrics line starts with this (case-sensitive)
    pub const MESSAGE_PREFIX: &str = "metal-HUD:";

    /// Separator between the frame number and the rest of a metrics line
    pub const FRAME_KEY_TERMINATOR: char = ',';

    /// Artifact file name prefix
    pub const ARTIFACT_PREFIX: &str = "FetchLogging";

    /// Timestamp format embedded in artifact file names
    pub const ARTIFACT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
}

/// Config file locations
pub mod config {
    /// Directory under the user config/data dirs
    pub const APP_DIR: &str = "metal-perfkit";

    /// Settings file name
    pub const FILENAME: &str = "config.json";

    /// Property snapshot file name used by the file-backed layer
    pub const PROPERTIES_FILENAME: &str = "hud-properties.json";

    /// Default overlay log file read by the CLI
    pub const LOG_FILENAME: &str = "hud.log";
}
