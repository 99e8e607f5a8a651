//! Configuration type definitions.

use super::enums::ClosePolicy;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Drawing surface settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Backend name (currently only "headless")
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Surface title, used in log output
    #[serde(default = "default_title")]
    pub title: String,

    /// Background color painted when the surface is cleared (any CSS color)
    #[serde(default = "default_background")]
    pub background: String,

    /// Initial aspect ratio width component
    #[serde(default = "default_aspect")]
    pub aspect_width: u32,

    /// Initial aspect ratio height component
    #[serde(default = "default_aspect")]
    pub aspect_height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            title: default_title(),
            background: default_background(),
            aspect_width: default_aspect(),
            aspect_height: default_aspect(),
        }
    }
}

/// Redraw and throttle timing.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TimingConfig {
    /// Target redraw rate of the scene (valid range: 1 - 240)
    #[serde(default = "default_frames_per_second")]
    pub frames_per_second: u32,

    /// Interval at which a suspended drawing call is resumed, in milliseconds
    /// (valid range: 0 - 1000). 0 disables the throttle.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            frames_per_second: default_frames_per_second(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

/// Lifecycle settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct LifecycleConfig {
    /// Behaviour once the surface is closed: "exit" or "error"
    #[serde(default)]
    pub on_close: ClosePolicy,
}

/// Headless output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct OutputConfig {
    /// Write the last rendered frame to this PNG file when the backend is disposed
    #[serde(default)]
    pub frame_path: Option<PathBuf>,

    /// Report the surface as closed after this many frames
    #[serde(default)]
    pub max_frames: Option<u64>,
}

/// Image fetching settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ImagesConfig {
    /// HTTP timeout for web sprites, in seconds (valid range: 1 - 120)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent when fetching web sprites
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Base URL that playing card images are fetched from
    #[serde(default = "default_card_base_url")]
    pub card_base_url: String,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            card_base_url: default_card_base_url(),
        }
    }
}

fn default_backend() -> String {
    "headless".to_string()
}

fn default_title() -> String {
    "Easel".to_string()
}

fn default_background() -> String {
    "white".to_string()
}

fn default_aspect() -> u32 {
    1
}

fn default_frames_per_second() -> u32 {
    60
}

fn default_tick_interval_ms() -> u64 {
    1
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("easel/{}", env!("CARGO_PKG_VERSION"))
}

fn default_card_base_url() -> String {
    "https://www.nooblab.com/NoobLab/images/cards/".to_string()
}
