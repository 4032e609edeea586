use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from config.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub drag: DragConfig,
    #[serde(default)]
    pub autoscroll: AutoScrollConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragConfig {
    /// Vertical travel (px) a touch must exceed before it becomes a drag.
    /// Smaller values favour drag responsiveness, larger ones favour scrolling.
    #[serde(default = "default_threshold")]
    pub threshold: f32,
    /// Classify mouse input with the touch threshold (for terminals that
    /// translate touch screens into mouse events)
    #[serde(default)]
    pub mouse_as_touch: bool,
}

impl Default for DragConfig {
    fn default() -> Self {
        DragConfig {
            threshold: default_threshold(),
            mouse_as_touch: false,
        }
    }
}

fn default_threshold() -> f32 {
    15.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoScrollConfig {
    /// Height (px) of the band along the top and bottom viewport edges
    #[serde(default = "default_edge_band")]
    pub edge_band: f32,
    /// Speed (px per tick) at the inner border of the band
    #[serde(default = "default_min_speed")]
    pub min_speed: f32,
    /// Speed (px per tick) at the edge itself
    #[serde(default = "default_max_speed")]
    pub max_speed: f32,
    /// Easing exponent applied to edge closeness; 1.0 is linear
    #[serde(default = "default_exponent")]
    pub exponent: f32,
    /// Tick interval in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

impl Default for AutoScrollConfig {
    fn default() -> Self {
        AutoScrollConfig {
            edge_band: default_edge_band(),
            min_speed: default_min_speed(),
            max_speed: default_max_speed(),
            exponent: default_exponent(),
            tick_ms: default_tick_ms(),
        }
    }
}

fn default_edge_band() -> f32 {
    60.0
}

fn default_min_speed() -> f32 {
    1.0
}

fn default_max_speed() -> f32 {
    18.0
}

fn default_exponent() -> f32 {
    2.0
}

fn default_tick_ms() -> u64 {
    16
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Write the notes key even when the list is empty. Off by default: an
    /// empty list never overwrites a previously stored one.
    #[serde(default)]
    pub persist_empty: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Pixel height of one terminal row, used to map cells to pointer space
    #[serde(default = "default_cell_height")]
    pub cell_height: f32,
    /// Pixel width of one terminal column
    #[serde(default = "default_cell_width")]
    pub cell_width: f32,
    /// Theme color overrides, e.g. `highlight = "#FB4196"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            cell_height: default_cell_height(),
            cell_width: default_cell_width(),
            colors: HashMap::new(),
        }
    }
}

fn default_cell_height() -> f32 {
    16.0
}

fn default_cell_width() -> f32 {
    8.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
