use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::direction::DEFAULT_DIRECTION_MARGIN;

/// Snap duration used when none is configured
pub const DEFAULT_SNAP_DURATION_MS: u64 = 1000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub snap: SnapConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log files)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Options for a snap controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapConfig {
    /// Identifier of the scroll container whose children are the sections
    #[serde(default = "default_container_id")]
    pub container_id: String,
    /// Hide the scrollbar when the controller is created
    #[serde(default)]
    pub hide_scrollbar: bool,
    /// Sections that scroll freely instead of snapping
    #[serde(default)]
    pub normal_scroll_element_ids: Vec<String>,
    /// Snap animation duration in milliseconds
    #[serde(default = "default_snap_duration")]
    pub snap_duration_ms: u64,
    /// Easing preset name; unknown names fall back to "easeInOutQuad"
    #[serde(default = "default_easing_preset")]
    pub easing_preset: String,
    /// Duration of the snap to the first section on registration (0 = jump)
    #[serde(default)]
    pub initial_snap_duration_ms: u64,
    /// Offset change below which scrolling has no direction
    #[serde(default = "default_direction_margin")]
    pub direction_margin: f64,
    /// How far the viewport must cross a normal section's edge before snapping
    #[serde(default = "default_boundary_epsilon")]
    pub boundary_epsilon: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            container_id: default_container_id(),
            hide_scrollbar: false,
            normal_scroll_element_ids: Vec::new(),
            snap_duration_ms: default_snap_duration(),
            easing_preset: default_easing_preset(),
            initial_snap_duration_ms: 0,
            direction_margin: default_direction_margin(),
            boundary_epsilon: default_boundary_epsilon(),
        }
    }
}

impl SnapConfig {
    /// Options for `container_id` with every other field at its default
    pub fn for_container(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            ..Default::default()
        }
    }

    /// Validate fields that cannot be defaulted
    pub fn validate(&self) -> crate::Result<()> {
        if self.container_id.trim().is_empty() {
            return Err(crate::Error::Config(
                "Please provide a valid container id".to_string(),
            ));
        }
        if !(0.0..5.0).contains(&self.direction_margin) {
            return Err(crate::Error::Config(format!(
                "direction_margin must be in [0, 5), got {}",
                self.direction_margin
            )));
        }
        if !self.boundary_epsilon.is_finite() || self.boundary_epsilon < 0.0 {
            return Err(crate::Error::Config(format!(
                "boundary_epsilon must be a finite, non-negative number, got {}",
                self.boundary_epsilon
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds while idle
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while a snap animation is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Viewport height in rows for the demo (0 = terminal height)
    #[serde(default)]
    pub viewport_rows: u16,
    /// Rows moved per arrow key or wheel notch; keep above the direction margin
    #[serde(default = "default_scroll_step")]
    pub scroll_step: f64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            viewport_rows: 0,
            scroll_step: default_scroll_step(),
        }
    }
}

impl UiConfig {
    /// Tick duration for animation frames
    pub fn animation_tick_duration(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis((1000 / self.animation_fps as u64).max(1))
        }
    }

    /// Tick duration while idle
    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

/// One section of the demo page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub id: String,
    /// Height in rows
    pub height: f64,
}

impl SectionSpec {
    pub fn new(id: impl Into<String>, height: f64) -> Self {
        Self {
            id: id.into(),
            height,
        }
    }
}

/// Page used by the interactive demo and `simulate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    #[serde(default = "default_demo_sections")]
    pub sections: Vec<SectionSpec>,
    /// Free-scrolling sections used when `[snap]` names none
    #[serde(default = "default_demo_normal_ids")]
    pub normal_scroll_element_ids: Vec<String>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            sections: default_demo_sections(),
            normal_scroll_element_ids: default_demo_normal_ids(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("snapscroll")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_container_id() -> String {
    "container".to_string()
}

fn default_snap_duration() -> u64 {
    DEFAULT_SNAP_DURATION_MS
}

fn default_easing_preset() -> String {
    "easeInOutQuad".to_string()
}

fn default_direction_margin() -> f64 {
    DEFAULT_DIRECTION_MARGIN
}

fn default_boundary_epsilon() -> f64 {
    2.0
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

fn default_scroll_step() -> f64 {
    4.0
}

fn default_demo_sections() -> Vec<SectionSpec> {
    // c and e are taller than most terminals so free scrolling has room
    vec![
        SectionSpec::new("a", 24.0),
        SectionSpec::new("b", 24.0),
        SectionSpec::new("c", 60.0),
        SectionSpec::new("d", 24.0),
        SectionSpec::new("e", 60.0),
    ]
}

fn default_demo_normal_ids() -> Vec<String> {
    vec!["c".to_string(), "e".to_string()]
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from the default file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, or defaults if it does not exist
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    ///
    /// A `[snap]` table must name its container; leaving out the whole
    /// table keeps the default container of the demo page.
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let table: toml::Table = content
            .parse()
            .map_err(|e: toml::de::Error| crate::Error::Config(e.to_string()))?;
        if let Some(snap) = table.get("snap") {
            if snap.get("container_id").is_none() {
                return Err(crate::Error::Config(
                    "Please provide a valid container id".to_string(),
                ));
            }
        }
        toml::Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| crate::Error::Config(e.to_string()))
    }

    /// Snap options for the demo page
    ///
    /// Falls back to the `[demo]` normal sections when `[snap]` lists none.
    pub fn demo_snap_config(&self) -> SnapConfig {
        let mut snap = self.snap.clone();
        if snap.normal_scroll_element_ids.is_empty() {
            snap.normal_scroll_element_ids = self.demo.normal_scroll_element_ids.clone();
        }
        snap
    }

    /// Render configuration as TOML text
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Save configuration to the default file
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/snapscroll/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("snapscroll")
            .join("config.toml")
    }

    /// Get the log file path
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("snapscroll.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}
