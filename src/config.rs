use crate::gui::menu::{
    DEFAULT_BUTTON_COUNT, DEFAULT_CLOSE_ICON_SIZE, DEFAULT_CLOSE_RADIUS, DEFAULT_PIE_ICON_SIZE,
    DEFAULT_PIE_RADIUS, DEFAULT_PIN_ICON_SIZE, DEFAULT_PIN_RADIUS, DEFAULT_STROKE_WIDTH,
    MAX_BUTTON_COUNT, MenuError,
};
use crate::icon::IconName;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MenuConfiguration {
    pub button_count: usize,
    pub base_angle: f64,
    pub pie_radius: f64,
    pub stroke_width: f64,
    pub close_button_radius: f64,
    pub pin_button_radius: f64,
    pub pie_icon_size: u32,
    pub close_icon_size: u32,
    pub pin_icon_size: u32,
    pub alternate_colors: bool,
    pub show_pin_button: bool,
    pub close_button_as_regular_button: bool,
}

impl Default for MenuConfiguration {
    fn default() -> Self {
        Self {
            button_count: DEFAULT_BUTTON_COUNT,
            base_angle: 0.0,
            pie_radius: DEFAULT_PIE_RADIUS,
            stroke_width: DEFAULT_STROKE_WIDTH,
            close_button_radius: DEFAULT_CLOSE_RADIUS,
            pin_button_radius: DEFAULT_PIN_RADIUS,
            pie_icon_size: DEFAULT_PIE_ICON_SIZE,
            close_icon_size: DEFAULT_CLOSE_ICON_SIZE,
            pin_icon_size: DEFAULT_PIN_ICON_SIZE,
            alternate_colors: false,
            show_pin_button: true,
            close_button_as_regular_button: false,
        }
    }
}

impl MenuConfiguration {
    pub fn validate(&self) -> Result<(), MenuError> {
        if self.button_count == 0 {
            return Err(MenuError::InvalidConfiguration(
                "button count must be at least 1".to_string(),
            ));
        }
        if self.button_count > MAX_BUTTON_COUNT {
            return Err(MenuError::InvalidConfiguration(format!(
                "button count must be at most {MAX_BUTTON_COUNT}, got {}",
                self.button_count
            )));
        }
        if !self.base_angle.is_finite() {
            return Err(MenuError::InvalidConfiguration(format!(
                "base angle must be finite, got {}",
                self.base_angle
            )));
        }

        [
            ("pie radius", self.pie_radius),
            ("stroke width", self.stroke_width),
            ("close button radius", self.close_button_radius),
            ("pin button radius", self.pin_button_radius),
        ]
        .into_iter()
        .try_for_each(|(name, value)| check_length(name, value))
    }

    pub fn angle_per_button(&self) -> f64 {
        360.0 / self.button_count as f64
    }

    /// Side length of the square the menu occupies.
    pub fn widget_size(&self) -> f64 {
        (self.pie_radius + self.stroke_width) * 2.0
    }
}

fn check_length(name: &str, value: f64) -> Result<(), MenuError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(MenuError::InvalidConfiguration(format!(
            "{name} must be a non-negative number, got {value}"
        )))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IconConfig {
    pub button: IconName,
    pub close: IconName,
    pub pin: IconName,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            button: IconName::new("image-x-generic"),
            close: IconName::new("window-close"),
            pin: IconName::new("view-pin"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DemoConfig {
    #[serde(default)]
    pub menu: MenuConfiguration,
    #[serde(default)]
    pub icons: IconConfig,
    pub theme: Option<PathBuf>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid menu settings: {0}")]
    Menu(#[from] MenuError),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "pie-menu", "pie-menu").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config(path: Option<&Path>) -> Result<DemoConfig, ConfigError> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => get_config_path()?,
    };

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("PIE_MENU").separator("__"))
        .build()?;

    let demo: DemoConfig = s.try_deserialize()?;
    demo.menu.validate()?;
    Ok(demo)
}

pub fn load_or_default(path: Option<&Path>) -> DemoConfig {
    match load_config(path) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            DemoConfig::default()
        }
    }
}
