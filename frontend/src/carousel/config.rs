use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("autoplay interval must be greater than zero")]
    ZeroInterval,
    #[error("{field} must be a positive, finite number (got {value})")]
    BadExtent { field: &'static str, value: f64 },
    #[error("drag threshold {threshold} must be non-negative and below the drag bound {max_drag}")]
    UnreachableThreshold { threshold: f64, max_drag: f64 },
    #[error("invalid carousel config json: {0}")]
    Json(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Json(err.to_string())
    }
}

/// Everything that differs between one carousel usage and another.
///
/// Extents are in content units, not layout pixels. The renderer decides
/// what a unit is (the Yew component maps one unit to one CSS pixel).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub interval_ms: u32,
    pub cooldown_ms: u32,
    pub drag_threshold: f64,
    pub max_drag: f64,
    pub item_extent: f64,
    pub visible_extent: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            interval_ms: 3000,
            cooldown_ms: 5000,
            drag_threshold: 80.0,
            max_drag: 200.0,
            item_extent: 320.0,
            visible_extent: 960.0,
        }
    }
}

impl CarouselConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: CarouselConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        for (field, value) in [
            ("item_extent", self.item_extent),
            ("visible_extent", self.visible_extent),
            ("max_drag", self.max_drag),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::BadExtent { field, value });
            }
        }
        if !(self.drag_threshold >= 0.0 && self.drag_threshold < self.max_drag) {
            return Err(ConfigError::UnreachableThreshold {
                threshold: self.drag_threshold,
                max_drag: self.max_drag,
            });
        }
        Ok(())
    }

    /// Returns `self` if it validates, otherwise the defaults.
    pub fn or_default(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(err) => {
                log::warn!("Falling back to default carousel config: {}", err);
                Self::default()
            }
        }
    }
}

/// The places the site shows a carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarouselPreset {
    Values,
    Technology,
    Testimonials,
    Industries,
    Services,
    Portfolio,
}

impl CarouselPreset {
    #[cfg(test)]
    pub const ALL: [CarouselPreset; 6] = [
        CarouselPreset::Values,
        CarouselPreset::Technology,
        CarouselPreset::Testimonials,
        CarouselPreset::Industries,
        CarouselPreset::Services,
        CarouselPreset::Portfolio,
    ];

    pub fn config(self) -> CarouselConfig {
        let base = CarouselConfig::default();
        match self {
            CarouselPreset::Values => CarouselConfig {
                item_extent: 300.0,
                visible_extent: 900.0,
                ..base
            },
            CarouselPreset::Technology => CarouselConfig {
                item_extent: 180.0,
                visible_extent: 900.0,
                ..base
            },
            CarouselPreset::Testimonials => CarouselConfig {
                interval_ms: 4000,
                item_extent: 600.0,
                visible_extent: 600.0,
                ..base
            },
            CarouselPreset::Industries => CarouselConfig {
                item_extent: 280.0,
                visible_extent: 840.0,
                ..base
            },
            CarouselPreset::Services => base,
            // card stack: one card in front, the rest fanned behind it
            CarouselPreset::Portfolio => CarouselConfig {
                interval_ms: 4000,
                item_extent: 420.0,
                visible_extent: 420.0,
                ..base
            },
        }
    }
}
