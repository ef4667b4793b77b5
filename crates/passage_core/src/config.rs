//! Router configuration
//!
//! All transition constants live here so hosts can tune motion without
//! touching the engine. Every field has a default, so a config file only
//! needs to name what it overrides:
//!
//! ```toml
//! [transition]
//! buried_fade_ms = 180
//!
//! [gesture]
//! release_stiffness = 600.0
//! ```

use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Top-level router configuration
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    pub transition: TransitionConfig,
    pub gesture: GestureConfig,
}

/// Targets and motion parameters of screen transitions
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Opacity spring stiffness with no gesture in progress
    pub opacity_base_stiffness: f32,
    /// Offset spring stiffness with no gesture in progress
    pub offset_base_stiffness: f32,
    /// Extra stiffness per unit of gesture progress (speeds up release)
    pub progress_stiffness_scale: f32,
    /// Stiffness while a back gesture is being dragged
    pub drag_stiffness: f32,
    /// Stiffness of the back-transition scalar when not dragging
    pub back_transition_stiffness: f32,
    /// Damping ratio shared by every transition spring (1.0 = critical)
    pub damping_ratio: f32,
    /// Duration of the fade applied to screens buried under the previous one
    pub buried_fade_ms: u32,
    /// Opacity of the previous screen per unit of gesture progress
    pub previous_opacity_factor: f32,
    /// Offset of the opened screen per unit of gesture progress
    pub gesture_offset: f32,
    /// Offset of a screen fully off-screen (also where pushed screens start)
    pub exit_offset: f32,
    /// Scale of a fully transparent screen
    pub min_scale: f32,
    /// Shrink applied to screens per unit of back-transition progress
    pub back_scale_factor: f32,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            opacity_base_stiffness: 225.0,
            offset_base_stiffness: 250.0,
            progress_stiffness_scale: 1250.0,
            drag_stiffness: 2500.0,
            back_transition_stiffness: 225.0,
            damping_ratio: 1.0,
            buried_fade_ms: 250,
            previous_opacity_factor: 0.75,
            gesture_offset: 350.0,
            exit_offset: 1000.0,
            min_scale: 0.85,
            back_scale_factor: 0.05,
        }
    }
}

/// Back gesture handling
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Stiffness of the spring returning progress to zero after release
    pub release_stiffness: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            release_stiffness: 400.0,
        }
    }
}

impl RouterConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: RouterConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded router config");
        Ok(config)
    }

    /// Reject values the engine cannot animate sensibly
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.transition;
        let stiffnesses = [
            ("transition.opacity_base_stiffness", t.opacity_base_stiffness),
            ("transition.offset_base_stiffness", t.offset_base_stiffness),
            ("transition.drag_stiffness", t.drag_stiffness),
            ("transition.back_transition_stiffness", t.back_transition_stiffness),
            ("gesture.release_stiffness", self.gesture.release_stiffness),
        ];
        for (name, value) in stiffnesses {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }

        if !t.progress_stiffness_scale.is_finite() || t.progress_stiffness_scale < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "transition.progress_stiffness_scale must not be negative, got {}",
                t.progress_stiffness_scale
            )));
        }
        if !t.damping_ratio.is_finite() || t.damping_ratio <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "transition.damping_ratio must be positive, got {}",
                t.damping_ratio
            )));
        }
        if !(0.0..=1.0).contains(&t.previous_opacity_factor) {
            return Err(ConfigError::Invalid(format!(
                "transition.previous_opacity_factor must be within 0..=1, got {}",
                t.previous_opacity_factor
            )));
        }
        if !(0.0..=1.0).contains(&t.min_scale) || !(0.0..1.0).contains(&t.back_scale_factor) {
            return Err(ConfigError::Invalid(
                "transition.min_scale must be within 0..=1 and back_scale_factor within 0..1"
                    .to_string(),
            ));
        }
        if !t.gesture_offset.is_finite() || !t.exit_offset.is_finite() {
            return Err(ConfigError::Invalid(
                "transition offsets must be finite".to_string(),
            ));
        }
        Ok(())
    }
}
