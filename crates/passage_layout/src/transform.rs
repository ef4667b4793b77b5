//! Visual transform of a stacked screen
//!
//! Each rendered screen is drawn with:
//!
//! - `alpha` = its animated opacity
//! - `scale` = `lerp(min_scale, 1 - back_transition * back_scale_factor, alpha)`
//! - `translation_x` = `offset * 0.001 * viewport width`
//! - a rounded clip of `radius * (2 - scale)` whenever the screen is scaled or
//!   translated, so a moving screen reads as a card

use crate::geometry::Size;
use passage_animation::lerp;
use passage_core::{Screen, ScreenInstance, TransitionConfig};

/// Source of the display's corner radius
pub trait CornerRadiusSource {
    fn corner_radius(&self) -> f32;
}

impl CornerRadiusSource for f32 {
    fn corner_radius(&self) -> f32 {
        *self
    }
}

/// How one screen is drawn this frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenTransform {
    pub alpha: f32,
    pub scale: f32,
    pub translation_x: f32,
    /// Corner radius of the rounded clip, `None` when drawn unclipped
    pub clip_radius: Option<f32>,
}

impl ScreenTransform {
    pub const IDENTITY: ScreenTransform = ScreenTransform {
        alpha: 1.0,
        scale: 1.0,
        translation_x: 0.0,
        clip_radius: None,
    };

    pub fn compute(
        opacity: f32,
        offset: f32,
        back_transition: f32,
        viewport: Size,
        corner_radius: f32,
        config: &TransitionConfig,
    ) -> Self {
        let alpha = opacity.clamp(0.0, 1.0);
        let scale = lerp(
            config.min_scale,
            1.0 - back_transition * config.back_scale_factor,
            alpha,
        );
        let translation_x = offset * 0.001 * viewport.width;
        let clip_radius =
            (scale != 1.0 || translation_x != 0.0).then(|| corner_radius * (2.0 - scale));

        Self {
            alpha,
            scale,
            translation_x,
            clip_radius,
        }
    }

    /// Transform of `instance` given the router-wide back transition
    pub fn for_instance<S: Screen>(
        instance: &ScreenInstance<S>,
        back_transition: f32,
        viewport: Size,
        corner_radius: &impl CornerRadiusSource,
        config: &TransitionConfig,
    ) -> Self {
        Self::compute(
            instance.opacity(),
            instance.offset(),
            back_transition,
            viewport,
            corner_radius.corner_radius(),
            config,
        )
    }

    pub fn is_clipped(&self) -> bool {
        self.clip_radius.is_some()
    }
}

impl Default for ScreenTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(400.0, 800.0);

    #[test]
    fn test_resting_screen_is_identity() {
        let config = TransitionConfig::default();
        let transform = ScreenTransform::compute(1.0, 0.0, 0.0, VIEWPORT, 12.0, &config);
        assert_eq!(transform, ScreenTransform::IDENTITY);
    }

    #[test]
    fn test_offscreen_translation_and_clip() {
        let config = TransitionConfig::default();
        let transform = ScreenTransform::compute(1.0, 1000.0, 0.0, VIEWPORT, 12.0, &config);
        assert_eq!(transform.translation_x, 400.0);
        assert_eq!(transform.scale, 1.0);
        assert_eq!(transform.clip_radius, Some(12.0));
    }

    #[test]
    fn test_transparent_screen_shrinks() {
        let config = TransitionConfig::default();
        let transform = ScreenTransform::compute(0.0, 0.0, 0.0, VIEWPORT, 10.0, &config);
        assert!((transform.scale - 0.85).abs() < 1e-6);
        assert!((transform.clip_radius.unwrap() - 11.5).abs() < 1e-5);
    }

    #[test]
    fn test_back_transition_shrinks_opaque_screen() {
        let config = TransitionConfig::default();
        let transform = ScreenTransform::compute(1.0, 140.0, 1.0, VIEWPORT, 0.0, &config);
        assert!((transform.scale - 0.95).abs() < 1e-6);
        assert!((transform.translation_x - 56.0).abs() < 1e-4);
        assert!(transform.is_clipped());
    }

    #[test]
    fn test_opacity_is_clamped() {
        let config = TransitionConfig::default();
        let transform = ScreenTransform::compute(1.02, 0.0, 0.0, VIEWPORT, 0.0, &config);
        assert_eq!(transform.alpha, 1.0);
        assert!(!transform.is_clipped());
    }
}
