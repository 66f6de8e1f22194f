//! Visual mapping of the reveal level.
//!
//! The game only tracks an abstract level in `0..=MAX_ATTEMPTS`; front ends
//! pick a mode and turn the level into a blur radius or a zoom factor.

use crate::game_state::MAX_ATTEMPTS;
use clap::ValueEnum;

const MAX_BLUR_PX: usize = 20;
const BLUR_STEP_PX: usize = 4;
const MAX_ZOOM: usize = 25;
const ZOOM_STEP: usize = 5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum RevealMode {
    #[default]
    Blur,
    Zoom,
}

impl RevealMode {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Blur => "Blur mode",
            Self::Zoom => "Zoom mode",
        }
    }

    /// Switches to the other mode; there are only two.
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Self::Blur => Self::Zoom,
            Self::Zoom => Self::Blur,
        }
    }
}

/// Blur radius in pixels: 20 px at level 0, clear at level 5 or game over.
#[must_use]
pub fn blur_radius(level: usize, game_over: bool) -> usize {
    if game_over {
        return 0;
    }
    MAX_BLUR_PX.saturating_sub(level.min(MAX_ATTEMPTS) * BLUR_STEP_PX)
}

/// Zoom factor: x25 at level 0, never below x1.
#[must_use]
pub fn zoom_factor(level: usize, game_over: bool) -> usize {
    if game_over {
        return 1;
    }
    MAX_ZOOM
        .saturating_sub(level.min(MAX_ATTEMPTS) * ZOOM_STEP)
        .max(1)
}

/// Share of the image that is disclosed, from 0.0 to 1.0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn revealed_fraction(level: usize, game_over: bool) -> f64 {
    if game_over {
        return 1.0;
    }
    level.min(MAX_ATTEMPTS) as f64 / MAX_ATTEMPTS as f64
}

/// Short description used by text front ends, e.g. `blur 12px`.
#[must_use]
pub fn describe(mode: RevealMode, level: usize, game_over: bool) -> String {
    match mode {
        RevealMode::Blur => format!("blur {}px", blur_radius(level, game_over)),
        RevealMode::Zoom => format!("zoom x{}", zoom_factor(level, game_over)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blur_radius() {
        assert_eq!(blur_radius(0, false), 20);
        assert_eq!(blur_radius(2, false), 12);
        assert_eq!(blur_radius(5, false), 0);
        assert_eq!(blur_radius(9, false), 0);
        assert_eq!(blur_radius(0, true), 0);
    }

    #[test]
    fn test_zoom_factor() {
        assert_eq!(zoom_factor(0, false), 25);
        assert_eq!(zoom_factor(2, false), 15);
        assert_eq!(zoom_factor(5, false), 1);
        assert_eq!(zoom_factor(1, true), 1);
    }

    #[test]
    fn test_revealed_fraction() {
        assert!((revealed_fraction(0, false)).abs() < f64::EPSILON);
        assert!((revealed_fraction(5, false) - 1.0).abs() < f64::EPSILON);
        assert!((revealed_fraction(1, true) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_toggle_and_describe() {
        assert_eq!(RevealMode::Blur.toggle(), RevealMode::Zoom);
        assert_eq!(RevealMode::Zoom.toggle(), RevealMode::Blur);
        assert_eq!(describe(RevealMode::Blur, 1, false), "blur 16px");
        assert_eq!(describe(RevealMode::Zoom, 1, false), "zoom x20");
    }
}
