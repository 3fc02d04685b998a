//! Scale-independent constants and their per-page resolution.
//!
//! Constants are expressed in interline fractions (or degrees) so they can be
//! loaded once for every page; parameters are the pixel values obtained for a
//! given [`Scale`] and are immutable afterwards.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::sheet::Scale;

/// Constants driving arc classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcConstants {
    /// Maximum angle (in degrees) for 3 points colinearity.
    pub max_alpha_deg: f64,
    /// Minimum arc length for quorum (interline fraction).
    pub arc_min_quorum: f64,
    /// Maximum mean distance from straight line (interline fraction).
    pub max_line_distance: f64,
    /// Minimum length for a staff arc (interline fraction).
    pub min_staff_arc_length: f64,
    /// Maximum length for a staff arc (interline fraction).
    pub max_staff_arc_length: f64,
    /// Minimum distance from staff line (interline fraction).
    pub min_staff_line_distance: f64,
    /// Minimum (inverted) slope, to detect vertical and horizontal lines.
    pub min_slope: f64,
}

impl Default for ArcConstants {
    fn default() -> Self {
        Self {
            max_alpha_deg: 2.5,
            arc_min_quorum: 1.5,
            max_line_distance: 0.1,
            min_staff_arc_length: 0.5,
            max_staff_arc_length: 5.0,
            min_staff_line_distance: 0.15,
            min_slope: 0.03,
        }
    }
}

/// Arc classification thresholds resolved for one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParameters {
    pub arc_min_quorum: usize,
    pub min_staff_arc_length: usize,
    pub max_staff_arc_length: usize,
    pub min_staff_line_distance: f64,
    pub max_sin_sq: f64,
    pub max_line_distance: f64,
    pub min_slope: f64,
}

impl ArcParameters {
    #[must_use]
    pub fn new(scale: &Scale, constants: &ArcConstants) -> Self {
        let max_sin = constants.max_alpha_deg.to_radians().sin();
        let params = Self {
            arc_min_quorum: pixel_count(scale, constants.arc_min_quorum),
            min_staff_arc_length: pixel_count(scale, constants.min_staff_arc_length),
            max_staff_arc_length: pixel_count(scale, constants.max_staff_arc_length),
            min_staff_line_distance: scale.to_pixels_f64(constants.min_staff_line_distance),
            max_sin_sq: max_sin * max_sin,
            max_line_distance: scale.to_pixels_f64(constants.max_line_distance),
            min_slope: constants.min_slope,
        };
        debug!(?params, interline = scale.interline(), "arc parameters");
        params
    }
}

/// Constants driving wedge assembly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WedgeConstants {
    /// Maximum abscissa gap between segments ends on closed side (interline fraction).
    pub closed_max_dx: f64,
    /// Maximum ordinate gap between segments ends on closed side (interline fraction).
    pub closed_max_dy: f64,
    /// Low minimum ordinate gap between segments ends on open side (interline fraction).
    pub open_min_dy_low: f64,
    /// High minimum ordinate gap between segments ends on open side (interline fraction).
    pub open_min_dy_high: f64,
    /// Maximum vertical bias (in degrees) between segments ends on open side.
    pub open_max_bias_deg: f64,
    /// Minimum grade for a wedge to be created.
    pub min_grade: f64,
}

impl Default for WedgeConstants {
    fn default() -> Self {
        Self {
            closed_max_dx: 0.2,
            closed_max_dy: 0.5,
            open_min_dy_low: 0.5,
            open_min_dy_high: 1.5,
            open_max_bias_deg: 20.0,
            min_grade: 0.1,
        }
    }
}

/// Wedge assembly thresholds resolved for one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WedgeParameters {
    pub closed_max_dx: i32,
    pub closed_max_dy: i32,
    pub open_min_dy_low: i32,
    pub open_min_dy_high: i32,
    /// Tangent of the maximum open-side bias.
    pub open_max_bias: f64,
    pub min_grade: f64,
}

impl WedgeParameters {
    /// # Errors
    ///
    /// Returns an error if the scaled open-side bounds are not strictly ordered
    /// or the closed-side gaps vanish at this scale.
    pub fn new(scale: &Scale, constants: &WedgeConstants) -> Result<Self, ConfigError> {
        let params = Self {
            closed_max_dx: scale.to_pixels(constants.closed_max_dx),
            closed_max_dy: scale.to_pixels(constants.closed_max_dy),
            open_min_dy_low: scale.to_pixels(constants.open_min_dy_low),
            open_min_dy_high: scale.to_pixels(constants.open_min_dy_high),
            open_max_bias: constants.open_max_bias_deg.to_radians().tan(),
            min_grade: constants.min_grade,
        };

        if params.open_min_dy_low >= params.open_min_dy_high {
            return Err(ConfigError::InvalidRange {
                name: "open_min_dy",
                low: f64::from(params.open_min_dy_low),
                high: f64::from(params.open_min_dy_high),
            });
        }
        if params.closed_max_dx <= 0 || params.closed_max_dy <= 0 {
            return Err(ConfigError::InvalidRange {
                name: "closed_max",
                low: 0.0,
                high: f64::from(params.closed_max_dx.min(params.closed_max_dy)),
            });
        }

        debug!(?params, interline = scale.interline(), "wedge parameters");
        Ok(params)
    }
}

#[allow(clippy::cast_sign_loss)]
fn pixel_count(scale: &Scale, fraction: f64) -> usize {
    scale.to_pixels(fraction).max(0) as usize
}
