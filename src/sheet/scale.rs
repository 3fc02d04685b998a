use crate::error::ConfigError;

/// Resolution of a page, as the distance between two staff lines.
///
/// Scale-dependent constants are expressed as fractions of this interline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale {
    interline: u32,
}

impl Scale {
    /// Creates a new scale.
    ///
    /// # Errors
    ///
    /// Returns an error if `interline` is zero.
    pub fn new(interline: u32) -> Result<Self, ConfigError> {
        if interline == 0 {
            return Err(ConfigError::InvalidInterline);
        }
        Ok(Self { interline })
    }

    /// Returns the interline in pixels.
    #[must_use]
    pub fn interline(&self) -> u32 {
        self.interline
    }

    /// Converts an interline fraction to a rounded pixel count.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_pixels(&self, fraction: f64) -> i32 {
        self.to_pixels_f64(fraction).round() as i32
    }

    /// Converts an interline fraction to pixels.
    #[must_use]
    pub fn to_pixels_f64(&self, fraction: f64) -> f64 {
        fraction * f64::from(self.interline)
    }
}

/// Global page skew.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Skew {
    angle: f64,
    slope: f64,
}

impl Skew {
    /// Creates a skew from its angle in radians, positive when lines go down to
    /// the right.
    #[must_use]
    pub fn new(angle: f64) -> Self {
        Self {
            angle,
            slope: angle.tan(),
        }
    }

    /// Returns the skew angle in radians.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Slope (`dy / dx`) of horizontal page content.
    #[must_use]
    pub fn slope(&self) -> f64 {
        self.slope
    }
}

impl Default for Skew {
    fn default() -> Self {
        Self::new(0.0)
    }
}
