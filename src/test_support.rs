//! Synthetic skeletons for unit tests.

use crate::math::PixelPoint;
use crate::skeleton::Skeleton;

/// Installs a test-writer subscriber honoring `RUST_LOG`, once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A binary foreground mask to draw thin strokes on.
pub struct Canvas {
    width: usize,
    height: usize,
    mask: Vec<bool>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            mask: vec![false; width * height],
        }
    }

    #[allow(clippy::cast_sign_loss)]
    pub fn plot(&mut self, p: PixelPoint) {
        assert!(p.x >= 0 && p.y >= 0, "negative pixel {p:?}");
        let (x, y) = (p.x as usize, p.y as usize);
        assert!(x < self.width && y < self.height, "pixel {p:?} off canvas");
        self.mask[y * self.width + x] = true;
    }

    /// Draws an 8-connected Bresenham line, both ends included.
    pub fn line(&mut self, from: PixelPoint, to: PixelPoint) {
        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        let sx = if from.x < to.x { 1 } else { -1 };
        let sy = if from.y < to.y { 1 } else { -1 };
        let mut err = dx + dy;
        let mut p = from;
        loop {
            self.plot(p);
            if p == to {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                p.x += sx;
            }
            if e2 <= dx {
                err += dx;
                p.y += sy;
            }
        }
    }

    /// Draws consecutive lines through `points`.
    pub fn polyline(&mut self, points: &[PixelPoint]) {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1]);
        }
    }

    /// Upper half of the circle of center `(cx, cy)`, left and right ends on row `cy`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn upper_half_circle(&mut self, cx: f64, cy: f64, radius: f64) {
        let steps = 4 * radius.ceil() as i32;
        let points: Vec<PixelPoint> = (0..=steps)
            .map(|i| {
                let t = std::f64::consts::PI * f64::from(i) / f64::from(steps);
                PixelPoint::new(
                    (cx + radius * t.cos()).round() as i32,
                    (cy - radius * t.sin()).round() as i32,
                )
            })
            .collect();
        self.polyline(&points);
    }

    /// Skeleton of the drawing, junctions flagged.
    #[allow(clippy::unwrap_used)]
    pub fn skeleton(&self) -> Skeleton {
        Skeleton::from_foreground(self.width, self.height, &self.mask).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skeleton::PixelStatus;

    #[test]
    fn bresenham_ends_included() {
        let mut canvas = Canvas::new(20, 20);
        canvas.line(PixelPoint::new(2, 3), PixelPoint::new(12, 8));
        let sk = canvas.skeleton();
        assert_eq!(sk.get(PixelPoint::new(2, 3)), PixelStatus::Arc);
        assert_eq!(sk.get(PixelPoint::new(12, 8)), PixelStatus::Arc);
        let count = sk.to_codes().iter().filter(|&&c| c == PixelStatus::ARC).count();
        assert_eq!(count, 11);
    }
}
