use super::direction::Direction;
use super::status::PixelStatus;

/// Classifies every foreground pixel of a thinned mask as arc or junction.
///
/// A pixel is a junction when walking its 8-neighbor ring crosses from
/// background to foreground three times or more (crossing number). Ends and
/// chain pixels have a crossing number of 1 and 2.
pub(super) fn mark_junctions(width: usize, height: usize, mask: &[bool]) -> Vec<PixelStatus> {
    let fg = |x: i64, y: i64| -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let (x, y) = (x as usize, y as usize);
        x < width && y < height && mask[y * width + x]
    };

    let mut statuses = vec![PixelStatus::Background; width * height];
    for y in 0..height {
        for x in 0..width {
            if !mask[y * width + x] {
                continue;
            }

            #[allow(clippy::cast_possible_wrap)]
            let (xi, yi) = (x as i64, y as i64);
            let ring: Vec<bool> = Direction::ALL
                .iter()
                .map(|d| fg(xi + i64::from(d.dx()), yi + i64::from(d.dy())))
                .collect();
            let crossings = (0..ring.len())
                .filter(|&i| !ring[i] && ring[(i + 1) % ring.len()])
                .count();

            statuses[y * width + x] = if crossings >= 3 {
                PixelStatus::Junction
            } else {
                PixelStatus::Arc
            };
        }
    }
    statuses
}
