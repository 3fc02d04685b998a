use crate::arc::ArcShape;
use crate::error::SkeletonError;

/// Status of one skeleton pixel.
///
/// Doubles as the visited marker of the arc retrieval and as a cache of the
/// shape found for the arc ending at a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelStatus {
    #[default]
    Background,
    /// Arc pixel not visited yet.
    Arc,
    /// Visited arc pixel. Arc ends carry the shape of their arc.
    Processed(Option<ArcShape>),
    /// Pixel where three or more branches meet.
    Junction,
    /// Junction whose branches have all been scanned.
    JunctionProcessed,
    /// Interior pixel of a discarded arc.
    Hidden,
}

impl PixelStatus {
    pub const ARC: u8 = 0;
    pub const JUNCTION: u8 = 50;
    pub const JUNCTION_PROCESSED: u8 = 60;
    /// Plain processed pixel; arc ends use `PROCESSED + 1 + shape ordinal`.
    pub const PROCESSED: u8 = 100;
    pub const HIDDEN: u8 = 200;
    pub const BACKGROUND: u8 = 255;

    /// True for any junction, processed or not.
    #[must_use]
    pub fn is_junction(self) -> bool {
        matches!(self, PixelStatus::Junction | PixelStatus::JunctionProcessed)
    }

    #[must_use]
    pub fn is_junction_processed(self) -> bool {
        self == PixelStatus::JunctionProcessed
    }

    /// True once retrieval can no longer change this pixel.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            PixelStatus::Background
                | PixelStatus::Processed(_)
                | PixelStatus::JunctionProcessed
                | PixelStatus::Hidden
        )
    }

    #[must_use]
    pub fn is_foreground(self) -> bool {
        self != PixelStatus::Background
    }

    /// Shape stored at an arc end, if any.
    #[must_use]
    pub fn shape(self) -> Option<ArcShape> {
        match self {
            PixelStatus::Processed(shape) => shape,
            _ => None,
        }
    }

    /// 8-bit code of this status.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            PixelStatus::Background => Self::BACKGROUND,
            PixelStatus::Arc => Self::ARC,
            PixelStatus::Processed(None) => Self::PROCESSED,
            PixelStatus::Processed(Some(shape)) => Self::PROCESSED + 1 + shape.ordinal(),
            PixelStatus::Junction => Self::JUNCTION,
            PixelStatus::JunctionProcessed => Self::JUNCTION_PROCESSED,
            PixelStatus::Hidden => Self::HIDDEN,
        }
    }

    /// Decodes an 8-bit status code.
    ///
    /// # Errors
    ///
    /// Returns an error for a code outside the status set.
    pub fn from_code(code: u8) -> Result<Self, SkeletonError> {
        match code {
            Self::BACKGROUND => Ok(PixelStatus::Background),
            Self::ARC => Ok(PixelStatus::Arc),
            Self::PROCESSED => Ok(PixelStatus::Processed(None)),
            Self::JUNCTION => Ok(PixelStatus::Junction),
            Self::JUNCTION_PROCESSED => Ok(PixelStatus::JunctionProcessed),
            Self::HIDDEN => Ok(PixelStatus::Hidden),
            c if c > Self::PROCESSED => ArcShape::from_ordinal(c - Self::PROCESSED - 1)
                .map(|shape| PixelStatus::Processed(Some(shape)))
                .ok_or(SkeletonError::UnknownStatus(code)),
            _ => Err(SkeletonError::UnknownStatus(code)),
        }
    }
}
