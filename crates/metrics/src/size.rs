//! Widget size classes, per-device size records, and crop geometry.
//!
//! All values are in pixels of the device screen. A [`SizeRecord`] stores
//! three numbers shared by every widget family:
//!
//! - `small`: side of the square small widget (also the medium widget height)
//! - `medium`: width of the medium and large widgets
//! - `large`: height of the large widget
//!
//! The optional [`CropAnchors`] locate the widget grid on a home-screen
//! screenshot so the region behind a widget can be cut out.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MetricsError;

/// A home-screen widget size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetFamily {
    /// Square widget occupying a 2×2 icon block.
    Small,
    /// Wide widget occupying a 4×2 icon block.
    Medium,
    /// Tall widget occupying a 4×4 icon block.
    Large,
    /// Tablet-only widget occupying an 8×4 icon block.
    ExtraLarge,
}

impl WidgetFamily {
    /// All families, smallest first.
    pub const ALL: [WidgetFamily; 4] = [
        WidgetFamily::Small,
        WidgetFamily::Medium,
        WidgetFamily::Large,
        WidgetFamily::ExtraLarge,
    ];

    /// Returns the canonical lowercase name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetFamily::Small => "small",
            WidgetFamily::Medium => "medium",
            WidgetFamily::Large => "large",
            WidgetFamily::ExtraLarge => "extra_large",
        }
    }
}

impl fmt::Display for WidgetFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for WidgetFamily {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "small" => Ok(WidgetFamily::Small),
            "medium" => Ok(WidgetFamily::Medium),
            "large" => Ok(WidgetFamily::Large),
            "extra_large" | "extralarge" => Ok(WidgetFamily::ExtraLarge),
            _ => Err(MetricsError::UnknownName {
                kind: "widget family",
                value: s.to_string(),
            }),
        }
    }
}

/// Offsets of the widget grid on a home-screen screenshot.
///
/// `left` and `right` are the x offsets of the two widget columns; `top`,
/// `middle`, and `bottom` the y offsets of the three widget rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CropAnchors {
    /// X offset of the left column.
    pub left: u32,
    /// X offset of the right column.
    pub right: u32,
    /// Y offset of the top row.
    pub top: u32,
    /// Y offset of the middle row.
    pub middle: u32,
    /// Y offset of the bottom row.
    pub bottom: u32,
}

/// Widget pixel dimensions for one device.
///
/// # Examples
///
/// ```
/// use glance_metrics::{SizeRecord, WidgetFamily};
///
/// let record = SizeRecord::new(474, 1014, 1062);
/// assert_eq!(record.dimension(WidgetFamily::Small), Some(474));
/// assert_eq!(record.dimension(WidgetFamily::ExtraLarge), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SizeRecord {
    /// Side of the small widget.
    pub small: u32,
    /// Width of the medium and large widgets.
    pub medium: u32,
    /// Height of the large widget.
    pub large: u32,
    /// Width of the extra large widget, on devices that have one.
    #[serde(
        default,
        alias = "extraLarge",
        skip_serializing_if = "Option::is_none"
    )]
    pub extra_large: Option<u32>,
    /// Widget grid offsets for screenshot cropping, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchors: Option<CropAnchors>,
}

impl SizeRecord {
    /// Creates a record without extra large size or anchors.
    #[must_use]
    pub const fn new(small: u32, medium: u32, large: u32) -> Self {
        Self {
            small,
            medium,
            large,
            extra_large: None,
            anchors: None,
        }
    }

    /// Returns a copy of this record with crop anchors.
    #[must_use]
    pub const fn with_anchors(mut self, anchors: CropAnchors) -> Self {
        self.anchors = Some(anchors);
        self
    }

    /// Returns a copy of this record with an extra large size.
    #[must_use]
    pub const fn with_extra_large(mut self, extra_large: u32) -> Self {
        self.extra_large = Some(extra_large);
        self
    }

    /// Returns the headline dimension of a widget family.
    #[must_use]
    pub fn dimension(&self, family: WidgetFamily) -> Option<u32> {
        match family {
            WidgetFamily::Small => Some(self.small),
            WidgetFamily::Medium => Some(self.medium),
            WidgetFamily::Large => Some(self.large),
            WidgetFamily::ExtraLarge => self.extra_large,
        }
    }

    /// Returns the width and height of a widget family, in pixels.
    #[must_use]
    pub fn widget_size(&self, family: WidgetFamily) -> Option<(u32, u32)> {
        match family {
            WidgetFamily::Small => Some((self.small, self.small)),
            WidgetFamily::Medium => Some((self.medium, self.small)),
            WidgetFamily::Large => Some((self.medium, self.large)),
            WidgetFamily::ExtraLarge => self.extra_large.map(|w| (w, self.large)),
        }
    }

    /// Returns the screenshot region behind a widget at `position`.
    ///
    /// Returns `None` if the record has no anchors, the family has no crop
    /// geometry (extra large), or the position does not exist for the
    /// family.
    ///
    /// # Examples
    ///
    /// ```
    /// use glance_metrics::{CropAnchors, CropPosition, CropRect, SizeRecord, WidgetFamily};
    ///
    /// let record = SizeRecord::new(474, 1014, 1062).with_anchors(CropAnchors {
    ///     left: 78,
    ///     right: 618,
    ///     top: 231,
    ///     middle: 819,
    ///     bottom: 1407,
    /// });
    ///
    /// let rect = record.crop(WidgetFamily::Small, CropPosition::MiddleRight);
    /// assert_eq!(rect, Some(CropRect { x: 618, y: 819, width: 474, height: 474 }));
    ///
    /// assert_eq!(record.crop(WidgetFamily::Small, CropPosition::Top), None);
    /// ```
    #[must_use]
    pub fn crop(&self, family: WidgetFamily, position: CropPosition) -> Option<CropRect> {
        use CropPosition::*;

        let anchors = self.anchors?;
        let (width, height) = self.widget_size(family)?;

        let (x, y) = match (family, position) {
            (WidgetFamily::Small, TopLeft) => (anchors.left, anchors.top),
            (WidgetFamily::Small, TopRight) => (anchors.right, anchors.top),
            (WidgetFamily::Small, MiddleLeft) => (anchors.left, anchors.middle),
            (WidgetFamily::Small, MiddleRight) => (anchors.right, anchors.middle),
            (WidgetFamily::Small, BottomLeft) => (anchors.left, anchors.bottom),
            (WidgetFamily::Small, BottomRight) => (anchors.right, anchors.bottom),
            (WidgetFamily::Medium, Top) => (anchors.left, anchors.top),
            (WidgetFamily::Medium, Middle) => (anchors.left, anchors.middle),
            (WidgetFamily::Medium, Bottom) => (anchors.left, anchors.bottom),
            // A bottom large widget spans the middle and bottom rows.
            (WidgetFamily::Large, Top) => (anchors.left, anchors.top),
            (WidgetFamily::Large, Bottom) => (anchors.left, anchors.middle),
            _ => return None,
        };

        Some(CropRect {
            x,
            y,
            width,
            height,
        })
    }
}

/// Where a widget sits on the home screen.
///
/// Small widgets use the six corner/edge cells; medium widgets use the three
/// rows; large widgets use `Top` and `Bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropPosition {
    /// Top row, left column.
    TopLeft,
    /// Top row, right column.
    TopRight,
    /// Middle row, left column.
    MiddleLeft,
    /// Middle row, right column.
    MiddleRight,
    /// Bottom row, left column.
    BottomLeft,
    /// Bottom row, right column.
    BottomRight,
    /// Top row, full width.
    Top,
    /// Middle row, full width.
    Middle,
    /// Bottom row, full width.
    Bottom,
}

impl CropPosition {
    /// Returns the positions a widget family can occupy.
    #[must_use]
    pub fn for_family(family: WidgetFamily) -> &'static [CropPosition] {
        use CropPosition::*;
        match family {
            WidgetFamily::Small => &[
                TopLeft,
                TopRight,
                MiddleLeft,
                MiddleRight,
                BottomLeft,
                BottomRight,
            ],
            WidgetFamily::Medium => &[Top, Middle, Bottom],
            WidgetFamily::Large => &[Top, Bottom],
            WidgetFamily::ExtraLarge => &[],
        }
    }
}

impl FromStr for CropPosition {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use CropPosition::*;
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "topleft" => Ok(TopLeft),
            "topright" => Ok(TopRight),
            "middleleft" => Ok(MiddleLeft),
            "middleright" => Ok(MiddleRight),
            "bottomleft" => Ok(BottomLeft),
            "bottomright" => Ok(BottomRight),
            "top" => Ok(Top),
            "middle" => Ok(Middle),
            "bottom" => Ok(Bottom),
            _ => Err(MetricsError::UnknownName {
                kind: "crop position",
                value: s.to_string(),
            }),
        }
    }
}

/// A rectangle on the screenshot, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CropRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}
