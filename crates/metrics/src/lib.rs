//! Per-device widget geometry for glance widgets.
//!
//! Widget layouts need to know how many pixels each widget size class gets
//! on the current device, and (for transparent-background widgets) where the
//! widget sits on a home-screen screenshot. This crate maps the screen height
//! in pixels to that geometry, with fallbacks so a lookup always produces
//! usable numbers.
//!
//! # Overview
//!
//! - [`table`]: The [`DeviceMetricsTable`] and its lookup
//! - [`size`]: Size classes, size records, and crop geometry
//! - [`builtin`]: The builtin device list
//! - [`error`]: Error types for loading device files
//!
//! # Units
//!
//! Every number returned is in screen pixels. The generic sizes used for
//! unknown devices are defined in points and multiplied by the screen scale
//! at lookup time.
//!
//! # Examples
//!
//! ```
//! use glance_metrics::{CropPosition, DeviceMetricsTable, LookupOptions, WidgetFamily};
//!
//! let record = DeviceMetricsTable::shared().lookup(2532, LookupOptions::default());
//! let rect = record.crop(WidgetFamily::Medium, CropPosition::Top).unwrap();
//! assert_eq!((rect.x, rect.y, rect.width, rect.height), (78, 231, 1014, 474));
//! ```

pub mod builtin;
pub mod error;
pub mod size;
pub mod table;

// Re-export primary types at crate root for convenience
pub use builtin::BUILTIN_TABLE_VERSION;
pub use error::{MetricsError, Result};
pub use size::{CropAnchors, CropPosition, CropRect, SizeRecord, WidgetFamily};
pub use table::{
    DEFAULT_SCALE, DESIGN_FALLBACK, DESIGN_REFERENCE_HEIGHT, Device, DeviceMetricsTable,
    EXTENSION_FALLBACK_POINTS, LookupOptions, MatchSource, Resolution,
};
