//! The device metrics table and its lookup.
//!
//! Lookups are keyed by the exact screen height in pixels. A miss never
//! fails: when running as a real home-screen widget the generic sizes are
//! scaled by the device's pixel density, and when running inside the host
//! app's preview the sizes of a fixed reference screen are used instead.
//!
//! # Device Files
//!
//! Devices missing from the builtin list can be added from a JSON5 file:
//!
//! ```json5
//! {
//!   devices: {
//!     "2868": {
//!       name: "iPhone 16 Pro Max",
//!       small: 510, medium: 1092, large: 1146,
//!       anchors: { left: 99, right: 681, top: 282, middle: 918, bottom: 1554 },
//!     },
//!   },
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::builtin::BUILTIN_DEVICES;
use crate::error::{MetricsError, Result};
use crate::size::{CropAnchors, SizeRecord};

/// Generic widget sizes in points, used for unknown devices in a widget.
pub const EXTENSION_FALLBACK_POINTS: SizeRecord = SizeRecord::new(155, 329, 345);

/// Screen height whose record stands in for unknown devices in the host app.
pub const DESIGN_REFERENCE_HEIGHT: u32 = 2532;

/// Sizes of the design reference screen, in pixels.
pub const DESIGN_FALLBACK: SizeRecord =
    SizeRecord::new(474, 1014, 1062).with_anchors(CropAnchors {
        left: 78,
        right: 618,
        top: 231,
        middle: 819,
        bottom: 1407,
    });

/// Pixel density assumed when none is supplied.
pub const DEFAULT_SCALE: u32 = 3;

static SHARED: LazyLock<DeviceMetricsTable> = LazyLock::new(DeviceMetricsTable::builtin);

/// How a lookup is being made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupOptions {
    /// Whether the caller runs as an actual home-screen widget (as opposed to
    /// a preview inside the host app).
    pub running_as_extension: bool,
    /// Pixels per point of the device screen.
    pub scale: u32,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            running_as_extension: true,
            scale: DEFAULT_SCALE,
        }
    }
}

impl LookupOptions {
    /// Options for a home-screen widget on a screen with the given density.
    #[must_use]
    pub fn extension(scale: u32) -> Self {
        Self {
            running_as_extension: true,
            scale,
        }
    }

    /// Options for a preview inside the host app.
    #[must_use]
    pub fn preview() -> Self {
        Self {
            running_as_extension: false,
            scale: DEFAULT_SCALE,
        }
    }
}

/// Which branch of a lookup produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    /// The screen height is in the table.
    Exact,
    /// Unknown device, generic sizes scaled by pixel density.
    ExtensionFallback,
    /// Unknown device, design reference sizes.
    DesignFallback,
}

/// The outcome of [`DeviceMetricsTable::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Which branch answered.
    pub source: MatchSource,
    /// The sizes to use.
    pub record: SizeRecord,
}

/// A known device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Human-readable model names sharing this screen height.
    pub name: String,
    /// Widget sizes on this device.
    pub record: SizeRecord,
}

/// Screen height to widget geometry.
///
/// # Examples
///
/// ```
/// use glance_metrics::{DeviceMetricsTable, LookupOptions, MatchSource};
///
/// let table = DeviceMetricsTable::shared();
///
/// let record = table.lookup(2796, LookupOptions::default());
/// assert_eq!(record.small, 510);
///
/// let unknown = table.resolve(1000, LookupOptions::extension(2));
/// assert_eq!(unknown.source, MatchSource::ExtensionFallback);
/// assert_eq!(unknown.record.small, 310);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceMetricsTable {
    devices: BTreeMap<u32, Device>,
}

impl DeviceMetricsTable {
    /// Creates an empty table. Every lookup on it falls back.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a fresh copy of the builtin device table.
    #[must_use]
    pub fn builtin() -> Self {
        let devices = BUILTIN_DEVICES
            .iter()
            .map(|d| {
                (
                    d.height,
                    Device {
                        name: d.name.to_string(),
                        record: d.record,
                    },
                )
            })
            .collect();
        Self { devices }
    }

    /// Returns the process-wide builtin table, built on first use.
    #[must_use]
    pub fn shared() -> &'static Self {
        &SHARED
    }

    /// Looks up the widget sizes for a screen height.
    ///
    /// Never fails; see [`DeviceMetricsTable::resolve`] for which branch
    /// applies.
    #[must_use]
    pub fn lookup(&self, screen_height: u32, options: LookupOptions) -> SizeRecord {
        self.resolve(screen_height, options).record
    }

    /// Looks up the widget sizes for a screen height and reports where they
    /// came from.
    ///
    /// - Exact height match: the stored record.
    /// - Miss while running as a widget: the generic point sizes multiplied
    ///   by `options.scale` (a scale of 0 is treated as 1).
    /// - Miss inside the host app: the design reference record.
    #[must_use]
    pub fn resolve(&self, screen_height: u32, options: LookupOptions) -> Resolution {
        if let Some(device) = self.devices.get(&screen_height) {
            return Resolution {
                source: MatchSource::Exact,
                record: device.record,
            };
        }

        if options.running_as_extension {
            let scale = options.scale.max(1);
            debug!(screen_height, scale, "unknown device, using scaled widget sizes");
            let points = EXTENSION_FALLBACK_POINTS;
            Resolution {
                source: MatchSource::ExtensionFallback,
                record: SizeRecord::new(
                    points.small.saturating_mul(scale),
                    points.medium.saturating_mul(scale),
                    points.large.saturating_mul(scale),
                ),
            }
        } else {
            debug!(
                screen_height,
                reference = DESIGN_REFERENCE_HEIGHT,
                "unknown device, using design reference sizes"
            );
            Resolution {
                source: MatchSource::DesignFallback,
                record: DESIGN_FALLBACK,
            }
        }
    }

    /// Returns the device registered for an exact screen height.
    #[must_use]
    pub fn get(&self, screen_height: u32) -> Option<&Device> {
        self.devices.get(&screen_height)
    }

    /// Adds or replaces a device, returning the previous entry.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::InvalidHeight`] for a zero height and
    /// [`MetricsError::InvalidRecord`] if any dimension is zero; the table is
    /// left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use glance_metrics::{Device, DeviceMetricsTable, SizeRecord};
    ///
    /// let mut table = DeviceMetricsTable::new();
    /// let device = Device { name: "tablet".into(), record: SizeRecord::new(340, 720, 720) };
    /// assert!(table.insert(2732, device.clone()).unwrap().is_none());
    ///
    /// let empty = Device { record: SizeRecord::new(0, 0, 0), ..device };
    /// assert!(table.insert(2732, empty).is_err());
    /// ```
    pub fn insert(&mut self, screen_height: u32, device: Device) -> Result<Option<Device>> {
        if screen_height == 0 {
            return Err(MetricsError::InvalidHeight(screen_height.to_string()));
        }
        check_record(screen_height, &device.record)?;
        Ok(self.devices.insert(screen_height, device))
    }

    /// Adds every device of `other`, replacing entries with the same height.
    ///
    /// Entries of `other` were validated when it was built.
    pub fn merge(&mut self, other: DeviceMetricsTable) {
        self.devices.extend(other.devices);
    }

    /// Returns the known screen heights in ascending order.
    pub fn heights(&self) -> impl Iterator<Item = u32> + '_ {
        self.devices.keys().copied()
    }

    /// Iterates over `(screen height, device)` pairs in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Device)> + '_ {
        self.devices.iter().map(|(&h, d)| (h, d))
    }

    /// Returns the number of known devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Returns whether the table has no devices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Parses a JSON5 device file.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid JSON5, a key is not a
    /// screen height, or an entry has a zero dimension.
    ///
    /// # Examples
    ///
    /// ```
    /// use glance_metrics::DeviceMetricsTable;
    ///
    /// let table = DeviceMetricsTable::from_json5_str(r#"{
    ///     devices: { "3000": { small: 520, medium: 1100, large: 1160 } },
    /// }"#).unwrap();
    /// assert_eq!(table.get(3000).unwrap().record.medium, 1100);
    /// ```
    pub fn from_json5_str(content: &str) -> Result<Self> {
        let file: DeviceFile = serde_json5::from_str(content)?;
        let devices = file
            .devices
            .into_iter()
            .map(|(key, entry)| -> Result<(u32, Device)> {
                let height = key
                    .trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|&h| h > 0)
                    .ok_or_else(|| MetricsError::InvalidHeight(key.clone()))?;
                Ok((height, entry.into_device(height)?))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;
        Ok(Self { devices })
    }

    /// Reads a JSON5 device file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument]
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| MetricsError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        let table = Self::from_json5_str(&content)?;
        debug!(devices = table.len(), "loaded device table");
        Ok(table)
    }
}

/// On-disk layout of a device file.
#[derive(Debug, Deserialize)]
struct DeviceFile {
    #[serde(default)]
    devices: BTreeMap<String, DeviceEntry>,
}

#[derive(Debug, Deserialize)]
struct DeviceEntry {
    #[serde(default)]
    name: Option<String>,
    small: u32,
    medium: u32,
    large: u32,
    #[serde(default, alias = "extraLarge")]
    extra_large: Option<u32>,
    #[serde(default)]
    anchors: Option<CropAnchors>,
}

impl DeviceEntry {
    fn into_device(self, height: u32) -> Result<Device> {
        let record = SizeRecord {
            small: self.small,
            medium: self.medium,
            large: self.large,
            extra_large: self.extra_large,
            anchors: self.anchors,
        };
        check_record(height, &record)?;

        Ok(Device {
            name: self.name.unwrap_or_else(|| format!("{height}px screen")),
            record,
        })
    }
}

/// Rejects records with a zero dimension.
fn check_record(height: u32, record: &SizeRecord) -> Result<()> {
    let dimensions = [
        ("small", Some(record.small)),
        ("medium", Some(record.medium)),
        ("large", Some(record.large)),
        ("extra_large", record.extra_large),
    ];
    match dimensions.iter().find(|(_, v)| *v == Some(0)) {
        Some((field, _)) => Err(MetricsError::InvalidRecord {
            height,
            reason: format!("{field} must be positive"),
        }),
        None => Ok(()),
    }
}
