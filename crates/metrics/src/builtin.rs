//! Builtin device geometry.
//!
//! Keys are the screen heights in pixels reported by the device. Several
//! models share a height (and therefore a record); the names list them.
//! Bump [`BUILTIN_TABLE_VERSION`] whenever an entry is added or changed.

use crate::size::{CropAnchors, SizeRecord};

/// Revision of the builtin device list.
pub const BUILTIN_TABLE_VERSION: u32 = 3;

/// A builtin device entry.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BuiltinDevice {
    pub height: u32,
    pub name: &'static str,
    pub record: SizeRecord,
}

const fn device(
    height: u32,
    name: &'static str,
    [small, medium, large]: [u32; 3],
    [left, right, top, middle, bottom]: [u32; 5],
) -> BuiltinDevice {
    BuiltinDevice {
        height,
        name,
        record: SizeRecord::new(small, medium, large).with_anchors(CropAnchors {
            left,
            right,
            top,
            middle,
            bottom,
        }),
    }
}

#[rustfmt::skip]
pub(crate) const BUILTIN_DEVICES: &[BuiltinDevice] = &[
    device(2796, "iPhone 14 Pro Max / 15 Pro Max / 15 Plus", [510, 1092, 1146], [99, 681, 282, 918, 1554]),
    device(2556, "iPhone 14 Pro / 15 / 15 Pro",              [474, 1017, 1062], [82, 622, 270, 858, 1446]),
    device(2778, "iPhone 12 Pro Max / 13 Pro Max / 14 Plus", [510, 1092, 1146], [96, 678, 246, 882, 1518]),
    device(2532, "iPhone 12 / 12 Pro / 13 / 13 Pro / 14",    [474, 1014, 1062], [78, 618, 231, 819, 1407]),
    device(2688, "iPhone XS Max / 11 Pro Max",               [507, 1080, 1137], [81, 654, 228, 858, 1488]),
    device(2436, "iPhone X / XS / 11 Pro",                   [465, 987, 1035],  [69, 591, 213, 783, 1353]),
    device(2340, "iPhone 12 mini / 13 mini",                 [436, 936, 980],   [72, 570, 212, 756, 1300]),
    device(1792, "iPhone XR / 11",                           [338, 720, 758],   [54, 436, 160, 580, 1000]),
    device(2208, "iPhone 6 Plus / 7 Plus / 8 Plus",          [471, 1044, 1071], [99, 672, 114, 696, 1278]),
    device(2001, "iPhone Plus, display zoom",                [444, 963, 972],   [81, 600, 90, 618, 1146]),
    device(1624, "iPhone XR / 11, display zoom",             [310, 658, 690],   [46, 394, 142, 522, 902]),
    device(1334, "iPhone 6 / 7 / 8 / SE (2nd gen)",          [296, 642, 648],   [54, 400, 60, 412, 764]),
    device(1136, "iPhone 5 / SE (1st gen)",                  [282, 584, 622],   [30, 332, 59, 399, 399]),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn heights_are_unique() {
        let heights: HashSet<u32> = BUILTIN_DEVICES.iter().map(|d| d.height).collect();
        assert_eq!(heights.len(), BUILTIN_DEVICES.len());
    }

    #[test]
    fn records_are_positive_and_ordered() {
        for device in BUILTIN_DEVICES {
            let r = device.record;
            assert!(r.small > 0 && r.small < r.medium, "{}", device.name);
            assert!(r.large >= r.small, "{}", device.name);

            let a = r.anchors.expect("builtin devices carry anchors");
            assert!(a.left < a.right, "{}", device.name);
            assert!(a.top < a.middle && a.middle <= a.bottom, "{}", device.name);
        }
    }
}
