//! Per-frame visual derivation for rendered wheel items.
//!
//! Everything here is a pure function of the scroll position; nothing is cached
//! between frames.

/// Items further than this many heights from center are invisible
const FADE_HEIGHTS: f64 = 2.5;
/// Items closer than this fraction of a height count as active
const ACTIVE_FRACTION: f64 = 0.4;
const MIN_INTERACTIVE_OPACITY: f64 = 0.01;

/// How one item instance looks this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemVisual {
    /// Distance from the wheel center, in the same units as the item height
    pub distance: f64,
    pub is_active: bool,
    /// Distance normalized to `[0, 1]`
    pub normalized: f64,
    pub opacity: f64,
    pub scale: f64,
    pub blur: f64,
    /// Whether the instance accepts clicks
    pub interactive: bool,
}

/// Map an item at base `offset` to its look at scroll `position`.
///
/// A non-positive or non-finite `item_height` falls back to the default.
pub fn map_item(offset: f64, position: f64, item_height: f64) -> ItemVisual {
    let h = if item_height.is_finite() && item_height > 0.0 {
        item_height
    } else {
        crate::config::default_item_height()
    };

    let distance = (offset + position).abs();
    let normalized = (distance / (h * FADE_HEIGHTS)).min(1.0);
    let opacity = if distance > h * FADE_HEIGHTS {
        0.0
    } else {
        (1.0 - normalized).powf(1.5)
    };

    ItemVisual {
        distance,
        is_active: distance < h * ACTIVE_FRACTION,
        normalized,
        opacity,
        scale: 1.0 - 0.3 * normalized,
        blur: 2.0 * normalized,
        interactive: opacity >= MIN_INTERACTIVE_OPACITY,
    }
}

/// One copy of one item, placed on the wheel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedItem {
    pub logical_index: i64,
    /// Index into the item set
    pub item_index: usize,
    /// Signed offset from the wheel center after scrolling
    pub offset: f64,
    pub visual: ItemVisual,
}

/// Every instance in a window of `copies` repetitions centered on copy 0.
///
/// With 7 copies that is copies -3..=3, enough to cover the renormalization
/// range on both sides.
pub fn rendered_instances(
    count: usize,
    copies: u16,
    position: f64,
    item_height: f64,
) -> Vec<RenderedItem> {
    if count == 0 {
        return Vec::new();
    }
    let copies = copies.max(1) as i64;
    let first_copy = -(copies / 2);
    let count_i = count as i64;

    (first_copy..first_copy + copies)
        .flat_map(|copy| (0..count_i).map(move |i| copy * count_i + i))
        .map(|logical| {
            let base = logical as f64 * item_height;
            RenderedItem {
                logical_index: logical,
                item_index: logical.rem_euclid(count_i) as usize,
                offset: base + position,
                visual: map_item(base, position, item_height),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const H: f64 = 3.0;

    #[test]
    fn test_center_is_fully_visible() {
        let v = map_item(0.0, 0.0, H);
        assert_eq!(v.distance, 0.0);
        assert!(v.is_active);
        assert_eq!(v.opacity, 1.0);
        assert_eq!(v.scale, 1.0);
        assert_eq!(v.blur, 0.0);
        assert!(v.interactive);
    }

    #[test]
    fn test_fade_boundary() {
        let v = map_item(2.5 * H, 0.0, H);
        assert_eq!(v.normalized, 1.0);
        assert_eq!(v.opacity, 0.0);
        assert!(!v.interactive);
        assert!((v.scale - 0.7).abs() < 1e-12);
        assert_eq!(v.blur, 2.0);

        let far = map_item(-10.0 * H, 0.0, H);
        assert_eq!(far.opacity, 0.0);
    }

    #[test]
    fn test_active_boundary() {
        assert!(map_item(0.39 * H, 0.0, H).is_active);
        assert!(!map_item(0.4 * H, 0.0, H).is_active);
    }

    #[test]
    fn test_position_cancels_offset() {
        // logical 2 at rest
        let v = map_item(2.0 * H, -2.0 * H, H);
        assert!(v.is_active);
        assert_eq!(v.opacity, 1.0);
    }

    #[test]
    fn test_opacity_curve() {
        let v = map_item(1.25 * H, 0.0, H);
        assert!((v.normalized - 0.5).abs() < 1e-12);
        assert!((v.opacity - 0.5f64.powf(1.5)).abs() < 1e-12);
    }

    #[test]
    fn test_bad_height_falls_back() {
        assert_eq!(map_item(1.0, 0.0, 0.0), map_item(1.0, 0.0, H));
        assert_eq!(map_item(1.0, 0.0, -4.0), map_item(1.0, 0.0, H));
    }

    #[test]
    fn test_instances_cover_seven_copies() {
        let items = rendered_instances(4, 7, 0.0, H);
        assert_eq!(items.len(), 28);
        assert_eq!(items.first().map(|i| i.logical_index), Some(-12));
        assert_eq!(items.last().map(|i| i.logical_index), Some(15));
        assert!(items.iter().all(|i| i.item_index < 4));

        let active: Vec<_> = items.iter().filter(|i| i.visual.is_active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].logical_index, 0);
    }

    #[test]
    fn test_instances_follow_position() {
        let items = rendered_instances(4, 7, -6.0 * H, H);
        let active: Vec<_> = items.iter().filter(|i| i.visual.is_active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].logical_index, 6);
        assert_eq!(active[0].item_index, 2);
    }
}
