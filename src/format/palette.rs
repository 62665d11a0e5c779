//! Tag color palette
//!
//! Multi-select tags are colored by position: segment `i` gets
//! `TAG_COLORS[i % TAG_COLORS.len()]`. Colors repeat after the palette runs
//! out, so the same ordered list always gets the same colors.

/// Ordered tag colors, named after the UI toolkit's tag color tokens
pub const TAG_COLORS: [&str; 12] = [
    "blue",
    "cyan",
    "green",
    "indigo",
    "light-blue",
    "lime",
    "orange",
    "pink",
    "purple",
    "red",
    "teal",
    "violet",
];

/// Color used for single-select tags
pub const SINGLE_TAG_COLOR: &str = "green";

/// Palette slot for the segment at `position` in a palette of `palette_size`
pub fn color_index(position: usize, palette_size: usize) -> usize {
    if palette_size == 0 {
        0
    } else {
        position % palette_size
    }
}

/// Color name for a palette slot of the default palette
pub fn color_name(index: usize) -> &'static str {
    TAG_COLORS[index % TAG_COLORS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_wrap() {
        let indices: Vec<usize> = (0..5).map(|i| color_index(i, 2)).collect();
        assert_eq!(indices, vec![0, 1, 0, 1, 0]);
    }

    #[test]
    fn test_names_follow_palette_order() {
        assert_eq!(color_name(0), "blue");
        assert_eq!(color_name(TAG_COLORS.len()), "blue");
    }
}
