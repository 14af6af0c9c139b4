//! Cluster colors for plotting front ends.

use serde::{Serialize, Deserialize};

/// RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        Self {
            r: rgb[0] as f32 / 255.0,
            g: rgb[1] as f32 / 255.0,
            b: rgb[2] as f32 / 255.0,
            a: 1.0,
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// The 20-color "tab20" qualitative palette.
pub const TAB20: [[u8; 3]; 20] = [
    [0x1f, 0x77, 0xb4], [0xae, 0xc7, 0xe8],
    [0xff, 0x7f, 0x0e], [0xff, 0xbb, 0x78],
    [0x2c, 0xa0, 0x2c], [0x98, 0xdf, 0x8a],
    [0xd6, 0x27, 0x28], [0xff, 0x98, 0x96],
    [0x94, 0x67, 0xbd], [0xc5, 0xb0, 0xd5],
    [0x8c, 0x56, 0x4b], [0xc4, 0x9c, 0x94],
    [0xe3, 0x77, 0xc2], [0xf7, 0xb6, 0xd2],
    [0x7f, 0x7f, 0x7f], [0xc7, 0xc7, 0xc7],
    [0xbc, 0xbd, 0x22], [0xdb, 0xdb, 0x8d],
    [0x17, 0xbe, 0xcf], [0x9e, 0xda, 0xe5],
];

/// `nr_labels` colors taken from [`TAB20`] in order, starting over after the
/// twentieth.
pub fn generate_colormap(nr_labels: usize) -> Vec<Rgba> {
    TAB20
        .iter()
        .cycle()
        .take(nr_labels)
        .map(|&rgb| Rgba::from_rgb8(rgb))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_maps_are_a_palette_prefix() {
        let colors = generate_colormap(3);
        assert_eq!(colors.len(), 3);
        assert_eq!(colors[2], Rgba::from_rgb8([0xff, 0x7f, 0x0e]));
        assert!(generate_colormap(0).is_empty());
    }

    #[test]
    fn large_maps_wrap_around() {
        let colors = generate_colormap(25);
        assert_eq!(colors.len(), 25);
        assert_eq!(colors[20], colors[0]);
        assert_eq!(colors[24], colors[4]);
        assert_ne!(colors[19], colors[0]);
    }

    #[test]
    fn colors_are_opaque() {
        assert!(generate_colormap(40).iter().all(|c| c.a == 1.0));
        assert_eq!(Rgba::from_rgb8([255, 0, 0]).to_array(), [1.0, 0.0, 0.0, 1.0]);
    }
}
