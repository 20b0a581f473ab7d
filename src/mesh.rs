/// Components per position.
pub const POSITION_SIZE: usize = 3;
/// Components per color.
pub const COLOR_SIZE: usize = 3;

#[rustfmt::skip]
pub const POSITIONS: [f32; 24] = [
    // left pair
    -0.8, -0.4, 0.0,
    -0.2, -0.4, 0.0,
    -0.2,  0.4, 0.0,
    -0.8,  0.4, 0.0,
    // right pair
     0.2, -0.4, 0.0,
     0.8, -0.4, 0.0,
     0.8,  0.4, 0.0,
     0.2,  0.4, 0.0,
];

#[rustfmt::skip]
pub const INDICES: [u32; 12] = [
    0, 1, 2,
    2, 3, 0,
    4, 5, 6,
    6, 7, 4,
];

#[rustfmt::skip]
pub const COLORS: [f32; 24] = [
    1.0, 0.0, 0.0,
    0.0, 1.0, 0.0,
    0.0, 0.0, 1.0,
    1.0, 1.0, 0.0,
    0.0, 1.0, 1.0,
    1.0, 0.0, 1.0,
    1.0, 1.0, 1.0,
    1.0, 0.5, 0.0,
];

/// Builds `[x y z r g b]` vertices.
///
/// Panics if either slice has a partial vertex or both slices don't describe
/// the same number of vertices.
pub fn interleave(positions: &[f32], colors: &[f32]) -> Vec<f32> {
    assert_eq!(positions.len() % POSITION_SIZE, 0, "partial position");
    assert_eq!(colors.len() % COLOR_SIZE, 0, "partial color");
    assert_eq!(
        positions.len() / POSITION_SIZE,
        colors.len() / COLOR_SIZE,
        "vertex count mismatch"
    );

    positions
        .chunks_exact(POSITION_SIZE)
        .zip(colors.chunks_exact(COLOR_SIZE))
        .flat_map(|(p, c)| p.iter().chain(c).copied())
        .collect()
}
