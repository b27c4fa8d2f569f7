//! Marching cubes lookup tables.
//!
//! Cube corner `c` sits at `CORNER_OFFSETS[c]` relative to the cube's lowest
//! grid point. Bit `c` of a case index is set when corner `c` is inside.
//! Triangles are listed as cube edges, wound counter-clockwise seen from the
//! outside. On ambiguous faces the inside corners are kept apart, so
//! neighbouring cubes always agree on the shared face.

/// Grid offsets of the eight cube corners.
pub const CORNER_OFFSETS: [[usize; 3]; 8] = [
    [0, 0, 0],
    [1, 0, 0],
    [1, 1, 0],
    [0, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [1, 1, 1],
    [0, 1, 1],
];

/// Corner pairs joined by each of the twelve cube edges.
pub const EDGE_CORNERS: [[usize; 2]; 12] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [4, 5],
    [5, 6],
    [6, 7],
    [7, 4],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

/// Triangles per case, at most five.
#[rustfmt::skip]
pub const TRIANGLE_TABLE: [&[[usize; 3]]; 256] = [
    &[],
    &[[0, 3, 8]],
    &[[0, 9, 1]],
    &[[1, 8, 9], [1, 3, 8]],
    &[[1, 10, 2]],
    &[[0, 3, 8], [1, 10, 2]],
    &[[0, 10, 2], [0, 9, 10]],
    &[[2, 9, 10], [2, 8, 9], [2, 3, 8]],
    &[[2, 11, 3]],
    &[[0, 11, 8], [0, 2, 11]],
    &[[0, 9, 1], [2, 11, 3]],
    &[[1, 8, 9], [1, 11, 8], [1, 2, 11]],
    &[[1, 11, 3], [1, 10, 11]],
    &[[0, 11, 8], [0, 10, 11], [0, 1, 10]],
    &[[0, 11, 3], [0, 10, 11], [0, 9, 10]],
    &[[8, 10, 11], [8, 9, 10]],
    &[[4, 8, 7]],
    &[[0, 7, 4], [0, 3, 7]],
    &[[0, 9, 1], [4, 8, 7]],
    &[[1, 4, 9], [1, 7, 4], [1, 3, 7]],
    &[[1, 10, 2], [4, 8, 7]],
    &[[0, 7, 4], [0, 3, 7], [1, 10, 2]],
    &[[0, 10, 2], [0, 9, 10], [4, 8, 7]],
    &[[2, 9, 10], [2, 4, 9], [2, 7, 4], [2, 3, 7]],
    &[[2, 11, 3], [4, 8, 7]],
    &[[0, 7, 4], [0, 11, 7], [0, 2, 11]],
    &[[0, 9, 1], [2, 11, 3], [4, 8, 7]],
    &[[1, 4, 9], [1, 7, 4], [1, 11, 7], [1, 2, 11]],
    &[[1, 11, 3], [1, 10, 11], [4, 8, 7]],
    &[[0, 7, 4], [0, 11, 7], [0, 10, 11], [0, 1, 10]],
    &[[0, 11, 3], [0, 10, 11], [0, 9, 10], [4, 8, 7]],
    &[[4, 11, 7], [4, 10, 11], [4, 9, 10]],
    &[[4, 5, 9]],
    &[[0, 3, 8], [4, 5, 9]],
    &[[0, 5, 1], [0, 4, 5]],
    &[[1, 4, 5], [1, 8, 4], [1, 3, 8]],
    &[[1, 10, 2], [4, 5, 9]],
    &[[0, 3, 8], [1, 10, 2], [4, 5, 9]],
    &[[0, 10, 2], [0, 5, 10], [0, 4, 5]],
    &[[2, 5, 10], [2, 4, 5], [2, 8, 4], [2, 3, 8]],
    &[[2, 11, 3], [4, 5, 9]],
    &[[0, 11, 8], [0, 2, 11], [4, 5, 9]],
    &[[0, 5, 1], [0, 4, 5], [2, 11, 3]],
    &[[1, 4, 5], [1, 8, 4], [1, 11, 8], [1, 2, 11]],
    &[[1, 11, 3], [1, 10, 11], [4, 5, 9]],
    &[[0, 11, 8], [0, 10, 11], [0, 1, 10], [4, 5, 9]],
    &[[0, 11, 3], [0, 10, 11], [0, 5, 10], [0, 4, 5]],
    &[[4, 11, 8], [4, 10, 11], [4, 5, 10]],
    &[[5, 8, 7], [5, 9, 8]],
    &[[0, 5, 9], [0, 7, 5], [0, 3, 7]],
    &[[0, 5, 1], [0, 7, 5], [0, 8, 7]],
    &[[1, 7, 5], [1, 3, 7]],
    &[[1, 10, 2], [5, 8, 7], [5, 9, 8]],
    &[[0, 5, 9], [0, 7, 5], [0, 3, 7], [1, 10, 2]],
    &[[0, 10, 2], [0, 5, 10], [0, 7, 5], [0, 8, 7]],
    &[[2, 5, 10], [2, 7, 5], [2, 3, 7]],
    &[[2, 11, 3], [5, 8, 7], [5, 9, 8]],
    &[[0, 5, 9], [0, 7, 5], [0, 11, 7], [0, 2, 11]],
    &[[0, 5, 1], [0, 7, 5], [0, 8, 7], [2, 11, 3]],
    &[[1, 7, 5], [1, 11, 7], [1, 2, 11]],
    &[[1, 11, 3], [1, 10, 11], [5, 8, 7], [5, 9, 8]],
    &[[0, 5, 9], [0, 7, 5], [0, 11, 7], [0, 10, 11], [0, 1, 10]],
    &[[0, 11, 3], [0, 10, 11], [0, 5, 10], [0, 7, 5], [0, 8, 7]],
    &[[5, 11, 7], [5, 10, 11]],
    &[[5, 6, 10]],
    &[[0, 3, 8], [5, 6, 10]],
    &[[0, 9, 1], [5, 6, 10]],
    &[[1, 8, 9], [1, 3, 8], [5, 6, 10]],
    &[[1, 6, 2], [1, 5, 6]],
    &[[0, 3, 8], [1, 6, 2], [1, 5, 6]],
    &[[0, 6, 2], [0, 5, 6], [0, 9, 5]],
    &[[2, 5, 6], [2, 9, 5], [2, 8, 9], [2, 3, 8]],
    &[[2, 11, 3], [5, 6, 10]],
    &[[0, 11, 8], [0, 2, 11], [5, 6, 10]],
    &[[0, 9, 1], [2, 11, 3], [5, 6, 10]],
    &[[1, 8, 9], [1, 11, 8], [1, 2, 11], [5, 6, 10]],
    &[[1, 11, 3], [1, 6, 11], [1, 5, 6]],
    &[[0, 11, 8], [0, 6, 11], [0, 5, 6], [0, 1, 5]],
    &[[0, 11, 3], [0, 6, 11], [0, 5, 6], [0, 9, 5]],
    &[[5, 8, 9], [5, 11, 8], [5, 6, 11]],
    &[[4, 8, 7], [5, 6, 10]],
    &[[0, 7, 4], [0, 3, 7], [5, 6, 10]],
    &[[0, 9, 1], [4, 8, 7], [5, 6, 10]],
    &[[1, 4, 9], [1, 7, 4], [1, 3, 7], [5, 6, 10]],
    &[[1, 6, 2], [1, 5, 6], [4, 8, 7]],
    &[[0, 7, 4], [0, 3, 7], [1, 6, 2], [1, 5, 6]],
    &[[0, 6, 2], [0, 5, 6], [0, 9, 5], [4, 8, 7]],
    &[[2, 5, 6], [2, 9, 5], [2, 4, 9], [2, 7, 4], [2, 3, 7]],
    &[[2, 11, 3], [4, 8, 7], [5, 6, 10]],
    &[[0, 7, 4], [0, 11, 7], [0, 2, 11], [5, 6, 10]],
    &[[0, 9, 1], [2, 11, 3], [4, 8, 7], [5, 6, 10]],
    &[[1, 4, 9], [1, 7, 4], [1, 11, 7], [1, 2, 11], [5, 6, 10]],
    &[[1, 11, 3], [1, 6, 11], [1, 5, 6], [4, 8, 7]],
    &[[0, 7, 4], [0, 11, 7], [0, 6, 11], [0, 5, 6], [0, 1, 5]],
    &[[0, 11, 3], [0, 6, 11], [0, 5, 6], [0, 9, 5], [4, 8, 7]],
    &[[11, 5, 6], [11, 9, 5], [11, 4, 9], [11, 7, 4]],
    &[[4, 10, 9], [4, 6, 10]],
    &[[0, 3, 8], [4, 10, 9], [4, 6, 10]],
    &[[0, 10, 1], [0, 6, 10], [0, 4, 6]],
    &[[1, 6, 10], [1, 4, 6], [1, 8, 4], [1, 3, 8]],
    &[[1, 6, 2], [1, 4, 6], [1, 9, 4]],
    &[[0, 3, 8], [1, 6, 2], [1, 4, 6], [1, 9, 4]],
    &[[0, 6, 2], [0, 4, 6]],
    &[[2, 4, 6], [2, 8, 4], [2, 3, 8]],
    &[[2, 11, 3], [4, 10, 9], [4, 6, 10]],
    &[[0, 11, 8], [0, 2, 11], [4, 10, 9], [4, 6, 10]],
    &[[0, 10, 1], [0, 6, 10], [0, 4, 6], [2, 11, 3]],
    &[[1, 6, 10], [1, 4, 6], [1, 8, 4], [1, 11, 8], [1, 2, 11]],
    &[[1, 11, 3], [1, 6, 11], [1, 4, 6], [1, 9, 4]],
    &[[11, 4, 6], [11, 9, 4], [11, 1, 9], [11, 0, 1], [11, 8, 0]],
    &[[0, 11, 3], [0, 6, 11], [0, 4, 6]],
    &[[4, 11, 8], [4, 6, 11]],
    &[[6, 8, 7], [6, 9, 8], [6, 10, 9]],
    &[[0, 10, 9], [0, 6, 10], [0, 7, 6], [0, 3, 7]],
    &[[0, 10, 1], [0, 6, 10], [0, 7, 6], [0, 8, 7]],
    &[[1, 6, 10], [1, 7, 6], [1, 3, 7]],
    &[[1, 6, 2], [1, 7, 6], [1, 8, 7], [1, 9, 8]],
    &[[9, 2, 1], [9, 6, 2], [9, 7, 6], [9, 3, 7], [9, 0, 3]],
    &[[0, 6, 2], [0, 7, 6], [0, 8, 7]],
    &[[2, 7, 6], [2, 3, 7]],
    &[[2, 11, 3], [6, 8, 7], [6, 9, 8], [6, 10, 9]],
    &[[0, 10, 9], [0, 6, 10], [0, 7, 6], [0, 11, 7], [0, 2, 11]],
    &[[0, 10, 1], [0, 6, 10], [0, 7, 6], [0, 8, 7], [2, 11, 3]],
    &[[1, 6, 10], [1, 7, 6], [1, 11, 7], [1, 2, 11]],
    &[[1, 11, 3], [1, 6, 11], [1, 7, 6], [1, 8, 7], [1, 9, 8]],
    &[[0, 1, 9], [6, 11, 7]],
    &[[0, 11, 3], [0, 6, 11], [0, 7, 6], [0, 8, 7]],
    &[[6, 11, 7]],
    &[[6, 7, 11]],
    &[[0, 3, 8], [6, 7, 11]],
    &[[0, 9, 1], [6, 7, 11]],
    &[[1, 8, 9], [1, 3, 8], [6, 7, 11]],
    &[[1, 10, 2], [6, 7, 11]],
    &[[0, 3, 8], [1, 10, 2], [6, 7, 11]],
    &[[0, 10, 2], [0, 9, 10], [6, 7, 11]],
    &[[2, 9, 10], [2, 8, 9], [2, 3, 8], [6, 7, 11]],
    &[[2, 7, 3], [2, 6, 7]],
    &[[0, 7, 8], [0, 6, 7], [0, 2, 6]],
    &[[0, 9, 1], [2, 7, 3], [2, 6, 7]],
    &[[1, 8, 9], [1, 7, 8], [1, 6, 7], [1, 2, 6]],
    &[[1, 7, 3], [1, 6, 7], [1, 10, 6]],
    &[[0, 7, 8], [0, 6, 7], [0, 10, 6], [0, 1, 10]],
    &[[0, 7, 3], [0, 6, 7], [0, 10, 6], [0, 9, 10]],
    &[[6, 9, 10], [6, 8, 9], [6, 7, 8]],
    &[[4, 11, 6], [4, 8, 11]],
    &[[0, 6, 4], [0, 11, 6], [0, 3, 11]],
    &[[0, 9, 1], [4, 11, 6], [4, 8, 11]],
    &[[1, 4, 9], [1, 6, 4], [1, 11, 6], [1, 3, 11]],
    &[[1, 10, 2], [4, 11, 6], [4, 8, 11]],
    &[[0, 6, 4], [0, 11, 6], [0, 3, 11], [1, 10, 2]],
    &[[0, 10, 2], [0, 9, 10], [4, 11, 6], [4, 8, 11]],
    &[[9, 6, 4], [9, 11, 6], [9, 3, 11], [9, 2, 3], [9, 10, 2]],
    &[[2, 8, 3], [2, 4, 8], [2, 6, 4]],
    &[[0, 6, 4], [0, 2, 6]],
    &[[0, 9, 1], [2, 8, 3], [2, 4, 8], [2, 6, 4]],
    &[[1, 4, 9], [1, 6, 4], [1, 2, 6]],
    &[[1, 8, 3], [1, 4, 8], [1, 6, 4], [1, 10, 6]],
    &[[0, 6, 4], [0, 10, 6], [0, 1, 10]],
    &[[3, 4, 8], [3, 6, 4], [3, 10, 6], [3, 9, 10], [3, 0, 9]],
    &[[4, 10, 6], [4, 9, 10]],
    &[[4, 5, 9], [6, 7, 11]],
    &[[0, 3, 8], [4, 5, 9], [6, 7, 11]],
    &[[0, 5, 1], [0, 4, 5], [6, 7, 11]],
    &[[1, 4, 5], [1, 8, 4], [1, 3, 8], [6, 7, 11]],
    &[[1, 10, 2], [4, 5, 9], [6, 7, 11]],
    &[[0, 3, 8], [1, 10, 2], [4, 5, 9], [6, 7, 11]],
    &[[0, 10, 2], [0, 5, 10], [0, 4, 5], [6, 7, 11]],
    &[[2, 5, 10], [2, 4, 5], [2, 8, 4], [2, 3, 8], [6, 7, 11]],
    &[[2, 7, 3], [2, 6, 7], [4, 5, 9]],
    &[[0, 7, 8], [0, 6, 7], [0, 2, 6], [4, 5, 9]],
    &[[0, 5, 1], [0, 4, 5], [2, 7, 3], [2, 6, 7]],
    &[[1, 4, 5], [1, 8, 4], [1, 7, 8], [1, 6, 7], [1, 2, 6]],
    &[[1, 7, 3], [1, 6, 7], [1, 10, 6], [4, 5, 9]],
    &[[0, 7, 8], [0, 6, 7], [0, 10, 6], [0, 1, 10], [4, 5, 9]],
    &[[0, 7, 3], [0, 6, 7], [0, 10, 6], [0, 5, 10], [0, 4, 5]],
    &[[8, 6, 7], [8, 10, 6], [8, 5, 10], [8, 4, 5]],
    &[[5, 11, 6], [5, 8, 11], [5, 9, 8]],
    &[[0, 5, 9], [0, 6, 5], [0, 11, 6], [0, 3, 11]],
    &[[0, 5, 1], [0, 6, 5], [0, 11, 6], [0, 8, 11]],
    &[[1, 6, 5], [1, 11, 6], [1, 3, 11]],
    &[[1, 10, 2], [5, 11, 6], [5, 8, 11], [5, 9, 8]],
    &[[0, 5, 9], [0, 6, 5], [0, 11, 6], [0, 3, 11], [1, 10, 2]],
    &[[0, 10, 2], [0, 5, 10], [0, 6, 5], [0, 11, 6], [0, 8, 11]],
    &[[5, 11, 6], [5, 3, 11], [5, 2, 3], [5, 10, 2]],
    &[[2, 8, 3], [2, 9, 8], [2, 5, 9], [2, 6, 5]],
    &[[0, 5, 9], [0, 6, 5], [0, 2, 6]],
    &[[5, 2, 6], [5, 3, 2], [5, 8, 3], [5, 0, 8], [5, 1, 0]],
    &[[1, 6, 5], [1, 2, 6]],
    &[[3, 9, 8], [3, 5, 9], [3, 6, 5], [3, 10, 6], [3, 1, 10]],
    &[[0, 5, 9], [0, 6, 5], [0, 10, 6], [0, 1, 10]],
    &[[0, 8, 3], [5, 10, 6]],
    &[[5, 10, 6]],
    &[[5, 11, 10], [5, 7, 11]],
    &[[0, 3, 8], [5, 11, 10], [5, 7, 11]],
    &[[0, 9, 1], [5, 11, 10], [5, 7, 11]],
    &[[1, 8, 9], [1, 3, 8], [5, 11, 10], [5, 7, 11]],
    &[[1, 11, 2], [1, 7, 11], [1, 5, 7]],
    &[[0, 3, 8], [1, 11, 2], [1, 7, 11], [1, 5, 7]],
    &[[0, 11, 2], [0, 7, 11], [0, 5, 7], [0, 9, 5]],
    &[[2, 7, 11], [2, 5, 7], [2, 9, 5], [2, 8, 9], [2, 3, 8]],
    &[[2, 7, 3], [2, 5, 7], [2, 10, 5]],
    &[[0, 7, 8], [0, 5, 7], [0, 10, 5], [0, 2, 10]],
    &[[0, 9, 1], [2, 7, 3], [2, 5, 7], [2, 10, 5]],
    &[[8, 5, 7], [8, 10, 5], [8, 2, 10], [8, 1, 2], [8, 9, 1]],
    &[[1, 7, 3], [1, 5, 7]],
    &[[0, 7, 8], [0, 5, 7], [0, 1, 5]],
    &[[0, 7, 3], [0, 5, 7], [0, 9, 5]],
    &[[5, 8, 9], [5, 7, 8]],
    &[[4, 10, 5], [4, 11, 10], [4, 8, 11]],
    &[[0, 5, 4], [0, 10, 5], [0, 11, 10], [0, 3, 11]],
    &[[0, 9, 1], [4, 10, 5], [4, 11, 10], [4, 8, 11]],
    &[[4, 10, 5], [4, 11, 10], [4, 3, 11], [4, 1, 3], [4, 9, 1]],
    &[[1, 11, 2], [1, 8, 11], [1, 4, 8], [1, 5, 4]],
    &[[4, 1, 5], [4, 2, 1], [4, 11, 2], [4, 3, 11], [4, 0, 3]],
    &[[2, 8, 11], [2, 4, 8], [2, 5, 4], [2, 9, 5], [2, 0, 9]],
    &[[2, 3, 11], [4, 9, 5]],
    &[[2, 8, 3], [2, 4, 8], [2, 5, 4], [2, 10, 5]],
    &[[0, 5, 4], [0, 10, 5], [0, 2, 10]],
    &[[0, 9, 1], [2, 8, 3], [2, 4, 8], [2, 5, 4], [2, 10, 5]],
    &[[4, 10, 5], [4, 2, 10], [4, 1, 2], [4, 9, 1]],
    &[[1, 8, 3], [1, 4, 8], [1, 5, 4]],
    &[[0, 5, 4], [0, 1, 5]],
    &[[3, 4, 8], [3, 5, 4], [3, 9, 5], [3, 0, 9]],
    &[[4, 9, 5]],
    &[[4, 10, 9], [4, 11, 10], [4, 7, 11]],
    &[[0, 3, 8], [4, 10, 9], [4, 11, 10], [4, 7, 11]],
    &[[0, 10, 1], [0, 11, 10], [0, 7, 11], [0, 4, 7]],
    &[[1, 11, 10], [1, 7, 11], [1, 4, 7], [1, 8, 4], [1, 3, 8]],
    &[[1, 11, 2], [1, 7, 11], [1, 4, 7], [1, 9, 4]],
    &[[0, 3, 8], [1, 11, 2], [1, 7, 11], [1, 4, 7], [1, 9, 4]],
    &[[0, 11, 2], [0, 7, 11], [0, 4, 7]],
    &[[2, 7, 11], [2, 4, 7], [2, 8, 4], [2, 3, 8]],
    &[[2, 7, 3], [2, 4, 7], [2, 9, 4], [2, 10, 9]],
    &[[7, 9, 4], [7, 10, 9], [7, 2, 10], [7, 0, 2], [7, 8, 0]],
    &[[10, 3, 2], [10, 7, 3], [10, 4, 7], [10, 0, 4], [10, 1, 0]],
    &[[1, 2, 10], [4, 7, 8]],
    &[[1, 7, 3], [1, 4, 7], [1, 9, 4]],
    &[[7, 9, 4], [7, 1, 9], [7, 0, 1], [7, 8, 0]],
    &[[0, 7, 3], [0, 4, 7]],
    &[[4, 7, 8]],
    &[[8, 10, 9], [8, 11, 10]],
    &[[0, 10, 9], [0, 11, 10], [0, 3, 11]],
    &[[0, 10, 1], [0, 11, 10], [0, 8, 11]],
    &[[1, 11, 10], [1, 3, 11]],
    &[[1, 11, 2], [1, 8, 11], [1, 9, 8]],
    &[[9, 2, 1], [9, 11, 2], [9, 3, 11], [9, 0, 3]],
    &[[0, 11, 2], [0, 8, 11]],
    &[[2, 3, 11]],
    &[[2, 8, 3], [2, 9, 8], [2, 10, 9]],
    &[[0, 10, 9], [0, 2, 10]],
    &[[10, 3, 2], [10, 8, 3], [10, 0, 8], [10, 1, 0]],
    &[[1, 2, 10]],
    &[[1, 8, 3], [1, 9, 8]],
    &[[0, 1, 9]],
    &[[0, 8, 3]],
    &[],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complementary_cases_are_empty() {
        assert!(TRIANGLE_TABLE[0].is_empty());
        assert!(TRIANGLE_TABLE[255].is_empty());
    }

    #[test]
    fn every_mixed_case_has_triangles() {
        for case in 1..255 {
            let tris = TRIANGLE_TABLE[case];
            assert!(!tris.is_empty(), "case {case}");
            assert!(tris.len() <= 5, "case {case}");
        }
    }

    #[test]
    fn triangles_only_use_crossed_edges() {
        for (case, tris) in TRIANGLE_TABLE.iter().enumerate() {
            for &edge in tris.iter().flatten() {
                let [a, b] = EDGE_CORNERS[edge];
                let inside_a = case & (1 << a) != 0;
                let inside_b = case & (1 << b) != 0;
                assert_ne!(inside_a, inside_b, "case {case} edge {edge}");
            }
        }
    }

    #[test]
    fn edges_join_adjacent_corners() {
        for [a, b] in EDGE_CORNERS {
            let differing = (0..3)
                .filter(|&axis| CORNER_OFFSETS[a][axis] != CORNER_OFFSETS[b][axis])
                .count();
            assert_eq!(differing, 1);
        }
    }

    #[test]
    fn each_crossed_edge_is_used() {
        for (case, tris) in TRIANGLE_TABLE.iter().enumerate() {
            for (edge, [a, b]) in EDGE_CORNERS.iter().enumerate() {
                let crossed = ((case >> a) & 1) != ((case >> b) & 1);
                let used = tris.iter().flatten().any(|&e| e == edge);
                assert_eq!(crossed, used, "case {case} edge {edge}");
            }
        }
    }
}
