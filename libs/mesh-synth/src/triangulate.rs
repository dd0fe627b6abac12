//! # Grid Triangulation
//!
//! Shared index scheme for every ring-stacked surface.
//!
//! The vertex buffer is ring-major: outer index `x` in `0..width` selects a
//! ring, inner index `y` in `0..length` selects a sample on that ring, and
//! the flat index is `x * length + y`. Each grid cell becomes two triangles.
//!
//! ## Winding
//!
//! Without `flip`, the face normal of a cell is `d_inner × d_outer`: for rings
//! that run counter-clockwise around an axis and are stacked along that
//! axis, faces point away from the axis. This is the single source of truth
//! for "front-facing" in the crate.

/// Triangulates a `width × length` ring grid.
///
/// Returns `2 * (width - 1) * (length - 1)` triangles; dimensions below two
/// yield an empty list. `flip` swaps the last two indices of every triangle.
///
/// # Example
///
/// ```rust
/// use mesh_synth::triangulate;
///
/// let indices = triangulate(2, 2, false);
/// assert_eq!(indices, vec![0, 1, 2, 2, 1, 3]);
/// ```
pub fn triangulate(width: usize, length: usize, flip: bool) -> Vec<u32> {
    if width < 2 || length < 2 {
        return Vec::new();
    }

    let mut indices = Vec::with_capacity((width - 1) * (length - 1) * 6);

    for x in 0..width - 1 {
        for y in 0..length - 1 {
            let i0 = (x * length + y) as u32;
            let i1 = ((x + 1) * length + y) as u32;
            let i2 = i0 + 1;
            let i3 = i1 + 1;

            if flip {
                indices.extend_from_slice(&[i0, i1, i2, i1, i3, i2]);
            } else {
                indices.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
            }
        }
    }

    indices
}
