//! # Bridge and Cap Engine
//!
//! Stitches point sequences into surfaces:
//!
//! - [`fan`]: closes a ring to a single apex
//! - [`bridge_soft`]: quad strip with shared vertices and averaged normals
//! - [`bridge_hard`]: quad strip with per-quad vertices and flat normals
//! - [`bridge_chain`]: hard bridges between consecutive sides, combined
//!
//! ## Orientation
//!
//! For a bridge from side A to side B, the unflipped face normal is
//! `tangent × (B - A)`, where `tangent` runs along the sides. A ring that
//! runs counter-clockwise around an axis, bridged to a copy of itself moved
//! along that axis, faces away from the axis. Vertex normals follow the
//! winding; `flip_normals` negates them on top of that.
//!
//! UVs: `uv.x` is 0 on side A and 1 on side B, `uv.y` runs from 0 to 1
//! along the sides.


use glam::{DVec2, DVec3};

use crate::math::{fraction, polygon_normal};
use crate::mesh::MeshBuffer;
use crate::ops::combine;
use crate::triangulate::triangulate;

/// Closes a ring of points to an apex with a triangle fan.
///
/// Vertex 0 is the apex; ring point `i` is vertex `i + 1`. Builds
/// `ring.len() - 1` triangles, or `ring.len()` when `close_loop` also
/// connects the last point back to the first. Rings of fewer than three
/// points never get the closing triangle, which would repeat the only
/// other triangle with reversed winding.
///
/// # Arguments
///
/// * `ring` - Points around the apex
/// * `apex` - Shared fan center
/// * `uv` - Apex texture coordinate; ring points share its `x`, with `y`
///   running along the ring
/// * `normal` - Normal for every vertex; `None` uses the ring's polygon
///   normal, oriented with the winding
/// * `close_loop` - Add the closing triangle (rings of three or more points)
/// * `flip` - Reverse the winding
pub fn fan(
    ring: &[DVec3],
    apex: DVec3,
    uv: DVec2,
    normal: Option<DVec3>,
    close_loop: bool,
    flip: bool,
) -> MeshBuffer {
    let normal = normal.unwrap_or_else(|| {
        let n = polygon_normal(ring).normalize_or_zero();
        if flip {
            -n
        } else {
            n
        }
    });

    let mut mesh = MeshBuffer::with_capacity(ring.len() + 1, ring.len() * 3);
    mesh.push_vertex(apex, normal, uv);
    for (i, p) in ring.iter().enumerate() {
        mesh.push_vertex(*p, normal, DVec2::new(uv.x, fraction(i, ring.len())));
    }

    let n = ring.len() as u32;
    let mut push = |a: u32, b: u32| {
        if flip {
            mesh.triangles.extend_from_slice(&[0, b, a]);
        } else {
            mesh.triangles.extend_from_slice(&[0, a, b]);
        }
    };
    for i in 1..n {
        push(i, i + 1);
    }
    if close_loop && n > 2 {
        push(n, 1);
    }

    mesh
}

/// Builds a smooth-shaded quad strip between two point sequences.
///
/// Both sides share vertices between neighboring quads. Each vertex normal
/// averages the face normals on either side of it; the ends of an open
/// strip use the single adjacent face. In `looped` mode the first point of
/// each side is repeated at the end to close the strip with an explicit UV
/// seam. Sides of unequal length are truncated to the shorter one.
///
/// # Example
///
/// ```rust
/// use mesh_synth::ops::bridge_soft;
/// use glam::DVec3;
///
/// let a = [DVec3::ZERO, DVec3::Y, DVec3::new(0.0, 2.0, 0.0)];
/// let b = a.map(|p| p + DVec3::X);
/// let strip = bridge_soft(&a, &b, false, false, false);
/// assert_eq!(strip.vertex_count(), 6);
/// assert_eq!(strip.triangle_count(), 4);
/// ```
pub fn bridge_soft(
    side_a: &[DVec3],
    side_b: &[DVec3],
    looped: bool,
    flip_orientation: bool,
    flip_normals: bool,
) -> MeshBuffer {
    let len = side_a.len().min(side_b.len());
    let (a, b) = (&side_a[..len], &side_b[..len]);
    let count = if looped && len > 0 { len + 1 } else { len };
    let sign = normal_sign(flip_orientation, flip_normals);

    let mut mesh = MeshBuffer::with_capacity(2 * count, 0);
    for (u, side) in [(0.0, a), (1.0, b)] {
        for i in 0..count {
            let normal = soft_normal(a, b, side, i % len, looped) * sign;
            mesh.push_vertex(side[i % len], normal, DVec2::new(u, fraction(i, count)));
        }
    }
    mesh.triangles = triangulate(2, count, flip_orientation);
    mesh
}

/// Builds a flat-shaded quad strip between two point sequences.
///
/// Every quad owns four vertices (`a_i, a_i+1, b_i, b_i+1`) sharing its
/// face normal, so edges between quads stay hard. In `looped` mode a final
/// quad connects the last points back to the first. Sides of unequal
/// length are truncated to the shorter one.
pub fn bridge_hard(
    side_a: &[DVec3],
    side_b: &[DVec3],
    looped: bool,
    flip_orientation: bool,
    flip_normals: bool,
) -> MeshBuffer {
    let len = side_a.len().min(side_b.len());
    let quads = match len {
        0 | 1 => 0,
        _ if looped => len,
        _ => len - 1,
    };
    let sign = normal_sign(flip_orientation, flip_normals);
    let cell = triangulate(2, 2, flip_orientation);

    let mut mesh = MeshBuffer::with_capacity(4 * quads, 6 * quads);
    for i in 0..quads {
        let j = (i + 1) % len;
        let (a0, a1, b0, b1) = (side_a[i], side_a[j], side_b[i], side_b[j]);
        let normal = quad_normal(a0, a1, b0, b1) * sign;
        let (v0, v1) = (fraction(i, quads + 1), fraction(i + 1, quads + 1));

        let base = mesh.vertex_count() as u32;
        mesh.push_vertex(a0, normal, DVec2::new(0.0, v0));
        mesh.push_vertex(a1, normal, DVec2::new(0.0, v1));
        mesh.push_vertex(b0, normal, DVec2::new(1.0, v0));
        mesh.push_vertex(b1, normal, DVec2::new(1.0, v1));
        mesh.extend_triangles(&cell, base);
    }
    mesh
}

/// Hard-bridges each pair of consecutive sides and combines the strips.
///
/// `uv.x` is spread over the whole chain: strip `k` covers
/// `[k / (n - 1), (k + 1) / (n - 1)]` for `n` sides.
pub fn bridge_chain<S: AsRef<[DVec3]>>(
    sides: &[S],
    flip_orientation: bool,
    flip_normals: bool,
) -> MeshBuffer {
    let spans = sides.len().saturating_sub(1);
    let mut mesh = MeshBuffer::new();

    for (k, pair) in sides.windows(2).enumerate() {
        let mut strip = bridge_hard(
            pair[0].as_ref(),
            pair[1].as_ref(),
            false,
            flip_orientation,
            flip_normals,
        );
        for uv in &mut strip.uvs[0] {
            uv.x = (k as f64 + uv.x) / spans as f64;
        }
        combine(&mut mesh, &strip);
    }

    mesh
}

/// `-1` when exactly one of the flags is set.
fn normal_sign(flip_orientation: bool, flip_normals: bool) -> f64 {
    if flip_orientation != flip_normals {
        -1.0
    } else {
        1.0
    }
}

/// Averaged normal at point `i` of `side`, for a bridge from `a` to `b`.
fn soft_normal(a: &[DVec3], b: &[DVec3], side: &[DVec3], i: usize, looped: bool) -> DVec3 {
    let len = side.len();
    let across = b[i] - a[i];

    let prev = if i > 0 {
        Some(i - 1)
    } else if looped {
        Some(len - 1)
    } else {
        None
    };
    let next = if i + 1 < len {
        Some(i + 1)
    } else if looped {
        Some(0)
    } else {
        None
    };

    let mut normal = DVec3::ZERO;
    if let Some(p) = prev {
        normal += (side[i] - side[p]).cross(across).normalize_or_zero();
    }
    if let Some(n) = next {
        normal += (side[n] - side[i]).cross(across).normalize_or_zero();
    }
    normal.normalize_or_zero()
}

/// Face normal of the quad `a0, a1, b1, b0`, from whichever of its two
/// triangles is not degenerate.
fn quad_normal(a0: DVec3, a1: DVec3, b0: DVec3, b1: DVec3) -> DVec3 {
    (a1 - a0)
        .cross(b0 - a0)
        .try_normalize()
        .or_else(|| (b1 - a1).cross(b0 - a1).try_normalize())
        .unwrap_or(DVec3::ZERO)
}
