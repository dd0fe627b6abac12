//! # Mesh Buffer
//!
//! CPU-side structure-of-arrays mesh: positions, normals, up to
//! [`UV_CHANNEL_COUNT`] UV channels, vertex colors and a flat triangle list.
//!
//! Every non-empty attribute channel has exactly one entry per position and
//! every triangle index is below the position count. Buffers assembled by
//! callers go through [`MeshBuffer::from_parts`], which rejects anything else.

use config::constants::{DEGENERATE_AREA_EPSILON, UV_CHANNEL_COUNT};
use glam::{DMat4, DQuat, DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::error::MeshError;

/// RGBA vertex color, f32 for GPU upload.
pub type Color = [f32; 4];

/// Channel names used in error reports.
const UV_CHANNEL_NAMES: [&str; UV_CHANNEL_COUNT] = ["uv0", "uv1", "uv2"];

/// A triangle mesh stored as parallel attribute arrays.
///
/// All geometry is f64. Export to f32 only happens through the
/// `*_f32` helpers at the upload boundary.
///
/// # Example
///
/// ```rust
/// use mesh_synth::{MeshBuffer, MeshParts};
/// use glam::DVec3;
///
/// let mesh = MeshBuffer::from_parts(MeshParts {
///     positions: vec![DVec3::ZERO, DVec3::X, DVec3::Y],
///     triangles: vec![0, 1, 2],
///     ..Default::default()
/// })
/// .unwrap();
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MeshBuffer {
    pub(crate) positions: Vec<DVec3>,
    pub(crate) normals: Vec<DVec3>,
    pub(crate) uvs: [Vec<DVec2>; UV_CHANNEL_COUNT],
    pub(crate) colors: Vec<Color>,
    pub(crate) triangles: Vec<u32>,
}

/// Unchecked buffer contents, used to hand data in and out of a
/// [`MeshBuffer`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshParts {
    /// Vertex positions
    pub positions: Vec<DVec3>,
    /// Vertex normals (empty or one per position)
    pub normals: Vec<DVec3>,
    /// UV channels (each empty or one per position)
    pub uvs: [Vec<DVec2>; UV_CHANNEL_COUNT],
    /// Vertex colors (empty or one per position)
    pub colors: Vec<Color>,
    /// Flat triangle index list
    pub triangles: Vec<u32>,
}

impl MeshBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer with pre-allocated position, normal and uv0 capacity.
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        let mut mesh = Self::new();
        mesh.positions.reserve(vertex_count);
        mesh.normals.reserve(vertex_count);
        mesh.uvs[0].reserve(vertex_count);
        mesh.triangles.reserve(index_count);
        mesh
    }

    /// Builds a buffer from raw parts, enforcing the channel invariant.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError`] when a non-empty channel does not match the
    /// position count, the triangle list is not a multiple of three, or an
    /// index is out of range.
    pub fn from_parts(parts: MeshParts) -> Result<Self, MeshError> {
        let mesh = Self {
            positions: parts.positions,
            normals: parts.normals,
            uvs: parts.uvs,
            colors: parts.colors,
            triangles: parts.triangles,
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Consumes the buffer and returns its raw parts.
    pub fn into_parts(self) -> MeshParts {
        MeshParts {
            positions: self.positions,
            normals: self.normals,
            uvs: self.uvs,
            colors: self.colors,
            triangles: self.triangles,
        }
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Returns true if the buffer has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Vertex positions.
    #[inline]
    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    /// Vertex normals, empty when the channel is absent.
    #[inline]
    pub fn normals(&self) -> &[DVec3] {
        &self.normals
    }

    /// UV channel `channel`, empty when absent or out of range.
    #[inline]
    pub fn uv(&self, channel: usize) -> &[DVec2] {
        match self.uvs.get(channel) {
            Some(uv) => uv,
            None => &[],
        }
    }

    /// Vertex colors, empty when the channel is absent.
    #[inline]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Flat triangle index list.
    #[inline]
    pub fn triangles(&self) -> &[u32] {
        &self.triangles
    }

    /// Returns triangle `index` as an index triple.
    #[inline]
    pub fn triangle(&self, index: usize) -> [u32; 3] {
        let base = index * 3;
        [
            self.triangles[base],
            self.triangles[base + 1],
            self.triangles[base + 2],
        ]
    }

    /// Returns true if the normal channel is populated.
    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    /// Returns true if UV channel `channel` is populated.
    pub fn has_uv(&self, channel: usize) -> bool {
        !self.uv(channel).is_empty()
    }

    /// Returns true if the color channel is populated.
    pub fn has_colors(&self) -> bool {
        !self.colors.is_empty()
    }

    // =========================================================================
    // CHANNEL SETTERS
    // =========================================================================

    /// Replaces UV channel `channel`. An empty vector removes the channel.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidUvChannel`] for a channel beyond the
    /// supported count and [`MeshError::ChannelLengthMismatch`] when the
    /// length does not match the position count.
    pub fn set_uv(&mut self, channel: usize, values: Vec<DVec2>) -> Result<(), MeshError> {
        if channel >= UV_CHANNEL_COUNT {
            return Err(MeshError::InvalidUvChannel {
                channel,
                max: UV_CHANNEL_COUNT - 1,
            });
        }
        check_channel(UV_CHANNEL_NAMES[channel], values.len(), self.positions.len())?;
        self.uvs[channel] = values;
        Ok(())
    }

    /// Replaces the vertex colors. An empty vector removes the channel.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::ChannelLengthMismatch`] when the length does not
    /// match the position count.
    pub fn set_colors(&mut self, colors: Vec<Color>) -> Result<(), MeshError> {
        check_channel("colors", colors.len(), self.positions.len())?;
        self.colors = colors;
        Ok(())
    }

    /// Sets a uniform color for all vertices.
    pub fn set_uniform_color(&mut self, color: Color) {
        self.colors = vec![color; self.positions.len()];
    }

    // =========================================================================
    // BUILDING (crate-internal)
    // =========================================================================

    /// Appends a vertex with a normal and a uv0 coordinate.
    pub(crate) fn push_vertex(&mut self, position: DVec3, normal: DVec3, uv: DVec2) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.normals.push(normal);
        self.uvs[0].push(uv);
        index
    }

    /// Appends triangle indices shifted by `offset`.
    pub(crate) fn extend_triangles(&mut self, indices: &[u32], offset: u32) {
        self.triangles.extend(indices.iter().map(|i| i + offset));
    }

    // =========================================================================
    // TRANSFORMS
    // =========================================================================

    /// Translates all positions by `offset`.
    pub fn translate(&mut self, offset: DVec3) {
        for p in &mut self.positions {
            *p += offset;
        }
    }

    /// Rotates positions and normals about the origin.
    pub fn rotate(&mut self, rotation: DQuat) {
        for p in &mut self.positions {
            *p = rotation * *p;
        }
        for n in &mut self.normals {
            *n = rotation * *n;
        }
    }

    /// Transforms positions by a 4x4 matrix and normals by its inverse
    /// transpose.
    pub fn transform(&mut self, matrix: &DMat4) {
        for p in &mut self.positions {
            *p = matrix.transform_point3(*p);
        }

        let normal_matrix = matrix.inverse().transpose();
        for n in &mut self.normals {
            *n = normal_matrix.transform_vector3(*n).normalize_or_zero();
        }
    }

    /// Turns the mesh inside out: reverses winding and negates normals.
    pub fn flip_faces(&mut self) {
        for tri in self.triangles.chunks_exact_mut(3) {
            tri.swap(1, 2);
        }
        for n in &mut self.normals {
            *n = -*n;
        }
    }

    /// Recomputes smooth vertex normals from area-weighted face normals.
    pub fn recompute_normals(&mut self) {
        let mut normals = vec![DVec3::ZERO; self.positions.len()];

        for tri in self.triangles.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let v0 = self.positions[a];
            let face = (self.positions[b] - v0).cross(self.positions[c] - v0);

            normals[a] += face;
            normals[b] += face;
            normals[c] += face;
        }

        for n in &mut normals {
            *n = n.normalize_or_zero();
        }

        self.normals = normals;
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners; both are zero for an empty buffer.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let Some(first) = self.positions.first() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };

        self.positions[1..]
            .iter()
            .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)))
    }

    /// Checks the channel invariant.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), MeshError> {
        let expected = self.positions.len();

        check_channel("normals", self.normals.len(), expected)?;
        for (name, channel) in UV_CHANNEL_NAMES.iter().zip(&self.uvs) {
            check_channel(name, channel.len(), expected)?;
        }
        check_channel("colors", self.colors.len(), expected)?;

        if self.triangles.len() % 3 != 0 {
            return Err(MeshError::IncompleteTriangle {
                len: self.triangles.len(),
            });
        }

        if let Some(&index) = self.triangles.iter().find(|&&i| i as usize >= expected) {
            return Err(MeshError::IndexOutOfRange {
                index,
                vertex_count: expected,
            });
        }

        Ok(())
    }

    /// Returns true if every position and normal is finite.
    pub fn is_finite(&self) -> bool {
        self.positions.iter().all(|p| p.is_finite()) && self.normals.iter().all(|n| n.is_finite())
    }

    /// Counts triangles whose area is below the degeneracy threshold.
    pub fn degenerate_triangle_count(&self) -> usize {
        self.triangles
            .chunks_exact(3)
            .filter(|tri| {
                let v0 = self.positions[tri[0] as usize];
                let v1 = self.positions[tri[1] as usize];
                let v2 = self.positions[tri[2] as usize];
                (v1 - v0).cross(v2 - v0).length() * 0.5 < DEGENERATE_AREA_EPSILON
            })
            .count()
    }

    // =========================================================================
    // EXPORT
    // =========================================================================

    /// Exports positions as a flattened f32 array for GPU upload.
    ///
    /// Returns [x, y, z, x, y, z, ...].
    pub fn positions_f32(&self) -> Vec<f32> {
        flatten3(&self.positions)
    }

    /// Exports normals as a flattened f32 array, if present.
    pub fn normals_f32(&self) -> Option<Vec<f32>> {
        self.has_normals().then(|| flatten3(&self.normals))
    }

    /// Exports UV channel `channel` as a flattened f32 array, if present.
    pub fn uv_f32(&self, channel: usize) -> Option<Vec<f32>> {
        self.has_uv(channel).then(|| {
            self.uv(channel)
                .iter()
                .flat_map(|uv| [uv.x as f32, uv.y as f32])
                .collect()
        })
    }

    /// Exports triangle indices for GPU upload.
    pub fn indices_u32(&self) -> Vec<u32> {
        self.triangles.clone()
    }
}

fn check_channel(channel: &'static str, len: usize, expected: usize) -> Result<(), MeshError> {
    if len != 0 && len != expected {
        return Err(MeshError::channel_mismatch(channel, len, expected));
    }
    Ok(())
}

fn flatten3(values: &[DVec3]) -> Vec<f32> {
    let mut result = Vec::with_capacity(values.len() * 3);
    for v in values {
        result.push(v.x as f32);
        result.push(v.y as f32);
        result.push(v.z as f32);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> MeshBuffer {
        let mut mesh = MeshBuffer::new();
        mesh.push_vertex(DVec3::ZERO, DVec3::Z, DVec2::ZERO);
        mesh.push_vertex(DVec3::X, DVec3::Z, DVec2::X);
        mesh.push_vertex(DVec3::Y, DVec3::Z, DVec2::Y);
        mesh.extend_triangles(&[0, 1, 2], 0);
        mesh
    }

    #[test]
    fn test_mesh_new() {
        let mesh = MeshBuffer::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_from_parts_rejects_short_channel() {
        let result = MeshBuffer::from_parts(MeshParts {
            positions: vec![DVec3::ZERO, DVec3::X, DVec3::Y],
            normals: vec![DVec3::Z; 2],
            ..Default::default()
        });
        assert_eq!(result, Err(MeshError::channel_mismatch("normals", 2, 3)));
    }

    #[test]
    fn test_from_parts_rejects_bad_index() {
        let result = MeshBuffer::from_parts(MeshParts {
            positions: vec![DVec3::ZERO],
            triangles: vec![0, 1, 2],
            ..Default::default()
        });
        assert!(matches!(result, Err(MeshError::IndexOutOfRange { index: 1, .. })));
    }

    #[test]
    fn test_from_parts_rejects_partial_triangle() {
        let result = MeshBuffer::from_parts(MeshParts {
            positions: vec![DVec3::ZERO, DVec3::X],
            triangles: vec![0, 1],
            ..Default::default()
        });
        assert_eq!(result, Err(MeshError::IncompleteTriangle { len: 2 }));
    }

    #[test]
    fn test_parts_round_trip() {
        let mesh = unit_triangle();
        let rebuilt = MeshBuffer::from_parts(mesh.clone().into_parts()).unwrap();
        assert_eq!(rebuilt, mesh);
    }

    #[test]
    fn test_set_uv_checks_length_and_channel() {
        let mut mesh = unit_triangle();
        assert!(mesh.set_uv(1, vec![DVec2::ONE; 3]).is_ok());
        assert!(mesh.has_uv(1));
        assert!(mesh.set_uv(2, vec![DVec2::ONE; 2]).is_err());
        assert!(matches!(
            mesh.set_uv(3, vec![DVec2::ONE; 3]),
            Err(MeshError::InvalidUvChannel { channel: 3, max: 2 })
        ));
        assert!(mesh.uv(7).is_empty());
    }

    #[test]
    fn test_uniform_color() {
        let mut mesh = unit_triangle();
        mesh.set_uniform_color(config::constants::DEFAULT_COLOR);
        assert_eq!(mesh.colors().len(), 3);
        assert!(mesh.set_colors(vec![[1.0; 4]]).is_err());
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_flip_faces() {
        let mut mesh = unit_triangle();
        mesh.flip_faces();
        assert_eq!(mesh.triangle(0), [0, 2, 1]);
        assert_eq!(mesh.normals()[0], -DVec3::Z);
    }

    #[test]
    fn test_recompute_normals_follow_winding() {
        let mut mesh = unit_triangle();
        mesh.flip_faces();
        mesh.recompute_normals();
        for n in mesh.normals() {
            assert!(n.abs_diff_eq(-DVec3::Z, 1e-12));
        }
    }

    #[test]
    fn test_rotate_and_translate() {
        let mut mesh = unit_triangle();
        mesh.rotate(DQuat::from_rotation_x(std::f64::consts::FRAC_PI_2));
        mesh.translate(DVec3::new(0.0, 0.0, 5.0));
        assert!(mesh.positions()[2].abs_diff_eq(DVec3::new(0.0, 0.0, 6.0), 1e-12));
        assert!(mesh.normals()[0].abs_diff_eq(-DVec3::Y, 1e-12));
    }

    #[test]
    fn test_transform_scales_positions_and_keeps_unit_normals() {
        let mut mesh = unit_triangle();
        mesh.transform(&DMat4::from_scale(DVec3::new(2.0, 2.0, 4.0)));
        assert_eq!(mesh.positions()[1], DVec3::new(2.0, 0.0, 0.0));
        assert!((mesh.normals()[0].length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_bounding_box() {
        let mesh = unit_triangle();
        let (min, max) = mesh.bounding_box();
        assert_eq!(min, DVec3::ZERO);
        assert_eq!(max, DVec3::new(1.0, 1.0, 0.0));
        assert_eq!(MeshBuffer::new().bounding_box(), (DVec3::ZERO, DVec3::ZERO));
    }

    #[test]
    fn test_degenerate_triangle_count() {
        let mut mesh = unit_triangle();
        mesh.push_vertex(DVec3::X, DVec3::Z, DVec2::ZERO);
        mesh.extend_triangles(&[1, 3, 2], 0);
        assert_eq!(mesh.degenerate_triangle_count(), 1);
    }

    #[test]
    fn test_f32_exports() {
        let mesh = unit_triangle();
        assert_eq!(mesh.positions_f32().len(), 9);
        assert_eq!(mesh.normals_f32().map(|n| n.len()), Some(9));
        assert_eq!(mesh.uv_f32(0).map(|uv| uv.len()), Some(6));
        assert_eq!(mesh.uv_f32(1), None);
        assert_eq!(mesh.indices_u32(), vec![0, 1, 2]);
    }
}
