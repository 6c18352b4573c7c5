//! Service traits over the host scene.
//!
//! The validators never touch scene storage directly; they go through
//! these three capability traits. A host-application adapter implements
//! them against the real scene graph, while [`crate::Scene`] provides an
//! in-memory implementation for tests and the CLI.

use nalgebra::{Point3, Vector3};

use crate::error::CheckResult;
use crate::types::{FaceUvs, ObjectHandle, TransformSnapshot};

/// Read access to the current selection.
pub trait SelectionProvider {
    /// The ordered list of currently selected objects.
    ///
    /// An empty selection is a valid, common result.
    fn selection(&self) -> Vec<ObjectHandle>;
}

/// Read access to per-object transform attributes and mesh data.
pub trait GeometryQuery {
    /// Local scale of the object.
    fn scale(&self, obj: &str) -> CheckResult<Vector3<f64>>;

    /// Scale pivot and rotate pivot, in that order.
    fn pivots(&self, obj: &str) -> CheckResult<(Vector3<f64>, Vector3<f64>)>;

    /// Local translation of the object.
    fn translate(&self, obj: &str) -> CheckResult<Vector3<f64>>;

    /// Number of faces in the object's mesh.
    fn face_count(&self, obj: &str) -> CheckResult<usize>;

    /// The three UV coordinate pairs of a face, in index order.
    fn face_uvs(&self, obj: &str, face: usize) -> CheckResult<FaceUvs>;

    /// Number of vertices in the object's mesh.
    fn vertex_count(&self, obj: &str) -> CheckResult<usize>;

    /// Position of a vertex.
    fn vertex_position(&self, obj: &str, vertex: usize) -> CheckResult<Point3<f64>>;

    /// Read the full transform in one shot.
    fn transform_snapshot(&self, obj: &str) -> CheckResult<TransformSnapshot> {
        let (scale_pivot, rotate_pivot) = self.pivots(obj)?;
        Ok(TransformSnapshot {
            scale: self.scale(obj)?,
            translate: self.translate(obj)?,
            rotate_pivot,
            scale_pivot,
        })
    }
}

/// Write access to per-object transform attributes and mesh data.
///
/// Each call is synchronous and atomic on its own; there is no
/// transaction spanning several calls.
pub trait GeometryMutation {
    fn set_scale(&mut self, obj: &str, scale: Vector3<f64>) -> CheckResult<()>;

    fn set_pivots(
        &mut self,
        obj: &str,
        scale_pivot: Vector3<f64>,
        rotate_pivot: Vector3<f64>,
    ) -> CheckResult<()>;

    fn set_translate(&mut self, obj: &str, translate: Vector3<f64>) -> CheckResult<()>;

    /// Flip the UVs of the listed faces. With `local` set, each face is
    /// mirrored within its own UV extent instead of the 0..1 tile.
    fn flip_face_uvs(&mut self, obj: &str, faces: &[usize], local: bool) -> CheckResult<()>;

    /// Weld all vertices of the object that lie within `tolerance` of
    /// each other. Returns the number of vertices removed.
    fn merge_vertices_within(&mut self, obj: &str, tolerance: f64) -> CheckResult<usize>;
}

/// Everything a validator needs from the host, in one bound.
pub trait SceneServices: SelectionProvider + GeometryQuery + GeometryMutation {}

impl<T: SelectionProvider + GeometryQuery + GeometryMutation> SceneServices for T {}
