//! In-memory scene implementing the service traits.
//!
//! Stands in for a host application's scene graph: objects carry a
//! transform plus the mesh attributes the validators read (vertex
//! positions, per-face UV triples). Deserializable so scenes can be
//! described in JSON.

use hashbrown::HashMap;
use nalgebra::{Point3, Vector3};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{CheckError, CheckResult};
use crate::services::{GeometryMutation, GeometryQuery, SelectionProvider};
use crate::types::{FaceUvs, ObjectHandle, TransformSnapshot};

/// Transform attributes of a scene object.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub scale: Vector3<f64>,
    pub translate: Vector3<f64>,
    pub rotate_pivot: Vector3<f64>,
    pub scale_pivot: Vector3<f64>,
}

impl Default for Transform {
    fn default() -> Self {
        let id = TransformSnapshot::identity();
        Self {
            scale: id.scale,
            translate: id.translate,
            rotate_pivot: id.rotate_pivot,
            scale_pivot: id.scale_pivot,
        }
    }
}

/// A single object: name, transform, and mesh attributes.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneObject {
    pub name: String,

    #[serde(default)]
    pub transform: Transform,

    /// Vertex positions, in index order.
    #[serde(default)]
    pub vertices: Vec<Point3<f64>>,

    /// Per-face UV triples, in face index order.
    #[serde(default)]
    pub face_uvs: Vec<FaceUvs>,
}

impl SceneObject {
    /// Create an object with an identity transform and no mesh data.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            vertices: Vec::new(),
            face_uvs: Vec::new(),
        }
    }
}

/// An ordered collection of objects plus the current selection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub objects: Vec<SceneObject>,

    /// Names of the selected objects, in selection order.
    #[serde(default)]
    pub selection: Vec<ObjectHandle>,
}

impl Scene {
    /// Create an empty scene with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the scene.
    pub fn add_object(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    /// Replace the selection.
    pub fn select<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection = names.into_iter().map(Into::into).collect();
    }

    fn object(&self, name: &str) -> CheckResult<&SceneObject> {
        self.objects
            .iter()
            .find(|o| o.name == name)
            .ok_or_else(|| CheckError::UnknownObject {
                name: name.to_string(),
            })
    }

    fn object_mut(&mut self, name: &str) -> CheckResult<&mut SceneObject> {
        self.objects
            .iter_mut()
            .find(|o| o.name == name)
            .ok_or_else(|| CheckError::UnknownObject {
                name: name.to_string(),
            })
    }
}

impl SelectionProvider for Scene {
    fn selection(&self) -> Vec<ObjectHandle> {
        self.selection.clone()
    }
}

impl GeometryQuery for Scene {
    fn scale(&self, obj: &str) -> CheckResult<Vector3<f64>> {
        Ok(self.object(obj)?.transform.scale)
    }

    fn pivots(&self, obj: &str) -> CheckResult<(Vector3<f64>, Vector3<f64>)> {
        let t = &self.object(obj)?.transform;
        Ok((t.scale_pivot, t.rotate_pivot))
    }

    fn translate(&self, obj: &str) -> CheckResult<Vector3<f64>> {
        Ok(self.object(obj)?.transform.translate)
    }

    fn face_count(&self, obj: &str) -> CheckResult<usize> {
        Ok(self.object(obj)?.face_uvs.len())
    }

    fn face_uvs(&self, obj: &str, face: usize) -> CheckResult<FaceUvs> {
        let object = self.object(obj)?;
        object
            .face_uvs
            .get(face)
            .copied()
            .ok_or_else(|| CheckError::FaceOutOfRange {
                object: obj.to_string(),
                face,
                count: object.face_uvs.len(),
            })
    }

    fn vertex_count(&self, obj: &str) -> CheckResult<usize> {
        Ok(self.object(obj)?.vertices.len())
    }

    fn vertex_position(&self, obj: &str, vertex: usize) -> CheckResult<Point3<f64>> {
        let object = self.object(obj)?;
        object
            .vertices
            .get(vertex)
            .copied()
            .ok_or_else(|| CheckError::VertexOutOfRange {
                object: obj.to_string(),
                vertex,
                count: object.vertices.len(),
            })
    }
}

impl GeometryMutation for Scene {
    fn set_scale(&mut self, obj: &str, scale: Vector3<f64>) -> CheckResult<()> {
        self.object_mut(obj)?.transform.scale = scale;
        Ok(())
    }

    fn set_pivots(
        &mut self,
        obj: &str,
        scale_pivot: Vector3<f64>,
        rotate_pivot: Vector3<f64>,
    ) -> CheckResult<()> {
        let t = &mut self.object_mut(obj)?.transform;
        t.scale_pivot = scale_pivot;
        t.rotate_pivot = rotate_pivot;
        Ok(())
    }

    fn set_translate(&mut self, obj: &str, translate: Vector3<f64>) -> CheckResult<()> {
        self.object_mut(obj)?.transform.translate = translate;
        Ok(())
    }

    fn flip_face_uvs(&mut self, obj: &str, faces: &[usize], local: bool) -> CheckResult<()> {
        let object = self.object_mut(obj)?;
        let count = object.face_uvs.len();

        for &face in faces {
            let uvs = object
                .face_uvs
                .get_mut(face)
                .ok_or_else(|| CheckError::FaceOutOfRange {
                    object: obj.to_string(),
                    face,
                    count,
                })?;

            // Mirror U coordinates. A local flip mirrors within the face's
            // own U extent; a global flip mirrors across the 0..1 tile.
            let (min_u, max_u) = if local {
                uvs.iter()
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                        (lo.min(p.x), hi.max(p.x))
                    })
            } else {
                (0.0, 1.0)
            };

            for uv in uvs.iter_mut() {
                uv.x = (min_u + max_u) - uv.x;
            }
        }

        debug!("Flipped UVs on {} faces of {:?}", faces.len(), obj);
        Ok(())
    }

    fn merge_vertices_within(&mut self, obj: &str, tolerance: f64) -> CheckResult<usize> {
        let object = self.object_mut(obj)?;
        let original_count = object.vertices.len();
        if original_count == 0 || tolerance <= 0.0 {
            return Ok(0);
        }

        // Spatial hash with 2x tolerance cells; neighbors within tolerance
        // are always in the 3x3x3 neighborhood of a vertex's cell.
        let cell_size = tolerance * 2.0;
        let mut spatial_hash: HashMap<(i64, i64, i64), Vec<usize>> = HashMap::new();

        for (idx, position) in object.vertices.iter().enumerate() {
            spatial_hash
                .entry(pos_to_cell(position, cell_size))
                .or_default()
                .push(idx);
        }

        // Each vertex maps to its canonical representative, the lowest
        // index within tolerance.
        let mut remap: Vec<usize> = (0..original_count).collect();
        let mut merged_count = 0;

        for (idx, position) in object.vertices.iter().enumerate() {
            if remap[idx] != idx {
                continue;
            }

            let cell = pos_to_cell(position, cell_size);
            for dx in -1..=1 {
                for dy in -1..=1 {
                    for dz in -1..=1 {
                        let neighbor_cell = (cell.0 + dx, cell.1 + dy, cell.2 + dz);
                        let Some(candidates) = spatial_hash.get(&neighbor_cell) else {
                            continue;
                        };

                        for &other in candidates {
                            if other <= idx || remap[other] != other {
                                continue;
                            }
                            if (position - object.vertices[other]).norm() < tolerance {
                                remap[other] = idx;
                                merged_count += 1;
                            }
                        }
                    }
                }
            }
        }

        if merged_count == 0 {
            return Ok(0);
        }

        let mut keep = (0..original_count).map(|i| remap[i] == i);
        object.vertices.retain(|_| keep.next().unwrap_or(true));

        info!(
            "Welded {} vertices of {:?} (tolerance = {:.3}): {} -> {}",
            merged_count,
            obj,
            tolerance,
            original_count,
            original_count - merged_count
        );

        Ok(merged_count)
    }
}

fn pos_to_cell(position: &Point3<f64>, cell_size: f64) -> (i64, i64, i64) {
    (
        (position.x / cell_size).floor() as i64,
        (position.y / cell_size).floor() as i64,
        (position.z / cell_size).floor() as i64,
    )
}
