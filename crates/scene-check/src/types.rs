//! Core types shared by the validators and service traits.

use nalgebra::{Point2, Vector3};

/// Name identifying a scene object. Selections are ordered lists of handles,
/// re-resolved on every check invocation and never persisted.
pub type ObjectHandle = String;

/// Three UV coordinate pairs of a face, in index (winding) order.
pub type FaceUvs = [Point2<f64>; 3];

/// Transform attributes of an object, read at check time.
///
/// Immutable once read; validators take a snapshot, evaluate their
/// predicate against it, and discard it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformSnapshot {
    pub scale: Vector3<f64>,
    pub translate: Vector3<f64>,
    pub rotate_pivot: Vector3<f64>,
    pub scale_pivot: Vector3<f64>,
}

impl TransformSnapshot {
    /// The identity transform: unit scale, everything else at the origin.
    pub fn identity() -> Self {
        Self {
            scale: Vector3::new(1.0, 1.0, 1.0),
            translate: Vector3::zeros(),
            rotate_pivot: Vector3::zeros(),
            scale_pivot: Vector3::zeros(),
        }
    }
}

/// 2-D scalar cross product of the two UV edge vectors of a face.
///
/// Equivalent to extending both edges to z = 0 and projecting their 3-D
/// cross product onto +Z. Positive for counter-clockwise winding.
#[inline]
pub fn uv_winding_cross(uvs: &FaceUvs) -> f64 {
    let [a, b, c] = *uvs;
    let ab = b - a;
    let bc = c - b;
    ab.x * bc.y - ab.y * bc.x
}
