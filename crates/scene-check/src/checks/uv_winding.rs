//! UV winding check: every face's UV triangle must wind counter-clockwise.

use tracing::info;

use crate::checks::{CheckOptions, NOTHING_SELECTED};
use crate::error::CheckResult;
use crate::report::{CheckKind, Report};
use crate::services::SceneServices;
use crate::types::uv_winding_cross;

/// Verify UV winding for every face of every selected object,
/// optionally flipping the offending faces.
///
/// A face with a non-positive winding cross is classified as flipped;
/// exactly zero (degenerate or co-linear UVs) counts as flipped, not ok.
pub fn verify_uv<S: SceneServices>(
    scene: &mut S,
    opts: &CheckOptions,
    report: &mut Report,
) -> CheckResult<()> {
    report.begin_run(opts.auto_clear);

    let selection = scene.selection();
    if selection.is_empty() {
        report.notice(CheckKind::UvWinding, NOTHING_SELECTED);
        return Ok(());
    }

    for obj in &selection {
        let mut flipped: Vec<usize> = Vec::new();

        for face in 0..scene.face_count(obj)? {
            let uvs = scene.face_uvs(obj, face)?;
            if uv_winding_cross(&uvs) <= 0.0 {
                flipped.push(face);
            }
        }

        if !flipped.is_empty() && opts.flip_faces {
            scene.flip_face_uvs(obj, &flipped, true)?;
            info!("Flipped {} wrong-winding faces on {:?}", flipped.len(), obj);
            report.violation(
                CheckKind::UvWinding,
                obj,
                format!(
                    "{} faces on the wrong side for \"{obj}\", they have now been flipped!",
                    flipped.len()
                ),
            );
        } else if !flipped.is_empty() {
            report.violation(
                CheckKind::UvWinding,
                obj,
                format!("{} faces on the wrong side for \"{obj}\"", flipped.len()),
            );
        } else {
            report.ok(CheckKind::UvWinding, obj, format!("Faces ok for \"{obj}\""));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Status;
    use crate::scene::{Scene, SceneObject};
    use crate::services::GeometryQuery;
    use crate::types::FaceUvs;
    use nalgebra::Point2;

    fn ccw() -> FaceUvs {
        [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
        ]
    }

    fn cw() -> FaceUvs {
        [
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 1.0),
        ]
    }

    fn scene_with_faces(faces: &[FaceUvs]) -> Scene {
        let mut scene = Scene::new();
        let mut object = SceneObject::new("mesh");
        object.face_uvs = faces.to_vec();
        scene.add_object(object);
        scene.select(["mesh"]);
        scene
    }

    #[test]
    fn test_ccw_faces_pass() {
        let mut scene = scene_with_faces(&[ccw(), ccw()]);
        let mut report = Report::new();

        verify_uv(&mut scene, &CheckOptions::default(), &mut report).unwrap();
        assert!(!report.has_violations());
    }

    #[test]
    fn test_cw_face_is_reported() {
        let mut scene = scene_with_faces(&[ccw(), cw()]);
        let mut report = Report::new();

        verify_uv(&mut scene, &CheckOptions::default(), &mut report).unwrap();

        let finding = report.findings().next().unwrap();
        assert_eq!(finding.status, Status::Violation);
        assert!(finding.message.starts_with("1 faces"));

        // Flip not requested: UVs are untouched.
        assert_eq!(scene.face_uvs("mesh", 1).unwrap(), cw());
    }

    #[test]
    fn test_degenerate_face_counts_as_flipped() {
        // Co-linear UVs: winding cross is exactly zero.
        let degenerate: FaceUvs = [
            Point2::new(0.0, 0.0),
            Point2::new(0.5, 0.5),
            Point2::new(1.0, 1.0),
        ];
        let mut scene = scene_with_faces(&[degenerate]);
        let mut report = Report::new();

        verify_uv(&mut scene, &CheckOptions::default(), &mut report).unwrap();
        assert!(report.has_violations());
    }

    #[test]
    fn test_flip_faces_corrects_winding() {
        let mut scene = scene_with_faces(&[cw(), ccw(), cw()]);
        let mut report = Report::new();
        let opts = CheckOptions {
            flip_faces: true,
            ..Default::default()
        };

        verify_uv(&mut scene, &opts, &mut report).unwrap();

        let finding = report.findings().next().unwrap();
        assert!(finding.message.contains("2 faces"));
        assert!(finding.message.contains("flipped"));

        // The untouched face keeps its UVs; the flipped ones wind CCW now.
        assert_eq!(scene.face_uvs("mesh", 1).unwrap(), ccw());
        for face in [0, 2] {
            let uvs = scene.face_uvs("mesh", face).unwrap();
            assert!(uv_winding_cross(&uvs) > 0.0);
        }

        // Second run is clean.
        let mut report = Report::new();
        verify_uv(&mut scene, &opts, &mut report).unwrap();
        assert!(!report.has_violations());
    }

    #[test]
    fn test_object_without_faces_is_ok() {
        let mut scene = scene_with_faces(&[]);
        let mut report = Report::new();

        verify_uv(&mut scene, &CheckOptions::default(), &mut report).unwrap();

        let finding = report.findings().next().unwrap();
        assert_eq!(finding.status, Status::Ok);
    }
}
