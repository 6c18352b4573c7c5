//! Pivot check: scale and rotate pivots must sit at the origin.

use nalgebra::Vector3;
use tracing::debug;

use crate::checks::{CheckOptions, NOTHING_SELECTED};
use crate::error::CheckResult;
use crate::report::{CheckKind, Report};
use crate::services::SceneServices;

/// Verify that both pivots of every selected object are at (0,0,0),
/// optionally resetting them.
///
/// With `move_with_pivot` set, the reset compensates by writing the
/// pre-reset *scale* pivot into the object's translate; the rotate
/// pivot is intentionally not used for the compensation.
pub fn verify_pivot<S: SceneServices>(
    scene: &mut S,
    opts: &CheckOptions,
    report: &mut Report,
) -> CheckResult<()> {
    report.begin_run(opts.auto_clear);

    let selection = scene.selection();
    if selection.is_empty() {
        report.notice(CheckKind::Pivot, NOTHING_SELECTED);
        return Ok(());
    }

    let zero = Vector3::zeros();

    for obj in &selection {
        let snapshot = scene.transform_snapshot(obj)?;
        debug!(
            "Pivot snapshot for {:?}: scale_pivot={:?} rotate_pivot={:?} translate={:?}",
            obj, snapshot.scale_pivot, snapshot.rotate_pivot, snapshot.translate
        );

        if snapshot.scale_pivot != zero || snapshot.rotate_pivot != zero {
            report.violation(
                CheckKind::Pivot,
                obj,
                format!("Pivot for \"{obj}\" is not at (0,0,0)"),
            );
            if opts.reset_pivot {
                scene.set_pivots(obj, zero, zero)?;
                if opts.move_with_pivot {
                    scene.set_translate(obj, snapshot.scale_pivot)?;
                }
            }
        } else {
            report.ok(CheckKind::Pivot, obj, format!("Pivot ok for \"{obj}\""));
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

    fn scene_with_pivots(scale_pivot: Vector3<f64>, rotate_pivot: Vector3<f64>) -> Scene {
        let mut scene = Scene::new();
        let mut object = SceneObject::new("cube");
        object.transform.scale_pivot = scale_pivot;
        object.transform.rotate_pivot = rotate_pivot;
        scene.add_object(object);
        scene.select(["cube"]);
        scene
    }

    #[test]
    fn test_origin_pivots_are_ok() {
        let mut scene = scene_with_pivots(Vector3::zeros(), Vector3::zeros());
        let mut report = Report::new();

        verify_pivot(&mut scene, &CheckOptions::default(), &mut report).unwrap();

        let finding = report.findings().next().unwrap();
        assert_eq!(finding.status, Status::Ok);
    }

    #[test]
    fn test_offset_rotate_pivot_is_a_violation() {
        let mut scene = scene_with_pivots(Vector3::zeros(), Vector3::new(0.0, 2.0, 0.0));
        let mut report = Report::new();

        verify_pivot(&mut scene, &CheckOptions::default(), &mut report).unwrap();
        assert!(report.has_violations());

        // No auto-fix requested: pivots untouched.
        let (_, rotate_pivot) = scene.pivots("cube").unwrap();
        assert_eq!(rotate_pivot, Vector3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn test_reset_moves_both_pivots_to_origin() {
        let mut scene =
            scene_with_pivots(Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 2.0, 0.0));
        let mut report = Report::new();
        let opts = CheckOptions {
            reset_pivot: true,
            ..Default::default()
        };

        verify_pivot(&mut scene, &opts, &mut report).unwrap();

        let (scale_pivot, rotate_pivot) = scene.pivots("cube").unwrap();
        assert_eq!(scale_pivot, Vector3::zeros());
        assert_eq!(rotate_pivot, Vector3::zeros());

        // Translate untouched without move_with_pivot.
        assert_eq!(scene.translate("cube").unwrap(), Vector3::zeros());

        // Second run is clean.
        let mut report = Report::new();
        verify_pivot(&mut scene, &opts, &mut report).unwrap();
        assert!(!report.has_violations());
    }

    #[test]
    fn test_move_with_pivot_compensates_with_scale_pivot() {
        // Only the rotate pivot is off-origin: the compensation still
        // uses the scale pivot, so translate becomes (0,0,0).
        let mut scene = scene_with_pivots(Vector3::zeros(), Vector3::new(0.0, 2.0, 0.0));
        scene.objects[0].transform.translate = Vector3::new(5.0, 5.0, 5.0);
        let mut report = Report::new();
        let opts = CheckOptions {
            reset_pivot: true,
            move_with_pivot: true,
            ..Default::default()
        };

        verify_pivot(&mut scene, &opts, &mut report).unwrap();

        assert_eq!(scene.translate("cube").unwrap(), Vector3::zeros());
    }

    #[test]
    fn test_move_with_pivot_uses_pre_reset_value() {
        let mut scene =
            scene_with_pivots(Vector3::new(3.0, 0.0, 1.0), Vector3::new(0.0, 2.0, 0.0));
        let mut report = Report::new();
        let opts = CheckOptions {
            reset_pivot: true,
            move_with_pivot: true,
            ..Default::default()
        };

        verify_pivot(&mut scene, &opts, &mut report).unwrap();

        let (scale_pivot, rotate_pivot) = scene.pivots("cube").unwrap();
        assert_eq!(scale_pivot, Vector3::zeros());
        assert_eq!(rotate_pivot, Vector3::zeros());
        assert_eq!(
            scene.translate("cube").unwrap(),
            Vector3::new(3.0, 0.0, 1.0)
        );
    }
}
