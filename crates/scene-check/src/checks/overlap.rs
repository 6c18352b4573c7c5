//! Vertex overlap check: no two vertices may share the exact same position.

use hashbrown::HashSet;
use tracing::{info, warn};

use crate::checks::{CheckOptions, NOTHING_SELECTED};
use crate::error::CheckResult;
use crate::report::{CheckKind, Report};
use crate::services::SceneServices;

/// Weld distance used when removing overlapping vertices.
pub const MERGE_TOLERANCE: f64 = 0.01;

/// Scan every selected mesh for coincident vertices, optionally welding
/// them afterwards.
///
/// The scan is an all-pairs exact-equality comparison with no spatial
/// tolerance; it can be slow on large meshes, which is what the
/// `skip_overlap_check` toggle is for. Each vertex ends up in at most
/// one reported pair: once two indices match, both are consumed and
/// never compared again.
///
/// An object with zero overlapping pairs ends the whole run, even when
/// more objects remain in the selection. Remaining objects are neither
/// scanned nor welded.
pub fn verify_overlap<S: SceneServices>(
    scene: &mut S,
    opts: &CheckOptions,
    report: &mut Report,
) -> CheckResult<()> {
    report.begin_run(opts.auto_clear);

    if !opts.remove_overlapping && opts.skip_overlap_check {
        report.notice(
            CheckKind::VertexOverlap,
            "Vertex overlap check did nothing, check the toggles if this is unexpected",
        );
        return Ok(());
    }

    let selection = scene.selection();
    if selection.is_empty() {
        report.notice(CheckKind::VertexOverlap, NOTHING_SELECTED);
        return Ok(());
    }

    for obj in &selection {
        if !opts.skip_overlap_check {
            let count = scene.vertex_count(obj)?;
            if count > 1000 {
                warn!(
                    "Overlap scan on {:?} compares {} vertices pairwise; this may be slow",
                    obj, count
                );
            }

            let mut consumed: HashSet<usize> = HashSet::new();

            for i in 0..count {
                let current = scene.vertex_position(obj, i)?;
                for j in 0..count {
                    if i == j {
                        continue;
                    }
                    if consumed.contains(&i) || consumed.contains(&j) {
                        continue;
                    }
                    if current == scene.vertex_position(obj, j)? {
                        consumed.insert(i);
                        consumed.insert(j);
                        report.violation(
                            CheckKind::VertexOverlap,
                            obj,
                            format!("Overlapping vertices in \"{obj}\": {i} with {j}"),
                        );
                    }
                }
            }

            if consumed.is_empty() {
                report.ok(
                    CheckKind::VertexOverlap,
                    obj,
                    format!("No overlap for \"{obj}\""),
                );
                return Ok(());
            }
        }

        if opts.remove_overlapping {
            let merged = scene.merge_vertices_within(obj, MERGE_TOLERANCE)?;
            info!("Merged {} overlapping vertices on {:?}", merged, obj);
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
    use nalgebra::Point3;

    fn object_with_vertices(name: &str, positions: &[(f64, f64, f64)]) -> SceneObject {
        let mut object = SceneObject::new(name);
        object.vertices = positions
            .iter()
            .map(|&(x, y, z)| Point3::new(x, y, z))
            .collect();
        object
    }

    fn single_object_scene(positions: &[(f64, f64, f64)]) -> Scene {
        let mut scene = Scene::new();
        scene.add_object(object_with_vertices("mesh", positions));
        scene.select(["mesh"]);
        scene
    }

    #[test]
    fn test_coincident_pair_is_reported_once() {
        let mut scene =
            single_object_scene(&[(0.0, 0.0, 0.0), (0.0, 0.0, 0.0), (1.0, 1.0, 1.0)]);
        let mut report = Report::new();

        verify_overlap(&mut scene, &CheckOptions::default(), &mut report).unwrap();

        let violations: Vec<_> = report
            .findings()
            .filter(|f| f.status == Status::Violation)
            .collect();
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("0 with 1"));
    }

    #[test]
    fn test_triple_coincidence_consumes_only_one_pair() {
        // Three vertices at the same position: first match consumes 0 and 1,
        // vertex 2 is never paired.
        let mut scene =
            single_object_scene(&[(0.0, 0.0, 0.0), (0.0, 0.0, 0.0), (0.0, 0.0, 0.0)]);
        let mut report = Report::new();

        verify_overlap(&mut scene, &CheckOptions::default(), &mut report).unwrap();

        let violations = report
            .findings()
            .filter(|f| f.status == Status::Violation)
            .count();
        assert_eq!(violations, 1);
    }

    #[test]
    fn test_clean_mesh_reports_no_overlap() {
        let mut scene = single_object_scene(&[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)]);
        let mut report = Report::new();

        verify_overlap(&mut scene, &CheckOptions::default(), &mut report).unwrap();

        assert!(!report.has_violations());
        let finding = report.findings().next().unwrap();
        assert!(finding.message.contains("No overlap"));
    }

    #[test]
    fn test_clean_first_object_ends_the_run() {
        let mut scene = Scene::new();
        scene.add_object(object_with_vertices("clean", &[(0.0, 0.0, 0.0)]));
        scene.add_object(object_with_vertices(
            "dirty",
            &[(0.0, 0.0, 0.0), (0.0, 0.0, 0.0)],
        ));
        scene.select(["clean", "dirty"]);
        let mut report = Report::new();

        verify_overlap(&mut scene, &CheckOptions::default(), &mut report).unwrap();

        // The second object is never scanned.
        assert!(!report.has_violations());
        assert_eq!(report.finding_count(), 1);
    }

    #[test]
    fn test_skip_check_without_merge_does_nothing() {
        let mut scene =
            single_object_scene(&[(0.0, 0.0, 0.0), (0.0, 0.0, 0.0)]);
        let mut report = Report::new();
        let opts = CheckOptions {
            skip_overlap_check: true,
            ..Default::default()
        };

        verify_overlap(&mut scene, &opts, &mut report).unwrap();

        assert_eq!(report.finding_count(), 1);
        let finding = report.findings().next().unwrap();
        assert_eq!(finding.status, Status::Notice);
        assert!(finding.message.contains("did nothing"));
        assert_eq!(scene.vertex_count("mesh").unwrap(), 2);
    }

    #[test]
    fn test_skip_check_with_merge_welds_without_scanning() {
        let mut scene =
            single_object_scene(&[(0.0, 0.0, 0.0), (0.0, 0.0, 0.0), (1.0, 1.0, 1.0)]);
        let mut report = Report::new();
        let opts = CheckOptions {
            skip_overlap_check: true,
            remove_overlapping: true,
            ..Default::default()
        };

        verify_overlap(&mut scene, &opts, &mut report).unwrap();

        assert!(!report.has_violations());
        assert_eq!(scene.vertex_count("mesh").unwrap(), 2);
    }

    #[test]
    fn test_scan_then_merge() {
        let mut scene =
            single_object_scene(&[(0.0, 0.0, 0.0), (0.0, 0.0, 0.0), (1.0, 1.0, 1.0)]);
        let mut report = Report::new();
        let opts = CheckOptions {
            remove_overlapping: true,
            ..Default::default()
        };

        verify_overlap(&mut scene, &opts, &mut report).unwrap();

        assert!(report.has_violations());
        assert_eq!(scene.vertex_count("mesh").unwrap(), 2);
    }

    #[test]
    fn test_empty_selection_reports_notice() {
        let mut scene = Scene::new();
        let mut report = Report::new();

        verify_overlap(&mut scene, &CheckOptions::default(), &mut report).unwrap();

        assert_eq!(report.finding_count(), 1);
        assert_eq!(
            report.findings().next().unwrap().message,
            NOTHING_SELECTED
        );
    }
}
