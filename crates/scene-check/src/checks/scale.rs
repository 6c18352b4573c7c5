//! Scale check: local scale must be exactly (1,1,1).

use nalgebra::Vector3;
use tracing::debug;

use crate::checks::{CheckOptions, NOTHING_SELECTED};
use crate::error::CheckResult;
use crate::report::{CheckKind, Report};
use crate::services::SceneServices;

/// Verify that every selected object has unit scale, optionally
/// resetting it.
///
/// The comparison is exact, component-wise. Floating noise near 1.0 is
/// a violation, not a pass.
pub fn verify_scale<S: SceneServices>(
    scene: &mut S,
    opts: &CheckOptions,
    report: &mut Report,
) -> CheckResult<()> {
    report.begin_run(opts.auto_clear);

    let selection = scene.selection();
    if selection.is_empty() {
        report.notice(CheckKind::Scale, NOTHING_SELECTED);
        return Ok(());
    }

    let unit = Vector3::new(1.0, 1.0, 1.0);

    for obj in &selection {
        let scale = scene.scale(obj)?;

        if scale != unit {
            report.violation(
                CheckKind::Scale,
                obj,
                format!("Scale is not at (1,1,1) for \"{obj}\""),
            );
            if opts.replace_scale {
                scene.set_scale(obj, unit)?;
                debug!("Reset scale of {:?} to (1,1,1)", obj);
            }
        } else {
            report.ok(CheckKind::Scale, obj, format!("Scale ok for \"{obj}\""));
        }
    }

    Ok(())
}
