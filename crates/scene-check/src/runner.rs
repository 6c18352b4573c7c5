//! Action dispatch and the "verify all" aggregator.

use tracing::debug;

use crate::checks::{self, CheckOptions};
use crate::error::CheckResult;
use crate::report::Report;
use crate::services::SceneServices;

/// The user-facing actions. A front end maps its triggers (buttons,
/// CLI flags) to these and dispatches through [`run_action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    VerifyScale,
    VerifyUv,
    VerifyPivot,
    VerifyOverlap,
    VerifyAll,
    ClearLog,
}

/// Dispatch one action against the scene.
pub fn run_action<S: SceneServices>(
    scene: &mut S,
    action: Action,
    opts: &CheckOptions,
    report: &mut Report,
) -> CheckResult<()> {
    debug!("Running action {:?}", action);
    match action {
        Action::VerifyScale => checks::verify_scale(scene, opts, report),
        Action::VerifyUv => checks::verify_uv(scene, opts, report),
        Action::VerifyPivot => checks::verify_pivot(scene, opts, report),
        Action::VerifyOverlap => checks::verify_overlap(scene, opts, report),
        Action::VerifyAll => verify_all(scene, opts, report),
        Action::ClearLog => {
            report.clear();
            Ok(())
        }
    }
}

/// Run all four checks in fixed order: scale, UV winding, pivot,
/// vertex overlap.
///
/// A violation in one check never prevents the next from running. Each
/// check re-resolves the selection and applies its own report prelude.
/// With an empty selection nothing runs and a single notice is emitted.
pub fn verify_all<S: SceneServices>(
    scene: &mut S,
    opts: &CheckOptions,
    report: &mut Report,
) -> CheckResult<()> {
    if scene.selection().is_empty() {
        report.run_notice(checks::NOTHING_SELECTED);
        return Ok(());
    }

    checks::verify_scale(scene, opts, report)?;
    checks::verify_uv(scene, opts, report)?;
    checks::verify_pivot(scene, opts, report)?;
    checks::verify_overlap(scene, opts, report)?;

    Ok(())
}
