//! Mesh-validation checks for 3D scene objects.
//!
//! This crate inspects selected geometry for common content problems and
//! can optionally auto-correct each one:
//!
//! - **UV winding**: faces whose UV triangle winds the wrong way
//! - **Scale**: objects whose local scale is not exactly (1,1,1)
//! - **Pivot**: scale or rotate pivots away from the origin
//! - **Vertex overlap**: distinct vertices sharing the exact same position
//!
//! The checks talk to the scene exclusively through the service traits in
//! [`services`], so they run against any host-application adapter; the
//! in-memory [`Scene`] implements them for tests and the CLI. Findings go
//! to an injected [`Report`] rather than any global log.
//!
//! # Example
//!
//! ```
//! use scene_check::{Action, CheckOptions, Report, Scene, SceneObject};
//!
//! let mut scene = Scene::new();
//! scene.add_object(SceneObject::new("cube"));
//! scene.select(["cube"]);
//!
//! let mut report = Report::new();
//! scene.run(Action::VerifyAll, &CheckOptions::default(), &mut report).unwrap();
//! print!("{}", report);
//! ```

mod error;
mod types;

pub mod checks;
pub mod report;
pub mod runner;
pub mod scene;
pub mod services;

// Re-export core types at crate root
pub use error::{CheckError, CheckResult};
pub use types::{uv_winding_cross, FaceUvs, ObjectHandle, TransformSnapshot};

pub use checks::{verify_overlap, verify_pivot, verify_scale, verify_uv, CheckOptions};
pub use report::{CheckKind, Finding, Report, ReportEntry, Status, SEPARATOR_LINE};
pub use runner::{run_action, verify_all, Action};
pub use scene::{Scene, SceneObject, Transform};
pub use services::{GeometryMutation, GeometryQuery, SceneServices, SelectionProvider};

// Convenience methods on Scene
impl Scene {
    /// Dispatch a single action against this scene.
    pub fn run(
        &mut self,
        action: Action,
        opts: &CheckOptions,
        report: &mut Report,
    ) -> CheckResult<()> {
        runner::run_action(self, action, opts, report)
    }

    /// Run all four checks in fixed order.
    pub fn verify_all(&mut self, opts: &CheckOptions, report: &mut Report) -> CheckResult<()> {
        runner::verify_all(self, opts, report)
    }
}
