//! Submission pipeline: validation, orchestration against the generation
//! tool, the display slot, and the work-item registry.

pub mod display;
pub mod orchestrator;
pub mod registry;
pub mod submission;

pub use display::{DisplaySlot, DisplaySnapshot};
pub use orchestrator::{Orchestrator, OrchestratorConfig, SubmissionOutcome, SubmissionState};
pub use registry::{WorkItem, WorkKind, WorkRegistry, WorkStatus};
pub use submission::{ImageFile, Submission};
