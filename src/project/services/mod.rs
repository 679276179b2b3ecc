//! Application services for project workflow orchestration.

mod commands;
mod workflow;

pub use commands::{CommandKind, CommandResult, WorkflowCommand};
pub use workflow::{
    FinishConstructionRequest, PauseProjectRequest, ProjectWorkflowService,
    StartConstructionRequest, WorkflowServiceError, WorkflowServiceResult,
};
