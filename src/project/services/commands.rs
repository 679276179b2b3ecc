//! Command boundary for the workflow engine.
//!
//! [`WorkflowCommand`] enumerates the engine's public operations;
//! [`CommandKind::required_access`] is the single access-policy table every
//! operation is gated by; and [`ProjectWorkflowService::execute`] recovers
//! every error into a [`CommandResult`], so nothing raises past the
//! engine's boundary.

use super::workflow::{
    FinishConstructionRequest, PauseProjectRequest, ProjectWorkflowService,
    StartConstructionRequest, WorkflowServiceResult,
};
use crate::project::{
    domain::{AccessLevel, ProjectId},
    ports::WorkflowRepository,
};
use mockable::Clock;
use serde::Serialize;
use std::fmt;

/// Discriminant naming each workflow operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Passive status inference from contract evidence.
    Recompute,
    /// Start construction.
    StartConstruction,
    /// Compensate a start.
    UndoStartConstruction,
    /// Accept construction as complete.
    FinishConstruction,
    /// Compensate a completion.
    UndoFinishConstruction,
    /// Suspend construction.
    PauseProject,
    /// Resume suspended construction.
    ResumeProject,
    /// Cancel the project.
    CancelProject,
    /// Compensate a cancellation.
    UndoCancelProject,
}

impl CommandKind {
    /// Returns the canonical operation name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recompute => "recompute",
            Self::StartConstruction => "start_construction",
            Self::UndoStartConstruction => "undo_start_construction",
            Self::FinishConstruction => "finish_construction",
            Self::UndoFinishConstruction => "undo_finish_construction",
            Self::PauseProject => "pause_project",
            Self::ResumeProject => "resume_project",
            Self::CancelProject => "cancel_project",
            Self::UndoCancelProject => "undo_cancel_project",
        }
    }

    /// Returns the access required to run the operation.
    ///
    /// Recompute is driven by internal contract-lifecycle events and needs
    /// no session. Forward commands need any authenticated session. The
    /// compensating commands and cancellation are destructive and reserved
    /// for elevated roles.
    #[must_use]
    pub const fn required_access(self) -> AccessLevel {
        match self {
            Self::Recompute => AccessLevel::Open,
            Self::StartConstruction
            | Self::FinishConstruction
            | Self::PauseProject
            | Self::ResumeProject => AccessLevel::Authenticated,
            Self::UndoStartConstruction
            | Self::UndoFinishConstruction
            | Self::CancelProject
            | Self::UndoCancelProject => AccessLevel::Elevated,
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A workflow operation with its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowCommand {
    /// Recompute pre-construction status from contract evidence.
    Recompute {
        /// Subject project.
        project_id: ProjectId,
    },
    /// Start construction.
    StartConstruction(StartConstructionRequest),
    /// Compensate a start.
    UndoStartConstruction {
        /// Subject project.
        project_id: ProjectId,
    },
    /// Accept construction as complete.
    FinishConstruction(FinishConstructionRequest),
    /// Compensate a completion.
    UndoFinishConstruction {
        /// Subject project.
        project_id: ProjectId,
    },
    /// Suspend construction.
    PauseProject(PauseProjectRequest),
    /// Resume suspended construction.
    ResumeProject {
        /// Subject project.
        project_id: ProjectId,
    },
    /// Cancel the project.
    CancelProject {
        /// Subject project.
        project_id: ProjectId,
        /// Free-text cancellation reason.
        reason: Option<String>,
    },
    /// Compensate a cancellation.
    UndoCancelProject {
        /// Subject project.
        project_id: ProjectId,
    },
}

impl WorkflowCommand {
    /// Returns the command's discriminant.
    #[must_use]
    pub const fn kind(&self) -> CommandKind {
        match self {
            Self::Recompute { .. } => CommandKind::Recompute,
            Self::StartConstruction(_) => CommandKind::StartConstruction,
            Self::UndoStartConstruction { .. } => CommandKind::UndoStartConstruction,
            Self::FinishConstruction(_) => CommandKind::FinishConstruction,
            Self::UndoFinishConstruction { .. } => CommandKind::UndoFinishConstruction,
            Self::PauseProject(_) => CommandKind::PauseProject,
            Self::ResumeProject { .. } => CommandKind::ResumeProject,
            Self::CancelProject { .. } => CommandKind::CancelProject,
            Self::UndoCancelProject { .. } => CommandKind::UndoCancelProject,
        }
    }
}

/// Boundary result of a workflow command.
///
/// Every error is recovered into this shape; nothing raises past the
/// engine's public surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandResult {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl CommandResult {
    /// Creates a successful result with a human-readable message.
    #[must_use]
    pub const fn ok(message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            error: None,
        }
    }

    /// Creates a failed result with a human-readable error.
    #[must_use]
    pub const fn fail(error: String) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error),
        }
    }

    /// Returns `true` when the command succeeded.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.success
    }

    /// Returns the success message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the error message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl<R, C> ProjectWorkflowService<R, C>
where
    R: WorkflowRepository,
    C: Clock + Send + Sync,
{
    /// Runs a workflow command, recovering every failure into the boundary
    /// result shape.
    pub async fn execute(&self, command: WorkflowCommand) -> CommandResult {
        let outcome = self.dispatch(command).await;
        match outcome {
            Ok(message) => CommandResult::ok(message),
            Err(err) => CommandResult::fail(err.to_string()),
        }
    }

    async fn dispatch(&self, command: WorkflowCommand) -> WorkflowServiceResult<String> {
        match command {
            WorkflowCommand::Recompute { project_id } => {
                let state = self.recompute(project_id).await?;
                Ok(format!(
                    "project {project_id} status recomputed to '{}'",
                    state.as_str()
                ))
            }
            WorkflowCommand::StartConstruction(request) => {
                let project = self.start_construction(request).await?;
                Ok(format!("construction started for project {}", project.id()))
            }
            WorkflowCommand::UndoStartConstruction { project_id } => {
                let project = self.undo_start_construction(project_id).await?;
                Ok(format!(
                    "construction start reversed for project {}",
                    project.id()
                ))
            }
            WorkflowCommand::FinishConstruction(request) => {
                let project = self.finish_construction(request).await?;
                Ok(format!(
                    "construction accepted as complete for project {}",
                    project.id()
                ))
            }
            WorkflowCommand::UndoFinishConstruction { project_id } => {
                let project = self.undo_finish_construction(project_id).await?;
                Ok(format!("completion reversed for project {}", project.id()))
            }
            WorkflowCommand::PauseProject(request) => {
                let project = self.pause_project(request).await?;
                Ok(format!("project {} suspended", project.id()))
            }
            WorkflowCommand::ResumeProject { project_id } => {
                let project = self.resume_project(project_id).await?;
                Ok(format!("project {} resumed", project.id()))
            }
            WorkflowCommand::CancelProject { project_id, reason } => {
                let project = self.cancel_project(project_id, reason).await?;
                Ok(format!("project {} cancelled", project.id()))
            }
            WorkflowCommand::UndoCancelProject { project_id } => {
                let project = self.undo_cancel_project(project_id).await?;
                Ok(format!(
                    "cancellation reversed for project {}, restored to '{}'",
                    project.id(),
                    project.state().as_str()
                ))
            }
        }
    }
}
