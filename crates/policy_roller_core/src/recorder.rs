//! Run-scoped collection of accepted update responses.
//!
//! This module provides the [`OutcomeRecorder`] every section manager
//! reports into. A recorder is constructed per run and handed down
//! explicitly, so tests can inspect one run's outcomes without any
//! cross-test leakage.

use gitlab_client::ApiResponse;

use crate::errors::ReconcileError;

#[cfg(test)]
#[path = "recorder_tests.rs"]
mod tests;

/// The responses one project accumulated during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectOutcome {
    /// Identifier of the project the sections belong to
    pub project_id: u64,

    /// Per-section accumulated bodies, in first-recorded order
    pub sections: Vec<SectionOutcome>,
}

/// The accumulated response text for one section of one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionOutcome {
    /// Section label, e.g. `Protected branches`
    pub section: String,

    /// Newline-separated response bodies, newest first
    pub body: String,
}

/// Collects the accepted responses of one reconciliation run.
///
/// Managers call [`OutcomeRecorder::record`] after every write. Accepted
/// responses are kept per project and section; a section written several
/// times for the same project (protected branches do this once per rule)
/// accumulates its bodies newest first. A response outside the accepted
/// set is fatal: `record` returns the failure and the run aborts.
///
/// Projects and sections render in insertion order, which the sequential
/// run model makes deterministic.
#[derive(Debug, Default)]
pub struct OutcomeRecorder {
    outcomes: Vec<ProjectOutcome>,
}

impl OutcomeRecorder {
    /// Creates a recorder with no recorded outcomes.
    pub fn new() -> Self {
        Self {
            outcomes: Vec::new(),
        }
    }

    /// Records a write response for one project and section.
    ///
    /// # Arguments
    ///
    /// * `project_id` - Project the write targeted.
    /// * `section` - Section label the response is filed under.
    /// * `response` - Raw status and body of the write.
    /// * `accepted_statuses` - Status codes counting as success for this
    ///   write.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::UpdateRejected`] when the response status
    /// is not in `accepted_statuses`; nothing is recorded in that case.
    pub fn record(
        &mut self,
        project_id: u64,
        section: &str,
        response: &ApiResponse,
        accepted_statuses: &[u16],
    ) -> Result<(), ReconcileError> {
        if !accepted_statuses.contains(&response.status) {
            return Err(ReconcileError::UpdateRejected {
                project_id,
                section: section.to_string(),
                status: response.status,
                body: response.body.clone(),
            });
        }

        let index = match self
            .outcomes
            .iter()
            .position(|outcome| outcome.project_id == project_id)
        {
            Some(index) => index,
            None => {
                self.outcomes.push(ProjectOutcome {
                    project_id,
                    sections: Vec::new(),
                });
                self.outcomes.len() - 1
            }
        };

        let sections = &mut self.outcomes[index].sections;
        match sections.iter_mut().find(|entry| entry.section == section) {
            Some(entry) => {
                entry.body = format!("{}\n{}", response.body, entry.body);
            }
            None => {
                sections.push(SectionOutcome {
                    section: section.to_string(),
                    body: response.body.clone(),
                });
            }
        }

        Ok(())
    }

    /// Renders the recorded outcomes as a plain-text report.
    ///
    /// One block per project, in the order projects were first recorded;
    /// within a block, one entry per section in first-recorded order.
    pub fn render(&self) -> String {
        let mut report = String::new();

        for outcome in &self.outcomes {
            report.push_str(&format!(
                "Project {} successfully updated. \nNew configuration parameters are: \n",
                outcome.project_id
            ));
            for entry in &outcome.sections {
                report.push_str(&format!("{}: \n{}\n", entry.section, entry.body));
            }
        }

        report
    }

    /// The recorded outcomes, in insertion order.
    pub fn outcomes(&self) -> &[ProjectOutcome] {
        &self.outcomes
    }

    /// Returns `true` when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}
