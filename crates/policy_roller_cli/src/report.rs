//! Colorized rendering of policy-run results.
//!
//! The report mirrors the plain layout produced by
//! [`OutcomeRecorder::render`]: a bold green header per project, a magenta
//! label per section, and the raw accepted response bodies underneath.
//! Colors degrade to plain text automatically when the output is not a
//! terminal.

use colored::Colorize;
use policy_roller_core::OutcomeRecorder;

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;

/// Renders the per-project, per-section report of a finished run.
pub fn render(outcomes: &OutcomeRecorder) -> String {
    let mut out = String::new();
    for project in outcomes.outcomes() {
        out.push_str(&format!(
            "{} \nNew configuration parameters are: \n",
            format!("Project {} successfully updated.", project.project_id)
                .bold()
                .green()
        ));
        for section in &project.sections {
            out.push_str(&format!(
                "{}\n{}\n",
                format!("{}: ", section.section).magenta(),
                section.body
            ));
        }
    }
    out
}

/// Renders the debug-mode listing of resolved target projects, one id per
/// line.
pub fn render_targets(project_ids: &[u64]) -> String {
    let mut out = format!(
        "{} \n",
        format!("Selected {} projects.", project_ids.len())
            .bold()
            .green()
    );
    for project_id in project_ids {
        out.push_str(&format!("{}\n", project_id));
    }
    out
}
