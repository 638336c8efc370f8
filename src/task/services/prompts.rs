//! Prompt and reminder templates.

use minijinja::{Environment, context};
use serde::Serialize;
use thiserror::Error;

use crate::task::domain::Task;

const PRIORITY_TEMPLATE: &str = "Task: {{ name }}
Deadline: {{ deadline }}
Current Priority: {{ priority }}
Suggest new priority: High, Medium, or Low based on urgency and importance.";

const ANALYSIS_TEMPLATE: &str = "Analyze these tasks and suggest which need urgent attention:
{%- for task in tasks %}
{{ task.name }} | Priority: {{ task.priority }} | Status: {{ task.status }}
{%- endfor %}";

const REMINDER_TEMPLATE: &str =
    "Reminder: '{{ name }}' is due at {{ deadline }} (Priority: {{ priority }})";

/// Failure rendering one of the built-in templates.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to render {template} template: {reason}")]
pub struct PromptRenderError {
    /// Template name.
    pub template: &'static str,
    /// Renderer diagnostic.
    pub reason: String,
}

#[derive(Debug, Serialize)]
struct SummaryLine<'a> {
    name: &'a str,
    priority: &'static str,
    status: &'static str,
}

fn render(
    template_name: &'static str,
    source: &str,
    ctx: minijinja::Value,
) -> Result<String, PromptRenderError> {
    Environment::new()
        .render_str(source, ctx)
        .map_err(|err| PromptRenderError {
            template: template_name,
            reason: err.to_string(),
        })
}

/// Renders the prompt asking for a priority suggestion for one task.
pub(crate) fn priority_prompt(task: &Task) -> Result<String, PromptRenderError> {
    render(
        "priority",
        PRIORITY_TEMPLATE,
        context! {
            name => task.name(),
            deadline => task.deadline().to_string(),
            priority => task.priority().as_str(),
        },
    )
}

/// Renders the prompt summarizing every task in order.
pub(crate) fn analysis_prompt(tasks: &[Task]) -> Result<String, PromptRenderError> {
    let lines: Vec<SummaryLine<'_>> = tasks
        .iter()
        .map(|task| SummaryLine {
            name: task.name(),
            priority: task.priority().as_str(),
            status: task.status().as_str(),
        })
        .collect();
    render("analysis", ANALYSIS_TEMPLATE, context! { tasks => lines })
}

/// Renders the reminder text sent for a due task.
pub(crate) fn reminder_message(task: &Task) -> Result<String, PromptRenderError> {
    render(
        "reminder",
        REMINDER_TEMPLATE,
        context! {
            name => task.name(),
            deadline => task.deadline().to_string(),
            priority => task.priority().as_str(),
        },
    )
}
