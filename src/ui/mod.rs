//! UI module: plain-text views, reports and the interactive editor

mod confirm;
mod editor_shell;
mod list_view;
mod report_view;

pub use confirm::confirm;
pub use editor_shell::{run_editor, ShellExit};
pub use list_view::{render_draft, render_forms};
pub use report_view::{
    render_question_analytics, render_response, render_responses, render_summary,
};
