//! itemforge-report: Writing and reading eval output.
//!
//! The JSONL row sink is the primary artifact of a run; Markdown and HTML
//! renderings of an [`EvalReport`](itemforge_core::report::EvalReport) are
//! optional extras.

pub mod html;
pub mod jsonl;
pub mod markdown;

pub use html::{generate_html, write_html_report};
pub use jsonl::{read_rows, write_rows};
pub use markdown::generate_markdown;
