//! One module per subcommand. Each `execute` returns the process exit code.

pub mod compare;
pub mod generate;
pub mod grade;
pub mod init;
pub mod list_agents;
pub mod list_skills;
pub mod run;
pub mod validate;

/// Threshold met, or the command simply succeeded.
pub const EXIT_OK: i32 = 0;
/// Accuracy below threshold, regressions found, or invalid cases.
pub const EXIT_FAILED: i32 = 1;
/// I/O or usage error.
pub const EXIT_ERROR: i32 = 2;
