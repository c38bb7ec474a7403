//! itemforge-core: Deterministic item generation, grading, and the eval harness.
//!
//! This crate defines the item data model, the skill catalog and generator,
//! the structural validator, the grader, the `Agent` trait that solving
//! strategies implement, and the seed-driven evaluation harness that ties
//! them together.

pub mod algebra;
pub mod config;
pub mod error;
pub mod generator;
pub mod grader;
pub mod harness;
pub mod hashing;
pub mod model;
pub mod normalize;
pub mod notation;
pub mod parser;
pub mod report;
pub mod skills;
pub mod statistics;
pub mod traits;
pub mod validator;

pub use error::{AgentError, GenerationError, GradeError, StructuralError};
pub use generator::generate;
pub use grader::{grade, GradeResult};
pub use harness::{run_eval, EvalHarness, EvalOutcome, HarnessConfig};
pub use model::{Choice, ChoiceId, Difficulty, EvalCase, Item};
pub use report::{EvalReport, ResultRow, RowStatus};
pub use traits::Agent;
pub use validator::validate;
