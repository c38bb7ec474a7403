//! itemforge-agents: Solving strategies for itemforge items.
//!
//! Baselines (oracle, fixed choice, seeded random), rule-based symbolic
//! solvers for the quadratic skills, a skill router, and the name-keyed
//! registry the CLI resolves `--agent` through.

pub mod baseline;
pub mod discriminant;
pub mod error;
pub mod factoring;
pub mod formula;
pub mod parse;
pub mod registry;
pub mod router;
pub mod vertex;

pub use baseline::{seeded_choice, FixedChoice, Oracle, SeededRandom};
pub use discriminant::DiscriminantSolver;
pub use error::SolveError;
pub use factoring::FactoringSolver;
pub use formula::FormulaSolver;
pub use registry::{available_agents, create_agent, run_named_eval, AgentInfo, AgentKind};
pub use router::Router;
pub use vertex::VertexSolver;
