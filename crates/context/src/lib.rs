//! URL context generation: deterministic topics, headline and description
//! for a landing page, plus the paced analysis pipeline that fronts it.

pub mod catalog;
pub mod generator;
pub mod hash;
pub mod pipeline;

pub use catalog::Category;
pub use generator::generate_context;
pub use hash::{hash_string, seeded_shuffle, SeededRandom};
pub use pipeline::{AnalysisPipeline, ANALYSIS_STEPS};
