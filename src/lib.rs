
mod config;
mod document;
mod errors;
mod evaluator;
mod merge;
mod pipeline;
mod similarity;
mod vocab;

pub mod files_handling;

pub use config::{Config, EvalParams};
pub use document::{document_vector, DivisorPolicy};
pub use errors::{EvalError, Result};
pub use evaluator::Evaluator;
pub use merge::{mean, merge_main_context, merge_with, normalize_rows, unit_normalize, MergeStrategy, MergedMatrix, ZeroNorm};
pub use pipeline::Pipeline;
pub use similarity::{most_similar, most_similar_batch, most_similar_scored, DEFAULT_TOP_N};
pub use vocab::{Id2Word, Vocab, VocabEntry};
