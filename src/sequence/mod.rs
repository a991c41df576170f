// N-gram Sequence Analysis for Opcode Profiling
//
// This module implements the per-instruction hook engine that mines opcode
// n-grams from a running VM. Instead of just counting opcodes, it counts
// short instruction sequences executed at the same call depth, which makes
// the histogram usable for bytecode profiling and behavioral fingerprinting.
//
// Key Insight: a call boundary is not part of a contract's instruction
// stream. Sequences that straddle a depth change are never counted; what
// happens to the window at that boundary is governed by `DepthPolicy`.

mod engine;
mod histogram;
mod ngram;
mod policy;
mod window;

pub use engine::{CallDepth, NgramTracer, StepEvent, StepLog};
pub use histogram::{Histogram, HistogramError};
pub use ngram::{count_ngrams, ngram_key, split_key, KEY_DELIMITER};
pub use policy::DepthPolicy;
pub use window::{Window, PLACEHOLDER};
