//! Opgram - depth-aware opcode n-gram tracer
//!
//! This library provides the hook engine a VM execution tracer drives once
//! per executed instruction, accumulating a histogram of opcode n-grams
//! observed at constant call depth, plus a replay driver for recorded
//! struct-logs.

pub mod cli;
pub mod config;
pub mod output;
pub mod replay;
pub mod sequence;
