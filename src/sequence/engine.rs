//! Per-instruction hook engine
//!
//! The host tracer calls [`NgramTracer::on_step`] for every executed
//! instruction, [`NgramTracer::on_fault`] when an instruction fails, and
//! [`NgramTracer::on_result`] once at the end of the execution.

use serde::Serialize;

use crate::config::NgramConfig;
use crate::sequence::histogram::Histogram;
use crate::sequence::ngram::ngram_key;
use crate::sequence::policy::DepthPolicy;
use crate::sequence::window::Window;

/// Nesting level of the executing frame, opaque to the engine
pub type CallDepth = u64;

/// The two facts the engine needs from a driver's per-step log
pub trait StepLog {
    /// Instruction mnemonic, e.g. `"PUSH1"`
    fn opcode(&self) -> &str;

    /// Call depth the instruction executed at
    fn depth(&self) -> CallDepth;
}

/// Owned step record, handy for recorded traces and tests
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct StepEvent {
    pub op: String,
    pub depth: CallDepth,
}

impl StepEvent {
    pub fn new(op: impl Into<String>, depth: CallDepth) -> Self {
        Self {
            op: op.into(),
            depth,
        }
    }
}

impl StepLog for StepEvent {
    fn opcode(&self) -> &str {
        &self.op
    }

    fn depth(&self) -> CallDepth {
        self.depth
    }
}

/// Depth-aware n-gram accumulator for a single traced execution
///
/// Create one per execution and drop it after reading the result. The
/// engine holds no shared state, so concurrent executions simply use
/// independent instances.
///
/// The histogram is never capped: an execution with many distinct
/// sequences grows it for as long as new keys appear.
#[derive(Debug, Clone)]
pub struct NgramTracer {
    config: NgramConfig,
    window: Window,
    last_depth: CallDepth,
    hist: Histogram,
}

impl NgramTracer {
    pub fn new(config: NgramConfig) -> Self {
        tracing::debug!(
            order = config.order(),
            policy = %config.policy(),
            "creating n-gram tracer"
        );

        Self {
            window: Window::new(config.order() - 1),
            config,
            last_depth: 0,
            hist: Histogram::new(),
        }
    }

    /// Order-2 tracer with the carry-forward policy
    pub fn bigram() -> Self {
        Self::new(NgramConfig::bigram())
    }

    /// Order-3 tracer with the reset policy
    pub fn trigram() -> Self {
        Self::new(NgramConfig::trigram())
    }

    pub fn config(&self) -> NgramConfig {
        self.config
    }

    /// Record one executed instruction
    pub fn on_step(&mut self, opcode: &str, depth: CallDepth) {
        let same_depth = depth == self.last_depth;

        match self.config.policy() {
            DepthPolicy::CarryForward => {
                if same_depth {
                    self.count(opcode);
                }
                self.window.push(opcode);
                self.last_depth = depth;
            }
            DepthPolicy::Reset => {
                if !same_depth {
                    tracing::trace!(
                        from = self.last_depth,
                        to = depth,
                        opcode,
                        "depth changed, window reset"
                    );
                    self.window.reset();
                    self.last_depth = depth;
                    return;
                }
                self.count(opcode);
                self.window.push(opcode);
            }
        }
    }

    /// Failed instructions are ignored; they never reach the window
    pub fn on_fault(&mut self, opcode: &str, depth: CallDepth) {
        tracing::trace!(opcode, depth, "fault ignored");
    }

    /// Histogram accumulated so far
    ///
    /// Reading it does not change the engine, so repeated calls return the
    /// same mapping.
    pub fn on_result(&self) -> &Histogram {
        &self.hist
    }

    /// [`on_step`](Self::on_step) for any driver log type
    pub fn step<L: StepLog + ?Sized>(&mut self, log: &L) {
        self.on_step(log.opcode(), log.depth());
    }

    /// [`on_fault`](Self::on_fault) for any driver log type
    pub fn fault<L: StepLog + ?Sized>(&mut self, log: &L) {
        self.on_fault(log.opcode(), log.depth());
    }

    /// Consume the engine and hand the histogram to the caller
    pub fn into_result(self) -> Histogram {
        self.hist
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Depth of the last counted or baseline step
    pub fn last_depth(&self) -> CallDepth {
        self.last_depth
    }

    fn count(&mut self, opcode: &str) {
        let key = ngram_key(&self.window, opcode);
        let count = self.hist.increment(key);
        tracing::trace!(opcode, count, "n-gram counted");
    }
}
