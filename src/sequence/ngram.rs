use crate::config::NgramConfig;
use crate::sequence::engine::{NgramTracer, StepLog};
use crate::sequence::histogram::Histogram;
use crate::sequence::window::Window;

/// Separator between the tokens of an n-gram key
pub const KEY_DELIMITER: char = '-';

/// Builds the key for `opcode` following the current window contents
///
/// Placeholders are joined literally as empty segments, so a key always has
/// `window.len() + 1` segments.
///
/// # Example
/// ```
/// use opgram::sequence::{ngram_key, Window};
///
/// let mut window = Window::new(2);
/// window.push("PUSH1");
///
/// assert_eq!(ngram_key(&window, "MSTORE"), "-PUSH1-MSTORE");
/// ```
pub fn ngram_key(window: &Window, opcode: &str) -> String {
    let len: usize = window.iter().map(|token| token.len() + 1).sum();
    let mut key = String::with_capacity(len + opcode.len());
    for token in window.iter() {
        key.push_str(token);
        key.push(KEY_DELIMITER);
    }
    key.push_str(opcode);
    key
}

/// Splits a key back into its tokens
///
/// Only unambiguous when no opcode itself contains [`KEY_DELIMITER`], which
/// holds for VM mnemonics.
pub fn split_key(key: &str) -> Vec<&str> {
    key.split(KEY_DELIMITER).collect()
}

/// Runs a recorded step sequence through a fresh engine
///
/// Every entry is treated as a successful step; use the replay driver when
/// the recording also carries faults.
///
/// # Example
/// ```
/// use opgram::config::NgramConfig;
/// use opgram::sequence::{count_ngrams, StepEvent};
///
/// let steps = vec![StepEvent::new("PUSH1", 1), StepEvent::new("PUSH1", 1)];
/// let hist = count_ngrams(&steps, NgramConfig::bigram());
///
/// assert_eq!(hist.get("PUSH1-PUSH1"), Some(1));
/// ```
pub fn count_ngrams<L: StepLog>(steps: &[L], config: NgramConfig) -> Histogram {
    let mut tracer = NgramTracer::new(config);
    for step in steps {
        tracer.step(step);
    }
    tracer.into_result()
}
