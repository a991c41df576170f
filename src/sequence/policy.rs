use serde::{Deserialize, Serialize};

/// What the window does when the call depth changes between two steps
///
/// Both policies suppress the n-gram that straddles the transition. They
/// differ in what survives it:
///
/// - `CarryForward`: the opcode executed at the new depth is still pushed
///   into the window and becomes the baseline for the next key. The window
///   is never cleared. This is the historical bigram behavior.
/// - `Reset`: the window is cleared back to placeholders and the opcode
///   that arrived at the new depth is discarded entirely. This is the
///   historical trigram behavior.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum DepthPolicy {
    /// Keep the window, skip only the straddling key
    CarryForward,
    /// Clear the window and drop the first opcode at the new depth
    Reset,
}

impl DepthPolicy {
    /// Default policy for an n-gram order
    ///
    /// Order 2 carries forward and every higher order resets, so bigram and
    /// trigram tracers reproduce their historical output exactly.
    pub fn for_order(order: usize) -> Self {
        if order <= 2 {
            DepthPolicy::CarryForward
        } else {
            DepthPolicy::Reset
        }
    }

    /// Stable kebab-case name, matching the config file spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            DepthPolicy::CarryForward => "carry-forward",
            DepthPolicy::Reset => "reset",
        }
    }
}

impl std::fmt::Display for DepthPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
