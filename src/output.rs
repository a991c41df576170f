//! Rendering of a finished histogram for the replay CLI

use std::fmt::Write as _;

use crate::config::NgramConfig;
use crate::sequence::Histogram;

/// Pretty JSON object of key to count, keys sorted for stable diffs
pub fn to_json(hist: &Histogram) -> serde_json::Result<String> {
    let sorted: std::collections::BTreeMap<_, _> = hist.iter().collect();
    serde_json::to_string_pretty(&sorted)
}

/// Top-`k` table followed by a one-line summary
pub fn to_text(hist: &Histogram, config: NgramConfig, k: usize) -> String {
    let mut out = String::new();

    if hist.is_empty() {
        out.push_str("No n-grams recorded.\n");
        return out;
    }

    let _ = writeln!(
        out,
        "=== Top {} {}-grams (policy: {}) ===",
        k.min(hist.len()),
        config.order(),
        config.policy()
    );
    for (key, count) in hist.top(k) {
        let _ = writeln!(out, "{:>10}  {}", count, key);
    }
    let _ = writeln!(
        out,
        "\n{} distinct keys, {} n-grams, coverage {:.2}%",
        hist.len(),
        hist.total(),
        hist.coverage() * 100.0
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Histogram {
        let mut hist = Histogram::new();
        hist.increment("PUSH1-PUSH1".to_string());
        hist.increment("PUSH1-PUSH1".to_string());
        hist.increment("-PUSH1".to_string());
        hist
    }

    #[test]
    fn test_json_is_sorted_object() {
        let json = to_json(&sample()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["PUSH1-PUSH1"], 2);
        assert_eq!(parsed["-PUSH1"], 1);
        assert!(json.find("-PUSH1").unwrap() < json.find("PUSH1-PUSH1").unwrap());
    }

    #[test]
    fn test_text_lists_hottest_first() {
        let text = to_text(&sample(), NgramConfig::bigram(), 10);

        assert!(text.contains("Top 2 2-grams (policy: carry-forward)"));
        assert!(text.find("PUSH1-PUSH1").unwrap() < text.find("  -PUSH1\n").unwrap());
        assert!(text.contains("2 distinct keys, 3 n-grams"));
    }

    #[test]
    fn test_text_empty() {
        let text = to_text(&Histogram::new(), NgramConfig::trigram(), 5);
        assert_eq!(text, "No n-grams recorded.\n");
    }
}
