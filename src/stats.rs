use crate::params::Params;
use crate::tree::SuffixTree;
use crate::trie::BuildStats;
use anyhow::{Context, Result};
use serde::Serialize;
use std::time::Duration;

/// Summary of one construction run, printed by the CLI or emitted as JSON
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub text_len: usize,
    pub block_len: usize,
    /// Decimal string; the prime may exceed 64 bits
    pub p: String,
    pub x: String,
    pub seed: Option<u64>,
    pub node_count: usize,
    pub leaf_count: usize,
    pub height: usize,
    pub is_simple: bool,
    pub stats: BuildStats,
    pub params_ms: f64,
    pub build_ms: f64,
    /// `None` unless verification was requested
    pub verified: Option<bool>,
}

impl BuildReport {
    pub fn new(tree: &SuffixTree<'_>, params: &Params, seed: Option<u64>) -> Self {
        Self {
            text_len: tree.text().len(),
            block_len: tree.block_len(),
            p: params.p().to_string(),
            x: params.x().to_string(),
            seed,
            node_count: tree.node_count(),
            leaf_count: tree.leaf_count(),
            height: tree.height(),
            is_simple: tree.is_simple(),
            stats: tree.stats(),
            params_ms: 0.0,
            build_ms: 0.0,
            verified: None,
        }
    }

    pub fn with_timings(mut self, params: Duration, build: Duration) -> Self {
        self.params_ms = millis(params);
        self.build_ms = millis(build);
        self
    }

    pub fn with_verified(mut self, verified: bool) -> Self {
        self.verified = Some(verified);
        self
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize build report")
    }
}

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

/// Format a duration in milliseconds to human readable
pub fn format_millis(ms: f64) -> String {
    if ms >= 60_000.0 {
        format!("{:.1} min", ms / 60_000.0)
    } else if ms >= 1000.0 {
        format!("{:.2} s", ms / 1000.0)
    } else {
        format!("{:.2} ms", ms)
    }
}

/// Format a count with thousands separators
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Shorten a long decimal number to its leading and trailing digits
pub fn abbreviate_digits(number: &str, keep: usize) -> String {
    if number.len() <= keep * 2 + 3 {
        return number.to_string();
    }
    format!(
        "{}...{} ({} digits)",
        &number[..keep],
        &number[number.len() - keep..],
        number.len()
    )
}
