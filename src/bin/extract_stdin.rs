//! Reads a saved results page from stdin and prints the extracted results as
//! JSON. The query text is taken from the command line.
//!
//! ```text
//! extract_stdin "rust programming" < page.html
//! ```

use serde::Serialize;
use serp_proxy::{extract_results_bytes, ExtractedResult, ExtractionStats, Options, Outcome};
use std::io::{self, Read};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Output {
    query: String,
    outcome: String,
    total_results: usize,
    results: Vec<ExtractedResult>,
    candidates: usize,
    rejected: usize,
}

fn rejected(stats: &ExtractionStats) -> usize {
    stats.rejected_ads + stats.rejected_features + stats.rejected_hidden + stats.rejected_short
}

fn main() {
    let query = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if query.trim().is_empty() {
        eprintln!("usage: extract_stdin <query> < page.html");
        std::process::exit(2);
    }

    let mut body = Vec::new();
    if io::stdin().read_to_end(&mut body).is_err() {
        eprintln!("Failed to read from stdin");
        std::process::exit(1);
    }

    let extraction = extract_results_bytes(&body, None, &query, &Options::default());

    let outcome = match extraction.outcome {
        Outcome::Organic => "organic".to_string(),
        Outcome::Degraded => "degraded".to_string(),
        Outcome::Placeholder(reason) => format!("placeholder ({reason:?})"),
    };
    let output = Output {
        query,
        outcome,
        total_results: extraction.results.len(),
        candidates: extraction.stats.candidates,
        rejected: rejected(&extraction.stats),
        results: extraction.results.into_vec(),
    };

    println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
}
