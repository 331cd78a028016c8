//! Shared helpers for golden-fixture tests, token snapshots and benchmarks.

pub mod fixtures;
pub mod perf;
pub mod token_snapshot;

pub use fixtures::{Fixture, FixtureConfig, FixtureError, load_fixture, load_fixtures};

const MAX_REPORTED: usize = 8;

fn split_indent(line: &str) -> (&str, &str) {
    let body = line.trim_start_matches([' ', '\t']);
    (&line[..line.len() - body.len()], body)
}

/// Lists the lines where `actual` differs from `expected`. A line whose text
/// matches but whose leading whitespace does not is reported by its
/// indentation alone.
pub fn mismatch_report(expected: &[String], actual: &[String]) -> String {
    use std::fmt::Write;
    let count = expected.len().max(actual.len());
    let mismatched: Vec<usize> = (0..count)
        .filter(|&i| expected.get(i) != actual.get(i))
        .collect();
    let mut out = String::new();
    for &i in mismatched.iter().take(MAX_REPORTED) {
        let (e, a) = (expected.get(i), actual.get(i));
        match (e.map(|l| split_indent(l)), a.map(|l| split_indent(l))) {
            (Some((e_indent, body)), Some((a_indent, a_body))) if body == a_body => {
                let _ = writeln!(out, "line {}: indent {e_indent:?} != {a_indent:?} before {body:?}", i + 1);
            }
            _ => {
                let missing = "<missing>".to_string();
                let _ = writeln!(out, "line {}:", i + 1);
                let _ = writeln!(out, "  expected {:?}", e.unwrap_or(&missing));
                let _ = writeln!(out, "    actual {:?}", a.unwrap_or(&missing));
            }
        }
    }
    if mismatched.len() > MAX_REPORTED {
        let _ = writeln!(out, "... {} more", mismatched.len() - MAX_REPORTED);
    }
    let _ = writeln!(out, "{} of {count} lines differ", mismatched.len());
    out
}
