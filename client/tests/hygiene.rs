//! Hygiene checks over the dashboard's production sources.
//!
//! Browser code has no caller to hand an error to, so failures are logged
//! rather than discarded. Budgets only ever shrink.

use std::fs;
use std::path::{Path, PathBuf};

struct Budget {
    pattern: &'static str,
    max: usize,
}

const UNWRAP: Budget = Budget { pattern: ".unwrap()", max: 0 };
const EXPECT: Budget = Budget { pattern: ".expect(", max: 0 };
const PANIC: Budget = Budget { pattern: "panic!(", max: 0 };
const SILENT_DISCARD: Budget = Budget { pattern: "let _ =", max: 0 };

/// Production files under `src/`, test modules excluded.
fn production_files() -> Vec<(PathBuf, String)> {
    let mut out = Vec::new();
    walk(Path::new("src"), &mut out);
    out
}

fn walk(dir: &Path, out: &mut Vec<(PathBuf, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, out);
            continue;
        }
        let name = path.file_name().unwrap_or_default().to_string_lossy().into_owned();
        if !name.ends_with(".rs") || name.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push((path, content));
        }
    }
}

fn check(budget: &Budget) {
    let files = production_files();
    assert!(!files.is_empty(), "no sources found; run from the crate root");

    let hits: Vec<String> = files
        .iter()
        .flat_map(|(path, content)| {
            content
                .lines()
                .enumerate()
                .filter(|(_, line)| line.contains(budget.pattern))
                .map(move |(n, _)| format!("  {}:{}", path.display(), n + 1))
        })
        .collect();

    assert!(
        hits.len() <= budget.max,
        "`{}` budget exceeded: {} > {}\n{}",
        budget.pattern,
        hits.len(),
        budget.max,
        hits.join("\n")
    );
}

#[test]
fn unwrap_budget() {
    check(&UNWRAP);
}

#[test]
fn expect_budget() {
    check(&EXPECT);
}

#[test]
fn panic_budget() {
    check(&PANIC);
}

#[test]
fn silent_discard_budget() {
    check(&SILENT_DISCARD);
}
