//! Source hygiene for the canvas crate.
//!
//! Scans production files under `src/` for patterns that crash the view or
//! silently swallow failures. Budgets only ever go down.

use std::fs;
use std::path::{Path, PathBuf};

struct Budget {
    pattern: &'static str,
    max: usize,
}

const CRASHES: &[Budget] = &[
    Budget { pattern: ".unwrap()", max: 0 },
    Budget { pattern: ".expect(", max: 0 },
    Budget { pattern: "panic!(", max: 0 },
    Budget { pattern: "unreachable!(", max: 0 },
    Budget { pattern: "todo!(", max: 0 },
    Budget { pattern: "unimplemented!(", max: 0 },
];

const SILENT_LOSS: &[Budget] = &[Budget { pattern: "let _ =", max: 0 }, Budget { pattern: ".ok()", max: 0 }];

const STYLE: &[Budget] = &[
    Budget { pattern: "#[allow(dead_code)]", max: 0 },
    Budget { pattern: "println!(", max: 0 },
    Budget { pattern: "eprintln!(", max: 0 },
    Budget { pattern: "dbg!(", max: 0 },
];

/// Modules with no behavior of their own.
const UNTESTED_OK: &[&str] = &["lib.rs", "consts.rs"];

struct SourceFile {
    path: PathBuf,
    content: String,
}

fn source_files() -> Vec<SourceFile> {
    let Ok(entries) = fs::read_dir("src") else {
        return Vec::new();
    };
    let mut files: Vec<SourceFile> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|e| e == "rs"))
        .filter(|p| !is_test_file(p))
        .filter_map(|path| fs::read_to_string(&path).map(|content| SourceFile { path, content }).ok())
        .collect();
    files.sort_by(|a, b| a.path.cmp(&b.path));
    files
}

fn is_test_file(path: &Path) -> bool {
    path.file_stem().is_some_and(|s| s.to_string_lossy().ends_with("_test"))
}

fn violations(files: &[SourceFile], budgets: &[Budget]) -> Vec<String> {
    budgets
        .iter()
        .filter_map(|budget| {
            let hits: Vec<(&Path, usize)> = files
                .iter()
                .map(|f| (f.path.as_path(), f.content.lines().filter(|l| l.contains(budget.pattern)).count()))
                .filter(|(_, n)| *n > 0)
                .collect();
            let found: usize = hits.iter().map(|(_, n)| n).sum();
            (found > budget.max).then(|| {
                let detail: Vec<String> = hits.iter().map(|(p, n)| format!("    {}: {n}", p.display())).collect();
                format!("  `{}`: found {found}, max {}\n{}", budget.pattern, budget.max, detail.join("\n"))
            })
        })
        .collect()
}

fn assert_within(budgets: &[Budget]) {
    let files = source_files();
    assert!(!files.is_empty(), "no sources found; run from the canvas crate root");
    let over = violations(&files, budgets);
    assert!(over.is_empty(), "budget exceeded:\n{}", over.join("\n"));
}

#[test]
fn no_crash_paths() {
    assert_within(CRASHES);
}

#[test]
fn no_silently_discarded_results() {
    assert_within(SILENT_LOSS);
}

#[test]
fn no_stray_output_or_dead_code() {
    assert_within(STYLE);
}

#[test]
fn every_module_has_sibling_tests() {
    let missing: Vec<String> = source_files()
        .iter()
        .filter_map(|f| {
            let name = f.path.file_name()?.to_string_lossy().into_owned();
            if UNTESTED_OK.contains(&name.as_str()) {
                return None;
            }
            let sibling = f.path.with_file_name(name.replace(".rs", "_test.rs"));
            (!sibling.exists()).then_some(name)
        })
        .collect();
    assert!(missing.is_empty(), "modules without a *_test.rs sibling: {missing:?}");
}
