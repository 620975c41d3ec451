//! Shared helpers for integration tests: on-disk Java fixtures and listing inspection.
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use apilisting::{Analyser, AnalyserOptions, Analysis, TokenKind};
use tempfile::TempDir;

/// Write `files` (relative path, contents) into a fresh temporary source root.
pub fn create_java_project(files: &[(&str, &str)]) -> (TempDir, PathBuf) {
	let temp_dir = TempDir::new().expect("create temp dir");
	let root = temp_dir.path().join("src");
	for (relative, contents) in files {
		let path = root.join(relative);
		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent).expect("create package dirs");
		}
		fs::write(&path, contents).expect("write source file");
	}
	fs::create_dir_all(&root).expect("create source root");
	(temp_dir, root)
}

/// Analyse an on-disk project with default options.
pub fn analyse_project(files: &[(&str, &str)]) -> Analysis {
	let (_temp_dir, root) = create_java_project(files);
	Analyser::new(AnalyserOptions::new())
		.analyse_path(&root)
		.expect("analysis succeeds")
}

/// Analyse in-memory sources sequentially.
pub fn analyse_sources(files: &[(&str, &str)]) -> Analysis {
	let sources: Vec<(PathBuf, String)> = files
		.iter()
		.map(|(path, text)| (PathBuf::from(path), text.to_string()))
		.collect();
	Analyser::new(AnalyserOptions::new().with_parallel(false))
		.analyse_sources(&sources)
		.expect("analysis succeeds")
}

/// Values of all tokens of `kind`, in order.
pub fn values_of(analysis: &Analysis, kind: TokenKind) -> Vec<String> {
	analysis
		.listing
		.tokens
		.iter()
		.filter(|t| t.kind == kind)
		.map(|t| t.value.clone())
		.collect()
}
