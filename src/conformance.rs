//! Corpus-based conformance testing.
//!
//! A corpus is a JSON file of test vectors. Each vector names an input text
//! and the expected outcome: either the compact serialization of the parsed
//! value, or failure.
//!
//! ```json
//! {
//!   "version": "1",
//!   "vectors": [
//!     { "id": "int", "input": "42", "expected": { "ok": "42" } },
//!     { "id": "open-object", "input": "{", "expected": "fail" }
//!   ]
//! }
//! ```
//!
//! Successful outputs are also parsed again and must serialize to the same
//! text.

use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::parser::parse_any;
use crate::serialize::serialize;
use crate::ParseContext;

/// Result type for conformance operations.
pub type ConformanceResult<T> = Result<T, ConformanceError>;

/// Errors that can occur while loading a corpus.
#[derive(Debug, Error)]
pub enum ConformanceError {
    /// The corpus file could not be read
    #[error("failed to read corpus file: {0}")]
    Io(#[from] std::io::Error),
    /// The corpus file is not a valid corpus document
    #[error("failed to decode corpus: {0}")]
    Corpus(#[from] serde_json::Error),
}

/// A corpus of test vectors.
#[derive(Debug, Clone, Deserialize)]
pub struct Corpus {
    /// Format version of the corpus file.
    pub version: String,
    /// Test vectors, run in order.
    pub vectors: Vec<TestVector>,
}

impl Corpus {
    /// Decode a corpus from JSON text.
    pub fn from_json(text: &str) -> ConformanceResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and decode a corpus file.
    pub fn load<P: AsRef<Path>>(path: P) -> ConformanceResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }
}

/// A single test vector.
#[derive(Debug, Clone, Deserialize)]
pub struct TestVector {
    /// Unique identifier for the vector.
    pub id: String,
    /// Free-form note on what the vector covers.
    #[serde(default)]
    pub note: Option<String>,
    /// Text handed to the parser.
    pub input: String,
    /// Expected outcome.
    pub expected: Expected,
}

/// Expected outcome of parsing a vector's input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expected {
    /// Parsing succeeds and the value serializes to this text.
    Ok(String),
    /// Parsing fails.
    Fail,
}

/// Result of running a single test vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestResult {
    /// Outcome matched.
    Pass,
    /// Outcome differed.
    Fail {
        /// Expected outcome, rendered for display.
        expected: String,
        /// Actual outcome, rendered for display.
        actual: String,
    },
}

impl TestResult {
    /// Returns true if this is a passing result.
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// Results from running a corpus.
#[derive(Debug, Default)]
pub struct CorpusResults {
    /// Number of vectors that passed.
    pub passed: usize,
    /// Number of vectors that failed.
    pub failed: usize,
    /// Result for each vector, in run order.
    pub details: Vec<(String, TestResult)>,
}

impl CorpusResults {
    /// Record a vector's result.
    pub fn record(&mut self, id: &str, result: TestResult) {
        if result.is_pass() {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        self.details.push((id.to_string(), result));
    }

    /// Total number of vectors run.
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    /// Returns true if no vector failed.
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// One-line summary.
    pub fn summary(&self) -> String {
        format!(
            "{} passed, {} failed (total: {})",
            self.passed,
            self.failed,
            self.total()
        )
    }

    /// Failing vectors only.
    pub fn failures(&self) -> Vec<&(String, TestResult)> {
        self.details.iter().filter(|(_, r)| !r.is_pass()).collect()
    }
}

/// Runs corpus vectors against the parser and serializer.
pub struct CorpusRunner {
    corpus: Corpus,
}

impl CorpusRunner {
    /// Wrap an already decoded corpus.
    pub fn new(corpus: Corpus) -> Self {
        Self { corpus }
    }

    /// Load a corpus file.
    pub fn load<P: AsRef<Path>>(path: P) -> ConformanceResult<Self> {
        Corpus::load(path).map(Self::new)
    }

    /// Corpus format version.
    pub fn version(&self) -> &str {
        &self.corpus.version
    }

    /// Number of test vectors.
    pub fn vector_count(&self) -> usize {
        self.corpus.vectors.len()
    }

    /// Run every vector.
    pub fn run_all(&self) -> CorpusResults {
        let mut results = CorpusResults::default();
        for vector in &self.corpus.vectors {
            let result = run_vector(vector);
            if !result.is_pass() {
                debug!("conformance vector {} failed: {result:?}", vector.id);
            }
            results.record(&vector.id, result);
        }
        results
    }
}

/// Parse a vector's input and compare with its expectation.
pub fn run_vector(vector: &TestVector) -> TestResult {
    let actual = parse_any(&mut ParseContext::for_str(&vector.input)).map(|v| serialize(&v));

    match (&vector.expected, actual) {
        (Expected::Fail, Err(_)) => TestResult::Pass,
        (Expected::Fail, Ok(text)) => TestResult::Fail {
            expected: "fail".to_string(),
            actual: format!("ok: {text}"),
        },
        (Expected::Ok(expected), Err(err)) => TestResult::Fail {
            expected: format!("ok: {expected}"),
            actual: format!("err: {err}"),
        },
        (Expected::Ok(expected), Ok(text)) if *expected != text => TestResult::Fail {
            expected: format!("ok: {expected}"),
            actual: format!("ok: {text}"),
        },
        (Expected::Ok(expected), Ok(text)) => {
            let reparsed =
                parse_any(&mut ParseContext::for_str(&text)).map(|v| serialize(&v));
            match reparsed {
                Ok(again) if again == text => TestResult::Pass,
                Ok(again) => TestResult::Fail {
                    expected: format!("stable: {expected}"),
                    actual: format!("reserialized: {again}"),
                },
                Err(err) => TestResult::Fail {
                    expected: format!("stable: {expected}"),
                    actual: format!("reparse err: {err}"),
                },
            }
        }
    }
}
