//! Determinism testing helpers.
//!
//! Assembly must produce byte-identical files for the same input folder and
//! parameters. These helpers hash outputs with BLAKE3 and compare runs.

use std::fmt;
use std::fs;
use std::path::Path;

use walkdir::WalkDir;

/// Result of a determinism verification.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether all runs produced identical output.
    pub is_deterministic: bool,
    /// Number of runs performed.
    pub runs: usize,
    /// BLAKE3 hash of the first run.
    pub hash: String,
    /// Run index and hash of the first run that differed.
    pub mismatch: Option<(usize, String)>,
}

impl fmt::Display for DeterminismResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.mismatch {
            None => write!(f, "{} run(s) identical ({})", self.runs, self.hash),
            Some((run, hash)) => write!(
                f,
                "run {} produced {} instead of {}",
                run, hash, self.hash
            ),
        }
    }
}

impl DeterminismResult {
    /// Panic with a detailed message if not deterministic.
    pub fn assert_deterministic(&self) {
        assert!(self.is_deterministic, "Non-deterministic output: {}", self);
    }
}

/// BLAKE3 hex digest of a file.
pub fn hash_file(path: &Path) -> String {
    let bytes = fs::read(path).unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e));
    blake3::hash(&bytes).to_hex().to_string()
}

/// BLAKE3 digest over every file under `root`, in path order, including relative names.
pub fn hash_tree(root: &Path) -> String {
    let mut hasher = blake3::Hasher::new();
    let mut files: Vec<_> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect();
    files.sort();

    for path in files {
        let relative = path.strip_prefix(root).unwrap_or(&path);
        hasher.update(relative.to_string_lossy().as_bytes());
        hasher.update(&[0]);
        hasher.update(hash_file(&path).as_bytes());
    }
    hasher.finalize().to_hex().to_string()
}

/// Runs `generate` `runs` times and compares the returned hashes.
///
/// # Panics
/// Panics if `runs < 2`.
pub fn verify_determinism<F>(generate: F, runs: usize) -> DeterminismResult
where
    F: Fn(usize) -> String,
{
    assert!(runs >= 2, "Must run at least 2 times to verify determinism");

    let reference = generate(0);
    for run in 1..runs {
        let hash = generate(run);
        if hash != reference {
            return DeterminismResult {
                is_deterministic: false,
                runs,
                hash: reference,
                mismatch: Some((run, hash)),
            };
        }
    }

    DeterminismResult {
        is_deterministic: true,
        runs,
        hash: reference,
        mismatch: None,
    }
}
