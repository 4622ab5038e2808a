//! Common test utilities for filekit integration tests
//!
//! This module provides shared test infrastructure including:
//! - Tracing setup for test output
//! - Temporary workspace management
//! - Fixed clocks for deterministic placeholder expansion

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Once};

use chrono::{FixedOffset, TimeZone};
use filekit::path::{Clock, FixedClock};
use tempfile::TempDir;

static TRACING: Once = Once::new();

/// Install a test-writer subscriber once per test binary (RUST_LOG controls the filter)
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Clock pinned to midday UTC on the given date
pub fn fixed_clock(year: i32, month: u32, day: u32) -> Arc<dyn Clock> {
    let now = FixedOffset::east_opt(0)
        .expect("valid offset")
        .with_ymd_and_hms(year, month, day, 12, 0, 0)
        .unwrap();
    Arc::new(FixedClock(now))
}

/// Temporary directory tree for filesystem tests
pub struct Workspace {
    dir: TempDir,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    pub fn new() -> Self {
        init_tracing();
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Root of the workspace as a string, for APIs that take string paths
    pub fn root(&self) -> String {
        self.dir.path().to_string_lossy().into_owned()
    }

    /// Write `content` to `name` inside the workspace, creating parents
    pub fn write_file(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }
}
