//! Shared test utilities for integration and E2E tests.
//!
//! This module provides a fixture with a `deploy/` tree (profiles and
//! charts) laid out the way `dubboctl` expects to find it by default.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_deploy_tree();
//!     fixture.command().args(["manifest", "generate"]).assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::fixtures;
    pub use super::TestFixture;
}

/// Profile and chart contents used by the fixture.
#[allow(dead_code)]
pub mod fixtures {
    /// The `default` profile: admin on, everything else off.
    pub const DEFAULT_PROFILE: &str = r#"
namespace: dubbo-system
admin:
  enabled: true
proxy:
  enabled: false
"#;

    /// The `demo` profile: admin and proxy on.
    pub const DEMO_PROFILE: &str = r#"
proxy:
  enabled: true
"#;

    pub const ADMIN_TEMPLATE: &str = r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: admin
  namespace: {{ .Values.namespace }}
spec:
  replicas: {{ .Values.replicas }}
"#;

    pub const PROXY_TEMPLATE: &str = r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: proxy
  namespace: {{ .Values.namespace }}
spec:
  replicas: {{ .Values.replicas }}
"#;

    /// Chart defaults for the proxy.
    pub const PROXY_VALUES: &str = "replicas: 1\n";

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "admin: [unclosed";
}

/// A temporary directory, optionally populated with a `deploy/` tree.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add `deploy/profiles` and `deploy/charts` for the admin and proxy components.
    pub fn with_deploy_tree(self) -> Self {
        self.with_file("deploy/profiles/default.yaml", fixtures::DEFAULT_PROFILE)
            .with_file("deploy/profiles/demo.yaml", fixtures::DEMO_PROFILE)
            .with_file(
                "deploy/charts/admin/templates/deployment.yaml",
                fixtures::ADMIN_TEMPLATE,
            )
            .with_file("deploy/charts/admin/values.yaml", "replicas: 1\n")
            .with_file(
                "deploy/charts/proxy/templates/deployment.yaml",
                fixtures::PROXY_TEMPLATE,
            )
            .with_file("deploy/charts/proxy/values.yaml", fixtures::PROXY_VALUES)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    #[allow(dead_code)]
    pub fn profiles_path(&self) -> PathBuf {
        self.path().join("deploy/profiles")
    }

    #[allow(dead_code)]
    pub fn charts_path(&self) -> PathBuf {
        self.path().join("deploy/charts")
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a `dubboctl` command running in this fixture's directory.
    ///
    /// Path environment variables are cleared so the default `deploy/` paths apply.
    #[allow(dead_code)]
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("dubboctl");
        cmd.current_dir(self.path())
            .env_remove("DUBBOCTL_CHARTS")
            .env_remove("DUBBOCTL_PROFILES")
            .env_remove("RUST_LOG");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
