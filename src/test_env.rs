// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::{io, path::PathBuf};

use crate::catalog::Catalog;

/// Given a relative `path` in the test directory, prepend the
/// full path to the test directory.
fn test_path(path: &str) -> String {
    std::env::var("CARGO_MANIFEST_DIR").unwrap() + "/tests/" + path
}

trait IgnoreEexist {
    fn ignore_eexist(self) -> Self;
}

impl IgnoreEexist for io::Result<()> {
    fn ignore_eexist(self) -> Self {
        match self {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// A TestEnvironment holds all the information needed to access a test's state. This includes a
/// "private" working directory holding the test's copy of the storage config template, which the
/// topology build rewrites in place.
///
/// All access to the test's state on the filesystem should be done via methods on TestEnvironment
/// rather than coded in the tests themselves.
pub struct TestEnvironment {
    /// The name of the test, used to find its catalog and its private directory.
    test_id: String,

    /// The path to this test's private working directory.
    private_dir_path: PathBuf,
}

impl TestEnvironment {
    /// Set up an environment for a test named `test_id`.
    ///
    /// Creates a specific unique subdirectory for the test, emptied of anything a previous run
    /// left behind.
    pub fn new(test_id: &str) -> Self {
        let private_dir_path = PathBuf::from(test_path(&format!("test_output/{test_id}")));
        match std::fs::remove_dir_all(&private_dir_path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => panic!("Could not clean up test directory: {e}"),
        };

        std::fs::create_dir(test_path("test_output"))
            .ignore_eexist()
            .unwrap();
        std::fs::create_dir(&private_dir_path).unwrap();

        Self {
            test_id: test_id.to_string(),
            private_dir_path,
        }
    }

    /// Load the catalog for this test. This assumes that the catalog for the test is in a toml
    /// file named {test_id}.toml.
    pub fn catalog(&self) -> Catalog {
        self.catalog_named(&self.test_id)
    }

    /// Load the catalog in {name}.toml, for tests sharing another test's catalog.
    pub fn catalog_named(&self, name: &str) -> Catalog {
        Catalog::from_file(self.catalog_path(name)).unwrap()
    }

    /// The path to {name}.toml, for tests that pass a catalog on the command line.
    pub fn catalog_path(&self, name: &str) -> String {
        test_path(&format!("{name}.toml"))
    }

    pub fn template_path(&self) -> PathBuf {
        self.private_dir_path.join("logdevice.conf")
    }

    /// Copy the shared template fixture into the test's private directory.
    pub fn install_template(&self) -> PathBuf {
        self.write_template(&std::fs::read_to_string(test_path("logdevice.conf")).unwrap())
    }

    /// Write `contents` as this test's template.
    pub fn write_template(&self, contents: &str) -> PathBuf {
        let path = self.template_path();
        std::fs::write(&path, contents).unwrap();
        path
    }

    pub fn read_template(&self) -> String {
        std::fs::read_to_string(self.template_path()).unwrap()
    }

    /// Parse this test's template as generic JSON.
    pub fn template_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.read_template()).unwrap()
    }
}
