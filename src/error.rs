// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while deriving the cluster-wide meta store address.
#[derive(Error, Debug, PartialEq)]
pub enum ResolutionError {
    #[error("no meta store instances are configured")]
    NoMetaStore,

    /// All meta store instances must share one backend.
    #[error("meta store instances mix backends: found both {0} and {1}")]
    MixedMetaStore(String, String),
}

#[derive(Error, Debug)]
pub enum DeployError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// A component kind was configured whose upstream dependency list is empty.
    #[error("{dependent} requested without a {dependency} instance")]
    Dependency {
        dependent: &'static str,
        dependency: &'static str,
    },

    #[error("can't set both zookeeper and rqlite sections in store config file \"{}\"", .path.display())]
    ConfigConflict { path: PathBuf },

    #[error("could not access \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed store config document \"{}\": {source}", .path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid component catalog: {0}")]
    Catalog(#[from] toml::de::Error),
}

impl DeployError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        DeployError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DeployError>;
