// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

pub mod catalog;
pub mod commands;
pub mod context;
pub mod display;
pub mod error;
pub mod resolver;
pub mod service;
pub mod store_config;
pub mod test_env;
pub mod topology;

pub use error::{DeployError, ResolutionError};

pub fn default_config_path() -> String {
    match std::env::var("HDT_CONFIG") {
        Ok(conf) => conf,
        Err(_) => "hstream.toml".to_string(),
    }
}

/// The storage engine config template which gets rewritten with the resolved meta store address.
pub fn default_store_template_path() -> String {
    match std::env::var("HDT_STORE_TEMPLATE") {
        Ok(path) => path,
        Err(_) => "template/logdevice.conf".to_string(),
    }
}
