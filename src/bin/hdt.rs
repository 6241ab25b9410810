// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use clap::Parser;

use hdt_lib::commands::{self, Cli};

/// The hdt binary resolves a deployment plan from a component catalog.
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("HDT_LOG", "warn")).init();

    let args = Cli::parse();

    if commands::main(&args).is_err() {
        std::process::exit(1);
    }
}
