// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

pub mod plan;
pub mod validate;

use clap::{Parser, Subcommand};

use crate::{catalog::Catalog, topology::BuildWarning};

/// A `HandledError` represents an error that has already been handled. When you call a function
/// that returns a `HandledError` or `HandledResult`, you don't need to do anything with that error,
/// other than just be aware that it happened, and return it on to your caller.
///
/// `main()` has a special responsibility: since its "caller" is, in a certain sense, the operating
/// system, `main()` must return a nonzero exit status when it gets a `HandledError`.
///
/// The primary way to construct a `HandledError` is with the `handle_err()` function, which turns a
/// generic error into a `HandledError`, and also runs some caller-provided code to handle the
/// error. That provided code would normally do something like report the error to stderr.
#[derive(Debug, PartialEq)]
pub struct HandledError {}

pub type HandledResult<T> = std::result::Result<T, HandledError>;

pub trait Handle<T, F> {
    fn handle_err(self, handler: F) -> HandledResult<T>;
}

impl<T, E, F: FnOnce(E)> Handle<T, F> for std::result::Result<T, E> {
    /// Handle an error by running the provided `handler` code, giving it the error.
    ///
    /// Then, return a `HandledResult`, so that transitive callers of this function know that they
    /// do not need to do anything further to handle the error.
    fn handle_err(self, handler: F) -> HandledResult<T> {
        self.map_err(|e| {
            handler(e);
            HandledError {}
        })
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// The component catalog describing the cluster.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The storage config template to rewrite with the resolved meta store address.
    #[arg(long, global = true)]
    pub template: Option<String>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn config_path(&self) -> String {
        self.config
            .clone()
            .unwrap_or_else(crate::default_config_path)
    }

    /// The template named on the command line, then the one named in the catalog, then the
    /// default.
    pub fn template_path(&self, catalog: &Catalog) -> String {
        match (&self.template, catalog.global.hstore_config_path.as_str()) {
            (Some(path), _) => path.clone(),
            (None, "") => crate::default_store_template_path(),
            (None, path) => path.to_string(),
        }
    }

    /// Load the catalog named on the command line, reporting failures to stderr.
    pub fn catalog(&self) -> HandledResult<Catalog> {
        let path = self.config_path();
        if self.verbose {
            eprintln!("Loading catalog \"{path}\"");
        }
        Catalog::from_file(&path).handle_err(|e| eprintln!("Could not load catalog: {e}"))
    }
}

/// Print build warnings to stderr. This is the only place they are reported to the operator.
fn report_warnings(warnings: &[BuildWarning]) {
    for warning in warnings {
        match warning {
            BuildWarning::NoAdminNodes => {
                eprintln!("Warning: no admin nodes, the cluster will not be initialized")
            }
            BuildWarning::SkippedWithoutSearchEngine { kind, count } => {
                eprintln!("Warning: skipped {count} {kind} instance(s) without elasticsearch")
            }
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the cluster topology, rewrite the storage config, and show every component.
    Plan,
    /// Check that the catalog resolves, without touching the storage config.
    Validate,
}

pub fn main(cli: &Cli) -> HandledResult<()> {
    match &cli.command {
        Commands::Plan => plan::plan(cli),
        Commands::Validate => validate::validate(cli),
    }
}
