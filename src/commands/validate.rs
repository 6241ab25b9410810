// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use crate::{
    commands::{report_warnings, Cli, Handle, HandledResult},
    topology::Topology,
};

/// Run every stage of the build except the storage config rewrite, and print what would be used.
pub fn validate(cli: &Cli) -> HandledResult<()> {
    let catalog = cli.catalog()?;

    let checked =
        Topology::check(&catalog).handle_err(|e| eprintln!("Catalog does not resolve: {e}"))?;

    report_warnings(&checked.warnings);

    let ctx = &checked.context;
    let meta = ctx.meta_store();
    println!("hosts: {}", ctx.hosts().join(","));
    println!("seed nodes: {}", ctx.seed_nodes());
    println!(
        "meta store: {} ({}, {} instance(s))",
        meta.urls, meta.kind, meta.count
    );
    println!("admin nodes: {}", ctx.admin_infos().len());
    println!("components: {}", checked.components);

    Ok(())
}
