// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::io;

use crate::{
    commands::{report_warnings, Cli, Handle, HandledResult},
    display,
    topology::Topology,
};

pub fn plan(cli: &Cli) -> HandledResult<()> {
    let catalog = cli.catalog()?;
    let template = cli.template_path(&catalog);

    let topology = Topology::build(&catalog, &template)
        .handle_err(|e| eprintln!("Could not build deployment plan: {e}"))?;

    report_warnings(&topology.warnings);

    display::render_context(&topology.global, &mut io::stdout().lock())
        .handle_err(|e| eprintln!("Could not write summary: {e}"))?;
    println!();
    display::show_components(topology.services())
        .handle_err(|e| eprintln!("Could not write components: {e}"))
}
