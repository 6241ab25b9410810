// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::{
    collections::BTreeMap,
    io::{self, Write},
};

use crate::{
    context::ClusterContext,
    service::{DisplayedComponent, Service},
};

/// Components grouped by kind label, in the order the services were visited.
pub type Components = BTreeMap<&'static str, Vec<DisplayedComponent>>;

pub fn collect<'a>(services: impl IntoIterator<Item = &'a dyn Service>) -> Components {
    let mut grouped = Components::new();
    for service in services {
        for (kind, component) in service.display() {
            grouped.entry(kind).or_default().push(component);
        }
    }
    grouped
}

const HEADER: [&str; 6] = ["Name", "Host", "Ports", "Container", "Image", "Paths"];

fn row(c: &DisplayedComponent) -> [&str; 6] {
    [
        c.name.as_str(),
        c.host.as_str(),
        c.ports.as_str(),
        c.container_name.as_str(),
        c.image.as_str(),
        c.paths.as_str(),
    ]
}

/// Write one aligned table per component kind.
pub fn render(components: &Components, out: &mut impl Write) -> io::Result<()> {
    for (kind, list) in components {
        let mut widths = HEADER.map(str::len);
        for c in list {
            for (w, cell) in widths.iter_mut().zip(row(c)) {
                *w = (*w).max(cell.len());
            }
        }

        writeln!(out, "[{kind}]")?;
        write_row(out, &HEADER, &widths)?;
        let rule = widths.map(|w| "-".repeat(w));
        write_row(out, &rule.each_ref().map(String::as_str), &widths)?;
        for c in list {
            write_row(out, &row(c), &widths)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_row(out: &mut impl Write, cells: &[&str; 6], widths: &[usize; 6]) -> io::Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:<w$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{}", line.trim_end())
}

pub fn show_components<'a>(services: impl IntoIterator<Item = &'a dyn Service>) -> io::Result<()> {
    render(&collect(services), &mut io::stdout().lock())
}

/// Write the cluster-wide values collaborators consume.
pub fn render_context(ctx: &ClusterContext, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "hosts: {}", ctx.hosts.join(","))?;
    writeln!(out, "seed nodes: {}", ctx.seed_nodes)?;
    writeln!(
        out,
        "meta store: {} ({}, {} instance(s))",
        ctx.meta_store.urls, ctx.meta_store.kind, ctx.meta_store.count
    )?;
    if !ctx.store_config_in_meta_store.is_empty() {
        writeln!(out, "store config in meta store: {}", ctx.store_config_in_meta_store)?;
    }
    for admin in ctx.admin_infos.iter() {
        writeln!(
            out,
            "admin: {}:{} ({})",
            admin.host, admin.port, admin.container_name
        )?;
    }
    writeln!(
        out,
        "store config: {}",
        ctx.local_hstore_config_file.display()
    )?;
    Ok(())
}
