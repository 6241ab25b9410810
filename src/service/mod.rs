// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::collections::BTreeMap;

mod hstream;
mod logging;
mod monitor;

pub use {
    hstream::{HAdmin, HServer, HStore, HttpServer, MetaStore},
    logging::{ElasticSearch, Filebeat, Kibana},
    monitor::{AlertManager, Grafana, HStreamExporter, MonitorSuite, Prometheus},
};

/// A human readable summary of one deployed component, as shown in the per-kind tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayedComponent {
    pub name: String,
    pub host: String,
    pub ports: String,
    pub container_name: String,
    pub image: String,
    pub paths: String,
}

/// Display output of a service: component kind label to summary. Most services describe a single
/// component, but a service may bundle several (e.g. the per-host monitoring suite).
pub type DisplayMap = BTreeMap<&'static str, DisplayedComponent>;

/// A deployable component instance in a resolved topology.
pub trait Service: std::fmt::Debug {
    /// 1-based position of this instance among the instances of its kind.
    fn id(&self) -> u32;

    fn service_name(&self) -> String;

    fn display(&self) -> DisplayMap;
}

/// Pair each spec with its 1-based ordinal and build a descriptor from it.
pub(crate) fn with_ordinals<S, T>(specs: &[S], build: impl Fn(u32, &S) -> T) -> Vec<T> {
    specs
        .iter()
        .enumerate()
        .map(|(idx, spec)| build(idx as u32 + 1, spec))
        .collect()
}

fn ports(ports: &[u16]) -> String {
    ports
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join("/")
}

fn single(label: &'static str, component: DisplayedComponent) -> DisplayMap {
    BTreeMap::from([(label, component)])
}
