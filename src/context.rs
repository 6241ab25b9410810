// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::path::PathBuf;

use log::debug;

use crate::{
    catalog::{Catalog, ContainerSpec, MetaStoreType},
    error::ResolutionError,
    resolver::{self, AdminInfo},
    store_config::SynthesizedConfig,
};

/// The resolved meta store addressing shared by the context and the store config synthesizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaStoreInfo {
    /// zk: `host1:2181,host2:2181`, rqlite: `http://host1:4001,http://host2:4001`
    pub urls: String,
    pub kind: MetaStoreType,
    /// Total count of meta store instances.
    pub count: usize,
}

/// ClusterContext is the single resolved, cluster-wide parameter set derived from a catalog.
///
/// The build produces one through `PendingContext::finish()`, which requires the output of the
/// store config synthesizer, so the storage config template has already been rewritten for this
/// cluster by the time a context exists.
#[derive(Debug, Clone)]
pub struct ClusterContext {
    pub user: String,
    pub key_path: String,
    pub ssh_port: u16,
    pub meta_replica: u32,
    pub container_config: ContainerSpec,

    pub hosts: Vec<String>,
    pub seed_nodes: String,
    pub meta_store: MetaStoreInfo,
    /// zk only: where the storage nodes find their config inside the meta store.
    pub store_config_in_meta_store: String,
    pub admin_infos: Vec<AdminInfo>,
    pub hserver_urls: String,
    pub http_server_urls: Vec<String>,

    pub local_meta_store_config_file: String,
    /// The rewritten storage config template.
    pub local_hstore_config_file: PathBuf,
    pub local_hserver_config_file: String,
    pub local_es_config_file: String,
}

impl ClusterContext {
    pub fn meta_store_urls(&self) -> &str {
        &self.meta_store.urls
    }

    pub fn meta_store_type(&self) -> MetaStoreType {
        self.meta_store.kind
    }
}

/// A context with everything resolved except the location of the synthesized storage config.
#[derive(Debug, Clone)]
pub struct PendingContext {
    user: String,
    key_path: String,
    ssh_port: u16,
    meta_replica: u32,
    container_config: ContainerSpec,

    hosts: Vec<String>,
    seed_nodes: String,
    meta_store: MetaStoreInfo,
    store_config_in_meta_store: String,
    admin_infos: Vec<AdminInfo>,
    hserver_urls: String,
    http_server_urls: Vec<String>,

    local_meta_store_config_file: String,
    local_hserver_config_file: String,
    local_es_config_file: String,
}

pub struct ContextBuilder;

impl ContextBuilder {
    /// Resolve every cluster-wide field of the catalog.
    ///
    /// Fails if the meta store cannot be resolved. An empty admin list is not an error, though the
    /// cluster will not be initialized. The topology build reports it as a `BuildWarning`.
    pub fn resolve(c: &Catalog) -> Result<PendingContext, ResolutionError> {
        let (urls, kind) = resolver::meta_store_url(c)?;
        debug!("resolved {kind} meta store at {urls}");

        let admin_infos = resolver::admin_infos(c);
        if admin_infos.is_empty() {
            debug!("no admin nodes presented, the HStream cluster will not be initialized");
        }

        let store_config_in_meta_store = resolver::store_config_in_meta_store(c, &urls, kind);

        Ok(PendingContext {
            user: c.global.user.clone(),
            key_path: c.global.key_path.clone(),
            ssh_port: c.global.ssh_port,
            meta_replica: c.global.meta_replica,
            container_config: c.global.container_config.clone(),

            hosts: resolver::hosts(c),
            seed_nodes: resolver::seed_nodes(c),
            meta_store: MetaStoreInfo {
                urls,
                kind,
                count: c.meta_store.len(),
            },
            store_config_in_meta_store,
            admin_infos,
            hserver_urls: resolver::hserver_urls(c),
            http_server_urls: resolver::http_server_urls(c),

            local_meta_store_config_file: c.global.meta_store_config_path.clone(),
            local_hserver_config_file: c.global.hserver_config_path.clone(),
            local_es_config_file: c.global.es_config_path.clone(),
        })
    }
}

impl PendingContext {
    pub fn meta_store(&self) -> &MetaStoreInfo {
        &self.meta_store
    }

    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    pub fn seed_nodes(&self) -> &str {
        &self.seed_nodes
    }

    pub fn admin_infos(&self) -> &[AdminInfo] {
        &self.admin_infos
    }

    /// Complete the context with the location of the rewritten storage config.
    pub fn finish(self, store_config: SynthesizedConfig) -> ClusterContext {
        ClusterContext {
            user: self.user,
            key_path: self.key_path,
            ssh_port: self.ssh_port,
            meta_replica: self.meta_replica,
            container_config: self.container_config,

            hosts: self.hosts,
            seed_nodes: self.seed_nodes,
            meta_store: self.meta_store,
            store_config_in_meta_store: self.store_config_in_meta_store,
            admin_infos: self.admin_infos,
            hserver_urls: self.hserver_urls,
            http_server_urls: self.http_server_urls,

            local_meta_store_config_file: self.local_meta_store_config_file,
            local_hstore_config_file: store_config.into_path(),
            local_hserver_config_file: self.local_hserver_config_file,
            local_es_config_file: self.local_es_config_file,
        }
    }
}
