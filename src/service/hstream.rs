// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use super::{ports, single, DisplayMap, DisplayedComponent, Service};
use crate::catalog::{HAdminSpec, HServerSpec, HStoreSpec, HttpServerSpec, MetaStoreSpec};

#[derive(Debug, Clone)]
pub struct HServer {
    pub id: u32,
    pub spec: HServerSpec,
}

impl HServer {
    pub fn new(id: u32, spec: &HServerSpec) -> Self {
        HServer {
            id,
            spec: spec.clone(),
        }
    }

    /// This server's address in the seed node list.
    pub fn internal_address(&self) -> String {
        format!("{}:{}", self.spec.host, self.spec.internal_port)
    }
}

impl Service for HServer {
    fn id(&self) -> u32 {
        self.id
    }

    fn service_name(&self) -> String {
        format!("hserver-{}", self.id)
    }

    fn display(&self) -> DisplayMap {
        single(
            "HServer",
            DisplayedComponent {
                name: self.service_name(),
                host: self.spec.host.clone(),
                ports: ports(&[self.spec.port, self.spec.internal_port]),
                container_name: HServerSpec::CONTAINER_NAME.to_string(),
                image: self.spec.image.clone(),
                paths: format!("{},{}", self.spec.remote_config_path, self.spec.data_dir),
            },
        )
    }
}

#[derive(Debug, Clone)]
pub struct HStore {
    pub id: u32,
    pub spec: HStoreSpec,
}

impl HStore {
    pub fn new(id: u32, spec: &HStoreSpec) -> Self {
        HStore {
            id,
            spec: spec.clone(),
        }
    }
}

impl Service for HStore {
    fn id(&self) -> u32 {
        self.id
    }

    fn service_name(&self) -> String {
        format!("hstore-{}", self.id)
    }

    fn display(&self) -> DisplayMap {
        let ports = if self.spec.enable_admin {
            ports(&[self.spec.admin_port])
        } else {
            String::new()
        };
        single(
            "HStore",
            DisplayedComponent {
                name: self.service_name(),
                host: self.spec.host.clone(),
                ports,
                container_name: HStoreSpec::CONTAINER_NAME.to_string(),
                image: self.spec.image.clone(),
                paths: format!("{},{}", self.spec.remote_config_path, self.spec.data_dir),
            },
        )
    }
}

#[derive(Debug, Clone)]
pub struct HAdmin {
    pub id: u32,
    pub spec: HAdminSpec,
}

impl HAdmin {
    pub fn new(id: u32, spec: &HAdminSpec) -> Self {
        HAdmin {
            id,
            spec: spec.clone(),
        }
    }
}

impl Service for HAdmin {
    fn id(&self) -> u32 {
        self.id
    }

    fn service_name(&self) -> String {
        format!("hadmin-{}", self.id)
    }

    fn display(&self) -> DisplayMap {
        single(
            "HAdmin",
            DisplayedComponent {
                name: self.service_name(),
                host: self.spec.host.clone(),
                ports: ports(&[self.spec.admin_port]),
                container_name: HAdminSpec::CONTAINER_NAME.to_string(),
                image: self.spec.image.clone(),
                paths: self.spec.remote_config_path.clone(),
            },
        )
    }
}

#[derive(Debug, Clone)]
pub struct MetaStore {
    pub id: u32,
    pub spec: MetaStoreSpec,
}

impl MetaStore {
    pub fn new(id: u32, spec: &MetaStoreSpec) -> Self {
        MetaStore {
            id,
            spec: spec.clone(),
        }
    }
}

impl Service for MetaStore {
    fn id(&self) -> u32 {
        self.id
    }

    fn service_name(&self) -> String {
        format!("{}-{}", self.spec.kind, self.id)
    }

    fn display(&self) -> DisplayMap {
        let ports = match self.spec.kind {
            crate::catalog::MetaStoreType::Zk => ports(&[self.spec.port()]),
            crate::catalog::MetaStoreType::Rqlite => {
                ports(&[self.spec.port(), self.spec.raft_port])
            }
        };
        single(
            "MetaStore",
            DisplayedComponent {
                name: self.service_name(),
                host: self.spec.host.clone(),
                ports,
                container_name: MetaStoreSpec::CONTAINER_NAME.to_string(),
                image: self.spec.image().to_string(),
                paths: format!("{},{}", self.spec.remote_config_path, self.spec.data_dir),
            },
        )
    }
}

/// The HTTP gateway.
#[derive(Debug, Clone)]
pub struct HttpServer {
    pub id: u32,
    pub spec: HttpServerSpec,
}

impl HttpServer {
    pub fn new(id: u32, spec: &HttpServerSpec) -> Self {
        HttpServer {
            id,
            spec: spec.clone(),
        }
    }
}

impl Service for HttpServer {
    fn id(&self) -> u32 {
        self.id
    }

    fn service_name(&self) -> String {
        format!("http-server-{}", self.id)
    }

    fn display(&self) -> DisplayMap {
        single(
            "HttpServer",
            DisplayedComponent {
                name: self.service_name(),
                host: self.spec.host.clone(),
                ports: ports(&[self.spec.port]),
                container_name: HttpServerSpec::CONTAINER_NAME.to_string(),
                image: self.spec.image.clone(),
                paths: self.spec.remote_config_path.clone().unwrap_or_default(),
            },
        )
    }
}
