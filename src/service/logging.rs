// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use super::{ports, single, DisplayMap, DisplayedComponent, Service};
use crate::catalog::{ElasticSearchSpec, FilebeatSpec, KibanaSpec};

/// The search engine storing the collected logs.
#[derive(Debug, Clone)]
pub struct ElasticSearch {
    pub id: u32,
    pub spec: ElasticSearchSpec,
}

impl ElasticSearch {
    pub fn new(id: u32, spec: &ElasticSearchSpec) -> Self {
        ElasticSearch {
            id,
            spec: spec.clone(),
        }
    }
}

impl Service for ElasticSearch {
    fn id(&self) -> u32 {
        self.id
    }

    fn service_name(&self) -> String {
        format!("elasticsearch-{}", self.id)
    }

    fn display(&self) -> DisplayMap {
        single(
            "ElasticSearch",
            DisplayedComponent {
                name: self.service_name(),
                host: self.spec.host.clone(),
                ports: ports(&[self.spec.port]),
                container_name: ElasticSearchSpec::CONTAINER_NAME.to_string(),
                image: self.spec.image.clone(),
                paths: self.spec.remote_config_path.clone().unwrap_or_default(),
            },
        )
    }
}

/// The log dashboard, reading from the first search engine instance.
#[derive(Debug, Clone)]
pub struct Kibana {
    pub id: u32,
    pub spec: KibanaSpec,
    pub es_host: String,
    pub es_port: u16,
}

impl Kibana {
    pub fn new(id: u32, spec: &KibanaSpec, es: &ElasticSearch) -> Self {
        Kibana {
            id,
            spec: spec.clone(),
            es_host: es.spec.host.clone(),
            es_port: es.spec.port,
        }
    }
}

impl Service for Kibana {
    fn id(&self) -> u32 {
        self.id
    }

    fn service_name(&self) -> String {
        format!("kibana-{}", self.id)
    }

    fn display(&self) -> DisplayMap {
        single(
            "Kibana",
            DisplayedComponent {
                name: self.service_name(),
                host: self.spec.host.clone(),
                ports: ports(&[self.spec.port]),
                container_name: KibanaSpec::CONTAINER_NAME.to_string(),
                image: self.spec.image.clone(),
                paths: self.spec.remote_config_path.clone().unwrap_or_default(),
            },
        )
    }
}

/// The log shipper, which pushes to the first search engine and sets up the first dashboard.
#[derive(Debug, Clone)]
pub struct Filebeat {
    pub id: u32,
    pub spec: FilebeatSpec,
    pub es_host: String,
    pub es_port: u16,
    pub kibana_host: String,
    pub kibana_port: u16,
}

impl Filebeat {
    pub fn new(id: u32, spec: &FilebeatSpec, es: &ElasticSearch, kibana: &Kibana) -> Self {
        Filebeat {
            id,
            spec: spec.clone(),
            es_host: es.spec.host.clone(),
            es_port: es.spec.port,
            kibana_host: kibana.spec.host.clone(),
            kibana_port: kibana.spec.port,
        }
    }
}

impl Service for Filebeat {
    fn id(&self) -> u32 {
        self.id
    }

    fn service_name(&self) -> String {
        format!("filebeat-{}", self.id)
    }

    fn display(&self) -> DisplayMap {
        single(
            "Filebeat",
            DisplayedComponent {
                name: self.service_name(),
                host: self.spec.host.clone(),
                ports: String::new(),
                container_name: FilebeatSpec::CONTAINER_NAME.to_string(),
                image: self.spec.image.clone(),
                paths: self.spec.remote_config_path.clone().unwrap_or_default(),
            },
        )
    }
}
