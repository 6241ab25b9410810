// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::collections::BTreeMap;

use super::{ports, single, DisplayMap, DisplayedComponent, Service};
use crate::catalog::{
    AlertManagerSpec, GrafanaSpec, HStreamExporterSpec, MonitorSpec, PrometheusSpec,
};

/// The node exporter and cadvisor pair deployed on every monitored host.
#[derive(Debug, Clone)]
pub struct MonitorSuite {
    pub id: u32,
    pub host: String,
    pub spec: MonitorSpec,
}

impl MonitorSuite {
    pub fn new(id: u32, host: &str, spec: &MonitorSpec) -> Self {
        MonitorSuite {
            id,
            host: host.to_string(),
            spec: spec.clone(),
        }
    }

    pub fn node_exporter_addr(&self) -> String {
        format!("{}:{}", self.host, self.spec.node_exporter_port)
    }

    pub fn cadvisor_addr(&self) -> String {
        format!("{}:{}", self.host, self.spec.cadvisor_port)
    }
}

impl Service for MonitorSuite {
    fn id(&self) -> u32 {
        self.id
    }

    fn service_name(&self) -> String {
        format!("monitor-suite-{}", self.id)
    }

    fn display(&self) -> DisplayMap {
        BTreeMap::from([
            (
                "NodeExporter",
                DisplayedComponent {
                    name: format!("node-exporter-{}", self.id),
                    host: self.host.clone(),
                    ports: ports(&[self.spec.node_exporter_port]),
                    container_name: MonitorSpec::NODE_EXPORTER_CONTAINER_NAME.to_string(),
                    image: self.spec.node_exporter_image.clone(),
                    paths: self.spec.remote_config_path.clone(),
                },
            ),
            (
                "Cadvisor",
                DisplayedComponent {
                    name: format!("cadvisor-{}", self.id),
                    host: self.host.clone(),
                    ports: ports(&[self.spec.cadvisor_port]),
                    container_name: MonitorSpec::CADVISOR_CONTAINER_NAME.to_string(),
                    image: self.spec.cadvisor_image.clone(),
                    paths: self.spec.remote_config_path.clone(),
                },
            ),
        ])
    }
}

/// The metrics collector. It scrapes every monitoring suite and the exporter, and forwards
/// alerts to the alert router.
#[derive(Debug, Clone)]
pub struct Prometheus {
    pub id: u32,
    pub spec: PrometheusSpec,
    pub node_exporter_targets: Vec<String>,
    pub cadvisor_targets: Vec<String>,
    pub exporter_addr: Option<String>,
    pub alertmanager_addr: Option<String>,
}

impl Prometheus {
    pub fn new(
        id: u32,
        spec: &PrometheusSpec,
        suites: &[MonitorSuite],
        exporter_addr: Option<String>,
        alertmanager_addr: Option<String>,
    ) -> Self {
        Prometheus {
            id,
            spec: spec.clone(),
            node_exporter_targets: suites.iter().map(|s| s.node_exporter_addr()).collect(),
            cadvisor_targets: suites.iter().map(|s| s.cadvisor_addr()).collect(),
            exporter_addr,
            alertmanager_addr,
        }
    }
}

impl Service for Prometheus {
    fn id(&self) -> u32 {
        self.id
    }

    fn service_name(&self) -> String {
        format!("prometheus-{}", self.id)
    }

    fn display(&self) -> DisplayMap {
        single(
            "Prometheus",
            DisplayedComponent {
                name: self.service_name(),
                host: self.spec.host.clone(),
                ports: ports(&[self.spec.port]),
                container_name: PrometheusSpec::CONTAINER_NAME.to_string(),
                image: self.spec.image.clone(),
                paths: self.spec.remote_config_path.clone().unwrap_or_default(),
            },
        )
    }
}

#[derive(Debug, Clone)]
pub struct Grafana {
    pub id: u32,
    pub spec: GrafanaSpec,
    pub disable_login: bool,
}

impl Grafana {
    pub fn new(id: u32, spec: &GrafanaSpec, disable_login: bool) -> Self {
        Grafana {
            id,
            spec: spec.clone(),
            disable_login,
        }
    }
}

impl Service for Grafana {
    fn id(&self) -> u32 {
        self.id
    }

    fn service_name(&self) -> String {
        format!("grafana-{}", self.id)
    }

    fn display(&self) -> DisplayMap {
        single(
            "Grafana",
            DisplayedComponent {
                name: self.service_name(),
                host: self.spec.host.clone(),
                ports: ports(&[self.spec.port]),
                container_name: GrafanaSpec::CONTAINER_NAME.to_string(),
                image: self.spec.image.clone(),
                paths: self.spec.remote_config_path.clone().unwrap_or_default(),
            },
        )
    }
}

/// The alert router.
#[derive(Debug, Clone)]
pub struct AlertManager {
    pub id: u32,
    pub spec: AlertManagerSpec,
}

impl AlertManager {
    pub fn new(id: u32, spec: &AlertManagerSpec) -> Self {
        AlertManager {
            id,
            spec: spec.clone(),
        }
    }
}

impl Service for AlertManager {
    fn id(&self) -> u32 {
        self.id
    }

    fn service_name(&self) -> String {
        format!("alertmanager-{}", self.id)
    }

    fn display(&self) -> DisplayMap {
        single(
            "AlertManager",
            DisplayedComponent {
                name: self.service_name(),
                host: self.spec.host.clone(),
                ports: ports(&[self.spec.port]),
                container_name: AlertManagerSpec::CONTAINER_NAME.to_string(),
                image: self.spec.image.clone(),
                paths: self.spec.remote_config_path.clone().unwrap_or_default(),
            },
        )
    }
}

#[derive(Debug, Clone)]
pub struct HStreamExporter {
    pub id: u32,
    pub spec: HStreamExporterSpec,
}

impl HStreamExporter {
    pub fn new(id: u32, spec: &HStreamExporterSpec) -> Self {
        HStreamExporter {
            id,
            spec: spec.clone(),
        }
    }
}

impl Service for HStreamExporter {
    fn id(&self) -> u32 {
        self.id
    }

    fn service_name(&self) -> String {
        format!("hstream-exporter-{}", self.id)
    }

    fn display(&self) -> DisplayMap {
        single(
            "HStreamExporter",
            DisplayedComponent {
                name: self.service_name(),
                host: self.spec.host.clone(),
                ports: ports(&[self.spec.port]),
                container_name: HStreamExporterSpec::CONTAINER_NAME.to_string(),
                image: self.spec.image.clone(),
                paths: self.spec.remote_config_path.clone().unwrap_or_default(),
            },
        )
    }
}
