// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::{fmt, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{DeployError, Result};

/// Catalog, along with its per-kind children, is the model for an HStream deployment used in the
/// declarative config file. The config file is deserialized into a Catalog object.
///
/// The file model is intentionally different from the resolved model (see `topology::Topology`).
/// Since they are decoupled, the resolved model can be changed without needing to change the
/// catalog file format. Every list is kept in file order: that order determines ordinal identities
/// and the seed node join order.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct Catalog {
    #[serde(default)]
    pub global: GlobalSpec,
    #[serde(default)]
    pub monitor: MonitorSpec,
    #[serde(default)]
    pub hserver: Vec<HServerSpec>,
    #[serde(default)]
    pub hstore: Vec<HStoreSpec>,
    #[serde(default)]
    pub hadmin: Vec<HAdminSpec>,
    #[serde(default)]
    pub meta_store: Vec<MetaStoreSpec>,
    #[serde(default)]
    pub prometheus: Vec<PrometheusSpec>,
    #[serde(default)]
    pub grafana: Vec<GrafanaSpec>,
    #[serde(default)]
    pub alertmanager: Vec<AlertManagerSpec>,
    #[serde(default)]
    pub hstream_exporter: Vec<HStreamExporterSpec>,
    #[serde(default)]
    pub http_server: Vec<HttpServerSpec>,
    #[serde(default)]
    pub elasticsearch: Vec<ElasticSearchSpec>,
    #[serde(default)]
    pub kibana: Vec<KibanaSpec>,
    #[serde(default)]
    pub filebeat: Vec<FilebeatSpec>,
}

impl Catalog {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| DeployError::io(path, e))?;
        contents.parse()
    }

    /// Every host named anywhere in the catalog, in catalog order and with duplicates.
    pub fn all_hosts(&self) -> Vec<String> {
        let mut hosts = Vec::new();
        hosts.extend(self.hserver.iter().map(|s| s.host.clone()));
        hosts.extend(self.hstore.iter().map(|s| s.host.clone()));
        hosts.extend(self.hadmin.iter().map(|s| s.host.clone()));
        hosts.extend(self.meta_store.iter().map(|s| s.host.clone()));
        hosts.extend(self.prometheus.iter().map(|s| s.host.clone()));
        hosts.extend(self.grafana.iter().map(|s| s.host.clone()));
        hosts.extend(self.alertmanager.iter().map(|s| s.host.clone()));
        hosts.extend(self.hstream_exporter.iter().map(|s| s.host.clone()));
        hosts.extend(self.http_server.iter().map(|s| s.host.clone()));
        hosts.extend(self.elasticsearch.iter().map(|s| s.host.clone()));
        hosts.extend(self.kibana.iter().map(|s| s.host.clone()));
        hosts.extend(self.filebeat.iter().map(|s| s.host.clone()));
        hosts
    }
}

impl FromStr for Catalog {
    type Err = DeployError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

pub const DEFAULT_SSH_PORT: u16 = 22;
pub const DEFAULT_STORE_CONFIG_PATH: &str = "/logdevice.conf";

fn default_ssh_port() -> u16 {
    DEFAULT_SSH_PORT
}

fn default_true() -> bool {
    true
}

/// Settings shared by every component, plus the local config file locations.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GlobalSpec {
    #[serde(default = "GlobalSpec::default_user")]
    pub user: String,
    #[serde(default)]
    pub key_path: String,
    #[serde(default = "default_ssh_port")]
    pub ssh_port: u16,
    #[serde(default = "GlobalSpec::default_meta_replica")]
    pub meta_replica: u32,
    #[serde(default)]
    pub meta_store_config_path: String,
    #[serde(default)]
    pub hstore_config_path: String,
    #[serde(default)]
    pub hserver_config_path: String,
    #[serde(default)]
    pub es_config_path: String,
    /// Don't point the storage nodes at a copy of their config kept inside the meta store.
    #[serde(default)]
    pub disable_store_network_config_path: bool,
    #[serde(default)]
    pub container_config: ContainerSpec,
}

impl GlobalSpec {
    fn default_user() -> String {
        "root".to_string()
    }

    fn default_meta_replica() -> u32 {
        1
    }
}

impl Default for GlobalSpec {
    fn default() -> Self {
        GlobalSpec {
            user: Self::default_user(),
            key_path: String::new(),
            ssh_port: DEFAULT_SSH_PORT,
            meta_replica: Self::default_meta_replica(),
            meta_store_config_path: String::new(),
            hstore_config_path: String::new(),
            hserver_config_path: String::new(),
            es_config_path: String::new(),
            disable_store_network_config_path: false,
            container_config: ContainerSpec::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct ContainerSpec {
    #[serde(default)]
    pub cpu_limit: Option<String>,
    #[serde(default)]
    pub memory_limit: Option<String>,
    #[serde(default)]
    pub disable_restart: bool,
    #[serde(default)]
    pub remove_when_exit: bool,
}

/// The per-host monitoring agents and the hosts which should not run them.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MonitorSpec {
    #[serde(default = "MonitorSpec::default_node_exporter_port")]
    pub node_exporter_port: u16,
    #[serde(default = "MonitorSpec::default_cadvisor_port")]
    pub cadvisor_port: u16,
    #[serde(default = "MonitorSpec::default_node_exporter_image")]
    pub node_exporter_image: String,
    #[serde(default = "MonitorSpec::default_cadvisor_image")]
    pub cadvisor_image: String,
    #[serde(default)]
    pub excluded_hosts: Vec<String>,
    #[serde(default = "MonitorSpec::default_remote_config_path")]
    pub remote_config_path: String,
    #[serde(default)]
    pub grafana_disable_login: bool,
}

impl MonitorSpec {
    pub const NODE_EXPORTER_CONTAINER_NAME: &'static str = "deploy_node_exporter";
    pub const CADVISOR_CONTAINER_NAME: &'static str = "deploy_cadvisor";

    fn default_node_exporter_port() -> u16 {
        9100
    }

    fn default_cadvisor_port() -> u16 {
        7000
    }

    fn default_node_exporter_image() -> String {
        "prom/node-exporter".to_string()
    }

    fn default_cadvisor_image() -> String {
        "gcr.io/cadvisor/cadvisor".to_string()
    }

    fn default_remote_config_path() -> String {
        "/hstream/deploy/monitor".to_string()
    }
}

impl Default for MonitorSpec {
    fn default() -> Self {
        MonitorSpec {
            node_exporter_port: Self::default_node_exporter_port(),
            cadvisor_port: Self::default_cadvisor_port(),
            node_exporter_image: Self::default_node_exporter_image(),
            cadvisor_image: Self::default_cadvisor_image(),
            excluded_hosts: Vec::new(),
            remote_config_path: Self::default_remote_config_path(),
            grafana_disable_login: false,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HServerSpec {
    pub host: String,
    #[serde(default)]
    pub advertised_address: Option<String>,
    #[serde(default = "HServerSpec::default_port")]
    pub port: u16,
    #[serde(default = "HServerSpec::default_internal_port")]
    pub internal_port: u16,
    #[serde(default = "HServerSpec::default_image")]
    pub image: String,
    #[serde(default = "default_ssh_port")]
    pub ssh_port: u16,
    #[serde(default = "HServerSpec::default_remote_config_path")]
    pub remote_config_path: String,
    #[serde(default = "HServerSpec::default_data_dir")]
    pub data_dir: String,
    #[serde(default)]
    pub server_config: ServerOpts,
    #[serde(default)]
    pub container_config: ContainerSpec,

    /// Only needed when scaling out a server cluster without any admin node in the catalog.
    #[serde(default)]
    pub store_admin_host: Option<String>,
    #[serde(default)]
    pub store_admin_port: Option<u16>,
}

impl HServerSpec {
    pub const CONTAINER_NAME: &'static str = "deploy_hserver";

    fn default_port() -> u16 {
        6570
    }

    fn default_internal_port() -> u16 {
        6571
    }

    fn default_image() -> String {
        "hstreamdb/hstream".to_string()
    }

    fn default_remote_config_path() -> String {
        "/hstream/deploy/hserver".to_string()
    }

    fn default_data_dir() -> String {
        "/hstream/data/hserver".to_string()
    }

    /// The address clients should use to reach this server.
    pub fn advertised_host(&self) -> &str {
        self.advertised_address.as_deref().unwrap_or(&self.host)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ServerOpts {
    #[serde(default = "ServerOpts::default_log_level")]
    pub server_log_level: String,
    #[serde(default = "ServerOpts::default_log_level")]
    pub store_log_level: String,
    #[serde(default = "ServerOpts::default_compression")]
    pub compression: String,
}

impl ServerOpts {
    fn default_log_level() -> String {
        "info".to_string()
    }

    fn default_compression() -> String {
        "lz4".to_string()
    }
}

impl Default for ServerOpts {
    fn default() -> Self {
        ServerOpts {
            server_log_level: Self::default_log_level(),
            store_log_level: Self::default_log_level(),
            compression: Self::default_compression(),
        }
    }
}

fn default_admin_port() -> u16 {
    6440
}

fn default_store_image() -> String {
    "hstreamdb/hstream".to_string()
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HStoreSpec {
    pub host: String,
    #[serde(default = "default_admin_port")]
    pub admin_port: u16,
    /// Whether this storage node also runs the admin server.
    #[serde(default)]
    pub enable_admin: bool,
    #[serde(default = "default_store_image")]
    pub image: String,
    #[serde(default = "default_ssh_port")]
    pub ssh_port: u16,
    #[serde(default = "HStoreSpec::default_remote_config_path")]
    pub remote_config_path: String,
    #[serde(default = "HStoreSpec::default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_true")]
    pub local_mode: bool,
    #[serde(default)]
    pub container_config: ContainerSpec,
}

impl HStoreSpec {
    pub const CONTAINER_NAME: &'static str = "deploy_hstore";

    fn default_remote_config_path() -> String {
        "/hstream/deploy/hstore".to_string()
    }

    fn default_data_dir() -> String {
        "/hstream/data/store".to_string()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HAdminSpec {
    pub host: String,
    #[serde(default = "default_admin_port")]
    pub admin_port: u16,
    #[serde(default = "default_store_image")]
    pub image: String,
    #[serde(default = "default_ssh_port")]
    pub ssh_port: u16,
    #[serde(default = "HAdminSpec::default_remote_config_path")]
    pub remote_config_path: String,
    #[serde(default)]
    pub container_config: ContainerSpec,
}

impl HAdminSpec {
    pub const CONTAINER_NAME: &'static str = "deploy_hadmin";

    fn default_remote_config_path() -> String {
        "/hstream/deploy/hadmin".to_string()
    }
}

/// The two mutually exclusive meta store backends.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MetaStoreType {
    /// Quorum coordination through zookeeper.
    Zk,
    /// Replicated SQL through rqlite.
    Rqlite,
}

impl fmt::Display for MetaStoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaStoreType::Zk => write!(f, "zk"),
            MetaStoreType::Rqlite => write!(f, "rqlite"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MetaStoreSpec {
    pub host: String,
    pub kind: MetaStoreType,
    /// Client port. Defaults to 2181 for zk and 4001 for rqlite.
    #[serde(default)]
    pub port: Option<u16>,
    /// Raft port, rqlite only.
    #[serde(default = "MetaStoreSpec::default_raft_port")]
    pub raft_port: u16,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "default_ssh_port")]
    pub ssh_port: u16,
    #[serde(default = "MetaStoreSpec::default_remote_config_path")]
    pub remote_config_path: String,
    #[serde(default = "MetaStoreSpec::default_data_dir")]
    pub data_dir: String,
    #[serde(default)]
    pub container_config: ContainerSpec,
}

impl MetaStoreSpec {
    pub const CONTAINER_NAME: &'static str = "deploy_meta_store";

    fn default_raft_port() -> u16 {
        4002
    }

    fn default_remote_config_path() -> String {
        "/hstream/deploy/metastore".to_string()
    }

    fn default_data_dir() -> String {
        "/hstream/data/metastore".to_string()
    }

    pub fn port(&self) -> u16 {
        match (self.port, self.kind) {
            (Some(port), _) => port,
            (None, MetaStoreType::Zk) => 2181,
            (None, MetaStoreType::Rqlite) => 4001,
        }
    }

    pub fn image(&self) -> &str {
        match (&self.image, self.kind) {
            (Some(image), _) => image,
            (None, MetaStoreType::Zk) => "zookeeper:3.6",
            (None, MetaStoreType::Rqlite) => "rqlite/rqlite",
        }
    }
}

/// Declares a plain `host`/`port`/`image` spec for one of the auxiliary services.
macro_rules! plain_spec {
    ($(#[$meta:meta])* $name:ident, $port:literal, $image:literal, $container:literal) => {
        $(#[$meta])*
        #[derive(Serialize, Deserialize, Debug, Clone)]
        pub struct $name {
            pub host: String,
            #[serde(default = $port)]
            pub port: u16,
            #[serde(default = $image)]
            pub image: String,
            #[serde(default = "default_ssh_port")]
            pub ssh_port: u16,
            #[serde(default)]
            pub remote_config_path: Option<String>,
            #[serde(default)]
            pub container_config: ContainerSpec,
        }

        impl $name {
            pub const CONTAINER_NAME: &'static str = $container;
        }
    };
}

fn prometheus_port() -> u16 {
    9090
}

fn grafana_port() -> u16 {
    3000
}

fn alertmanager_port() -> u16 {
    9093
}

fn exporter_port() -> u16 {
    9250
}

fn http_server_port() -> u16 {
    8081
}

fn elasticsearch_port() -> u16 {
    9200
}

fn kibana_port() -> u16 {
    5601
}

fn prometheus_image() -> String {
    "prom/prometheus".to_string()
}

fn grafana_image() -> String {
    "grafana/grafana-oss:main".to_string()
}

fn alertmanager_image() -> String {
    "prom/alertmanager".to_string()
}

fn exporter_image() -> String {
    "hstreamdb/hstream-exporter".to_string()
}

fn http_server_image() -> String {
    "hstreamdb/http-server".to_string()
}

fn elasticsearch_image() -> String {
    "docker.elastic.co/elasticsearch/elasticsearch:8.5.0".to_string()
}

fn kibana_image() -> String {
    "docker.elastic.co/kibana/kibana:8.5.0".to_string()
}

fn filebeat_image() -> String {
    "docker.elastic.co/beats/filebeat:8.5.0".to_string()
}

plain_spec!(
    PrometheusSpec,
    "prometheus_port",
    "prometheus_image",
    "deploy_prometheus"
);
plain_spec!(
    GrafanaSpec,
    "grafana_port",
    "grafana_image",
    "deploy_grafana"
);
plain_spec!(
    AlertManagerSpec,
    "alertmanager_port",
    "alertmanager_image",
    "deploy_alertmanager"
);
plain_spec!(
    HStreamExporterSpec,
    "exporter_port",
    "exporter_image",
    "deploy_hstream_exporter"
);
plain_spec!(
    /// The HTTP gateway in front of the server cluster.
    HttpServerSpec,
    "http_server_port",
    "http_server_image",
    "deploy_http_server"
);
plain_spec!(
    /// The search engine backing the log stack.
    ElasticSearchSpec,
    "elasticsearch_port",
    "elasticsearch_image",
    "deploy_elasticsearch"
);
plain_spec!(
    KibanaSpec,
    "kibana_port",
    "kibana_image",
    "deploy_kibana"
);

/// The log shipper, run on every host whose logs should be collected.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FilebeatSpec {
    pub host: String,
    #[serde(default = "filebeat_image")]
    pub image: String,
    #[serde(default = "default_ssh_port")]
    pub ssh_port: u16,
    #[serde(default)]
    pub remote_config_path: Option<String>,
    #[serde(default)]
    pub container_config: ContainerSpec,
}

impl FilebeatSpec {
    pub const CONTAINER_NAME: &'static str = "deploy_filebeat";
}
