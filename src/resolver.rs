// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

//! Pure functions deriving cluster-wide address strings from a [`Catalog`].

use crate::{
    catalog::{Catalog, HAdminSpec, HStoreSpec, MetaStoreType, DEFAULT_STORE_CONFIG_PATH},
    error::ResolutionError,
};

/// The admin server the cluster initialization step will talk to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminInfo {
    pub host: String,
    pub port: u16,
    pub container_name: String,
}

/// Get the meta store connection string and the backend shared by every meta store instance.
///
/// For zk the result looks like `host1:2181,host2:2181`, for rqlite it looks like
/// `http://host1:4001,http://host2:4001`.
pub fn meta_store_url(c: &Catalog) -> Result<(String, MetaStoreType), ResolutionError> {
    let first = c.meta_store.first().ok_or(ResolutionError::NoMetaStore)?;
    let kind = first.kind;

    if let Some(other) = c.meta_store.iter().find(|s| s.kind != kind) {
        return Err(ResolutionError::MixedMetaStore(
            kind.to_string(),
            other.kind.to_string(),
        ));
    }

    let urls: Vec<String> = c
        .meta_store
        .iter()
        .map(|s| match kind {
            MetaStoreType::Zk => format!("{}:{}", s.host, s.port()),
            MetaStoreType::Rqlite => format!("http://{}:{}", s.host, s.port()),
        })
        .collect();

    Ok((urls.join(","), kind))
}

/// The location of the storage config inside the meta store, if the storage nodes should read it
/// from there. Only zk can hold it.
pub fn store_config_in_meta_store(c: &Catalog, url: &str, kind: MetaStoreType) -> String {
    if !c.global.disable_store_network_config_path && kind == MetaStoreType::Zk {
        format!("zk:{url}{DEFAULT_STORE_CONFIG_PATH}")
    } else {
        String::new()
    }
}

/// Every host in the catalog, across all component kinds, sorted and deduplicated.
pub fn hosts(c: &Catalog) -> Vec<String> {
    let mut hosts = c.all_hosts();
    hosts.sort();
    hosts.dedup();
    hosts
}

/// The internal addresses of the servers in catalog order, which is the order they join the
/// cluster in.
pub fn seed_nodes(c: &Catalog) -> String {
    c.hserver
        .iter()
        .map(|s| format!("{}:{}", s.host, s.internal_port))
        .collect::<Vec<_>>()
        .join(",")
}

/// Dedicated admin nodes first, then every storage node with its admin server enabled.
pub fn admin_infos(c: &Catalog) -> Vec<AdminInfo> {
    let dedicated = c.hadmin.iter().map(|s| AdminInfo {
        host: s.host.clone(),
        port: s.admin_port,
        container_name: HAdminSpec::CONTAINER_NAME.to_string(),
    });

    let on_store = c
        .hstore
        .iter()
        .filter(|s| s.enable_admin)
        .map(|s| AdminInfo {
            host: s.host.clone(),
            port: s.admin_port,
            container_name: HStoreSpec::CONTAINER_NAME.to_string(),
        });

    dedicated.chain(on_store).collect()
}

pub fn hserver_urls(c: &Catalog) -> String {
    c.hserver
        .iter()
        .map(|s| format!("{}:{}", s.advertised_host(), s.port))
        .collect::<Vec<_>>()
        .join(",")
}

pub fn http_server_urls(c: &Catalog) -> Vec<String> {
    c.http_server
        .iter()
        .map(|s| format!("{}:{}", s.host, s.port))
        .collect()
}

/// Address of the first exporter instance, which the metrics collector scrapes.
pub fn exporter_addr(c: &Catalog) -> Option<String> {
    c.hstream_exporter
        .first()
        .map(|s| format!("{}:{}", s.host, s.port))
}

/// Address of the first alert router instance.
pub fn alertmanager_addr(c: &Catalog) -> Option<String> {
    c.alertmanager
        .first()
        .map(|s| format!("{}:{}", s.host, s.port))
}

/// The hosts that should not get a monitoring suite, sorted and deduplicated.
pub fn excluded_monitor_hosts(c: &Catalog) -> Vec<String> {
    let mut res = c.monitor.excluded_hosts.clone();
    res.sort();
    res.dedup();
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(toml: &str) -> Catalog {
        toml.parse().unwrap()
    }

    #[test]
    fn seed_nodes_keep_catalog_order() {
        let c = catalog(
            r#"
            [[hserver]]
            host = "h2"
            [[hserver]]
            host = "h1"
            internal_port = 7000
            "#,
        );
        assert_eq!(seed_nodes(&c), "h2:6571,h1:7000");
    }

    #[test]
    fn hosts_are_sorted_union() {
        let c = catalog(
            r#"
            [[hserver]]
            host = "b"
            [[hstore]]
            host = "a"
            [[meta_store]]
            host = "b"
            kind = "zk"
            [[filebeat]]
            host = "c"
            "#,
        );
        assert_eq!(hosts(&c), vec!["a", "b", "c"]);
    }

    #[test]
    fn zk_url() {
        let c = catalog(
            r#"
            [[meta_store]]
            host = "z1"
            kind = "zk"
            [[meta_store]]
            host = "z2"
            kind = "zk"
            port = 2182
            "#,
        );
        assert_eq!(
            meta_store_url(&c).unwrap(),
            ("z1:2181,z2:2182".to_string(), MetaStoreType::Zk)
        );
        assert_eq!(
            store_config_in_meta_store(&c, "z1:2181", MetaStoreType::Zk),
            "zk:z1:2181/logdevice.conf"
        );
    }

    #[test]
    fn rqlite_url() {
        let c = catalog(
            r#"
            [global]
            disable_store_network_config_path = true
            [[meta_store]]
            host = "h1"
            kind = "rqlite"
            [[meta_store]]
            host = "h2"
            kind = "rqlite"
            "#,
        );
        let (url, kind) = meta_store_url(&c).unwrap();
        assert_eq!(url, "http://h1:4001,http://h2:4001");
        assert_eq!(kind, MetaStoreType::Rqlite);
        assert_eq!(store_config_in_meta_store(&c, &url, kind), "");
    }

    #[test]
    fn meta_store_errors() {
        assert_eq!(
            meta_store_url(&Catalog::default()),
            Err(ResolutionError::NoMetaStore)
        );

        let c = catalog(
            r#"
            [[meta_store]]
            host = "h1"
            kind = "zk"
            [[meta_store]]
            host = "h2"
            kind = "rqlite"
            "#,
        );
        assert_eq!(
            meta_store_url(&c),
            Err(ResolutionError::MixedMetaStore(
                "zk".to_string(),
                "rqlite".to_string()
            ))
        );
    }

    #[test]
    fn admins_dedicated_first() {
        let c = catalog(
            r#"
            [[hstore]]
            host = "s1"
            enable_admin = true
            [[hstore]]
            host = "s2"
            [[hstore]]
            host = "s3"
            enable_admin = true
            admin_port = 6441
            [[hadmin]]
            host = "a1"
            "#,
        );
        let admins = admin_infos(&c);
        let summary: Vec<_> = admins
            .iter()
            .map(|a| (a.host.as_str(), a.port, a.container_name.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("a1", 6440, "deploy_hadmin"),
                ("s1", 6440, "deploy_hstore"),
                ("s3", 6441, "deploy_hstore"),
            ]
        );
    }

    #[test]
    fn first_instance_addresses() {
        let c = catalog(
            r#"
            [monitor]
            excluded_hosts = ["x", "a", "x"]
            [[alertmanager]]
            host = "am1"
            [[alertmanager]]
            host = "am2"
            [[http_server]]
            host = "g1"
            [[hserver]]
            host = "h1"
            advertised_address = "10.0.0.1"
            "#,
        );
        assert_eq!(alertmanager_addr(&c).as_deref(), Some("am1:9093"));
        assert_eq!(exporter_addr(&c), None);
        assert_eq!(http_server_urls(&c), vec!["g1:8081"]);
        assert_eq!(hserver_urls(&c), "10.0.0.1:6570");
        assert_eq!(excluded_monitor_hosts(&c), vec!["a", "x"]);
    }
}
