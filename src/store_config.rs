// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

//! Rewrites the storage engine config template so that it points at the resolved meta store.

use std::path::{Path, PathBuf};

use {
    log::info,
    serde::{Deserialize, Serialize},
    serde_json::{json, ser::PrettyFormatter, Map, Value},
};

use crate::{
    catalog::MetaStoreType,
    context::{MetaStoreInfo, PendingContext},
    error::{DeployError, Result},
};

/// The meta store section of a storage config. A document holds at most one of them.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaStoreSection {
    Zookeeper(Map<String, Value>),
    Rqlite(Map<String, Value>),
}

impl MetaStoreSection {
    /// Build the section addressing the given meta store.
    ///
    /// zk gets the full connection string. rqlite only gets the first URL with its scheme
    /// removed, since the storage engine connects to a single rqlite node.
    pub fn for_meta_store(meta: &MetaStoreInfo) -> Self {
        match meta.kind {
            MetaStoreType::Zk => {
                let section = json!({
                    "uri": format!("ip://{}", meta.urls),
                    "timeout": "30s",
                });
                MetaStoreSection::Zookeeper(into_map(section))
            }
            MetaStoreType::Rqlite => {
                let urls = meta.urls.replace("http://", "");
                let first = urls.split(',').next().unwrap_or_default();
                let section = json!({ "uri": format!("ip://{first}") });
                MetaStoreSection::Rqlite(into_map(section))
            }
        }
    }
}

fn into_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => unreachable!("section literals are objects"),
    }
}

/// The on-disk shape of the storage config. Keys this tool doesn't know about are kept in `extra`
/// so that they survive a rewrite.
#[derive(Serialize, Deserialize, Debug, Default)]
struct RawStoreConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    server_settings: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    client_settings: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cluster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    internal_logs: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata_logs: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    zookeeper: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rqlite: Option<Map<String, Value>>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// A parsed storage config document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreConfig {
    pub server_settings: Option<Map<String, Value>>,
    pub client_settings: Option<Map<String, Value>>,
    pub cluster: Option<String>,
    pub internal_logs: Option<Map<String, Value>>,
    pub metadata_logs: Option<Map<String, Value>>,
    pub meta_store: Option<MetaStoreSection>,
    pub extra: Map<String, Value>,
}

impl StoreConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| DeployError::io(path, e))?;
        Self::parse(&contents, path)
    }

    /// Parse a document. `path` is only used for error reporting.
    ///
    /// Fails if both meta store sections are populated: that's a hand-edited template that can't
    /// be fixed up automatically. A `null` or `{}` section counts as absent.
    pub fn parse(contents: &str, path: &Path) -> Result<Self> {
        let raw: RawStoreConfig =
            serde_json::from_str(contents).map_err(|source| DeployError::Document {
                path: path.to_path_buf(),
                source,
            })?;

        let zookeeper = raw.zookeeper.filter(|m| !m.is_empty());
        let rqlite = raw.rqlite.filter(|m| !m.is_empty());
        let meta_store = match (zookeeper, rqlite) {
            (Some(_), Some(_)) => {
                return Err(DeployError::ConfigConflict {
                    path: path.to_path_buf(),
                })
            }
            (Some(zk), None) => Some(MetaStoreSection::Zookeeper(zk)),
            (None, Some(rq)) => Some(MetaStoreSection::Rqlite(rq)),
            (None, None) => None,
        };

        Ok(StoreConfig {
            server_settings: raw.server_settings,
            client_settings: raw.client_settings,
            cluster: raw.cluster,
            internal_logs: raw.internal_logs,
            metadata_logs: raw.metadata_logs,
            meta_store,
            extra: raw.extra,
        })
    }

    /// Serialize the full document, tab indented.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let (zookeeper, rqlite) = match &self.meta_store {
            Some(MetaStoreSection::Zookeeper(m)) => (Some(m.clone()), None),
            Some(MetaStoreSection::Rqlite(m)) => (None, Some(m.clone())),
            None => (None, None),
        };
        let raw = RawStoreConfig {
            server_settings: self.server_settings.clone(),
            client_settings: self.client_settings.clone(),
            cluster: self.cluster.clone(),
            internal_logs: self.internal_logs.clone(),
            metadata_logs: self.metadata_logs.clone(),
            zookeeper,
            rqlite,
            extra: self.extra.clone(),
        };

        let mut writer = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"\t");
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
        raw.serialize(&mut serializer)?;
        writer.push(b'\n');
        // serde_json only ever emits valid UTF-8.
        Ok(String::from_utf8_lossy(&writer).into_owned())
    }

    /// Replace whatever meta store section the document had.
    pub fn set_meta_store(&mut self, meta: &MetaStoreInfo) {
        self.meta_store = Some(MetaStoreSection::for_meta_store(meta));
    }
}

/// Proof that the storage config template was rewritten, carrying its location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedConfig {
    path: PathBuf,
}

impl SynthesizedConfig {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

/// Load the template at `path`, point it at the context's meta store, and write it back in place.
///
/// The file is overwritten rather than merged, so running this twice with the same meta store is
/// a no-op the second time. Nothing is written if the template is unreadable or has both meta
/// store sections set.
pub fn synthesize(ctx: &PendingContext, path: impl AsRef<Path>) -> Result<SynthesizedConfig> {
    let path = path.as_ref();
    let mut config = StoreConfig::load(path)?;
    config.set_meta_store(ctx.meta_store());

    let contents = config.to_json().map_err(|source| DeployError::Document {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, contents).map_err(|e| DeployError::io(path, e))?;
    info!("rewrote store config \"{}\"", path.display());

    Ok(SynthesizedConfig {
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(urls: &str, kind: MetaStoreType) -> MetaStoreInfo {
        MetaStoreInfo {
            urls: urls.to_string(),
            kind,
            count: urls.split(',').count(),
        }
    }

    fn parse(contents: &str) -> Result<StoreConfig> {
        StoreConfig::parse(contents, Path::new("logdevice.conf"))
    }

    #[test]
    fn zk_section() {
        let section = MetaStoreSection::for_meta_store(&meta("z1:2181,z2:2181", MetaStoreType::Zk));
        assert_eq!(
            section,
            MetaStoreSection::Zookeeper(into_map(json!({
                "uri": "ip://z1:2181,z2:2181",
                "timeout": "30s",
            })))
        );
    }

    #[test]
    fn rqlite_section_uses_first_url() {
        let section = MetaStoreSection::for_meta_store(&meta(
            "http://h1:4001,http://h2:4001",
            MetaStoreType::Rqlite,
        ));
        assert_eq!(
            section,
            MetaStoreSection::Rqlite(into_map(json!({ "uri": "ip://h1:4001" })))
        );
    }

    #[test]
    fn both_sections_conflict() {
        let res = parse(r#"{"zookeeper": {"uri": "ip://a:2181"}, "rqlite": {"uri": "ip://b:4001"}}"#);
        assert!(matches!(res, Err(DeployError::ConfigConflict { .. })));
    }

    #[test]
    fn empty_sections_are_absent() {
        let config = parse(r#"{"zookeeper": {}, "rqlite": null}"#).unwrap();
        assert_eq!(config.meta_store, None);
    }

    #[test]
    fn switching_backend_drops_old_section() {
        let mut config = parse(r#"{"cluster": "test", "zookeeper": {"uri": "ip://a:2181"}}"#).unwrap();
        config.set_meta_store(&meta("http://r1:4001", MetaStoreType::Rqlite));

        let out: Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(
            out,
            json!({
                "cluster": "test",
                "rqlite": { "uri": "ip://r1:4001" },
            })
        );
    }

    #[test]
    fn unknown_keys_survive() {
        let config = parse(
            r#"{
                "cluster": "logdevice",
                "server_settings": {"enable-nodes-configuration-manager": "true"},
                "version": 3,
                "traffic_shaping": {"enabled": false}
            }"#,
        )
        .unwrap();
        assert_eq!(config.extra.get("version"), Some(&json!(3)));

        let out: Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(out["traffic_shaping"], json!({"enabled": false}));
        assert_eq!(
            out["server_settings"]["enable-nodes-configuration-manager"],
            json!("true")
        );
    }

    #[test]
    fn output_is_tab_indented() {
        let config = parse(r#"{"cluster": "c"}"#).unwrap();
        assert_eq!(config.to_json().unwrap(), "{\n\t\"cluster\": \"c\"\n}\n");
    }
}
