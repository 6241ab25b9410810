// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::path::Path;

use log::debug;

use crate::{
    catalog::Catalog,
    context::{ClusterContext, ContextBuilder, PendingContext},
    error::{DeployError, Result},
    resolver,
    service::*,
    store_config,
};

/// A condition that doesn't stop the build, but that the operator should know about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildWarning {
    /// There is no admin server, so the cluster won't be initialized after deployment.
    NoAdminNodes,

    /// Log stack components were configured without a search engine and were left out.
    SkippedWithoutSearchEngine { kind: &'static str, count: usize },
}

/// Topology is the fully resolved deployment plan for a catalog: the cluster context plus one
/// descriptor per component instance.
///
/// A Topology is only ever returned whole. If any stage of the build fails, the caller gets the
/// error and nothing else.
#[derive(Debug)]
pub struct Topology {
    pub global: ClusterContext,
    pub monitor_suite: Vec<MonitorSuite>,
    pub hserver: Vec<HServer>,
    pub hstore: Vec<HStore>,
    pub hadmin: Vec<HAdmin>,
    pub meta_store: Vec<MetaStore>,
    pub prometheus: Vec<Prometheus>,
    pub grafana: Vec<Grafana>,
    pub alertmanager: Vec<AlertManager>,
    pub hstream_exporter: Vec<HStreamExporter>,
    pub http_server: Vec<HttpServer>,
    pub elasticsearch: Vec<ElasticSearch>,
    pub kibana: Vec<Kibana>,
    pub filebeat: Vec<Filebeat>,
    pub warnings: Vec<BuildWarning>,
}

/// Descriptors for the kinds without cross-kind dependencies.
struct CoreServices {
    hserver: Vec<HServer>,
    hstore: Vec<HStore>,
    hadmin: Vec<HAdmin>,
    meta_store: Vec<MetaStore>,
    http_server: Vec<HttpServer>,
}

struct MonitorBackends {
    prometheus: Vec<Prometheus>,
    grafana: Vec<Grafana>,
    alertmanager: Vec<AlertManager>,
    hstream_exporter: Vec<HStreamExporter>,
}

struct LogStack {
    elasticsearch: Vec<ElasticSearch>,
    kibana: Vec<Kibana>,
    filebeat: Vec<Filebeat>,
}

fn build_core(c: &Catalog) -> CoreServices {
    CoreServices {
        hserver: with_ordinals(&c.hserver, HServer::new),
        hstore: with_ordinals(&c.hstore, HStore::new),
        hadmin: with_ordinals(&c.hadmin, HAdmin::new),
        meta_store: with_ordinals(&c.meta_store, MetaStore::new),
        http_server: with_ordinals(&c.http_server, HttpServer::new),
    }
}

/// One monitoring suite per distinct host, except the excluded ones.
fn build_monitor_suites(c: &Catalog) -> Vec<MonitorSuite> {
    let excluded = resolver::excluded_monitor_hosts(c);
    let hosts: Vec<String> = resolver::hosts(c)
        .into_iter()
        .filter(|host| !excluded.contains(host))
        .collect();
    with_ordinals(&hosts, |id, host| MonitorSuite::new(id, host, &c.monitor))
}

fn build_monitor_backends(c: &Catalog, suites: &[MonitorSuite]) -> MonitorBackends {
    let exporter_addr = resolver::exporter_addr(c);
    let alertmanager_addr = resolver::alertmanager_addr(c);

    MonitorBackends {
        prometheus: with_ordinals(&c.prometheus, |id, spec| {
            Prometheus::new(
                id,
                spec,
                suites,
                exporter_addr.clone(),
                alertmanager_addr.clone(),
            )
        }),
        grafana: with_ordinals(&c.grafana, |id, spec| {
            Grafana::new(id, spec, c.monitor.grafana_disable_login)
        }),
        alertmanager: with_ordinals(&c.alertmanager, AlertManager::new),
        hstream_exporter: with_ordinals(&c.hstream_exporter, HStreamExporter::new),
    }
}

/// Build the search engine, dashboard, and shipper descriptors. The dashboard and shipper depend
/// on the first search engine, and the shipper additionally on the first dashboard.
fn build_log_stack(c: &Catalog, warnings: &mut Vec<BuildWarning>) -> Result<LogStack> {
    let elasticsearch = with_ordinals(&c.elasticsearch, ElasticSearch::new);

    if elasticsearch.is_empty() {
        for (kind, count) in [("kibana", c.kibana.len()), ("filebeat", c.filebeat.len())] {
            if count > 0 {
                debug!("{count} {kind} instance(s) configured without elasticsearch, skipping");
                warnings.push(BuildWarning::SkippedWithoutSearchEngine { kind, count });
            }
        }
        return Ok(LogStack {
            elasticsearch,
            kibana: Vec::new(),
            filebeat: Vec::new(),
        });
    }

    let es = &elasticsearch[0];
    let kibana = with_ordinals(&c.kibana, |id, spec| Kibana::new(id, spec, es));

    let filebeat = match kibana.first() {
        Some(dashboard) => with_ordinals(&c.filebeat, |id, spec| {
            Filebeat::new(id, spec, es, dashboard)
        }),
        None if c.filebeat.is_empty() => Vec::new(),
        None => {
            return Err(DeployError::Dependency {
                dependent: "filebeat",
                dependency: "kibana",
            })
        }
    };

    Ok(LogStack {
        elasticsearch,
        kibana,
        filebeat,
    })
}

/// Everything the build produces before the storage config template is rewritten.
struct Stages {
    core: CoreServices,
    monitor_suite: Vec<MonitorSuite>,
    backends: MonitorBackends,
    log_stack: LogStack,
    pending: PendingContext,
    warnings: Vec<BuildWarning>,
}

impl Stages {
    fn run(c: &Catalog) -> Result<Self> {
        let mut warnings = Vec::new();

        let core = build_core(c);
        let monitor_suite = build_monitor_suites(c);
        let backends = build_monitor_backends(c, &monitor_suite);
        let log_stack = build_log_stack(c, &mut warnings)?;

        let pending = ContextBuilder::resolve(c)?;
        if pending.admin_infos().is_empty() {
            warnings.push(BuildWarning::NoAdminNodes);
        }

        Ok(Stages {
            core,
            monitor_suite,
            backends,
            log_stack,
            pending,
            warnings,
        })
    }

    fn component_count(&self) -> usize {
        self.monitor_suite.len()
            + self.core.hserver.len()
            + self.core.hstore.len()
            + self.core.hadmin.len()
            + self.core.meta_store.len()
            + self.core.http_server.len()
            + self.backends.prometheus.len()
            + self.backends.grafana.len()
            + self.backends.alertmanager.len()
            + self.backends.hstream_exporter.len()
            + self.log_stack.elasticsearch.len()
            + self.log_stack.kibana.len()
            + self.log_stack.filebeat.len()
    }
}

/// The outcome of a build that stopped short of rewriting the storage config template.
#[derive(Debug)]
pub struct CheckedCatalog {
    pub context: PendingContext,
    pub warnings: Vec<BuildWarning>,
    /// Number of descriptors a full build would produce.
    pub components: usize,
}

impl Topology {
    /// Run every stage of the build that happens in memory. A catalog that passes here only fails
    /// `build()` on account of the template itself.
    pub fn check(c: &Catalog) -> Result<CheckedCatalog> {
        let stages = Stages::run(c)?;
        let components = stages.component_count();
        Ok(CheckedCatalog {
            context: stages.pending,
            warnings: stages.warnings,
            components,
        })
    }

    /// Resolve the whole catalog and rewrite the storage config template at `store_template`.
    ///
    /// The template is the only thing touched outside of memory, and it is written last: a build
    /// that fails for any other reason leaves it as it was.
    pub fn build(c: &Catalog, store_template: impl AsRef<Path>) -> Result<Self> {
        let Stages {
            core,
            monitor_suite,
            backends,
            log_stack,
            pending,
            warnings,
        } = Stages::run(c)?;

        let synthesized = store_config::synthesize(&pending, store_template)?;
        let global = pending.finish(synthesized);

        debug!(
            "built topology: {} hosts, seed nodes \"{}\"",
            global.hosts.len(),
            global.seed_nodes
        );

        Ok(Topology {
            global,
            monitor_suite,
            hserver: core.hserver,
            hstore: core.hstore,
            hadmin: core.hadmin,
            meta_store: core.meta_store,
            prometheus: backends.prometheus,
            grafana: backends.grafana,
            alertmanager: backends.alertmanager,
            hstream_exporter: backends.hstream_exporter,
            http_server: core.http_server,
            elasticsearch: log_stack.elasticsearch,
            kibana: log_stack.kibana,
            filebeat: log_stack.filebeat,
            warnings,
        })
    }

    /// Every descriptor in the topology, grouped by kind.
    pub fn services(&self) -> Vec<&dyn Service> {
        fn push_all<'a, T: Service>(out: &mut Vec<&'a dyn Service>, services: &'a [T]) {
            out.extend(services.iter().map(|s| s as &dyn Service));
        }

        let mut out = Vec::new();
        push_all(&mut out, &self.monitor_suite);
        push_all(&mut out, &self.hserver);
        push_all(&mut out, &self.hstore);
        push_all(&mut out, &self.hadmin);
        push_all(&mut out, &self.meta_store);
        push_all(&mut out, &self.prometheus);
        push_all(&mut out, &self.grafana);
        push_all(&mut out, &self.alertmanager);
        push_all(&mut out, &self.hstream_exporter);
        push_all(&mut out, &self.http_server);
        push_all(&mut out, &self.elasticsearch);
        push_all(&mut out, &self.kibana);
        push_all(&mut out, &self.filebeat);
        out
    }
}
