// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use hdt_lib::{
        catalog::{MetaStoreType, MonitorSpec},
        display,
        service::Service,
        test_env::*,
        topology::{BuildWarning, Topology},
        DeployError, ResolutionError,
    };

    fn ids<T: Service>(services: &[T]) -> Vec<u32> {
        services.iter().map(|s| s.id()).collect()
    }

    #[test]
    fn full_zk() {
        let env = TestEnvironment::new("full_zk");
        let template = env.install_template();

        let topology = Topology::build(&env.catalog(), &template).unwrap();
        let global = &topology.global;

        assert_eq!(global.user, "hstream");
        assert_eq!(global.ssh_port, 2222);
        assert_eq!(global.meta_replica, 3);
        assert_eq!(
            global.hosts,
            vec!["10.0.0.1", "10.0.0.2", "10.0.0.3", "10.0.0.4", "10.0.0.5", "10.0.0.9"]
        );
        assert_eq!(global.seed_nodes, "10.0.0.2:6571,10.0.0.1:6571");
        assert_eq!(global.hserver_urls, "10.0.0.2:6570,hs1.example.com:6570");
        assert_eq!(global.http_server_urls, vec!["10.0.0.4:8081"]);
        assert_eq!(
            global.meta_store_urls(),
            "10.0.0.1:2181,10.0.0.2:2181,10.0.0.3:2181"
        );
        assert_eq!(global.meta_store_type(), MetaStoreType::Zk);
        assert_eq!(global.meta_store.count, 3);
        assert_eq!(
            global.store_config_in_meta_store,
            "zk:10.0.0.1:2181,10.0.0.2:2181,10.0.0.3:2181/logdevice.conf"
        );
        assert_eq!(global.local_hstore_config_file, template);

        let admins: Vec<_> = global
            .admin_infos
            .iter()
            .map(|a| (a.host.as_str(), a.port, a.container_name.as_str()))
            .collect();
        assert_eq!(
            admins,
            vec![
                ("10.0.0.4", 6441, "deploy_hadmin"),
                ("10.0.0.2", 6440, "deploy_hstore"),
            ]
        );

        assert_eq!(ids(&topology.hserver), vec![1, 2]);
        assert_eq!(ids(&topology.hstore), vec![1, 2, 3]);
        assert_eq!(ids(&topology.hadmin), vec![1]);
        assert_eq!(ids(&topology.meta_store), vec![1, 2, 3]);
        assert_eq!(topology.hserver[1].internal_address(), "10.0.0.1:6571");

        // 10.0.0.9 is excluded from monitoring.
        let monitored: Vec<_> = topology
            .monitor_suite
            .iter()
            .map(|s| s.host.as_str())
            .collect();
        assert_eq!(
            monitored,
            vec!["10.0.0.1", "10.0.0.2", "10.0.0.3", "10.0.0.4", "10.0.0.5"]
        );
        assert_eq!(ids(&topology.monitor_suite), vec![1, 2, 3, 4, 5]);

        let prom = &topology.prometheus[0];
        assert_eq!(prom.node_exporter_targets.len(), 5);
        assert_eq!(prom.node_exporter_targets[0], "10.0.0.1:9100");
        assert_eq!(prom.cadvisor_targets[4], "10.0.0.5:7000");
        assert_eq!(prom.exporter_addr.as_deref(), Some("10.0.0.4:9250"));
        assert_eq!(prom.alertmanager_addr.as_deref(), Some("10.0.0.9:9093"));
        assert!(topology.grafana[0].disable_login);

        let kibana = &topology.kibana[0];
        assert_eq!((kibana.es_host.as_str(), kibana.es_port), ("10.0.0.5", 9200));
        assert_eq!(ids(&topology.filebeat), vec![1, 2]);
        for filebeat in topology.filebeat.iter() {
            assert_eq!(filebeat.es_host, "10.0.0.5");
            assert_eq!(filebeat.es_port, 9200);
            assert_eq!(filebeat.kibana_host, "10.0.0.5");
            assert_eq!(filebeat.kibana_port, 5602);
        }

        assert!(topology.warnings.is_empty());

        let doc = env.template_json();
        assert_eq!(
            doc["zookeeper"],
            json!({
                "uri": "ip://10.0.0.1:2181,10.0.0.2:2181,10.0.0.3:2181",
                "timeout": "30s",
            })
        );
        assert!(doc.get("rqlite").is_none());
        assert_eq!(doc["cluster"], "logdevice");
        assert_eq!(doc["version"], 1);
        assert_eq!(doc["metadata_logs"]["replicate_across"]["node"], 3);
    }

    #[test]
    fn display_groups_by_kind() {
        let env = TestEnvironment::new("display_groups_by_kind");
        let template = env.install_template();
        let catalog = env.catalog_named("full_zk");

        let topology = Topology::build(&catalog, &template).unwrap();
        let components = display::collect(topology.services());

        assert_eq!(components["NodeExporter"].len(), 5);
        assert_eq!(components["Cadvisor"].len(), 5);
        assert_eq!(
            components["NodeExporter"][0].container_name,
            MonitorSpec::NODE_EXPORTER_CONTAINER_NAME
        );
        assert_eq!(components["Cadvisor"][4].container_name, "deploy_cadvisor");
        assert_eq!(components["HServer"].len(), 2);
        assert_eq!(components["HServer"][0].name, "hserver-1");
        assert_eq!(components["HServer"][0].ports, "6570/6571");
        assert_eq!(components["MetaStore"][2].name, "zk-3");
        assert_eq!(components["Filebeat"].len(), 2);
        assert_eq!(components["HStore"][1].ports, "6440");
        assert_eq!(components["HStore"][0].ports, "");
    }

    #[test]
    fn rqlite() {
        let env = TestEnvironment::new("rqlite");
        let template = env.install_template();

        let topology = Topology::build(&env.catalog(), &template).unwrap();

        assert_eq!(topology.global.meta_store_urls(), "http://h1:4001,http://h2:4001");
        assert_eq!(topology.global.meta_store_type(), MetaStoreType::Rqlite);
        assert_eq!(topology.global.store_config_in_meta_store, "");
        assert_eq!(topology.global.seed_nodes, "h1:6571,h2:6571");
        assert!(topology.global.admin_infos.is_empty());
        assert_eq!(topology.warnings, vec![BuildWarning::NoAdminNodes]);

        let doc = env.template_json();
        assert_eq!(doc["rqlite"], json!({ "uri": "ip://h1:4001" }));
        assert!(doc.get("zookeeper").is_none());
    }

    #[test]
    fn rebuild_is_idempotent() {
        let env = TestEnvironment::new("rebuild_is_idempotent");
        let template = env.install_template();
        let catalog = env.catalog_named("rqlite");

        let first = Topology::build(&catalog, &template).unwrap();
        let after_first = env.read_template();
        let second = Topology::build(&catalog, &template).unwrap();

        assert_eq!(after_first, env.read_template());
        assert_eq!(ids(&first.hserver), ids(&second.hserver));
        assert_eq!(first.global.seed_nodes, second.global.seed_nodes);
    }

    #[test]
    fn zk_rebuild_is_idempotent() {
        let env = TestEnvironment::new("zk_rebuild_is_idempotent");
        let template = env.install_template();
        let catalog = env.catalog_named("full_zk");

        let first = Topology::build(&catalog, &template).unwrap();
        let after_first = env.read_template();
        let second = Topology::build(&catalog, &template).unwrap();

        assert_eq!(after_first, env.read_template());
        assert_eq!(ids(&first.filebeat), ids(&second.filebeat));
        assert_eq!(
            first.global.store_config_in_meta_store,
            second.global.store_config_in_meta_store
        );
    }

    #[test]
    fn check_leaves_template_alone() {
        let env = TestEnvironment::new("check_leaves_template_alone");
        env.install_template();
        let before = env.read_template();

        let checked = Topology::check(&env.catalog_named("full_zk")).unwrap();

        assert_eq!(checked.components, 23);
        assert!(checked.warnings.is_empty());
        assert_eq!(checked.context.seed_nodes(), "10.0.0.2:6571,10.0.0.1:6571");
        assert_eq!(before, env.read_template());

        let res = Topology::check(&env.catalog_named("filebeat_without_kibana"));
        assert!(matches!(
            res,
            Err(DeployError::Dependency {
                dependent: "filebeat",
                dependency: "kibana"
            })
        ));
    }

    #[test]
    fn filebeat_without_kibana() {
        let env = TestEnvironment::new("filebeat_without_kibana");
        let template = env.install_template();
        let before = env.read_template();

        let res = Topology::build(&env.catalog(), &template);

        assert!(matches!(
            res,
            Err(DeployError::Dependency {
                dependent: "filebeat",
                dependency: "kibana"
            })
        ));
        assert_eq!(before, env.read_template());
    }

    #[test]
    fn log_stack_without_es() {
        let env = TestEnvironment::new("log_stack_without_es");
        let template = env.install_template();

        let topology = Topology::build(&env.catalog(), &template).unwrap();

        assert!(topology.elasticsearch.is_empty());
        assert!(topology.kibana.is_empty());
        assert!(topology.filebeat.is_empty());
        assert_eq!(
            topology.warnings,
            vec![
                BuildWarning::SkippedWithoutSearchEngine {
                    kind: "kibana",
                    count: 1
                },
                BuildWarning::SkippedWithoutSearchEngine {
                    kind: "filebeat",
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn no_meta_store() {
        let env = TestEnvironment::new("no_meta_store");
        let template = env.install_template();
        let before = env.read_template();

        let res = Topology::build(&env.catalog(), &template);

        assert!(matches!(
            res,
            Err(DeployError::Resolution(ResolutionError::NoMetaStore))
        ));
        assert_eq!(before, env.read_template());
    }

    #[test]
    fn missing_template() {
        let env = TestEnvironment::new("missing_template");
        let catalog = env.catalog_named("rqlite");

        let res = Topology::build(&catalog, env.template_path());

        assert!(matches!(res, Err(DeployError::Io { .. })));
    }
}
