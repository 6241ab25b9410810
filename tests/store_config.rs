// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use hdt_lib::{
        context::ContextBuilder,
        store_config::{self, MetaStoreSection, StoreConfig},
        test_env::*,
        topology::Topology,
        DeployError,
    };

    #[test]
    fn conflicting_template_is_left_alone() {
        let env = TestEnvironment::new("conflicting_template_is_left_alone");
        let contents = "{\n\t\"zookeeper\": {\"uri\": \"ip://z1:2181\"},\n\t\"rqlite\": {\"uri\": \"ip://r1:4001\"}\n}";
        let template = env.write_template(contents);

        let res = Topology::build(&env.catalog_named("rqlite"), &template);

        assert!(matches!(res, Err(DeployError::ConfigConflict { .. })));
        assert_eq!(env.read_template(), contents);
    }

    #[test]
    fn backend_switch_replaces_section() {
        let env = TestEnvironment::new("backend_switch_replaces_section");
        let template = env.write_template(
            r#"{"cluster": "logdevice", "zookeeper": {"uri": "ip://z1:2181", "timeout": "30s"}}"#,
        );

        let ctx = ContextBuilder::resolve(&env.catalog_named("rqlite")).unwrap();
        let synthesized = store_config::synthesize(&ctx, &template).unwrap();
        assert_eq!(synthesized.path(), template.as_path());

        assert_eq!(
            env.template_json(),
            json!({
                "cluster": "logdevice",
                "rqlite": { "uri": "ip://h1:4001" },
            })
        );

        let reloaded = StoreConfig::load(&template).unwrap();
        assert!(matches!(
            reloaded.meta_store,
            Some(MetaStoreSection::Rqlite(_))
        ));
    }

    #[test]
    fn template_without_sections() {
        let env = TestEnvironment::new("template_without_sections");
        let template = env.install_template();

        let ctx = ContextBuilder::resolve(&env.catalog_named("full_zk")).unwrap();
        store_config::synthesize(&ctx, &template).unwrap();

        let doc = env.template_json();
        assert_eq!(
            doc["zookeeper"]["uri"],
            "ip://10.0.0.1:2181,10.0.0.2:2181,10.0.0.3:2181"
        );
        assert_eq!(
            doc["client_settings"]["admin-client-capabilities"],
            "true"
        );
        assert!(env.read_template().starts_with("{\n\t\""));
    }

    #[test]
    fn malformed_template() {
        let env = TestEnvironment::new("malformed_template");
        let template = env.write_template("{ not json");

        let ctx = ContextBuilder::resolve(&env.catalog_named("rqlite")).unwrap();
        let res = store_config::synthesize(&ctx, &template);

        assert!(matches!(res, Err(DeployError::Document { .. })));
        assert_eq!(env.read_template(), "{ not json");
    }
}
