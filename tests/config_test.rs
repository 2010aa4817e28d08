use std::fs;

use sdd_scaffold::config::{database_defaults, load_config, load_variables, parse_config, Variables};
use sdd_scaffold::error::Error;
use sdd_scaffold::validation::validate;
use tempfile::TempDir;

const FULL_CONFIG: &str = r#"
project:
  name: my-app
  description: Order management service
  repository_url: https://github.com/acme/my-app
tech_stack:
  database:
    primary: PostgreSQL
    version: "15"
  infrastructure:
    platform: GCP
team:
  organization: Acme
  project_manager: Sato
  tech_lead: Suzuki
development:
  test_coverage_target: 85
features:
  - User authentication
  - "{{FEATURE_2}}"
  - Order history
license: Apache-2.0
"#;

#[test]
fn test_load_full_yaml_config() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("template-config.yaml");
    fs::write(&path, FULL_CONFIG).unwrap();

    let vars = load_variables(&path).unwrap();

    assert_eq!(vars.get("PROJECT_NAME"), Some("my-app"));
    assert_eq!(vars.get("REPOSITORY_URL"), Some("https://github.com/acme/my-app"));
    assert_eq!(vars.get("DATABASE_VERSION"), Some("15"));
    assert_eq!(vars.get("DATABASE_PORT"), Some("5432"));
    assert_eq!(vars.get("DATABASE_DRIVER"), Some("asyncpg"));
    assert_eq!(vars.get("INFRASTRUCTURE_PLATFORM"), Some("GCP"));
    assert_eq!(vars.get("ORGANIZATION_NAME"), Some("Acme"));
    assert_eq!(vars.get("PM_NAME"), Some("Sato"));
    assert_eq!(vars.get("TECH_LEAD_NAME"), Some("Suzuki"));
    assert_eq!(vars.get("TEST_COVERAGE_TARGET"), Some("85"));
    assert_eq!(vars.get("LICENSE"), Some("Apache-2.0"));
    assert_eq!(
        vars.get("FEATURES_LIST"),
        Some("- User authentication\n- Order history")
    );

    let result = validate(&vars);
    assert!(result.is_valid(), "{:?}", result.errors);
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
}

#[test]
fn test_variable_order_is_stable() {
    let vars = Variables::from(&parse_config(FULL_CONFIG).unwrap());
    let keys: Vec<&str> = vars.keys().take(4).collect();
    assert_eq!(
        keys,
        vec!["PROJECT_NAME", "PROJECT_DESCRIPTION", "REPOSITORY_URL", "DATABASE_TYPE"]
    );
    assert_eq!(vars.len(), 18);
}

#[test]
fn test_mysql_defaults() {
    let vars = Variables::from(
        &parse_config("tech_stack:\n  database:\n    primary: MySQL\n").unwrap(),
    );
    assert_eq!(vars.get("DATABASE_PORT"), Some("3306"));
    assert_eq!(vars.get("DATABASE_DRIVER"), Some("aiomysql"));
    assert_eq!(
        vars.get("DATABASE_URL_EXAMPLE"),
        Some(database_defaults("MySQL").url_example)
    );
}

#[test]
fn test_unknown_database_falls_back_to_postgres_defaults() {
    assert_eq!(database_defaults("Oracle"), database_defaults("PostgreSQL"));
}

#[test]
fn test_json_config() {
    let doc = parse_config(
        r#"{"project": {"name": "svc", "description": "d"}, "development": {"test_coverage_target": 70}}"#,
    )
    .unwrap();
    let vars = Variables::from(&doc);
    assert_eq!(vars.get("PROJECT_NAME"), Some("svc"));
    assert_eq!(vars.get("TEST_COVERAGE_TARGET"), Some("70"));
}

#[test]
fn test_missing_config_file() {
    let temp = TempDir::new().unwrap();
    match load_config(temp.path().join("absent.yaml")) {
        Err(Error::ConfigError(message)) => assert!(message.contains("absent.yaml")),
        other => panic!("Expected ConfigError, got {other:?}"),
    }
}

#[test]
fn test_malformed_yaml_is_an_error() {
    assert!(matches!(
        parse_config("project: [unclosed"),
        Err(Error::YamlError(_))
    ));
}
