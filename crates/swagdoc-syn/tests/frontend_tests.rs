use std::fs;
use std::path::{Path, PathBuf};

use swagdoc_core::config::SwagdocConfig;
use swagdoc_core::model::HttpMethod;
use swagdoc_core::{
    EntryParser, GenerateError, GenerateOptions, OutputFormat, SourceError, build_spec, generate,
};
use swagdoc_syn::RustSourceFrontend;

const MAIN_RS: &str = r#"//! @APIVersion 1.2.0
//! @Title Shop API
//! @Description Orders and users.
//! @Contact api@shop.example
//! @Schemes https
//! @Host shop.example
//! @BasePath /api
//! @Consumes json
//! @Produces json, xml

mod handlers;
mod models;

/// @Description Served by axum.
fn main() {}
"#;

const HANDLERS_RS: &str = r#"
mod orders;

pub struct UserController;

impl UserController {
    /// @Summary List users
    /// @Tags users
    /// @Param page query int false "Page"
    /// @Success 200 {array} models::User "pagination of users"
    /// @Router /users [get]
    pub async fn list(&self) {}

    /// @Summary Create user
    /// @Tags users
    /// @Param user body models::NewUser true "New user"
    /// @Success 201 {object} models::User "created"
    /// @Router /users [post]
    pub async fn create(&self) {}
}

/// Not an endpoint.
fn helper() {}
"#;

const ORDERS_RS: &str = r#"
/// @Summary Orders of a user
/// @Tags orders
/// @Param id path int64 true "User id"
/// @Success 200 {array} Order "pagination of orders"
/// @Router /users/{id}/orders [get]
pub async fn user_orders() {}

/// @Tags orders
/// @Success 200 {array} Order "pagination"
/// @Router /orders [get]
pub async fn all_orders() {}

/// An order.
pub struct Order {
    pub id: u64,
    pub total: f64,
}
"#;

const MODELS_RS: &str = r#"
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub display_name: String,
    pub status: Status,
}

pub struct NewUser {
    pub display_name: String,
}

/// Page metadata shared by list endpoints.
pub struct HTTPPagination {
    pub page: u32,
    pub total: u64,
}

pub enum Status {
    Active,
    Banned,
}
"#;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn shop_project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/main.rs", MAIN_RS);
    write(dir.path(), "src/handlers/mod.rs", HANDLERS_RS);
    write(dir.path(), "src/handlers/orders.rs", ORDERS_RS);
    write(dir.path(), "src/models.rs", MODELS_RS);
    dir
}

fn options(root: &Path, format: OutputFormat) -> GenerateOptions {
    GenerateOptions {
        project_root: root.to_path_buf(),
        entry: PathBuf::from("src/main.rs"),
        output_dir: PathBuf::from("docs"),
        format,
        search_roots: Vec::new(),
    }
}

fn frontend(opts: &GenerateOptions) -> RustSourceFrontend {
    RustSourceFrontend::new(opts.search_roots())
}

#[test]
fn entry_file_blocks_and_imports() {
    let dir = shop_project();
    let mut fe = RustSourceFrontend::default();
    let entry = fe.parse_entry(&dir.path().join("src/main.rs")).unwrap();

    assert_eq!(entry.comments.len(), 2);
    assert!(entry.comments[0].starts_with("@APIVersion 1.2.0\n@Title Shop API"));
    assert_eq!(entry.comments[1], "@Description Served by axum.");
    let names: Vec<_> = entry.imports.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["handlers", "models"]);
    assert_eq!(entry.imports[0].base_dir, dir.path().join("src"));
}

#[test]
fn builds_shop_spec() {
    let dir = shop_project();
    let opts = options(dir.path(), OutputFormat::Json);
    let spec = build_spec(&opts, &mut frontend(&opts)).unwrap();

    assert_eq!(spec.info.version, "1.2.0");
    assert_eq!(spec.info.title, "Shop API");
    assert_eq!(spec.info.description, "Orders and users.<br>Served by axum.");
    assert_eq!(spec.info.contact.email, "api@shop.example");
    assert_eq!(spec.schemes, vec!["https"]);
    assert_eq!(spec.base_path, "/api");
    assert_eq!(spec.produces, vec!["application/json", "text/xml"]);

    assert_eq!(
        spec.paths.keys().collect::<Vec<_>>(),
        vec!["/users/{id}/orders", "/orders", "/users"]
    );
    let users = &spec.paths["/users"];
    let methods: Vec<_> = users.operations().map(|(m, _)| m).collect();
    assert_eq!(methods, vec![HttpMethod::Get, HttpMethod::Post]);
    assert_eq!(users.get.as_ref().unwrap().operation_id, "list");
    assert_eq!(
        spec.tags.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
        vec!["orders", "users"]
    );

    // Paginated list responses point at their wrapper's item type.
    let list = users.get.as_ref().unwrap().responses["200"]
        .schema
        .as_ref()
        .unwrap();
    assert_eq!(list.schema_type, "object");
    assert_eq!(list.title, "pagination_User");
    assert_eq!(list.ref_path, "#/definitions/User");

    let created = users.post.as_ref().unwrap().responses["201"]
        .schema
        .as_ref()
        .unwrap();
    assert_eq!(created.ref_path, "#/definitions/User");

    let mut names: Vec<_> = spec.definitions.keys().map(String::as_str).collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "HTTPPagination",
            "NewUser",
            "Order",
            "Status",
            "User",
            "pagination_Order",
            "pagination_User"
        ]
    );
    assert_eq!(spec.definitions["Status"].enum_values, vec!["Active", "Banned"]);
    assert!(spec.definitions["User"].properties.contains_key("displayName"));

    // Every reference resolves.
    let json = serde_json::to_value(&spec).unwrap();
    let mut refs = Vec::new();
    collect_refs(&json, &mut refs);
    assert!(!refs.is_empty());
    for r in refs {
        let name = r.strip_prefix("#/definitions/").unwrap();
        assert!(spec.definitions.contains_key(name), "dangling {r}");
    }
}

fn collect_refs(value: &serde_json::Value, out: &mut Vec<String>) {
    match value {
        serde_json::Value::Object(map) => {
            for (k, v) in map {
                match (k.as_str(), v) {
                    ("$ref", serde_json::Value::String(s)) => out.push(s.clone()),
                    _ => collect_refs(v, out),
                }
            }
        }
        serde_json::Value::Array(items) => items.iter().for_each(|v| collect_refs(v, out)),
        _ => {}
    }
}

#[test]
fn generate_writes_yaml() {
    let dir = shop_project();
    let opts = options(dir.path(), OutputFormat::Yaml);
    let path = generate(&opts, &mut frontend(&opts)).unwrap();

    assert_eq!(path, dir.path().join("docs/swagger.yaml"));
    let value: serde_yaml_ng::Value =
        serde_yaml_ng::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["swagger"].as_str(), Some("2.0"));
    assert_eq!(value["info"]["title"].as_str(), Some("Shop API"));
}

#[test]
fn generate_writes_json_with_top_level_keys() {
    let dir = shop_project();
    let opts = options(dir.path(), OutputFormat::Json);
    let path = generate(&opts, &mut frontend(&opts)).unwrap();

    assert_eq!(path.file_name().unwrap(), "swagger.json");
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    for key in ["info", "paths", "definitions"] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
}

#[test]
fn xml_format_is_rejected_before_writing() {
    let dir = shop_project();
    let config = SwagdocConfig {
        project: dir.path().display().to_string(),
        format: "xml".to_string(),
        ..Default::default()
    };
    let err = GenerateOptions::from_config(&config).unwrap_err();
    assert!(matches!(err, GenerateError::UnsupportedFormat(_)));
    assert!(!dir.path().join("docs").exists());
}

#[test]
fn modules_resolve_through_vendor_and_are_walked_once() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "src/main.rs",
        "//! @Title Vendored\nmod billing;\n#[path = \"../vendor/billing/src/lib.rs\"]\nmod again;\n",
    );
    write(
        dir.path(),
        "vendor/billing/src/lib.rs",
        "/// @Success 200 {array} Invoice \"pagination\"\n/// @Router /invoices [get]\nfn invoices() {}\npub struct Invoice { pub id: u64 }\n",
    );

    let opts = options(dir.path(), OutputFormat::Json);
    let mut fe = frontend(&opts);
    let spec = build_spec(&opts, &mut fe).unwrap();
    assert_eq!(spec.paths.keys().collect::<Vec<_>>(), vec!["/invoices"]);
    assert_eq!(
        spec.definitions.keys().collect::<Vec<_>>(),
        vec!["Invoice", "pagination_Invoice"]
    );

    // Walking the same import again yields nothing new.
    let entry = fe.parse_entry(&dir.path().join("src/main.rs")).unwrap();
    let again = swagdoc_core::ResourceWalker::walk(&mut fe, &entry.imports[0]).unwrap();
    assert!(again.is_empty());
}

#[test]
fn path_attribute_files_own_their_directory() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "src/main.rs",
        "//! @Title Versioned\n#[path = \"api_v2.rs\"]\nmod api;\n",
    );
    write(
        dir.path(),
        "src/api_v2.rs",
        "mod users;\n\npub mod admin {\n    #[path = \"audit_log.rs\"]\n    mod audit;\n}\n",
    );
    write(
        dir.path(),
        "src/users.rs",
        "/// @Success 200 {array} User \"pagination of users\"\n/// @Router /users [get]\nfn users() {}\npub struct User { pub id: u64 }\n",
    );
    write(
        dir.path(),
        "src/admin/audit_log.rs",
        "/// @Success 200 {object} AuditEntry \"latest entry\"\n/// @Router /audit [get]\nfn audit() {}\npub struct AuditEntry { pub id: u64 }\n",
    );

    let opts = options(dir.path(), OutputFormat::Json);
    let spec = build_spec(&opts, &mut frontend(&opts)).unwrap();

    assert_eq!(spec.paths.keys().collect::<Vec<_>>(), vec!["/users", "/audit"]);
    for name in ["User", "AuditEntry", "pagination_User"] {
        assert!(spec.definitions.contains_key(name), "missing {name}");
    }
}

#[test]
fn missing_module_aborts() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/main.rs", "mod nowhere;\n");
    let opts = options(dir.path(), OutputFormat::Json);

    let err = generate(&opts, &mut frontend(&opts)).unwrap_err();
    match err {
        GenerateError::Source(SourceError::ModuleNotFound { name, searched }) => {
            assert_eq!(name, "nowhere");
            assert!(searched.contains(&dir.path().join("vendor/nowhere.rs")));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!dir.path().join("docs").exists());
}

#[test]
fn syntax_errors_are_reported_with_the_file() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/main.rs", "mod broken;\n");
    write(dir.path(), "src/broken.rs", "fn oops( {}\n");
    let opts = options(dir.path(), OutputFormat::Json);

    let err = build_spec(&opts, &mut frontend(&opts)).unwrap_err();
    match err {
        GenerateError::Source(SourceError::Syntax { path, .. }) => {
            assert!(path.ends_with("src/broken.rs"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn entry_parse_failure_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/main.rs", "//! @Title Broken\nstruct {\n");
    let opts = options(dir.path(), OutputFormat::Json);
    assert!(matches!(
        build_spec(&opts, &mut frontend(&opts)),
        Err(GenerateError::Source(SourceError::Syntax { .. }))
    ));
}
