//! Document compilation tests over whole routers.

use std::sync::Arc;

use proptest::prelude::*;
use schemars::JsonSchema;
use scribe_core::{
    BearerAuth, Callback, CoreError, CoreResult, GeneratedDefinitions, HttpMethod, ModelField,
    RouteOptions, Router, SchemaInput, SchemarsAdapter, TypeSchemaAdapter,
};
use scribe_docs::{DocsError, DocumentBuilder};
use serde_json::{json, Value};

#[derive(JsonSchema)]
#[allow(dead_code)]
struct User {
    id: u64,
    name: String,
}

#[derive(JsonSchema)]
#[allow(dead_code)]
struct Opaque {
    blob: Vec<u8>,
}

#[derive(JsonSchema)]
#[allow(dead_code)]
struct Delivery {
    status: String,
}

#[derive(JsonSchema)]
#[allow(dead_code)]
struct Receipt {
    delivered_at: String,
}

fn compile(router: &Router) -> Value {
    let doc = DocumentBuilder::new().title("Test").build(router).unwrap();
    serde_json::to_value(doc).unwrap()
}

#[test]
fn shared_model_is_defined_once() {
    let mut router = Router::new();
    router.post("/users", RouteOptions::new().body::<User>().returns::<User>(201));
    router.get("/users/<int:id>", RouteOptions::new().returns::<User>(200));

    let doc = compile(&router);
    let schemas = doc["components"]["schemas"].as_object().unwrap();
    assert_eq!(schemas.len(), 1);
    assert!(schemas.contains_key("User"));

    let reference = json!("#/components/schemas/User");
    assert_eq!(
        doc["paths"]["/users"]["post"]["requestBody"]["content"]["application/json"]["schema"]["$ref"],
        reference
    );
    assert_eq!(
        doc["paths"]["/users/{id}"]["get"]["responses"]["200"]["content"]["application/json"]["schema"]["$ref"],
        reference
    );
}

#[test]
fn operation_without_auth_has_no_security() {
    let mut router = Router::new();
    router.get("/open", RouteOptions::new());

    let doc = compile(&router);
    assert!(doc["paths"]["/open"]["get"].get("security").is_none());
    assert!(doc["components"].get("securitySchemes").is_none());
}

#[test]
fn operation_with_bearer_auth_is_secured() {
    let mut router = Router::new();
    router.get("/secret", RouteOptions::new().auth_scheme(BearerAuth::new()));

    let doc = compile(&router);
    assert_eq!(doc["paths"]["/secret"]["get"]["security"], json!([{"BearerAuth": []}]));
    assert_eq!(
        doc["components"]["securitySchemes"],
        json!({"BearerAuth": {"type": "http", "scheme": "bearer"}})
    );
}

#[test]
fn merged_router_paths_are_prefixed() {
    let mut child = Router::new();
    child.get("/endpoint_api", RouteOptions::new());

    let mut root = Router::new();
    root.add_router(&child, "/prefix");

    let doc = compile(&root);
    assert!(doc["paths"]["/prefix/endpoint_api"]["get"].is_object());
}

// Duplicate (method, path) pairs are not rejected: the later registration
// replaces the earlier one in `paths`. This pins the current behavior.
#[test]
fn duplicate_route_last_registration_wins() {
    let mut router = Router::new();
    router.get("/dup", RouteOptions::new().summary("first"));
    router.get("/dup", RouteOptions::new().summary("second"));

    let doc = compile(&router);
    assert_eq!(doc["paths"]["/dup"]["get"]["summary"], "second");
    assert_eq!(doc["paths"].as_object().unwrap().len(), 1);
}

#[test]
fn different_native_paths_can_collide_after_translation() {
    let mut router = Router::new();
    router.get("/items/<int:id>", RouteOptions::new().summary("int"));
    router.get("/items/<id>", RouteOptions::new().summary("string"));

    let doc = compile(&router);
    assert_eq!(doc["paths"]["/items/{id}"]["get"]["summary"], "string");
}

#[test]
fn description_indentation_is_collapsed() {
    let doc = DocumentBuilder::new()
        .description("My API.\n        Handles users.\n        And more.")
        .build(&Router::new())
        .unwrap();
    assert_eq!(
        doc.info.description.as_deref(),
        Some("My API.\nHandles users.\nAnd more.")
    );
}

#[test]
fn callbacks_are_rendered_with_their_models() {
    let callback = Callback::new("delivery").route(
        HttpMethod::Post,
        "{$request.body#/callbackUrl}",
        RouteOptions::new().body::<Delivery>(),
    );
    let mut router = Router::new();
    router.post("/subscriptions", RouteOptions::new().callback(callback));

    let doc = compile(&router);
    assert!(doc["components"]["schemas"]["Delivery"].is_object());
    let op = &doc["paths"]["/subscriptions"]["post"]["callbacks"]["delivery"]
        ["{$request.body#/callbackUrl}"]["post"];
    assert!(op["requestBody"].is_object());
}

#[test]
fn nested_callbacks_render_under_their_parent() {
    let receipt = Callback::new("receipt").route(
        HttpMethod::Post,
        "{$request.body#/receiptUrl}",
        RouteOptions::new().body::<Receipt>(),
    );
    let delivery = Callback::new("delivery").route(
        HttpMethod::Post,
        "{$request.body#/callbackUrl}",
        RouteOptions::new().body::<Delivery>().callback(receipt),
    );
    let mut router = Router::new();
    router.post("/subscriptions", RouteOptions::new().callback(delivery));

    let doc = compile(&router);
    let schemas = doc["components"]["schemas"].as_object().unwrap();
    assert!(schemas.contains_key("Delivery"));
    assert!(schemas.contains_key("Receipt"));

    let outer = &doc["paths"]["/subscriptions"]["post"]["callbacks"]["delivery"]
        ["{$request.body#/callbackUrl}"]["post"];
    assert_eq!(
        outer["requestBody"]["content"]["application/json"]["schema"]["$ref"],
        "#/components/schemas/Delivery"
    );
    let inner = &outer["callbacks"]["receipt"]["{$request.body#/receiptUrl}"]["post"];
    assert_eq!(
        inner["requestBody"]["content"]["application/json"]["schema"]["$ref"],
        "#/components/schemas/Receipt"
    );
}

#[test]
fn callback_auth_is_declared_in_components() {
    let hook = Callback::new("hook").route(
        HttpMethod::Post,
        "{$request.body#/url}",
        RouteOptions::new().auth_scheme(BearerAuth::new().named("HookAuth")),
    );
    let mut router = Router::new();
    router.post("/hooks", RouteOptions::new().callback(hook));

    let doc = compile(&router);
    let op = &doc["paths"]["/hooks"]["post"];
    assert!(op.get("security").is_none());
    assert_eq!(
        op["callbacks"]["hook"]["{$request.body#/url}"]["post"]["security"],
        json!([{"HookAuth": []}])
    );
    assert_eq!(
        doc["components"]["securitySchemes"]["HookAuth"],
        json!({"type": "http", "scheme": "bearer"})
    );
}

/// Adapter that cannot describe `Opaque`.
struct PickyAdapter;

impl TypeSchemaAdapter for PickyAdapter {
    fn generate_definitions(&self, inputs: &[SchemaInput<'_>]) -> CoreResult<GeneratedDefinitions> {
        let supported: Vec<SchemaInput<'_>> = inputs
            .iter()
            .copied()
            .filter(|input| input.core_schema.name() != "Opaque")
            .collect();
        SchemarsAdapter::new().generate_definitions(&supported)
    }
}

#[test]
fn unresolvable_field_is_omitted_not_fatal() {
    let mut router = Router::new();
    router.post(
        "/upload",
        RouteOptions::new()
            .param(ModelField::query::<String>("name"))
            .body::<Opaque>(),
    );
    router.get("/users", RouteOptions::new().returns::<User>(200));

    let doc = DocumentBuilder::new()
        .adapter(Arc::new(PickyAdapter))
        .build(&router)
        .unwrap();
    let doc = serde_json::to_value(doc).unwrap();

    let upload = &doc["paths"]["/upload"]["post"];
    assert!(upload.get("requestBody").is_none());
    assert_eq!(upload["parameters"][0]["name"], "name");
    assert!(doc["components"]["schemas"]["User"].is_object());
}

struct BrokenAdapter;

impl TypeSchemaAdapter for BrokenAdapter {
    fn generate_definitions(&self, _inputs: &[SchemaInput<'_>]) -> CoreResult<GeneratedDefinitions> {
        Err(CoreError::SchemaGeneration {
            type_name: "*".to_string(),
            reason: "adapter offline".to_string(),
        })
    }
}

#[test]
fn adapter_failure_surfaces_as_error() {
    let result = DocumentBuilder::new()
        .adapter(Arc::new(BrokenAdapter))
        .build(&Router::new());
    assert!(matches!(result, Err(DocsError::SchemaGeneration(_))));
}

#[test]
fn later_registrations_show_up_in_next_build() {
    let builder = DocumentBuilder::new();
    let mut router = Router::new();
    router.get("/a", RouteOptions::new());
    let first = builder.build(&router).unwrap();

    router.get("/b", RouteOptions::new());
    let second = builder.build(&router).unwrap();

    assert_eq!(first.paths.len(), 1);
    assert_eq!(second.paths.len(), 2);
}

fn route() -> impl Strategy<Value = (u8, String, bool, bool)> {
    (
        0u8..5,
        "(/[a-z]{1,5}|/<int:[a-z]{1,3}>){1,3}",
        any::<bool>(),
        any::<bool>(),
    )
}

fn build_router(routes: &[(u8, String, bool, bool)]) -> Router {
    let mut router = Router::new();
    for (verb, path, with_body, with_auth) in routes {
        let method = [
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Patch,
            HttpMethod::Delete,
        ][usize::from(*verb)];
        let mut options = RouteOptions::new().returns::<User>(200);
        if *with_body {
            options = options.body::<Delivery>();
        }
        if *with_auth {
            options = options.auth_scheme(BearerAuth::new());
        }
        router.add_route(method, path.clone(), options);
    }
    router
}

proptest! {
    #[test]
    fn compilation_is_deterministic(routes in prop::collection::vec(route(), 0..10)) {
        let router = build_router(&routes);
        let builder = DocumentBuilder::new().title("Determinism");

        let first = builder.build_json(&router).unwrap();
        let second = builder.build_json(&router).unwrap();
        prop_assert_eq!(first, second);
    }
}
