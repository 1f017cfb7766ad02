//! Property tests for router merging and path translation.

use proptest::prelude::*;
use scribe_core::path::translate;
use scribe_core::{HttpMethod, RouteOptions, Router};

fn segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}"
}

fn native_path() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            segment(),
            segment().prop_map(|s| format!("<{s}>")),
            segment().prop_map(|s| format!("<int:{s}>")),
            segment().prop_map(|s| format!("<uuid:{s}>")),
        ],
        0..5,
    )
    .prop_map(|segments| format!("/{}", segments.join("/")))
}

fn method() -> impl Strategy<Value = HttpMethod> {
    prop_oneof![
        Just(HttpMethod::Get),
        Just(HttpMethod::Post),
        Just(HttpMethod::Put),
        Just(HttpMethod::Patch),
        Just(HttpMethod::Delete),
    ]
}

proptest! {
    #[test]
    fn merged_paths_are_prefix_plus_original(
        routes in prop::collection::vec((method(), native_path()), 0..8),
        prefix in "(/[a-z]{1,6}){0,3}",
    ) {
        let mut child = Router::new();
        for (method, path) in &routes {
            child.add_route(*method, path.clone(), RouteOptions::new());
        }

        let mut parent = Router::new();
        parent.add_router(&child, &prefix);

        prop_assert_eq!(parent.len(), child.len());
        for (merged, original) in parent.operations().iter().zip(child.operations()) {
            prop_assert_eq!(merged.path(), format!("{prefix}{}", original.path()));
            prop_assert_eq!(merged.method(), original.method());
            prop_assert_eq!(merged.route_id(), original.route_id());
            prop_assert_eq!(
                merged.get_openapi_path(),
                format!("{prefix}{}", original.get_openapi_path())
            );
        }
    }

    #[test]
    fn translation_leaves_no_known_placeholders(path in native_path()) {
        let template = translate(&path);
        prop_assert!(!template.template.contains('<'));
        prop_assert_eq!(template.params.len(), path.matches('<').count());
    }

    #[test]
    fn translation_is_total(path in "\\PC{0,40}") {
        let first = translate(&path);
        let second = translate(&path);
        prop_assert_eq!(first, second);
    }
}

#[test]
fn deep_merge_flattens_in_order() {
    let mut v2 = Router::new();
    v2.get("/items", RouteOptions::new());
    v2.delete("/items/<int:id>", RouteOptions::new());

    let mut api = Router::new();
    api.get("/health", RouteOptions::new());
    api.add_router(&v2, "/v2");

    let mut root = Router::new();
    root.add_router(&api, "/api");

    let paths: Vec<String> = root
        .operations()
        .iter()
        .map(|op| op.get_openapi_path())
        .collect();
    assert_eq!(paths, ["/api/health", "/api/v2/items", "/api/v2/items/{id}"]);
}
