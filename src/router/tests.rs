use std::collections::BTreeMap;

use super::{RouteOptions, Router};
use crate::config::RouterConfig;
use crate::error::RouterError;
use crate::types::ParamValue;

fn finalized(routes: &[&'static str]) -> Router<str> {
    let mut router: Router<str> = Router::new();
    for path in routes {
        router.add(path, *path).unwrap();
    }
    router.finalize().unwrap();
    router
}

fn get_ok(router: &Router<str>, path: &str) -> String {
    router.resolve(path, "BASE").unwrap().handler.to_string()
}

#[test]
fn test_add_static_route() {
    let mut router: Router<str> = Router::new();
    router.add("/foo/bar", "h").unwrap();
    assert_eq!(router.static_routes().count(), 1);
    assert_eq!(router.dynamic_routes().count(), 0);

    let (_, route) = router.static_routes().next().unwrap();
    assert_eq!(route.parts(), vec!["foo", "bar"]);
}

#[test]
fn test_alternative_delimiter() {
    let config = RouterConfig::default().with_delimiter(':');
    let mut router: Router<str> = Router::with_config(config).unwrap();
    router.add("foo:bar", "h").unwrap();
    router.add("foo:<day:ymd>", "day").unwrap();
    router.finalize().unwrap();

    let (_, route) = router.static_routes().next().unwrap();
    assert_eq!(route.parts(), vec!["foo", "bar"]);

    let m = router.resolve("foo:2021-03-21", "BASE").unwrap();
    assert_eq!(&*m.handler, "day");
    assert_eq!(
        m.params.get("day").and_then(ParamValue::as_date).map(|d| d.to_string()),
        Some("2021-03-21".to_string())
    );
}

#[test]
fn test_angle_bracket_delimiter_rejected() {
    let config = RouterConfig::default().with_delimiter('<');
    assert!(matches!(
        Router::<str>::with_config(config),
        Err(RouterError::InvalidUsage(_))
    ));
}

#[test]
fn test_add_duplicate_route_fails() {
    let mut router: Router<str> = Router::new();
    router.add("/foo/bar", "a").unwrap();
    assert!(matches!(
        router.add("/foo/bar", "b"),
        Err(RouterError::RouteExists { .. })
    ));
    router
        .add_with("/foo/bar", "b", RouteOptions::new().overwrite(true))
        .unwrap();

    router.add("/foo/<bar>", "c").unwrap();
    assert!(matches!(
        router.add("/foo/<bar>", "d"),
        Err(RouterError::RouteExists { .. })
    ));
    router
        .add_with("/foo/<bar>", "d", RouteOptions::new().overwrite(true))
        .unwrap();

    router.finalize().unwrap();
    assert_eq!(get_ok(&router, "/foo/bar"), "b");
    assert_eq!(get_ok(&router, "/foo/baz"), "d");
}

#[test]
fn test_add_duplicate_route_alt_method() {
    let mut router: Router<str> = Router::new();
    router.add("/foo/bar", "base").unwrap();
    router
        .add_with("/foo/bar", "alt", RouteOptions::new().methods(["ALT"]))
        .unwrap();
    router.add("/foo/<bar>", "string").unwrap();
    router.add("/foo/<bar:int>", "int").unwrap();

    assert_eq!(router.static_routes().count(), 1);
    assert_eq!(router.dynamic_routes().count(), 2);

    let (_, route) = router.static_routes().next().unwrap();
    assert_eq!(route.handlers().len(), 2);
    assert_eq!(route.methods().into_iter().collect::<Vec<_>>(), vec!["ALT", "BASE"]);

    for (_, route) in router.dynamic_routes() {
        assert_eq!(route.handlers().len(), 1);
    }

    router.finalize().unwrap();
    let m = router.resolve("/foo/bar", "alt").unwrap();
    assert_eq!(&*m.handler, "alt");
}

#[test]
fn test_route_does_not_exist() {
    let router = finalized(&["/foo"]);
    let err = router.resolve("/path/to/nothing", "BASE").unwrap_err();
    assert_eq!(
        err,
        RouterError::NotFound {
            path: "/path/to/nothing".to_string()
        }
    );
}

#[test]
fn test_method_does_not_exist() {
    let router = finalized(&["/foo"]);
    match router.resolve("/foo", "XXXXXXX") {
        Err(RouterError::NoMethod {
            method, allowed, ..
        }) => {
            assert_eq!(method, "XXXXXXX");
            assert_eq!(allowed, vec!["BASE".to_string()]);
        }
        other => panic!("expected NoMethod, got {:?}", other),
    }
}

#[test]
fn test_cast_types_at_same_position() {
    let router = finalized(&["/foo/<bar>", "/foo/<bar:int>"]);

    let string_bar = router.resolve("/foo/something", "BASE").unwrap();
    assert_eq!(string_bar.params.get("bar"), Some(&ParamValue::from("something")));

    let int_bar = router.resolve("/foo/111", "BASE").unwrap();
    assert_eq!(int_bar.params.get("bar"), Some(&ParamValue::Int(111)));
}

#[test]
fn test_casting_picks_most_specific_type() {
    let router = finalized(&[
        "/<foo:string>",
        "/<foo:int>",
        "/<foo:number>",
        "/<foo:alpha>",
        "/<foo:ymd>",
        "/<foo:uuid>",
    ]);

    let cases = [
        ("/foo_-", "/<foo:string>", "str"),
        ("/11111", "/<foo:int>", "int"),
        ("/99.99", "/<foo:number>", "number"),
        ("/ABCxyz", "/<foo:alpha>", "str"),
        ("/2021-01-01", "/<foo:ymd>", "date"),
        ("/726a7d33-4bd5-46a3-a02d-37da7b4b029b", "/<foo:uuid>", "uuid"),
    ];
    for (path, handler, kind) in cases {
        let m = router.resolve(path, "BASE").unwrap();
        assert_eq!(&*m.handler, handler, "path {}", path);
        assert_eq!(m.params.get("foo").map(ParamValue::kind), Some(kind), "path {}", path);
    }
}

#[test]
fn test_invalid_date_falls_back_to_string() {
    let router = finalized(&["/<foo:string>", "/<foo:ymd>"]);
    let m = router.resolve("/2021-02-30", "BASE").unwrap();
    assert_eq!(&*m.handler, "/<foo:string>");
}

#[test]
fn test_int_beyond_i64_still_matches() {
    let router = finalized(&["/<x:int>"]);
    let m = router.resolve("/99999999999999999999", "BASE").unwrap();
    assert_eq!(&*m.handler, "/<x:int>");
    assert_eq!(
        m.params.get("x"),
        Some(&ParamValue::BigInt("99999999999999999999".to_string()))
    );
}

#[test]
fn test_string_param_accepts_newline() {
    let router = finalized(&["/<x>"]);
    let m = router.resolve("/a\nb", "BASE").unwrap();
    assert_eq!(m.params.get("x"), Some(&ParamValue::from("a\nb")));
}

#[test]
fn test_inline_regex_param() {
    let router = finalized(&["/codes/<code:[a-z]{3}>", "/codes/<code>", "/codes/<code:int>"]);

    let m = router.resolve("/codes/abc", "BASE").unwrap();
    assert_eq!(&*m.handler, "/codes/<code:[a-z]{3}>");
    assert_eq!(m.params.get("code"), Some(&ParamValue::from("abc")));

    // Named rules outrank inline ones, the catch-all ranks below
    assert_eq!(get_ok(&router, "/codes/123"), "/codes/<code:int>");
    assert_eq!(get_ok(&router, "/codes/abcd"), "/codes/<code>");
}

#[test]
fn test_inline_regex_shares_signature_by_source() {
    let mut router: Router<str> = Router::new();
    router.add("/v/<a:v[0-9]+>", "a").unwrap();
    assert!(matches!(
        router.add("/v/<b:v[0-9]+>", "b"),
        Err(RouterError::ParamNameError { .. })
    ));
    router
        .add_with("/v/<b:v[0-9]+>", "b", RouteOptions::new().overwrite(true))
        .unwrap();
    router.finalize().unwrap();
    let m = router.resolve("/v/v2", "BASE").unwrap();
    assert_eq!(&*m.handler, "b");
    assert_eq!(m.params.get("b"), Some(&ParamValue::from("v2")));
}

#[test]
fn test_unknown_type_name_rejected() {
    let mut router: Router<str> = Router::new();
    assert!(matches!(
        router.add("/<x:integer>", "h"),
        Err(RouterError::ParamNameError { .. })
    ));
    assert!(matches!(
        router.add("/<x:[0-9>", "h"),
        Err(RouterError::ParamNameError { .. })
    ));
}

#[test]
fn test_path_param_spans_delimiters() {
    let router = finalized(&[
        "/static/<file:path>",
        "/static/<file:path>/raw",
        "/static/index",
    ]);

    let m = router.resolve("/static/css/site/main.css", "BASE").unwrap();
    assert_eq!(&*m.handler, "/static/<file:path>");
    assert_eq!(m.params.get("file"), Some(&ParamValue::from("css/site/main.css")));

    let m = router.resolve("/static/css/main.css/raw", "BASE").unwrap();
    assert_eq!(&*m.handler, "/static/<file:path>/raw");
    assert_eq!(m.params.get("file"), Some(&ParamValue::from("css/main.css")));

    assert_eq!(get_ok(&router, "/static/index"), "/static/index");
    assert!(matches!(
        router.resolve("/static", "BASE"),
        Err(RouterError::NotFound { .. })
    ));
}

#[test]
fn test_path_param_trailing_delimiter_normalized() {
    let router = finalized(&["/docs/<page:path>"]);
    let m = router.resolve("/docs/guide/intro/", "BASE").unwrap();
    assert_eq!(m.params.get("page"), Some(&ParamValue::from("guide/intro")));
}

#[test]
fn test_conditional_check_proper_compile() {
    let mut router: Router<str> = Router::new();
    router
        .add_with("/<foo>/", "plain", RouteOptions::new().strict(true))
        .unwrap();
    router
        .add_with(
            "/<foo>/",
            "conditional",
            RouteOptions::new().strict(true).requirement("foo", "bar"),
        )
        .unwrap();
    router.finalize().unwrap();
    assert!(router.is_finalized());

    let mut extra = BTreeMap::new();
    extra.insert("foo".to_string(), "bar".to_string());
    let m = router.resolve_with("/x/", "BASE", Some(&extra)).unwrap();
    assert_eq!(&*m.handler, "conditional");

    let m = router.resolve("/x/", "BASE").unwrap();
    assert_eq!(&*m.handler, "plain");
}

#[test]
fn test_requirements_only_route_needs_extra() {
    let mut router: Router<str> = Router::new();
    router
        .add_with(
            "/admin",
            "admin",
            RouteOptions::new().requirement("host", "admin.example.com"),
        )
        .unwrap();
    router.finalize().unwrap();

    assert!(matches!(
        router.resolve("/admin", "BASE"),
        Err(RouterError::NotFound { .. })
    ));

    let mut extra = BTreeMap::new();
    extra.insert("host".to_string(), "other.example.com".to_string());
    assert!(router.resolve_with("/admin", "BASE", Some(&extra)).is_err());

    extra.insert("host".to_string(), "admin.example.com".to_string());
    assert!(router.resolve_with("/admin", "BASE", Some(&extra)).is_ok());
}

#[test]
fn test_requirements_match_exactly() {
    let mut router: Router<str> = Router::new();
    router.add("/report", "public").unwrap();
    router
        .add_with(
            "/report",
            "internal",
            RouteOptions::new().requirement("host", "intranet"),
        )
        .unwrap();
    router.finalize().unwrap();

    let mut extra = BTreeMap::new();
    extra.insert("host".to_string(), "intranet".to_string());
    let m = router.resolve_with("/report", "BASE", Some(&extra)).unwrap();
    assert_eq!(&*m.handler, "internal");

    // Extra keys beyond the declared ones do not satisfy the route
    extra.insert("region".to_string(), "eu".to_string());
    let m = router.resolve_with("/report", "BASE", Some(&extra)).unwrap();
    assert_eq!(&*m.handler, "public");
}

#[test]
fn test_use_param_name() {
    for name in ["fooBar", "foo_bar", "Foobar", "foobar1"] {
        for declared in [format!("<{}>", name), format!("<{}:str>", name)] {
            let mut router: Router<str> = Router::new();
            router.add(&format!("/path/{}", declared), "h").unwrap();
            let route = router.routes().next().unwrap();
            assert_eq!(route.parts(), vec!["path", declared.as_str()]);
        }
    }
}

#[test]
fn test_invalid_param_names_rejected() {
    let mut router: Router<str> = Router::new();
    for path in ["/foo/<bar-baz>", "/foo/<>", "/foo/<bar:nope>", "/foo/x<bar>"] {
        assert!(
            matches!(router.add(path, "h"), Err(RouterError::ParamNameError { .. })),
            "path {}",
            path
        );
    }
}

#[test]
fn test_duplicate_param_name_in_one_route() {
    let mut router: Router<str> = Router::new();
    assert!(matches!(
        router.add("/<id>/x/<id:int>", "h"),
        Err(RouterError::ParamNameError { .. })
    ));
}

#[test]
fn test_renamed_param_needs_overwrite() {
    let mut router: Router<str> = Router::new();
    router.add("/foo/<a:int>", "a").unwrap();
    assert!(matches!(
        router.add("/foo/<b:int>", "b"),
        Err(RouterError::ParamNameError { .. })
    ));
    router
        .add_with("/foo/<b:int>", "b", RouteOptions::new().overwrite(true))
        .unwrap();
    router.finalize().unwrap();

    let m = router.resolve("/foo/7", "BASE").unwrap();
    assert_eq!(&*m.handler, "b");
    assert_eq!(m.params.get("b"), Some(&ParamValue::Int(7)));
    assert_eq!(m.params.get("a"), None);
}

#[test]
fn test_use_route_contains_children() {
    let router = finalized(&[
        "/foo/<foo_id>/bars_ids",
        "/foo/<foo_id>/bars_ids/<bar_id>/settings/<group_id>/groups",
    ]);

    let bars_ids = router.resolve("/foo/123/bars_ids", "BASE").unwrap();
    assert_eq!(bars_ids.params.get("foo_id"), Some(&ParamValue::from("123")));

    let groups = router
        .resolve("/foo/123/bars_ids/321/settings/111/groups", "BASE")
        .unwrap();
    let params = groups.params.to_map();
    assert_eq!(params.len(), 3);
    assert_eq!(params["foo_id"], ParamValue::from("123"));
    assert_eq!(params["bar_id"], ParamValue::from("321"));
    assert_eq!(params["group_id"], ParamValue::from("111"));
}

#[test]
fn test_use_route_with_different_depth() {
    let routes = [
        "/foo/<foo_id>",
        "/foo/<foo_id>/settings",
        "/foo/<foo_id>/bars/<bar_id>/settings",
        "/foo/<foo_id>/bars_ids",
        "/foo/<foo_id>/bars_ids/<bar_id>/settings",
        "/foo/<foo_id>/bars_ids/<bar_id>/settings/<group_id>/groups",
    ];
    let router = finalized(&routes);

    assert_eq!(get_ok(&router, "/foo/123"), routes[0]);
    assert_eq!(get_ok(&router, "/foo/123/settings"), routes[1]);
    assert_eq!(get_ok(&router, "/foo/123/bars/321/settings"), routes[2]);
    assert_eq!(get_ok(&router, "/foo/123/bars_ids"), routes[3]);
    assert_eq!(get_ok(&router, "/foo/123/bars_ids/321/settings"), routes[4]);
    assert_eq!(
        get_ok(&router, "/foo/123/bars_ids/321/settings/111/groups"),
        routes[5]
    );
}

#[test]
fn test_use_route_type_coercion() {
    let router = finalized(&[
        "/test/<foo:int>",
        "/test/<foo:int>/bar",
        "/test/<foo:int>/bar/baz",
    ]);

    router.resolve("/test/123", "BASE").unwrap();
    router.resolve("/test/123/bar", "BASE").unwrap();
    router.resolve("/test/123/bar/baz", "BASE").unwrap();

    for path in [
        "/test/foo/aaaa",
        "/test/123/aaaa",
        "/test/123/aaaa/bbbb",
        "/test/123/aaaa/bbbb/cccc",
        "/test/foo/bar",
        "/test/123/bar/bbbb",
        "/test/123/bar/bbbb/cccc",
    ] {
        assert!(
            matches!(router.resolve(path, "BASE"), Err(RouterError::NotFound { .. })),
            "path {}",
            path
        );
    }
}

#[test]
fn test_route_correct_coercion() {
    let router = finalized(&["/<test:string>", "/<test:int>", "/<test:uuid>", "/<test:ymd>"]);

    assert_eq!(get_ok(&router, "/foo"), "/<test:string>");
    assert_eq!(get_ok(&router, "/123"), "/<test:int>");
    assert_eq!(
        get_ok(&router, "/726a7d33-4bd5-46a3-a02d-37da7b4b029b"),
        "/<test:uuid>"
    );
    assert_eq!(get_ok(&router, "/2021-03-21"), "/<test:ymd>");
}

#[test]
fn test_backtracks_into_less_specific_type() {
    let router = finalized(&["/<a:int>/x", "/<a>/y"]);
    let m = router.resolve("/1/y", "BASE").unwrap();
    assert_eq!(&*m.handler, "/<a>/y");
    assert_eq!(m.params.get("a"), Some(&ParamValue::from("1")));
}

#[test]
fn test_no_method_prefers_other_leaf_serving_method() {
    let mut router: Router<str> = Router::new();
    router
        .add_with("/<a:int>", "int_get", RouteOptions::new().methods(["GET"]))
        .unwrap();
    router
        .add_with("/<a>", "str_post", RouteOptions::new().methods(["POST"]))
        .unwrap();
    router.finalize().unwrap();

    let m = router.resolve("/5", "POST").unwrap();
    assert_eq!(&*m.handler, "str_post");
    assert!(matches!(
        router.resolve("/5", "DELETE"),
        Err(RouterError::NoMethod { .. })
    ));
}

#[test]
fn test_trailing_delimiter_non_strict() {
    let router = finalized(&["/foo/bar/", "/users/<id:int>"]);
    assert_eq!(get_ok(&router, "/foo/bar"), "/foo/bar/");
    assert_eq!(get_ok(&router, "/foo/bar/"), "/foo/bar/");
    assert_eq!(get_ok(&router, "/users/3/"), "/users/<id:int>");
    assert!(router.static_route("/foo/bar").is_some());
}

#[test]
fn test_trailing_delimiter_strict() {
    let mut router: Router<str> = Router::new();
    router
        .add_with("/foo/", "slash", RouteOptions::new().strict(true))
        .unwrap();
    router
        .add_with("/bar", "bare", RouteOptions::new().strict(true))
        .unwrap();
    router.finalize().unwrap();

    assert_eq!(get_ok(&router, "/foo/"), "slash");
    assert!(router.resolve("/foo", "BASE").is_err());
    assert_eq!(get_ok(&router, "/bar"), "bare");
    assert!(router.resolve("/bar/", "BASE").is_err());
}

#[test]
fn test_strictness_clash_rejected() {
    let mut router: Router<str> = Router::new();
    router.add("/foo", "a").unwrap();
    assert!(matches!(
        router.add_with("/foo", "b", RouteOptions::new().strict(true)),
        Err(RouterError::InvalidUsage(_))
    ));
}

#[test]
fn test_root_path() {
    let router = finalized(&["/"]);
    assert_eq!(get_ok(&router, "/"), "/");
    assert!(router.resolve("/x", "BASE").is_err());
}

#[test]
fn test_unquote_string_params() {
    let mut router: Router<str> = Router::new();
    router
        .add_with("/files/<name>", "files", RouteOptions::new().unquote(true))
        .unwrap();
    router.add("/raw/<name>", "raw").unwrap();
    router.finalize().unwrap();

    let m = router.resolve("/files/hello%20world", "BASE").unwrap();
    assert_eq!(m.params.get("name"), Some(&ParamValue::from("hello world")));

    let m = router.resolve("/raw/hello%20world", "BASE").unwrap();
    assert_eq!(m.params.get("name"), Some(&ParamValue::from("hello%20world")));
}

#[test]
fn test_unquote_from_config() {
    let config = RouterConfig::default().with_unquote(true);
    let mut router: Router<str> = Router::with_config(config).unwrap();
    router.add("/<name>", "h").unwrap();
    router.finalize().unwrap();
    let m = router.resolve("/caf%C3%A9", "BASE").unwrap();
    assert_eq!(m.params.get("name"), Some(&ParamValue::from("café")));
}

#[test]
fn test_methods_are_case_insensitive() {
    let mut router: Router<str> = Router::new();
    router
        .add_with("/x", "h", RouteOptions::new().methods(["get", "Post"]))
        .unwrap();
    router.finalize().unwrap();
    assert!(router.resolve("/x", "GET").is_ok());
    assert!(router.resolve("/x", "post").is_ok());
    assert!(router.resolve("/x", "BASE").is_err());
}

#[test]
fn test_empty_method_set_rejected() {
    let mut router: Router<str> = Router::new();
    let empty: [&str; 0] = [];
    assert!(matches!(
        router.add_with("/x", "h", RouteOptions::new().methods(empty)),
        Err(RouterError::InvalidUsage(_))
    ));
}

#[test]
fn test_custom_default_method() {
    let config = RouterConfig::default().with_default_method("get");
    let mut router: Router<str> = Router::with_config(config).unwrap();
    router.add("/x", "h").unwrap();
    router.finalize().unwrap();
    assert!(router.resolve("/x", "GET").is_ok());
}

#[test]
fn test_lifecycle() {
    let mut router: Router<str> = Router::new();
    router.add("/a", "a").unwrap();
    assert_eq!(router.resolve("/a", "BASE").unwrap_err(), RouterError::NotFinalized);

    router.finalize().unwrap();
    assert_eq!(router.add("/b", "b").unwrap_err(), RouterError::Finalized);

    router.reopen();
    assert!(!router.is_finalized());
    router.add("/b", "b").unwrap();
    router.finalize().unwrap();
    router.finalize().unwrap();
    assert_eq!(get_ok(&router, "/b"), "b");
    assert_eq!(router.route_count(), 2);
}

#[test]
fn test_finalize_twice_resolves_identically() {
    let mut router: Router<str> = Router::new();
    for path in [
        "/",
        "/users",
        "/users/me",
        "/users/<id:int>",
        "/users/<name:alpha>",
        "/users/<id:int>/posts/<slug:slug>",
        "/users/<name>/files/<rest:path>",
        "/events/<day:ymd>",
    ] {
        router.add(path, path).unwrap();
    }
    router
        .add_with("/users/<id:int>", "update", RouteOptions::new().methods(["PUT"]))
        .unwrap();

    let requests = [
        ("/", "BASE"),
        ("/users", "BASE"),
        ("/users/", "BASE"),
        ("/users/me", "BASE"),
        ("/users/42", "BASE"),
        ("/users/42", "PUT"),
        ("/users/42", "DELETE"),
        ("/users/bob", "BASE"),
        ("/users/7/posts/hello-world", "BASE"),
        ("/users/bob-2/files/a/b.txt", "BASE"),
        ("/events/2024-02-29", "BASE"),
        ("/events/2023-02-29", "BASE"),
        ("/nope", "BASE"),
    ];
    let snapshot = |router: &Router<str>| {
        requests
            .iter()
            .map(|(path, method)| match router.resolve(path, method) {
                Ok(m) => Ok((m.handler.to_string(), m.params)),
                Err(err) => Err(err),
            })
            .collect::<Vec<_>>()
    };

    router.finalize().unwrap();
    let first = snapshot(&router);
    router.finalize().unwrap();
    let second = snapshot(&router);

    assert_eq!(first, second);
    assert!(first.iter().filter(|r| r.is_ok()).count() >= 9);
}

#[test]
fn test_groups_share_skeleton() {
    let mut router: Router<str> = Router::new();
    router.add("/foo/<a>", "s").unwrap();
    router.add("/foo/<a:int>", "i").unwrap();
    router.add("/bar/<a>", "b").unwrap();

    assert_eq!(router.groups().len(), 2);
    let foo = &router.groups()[0];
    assert_eq!(foo.skeleton().to_string(), "/foo/<>");
    assert_eq!(foo.len(), 2);
}

#[test]
fn test_introspection_keys() {
    let mut router: Router<str> = Router::new();
    router.add("/foo/bar", "s").unwrap();
    router.add("/foo/<bar:int>", "d").unwrap();

    let statics: Vec<String> = router.static_routes().map(|(k, _)| k.to_string()).collect();
    let dynamics: Vec<String> = router.dynamic_routes().map(|(k, _)| k.to_string()).collect();
    assert_eq!(statics, vec!["/foo/bar"]);
    assert_eq!(dynamics, vec!["/foo/<:int>"]);

    let mut patterns = router.get_all_path_patterns();
    patterns.sort();
    assert_eq!(patterns, vec!["/foo/<bar:int>", "/foo/bar"]);
    assert!(router.tree_outline().is_empty());

    router.finalize().unwrap();
    assert_eq!(router.tree_outline().len(), 4);
}

#[test]
fn test_custom_type_registration() {
    use crate::types::TypeRegistry;
    use std::sync::Arc;

    let mut types = TypeRegistry::with_builtins();
    types
        .register("hex", r"[0-9a-f]+", 250, |s| {
            i64::from_str_radix(s, 16).ok().map(ParamValue::Int)
        })
        .unwrap();
    let mut router: Router<str> =
        Router::with_types(RouterConfig::default(), Arc::new(types)).unwrap();
    router.add("/color/<c:hex>", "hex").unwrap();
    router.add("/color/<c>", "name").unwrap();
    router.finalize().unwrap();

    let m = router.resolve("/color/ff", "BASE").unwrap();
    assert_eq!(&*m.handler, "hex");
    assert_eq!(m.params.get("c"), Some(&ParamValue::Int(255)));
    assert_eq!(get_ok(&router, "/color/red"), "name");
}
