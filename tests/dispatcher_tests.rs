
use http::Method;
use restgate::{
    Dispatcher, DispatcherConfig, HandlerFailure, HandlerSuccess, Request, Response, RouteHandler,
    StaticTokenAuth, XmlFormat,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing_util::TestTracing;

fn sample_dispatcher() -> Dispatcher {
    let mut dispatcher = Dispatcher::new(DispatcherConfig::default());
    dispatcher
        .register_handler(
            "sample",
            RouteHandler::new("/sample")
                .get(|_ctx| Ok(HandlerSuccess::ok(json!({"kind": "sample"}))))
                .post(|_ctx| Ok(HandlerSuccess::with_status(201, json!({"created": true})))),
        )
        .unwrap();
    dispatcher
}

fn error_body(response: &Response) -> Value {
    serde_json::from_str(&response.body).expect("error body is valid JSON")
}

#[test]
fn successful_dispatch_encodes_handler_body() {
    let _tracing = TestTracing::init();
    let dispatcher = sample_dispatcher();

    let response = dispatcher.dispatch(Request::new(Method::GET, "/sample"));
    assert_eq!(response.status, 200);
    assert_eq!(
        response.get_header("content-type"),
        Some("application/json")
    );
    assert_eq!(response.body, r#"{"kind":"sample"}"#);
}

#[test]
fn handler_status_override_is_honored() {
    let _tracing = TestTracing::init();
    let dispatcher = sample_dispatcher();

    let response = dispatcher.dispatch(Request::new(Method::POST, "/sample"));
    assert_eq!(response.status, 201);
    assert_eq!(response.body, r#"{"created":true}"#);
}

#[test]
fn unknown_path_yields_resource_not_found() {
    let _tracing = TestTracing::init();
    let dispatcher = sample_dispatcher();

    let response = dispatcher.dispatch(Request::new(Method::GET, "/nowhere"));
    assert_eq!(response.status, 404);

    let body = error_body(&response);
    assert_eq!(body["error"]["errorCode"], "1001");
    assert_eq!(
        body["error"]["errorURL"],
        "https://errors.restgate.dev/1001"
    );
}

#[test]
fn unsupported_method_yields_method_not_supported() {
    let _tracing = TestTracing::init();
    let dispatcher = sample_dispatcher();

    let response = dispatcher.dispatch(Request::new(Method::DELETE, "/sample"));
    assert_eq!(response.status, 405);
    assert_eq!(error_body(&response)["error"]["errorCode"], "1002");
}

#[test]
fn handler_panic_becomes_catch_all_error() {
    let _tracing = TestTracing::init();
    let mut dispatcher = Dispatcher::new(DispatcherConfig::default());
    dispatcher
        .register_handler(
            "explosive",
            RouteHandler::new("/explosive").get(|_ctx| panic!("wiring fault")),
        )
        .unwrap();

    let response = dispatcher.dispatch(Request::new(Method::GET, "/explosive"));
    assert_eq!(response.status, 500);

    let body = error_body(&response);
    assert_eq!(body["error"]["errorCode"], "0000");
    assert_eq!(body["error"]["errorMessage"], "wiring fault");
}

#[test]
fn handler_failure_passes_through_unchanged() {
    let _tracing = TestTracing::init();
    let mut dispatcher = Dispatcher::new(DispatcherConfig::default());
    dispatcher
        .register_handler(
            "teapot",
            RouteHandler::new("/teapot")
                .get(|_ctx| Err(HandlerFailure::new(409, "4100", "already brewing"))),
        )
        .unwrap();

    let response = dispatcher.dispatch(Request::new(Method::GET, "/teapot"));
    assert_eq!(response.status, 409);

    let body = error_body(&response);
    assert_eq!(body["error"]["errorCode"], "4100");
    assert_eq!(body["error"]["errorMessage"], "already brewing");
    assert_eq!(
        body["error"]["errorURL"],
        "https://errors.restgate.dev/4100"
    );
}

#[test]
fn unauthenticated_request_is_rejected_with_challenge() {
    let _tracing = TestTracing::init();
    let mut dispatcher = Dispatcher::new(DispatcherConfig::default());
    dispatcher.set_auth_provider(Box::new(StaticTokenAuth::new("X-Api-Key", "sesame")));
    dispatcher
        .register_handler(
            "vault",
            RouteHandler::new("/vault").get(|ctx| {
                if !ctx.is_authenticated() {
                    return Err(HandlerFailure::unauthenticated());
                }
                Ok(HandlerSuccess::ok(json!({"open": true})))
            }),
        )
        .unwrap();

    let denied = dispatcher.dispatch(Request::new(Method::GET, "/vault"));
    assert_eq!(denied.status, 401);
    assert_eq!(error_body(&denied)["error"]["errorCode"], "1003");
    assert_eq!(
        denied.get_header("www-authenticate"),
        Some(r#"Token header="X-Api-Key""#)
    );

    let allowed = dispatcher.dispatch(
        Request::new(Method::GET, "/vault").header("X-Api-Key", "sesame"),
    );
    assert_eq!(allowed.status, 200);
    assert_eq!(allowed.body, r#"{"open":true}"#);
}

#[test]
fn accept_header_selects_registered_xml() {
    let _tracing = TestTracing::init();
    let mut dispatcher = sample_dispatcher();
    dispatcher.register_format(Arc::new(XmlFormat)).unwrap();

    let response = dispatcher.dispatch(
        Request::new(Method::GET, "/sample")
            .header("Accept", "application/xml;q=0.9, text/html;q=0.8"),
    );
    assert_eq!(response.get_header("content-type"), Some("application/xml"));
    assert!(response.body.starts_with("<?xml"));
    assert!(response.body.contains("<kind>sample</kind>"));
}

#[test]
fn unmatched_accept_falls_back_to_json() {
    let _tracing = TestTracing::init();
    let dispatcher = sample_dispatcher();

    let response = dispatcher
        .dispatch(Request::new(Method::GET, "/sample").header("Accept", "text/csv;q=1.0"));
    assert_eq!(
        response.get_header("content-type"),
        Some("application/json")
    );
    assert_eq!(response.body, r#"{"kind":"sample"}"#);
}

#[test]
fn error_responses_honor_negotiated_format() {
    let _tracing = TestTracing::init();
    let mut dispatcher = sample_dispatcher();
    dispatcher.register_format(Arc::new(XmlFormat)).unwrap();

    let response = dispatcher.dispatch(
        Request::new(Method::GET, "/nowhere").header("Accept", "application/xml"),
    );
    assert_eq!(response.status, 404);
    assert_eq!(response.get_header("content-type"), Some("application/xml"));
    assert!(response.body.contains("<errorCode>1001</errorCode>"));
}

#[test]
fn handler_pinned_format_beats_accept_header() {
    let _tracing = TestTracing::init();
    let mut dispatcher = Dispatcher::new(DispatcherConfig::default());
    dispatcher.register_format(Arc::new(XmlFormat)).unwrap();
    dispatcher
        .register_handler(
            "report",
            RouteHandler::new("/report.xml").get(|ctx| {
                // Extension-derived pin: the URL decides, not the Accept
                // header.
                assert!(ctx.select_format_by_extension("xml"));
                Ok(HandlerSuccess::ok(json!({"rows": 3})))
            }),
        )
        .unwrap();

    let response = dispatcher.dispatch(
        Request::new(Method::GET, "/report.xml").header("Accept", "application/json"),
    );
    assert_eq!(response.get_header("content-type"), Some("application/xml"));
    assert!(response.body.contains("<rows>3</rows>"));
}

#[test]
fn global_headers_are_merged_into_every_response() {
    let _tracing = TestTracing::init();
    let mut dispatcher = sample_dispatcher();
    dispatcher.add_global_header("X-Powered-By", "restgate");

    let success = dispatcher.dispatch(Request::new(Method::GET, "/sample"));
    assert_eq!(success.get_header("x-powered-by"), Some("restgate"));

    let failure = dispatcher.dispatch(Request::new(Method::GET, "/nowhere"));
    assert_eq!(failure.get_header("x-powered-by"), Some("restgate"));
}

#[test]
fn handler_headers_survive_finalization() {
    let _tracing = TestTracing::init();
    let mut dispatcher = Dispatcher::new(DispatcherConfig::default());
    dispatcher
        .register_handler(
            "cached",
            RouteHandler::new("/cached").get(|_ctx| {
                Ok(HandlerSuccess::ok(json!({"cached": true}))
                    .header("Cache-Control", "max-age=60"))
            }),
        )
        .unwrap();

    let response = dispatcher.dispatch(Request::new(Method::GET, "/cached"));
    assert_eq!(response.get_header("cache-control"), Some("max-age=60"));
}

#[test]
fn handler_without_operations_is_rejected() {
    let _tracing = TestTracing::init();
    let mut dispatcher = Dispatcher::new(DispatcherConfig::default());
    let err = dispatcher
        .register_handler("empty", RouteHandler::new("/empty"))
        .unwrap_err();
    assert_eq!(err.code(), "0053");
}

#[test]
fn base_path_applies_to_dispatch() {
    let _tracing = TestTracing::init();
    let config = DispatcherConfig {
        base_path: "/api/v1".to_string(),
        ..DispatcherConfig::default()
    };
    let mut dispatcher = Dispatcher::new(config);
    dispatcher
        .register_handler(
            "sample",
            RouteHandler::new("/sample")
                .get(|_ctx| Ok(HandlerSuccess::ok(json!({"kind": "sample"})))),
        )
        .unwrap();

    assert_eq!(
        dispatcher
            .dispatch(Request::new(Method::GET, "/api/v1/sample"))
            .status,
        200
    );
    assert_eq!(
        dispatcher
            .dispatch(Request::new(Method::GET, "/sample"))
            .status,
        404
    );
}

#[test]
fn custom_error_url_base_shapes_error_links() {
    let _tracing = TestTracing::init();
    let config = DispatcherConfig {
        error_url_base: "https://docs.example.com/errors/".to_string(),
        ..DispatcherConfig::default()
    };
    let dispatcher = Dispatcher::new(config);

    let response = dispatcher.dispatch(Request::new(Method::GET, "/nowhere"));
    assert_eq!(
        error_body(&response)["error"]["errorURL"],
        "https://docs.example.com/errors/1001"
    );
}
