//! Tests for request context functionality

use crate::context::RequestContext;
use echo_scaffolder_protocol::Implementation;
use uuid::Uuid;

#[test]
fn test_request_context_new() {
    let context = RequestContext::new("tools/list");

    assert_ne!(context.request_id, Uuid::nil());
    assert_eq!(context.method, "tools/list");
    assert!(context.metadata.is_empty());
    assert!(context.client_info.is_none());
    assert_eq!(context.client_name(), "unknown");
}

#[test]
fn test_request_ids_are_unique() {
    let first = RequestContext::new("ping");
    let second = RequestContext::new("ping");
    assert_ne!(first.request_id, second.request_id);
}

#[test]
fn test_request_context_with_id() {
    let id = Uuid::new_v4();
    let context = RequestContext::with_id(id, "initialize");
    assert_eq!(context.request_id, id);
}

#[test]
fn test_request_context_builders() {
    let context = RequestContext::new("tools/call")
        .with_client_info(Implementation {
            name: "inspector".to_string(),
            version: "0.9.0".to_string(),
        })
        .with_metadata("tool", "model-scaffold");

    assert_eq!(context.client_name(), "inspector");
    assert_eq!(
        context.get_metadata("tool"),
        Some("model-scaffold")
    );
    assert!(context.get_metadata("missing").is_none());
}
