//! Unit tests for single and batch message dispatch

#[cfg(test)]
mod tests {
    use crate::RequestHandler;
    use crate::batch::{JsonRpcMessage, create_error_response, process_message};
    use echo_scaffolder_protocol::{Error, Request, Response};
    use futures::FutureExt;
    use serde_json::{Value, json};
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    fn echo_handler(calls: Arc<AtomicUsize>) -> RequestHandler {
        Box::new(move |request: Request| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { Response::success(request.id, json!({"echo": request.method})) }.boxed()
        })
    }

    fn parse(text: &str) -> JsonRpcMessage {
        JsonRpcMessage::parse(text).expect("valid JSON")
    }

    #[test]
    fn test_parse_single_and_batch() {
        assert!(matches!(
            parse(r#"{"jsonrpc":"2.0","method":"ping","id":1}"#),
            JsonRpcMessage::Single(_)
        ));
        assert!(matches!(
            parse(r#"[{"jsonrpc":"2.0","method":"ping","id":1}]"#),
            JsonRpcMessage::Batch(ref v) if v.len() == 1
        ));
        assert!(JsonRpcMessage::parse("{not json").is_err());
    }

    #[test]
    fn test_to_json_is_single_line() {
        let message = JsonRpcMessage::Batch(vec![json!({"a": 1}), json!({"b": 2})]);
        let text = message.to_json().expect("serializable");
        assert_eq!(text, r#"[{"a":1},{"b":2}]"#);
    }

    #[tokio::test]
    async fn test_single_request_gets_response() {
        let calls = Arc::new(AtomicUsize::new(0));
        let handler = echo_handler(calls.clone());

        let reply = process_message(parse(r#"{"jsonrpc":"2.0","method":"ping","id":1}"#), &handler)
            .await
            .expect("serializable");

        match reply {
            Some(JsonRpcMessage::Single(value)) => {
                assert_eq!(value["id"], json!(1));
                assert_eq!(value["result"]["echo"], json!("ping"));
            }
            other => panic!("Expected single response, got {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_notification_is_handled_silently() {
        let calls = Arc::new(AtomicUsize::new(0));
        let handler = echo_handler(calls.clone());

        let reply = process_message(
            parse(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#),
            &handler,
        )
        .await
        .expect("serializable");

        assert!(reply.is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_client_response_is_ignored() {
        let calls = Arc::new(AtomicUsize::new(0));
        let handler = echo_handler(calls.clone());

        let reply = process_message(parse(r#"{"jsonrpc":"2.0","result":{},"id":3}"#), &handler)
            .await
            .expect("serializable");

        assert!(reply.is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_single_keeps_id() {
        let handler = echo_handler(Arc::new(AtomicUsize::new(0)));

        let reply = process_message(parse(r#"{"jsonrpc":"1.0","method":"ping","id":"x"}"#), &handler)
            .await
            .expect("serializable");

        match reply {
            Some(JsonRpcMessage::Single(value)) => {
                assert_eq!(value["id"], json!("x"));
                assert_eq!(value["error"]["code"], json!(-32600));
            }
            other => panic!("Expected error response, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_batch_answers_requests_only() {
        let calls = Arc::new(AtomicUsize::new(0));
        let handler = echo_handler(calls.clone());

        let batch = r#"[
            {"jsonrpc":"2.0","method":"ping","id":1},
            {"jsonrpc":"2.0","method":"notifications/initialized"},
            {"jsonrpc":"2.0","method":"tools/list","id":2}
        ]"#
        .replace('\n', "");

        let reply = process_message(parse(&batch), &handler)
            .await
            .expect("serializable");

        match reply {
            Some(JsonRpcMessage::Batch(values)) => {
                let ids: Vec<Value> = values.iter().map(|v| v["id"].clone()).collect();
                assert_eq!(ids, vec![json!(1), json!(2)]);
            }
            other => panic!("Expected batch response, got {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_batch_with_invalid_member() {
        let handler = echo_handler(Arc::new(AtomicUsize::new(0)));

        let reply = process_message(
            parse(r#"[{"jsonrpc":"2.0","method":"ping","id":1}, 17]"#),
            &handler,
        )
        .await
        .expect("serializable");

        match reply {
            Some(JsonRpcMessage::Batch(values)) => {
                assert_eq!(values.len(), 2);
                assert_eq!(values[0]["result"]["echo"], json!("ping"));
                assert_eq!(values[1]["error"]["code"], json!(-32600));
                assert_eq!(values[1]["id"], Value::Null);
            }
            other => panic!("Expected batch response, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_notification_only_batch_has_no_reply() {
        let handler = echo_handler(Arc::new(AtomicUsize::new(0)));

        let reply = process_message(
            parse(r#"[{"jsonrpc":"2.0","method":"notifications/initialized"}]"#),
            &handler,
        )
        .await
        .expect("serializable");

        assert!(reply.is_none());
    }

    #[tokio::test]
    async fn test_empty_batch_is_invalid_request() {
        let handler = echo_handler(Arc::new(AtomicUsize::new(0)));

        let reply = process_message(parse("[]"), &handler)
            .await
            .expect("serializable");

        match reply {
            Some(JsonRpcMessage::Single(value)) => {
                assert_eq!(value["error"]["code"], json!(-32600));
                assert_eq!(value["id"], Value::Null);
            }
            other => panic!("Expected single error, got {other:?}"),
        }
    }

    #[test]
    fn test_create_error_response() {
        let response = create_error_response(Error::parse_error("bad"), json!(9));
        assert_eq!(response.id, json!(9));
        assert!(response.result.is_none());
        assert!(response.error.is_some());
    }
}
