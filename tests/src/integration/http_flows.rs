//! # HTTP Flows
//!
//! Whole process wiring as the binary builds it (`GatewayRuntime` with an
//! ephemeral identity), exercised through the HTTP router.

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use futures::future::join_all;
    use gateway_runtime::{GatewayRuntime, RuntimeConfig};
    use serde_json::{json, Value};
    use std::time::Duration;
    use tower::ServiceExt;

    fn runtime() -> GatewayRuntime {
        let mut config = RuntimeConfig::default();
        config.identity.ephemeral = true;
        config.network.block_delay = Duration::from_millis(5);
        config.submission.commit_timeout = Duration::from_secs(5);
        GatewayRuntime::new(config).unwrap()
    }

    async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    fn add_contract(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/addContract")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_add_then_read_contract() {
        let runtime = runtime();
        let app = runtime.gateway().router();
        let contract = json!({"ContractHeading": "Maintenance", "Amount": 1200});

        let (status, body) = call(&app, add_contract(json!({"key": 17, "value": contract}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], "");
        assert_eq!(
            serde_json::from_str::<Value>(body["payload"].as_str().unwrap()).unwrap(),
            contract
        );

        let (status, body) = call(&app, get("/contracts/17")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"key": "17", "contract": contract}));

        let (_, stats) = call(&app, get("/stats")).await;
        assert_eq!(stats["submissions"]["committed"], 1);
        assert_eq!(stats["commit_events"]["active_listeners"], 0);
    }

    #[tokio::test]
    async fn test_duplicate_is_reported_with_chaincode_message() {
        let runtime = runtime();
        let app = runtime.gateway().router();
        let request = || add_contract(json!({"key": "dup", "value": 1}));

        assert_eq!(call(&app, request()).await.0, StatusCode::OK);
        let (status, body) = call(&app, request()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body, json!({"error": "Asset dup already exists"}));
        assert_eq!(runtime.network().orderer().broadcasts(), 1);
    }

    #[tokio::test]
    async fn test_missing_value_never_reaches_peers() {
        let runtime = runtime();
        let app = runtime.gateway().router();

        let (status, body) = call(&app, add_contract(json!({"key": 3}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("value"));
        assert_eq!(runtime.network().peers()[0].proposals(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_requests() {
        let runtime = runtime();
        let app = runtime.gateway().router();

        let calls = (0..24).map(|i| {
            let app = app.clone();
            async move { call(&app, add_contract(json!({"key": i, "value": {"n": i}}))).await }
        });
        let results = join_all(calls).await;

        for (i, (status, body)) in results.into_iter().enumerate() {
            assert_eq!(status, StatusCode::OK, "request {i}: {body}");
            assert_eq!(body["payload"], format!("{{\"n\":{i}}}"));
        }
        assert_eq!(runtime.network().state().height(), 24);
        assert_eq!(runtime.network().hub().listener_count(), 0);
    }

    #[tokio::test]
    async fn test_commit_timeout_surfaces_as_504() {
        let mut config = RuntimeConfig::default();
        config.identity.ephemeral = true;
        config.submission.commit_timeout = Duration::from_millis(50);
        let runtime = GatewayRuntime::new(config).unwrap();
        runtime.network().orderer().set_event_delivery(false);
        let app = runtime.gateway().router();

        let (status, body) = call(&app, add_contract(json!({"key": 1, "value": 1}))).await;
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert!(body["error"].as_str().unwrap().contains("not committed within 50ms"));

        let (_, stats) = call(&app, get("/stats")).await;
        assert_eq!(stats["submissions"]["timed_out"], 1);
        assert_eq!(stats["commit_events"]["listeners"]["total_unregistered"], 1);
    }

    #[tokio::test]
    async fn test_short_request_timeout_still_reports_commit_timeout() {
        let mut config = RuntimeConfig::default();
        config.identity.ephemeral = true;
        config.gateway.timeouts.request = Duration::from_millis(100);
        config.submission.commit_timeout = Duration::from_millis(400);
        let runtime = GatewayRuntime::new(config).unwrap();
        runtime.network().orderer().set_event_delivery(false);
        let app = runtime.gateway().router();

        let (status, body) = call(&app, add_contract(json!({"key": 2, "value": 2}))).await;
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert!(body["error"].as_str().unwrap().contains("not committed within 400ms"));
    }
}
