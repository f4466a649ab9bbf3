//! Test utilities for bluelink-client
//!
//! [`TestServer`] serves an axum router on an ephemeral port and builds
//! clients pointed at it. [`MockVendor`] is a scripted stand-in for a brand
//! backend that answers the handshake, directory and status calls and
//! records every request it receives.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use bluelink_core::{Config, Endpoints, RET_CODE_FAIL, RET_CODE_OK};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::{BluelinkClient, ClientOptions, Result};

/// A test server that automatically shuts down when dropped
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl TestServer {
    /// Serve a router on 127.0.0.1 with an OS-assigned port
    pub async fn start(router: Router) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        // Give server a moment to start
        tokio::time::sleep(Duration::from_millis(10)).await;

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Get the base URL of the test server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Client options targeting this server with short timeouts
    pub fn options(&self) -> ClientOptions {
        ClientOptions::default()
            .with_base_uri(self.base_url())
            .with_timeout(Duration::from_secs(5))
            .with_connect_timeout(Duration::from_secs(2))
    }

    /// Unauthenticated client targeting this server
    pub fn client(&self, config: Config) -> Result<BluelinkClient> {
        BluelinkClient::with_options(config, self.options())
    }

    /// Shutdown the server gracefully
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// A request as seen by [`MockVendor`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    /// Header values keyed by lowercase name
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// Scripted brand backend
///
/// Clones share the request log, so keep one around after handing a clone
/// to [`MockVendor::router`].
#[derive(Debug, Clone)]
pub struct MockVendor {
    pub device_id: String,
    pub device_ret_code: String,
    pub auth_code: String,
    pub token_type: String,
    pub access_token: String,
    pub login_status: StatusCode,
    pub token_status: StatusCode,
    /// Expected `(email, password)`; any account is accepted when unset
    pub account: Option<(String, String)>,
    pub vehicles: Value,
    pub status: (StatusCode, Value),
    endpoints: Endpoints,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Cookie the authorize page sets and sign-in expects back
pub const SESSION_COOKIE: &str = "account=mock-session";

impl Default for MockVendor {
    fn default() -> Self {
        Self::new()
    }
}

impl MockVendor {
    pub fn new() -> Self {
        Self {
            device_id: "D1".to_string(),
            device_ret_code: RET_CODE_OK.to_string(),
            auth_code: "C1".to_string(),
            token_type: "Bearer".to_string(),
            access_token: "T1".to_string(),
            login_status: StatusCode::OK,
            token_status: StatusCode::OK,
            account: None,
            vehicles: sample_vehicles(),
            status: (StatusCode::OK, sample_status()),
            endpoints: Endpoints::default(),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_account(mut self, email: &str, password: &str) -> Self {
        self.account = Some((email.to_string(), password.to_string()));
        self
    }

    pub fn with_login_status(mut self, status: StatusCode) -> Self {
        self.login_status = status;
        self
    }

    pub fn with_token_status(mut self, status: StatusCode) -> Self {
        self.token_status = status;
        self
    }

    pub fn with_device_ret_code(mut self, code: &str) -> Self {
        self.device_ret_code = code.to_string();
        self
    }

    pub fn with_vehicles(mut self, body: Value) -> Self {
        self.vehicles = body;
        self
    }

    pub fn with_status(mut self, status: StatusCode, body: Value) -> Self {
        self.status = (status, body);
        self
    }

    /// Bearer credential this vendor issues
    pub fn bearer(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }

    /// Requests received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// Requests received for one path
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }

    pub fn router(&self) -> Router {
        Router::new().fallback(dispatch).with_state(self.clone())
    }

    /// Start a [`TestServer`] serving this vendor
    pub async fn start(&self) -> Result<TestServer> {
        TestServer::start(self.router()).await
    }

    fn record(&self, method: &Method, uri: &Uri, headers: &HeaderMap, body: &str) {
        let headers = headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        self.requests.lock().push(RecordedRequest {
            method: method.clone(),
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
            headers,
            body: body.to_string(),
        });
    }

    fn is_authorized(&self, headers: &HeaderMap) -> bool {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == self.bearer())
    }
}

async fn dispatch(
    State(vendor): State<MockVendor>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    vendor.record(&method, &uri, &headers, &body);

    let endpoints = &vendor.endpoints;
    let path = uri.path();

    if method == Method::POST && path == endpoints.device_id {
        return (
            StatusCode::OK,
            Json(json!({
                "retCode": vendor.device_ret_code,
                "resCode": "0000",
                "resMsg": {"deviceId": vendor.device_id},
                "msgId": "mock"
            })),
        )
            .into_response();
    }

    if method == Method::GET && path == endpoints.authorize {
        return (
            StatusCode::OK,
            [(header::SET_COOKIE, format!("{}; Path=/", SESSION_COOKIE))],
            "<html></html>",
        )
            .into_response();
    }

    if method == Method::POST && path == endpoints.lang {
        return (StatusCode::OK, Json(json!({}))).into_response();
    }

    if method == Method::POST && path == endpoints.login {
        return login(&vendor, &headers, &body);
    }

    if method == Method::POST && path == endpoints.access_token {
        return token(&vendor, &body);
    }

    if method == Method::GET && path == endpoints.vehicles {
        if !vendor.is_authorized(&headers) {
            return failure_envelope();
        }
        return (StatusCode::OK, Json(vendor.vehicles.clone())).into_response();
    }

    if method == Method::GET && path.starts_with(&endpoints.vehicles) && path.ends_with("/status")
    {
        if !vendor.is_authorized(&headers) {
            return failure_envelope();
        }
        let (status, body) = vendor.status.clone();
        return (status, Json(body)).into_response();
    }

    StatusCode::NOT_FOUND.into_response()
}

fn login(vendor: &MockVendor, headers: &HeaderMap, body: &str) -> Response {
    if vendor.login_status != StatusCode::OK {
        return (
            vendor.login_status,
            Json(json!({"errId": "mock", "errCode": "4000", "errMsg": "Bad request"})),
        )
            .into_response();
    }

    if let Some((email, password)) = &vendor.account {
        let request: Value = serde_json::from_str(body).unwrap_or(Value::Null);
        if request["email"] != email.as_str() || request["password"] != password.as_str() {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"errCode": "4000", "errMsg": "Incorrect account"})),
            )
                .into_response();
        }
    }

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let redirect = format!(
        "http://{}{}?code={}&state=test&login_success=y",
        host, vendor.endpoints.redirect, vendor.auth_code
    );
    (StatusCode::OK, Json(json!({"redirectUrl": redirect}))).into_response()
}

fn token(vendor: &MockVendor, body: &str) -> Response {
    if vendor.token_status != StatusCode::OK {
        return (
            vendor.token_status,
            Json(json!({"error": "invalid_request"})),
        )
            .into_response();
    }

    let code = url::form_urlencoded::parse(body.as_bytes())
        .find(|(key, _)| key == "code")
        .map(|(_, value)| value.into_owned());
    if code.as_deref() != Some(vendor.auth_code.as_str()) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "invalid_grant"})),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        Json(json!({
            "token_type": vendor.token_type,
            "access_token": vendor.access_token,
            "refresh_token": "R1",
            "expires_in": 86400
        })),
    )
        .into_response()
}

fn failure_envelope() -> Response {
    (
        StatusCode::OK,
        Json(json!({"retCode": RET_CODE_FAIL, "resCode": "4002", "resMsg": "Invalid request"})),
    )
        .into_response()
}

/// Directory response with one EV
pub fn sample_vehicles() -> Value {
    json!({
        "retCode": "S",
        "resCode": "0000",
        "resMsg": {
            "vehicles": [{
                "vehicleId": "V1",
                "vin": "KMHKR81EFNU000001",
                "vehicleName": "IONIQ 5",
                "type": "EV",
                "nickname": "Ioniq",
                "master": true,
                "carShare": 1,
                "regDate": "2022-03-01 09:00:00.000"
            }]
        },
        "msgId": "mock"
    })
}

/// Status response of a charging EV at 50%
pub fn sample_status() -> Value {
    json!({
        "retCode": "S",
        "resCode": "0000",
        "resMsg": {
            "doorLock": true,
            "trunkOpen": false,
            "evStatus": {
                "batteryCharge": true,
                "batteryStatus": 50,
                "batteryPlugin": 1,
                "drvDistance": [{
                    "rangeByFuel": {
                        "evModeRange": {"value": 150, "unit": 1},
                        "totalAvailableRange": {"value": 150, "unit": 1}
                    },
                    "type": 2
                }],
                "reservChargeInfos": {
                    "targetSOClist": [
                        {"targetSOClevel": 70, "plugType": 0},
                        {"targetSOClevel": 80, "plugType": 1},
                        {"targetSOClevel": 90, "plugType": 0}
                    ]
                }
            },
            "time": "20240501120000"
        },
        "msgId": "mock"
    })
}
