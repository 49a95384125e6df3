//! Fake Pterodactyl-compatible application API.
//!
//! Implements the subset of `/api/application` the provisioning flow uses: user lookup by
//! external id, user creation, node and allocation listings (paginated the way the panel
//! paginates), and server creation. Every request is recorded so tests can assert on the
//! calls that were, or were not, made.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::sync::Mutex;

use crate::{error::TestError, server::spawn};

/// API key the fake accepts unless overridden.
pub const API_KEY: &str = "ptla_mock_application_key";

/// Panel's default page size for list endpoints.
const DEFAULT_PAGE_SIZE: usize = 50;

struct MockNode {
    id: u64,
    allocations: Vec<(u64, bool)>,
}

#[derive(Default)]
struct PanelData {
    users: Vec<Value>,
    user_requests: Vec<Value>,
    server_requests: Vec<Value>,
    requests: Vec<String>,
}

struct PanelState {
    api_key: String,
    page_size: usize,
    ignore_page: bool,
    fail_user_lookup: bool,
    server_failure: Option<(StatusCode, Value)>,
    nodes: Vec<MockNode>,
    data: Mutex<PanelData>,
}

/// Running fake panel.
pub struct MockPanel {
    /// Base URL of the fake panel, e.g. `http://127.0.0.1:41234`.
    pub url: String,
    /// API key the fake expects as bearer token.
    pub api_key: String,
    state: Arc<PanelState>,
}

/// Builder for [`MockPanel`].
pub struct MockPanelBuilder {
    api_key: String,
    page_size: usize,
    ignore_page: bool,
    fail_user_lookup: bool,
    server_failure: Option<(StatusCode, Value)>,
    nodes: Vec<MockNode>,
    users: Vec<Value>,
}

impl MockPanel {
    /// Starts a builder for an empty panel: no users, no nodes.
    pub fn builder() -> MockPanelBuilder {
        MockPanelBuilder {
            api_key: API_KEY.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            ignore_page: false,
            fail_user_lookup: false,
            server_failure: None,
            nodes: Vec::new(),
            users: Vec::new(),
        }
    }

    /// Bodies of every `POST /users` received.
    pub async fn user_requests(&self) -> Vec<Value> {
        self.state.data.lock().await.user_requests.clone()
    }

    /// Bodies of every `POST /servers` received, including rejected ones.
    pub async fn server_requests(&self) -> Vec<Value> {
        self.state.data.lock().await.server_requests.clone()
    }

    /// Every request received as `"<METHOD> <path and query>"`, in arrival order.
    pub async fn requests(&self) -> Vec<String> {
        self.state.data.lock().await.requests.clone()
    }
}

impl MockPanelBuilder {
    /// Adds an existing panel user linked to a Discord id.
    pub fn with_user(mut self, id: u64, external_id: &str) -> Self {
        self.users.push(json!({
            "id": id,
            "external_id": external_id,
            "username": format!("user{}", id),
            "email": format!("user{}@example.com", id),
        }));
        self
    }

    /// Adds a node with `(allocation id, assigned)` pairs, listed in the given order.
    pub fn with_node(mut self, id: u64, allocations: &[(u64, bool)]) -> Self {
        self.nodes.push(MockNode {
            id,
            allocations: allocations.to_vec(),
        });
        self
    }

    /// Sets how many items a list page holds.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Makes list endpoints ignore the `page` parameter and always serve the first page,
    /// still reporting the real `total_pages`.
    pub fn ignore_page(mut self) -> Self {
        self.ignore_page = true;
        self
    }

    /// Makes the user lookup endpoint answer 500.
    pub fn fail_user_lookup(mut self) -> Self {
        self.fail_user_lookup = true;
        self
    }

    /// Makes server creation answer with the given status and body.
    pub fn fail_server_creation(mut self, status: StatusCode, body: Value) -> Self {
        self.server_failure = Some((status, body));
        self
    }

    /// Spawns the fake panel on a local port.
    pub async fn build(self) -> Result<MockPanel, TestError> {
        let state = Arc::new(PanelState {
            api_key: self.api_key.clone(),
            page_size: self.page_size,
            ignore_page: self.ignore_page,
            fail_user_lookup: self.fail_user_lookup,
            server_failure: self.server_failure,
            nodes: self.nodes,
            data: Mutex::new(PanelData {
                users: self.users,
                ..Default::default()
            }),
        });

        let router = Router::new()
            .route(
                "/api/application/users",
                get(list_users).post(create_user),
            )
            .route("/api/application/nodes", get(list_nodes))
            .route(
                "/api/application/nodes/{id}/allocations",
                get(list_allocations),
            )
            .route(
                "/api/application/servers",
                axum::routing::post(create_server),
            )
            .with_state(state.clone());

        let url = spawn(router).await?;

        Ok(MockPanel {
            url,
            api_key: self.api_key,
            state,
        })
    }
}

async fn record(state: &PanelState, method: &Method, uri: &Uri) {
    state
        .data
        .lock()
        .await
        .requests
        .push(format!("{} {}", method, uri));
}

fn authorized(state: &PanelState, headers: &HeaderMap) -> bool {
    let expected = format!("Bearer {}", state.api_key);
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        == Some(expected.as_str())
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "errors": [{
                "code": "AuthenticationException",
                "status": "401",
                "detail": "Unauthenticated."
            }]
        })),
    )
        .into_response()
}

fn page_of(state: &PanelState, params: &HashMap<String, String>) -> usize {
    if state.ignore_page {
        return 1;
    }

    params
        .get("page")
        .and_then(|page| page.parse::<usize>().ok())
        .unwrap_or(1)
        .max(1)
}

fn paginate(items: Vec<Value>, object: &str, page: usize, per_page: usize) -> Value {
    let total = items.len();
    let total_pages = total.div_ceil(per_page).max(1);
    let data: Vec<Value> = items
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .map(|attributes| json!({ "object": object, "attributes": attributes }))
        .collect();
    let count = data.len();

    json!({
        "object": "list",
        "data": data,
        "meta": {
            "pagination": {
                "total": total,
                "count": count,
                "per_page": per_page,
                "current_page": page,
                "total_pages": total_pages,
                "links": {}
            }
        }
    })
}

async fn list_users(
    State(state): State<Arc<PanelState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    record(&state, &method, &uri).await;
    if !authorized(&state, &headers) {
        return unauthorized();
    }

    if state.fail_user_lookup {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "errors": [{
                    "code": "HttpException",
                    "status": "500",
                    "detail": "An unexpected error was encountered while processing this request."
                }]
            })),
        )
            .into_response();
    }

    let external_id = params.get("filter[external_id]");
    let users: Vec<Value> = state
        .data
        .lock()
        .await
        .users
        .iter()
        .filter(|user| match external_id {
            Some(id) => user["external_id"].as_str() == Some(id.as_str()),
            None => true,
        })
        .cloned()
        .collect();

    Json(paginate(users, "user", page_of(&state, &params), state.page_size)).into_response()
}

async fn create_user(
    State(state): State<Arc<PanelState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record(&state, &method, &uri).await;
    if !authorized(&state, &headers) {
        return unauthorized();
    }

    let mut data = state.data.lock().await;
    data.user_requests.push(body.clone());

    let id = 100 + data.users.len() as u64;
    let attributes = json!({
        "id": id,
        "external_id": body["external_id"],
        "username": body["username"],
        "email": body["email"],
        "first_name": body["first_name"],
        "last_name": body["last_name"],
        "root_admin": false,
    });
    data.users.push(attributes.clone());

    (
        StatusCode::CREATED,
        Json(json!({ "object": "user", "attributes": attributes })),
    )
        .into_response()
}

async fn list_nodes(
    State(state): State<Arc<PanelState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    record(&state, &method, &uri).await;
    if !authorized(&state, &headers) {
        return unauthorized();
    }

    let nodes = state
        .nodes
        .iter()
        .map(|node| json!({ "id": node.id, "name": format!("node-{}", node.id) }))
        .collect();

    Json(paginate(nodes, "node", page_of(&state, &params), state.page_size)).into_response()
}

async fn list_allocations(
    State(state): State<Arc<PanelState>>,
    Path(node_id): Path<u64>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    record(&state, &method, &uri).await;
    if !authorized(&state, &headers) {
        return unauthorized();
    }

    let Some(node) = state.nodes.iter().find(|node| node.id == node_id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({
                "errors": [{
                    "code": "NotFoundHttpException",
                    "status": "404",
                    "detail": "The requested resource could not be found on the server."
                }]
            })),
        )
            .into_response();
    };

    let allocations = node
        .allocations
        .iter()
        .map(|(id, assigned)| {
            json!({
                "id": id,
                "ip": "127.0.0.1",
                "alias": null,
                "port": 25565 + id,
                "notes": null,
                "assigned": assigned
            })
        })
        .collect();

    Json(paginate(
        allocations,
        "allocation",
        page_of(&state, &params),
        state.page_size,
    ))
    .into_response()
}

async fn create_server(
    State(state): State<Arc<PanelState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record(&state, &method, &uri).await;
    if !authorized(&state, &headers) {
        return unauthorized();
    }

    let mut data = state.data.lock().await;
    data.server_requests.push(body.clone());

    if let Some((status, failure)) = &state.server_failure {
        return (*status, Json(failure.clone())).into_response();
    }

    let id = data.server_requests.len() as u64;
    (
        StatusCode::CREATED,
        Json(json!({
            "object": "server",
            "attributes": {
                "id": id,
                "identifier": format!("srv{:05}", id),
                "name": body["name"],
                "user": body["user"],
                "egg": body["egg"],
                "allocation": body["allocation"]["default"],
                "limits": body["limits"],
                "feature_limits": body["feature_limits"],
                "container": {
                    "startup_command": body["startup"],
                    "image": body["docker_image"],
                    "environment": body["environment"]
                }
            }
        })),
    )
        .into_response()
}
