//! In-process fake of the Keycloak token endpoint and admin API.
//!
//! Each test starts its own server on an ephemeral port, seeded with a single
//! `master` realm, so tests never share state.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Form, Path, Query, Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::sync::oneshot;

pub const ADMIN_USER_ID: &str = "f9ea108b-a748-435f-9058-dab46ce59771";
pub const TEST_USER_ID: &str = "3ff724a6-90a8-4050-9981-4a6def74870a";
pub const ADMIN_CLI_ID: &str = "2c0e3b36-6f3a-4b7d-a1c8-5a7d1e2c3f40";
pub const ACCOUNT_CLIENT_ID: &str = "8d1a2b3c-4d5e-4f60-9a7b-c8d9e0f1a2b3";
pub const ACCOUNT_SECRET: &str = "f3d95ebb-42ab-4a15-998f-775a84adbbaf";
pub const GROUP_ID: &str = "5b6c7d8e-9f00-4112-8334-455667788990";
pub const PRESET_TOKEN: &str = "preset-token";

/// Running fake server. Dropping it stops the server.
pub struct FakeKeycloak {
    pub base_url: String,
    pub state: Arc<FakeState>,
    _shutdown: oneshot::Sender<()>,
}

impl FakeKeycloak {
    pub async fn start() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("keycloak_admin_rs_client=debug")
            .with_test_writer()
            .try_init();

        let state = Arc::new(FakeState::seeded());
        let app = router(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .unwrap();
        });

        Self {
            base_url: format!("http://{addr}/auth"),
            state,
            _shutdown: shutdown_tx,
        }
    }

    pub fn token_requests(&self) -> usize {
        self.state.token_requests.load(Ordering::SeqCst)
    }

    pub fn last_token_form(&self) -> HashMap<String, String> {
        self.state.last_token_form.lock().unwrap().clone()
    }

    pub fn seen_tokens(&self) -> Vec<String> {
        self.state.seen_tokens.lock().unwrap().clone()
    }

    pub fn last_query(&self) -> Vec<(String, String)> {
        self.state.last_query.lock().unwrap().clone()
    }

    /// Raw stored JSON of a user, bypassing the API
    pub fn stored_user(&self, realm: &str, id: &str) -> Option<Value> {
        let store = self.state.store.lock().unwrap();
        store.realms.get(realm)?.users.iter().find(|u| u["id"] == id).cloned()
    }

    pub fn stored_password(&self, realm: &str, id: &str) -> Option<Value> {
        let store = self.state.store.lock().unwrap();
        store.realms.get(realm)?.passwords.get(id).cloned()
    }
}

pub struct FakeState {
    token_requests: AtomicUsize,
    next_id: AtomicUsize,
    valid_tokens: Mutex<HashSet<String>>,
    seen_tokens: Mutex<Vec<String>>,
    last_token_form: Mutex<HashMap<String, String>>,
    last_query: Mutex<Vec<(String, String)>>,
    store: Mutex<Store>,
}

#[derive(Default)]
struct Store {
    realms: BTreeMap<String, RealmData>,
}

#[derive(Default)]
struct RealmData {
    rep: Value,
    roles: Vec<Value>,
    clients: Vec<Value>,
    client_roles: HashMap<String, Vec<Value>>,
    users: Vec<Value>,
    passwords: HashMap<String, Value>,
    realm_mappings: HashMap<String, Vec<Value>>,
    client_mappings: HashMap<(String, String), Vec<Value>>,
    groups: Vec<Value>,
    members: HashMap<String, Vec<String>>,
    events: Vec<Value>,
}

impl RealmData {
    fn new(rep: Value) -> Self {
        Self {
            rep,
            ..Self::default()
        }
    }
}

impl FakeState {
    fn seeded() -> Self {
        let mut master = RealmData::new(json!({
            "id": "master",
            "realm": "master",
            "enabled": true,
            "sslRequired": "external"
        }));

        let offline = json!({ "id": "r-offline", "name": "offline_access", "composite": false, "clientRole": false });
        let admin = json!({ "id": "r-admin", "name": "admin", "composite": true, "clientRole": false });
        master.roles = vec![offline.clone(), admin.clone()];

        master.clients = vec![
            json!({ "id": ADMIN_CLI_ID, "clientId": "admin-cli", "enabled": true, "publicClient": true }),
            json!({ "id": ACCOUNT_CLIENT_ID, "clientId": "account", "enabled": true, "publicClient": false, "secret": ACCOUNT_SECRET }),
        ];
        let view_profile = json!({ "id": "cr-view", "name": "view-profile", "clientRole": true, "containerId": ACCOUNT_CLIENT_ID });
        let manage_account = json!({ "id": "cr-manage", "name": "manage-account", "clientRole": true, "containerId": ACCOUNT_CLIENT_ID });
        master
            .client_roles
            .insert(ACCOUNT_CLIENT_ID.to_string(), vec![view_profile.clone(), manage_account.clone()]);
        master.client_roles.insert(ADMIN_CLI_ID.to_string(), Vec::new());

        master.users = vec![
            json!({ "id": ADMIN_USER_ID, "username": "admin", "enabled": true, "createdTimestamp": 1496332633522u64 }),
            json!({ "id": TEST_USER_ID, "username": "test1", "enabled": true, "firstName": "Test User 1", "lastName": "Last", "email": "test1@example.com" }),
        ];
        master
            .realm_mappings
            .insert(ADMIN_USER_ID.to_string(), vec![offline, admin]);
        master.client_mappings.insert(
            (ADMIN_USER_ID.to_string(), ACCOUNT_CLIENT_ID.to_string()),
            vec![view_profile, manage_account],
        );

        master.groups = vec![json!({ "id": GROUP_ID, "name": "Test group 1", "path": "/Test group 1", "subGroups": [] })];
        master
            .members
            .insert(GROUP_ID.to_string(), vec![ADMIN_USER_ID.to_string()]);

        master.events = vec![
            json!({ "time": 1500000000000i64, "type": "LOGIN", "realmId": "master", "clientId": "admin-cli", "userId": ADMIN_USER_ID, "ipAddress": "127.0.0.1" }),
        ];

        let mut store = Store::default();
        store.realms.insert("master".to_string(), master);

        Self {
            token_requests: AtomicUsize::new(0),
            next_id: AtomicUsize::new(1),
            valid_tokens: Mutex::new(HashSet::from([PRESET_TOKEN.to_string()])),
            seen_tokens: Mutex::new(Vec::new()),
            last_token_form: Mutex::new(HashMap::new()),
            last_query: Mutex::new(Vec::new()),
            store: Mutex::new(store),
        }
    }

    fn new_id(&self) -> String {
        format!("generated-{}", self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    /// Run `f` against a realm, or answer the server's realm-not-found error
    fn with_realm(&self, realm: &str, f: impl FnOnce(&mut RealmData) -> Response) -> Response {
        let mut store = self.store.lock().unwrap();
        match store.realms.get_mut(realm) {
            Some(data) => f(data),
            None => not_found("Realm not found."),
        }
    }
}

fn router(state: Arc<FakeState>) -> Router {
    let admin = Router::new()
        .route("/auth/admin/realms", get(list_realms).post(create_realm))
        .route(
            "/auth/admin/realms/{realm}",
            get(get_realm).put(update_realm).delete(delete_realm),
        )
        .route(
            "/auth/admin/realms/{realm}/roles",
            get(list_realm_roles).post(create_realm_role),
        )
        .route("/auth/admin/realms/{realm}/roles/{role}", get(get_realm_role))
        .route(
            "/auth/admin/realms/{realm}/clients",
            get(list_clients).post(create_client),
        )
        .route(
            "/auth/admin/realms/{realm}/clients/{id}",
            get(get_client).put(update_client).delete(delete_client),
        )
        .route(
            "/auth/admin/realms/{realm}/clients/{id}/client-secret",
            get(get_client_secret),
        )
        .route(
            "/auth/admin/realms/{realm}/clients/{id}/roles",
            get(list_client_roles).post(create_client_role),
        )
        .route(
            "/auth/admin/realms/{realm}/clients/{id}/roles/{role}",
            get(get_client_role),
        )
        .route(
            "/auth/admin/realms/{realm}/users",
            get(list_users).post(create_user),
        )
        .route(
            "/auth/admin/realms/{realm}/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route(
            "/auth/admin/realms/{realm}/users/{id}/reset-password",
            put(reset_password),
        )
        .route(
            "/auth/admin/realms/{realm}/users/{id}/role-mappings",
            get(get_role_mappings),
        )
        .route(
            "/auth/admin/realms/{realm}/users/{id}/role-mappings/realm",
            post(map_realm_roles).delete(unmap_realm_roles),
        )
        .route(
            "/auth/admin/realms/{realm}/users/{id}/role-mappings/clients/{client}",
            post(map_client_roles).delete(unmap_client_roles),
        )
        .route(
            "/auth/admin/realms/{realm}/users/{id}/groups",
            get(list_user_groups),
        )
        .route("/auth/admin/realms/{realm}/groups", get(list_groups))
        .route(
            "/auth/admin/realms/{realm}/groups/{id}/members",
            get(list_group_members),
        )
        .route("/auth/admin/realms/{realm}/events", get(list_events))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            require_bearer,
        ));

    Router::new()
        .route(
            "/auth/realms/{realm}/protocol/openid-connect/token",
            post(issue_token),
        )
        .merge(admin)
        .with_state(state)
}

// ============================================================================
// Responses
// ============================================================================

fn ok(value: Value) -> Response {
    (StatusCode::OK, Json(value)).into_response()
}

fn created(location: String) -> Response {
    (StatusCode::CREATED, [(header::LOCATION, location)]).into_response()
}

fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

fn not_found(message: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
}

fn conflict(message: String) -> Response {
    (StatusCode::CONFLICT, Json(json!({ "errorMessage": message }))).into_response()
}

fn merge(target: &mut Value, update: &Value) {
    if let (Some(target), Some(update)) = (target.as_object_mut(), update.as_object()) {
        for (key, value) in update {
            target.insert(key.clone(), value.clone());
        }
    }
}

fn by_name<'a>(items: &'a [Value], name: &str) -> Option<&'a Value> {
    items.iter().find(|item| item["name"] == name)
}

// ============================================================================
// Token endpoint and bearer check
// ============================================================================

async fn issue_token(
    State(state): State<Arc<FakeState>>,
    Path(realm): Path<String>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    state.token_requests.fetch_add(1, Ordering::SeqCst);
    *state.last_token_form.lock().unwrap() = form.clone();

    if !state.store.lock().unwrap().realms.contains_key(&realm) {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Realm does not exist" })),
        )
            .into_response();
    }

    let field = |name: &str| form.get(name).map(String::as_str).unwrap_or_default();

    if field("client_id") != "admin-cli" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "invalid_client", "error_description": "Invalid client credentials" })),
        )
            .into_response();
    }

    if field("grant_type") != "password" || field("username") != "admin" || field("password") != "admin" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "invalid_grant", "error_description": "Invalid user credentials" })),
        )
            .into_response();
    }

    let token = format!("token-{}", state.new_id());
    state.valid_tokens.lock().unwrap().insert(token.clone());

    ok(json!({
        "access_token": token,
        "expires_in": 60,
        "refresh_expires_in": 1800,
        "token_type": "bearer"
    }))
}

async fn require_bearer(State(state): State<Arc<FakeState>>, request: Request, next: Next) -> Response {
    let token = bearer(request.headers());

    match token {
        Some(token) if state.valid_tokens.lock().unwrap().contains(&token) => {
            state.seen_tokens.lock().unwrap().push(token);
            next.run(request).await
        }
        _ => StatusCode::UNAUTHORIZED.into_response(),
    }
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

// ============================================================================
// Realms
// ============================================================================

async fn list_realms(State(state): State<Arc<FakeState>>) -> Response {
    let store = state.store.lock().unwrap();
    ok(Value::Array(store.realms.values().map(|r| r.rep.clone()).collect()))
}

async fn create_realm(State(state): State<Arc<FakeState>>, Json(mut rep): Json<Value>) -> Response {
    let Some(name) = rep["realm"].as_str().map(str::to_string) else {
        return (StatusCode::BAD_REQUEST, Json(json!({ "errorMessage": "Realm name is required" }))).into_response();
    };

    let mut store = state.store.lock().unwrap();
    if store.realms.contains_key(&name) {
        return conflict("Realm with same name exists".to_string());
    }

    rep["id"] = json!(name);
    if rep.get("enabled").is_none() {
        rep["enabled"] = json!(false);
    }
    store.realms.insert(name.clone(), RealmData::new(rep));
    created(format!("/auth/admin/realms/{name}"))
}

async fn get_realm(State(state): State<Arc<FakeState>>, Path(realm): Path<String>) -> Response {
    state.with_realm(&realm, |data| ok(data.rep.clone()))
}

async fn update_realm(
    State(state): State<Arc<FakeState>>,
    Path(realm): Path<String>,
    Json(update): Json<Value>,
) -> Response {
    state.with_realm(&realm, |data| {
        merge(&mut data.rep, &update);
        no_content()
    })
}

async fn delete_realm(State(state): State<Arc<FakeState>>, Path(realm): Path<String>) -> Response {
    match state.store.lock().unwrap().realms.remove(&realm) {
        Some(_) => no_content(),
        None => not_found("Realm not found."),
    }
}

// ============================================================================
// Realm roles
// ============================================================================

async fn list_realm_roles(State(state): State<Arc<FakeState>>, Path(realm): Path<String>) -> Response {
    state.with_realm(&realm, |data| ok(Value::Array(data.roles.clone())))
}

async fn get_realm_role(
    State(state): State<Arc<FakeState>>,
    Path((realm, role)): Path<(String, String)>,
) -> Response {
    state.with_realm(&realm, |data| match by_name(&data.roles, &role) {
        Some(found) => ok(found.clone()),
        None => not_found("Could not find role"),
    })
}

async fn create_realm_role(
    State(state): State<Arc<FakeState>>,
    Path(realm): Path<String>,
    Json(mut rep): Json<Value>,
) -> Response {
    let id = state.new_id();
    state.with_realm(&realm, |data| {
        let name = rep["name"].as_str().unwrap_or_default().to_string();
        if by_name(&data.roles, &name).is_some() {
            return conflict(format!("Role with name {name} already exists"));
        }
        rep["id"] = json!(id);
        rep["clientRole"] = json!(false);
        rep["composite"] = json!(false);
        data.roles.push(rep);
        created(format!("/auth/admin/realms/{realm}/roles/{name}"))
    })
}

// ============================================================================
// Clients
// ============================================================================

async fn list_clients(
    State(state): State<Arc<FakeState>>,
    Path(realm): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    *state.last_query.lock().unwrap() = params.clone();
    let wanted = params
        .iter()
        .find(|(k, _)| k == "clientId")
        .map(|(_, v)| v.clone());

    state.with_realm(&realm, |data| {
        let clients = data
            .clients
            .iter()
            .filter(|c| wanted.as_ref().is_none_or(|w| c["clientId"] == w.as_str()))
            .cloned()
            .collect();
        ok(Value::Array(clients))
    })
}

async fn get_client(
    State(state): State<Arc<FakeState>>,
    Path((realm, id)): Path<(String, String)>,
) -> Response {
    state.with_realm(&realm, |data| {
        match data.clients.iter().find(|c| c["id"] == id.as_str()) {
            Some(client) => ok(client.clone()),
            None => not_found("Could not find client"),
        }
    })
}

async fn create_client(
    State(state): State<Arc<FakeState>>,
    Path(realm): Path<String>,
    Json(mut rep): Json<Value>,
) -> Response {
    let id = state.new_id();
    state.with_realm(&realm, |data| {
        let client_id = rep["clientId"].as_str().unwrap_or_default().to_string();
        if data.clients.iter().any(|c| c["clientId"] == client_id.as_str()) {
            return conflict(format!("Client {client_id} already exists"));
        }
        rep["id"] = json!(id);
        if rep.get("enabled").is_none() {
            rep["enabled"] = json!(true);
        }
        data.clients.push(rep);
        data.client_roles.insert(id.clone(), Vec::new());
        created(format!("/auth/admin/realms/{realm}/clients/{id}"))
    })
}

async fn update_client(
    State(state): State<Arc<FakeState>>,
    Path((realm, id)): Path<(String, String)>,
    Json(update): Json<Value>,
) -> Response {
    state.with_realm(&realm, |data| {
        if let Some(client_id) = update["clientId"].as_str() {
            let taken = data
                .clients
                .iter()
                .any(|c| c["clientId"] == client_id && c["id"] != id.as_str());
            if taken {
                return conflict(format!("Client {client_id} already exists"));
            }
        }
        match data.clients.iter_mut().find(|c| c["id"] == id.as_str()) {
            Some(client) => {
                merge(client, &update);
                no_content()
            }
            None => not_found("Could not find client"),
        }
    })
}

async fn delete_client(
    State(state): State<Arc<FakeState>>,
    Path((realm, id)): Path<(String, String)>,
) -> Response {
    state.with_realm(&realm, |data| {
        let before = data.clients.len();
        data.clients.retain(|c| c["id"] != id.as_str());
        if data.clients.len() == before {
            return not_found("Could not find client");
        }
        data.client_roles.remove(&id);
        no_content()
    })
}

async fn get_client_secret(
    State(state): State<Arc<FakeState>>,
    Path((realm, id)): Path<(String, String)>,
) -> Response {
    state.with_realm(&realm, |data| {
        match data.clients.iter().find(|c| c["id"] == id.as_str()) {
            Some(client) => ok(json!({ "type": "secret", "value": client["secret"] })),
            None => not_found("Could not find client"),
        }
    })
}

// ============================================================================
// Client roles
// ============================================================================

async fn list_client_roles(
    State(state): State<Arc<FakeState>>,
    Path((realm, id)): Path<(String, String)>,
) -> Response {
    state.with_realm(&realm, |data| match data.client_roles.get(&id) {
        Some(roles) => ok(Value::Array(roles.clone())),
        None => not_found("Could not find client"),
    })
}

async fn get_client_role(
    State(state): State<Arc<FakeState>>,
    Path((realm, id, role)): Path<(String, String, String)>,
) -> Response {
    state.with_realm(&realm, |data| match data.client_roles.get(&id) {
        Some(roles) => match by_name(roles, &role) {
            Some(found) => ok(found.clone()),
            None => not_found("Could not find role"),
        },
        None => not_found("Could not find client"),
    })
}

async fn create_client_role(
    State(state): State<Arc<FakeState>>,
    Path((realm, id)): Path<(String, String)>,
    Json(mut rep): Json<Value>,
) -> Response {
    let role_id = state.new_id();
    state.with_realm(&realm, |data| {
        let Some(roles) = data.client_roles.get_mut(&id) else {
            return not_found("Could not find client");
        };
        let name = rep["name"].as_str().unwrap_or_default().to_string();
        if by_name(roles, &name).is_some() {
            return conflict(format!("Role {name} already exists"));
        }
        rep["id"] = json!(role_id);
        rep["clientRole"] = json!(true);
        rep["containerId"] = json!(id);
        roles.push(rep);
        created(format!("/auth/admin/realms/{realm}/clients/{id}/roles/{name}"))
    })
}

// ============================================================================
// Users
// ============================================================================

async fn list_users(
    State(state): State<Arc<FakeState>>,
    Path(realm): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    *state.last_query.lock().unwrap() = params.clone();
    let param = |name: &str| params.iter().find(|(k, _)| k == name).map(|(_, v)| v.clone());
    let username = param("username");
    let max = param("max").and_then(|m| m.parse::<usize>().ok()).unwrap_or(100);
    let first = param("first").and_then(|f| f.parse::<usize>().ok()).unwrap_or(0);

    state.with_realm(&realm, |data| {
        let users = data
            .users
            .iter()
            .filter(|u| {
                username.as_ref().is_none_or(|name| {
                    u["username"].as_str().unwrap_or_default().contains(name.as_str())
                })
            })
            .skip(first)
            .take(max)
            .cloned()
            .collect();
        ok(Value::Array(users))
    })
}

async fn get_user(
    State(state): State<Arc<FakeState>>,
    Path((realm, id)): Path<(String, String)>,
) -> Response {
    state.with_realm(&realm, |data| {
        match data.users.iter().find(|u| u["id"] == id.as_str()) {
            Some(user) => ok(user.clone()),
            None => not_found("User not found"),
        }
    })
}

async fn create_user(
    State(state): State<Arc<FakeState>>,
    Path(realm): Path<String>,
    Json(mut rep): Json<Value>,
) -> Response {
    let id = state.new_id();
    state.with_realm(&realm, |data| {
        let username = rep["username"].as_str().unwrap_or_default().to_string();
        if data.users.iter().any(|u| u["username"] == username.as_str()) {
            return conflict("User exists with same username".to_string());
        }
        rep["id"] = json!(id);
        data.users.push(rep);
        created(format!("/auth/admin/realms/{realm}/users/{id}"))
    })
}

async fn update_user(
    State(state): State<Arc<FakeState>>,
    Path((realm, id)): Path<(String, String)>,
    Json(update): Json<Value>,
) -> Response {
    state.with_realm(&realm, |data| {
        if let Some(username) = update["username"].as_str() {
            let taken = data
                .users
                .iter()
                .any(|u| u["username"] == username && u["id"] != id.as_str());
            if taken {
                return conflict("User exists with same username or email".to_string());
            }
        }
        match data.users.iter_mut().find(|u| u["id"] == id.as_str()) {
            Some(user) => {
                merge(user, &update);
                no_content()
            }
            None => not_found("User not found"),
        }
    })
}

async fn delete_user(
    State(state): State<Arc<FakeState>>,
    Path((realm, id)): Path<(String, String)>,
) -> Response {
    state.with_realm(&realm, |data| {
        let before = data.users.len();
        data.users.retain(|u| u["id"] != id.as_str());
        if data.users.len() == before {
            return not_found("User not found");
        }
        no_content()
    })
}

async fn reset_password(
    State(state): State<Arc<FakeState>>,
    Path((realm, id)): Path<(String, String)>,
    Json(credential): Json<Value>,
) -> Response {
    state.with_realm(&realm, |data| {
        if !data.users.iter().any(|u| u["id"] == id.as_str()) {
            return not_found("User not found");
        }
        data.passwords.insert(id.clone(), credential);
        no_content()
    })
}

// ============================================================================
// Role mappings
// ============================================================================

async fn get_role_mappings(
    State(state): State<Arc<FakeState>>,
    Path((realm, id)): Path<(String, String)>,
) -> Response {
    state.with_realm(&realm, |data| {
        if !data.users.iter().any(|u| u["id"] == id.as_str()) {
            return not_found("User not found");
        }

        let realm_mappings = data.realm_mappings.get(&id).cloned().unwrap_or_default();
        let mut client_mappings = serde_json::Map::new();
        for ((user, client), roles) in &data.client_mappings {
            if user != &id || roles.is_empty() {
                continue;
            }
            let Some(rep) = data.clients.iter().find(|c| c["id"] == client.as_str()) else {
                continue;
            };
            let name = rep["clientId"].as_str().unwrap_or_default().to_string();
            client_mappings.insert(
                name.clone(),
                json!({ "id": client, "client": name, "mappings": roles }),
            );
        }

        let mut body = json!({ "clientMappings": client_mappings });
        if !realm_mappings.is_empty() {
            body["realmMappings"] = Value::Array(realm_mappings);
        }
        ok(body)
    })
}

fn add_roles(target: &mut Vec<Value>, roles: Vec<Value>) {
    for role in roles {
        if !target.iter().any(|r| r["name"] == role["name"]) {
            target.push(role);
        }
    }
}

fn remove_roles(target: &mut Vec<Value>, roles: &[Value]) {
    target.retain(|r| !roles.iter().any(|role| role["name"] == r["name"]));
}

async fn map_realm_roles(
    State(state): State<Arc<FakeState>>,
    Path((realm, id)): Path<(String, String)>,
    Json(roles): Json<Vec<Value>>,
) -> Response {
    state.with_realm(&realm, |data| {
        if !data.users.iter().any(|u| u["id"] == id.as_str()) {
            return not_found("User not found");
        }
        add_roles(data.realm_mappings.entry(id.clone()).or_default(), roles);
        no_content()
    })
}

async fn unmap_realm_roles(
    State(state): State<Arc<FakeState>>,
    Path((realm, id)): Path<(String, String)>,
    Json(roles): Json<Vec<Value>>,
) -> Response {
    state.with_realm(&realm, |data| {
        if !data.users.iter().any(|u| u["id"] == id.as_str()) {
            return not_found("User not found");
        }
        remove_roles(data.realm_mappings.entry(id.clone()).or_default(), &roles);
        no_content()
    })
}

async fn map_client_roles(
    State(state): State<Arc<FakeState>>,
    Path((realm, id, client)): Path<(String, String, String)>,
    Json(roles): Json<Vec<Value>>,
) -> Response {
    state.with_realm(&realm, |data| {
        if !data.users.iter().any(|u| u["id"] == id.as_str()) {
            return not_found("User not found");
        }
        if !data.client_roles.contains_key(&client) {
            return not_found("Could not find client");
        }
        add_roles(
            data.client_mappings.entry((id.clone(), client.clone())).or_default(),
            roles,
        );
        no_content()
    })
}

async fn unmap_client_roles(
    State(state): State<Arc<FakeState>>,
    Path((realm, id, client)): Path<(String, String, String)>,
    Json(roles): Json<Vec<Value>>,
) -> Response {
    state.with_realm(&realm, |data| {
        if !data.users.iter().any(|u| u["id"] == id.as_str()) {
            return not_found("User not found");
        }
        remove_roles(
            data.client_mappings.entry((id.clone(), client.clone())).or_default(),
            &roles,
        );
        no_content()
    })
}

// ============================================================================
// Groups and events
// ============================================================================

async fn list_groups(State(state): State<Arc<FakeState>>, Path(realm): Path<String>) -> Response {
    state.with_realm(&realm, |data| ok(Value::Array(data.groups.clone())))
}

async fn list_group_members(
    State(state): State<Arc<FakeState>>,
    Path((realm, id)): Path<(String, String)>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    *state.last_query.lock().unwrap() = params;
    state.with_realm(&realm, |data| {
        let Some(member_ids) = data.members.get(&id) else {
            return not_found("Could not find group by id");
        };
        let members = data
            .users
            .iter()
            .filter(|u| member_ids.iter().any(|m| u["id"] == m.as_str()))
            .cloned()
            .collect();
        ok(Value::Array(members))
    })
}

async fn list_user_groups(
    State(state): State<Arc<FakeState>>,
    Path((realm, id)): Path<(String, String)>,
) -> Response {
    state.with_realm(&realm, |data| {
        if !data.users.iter().any(|u| u["id"] == id.as_str()) {
            return not_found("User not found");
        }
        let groups = data
            .groups
            .iter()
            .filter(|g| {
                g["id"]
                    .as_str()
                    .and_then(|gid| data.members.get(gid))
                    .is_some_and(|members| members.contains(&id))
            })
            .cloned()
            .collect();
        ok(Value::Array(groups))
    })
}

async fn list_events(
    State(state): State<Arc<FakeState>>,
    Path(realm): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    *state.last_query.lock().unwrap() = params.clone();
    let types: Vec<String> = params
        .iter()
        .filter(|(k, _)| k == "type")
        .map(|(_, v)| v.clone())
        .collect();

    state.with_realm(&realm, |data| {
        let events = data
            .events
            .iter()
            .filter(|e| types.is_empty() || types.iter().any(|t| e["type"] == t.as_str()))
            .cloned()
            .collect();
        ok(Value::Array(events))
    })
}
