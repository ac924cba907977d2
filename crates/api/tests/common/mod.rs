//! Shared helpers for the HTTP integration tests.
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot` against
//! [`RecordingStore`], an in-memory store gateway that counts every call, so
//! none of these tests need a database.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use warehouse_api::auth::basic::{encode_authorization, BasicAuthConfig};
use warehouse_api::auth::credentials::{hash_password, StaticCredentials};
use warehouse_api::config::ServerConfig;
use warehouse_api::router::build_app_router;
use warehouse_api::state::AppState;
use warehouse_core::paging::PageRequest;
use warehouse_core::types::DbId;
use warehouse_db::models::category::Category;
use warehouse_db::models::order::Order;
use warehouse_db::models::product::Product;
use warehouse_db::resource::Resource;
use warehouse_db::store::{ResourceStore, StoreError, StoreHealth, WriteOutcome};

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "s3cret-pa55";

// ---------------------------------------------------------------------------
// Recording store double
// ---------------------------------------------------------------------------

pub struct Table<R> {
    rows: Vec<R>,
    next_id: DbId,
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

/// In-memory store gateway. Ids are assigned per table starting at 1.
pub struct RecordingStore {
    categories: Mutex<Table<Category>>,
    products: Mutex<Table<Product>>,
    orders: Mutex<Table<Order>>,
    calls: AtomicUsize,
    force_conflict: AtomicBool,
    healthy: AtomicBool,
}

impl Default for RecordingStore {
    fn default() -> Self {
        Self {
            categories: Mutex::default(),
            products: Mutex::default(),
            orders: Mutex::default(),
            calls: AtomicUsize::new(0),
            force_conflict: AtomicBool::new(false),
            healthy: AtomicBool::new(true),
        }
    }
}

/// Per-entity wiring for [`RecordingStore`].
pub trait Backing<R: Resource> {
    fn table(&self) -> &Mutex<Table<R>>;

    /// Attach relations on reads.
    fn hydrate(&self, row: R) -> R {
        row
    }

    /// Reject rows the real schema would refuse.
    fn check(&self, _row: &R) -> Result<(), StoreError> {
        Ok(())
    }
}

impl Backing<Category> for RecordingStore {
    fn table(&self) -> &Mutex<Table<Category>> {
        &self.categories
    }
}

impl Backing<Order> for RecordingStore {
    fn table(&self) -> &Mutex<Table<Order>> {
        &self.orders
    }
}

impl Backing<Product> for RecordingStore {
    fn table(&self) -> &Mutex<Table<Product>> {
        &self.products
    }

    fn hydrate(&self, mut row: Product) -> Product {
        row.category = self
            .categories
            .lock()
            .unwrap()
            .rows
            .iter()
            .find(|c| c.id == row.category_id)
            .cloned();
        row
    }

    fn check(&self, row: &Product) -> Result<(), StoreError> {
        let known = self
            .categories
            .lock()
            .unwrap()
            .rows
            .iter()
            .any(|c| c.id == row.category_id);
        if known {
            Ok(())
        } else {
            Err(StoreError::Constraint(format!(
                "category {} does not exist",
                row.category_id
            )))
        }
    }
}

impl RecordingStore {
    /// Number of gateway calls made so far (health probes excluded).
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make every subsequent update report a conflict without writing.
    pub fn force_conflict(&self) {
        self.force_conflict.store(true, Ordering::SeqCst);
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    /// Insert a row directly, bypassing the call counter.
    pub fn seed<R: Resource>(&self, mut row: R) -> R
    where
        Self: Backing<R>,
    {
        let mut table = <Self as Backing<R>>::table(self).lock().unwrap();
        row.set_id(table.next_id);
        table.next_id += 1;
        table.rows.push(row.clone());
        row
    }

    /// Snapshot of a table, bypassing the call counter.
    pub fn rows<R: Resource>(&self) -> Vec<R>
    where
        Self: Backing<R>,
    {
        <Self as Backing<R>>::table(self).lock().unwrap().rows.clone()
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl<R> ResourceStore<R> for RecordingStore
where
    R: Resource,
    RecordingStore: Backing<R>,
{
    async fn find_by_id(&self, id: DbId) -> Result<Option<R>, StoreError> {
        self.record_call();
        let row = <Self as Backing<R>>::table(self)
            .lock()
            .unwrap()
            .rows
            .iter()
            .find(|r| r.id() == id)
            .cloned();
        Ok(row.map(|r| <Self as Backing<R>>::hydrate(self, r)))
    }

    async fn list(&self, page: PageRequest, search: Option<&str>) -> Result<Vec<R>, StoreError> {
        self.record_call();
        let matching: Vec<R> = <Self as Backing<R>>::table(self)
            .lock()
            .unwrap()
            .rows
            .iter()
            .filter(|r| search.map_or(true, |needle| r.matches(needle)))
            .cloned()
            .collect();
        let window = page.bounds(matching.len());
        Ok(matching[window]
            .iter()
            .cloned()
            .map(|r| <Self as Backing<R>>::hydrate(self, r))
            .collect())
    }

    async fn insert(&self, record: &R) -> Result<R, StoreError> {
        self.record_call();
        <Self as Backing<R>>::check(self, record)?;
        let mut table = <Self as Backing<R>>::table(self).lock().unwrap();
        let mut row = record.clone();
        row.set_id(table.next_id);
        table.next_id += 1;
        table.rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, record: &R) -> Result<WriteOutcome, StoreError> {
        self.record_call();
        <Self as Backing<R>>::check(self, record)?;
        if self.force_conflict.load(Ordering::SeqCst) {
            return Ok(WriteOutcome::Conflict);
        }
        let mut table = <Self as Backing<R>>::table(self).lock().unwrap();
        match table.rows.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => {
                *slot = record.clone();
                Ok(WriteOutcome::Applied)
            }
            None => Ok(WriteOutcome::Conflict),
        }
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        self.record_call();
        let mut table = <Self as Backing<R>>::table(self).lock().unwrap();
        let before = table.rows.len();
        table.rows.retain(|r| r.id() != id);
        Ok(table.rows.len() != before)
    }

    async fn exists(&self, id: DbId) -> Result<bool, StoreError> {
        self.record_call();
        Ok(<Self as Backing<R>>::table(self)
            .lock()
            .unwrap()
            .rows
            .iter()
            .any(|r| r.id() == id))
    }
}

#[async_trait]
impl StoreHealth for RecordingStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        if self.healthy.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("store marked unhealthy".into()))
        }
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Argon2 is slow by design; hash the test password once per binary.
fn password_hash() -> &'static str {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| hash_password(PASSWORD).unwrap())
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 1,
        auth: BasicAuthConfig {
            realm: "warehouse".to_string(),
            username: USERNAME.to_string(),
            password_hash: password_hash().to_string(),
        },
    }
}

/// Build the full application router over `store`, with the same middleware
/// stack production uses.
pub fn build_test_app(store: Arc<RecordingStore>) -> Router {
    let config = test_config();
    build_app_router(test_state(store, config.clone()), &config)
}

/// Application state over `store`, verifying against `config.auth`.
pub fn test_state(store: Arc<RecordingStore>, config: ServerConfig) -> AppState {
    let verifier = Arc::new(StaticCredentials::from_config(&config.auth));
    AppState::new(store, verifier, config)
}

/// A fresh store and an app wired to it.
pub fn test_app() -> (Arc<RecordingStore>, Router) {
    let store = Arc::new(RecordingStore::default());
    let app = build_test_app(Arc::clone(&store));
    (store, app)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub fn basic_auth() -> String {
    encode_authorization(USERNAME, PASSWORD)
}

/// Send a request with the given (optional) `Authorization` value and JSON body.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    authorization: Option<&str>,
    body: Option<&serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(AUTHORIZATION, value);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(json).unwrap())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(&basic_auth()), None).await
}

pub async fn post_json(app: Router, uri: &str, body: &serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(&basic_auth()), Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: &serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(&basic_auth()), Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(&basic_auth()), None).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn category(name: &str) -> Category {
    serde_json::from_value(serde_json::json!({ "name": name })).unwrap()
}

pub fn product(category_id: DbId, name: &str, brand: &str) -> Product {
    serde_json::from_value(serde_json::json!({
        "name": name,
        "categoryId": category_id,
        "brand": brand,
        "volume": 0.5,
        "price": 1.2,
        "productionDate": "2024-01-10",
        "expirationDate": "2025-01-10",
        "quantity": 10,
    }))
    .unwrap()
}

pub fn order(number: &str, customer: &str) -> Order {
    serde_json::from_value(serde_json::json!({
        "orderNumber": number,
        "totalAmount": 19.99,
        "customerName": customer,
        "status": "Pending",
    }))
    .unwrap()
}
