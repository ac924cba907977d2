use std::sync::Arc;

use warehouse_db::models::category::Category;
use warehouse_db::models::order::Order;
use warehouse_db::models::product::Product;
use warehouse_db::resource::Resource;
use warehouse_db::store::{ResourceStore, StoreHealth};

use crate::auth::credentials::CredentialVerifier;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (every field is behind an `Arc`).
#[derive(Clone)]
pub struct AppState {
    pub categories: Arc<dyn ResourceStore<Category>>,
    pub products: Arc<dyn ResourceStore<Product>>,
    pub orders: Arc<dyn ResourceStore<Order>>,
    /// Liveness probe for the same backing store.
    pub store_health: Arc<dyn StoreHealth>,
    /// Checks decoded Basic credentials; consulted by the auth gate only.
    pub verifier: Arc<dyn CredentialVerifier>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Build state around one store that serves every entity type.
    pub fn new<S>(store: Arc<S>, verifier: Arc<dyn CredentialVerifier>, config: ServerConfig) -> Self
    where
        S: ResourceStore<Category>
            + ResourceStore<Product>
            + ResourceStore<Order>
            + StoreHealth
            + 'static,
    {
        Self {
            categories: store.clone(),
            products: store.clone(),
            orders: store.clone(),
            store_health: store,
            verifier,
            config: Arc::new(config),
        }
    }
}

/// Selects the store gateway for one entity type, so handlers can be written
/// once and instantiated per resource.
pub trait StoreFor<R: Resource> {
    fn store(&self) -> &dyn ResourceStore<R>;
}

impl StoreFor<Category> for AppState {
    fn store(&self) -> &dyn ResourceStore<Category> {
        self.categories.as_ref()
    }
}

impl StoreFor<Product> for AppState {
    fn store(&self) -> &dyn ResourceStore<Product> {
        self.products.as_ref()
    }
}

impl StoreFor<Order> for AppState {
    fn store(&self) -> &dyn ResourceStore<Order> {
        self.orders.as_ref()
    }
}
