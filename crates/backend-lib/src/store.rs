// ============================
// crates/backend-lib/src/store.rs
// ============================
//! Store abstraction with an in-memory document-store implementation.
//!
//! Two narrow traits split the storage surface along component lines:
//! [`CredentialStore`] for the auth side, [`CatalogStore`] for series and
//! products. [`MemoryStore`] implements both and is cloned into every
//! handler; clones share the same underlying maps.
use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::AppError;

/// Stored user credential
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    pub password_hash: String,
}

/// Stored series
#[derive(Debug, Clone)]
pub struct SeriesRecord {
    pub id: String,
    pub name: String,
}

/// Stored product; `series_id` is a non-owning reference to a series
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub capacity: String,
    pub color: String,
    pub code: String,
    pub battery: String,
    pub condition: String,
    pub selling_price: f64,
    pub purchase_price: f64,
    pub source: String,
    pub series_id: String,
}

/// Product fields as accepted on insert; the id is assigned by the store
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub capacity: String,
    pub color: String,
    pub code: String,
    pub battery: String,
    pub condition: String,
    pub selling_price: f64,
    pub purchase_price: f64,
    pub source: String,
    pub series_id: String,
}

/// Trait for credential storage backends
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a user; fails with `Conflict` if the username is taken
    async fn insert_user(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<UserRecord, AppError>;

    /// Look up a user by username
    async fn find_user(&self, username: &str) -> Result<Option<UserRecord>, AppError>;
}

/// Trait for catalog storage backends
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Insert a series; fails with `Conflict` if the name is taken
    async fn insert_series(&self, name: &str) -> Result<SeriesRecord, AppError>;

    /// All series, no ordering contract
    async fn list_series(&self) -> Result<Vec<SeriesRecord>, AppError>;

    /// Look up a series by id
    async fn find_series(&self, id: &str) -> Result<Option<SeriesRecord>, AppError>;

    /// Insert a product; the series reference is checked by the caller
    async fn insert_product(&self, fields: NewProduct) -> Result<ProductRecord, AppError>;

    /// All products, no ordering contract
    async fn list_products(&self) -> Result<Vec<ProductRecord>, AppError>;

    /// Look up a product by id
    async fn find_product(&self, id: &str) -> Result<Option<ProductRecord>, AppError>;

    /// All products referencing the given series
    async fn products_by_series(&self, series_id: &str) -> Result<Vec<ProductRecord>, AppError>;
}

/// Bound shared by every handler: one store type serves both the
/// credential and catalog sides.
pub trait Store: CredentialStore + CatalogStore + Clone + Send + Sync + 'static {}

impl<T: CredentialStore + CatalogStore + Clone + Send + Sync + 'static> Store for T {}

/// In-memory implementation of both store traits.
///
/// Users are keyed by username and series names are indexed separately,
/// which is where the unique constraints live. Ids are opaque UUID v4
/// strings assigned on insert.
#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<DashMap<String, UserRecord>>,
    series: Arc<DashMap<String, SeriesRecord>>,
    series_names: Arc<DashMap<String, String>>,
    products: Arc<DashMap<String, ProductRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id() -> String {
        Uuid::new_v4().simple().to_string()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn insert_user(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<UserRecord, AppError> {
        match self.users.entry(username.to_string()) {
            Entry::Occupied(_) => Err(AppError::Conflict(format!("username '{username}'"))),
            Entry::Vacant(slot) => {
                let record = UserRecord {
                    id: Self::next_id(),
                    username: username.to_string(),
                    password_hash: password_hash.to_string(),
                };
                slot.insert(record.clone());
                Ok(record)
            },
        }
    }

    async fn find_user(&self, username: &str) -> Result<Option<UserRecord>, AppError> {
        Ok(self.users.get(username).map(|r| r.value().clone()))
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn insert_series(&self, name: &str) -> Result<SeriesRecord, AppError> {
        match self.series_names.entry(name.to_string()) {
            Entry::Occupied(_) => Err(AppError::Conflict(format!("series '{name}'"))),
            Entry::Vacant(slot) => {
                let record = SeriesRecord {
                    id: Self::next_id(),
                    name: name.to_string(),
                };
                slot.insert(record.id.clone());
                self.series.insert(record.id.clone(), record.clone());
                Ok(record)
            },
        }
    }

    async fn list_series(&self) -> Result<Vec<SeriesRecord>, AppError> {
        Ok(self.series.iter().map(|r| r.value().clone()).collect())
    }

    async fn find_series(&self, id: &str) -> Result<Option<SeriesRecord>, AppError> {
        Ok(self.series.get(id).map(|r| r.value().clone()))
    }

    async fn insert_product(&self, fields: NewProduct) -> Result<ProductRecord, AppError> {
        let record = ProductRecord {
            id: Self::next_id(),
            name: fields.name,
            capacity: fields.capacity,
            color: fields.color,
            code: fields.code,
            battery: fields.battery,
            condition: fields.condition,
            selling_price: fields.selling_price,
            purchase_price: fields.purchase_price,
            source: fields.source,
            series_id: fields.series_id,
        };
        self.products.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn list_products(&self) -> Result<Vec<ProductRecord>, AppError> {
        Ok(self.products.iter().map(|r| r.value().clone()).collect())
    }

    async fn find_product(&self, id: &str) -> Result<Option<ProductRecord>, AppError> {
        Ok(self.products.get(id).map(|r| r.value().clone()))
    }

    async fn products_by_series(&self, series_id: &str) -> Result<Vec<ProductRecord>, AppError> {
        Ok(self
            .products
            .iter()
            .filter(|r| r.value().series_id == series_id)
            .map(|r| r.value().clone())
            .collect())
    }
}
