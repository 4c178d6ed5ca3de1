// ============================
// crates/backend-lib/src/catalog.rs
// ============================
//! Series and product operations against the catalog store.
//!
//! Products carry a non-owning reference to a series; reads expand it to
//! the series name only. Product creation checks that the referenced
//! series exists before inserting (no store-level foreign key). The
//! check-then-insert window is benign: nothing in the API deletes.
use stockroom_common::{CreateProductRequest, ProductView, SeriesName, SeriesView};

use crate::error::AppError;
use crate::store::{CatalogStore, NewProduct, ProductRecord};

/// Catalog service wrapping the store handle
#[derive(Clone)]
pub struct CatalogService<S> {
    store: S,
}

fn series_view(record: crate::store::SeriesRecord) -> SeriesView {
    SeriesView {
        id: record.id,
        name: record.name,
    }
}

fn product_view(record: ProductRecord, series_name: String) -> ProductView {
    ProductView {
        id: record.id,
        name: record.name,
        capacity: record.capacity,
        color: record.color,
        code: record.code,
        battery: record.battery,
        condition: record.condition,
        selling_price: record.selling_price,
        purchase_price: record.purchase_price,
        source: record.source,
        series: SeriesName { name: series_name },
    }
}

impl<S: CatalogStore> CatalogService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create a series. Fails with `Conflict` if the name is taken.
    pub async fn create_series(&self, name: &str) -> Result<SeriesView, AppError> {
        let record = self.store.insert_series(name).await?;
        tracing::info!(series = %record.name, id = %record.id, "series created");
        Ok(series_view(record))
    }

    /// All series, no ordering contract
    pub async fn list_series(&self) -> Result<Vec<SeriesView>, AppError> {
        let records = self.store.list_series().await?;
        Ok(records.into_iter().map(series_view).collect())
    }

    /// Look up a series by id; `NotFound` on miss
    pub async fn get_series(&self, id: &str) -> Result<SeriesView, AppError> {
        self.store
            .find_series(id)
            .await?
            .map(series_view)
            .ok_or_else(|| AppError::NotFound(format!("series {id}")))
    }

    /// Create a product after checking that the referenced series exists.
    /// Fails with `InvalidReference` if it does not; nothing is persisted
    /// in that case.
    pub async fn create_product(&self, req: CreateProductRequest) -> Result<ProductView, AppError> {
        let series = self
            .store
            .find_series(&req.series_id)
            .await?
            .ok_or_else(|| {
                AppError::InvalidReference(format!("series {} does not exist", req.series_id))
            })?;

        let record = self
            .store
            .insert_product(NewProduct {
                name: req.name,
                capacity: req.capacity,
                color: req.color,
                code: req.code,
                battery: req.battery,
                condition: req.condition,
                selling_price: req.selling_price,
                purchase_price: req.purchase_price,
                source: req.source,
                series_id: series.id,
            })
            .await?;

        tracing::info!(product = %record.name, series = %series.name, "product created");
        Ok(product_view(record, series.name))
    }

    /// All products, series reference expanded to its name
    pub async fn list_products(&self) -> Result<Vec<ProductView>, AppError> {
        let records = self.store.list_products().await?;
        let mut views = Vec::with_capacity(records.len());
        for record in records {
            views.push(self.expand(record).await?);
        }
        Ok(views)
    }

    /// Look up a product by id; `NotFound` on miss
    pub async fn get_product(&self, id: &str) -> Result<ProductView, AppError> {
        let record = self
            .store
            .find_product(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
        self.expand(record).await
    }

    /// Products referencing the given series. Fails with `NotFound` if
    /// the series itself is absent; an empty list is a valid result.
    pub async fn list_products_by_series(
        &self,
        series_id: &str,
    ) -> Result<Vec<ProductView>, AppError> {
        let series = self
            .store
            .find_series(series_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("series {series_id}")))?;

        let records = self.store.products_by_series(&series.id).await?;
        Ok(records
            .into_iter()
            .map(|record| product_view(record, series.name.clone()))
            .collect())
    }

    async fn expand(&self, record: ProductRecord) -> Result<ProductView, AppError> {
        // series are never deleted, so a dangling reference here means
        // the store itself is inconsistent
        let series = self
            .store
            .find_series(&record.series_id)
            .await?
            .ok_or_else(|| {
                AppError::Store(format!(
                    "series {} missing for product {}",
                    record.series_id, record.id
                ))
            })?;
        Ok(product_view(record, series.name))
    }
}
