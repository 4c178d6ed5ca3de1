// ================
// common/src/lib.rs
// ================
//! Wire-level request and response types
//! shared between the stockroom server and its clients.
//! Field naming follows the original API: `_id` for record identifiers
//! and camelCase for everything else.

use serde::{Deserialize, Serialize};

/// Registration payload
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Login payload
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response carrying the bearer token
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TokenResponse {
    pub token: String,
}

/// Series creation payload
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateSeriesRequest {
    pub name: String,
}

/// Series as returned by the API
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SeriesView {
    /// Store-assigned identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Unique series name
    pub name: String,
}

/// Product creation payload; `seriesId` must reference an existing series
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
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

/// Expanded series reference embedded in product views.
/// Only the name is projected; the raw id stays internal.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SeriesName {
    pub name: String,
}

/// Full product projection, returned to authenticated readers and on
/// direct lookup by id.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    #[serde(rename = "_id")]
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
    pub series: SeriesName,
}

/// Public product projection: identical record set to [`ProductView`]
/// with `purchasePrice` and `source` omitted.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PublicProductView {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub capacity: String,
    pub color: String,
    pub code: String,
    pub battery: String,
    pub condition: String,
    pub selling_price: f64,
    pub series: SeriesName,
}

impl From<ProductView> for PublicProductView {
    fn from(full: ProductView) -> Self {
        Self {
            id: full.id,
            name: full.name,
            capacity: full.capacity,
            color: full.color,
            code: full.code,
            battery: full.battery,
            condition: full.condition,
            selling_price: full.selling_price,
            series: full.series,
        }
    }
}
