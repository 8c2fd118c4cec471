// ============================================================================
// Wire DTOs
// ============================================================================
//
// Shapes exchanged between services. Peer snapshots are transient,
// per-request projections and are never persisted; the composite order
// details exist only as a response value.
//
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Read-only projection of a product, fetched per aggregation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    pub id: i64,
    pub name: String,
    /// Units on hand at the product service.
    pub quantity: i64,
    pub price: f64,
}

/// Read-only projection of a client, fetched per aggregation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSnapshot {
    pub id: i64,
    pub name: String,
    pub telephone_number: String,
    pub address: String,
    pub email: String,
    pub role: String,
}

/// Composite view assembled from a local order and both peer snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    pub order_id: i64,
    pub product_id: i64,
    pub client_id: i64,
    pub name: String,
    pub email: String,
    pub address: String,
    pub telephone: String,
    pub product_name: String,
    pub purchase_quantity: i64,
    pub unit_price: i64,
    pub total_price: i64,
    pub order_date: DateTime<Utc>,
}
