// ============================================================================
// Order Repository
// ============================================================================
//
// The persistence seam for the order aggregate. The relational store is
// an external collaborator; services run against the in-memory
// implementation below and swap it out behind the trait.
//
// ============================================================================

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Local order aggregate root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub product_id: i64,
    pub client_id: i64,
    pub purchase_quantity: i64,
    pub order_date: DateTime<Utc>,
}

/// Payload for creating or replacing an order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub product_id: i64,
    pub client_id: i64,
    pub purchase_quantity: i64,
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn all(&self) -> Vec<Order>;
    async fn find_by_id(&self, id: i64) -> Option<Order>;
    async fn by_client(&self, client_id: i64) -> Vec<Order>;
    async fn create(&self, order: NewOrder) -> Order;
    async fn update(&self, id: i64, order: NewOrder) -> Option<Order>;
    async fn delete(&self, id: i64) -> bool;
}

/// In-memory store keyed by order id.
pub struct InMemoryOrders {
    orders: RwLock<HashMap<i64, Order>>,
    next_id: AtomicI64,
}

impl InMemoryOrders {
    pub fn new() -> Self {
        Self {
            orders: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Store pre-seeded with fixed orders, used by binaries and tests.
    pub fn seeded(orders: impl IntoIterator<Item = Order>) -> Self {
        let orders: HashMap<i64, Order> = orders.into_iter().map(|o| (o.id, o)).collect();
        let next_id = orders.keys().max().copied().unwrap_or(0) + 1;
        Self {
            orders: RwLock::new(orders),
            next_id: AtomicI64::new(next_id),
        }
    }
}

impl Default for InMemoryOrders {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrders {
    async fn all(&self) -> Vec<Order> {
        let mut orders: Vec<Order> = self.orders.read().await.values().cloned().collect();
        orders.sort_by_key(|o| o.id);
        orders
    }

    async fn find_by_id(&self, id: i64) -> Option<Order> {
        self.orders.read().await.get(&id).cloned()
    }

    async fn by_client(&self, client_id: i64) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .orders
            .read()
            .await
            .values()
            .filter(|o| o.client_id == client_id)
            .cloned()
            .collect();
        orders.sort_by_key(|o| o.id);
        orders
    }

    async fn create(&self, order: NewOrder) -> Order {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let order = Order {
            id,
            product_id: order.product_id,
            client_id: order.client_id,
            purchase_quantity: order.purchase_quantity,
            order_date: Utc::now(),
        };
        self.orders.write().await.insert(id, order.clone());
        order
    }

    async fn update(&self, id: i64, order: NewOrder) -> Option<Order> {
        let mut orders = self.orders.write().await;
        let existing = orders.get_mut(&id)?;
        existing.product_id = order.product_id;
        existing.client_id = order.client_id;
        existing.purchase_quantity = order.purchase_quantity;
        Some(existing.clone())
    }

    async fn delete(&self, id: i64) -> bool {
        self.orders.write().await.remove(&id).is_some()
    }
}
