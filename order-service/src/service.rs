// ============================================================================
// Order Aggregation
// ============================================================================
//
// Composes the full order-detail view from the local order record plus
// the product and user peer services. Each peer call runs under the
// named retry pipeline; the two calls are independent and are joined
// concurrently.
//
// ============================================================================

use std::fmt;
use std::sync::Arc;

use anyhow::{Context, Result};

use bazaar_shared::clients::{PeerFetch, ProductClient, UserClient};
use bazaar_shared::fault::{ApiError, FaultKind};
use bazaar_shared::models::OrderDetails;
use bazaar_shared::retry::{RetryPolicy, RetryRegistry, DEFAULT_PIPELINE};

use crate::repository::{Order, OrderRepository};

/// Which peer a degraded aggregation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Peer {
    Product,
    User,
}

impl fmt::Display for Peer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Peer::Product => f.write_str("product"),
            Peer::User => f.write_str("user"),
        }
    }
}

/// Outcome of one aggregation request.
///
/// Which peer failed and why is preserved here rather than collapsed to
/// an absent value; the HTTP surface still maps every non-success arm to
/// the same "not found" response.
#[derive(Debug)]
pub enum DetailsOutcome {
    Details(Box<OrderDetails>),
    OrderMissing,
    PeerUnavailable { peer: Peer, kind: FaultKind },
}

pub struct OrderAggregator {
    repository: Arc<dyn OrderRepository>,
    products: ProductClient,
    users: UserClient,
    retry: Arc<RetryPolicy>,
}

impl OrderAggregator {
    /// The retry pipeline is resolved once here; a missing pipeline is a
    /// startup error, never a per-call fallback.
    pub fn new(
        repository: Arc<dyn OrderRepository>,
        products: ProductClient,
        users: UserClient,
        registry: &RetryRegistry,
    ) -> Result<Self> {
        let retry = registry
            .get(DEFAULT_PIPELINE)
            .with_context(|| format!("retry pipeline {DEFAULT_PIPELINE:?} is not registered"))?;
        Ok(Self {
            repository,
            products,
            users,
            retry,
        })
    }

    /// Assemble the composite order-detail view.
    ///
    /// Transient peer faults that survive the retry pipeline propagate as
    /// `ApiError`; peer non-success degrades to `PeerUnavailable` without
    /// ever producing a partial composite.
    pub async fn get_order_details(&self, order_id: i64) -> Result<DetailsOutcome, ApiError> {
        if order_id <= 0 {
            return Ok(DetailsOutcome::OrderMissing);
        }
        let Some(order) = self.repository.find_by_id(order_id).await else {
            return Ok(DetailsOutcome::OrderMissing);
        };

        let product_call = self
            .retry
            .execute(|| self.products.get_product(order.product_id));
        let user_call = self.retry.execute(|| self.users.get_user(order.client_id));
        let (product, user) = tokio::join!(product_call, user_call);

        let product = match product? {
            PeerFetch::Fetched(product) => product,
            PeerFetch::Unavailable(kind) => {
                return Ok(DetailsOutcome::PeerUnavailable {
                    peer: Peer::Product,
                    kind,
                });
            }
        };
        let user = match user? {
            PeerFetch::Fetched(user) => user,
            PeerFetch::Unavailable(kind) => {
                return Ok(DetailsOutcome::PeerUnavailable {
                    peer: Peer::User,
                    kind,
                });
            }
        };

        Ok(DetailsOutcome::Details(Box::new(compose(
            &order, product, user,
        ))))
    }

    /// Orders for one client, `None` when the filtered set is empty.
    pub async fn get_orders_by_client_id(&self, client_id: i64) -> Option<Vec<Order>> {
        let orders = self.repository.by_client(client_id).await;
        if orders.is_empty() {
            None
        } else {
            Some(orders)
        }
    }
}

fn compose(
    order: &Order,
    product: bazaar_shared::models::ProductSnapshot,
    user: bazaar_shared::models::UserSnapshot,
) -> OrderDetails {
    OrderDetails {
        order_id: order.id,
        product_id: product.id,
        client_id: user.id,
        name: user.name,
        email: user.email,
        address: user.address,
        telephone: user.telephone_number,
        product_name: product.name,
        purchase_quantity: order.purchase_quantity,
        unit_price: product.price.trunc() as i64,
        total_price: product.quantity * order.purchase_quantity,
        order_date: order.order_date,
    }
}
