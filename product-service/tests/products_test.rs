// ============================================================================
// Product Service Tests
// ============================================================================

use std::sync::Arc;

use bazaar_shared::middleware::GATEWAY_HEADER;
use bazaar_shared::models::ProductSnapshot;
use product_service::{app, ProductStore};

async fn spawn_app() -> String {
    let store = Arc::new(ProductStore::seeded([ProductSnapshot {
        id: 1,
        name: "Keyboard".to_string(),
        quantity: 12,
        price: 49.99,
    }]));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let address = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app(store))
            .await
            .expect("product service failed");
    });
    address
}

fn api_client() -> reqwest::Client {
    reqwest::Client::builder()
        .default_headers({
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert(
                GATEWAY_HEADER,
                reqwest::header::HeaderValue::from_static("gateway"),
            );
            headers
        })
        .build()
        .unwrap()
}

#[tokio::test]
async fn serves_the_snapshot_contract() {
    let address = spawn_app().await;
    let client = api_client();

    let response = client
        .get(format!("{}/api/Products/1", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let snapshot: ProductSnapshot = response.json().await.unwrap();
    assert_eq!(snapshot.name, "Keyboard");
    assert_eq!(snapshot.quantity, 12);

    let response = client
        .get(format!("{}/api/Products/99", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    assert_eq!(response.text().await.unwrap(), "Product not found");
}

#[tokio::test]
async fn create_then_list() {
    let address = spawn_app().await;
    let client = api_client();

    let response = client
        .post(format!("{}/api/Products", address))
        .json(&serde_json::json!({"name": "Mouse", "quantity": 30, "price": 19.0}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);

    let response = client
        .get(format!("{}/api/Products", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let products: Vec<ProductSnapshot> = response.json().await.unwrap();
    assert_eq!(products.len(), 2);
}

#[tokio::test]
async fn rejects_requests_that_bypass_the_gateway() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/Products/1", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.text().await.unwrap(), "Sorry, service is unvaliable");
}
