mod book;
mod customer;
mod order;

pub use self::{book::*, customer::*, order::*};

use axum::Router;

use crate::handler::{AppModule, Database};

/// Every endpoint, mounted under `/api`.
pub fn app<D: Database>(module: AppModule<D>) -> Router {
    let api = Router::new().route_book().route_customer().route_order();
    Router::new().nest("/api", api).with_state(module)
}

#[cfg(test)]
mod test {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use driver::database::InMemoryDatabase;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::handler::{AppModule, Handler};
    use crate::route::app;

    fn setup() -> Router {
        app(AppModule::with(Handler::new(InMemoryDatabase::new())))
    }

    async fn call(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, json)
    }

    async fn seed_book(router: &Router, stock: i32) {
        let (status, _) = call(
            router,
            "POST",
            "/api/books",
            Some(json!({
                "isbn": "9784297100339",
                "title": "Rust Book",
                "price": 3000,
                "stock": stock
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    fn order_body(quantity: i32) -> Value {
        json!({
            "customerId": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "orderItems": [{ "bookIsbn": "9784297100339", "quantity": quantity }]
        })
    }

    #[tokio::test]
    async fn order_round_trip() {
        let router = setup();
        seed_book(&router, 10).await;

        let (status, order) = call(&router, "POST", "/api/orders", Some(order_body(3))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(order["status"], "PENDING");
        assert_eq!(order["orderItems"][0]["quantity"], 3);
        let id = order["id"].as_str().unwrap().to_string();

        let (_, book) = call(&router, "GET", "/api/books/9784297100339", None).await;
        assert_eq!(book["stock"], 7);

        let (status, _) = call(&router, "DELETE", &format!("/api/orders/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, book) = call(&router, "GET", "/api/books/9784297100339", None).await;
        assert_eq!(book["stock"], 10);
        let (status, _) = call(&router, "GET", &format!("/api/orders/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn business_failures_are_bad_requests() {
        let router = setup();
        seed_book(&router, 10).await;

        let (status, body) = call(&router, "POST", "/api/orders", Some(order_body(11))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("Insufficient stock"));

        let (_, order) = call(&router, "POST", "/api/orders", Some(order_body(1))).await;
        let id = order["id"].as_str().unwrap().to_string();
        let (status, shipped) =
            call(&router, "POST", &format!("/api/orders/{id}/ship"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(shipped["status"], "SHIPPED");
        let (status, _) = call(&router, "DELETE", &format!("/api/orders/{id}"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(&router, "DELETE", "/api/books/9784297100339", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_payloads_are_rejected_before_the_store() {
        let router = setup();
        let (status, body) = call(
            &router,
            "POST",
            "/api/books",
            Some(json!({ "isbn": "123", "title": "Rust Book", "price": 3000, "stock": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (_, books) = call(&router, "GET", "/api/books", None).await;
        assert_eq!(books, json!([]));
    }

    #[tokio::test]
    async fn customers_crud() {
        let router = setup();
        let (status, customer) = call(
            &router,
            "POST",
            "/api/customers",
            Some(json!({ "name": "Hanako", "email": "hanako@example.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = customer["id"].as_str().unwrap().to_string();

        let (status, updated) = call(
            &router,
            "PUT",
            &format!("/api/customers/{id}"),
            Some(json!({ "name": "Taro", "email": "taro@example.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["name"], "Taro");

        let (status, _) = call(&router, "DELETE", &format!("/api/customers/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = call(&router, "GET", &format!("/api/customers/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
