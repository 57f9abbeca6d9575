use axum::http::StatusCode;
use axum_test::TestServer;
use catalog_api::{
    build_app,
    infrastructure::{database::DatabaseManager, seed::seed_data},
    AppState, Config,
};
use serde_json::{json, Value};

async fn create_test_server(seed: bool) -> TestServer {
    let config = Config::default();
    let db = DatabaseManager::in_memory()
        .await
        .expect("Failed to open in-memory database");
    if seed {
        seed_data(db.get_pool()).await.expect("Failed to seed");
    }

    let state = AppState::new(db.get_pool().clone(), config.pagination.clone());
    TestServer::new(build_app(state, &config)).unwrap()
}

async fn create_category(server: &TestServer, name: &str) -> i64 {
    let response = server
        .post("/api/categories")
        .json(&json!({ "name": name, "description": format!("{} description", name) }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(false).await;

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_catalog_scenario() {
    let server = create_test_server(false).await;

    let response = server
        .post("/api/categories")
        .json(&json!({ "name": "Toys" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let category_id = response.json::<Value>()["id"].as_i64().unwrap();
    assert!(category_id > 0);

    let response = server
        .post("/api/products")
        .json(&json!({
            "name": "Robot",
            "price": "29.99",
            "category": { "id": category_id }
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let product_id = response.json::<Value>()["id"].as_i64().unwrap();

    let response = server.get(&format!("/api/products/{}", product_id)).await;
    response.assert_status_ok();
    let product: Value = response.json();
    assert_eq!(product["price"], "29.99");
    assert_eq!(product["category"]["name"], "Toys");

    // 分类仍被引用，删除被拒绝
    let response = server
        .delete(&format!("/api/categories/{}", category_id))
        .await;
    response.assert_status(StatusCode::CONFLICT);

    let response = server.get(&format!("/api/products/{}", product_id)).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["category"]["id"], category_id);
}

#[tokio::test]
async fn test_category_crud() {
    let server = create_test_server(false).await;
    let id = create_category(&server, "Books").await;

    let response = server.get(&format!("/api/categories/{}", id)).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["name"], "Books");
    assert_eq!(body["description"], "Books description");

    let response = server
        .put(&format!("/api/categories/{}", id))
        .json(&json!({ "name": "Magazines" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["id"], id);
    assert_eq!(body["name"], "Magazines");
    assert_eq!(body["description"], Value::Null);

    let response = server.delete(&format!("/api/categories/{}", id)).await;
    response.assert_status(StatusCode::NO_CONTENT);

    let response = server.get(&format!("/api/categories/{}", id)).await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert!(response.text().is_empty());
}

#[tokio::test]
async fn test_missing_ids_return_not_found() {
    let server = create_test_server(false).await;

    server
        .get("/api/categories/999")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .put("/api/categories/999")
        .json(&json!({ "name": "Nothing" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .delete("/api/categories/999")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    server
        .get("/api/products/999")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .delete("/api/products/999")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let body: Value = server.get("/api/categories").await.json();
    assert_eq!(body["pagination"]["total"], 0);
}

#[tokio::test]
async fn test_validation_errors() {
    let server = create_test_server(false).await;
    let category_id = create_category(&server, "Toys").await;

    let response = server.post("/api/categories").json(&json!({})).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "VALIDATION_FAILED");
    assert!(body["fields"]["name"].is_array());

    let response = server
        .post("/api/products")
        .json(&json!({
            "name": "Robot",
            "price": "-5.00",
            "category": { "id": category_id }
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["fields"]["price"].is_array());

    let response = server
        .post("/api/products")
        .json(&json!({
            "name": "Robot",
            "price": "5.00",
            "category": { "id": 12345 }
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["fields"]["category"].is_array());

    // 语法错误的 JSON 也返回 400
    let response = server
        .post("/api/categories")
        .content_type("application/json")
        .text("{not json")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    // 校验先于存在性检查
    let response = server
        .put("/api/categories/999")
        .json(&json!({ "name": "" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_mistyped_fields_report_field_errors() {
    let server = create_test_server(false).await;
    let category_id = create_category(&server, "Toys").await;

    let response = server
        .post("/api/products")
        .json(&json!({
            "name": "Robot",
            "price": "abc",
            "category": { "id": category_id }
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "VALIDATION_FAILED");
    assert!(body["fields"]["price"].is_array());

    let response = server
        .post("/api/categories")
        .json(&json!({ "name": 123 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "VALIDATION_FAILED");
    assert!(body["fields"]["name"].is_array());

    let response = server.get("/api/products").await;
    assert_eq!(response.json::<Value>()["pagination"]["total"], 0);
}

#[tokio::test]
async fn test_pagination() {
    let server = create_test_server(true).await;

    let response = server.get("/api/products").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["pagination"]["page"], 0);
    assert_eq!(body["pagination"]["size"], 10);
    assert_eq!(body["pagination"]["total"], 6);
    assert_eq!(body["data"].as_array().unwrap().len(), 6);
    assert_eq!(body["data"][0]["name"], "Laptop");
    assert_eq!(body["data"][0]["price"], "999.99");
    assert_eq!(body["data"][0]["category"]["name"], "Electronics");

    let mut names = Vec::new();
    for page in 0..3 {
        let body: Value = server
            .get(&format!("/api/products?page={}&size=4", page))
            .await
            .json();
        let data = body["data"].as_array().unwrap();
        assert!(data.len() <= 4);
        assert_eq!(body["pagination"]["total_pages"], 2);
        names.extend(data.iter().map(|p| p["name"].as_str().unwrap().to_string()));
    }
    assert_eq!(
        names,
        vec![
            "Laptop",
            "Smartphone",
            "T-Shirt",
            "Jeans",
            "The Great Novel",
            "Garden Tool Set"
        ]
    );

    let body: Value = server.get("/api/categories?size=1000").await.json();
    assert_eq!(body["pagination"]["size"], 100);
    assert_eq!(body["data"].as_array().unwrap().len(), 4);

    server
        .get("/api/categories?size=0")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    server
        .get("/api/categories?page=-1")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_product_update_replaces_fields() {
    let server = create_test_server(false).await;
    let toys = create_category(&server, "Toys").await;
    let games = create_category(&server, "Games").await;

    let response = server
        .post("/api/products")
        .json(&json!({
            "name": "Puzzle",
            "description": "1000 pieces",
            "price": 12.5,
            "category": { "id": toys }
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let id = response.json::<Value>()["id"].as_i64().unwrap();

    let response = server
        .put(&format!("/api/products/{}", id))
        .json(&json!({
            "name": "Puzzle XL",
            "price": "19.00",
            "category": { "id": games }
        }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["name"], "Puzzle XL");
    assert_eq!(body["description"], Value::Null);
    assert_eq!(body["price"], "19.00");
    assert_eq!(body["category"]["name"], "Games");

    server
        .put("/api/products/999")
        .json(&json!({ "name": "Ghost", "price": "1", "category": { "id": toys } }))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    server
        .delete(&format!("/api/products/{}", id))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .get(&format!("/api/products/{}", id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_and_request_id_headers() {
    let server = create_test_server(false).await;

    let response = server
        .get("/api/categories")
        .add_header(
            axum::http::HeaderName::from_static("origin"),
            axum::http::HeaderValue::from_static("http://example.com"),
        )
        .await;
    response.assert_status_ok();
    assert_eq!(response.header("access-control-allow-origin"), "*");
    assert!(!response.header("x-request-id").is_empty());
}
