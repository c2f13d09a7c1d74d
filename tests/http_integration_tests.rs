//! HTTP Integration tests for the address service
//! 地址服务的HTTP集成测试
//!
//! These tests verify the end-to-end functionality of the HTTP REST API
//! 这些测试验证HTTP REST API的端到端功能

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use std::sync::Arc;

use geo_addresses::addresses::gateway::{create_gateway_router, GatewayState};
use geo_addresses::addresses::repository::KvAddressRepository;
use geo_addresses::addresses::validation::ValidationConfig;
use geo_addresses::config::base::HttpConfig;
use geo_addresses::storage::{create_kv_store_from_config, KvStoreConfig};

// Test utilities for HTTP integration / HTTP集成测试工具
mod http_test_utils {
    use super::*;

    /// Create a test HTTP server over a memory store / 基于内存存储创建测试HTTP服务器
    pub async fn create_test_http_server() -> TestServer {
        create_test_http_server_with(ValidationConfig::default()).await
    }

    /// Create a test HTTP server with custom validation rules / 使用自定义校验规则创建测试HTTP服务器
    pub async fn create_test_http_server_with(validation: ValidationConfig) -> TestServer {
        let store = create_kv_store_from_config(&KvStoreConfig::memory())
            .await
            .unwrap();
        let repository = KvAddressRepository::new(store);
        let state = GatewayState::new(Arc::new(repository), validation);
        let app = create_gateway_router(state, &HttpConfig::default());
        TestServer::new(app.into_make_service()).unwrap()
    }

    /// Generate test address JSON / 生成测试地址JSON
    pub fn address_json(label: &str, latitude: f64, longitude: f64) -> serde_json::Value {
        json!({
            "label": label,
            "latitude": latitude,
            "longitude": longitude
        })
    }
}

#[tokio::test]
async fn test_http_address_lifecycle() {
    // Test complete address lifecycle via HTTP API / 通过HTTP API测试完整的地址生命周期
    let server = http_test_utils::create_test_http_server().await;

    // 1. Create address / 创建地址
    let create_response = server
        .post("/addresses")
        .json(&http_test_utils::address_json("Big Ben, Westminster", 51.5007, -0.1246))
        .await;
    create_response.assert_status(StatusCode::CREATED);
    let created: serde_json::Value = create_response.json();
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["label"], "Big Ben, Westminster");

    // 2. Get address / 获取地址
    let get_response = server.get(&format!("/addresses/{}", id)).await;
    get_response.assert_status_ok();
    let fetched: serde_json::Value = get_response.json();
    assert_eq!(fetched["latitude"], 51.5007);
    assert_eq!(fetched["longitude"], -0.1246);

    // 3. Full update with PUT / 使用PUT完整更新
    let put_response = server
        .put(&format!("/addresses/{}", id))
        .json(&http_test_utils::address_json("Elizabeth Tower, London", 51.5008, -0.1247))
        .await;
    put_response.assert_status_ok();
    let put_body: serde_json::Value = put_response.json();
    assert_eq!(put_body["id"], id.as_str());
    assert_eq!(put_body["label"], "Elizabeth Tower, London");

    // 4. Partial update with PATCH / 使用PATCH部分更新
    let patch_response = server
        .patch(&format!("/addresses/{}", id))
        .json(&json!({ "label": "Elizabeth Tower (Big Ben)" }))
        .await;
    patch_response.assert_status_ok();
    let patch_body: serde_json::Value = patch_response.json();
    assert_eq!(patch_body["label"], "Elizabeth Tower (Big Ben)");
    assert_eq!(patch_body["latitude"], 51.5008);
    assert_eq!(patch_body["longitude"], -0.1247);

    // 5. List addresses / 列出地址
    let list_response = server.get("/addresses").await;
    list_response.assert_status_ok();
    let list_body: serde_json::Value = list_response.json();
    let addresses = list_body.as_array().unwrap();
    assert_eq!(addresses.len(), 1);
    assert_eq!(addresses[0]["id"], id.as_str());

    // 6. Delete address / 删除地址
    let delete_response = server.delete(&format!("/addresses/{}", id)).await;
    delete_response.assert_status_ok();
    let delete_body: serde_json::Value = delete_response.json();
    assert_eq!(delete_body["status"], "success");

    // 7. Verify deletion / 验证删除
    server
        .get(&format!("/addresses/{}", id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .delete(&format!("/addresses/{}", id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_http_list_empty() {
    let server = http_test_utils::create_test_http_server().await;
    let response = server.get("/addresses").await;
    response.assert_status_ok();
    response.assert_json(&json!([]));
}

#[tokio::test]
async fn test_http_validation_errors() {
    // Test validation error handling / 测试校验错误处理
    let server = http_test_utils::create_test_http_server().await;

    let cases = vec![
        http_test_utils::address_json("Beyond the north pole", 91.0, 0.0),
        http_test_utils::address_json("Beyond the date line", 0.0, 180.5),
        http_test_utils::address_json("short", 0.0, 0.0),
        http_test_utils::address_json("            ", 0.0, 0.0),
        json!({ "label": "No coordinates at all" }),
    ];

    for body in cases {
        let response = server.post("/addresses").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let error: serde_json::Value = response.json();
        assert_eq!(error["success"], false);
        assert_eq!(error["error"], "validation_error");
        assert!(!error["message"].as_str().unwrap().is_empty());
    }

    // Nothing was written / 未写入任何数据
    let list: serde_json::Value = server.get("/addresses").await.json();
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_http_boundary_coordinates_accepted() {
    let server = http_test_utils::create_test_http_server().await;
    for (lat, lon) in [(-90.0, -180.0), (90.0, 180.0)] {
        server
            .post("/addresses")
            .json(&http_test_utils::address_json("Edge of the map", lat, lon))
            .await
            .assert_status(StatusCode::CREATED);
    }
}

#[tokio::test]
async fn test_http_update_missing_is_404_and_invalid_is_400() {
    let server = http_test_utils::create_test_http_server().await;

    server
        .patch("/addresses/00000000-0000-0000-0000-000000000000")
        .json(&json!({ "latitude": 10.0 }))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let created: serde_json::Value = server
        .post("/addresses")
        .json(&http_test_utils::address_json("Acropolis of Athens", 37.9715, 23.7257))
        .await
        .json();
    let id = created["id"].as_str().unwrap();

    server
        .patch(&format!("/addresses/{}", id))
        .json(&json!({ "latitude": -91.0 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // Record unchanged / 记录未改变
    let fetched: serde_json::Value = server.get(&format!("/addresses/{}", id)).await.json();
    assert_eq!(fetched["latitude"], 37.9715);
}

#[tokio::test]
async fn test_http_find_within_distance() {
    // Test proximity query / 测试邻近查询
    let server = http_test_utils::create_test_http_server().await;

    for (label, lat, lon) in [
        ("Paris, Ile-de-France", 48.8566, 2.3522),
        ("Versailles Palace", 48.8049, 2.1204),
        ("Lyon, Auvergne-Rhone-Alpes", 45.7640, 4.8357),
    ] {
        server
            .post("/addresses")
            .json(&http_test_utils::address_json(label, lat, lon))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = server.get("/addresses/find/48.8566/2.3522/50").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["count"], 2);
    let addresses = body["addresses"].as_array().unwrap();
    assert_eq!(addresses.len(), 2);
    assert_eq!(addresses[0]["label"], "Paris, Ile-de-France");
    assert_eq!(addresses[0]["distance_km"], 0.0);
    assert_eq!(addresses[1]["label"], "Versailles Palace");

    // Zero threshold keeps only the exact match / 零阈值只保留精确匹配
    let body: serde_json::Value = server
        .get("/addresses/find/48.8566/2.3522/0")
        .await
        .json();
    assert_eq!(body["count"], 1);

    // Negative threshold matches nothing / 负阈值不匹配任何记录
    let body: serde_json::Value = server
        .get("/addresses/find/48.8566/2.3522/-1")
        .await
        .json();
    assert_eq!(body["count"], 0);
    assert!(body["addresses"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_http_find_malformed_segments() {
    let server = http_test_utils::create_test_http_server().await;

    for uri in [
        "/addresses/find/abc/2.0/10",
        "/addresses/find/1.0/east/10",
        "/addresses/find/1.0/2.0/far",
        "/addresses/find/95.0/2.0/10",
    ] {
        let response = server.get(uri).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "validation_error", "uri {}", uri);
    }
}

#[tokio::test]
async fn test_http_configured_label_minimum() {
    let server = http_test_utils::create_test_http_server_with(ValidationConfig {
        min_label_length: 2,
        max_label_length: 20,
    })
    .await;

    server
        .post("/addresses")
        .json(&http_test_utils::address_json("Home", 1.0, 1.0))
        .await
        .assert_status(StatusCode::CREATED);
    server
        .post("/addresses")
        .json(&http_test_utils::address_json("A label far too long for this", 1.0, 1.0))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_http_legacy_address_field() {
    // Clients of the original API send `address` instead of `label`
    // 旧版API客户端发送 `address` 而非 `label`
    let server = http_test_utils::create_test_http_server().await;
    let response = server
        .post("/addresses")
        .json(&json!({
            "address": "Brandenburger Tor, Berlin",
            "latitude": 52.5163,
            "longitude": 13.3777
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["label"], "Brandenburger Tor, Berlin");
}
