// ==========================================
// HTTP 路由测试
// ==========================================
// 在随机端口启动 axum 服务，用 reqwest 模拟浏览器请求
// ==========================================

use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tire_stock_sender::api::StockApi;
use tire_stock_sender::app::{router, AppState};
use tire_stock_sender::services::VendorUploader;
use tokio::net::TcpListener;

use test_helpers::{csv_bytes, sample_sheet, test_config, FakeUploader, TEST_PASSWORD};

/// 启动服务，返回基础地址（临时目录需要保持存活）
async fn spawn_server(api: StockApi) -> String {
    tire_stock_sender::logging::init_test();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    let app = router(AppState::new(api));

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn upload_sample(client: &reqwest::Client, base: &str) -> String {
    let part = Part::bytes(csv_bytes(&sample_sheet()))
        .file_name("stock.csv")
        .mime_str("text/csv")
        .unwrap();
    let form = Form::new()
        .text("password", TEST_PASSWORD)
        .part("file", part);

    let resp = client
        .post(format!("{}/api/upload", base))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    body["data"]["filename"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_index_page() {
    let dir = tempfile::tempdir().unwrap();
    let base = spawn_server(StockApi::new(test_config(dir.path()), None).unwrap()).await;

    let resp = reqwest::get(format!("{}/", base)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let html = resp.text().await.unwrap();
    assert!(html.contains("/api/process"));
}

#[tokio::test]
async fn test_check_password() {
    let dir = tempfile::tempdir().unwrap();
    let base = spawn_server(StockApi::new(test_config(dir.path()), None).unwrap()).await;
    let client = reqwest::Client::new();

    let ok = client
        .post(format!("{}/api/check-password", base))
        .json(&json!({ "password": TEST_PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);

    let denied = client
        .post(format!("{}/api/check-password", base))
        .json(&json!({ "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);
    let body: Value = denied.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_upload_process_download_flow() {
    let dir = tempfile::tempdir().unwrap();
    let fake = Arc::new(FakeUploader::accepting());
    let uploader: Arc<dyn VendorUploader> = fake.clone();
    let api = StockApi::new(test_config(dir.path()), Some(uploader)).unwrap();
    let base = spawn_server(api).await;
    let client = reqwest::Client::new();

    let stored = upload_sample(&client, &base).await;

    // 解析
    let resp = client
        .post(format!("{}/api/process", base))
        .json(&json!({ "password": TEST_PASSWORD, "filename": stored }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["stats"]["vendor_count"], 2);
    assert_eq!(body["data"]["stats"]["invalid_rows"], 1);
    let key = body["data"]["key"].as_str().unwrap().to_string();

    // 下载供应商 CSV
    let resp = client
        .get(format!("{}/api/download-pirelli", base))
        .query(&[("password", TEST_PASSWORD), ("file", key.as_str())])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp.headers()["content-disposition"].to_str().unwrap().to_string();
    assert!(disposition.contains("IR_5700097_"));
    let csv = resp.text().await.unwrap();
    assert!(csv.starts_with("Pirelli Customer Code"));

    // 下载汇总报表
    let resp = client
        .get(format!("{}/api/download-ikon", base))
        .query(&[("password", TEST_PASSWORD), ("file", key.as_str())])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()["content-type"],
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );

    // 上报
    let resp = client
        .post(format!("{}/api/send-pirelli", base))
        .json(&json!({ "password": TEST_PASSWORD, "filename": key }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(fake.call_count(), 1);

    // 清理后结果不存在
    let resp = client
        .post(format!("{}/api/clear", base))
        .json(&json!({ "password": TEST_PASSWORD }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["processed_removed"], 1);

    let resp = client
        .get(format!("{}/api/download-pirelli", base))
        .query(&[("password", TEST_PASSWORD), ("file", key.as_str())])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upload_rejects_wrong_extension() {
    let dir = tempfile::tempdir().unwrap();
    let base = spawn_server(StockApi::new(test_config(dir.path()), None).unwrap()).await;

    let part = Part::bytes(b"%PDF".to_vec()).file_name("stock.pdf");
    let form = Form::new()
        .text("password", TEST_PASSWORD)
        .part("file", part);

    let resp = reqwest::Client::new()
        .post(format!("{}/api/upload", base))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_send_without_vendor_config() {
    let dir = tempfile::tempdir().unwrap();
    let base = spawn_server(StockApi::new(test_config(dir.path()), None).unwrap()).await;

    let resp = reqwest::Client::new()
        .post(format!("{}/api/send-pirelli", base))
        .json(&json!({ "password": TEST_PASSWORD, "filename": "x_processed.json" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
}
