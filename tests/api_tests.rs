//! API integration tests
//!
//! These run against a live server with a scratch database:
//! `cargo test -- --ignored`

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Create a catalog item to lend out and return its id
async fn create_test_item(client: &Client) -> String {
    let response = client
        .post(format!("{}/items", BASE_URL))
        .json(&json!({
            "nama": "Proyektor Epson",
            "kategori": "elektronik",
            "harga": "15000",
            "stok": 3
        }))
        .send()
        .await
        .expect("Failed to create test item");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["data"]["id"].as_str().expect("No item id").to_string()
}

/// Submit a valid loan request against the given item and return its id
async fn create_test_loan(client: &Client, barang_id: &str) -> String {
    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({
            "nama_lengkap": "Budi",
            "nim": "123",
            "barang_id": barang_id,
            "tanggal_mulai": "2024-01-01",
            "tanggal_selesai": "2024-01-03",
            "telepon": "+6281234567890"
        }))
        .send()
        .await
        .expect("Failed to create test loan");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    body["data"]["id"].as_str().expect("No loan id").to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_create_loan_rejects_bad_phone() {
    let client = Client::new();
    let barang_id = create_test_item(&client).await;

    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({
            "nama_lengkap": "Budi",
            "nim": "123",
            "barang_id": barang_id,
            "tanggal_mulai": "2024-01-01",
            "tanggal_selesai": "2024-01-03",
            "telepon": "0812345"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
#[ignore]
async fn test_create_loan_rejects_missing_name() {
    let client = Client::new();
    let barang_id = create_test_item(&client).await;

    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({
            "nama_lengkap": "",
            "nim": "123",
            "barang_id": barang_id,
            "tanggal_mulai": "2024-01-01",
            "tanggal_selesai": "2024-01-03",
            "telepon": "+6281234567890"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_loan_lifecycle_end_to_end() {
    let client = Client::new();
    let barang_id = create_test_item(&client).await;
    let loan_id = create_test_loan(&client, &barang_id).await;

    // Created as pending, with lama_pinjam defaulted from the date range
    let body: Value = client
        .get(format!("{}/loans/{}", BASE_URL, loan_id))
        .send()
        .await
        .expect("Failed to fetch loan")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["lama_pinjam"], 2);

    // Approve
    let response = client
        .patch(format!("{}/loans/{}/status", BASE_URL, loan_id))
        .json(&json!({ "status": "approved" }))
        .send()
        .await
        .expect("Failed to update status");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["status"], "approved");

    // Complete
    let response = client
        .post(format!("{}/history/complete", BASE_URL))
        .json(&json!({
            "loanId": loan_id,
            "returnCondition": "baik",
            "adminNotes": "",
            "fine": "0"
        }))
        .send()
        .await
        .expect("Failed to complete loan");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["status_akhir"], "selesai");
    assert_eq!(body["data"]["kondisi_kembali"], "baik");
    let history_id = body["data"]["id"].as_str().expect("No history id").to_string();

    // Gone from active loans
    let response = client
        .get(format!("{}/loans/{}", BASE_URL, loan_id))
        .send()
        .await
        .expect("Failed to fetch loan");
    assert_eq!(response.status(), 404);

    // Present in history
    let response = client
        .get(format!("{}/history/{}", BASE_URL, history_id))
        .send()
        .await
        .expect("Failed to fetch history record");
    assert!(response.status().is_success());

    // Completing again fails cleanly: the active row is already gone
    let response = client
        .post(format!("{}/history/complete", BASE_URL))
        .json(&json!({ "loanId": loan_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    // Timeline is ordered ascending and ends with the final status
    let body: Value = client
        .get(format!("{}/history/timeline/{}", BASE_URL, loan_id))
        .send()
        .await
        .expect("Failed to fetch timeline")
        .json()
        .await
        .expect("Failed to parse response");
    let events = body["data"].as_array().expect("Timeline is not an array");
    assert!(!events.is_empty());
    assert_eq!(events[0]["status"], "pending");
    assert_eq!(events[events.len() - 1]["status"], "selesai");
}

#[tokio::test]
#[ignore]
async fn test_update_status_rejects_unknown_value() {
    let client = Client::new();
    let barang_id = create_test_item(&client).await;
    let loan_id = create_test_loan(&client, &barang_id).await;

    let response = client
        .patch(format!("{}/loans/{}/status", BASE_URL, loan_id))
        .json(&json!({ "status": "selesai" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    // The record is untouched
    let body: Value = client
        .get(format!("{}/loans/{}", BASE_URL, loan_id))
        .send()
        .await
        .expect("Failed to fetch loan")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["data"]["status"], "pending");
}

#[tokio::test]
#[ignore]
async fn test_delete_loan_is_not_found_on_second_call() {
    let client = Client::new();
    let barang_id = create_test_item(&client).await;
    let loan_id = create_test_loan(&client, &barang_id).await;

    let response = client
        .delete(format!("{}/loans/{}", BASE_URL, loan_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .delete(format!("{}/loans/{}", BASE_URL, loan_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_delete_item_with_active_loan_conflicts() {
    let client = Client::new();
    let barang_id = create_test_item(&client).await;
    let loan_id = create_test_loan(&client, &barang_id).await;

    let response = client
        .delete(format!("{}/items/{}", BASE_URL, barang_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "conflict");

    // Deletable once the referencing loan is gone
    let response = client
        .delete(format!("{}/loans/{}", BASE_URL, loan_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .delete(format!("{}/items/{}", BASE_URL, barang_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_list_pagination_out_of_range_is_empty() {
    let client = Client::new();

    let response = client
        .get(format!("{}/loans?page=9999&limit=10", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["items"].as_array().expect("items").len(), 0);
    assert!(body["data"]["total"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_list_pagination_slices_seeded_rows() {
    let client = Client::new();
    let barang_id = create_test_item(&client).await;

    // Unique tag so the search filter only sees rows from this run
    let tag = format!(
        "paging{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    );

    for i in 0..15 {
        let response = client
            .post(format!("{}/loans", BASE_URL))
            .json(&json!({
                "nama_lengkap": format!("{} {}", tag, i),
                "nim": "123",
                "barang_id": barang_id,
                "tanggal_mulai": "2024-01-01",
                "tanggal_selesai": "2024-01-03",
                "telepon": "+6281234567890"
            }))
            .send()
            .await
            .expect("Failed to create loan");
        assert_eq!(response.status(), 201);
    }

    // Page 2 of 10 holds the remaining 5 rows
    let body: Value = client
        .get(format!("{}/loans?search={}&page=2&limit=10", BASE_URL, tag))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["data"]["items"].as_array().expect("items").len(), 5);
    assert_eq!(body["data"]["total"], 15);

    // Past the end: empty slice, total unchanged
    let body: Value = client
        .get(format!("{}/loans?search={}&page=99&limit=10", BASE_URL, tag))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["data"]["items"].as_array().expect("items").len(), 0);
    assert_eq!(body["data"]["total"], 15);
}

#[tokio::test]
#[ignore]
async fn test_list_pagination_echoes_normalized_params() {
    let client = Client::new();

    // limit is clamped to 100 and page floored at 1; the envelope
    // reports the values actually served
    let body: Value = client
        .get(format!("{}/loans?page=0&limit=500", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["data"]["page"], 1);
    assert_eq!(body["data"]["limit"], 100);
}

#[tokio::test]
#[ignore]
async fn test_loan_stats_partition_sums_to_total() {
    let client = Client::new();

    let response = client
        .get(format!("{}/loans/stats", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let data = &body["data"];
    let total = data["total"].as_i64().expect("total");
    let sum = data["pending"].as_i64().expect("pending")
        + data["approved"].as_i64().expect("approved")
        + data["rejected"].as_i64().expect("rejected");
    assert_eq!(total, sum);
}

#[tokio::test]
#[ignore]
async fn test_history_stats_shape() {
    let client = Client::new();

    let response = client
        .get(format!("{}/history/stats", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let data = &body["data"];
    assert!(data["totalLoans"].is_number());
    assert!(data["completedCount"].is_number());
    assert!(data["cancelledCount"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_timeline_append_and_read_back() {
    let client = Client::new();
    let barang_id = create_test_item(&client).await;
    let loan_id = create_test_loan(&client, &barang_id).await;

    let response = client
        .post(format!("{}/history/timeline", BASE_URL))
        .json(&json!({
            "loanId": loan_id,
            "status": "approved",
            "note": "Dikonfirmasi via WhatsApp"
        }))
        .send()
        .await
        .expect("Failed to append event");
    assert_eq!(response.status(), 201);

    let body: Value = client
        .get(format!("{}/history/timeline/{}", BASE_URL, loan_id))
        .send()
        .await
        .expect("Failed to fetch timeline")
        .json()
        .await
        .expect("Failed to parse response");
    let events = body["data"].as_array().expect("Timeline is not an array");
    assert!(events
        .iter()
        .any(|e| e["keterangan"] == "Dikonfirmasi via WhatsApp"));
}
