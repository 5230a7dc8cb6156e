#![allow(clippy::unwrap_used)]
// Integration tests for `Depot` feature handles using wiremock.

use std::time::Duration;

use chrono::{NaiveDate, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use depot_core::{
    ActivityLogFilters, AddressFilters, ApiPage, ClientConfig, CoreError, CreateMode, DateRange,
    Depot, ExportFormat, InventoryFilters, ListParams, LookupKind, LookupOutcome, NewAddress,
    PageMeta, RecordId,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Depot) {
    let server = MockServer::start().await;
    let mut config = ClientConfig::new(Url::parse(&server.uri()).unwrap());
    config.lookup_debounce = Duration::from_millis(10);
    config.timeout = Duration::from_secs(5);
    let depot = Depot::new(config).unwrap();
    (server, depot)
}

fn address(id: i64, line1: &str) -> serde_json::Value {
    json!({"id": id, "customerId": 7, "addressLine1": line1, "country": "US"})
}

fn list_body(
    data: serde_json::Value,
    page: u32,
    limit: u32,
    total: u64,
    pages: u32,
) -> serde_json::Value {
    json!({
        "success": true,
        "data": data,
        "pagination": {"page": page, "limit": limit, "totalRecords": total, "totalPages": pages}
    })
}

fn new_address(line1: &str) -> NewAddress {
    NewAddress {
        address_line1: line1.into(),
        ..NewAddress::default()
    }
}

// ── Lists ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_address_fetch_populates_container() {
    let (server, depot) = setup().await;

    Mock::given(method("GET"))
        .and(path("/addresses"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(
            json!([address(1, "1 Dock Rd"), address(2, "2 Dock Rd"), address(3, "3 Dock Rd")]),
            1,
            25,
            3,
            1,
        )))
        .mount(&server)
        .await;

    let state = depot
        .addresses()
        .fetch(&ListParams::new(AddressFilters::default()))
        .await
        .unwrap();

    assert_eq!(state.items.len(), 3);
    assert_eq!(
        state.pagination,
        PageMeta {
            page: 1,
            limit: 25,
            total_records: 3,
            total_pages: 1
        }
    );
    assert!(!state.loading);
    assert!(state.error.is_none());
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_page() {
    let (server, depot) = setup().await;

    Mock::given(method("GET"))
        .and(path("/addresses"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(
            json!([address(1, "1 Dock Rd")]),
            1,
            25,
            30,
            2,
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/addresses"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"success": false, "message": "database unavailable"})),
        )
        .mount(&server)
        .await;

    let addresses = depot.addresses();
    addresses
        .fetch(&ListParams::new(AddressFilters::default()))
        .await
        .unwrap();

    let params = ListParams::new(AddressFilters::default()).page(ApiPage::new(2).unwrap());
    let err = addresses.fetch(&params).await.unwrap_err();
    assert!(matches!(err, CoreError::Rejected { .. }));

    let state = addresses.list().snapshot();
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.pagination.page, 1);
    assert_eq!(state.error.as_deref(), Some("database unavailable"));
    assert!(!state.loading);
}

#[tokio::test]
async fn test_activity_fetch_merges_duplicate_rows() {
    let (server, depot) = setup().await;

    let row = |qty: f64| {
        json!({
            "activityDate": "2024-05-02T14:30:00.000Z",
            "skuCode": "WID-1",
            "warehouseName": "Reno DC",
            "lotNumber": "L-1",
            "activityType": "PICK",
            "quantityChange": qty,
            "referenceNumber": "SO-9"
        })
    };

    Mock::given(method("GET"))
        .and(path("/reports/inventory-activity-logs"))
        .and(query_param("limit", "50"))
        .and(query_param("startDate", "2024-05-01T00:00:00.000Z"))
        .and(query_param("endDate", "2024-05-31T23:59:59.999Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(
            json!([row(-2.0), row(-3.0)]),
            1,
            50,
            2,
            1,
        )))
        .mount(&server)
        .await;

    let filters = ActivityLogFilters {
        range: DateRange::new(
            NaiveDate::from_ymd_opt(2024, 5, 31),
            NaiveDate::from_ymd_opt(2024, 5, 1),
        ),
        ..ActivityLogFilters::default()
    };
    let state = depot
        .reports()
        .fetch_activity(&ListParams::new(filters), true)
        .await
        .unwrap();

    assert_eq!(state.items.len(), 1);
    assert!((state.items[0].quantity_change + 5.0).abs() < f64::EPSILON);
    assert_eq!(state.pagination.total_records, 2);
}

// ── Mutations ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_applies_single_customer_id_to_all() {
    let (server, depot) = setup().await;

    Mock::given(method("POST"))
        .and(path("/addresses/add-new-addresses"))
        .and(body_json(json!([
            {"customerId": "C9", "addressLine1": "1 Dock Rd", "isDefault": false},
            {"customerId": "C9", "addressLine1": "2 Dock Rd", "isDefault": false}
        ])))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "message": "2 addresses created",
            "data": [address(10, "1 Dock Rd"), address(11, "2 Dock Rd")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let state = depot
        .addresses()
        .create(
            CreateMode::Bulk,
            vec![new_address("1 Dock Rd"), new_address("2 Dock Rd")],
            &[RecordId::from("C9")],
        )
        .await
        .unwrap();

    assert_eq!(state.data.as_ref().map(Vec::len), Some(2));
    assert_eq!(state.success, Some(true));
    assert_eq!(state.message.as_deref(), Some("2 addresses created"));
}

#[tokio::test]
async fn test_create_with_mismatched_ids_sends_nothing() {
    let (server, depot) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let err = depot
        .addresses()
        .create(
            CreateMode::Bulk,
            vec![new_address("1"), new_address("2"), new_address("3")],
            &[RecordId::from("A"), RecordId::from("B")],
        )
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::ValidationFailed { .. }));
    let state = depot.addresses().created().snapshot();
    assert_eq!(state.success, Some(false));
    assert!(state.error.is_some());
}

#[tokio::test]
async fn test_create_rejection_uses_server_message() {
    let (server, depot) = setup().await;

    Mock::given(method("POST"))
        .and(path("/customers/add-new-customers"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "success": false,
            "message": "Customer code AC-7 already exists",
            "code": "DUPLICATE"
        })))
        .mount(&server)
        .await;

    let records = vec![depot_api::NewCustomer {
        name: "Acme".into(),
        customer_code: Some("AC-7".into()),
        ..depot_api::NewCustomer::default()
    }];
    let _ = depot.customers().create(CreateMode::Single, records).await;

    let state = depot.customers().created().snapshot();
    assert_eq!(
        state.error.as_deref(),
        Some("Customer code AC-7 already exists")
    );
    // The list was never touched.
    assert!(depot.customers().list().snapshot().fetched_at.is_none());
}

// ── Exports ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_inventory_export_names_file_by_token_and_date() {
    let (server, depot) = setup().await;

    Mock::given(method("GET"))
        .and(path("/warehouse-inventory/summary/export"))
        .and(query_param("exportFormat", "csv"))
        .and(query_param("inStockOnly", "true"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/csv")
                .set_body_bytes(b"sku,onHand\nWID-1,4\n".to_vec()),
        )
        .mount(&server)
        .await;

    let filters = InventoryFilters {
        in_stock_only: true,
        ..InventoryFilters::default()
    };
    let file = depot
        .inventory()
        .export_summary(&ListParams::new(filters), ExportFormat::Csv)
        .await
        .unwrap();

    let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
    assert_eq!(file.filename, format!("warehouse-inventory-summary_{today}.csv"));
    assert_eq!(&file.bytes[..], b"sku,onHand\nWID-1,4\n");
}

#[tokio::test]
async fn test_blank_item_id_is_recorded_on_details() {
    let (server, depot) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let result = depot
        .inventory()
        .fetch_details(&RecordId::from("  "), &ListParams::new(()))
        .await;
    assert!(matches!(result, Err(CoreError::ValidationFailed { .. })));

    let details = depot.inventory().details().snapshot();
    assert_eq!(
        details.error.as_deref(),
        Some("Validation failed: an item id is required")
    );
    assert!(!details.loading);
    assert!(details.items.is_empty());
}

#[tokio::test]
async fn test_export_failure_leaves_list_error_alone() {
    let (server, depot) = setup().await;

    Mock::given(method("GET"))
        .and(path("/reports/inventory-activity-logs/export"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"error": {"message": "Date range too large"}})),
        )
        .mount(&server)
        .await;

    let result = depot
        .reports()
        .export_activity(&ListParams::new(ActivityLogFilters::default()), ExportFormat::Pdf)
        .await;
    assert!(result.is_err());

    let export = depot.reports().export_state().snapshot();
    assert_eq!(export.export_error.as_deref(), Some("Date range too large"));
    assert!(!export.exporting);
    assert!(depot.reports().activity().snapshot().error.is_none());
}

// ── Lookups ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_newer_search_wins_over_slow_older_one() {
    let (server, depot) = setup().await;

    Mock::given(method("GET"))
        .and(path("/lookups/customers"))
        .and(query_param("keyword", "ac"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(400))
                .set_body_json(json!({
                    "success": true,
                    "data": [{"value": 1, "label": "Acme (old)"}]
                })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/lookups/customers"))
        .and(query_param("keyword", "acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{"value": 1, "label": "Acme"}, {"value": 2, "label": "Acme West"}]
        })))
        .mount(&server)
        .await;

    let session = depot.lookup(LookupKind::Customers);
    let older = session.search("ac");
    let newer = async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        session.search("acme").await
    };
    let (older, newer) = tokio::join!(older, newer);

    assert_eq!(older.unwrap(), LookupOutcome::Superseded);
    assert_eq!(newer.unwrap(), LookupOutcome::Applied { options: 2 });

    let state = session.snapshot();
    assert_eq!(state.keyword.as_deref(), Some("acme"));
    assert_eq!(state.options[0].label, "Acme");
    assert!(!state.loading);
}

#[tokio::test]
async fn test_fetch_more_appends_next_offset() {
    let (server, depot) = setup().await;

    Mock::given(method("GET"))
        .and(path("/lookups/warehouses"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{"value": "W1", "label": "Reno"}, {"value": "W2", "label": "Sparks"}],
            "pagination": {"page": 1, "limit": 2, "totalRecords": 3, "totalPages": 2}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/lookups/warehouses"))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{"value": "W2", "label": "Sparks"}, {"value": "W3", "label": "Carson"}],
            "pagination": {"page": 2, "limit": 2, "totalRecords": 3, "totalPages": 2}
        })))
        .mount(&server)
        .await;

    let session = depot.lookup(LookupKind::Warehouses);
    session.load_initial().await.unwrap();
    assert!(session.snapshot().has_more);

    let outcome = session.fetch_more().await.unwrap();
    assert_eq!(outcome, LookupOutcome::Applied { options: 3 });

    let labels: Vec<String> = session
        .snapshot()
        .options
        .iter()
        .map(|o| o.label.clone())
        .collect();
    assert_eq!(labels, ["Reno", "Sparks", "Carson"]);
    assert_eq!(session.fetch_more().await.unwrap(), LookupOutcome::Exhausted);
}
