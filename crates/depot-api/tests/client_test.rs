#![allow(clippy::unwrap_used)]
// Integration tests for `DepotClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use depot_api::{
    ApiPage, DepotClient, Error, ExportFormat, Filters, ListQuery, LookupKind, LookupQuery,
    NewAddress, RecordId, Sort, SortOrder, TransportConfig,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, DepotClient) {
    let server = MockServer::start().await;
    let client = DepotClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn address(id: i64, line1: &str) -> serde_json::Value {
    json!({
        "id": id,
        "customerId": 7,
        "addressLine1": line1,
        "city": "Reno",
        "country": "US",
        "isDefault": false
    })
}

// ── List endpoints ──────────────────────────────────────────────────

#[tokio::test]
async fn test_list_addresses_page() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/addresses"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "ok",
            "data": [address(1, "1 Dock Rd"), address(2, "2 Dock Rd"), address(3, "3 Dock Rd")],
            "pagination": {"page": 1, "limit": 25, "totalRecords": 3, "totalPages": 1}
        })))
        .mount(&server)
        .await;

    let page = client.list_addresses(&ListQuery::default()).await.unwrap();

    assert_eq!(page.items.len(), 3);
    assert_eq!(page.items[0].id, RecordId::from("1"));
    assert_eq!(page.items[2].address_line1, "3 Dock Rd");
    assert_eq!(page.pagination.total_records, 3);
    assert_eq!(page.pagination.total_pages, 1);
}

#[tokio::test]
async fn test_query_serialization_on_the_wire() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [],
            "pagination": {"page": 2, "limit": 10, "totalRecords": 0, "totalPages": 0}
        })))
        .mount(&server)
        .await;

    let query = ListQuery::new(ApiPage::new(2).unwrap(), 10)
        .with_sort(Sort::new("name", SortOrder::Desc))
        .with_filters(
            Filters::new()
                .with("keyword", "acme")
                .with("customerIds", vec!["4".to_owned(), "5".to_owned()])
                .with("filters", Filters::new().with("country", "US")),
        );
    let page = client.list_customers(&query).await.unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.pagination.page_count(), 1);

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap().to_owned();
    assert_eq!(
        query,
        "page=2&limit=10&sortBy=name&sortOrder=desc&customerIds=4&customerIds=5&keyword=acme&country=US"
    );
}

#[tokio::test]
async fn test_missing_pagination_is_synthesized() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/skus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{"id": "S1", "skuCode": "WID-001"}]
        })))
        .mount(&server)
        .await;

    let page = client.list_skus(&ListQuery::default()).await.unwrap();
    assert_eq!(page.items[0].sku_code, "WID-001");
    assert_eq!(page.pagination.page, 1);
    assert_eq!(page.pagination.limit, 25);
    assert_eq!(page.pagination.total_records, 1);
    assert_eq!(page.pagination.total_pages, 1);
}

#[tokio::test]
async fn test_inventory_details_path() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/warehouse-inventory/summary/ITM-9/details"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{"itemId": "ITM-9", "lotNumber": "L-1", "quantity": 12.5}],
            "pagination": {"page": 1, "limit": 25, "totalRecords": 1, "totalPages": 1}
        })))
        .mount(&server)
        .await;

    let page = client
        .inventory_details(&RecordId::from("ITM-9"), &ListQuery::default())
        .await
        .unwrap();
    assert_eq!(page.items[0].lot_number.as_deref(), Some("L-1"));
    assert!((page.items[0].quantity - 12.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_empty_item_id_fails_before_request() {
    let (server, client) = setup().await;

    let result = client
        .inventory_details(&RecordId::from(" "), &ListQuery::default())
        .await;
    assert!(matches!(result, Err(Error::InvalidRequest(_))));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ── Mutations ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_addresses_normalizes_single_object() {
    let (server, client) = setup().await;

    let new = NewAddress {
        customer_id: Some(RecordId::from("7")),
        address_line1: "9 Pier Ave".into(),
        ..NewAddress::default()
    };

    Mock::given(method("POST"))
        .and(path("/addresses/add-new-addresses"))
        .and(body_json(json!([
            {"customerId": "7", "addressLine1": "9 Pier Ave", "isDefault": false}
        ])))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "message": "Address created",
            "data": address(10, "9 Pier Ave")
        })))
        .mount(&server)
        .await;

    let result = client.create_addresses(&[new]).await.unwrap();
    assert!(result.success);
    assert_eq!(result.message.as_deref(), Some("Address created"));
    assert_eq!(result.data.len(), 1);
    assert_eq!(result.data[0].id, RecordId::from("10"));
}

#[tokio::test]
async fn test_create_with_empty_body_is_rejected() {
    let (_server, client) = setup().await;
    let result = client.create_addresses(&[]).await;
    assert!(matches!(result, Err(Error::InvalidRequest(_))));
}

// ── Errors ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_structured_error_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/customers/add-new-customers"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "success": false,
            "message": "Customer code already exists",
            "code": "DUPLICATE",
            "type": "ValidationError"
        })))
        .mount(&server)
        .await;

    let result = client
        .create_customers(&[depot_api::NewCustomer {
            name: "Acme".into(),
            ..Default::default()
        }])
        .await;

    match result {
        Err(Error::Api {
            status,
            message,
            code,
            kind,
        }) => {
            assert_eq!(status, 422);
            assert_eq!(message, "Customer code already exists");
            assert_eq!(code.as_deref(), Some("DUPLICATE"));
            assert_eq!(kind.as_deref(), Some("ValidationError"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_unsuccessful_envelope_with_200() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/boms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "BOM module disabled"
        })))
        .mount(&server)
        .await;

    let result = client.list_boms(&ListQuery::default()).await;
    assert!(
        matches!(&result, Err(Error::Unsuccessful { message }) if message == "BOM module disabled"),
        "got: {result:?}"
    );
}

#[tokio::test]
async fn test_unauthorized() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/addresses"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.list_addresses(&ListQuery::default()).await;
    assert!(matches!(result, Err(Error::Unauthorized)));
}

#[tokio::test]
async fn test_html_error_falls_back_to_status_text() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/addresses"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = client
        .list_addresses(&ListQuery::default())
        .await
        .unwrap_err();
    assert!(err.is_transient());
    assert_eq!(err.server_message(), Some("502 Bad Gateway"));
}

#[tokio::test]
async fn test_garbage_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/addresses"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client.list_addresses(&ListQuery::default()).await;
    assert!(matches!(result, Err(Error::Deserialization { .. })));
}

// ── Exports ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_export_returns_raw_bytes() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/reports/inventory-activity-logs/export"))
        .and(query_param("exportFormat", "csv"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/csv")
                .insert_header(
                    "content-disposition",
                    "attachment; filename=\"activity.csv\"",
                )
                .set_body_bytes(b"sku,qty\nWID-001,4\n".to_vec()),
        )
        .mount(&server)
        .await;

    let query = ListQuery::new(ApiPage::new(3).unwrap(), 50).for_export(ExportFormat::Csv);
    let payload = client.export_activity_logs(&query).await.unwrap();

    assert_eq!(&payload.bytes[..], b"sku,qty\nWID-001,4\n");
    assert_eq!(payload.content_type.as_deref(), Some("text/csv"));
    assert_eq!(payload.suggested_filename.as_deref(), Some("activity.csv"));

    let requests = server.received_requests().await.unwrap();
    let url = &requests[0].url;
    assert!(url.query_pairs().all(|(k, _)| k != "page" && k != "limit"));
}

#[tokio::test]
async fn test_export_json_body_is_an_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/warehouse-inventory/summary/export"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Too many rows to export"
        })))
        .mount(&server)
        .await;

    let query = ListQuery::default().for_export(ExportFormat::Pdf);
    let err = client.export_inventory_summary(&query).await.unwrap_err();
    assert_eq!(err.server_message(), Some("Too many rows to export"));
}

// ── Lookups ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_lookup_has_more_from_page_size() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/lookups/warehouses"))
        .and(query_param("keyword", "east"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                {"value": 1, "label": "East 1"},
                {"value": 2, "label": "East 2"}
            ]
        })))
        .mount(&server)
        .await;

    let page = client
        .lookup(
            LookupKind::Warehouses,
            &LookupQuery {
                keyword: Some("east".into()),
                limit: 2,
                offset: 0,
            },
        )
        .await
        .unwrap();

    assert_eq!(page.options.len(), 2);
    assert_eq!(page.options[1].label, "East 2");
    assert!(page.has_more);
}

// ── Transport ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_bearer_token_and_request_id_headers() {
    let server = MockServer::start().await;
    let transport =
        TransportConfig::default().with_token(secrecy::SecretString::from("t0ken".to_string()));
    let client = DepotClient::new(&server.uri(), &transport).unwrap();

    Mock::given(method("GET"))
        .and(path("/batch-registry"))
        .and(header("authorization", "Bearer t0ken"))
        .and(header_exists("x-request-id"))
        .respond_with(|_: &Request| {
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": []}))
        })
        .mount(&server)
        .await;

    let page = client
        .list_batch_registry(&ListQuery::default())
        .await
        .unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.pagination.total_pages, 0);
}

#[tokio::test]
async fn test_stalled_body_reports_configured_timeout() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    // Headers arrive at once; the body never finishes.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0_u8; 1024];
        let _ = socket.read(&mut buf).await;
        socket
            .write_all(
                b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\n\
                  content-length: 64\r\n\r\n{\"success\": true, ",
            )
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_secs(10)).await;
        drop(socket);
    });

    let transport = TransportConfig {
        timeout: std::time::Duration::from_secs(1),
        ..TransportConfig::default()
    };
    let client = DepotClient::new(&format!("http://{addr}"), &transport).unwrap();

    let err = client
        .list_customers(&ListQuery::default())
        .await
        .unwrap_err();
    assert!(
        matches!(err, Error::Timeout { timeout_secs: 1 }),
        "expected a 1s timeout, got: {err:?}"
    );
}
