//! Integration tests for the document-version workflow.

mod helpers;

use axum::http::StatusCode;
use axum::http::header::LOCATION;
use serde_json::json;
use sha2::{Digest, Sha256};

use regdesk_storage::providers::memory::path_from_url;

use helpers::{OFFICER, PDF_TEXT, TestApp};

const PDF_BYTES: &[u8] = b"%PDF-1.7 anti-money laundering policy";

#[tokio::test]
async fn test_upload_url_is_under_version_prefix() {
    let app = TestApp::new();
    let doc = app.create_document().await;
    let version = app.create_version(doc.id(), "Policy text").await;

    let ticket = app
        .upload_url(version.id(), "AML Policy.pdf", "application/pdf", 2048)
        .await;

    assert_eq!(ticket.status, StatusCode::OK, "{:?}", ticket.body);
    let prefix = format!(
        "{}/{}/{}/",
        doc.str("businessUnitId"),
        doc.id(),
        version.id()
    );
    assert!(ticket.str("path").starts_with(&prefix), "{}", ticket.str("path"));
    assert_eq!(ticket.str("bucketId"), app.config.storage.bucket);
    assert!(!ticket.str("token").is_empty());
    assert!(!ticket.str("signedUrl").is_empty());
    assert_eq!(app.storage.signed_uploads().await.len(), 1);
}

#[tokio::test]
async fn test_upload_url_out_of_bounds_signs_nothing() {
    let app = TestApp::new();
    let doc = app.create_document().await;
    let version = app.create_version(doc.id(), "Policy text").await;
    let over_limit = app.config.storage.max_upload_size_bytes as i64 + 1;

    for (mime, size) in [
        ("text/plain", 1024),
        ("application/pdf", 0),
        ("application/pdf", over_limit),
    ] {
        let response = app
            .upload_url(version.id(), "policy.pdf", mime, size)
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{mime} {size}");
        assert_eq!(response.str("error"), "VALIDATION_ERROR");
    }

    assert!(app.storage.signed_uploads().await.is_empty());
    assert_eq!(app.audit_for(version.id()).await.len(), 1);
}

#[tokio::test]
async fn test_confirm_then_download_resolves_to_key() {
    let app = TestApp::new();
    let doc = app.create_document().await;
    let version = app.create_version(doc.id(), "Policy text").await;
    let key = app.attach(version.id(), "policy.pdf", PDF_BYTES).await;

    let signed = app
        .send(
            "GET",
            &format!(
                "/api/document-versions?action=download&id={}",
                version.id()
            ),
            None,
            &[("accept", "application/json")],
        )
        .await;
    assert_eq!(signed.status, StatusCode::OK);
    assert_eq!(signed.body["expiresIn"], 3600);
    let url = signed.str("url");
    assert_eq!(
        path_from_url(&app.config.storage.bucket, url).as_deref(),
        Some(key.as_str())
    );
    assert_eq!(
        app.storage.object_at_url(url).await.as_deref(),
        Some(PDF_BYTES)
    );

    let redirect = app
        .send(
            "GET",
            &format!(
                "/api/document-versions?action=download&mode=download&id={}",
                version.id()
            ),
            None,
            &[],
        )
        .await;
    assert_eq!(redirect.status, StatusCode::FOUND);
    let location = redirect.headers[LOCATION].to_str().unwrap();
    assert_eq!(
        path_from_url(&app.config.storage.bucket, location).as_deref(),
        Some(key.as_str())
    );
    assert!(location.contains("download=policy.pdf"));
}

#[tokio::test]
async fn test_confirm_replaces_previous_attachment() {
    let app = TestApp::new();
    let doc = app.create_document().await;
    let version = app.create_version(doc.id(), "Policy text").await;

    let first = app.attach(version.id(), "v1.pdf", PDF_BYTES).await;
    let second = app.attach(version.id(), "v2.pdf", PDF_BYTES).await;

    assert_ne!(first, second);
    assert_eq!(app.storage.removed().await, vec![first]);

    let fetched = app
        .request(
            "GET",
            &format!("/api/document-versions?id={}", version.id()),
            None,
        )
        .await;
    assert_eq!(fetched.body["pdfS3Key"], json!(second));
    assert_eq!(fetched.body["pdfFileName"], "v2.pdf");
}

#[tokio::test]
async fn test_confirm_rejects_foreign_path() {
    let app = TestApp::new();
    let doc = app.create_document().await;
    let version = app.create_version(doc.id(), "Policy text").await;

    let response = app
        .request(
            "POST",
            &format!(
                "/api/document-versions?action=upload-confirm&id={}",
                version.id()
            ),
            Some(json!({
                "storagePath": "other-unit/other-doc/other-version/1-x.pdf",
                "fileName": "x.pdf",
                "fileSize": 10,
            })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_one_audit_entry_per_mutation() {
    let app = TestApp::new();
    let doc = app.create_document().await;
    let version = app.create_version(doc.id(), "Policy text").await;
    let id = version.id();

    let updated = app
        .request(
            "PUT",
            &format!("/api/document-versions?id={id}"),
            Some(json!({ "changeReason": "Annual review" })),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK, "{:?}", updated.body);

    let status = app
        .request(
            "PUT",
            &format!("/api/document-versions?action=status&id={id}"),
            Some(json!({ "status": "in_review" })),
        )
        .await;
    assert_eq!(status.status, StatusCode::OK, "{:?}", status.body);
    assert_eq!(status.str("status"), "in_review");

    app.attach(id, "policy.pdf", PDF_BYTES).await;

    let removed = app
        .request(
            "DELETE",
            &format!("/api/document-versions?action=pdf&id={id}"),
            None,
        )
        .await;
    assert_eq!(removed.status, StatusCode::NO_CONTENT);

    let entries = app.audit_for(id).await;
    let actions: Vec<&str> = entries
        .iter()
        .map(|e| e["action"].as_str().unwrap())
        .collect();
    assert_eq!(
        actions,
        vec![
            "pdf_deleted",
            "pdf_uploaded",
            "status_changed",
            "updated",
            "created"
        ]
    );
    assert!(entries.iter().all(|e| e["actor"] == OFFICER));
    assert!(
        entries
            .iter()
            .all(|e| e["entityType"] == "document_version")
    );

    let doc_entries = app.audit_for(doc.id()).await;
    assert_eq!(doc_entries.len(), 1);
    assert_eq!(doc_entries[0]["action"], "created");
    assert_eq!(doc_entries[0]["entityType"], "document");
}

#[tokio::test]
async fn test_missing_actor_is_recorded_as_system() {
    let app = TestApp::new();
    let doc = app.create_document().await;

    let response = app
        .send(
            "POST",
            "/api/document-versions",
            Some(json!({ "documentId": doc.id(), "version": "2.0" })),
            &[],
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.str("createdBy"), "system");

    let entries = app.audit_for(response.id()).await;
    assert_eq!(entries[0]["actor"], "system");
}

#[tokio::test]
async fn test_delete_version_not_allowed() {
    let app = TestApp::new();
    let doc = app.create_document().await;
    let version = app.create_version(doc.id(), "Policy text").await;
    let uri = format!("/api/document-versions?id={}", version.id());

    let response = app.request("DELETE", &uri, None).await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.str("error"), "METHOD_NOT_ALLOWED");

    let still_there = app.request("GET", &uri, None).await;
    assert_eq!(still_there.status, StatusCode::OK);
    assert_eq!(still_there.id(), version.id());
}

#[tokio::test]
async fn test_delete_pdf_without_attachment_is_not_found() {
    let app = TestApp::new();
    let doc = app.create_document().await;
    let version = app.create_version(doc.id(), "Policy text").await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/document-versions?action=pdf&id={}", version.id()),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(app.storage.removed().await.is_empty());
}

#[tokio::test]
async fn test_to_markdown_for_pdf() {
    let app = TestApp::new();
    let doc = app.create_document().await;
    let version = app.create_version(doc.id(), "Policy text").await;
    app.attach(version.id(), "policy.pdf", PDF_BYTES).await;

    let response = app
        .request(
            "GET",
            &format!(
                "/api/document-versions?action=to-markdown&id={}",
                version.id()
            ),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.str("markdown"), PDF_TEXT);
    assert_eq!(app.fetcher.calls(), 1);
}

#[tokio::test]
async fn test_to_markdown_unsupported_extension_fetches_nothing() {
    let app = TestApp::new();
    let doc = app.create_document().await;
    let version = app.create_version(doc.id(), "Policy text").await;
    app.attach(version.id(), "scan.xyz", PDF_BYTES).await;

    let response = app
        .request(
            "GET",
            &format!(
                "/api/document-versions?action=to-markdown&id={}",
                version.id()
            ),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(
        response
            .str("message")
            .to_lowercase()
            .contains("unsupported file type")
    );
    assert_eq!(app.fetcher.calls(), 0);
}

#[tokio::test]
async fn test_content_hash_prefix_in_created_audit() {
    let app = TestApp::new();
    let doc = app.create_document().await;
    let version = app.create_version(doc.id(), "Policy text").await;

    let expected = hex::encode(Sha256::digest(b"Policy text"));
    assert_eq!(version.str("contentHash"), expected);

    let entries = app.audit_for(version.id()).await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["action"], "created");
    assert!(
        entries[0]["details"]
            .as_str()
            .unwrap()
            .contains(&expected[..12])
    );
}

#[tokio::test]
async fn test_unknown_version_is_not_found() {
    let app = TestApp::new();
    let response = app
        .request(
            "GET",
            &format!("/api/document-versions?id={}", uuid::Uuid::new_v4()),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.str("error"), "NOT_FOUND");
}
