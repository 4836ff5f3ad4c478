//! Integration tests for documents, registers, AI jobs, conversion and health.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use regdesk_entity::AiJobStatus;

use helpers::{OFFICER, PDF_TEXT, TestApp};

#[tokio::test]
async fn test_documents_listed_by_business_unit() {
    let app = TestApp::new();
    let unit = Uuid::new_v4();
    for title in ["KYC Procedure", "Sanctions Policy"] {
        let created = app
            .request(
                "POST",
                "/api/documents",
                Some(json!({ "businessUnitId": unit, "title": title, "category": "policy" })),
            )
            .await;
        assert_eq!(created.status, StatusCode::CREATED);
    }
    app.create_document().await;

    let page = app
        .request(
            "GET",
            &format!("/api/documents?businessUnitId={unit}&perPage=10"),
            None,
        )
        .await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.body["totalItems"], 2);
    assert_eq!(page.body["items"][0]["title"], "Sanctions Policy");
}

#[tokio::test]
async fn test_document_validation_message() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/documents",
            Some(json!({ "businessUnitId": Uuid::new_v4(), "title": "", "category": "policy" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.str("error"), "VALIDATION_ERROR");
    assert!(response.str("message").contains("title is required"));
}

#[tokio::test]
async fn test_document_with_versions_cannot_be_deleted() {
    let app = TestApp::new();
    let doc = app.create_document().await;
    app.create_version(doc.id(), "Policy text").await;

    let response = app
        .request("DELETE", &format!("/api/documents?id={}", doc.id()), None)
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let empty = app.create_document().await;
    let response = app
        .request("DELETE", &format!("/api/documents?id={}", empty.id()), None)
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let gone = app
        .request("GET", &format!("/api/documents?id={}", empty.id()), None)
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);

    let actions: Vec<String> = app
        .audit_for(empty.id())
        .await
        .iter()
        .map(|e| e["action"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(actions, vec!["deleted", "created"]);
}

#[tokio::test]
async fn test_risk_register_crud_with_score() {
    let app = TestApp::new();
    let created = app
        .request(
            "POST",
            "/api/risks",
            Some(json!({ "title": "Sanctions screening gap", "likelihood": 3, "impact": 4 })),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{:?}", created.body);
    assert_eq!(created.body["score"], 12);
    let id = created.id();

    let updated = app
        .request(
            "PUT",
            &format!("/api/risks?id={id}"),
            Some(json!({ "likelihood": 5 })),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["score"], 20);
    assert_eq!(updated.str("title"), "Sanctions screening gap");

    let list = app.request("GET", "/api/risks", None).await;
    assert_eq!(list.body["totalItems"], 1);
    assert_eq!(list.body["items"][0]["score"], 20);

    let removed = app
        .request("DELETE", &format!("/api/risks?id={id}"), None)
        .await;
    assert_eq!(removed.status, StatusCode::NO_CONTENT);
    let gone = app
        .request("GET", &format!("/api/risks?id={id}"), None)
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_risk_likelihood_out_of_range() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/risks",
            Some(json!({ "title": "Outsourcing", "likelihood": 9, "impact": 1 })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(
        response
            .str("message")
            .contains("likelihood must be between 1 and 5")
    );
}

#[tokio::test]
async fn test_finding_records_reporter() {
    let app = TestApp::new();
    let requirement = app
        .request(
            "POST",
            "/api/requirements",
            Some(json!({
                "reference": "AMLR-12",
                "title": "Customer due diligence",
                "source": "AML Regulation",
            })),
        )
        .await;
    assert_eq!(requirement.status, StatusCode::CREATED, "{:?}", requirement.body);

    let finding = app
        .request(
            "POST",
            "/api/findings",
            Some(json!({
                "title": "CDD files incomplete",
                "severity": "high",
                "requirementId": requirement.id(),
            })),
        )
        .await;
    assert_eq!(finding.status, StatusCode::CREATED, "{:?}", finding.body);
    assert_eq!(finding.str("raisedBy"), OFFICER);
    assert_eq!(finding.body["requirementId"], json!(requirement.id()));
}

#[tokio::test]
async fn test_knowledge_article_update_without_id() {
    let app = TestApp::new();
    let response = app
        .request(
            "PUT",
            "/api/knowledge-base",
            Some(json!({ "title": "Escalation matrix" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.str("message").contains("id is required"));
}

#[tokio::test]
async fn test_ai_job_lifecycle() {
    let app = TestApp::new();
    let entity = Uuid::new_v4();

    let job = app
        .request(
            "POST",
            "/api/ai-jobs",
            Some(json!({ "jobType": "gap_analysis", "entityId": entity })),
        )
        .await;
    assert_eq!(job.status, StatusCode::CREATED, "{:?}", job.body);
    assert_eq!(job.str("status"), "pending");
    let id = job.id();

    let listed = app
        .request("GET", &format!("/api/ai-jobs?entityId={entity}"), None)
        .await;
    assert_eq!(listed.body.as_array().map(Vec::len), Some(1));

    let cancelled = app
        .request("POST", &format!("/api/ai-jobs?action=cancel&id={id}"), None)
        .await;
    assert_eq!(cancelled.status, StatusCode::OK);
    assert_eq!(cancelled.str("status"), "cancelled");

    let again = app
        .request("POST", &format!("/api/ai-jobs?action=cancel&id={id}"), None)
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_ai_job_progress_from_runner_is_visible() {
    let app = TestApp::new();
    let job = app
        .request(
            "POST",
            "/api/ai-jobs",
            Some(json!({ "jobType": "policy_summary", "entityId": Uuid::new_v4() })),
        )
        .await;
    let id = job.id();

    let mut stored: regdesk_entity::AiJob = serde_json::from_value(job.body).unwrap();
    stored.status = AiJobStatus::Processing;
    stored.progress_message = Some("Reading requirements".to_string());
    app.jobs.put(stored).await;

    let fetched = app
        .request("GET", &format!("/api/ai-jobs?id={id}"), None)
        .await;
    assert_eq!(fetched.str("status"), "processing");
    assert_eq!(fetched.str("progressMessage"), "Reading requirements");
}

#[tokio::test]
async fn test_invalid_job_type_rejected() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/ai-jobs",
            Some(json!({ "jobType": "drop table", "entityId": Uuid::new_v4() })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_convert_url() {
    let app = TestApp::new();
    app.storage
        .put_object("inbox/circular.pdf", &b"%PDF-1.4 circular"[..])
        .await;
    let url = format!("memory://{}/inbox/circular.pdf", app.config.storage.bucket);

    let response = app
        .request(
            "POST",
            "/api/markitdown-convert",
            Some(json!({ "url": url, "filename": "circular.pdf" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.str("markdown"), PDF_TEXT);
}

#[tokio::test]
async fn test_convert_bare_filename_as_pdf() {
    let app = TestApp::new();
    app.storage
        .put_object("inbox/circular-2024-07", &b"%PDF-1.7 circular"[..])
        .await;
    let url = format!("memory://{}/inbox/circular-2024-07", app.config.storage.bucket);

    let response = app
        .request(
            "POST",
            "/api/markitdown-convert",
            Some(json!({ "url": url, "filename": "circular-2024-07" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.str("markdown"), PDF_TEXT);
    assert_eq!(app.fetcher.calls(), 1);
}

#[tokio::test]
async fn test_convert_requires_url_and_known_type() {
    let app = TestApp::new();

    let missing = app
        .request("POST", "/api/markitdown-convert", Some(json!({})))
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);

    let unknown = app
        .request(
            "POST",
            "/api/markitdown-convert",
            Some(json!({ "url": "memory://x/a.xyz", "filename": "a.xyz" })),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown.str("error"), "UNSUPPORTED");
    assert_eq!(app.fetcher.calls(), 0);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.str("status"), "ok");
    assert_eq!(response.str("database"), "not_configured");
}
