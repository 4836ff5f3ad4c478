//! CRUD handlers shared by the requirement, finding, knowledge-base and
//! risk registers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::Validate;

use regdesk_entity::{Finding, KnowledgeArticle, Requirement, Risk};
use regdesk_service::{RegisterEntity, RegisterService, RequestContext};

use crate::dto::request::{
    CreateArticleRequest, CreateFindingRequest, CreateRequirementRequest, CreateRiskRequest,
    RegisterParams, UpdateArticleRequest, UpdateFindingRequest, UpdateRequirementRequest,
    UpdateRiskRequest,
};
use crate::dto::response::RiskView;
use crate::error::ApiResult;
use crate::extractors::{Actor, ApiQuery, PaginationParams, ValidatedJson, require_uuid};
use crate::state::AppState;

/// Binds a register entity to its DTOs and service.
pub trait RegisterResource: RegisterEntity {
    /// Create body.
    type Create: DeserializeOwned + Validate + Send + 'static;
    /// Update body; absent fields are left unchanged.
    type Patch: DeserializeOwned + Validate + Send + 'static;
    /// Response body.
    type View: Serialize + From<Self>;

    /// The service managing this register.
    fn service(state: &AppState) -> &RegisterService<Self>;

    /// Build a new row.
    fn build(req: Self::Create, ctx: &RequestContext) -> Self;

    /// Apply an update body.
    fn apply(&mut self, patch: Self::Patch);
}

/// GET /api/{register}?id=... or ?page=&perPage=
pub async fn query<R: RegisterResource>(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<RegisterParams>,
    ApiQuery(pagination): ApiQuery<PaginationParams>,
) -> ApiResult<Response> {
    let service = R::service(&state);
    if let Some(id) = params.id.as_deref() {
        let id = require_uuid("id", Some(id))?;
        let row = service.get(id).await?;
        return Ok(Json(R::View::from(row)).into_response());
    }

    let page = service
        .list(pagination.into_page_request())
        .await?
        .map(R::View::from);
    Ok(Json(page).into_response())
}

/// POST /api/{register}
pub async fn create<R: RegisterResource>(
    State(state): State<AppState>,
    actor: Actor,
    ValidatedJson(req): ValidatedJson<R::Create>,
) -> ApiResult<(StatusCode, Json<R::View>)> {
    let row = R::service(&state).create(R::build(req, &actor)).await?;
    Ok((StatusCode::CREATED, Json(R::View::from(row))))
}

/// PUT /api/{register}?id=...
pub async fn update<R: RegisterResource>(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<RegisterParams>,
    ValidatedJson(patch): ValidatedJson<R::Patch>,
) -> ApiResult<Json<R::View>> {
    let id = require_uuid("id", params.id.as_deref())?;
    let row = R::service(&state)
        .update(id, move |row| row.apply(patch))
        .await?;
    Ok(Json(R::View::from(row)))
}

/// DELETE /api/{register}?id=...
pub async fn remove<R: RegisterResource>(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<RegisterParams>,
) -> ApiResult<StatusCode> {
    let id = require_uuid("id", params.id.as_deref())?;
    R::service(&state).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn replace<T>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}

fn replace_opt<T>(field: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *field = value;
    }
}

impl RegisterResource for Requirement {
    type Create = CreateRequirementRequest;
    type Patch = UpdateRequirementRequest;
    type View = Requirement;

    fn service(state: &AppState) -> &RegisterService<Self> {
        &state.requirement_service
    }

    fn build(req: Self::Create, _ctx: &RequestContext) -> Self {
        let now = Utc::now();
        Requirement {
            id: Uuid::new_v4(),
            reference: req.reference,
            title: req.title,
            description: req.description,
            source: req.source,
            category: req.category,
            status: req.status.unwrap_or_default(),
            owner: req.owner,
            due_date: req.due_date,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, p: Self::Patch) {
        replace(&mut self.reference, p.reference);
        replace(&mut self.title, p.title);
        replace_opt(&mut self.description, p.description);
        replace(&mut self.source, p.source);
        replace_opt(&mut self.category, p.category);
        replace(&mut self.status, p.status);
        replace_opt(&mut self.owner, p.owner);
        replace_opt(&mut self.due_date, p.due_date);
    }
}

impl RegisterResource for Finding {
    type Create = CreateFindingRequest;
    type Patch = UpdateFindingRequest;
    type View = Finding;

    fn service(state: &AppState) -> &RegisterService<Self> {
        &state.finding_service
    }

    fn build(req: Self::Create, ctx: &RequestContext) -> Self {
        let now = Utc::now();
        Finding {
            id: Uuid::new_v4(),
            title: req.title,
            description: req.description,
            severity: req.severity,
            status: req.status.unwrap_or_default(),
            requirement_id: req.requirement_id,
            raised_by: ctx.actor.clone(),
            due_date: req.due_date,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, p: Self::Patch) {
        replace(&mut self.title, p.title);
        replace_opt(&mut self.description, p.description);
        replace(&mut self.severity, p.severity);
        replace(&mut self.status, p.status);
        replace_opt(&mut self.requirement_id, p.requirement_id);
        replace_opt(&mut self.due_date, p.due_date);
    }
}

impl RegisterResource for KnowledgeArticle {
    type Create = CreateArticleRequest;
    type Patch = UpdateArticleRequest;
    type View = KnowledgeArticle;

    fn service(state: &AppState) -> &RegisterService<Self> {
        &state.knowledge_service
    }

    fn build(req: Self::Create, ctx: &RequestContext) -> Self {
        let now = Utc::now();
        KnowledgeArticle {
            id: Uuid::new_v4(),
            title: req.title,
            body: req.body,
            category: req.category,
            tags: req.tags,
            published: req.published,
            created_by: ctx.actor.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, p: Self::Patch) {
        replace(&mut self.title, p.title);
        replace(&mut self.body, p.body);
        replace_opt(&mut self.category, p.category);
        replace(&mut self.tags, p.tags);
        replace(&mut self.published, p.published);
    }
}

impl RegisterResource for Risk {
    type Create = CreateRiskRequest;
    type Patch = UpdateRiskRequest;
    type View = RiskView;

    fn service(state: &AppState) -> &RegisterService<Self> {
        &state.risk_service
    }

    fn build(req: Self::Create, _ctx: &RequestContext) -> Self {
        let now = Utc::now();
        Risk {
            id: Uuid::new_v4(),
            title: req.title,
            description: req.description,
            category: req.category,
            likelihood: req.likelihood,
            impact: req.impact,
            owner: req.owner,
            status: req.status.unwrap_or_default(),
            mitigation: req.mitigation,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, p: Self::Patch) {
        replace(&mut self.title, p.title);
        replace_opt(&mut self.description, p.description);
        replace_opt(&mut self.category, p.category);
        replace(&mut self.likelihood, p.likelihood);
        replace(&mut self.impact, p.impact);
        replace_opt(&mut self.owner, p.owner);
        replace(&mut self.status, p.status);
        replace_opt(&mut self.mitigation, p.mitigation);
    }
}
