use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::{
        common::SuccessResponse,
        member::{
            CreateMembersRequest, CreateMembersResponse, MemberListQuery, MemberSummary,
            UpdateMemberRequest,
        },
    },
    error::AppError,
    routes::extract::{JsonBody, PathParam, QueryParams},
    services::member_service,
    state::SharedState,
};

/// Member management endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/members/create", post(create_members))
        .route("/members/get", get(list_members))
        .route("/members/update/{id}", put(update_member))
        .route("/members/delete/{id}", delete(delete_member))
}

/// Create a batch of members, skipping names that already exist.
#[utoipa::path(
    post,
    path = "/api/members/create",
    tag = "members",
    request_body = CreateMembersRequest,
    responses(
        (status = 201, description = "Members created", body = CreateMembersResponse),
        (status = 400, description = "Empty batch, invalid entry or unknown team"),
        (status = 409, description = "Every member already exists")
    )
)]
pub async fn create_members(
    State(state): State<SharedState>,
    JsonBody(payload): JsonBody<CreateMembersRequest>,
) -> Result<(StatusCode, Json<CreateMembersResponse>), AppError> {
    let created = member_service::create_members(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// List members, optionally restricted to one team.
#[utoipa::path(
    get,
    path = "/api/members/get",
    tag = "members",
    params(MemberListQuery),
    responses((status = 200, description = "Members", body = [MemberSummary]))
)]
pub async fn list_members(
    State(state): State<SharedState>,
    QueryParams(query): QueryParams<MemberListQuery>,
) -> Result<Json<Vec<MemberSummary>>, AppError> {
    Ok(Json(member_service::list_members(&state, query).await?))
}

/// Update a member's name, role or team.
#[utoipa::path(
    put,
    path = "/api/members/update/{id}",
    tag = "members",
    params(("id" = Uuid, Path, description = "Identifier of the member")),
    request_body = UpdateMemberRequest,
    responses(
        (status = 200, description = "Updated member", body = MemberSummary),
        (status = 400, description = "Blank field or unknown team"),
        (status = 404, description = "Unknown member")
    )
)]
pub async fn update_member(
    State(state): State<SharedState>,
    PathParam(id): PathParam<Uuid>,
    JsonBody(payload): JsonBody<UpdateMemberRequest>,
) -> Result<Json<MemberSummary>, AppError> {
    Ok(Json(member_service::update_member(&state, id, payload).await?))
}

/// Delete a member and remove it from its team.
#[utoipa::path(
    delete,
    path = "/api/members/delete/{id}",
    tag = "members",
    params(("id" = Uuid, Path, description = "Identifier of the member")),
    responses(
        (status = 200, description = "Member deleted", body = SuccessResponse),
        (status = 404, description = "Unknown member")
    )
)]
pub async fn delete_member(
    State(state): State<SharedState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<SuccessResponse>, AppError> {
    Ok(Json(member_service::delete_member(&state, id).await?))
}
