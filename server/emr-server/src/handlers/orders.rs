use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use billing_engine::MedicationType;
use medication_orders::{MedicationOrder, NewOrder, OrderFilter, OrderStatus};

use crate::error::{api_success, ApiError, ApiResponse};
use crate::server::EmrServer;
use crate::types::pagination::PaginationParams;
use crate::validation::RequestValidation;
use crate::{validate_field, validate_required, validate_uuid};

/// Create medication order request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub patient_id: Uuid,
    pub medication: MedicationType,
    #[schema(value_type = String, example = "80")]
    pub dose_mg: Decimal,
    pub prescriber: String,
    pub instructions: Option<String>,
}

impl RequestValidation for CreateOrderRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_uuid!(self.patient_id, "Patient ID is required");
        validate_required!(self.prescriber, "Prescriber is required");
        validate_field!(
            self.dose_mg,
            self.dose_mg > Decimal::ZERO,
            "Dose must be greater than zero"
        );
        Ok(())
    }
}

/// Approve order request carrying the reviewing clinician's signature
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApproveOrderRequest {
    #[schema(example = "Dr. Chen")]
    pub signed_by: String,
    #[schema(example = "MD")]
    pub credentials: Option<String>,
}

impl RequestValidation for ApproveOrderRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_required!(self.signed_by, "Signer name is required");
        Ok(())
    }
}

/// Deny order request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DenyOrderRequest {
    #[schema(example = "Dose exceeds induction protocol")]
    pub reason: String,
}

impl RequestValidation for DenyOrderRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_required!(self.reason, "Denial reason is required");
        Ok(())
    }
}

/// List orders query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListOrdersParams {
    pub status: Option<OrderStatus>,
    pub patient_id: Option<Uuid>,
    pub medication: Option<MedicationType>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// Create a pending medication order
#[utoipa::path(
    post,
    path = crate::routes::paths::api_v1::ORDERS,
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = MedicationOrder),
        (status = 400, description = "Invalid request")
    ),
    tag = "orders"
)]
pub async fn create_order(
    State(server): State<EmrServer>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MedicationOrder>>), ApiError> {
    req.validate()?;

    let order = server
        .orders
        .create(NewOrder {
            patient_id: req.patient_id,
            medication: req.medication,
            dose_mg: req.dose_mg,
            prescriber: req.prescriber,
            instructions: req.instructions,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(api_success(order))))
}

/// List orders, newest first
#[utoipa::path(
    get,
    path = crate::routes::paths::api_v1::ORDERS,
    responses(
        (status = 200, description = "Orders retrieved", body = Vec<MedicationOrder>)
    ),
    params(ListOrdersParams),
    tag = "orders"
)]
pub async fn list_orders(
    State(server): State<EmrServer>,
    Query(params): Query<ListOrdersParams>,
) -> Result<Json<ApiResponse<Vec<MedicationOrder>>>, ApiError> {
    let filter = OrderFilter {
        status: params.status,
        patient_id: params.patient_id,
        medication: params.medication,
    };

    let orders = server.orders.list(&filter).await?;
    let total_count = orders.len() as i64;
    let page: Vec<MedicationOrder> = orders
        .into_iter()
        .skip(params.pagination.offset())
        .take(params.pagination.limit())
        .collect();

    Ok(Json(params.pagination.wrap_response(page, total_count)))
}

/// Fetch one order by id
#[utoipa::path(
    get,
    path = crate::routes::paths::api_v1::ORDER_BY_ID,
    responses(
        (status = 200, description = "Order retrieved", body = MedicationOrder),
        (status = 404, description = "Order not found")
    ),
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    tag = "orders"
)]
pub async fn get_order(
    State(server): State<EmrServer>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MedicationOrder>>, ApiError> {
    let order = server.orders.get(id).await?;
    Ok(Json(api_success(order)))
}

/// Approve a pending order
#[utoipa::path(
    post,
    path = crate::routes::paths::api_v1::ORDER_APPROVE,
    request_body = ApproveOrderRequest,
    responses(
        (status = 200, description = "Order approved", body = MedicationOrder),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order already decided")
    ),
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    tag = "orders"
)]
pub async fn approve_order(
    State(server): State<EmrServer>,
    Path(id): Path<Uuid>,
    Json(req): Json<ApproveOrderRequest>,
) -> Result<Json<ApiResponse<MedicationOrder>>, ApiError> {
    req.validate()?;

    let order = server
        .orders
        .approve(id, &req.signed_by, req.credentials)
        .await?;
    Ok(Json(api_success(order)))
}

/// Deny a pending order
#[utoipa::path(
    post,
    path = crate::routes::paths::api_v1::ORDER_DENY,
    request_body = DenyOrderRequest,
    responses(
        (status = 200, description = "Order denied", body = MedicationOrder),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order already decided")
    ),
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    tag = "orders"
)]
pub async fn deny_order(
    State(server): State<EmrServer>,
    Path(id): Path<Uuid>,
    Json(req): Json<DenyOrderRequest>,
) -> Result<Json<ApiResponse<MedicationOrder>>, ApiError> {
    req.validate()?;

    let order = server.orders.deny(id, &req.reason).await?;
    Ok(Json(api_success(order)))
}
