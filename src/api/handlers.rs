//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints. Each
//! handler resolves the caller, checks the role, reads `now` from the
//! clock and delegates to a ledger or the payroll engine.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{
    AttendanceRecord, OvertimeId, OvertimeRequest, PayrollId, PayrollPeriod, Payslip,
    PayslipSummary, ReimbursementId, ReimbursementRequest, Role, UserId,
};

use super::identity::Actor;
use super::request::{
    CreateOvertimeRequest, CreatePayrollRequest, CreateReimbursementRequest, UserQuery,
};
use super::response::{ApiError, ApiErrorResponse, TakeHomePayResponse};
use super::state::AppState;

type ApiResult<T> = Result<(StatusCode, Json<T>), ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/attendances", get(list_attendances))
        .route("/attendances/checkin", post(check_in))
        .route("/attendances/checkout", post(check_out))
        .route("/overtimes", post(create_overtime).get(list_overtimes))
        .route("/overtimes/:id/approve", post(approve_overtime))
        .route(
            "/reimbursements",
            post(create_reimbursement).get(list_reimbursements),
        )
        .route("/reimbursements/:id/approve", post(approve_reimbursement))
        .route("/payrolls", post(create_payroll).get(list_payrolls))
        .route("/payrolls/:id/roll", post(roll_payroll))
        .route("/payrolls/:id/payslips", get(payslip_summaries))
        .route("/payrolls/:id/payslips/:user_id", get(get_payslip))
        .route("/payrolls/:id/take-home-pay", get(take_home_pay))
        .with_state(state)
}

fn engine_failure(
    correlation_id: Uuid,
    operation: &'static str,
) -> impl Fn(EngineError) -> ApiErrorResponse {
    move |err| {
        warn!(
            correlation_id = %correlation_id,
            operation,
            kind = ?err.kind(),
            error = %err,
            "Request rejected"
        );
        err.into()
    }
}

fn json_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    })
}

fn path_param<T>(path: Result<Path<T>, PathRejection>) -> Result<T, ApiErrorResponse> {
    path.map(|Path(value)| value)
        .map_err(|rejection| ApiErrorResponse::bad_request(rejection.body_text()))
}

fn user_query(query: Result<Query<UserQuery>, QueryRejection>) -> Result<UserQuery, ApiErrorResponse> {
    query
        .map(|Query(value)| value)
        .map_err(|rejection| ApiErrorResponse::bad_request(rejection.body_text()))
}

/// Handler for POST /attendances/checkin.
async fn check_in(State(state): State<AppState>, actor: Actor) -> ApiResult<AttendanceRecord> {
    let correlation_id = Uuid::new_v4();
    actor.require_employee()?;
    info!(correlation_id = %correlation_id, user_id = %actor.user_id, "Processing check-in");

    let record = state
        .attendance()
        .check_in(actor.user_id, state.now())
        .await
        .map_err(engine_failure(correlation_id, "check_in"))?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Handler for POST /attendances/checkout.
async fn check_out(State(state): State<AppState>, actor: Actor) -> ApiResult<AttendanceRecord> {
    let correlation_id = Uuid::new_v4();
    actor.require_employee()?;
    info!(correlation_id = %correlation_id, user_id = %actor.user_id, "Processing check-out");

    let record = state
        .attendance()
        .check_out(actor.user_id, state.now())
        .await
        .map_err(engine_failure(correlation_id, "check_out"))?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Handler for GET /attendances.
async fn list_attendances(
    State(state): State<AppState>,
    actor: Actor,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> ApiResult<Vec<AttendanceRecord>> {
    let correlation_id = Uuid::new_v4();
    let user_id = actor.readable_user(user_query(query)?.user_id)?;

    let records = state
        .attendance()
        .list_by_user(user_id)
        .await
        .map_err(engine_failure(correlation_id, "list_attendances"))?;
    Ok((StatusCode::OK, Json(records)))
}

/// Handler for POST /overtimes.
async fn create_overtime(
    State(state): State<AppState>,
    actor: Actor,
    payload: Result<Json<CreateOvertimeRequest>, JsonRejection>,
) -> ApiResult<OvertimeRequest> {
    let correlation_id = Uuid::new_v4();
    actor.require_employee()?;
    let body = json_body(correlation_id, payload)?;
    info!(correlation_id = %correlation_id, user_id = %actor.user_id, "Processing overtime submission");

    let fail = engine_failure(correlation_id, "create_overtime");
    let overtime = body.into_new_overtime(actor.user_id).map_err(&fail)?;
    let request = state
        .overtime()
        .create_overtime(overtime, state.now())
        .await
        .map_err(&fail)?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// Handler for POST /overtimes/:id/approve.
async fn approve_overtime(
    State(state): State<AppState>,
    actor: Actor,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<OvertimeRequest> {
    let correlation_id = Uuid::new_v4();
    actor.require_admin()?;
    let id = OvertimeId::new(path_param(path)?);
    info!(correlation_id = %correlation_id, overtime_id = %id, approver = %actor.user_id, "Processing overtime approval");

    let request = state
        .overtime()
        .approve_overtime(id, actor.user_id, state.now())
        .await
        .map_err(engine_failure(correlation_id, "approve_overtime"))?;
    Ok((StatusCode::OK, Json(request)))
}

/// Handler for GET /overtimes.
async fn list_overtimes(
    State(state): State<AppState>,
    actor: Actor,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> ApiResult<Vec<OvertimeRequest>> {
    let correlation_id = Uuid::new_v4();
    let user_id = actor.readable_user(user_query(query)?.user_id)?;

    let requests = state
        .overtime()
        .list_by_user(user_id)
        .await
        .map_err(engine_failure(correlation_id, "list_overtimes"))?;
    Ok((StatusCode::OK, Json(requests)))
}

/// Handler for POST /reimbursements.
async fn create_reimbursement(
    State(state): State<AppState>,
    actor: Actor,
    payload: Result<Json<CreateReimbursementRequest>, JsonRejection>,
) -> ApiResult<ReimbursementRequest> {
    let correlation_id = Uuid::new_v4();
    actor.require_employee()?;
    let body = json_body(correlation_id, payload)?;
    info!(correlation_id = %correlation_id, user_id = %actor.user_id, "Processing reimbursement submission");

    let request = state
        .reimbursements()
        .create_reimbursement(body.into_new_reimbursement(actor.user_id), state.now())
        .await
        .map_err(engine_failure(correlation_id, "create_reimbursement"))?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// Handler for POST /reimbursements/:id/approve.
async fn approve_reimbursement(
    State(state): State<AppState>,
    actor: Actor,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<ReimbursementRequest> {
    let correlation_id = Uuid::new_v4();
    actor.require_admin()?;
    let id = ReimbursementId::new(path_param(path)?);
    info!(correlation_id = %correlation_id, reimbursement_id = %id, approver = %actor.user_id, "Processing reimbursement approval");

    let request = state
        .reimbursements()
        .approve_reimbursement(id, actor.user_id, state.now())
        .await
        .map_err(engine_failure(correlation_id, "approve_reimbursement"))?;
    Ok((StatusCode::OK, Json(request)))
}

/// Handler for GET /reimbursements.
async fn list_reimbursements(
    State(state): State<AppState>,
    actor: Actor,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> ApiResult<Vec<ReimbursementRequest>> {
    let correlation_id = Uuid::new_v4();
    let user_id = actor.readable_user(user_query(query)?.user_id)?;

    let requests = state
        .reimbursements()
        .list_by_user(user_id)
        .await
        .map_err(engine_failure(correlation_id, "list_reimbursements"))?;
    Ok((StatusCode::OK, Json(requests)))
}

/// Handler for POST /payrolls.
async fn create_payroll(
    State(state): State<AppState>,
    actor: Actor,
    payload: Result<Json<CreatePayrollRequest>, JsonRejection>,
) -> ApiResult<PayrollPeriod> {
    let correlation_id = Uuid::new_v4();
    actor.require_admin()?;
    let body = json_body(correlation_id, payload)?;
    info!(correlation_id = %correlation_id, name = %body.name, "Processing payroll creation");

    let period = state
        .payroll()
        .create_payroll(body.into_new_payroll(actor.user_id), state.now())
        .await
        .map_err(engine_failure(correlation_id, "create_payroll"))?;
    Ok((StatusCode::CREATED, Json(period)))
}

/// Handler for GET /payrolls.
async fn list_payrolls(State(state): State<AppState>, actor: Actor) -> ApiResult<Vec<PayrollPeriod>> {
    let correlation_id = Uuid::new_v4();
    actor.require_admin()?;

    let periods = state
        .payroll()
        .list_payrolls()
        .await
        .map_err(engine_failure(correlation_id, "list_payrolls"))?;
    Ok((StatusCode::OK, Json(periods)))
}

/// Handler for POST /payrolls/:id/roll.
async fn roll_payroll(
    State(state): State<AppState>,
    actor: Actor,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<PayrollPeriod> {
    let correlation_id = Uuid::new_v4();
    actor.require_admin()?;
    let id = PayrollId::new(path_param(path)?);
    info!(correlation_id = %correlation_id, payroll_id = %id, "Processing payroll roll");

    let period = state
        .payroll()
        .roll_payroll(id, actor.user_id, state.now())
        .await
        .map_err(engine_failure(correlation_id, "roll_payroll"))?;
    Ok((StatusCode::OK, Json(period)))
}

/// Handler for GET /payrolls/:id/payslips/:user_id.
async fn get_payslip(
    State(state): State<AppState>,
    actor: Actor,
    path: Result<Path<(u64, u64)>, PathRejection>,
) -> ApiResult<Payslip> {
    let correlation_id = Uuid::new_v4();
    let (payroll_id, user_id) = path_param(path)?;
    let (payroll_id, user_id) = (PayrollId::new(payroll_id), UserId::new(user_id));
    if actor.role == Role::Employee && actor.user_id != user_id {
        return Err(ApiErrorResponse::forbidden(
            "Employees may only read their own payslip",
        ));
    }
    info!(correlation_id = %correlation_id, payroll_id = %payroll_id, user_id = %user_id, "Generating payslip");

    let payslip = state
        .payroll()
        .generate_payslip(payroll_id, user_id)
        .await
        .map_err(engine_failure(correlation_id, "generate_payslip"))?;
    info!(
        correlation_id = %correlation_id,
        take_home_pay = %payslip.take_home_pay,
        "Payslip generated"
    );
    Ok((StatusCode::OK, Json(payslip)))
}

/// Handler for GET /payrolls/:id/payslips.
async fn payslip_summaries(
    State(state): State<AppState>,
    actor: Actor,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<Vec<PayslipSummary>> {
    let correlation_id = Uuid::new_v4();
    actor.require_admin()?;
    let payroll_id = PayrollId::new(path_param(path)?);

    let summaries = state
        .payroll()
        .payslip_summaries(payroll_id)
        .await
        .map_err(engine_failure(correlation_id, "payslip_summaries"))?;
    info!(
        correlation_id = %correlation_id,
        payroll_id = %payroll_id,
        employees = summaries.len(),
        "Payslip summaries generated"
    );
    Ok((StatusCode::OK, Json(summaries)))
}

/// Handler for GET /payrolls/:id/take-home-pay.
async fn take_home_pay(
    State(state): State<AppState>,
    actor: Actor,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<TakeHomePayResponse> {
    let correlation_id = Uuid::new_v4();
    actor.require_admin()?;
    let payroll_id = PayrollId::new(path_param(path)?);

    let total_take_home_pay = state
        .payroll()
        .total_take_home_pay(payroll_id)
        .await
        .map_err(engine_failure(correlation_id, "total_take_home_pay"))?;
    Ok((
        StatusCode::OK,
        Json(TakeHomePayResponse {
            payroll_id,
            total_take_home_pay,
        }),
    ))
}
