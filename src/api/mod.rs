//! HTTP API module for the payroll engine.
//!
//! This module exposes the ledgers and the payroll engine as a JSON API.
//! The caller's identity is trusted from upstream headers.

mod handlers;
mod identity;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use identity::{Actor, USER_ID_HEADER, USER_ROLE_HEADER};
pub use request::{
    CreateOvertimeRequest, CreatePayrollRequest, CreateReimbursementRequest, UserQuery,
};
pub use response::{ApiError, ApiErrorResponse, TakeHomePayResponse};
pub use state::AppState;
