//! Trusted caller identity.
//!
//! Authentication happens upstream. The gateway forwards the authenticated
//! user in the `x-user-id` and `x-user-role` headers and this module only
//! reads them.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};

use crate::models::{Role, UserId};

use super::response::ApiErrorResponse;

/// Header carrying the acting user's id.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the acting user's role.
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// The authenticated caller of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    /// The acting user.
    pub user_id: UserId,
    /// The acting user's role.
    pub role: Role,
}

impl Actor {
    /// Fails with 403 unless the caller is an admin.
    pub fn require_admin(&self) -> Result<(), ApiErrorResponse> {
        match self.role {
            Role::Admin => Ok(()),
            Role::Employee => Err(ApiErrorResponse::forbidden("Admin role required")),
        }
    }

    /// Fails with 403 unless the caller is an employee.
    pub fn require_employee(&self) -> Result<(), ApiErrorResponse> {
        match self.role {
            Role::Employee => Ok(()),
            Role::Admin => Err(ApiErrorResponse::forbidden("Employee role required")),
        }
    }

    /// Resolves whose records the caller may read.
    ///
    /// Employees may only read their own; admins must name a user.
    pub fn readable_user(&self, requested: Option<u64>) -> Result<UserId, ApiErrorResponse> {
        match (self.role, requested.map(UserId::new)) {
            (Role::Employee, None) => Ok(self.user_id),
            (Role::Employee, Some(user_id)) if user_id == self.user_id => Ok(user_id),
            (Role::Employee, Some(_)) => Err(ApiErrorResponse::forbidden(
                "Employees may only read their own records",
            )),
            (Role::Admin, Some(user_id)) => Ok(user_id),
            (Role::Admin, None) => Err(ApiErrorResponse::bad_request(
                "Query parameter 'user_id' is required",
            )),
        }
    }

    fn from_headers(headers: &HeaderMap) -> Result<Self, ApiErrorResponse> {
        let user_id = header_value(headers, USER_ID_HEADER)?
            .parse::<u64>()
            .map(UserId::new)
            .map_err(|_| ApiErrorResponse::unauthorized("Invalid x-user-id header"))?;
        let role = header_value(headers, USER_ROLE_HEADER)?
            .parse::<Role>()
            .map_err(|message| ApiErrorResponse::unauthorized(message))?;

        Ok(Self { user_id, role })
    }
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str, ApiErrorResponse> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .ok_or_else(|| ApiErrorResponse::unauthorized(format!("Missing {} header", name)))
}

#[async_trait]
impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = ApiErrorResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Actor::from_headers(&parts.headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode};

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_reads_identity_headers() {
        let actor =
            Actor::from_headers(&headers(&[("x-user-id", "7"), ("x-user-role", "Employee")]))
                .unwrap();
        assert_eq!(actor.user_id, UserId::new(7));
        assert_eq!(actor.role, Role::Employee);
    }

    #[test]
    fn test_missing_or_bad_headers_are_unauthorized() {
        for pairs in [
            vec![("x-user-role", "admin")],
            vec![("x-user-id", "7")],
            vec![("x-user-id", "seven"), ("x-user-role", "admin")],
            vec![("x-user-id", "7"), ("x-user-role", "root")],
        ] {
            let err = Actor::from_headers(&headers(&pairs)).unwrap_err();
            assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_readable_user_rules() {
        let employee = Actor {
            user_id: UserId::new(2),
            role: Role::Employee,
        };
        let admin = Actor {
            user_id: UserId::new(1),
            role: Role::Admin,
        };

        assert_eq!(employee.readable_user(None).unwrap(), UserId::new(2));
        assert_eq!(employee.readable_user(Some(2)).unwrap(), UserId::new(2));
        assert_eq!(
            employee.readable_user(Some(3)).unwrap_err().status,
            StatusCode::FORBIDDEN
        );
        assert_eq!(admin.readable_user(Some(3)).unwrap(), UserId::new(3));
        assert_eq!(
            admin.readable_user(None).unwrap_err().status,
            StatusCode::BAD_REQUEST
        );
        assert!(admin.require_employee().is_err());
        assert!(employee.require_admin().is_err());
    }
}
