//! Bearer-token authentication and permission guard
//!
//! `Authorized<P>` resolves the caller's role from the `Authorization`
//! header and checks it holds `P::PERMISSION` before the handler body runs.
//! Missing or unknown token is 401; a known token without the permission
//! is 403.

use std::marker::PhantomData;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use showcase_core::{Permission, Role};

use super::error::ApiError;
use crate::state::AppState;

/// Type-level permission required by a route
pub trait RequiredPermission: Send + Sync + 'static {
    const PERMISSION: Permission;
}

/// Marker types for each route permission
pub mod perm {
    use super::{Permission, RequiredPermission};

    pub struct GetFeatures;
    pub struct ManageFeatures;
    pub struct GetContactForms;
    pub struct ManageContactForms;

    impl RequiredPermission for GetFeatures {
        const PERMISSION: Permission = Permission::GetFeatures;
    }

    impl RequiredPermission for ManageFeatures {
        const PERMISSION: Permission = Permission::ManageFeatures;
    }

    impl RequiredPermission for GetContactForms {
        const PERMISSION: Permission = Permission::GetContactForms;
    }

    impl RequiredPermission for ManageContactForms {
        const PERMISSION: Permission = Permission::ManageContactForms;
    }
}

/// Caller proven to hold permission `P`
pub struct Authorized<P> {
    pub role: Role,
    _permission: PhantomData<fn() -> P>,
}

impl<P> FromRequestParts<Arc<AppState>> for Authorized<P>
where
    P: RequiredPermission,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let role = bearer_token(parts)
            .and_then(|token| state.role_for(token))
            .ok_or(ApiError::Unauthorized)?;

        if !role.has(P::PERMISSION) {
            tracing::debug!(%role, permission = %P::PERMISSION, "permission denied");
            return Err(ApiError::Forbidden);
        }

        Ok(Self {
            role,
            _permission: PhantomData,
        })
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/features");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn bearer_token_parsing() {
        assert_eq!(bearer_token(&parts(Some("Bearer abc"))), Some("abc"));
        assert_eq!(bearer_token(&parts(Some("Basic abc"))), None);
        assert_eq!(bearer_token(&parts(Some("Bearer "))), None);
        assert_eq!(bearer_token(&parts(None)), None);
    }

    #[test]
    fn markers_map_to_permissions() {
        assert_eq!(perm::GetFeatures::PERMISSION, Permission::GetFeatures);
        assert_eq!(
            perm::ManageContactForms::PERMISSION,
            Permission::ManageContactForms
        );
    }
}
