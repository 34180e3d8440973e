use aide::OperationInput;
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
    RequestPartsExt,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use sqlx::{Pool, Postgres};

use crate::{
    database::{AppState, DatabaseConnection},
    error::{ServiceError, ServiceResult},
    models::{ProductAuthPolicy, Role},
    token::{Session, TokenService},
};

/// Per request view on the application state.
///
/// The bearer token is verified during extraction, but a database connection
/// is only acquired once a handler asks for it, after its own checks passed.
pub struct RequestState {
    pool: Pool<Postgres>,
    pub session: ServiceResult<Session>,
    pub product_auth_policy: ProductAuthPolicy,
    pub tokens: TokenService,
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestState
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let session = resolve_session(parts, &state.tokens).await;

        Ok(Self {
            pool: state.pool,
            session,
            product_auth_policy: state.product_auth_policy,
            tokens: state.tokens,
        })
    }
}

impl OperationInput for RequestState {}

/// Session of an authenticated caller.
///
/// Rejects during extraction, so the token is checked before any body is read.
#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = RequestState::from_request_parts(parts, state).await?;
        state.session_require().cloned()
    }
}

impl OperationInput for Session {}

/// Caller admitted to the product routes under the configured policy.
pub struct ProductAccess;

#[async_trait]
impl<S> FromRequestParts<S> for ProductAccess
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = RequestState::from_request_parts(parts, state).await?;
        state.session_require_product_access()?;
        Ok(ProductAccess)
    }
}

impl OperationInput for ProductAccess {}

pub async fn resolve_session(parts: &mut Parts, tokens: &TokenService) -> ServiceResult<Session> {
    if !parts.headers.contains_key(header::AUTHORIZATION) {
        return Err(ServiceError::MissingToken);
    }

    let TypedHeader(Authorization(bearer)) = parts
        .extract::<TypedHeader<Authorization<Bearer>>>()
        .await
        .map_err(|_| ServiceError::InvalidToken)?;

    tokens.verify(bearer.token())
}

impl RequestState {
    pub async fn db(&self) -> ServiceResult<DatabaseConnection> {
        DatabaseConnection::acquire(&self.pool).await
    }

    pub fn session_require(&self) -> ServiceResult<&Session> {
        self.session.as_ref().map_err(|err| err.clone())
    }

    pub fn session_require_role(&self, roles: &[Role]) -> ServiceResult<&Session> {
        let session = self.session_require()?;

        if roles.contains(&session.role) {
            Ok(session)
        } else {
            log::warn!(
                "User {} with role '{}' was denied access",
                session.user_id,
                session.role
            );
            Err(ServiceError::Forbidden)
        }
    }

    pub fn session_require_product_access(&self) -> ServiceResult<()> {
        match self.product_auth_policy {
            ProductAuthPolicy::Public => Ok(()),
            ProductAuthPolicy::Token => self.session_require().map(|_| ()),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;
    use sqlx::postgres::PgPoolOptions;

    use super::*;

    fn parts(authorization: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/pedidos");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    fn request_state(session: ServiceResult<Session>, policy: ProductAuthPolicy) -> RequestState {
        RequestState {
            pool: PgPoolOptions::new()
                .connect_lazy("postgres://localhost/orderdesk")
                .unwrap(),
            session,
            product_auth_policy: policy,
            tokens: TokenService::from_secret(b"secret"),
        }
    }

    fn app_state(policy: ProductAuthPolicy) -> AppState {
        AppState::from_pool(
            PgPoolOptions::new()
                .connect_lazy("postgres://localhost/orderdesk")
                .unwrap(),
            TokenService::from_secret(b"secret"),
            policy,
        )
    }

    fn session(role: Role) -> Session {
        Session {
            user_id: 1,
            role,
        }
    }

    #[tokio::test]
    async fn test_missing_header() {
        let tokens = TokenService::from_secret(b"secret");
        let result = resolve_session(&mut parts(None), &tokens).await;
        assert_eq!(result, Err(ServiceError::MissingToken));
    }

    #[tokio::test]
    async fn test_header_without_bearer_token() {
        let tokens = TokenService::from_secret(b"secret");
        let token = tokens.issue(1, &Role::Admin).unwrap();

        let result = resolve_session(&mut parts(Some(&token)), &tokens).await;
        assert_eq!(result, Err(ServiceError::InvalidToken));

        let result = resolve_session(&mut parts(Some("Basic Zm9vOmJhcg==")), &tokens).await;
        assert_eq!(result, Err(ServiceError::InvalidToken));
    }

    #[tokio::test]
    async fn test_invalid_bearer_token() {
        let tokens = TokenService::from_secret(b"secret");
        let result = resolve_session(&mut parts(Some("Bearer garbage")), &tokens).await;
        assert_eq!(result, Err(ServiceError::InvalidToken));
    }

    #[tokio::test]
    async fn test_valid_bearer_token() {
        let tokens = TokenService::from_secret(b"secret");
        let token = tokens.issue(5, &Role::Waiter).unwrap();

        let session = resolve_session(&mut parts(Some(&format!("Bearer {token}"))), &tokens)
            .await
            .unwrap();
        assert_eq!(session.user_id, 5);
        assert_eq!(session.role, Role::Waiter);
    }

    #[tokio::test]
    async fn test_session_require_role() {
        let allowed = [Role::Admin, Role::Waiter];

        let state = request_state(Ok(session(Role::Customer)), ProductAuthPolicy::Public);
        assert_eq!(
            state.session_require_role(&allowed).err(),
            Some(ServiceError::Forbidden)
        );

        for role in allowed.iter() {
            let state = request_state(Ok(session(role.clone())), ProductAuthPolicy::Public);
            assert!(state.session_require_role(&allowed).is_ok());
        }

        let state = request_state(Err(ServiceError::MissingToken), ProductAuthPolicy::Public);
        assert_eq!(
            state.session_require_role(&allowed).err(),
            Some(ServiceError::MissingToken)
        );
    }

    #[tokio::test]
    async fn test_product_access_policy() {
        let state = request_state(Err(ServiceError::MissingToken), ProductAuthPolicy::Public);
        assert!(state.session_require_product_access().is_ok());

        let state = request_state(Err(ServiceError::MissingToken), ProductAuthPolicy::Token);
        assert_eq!(
            state.session_require_product_access(),
            Err(ServiceError::MissingToken)
        );

        let state = request_state(Ok(session(Role::Customer)), ProductAuthPolicy::Token);
        assert!(state.session_require_product_access().is_ok());
    }

    #[tokio::test]
    async fn test_session_extractor() {
        let state = app_state(ProductAuthPolicy::Public);

        assert_eq!(
            Session::from_request_parts(&mut parts(None), &state).await,
            Err(ServiceError::MissingToken)
        );
        assert_eq!(
            Session::from_request_parts(&mut parts(Some("Bearer garbage")), &state).await,
            Err(ServiceError::InvalidToken)
        );

        let token = state.tokens.issue(9, &Role::Admin).unwrap();
        let authorization = format!("Bearer {token}");
        assert_eq!(
            Session::from_request_parts(&mut parts(Some(&authorization)), &state).await,
            Ok(Session {
                user_id: 9,
                role: Role::Admin,
            })
        );
    }

    #[tokio::test]
    async fn test_product_access_extractor() {
        let public = app_state(ProductAuthPolicy::Public);
        assert!(ProductAccess::from_request_parts(&mut parts(None), &public)
            .await
            .is_ok());

        let guarded = app_state(ProductAuthPolicy::Token);
        assert_eq!(
            ProductAccess::from_request_parts(&mut parts(None), &guarded)
                .await
                .err(),
            Some(ServiceError::MissingToken)
        );

        let token = guarded.tokens.issue(2, &Role::Customer).unwrap();
        let authorization = format!("Bearer {token}");
        assert!(
            ProductAccess::from_request_parts(&mut parts(Some(&authorization)), &guarded)
                .await
                .is_ok()
        );
    }
}
