//! HTTP Basic authentication against the configured user directory.

use super::error::ApiError;
use crate::domain::user::{Role, UserAccount};
use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct UserDirectory {
    users: HashMap<String, UserAccount>,
}

impl UserDirectory {
    pub fn new(users: impl IntoIterator<Item = UserAccount>) -> Self {
        Self {
            users: users.into_iter().map(|u| (u.name.clone(), u)).collect(),
        }
    }

    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Principal, ApiError> {
        let (name, password) = basic_credentials(headers).ok_or(ApiError::Unauthorized)?;
        match self.users.get(&name) {
            Some(user) if user.password == password => Ok(Principal { user: user.clone() }),
            _ => Err(ApiError::Unauthorized),
        }
    }
}

fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = String::from_utf8(STANDARD.decode(encoded.trim()).ok()?).ok()?;
    let (name, password) = decoded.split_once(':')?;
    Some((name.to_owned(), password.to_owned()))
}

/// The authenticated caller of a request.
#[derive(Debug, Clone)]
pub struct Principal {
    user: UserAccount,
}

impl Principal {
    pub fn name(&self) -> &str {
        &self.user.name
    }

    pub fn require(&self, role: Role) -> Result<(), ApiError> {
        if self.user.has_role(role) {
            Ok(())
        } else {
            Err(ApiError::Forbidden(role))
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Principal
where
    Arc<UserDirectory>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Arc::<UserDirectory>::from_ref(state).authenticate(&parts.headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn directory() -> UserDirectory {
        UserDirectory::new(UserAccount::parse_list("admin:pass:admin+user,user0:pass:user").unwrap())
    }

    fn headers(credentials: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let value = format!("Basic {}", STANDARD.encode(credentials));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(&value).unwrap());
        headers
    }

    #[test]
    fn test_valid_credentials() {
        let principal = directory().authenticate(&headers("user0:pass")).unwrap();

        assert_eq!(principal.name(), "user0");
        assert!(principal.require(Role::User).is_ok());
        assert!(matches!(
            principal.require(Role::Admin),
            Err(ApiError::Forbidden(Role::Admin))
        ));
    }

    #[test]
    fn test_rejected_credentials() {
        let dir = directory();

        assert!(matches!(dir.authenticate(&HeaderMap::new()), Err(ApiError::Unauthorized)));
        assert!(matches!(dir.authenticate(&headers("admin:nope")), Err(ApiError::Unauthorized)));
        assert!(matches!(dir.authenticate(&headers("ghost:pass")), Err(ApiError::Unauthorized)));

        let mut bearer = HeaderMap::new();
        bearer.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert!(matches!(dir.authenticate(&bearer), Err(ApiError::Unauthorized)));
    }
}
