//! Identity of the signed-in user, decoded from the session token.

use std::future::{Ready, ready};

use actix_identity::Identity;
use actix_web::{Error, FromRequest, HttpRequest, dev::Payload, error::ErrorUnauthorized, web};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::models::config::ServerConfig;

/// Claims carried by the token the auth service stores in the identity cookie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthenticatedUser {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
    pub exp: usize,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Decodes and validates an HS256 token.
    pub fn from_jwt(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<AuthenticatedUser>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )?;
        Ok(data.claims)
    }

    pub fn to_jwt(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::new(Algorithm::HS256),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(config) = req.app_data::<web::Data<ServerConfig>>() else {
            log::error!("Server config is not registered");
            return ready(Err(ErrorUnauthorized("Unauthorized")));
        };

        let token = match Identity::extract(req).into_inner() {
            Ok(identity) => identity.id(),
            Err(_) => return ready(Err(ErrorUnauthorized("Unauthorized"))),
        };

        let result = token
            .map_err(|e| ErrorUnauthorized(e.to_string()))
            .and_then(|token| {
                AuthenticatedUser::from_jwt(&token, &config.secret).map_err(|e| {
                    log::warn!("Rejected session token: {e}");
                    ErrorUnauthorized("Unauthorized")
                })
            });

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(exp: usize) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "7".into(),
            email: "staff@example.edu.vn".into(),
            name: "Staff".into(),
            roles: vec!["admission".into(), "admission_admin".into()],
            exp,
        }
    }

    fn far_future() -> usize {
        4_102_444_800 // 2100-01-01
    }

    #[test]
    fn token_round_trip_keeps_claims() {
        let token = user(far_future()).to_jwt("secret").expect("token");

        let decoded = AuthenticatedUser::from_jwt(&token, "secret").expect("valid token");

        assert_eq!(decoded, user(far_future()));
        assert!(decoded.has_role("admission_admin"));
        assert!(!decoded.has_role("applicant"));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = user(far_future()).to_jwt("secret").expect("token");

        assert!(AuthenticatedUser::from_jwt(&token, "other").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = user(1_000).to_jwt("secret").expect("token");

        assert!(AuthenticatedUser::from_jwt(&token, "secret").is_err());
    }
}
