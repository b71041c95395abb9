// src/middleware/rbac.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::marker::PhantomData;

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{Claims, Role},
};

/// 1. O trait que define a lista de papéis aceitos por uma rota
pub trait RoleGate: Send + Sync + 'static {
    fn permitidos() -> &'static [Role];
}

pub fn role_permitido(role: Role, permitidos: &[Role]) -> bool {
    permitidos.contains(&role)
}

/// 2. O extractor (guardião). Falha fechado: sem claims -> 401,
/// papel fora da lista -> 403.
pub struct RequireRole<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleGate,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // A. Claims já injetados pelo auth_guard
        let claims = match parts.extensions.get::<Claims>() {
            Some(claims) => claims.clone(),
            // B. Rota fora do guard: valida o Bearer aqui mesmo
            None => {
                let app_state = AppState::from_ref(state);
                let token = parts
                    .headers
                    .get("Authorization")
                    .and_then(|value| value.to_str().ok())
                    .and_then(|header| header.strip_prefix("Bearer "))
                    .ok_or(AppError::InvalidToken)?;
                app_state.auth_service.validate_token(token)?
            }
        };

        if !role_permitido(claims.role, T::permitidos()) {
            return Err(AppError::InsufficientRole);
        }

        Ok(RequireRole(PhantomData))
    }
}

// ---
// DEFINIÇÃO DOS GATES
// ---

pub struct AdminOnly;
impl RoleGate for AdminOnly {
    fn permitidos() -> &'static [Role] {
        &[Role::Admin, Role::Superadmin]
    }
}

pub struct SuperadminOnly;
impl RoleGate for SuperadminOnly {
    fn permitidos() -> &'static [Role] {
        &[Role::Superadmin]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_e_superadmin_passam_no_gate_de_admin() {
        assert!(role_permitido(Role::Admin, AdminOnly::permitidos()));
        assert!(role_permitido(Role::Superadmin, AdminOnly::permitidos()));
        assert!(!role_permitido(Role::User, AdminOnly::permitidos()));
    }

    #[test]
    fn so_superadmin_passa_no_gate_de_superadmin() {
        assert!(role_permitido(Role::Superadmin, SuperadminOnly::permitidos()));
        assert!(!role_permitido(Role::Admin, SuperadminOnly::permitidos()));
        assert!(!role_permitido(Role::User, SuperadminOnly::permitidos()));
    }
}
