// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{
        AuthResponse, Claims, CreateUserPayload, Role, UpdateUserPayload, User,
    },
};

// Tokens valem 8 horas; cada requisição protegida revalida assinatura e expiração.
pub const TOKEN_VALIDADE_HORAS: i64 = 8;

/// Monta os claims do token para um usuário, com expiração de 8 horas.
pub fn montar_claims(user: &User, agora: DateTime<Utc>) -> Claims {
    let expira_em = agora + chrono::Duration::hours(TOKEN_VALIDADE_HORAS);
    Claims {
        sub: user.id,
        username: user.username.clone(),
        role: user.role,
        iat: agora.timestamp() as usize,
        exp: expira_em.timestamp() as usize,
    }
}

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String) -> Self {
        Self {
            user_repo,
            jwt_secret,
        }
    }

    /// Hashing de senha fora do executor async.
    pub async fn hash_password(password: &str) -> Result<String, AppError> {
        let password_clone = password.to_owned();
        let hashed = tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
        Ok(hashed)
    }

    pub async fn login_user(&self, username: &str, password: &str) -> Result<AuthResponse, AppError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.create_token(&user)?;
        Ok(AuthResponse {
            token,
            role: user.role,
            username: user.username,
        })
    }

    pub fn create_token(&self, user: &User) -> Result<String, AppError> {
        let claims = montar_claims(user, Utc::now());
        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }

    // Sem sessão no servidor: o token carrega tudo que as rotas precisam.
    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(token_data.claims)
    }

    // =========================================================================
    //  ADMINISTRAÇÃO DE USUÁRIOS
    // =========================================================================

    pub async fn listar_usuarios(&self) -> Result<Vec<User>, AppError> {
        self.user_repo.list_all().await
    }

    pub async fn criar_usuario(&self, payload: &CreateUserPayload) -> Result<User, AppError> {
        let hashed = Self::hash_password(&payload.password).await?;
        self.user_repo
            .create(
                self.user_repo.pool(),
                &payload.username,
                &hashed,
                payload.role.unwrap_or(Role::User),
                payload.phone.as_deref(),
            )
            .await
    }

    pub async fn atualizar_usuario(
        &self,
        id: Uuid,
        payload: &UpdateUserPayload,
    ) -> Result<User, AppError> {
        let hashed = match &payload.password {
            Some(password) => Some(Self::hash_password(password).await?),
            None => None,
        };
        self.user_repo
            .update(id, hashed.as_deref(), payload.phone.as_deref())
            .await
    }

    pub async fn atualizar_role(&self, id: Uuid, role: Role) -> Result<User, AppError> {
        self.user_repo.update_role(id, role).await
    }

    pub async fn remover_usuario(&self, id: Uuid) -> Result<(), AppError> {
        self.user_repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usuario_teste() -> User {
        User {
            id: Uuid::new_v4(),
            username: "maria.caixa".to_string(),
            password_hash: "$2b$12$xxxxxxxxxxxxxxxxxxxxxx".to_string(),
            role: Role::Admin,
            phone: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn claims_expiram_em_oito_horas() {
        let user = usuario_teste();
        let agora = Utc::now();
        let claims = montar_claims(&user, agora);

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.username, "maria.caixa");
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.exp - claims.iat, 8 * 3600);
    }

    #[test]
    fn token_assinado_e_validado_com_o_mesmo_segredo() {
        let claims = montar_claims(&usuario_teste(), Utc::now());
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"segredo-de-teste"),
        )
        .unwrap();

        let decodificado = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"segredo-de-teste"),
            &Validation::default(),
        )
        .unwrap();
        assert_eq!(decodificado.claims.username, claims.username);

        // Segredo errado nunca valida.
        let errado = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"outro-segredo"),
            &Validation::default(),
        );
        assert!(errado.is_err());
    }
}
