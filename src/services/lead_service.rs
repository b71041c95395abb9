// src/services/lead_service.rs

use rand::Rng;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{LeadRepository, LicenseRepository, UserRepository},
    models::{
        auth::{Role, User},
        leads::{
            DemoUserResponse, Lead, NovoLeadPayload, PendingUser, RegisterPayload, ResetKind,
            ResetPayload, ResetRequest,
        },
    },
    services::{
        auth::AuthService,
        license_service::{gerar_chave_ativacao, TRIAL_DIAS_PADRAO},
        notify::WhatsAppNotifier,
    },
};

fn sufixo_aleatorio(tamanho: usize) -> String {
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();
    (0..tamanho)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

#[derive(Clone)]
pub struct LeadService {
    lead_repo: LeadRepository,
    user_repo: UserRepository,
    license_repo: LicenseRepository,
    pool: PgPool,
    notifier: WhatsAppNotifier,
}

impl LeadService {
    pub fn new(
        lead_repo: LeadRepository,
        user_repo: UserRepository,
        license_repo: LicenseRepository,
        pool: PgPool,
        notifier: WhatsAppNotifier,
    ) -> Self {
        Self {
            lead_repo,
            user_repo,
            license_repo,
            pool,
            notifier,
        }
    }

    pub async fn registrar_lead(&self, payload: &NovoLeadPayload) -> Result<Lead, AppError> {
        let lead = self
            .lead_repo
            .insert_lead(&payload.nome, &payload.telefone, payload.origem.as_deref())
            .await?;

        self.notifier.notificar_admin(&format!(
            "Novo lead: {} ({})",
            lead.nome, lead.telefone
        ));

        Ok(lead)
    }

    pub async fn listar_leads(&self) -> Result<Vec<Lead>, AppError> {
        self.lead_repo.list_leads().await
    }

    /// Registro público: fica pendente até um admin aprovar.
    pub async fn registrar_pendente(
        &self,
        payload: &RegisterPayload,
    ) -> Result<PendingUser, AppError> {
        // Recusa logo se o nome já pertence a um usuário ativo.
        if self
            .user_repo
            .find_by_username(&payload.username)
            .await?
            .is_some()
        {
            return Err(AppError::UsernameAlreadyExists);
        }

        let hashed = AuthService::hash_password(&payload.password).await?;
        let pendente = self
            .lead_repo
            .insert_pending(&payload.username, &hashed, payload.phone.as_deref())
            .await?;

        self.notifier.notificar_admin(&format!(
            "Novo cadastro aguardando aprovação: {}",
            pendente.username
        ));

        Ok(pendente)
    }

    pub async fn listar_pendentes(&self) -> Result<Vec<PendingUser>, AppError> {
        self.lead_repo.list_pending().await
    }

    /// Aprovação: cria o usuário e a licença trial na mesma transação em
    /// que o cadastro pendente é removido.
    pub async fn aprovar_pendente(&self, id: Uuid) -> Result<User, AppError> {
        let pendente = self
            .lead_repo
            .find_pending(id)
            .await?
            .ok_or(AppError::PendingUserNotFound)?;

        let mut tx = self.pool.begin().await?;

        let user = self
            .user_repo
            .create(
                &mut *tx,
                &pendente.username,
                &pendente.password_hash,
                Role::User,
                pendente.phone.as_deref(),
            )
            .await?;

        let chave = gerar_chave_ativacao();
        self.license_repo
            .create_trial(&mut *tx, user.id, TRIAL_DIAS_PADRAO, &chave)
            .await?;

        self.lead_repo.delete_pending(&mut *tx, id).await?;

        tx.commit().await?;

        if let Some(telefone) = &user.phone {
            self.notifier
                .notificar(telefone, "Seu acesso ao Ploutos foi liberado. Bom trabalho!");
        }

        Ok(user)
    }

    /// Usuário de demonstração com credenciais aleatórias e trial curto.
    pub async fn criar_usuario_demo(&self) -> Result<DemoUserResponse, AppError> {
        let username = format!("demo_{}", sufixo_aleatorio(8));
        let password = sufixo_aleatorio(10);
        let hashed = AuthService::hash_password(&password).await?;

        let mut tx = self.pool.begin().await?;

        let user = self
            .user_repo
            .create(&mut *tx, &username, &hashed, Role::User, None)
            .await?;

        let chave = gerar_chave_ativacao();
        self.license_repo
            .create_trial(&mut *tx, user.id, TRIAL_DIAS_PADRAO, &chave)
            .await?;

        tx.commit().await?;

        Ok(DemoUserResponse { username, password })
    }

    /// Registra o pedido de reset e avisa o admin; o atendimento é manual.
    pub async fn solicitar_reset(
        &self,
        kind: ResetKind,
        payload: &ResetPayload,
    ) -> Result<ResetRequest, AppError> {
        self.user_repo
            .find_by_username(&payload.username)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let request = self
            .lead_repo
            .insert_reset_request(kind, &payload.username, payload.telefone.as_deref())
            .await?;

        let tipo = match kind {
            ResetKind::Password => "senha",
            ResetKind::Username => "nome de usuário",
        };
        self.notifier.notificar_admin(&format!(
            "Pedido de reset de {} para o usuário {}.",
            tipo, payload.username
        ));

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sufixo_aleatorio_respeita_charset_e_tamanho() {
        let sufixo = sufixo_aleatorio(8);
        assert_eq!(sufixo.len(), 8);
        assert!(sufixo
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }
}
