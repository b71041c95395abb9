// src/services/license_service.rs

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{LicenseRepository, UserRepository},
    models::licensing::{License, LicenseStatus},
};

pub const TRIAL_DIAS_PADRAO: i32 = 7;

const CHAVE_TAMANHO: usize = 12;
const CHAVE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Gera uma chave de ativação aleatória (maiúsculas + dígitos).
pub fn gerar_chave_ativacao() -> String {
    let mut rng = rand::thread_rng();
    (0..CHAVE_TAMANHO)
        .map(|_| CHAVE_CHARSET[rng.gen_range(0..CHAVE_CHARSET.len())] as char)
        .collect()
}

/// O trial expira quando `agora` passa de trial_start + trial_days.
pub fn trial_expirado(trial_start: DateTime<Utc>, trial_days: i32, agora: DateTime<Utc>) -> bool {
    agora > trial_start + Duration::days(trial_days as i64)
}

/// Comparação de chave sem diferenciar maiúsculas/minúsculas.
/// Licença sem chave registrada nunca confere.
pub fn chave_confere(esperada: Option<&str>, fornecida: &str) -> bool {
    match esperada {
        Some(chave) => chave.eq_ignore_ascii_case(fornecida.trim()),
        None => false,
    }
}

#[derive(Clone)]
pub struct LicenseService {
    license_repo: LicenseRepository,
    user_repo: UserRepository,
}

impl LicenseService {
    pub fn new(license_repo: LicenseRepository, user_repo: UserRepository) -> Self {
        Self {
            license_repo,
            user_repo,
        }
    }

    async fn license_do_username(&self, username: &str) -> Result<(Uuid, License), AppError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let license = self
            .license_repo
            .find_by_user_id(user.id)
            .await?
            .ok_or(AppError::LicenseNotFound)?;

        Ok((user.id, license))
    }

    pub async fn get_by_username(&self, username: &str) -> Result<License, AppError> {
        let (_, license) = self.license_do_username(username).await?;
        Ok(license)
    }

    /// Garante que o usuário tem licença e aplica a expiração de trial de
    /// forma preguiçosa: sem timer em segundo plano, a checagem acontece
    /// aqui, a cada chamada. Licenças já ativas ou bloqueadas não são tocadas.
    pub async fn ensure_for_user(&self, user_id: Uuid) -> Result<License, AppError> {
        let maybe = self.license_repo.find_by_user_id(user_id).await?;

        let license = match maybe {
            None => {
                let chave = gerar_chave_ativacao();
                self.license_repo
                    .create_trial(self.user_repo.pool(), user_id, TRIAL_DIAS_PADRAO, &chave)
                    .await?
            }
            Some(license)
                if license.status == LicenseStatus::Trial
                    && trial_expirado(license.trial_start, license.trial_days, Utc::now()) =>
            {
                let nova_chave = gerar_chave_ativacao();
                let bloqueada = self.license_repo.set_blocked(user_id, &nova_chave).await?;
                tracing::info!(user_id = %user_id, "Trial expirado, licença bloqueada.");
                bloqueada
            }
            Some(license) => license,
        };

        Ok(license)
    }

    pub async fn activate(
        &self,
        username: &str,
        key: &str,
        validity_days: Option<i64>,
    ) -> Result<License, AppError> {
        let (user_id, license) = self.license_do_username(username).await?;
        self.ativar_license(user_id, &license, key, validity_days)
            .await
    }

    pub async fn activate_self(
        &self,
        user_id: Uuid,
        key: &str,
        validity_days: Option<i64>,
    ) -> Result<License, AppError> {
        let license = self
            .license_repo
            .find_by_user_id(user_id)
            .await?
            .ok_or(AppError::LicenseNotFound)?;
        self.ativar_license(user_id, &license, key, validity_days)
            .await
    }

    async fn ativar_license(
        &self,
        user_id: Uuid,
        license: &License,
        key: &str,
        validity_days: Option<i64>,
    ) -> Result<License, AppError> {
        if !chave_confere(license.activation_key.as_deref(), key) {
            return Err(AppError::WrongActivationKey);
        }

        let expires_at = validity_days.map(|dias| Utc::now() + Duration::days(dias));
        self.license_repo.set_active(user_id, expires_at).await
    }

    /// Bloqueio manual: sempre funciona para licença existente e emite a
    /// chave que será exigida na próxima ativação.
    pub async fn block(&self, username: &str) -> Result<License, AppError> {
        let (user_id, _) = self.license_do_username(username).await?;
        let nova_chave = gerar_chave_ativacao();
        self.license_repo.set_blocked(user_id, &nova_chave).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trial_dentro_do_prazo_nao_expira() {
        let inicio = Utc::now() - Duration::days(3);
        assert!(!trial_expirado(inicio, 7, Utc::now()));
    }

    #[test]
    fn trial_expira_um_dia_depois_do_prazo() {
        let agora = Utc::now();
        let inicio = agora - Duration::days(8);
        assert!(trial_expirado(inicio, 7, agora));
    }

    #[test]
    fn trial_no_limite_exato_ainda_vale() {
        let agora = Utc::now();
        let inicio = agora - Duration::days(7);
        assert!(!trial_expirado(inicio, 7, agora));
    }

    #[test]
    fn chave_confere_ignora_caixa_e_espacos() {
        assert!(chave_confere(Some("A7K2MQ9XPL4Z"), "a7k2mq9xpl4z"));
        assert!(chave_confere(Some("A7K2MQ9XPL4Z"), "  A7K2MQ9XPL4Z "));
        assert!(!chave_confere(Some("A7K2MQ9XPL4Z"), "outra-chave"));
    }

    #[test]
    fn licenca_sem_chave_nunca_ativa() {
        assert!(!chave_confere(None, "qualquer"));
    }

    #[test]
    fn chave_gerada_e_maiuscula_alfanumerica() {
        let chave = gerar_chave_ativacao();
        assert_eq!(chave.len(), 12);
        assert!(chave
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }
}
