// src/services/tenancy_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{TenancyRepository, UserRepository},
    models::tenancy::{
        AddTenantUserPayload, CreatePlanPayload, CreateSubscriptionPayload, Plan, Subscription,
        Tenant, UserTenant,
    },
};

#[derive(Clone)]
pub struct TenancyService {
    repo: TenancyRepository,
    user_repo: UserRepository,
    pool: PgPool,
}

impl TenancyService {
    pub fn new(repo: TenancyRepository, user_repo: UserRepository, pool: PgPool) -> Self {
        Self {
            repo,
            user_repo,
            pool,
        }
    }

    /// Cria o estabelecimento e, atomicamente, registra quem criou como
    /// primeiro membro ("dono").
    pub async fn criar_tenant_com_dono(
        &self,
        name: &str,
        owner_id: Uuid,
    ) -> Result<Tenant, AppError> {
        let mut tx = self.pool.begin().await?;

        let tenant = self.repo.create_tenant(&mut *tx, name).await?;
        self.repo
            .add_member(&mut *tx, tenant.id, owner_id, "dono")
            .await?;

        tx.commit().await?;

        Ok(tenant)
    }

    pub async fn listar_do_usuario(&self, user_id: Uuid) -> Result<Vec<Tenant>, AppError> {
        self.repo.list_tenants_for_user(user_id).await
    }

    pub async fn adicionar_usuario(
        &self,
        tenant_id: Uuid,
        payload: &AddTenantUserPayload,
    ) -> Result<UserTenant, AppError> {
        self.repo
            .find_tenant(tenant_id)
            .await?
            .ok_or(AppError::TenantNotFound)?;

        let user = self
            .user_repo
            .find_by_username(&payload.username)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let member_role = payload.member_role.as_deref().unwrap_or("member");
        self.repo
            .add_member(self.user_repo.pool(), tenant_id, user.id, member_role)
            .await
    }

    pub async fn criar_assinatura(
        &self,
        tenant_id: Uuid,
        payload: &CreateSubscriptionPayload,
    ) -> Result<Subscription, AppError> {
        self.repo
            .find_tenant(tenant_id)
            .await?
            .ok_or(AppError::TenantNotFound)?;
        self.repo
            .find_plan(payload.plan_id)
            .await?
            .ok_or(AppError::PlanNotFound)?;

        self.repo
            .create_subscription(tenant_id, payload.plan_id, &payload.txid)
            .await
    }

    /// Confirmação do webhook PIX: casa a assinatura pendente pelo txid e
    /// ativa. Sem correspondência é um no-op que ainda responde sucesso
    /// (semântica at-least-once do provedor, sem fila de retry).
    pub async fn confirmar_pagamento_pix(&self, txid: &str) -> Result<bool, AppError> {
        match self.repo.find_subscription_by_txid(txid).await? {
            Some(subscription) => {
                self.repo.activate_subscription(subscription.id).await?;
                tracing::info!(txid, "Assinatura ativada via webhook PIX.");
                Ok(true)
            }
            None => {
                tracing::info!(txid, "Webhook PIX sem assinatura correspondente, ignorado.");
                Ok(false)
            }
        }
    }

    pub async fn criar_plano(&self, payload: &CreatePlanPayload) -> Result<Plan, AppError> {
        self.repo
            .create_plan(&payload.name, payload.price, payload.period_days)
            .await
    }
}
