// src/db/tenancy_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::tenancy::{Plan, Subscription, Tenant, UserTenant},
};

#[derive(Clone)]
pub struct TenancyRepository {
    pool: PgPool,
}

impl TenancyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  ESTABELECIMENTOS
    // =========================================================================

    pub async fn create_tenant<'e, E>(&self, executor: E, name: &str) -> Result<Tenant, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tenant = sqlx::query_as::<_, Tenant>(
            "INSERT INTO tenants (name) VALUES ($1) RETURNING *",
        )
        .bind(name)
        .fetch_one(executor)
        .await?;

        Ok(tenant)
    }

    pub async fn find_tenant(&self, id: Uuid) -> Result<Option<Tenant>, AppError> {
        let maybe = sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe)
    }

    pub async fn list_tenants_for_user(&self, user_id: Uuid) -> Result<Vec<Tenant>, AppError> {
        let tenants = sqlx::query_as::<_, Tenant>(
            r#"
            SELECT t.*
            FROM tenants t
            JOIN user_tenants ut ON ut.tenant_id = t.id
            WHERE ut.user_id = $1
            ORDER BY t.name ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tenants)
    }

    pub async fn add_member<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        user_id: Uuid,
        member_role: &str,
    ) -> Result<UserTenant, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let member = sqlx::query_as::<_, UserTenant>(
            r#"
            INSERT INTO user_tenants (user_id, tenant_id, member_role)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, tenant_id)
                DO UPDATE SET member_role = EXCLUDED.member_role
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(tenant_id)
        .bind(member_role)
        .fetch_one(executor)
        .await?;

        Ok(member)
    }

    // =========================================================================
    //  PLANOS
    // =========================================================================

    pub async fn create_plan(
        &self,
        name: &str,
        price: Decimal,
        period_days: i32,
    ) -> Result<Plan, AppError> {
        let plan = sqlx::query_as::<_, Plan>(
            r#"
            INSERT INTO plans (name, price, period_days)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(price)
        .bind(period_days)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation("plans_name_key".to_string());
                }
            }
            e.into()
        })?;

        Ok(plan)
    }

    pub async fn find_plan(&self, id: Uuid) -> Result<Option<Plan>, AppError> {
        let maybe = sqlx::query_as::<_, Plan>("SELECT * FROM plans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe)
    }

    // =========================================================================
    //  ASSINATURAS
    // =========================================================================

    pub async fn create_subscription(
        &self,
        tenant_id: Uuid,
        plan_id: Uuid,
        txid: &str,
    ) -> Result<Subscription, AppError> {
        let subscription = sqlx::query_as::<_, Subscription>(
            r#"
            INSERT INTO subscriptions (tenant_id, plan_id, txid)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(plan_id)
        .bind(txid)
        .fetch_one(&self.pool)
        .await?;

        Ok(subscription)
    }

    pub async fn find_subscription_by_txid(
        &self,
        txid: &str,
    ) -> Result<Option<Subscription>, AppError> {
        let maybe = sqlx::query_as::<_, Subscription>(
            "SELECT * FROM subscriptions WHERE txid = $1 AND status = 'pending'",
        )
        .bind(txid)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }

    pub async fn activate_subscription(&self, id: Uuid) -> Result<Subscription, AppError> {
        let subscription = sqlx::query_as::<_, Subscription>(
            r#"
            UPDATE subscriptions
            SET status = 'active', activated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(subscription)
    }
}
