// src/config.rs

use std::{env, sync::Arc, time::Duration};

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    common::audit::TracingAuditLog,
    db::{
        CaixaRepository, CmsRepository, LeadRepository, LicenseRepository, NotaRepository,
        TenancyRepository, UserRepository,
    },
    services::{
        AuthService, CaixaService, LeadService, LicenseService, NotaService, TenancyService,
        WhatsAppNotifier,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub license_service: LicenseService,
    pub caixa_service: CaixaService,
    pub nota_service: NotaService,
    pub tenancy_service: TenancyService,
    pub lead_service: LeadService,
    pub cms_repo: CmsRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Avisos de WhatsApp são opcionais: sem as variáveis, viram no-op.
        let callmebot_api_key = env::var("CALLMEBOT_API_KEY").ok();
        let admin_phone = env::var("ADMIN_PHONE").ok();

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let license_repo = LicenseRepository::new(db_pool.clone());
        let caixa_repo = CaixaRepository::new(db_pool.clone());
        let nota_repo = NotaRepository::new(db_pool.clone());
        let tenancy_repo = TenancyRepository::new(db_pool.clone());
        let lead_repo = LeadRepository::new(db_pool.clone());
        let cms_repo = CmsRepository::new(db_pool.clone());

        let notifier = WhatsAppNotifier::new(callmebot_api_key, admin_phone);
        let audit = Arc::new(TracingAuditLog);

        let auth_service = AuthService::new(user_repo.clone(), jwt_secret);
        let license_service = LicenseService::new(license_repo.clone(), user_repo.clone());
        let caixa_service = CaixaService::new(caixa_repo, audit);
        let nota_service = NotaService::new(nota_repo, db_pool.clone());
        let tenancy_service =
            TenancyService::new(tenancy_repo, user_repo.clone(), db_pool.clone());
        let lead_service = LeadService::new(
            lead_repo,
            user_repo,
            license_repo,
            db_pool.clone(),
            notifier,
        );

        Ok(Self {
            db_pool,
            auth_service,
            license_service,
            caixa_service,
            nota_service,
            tenancy_service,
            lead_service,
            cms_repo,
        })
    }
}
