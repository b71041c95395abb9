// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,

        // --- Users ---
        handlers::users::list_users,
        handlers::users::create_user,
        handlers::users::update_user,
        handlers::users::update_role,
        handlers::users::delete_user,

        // --- Licenses ---
        handlers::licenses::get_license,
        handlers::licenses::activate_license,
        handlers::licenses::block_license,
        handlers::licenses::ensure_self_license,
        handlers::licenses::activate_self_license,

        // --- Caixa ---
        handlers::caixa::get_caixa,
        handlers::caixa::save_caixa,
        handlers::caixa::clear_caixa,
        handlers::caixa::add_cancelamento,
        handlers::caixa::remove_cancelamento,

        // --- Notas ---
        handlers::notas::list_notas,
        handlers::notas::create_nota,
        handlers::notas::notas_stats,
        handlers::notas::pagar_parcela,
        handlers::notas::delete_nota,

        // --- Tenancy ---
        handlers::tenancy::create_tenant,
        handlers::tenancy::list_tenants,
        handlers::tenancy::add_tenant_user,
        handlers::tenancy::create_subscription,
        handlers::tenancy::create_plan,

        // --- Webhooks ---
        handlers::webhooks::pix_webhook,

        // --- Public / Admin ---
        handlers::public::register,
        handlers::public::demo_user,
        handlers::public::create_lead,
        handlers::public::reset_password,
        handlers::public::reset_username,
        handlers::public::list_leads,
        handlers::public::list_pending_users,
        handlers::public::approve_pending_user,

        // --- CMS ---
        handlers::cms::get_config,
        handlers::cms::save_config,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::User,
            models::auth::LoginPayload,
            models::auth::AuthResponse,
            models::auth::CreateUserPayload,
            models::auth::UpdateUserPayload,
            models::auth::UpdateRolePayload,

            // --- Licenses ---
            models::licensing::LicenseStatus,
            models::licensing::License,
            models::licensing::ActivateLicensePayload,

            // --- Caixa ---
            models::caixa::ClienteValor,
            models::caixa::Cheque,
            models::caixa::Entradas,
            models::caixa::Saidas,
            models::caixa::MotivoCancelamento,
            models::caixa::Cancelamento,
            models::caixa::NovoCancelamentoPayload,
            models::caixa::CaixaDia,
            models::caixa::TotaisCaixa,
            models::caixa::CaixaResponse,

            // --- Notas ---
            models::notas::StatusNota,
            models::notas::NotaFiscal,
            models::notas::ParcelaNota,
            models::notas::NotaFiscalDetalhe,
            models::notas::NotasStats,
            models::notas::NovaParcelaPayload,
            models::notas::CreateNotaPayload,

            // --- Tenancy ---
            models::tenancy::Tenant,
            models::tenancy::UserTenant,
            models::tenancy::Plan,
            models::tenancy::SubscriptionStatus,
            models::tenancy::Subscription,
            models::tenancy::CreateTenantPayload,
            models::tenancy::AddTenantUserPayload,
            models::tenancy::CreateSubscriptionPayload,
            models::tenancy::CreatePlanPayload,
            models::tenancy::PixWebhookPayload,

            // --- Leads / Public ---
            models::leads::Lead,
            models::leads::PendingUser,
            models::leads::ResetKind,
            models::leads::ResetRequest,
            models::leads::NovoLeadPayload,
            models::leads::RegisterPayload,
            models::leads::ResetPayload,
            models::leads::DemoUserResponse,

            // --- CMS ---
            models::cms::CmsConfig,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação"),
        (name = "Users", description = "Administração de usuários"),
        (name = "Licenses", description = "Licenciamento (trial, ativação, bloqueio)"),
        (name = "Caixa", description = "Movimento diário do caixa e cancelamentos"),
        (name = "Notas", description = "Caderno de notas fiscais e parcelas"),
        (name = "Tenancy", description = "Estabelecimentos, planos e assinaturas"),
        (name = "Webhooks", description = "Confirmações do provedor de pagamento"),
        (name = "Public", description = "Rotas públicas e aprovação de cadastros"),
        (name = "CMS", description = "Configuração do site")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
