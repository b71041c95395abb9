// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas públicas de autenticação
    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    // Administração de usuários (o gate de papel fica nos handlers)
    let user_routes = Router::new()
        .route(
            "/",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route(
            "/{id}",
            axum::routing::patch(handlers::users::update_user).delete(handlers::users::delete_user),
        )
        .route("/{id}/role", axum::routing::patch(handlers::users::update_role))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Licenças por username (admin)
    let license_routes = Router::new()
        .route("/{username}", get(handlers::licenses::get_license))
        .route(
            "/{username}/activate",
            post(handlers::licenses::activate_license),
        )
        .route("/{username}/block", post(handlers::licenses::block_license))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Licença do próprio usuário logado
    let self_license_routes = Router::new()
        .route("/ensure", post(handlers::licenses::ensure_self_license))
        .route("/activate", post(handlers::licenses::activate_self_license))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Movimento do caixa e cancelamentos
    let caixa_routes = Router::new()
        .route(
            "/",
            get(handlers::caixa::get_caixa)
                .put(handlers::caixa::save_caixa)
                .delete(handlers::caixa::clear_caixa),
        )
        .route("/cancelamentos", post(handlers::caixa::add_cancelamento))
        .route(
            "/cancelamentos/{id}",
            delete(handlers::caixa::remove_cancelamento),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Caderno de notas fiscais
    let nota_routes = Router::new()
        .route(
            "/",
            get(handlers::notas::list_notas).post(handlers::notas::create_nota),
        )
        .route("/stats", get(handlers::notas::notas_stats))
        .route("/{id}", delete(handlers::notas::delete_nota))
        .route(
            "/{id}/parcelas/{numero}/pagar",
            post(handlers::notas::pagar_parcela),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Estabelecimentos e assinaturas
    let tenancy_routes = Router::new()
        .route(
            "/",
            post(handlers::tenancy::create_tenant).get(handlers::tenancy::list_tenants),
        )
        .route("/{id}/users", post(handlers::tenancy::add_tenant_user))
        .route(
            "/{id}/subscriptions",
            post(handlers::tenancy::create_subscription),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let plan_routes = Router::new()
        .route("/", post(handlers::tenancy::create_plan))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Leads e aprovação de cadastros (admin)
    let lead_routes = Router::new()
        .route("/", get(handlers::public::list_leads))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let admin_routes = Router::new()
        .route("/pending-users", get(handlers::public::list_pending_users))
        .route(
            "/pending-users/{id}/approve",
            post(handlers::public::approve_pending_user),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Rotas públicas (sem token)
    let public_routes = Router::new()
        .route("/register", post(handlers::public::register))
        .route("/demo-user", post(handlers::public::demo_user))
        .route("/leads", post(handlers::public::create_lead))
        .route("/reset-password", post(handlers::public::reset_password))
        .route("/reset-username", post(handlers::public::reset_username));

    // CMS: leitura pública; o POST valida o token dentro do próprio gate.
    let cms_routes = Router::new().route(
        "/config",
        get(handlers::cms::get_config).post(handlers::cms::save_config),
    );

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/licenses", license_routes)
        .nest("/api/self/license", self_license_routes)
        .nest("/api/caixa", caixa_routes)
        .nest("/api/notas", nota_routes)
        .nest("/api/tenants", tenancy_routes)
        .nest("/api/plans", plan_routes)
        .nest("/api/leads", lead_routes)
        .nest("/api/admin", admin_routes)
        .nest("/api/public", public_routes)
        .nest("/api/cms", cms_routes)
        .route("/webhooks/pix", post(handlers::webhooks::pix_webhook))
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .with_state(app_state);

    // Inicia o servidor
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
