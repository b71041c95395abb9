pub mod auth;
pub use auth::AuthService;
pub mod caixa_service;
pub use caixa_service::CaixaService;
pub mod lead_service;
pub use lead_service::LeadService;
pub mod license_service;
pub use license_service::LicenseService;
pub mod nota_service;
pub use nota_service::NotaService;
pub mod notify;
pub use notify::WhatsAppNotifier;
pub mod tenancy_service;
pub use tenancy_service::TenancyService;
