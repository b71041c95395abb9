pub mod caixa_repo;
pub use caixa_repo::CaixaRepository;
pub mod cms_repo;
pub use cms_repo::CmsRepository;
pub mod lead_repo;
pub use lead_repo::LeadRepository;
pub mod license_repo;
pub use license_repo::LicenseRepository;
pub mod nota_repo;
pub use nota_repo::NotaRepository;
pub mod tenancy_repo;
pub use tenancy_repo::TenancyRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
