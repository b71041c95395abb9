pub mod auth;
pub mod caixa;
pub mod cms;
pub mod licenses;
pub mod notas;
pub mod public;
pub mod tenancy;
pub mod users;
pub mod webhooks;
