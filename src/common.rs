pub mod audit;
pub mod error;

pub use audit::{AuditAction, AuditLog, SharedAuditLog, TracingAuditLog};
pub use error::AppError;
