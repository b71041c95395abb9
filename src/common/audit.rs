// src/common/audit.rs

use std::sync::Arc;

// Toda mutação do registro de cancelamentos passa por aqui.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Create,
    Delete,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "CREATE",
            AuditAction::Delete => "DELETE",
        }
    }
}

/// Trilha de auditoria injetável. Os serviços recebem `SharedAuditLog`
/// em vez de escrever num logger global.
pub trait AuditLog: Send + Sync {
    fn registrar(
        &self,
        acao: AuditAction,
        entidade: &str,
        entidade_id: &str,
        descricao: &str,
        autor: &str,
    );
}

pub type SharedAuditLog = Arc<dyn AuditLog>;

/// Implementação padrão: eventos estruturados via `tracing`.
#[derive(Debug, Default, Clone)]
pub struct TracingAuditLog;

impl AuditLog for TracingAuditLog {
    fn registrar(
        &self,
        acao: AuditAction,
        entidade: &str,
        entidade_id: &str,
        descricao: &str,
        autor: &str,
    ) {
        tracing::info!(
            target: "auditoria",
            acao = acao.as_str(),
            entidade,
            entidade_id,
            autor,
            "{}",
            descricao
        );
    }
}
