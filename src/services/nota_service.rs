// src/services/nota_service.rs

use std::collections::HashMap;

use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::NotaRepository,
    models::notas::{
        CreateNotaPayload, NotaFiscalDetalhe, NotasStats, ParcelaNota, StatusNota,
    },
};

// Janela do "a vencer" das estatísticas.
pub const DIAS_A_VENCER: i64 = 7;

/// Status derivado das parcelas x data corrente. Prioridade: quitada,
/// depois vencida (qualquer parcela em aberto passada do vencimento),
/// depois parcialmente paga, senão ativa.
pub fn status_nota(parcelas: &[ParcelaNota], hoje: NaiveDate) -> StatusNota {
    if !parcelas.is_empty() && parcelas.iter().all(|p| p.paga) {
        return StatusNota::Quitada;
    }
    if parcelas.iter().any(|p| !p.paga && p.vencimento < hoje) {
        return StatusNota::Vencida;
    }
    if parcelas.iter().any(|p| p.paga) {
        return StatusNota::ParcialmentePaga;
    }
    StatusNota::Ativa
}

/// Estatísticas recomputadas a cada consulta, nunca armazenadas.
pub fn calcular_stats(notas: &[NotaFiscalDetalhe], hoje: NaiveDate) -> NotasStats {
    let limite_a_vencer = hoje + Duration::days(DIAS_A_VENCER);

    let mut valor_em_aberto = Decimal::ZERO;
    let mut valor_vencido = Decimal::ZERO;
    let mut valor_a_vencer = Decimal::ZERO;

    for nota in notas {
        for parcela in &nota.parcelas {
            if parcela.paga {
                continue;
            }
            valor_em_aberto += parcela.valor;
            if parcela.vencimento < hoje {
                valor_vencido += parcela.valor;
            } else if parcela.vencimento <= limite_a_vencer {
                valor_a_vencer += parcela.valor;
            }
        }
    }

    NotasStats {
        quantidade: notas.len(),
        valor_total: notas.iter().map(|n| n.nota.valor_total).sum(),
        valor_em_aberto,
        valor_vencido,
        quantidade_vencidas: notas
            .iter()
            .filter(|n| n.status == StatusNota::Vencida)
            .count(),
        valor_a_vencer,
    }
}

#[derive(Clone)]
pub struct NotaService {
    repo: NotaRepository,
    pool: PgPool,
}

impl NotaService {
    pub fn new(repo: NotaRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    /// Cria a nota e as parcelas atomicamente. O valor total da nota é a
    /// soma das parcelas informadas.
    pub async fn criar(
        &self,
        user_id: Uuid,
        payload: &CreateNotaPayload,
    ) -> Result<NotaFiscalDetalhe, AppError> {
        let valor_total: Decimal = payload.parcelas.iter().map(|p| p.valor).sum();

        let mut tx = self.pool.begin().await?;

        let nota = self
            .repo
            .insert_nota(
                &mut *tx,
                user_id,
                &payload.numero,
                &payload.cliente,
                valor_total,
                payload.data_emissao,
            )
            .await?;

        let mut parcelas = Vec::with_capacity(payload.parcelas.len());
        for (indice, parcela) in payload.parcelas.iter().enumerate() {
            let criada = self
                .repo
                .insert_parcela(
                    &mut *tx,
                    nota.id,
                    (indice + 1) as i32,
                    parcela.valor,
                    parcela.vencimento,
                )
                .await?;
            parcelas.push(criada);
        }

        tx.commit().await?;

        let status = status_nota(&parcelas, Utc::now().date_naive());
        Ok(NotaFiscalDetalhe {
            nota,
            parcelas,
            status,
        })
    }

    pub async fn listar(&self, user_id: Uuid) -> Result<Vec<NotaFiscalDetalhe>, AppError> {
        let notas = self.repo.list_notas(user_id).await?;
        let parcelas = self.repo.list_parcelas(user_id).await?;

        let mut por_nota: HashMap<Uuid, Vec<ParcelaNota>> = HashMap::new();
        for parcela in parcelas {
            por_nota.entry(parcela.nota_id).or_default().push(parcela);
        }

        let hoje = Utc::now().date_naive();
        Ok(notas
            .into_iter()
            .map(|nota| {
                let parcelas = por_nota.remove(&nota.id).unwrap_or_default();
                let status = status_nota(&parcelas, hoje);
                NotaFiscalDetalhe {
                    nota,
                    parcelas,
                    status,
                }
            })
            .collect())
    }

    pub async fn stats(&self, user_id: Uuid) -> Result<NotasStats, AppError> {
        let notas = self.listar(user_id).await?;
        Ok(calcular_stats(&notas, Utc::now().date_naive()))
    }

    pub async fn pagar_parcela(
        &self,
        user_id: Uuid,
        nota_id: Uuid,
        numero: i32,
    ) -> Result<ParcelaNota, AppError> {
        self.repo
            .marcar_parcela_paga(user_id, nota_id, numero, Utc::now().date_naive())
            .await
    }

    pub async fn remover(&self, user_id: Uuid, nota_id: Uuid) -> Result<(), AppError> {
        self.repo.delete_nota(user_id, nota_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::notas::NotaFiscal;
    use chrono::{DateTime, Utc};

    fn dia(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn valor(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn parcela(numero: i32, v: &str, vencimento: &str, paga: bool) -> ParcelaNota {
        ParcelaNota {
            nota_id: Uuid::nil(),
            numero,
            valor: valor(v),
            vencimento: dia(vencimento),
            paga,
            data_pagamento: None,
        }
    }

    fn nota(valor_total: &str, parcelas: Vec<ParcelaNota>, hoje: NaiveDate) -> NotaFiscalDetalhe {
        let status = status_nota(&parcelas, hoje);
        NotaFiscalDetalhe {
            nota: NotaFiscal {
                id: Uuid::new_v4(),
                user_id: Uuid::nil(),
                numero: "0001".to_string(),
                cliente: "Cliente".to_string(),
                valor_total: valor(valor_total),
                data_emissao: dia("2026-01-10"),
                created_at: DateTime::<Utc>::MIN_UTC,
            },
            parcelas,
            status,
        }
    }

    #[test]
    fn todas_as_parcelas_pagas_quita_a_nota() {
        let parcelas = vec![
            parcela(1, "100.00", "2026-01-20", true),
            parcela(2, "100.00", "2026-02-20", true),
        ];
        assert_eq!(status_nota(&parcelas, dia("2026-03-01")), StatusNota::Quitada);
    }

    #[test]
    fn parcela_em_aberto_vencida_marca_a_nota_como_vencida() {
        // Mesmo com uma parcela paga, vencida tem prioridade sobre parcial.
        let parcelas = vec![
            parcela(1, "100.00", "2026-01-20", true),
            parcela(2, "100.00", "2026-02-20", false),
        ];
        assert_eq!(status_nota(&parcelas, dia("2026-03-01")), StatusNota::Vencida);
    }

    #[test]
    fn parcela_que_vence_hoje_ainda_nao_esta_vencida() {
        let parcelas = vec![parcela(1, "100.00", "2026-02-20", false)];
        assert_eq!(status_nota(&parcelas, dia("2026-02-20")), StatusNota::Ativa);
    }

    #[test]
    fn alguma_parcela_paga_sem_atraso_e_parcialmente_paga() {
        let parcelas = vec![
            parcela(1, "100.00", "2026-01-20", true),
            parcela(2, "100.00", "2026-05-20", false),
        ];
        assert_eq!(
            status_nota(&parcelas, dia("2026-02-01")),
            StatusNota::ParcialmentePaga
        );
    }

    #[test]
    fn nota_nova_sem_pagamentos_e_ativa() {
        let parcelas = vec![parcela(1, "100.00", "2026-05-20", false)];
        assert_eq!(status_nota(&parcelas, dia("2026-02-01")), StatusNota::Ativa);
    }

    #[test]
    fn stats_somam_aberto_vencido_e_a_vencer() {
        let hoje = dia("2026-02-10");
        let notas = vec![
            // Vencida: parcela de 300 atrasada.
            nota(
                "300.00",
                vec![parcela(1, "300.00", "2026-02-01", false)],
                hoje,
            ),
            // A vencer dentro de 7 dias: 150.
            nota(
                "150.00",
                vec![parcela(1, "150.00", "2026-02-15", false)],
                hoje,
            ),
            // Fora da janela de 7 dias: só conta no "em aberto".
            nota(
                "200.00",
                vec![parcela(1, "200.00", "2026-03-30", false)],
                hoje,
            ),
            // Quitada: não entra em nenhum aberto.
            nota("99.00", vec![parcela(1, "99.00", "2026-01-05", true)], hoje),
        ];

        let stats = calcular_stats(&notas, hoje);
        assert_eq!(stats.quantidade, 4);
        assert_eq!(stats.valor_total, valor("749.00"));
        assert_eq!(stats.valor_em_aberto, valor("650.00"));
        assert_eq!(stats.valor_vencido, valor("300.00"));
        assert_eq!(stats.quantidade_vencidas, 1);
        assert_eq!(stats.valor_a_vencer, valor("150.00"));
    }
}
