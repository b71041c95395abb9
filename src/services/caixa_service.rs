// src/services/caixa_service.rs
//
// Regras de fechamento do caixa. Os validadores e os totais são funções
// puras sobre o snapshot; o serviço só orquestra validação -> persistência
// e mantém o registro de cancelamentos com trilha de auditoria.

use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::{audit::AuditAction, error::AppError, SharedAuditLog},
    db::CaixaRepository,
    models::caixa::{
        CaixaDia, CaixaResponse, Cancelamento, ClienteValor, MotivoCancelamento,
        NovoCancelamentoPayload, TotaisCaixa,
    },
};

// Comparações monetárias sempre em centavos inteiros, nunca em float.
fn centavos(valor: Decimal) -> i64 {
    (valor * Decimal::ONE_HUNDRED).round().to_i64().unwrap_or(0)
}

fn soma_clientes(itens: &[ClienteValor]) -> Decimal {
    itens.iter().map(|c| c.valor).sum()
}

// Agregado positivo exige decomposição não-vazia e soma batendo no centavo.
fn validar_decomposicao(
    campo: &str,
    agregado: Decimal,
    itens: &[ClienteValor],
) -> Result<(), String> {
    if agregado <= Decimal::ZERO {
        return Ok(());
    }

    if itens.is_empty() {
        return Err(format!("Informe os clientes de {}.", campo));
    }

    let soma = soma_clientes(itens);
    if centavos(soma) != centavos(agregado) {
        return Err(format!(
            "A soma dos clientes de {} (R$ {}) não confere com o total informado (R$ {}).",
            campo, soma, agregado
        ));
    }

    Ok(())
}

/// Regras de fechamento: devolve a primeira mensagem de erro encontrada.
/// Nenhum save parcial acontece quando isso falha.
pub fn validar_caixa(dia: &CaixaDia) -> Result<(), String> {
    let entradas = &dia.entradas;
    validar_decomposicao("PIX conta", entradas.pix_conta, &entradas.clientes_pix_conta)?;
    validar_decomposicao(
        "cartão link",
        entradas.cartao_link,
        &entradas.clientes_cartao_link,
    )?;
    validar_decomposicao("boletos", entradas.boletos, &entradas.clientes_boletos)?;

    let saidas = &dia.saidas;
    if saidas.saida > Decimal::ZERO {
        let justificado = saidas.valor_compra + saidas.valor_saida_dinheiro;
        if centavos(saidas.saida) != centavos(justificado) {
            return Err(format!(
                "A saída (R$ {}) deve ser igual a valor de compra + saída em dinheiro (R$ {}).",
                saidas.saida, justificado
            ));
        }
    }

    Ok(())
}

/// Totais derivados do snapshot. As categorias com flag só entram no
/// movimento quando marcadas; descontos, saída e puxador sempre deduzem.
pub fn calcular_totais(dia: &CaixaDia) -> TotaisCaixa {
    let entradas = &dia.entradas;
    let saidas = &dia.saidas;

    let total_entradas = entradas.dinheiro
        + entradas.cartao
        + entradas.cartao_link
        + entradas.boletos
        + entradas.pix_maquina
        + entradas.pix_conta
        + entradas.outros;

    let total_cheques: Decimal = entradas.cheques.iter().map(|c| c.valor).sum();

    let total_saidas = saidas.descontos + saidas.saida + saidas.puxador;

    let mut ajustes = Decimal::ZERO;
    if saidas.incluir_devolucoes_no_movimento {
        ajustes += saidas.devolucoes;
    }
    if saidas.incluir_correios_no_movimento {
        ajustes += saidas.correios;
    }
    if saidas.incluir_vales_no_movimento {
        ajustes += saidas.vales;
    }

    TotaisCaixa {
        total_entradas,
        total_cheques,
        total_saidas,
        total_caixa: total_entradas + total_cheques + ajustes - total_saidas,
    }
}

/// Valida um novo cancelamento e devolve a primeira mensagem que falhar.
pub fn validar_cancelamento(payload: &NovoCancelamentoPayload) -> Result<(), String> {
    if payload.numero_pedido.trim().is_empty() {
        return Err("Informe o número do pedido.".to_string());
    }
    if payload.horario.trim().is_empty() {
        return Err("Informe o horário do cancelamento.".to_string());
    }
    if payload.vendedor.trim().is_empty() {
        return Err("Informe o vendedor.".to_string());
    }
    if payload.pedido_substituto.trim().is_empty() {
        return Err("Informe o pedido substituto.".to_string());
    }
    if payload.motivo == MotivoCancelamento::Outro
        && payload
            .motivo_outro
            .as_deref()
            .map(str::trim)
            .unwrap_or("")
            .is_empty()
    {
        return Err("Descreva o motivo do cancelamento.".to_string());
    }
    if payload.valor <= Decimal::ZERO {
        return Err("O valor do cancelamento deve ser maior que zero.".to_string());
    }
    if payload.assinatura_gerente.trim().is_empty() {
        return Err("Informe a assinatura do gerente.".to_string());
    }
    Ok(())
}

// Checagem de sanidade na carga: só avisa, nunca bloqueia.
pub fn verificar_integridade(dia: &CaixaDia) {
    let mut ids_vistos = std::collections::HashSet::new();
    for cancelamento in &dia.cancelamentos {
        if !ids_vistos.insert(cancelamento.id) {
            tracing::warn!(
                id = cancelamento.id,
                "Cancelamento com id duplicado no snapshot."
            );
        }
        if cancelamento.valor <= Decimal::ZERO {
            tracing::warn!(
                id = cancelamento.id,
                pedido = %cancelamento.numero_pedido,
                "Cancelamento com valor não-positivo no snapshot."
            );
        }
    }
}

#[derive(Clone)]
pub struct CaixaService {
    repo: CaixaRepository,
    audit: SharedAuditLog,
}

impl CaixaService {
    pub fn new(repo: CaixaRepository, audit: SharedAuditLog) -> Self {
        Self { repo, audit }
    }

    pub async fn carregar(&self, user_id: Uuid) -> Result<CaixaResponse, AppError> {
        let dia = self.repo.load(user_id).await?.unwrap_or_default();
        verificar_integridade(&dia);
        Ok(CaixaResponse {
            totais: calcular_totais(&dia),
            dia,
        })
    }

    /// Save completo do snapshot: valida, sobrescreve o anterior, devolve
    /// os totais recalculados. Falha de validação -> nada é persistido.
    pub async fn salvar(&self, user_id: Uuid, dia: CaixaDia) -> Result<CaixaResponse, AppError> {
        validar_caixa(&dia).map_err(AppError::CaixaInvalido)?;
        self.repo.save(user_id, &dia).await?;
        Ok(CaixaResponse {
            totais: calcular_totais(&dia),
            dia,
        })
    }

    pub async fn limpar(&self, user_id: Uuid) -> Result<(), AppError> {
        self.repo.clear(user_id).await
    }

    pub async fn adicionar_cancelamento(
        &self,
        user_id: Uuid,
        autor: &str,
        payload: NovoCancelamentoPayload,
    ) -> Result<Cancelamento, AppError> {
        validar_cancelamento(&payload).map_err(AppError::CancelamentoInvalido)?;

        let mut dia = self.repo.load(user_id).await?.unwrap_or_default();

        // Id baseado no horário; colisão no mesmo milissegundo é resolvida
        // incrementando até liberar.
        let mut id = Utc::now().timestamp_millis();
        while dia.cancelamentos.iter().any(|c| c.id == id) {
            id += 1;
        }

        let registro = Cancelamento {
            id,
            numero_pedido: payload.numero_pedido,
            horario: payload.horario,
            vendedor: payload.vendedor,
            pedido_substituto: payload.pedido_substituto,
            motivo: payload.motivo,
            motivo_outro: payload.motivo_outro,
            valor: payload.valor,
            assinatura_gerente: payload.assinatura_gerente,
            data: Utc::now().date_naive(),
        };

        dia.cancelamentos.push(registro.clone());
        self.repo.save(user_id, &dia).await?;

        self.audit.registrar(
            AuditAction::Create,
            "cancelamento",
            &registro.id.to_string(),
            &format!(
                "Cancelamento do pedido {} no valor de R$ {}",
                registro.numero_pedido, registro.valor
            ),
            autor,
        );

        Ok(registro)
    }

    /// Remove por id. Id inexistente é um no-op silencioso.
    pub async fn remover_cancelamento(
        &self,
        user_id: Uuid,
        autor: &str,
        id: i64,
    ) -> Result<(), AppError> {
        let mut dia = self.repo.load(user_id).await?.unwrap_or_default();

        let Some(pos) = dia.cancelamentos.iter().position(|c| c.id == id) else {
            return Ok(());
        };

        let removido = dia.cancelamentos.remove(pos);
        self.repo.save(user_id, &dia).await?;

        self.audit.registrar(
            AuditAction::Delete,
            "cancelamento",
            &removido.id.to_string(),
            &format!(
                "Exclusão do cancelamento do pedido {} no valor de R$ {}",
                removido.numero_pedido, removido.valor
            ),
            autor,
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::caixa::{Cheque, Entradas, Saidas};

    fn valor(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn cliente(nome: &str, v: &str) -> ClienteValor {
        ClienteValor {
            nome: nome.to_string(),
            valor: valor(v),
        }
    }

    #[test]
    fn decomposicao_que_bate_no_centavo_passa() {
        let dia = CaixaDia {
            entradas: Entradas {
                pix_conta: valor("150.00"),
                clientes_pix_conta: vec![cliente("A", "100.00"), cliente("B", "50.00")],
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(validar_caixa(&dia).is_ok());
    }

    #[test]
    fn decomposicao_com_um_centavo_a_menos_falha() {
        let dia = CaixaDia {
            entradas: Entradas {
                pix_conta: valor("100.00"),
                clientes_pix_conta: vec![cliente("A", "99.99")],
                ..Default::default()
            },
            ..Default::default()
        };
        let erro = validar_caixa(&dia).unwrap_err();
        assert!(erro.contains("PIX conta"));
    }

    #[test]
    fn agregado_positivo_sem_clientes_falha() {
        let dia = CaixaDia {
            entradas: Entradas {
                boletos: valor("200.00"),
                ..Default::default()
            },
            ..Default::default()
        };
        let erro = validar_caixa(&dia).unwrap_err();
        assert_eq!(erro, "Informe os clientes de boletos.");
    }

    #[test]
    fn agregado_zerado_dispensa_decomposicao() {
        let dia = CaixaDia::default();
        assert!(validar_caixa(&dia).is_ok());
    }

    #[test]
    fn saida_justificada_pela_soma_passa() {
        let dia = CaixaDia {
            saidas: Saidas {
                saida: valor("300.00"),
                valor_compra: valor("200.00"),
                valor_saida_dinheiro: valor("100.00"),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(validar_caixa(&dia).is_ok());
    }

    #[test]
    fn saida_sem_justificativa_completa_falha() {
        let dia = CaixaDia {
            saidas: Saidas {
                saida: valor("300.00"),
                valor_compra: valor("200.00"),
                valor_saida_dinheiro: valor("50.00"),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(validar_caixa(&dia).is_err());
    }

    #[test]
    fn total_caixa_segue_a_formula_do_movimento() {
        let dia = CaixaDia {
            entradas: Entradas {
                dinheiro: valor("500.00"),
                cartao: valor("300.00"),
                pix_maquina: valor("200.00"),
                cheques: vec![Cheque {
                    cliente: "C".to_string(),
                    valor: valor("150.00"),
                }],
                ..Default::default()
            },
            saidas: Saidas {
                descontos: valor("30.00"),
                saida: valor("100.00"),
                valor_compra: valor("60.00"),
                valor_saida_dinheiro: valor("40.00"),
                puxador: valor("20.00"),
                devolucoes: valor("80.00"),
                incluir_devolucoes_no_movimento: true,
                correios: valor("25.00"),
                incluir_correios_no_movimento: false,
                vales: valor("50.00"),
                incluir_vales_no_movimento: true,
                ..Default::default()
            },
            cancelamentos: vec![],
        };

        let totais = calcular_totais(&dia);
        assert_eq!(totais.total_entradas, valor("1000.00"));
        assert_eq!(totais.total_cheques, valor("150.00"));
        assert_eq!(totais.total_saidas, valor("150.00"));
        // 1000 + 150 + (80 devoluções + 50 vales) - 150; correios fora (flag desligada)
        assert_eq!(totais.total_caixa, valor("1130.00"));
    }

    #[test]
    fn totais_identicos_apos_ida_e_volta_pelo_json() {
        let dia = CaixaDia {
            entradas: Entradas {
                dinheiro: valor("123.45"),
                pix_conta: valor("150.00"),
                clientes_pix_conta: vec![cliente("A", "100.00"), cliente("B", "50.00")],
                cheques: vec![Cheque {
                    cliente: "C".to_string(),
                    valor: valor("99.90"),
                }],
                ..Default::default()
            },
            saidas: Saidas {
                descontos: valor("10.10"),
                vales: valor("33.33"),
                incluir_vales_no_movimento: true,
                ..Default::default()
            },
            cancelamentos: vec![],
        };

        let antes = calcular_totais(&dia);

        let json = serde_json::to_value(&dia).unwrap();
        let recarregado: CaixaDia = serde_json::from_value(json).unwrap();
        let depois = calcular_totais(&recarregado);

        assert_eq!(antes, depois);
    }

    fn cancelamento_valido() -> NovoCancelamentoPayload {
        NovoCancelamentoPayload {
            numero_pedido: "4512".to_string(),
            horario: "14:35".to_string(),
            vendedor: "Carlos".to_string(),
            pedido_substituto: "4513".to_string(),
            motivo: MotivoCancelamento::ErroDigitacao,
            motivo_outro: None,
            valor: valor("89.90"),
            assinatura_gerente: "Gerente X".to_string(),
        }
    }

    #[test]
    fn cancelamento_valido_passa() {
        assert!(validar_cancelamento(&cancelamento_valido()).is_ok());
    }

    #[test]
    fn cancelamento_devolve_a_primeira_mensagem_de_erro() {
        let mut payload = cancelamento_valido();
        payload.numero_pedido = "".to_string();
        payload.vendedor = "".to_string();
        assert_eq!(
            validar_cancelamento(&payload).unwrap_err(),
            "Informe o número do pedido."
        );
    }

    #[test]
    fn motivo_outro_exige_descricao() {
        let mut payload = cancelamento_valido();
        payload.motivo = MotivoCancelamento::Outro;
        payload.motivo_outro = Some("  ".to_string());
        assert_eq!(
            validar_cancelamento(&payload).unwrap_err(),
            "Descreva o motivo do cancelamento."
        );
    }

    #[test]
    fn cancelamento_com_valor_zero_falha() {
        let mut payload = cancelamento_valido();
        payload.valor = Decimal::ZERO;
        assert_eq!(
            validar_cancelamento(&payload).unwrap_err(),
            "O valor do cancelamento deve ser maior que zero."
        );
    }
}
