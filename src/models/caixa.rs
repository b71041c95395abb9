// src/models/caixa.rs
//
// Estado do movimento diário do caixa. Persistido como um snapshot JSONB
// único por usuário (dia corrente, sem histórico): o save sobrescreve o
// anterior, e as regras de fechamento em `services::caixa_service` precisam
// passar antes de qualquer persistência.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Item de decomposição por cliente (PIX conta, cartão link, boletos).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClienteValor {
    #[schema(example = "Cliente A")]
    pub nome: String,

    #[schema(example = "100.00")]
    pub valor: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cheque {
    pub cliente: String,

    #[schema(example = "350.00")]
    pub valor: Decimal,
}

// Entradas do dia. Os agregados com decomposição (pixConta, cartaoLink,
// boletos) devem bater com a soma da lista correspondente, centavo a centavo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Entradas {
    pub dinheiro: Decimal,
    pub cartao: Decimal,
    pub cartao_link: Decimal,
    pub boletos: Decimal,
    pub pix_maquina: Decimal,
    pub pix_conta: Decimal,
    pub outros: Decimal,

    pub clientes_pix_conta: Vec<ClienteValor>,
    pub clientes_cartao_link: Vec<ClienteValor>,
    pub clientes_boletos: Vec<ClienteValor>,

    // Cheques entram no total do caixa mas fora de `total_entradas`.
    pub cheques: Vec<Cheque>,
}

// Saídas e ajustes do dia. As categorias com flag "incluir no movimento"
// só participam do total do caixa quando a flag está ligada.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Saidas {
    pub descontos: Decimal,

    // Retirada do caixa: precisa ser justificada pela soma
    // valor_compra + valor_saida_dinheiro.
    pub saida: Decimal,
    pub valor_compra: Decimal,
    pub valor_saida_dinheiro: Decimal,

    pub devolucoes: Decimal,
    pub incluir_devolucoes_no_movimento: bool,

    pub correios: Decimal,
    pub incluir_correios_no_movimento: bool,

    pub vales: Decimal,
    pub incluir_vales_no_movimento: bool,

    // Comissão de puxador.
    pub puxador: Decimal,
}

// Motivos aceitos para cancelamento; "outro" exige texto livre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MotivoCancelamento {
    Desistencia,
    ErroDigitacao,
    ProdutoErrado,
    PrecoErrado,
    Duplicidade,
    Outro,
}

// Registro imutável depois de criado: nunca é atualizado, apenas
// adicionado ou removido por id (com trilha de auditoria).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cancelamento {
    // Id único baseado no horário (epoch em milissegundos).
    #[schema(example = 1754561000123_i64)]
    pub id: i64,

    #[schema(example = "4512")]
    pub numero_pedido: String,

    #[schema(example = "14:35")]
    pub horario: String,

    pub vendedor: String,

    #[schema(example = "4513")]
    pub pedido_substituto: String,

    pub motivo: MotivoCancelamento,
    pub motivo_outro: Option<String>,

    #[schema(example = "89.90")]
    pub valor: Decimal,

    pub assinatura_gerente: String,

    pub data: NaiveDate,
}

// Validado por `services::caixa_service::validar_cancelamento`, que devolve
// a primeira mensagem que falhar (contrato do registro de cancelamentos).
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NovoCancelamentoPayload {
    pub numero_pedido: String,
    pub horario: String,
    pub vendedor: String,
    pub pedido_substituto: String,
    pub motivo: MotivoCancelamento,
    pub motivo_outro: Option<String>,
    pub valor: Decimal,
    pub assinatura_gerente: String,
}

// O snapshot completo do dia.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CaixaDia {
    pub entradas: Entradas,
    pub saidas: Saidas,
    pub cancelamentos: Vec<Cancelamento>,
}

// Totais derivados, nunca armazenados.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TotaisCaixa {
    pub total_entradas: Decimal,
    pub total_cheques: Decimal,
    pub total_saidas: Decimal,
    pub total_caixa: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaixaResponse {
    pub dia: CaixaDia,
    pub totais: TotaisCaixa,
}
