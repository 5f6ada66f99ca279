// src/models/imovel.rs

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use validator::Validate;

use crate::models::anexo::AnexoMetadados;
use crate::models::endereco::{self, EnderecoPayload};
use crate::services::validacao::{Exigencia, Regra};

// --- RASCUNHO ---

// Rascunho completo de um imóvel em edição. Valores numéricos e seleções
// são mantidos como string bruta (espelho do campo de texto) e só são
// coagidos na serialização.
pub fn rascunho_padrao() -> Value {
    json!({
        "identificacao": {
            "titulo": "",
            "codigoReferencia": "",
            "tipo": "",
            "finalidade": "",
            "descricao": "",
        },
        "endereco": endereco::subarvore_padrao(),
        "valores": {
            "precoVenda": "",
            "precoAluguel": "",
            "precoTemporada": "",
            "condominio": "",
            "iptu": "",
        },
        "caracteristicas": {
            "quartos": "",
            "suites": "",
            "banheiros": "",
            "vagas": "",
            "areaTotal": "",
            "areaUtil": "",
            "mobiliado": false,
        },
        "vinculos": {
            "corretorId": "",
            "proprietarioId": "",
        },
        "observacoes": {
            "texto": "",
        },
    })
}

/// Esquema declarativo do imóvel. Cobre o rascunho inteiro, inclusive
/// abas que o usuário ainda não visitou.
pub fn esquema() -> Vec<Regra> {
    let mut regras = vec![
        Regra::nova("identificacao.titulo", "Título", Exigencia::TextoObrigatorio),
        Regra::nova("identificacao.tipo", "Tipo do imóvel", Exigencia::TextoObrigatorio),
        Regra::nova("identificacao.finalidade", "Finalidade", Exigencia::TextoObrigatorio),
        Regra::nova("valores.precoVenda", "Preço de venda", Exigencia::NumeroOpcional),
        Regra::nova("valores.precoAluguel", "Preço de aluguel", Exigencia::NumeroOpcional),
        Regra::nova("valores.precoTemporada", "Preço de temporada", Exigencia::NumeroOpcional),
        Regra::nova("valores.condominio", "Condomínio", Exigencia::NumeroOpcional),
        Regra::nova("valores.iptu", "IPTU", Exigencia::NumeroOpcional),
        Regra::nova("caracteristicas.quartos", "Quartos", Exigencia::NumeroOpcional),
        Regra::nova("caracteristicas.suites", "Suítes", Exigencia::NumeroOpcional),
        Regra::nova("caracteristicas.banheiros", "Banheiros", Exigencia::NumeroOpcional),
        Regra::nova("caracteristicas.vagas", "Vagas", Exigencia::NumeroOpcional),
        Regra::nova("caracteristicas.areaTotal", "Área total", Exigencia::NumeroOpcional),
        Regra::nova("caracteristicas.areaUtil", "Área útil", Exigencia::NumeroOpcional),
        Regra::nova("caracteristicas.mobiliado", "Mobiliado", Exigencia::BooleanoOpcional),
    ];
    regras.extend(endereco::regras(true));
    regras
}

// --- PAYLOAD (fronteira de serialização) ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValoresPayload {
    pub preco_venda: Option<f64>,
    pub preco_aluguel: Option<f64>,
    pub preco_temporada: Option<f64>,
    pub condominio: Option<f64>,
    pub iptu: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaracteristicasPayload {
    pub quartos: Option<i64>,
    pub suites: Option<i64>,
    pub banheiros: Option<i64>,
    pub vagas: Option<i64>,
    pub area_total: Option<f64>,
    pub area_util: Option<f64>,
    pub mobiliado: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ImovelPayload {
    #[validate(length(min = 1, message = "O título é obrigatório"))]
    pub titulo: String,
    pub codigo_referencia: Option<String>,
    #[validate(length(min = 1, message = "O tipo do imóvel é obrigatório"))]
    pub tipo: String,
    #[validate(length(min = 1, message = "A finalidade é obrigatória"))]
    pub finalidade: String,
    pub descricao: Option<String>,
    #[validate(nested)]
    pub endereco: EnderecoPayload,
    pub valores: ValoresPayload,
    pub caracteristicas: CaracteristicasPayload,
    pub corretor_id: Option<i64>,
    pub proprietario_id: Option<i64>,
    pub observacoes: Option<String>,
    pub anexos: Vec<AnexoMetadados>,
}
