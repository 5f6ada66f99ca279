// src/models/cliente.rs

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use validator::Validate;

use crate::models::anexo::AnexoMetadados;
use crate::models::endereco::{self, EnderecoPayload};
use crate::services::validacao::{Exigencia, Regra};

// --- RASCUNHO ---

pub fn rascunho_padrao() -> Value {
    json!({
        "identificacao": {
            "nome": "",
            "cpfCnpj": "",
            "email": "",
            "telefone": "",
            "celular": "",
            "perfil": "",
        },
        "endereco": endereco::subarvore_padrao(),
        "interesses": {
            "finalidade": "",
            "tipoImovel": "",
            "faixaPrecoMin": "",
            "faixaPrecoMax": "",
            "cidades": "",
        },
        "vinculos": {
            "corretorId": "",
        },
        "observacoes": {
            "texto": "",
        },
    })
}

/// Esquema declarativo do cliente.
pub fn esquema() -> Vec<Regra> {
    let mut regras = vec![
        Regra::nova("identificacao.nome", "Nome", Exigencia::TextoObrigatorio),
        Regra::nova("identificacao.perfil", "Perfil", Exigencia::TextoObrigatorio),
        Regra::nova("identificacao.email", "E-mail", Exigencia::EmailOpcional),
        Regra::nova("interesses.faixaPrecoMin", "Faixa de preço mínima", Exigencia::NumeroOpcional),
        Regra::nova("interesses.faixaPrecoMax", "Faixa de preço máxima", Exigencia::NumeroOpcional),
    ];
    regras.extend(endereco::regras(false));
    regras
}

// --- PAYLOAD (fronteira de serialização) ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteressesPayload {
    pub finalidade: Option<String>,
    pub tipo_imovel: Option<String>,
    pub faixa_preco_min: Option<f64>,
    pub faixa_preco_max: Option<f64>,
    pub cidades: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClientePayload {
    #[validate(length(min = 1, message = "O nome é obrigatório"))]
    pub nome: String,
    pub cpf_cnpj: Option<String>,
    #[validate(email(message = "O e-mail fornecido é inválido"))]
    pub email: Option<String>,
    pub telefone: Option<String>,
    pub celular: Option<String>,
    #[validate(length(min = 1, message = "O perfil é obrigatório"))]
    pub perfil: String,
    #[validate(nested)]
    pub endereco: EnderecoPayload,
    pub interesses: InteressesPayload,
    pub corretor_id: Option<i64>,
    pub observacoes: Option<String>,
    pub anexos: Vec<AnexoMetadados>,
}
