// src/models/endereco.rs

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use validator::Validate;

use crate::services::validacao::{Exigencia, Regra};

// Subárvore de endereço compartilhada pelos dois editores. Todo controle
// precisa de um valor definido, então os campos nascem como string vazia.
pub fn subarvore_padrao() -> Value {
    json!({
        "rua": "",
        "numero": "",
        "complemento": "",
        "andar": "",
        "bairro": "",
        "cidade": "",
        "estado": "",
        "cep": "",
        "latitude": "",
        "longitude": "",
    })
}

/// Regras de validação da subárvore. No editor de imóvel o endereço é
/// obrigatório; no de cliente só os formatos são verificados.
pub fn regras(obrigatorio: bool) -> Vec<Regra> {
    let mut regras = Vec::new();
    if obrigatorio {
        regras.push(Regra::nova("endereco.rua", "Rua", Exigencia::TextoObrigatorio));
        regras.push(Regra::nova("endereco.numero", "Número", Exigencia::TextoObrigatorio));
        regras.push(Regra::nova("endereco.bairro", "Bairro", Exigencia::TextoObrigatorio));
        regras.push(Regra::nova("endereco.cidade", "Cidade", Exigencia::TextoObrigatorio));
        regras.push(Regra::nova("endereco.estado", "Estado", Exigencia::TextoObrigatorio));
    }
    regras.push(Regra::nova("endereco.cep", "CEP", Exigencia::Cep));
    regras.push(Regra::nova("endereco.andar", "Andar", Exigencia::NumeroOpcional));
    regras.push(Regra::nova("endereco.latitude", "Latitude", Exigencia::NumeroOpcional));
    regras.push(Regra::nova("endereco.longitude", "Longitude", Exigencia::NumeroOpcional));
    regras
}

// --- PAYLOAD (fronteira de serialização) ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EnderecoPayload {
    pub rua: String,
    pub numero: String,
    pub complemento: Option<String>,
    pub andar: Option<i64>,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
    #[validate(length(equal = 8, message = "O CEP deve ter 8 dígitos"))]
    pub cep: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

// --- RESULTADOS DE SERVIÇOS EXTERNOS ---

// Resposta da consulta de CEP (ViaCEP). Preenche apenas campos
// que o usuário ainda não digitou.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnderecoCep {
    pub rua: String,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordenadas {
    pub latitude: f64,
    pub longitude: f64,
}
