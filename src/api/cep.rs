// src/api/cep.rs

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::common::error::AppError;
use crate::models::endereco::EnderecoCep;

#[async_trait]
pub trait ConsultaCep: Send + Sync {
    /// Consulta um CEP já normalizado (8 dígitos). `None` significa
    /// "não encontrado"; `Err` é falha de transporte.
    async fn buscar(&self, cep: &str) -> Result<Option<EnderecoCep>, AppError>;
}

#[derive(Clone)]
pub struct ViaCepClient {
    client: Client,
    base_url: String,
}

impl ViaCepClient {
    pub fn novo(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

fn campo(corpo: &Value, nome: &str) -> String {
    corpo.get(nome).and_then(Value::as_str).unwrap_or("").to_string()
}

#[async_trait]
impl ConsultaCep for ViaCepClient {
    async fn buscar(&self, cep: &str) -> Result<Option<EnderecoCep>, AppError> {
        let url = format!("{}/ws/{}/json/", self.base_url, cep);
        let corpo: Value = self.client.get(&url).send().await?.json().await?;

        // O ViaCEP sinaliza CEP inexistente com { "erro": true } no corpo
        let nao_encontrado = matches!(corpo.get("erro"), Some(Value::Bool(true)))
            || corpo.get("erro").and_then(Value::as_str) == Some("true");
        if nao_encontrado {
            return Ok(None);
        }

        Ok(Some(EnderecoCep {
            rua: campo(&corpo, "logradouro"),
            bairro: campo(&corpo, "bairro"),
            cidade: campo(&corpo, "localidade"),
            estado: campo(&corpo, "uf"),
        }))
    }
}
