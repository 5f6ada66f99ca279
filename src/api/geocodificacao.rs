// src/api/geocodificacao.rs

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::common::error::AppError;
use crate::models::endereco::Coordenadas;

#[async_trait]
pub trait Geocodificador: Send + Sync {
    /// Geocodifica o endereço montado em texto livre. A falha é
    /// apresentada ao usuário como recuperável; a digitação manual
    /// das coordenadas continua possível.
    async fn geocodificar(&self, endereco: &str) -> Result<Coordenadas, AppError>;
}

#[derive(Clone)]
pub struct HttpGeocodificador {
    client: Client,
    base_url: String,
}

impl HttpGeocodificador {
    pub fn novo(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Geocodificador for HttpGeocodificador {
    async fn geocodificar(&self, endereco: &str) -> Result<Coordenadas, AppError> {
        let url = format!("{}/search", self.base_url);
        let corpo: Value = self
            .client
            .get(&url)
            .query(&[("q", endereco), ("format", "json"), ("limit", "1")])
            .send()
            .await?
            .json()
            .await?;

        let primeiro = corpo
            .as_array()
            .and_then(|itens| itens.first())
            .ok_or(AppError::EnderecoNaoLocalizado)?;

        let coordenada = |nome: &str| {
            primeiro
                .get(nome)
                .and_then(Value::as_str)
                .and_then(|s| s.parse::<f64>().ok())
        };
        match (coordenada("lat"), coordenada("lon")) {
            (Some(latitude), Some(longitude)) => Ok(Coordenadas {
                latitude,
                longitude,
            }),
            _ => Err(AppError::EnderecoNaoLocalizado),
        }
    }
}
