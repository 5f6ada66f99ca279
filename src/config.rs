// src/config.rs

use std::{env, time::Duration};

use reqwest::Client;

use crate::api::{HttpDiretorio, HttpGeocodificador, HttpPersistencia, ViaCepClient};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub viacep_base_url: String,
    pub geocode_base_url: String,
    pub http_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let api_base_url =
            env::var("API_BASE_URL").map_err(|_| anyhow::anyhow!("API_BASE_URL deve ser definida"))?;
        let viacep_base_url = env::var("VIACEP_BASE_URL")
            .unwrap_or_else(|_| "https://viacep.com.br".to_string());
        let geocode_base_url = env::var("GEOCODE_BASE_URL")
            .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_string());
        let http_timeout = env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        Ok(Self {
            api_base_url,
            viacep_base_url,
            geocode_base_url,
            http_timeout,
        })
    }
}

// Estado compartilhado da aplicação: um cliente HTTP reutilizado por
// todas as fronteiras externas.
#[derive(Clone)]
pub struct EstadoApp {
    pub persistencia: HttpPersistencia,
    pub cep: ViaCepClient,
    pub geocodificador: HttpGeocodificador,
    pub diretorio: HttpDiretorio,
}

impl EstadoApp {
    pub fn novo(config: &AppConfig) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(config.http_timeout).build()?;

        tracing::info!("✅ Clientes HTTP configurados para {}", config.api_base_url);

        // --- Monta o gráfico de dependências ---
        Ok(Self {
            persistencia: HttpPersistencia::nova(client.clone(), config.api_base_url.clone()),
            cep: ViaCepClient::novo(client.clone(), config.viacep_base_url.clone()),
            geocodificador: HttpGeocodificador::novo(
                client.clone(),
                config.geocode_base_url.clone(),
            ),
            diretorio: HttpDiretorio::novo(client, config.api_base_url.clone()),
        })
    }
}
