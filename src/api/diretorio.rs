// src/api/diretorio.rs

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::common::error::AppError;

// Opção de um seletor (corretor responsável, proprietário). O valor é a
// string que o controle guarda no rascunho; o id numérico só aparece na
// serialização.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpcaoSelecao {
    pub valor: String,
    pub rotulo: String,
}

#[async_trait]
pub trait Diretorio: Send + Sync {
    async fn listar_corretores(&self) -> Result<Vec<OpcaoSelecao>, AppError>;
    async fn listar_clientes(&self) -> Result<Vec<OpcaoSelecao>, AppError>;
}

#[derive(Debug, Deserialize)]
struct ItemDiretorio {
    id: i64,
    nome: String,
}

#[derive(Clone)]
pub struct HttpDiretorio {
    client: Client,
    base_url: String,
}

impl HttpDiretorio {
    pub fn novo(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn listar(&self, recurso: &str) -> Result<Vec<OpcaoSelecao>, AppError> {
        let url = format!("{}/api/{}", self.base_url, recurso);
        let itens: Vec<ItemDiretorio> = self.client.get(&url).send().await?.json().await?;
        Ok(itens
            .into_iter()
            .map(|item| OpcaoSelecao {
                valor: item.id.to_string(),
                rotulo: item.nome,
            })
            .collect())
    }
}

#[async_trait]
impl Diretorio for HttpDiretorio {
    async fn listar_corretores(&self) -> Result<Vec<OpcaoSelecao>, AppError> {
        self.listar("corretores").await
    }

    async fn listar_clientes(&self) -> Result<Vec<OpcaoSelecao>, AppError> {
        self.listar("clientes").await
    }
}
