// src/api/persistencia.rs

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde_json::Value;

use crate::common::error::AppError;
use crate::services::serializacao::Submissao;

// Fronteira com a API de persistência. O orquestrador fala com o trait;
// os testes injetam um dublê.
#[async_trait]
pub trait PersistenciaApi: Send + Sync {
    async fn criar(&self, submissao: Submissao) -> Result<Value, AppError>;
    async fn atualizar(&self, identidade: i64, submissao: Submissao) -> Result<Value, AppError>;
}

#[derive(Clone)]
pub struct HttpPersistencia {
    client: Client,
    base_url: String,
}

impl HttpPersistencia {
    pub fn nova(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    // Corpo multipart: uma parte JSON com o nome da entidade
    // ("imovel"/"cliente") e uma parte binária por anexo pendente,
    // agrupadas por categoria ("fotos", "videos", "documentos").
    fn montar_formulario(submissao: Submissao) -> Result<Form, AppError> {
        let mut form = Form::new().part(
            submissao.entidade.nome_parte(),
            Part::text(submissao.metadados.to_string()).mime_str("application/json")?,
        );
        for parte in submissao.partes {
            form = form.part(
                parte.campo,
                Part::bytes(parte.dados)
                    .file_name(parte.nome_arquivo)
                    .mime_str(&parte.tipo_mime)?,
            );
        }
        Ok(form)
    }

    async fn tratar_resposta(resposta: Response) -> Result<Value, AppError> {
        let status = resposta.status();
        if status.is_success() {
            return Ok(resposta.json().await?);
        }

        // Usa a mensagem do servidor quando o corpo traz uma
        let corpo = resposta.text().await.unwrap_or_default();
        let mensagem = serde_json::from_str::<Value>(&corpo)
            .ok()
            .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_default();
        tracing::error!("A API de persistência respondeu {}: {}", status, mensagem);
        Err(AppError::Servidor {
            status: status.as_u16(),
            mensagem,
        })
    }
}

#[async_trait]
impl PersistenciaApi for HttpPersistencia {
    async fn criar(&self, submissao: Submissao) -> Result<Value, AppError> {
        let url = format!("{}/api/{}", self.base_url, submissao.entidade.recurso());
        tracing::info!(
            "Criando {} com {} parte(s) binária(s)",
            submissao.entidade.nome_parte(),
            submissao.partes.len()
        );
        let form = Self::montar_formulario(submissao)?;
        let resposta = self.client.post(&url).multipart(form).send().await?;
        Self::tratar_resposta(resposta).await
    }

    async fn atualizar(&self, identidade: i64, submissao: Submissao) -> Result<Value, AppError> {
        let url = format!(
            "{}/api/{}/{}",
            self.base_url,
            submissao.entidade.recurso(),
            identidade
        );
        tracing::info!(
            "Atualizando {} #{} com {} parte(s) binária(s)",
            submissao.entidade.nome_parte(),
            identidade,
            submissao.partes.len()
        );
        let form = Self::montar_formulario(submissao)?;
        let resposta = self.client.put(&url).multipart(form).send().await?;
        Self::tratar_resposta(resposta).await
    }
}
