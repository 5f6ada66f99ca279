// src/common/error.rs

use thiserror::Error;

use crate::common::feedback::MapaErros;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Pré-condição de envio: imóvel sem coordenadas não sai do cliente
    #[error("Coordenadas ausentes ou inválidas")]
    PrecondicaoCoordenadas(MapaErros),

    #[error("Valor numérico inválido em '{0}'")]
    NumeroInvalido(String),

    #[error("Já existe um envio em andamento")]
    EnvioEmAndamento,

    #[error("O servidor recusou a requisição ({status}): {mensagem}")]
    Servidor { status: u16, mensagem: String },

    #[error("Não foi possível localizar as coordenadas do endereço")]
    EnderecoNaoLocalizado,

    #[error("Falha de comunicação com o servidor")]
    Transporte(#[from] reqwest::Error),

    #[error("Resposta inesperada do servidor")]
    RespostaInvalida(#[from] serde_json::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    /// Mensagem curta apresentável ao usuário final.
    pub fn mensagem_usuario(&self) -> String {
        match self {
            AppError::Servidor { mensagem, .. } if !mensagem.is_empty() => mensagem.clone(),
            AppError::Servidor { .. } => {
                "Não foi possível salvar as alterações. Tente novamente.".to_string()
            }
            AppError::Transporte(_) => {
                "Falha de comunicação com o servidor. Tente novamente.".to_string()
            }
            outro => outro.to_string(),
        }
    }
}
