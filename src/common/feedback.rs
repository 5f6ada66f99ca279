// src/common/feedback.rs

use std::collections::BTreeMap;

use serde::Serialize;

// Mapa de erros: caminho do campo ("endereco.cep") -> mensagem.
// BTreeMap para que a ordem de exibição seja determinística.
pub type MapaErros = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severidade {
    Sucesso,
    Erro,
}

// Resultado estruturado das operações de staging, validação e envio.
// O núcleo nunca dispara notificações; a camada de apresentação
// decide como exibir cada uma destas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notificacao {
    pub severidade: Severidade,
    pub mensagem: String,
}

impl Notificacao {
    pub fn sucesso(mensagem: impl Into<String>) -> Self {
        Self {
            severidade: Severidade::Sucesso,
            mensagem: mensagem.into(),
        }
    }

    pub fn erro(mensagem: impl Into<String>) -> Self {
        Self {
            severidade: Severidade::Erro,
            mensagem: mensagem.into(),
        }
    }

    pub fn e_erro(&self) -> bool {
        self.severidade == Severidade::Erro
    }
}
