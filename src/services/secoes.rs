// src/services/secoes.rs

pub mod identificacao;
pub use identificacao::SecaoIdentificacao;
pub mod endereco;
pub use endereco::SecaoEndereco;
pub mod financeiro;
pub use financeiro::SecaoFinanceiro;
pub mod caracteristicas;
pub use caracteristicas::SecaoCaracteristicas;
pub mod midia;
pub use midia::SecaoMidia;
pub mod documentos;
pub use documentos::SecaoDocumentos;
pub mod observacoes;
pub use observacoes::SecaoObservacoes;

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::common::feedback::MapaErros;
use crate::models::anexo::{Anexo, CategoriaAnexo, TipoDocumento};
use crate::models::Entidade;
use crate::services::anexos::RegistroAnexos;
use crate::services::caminho;

// Cada aba lê e escreve uma subárvore do rascunho através do acessador
// de caminhos e expõe um modelo de visão; a camada de apresentação só
// renderiza. Toda mutação volta pelo orquestrador, nunca direto.

// --- MODELO DE VISÃO ---

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Campo {
    pub caminho: String,
    pub rotulo: String,
    pub valor: Value,
    pub erro: Option<String>,
    pub visivel: bool,
    // Formatação de apresentação (moeda etc.); o valor bruto fica em `valor`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exibicao: Option<String>,
}

impl Campo {
    pub fn novo(rascunho: &Value, erros: &MapaErros, caminho_campo: &str, rotulo: &str) -> Self {
        Self {
            caminho: caminho_campo.to_string(),
            rotulo: rotulo.to_string(),
            valor: caminho::obter(rascunho, caminho_campo)
                .cloned()
                .unwrap_or(Value::String(String::new())),
            erro: erros.get(caminho_campo).cloned(),
            visivel: true,
            exibicao: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumoAnexo {
    pub previa: Uuid,
    pub nome_arquivo: String,
    pub tamanho_bytes: u64,
    pub categoria: CategoriaAnexo,
    pub tipo_documento: Option<TipoDocumento>,
    pub persistido: bool,
}

impl From<&Anexo> for ResumoAnexo {
    fn from(anexo: &Anexo) -> Self {
        Self {
            previa: anexo.previa,
            nome_arquivo: anexo.nome_arquivo.clone(),
            tamanho_bytes: anexo.tamanho_bytes,
            categoria: anexo.categoria,
            tipo_documento: anexo.tipo_documento,
            persistido: anexo.identidade.is_some(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisaoSecao {
    pub id: &'static str,
    pub titulo: &'static str,
    pub campos: Vec<Campo>,
    pub anexos: Vec<ResumoAnexo>,
    /// Quantidade de erros apontando para esta aba.
    pub erros: usize,
}

impl VisaoSecao {
    fn nova(id: &'static str, titulo: &'static str, campos: Vec<Campo>) -> Self {
        let erros = campos.iter().filter(|c| c.erro.is_some()).count();
        Self {
            id,
            titulo,
            campos,
            anexos: Vec::new(),
            erros,
        }
    }
}

// --- CONTRATO UNIFORME DAS SEÇÕES ---

pub trait Secao {
    fn id(&self) -> &'static str;
    fn montar(&self, rascunho: &Value, anexos: &RegistroAnexos, erros: &MapaErros) -> VisaoSecao;
}

/// Conjunto de seções de cada editor, na ordem das abas.
pub fn secoes_para(entidade: Entidade) -> Vec<Box<dyn Secao>> {
    match entidade {
        Entidade::Imovel => vec![
            Box::new(SecaoIdentificacao::nova(entidade)),
            Box::new(SecaoEndereco),
            Box::new(SecaoFinanceiro),
            Box::new(SecaoCaracteristicas::nova(entidade)),
            Box::new(SecaoMidia),
            Box::new(SecaoDocumentos),
            Box::new(SecaoObservacoes),
        ],
        Entidade::Cliente => vec![
            Box::new(SecaoIdentificacao::nova(entidade)),
            Box::new(SecaoEndereco),
            Box::new(SecaoCaracteristicas::nova(entidade)),
            Box::new(SecaoDocumentos),
            Box::new(SecaoObservacoes),
        ],
    }
}
