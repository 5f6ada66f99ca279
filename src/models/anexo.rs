// src/models/anexo.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MB: u64 = 1024 * 1024;

// --- 1. Categorias ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoriaAnexo {
    Foto,
    Video,
    Documento,
}

// Tetos por categoria. `None` significa sem limite.
#[derive(Debug, Clone, Copy)]
pub struct LimitesCategoria {
    pub max_arquivos: Option<usize>,
    pub max_bytes_por_arquivo: Option<u64>,
}

impl CategoriaAnexo {
    /// Nome do campo das partes binárias no corpo multipart.
    pub fn campo_multipart(&self) -> &'static str {
        match self {
            CategoriaAnexo::Foto => "fotos",
            CategoriaAnexo::Video => "videos",
            CategoriaAnexo::Documento => "documentos",
        }
    }

    pub fn limites(&self) -> LimitesCategoria {
        match self {
            CategoriaAnexo::Foto => LimitesCategoria {
                max_arquivos: Some(10),
                max_bytes_por_arquivo: None,
            },
            CategoriaAnexo::Video => LimitesCategoria {
                max_arquivos: Some(3),
                max_bytes_por_arquivo: Some(50 * MB),
            },
            CategoriaAnexo::Documento => LimitesCategoria {
                max_arquivos: None,
                max_bytes_por_arquivo: Some(10 * MB),
            },
        }
    }

    pub fn rotulo_plural(&self) -> &'static str {
        match self {
            CategoriaAnexo::Foto => "fotos",
            CategoriaAnexo::Video => "vídeos",
            CategoriaAnexo::Documento => "documentos",
        }
    }
}

// --- 2. Tipos de documento ---

// Etiqueta de reclassificação dos documentos; não toca no binário.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoDocumento {
    Matricula,
    Iptu,
    Contrato,
    Procuracao,
    Rg,
    Cpf,
    ComprovanteRenda,
    Outro,
}

// --- 3. Arquivo recém-selecionado ---

// O que chega da camada de apresentação quando o usuário escolhe arquivos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArquivoSelecionado {
    pub nome: String,
    pub tipo_mime: String,
    pub dados: Vec<u8>,
}

// --- 4. Anexo em staging ---

// Invariante: `identidade == None` implica `carga_pendente.is_some()`.
// Anexos carregados de uma entidade existente têm identidade e podem
// não ter carga pendente (já persistidos, não modificados).
#[derive(Debug, Clone, PartialEq)]
pub struct Anexo {
    pub identidade: Option<i64>,
    pub nome_arquivo: String,
    pub tipo_mime: String,
    pub tamanho_bytes: u64,
    pub categoria: CategoriaAnexo,
    pub tipo_documento: Option<TipoDocumento>,
    // Referência local de prévia, efêmera; nunca vai ao servidor.
    pub previa: Uuid,
    pub carga_pendente: Option<Vec<u8>>,
    pub adicionado_em: DateTime<Utc>,
}

impl Anexo {
    pub fn pendente(&self) -> bool {
        self.carga_pendente.is_some()
    }
}

// --- 5. Metadados enviados ao servidor ---

// Projeção do Anexo sem as referências locais.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnexoMetadados {
    pub identidade: Option<i64>,
    pub nome_arquivo: String,
    pub categoria: CategoriaAnexo,
    pub tipo_mime: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_documento: Option<TipoDocumento>,
}

impl From<&Anexo> for AnexoMetadados {
    fn from(anexo: &Anexo) -> Self {
        Self {
            identidade: anexo.identidade,
            nome_arquivo: anexo.nome_arquivo.clone(),
            categoria: anexo.categoria,
            tipo_mime: anexo.tipo_mime.clone(),
            tipo_documento: anexo.tipo_documento,
        }
    }
}
