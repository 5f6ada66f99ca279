pub mod anexo;
pub use anexo::{Anexo, AnexoMetadados, ArquivoSelecionado, CategoriaAnexo, TipoDocumento};
pub mod endereco;
pub use endereco::{Coordenadas, EnderecoCep, EnderecoPayload};
pub mod imovel;
pub use imovel::ImovelPayload;
pub mod cliente;
pub use cliente::ClientePayload;

use serde::{Deserialize, Serialize};

// Qual editor está aberto. Decide o esquema de validação, as seções
// exibidas e o nome da parte JSON no envio multipart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entidade {
    Imovel,
    Cliente,
}

impl Entidade {
    /// Nome da parte JSON no corpo multipart.
    pub fn nome_parte(&self) -> &'static str {
        match self {
            Entidade::Imovel => "imovel",
            Entidade::Cliente => "cliente",
        }
    }

    /// Segmento de rota na API de persistência.
    pub fn recurso(&self) -> &'static str {
        match self {
            Entidade::Imovel => "imoveis",
            Entidade::Cliente => "clientes",
        }
    }

    pub fn rotulo(&self) -> &'static str {
        match self {
            Entidade::Imovel => "Imóvel",
            Entidade::Cliente => "Cliente",
        }
    }
}
