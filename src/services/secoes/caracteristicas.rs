// src/services/secoes/caracteristicas.rs

use serde_json::Value;

use crate::common::feedback::MapaErros;
use crate::models::Entidade;
use crate::services::anexos::RegistroAnexos;
use crate::services::secoes::{financeiro, Campo, Secao, VisaoSecao};

// No imóvel esta aba são as características físicas; no cliente, o
// perfil de interesses de busca.
pub struct SecaoCaracteristicas {
    entidade: Entidade,
}

impl SecaoCaracteristicas {
    pub fn nova(entidade: Entidade) -> Self {
        Self { entidade }
    }
}

fn campo_faixa(rascunho: &Value, erros: &MapaErros, caminho_campo: &str, rotulo: &str) -> Campo {
    let mut campo = Campo::novo(rascunho, erros, caminho_campo, rotulo);
    campo.exibicao = campo.valor.as_str().and_then(financeiro::formatar_moeda);
    campo
}

impl Secao for SecaoCaracteristicas {
    fn id(&self) -> &'static str {
        match self.entidade {
            Entidade::Imovel => "caracteristicas",
            Entidade::Cliente => "interesses",
        }
    }

    fn montar(&self, rascunho: &Value, _anexos: &RegistroAnexos, erros: &MapaErros) -> VisaoSecao {
        match self.entidade {
            Entidade::Imovel => {
                let campos = vec![
                    Campo::novo(rascunho, erros, "caracteristicas.quartos", "Quartos"),
                    Campo::novo(rascunho, erros, "caracteristicas.suites", "Suítes"),
                    Campo::novo(rascunho, erros, "caracteristicas.banheiros", "Banheiros"),
                    Campo::novo(rascunho, erros, "caracteristicas.vagas", "Vagas de garagem"),
                    Campo::novo(rascunho, erros, "caracteristicas.areaTotal", "Área total (m²)"),
                    Campo::novo(rascunho, erros, "caracteristicas.areaUtil", "Área útil (m²)"),
                    Campo::novo(rascunho, erros, "caracteristicas.mobiliado", "Mobiliado"),
                ];
                VisaoSecao::nova(self.id(), "Características", campos)
            }
            Entidade::Cliente => {
                let campos = vec![
                    Campo::novo(rascunho, erros, "interesses.finalidade", "Finalidade"),
                    Campo::novo(rascunho, erros, "interesses.tipoImovel", "Tipo de imóvel"),
                    campo_faixa(rascunho, erros, "interesses.faixaPrecoMin", "Preço mínimo"),
                    campo_faixa(rascunho, erros, "interesses.faixaPrecoMax", "Preço máximo"),
                    Campo::novo(rascunho, erros, "interesses.cidades", "Cidades de interesse"),
                ];
                VisaoSecao::nova(self.id(), "Interesses", campos)
            }
        }
    }
}
