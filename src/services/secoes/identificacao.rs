// src/services/secoes/identificacao.rs

use serde_json::Value;

use crate::common::feedback::MapaErros;
use crate::models::Entidade;
use crate::services::anexos::RegistroAnexos;
use crate::services::secoes::{Campo, Secao, VisaoSecao};

pub struct SecaoIdentificacao {
    entidade: Entidade,
}

impl SecaoIdentificacao {
    pub fn nova(entidade: Entidade) -> Self {
        Self { entidade }
    }
}

impl Secao for SecaoIdentificacao {
    fn id(&self) -> &'static str {
        "identificacao"
    }

    fn montar(&self, rascunho: &Value, _anexos: &RegistroAnexos, erros: &MapaErros) -> VisaoSecao {
        let campos = match self.entidade {
            Entidade::Imovel => vec![
                Campo::novo(rascunho, erros, "identificacao.titulo", "Título"),
                Campo::novo(rascunho, erros, "identificacao.codigoReferencia", "Código de referência"),
                Campo::novo(rascunho, erros, "identificacao.tipo", "Tipo do imóvel"),
                Campo::novo(rascunho, erros, "identificacao.finalidade", "Finalidade"),
                Campo::novo(rascunho, erros, "identificacao.descricao", "Descrição"),
                Campo::novo(rascunho, erros, "vinculos.corretorId", "Corretor responsável"),
                Campo::novo(rascunho, erros, "vinculos.proprietarioId", "Proprietário"),
            ],
            Entidade::Cliente => vec![
                Campo::novo(rascunho, erros, "identificacao.nome", "Nome"),
                Campo::novo(rascunho, erros, "identificacao.cpfCnpj", "CPF/CNPJ"),
                Campo::novo(rascunho, erros, "identificacao.email", "E-mail"),
                Campo::novo(rascunho, erros, "identificacao.telefone", "Telefone"),
                Campo::novo(rascunho, erros, "identificacao.celular", "Celular"),
                Campo::novo(rascunho, erros, "identificacao.perfil", "Perfil"),
                Campo::novo(rascunho, erros, "vinculos.corretorId", "Corretor responsável"),
            ],
        };
        VisaoSecao::nova(self.id(), "Identificação", campos)
    }
}
