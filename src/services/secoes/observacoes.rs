// src/services/secoes/observacoes.rs

use serde_json::Value;

use crate::common::feedback::MapaErros;
use crate::services::anexos::RegistroAnexos;
use crate::services::secoes::{Campo, Secao, VisaoSecao};

pub struct SecaoObservacoes;

impl Secao for SecaoObservacoes {
    fn id(&self) -> &'static str {
        "observacoes"
    }

    fn montar(&self, rascunho: &Value, _anexos: &RegistroAnexos, erros: &MapaErros) -> VisaoSecao {
        let campos = vec![Campo::novo(rascunho, erros, "observacoes.texto", "Observações")];
        VisaoSecao::nova(self.id(), "Observações", campos)
    }
}
