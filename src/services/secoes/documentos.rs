// src/services/secoes/documentos.rs

use serde_json::Value;

use crate::common::feedback::MapaErros;
use crate::models::anexo::CategoriaAnexo;
use crate::services::anexos::RegistroAnexos;
use crate::services::secoes::{ResumoAnexo, Secao, VisaoSecao};

pub struct SecaoDocumentos;

impl Secao for SecaoDocumentos {
    fn id(&self) -> &'static str {
        "documentos"
    }

    fn montar(&self, _rascunho: &Value, anexos: &RegistroAnexos, _erros: &MapaErros) -> VisaoSecao {
        let mut visao = VisaoSecao::nova(self.id(), "Documentos", Vec::new());
        visao.anexos = anexos
            .anexos(CategoriaAnexo::Documento)
            .iter()
            .map(ResumoAnexo::from)
            .collect();
        visao
    }
}
