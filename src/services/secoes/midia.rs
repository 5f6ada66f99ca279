// src/services/secoes/midia.rs

use serde_json::Value;

use crate::common::feedback::MapaErros;
use crate::models::anexo::CategoriaAnexo;
use crate::services::anexos::RegistroAnexos;
use crate::services::secoes::{ResumoAnexo, Secao, VisaoSecao};

// Fotos e vídeos em staging. As operações de adicionar/remover ficam no
// orquestrador; aqui só a visão.
pub struct SecaoMidia;

impl Secao for SecaoMidia {
    fn id(&self) -> &'static str {
        "midia"
    }

    fn montar(&self, _rascunho: &Value, anexos: &RegistroAnexos, _erros: &MapaErros) -> VisaoSecao {
        let mut visao = VisaoSecao::nova(self.id(), "Mídia", Vec::new());
        visao.anexos = anexos
            .anexos(CategoriaAnexo::Foto)
            .iter()
            .chain(anexos.anexos(CategoriaAnexo::Video).iter())
            .map(ResumoAnexo::from)
            .collect();
        visao
    }
}
