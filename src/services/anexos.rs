// src/services/anexos.rs

use chrono::Utc;
use uuid::Uuid;

use crate::common::feedback::Notificacao;
use crate::models::anexo::{Anexo, ArquivoSelecionado, CategoriaAnexo, TipoDocumento, MB};

// --- REGISTRO DE ANEXOS (STAGING) ---
// Guarda localmente os binários selecionados antes de existirem no
// servidor. As duas únicas condições de recusa são teto de tamanho por
// arquivo e teto de quantidade por categoria; ambas são devolvidas como
// Notificacao, nunca como erro lançado, e deixam o estado anterior
// intocado.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistroAnexos {
    fotos: Vec<Anexo>,
    videos: Vec<Anexo>,
    documentos: Vec<Anexo>,
}

impl RegistroAnexos {
    pub fn novo() -> Self {
        Self::default()
    }

    fn lista(&self, categoria: CategoriaAnexo) -> &Vec<Anexo> {
        match categoria {
            CategoriaAnexo::Foto => &self.fotos,
            CategoriaAnexo::Video => &self.videos,
            CategoriaAnexo::Documento => &self.documentos,
        }
    }

    fn lista_mut(&mut self, categoria: CategoriaAnexo) -> &mut Vec<Anexo> {
        match categoria {
            CategoriaAnexo::Foto => &mut self.fotos,
            CategoriaAnexo::Video => &mut self.videos,
            CategoriaAnexo::Documento => &mut self.documentos,
        }
    }

    pub fn anexos(&self, categoria: CategoriaAnexo) -> &[Anexo] {
        self.lista(categoria)
    }

    /// Todos os anexos na ordem das partes do envio:
    /// fotos, depois vídeos, depois documentos; dentro da categoria,
    /// ordem de inserção.
    pub fn todos(&self) -> impl Iterator<Item = &Anexo> {
        self.fotos
            .iter()
            .chain(self.videos.iter())
            .chain(self.documentos.iter())
    }

    pub fn total(&self) -> usize {
        self.fotos.len() + self.videos.len() + self.documentos.len()
    }

    /// Registra um anexo já persistido (carregado com a entidade).
    pub fn registrar_existente(&mut self, anexo: Anexo) {
        self.lista_mut(anexo.categoria).push(anexo);
    }

    /// Adiciona um lote de arquivos. Qualquer violação recusa o lote
    /// INTEIRO e a lista em staging permanece exatamente como estava.
    pub fn adicionar(
        &mut self,
        categoria: CategoriaAnexo,
        arquivos: Vec<ArquivoSelecionado>,
    ) -> Notificacao {
        if arquivos.is_empty() {
            return Notificacao::erro("Nenhum arquivo selecionado.");
        }

        let limites = categoria.limites();

        if let Some(max_bytes) = limites.max_bytes_por_arquivo {
            for arquivo in &arquivos {
                if arquivo.dados.len() as u64 > max_bytes {
                    return Notificacao::erro(format!(
                        "O arquivo '{}' excede o limite de {} MB.",
                        arquivo.nome,
                        max_bytes / MB
                    ));
                }
            }
        }

        if let Some(max_arquivos) = limites.max_arquivos {
            if self.lista(categoria).len() + arquivos.len() > max_arquivos {
                return Notificacao::erro(format!(
                    "Limite de {} {} excedido.",
                    max_arquivos,
                    categoria.rotulo_plural()
                ));
            }
        }

        let quantidade = arquivos.len();
        let tipo_documento = match categoria {
            CategoriaAnexo::Documento => Some(TipoDocumento::Outro),
            _ => None,
        };
        let destino = self.lista_mut(categoria);
        for arquivo in arquivos {
            destino.push(Anexo {
                identidade: None,
                tamanho_bytes: arquivo.dados.len() as u64,
                nome_arquivo: arquivo.nome,
                tipo_mime: arquivo.tipo_mime,
                categoria,
                tipo_documento,
                previa: Uuid::new_v4(),
                carga_pendente: Some(arquivo.dados),
                adicionado_em: Utc::now(),
            });
        }

        Notificacao::sucesso(format!("{} arquivo(s) adicionado(s).", quantidade))
    }

    /// Remove o anexo na posição dada. Os vizinhos não são renumerados.
    pub fn remover(&mut self, categoria: CategoriaAnexo, indice: usize) -> Notificacao {
        let lista = self.lista_mut(categoria);
        if indice >= lista.len() {
            return Notificacao::erro("Anexo inexistente.");
        }
        let removido = lista.remove(indice);
        Notificacao::sucesso(format!("'{}' removido.", removido.nome_arquivo))
    }

    /// Troca a etiqueta de tipo de um documento sem tocar no binário.
    pub fn reclassificar(&mut self, indice: usize, novo_tipo: TipoDocumento) -> Notificacao {
        match self.documentos.get_mut(indice) {
            Some(documento) => {
                documento.tipo_documento = Some(novo_tipo);
                Notificacao::sucesso(format!("'{}' reclassificado.", documento.nome_arquivo))
            }
            None => Notificacao::erro("Documento inexistente."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arquivo(nome: &str, bytes: usize) -> ArquivoSelecionado {
        ArquivoSelecionado {
            nome: nome.to_string(),
            tipo_mime: "image/jpeg".to_string(),
            dados: vec![0u8; bytes],
        }
    }

    #[test]
    fn lote_acima_do_teto_de_fotos_e_recusado_por_inteiro() {
        let mut registro = RegistroAnexos::novo();
        let lote: Vec<_> = (0..11).map(|i| arquivo(&format!("foto{i}.jpg"), 10)).collect();

        let resultado = registro.adicionar(CategoriaAnexo::Foto, lote);

        assert!(resultado.e_erro());
        assert_eq!(registro.anexos(CategoriaAnexo::Foto).len(), 0);
    }

    #[test]
    fn teto_conta_os_anexos_ja_em_staging() {
        let mut registro = RegistroAnexos::novo();
        let primeiros: Vec<_> = (0..8).map(|i| arquivo(&format!("a{i}.jpg"), 10)).collect();
        assert!(!registro.adicionar(CategoriaAnexo::Foto, primeiros).e_erro());

        let antes = registro.clone();
        let lote: Vec<_> = (0..3).map(|i| arquivo(&format!("b{i}.jpg"), 10)).collect();
        let resultado = registro.adicionar(CategoriaAnexo::Foto, lote);

        assert!(resultado.e_erro());
        // Estado byte a byte igual ao de antes da tentativa
        assert_eq!(registro, antes);
    }

    #[test]
    fn documento_acima_de_10_mb_recusa_o_lote() {
        let mut registro = RegistroAnexos::novo();
        let lote = vec![
            arquivo("contrato.pdf", 1024),
            arquivo("matricula.pdf", (10 * MB + 1) as usize),
        ];

        let resultado = registro.adicionar(CategoriaAnexo::Documento, lote);

        assert!(resultado.e_erro());
        assert!(resultado.mensagem.contains("matricula.pdf"));
        assert_eq!(registro.anexos(CategoriaAnexo::Documento).len(), 0);
    }

    #[test]
    fn adicionar_preserva_ordem_e_marca_carga_pendente() {
        let mut registro = RegistroAnexos::novo();
        let lote = vec![arquivo("frente.jpg", 5), arquivo("fundos.jpg", 7)];

        let resultado = registro.adicionar(CategoriaAnexo::Foto, lote);

        assert!(!resultado.e_erro());
        let fotos = registro.anexos(CategoriaAnexo::Foto);
        assert_eq!(fotos[0].nome_arquivo, "frente.jpg");
        assert_eq!(fotos[1].nome_arquivo, "fundos.jpg");
        assert!(fotos.iter().all(|a| a.identidade.is_none() && a.pendente()));
    }

    #[test]
    fn remover_nao_renumera_os_vizinhos() {
        let mut registro = RegistroAnexos::novo();
        registro.adicionar(
            CategoriaAnexo::Foto,
            vec![arquivo("a.jpg", 1), arquivo("b.jpg", 1), arquivo("c.jpg", 1)],
        );
        let previa_c = registro.anexos(CategoriaAnexo::Foto)[2].previa;

        let resultado = registro.remover(CategoriaAnexo::Foto, 1);

        assert!(!resultado.e_erro());
        let fotos = registro.anexos(CategoriaAnexo::Foto);
        assert_eq!(fotos.len(), 2);
        assert_eq!(fotos[0].nome_arquivo, "a.jpg");
        assert_eq!(fotos[1].nome_arquivo, "c.jpg");
        assert_eq!(fotos[1].previa, previa_c);
    }

    #[test]
    fn reclassificar_troca_so_a_etiqueta() {
        let mut registro = RegistroAnexos::novo();
        registro.adicionar(CategoriaAnexo::Documento, vec![arquivo("doc.pdf", 9)]);
        let dados_antes = registro.anexos(CategoriaAnexo::Documento)[0]
            .carga_pendente
            .clone();

        let resultado = registro.reclassificar(0, TipoDocumento::Iptu);

        assert!(!resultado.e_erro());
        let documento = &registro.anexos(CategoriaAnexo::Documento)[0];
        assert_eq!(documento.tipo_documento, Some(TipoDocumento::Iptu));
        assert_eq!(documento.carga_pendente, dados_antes);
    }

    #[test]
    fn documentos_nao_tem_teto_de_quantidade() {
        let mut registro = RegistroAnexos::novo();
        let lote: Vec<_> = (0..25).map(|i| arquivo(&format!("d{i}.pdf"), 10)).collect();
        let resultado = registro.adicionar(CategoriaAnexo::Documento, lote);
        assert!(!resultado.e_erro());
        assert_eq!(registro.anexos(CategoriaAnexo::Documento).len(), 25);
    }
}
