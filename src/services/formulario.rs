// src/services/formulario.rs

use serde_json::Value;

use crate::api::cep::ConsultaCep;
use crate::api::diretorio::{Diretorio, OpcaoSelecao};
use crate::api::geocodificacao::Geocodificador;
use crate::api::persistencia::PersistenciaApi;
use crate::common::error::AppError;
use crate::common::feedback::{MapaErros, Notificacao};
use crate::models::anexo::{Anexo, ArquivoSelecionado, CategoriaAnexo, TipoDocumento};
use crate::models::endereco::{Coordenadas, EnderecoCep};
use crate::models::{cliente, imovel, Entidade};
use crate::services::anexos::RegistroAnexos;
use crate::services::secoes::{self, Secao, VisaoSecao};
use crate::services::validacao::{self, normalizar_cep, Regra};
use crate::services::{caminho, serializacao};

// --- ORQUESTRADOR DO FORMULÁRIO ---
// Dono único do rascunho e do registro de anexos durante a sessão de
// edição. Dirige validar -> serializar -> enviar e expõe o ciclo de
// vida do envio; num fracasso, todo o estado local permanece como
// estava antes da tentativa.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Estado {
    Editando,
    Validando,
    Enviando,
    Concluido,
}

pub struct FormularioEntidade {
    entidade: Entidade,
    identidade: Option<i64>,
    rascunho: Value,
    anexos: RegistroAnexos,
    regras: Vec<Regra>,
    secoes: Vec<Box<dyn Secao>>,
    erros: MapaErros,
    estado: Estado,

    // Guardas de voo único e gerações contra resposta atrasada.
    // Nenhuma dessas operações é cancelável em voo; uma resposta que
    // chega depois de ser superada é descartada, nunca aplicada.
    cep_em_andamento: bool,
    geracao_cep: u64,
    geo_em_andamento: bool,
    geracao_geo: u64,
    diretorio_em_andamento: bool,

    corretores: Vec<OpcaoSelecao>,
    clientes: Vec<OpcaoSelecao>,
}

impl FormularioEntidade {
    fn montar(
        entidade: Entidade,
        identidade: Option<i64>,
        existente: Option<&Value>,
        anexos_persistidos: Vec<Anexo>,
    ) -> Self {
        let padrao = match entidade {
            Entidade::Imovel => imovel::rascunho_padrao(),
            Entidade::Cliente => cliente::rascunho_padrao(),
        };
        let rascunho = match existente {
            Some(valor) => caminho::mesclar(&padrao, valor),
            None => padrao,
        };
        let regras = match entidade {
            Entidade::Imovel => imovel::esquema(),
            Entidade::Cliente => cliente::esquema(),
        };
        let mut anexos = RegistroAnexos::novo();
        for anexo in anexos_persistidos {
            anexos.registrar_existente(anexo);
        }

        Self {
            entidade,
            identidade,
            rascunho,
            anexos,
            regras,
            secoes: secoes::secoes_para(entidade),
            erros: MapaErros::new(),
            estado: Estado::Editando,
            cep_em_andamento: false,
            geracao_cep: 0,
            geo_em_andamento: false,
            geracao_geo: 0,
            diretorio_em_andamento: false,
            corretores: Vec::new(),
            clientes: Vec::new(),
        }
    }

    pub fn novo_imovel() -> Self {
        Self::montar(Entidade::Imovel, None, None, Vec::new())
    }

    pub fn novo_cliente() -> Self {
        Self::montar(Entidade::Cliente, None, None, Vec::new())
    }

    pub fn editar_imovel(identidade: i64, existente: &Value, anexos: Vec<Anexo>) -> Self {
        Self::montar(Entidade::Imovel, Some(identidade), Some(existente), anexos)
    }

    pub fn editar_cliente(identidade: i64, existente: &Value, anexos: Vec<Anexo>) -> Self {
        Self::montar(Entidade::Cliente, Some(identidade), Some(existente), anexos)
    }

    // --- LEITURA ---

    pub fn entidade(&self) -> Entidade {
        self.entidade
    }

    pub fn estado(&self) -> Estado {
        self.estado
    }

    pub fn rascunho(&self) -> &Value {
        &self.rascunho
    }

    pub fn erros(&self) -> &MapaErros {
        &self.erros
    }

    pub fn anexos(&self) -> &RegistroAnexos {
        &self.anexos
    }

    pub fn corretores(&self) -> &[OpcaoSelecao] {
        &self.corretores
    }

    pub fn clientes(&self) -> &[OpcaoSelecao] {
        &self.clientes
    }

    /// Visões de todas as abas, na ordem de exibição.
    pub fn montar_secoes(&self) -> Vec<VisaoSecao> {
        self.secoes
            .iter()
            .map(|secao| secao.montar(&self.rascunho, &self.anexos, &self.erros))
            .collect()
    }

    // --- MUTAÇÃO (só em Editando) ---

    /// Único canal de mutação de campos. Devolve false se o formulário
    /// não está aceitando edições.
    pub fn editar(&mut self, caminho_campo: &str, valor: Value) -> bool {
        if self.estado != Estado::Editando {
            return false;
        }
        self.rascunho = caminho::definir(&self.rascunho, caminho_campo, valor);
        true
    }

    pub fn adicionar_anexos(
        &mut self,
        categoria: CategoriaAnexo,
        arquivos: Vec<ArquivoSelecionado>,
    ) -> Notificacao {
        if self.estado != Estado::Editando {
            return Notificacao::erro("Edição bloqueada durante o envio.");
        }
        self.anexos.adicionar(categoria, arquivos)
    }

    pub fn remover_anexo(&mut self, categoria: CategoriaAnexo, indice: usize) -> Notificacao {
        if self.estado != Estado::Editando {
            return Notificacao::erro("Edição bloqueada durante o envio.");
        }
        self.anexos.remover(categoria, indice)
    }

    pub fn reclassificar_documento(
        &mut self,
        indice: usize,
        novo_tipo: TipoDocumento,
    ) -> Notificacao {
        if self.estado != Estado::Editando {
            return Notificacao::erro("Edição bloqueada durante o envio.");
        }
        self.anexos.reclassificar(indice, novo_tipo)
    }

    // --- CONSULTA DE CEP ---
    // Dividida em iniciar/concluir para que a política de descarte de
    // resposta atrasada seja testável sem rede.

    pub fn iniciar_consulta_cep(&mut self) -> Option<(u64, String)> {
        if self.cep_em_andamento {
            return None;
        }
        let cep = normalizar_cep(
            caminho::obter(&self.rascunho, "endereco.cep")
                .and_then(Value::as_str)
                .unwrap_or(""),
        );
        if cep.len() != 8 {
            return None;
        }
        self.cep_em_andamento = true;
        self.geracao_cep += 1;
        Some((self.geracao_cep, cep))
    }

    pub fn concluir_consulta_cep(
        &mut self,
        geracao: u64,
        cep_consultado: &str,
        resultado: Result<Option<EnderecoCep>, AppError>,
    ) {
        self.cep_em_andamento = false;

        let cep_atual = normalizar_cep(
            caminho::obter(&self.rascunho, "endereco.cep")
                .and_then(Value::as_str)
                .unwrap_or(""),
        );
        // Última entrada vence: resposta de geração antiga, ou de um CEP
        // que o usuário já trocou, é descartada.
        if geracao != self.geracao_cep || cep_atual != cep_consultado {
            tracing::debug!("Resposta de CEP descartada (superada por entrada mais nova)");
            return;
        }

        match resultado {
            Ok(Some(endereco)) => {
                self.rascunho = secoes::endereco::aplicar_resultado_cep(&self.rascunho, &endereco);
            }
            Ok(None) => {
                tracing::info!("CEP {} não encontrado; segue preenchimento manual", cep_consultado);
            }
            // Falha absorvida: a digitação manual é o fallback
            Err(erro) => {
                tracing::warn!("Consulta de CEP falhou: {erro}");
            }
        }
    }

    /// Dispara a consulta quando o CEP digitado atinge 8 dígitos.
    pub async fn ao_mudar_cep(&mut self, api: &dyn ConsultaCep) {
        let Some((geracao, cep)) = self.iniciar_consulta_cep() else {
            return;
        };
        let resultado = api.buscar(&cep).await;
        self.concluir_consulta_cep(geracao, &cep, resultado);
    }

    // --- GEOCODIFICAÇÃO ---

    pub fn iniciar_geocodificacao(&mut self) -> Option<(u64, String)> {
        if self.geo_em_andamento {
            return None;
        }
        let endereco = secoes::endereco::endereco_texto(&self.rascunho);
        if endereco.is_empty() {
            return None;
        }
        self.geo_em_andamento = true;
        self.geracao_geo += 1;
        Some((self.geracao_geo, endereco))
    }

    pub fn concluir_geocodificacao(
        &mut self,
        geracao: u64,
        resultado: Result<Coordenadas, AppError>,
    ) -> Notificacao {
        self.geo_em_andamento = false;
        if geracao != self.geracao_geo {
            tracing::debug!("Resposta de geocodificação descartada (geração antiga)");
            return Notificacao::erro("Busca de coordenadas superada; tente novamente.");
        }
        match resultado {
            Ok(coordenadas) => {
                self.rascunho =
                    secoes::endereco::aplicar_coordenadas(&self.rascunho, coordenadas);
                Notificacao::sucesso("Coordenadas preenchidas.")
            }
            // Recuperável: o usuário pode tentar de novo ou digitar à mão
            Err(erro) => Notificacao::erro(erro.mensagem_usuario()),
        }
    }

    /// Ação manual "buscar coordenadas" da aba de endereço.
    pub async fn buscar_coordenadas(&mut self, api: &dyn Geocodificador) -> Notificacao {
        let Some((geracao, endereco)) = self.iniciar_geocodificacao() else {
            return Notificacao::erro(
                "Preencha o endereço antes de buscar as coordenadas.",
            );
        };
        let resultado = api.geocodificar(&endereco).await;
        self.concluir_geocodificacao(geracao, resultado)
    }

    // --- DIRETÓRIOS (opções de seletor) ---

    /// Carrega as listas de corretores e clientes. Falha degrada para
    /// lista vazia, nunca bloqueia a edição.
    pub async fn carregar_diretorios(&mut self, api: &dyn Diretorio) {
        if self.diretorio_em_andamento {
            return;
        }
        self.diretorio_em_andamento = true;

        match api.listar_corretores().await {
            Ok(lista) => self.corretores = lista,
            Err(erro) => {
                tracing::warn!("Falha ao listar corretores: {erro}");
                self.corretores = Vec::new();
            }
        }
        if self.entidade == Entidade::Imovel {
            match api.listar_clientes().await {
                Ok(lista) => self.clientes = lista,
                Err(erro) => {
                    tracing::warn!("Falha ao listar clientes: {erro}");
                    self.clientes = Vec::new();
                }
            }
        }

        self.diretorio_em_andamento = false;
    }

    // --- ENVIO ---

    /// Valida o rascunho inteiro, serializa e envia numa única
    /// requisição multipart. Qualquer falha preserva rascunho, anexos
    /// e valores digitados exatamente como estavam.
    pub async fn submeter(&mut self, api: &dyn PersistenciaApi) -> Notificacao {
        if self.estado == Estado::Enviando {
            return Notificacao::erro(AppError::EnvioEmAndamento.mensagem_usuario());
        }

        self.estado = Estado::Validando;
        self.erros = validacao::validar(&self.rascunho, &self.regras);
        if !self.erros.is_empty() {
            self.estado = Estado::Editando;
            return Notificacao::erro("Um ou mais campos são inválidos.");
        }

        let submissao = match serializacao::serializar(self.entidade, &self.rascunho, &self.anexos)
        {
            Ok(submissao) => submissao,
            Err(erro) => {
                self.registrar_erros_de_serializacao(erro);
                self.estado = Estado::Editando;
                return Notificacao::erro("Um ou mais campos são inválidos.");
            }
        };

        self.estado = Estado::Enviando;
        let resultado = match self.identidade {
            Some(identidade) => api.atualizar(identidade, submissao).await,
            None => api.criar(submissao).await,
        };

        match resultado {
            Ok(_) => {
                self.estado = Estado::Concluido;
                self.erros = MapaErros::new();
                Notificacao::sucesso(format!("{} salvo com sucesso.", self.entidade.rotulo()))
            }
            Err(erro) => {
                tracing::error!("Falha no envio: {erro}");
                self.estado = Estado::Editando;
                Notificacao::erro(erro.mensagem_usuario())
            }
        }
    }

    // Pré-condições e coerções falhas se comportam como erro de
    // validação: entram no mapa por campo e abortam antes do transporte.
    fn registrar_erros_de_serializacao(&mut self, erro: AppError) {
        match erro {
            AppError::PrecondicaoCoordenadas(mapa) => {
                self.erros.extend(mapa);
            }
            AppError::NumeroInvalido(caminho_campo) => {
                self.erros
                    .insert(caminho_campo, "Valor numérico inválido".to_string());
            }
            AppError::ValidationError(erros_payload) => {
                for (campo, lista) in erros_payload.field_errors() {
                    let mensagem = lista
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .next()
                        .unwrap_or_else(|| "Valor inválido".to_string());
                    self.erros.insert(campo.to_string(), mensagem);
                }
            }
            outro => {
                tracing::error!("Falha inesperada na serialização: {outro}");
            }
        }
    }
}
