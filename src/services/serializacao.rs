// src/services/serializacao.rs

use serde_json::Value;
use validator::Validate;

use crate::common::error::AppError;
use crate::common::feedback::MapaErros;
use crate::models::anexo::AnexoMetadados;
use crate::models::cliente::{ClientePayload, InteressesPayload};
use crate::models::endereco::EnderecoPayload;
use crate::models::imovel::{CaracteristicasPayload, ImovelPayload, ValoresPayload};
use crate::models::Entidade;
use crate::services::anexos::RegistroAnexos;
use crate::services::caminho;
use crate::services::secoes::financeiro;
use crate::services::validacao::{normalizar_cep, numero};

// --- SERIALIZAÇÃO DO ENVIO ---
// Única fronteira onde o rascunho bruto vira payload tipado: coerção
// numérica, resolução de sentinelas e montagem das partes binárias.
// O rascunho em si permanece em forma de string e não é alterado.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParteBinaria {
    pub campo: &'static str,
    pub nome_arquivo: String,
    pub tipo_mime: String,
    pub dados: Vec<u8>,
}

// Uma requisição completa: uma parte JSON de metadados mais zero ou
// mais partes binárias, enviadas juntas para que salvar a entidade e
// seus anexos novos seja tudo-ou-nada aos olhos do usuário.
#[derive(Debug, Clone, PartialEq)]
pub struct Submissao {
    pub entidade: Entidade,
    pub metadados: Value,
    pub partes: Vec<ParteBinaria>,
}

fn texto_bruto(rascunho: &Value, caminho_campo: &str) -> String {
    match caminho::obter(rascunho, caminho_campo) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn texto_opcional(rascunho: &Value, caminho_campo: &str) -> Option<String> {
    let texto = texto_bruto(rascunho, caminho_campo);
    if texto.is_empty() { None } else { Some(texto) }
}

/// Numérico opcional: vazio vira None; texto não numérico é erro.
fn numero_opcional(rascunho: &Value, caminho_campo: &str) -> Result<Option<f64>, AppError> {
    let texto = texto_bruto(rascunho, caminho_campo);
    if texto.is_empty() {
        return Ok(None);
    }
    numero(&texto)
        .map(Some)
        .ok_or_else(|| AppError::NumeroInvalido(caminho_campo.to_string()))
}

/// Numérico que o domínio trata como obrigatório: vazio vira 0.
fn numero_obrigatorio(rascunho: &Value, caminho_campo: &str) -> Result<f64, AppError> {
    Ok(numero_opcional(rascunho, caminho_campo)?.unwrap_or(0.0))
}

fn inteiro_opcional(rascunho: &Value, caminho_campo: &str) -> Result<Option<i64>, AppError> {
    let texto = texto_bruto(rascunho, caminho_campo);
    if texto.is_empty() {
        return Ok(None);
    }
    texto
        .trim()
        .parse::<i64>()
        .map(Some)
        .map_err(|_| AppError::NumeroInvalido(caminho_campo.to_string()))
}

/// Seletor de chave estrangeira: a sentinela de "sem seleção" vira None
/// aqui, uma única vez; o rascunho guarda a string crua do controle.
fn vinculo(rascunho: &Value, caminho_campo: &str) -> Result<Option<i64>, AppError> {
    let texto = texto_bruto(rascunho, caminho_campo);
    if texto.is_empty() || texto == "none" {
        return Ok(None);
    }
    texto
        .parse::<i64>()
        .map(Some)
        .map_err(|_| AppError::NumeroInvalido(caminho_campo.to_string()))
}

fn endereco_payload(rascunho: &Value) -> Result<EnderecoPayload, AppError> {
    let cep = normalizar_cep(&texto_bruto(rascunho, "endereco.cep"));
    Ok(EnderecoPayload {
        rua: texto_bruto(rascunho, "endereco.rua"),
        numero: texto_bruto(rascunho, "endereco.numero"),
        complemento: texto_opcional(rascunho, "endereco.complemento"),
        andar: inteiro_opcional(rascunho, "endereco.andar")?,
        bairro: texto_bruto(rascunho, "endereco.bairro"),
        cidade: texto_bruto(rascunho, "endereco.cidade"),
        estado: texto_bruto(rascunho, "endereco.estado"),
        cep: if cep.is_empty() { None } else { Some(cep) },
        latitude: numero_opcional(rascunho, "endereco.latitude")?,
        longitude: numero_opcional(rascunho, "endereco.longitude")?,
    })
}

fn metadados_anexos(anexos: &RegistroAnexos) -> Vec<AnexoMetadados> {
    anexos.todos().map(AnexoMetadados::from).collect()
}

// Uma parte binária por carga pendente, agrupada pelo nome de campo da
// categoria, na mesma ordem relativa dos metadados.
fn partes_binarias(anexos: &RegistroAnexos) -> Vec<ParteBinaria> {
    anexos
        .todos()
        .filter_map(|anexo| {
            anexo.carga_pendente.as_ref().map(|dados| ParteBinaria {
                campo: anexo.categoria.campo_multipart(),
                nome_arquivo: anexo.nome_arquivo.clone(),
                tipo_mime: anexo.tipo_mime.clone(),
                dados: dados.clone(),
            })
        })
        .collect()
}

/// Pré-condição dura do imóvel: sem latitude e longitude numéricas o
/// envio falha aqui mesmo, nunca segue com nulos silenciosos.
fn exigir_coordenadas(rascunho: &Value) -> Result<(), AppError> {
    let mut erros = MapaErros::new();
    for caminho_campo in ["endereco.latitude", "endereco.longitude"] {
        let texto = texto_bruto(rascunho, caminho_campo);
        if numero(&texto).is_none() {
            erros.insert(
                caminho_campo.to_string(),
                "Informe as coordenadas do imóvel".to_string(),
            );
        }
    }
    if erros.is_empty() {
        Ok(())
    } else {
        Err(AppError::PrecondicaoCoordenadas(erros))
    }
}

pub fn serializar_imovel(
    rascunho: &Value,
    anexos: &RegistroAnexos,
) -> Result<Submissao, AppError> {
    exigir_coordenadas(rascunho)?;

    let finalidade = texto_bruto(rascunho, "identificacao.finalidade");

    // Preço fora da finalidade selecionada não é relevante para o envio;
    // quem decide é a própria seção financeira, não o esquema.
    let mut valores = ValoresPayload {
        preco_venda: None,
        preco_aluguel: None,
        preco_temporada: None,
        condominio: numero_opcional(rascunho, "valores.condominio")?,
        iptu: numero_opcional(rascunho, "valores.iptu")?,
    };
    if financeiro::preco_relevante(&finalidade, "valores.precoVenda") {
        valores.preco_venda = Some(numero_obrigatorio(rascunho, "valores.precoVenda")?);
    }
    if financeiro::preco_relevante(&finalidade, "valores.precoAluguel") {
        valores.preco_aluguel = Some(numero_obrigatorio(rascunho, "valores.precoAluguel")?);
    }
    if financeiro::preco_relevante(&finalidade, "valores.precoTemporada") {
        valores.preco_temporada = numero_opcional(rascunho, "valores.precoTemporada")?;
    }

    let payload = ImovelPayload {
        titulo: texto_bruto(rascunho, "identificacao.titulo"),
        codigo_referencia: texto_opcional(rascunho, "identificacao.codigoReferencia"),
        tipo: texto_bruto(rascunho, "identificacao.tipo"),
        finalidade,
        descricao: texto_opcional(rascunho, "identificacao.descricao"),
        endereco: endereco_payload(rascunho)?,
        valores,
        caracteristicas: CaracteristicasPayload {
            quartos: inteiro_opcional(rascunho, "caracteristicas.quartos")?,
            suites: inteiro_opcional(rascunho, "caracteristicas.suites")?,
            banheiros: inteiro_opcional(rascunho, "caracteristicas.banheiros")?,
            vagas: inteiro_opcional(rascunho, "caracteristicas.vagas")?,
            area_total: numero_opcional(rascunho, "caracteristicas.areaTotal")?,
            area_util: numero_opcional(rascunho, "caracteristicas.areaUtil")?,
            mobiliado: caminho::obter(rascunho, "caracteristicas.mobiliado")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        },
        corretor_id: vinculo(rascunho, "vinculos.corretorId")?,
        proprietario_id: vinculo(rascunho, "vinculos.proprietarioId")?,
        observacoes: texto_opcional(rascunho, "observacoes.texto"),
        anexos: metadados_anexos(anexos),
    };
    payload.validate()?;

    Ok(Submissao {
        entidade: Entidade::Imovel,
        metadados: serde_json::to_value(&payload)?,
        partes: partes_binarias(anexos),
    })
}

pub fn serializar_cliente(
    rascunho: &Value,
    anexos: &RegistroAnexos,
) -> Result<Submissao, AppError> {
    let payload = ClientePayload {
        nome: texto_bruto(rascunho, "identificacao.nome"),
        cpf_cnpj: texto_opcional(rascunho, "identificacao.cpfCnpj"),
        email: texto_opcional(rascunho, "identificacao.email"),
        telefone: texto_opcional(rascunho, "identificacao.telefone"),
        celular: texto_opcional(rascunho, "identificacao.celular"),
        perfil: texto_bruto(rascunho, "identificacao.perfil"),
        endereco: endereco_payload(rascunho)?,
        interesses: InteressesPayload {
            finalidade: texto_opcional(rascunho, "interesses.finalidade"),
            tipo_imovel: texto_opcional(rascunho, "interesses.tipoImovel"),
            faixa_preco_min: numero_opcional(rascunho, "interesses.faixaPrecoMin")?,
            faixa_preco_max: numero_opcional(rascunho, "interesses.faixaPrecoMax")?,
            cidades: texto_opcional(rascunho, "interesses.cidades"),
        },
        corretor_id: vinculo(rascunho, "vinculos.corretorId")?,
        observacoes: texto_opcional(rascunho, "observacoes.texto"),
        anexos: metadados_anexos(anexos),
    };
    payload.validate()?;

    Ok(Submissao {
        entidade: Entidade::Cliente,
        metadados: serde_json::to_value(&payload)?,
        partes: partes_binarias(anexos),
    })
}

/// Serializa conforme a entidade do formulário.
pub fn serializar(
    entidade: Entidade,
    rascunho: &Value,
    anexos: &RegistroAnexos,
) -> Result<Submissao, AppError> {
    match entidade {
        Entidade::Imovel => serializar_imovel(rascunho, anexos),
        Entidade::Cliente => serializar_cliente(rascunho, anexos),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::anexo::{ArquivoSelecionado, CategoriaAnexo};
    use crate::models::{cliente, imovel};
    use serde_json::json;

    fn rascunho_imovel_valido() -> Value {
        let mut rascunho = imovel::rascunho_padrao();
        for (campo, valor) in [
            ("identificacao.titulo", "Apartamento em Boa Viagem"),
            ("identificacao.tipo", "apartamento"),
            ("identificacao.finalidade", "venda"),
            ("endereco.rua", "Av. Boa Viagem"),
            ("endereco.numero", "1000"),
            ("endereco.bairro", "Boa Viagem"),
            ("endereco.cidade", "Recife"),
            ("endereco.estado", "PE"),
            ("endereco.cep", "51011-000"),
            ("endereco.latitude", "-8.1191"),
            ("endereco.longitude", "-34.9030"),
            ("valores.precoVenda", "850000"),
        ] {
            rascunho = caminho::definir(&rascunho, campo, json!(valor));
        }
        rascunho
    }

    fn arquivo(nome: &str, bytes: &[u8]) -> ArquivoSelecionado {
        ArquivoSelecionado {
            nome: nome.to_string(),
            tipo_mime: "application/octet-stream".to_string(),
            dados: bytes.to_vec(),
        }
    }

    #[test]
    fn serializar_e_idempotente() {
        let rascunho = rascunho_imovel_valido();
        let mut anexos = RegistroAnexos::novo();
        anexos.adicionar(CategoriaAnexo::Foto, vec![arquivo("a.jpg", b"aa")]);
        anexos.adicionar(CategoriaAnexo::Documento, vec![arquivo("b.pdf", b"bb")]);

        let primeira = serializar_imovel(&rascunho, &anexos).unwrap();
        let segunda = serializar_imovel(&rascunho, &anexos).unwrap();

        assert_eq!(primeira.metadados, segunda.metadados);
        assert_eq!(primeira.partes, segunda.partes);
    }

    #[test]
    fn imovel_sem_coordenadas_falha_na_pre_condicao() {
        let rascunho = caminho::definir(&rascunho_imovel_valido(), "endereco.latitude", json!(""));
        let anexos = RegistroAnexos::novo();

        match serializar_imovel(&rascunho, &anexos) {
            Err(AppError::PrecondicaoCoordenadas(erros)) => {
                assert!(erros.contains_key("endereco.latitude"));
            }
            outro => panic!("esperava pré-condição de coordenadas, veio {outro:?}"),
        }
    }

    #[test]
    fn cliente_com_faixa_de_preco_vira_numeros_sem_partes() {
        let mut rascunho = cliente::rascunho_padrao();
        for (campo, valor) in [
            ("identificacao.nome", "Maria da Silva"),
            ("identificacao.perfil", "CLIENTE"),
            ("interesses.finalidade", "venda"),
            ("interesses.faixaPrecoMin", "100000"),
            ("interesses.faixaPrecoMax", "500000"),
        ] {
            rascunho = caminho::definir(&rascunho, campo, json!(valor));
        }
        let anexos = RegistroAnexos::novo();

        let submissao = serializar_cliente(&rascunho, &anexos).unwrap();

        let interesses = &submissao.metadados["interesses"];
        assert_eq!(interesses["faixaPrecoMin"].as_f64(), Some(100000.0));
        assert_eq!(interesses["faixaPrecoMax"].as_f64(), Some(500000.0));
        assert!(submissao.partes.is_empty());
    }

    #[test]
    fn sentinela_de_selecao_vira_null_e_id_vira_numero() {
        let rascunho = rascunho_imovel_valido();
        let com_sentinela = caminho::definir(&rascunho, "vinculos.corretorId", json!("none"));
        let com_id = caminho::definir(&rascunho, "vinculos.corretorId", json!("7"));
        let anexos = RegistroAnexos::novo();

        let s1 = serializar_imovel(&com_sentinela, &anexos).unwrap();
        assert_eq!(s1.metadados["corretorId"], Value::Null);

        let s2 = serializar_imovel(&com_id, &anexos).unwrap();
        assert_eq!(s2.metadados["corretorId"].as_i64(), Some(7));
    }

    #[test]
    fn preco_fora_da_finalidade_nao_e_enviado() {
        let rascunho =
            caminho::definir(&rascunho_imovel_valido(), "valores.precoAluguel", json!("1500"));
        let anexos = RegistroAnexos::novo();

        let submissao = serializar_imovel(&rascunho, &anexos).unwrap();

        // finalidade = venda: aluguel fica de fora, venda vai como número
        assert_eq!(submissao.metadados["valores"]["precoAluguel"], Value::Null);
        assert_eq!(
            submissao.metadados["valores"]["precoVenda"].as_f64(),
            Some(850000.0)
        );
    }

    #[test]
    fn preco_obrigatorio_vazio_vira_zero() {
        let rascunho = caminho::definir(&rascunho_imovel_valido(), "valores.precoVenda", json!(""));
        let anexos = RegistroAnexos::novo();

        let submissao = serializar_imovel(&rascunho, &anexos).unwrap();

        assert_eq!(submissao.metadados["valores"]["precoVenda"].as_f64(), Some(0.0));
    }

    #[test]
    fn numero_invalido_nao_e_coagido_em_silencio() {
        let rascunho =
            caminho::definir(&rascunho_imovel_valido(), "valores.precoVenda", json!("abc"));
        let anexos = RegistroAnexos::novo();

        match serializar_imovel(&rascunho, &anexos) {
            Err(AppError::NumeroInvalido(campo)) => assert_eq!(campo, "valores.precoVenda"),
            outro => panic!("esperava NumeroInvalido, veio {outro:?}"),
        }
    }

    #[test]
    fn partes_binarias_seguem_a_ordem_das_categorias_e_da_insercao() {
        let rascunho = rascunho_imovel_valido();
        let mut anexos = RegistroAnexos::novo();
        anexos.adicionar(
            CategoriaAnexo::Documento,
            vec![arquivo("contrato.pdf", b"c")],
        );
        anexos.adicionar(
            CategoriaAnexo::Foto,
            vec![arquivo("frente.jpg", b"f"), arquivo("fundos.jpg", b"g")],
        );

        let submissao = serializar_imovel(&rascunho, &anexos).unwrap();

        let ordem: Vec<(&str, &str)> = submissao
            .partes
            .iter()
            .map(|p| (p.campo, p.nome_arquivo.as_str()))
            .collect();
        assert_eq!(
            ordem,
            vec![
                ("fotos", "frente.jpg"),
                ("fotos", "fundos.jpg"),
                ("documentos", "contrato.pdf"),
            ]
        );

        // Os metadados guardam a mesma ordem relativa e nenhum ref local
        let anexos_meta = submissao.metadados["anexos"].as_array().unwrap();
        assert_eq!(anexos_meta[0]["nomeArquivo"], json!("frente.jpg"));
        assert_eq!(anexos_meta[2]["nomeArquivo"], json!("contrato.pdf"));
        assert!(anexos_meta[0].get("previa").is_none());
        assert!(anexos_meta[0].get("cargaPendente").is_none());
    }
}
