// src/services/secoes/endereco.rs

use serde_json::{json, Value};

use crate::common::feedback::MapaErros;
use crate::models::endereco::{Coordenadas, EnderecoCep};
use crate::services::anexos::RegistroAnexos;
use crate::services::caminho;
use crate::services::secoes::{Campo, Secao, VisaoSecao};

pub struct SecaoEndereco;

impl Secao for SecaoEndereco {
    fn id(&self) -> &'static str {
        "endereco"
    }

    fn montar(&self, rascunho: &Value, _anexos: &RegistroAnexos, erros: &MapaErros) -> VisaoSecao {
        let campos = vec![
            Campo::novo(rascunho, erros, "endereco.cep", "CEP"),
            Campo::novo(rascunho, erros, "endereco.rua", "Rua"),
            Campo::novo(rascunho, erros, "endereco.numero", "Número"),
            Campo::novo(rascunho, erros, "endereco.complemento", "Complemento"),
            Campo::novo(rascunho, erros, "endereco.andar", "Andar"),
            Campo::novo(rascunho, erros, "endereco.bairro", "Bairro"),
            Campo::novo(rascunho, erros, "endereco.cidade", "Cidade"),
            Campo::novo(rascunho, erros, "endereco.estado", "Estado"),
            Campo::novo(rascunho, erros, "endereco.latitude", "Latitude"),
            Campo::novo(rascunho, erros, "endereco.longitude", "Longitude"),
        ];
        VisaoSecao::nova(self.id(), "Endereço", campos)
    }
}

fn campo_vazio(rascunho: &Value, caminho_campo: &str) -> bool {
    caminho::obter(rascunho, caminho_campo)
        .and_then(Value::as_str)
        .map(|s| s.trim().is_empty())
        .unwrap_or(true)
}

/// Preenche rua/bairro/cidade/estado com o resultado da consulta de CEP,
/// SOMENTE onde o usuário ainda não digitou nada.
pub fn aplicar_resultado_cep(rascunho: &Value, resultado: &EnderecoCep) -> Value {
    let mut novo = rascunho.clone();
    let preenchimentos = [
        ("endereco.rua", &resultado.rua),
        ("endereco.bairro", &resultado.bairro),
        ("endereco.cidade", &resultado.cidade),
        ("endereco.estado", &resultado.estado),
    ];
    for (campo, valor) in preenchimentos {
        if campo_vazio(&novo, campo) && !valor.is_empty() {
            novo = caminho::definir(&novo, campo, json!(valor));
        }
    }
    novo
}

/// Monta o texto de endereço usado na geocodificação.
pub fn endereco_texto(rascunho: &Value) -> String {
    let pedaco = |campo: &str| {
        caminho::obter(rascunho, campo)
            .and_then(Value::as_str)
            .unwrap_or("")
            .trim()
            .to_string()
    };
    [
        pedaco("endereco.rua"),
        pedaco("endereco.numero"),
        pedaco("endereco.bairro"),
        pedaco("endereco.cidade"),
        pedaco("endereco.estado"),
    ]
    .into_iter()
    .filter(|parte| !parte.is_empty())
    .collect::<Vec<_>>()
    .join(", ")
}

/// Grava as coordenadas geocodificadas no rascunho (como texto bruto,
/// igual a uma digitação manual).
pub fn aplicar_coordenadas(rascunho: &Value, coordenadas: Coordenadas) -> Value {
    let novo = caminho::definir(
        rascunho,
        "endereco.latitude",
        json!(coordenadas.latitude.to_string()),
    );
    caminho::definir(
        &novo,
        "endereco.longitude",
        json!(coordenadas.longitude.to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::imovel;

    fn resultado_cep() -> EnderecoCep {
        EnderecoCep {
            rua: "Av. Conde da Boa Vista".to_string(),
            bairro: "Boa Vista".to_string(),
            cidade: "Recife".to_string(),
            estado: "PE".to_string(),
        }
    }

    #[test]
    fn consulta_de_cep_preenche_somente_campos_vazios() {
        let rascunho = imovel::rascunho_padrao();
        // O usuário já digitou a rua antes da consulta voltar
        let rascunho = caminho::definir(&rascunho, "endereco.rua", json!("Rua digitada à mão"));

        let novo = aplicar_resultado_cep(&rascunho, &resultado_cep());

        // A rua digitada NÃO é sobrescrita
        assert_eq!(novo["endereco"]["rua"], json!("Rua digitada à mão"));
        // Os campos vazios são preenchidos
        assert_eq!(novo["endereco"]["bairro"], json!("Boa Vista"));
        assert_eq!(novo["endereco"]["cidade"], json!("Recife"));
        assert_eq!(novo["endereco"]["estado"], json!("PE"));
    }

    #[test]
    fn endereco_texto_ignora_pedacos_vazios() {
        let rascunho = imovel::rascunho_padrao();
        let rascunho = caminho::definir(&rascunho, "endereco.rua", json!("Av. Boa Viagem"));
        let rascunho = caminho::definir(&rascunho, "endereco.cidade", json!("Recife"));

        assert_eq!(endereco_texto(&rascunho), "Av. Boa Viagem, Recife");
    }

    #[test]
    fn coordenadas_entram_como_texto_bruto() {
        let rascunho = imovel::rascunho_padrao();
        let novo = aplicar_coordenadas(
            &rascunho,
            Coordenadas {
                latitude: -8.1191,
                longitude: -34.903,
            },
        );
        assert_eq!(novo["endereco"]["latitude"], json!("-8.1191"));
        assert_eq!(novo["endereco"]["longitude"], json!("-34.903"));
    }
}
