// src/services/secoes/financeiro.rs

use rust_decimal::Decimal;
use serde_json::Value;

use crate::common::feedback::MapaErros;
use crate::services::anexos::RegistroAnexos;
use crate::services::caminho;
use crate::services::secoes::{Campo, Secao, VisaoSecao};

pub struct SecaoFinanceiro;

/// A finalidade decide quais preços aparecem E quais são relevantes
/// para o envio. Campo escondido continua no rascunho; quem o exclui
/// do envio é esta seção, não o esquema de validação.
pub fn preco_relevante(finalidade: &str, caminho_campo: &str) -> bool {
    match caminho_campo {
        "valores.precoVenda" => matches!(finalidade, "venda" | "ambos"),
        "valores.precoAluguel" => matches!(finalidade, "aluguel" | "ambos"),
        "valores.precoTemporada" => matches!(finalidade, "aluguel" | "ambos"),
        // condomínio e IPTU valem para qualquer finalidade
        _ => true,
    }
}

/// Formatação de apresentação em reais sobre o texto bruto do campo.
/// Devolve None quando o texto não é um número; o rascunho nunca guarda
/// o valor formatado.
pub fn formatar_moeda(bruto: &str) -> Option<String> {
    let normalizado = bruto.trim().replace(',', ".");
    if normalizado.is_empty() {
        return None;
    }
    let valor: Decimal = normalizado.parse().ok()?;
    let texto = valor.round_dp(2).to_string();

    let (inteiro, fracao) = match texto.split_once('.') {
        Some((i, f)) => (i.to_string(), format!("{:0<2}", f)),
        None => (texto, "00".to_string()),
    };
    let (sinal, digitos) = match inteiro.strip_prefix('-') {
        Some(resto) => ("-", resto.to_string()),
        None => ("", inteiro),
    };

    let mut agrupado = String::new();
    let total = digitos.len();
    for (posicao, digito) in digitos.chars().enumerate() {
        if posicao > 0 && (total - posicao) % 3 == 0 {
            agrupado.push('.');
        }
        agrupado.push(digito);
    }

    Some(format!("R$ {sinal}{agrupado},{fracao}"))
}

fn campo_moeda(
    rascunho: &Value,
    erros: &MapaErros,
    caminho_campo: &str,
    rotulo: &str,
    finalidade: &str,
) -> Campo {
    let mut campo = Campo::novo(rascunho, erros, caminho_campo, rotulo);
    campo.visivel = preco_relevante(finalidade, caminho_campo);
    campo.exibicao = campo.valor.as_str().and_then(formatar_moeda);
    campo
}

impl Secao for SecaoFinanceiro {
    fn id(&self) -> &'static str {
        "financeiro"
    }

    fn montar(&self, rascunho: &Value, _anexos: &RegistroAnexos, erros: &MapaErros) -> VisaoSecao {
        let finalidade = caminho::obter(rascunho, "identificacao.finalidade")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();

        let campos = vec![
            campo_moeda(rascunho, erros, "valores.precoVenda", "Preço de venda", &finalidade),
            campo_moeda(rascunho, erros, "valores.precoAluguel", "Preço de aluguel", &finalidade),
            campo_moeda(rascunho, erros, "valores.precoTemporada", "Preço de temporada", &finalidade),
            campo_moeda(rascunho, erros, "valores.condominio", "Condomínio", &finalidade),
            campo_moeda(rascunho, erros, "valores.iptu", "IPTU", &finalidade),
        ];
        VisaoSecao::nova(self.id(), "Valores", campos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::imovel;
    use serde_json::json;

    #[test]
    fn formata_reais_com_milhar_e_virgula() {
        assert_eq!(formatar_moeda("850000"), Some("R$ 850.000,00".to_string()));
        assert_eq!(formatar_moeda("1234,5"), Some("R$ 1.234,50".to_string()));
        assert_eq!(formatar_moeda("999"), Some("R$ 999,00".to_string()));
        assert_eq!(formatar_moeda(""), None);
        assert_eq!(formatar_moeda("abc"), None);
    }

    #[test]
    fn finalidade_venda_esconde_precos_de_aluguel() {
        let rascunho = imovel::rascunho_padrao();
        let rascunho =
            caminho::definir(&rascunho, "identificacao.finalidade", json!("venda"));
        let visao = SecaoFinanceiro.montar(&rascunho, &RegistroAnexos::novo(), &MapaErros::new());

        let visivel = |caminho_campo: &str| {
            visao
                .campos
                .iter()
                .find(|c| c.caminho == caminho_campo)
                .unwrap()
                .visivel
        };
        assert!(visivel("valores.precoVenda"));
        assert!(!visivel("valores.precoAluguel"));
        assert!(!visivel("valores.precoTemporada"));
        assert!(visivel("valores.condominio"));
    }

    #[test]
    fn campo_escondido_continua_presente_no_rascunho() {
        let rascunho = imovel::rascunho_padrao();
        let rascunho = caminho::definir(&rascunho, "identificacao.finalidade", json!("venda"));
        let rascunho = caminho::definir(&rascunho, "valores.precoAluguel", json!("1500"));
        let visao = SecaoFinanceiro.montar(&rascunho, &RegistroAnexos::novo(), &MapaErros::new());

        let aluguel = visao
            .campos
            .iter()
            .find(|c| c.caminho == "valores.precoAluguel")
            .unwrap();
        assert!(!aluguel.visivel);
        assert_eq!(aluguel.valor, json!("1500"));
    }
}
