// src/services/validacao.rs

use serde_json::Value;
use validator::ValidateEmail;

use crate::common::feedback::MapaErros;
use crate::services::caminho;

// --- MOTOR DE VALIDAÇÃO ---
// Roda o esquema declarativo sobre o rascunho INTEIRO, uma única vez,
// sincronamente, imediatamente antes do envio. Campo obrigatório em aba
// não visitada bloqueia igual; o erro fica no caminho do campo para a
// aba correspondente sinalizar.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exigencia {
    TextoObrigatorio,
    NumeroObrigatorio,
    NumeroOpcional,
    EmailOpcional,
    Cep,
    BooleanoOpcional,
}

#[derive(Debug, Clone)]
pub struct Regra {
    pub caminho: String,
    pub rotulo: String,
    pub exigencia: Exigencia,
}

impl Regra {
    pub fn nova(caminho: &str, rotulo: &str, exigencia: Exigencia) -> Self {
        Self {
            caminho: caminho.to_string(),
            rotulo: rotulo.to_string(),
            exigencia,
        }
    }
}

/// Converte o texto bruto do campo em número. Aceita vírgula decimal,
/// que é como o usuário digita valores aqui.
pub fn numero(texto: &str) -> Option<f64> {
    let normalizado = texto.trim().replace(',', ".");
    if normalizado.is_empty() {
        return None;
    }
    normalizado.parse::<f64>().ok()
}

/// Mantém só os dígitos do CEP.
pub fn normalizar_cep(texto: &str) -> String {
    texto.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn texto_do_valor(valor: Option<&Value>) -> Option<String> {
    match valor {
        Some(Value::String(s)) => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Valida o rascunho e devolve o mapa caminho -> mensagem. Mapa vazio
/// libera o envio. O rascunho nunca é alterado por uma validação.
pub fn validar(rascunho: &Value, regras: &[Regra]) -> MapaErros {
    let mut erros = MapaErros::new();

    for regra in regras {
        let valor = caminho::obter(rascunho, &regra.caminho);
        let texto = texto_do_valor(valor).unwrap_or_default();
        let vazio = texto.is_empty();

        match regra.exigencia {
            Exigencia::TextoObrigatorio => {
                if vazio {
                    erros.insert(regra.caminho.clone(), "Campo obrigatório".to_string());
                }
            }
            Exigencia::NumeroObrigatorio => {
                if vazio {
                    erros.insert(regra.caminho.clone(), "Campo obrigatório".to_string());
                } else if numero(&texto).is_none() {
                    erros.insert(regra.caminho.clone(), "Valor numérico inválido".to_string());
                }
            }
            // Vazio é permitido; texto não vazio que não é número é erro,
            // nunca coerção silenciosa para 0/null.
            Exigencia::NumeroOpcional => {
                if !vazio && numero(&texto).is_none() {
                    erros.insert(regra.caminho.clone(), "Valor numérico inválido".to_string());
                }
            }
            Exigencia::EmailOpcional => {
                if !vazio && !texto.validate_email() {
                    erros.insert(regra.caminho.clone(), "E-mail inválido".to_string());
                }
            }
            Exigencia::Cep => {
                if !vazio && normalizar_cep(&texto).len() != 8 {
                    erros.insert(regra.caminho.clone(), "O CEP deve ter 8 dígitos".to_string());
                }
            }
            Exigencia::BooleanoOpcional => {
                let valido = matches!(valor, None | Some(Value::Bool(_)) | Some(Value::Null));
                if !valido {
                    erros.insert(regra.caminho.clone(), "Valor inválido".to_string());
                }
            }
        }
    }

    erros
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn regras_de_teste() -> Vec<Regra> {
        vec![
            Regra::nova("identificacao.titulo", "Título", Exigencia::TextoObrigatorio),
            Regra::nova("valores.precoVenda", "Preço de venda", Exigencia::NumeroOpcional),
            Regra::nova("identificacao.email", "E-mail", Exigencia::EmailOpcional),
            Regra::nova("endereco.cep", "CEP", Exigencia::Cep),
        ]
    }

    #[test]
    fn campo_obrigatorio_vazio_bloqueia_mesmo_em_aba_nao_visitada() {
        let rascunho = json!({
            "identificacao": { "titulo": "" },
            "valores": { "precoVenda": "" },
            "endereco": { "cep": "" },
        });
        let erros = validar(&rascunho, &regras_de_teste());
        assert_eq!(
            erros.get("identificacao.titulo"),
            Some(&"Campo obrigatório".to_string())
        );
        assert_eq!(erros.len(), 1);
    }

    #[test]
    fn numero_nao_vazio_e_invalido_e_erro_nao_coercao() {
        let rascunho = json!({
            "identificacao": { "titulo": "Casa" },
            "valores": { "precoVenda": "abc" },
            "endereco": { "cep": "" },
        });
        let erros = validar(&rascunho, &regras_de_teste());
        assert_eq!(
            erros.get("valores.precoVenda"),
            Some(&"Valor numérico inválido".to_string())
        );
    }

    #[test]
    fn numero_com_virgula_decimal_e_aceito() {
        let rascunho = json!({
            "identificacao": { "titulo": "Casa" },
            "valores": { "precoVenda": "1250,50" },
            "endereco": { "cep": "" },
        });
        let erros = validar(&rascunho, &regras_de_teste());
        assert!(erros.is_empty());
    }

    #[test]
    fn cep_com_mascara_e_normalizado_antes_da_checagem() {
        let rascunho = json!({
            "identificacao": { "titulo": "Casa" },
            "valores": { "precoVenda": "" },
            "endereco": { "cep": "50030-230" },
        });
        let erros = validar(&rascunho, &regras_de_teste());
        assert!(erros.is_empty());

        let rascunho = json!({
            "identificacao": { "titulo": "Casa" },
            "valores": { "precoVenda": "" },
            "endereco": { "cep": "5003" },
        });
        let erros = validar(&rascunho, &regras_de_teste());
        assert_eq!(
            erros.get("endereco.cep"),
            Some(&"O CEP deve ter 8 dígitos".to_string())
        );
    }

    #[test]
    fn email_invalido_e_apontado_no_caminho_do_campo() {
        let rascunho = json!({
            "identificacao": { "titulo": "Casa", "email": "sem-arroba" },
            "valores": { "precoVenda": "" },
            "endereco": { "cep": "" },
        });
        let erros = validar(&rascunho, &regras_de_teste());
        assert_eq!(
            erros.get("identificacao.email"),
            Some(&"E-mail inválido".to_string())
        );
    }

    #[test]
    fn numero_ja_carregado_como_json_number_e_valido() {
        // Entidade existente mesclada no rascunho pode trazer números reais
        let rascunho = json!({
            "identificacao": { "titulo": "Casa" },
            "valores": { "precoVenda": 350000.0 },
            "endereco": { "cep": "" },
        });
        let erros = validar(&rascunho, &regras_de_teste());
        assert!(erros.is_empty());
    }
}
