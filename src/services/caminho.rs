// src/services/caminho.rs

use serde_json::{Map, Value};

// Acesso genérico ao rascunho por caminhos com ponto ("endereco.rua").
// O caminho é dividido no PRIMEIRO ponto: na prática o rascunho tem dois
// níveis, e "a.b.c" endereça a chave "b.c" dentro da subárvore "a".

/// Lê o valor em `caminho`. Caminho desconhecido devolve `None`,
/// nunca erro.
pub fn obter<'a>(rascunho: &'a Value, caminho: &str) -> Option<&'a Value> {
    match caminho.split_once('.') {
        None => rascunho.get(caminho),
        Some((pai, filho)) => rascunho.get(pai)?.get(filho),
    }
}

/// Grava `valor` em `caminho` e devolve um NOVO rascunho; o original não
/// é tocado, então a detecção de mudança pode comparar referências.
/// Se a subárvore pai ainda não existe, ela é criada.
pub fn definir(rascunho: &Value, caminho: &str, valor: Value) -> Value {
    let mut raiz = rascunho.as_object().cloned().unwrap_or_default();
    match caminho.split_once('.') {
        None => {
            raiz.insert(caminho.to_string(), valor);
        }
        Some((pai, filho)) => {
            let mut subarvore = raiz
                .get(pai)
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default();
            subarvore.insert(filho.to_string(), valor);
            raiz.insert(pai.to_string(), Value::Object(subarvore));
        }
    }
    Value::Object(raiz)
}

/// Sobrepõe `parcial` em `base`, subárvore por subárvore. Usado ao abrir
/// uma entidade existente: o resultado continua sendo um superconjunto
/// dos caminhos padrão (campos ausentes permanecem com o valor padrão).
pub fn mesclar(base: &Value, parcial: &Value) -> Value {
    let mut raiz = base.as_object().cloned().unwrap_or_default();
    let Some(entradas) = parcial.as_object() else {
        return Value::Object(raiz);
    };
    for (chave, valor) in entradas {
        match (raiz.get(chave).and_then(Value::as_object), valor.as_object()) {
            (Some(atual), Some(novo)) => {
                let mut combinado: Map<String, Value> = atual.clone();
                for (k, v) in novo {
                    combinado.insert(k.clone(), v.clone());
                }
                raiz.insert(chave.clone(), Value::Object(combinado));
            }
            _ => {
                raiz.insert(chave.clone(), valor.clone());
            }
        }
    }
    Value::Object(raiz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn obter_apos_definir_devolve_o_valor() {
        let rascunho = json!({ "endereco": { "rua": "", "cidade": "Recife" } });
        let novo = definir(&rascunho, "endereco.rua", json!("Rua da Aurora"));

        assert_eq!(obter(&novo, "endereco.rua"), Some(&json!("Rua da Aurora")));
        // Os demais caminhos permanecem intactos
        assert_eq!(obter(&novo, "endereco.cidade"), Some(&json!("Recife")));
        // E o rascunho original não foi mutado
        assert_eq!(obter(&rascunho, "endereco.rua"), Some(&json!("")));
    }

    #[test]
    fn definir_cria_subarvore_ausente() {
        let rascunho = json!({});
        let novo = definir(&rascunho, "interesses.faixaPrecoMin", json!("100000"));
        assert_eq!(
            obter(&novo, "interesses.faixaPrecoMin"),
            Some(&json!("100000"))
        );
    }

    #[test]
    fn caminho_divide_no_primeiro_ponto() {
        let rascunho = json!({});
        let novo = definir(&rascunho, "a.b.c", json!(1));
        // "b.c" é uma chave única dentro de "a"
        assert_eq!(obter(&novo, "a.b.c"), Some(&json!(1)));
        assert_eq!(novo["a"]["b.c"], json!(1));
    }

    #[test]
    fn caminho_desconhecido_nao_e_erro() {
        let rascunho = json!({ "endereco": { "rua": "" } });
        assert_eq!(obter(&rascunho, "inexistente.campo"), None);
    }

    #[test]
    fn mesclar_preserva_os_padroes_nao_sobrepostos() {
        let base = json!({
            "identificacao": { "titulo": "", "tipo": "" },
            "valores": { "precoVenda": "" },
        });
        let existente = json!({
            "identificacao": { "titulo": "Casa na praia" },
        });
        let resultado = mesclar(&base, &existente);

        assert_eq!(resultado["identificacao"]["titulo"], json!("Casa na praia"));
        // O campo não enviado continua presente com o padrão
        assert_eq!(resultado["identificacao"]["tipo"], json!(""));
        assert_eq!(resultado["valores"]["precoVenda"], json!(""));
    }
}
