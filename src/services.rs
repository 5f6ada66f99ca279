pub mod caminho;
pub mod anexos;
pub use anexos::RegistroAnexos;
pub mod validacao;
pub use validacao::validar;
pub mod serializacao;
pub use serializacao::{ParteBinaria, Submissao};
pub mod secoes;
pub mod formulario;
pub use formulario::FormularioEntidade;
