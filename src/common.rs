pub mod error;
pub use error::AppError;
pub mod feedback;
pub use feedback::{MapaErros, Notificacao, Severidade};
