// src/lib.rs

// Declaração dos nossos módulos
pub mod api;
pub mod common;
pub mod config;
pub mod models;
pub mod services;

/// Inicializa o logger. Em binários chame uma vez no início;
/// em testes a segunda chamada é ignorada.
pub fn inicializar_rastreio() {
    let _ = tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .try_init();
}
