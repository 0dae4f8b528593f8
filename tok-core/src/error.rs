//! # Erros do tokenizador
//!
//! Apenas duas condições são fatais para uma requisição de tokenização:
//! idioma desconhecido e entrada que não é UTF-8 válido. Todo o resto
//! (texto vazio, sentença sem pontuação final, referência disjunta) degrada
//! para um resultado vazio ou zerado, nunca para um erro.

use thiserror::Error;

/// Erro principal do `tok-core`.
#[derive(Error, Debug)]
pub enum TokError {
    /// Tag de idioma fora da lista suportada (ex: "xx").
    #[error("idioma não suportado: '{0}' (use de, en, es, eu, fr, gl, it, nl ou pl)")]
    UnsupportedLanguage(String),

    /// Valor inválido para uma opção de configuração.
    #[error("valor inválido para {option}: '{value}'")]
    UnsupportedOption {
        option: &'static str,
        value: String,
    },

    /// Bytes de entrada que não formam UTF-8 válido.
    #[error("entrada não é UTF-8 válido: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// Documento estruturado de entrada sem a camada de texto bruto.
    #[error("documento estruturado inválido: {0}")]
    StructuredInput(String),

    #[error("erro de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error("erro de serialização: {0}")]
    Json(#[from] serde_json::Error),
}

/// Alias de `Result` para as operações do tokenizador.
pub type Result<T> = std::result::Result<T, TokError>;

impl TokError {
    pub(crate) fn option(option: &'static str, value: &str) -> Self {
        TokError::UnsupportedOption {
            option,
            value: value.to_string(),
        }
    }
}
