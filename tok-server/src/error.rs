use thiserror::Error;
use tok_core::TokError;

/// Erros da linha de comando e do servidor.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Tok(#[from] TokError),

    #[error("erro de E/S: {0}")]
    Io(#[from] std::io::Error),

    /// A tarefa de anotação falhou antes de devolver o resultado.
    #[error("tarefa de anotação interrompida: {0}")]
    Join(#[from] tokio::task::JoinError),
}
