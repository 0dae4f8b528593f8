//! # Documento, sentenças e tokens segmentados
//!
//! Um [`Document`] é o resultado de uma anotação: o texto bruto, o idioma e
//! as sentenças em ordem. Pertence a quem chamou o tokenizador; nada aqui é
//! compartilhado entre requisições.

use serde::{Deserialize, Serialize};

use crate::config::Language;
use crate::tokenizer::Token;

/// Sequência não vazia de tokens com o mesmo `sentence`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Identificador 1-based, sequencial no documento.
    pub id: usize,
    /// Parágrafo (1-based) ao qual a sentença pertence.
    pub paragraph: usize,
    pub tokens: Vec<Token>,
}

impl Sentence {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn forms(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub raw: String,
    pub language: Language,
    pub sentences: Vec<Sentence>,
}

impl Document {
    pub fn new(raw: impl Into<String>, language: Language, sentences: Vec<Sentence>) -> Self {
        Self {
            raw: raw.into(),
            language,
            sentences,
        }
    }

    /// Todos os tokens, em ordem de documento.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.sentences.iter().flat_map(|s| s.tokens.iter())
    }

    /// Formas de superfície, no formato esperado pelo avaliador.
    pub fn surfaces(&self) -> Vec<String> {
        self.tokens().map(|t| t.text.clone()).collect()
    }
}
