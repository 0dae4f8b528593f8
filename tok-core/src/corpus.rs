//! # Corpus de referência
//!
//! Leitura dos arquivos de referência usados pelo avaliador. Dois formatos:
//!
//! - **tokenline**: um token por linha; linhas em branco são ignoradas.
//! - **sentenceline**: uma sentença por linha, tokens separados por espaço.
//!
//! Os dois produzem a mesma coisa: a sequência de formas de superfície, em ordem.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TokError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceFormat {
    #[default]
    TokenLine,
    SentenceLine,
}

impl fmt::Display for ReferenceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceFormat::TokenLine => write!(f, "tokenline"),
            ReferenceFormat::SentenceLine => write!(f, "sentenceline"),
        }
    }
}

impl FromStr for ReferenceFormat {
    type Err = TokError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "tokenline" => Ok(ReferenceFormat::TokenLine),
            "sentenceline" => Ok(ReferenceFormat::SentenceLine),
            other => Err(TokError::option("inputFormat", other)),
        }
    }
}

/// Extrai as formas de superfície de um texto de referência já decodificado.
pub fn parse_reference(text: &str, format: ReferenceFormat) -> Vec<String> {
    match format {
        ReferenceFormat::TokenLine => text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
        ReferenceFormat::SentenceLine => text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .flat_map(|line| line.split(' '))
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

/// Lê uma referência de qualquer fonte. Bytes fora de UTF-8 são erro.
pub fn read_reference<R: Read>(mut reader: R, format: ReferenceFormat) -> Result<Vec<String>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let text = String::from_utf8(bytes)?;
    Ok(parse_reference(&text, format))
}

pub fn load_reference(path: impl AsRef<Path>, format: ReferenceFormat) -> Result<Vec<String>> {
    let file = File::open(path)?;
    read_reference(file, format)
}
