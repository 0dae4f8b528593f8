//! # Codificações de saída
//!
//! Três formas de escrever um [`Document`]:
//!
//! | Formato   | Conteúdo                                                       |
//! |-----------|----------------------------------------------------------------|
//! | `oneline` | um token por linha, linha em branco entre sentenças            |
//! | `conll`   | `índice \t forma [\t offset \t comprimento]`, idem             |
//! | `naf`     | JSON com cabeçalho de proveniência, texto bruto e sentenças    |
//!
//! O formato estruturado também é aceito como entrada (ver
//! [`raw_text_from_structured`]): apenas o texto bruto é reaproveitado.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::{Result, TokError};

/// Nome e versão do processador que gerou o documento.
pub const PRODUCER_PREFIX: &str = "tok-core";
pub const PRODUCER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Registro de proveniência de uma etapa de processamento.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub layer: String,
    pub name: String,
    pub version: String,
    /// Início do processamento (RFC 3339).
    pub begin_timestamp: String,
    /// Fim do processamento (RFC 3339); vazio até [`Provenance::finish`].
    pub end_timestamp: String,
}

impl Provenance {
    /// Abre o registro com o instante atual como início.
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            layer: "text".to_string(),
            name: name.into(),
            version: PRODUCER_VERSION.to_string(),
            begin_timestamp: Utc::now().to_rfc3339(),
            end_timestamp: String::new(),
        }
    }

    pub fn finish(&mut self) {
        self.end_timestamp = Utc::now().to_rfc3339();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NafHeader {
    pub lang: String,
    #[serde(default)]
    pub version: String,
    pub linguistic_processors: Vec<Provenance>,
}

/// Token na forma estruturada. `id` segue a numeração `w1…wN` do documento.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NafWord {
    pub id: String,
    pub form: String,
    pub offset: usize,
    pub length: usize,
    pub sent: usize,
    pub para: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NafSentence {
    pub id: usize,
    pub paragraph: usize,
    pub words: Vec<NafWord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NafDocument {
    pub header: NafHeader,
    pub raw: String,
    pub sentences: Vec<NafSentence>,
}

impl NafDocument {
    pub fn from_document(document: &Document, version: &str, provenance: Provenance) -> Self {
        let mut next_word = 0;
        let sentences = document
            .sentences
            .iter()
            .map(|sentence| NafSentence {
                id: sentence.id,
                paragraph: sentence.paragraph,
                words: sentence
                    .tokens
                    .iter()
                    .map(|token| {
                        next_word += 1;
                        NafWord {
                            id: format!("w{}", next_word),
                            form: token.text.clone(),
                            offset: token.start,
                            length: token.length,
                            sent: token.sentence,
                            para: token.paragraph,
                        }
                    })
                    .collect(),
            })
            .collect();

        Self {
            header: NafHeader {
                lang: document.language.code().to_string(),
                version: version.to_string(),
                linguistic_processors: vec![provenance],
            },
            raw: document.raw.clone(),
            sentences,
        }
    }
}

/// Um token por linha; linha em branco ao fim de cada sentença.
pub fn to_oneline(document: &Document) -> String {
    let mut out = String::new();
    for sentence in &document.sentences {
        for token in &sentence.tokens {
            out.push_str(&token.text);
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

/// Formato tabular. O índice recomeça em 1 a cada sentença.
pub fn to_conll(document: &Document, offsets: bool) -> String {
    let mut out = String::new();
    for sentence in &document.sentences {
        for (i, token) in sentence.tokens.iter().enumerate() {
            if offsets {
                out.push_str(&format!("{}\t{}\t{}\t{}\n", i + 1, token.text, token.start, token.length));
            } else {
                out.push_str(&format!("{}\t{}\n", i + 1, token.text));
            }
        }
        out.push('\n');
    }
    out
}

pub fn to_naf(document: &Document, version: &str, provenance: Provenance) -> Result<String> {
    let naf = NafDocument::from_document(document, version, provenance);
    Ok(serde_json::to_string_pretty(&naf)?)
}

/// Extrai o texto bruto de um documento estruturado recebido como entrada.
///
/// Basta o campo `raw` no nível superior; o restante é ignorado.
pub fn raw_text_from_structured(input: &str) -> Result<String> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    value
        .get("raw")
        .and_then(|raw| raw.as_str())
        .map(str::to_string)
        .ok_or_else(|| TokError::StructuredInput("campo 'raw' ausente ou não textual".to_string()))
}
