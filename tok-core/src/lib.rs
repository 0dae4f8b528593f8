//! # tok-core — Tokenizador multilíngue baseado em regras
//!
//! Divide texto bruto em tokens com offsets de caracteres, agrupa os tokens em
//! sentenças e avalia uma tokenização contra uma referência (precisão,
//! cobertura e F-score).
//!
//! ## Arquitetura
//!
//! O dado flui em estágios fixos:
//!
//! 1.  **Entrada**: texto bruto, texto já tokenizado ou documento estruturado.
//! 2.  **Tokenização** ([`tokenizer`]): spans candidatos passam por proteção
//!     (URLs, e-mails, números, siglas, abreviações, contrações), divisão por
//!     pontuação, normalização ([`normalizer`]) e política de caracteres não
//!     tokenizáveis. As regras de cada idioma ficam em [`rule_based`].
//! 3.  **Segmentação** ([`segmenter`]): pontuação final e política de quebra de linha.
//! 4.  **Saída** ([`output`]): um token por linha, tabular ou JSON estruturado.
//!
//! A avaliação ([`evaluator`]) é independente: compara duas sequências de
//! formas de superfície, normalmente lidas com [`corpus`].
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use tok_core::{process, Language, OutputFormat, TokConfig};
//!
//! let config = TokConfig::new(Language::En).with_output(OutputFormat::Oneline);
//! let out = process("Mr. Smith didn't go.", &config).unwrap();
//! assert_eq!(out, "Mr.\nSmith\ndid\nn't\ngo\n.\n\n");
//! ```
//!
//! ## Módulos Principais
//!
//! - [`pipeline`]: endpoint de anotação (`process`).
//! - [`tokenizer`]: motor de tokenização.
//! - [`evaluator`]: alinhamento e métricas.
//! - [`protocol`]: enquadramento de documentos no socket.

pub mod config;
pub mod corpus;
pub mod document;
pub mod error;
pub mod evaluator;
pub mod normalizer;
pub mod output;
pub mod pipeline;
pub mod protocol;
pub mod rule_based;
pub mod segmenter;
pub mod span;
pub mod tokenizer;

pub use config::{
    InputMode, Language, NormalizationProfile, OutputFormat, SegmentationPolicy, TokConfig,
    UntokenizablePolicy, DEFAULT_NAF_VERSION,
};
pub use corpus::{load_reference, parse_reference, read_reference, ReferenceFormat};
pub use document::{Document, Sentence};
pub use error::{Result, TokError};
pub use evaluator::{evaluate, EvaluationResult, TokenizerEvaluator, DEFAULT_LOOKAHEAD};
pub use normalizer::normalize;
pub use pipeline::{process, Annotator};
pub use protocol::{frame_document, read_document, DocumentAssembler, END_OF_DOCUMENT};
pub use rule_based::LanguageRules;
pub use segmenter::segment;
pub use tokenizer::{tokenize, Token, Tokenizer};
