//! # Spans candidatos
//!
//! Representação intermediária do motor de tokenização. Cada estágio do
//! pipeline (proteção → divisão → normalização → não-tokenizáveis) lê e
//! produz listas de [`Candidate`], em vez de mutar a string original.
//!
//! ## Por que spans e não strings?
//!
//! Um candidato guarda apenas o intervalo de bytes no texto bruto e um rótulo.
//! O texto original nunca é alterado, então os offsets finais são sempre
//! exatos, e o texto entre dois tokens continua disponível para reconstruir
//! o documento.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Tipo do candidato, atribuído pelo estágio que o criou.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanKind {
    /// Sequência de letras/dígitos (com hífens e apóstrofos internos).
    Word,
    /// Expressão numérica: decimais, milhares, horas, datas.
    Number,
    Url,
    Email,
    /// Siglas com pontos entre letras (ex: "N.Y.C.", "e.g.").
    Acronym,
    /// Abreviação da lista do idioma, com o ponto final (ex: "Mr.").
    Abbreviation,
    /// Clítico ou artigo elidido separado da palavra (ex: "n't", "l'").
    Contraction,
    Punctuation,
    /// Caractere fora das tabelas de letras e pontuação (ex: emoji, U+FFFD).
    Untokenizable,
}

/// Um trecho do texto bruto candidato a virar token.
///
/// `start` e `end` são índices de **byte** no texto completo (não no chunk);
/// a conversão para offsets de caractere acontece só na emissão dos tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Índice de byte inicial (inclusivo).
    pub start: usize,
    /// Índice de byte final (exclusivo).
    pub end: usize,
    pub kind: SpanKind,
    /// Marcado pelo estágio de proteção: estágios seguintes não podem dividi-lo.
    pub protected: bool,
    /// Forma de superfície; vazia até o estágio de normalização.
    pub surface: String,
}

impl Candidate {
    pub fn new(range: Range<usize>, kind: SpanKind) -> Self {
        Self {
            start: range.start,
            end: range.end,
            kind,
            protected: false,
            surface: String::new(),
        }
    }

    pub fn protected(range: Range<usize>, kind: SpanKind) -> Self {
        Self {
            protected: true,
            ..Self::new(range, kind)
        }
    }

    /// Texto original coberto pelo candidato.
    pub fn raw<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }

    pub fn overlaps(&self, range: &Range<usize>) -> bool {
        self.start < range.end && range.start < self.end
    }
}

/// Lista de spans já reivindicados, em que uma regra de menor precedência
/// nunca pode sobrepor uma de maior precedência.
#[derive(Debug, Default)]
pub struct ClaimSet {
    claimed: Vec<Candidate>,
}

impl ClaimSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reivindica o intervalo se ele estiver livre. Retorna `false` se já
    /// havia algum span protegido sobreposto.
    pub fn claim(&mut self, range: Range<usize>, kind: SpanKind) -> bool {
        if range.is_empty() || !self.is_free(&range) {
            return false;
        }
        self.claimed.push(Candidate::protected(range, kind));
        true
    }

    pub fn is_free(&self, range: &Range<usize>) -> bool {
        !self.claimed.iter().any(|c| c.overlaps(range))
    }

    /// Spans protegidos ordenados por posição.
    pub fn into_sorted(mut self) -> Vec<Candidate> {
        self.claimed.sort_by_key(|c| c.start);
        self.claimed
    }
}

/// Intervalos de `outer` não cobertos pelos spans (ordenados) de `claimed`.
pub fn gaps(outer: Range<usize>, claimed: &[Candidate]) -> Vec<Range<usize>> {
    let mut result = Vec::new();
    let mut cursor = outer.start;
    for span in claimed {
        if span.start > cursor {
            result.push(cursor..span.start);
        }
        cursor = cursor.max(span.end);
    }
    if cursor < outer.end {
        result.push(cursor..outer.end);
    }
    result
}
