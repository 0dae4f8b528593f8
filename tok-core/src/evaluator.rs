//! # Avaliação de tokenização
//!
//! Compara uma tokenização hipótese com uma referência e calcula precisão,
//! cobertura (recall) e F-score sobre as formas de superfície.
//!
//! ## Alinhamento
//!
//! As duas sequências são percorridas com dois cursores:
//!
//! - formas iguais: um verdadeiro positivo, avançam os dois;
//! - formas diferentes: procura-se o par coincidente mais próximo dentro de
//!   uma janela de `lookahead` posições em cada lado (menor salto total,
//!   empate resolvido com menos saltos na referência). Tokens da referência
//!   pulados contam como falsos negativos e da hipótese como falsos positivos;
//! - sem par na janela: avança o lado com menos tokens restantes (os dois, se
//!   empatados).
//!
//! Cada passo consome ao menos um token, então o laço sempre termina. Sobras
//! ao final contam como FN (referência) e FP (hipótese).

use serde::{Deserialize, Serialize};

/// Janela padrão de ressincronização, em tokens por lado.
pub const DEFAULT_LOOKAHEAD: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub true_positive: usize,
    pub false_positive: usize,
    pub false_negative: usize,
    pub precision: f64,
    pub recall: f64,
    pub f_score: f64,
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

impl EvaluationResult {
    /// Deriva as métricas a partir das contagens (zero quando o denominador é zero).
    pub fn from_counts(true_positive: usize, false_positive: usize, false_negative: usize) -> Self {
        let tp = true_positive as f64;
        let precision = ratio(tp, tp + false_positive as f64);
        let recall = ratio(tp, tp + false_negative as f64);
        let f_score = ratio(2.0 * precision * recall, precision + recall);
        Self {
            true_positive,
            false_positive,
            false_negative,
            precision,
            recall,
            f_score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizerEvaluator {
    pub lookahead: usize,
}

impl Default for TokenizerEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_LOOKAHEAD)
    }
}

impl TokenizerEvaluator {
    pub fn new(lookahead: usize) -> Self {
        Self { lookahead }
    }

    /// Alinha `reference` e `hypothesis` e calcula as métricas.
    pub fn evaluate<R, H>(&self, reference: &[R], hypothesis: &[H]) -> EvaluationResult
    where
        R: AsRef<str>,
        H: AsRef<str>,
    {
        let (mut i, mut j) = (0usize, 0usize);
        let (mut tp, mut fp, mut fn_) = (0usize, 0usize, 0usize);

        while i < reference.len() && j < hypothesis.len() {
            if reference[i].as_ref() == hypothesis[j].as_ref() {
                tp += 1;
                i += 1;
                j += 1;
                continue;
            }

            match self.resync(reference, hypothesis, i, j) {
                Some((skip_ref, skip_hyp)) => {
                    fn_ += skip_ref;
                    fp += skip_hyp;
                    i += skip_ref;
                    j += skip_hyp;
                }
                None => {
                    let ref_left = reference.len() - i;
                    let hyp_left = hypothesis.len() - j;
                    if ref_left <= hyp_left {
                        fn_ += 1;
                        i += 1;
                    }
                    if hyp_left <= ref_left {
                        fp += 1;
                        j += 1;
                    }
                }
            }
        }

        fn_ += reference.len() - i;
        fp += hypothesis.len() - j;
        EvaluationResult::from_counts(tp, fp, fn_)
    }

    /// Menor par de saltos `(referência, hipótese)` que leva a formas iguais.
    fn resync<R, H>(&self, reference: &[R], hypothesis: &[H], i: usize, j: usize) -> Option<(usize, usize)>
    where
        R: AsRef<str>,
        H: AsRef<str>,
    {
        let max_ref = self.lookahead.min(reference.len() - i - 1);
        let max_hyp = self.lookahead.min(hypothesis.len() - j - 1);

        for total in 1..=(max_ref + max_hyp) {
            let lo = total.saturating_sub(max_hyp);
            let hi = total.min(max_ref);
            for skip_ref in lo..=hi {
                let skip_hyp = total - skip_ref;
                if reference[i + skip_ref].as_ref() == hypothesis[j + skip_hyp].as_ref() {
                    return Some((skip_ref, skip_hyp));
                }
            }
        }
        None
    }
}

/// Atalho com a janela padrão.
pub fn evaluate<R: AsRef<str>, H: AsRef<str>>(reference: &[R], hypothesis: &[H]) -> EvaluationResult {
    TokenizerEvaluator::default().evaluate(reference, hypothesis)
}
