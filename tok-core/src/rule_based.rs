//! # Regras por idioma — abreviações, contrações e elisões
//!
//! O motor de tokenização é o mesmo para todos os idiomas; o que muda é o
//! conjunto de regras carregado na construção do [`crate::Tokenizer`]:
//!
//! - **Abreviações**: palavras cujo ponto final faz parte do token ("Mr.", "Sra.").
//! - **Abreviações numéricas**: só mantêm o ponto antes de um número ("No. 5", "Nr. 3").
//! - **Contrações**: o inglês separa clíticos ("didn't" → "did" + "n't");
//!   francês e italiano separam o artigo elidido ("l'homme" → "l'" + "homme");
//!   os demais idiomas mantêm o apóstrofo dentro da palavra.
//!
//! As listas são intencionalmente curtas e editáveis via [`LanguageRules::add_abbreviation`].

use std::collections::HashSet;
use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::Language;
use crate::span::SpanKind;

/// Como o idioma trata palavras ligadas por apóstrofo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractionStyle {
    /// Clíticos do inglês: "n't", "'s", "'re", "'ve", "'ll", "'d", "'m".
    Clitic,
    /// Artigos/preposições elididos antes de vogal: "l'", "d'", "dell'".
    Elision,
    /// O apóstrofo fica dentro da palavra ("O'Brien", "aujourd'hui").
    Keep,
}

static ENGLISH_CLITIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b((?:\p{L}+['’-])*\p{L}+?)(n['’]t|['’](?:s|re|ve|ll|d|m))\b").unwrap()
});

static ELIDED_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\p{L}+)['’]\p{L}").unwrap());

const EN_ABBREVIATIONS: &[&str] = &[
    "Mr", "Mrs", "Ms", "Dr", "Prof", "Sr", "Jr", "St", "Mt", "Gen", "Gov", "Sen", "Rep",
    "Col", "Capt", "Lt", "Sgt", "Rev", "Hon", "Inc", "Ltd", "Co", "Corp", "Bros", "Ave",
    "Blvd", "Rd", "Jan", "Feb", "Mar", "Apr", "Jun", "Jul", "Aug", "Sep", "Sept", "Oct",
    "Nov", "Dec", "vs", "etc", "approx", "dept", "est", "fig", "al", "cf",
];
const EN_NUMERIC: &[&str] = &["No", "Nos", "Art", "pp", "p", "vol", "ch"];
/// Palavras de uma letra maiúscula que não são iniciais ("So did I. Then...")
const EN_NON_INITIALS: &[&str] = &["I"];

const ES_ABBREVIATIONS: &[&str] = &[
    "Sr", "Sra", "Srta", "Sres", "Dr", "Dra", "Lic", "Ing", "Prof", "Av", "Avda", "Cía",
    "Ud", "Uds", "Vd", "Vds", "Excmo", "Ilmo", "etc", "aprox", "tel", "ej", "dcha", "izq",
];
const ES_NUMERIC: &[&str] = &["núm", "Núm", "pág", "págs", "art", "Art", "n"];

const GL_ABBREVIATIONS: &[&str] = &[
    "Sr", "Sra", "Srta", "Dr", "Dra", "Prof", "Av", "Avda", "Excmo", "etc", "aprox", "tel",
];
const GL_NUMERIC: &[&str] = &["núm", "páx", "art", "Art"];

const EU_ABBREVIATIONS: &[&str] = &["Jn", "And", "Dk", "etab", "adib", "esaterako", "zenb"];
const EU_NUMERIC: &[&str] = &["zk", "or", "ald"];

const FR_ABBREVIATIONS: &[&str] = &[
    "M", "MM", "Mme", "Mmes", "Mlle", "Mlles", "Dr", "Pr", "Me", "St", "Ste", "etc", "cf",
    "av", "bd", "env", "chap", "éd", "hab", "tél",
];
const FR_NUMERIC: &[&str] = &["n", "no", "p", "vol", "art"];
const FR_ELISIONS: &[&str] = &[
    "c", "d", "j", "l", "m", "n", "s", "t", "qu", "jusqu", "lorsqu", "puisqu", "quoiqu",
    "presqu", "quelqu",
];

const IT_ABBREVIATIONS: &[&str] = &[
    "Sig", "Sigg", "Dott", "Dr", "Prof", "Avv", "Ing", "Geom", "Rag", "On", "Sen", "S",
    "ecc", "cfr", "es", "tel", "ca",
];
const IT_NUMERIC: &[&str] = &["n", "art", "pag", "pagg"];
const IT_ELISIONS: &[&str] = &[
    "l", "d", "c", "s", "m", "t", "v", "n", "un", "all", "dall", "dell", "nell", "sull",
    "coll", "pell", "quell", "quest", "bell", "sant", "tutt", "anch", "cent", "mezz",
    "nessun", "ciascun", "buon",
];

const NL_ABBREVIATIONS: &[&str] = &[
    "dhr", "mevr", "mr", "dr", "prof", "ir", "ing", "drs", "bijv", "enz", "etc", "evt",
    "ca", "resp", "vgl",
];
const NL_NUMERIC: &[&str] = &["nr", "art", "blz"];

const DE_ABBREVIATIONS: &[&str] = &[
    "Dr", "Prof", "Hr", "Hrn", "Fr", "Frl", "Str", "bzw", "ca", "usw", "etc", "evtl",
    "ggf", "inkl", "vgl", "Jh", "Mio", "Mrd", "St", "geb", "gest",
];
const DE_NUMERIC: &[&str] = &["Nr", "Art", "Abs", "S", "Bd"];

const PL_ABBREVIATIONS: &[&str] = &[
    "np", "tzn", "itd", "itp", "ok", "prof", "dr", "mgr", "inż", "ul", "al", "św", "tj",
    "godz", "ww", "wg", "pkt", "ks", "płk",
];
const PL_NUMERIC: &[&str] = &["nr", "s", "str", "r"];

/// Conjunto de regras de um idioma.
#[derive(Debug, Clone)]
pub struct LanguageRules {
    pub language: Language,
    /// Abreviações (sem o ponto) que sempre mantêm o ponto
    abbreviations: HashSet<String>,
    /// Abreviações que só mantêm o ponto quando seguidas de número
    numeric_abbreviations: HashSet<String>,
    /// Prefixos elididos em minúsculas ("l", "dell")
    elisions: HashSet<String>,
    /// Maiúsculas isoladas que nunca são iniciais de nome
    non_initials: HashSet<String>,
    style: ContractionStyle,
}

impl LanguageRules {
    /// Carrega as tabelas padrão do idioma.
    pub fn for_language(language: Language) -> Self {
        let (abbreviations, numeric, elisions, style): (&[&str], &[&str], &[&str], _) =
            match language {
                Language::En => (EN_ABBREVIATIONS, EN_NUMERIC, &[], ContractionStyle::Clitic),
                Language::Es => (ES_ABBREVIATIONS, ES_NUMERIC, &[], ContractionStyle::Keep),
                Language::Gl => (GL_ABBREVIATIONS, GL_NUMERIC, &[], ContractionStyle::Keep),
                Language::Eu => (EU_ABBREVIATIONS, EU_NUMERIC, &[], ContractionStyle::Keep),
                Language::Fr => (FR_ABBREVIATIONS, FR_NUMERIC, FR_ELISIONS, ContractionStyle::Elision),
                Language::It => (IT_ABBREVIATIONS, IT_NUMERIC, IT_ELISIONS, ContractionStyle::Elision),
                Language::Nl => (NL_ABBREVIATIONS, NL_NUMERIC, &[], ContractionStyle::Keep),
                Language::De => (DE_ABBREVIATIONS, DE_NUMERIC, &[], ContractionStyle::Keep),
                Language::Pl => (PL_ABBREVIATIONS, PL_NUMERIC, &[], ContractionStyle::Keep),
            };
        let non_initials: &[&str] = match language {
            Language::En => EN_NON_INITIALS,
            _ => &[],
        };

        Self {
            language,
            abbreviations: abbreviations.iter().map(|s| s.to_string()).collect(),
            numeric_abbreviations: numeric.iter().map(|s| s.to_string()).collect(),
            elisions: elisions.iter().map(|s| s.to_string()).collect(),
            non_initials: non_initials.iter().map(|s| s.to_string()).collect(),
            style,
        }
    }

    pub fn style(&self) -> ContractionStyle {
        self.style
    }

    pub fn add_abbreviation(&mut self, word: &str) {
        self.abbreviations
            .insert(word.trim_end_matches('.').to_string());
    }

    pub fn add_numeric_abbreviation(&mut self, word: &str) {
        self.numeric_abbreviations
            .insert(word.trim_end_matches('.').to_string());
    }

    /// `word` sem o ponto final. Aceita a forma exata ou, para entradas em
    /// minúsculas ("etc"), qualquer capitalização.
    pub fn is_abbreviation(&self, word: &str) -> bool {
        self.abbreviations.contains(word) || self.abbreviations.contains(&word.to_lowercase())
    }

    pub fn is_numeric_abbreviation(&self, word: &str) -> bool {
        self.numeric_abbreviations.contains(word)
            || self.numeric_abbreviations.contains(&word.to_lowercase())
    }

    /// Uma letra maiúscula isolada que pode ser inicial de nome ("J. K. Rowling").
    pub fn can_be_initial(&self, word: &str) -> bool {
        let mut chars = word.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase())
            && !self.non_initials.contains(word)
    }

    /// Spans protegidos por contração/elisão dentro de `chunk`.
    ///
    /// Os intervalos são relativos ao início de `chunk`. Para clíticos são
    /// devolvidos dois spans (base e clítico), para que a base não seja
    /// reagrupada com o apóstrofo na divisão por pontuação.
    pub fn contractions(&self, chunk: &str) -> Vec<(Range<usize>, SpanKind)> {
        match self.style {
            ContractionStyle::Clitic => ENGLISH_CLITIC
                .captures_iter(chunk)
                .filter_map(|caps| {
                    let base = caps.get(1)?;
                    let clitic = caps.get(2)?;
                    Some([
                        (base.range(), SpanKind::Word),
                        (clitic.range(), SpanKind::Contraction),
                    ])
                })
                .flatten()
                .collect(),
            ContractionStyle::Elision => {
                let mut found = Vec::new();
                let mut from = 0;
                // find_at manual: "qu'il l'a" precisa de buscas sobrepostas
                while let Some(caps) = ELIDED_PREFIX.captures_at(chunk, from) {
                    let (Some(whole), Some(prefix)) = (caps.get(0), caps.get(1)) else {
                        break;
                    };
                    // O span elidido termina logo após o apóstrofo
                    let last_len = whole.as_str().chars().last().map_or(0, char::len_utf8);
                    let elided_end = whole.end() - last_len;
                    if self.elisions.contains(&prefix.as_str().to_lowercase()) {
                        found.push((prefix.start()..elided_end, SpanKind::Contraction));
                    }
                    from = elided_end;
                }
                found
            }
            ContractionStyle::Keep => Vec::new(),
        }
    }
}
