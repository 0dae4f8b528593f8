//! # Normalização por corpus
//!
//! Reescreve a forma de superfície de um token segundo a convenção de um
//! corpus de referência (ex: Penn Treebank escreve "(" como "-LRB-").
//!
//! A normalização é uma função pura aplicada token a token: nunca altera
//! offsets nem comprimento do span original, só o texto exibido. Também é
//! idempotente: nenhuma saída de uma tabela é entrada da mesma tabela.
//!
//! ## Ordem de aplicação
//!
//! 1. Substituição do token inteiro (`tokens`), se houver entrada.
//! 2. Substituição caractere a caractere (`chars`).
//! 3. Escape com barra invertida (`escaped`), apenas de ocorrências ainda não escapadas.

use crate::config::NormalizationProfile;

struct ProfileTable {
    tokens: &'static [(&'static str, &'static str)],
    chars: &'static [(char, &'static str)],
    escaped: &'static [char],
}

const EMPTY: ProfileTable = ProfileTable {
    tokens: &[],
    chars: &[],
    escaped: &[],
};

const PTB: ProfileTable = ProfileTable {
    tokens: &[
        ("(", "-LRB-"),
        (")", "-RRB-"),
        ("[", "-LSB-"),
        ("]", "-RSB-"),
        ("{", "-LCB-"),
        ("}", "-RCB-"),
        ("“", "``"),
        ("”", "''"),
        ("„", "``"),
        ("«", "``"),
        ("»", "''"),
        ("‘", "`"),
        ("’", "'"),
        ("…", "..."),
        ("–", "--"),
        ("—", "--"),
    ],
    chars: &[('’', "'"), ('‘', "'")],
    escaped: &['/', '*'],
};

const TUTPENN: ProfileTable = ProfileTable {
    tokens: &[
        ("(", "-LRB-"),
        (")", "-RRB-"),
        ("[", "-LSB-"),
        ("]", "-RSB-"),
        ("{", "-LCB-"),
        ("}", "-RCB-"),
        ("“", "\""),
        ("”", "\""),
        ("«", "\""),
        ("»", "\""),
        ("…", "..."),
    ],
    chars: &[('’', "'")],
    escaped: &[],
};

const CTAG: ProfileTable = ProfileTable {
    tokens: &[
        ("“", "\""),
        ("”", "\""),
        ("«", "\""),
        ("»", "\""),
        ("…", "..."),
        ("–", "-"),
        ("—", "-"),
    ],
    chars: &[('’', "'")],
    escaped: &[],
};

const ANCORA: ProfileTable = ProfileTable {
    tokens: &[
        ("“", "\""),
        ("”", "\""),
        ("«", "\""),
        ("»", "\""),
        ("…", "..."),
    ],
    chars: &[],
    escaped: &[],
};

const ALPINO: ProfileTable = ProfileTable {
    tokens: &[
        ("“", "\""),
        ("”", "\""),
        ("„", "\""),
        ("«", "\""),
        ("»", "\""),
        ("…", "..."),
    ],
    chars: &[('’', "'"), ('‘', "'")],
    escaped: &[],
};

const TIGER: ProfileTable = ProfileTable {
    tokens: &[
        ("„", "\""),
        ("“", "\""),
        ("”", "\""),
        ("»", "\""),
        ("«", "\""),
        ("…", "..."),
        ("–", "-"),
    ],
    chars: &[],
    escaped: &[],
};

fn table(profile: NormalizationProfile) -> &'static ProfileTable {
    match profile {
        NormalizationProfile::Default => &EMPTY,
        NormalizationProfile::Alpino => &ALPINO,
        NormalizationProfile::Ancora => &ANCORA,
        NormalizationProfile::Ctag => &CTAG,
        NormalizationProfile::Ptb => &PTB,
        NormalizationProfile::Tiger => &TIGER,
        NormalizationProfile::Tutpenn => &TUTPENN,
    }
}

/// Normaliza a forma de superfície de um token segundo `profile`.
pub fn normalize(surface: &str, profile: NormalizationProfile) -> String {
    let table = table(profile);

    if let Some((_, replacement)) = table.tokens.iter().find(|(from, _)| *from == surface) {
        return replacement.to_string();
    }

    let mut result = String::with_capacity(surface.len());
    let mut previous: Option<char> = None;
    for ch in surface.chars() {
        if let Some((_, replacement)) = table.chars.iter().find(|(from, _)| *from == ch) {
            result.push_str(replacement);
        } else if table.escaped.contains(&ch) && previous != Some('\\') {
            result.push('\\');
            result.push(ch);
        } else {
            result.push(ch);
        }
        previous = Some(ch);
    }
    result
}
