// src/noyau/jetons.rs
//
// Jetons du tampon de saisie.
// - Digit : un chiffre '0'..='9'
// - Point : séparateur décimal
// - Op    : + - × ÷ %
//
// AC / DEL / = ne sont PAS des jetons : ce sont des commandes (voir tampon.rs).

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Plus,
    Minus,
    Times,
    Divide,
    Percent, // a % b = a × (b/100)
}

impl Op {
    /// Symbole affiché (celui des touches).
    pub fn symbole(self) -> char {
        match self {
            Op::Plus => '+',
            Op::Minus => '-',
            Op::Times => '×',
            Op::Divide => '÷',
            Op::Percent => '%',
        }
    }

    /// Accepte aussi les formes clavier ASCII (* et /).
    pub fn depuis_char(c: char) -> Option<Op> {
        match c {
            '+' => Some(Op::Plus),
            '-' => Some(Op::Minus),
            '×' | '*' | 'x' => Some(Op::Times),
            '÷' | '/' => Some(Op::Divide),
            '%' => Some(Op::Percent),
            _ => None,
        }
    }

    /// Niveau additif (+ -) : précédence basse.
    pub fn est_additif(self) -> bool {
        matches!(self, Op::Plus | Op::Minus)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbole())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tok {
    Digit(char),
    Point,
    Op(Op),
}

impl Tok {
    pub fn est_op(&self) -> bool {
        matches!(self, Tok::Op(_))
    }

    fn symbole(&self) -> char {
        match self {
            Tok::Digit(d) => *d,
            Tok::Point => '.',
            Tok::Op(op) => op.symbole(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("caractère inattendu: '{0}'")]
pub struct TokenizeError(pub char);

/// Tokenize une chaîne “calculatrice” en jetons.
/// Supporte:
/// - chiffres 0-9 et le point
/// - opérateurs + - × ÷ % (et * / en ASCII)
/// - espaces ignorés
///
/// Aucune normalisation ici : "1..2" donne deux Point, c’est l’évaluateur qui tranche.
pub fn tokenize(s: &str) -> Result<Vec<Tok>, TokenizeError> {
    let mut out = Vec::with_capacity(s.len());

    for c in s.chars() {
        if c.is_whitespace() {
            continue;
        }
        if c.is_ascii_digit() {
            out.push(Tok::Digit(c));
            continue;
        }
        if c == '.' {
            out.push(Tok::Point);
            continue;
        }
        match Op::depuis_char(c) {
            Some(op) => out.push(Tok::Op(op)),
            None => return Err(TokenizeError(c)),
        }
    }

    Ok(out)
}

/// Texte affiché pour une suite de jetons (sans espaces : "7+5", "3.4×2").
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens.iter().map(Tok::symbole).collect()
}

/// Le nombre en cours (suite maximale de chiffres/points en fin de tampon)
/// contient-il déjà un point ?
pub fn nombre_final_a_un_point(tokens: &[Tok]) -> bool {
    tokens
        .iter()
        .rev()
        .take_while(|t| !t.est_op())
        .any(|t| matches!(t, Tok::Point))
}
