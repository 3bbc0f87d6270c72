//! Noyau — évaluation (descente récursive)
//!
//! Grammaire (deux niveaux, associativité à gauche, pas de parenthèses) :
//!
//! ```text
//! expression := signe? terme ( ('+' | '-') terme )*
//! terme      := facteur ( ('×' | '÷' | '%') facteur )*
//! facteur    := chiffres ('.' chiffres?)? | '.' chiffres
//! ```
//!
//! - `a % b` vaut `a × (b/100)`.
//! - Le signe n’est admis qu’en tête d’expression.
//! - Arithmétique rationnelle exacte : aucune perte silencieuse.
//!
//! Aucun interpréteur : seuls les jetons connus sont reconnus.

use std::sync::OnceLock;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use super::erreur::EvalError;
use super::jetons::{Op, Tok};

/// Évalue une suite de jetons. Fonction pure : même entrée => même sortie.
pub fn evaluate(tokens: &[Tok]) -> Result<BigRational, EvalError> {
    if tokens.is_empty() {
        return Err(EvalError::MalformedExpression);
    }

    let mut lecteur = Lecteur { tokens, pos: 0 };
    let valeur = lecteur.expression()?;

    // reste non consommé (ex: "1.2.3" => le second point)
    if lecteur.pos != tokens.len() {
        return Err(EvalError::MalformedExpression);
    }

    verifier_fini(valeur)
}

struct Lecteur<'a> {
    tokens: &'a [Tok],
    pos: usize,
}

impl Lecteur<'_> {
    fn peek(&self) -> Option<Tok> {
        self.tokens.get(self.pos).copied()
    }

    fn expression(&mut self) -> Result<BigRational, EvalError> {
        // signe initial : "-2+3" (résultat négatif réutilisé), "+5"
        let negatif = match self.peek() {
            Some(Tok::Op(Op::Minus)) => {
                self.pos += 1;
                true
            }
            Some(Tok::Op(Op::Plus)) => {
                self.pos += 1;
                false
            }
            _ => false,
        };

        let mut acc = self.terme()?;
        if negatif {
            acc = -acc;
        }

        while let Some(Tok::Op(op)) = self.peek() {
            if !op.est_additif() {
                break;
            }
            self.pos += 1;
            let droite = self.terme()?;
            acc = match op {
                Op::Plus => acc + droite,
                _ => acc - droite,
            };
        }

        Ok(acc)
    }

    fn terme(&mut self) -> Result<BigRational, EvalError> {
        let mut acc = self.facteur()?;

        while let Some(Tok::Op(op)) = self.peek() {
            if op.est_additif() {
                break;
            }
            self.pos += 1;
            let droite = self.facteur()?;
            acc = match op {
                Op::Times => acc * droite,
                Op::Divide => {
                    if droite.is_zero() {
                        return Err(EvalError::DivisionByZero);
                    }
                    acc / droite
                }
                // a % b = a × (b/100) : le diviseur est constant, jamais nul
                _ => acc * droite / BigRational::from_integer(BigInt::from(100)),
            };
        }

        Ok(acc)
    }

    fn facteur(&mut self) -> Result<BigRational, EvalError> {
        let mut mantisse = String::new();
        let mut decimales: usize = 0;
        let mut point = false;

        while let Some(t) = self.peek() {
            match t {
                Tok::Digit(d) => {
                    mantisse.push(d);
                    if point {
                        decimales += 1;
                    }
                }
                Tok::Point if !point => point = true,
                // second point : on laisse expression() constater le reste
                Tok::Point | Tok::Op(_) => break,
            }
            self.pos += 1;
        }

        // point seul, opérateur à la place d’un nombre, fin prématurée
        if mantisse.is_empty() {
            return Err(EvalError::MalformedExpression);
        }

        let n = BigInt::parse_bytes(mantisse.as_bytes(), 10).ok_or(EvalError::MalformedExpression)?;
        let d = BigInt::from(10).pow(decimales as u32);
        Ok(BigRational::new(n, d))
    }
}

/* ------------------------ Plage finie (f64) ------------------------ */

static LIMITE_F64: OnceLock<BigRational> = OnceLock::new();

/// f64::MAX = 2^1024 − 2^971, en exact.
fn limite_f64() -> &'static BigRational {
    LIMITE_F64.get_or_init(|| {
        let max = (BigInt::one() << 1024usize) - (BigInt::one() << 971usize);
        BigRational::from_integer(max)
    })
}

fn verifier_fini(valeur: BigRational) -> Result<BigRational, EvalError> {
    if &valeur.abs() > limite_f64() {
        return Err(EvalError::Overflow);
    }
    Ok(valeur)
}
