// src/noyau/format.rs
//
// Affichage d’un résultat rationnel :
// - entier        : sans partie décimale ("12", "-4")
// - non entier    : arrondi à `chiffres` décimales, zéros finaux retirés ("0.33333333", "2.5")
// - jamais de "-0"

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// |r| × 10^chiffres, arrondi au plus proche (demi vers le haut).
fn scaled_arrondi(r: &BigRational, chiffres: usize) -> BigInt {
    let n = r.numer().abs() * pow10(chiffres);
    let d = r.denom().abs();
    (n * 2 + &d) / (d * 2)
}

pub fn format_resultat(r: &BigRational, chiffres: usize) -> String {
    if r.is_integer() {
        return r.to_integer().to_string();
    }

    let scaled = scaled_arrondi(r, chiffres);
    if scaled.is_zero() {
        return "0".to_string();
    }

    let scale = pow10(chiffres);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;

    let mut out = String::new();
    if r.is_negative() {
        out.push('-');
    }
    out.push_str(&int_part.to_string());

    if chiffres > 0 && !frac_part.is_zero() {
        let frac = format!("{:0>width$}", frac_part.to_string(), width = chiffres);
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::eval::evaluate;
    use crate::noyau::jetons::tokenize;

    fn rat(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn entiers_sans_decimales() {
        assert_eq!(format_resultat(&rat(12, 1), 8), "12");
        assert_eq!(format_resultat(&rat(-4, 1), 8), "-4");
        assert_eq!(format_resultat(&rat(0, 1), 8), "0");
        assert_eq!(format_resultat(&rat(10, 5), 8), "2");
    }

    #[test]
    fn arrondi_huit_decimales() {
        assert_eq!(format_resultat(&rat(1, 3), 8), "0.33333333");
        assert_eq!(format_resultat(&rat(2, 3), 8), "0.66666667");
        assert_eq!(format_resultat(&rat(-2, 3), 8), "-0.66666667");
    }

    #[test]
    fn zeros_finaux_retires() {
        assert_eq!(format_resultat(&rat(5, 2), 8), "2.5");
        assert_eq!(format_resultat(&rat(3, 10), 8), "0.3");
        assert_eq!(format_resultat(&rat(1, 100), 8), "0.01");
    }

    #[test]
    fn arrondi_vers_entier_ou_zero() {
        // 0.999999999 => 1 ; 0.000000001 => 0 (et jamais "-0")
        assert_eq!(format_resultat(&rat(999_999_999, 1_000_000_000), 8), "1");
        assert_eq!(format_resultat(&rat(1, 1_000_000_000), 8), "0");
        assert_eq!(format_resultat(&rat(-1, 1_000_000_000), 8), "0");
    }

    #[test]
    fn autres_precisions() {
        assert_eq!(format_resultat(&rat(1, 3), 2), "0.33");
        assert_eq!(format_resultat(&rat(7, 2), 0), "4");
    }

    #[test]
    fn entier_formate_relu_meme_valeur() {
        for s in ["7+5", "123456789×987654321", "10-25", "9".repeat(300).as_str()] {
            let v = evaluate(&tokenize(s).unwrap()).unwrap();
            assert!(v.is_integer());
            let txt = format_resultat(&v, 8);
            let relu = evaluate(&tokenize(&txt).unwrap()).unwrap();
            assert_eq!(relu, v, "expr={s:?}");
        }
    }

    #[test]
    fn non_entier_au_plus_huit_decimales() {
        for s in ["1÷3", "2÷7", "1÷8", "22÷7×3", "0.1+0.2", "5%3"] {
            let v = evaluate(&tokenize(s).unwrap()).unwrap();
            let txt = format_resultat(&v, 8);
            if let Some((_, frac)) = txt.split_once('.') {
                assert!(frac.len() <= 8, "expr={s:?} txt={txt:?}");
                assert!(!frac.ends_with('0'), "expr={s:?} txt={txt:?}");
            }
        }
    }
}
