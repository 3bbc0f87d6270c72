//! Tests fuzz safe : invariants du tampon + robustesse de l’évaluateur.
//!
//! But : marteler le noyau sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - longueur bornée
//! - budget temps global
//! - invariants clés : jamais deux opérateurs voisins, au plus un point par nombre,
//!   évaluation idempotente, résultats affichés à 8 décimales max

use std::time::{Duration, Instant};

use super::jetons::{format_tokens, Op, Tok};
use super::tampon::{Command, Reglages, Tampon};
use super::{evaluate, format_resultat, tokenize, EvalError, HorlogeSysteme};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Générateurs ------------------------ */

const OPS: [Op; 5] = [Op::Plus, Op::Minus, Op::Times, Op::Divide, Op::Percent];

/// Touche au hasard, pondérée : surtout des chiffres, un peu de tout le reste.
fn gen_commande(rng: &mut Rng) -> Command {
    match rng.pick(20) {
        0..=9 => Command::PressDigit(char::from(b'0' + rng.pick(10) as u8)),
        10 | 11 => Command::PressPoint,
        12..=15 => Command::PressOperator(OPS[rng.pick(5) as usize]),
        16 => Command::Delete,
        17 | 18 => Command::Evaluate,
        _ => Command::Clear,
    }
}

/// Suite de jetons brute (pas forcément bien formée).
fn gen_jetons(rng: &mut Rng, n: usize) -> Vec<Tok> {
    (0..n)
        .map(|_| match rng.pick(6) {
            0..=3 => Tok::Digit(char::from(b'0' + rng.pick(10) as u8)),
            4 => Tok::Point,
            _ => Tok::Op(OPS[rng.pick(5) as usize]),
        })
        .collect()
}

/* ------------------------ Invariants ------------------------ */

fn check_invariants_tampon(tokens: &[Tok]) {
    for w in tokens.windows(2) {
        assert!(
            !(w[0].est_op() && w[1].est_op()),
            "opérateurs voisins: {:?}",
            format_tokens(tokens)
        );
    }
    for nombre in tokens.split(|t| t.est_op()) {
        let points = nombre.iter().filter(|t| matches!(t, Tok::Point)).count();
        assert!(points <= 1, "deux points dans un nombre: {:?}", format_tokens(tokens));
    }
}

fn check_affichage_resultat(txt: &str) {
    if let Some((_, frac)) = txt.split_once('.') {
        assert!(frac.len() <= 8, "trop de décimales: {txt:?}");
        assert!(!frac.ends_with('0'), "zéro final: {txt:?}");
    }
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_invariants_du_tampon() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);
    let mut tampon = Tampon::new(Reglages::default(), Box::new(HorlogeSysteme::new()));

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..3000 {
        budget(t0, max);

        let cmd = gen_commande(&mut rng);
        let d = tampon.apply(cmd);
        check_invariants_tampon(tampon.tokens());

        if cmd == Command::Evaluate {
            if d.is_error {
                seen_err += 1;
            } else if !d.history.is_empty() && tampon.tokens().is_empty() {
                check_affichage_resultat(&d.current);
                seen_ok += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_evaluateur_jetons_bruts() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..1000 {
        budget(t0, max);

        let n = rng.pick(12) as usize;
        let jetons = gen_jetons(&mut rng, n);

        // jamais de panique, toujours le même verdict
        let a = evaluate(&jetons);
        let b = evaluate(&jetons);
        assert_eq!(a, b, "non idempotent: {:?}", format_tokens(&jetons));

        match a {
            Ok(v) => check_affichage_resultat(&format_resultat(&v, 8)),
            Err(e) => assert!(matches!(
                e,
                EvalError::MalformedExpression | EvalError::DivisionByZero | EvalError::Overflow
            )),
        }
    }
}

#[test]
fn fuzz_safe_longue_saisie() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    // 1+1+1+... (2000 termes) : pas de récursion profonde dans l’évaluateur
    let expr = vec!["1"; 2000].join("+");
    let v = evaluate(&tokenize(&expr).unwrap()).unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);
    assert_eq!(format_resultat(&v, 8), "2000");
}
