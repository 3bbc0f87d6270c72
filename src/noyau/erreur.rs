// src/noyau/erreur.rs
//
// Erreurs de l’évaluateur. Le tampon les absorbe toutes en un seul état
// “erreur” affiché, mais garde le genre exact (journal + last_error()).

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// Suite vide, opérateur final, point seul, opérateur initial × ÷ %, etc.
    #[error("expression mal formée")]
    MalformedExpression,

    #[error("division par zéro")]
    DivisionByZero,

    /// Résultat hors de la plage finie d’un f64.
    #[error("dépassement de capacité")]
    Overflow,
}
