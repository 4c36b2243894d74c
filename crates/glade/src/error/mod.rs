//! # Error Types
//!
//! Errors and warnings raised while a grammar is being built.
//!
//! Parsing itself never errors: a rejected input is reported as a `false`
//! from recognition or an empty forest from parsing. Everything that can
//! actually go wrong goes wrong at construction time, either fatally
//! ([`GrammarError`]) or as a finding that leaves the affected rule
//! inactive ([`RuleWarning`]).
//!
//! When the `diagnostics` feature is enabled, errors integrate with
//! [`miette`] for rich reporting.

use thiserror::Error;

#[cfg(feature = "diagnostics")]
use miette::Diagnostic;

/// Fatal grammar construction errors.
#[derive(Debug, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum GrammarError {
    #[error("no start symbol declared")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::missing_start)))]
    MissingStart,

    #[error("start symbol `{name}` has no production")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::no_start_production)))]
    NoStartProduction { name: String },

    #[error("production for `{lhs}` references undefined non-terminal `{name}`")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::undefined_non_terminal)))]
    UndefinedNonTerminal { lhs: String, name: String },

    #[error("invalid pattern `{pattern}`")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::invalid_pattern)))]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Non-fatal findings collected while resolving disambiguation rules.
///
/// A warned-about rule is dropped (it becomes inactive); the grammar still
/// builds. Warnings are readable from [`Grammar::warnings`].
///
/// [`Grammar::warnings`]: crate::grammar::Grammar::warnings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleWarning {
    #[error("{rule} rule references unknown non-terminal `{name}`; rule is inactive")]
    UnknownNonTerminal { name: String, rule: &'static str },

    #[error("follow restriction on literal `{literal}` only applies to nodes whose yield equals the literal")]
    LiteralFollowRestriction { literal: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grammar_error_display() {
        let err = GrammarError::NoStartProduction {
            name: "S".to_string(),
        };
        assert!(format!("{err}").contains("`S`"));

        let err = GrammarError::UndefinedNonTerminal {
            lhs: "S".to_string(),
            name: "Missing".to_string(),
        };
        assert!(format!("{err}").contains("`Missing`"));
    }

    #[test]
    fn invalid_pattern_keeps_source() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = GrammarError::InvalidPattern {
            pattern: "(".to_string(),
            source,
        };
        assert!(format!("{err}").contains("invalid pattern"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn rule_warning_display() {
        let warning = RuleWarning::UnknownNonTerminal {
            name: "Ghost".to_string(),
            rule: "reject",
        };
        assert!(format!("{warning}").contains("reject"));
        assert!(format!("{warning}").contains("`Ghost`"));
    }
}
