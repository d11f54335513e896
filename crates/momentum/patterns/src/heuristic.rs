/// Flags individual corpus tokens as candidate new vocabulary.
///
/// Implementations receive a lower-cased token with surrounding punctuation
/// already trimmed (apostrophes are kept).
pub trait TermHeuristic: Send + Sync {
    fn name(&self) -> &str;

    fn is_candidate(&self, token: &str) -> bool;
}

/// Suffix/prefix/apostrophe rules typical of spoken Québécois French.
#[derive(Clone, Debug)]
pub struct DialectMorphologyHeuristic {
    suffixes: Vec<String>,
    prefixes: Vec<String>,
    /// Standard contractions that do not mark dialect.
    contraction_whitelist: Vec<String>,
}

impl DialectMorphologyHeuristic {
    pub fn new() -> Self {
        Self {
            suffixes: vec!["tte".into(), "oune".into()],
            prefixes: vec!["tch".into()],
            contraction_whitelist: ["l'", "d'", "c'", "qu'", "n'"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffixes.push(suffix.into());
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes.push(prefix.into());
        self
    }

    fn has_dialect_apostrophe(&self, token: &str) -> bool {
        token.contains('\'')
            && !self
                .contraction_whitelist
                .iter()
                .any(|c| token.starts_with(c.as_str()))
    }
}

impl Default for DialectMorphologyHeuristic {
    fn default() -> Self {
        Self::new()
    }
}

impl TermHeuristic for DialectMorphologyHeuristic {
    fn name(&self) -> &str {
        "dialect-morphology"
    }

    fn is_candidate(&self, token: &str) -> bool {
        if token.is_empty() {
            return false;
        }
        self.suffixes.iter().any(|s| token.ends_with(s.as_str()))
            || self.prefixes.iter().any(|p| token.starts_with(p.as_str()))
            || self.has_dialect_apostrophe(token)
    }
}
