//! Literal phrase substitution

/// Ordered (from, to) pairs. Each pair is applied to the output of the
/// previous one, so when keys overlap the longer phrase must come first.
#[derive(Debug, Clone, Copy)]
pub struct TranslationTable {
    pub name: &'static str,
    entries: &'static [(&'static str, &'static str)],
}

impl TranslationTable {
    pub const fn new(name: &'static str, entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { name, entries }
    }

    pub fn entries(&self) -> &'static [(&'static str, &'static str)] {
        self.entries
    }

    pub fn apply(&self, text: &str) -> String {
        apply(text, self)
    }
}

/// Replace every literal occurrence of each `from` with its `to`, in table order.
///
/// No pattern syntax is interpreted. Empty keys are ignored.
pub fn apply(text: &str, table: &TranslationTable) -> String {
    table
        .entries
        .iter()
        .filter(|(from, _)| !from.is_empty())
        .fold(text.to_string(), |acc, (from, to)| {
            if acc.contains(from) {
                acc.replace(from, to)
            } else {
                acc
            }
        })
}

/// Absent input translates to an empty string
pub fn apply_opt(text: Option<&str>, table: &TranslationTable) -> String {
    text.map(|t| apply(t, table)).unwrap_or_default()
}
