//! Handheld detection from the runtime's identification string.

use regex::{RegexSet, RegexSetBuilder};
use std::sync::LazyLock;
use strum_macros::{AsRefStr, Display};
use telqr_domain::SignatureTable;
use telqr_domain::signatures::PREFIX_WINDOW;

static LEGACY: LazyLock<CompiledTable> =
    LazyLock::new(|| CompiledTable::compile(SignatureTable::Legacy));
static MODERN: LazyLock<CompiledTable> =
    LazyLock::new(|| CompiledTable::compile(SignatureTable::Modern));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum DeviceClass {
    Mobile,
    Desktop,
}

/// Where in the identification string a signature matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SignatureKind {
    Token,
    Prefix,
}

/// The table entry responsible for a `Mobile` verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub kind: SignatureKind,
    pub pattern: &'static str,
}

#[derive(Debug)]
struct CompiledTable {
    tokens: RegexSet,
    prefixes: RegexSet,
}

impl CompiledTable {
    fn compile(table: SignatureTable) -> Self {
        Self { tokens: build_set(table.tokens()), prefixes: build_set(table.prefixes()) }
    }
}

fn build_set(patterns: &[&str]) -> RegexSet {
    RegexSetBuilder::new(patterns)
        .case_insensitive(true)
        .build()
        .expect("Invalid device signature pattern")
}

/// Pure matcher over one [`SignatureTable`].
#[derive(Debug, Clone, Copy)]
pub struct DeviceClassifier {
    table: SignatureTable,
    compiled: &'static CompiledTable,
}

impl DeviceClassifier {
    #[must_use]
    pub fn new(table: SignatureTable) -> Self {
        let compiled = match table {
            SignatureTable::Legacy => &*LEGACY,
            SignatureTable::Modern => &*MODERN,
        };
        Self { table, compiled }
    }

    #[must_use]
    pub const fn table(&self) -> SignatureTable {
        self.table
    }

    #[must_use]
    pub fn classify(&self, identification: &str) -> DeviceClass {
        if self.matched_signature(identification).is_some() {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    /// A missing identification string is treated as a desktop runtime.
    #[must_use]
    pub fn classify_optional(&self, identification: Option<&str>) -> DeviceClass {
        identification.map_or(DeviceClass::Desktop, |ua| self.classify(ua))
    }

    /// Returns the first signature matching `identification`.
    #[must_use]
    pub fn matched_signature(&self, identification: &str) -> Option<Signature> {
        if let Some(index) = self.compiled.tokens.matches(identification).iter().next() {
            return Some(Signature {
                kind: SignatureKind::Token,
                pattern: self.table.tokens()[index],
            });
        }

        let head = leading_chars(identification, PREFIX_WINDOW);
        self.compiled.prefixes.matches(head).iter().next().map(|index| Signature {
            kind: SignatureKind::Prefix,
            pattern: self.table.prefixes()[index],
        })
    }
}

impl Default for DeviceClassifier {
    fn default() -> Self {
        Self::new(SignatureTable::default())
    }
}

fn leading_chars(s: &str, count: usize) -> &str {
    s.char_indices().nth(count).map_or(s, |(end, _)| &s[..end])
}
