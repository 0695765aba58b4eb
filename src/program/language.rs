//! Language label normalization.
//!
//! Maps the free-form labels found in program listings (`PARI/GP`, `Python 3`,
//! `Mma`) to canonical identifiers, and canonical identifiers to a
//! highlighter mode. The table is plain data so it can be extended from
//! configuration and tested without a highlighter.

use std::collections::HashMap;

/// Canonical identifier used for listings before any language marker.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// How a block should be highlighted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighlightMode {
    /// Highlight with the syntax definition found by this token
    /// (file extension or syntax name).
    Syntax(String),
    /// No highlighting.
    PlainText,
}

/// One language known to the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSpec {
    /// Canonical identifier (lowercase).
    pub canonical: String,
    /// Extra labels that resolve to this language, matched case-insensitively.
    pub aliases: Vec<String>,
    /// Highlighter token, or `None` for plain text.
    pub syntax: Option<String>,
}

impl LanguageSpec {
    /// Build a spec; the canonical id is lowercased.
    pub fn new(canonical: &str, aliases: &[&str], syntax: Option<&str>) -> Self {
        Self {
            canonical: canonical.trim().to_lowercase(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            syntax: syntax.map(str::to_string),
        }
    }
}

/// Canonical id, aliases, highlighter token.
const BUILTIN_LANGUAGES: &[(&str, &[&str], Option<&str>)] = &[
    ("maple", &[], None),
    ("mathematica", &["mma", "wolfram", "wolfram language"], Some("mathematica")),
    ("pari", &["pari/gp", "gp", "pari-gp"], None),
    ("magma", &[], None),
    ("gap", &[], None),
    ("maxima", &[], None),
    ("sage", &["sagemath"], Some("py")),
    ("python", &["python3", "python 3", "python2", "py"], Some("py")),
    ("haskell", &["hs"], Some("hs")),
    ("julia", &[], Some("jl")),
    ("ruby", &[], Some("rb")),
    ("java", &[], Some("java")),
    ("c", &[], Some("c")),
    ("cpp", &["c++"], Some("cpp")),
    ("csharp", &["c#"], Some("cs")),
    ("javascript", &["js", "node.js"], Some("js")),
    ("rust", &[], Some("rs")),
    ("go", &["golang"], Some("go")),
    ("perl", &[], Some("pl")),
    ("r", &[], Some("r")),
    ("scheme", &["racket", "mit scheme"], Some("scm")),
    ("lisp", &["common lisp"], Some("lisp")),
    ("matlab", &["octave"], Some("matlab")),
    ("bash", &["sh", "shell"], Some("sh")),
    ("lua", &[], Some("lua")),
    ("scala", &[], Some("scala")),
    ("fortran", &[], Some("f90")),
    ("erlang", &[], Some("erl")),
    ("ocaml", &[], Some("ml")),
];

/// Explicit label → canonical id → highlight mode table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageTable {
    specs: Vec<LanguageSpec>,
    by_label: HashMap<String, usize>,
}

impl LanguageTable {
    /// Table with no languages; every label is unknown.
    pub fn empty() -> Self {
        Self {
            specs: Vec::new(),
            by_label: HashMap::new(),
        }
    }

    /// Table preloaded with the languages commonly found in catalog listings.
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        for (canonical, aliases, syntax) in BUILTIN_LANGUAGES {
            table.insert(LanguageSpec::new(canonical, aliases, *syntax));
        }
        table
    }

    /// Add a language, replacing any existing spec with the same canonical id.
    pub fn insert(&mut self, spec: LanguageSpec) {
        match self
            .specs
            .iter()
            .position(|existing| existing.canonical == spec.canonical)
        {
            Some(index) => self.specs[index] = spec,
            None => self.specs.push(spec),
        }
        self.reindex();
    }

    fn reindex(&mut self) {
        self.by_label.clear();
        for (index, spec) in self.specs.iter().enumerate() {
            self.by_label.insert(spec.canonical.clone(), index);
            for alias in &spec.aliases {
                self.by_label.insert(normalize_label(alias), index);
            }
        }
    }

    fn lookup(&self, label: &str) -> Option<&LanguageSpec> {
        let normalized = normalize_label(label);
        if let Some(&index) = self.by_label.get(&normalized) {
            return self.specs.get(index);
        }

        // Labels such as "Scheme, with memoization" resolve by their leading word.
        let leading = normalized
            .split([',', ' '])
            .next()
            .filter(|word| !word.is_empty() && *word != normalized)?;
        self.by_label
            .get(leading)
            .and_then(|&index| self.specs.get(index))
    }

    /// Canonical id for a known label.
    pub fn resolve(&self, label: &str) -> Option<&str> {
        self.lookup(label).map(|spec| spec.canonical.as_str())
    }

    /// Whether the label resolves to a known language.
    pub fn is_known(&self, label: &str) -> bool {
        self.lookup(label).is_some()
    }

    /// Canonical id for any label.
    ///
    /// Unknown labels become their trimmed, lowercased text.
    pub fn canonicalize(&self, label: &str) -> String {
        self.resolve(label)
            .map(str::to_string)
            .unwrap_or_else(|| normalize_label(label))
    }

    /// Highlighter mode for a canonical id.
    pub fn highlight_mode(&self, canonical: &str) -> HighlightMode {
        match self.lookup(canonical).and_then(|spec| spec.syntax.as_deref()) {
            Some(token) => HighlightMode::Syntax(token.to_string()),
            None => HighlightMode::PlainText,
        }
    }

    /// Number of languages in the table.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// True when the table has no languages.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl Default for LanguageTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}
