//! Language configuration for line directives.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How a tangled file records where a line originally came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LineDirective {
    /// Emit nothing.
    #[default]
    None,
    /// C preprocessor style: `#line 12 "doc.md"`
    C,
    /// Go compiler style: `//line doc.md:12`
    Go,
    /// A user template with `{line}` and `{file}` placeholders.
    Custom(String),
}

impl LineDirective {
    /// Formats the directive for a line, including the trailing newline.
    ///
    /// Returns `None` when this strategy emits nothing.
    pub fn format(&self, line: usize, file: &str) -> Option<String> {
        match self {
            LineDirective::None => None,
            LineDirective::C => Some(format!("#line {} \"{}\"\n", line, file)),
            LineDirective::Go => Some(format!("//line {}:{}\n", file, line)),
            LineDirective::Custom(template) => Some(format!(
                "{}\n",
                template
                    .replace("{line}", &line.to_string())
                    .replace("{file}", file)
            )),
        }
    }

    /// Parses a directive name or template.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" | "off" => Some(LineDirective::None),
            "c" | "cpp" => Some(LineDirective::C),
            "go" | "golang" => Some(LineDirective::Go),
            _ if s.contains("{line}") => Some(LineDirective::Custom(s.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for LineDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineDirective::None => write!(f, "none"),
            LineDirective::C => write!(f, "c"),
            LineDirective::Go => write!(f, "go"),
            LineDirective::Custom(template) => write!(f, "{}", template),
        }
    }
}

impl Serialize for LineDirective {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for LineDirective {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        LineDirective::parse(&s).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "unknown directive: '{}' (expected 'none', 'c', 'go', or a template containing {{line}})",
                s
            ))
        })
    }
}

/// Maps fence language tags to a line directive strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Canonical language name (e.g., "c", "go")
    pub name: String,

    /// Other fence tags that select this language
    #[serde(default)]
    pub identifiers: Vec<String>,

    /// Directive emitted at provenance discontinuities
    pub directive: LineDirective,
}

impl Language {
    /// Creates a new Language configuration.
    pub fn new(name: impl Into<String>, directive: LineDirective) -> Self {
        Self {
            name: name.into(),
            identifiers: Vec::new(),
            directive,
        }
    }

    /// Adds fence tag aliases.
    pub fn with_identifiers(mut self, identifiers: &[&str]) -> Self {
        self.identifiers = identifiers.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Checks if this language matches a fence tag.
    pub fn matches(&self, tag: &str) -> bool {
        self.name == tag || self.identifiers.iter().any(|id| id == tag)
    }
}
