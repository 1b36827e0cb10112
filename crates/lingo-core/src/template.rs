//! Message template substitution.
//!
//! The translator never parses template syntax itself; it hands the template
//! and arguments to a [`MessageFormatter`]. [`BraceFormatter`] is the default
//! and understands `{{Name}}` and `{{.Name}}` placeholders.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Placeholder syntax: `{{ Name }}` or `{{ .Name }}`, whitespace optional.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*\.?([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("placeholder regex is valid")
});

/// Result of rendering a template.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rendered {
    pub text: String,
    /// Placeholders with no matching argument, left verbatim in `text`.
    pub missing: Vec<String>,
    /// Arguments that matched no placeholder.
    pub unused: Vec<String>,
}

/// Renders a message template with named arguments.
pub trait MessageFormatter: Send + Sync + std::fmt::Debug {
    fn format(&self, template: &str, args: &[(&str, &str)]) -> Rendered;
}

/// `{{Name}}` / `{{.Name}}` substitution. Single pass: substituted values are
/// never re-scanned for placeholders.
#[derive(Debug, Clone, Copy, Default)]
pub struct BraceFormatter;

impl MessageFormatter for BraceFormatter {
    fn format(&self, template: &str, args: &[(&str, &str)]) -> Rendered {
        let mut missing = Vec::new();
        let mut used = BTreeSet::new();

        let text = PLACEHOLDER
            .replace_all(template, |caps: &Captures<'_>| {
                let name = &caps[1];
                match args.iter().find(|(arg, _)| *arg == name) {
                    Some((arg, value)) => {
                        used.insert(*arg);
                        (*value).to_string()
                    }
                    None => {
                        if !missing.iter().any(|m| m == name) {
                            missing.push(name.to_string());
                        }
                        caps[0].to_string()
                    }
                }
            })
            .into_owned();

        let mut unused = Vec::new();
        for (name, _) in args {
            if !used.contains(name) && !unused.iter().any(|u| u == name) {
                unused.push((*name).to_string());
            }
        }

        Rendered {
            text,
            missing,
            unused,
        }
    }
}
