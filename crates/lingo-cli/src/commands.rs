//! Implementations of the non-server subcommands.

use std::collections::BTreeSet;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use lingo_core::{
    Catalog, DEFAULT_LANGUAGE, DirectoryResources, LocaleIdentifier, MessageTable, Translator,
    detect_language, match_language,
};
use serde::Serialize;

/// Output format for listing commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn greet(translator: &Translator) -> Result<ExitCode> {
    println!("{}", translator.translate("hello"));
    println!("Run 'lingo --help' to see the available commands.");
    Ok(ExitCode::SUCCESS)
}

pub fn translate(translator: &Translator, key: &str, args: &[(String, String)]) -> Result<ExitCode> {
    let args: Vec<(&str, &str)> = args
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();
    println!("{}", translator.translate_with(key, &args));
    Ok(ExitCode::SUCCESS)
}

#[derive(Serialize)]
struct LanguageList<'a> {
    active: &'a LocaleIdentifier,
    available: &'a [LocaleIdentifier],
}

pub fn languages(translator: &Translator, format: OutputFormat) -> Result<ExitCode> {
    match format {
        OutputFormat::Json => {
            let list = LanguageList {
                active: translator.language(),
                available: translator.available_languages(),
            };
            println!("{}", serde_json::to_string_pretty(&list)?);
        }
        OutputFormat::Text => {
            println!("Available languages:");
            for locale in translator.available_languages() {
                let messages = translator.catalog().table(locale).map_or(0, MessageTable::len);
                let marker = if locale == translator.language() {
                    " (active)".green().to_string()
                } else {
                    String::new()
                };
                println!("  {:<8} {} messages{}", locale.to_string(), messages, marker);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

pub fn detect(translator: &Translator) -> Result<ExitCode> {
    let detected = detect_language(translator.available_languages())
        .context("failed to detect locale from environment")?;
    match detected {
        Some(locale) => println!("{locale}"),
        None => println!("none"),
    }
    Ok(ExitCode::SUCCESS)
}

/// Differences between one language and the reference language.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TableReport {
    pub missing: Vec<String>,
    pub extra: Vec<String>,
}

pub fn compare_tables(reference: &MessageTable, table: &MessageTable) -> TableReport {
    let reference_keys: BTreeSet<&str> = reference.keys().collect();
    let keys: BTreeSet<&str> = table.keys().collect();
    TableReport {
        missing: reference_keys.difference(&keys).map(|k| k.to_string()).collect(),
        extra: keys.difference(&reference_keys).map(|k| k.to_string()).collect(),
    }
}

/// Validate a directory of message files against the default language.
pub fn check(dir: &Path) -> Result<ExitCode> {
    let catalog = match Catalog::load(&DirectoryResources::new(dir)) {
        Ok(catalog) => catalog,
        Err(err) => {
            println!("{} {}", "error:".red().bold(), format_chain(&err));
            return Ok(ExitCode::FAILURE);
        }
    };

    let reference = match_language(DEFAULT_LANGUAGE, catalog.available())?
        .accepted(lingo_core::Confidence::Low)
        .cloned();
    let Some(reference) = reference else {
        println!(
            "{} no '{}' message file in {}",
            "error:".red().bold(),
            DEFAULT_LANGUAGE,
            dir.display()
        );
        return Ok(ExitCode::FAILURE);
    };
    let reference_table = catalog
        .table(&reference)
        .context("reference table disappeared from catalog")?;

    let mut incomplete = 0usize;
    for locale in catalog.available() {
        let Some(table) = catalog.table(locale) else {
            continue;
        };
        let report = compare_tables(reference_table, table);

        let status = if report.missing.is_empty() {
            "ok".green()
        } else {
            incomplete += 1;
            "incomplete".yellow()
        };
        println!("{:<8} {} messages, {}", locale.to_string(), table.len(), status);

        for key in &report.missing {
            println!("  {} {}", "missing:".yellow(), key);
        }
        for key in &report.extra {
            println!("  {} {}", "extra:".dimmed(), key);
        }
    }

    println!(
        "{} language(s) checked against '{}', {} incomplete",
        catalog.len(),
        reference,
        incomplete
    );

    if incomplete == 0 {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn format_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_tables() {
        let reference: MessageTable = [("a", "A"), ("b", "B"), ("c", "C")].into_iter().collect();
        let table: MessageTable = [("a", "x"), ("d", "y")].into_iter().collect();
        let report = compare_tables(&reference, &table);
        assert_eq!(report.missing, vec!["b", "c"]);
        assert_eq!(report.extra, vec!["d"]);
    }

    #[test]
    fn test_compare_identical_tables() {
        let reference: MessageTable = [("a", "A")].into_iter().collect();
        assert_eq!(compare_tables(&reference, &reference), TableReport::default());
    }

    #[test]
    fn test_format_chain() {
        let err = lingo_core::I18nError::from(lingo_core::LoadError::Read {
            resource: "fr.json".into(),
            source: std::io::Error::other("disk on fire"),
        });
        assert_eq!(
            format_chain(&err),
            "failed to load locale catalog: failed to read locale resource: fr.json: disk on fire"
        );
    }
}
