//! EULA generator CLI
//!
//! Reads agreement details from a TOML file, applies any section edits
//! on top of the built-in clause template, and writes the rendered PDF.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use tracing::info;

use eula_core::{ClauseSection, SectionList, Variables};
use eula_pdf::{generate_eula, suggested_filename};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Generates an End User License Agreement PDF.")]
struct Args {
    #[clap(short, long, default_value = "eula.toml", help = "Agreement details in TOML.")]
    config: PathBuf,

    #[clap(short, long, help = "Output path; defaults to <product>_EULA.pdf.")]
    output: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    variables: Variables,

    /// Ids of template sections to drop.
    remove: Vec<String>,

    /// Custom sections, appended unless `insert_after` names an anchor.
    #[serde(rename = "section")]
    sections: Vec<CustomSection>,
}

#[derive(Debug, Deserialize)]
struct CustomSection {
    id: String,
    title: String,
    content: String,
    insert_after: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("eula_cli=info".parse()?)
                .add_directive("eula_pdf=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let raw = fs::read_to_string(&args.config)
        .with_context(|| format!("reading config {}", args.config.display()))?;
    let config: Config = toml::from_str(&raw)
        .with_context(|| format!("parsing config {}", args.config.display()))?;

    let sections = build_sections(&config)?;
    let bytes = generate_eula(sections.as_slice(), &config.variables)?;

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(suggested_filename(&config.variables)));
    fs::write(&output, &bytes).with_context(|| format!("writing {}", output.display()))?;
    info!(path = %output.display(), bytes = bytes.len(), "wrote agreement");
    Ok(())
}

fn build_sections(config: &Config) -> Result<SectionList> {
    let mut list = SectionList::seeded();
    for id in &config.remove {
        list.remove(id)
            .with_context(|| format!("removing section '{}'", id))?;
    }
    for custom in &config.sections {
        let section = ClauseSection::custom(
            custom.id.as_str(),
            custom.title.as_str(),
            custom.content.as_str(),
        );
        match &custom.insert_after {
            Some(after) => list
                .insert_after(after, section)
                .with_context(|| format!("inserting section '{}'", custom.id))?,
            None => list.push(section),
        }
    }
    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_config_defaults_to_seeded_template() {
        let config: Config = toml::from_str("").unwrap();
        let list = build_sections(&config).unwrap();
        assert_eq!(list.len(), 11);
    }

    #[test]
    fn test_full_config_round_trip() {
        let config: Config = toml::from_str(
            r#"
            remove = ["support"]

            [variables]
            provider_name = "Acme Pty Ltd"
            product_name = "AcmeCloud"
            license_date = "2024-04-05"

            [[section]]
            id = "export"
            title = "12. EXPORT CONTROLS"
            content = "You must comply with all applicable export laws."
            insert_after = "governing-law"
            "#,
        )
        .unwrap();

        assert_eq!(config.variables.product_name, "AcmeCloud");
        let list = build_sections(&config).unwrap();
        assert_eq!(list.len(), 11); // 11 - support + export
        assert!(list.iter().all(|s| s.id != "support"));
        assert_eq!(list.iter().last().unwrap().id, "export");
    }

    #[test]
    fn test_custom_section_without_anchor_appends() {
        let config: Config = toml::from_str(
            r#"
            [[section]]
            id = "extra"
            title = "EXTRA"
            content = "Extra terms."
            "#,
        )
        .unwrap();
        let list = build_sections(&config).unwrap();
        assert_eq!(list.iter().last().unwrap().id, "extra");
        assert!(list.iter().last().unwrap().is_custom);
    }

    #[test]
    fn test_unknown_anchor_is_an_error() {
        let config: Config = toml::from_str(
            r#"
            [[section]]
            id = "extra"
            title = "EXTRA"
            content = "Extra terms."
            insert_after = "missing"
            "#,
        )
        .unwrap();
        let err = build_sections(&config).unwrap_err();
        assert!(format!("{:#}", err).contains("missing"));
    }
}
