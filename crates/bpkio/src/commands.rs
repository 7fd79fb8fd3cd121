use anyhow::{Context, bail};
use bpkio_plugin::{Provider, Schema};
use colored::Colorize;
use std::collections::BTreeMap;

/// Prints the whole provider schema, or one entry of it
pub fn schema<P: Provider>(provider: &P, name: Option<&str>, pretty: bool) -> anyhow::Result<()> {
    let schema = provider.provider_schema();
    let value = match name {
        None => serde_json::to_value(&schema)?,
        Some(name) => {
            let full = bpkio_plugin::provider::full_name(provider.type_name(), name);
            let found = [name, full.as_str()].into_iter().find_map(|key| {
                schema
                    .resources
                    .get(key)
                    .or_else(|| schema.data_sources.get(key))
            });
            match found {
                Some(entry) => serde_json::to_value(entry)?,
                None => bail!("no resource or data source named {name:?}"),
            }
        }
    };

    let encoded = if pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    }
    .context("failed to encode schema")?;
    println!("{encoded}");
    Ok(())
}

pub fn resources<P: Provider>(provider: &P) {
    let schema = provider.provider_schema();
    println!(
        "{} {}",
        provider.type_name().bold(),
        provider.version().dimmed()
    );

    section("Resources", &schema.resources);
    section("Data sources", &schema.data_sources);
}

fn section(title: &str, entries: &BTreeMap<String, Schema>) {
    println!();
    println!("{}", title.cyan().bold());
    for (name, schema) in entries {
        let summary = schema.description.lines().next().unwrap_or_default();
        println!("  {} {}", name.green(), summary.dimmed());
    }
}
