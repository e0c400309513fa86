mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::CliArgs;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use kindtable::render::render_cell;
use kindtable::{ApiResource, LinkContext, Registry, config};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing(&args.log_filter)?;

    let snapshot = config::load()?;
    if let Some(source) = &snapshot.source {
        debug!(source = %source, "loaded config file");
    }

    let cluster = args
        .cluster
        .clone()
        .or(snapshot.cluster)
        .unwrap_or_else(|| "local".to_string());
    let namespace = args.namespace.clone().or(snapshot.namespace);

    let resource = ApiResource::new(
        &args.kind,
        args.resource
            .as_deref()
            .unwrap_or(&format!("{}s", args.kind.to_lowercase())),
        &args.group,
        &args.version,
    );
    let link = LinkContext { cluster, namespace };

    let registry = Registry::new();
    let adapter = registry.adapter_for(&args.kind);
    let bindings = registry.column_bindings_for(&args.kind, &resource, &link);
    let now_ms = chrono::Utc::now().timestamp_millis();

    let headers = bindings
        .iter()
        .map(|binding| binding.header().title)
        .collect::<Vec<_>>()
        .join("\t");
    println!("{headers}");

    let mut total = 0usize;
    for file in &args.files {
        let documents = load_documents(file)?;
        debug!(file = %file.display(), documents = documents.len(), "loaded manifests");

        for object in documents {
            let row = adapter.extract(&object);
            let cells = bindings
                .iter()
                .map(|binding| {
                    render_cell(
                        binding.ui_schema,
                        row.get(binding.attribute),
                        &binding.materialize(&row),
                        now_ms,
                    )
                })
                .collect::<Vec<_>>()
                .join("\t");
            println!("{cells}");
            total += 1;
        }
    }

    info!(kind = %args.kind, rows = total, "tabulated resources");
    Ok(())
}

fn init_tracing(level_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level_filter)
        .or_else(|_| EnvFilter::try_new("info"))
        .context("failed to initialize tracing filter")?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .try_init();

    Ok(())
}

fn load_documents(path: &Path) -> Result<Vec<Value>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    if path.extension().is_some_and(|ext| ext == "json") {
        let value: Value = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        return Ok(match value {
            Value::Array(objects) => objects,
            object => vec![object],
        });
    }

    let mut documents = Vec::new();
    for document in serde_yaml::Deserializer::from_str(&raw) {
        let value = Value::deserialize(document)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        if !value.is_null() {
            documents.push(value);
        }
    }
    Ok(documents)
}
