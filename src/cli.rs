use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "kindtable",
    version,
    about = "Turns raw cluster resource manifests into renderable tables."
)]
pub struct CliArgs {
    /// Manifest files to tabulate (JSON or YAML, multi-document supported)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Resource kind name, e.g. CronJob (unknown kinds use the generic view)
    #[arg(short, long)]
    pub kind: String,

    /// Resource plural name used in links, e.g. cronjobs
    #[arg(long)]
    pub resource: Option<String>,

    /// API group used in links
    #[arg(long, default_value = "")]
    pub group: String,

    /// API version used in links
    #[arg(long, default_value = "v1")]
    pub version: String,

    /// Cluster identifier used in links
    #[arg(short, long)]
    pub cluster: Option<String>,

    /// Namespace query parameter for namespaced links
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// tracing filter (for example: info,debug,trace)
    #[arg(long, default_value = "info")]
    pub log_filter: String,
}
