use std::path::PathBuf;

use clap::Args;

#[derive(Debug, Args)]
pub struct ClassifyArgs {
    #[arg(required = true)]
    pub names: Vec<String>,
    /// Client-declared type to narrow against the registry.
    #[arg(long)]
    pub content_type: Option<String>,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    pub file: PathBuf,
    /// Rewrite root-relative links into absolute URLs.
    #[arg(long, default_value_t = false)]
    pub absolute: bool,
    /// Overrides `RENDERMARK_PROTOCOL` for this run.
    #[arg(long, value_parser = parse_protocol)]
    pub protocol: Option<String>,
    /// Overrides `RENDERMARK_HOST_NAME` for this run.
    #[arg(long)]
    pub host: Option<String>,
}

#[derive(Debug, Args)]
pub struct WebArgs {
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
    #[arg(long, default_value_t = 8787)]
    pub port: u16,
}

fn parse_protocol(raw: &str) -> std::result::Result<String, String> {
    let protocol = raw.trim().trim_end_matches("://").to_ascii_lowercase();
    match protocol.as_str() {
        "http" | "https" => Ok(protocol),
        _ => Err(format!("protocol must be http or https, got {raw}")),
    }
}
