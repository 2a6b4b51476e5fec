use std::fs;
use std::io::{self, Write};

use anyhow::{Context, Result};
use rendermark_core::markdown::render_markdown_html;
use rendermark_core::{AppConfig, RenderContext, UrlOptions};
use rendermark_web::AttachmentClassification;

use crate::cli::{ClassifyArgs, Commands, RenderArgs};

mod web;

use self::web::{WebServeOptions, serve};

pub(crate) fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Classify(args) => print_json(&classify(&args)),
        Commands::Render(args) => {
            let config = AppConfig::from_env().context("failed to read configuration")?;
            let html = render_file(&args, &config.url_options)?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            Ok(())
        }
        Commands::Web(args) => {
            let config = AppConfig::from_env().context("failed to read configuration")?;
            serve(
                config,
                WebServeOptions {
                    host: &args.host,
                    port: args.port,
                },
            )
        }
    }
}

fn classify(args: &ClassifyArgs) -> Vec<AttachmentClassification> {
    let declared = args.content_type.as_deref().map(str::trim);
    args.names
        .iter()
        .map(|name| AttachmentClassification::classify(name, declared))
        .collect()
}

fn render_file(args: &RenderArgs, defaults: &UrlOptions) -> Result<String> {
    let content = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let context = if args.absolute {
        let options = UrlOptions {
            protocol: args.protocol.clone().or_else(|| defaults.protocol.clone()),
            host: args.host.clone().or_else(|| defaults.host.clone()),
        };
        if options.host.is_none() {
            tracing::warn!("no host configured; root-relative links stay relative");
        }
        RenderContext::absolute(None, options)
    } else {
        RenderContext::relative()
    };
    Ok(render_markdown_html(&content, &context))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
