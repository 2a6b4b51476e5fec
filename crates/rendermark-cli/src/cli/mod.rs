use clap::{Parser, Subcommand};

mod args;

#[cfg(test)]
mod tests;

pub use args::{ClassifyArgs, RenderArgs, WebArgs};

#[derive(Debug, Parser)]
#[command(name = "rendermark")]
#[command(about = "Attachment content typing and link-absolutizing renderer", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Report registry classification for one or more file names.
    Classify(ClassifyArgs),
    /// Render a markdown file to HTML.
    Render(RenderArgs),
    /// Serve the web surface.
    Web(WebArgs),
}
