use anyhow::Result;
use rendermark_core::AppConfig;

#[derive(Debug, Clone, Copy)]
pub(super) struct WebServeOptions<'a> {
    pub(super) host: &'a str,
    pub(super) port: u16,
}

pub(super) fn serve(config: AppConfig, options: WebServeOptions<'_>) -> Result<()> {
    rendermark_web::serve_web(config, options.host, options.port)
}
