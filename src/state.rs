use std::sync::Arc;

use crate::config::Config;
use crate::translate::{TranslateInterface, TranslatorClient, UpstreamBuilder};

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub builder: Arc<UpstreamBuilder>,
    pub translator: Arc<dyn TranslateInterface>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let translator = Arc::new(TranslatorClient::new(&config.translator)?);
        Self::with_translator(config, translator)
    }

    /// State backed by an arbitrary provider implementation
    pub fn with_translator(
        config: Config,
        translator: Arc<dyn TranslateInterface>,
    ) -> anyhow::Result<Self> {
        let builder = Arc::new(UpstreamBuilder::new(&config.translator)?);

        Ok(Self {
            config: Arc::new(config),
            builder,
            translator,
        })
    }
}
