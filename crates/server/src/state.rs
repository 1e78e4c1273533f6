use std::sync::Arc;

use faqbot_core::{AnswerResolver, Config, FaqMatcher, QaClient, SanitizedConfig, WarmupGate};

/// Shared application state
pub struct AppState {
    config: Config,
    resolver: AnswerResolver,
    warmup: WarmupGate,
}

impl AppState {
    pub fn new(config: Config, qa_client: Arc<dyn QaClient>) -> Self {
        let resolver = AnswerResolver::new(
            FaqMatcher::new(config.faq.clone()),
            qa_client,
            &config.resolver,
        );
        Self {
            config,
            resolver,
            warmup: WarmupGate::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    /// Configured remote model id.
    pub fn model(&self) -> &str {
        &self.config.remote.model
    }

    pub fn resolver(&self) -> &AnswerResolver {
        &self.resolver
    }

    pub fn qa_client(&self) -> &dyn QaClient {
        self.resolver.qa_client().as_ref()
    }

    pub fn warmup(&self) -> &WarmupGate {
        &self.warmup
    }
}
