pub mod config;
pub mod faq;
pub mod metrics;
pub mod qa;
pub mod resolver;
pub mod testing;
pub mod warmup;

pub use config::{
    default_fallback_message, load_config, load_config_from_env, load_config_from_str,
    validate_config, Config, ConfigError, CorsConfig, RemoteQaConfig, ResolverConfig,
    SanitizedConfig, ServerConfig,
};
pub use faq::{default_faq, FaqEntry, FaqMatcher};
pub use qa::{
    AttemptOutcome, HuggingFaceQaClient, QaClient, QaFailure, QueryResult, RetryPolicy,
    RetryState,
};
pub use resolver::{AnswerResolver, Resolution, ResolutionSource, ResolveError};
pub use warmup::{WarmupGate, WarmupState};
