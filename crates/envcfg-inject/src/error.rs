//! Error types for provider registration and resolution.

use crate::provider::ProviderToken;
use thiserror::Error;

/// Errors returned by container operations.
#[derive(Debug, Error)]
pub enum InjectError {
    /// A provider for the token is already registered in this container.
    #[error("provider already registered: {0}")]
    DuplicateProvider(ProviderToken),
    /// No visible provider for the token.
    #[error("no provider for {0}")]
    MissingProvider(&'static str),
    /// The provider exists but its module does not export it.
    #[error("provider not exported by module {module}: {token}")]
    NotExported { module: String, token: ProviderToken },
    /// The provider's factory failed.
    #[error("failed to construct {token}: {source}")]
    Construction {
        token: ProviderToken,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The factory produced a value of a different type than its token.
    #[error("provider for {0} produced a value of another type")]
    TypeMismatch(ProviderToken),
}
