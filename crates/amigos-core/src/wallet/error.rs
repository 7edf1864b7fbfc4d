use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// No wallet extension is injected into the host
    #[error("Wallet provider not available")]
    ProviderUnavailable,

    /// The provider is present but cannot sign (locked, watch-only)
    #[error("Signing not available: {0}")]
    SigningUnavailable(String),

    /// The user declined the request
    #[error("User rejected the request: {0}")]
    UserRejected(String),

    #[error("Network error: {0}")]
    Network(String),

    /// Any other provider-reported failure
    #[error("Provider error: {0}")]
    Provider(String),
}

impl WalletError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::ProviderUnavailable)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::UserRejected(_))
    }
}
