pub mod context;

pub use context::{ProviderContext, ProviderError, SecretCipher, provider_var_name};
