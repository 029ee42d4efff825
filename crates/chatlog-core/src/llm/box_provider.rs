//! BoxCompletionProvider -- object-safe dynamic dispatch wrapper for CompletionProvider.
//!
//! 1. Define an object-safe `CompletionProviderDyn` trait with boxed futures
//! 2. Blanket-impl `CompletionProviderDyn` for all `T: CompletionProvider`
//! 3. `BoxCompletionProvider` wraps `Box<dyn CompletionProviderDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use chatlog_types::llm::{CompletionRequest, CompletionResponse, LlmError};

use super::provider::CompletionProvider;

/// Object-safe version of [`CompletionProvider`] with boxed futures.
pub trait CompletionProviderDyn: Send + Sync {
    fn name(&self) -> &str;

    fn complete_boxed<'a>(
        &'a self,
        request: &'a CompletionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CompletionResponse, LlmError>> + Send + 'a>>;
}

impl<T: CompletionProvider> CompletionProviderDyn for T {
    fn name(&self) -> &str {
        CompletionProvider::name(self)
    }

    fn complete_boxed<'a>(
        &'a self,
        request: &'a CompletionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CompletionResponse, LlmError>> + Send + 'a>> {
        Box::pin(self.complete(request))
    }
}

/// Type-erased completion provider for runtime provider selection.
///
/// Since `CompletionProvider` uses RPITIT, it cannot be used as a trait object
/// directly. `BoxCompletionProvider` delegates to the inner
/// `CompletionProviderDyn` trait object instead.
pub struct BoxCompletionProvider {
    inner: Box<dyn CompletionProviderDyn + Send + Sync>,
}

impl BoxCompletionProvider {
    /// Wrap a concrete `CompletionProvider` in a type-erased box.
    pub fn new<T: CompletionProvider + 'static>(provider: T) -> Self {
        Self {
            inner: Box::new(provider),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Send a completion request and receive the full response.
    pub async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, LlmError> {
        self.inner.complete_boxed(request).await
    }
}
