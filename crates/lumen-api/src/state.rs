//! Shared handler state.

use std::sync::Arc;

use lumen_contact::ContactService;
use lumen_content::PostProvider;
use lumen_vault::PasskeyRegistry;

/// Everything a handler needs. Cheap to clone.
#[derive(Clone)]
pub struct ApiState {
    /// Blog corpus.
    pub posts: Arc<dyn PostProvider>,
    /// Contact form pipeline.
    pub contact: Arc<ContactService>,
    /// Vault passkeys.
    pub vault: Arc<PasskeyRegistry>,
}

impl ApiState {
    /// Bundle the services.
    pub fn new(
        posts: Arc<dyn PostProvider>,
        contact: ContactService,
        vault: PasskeyRegistry,
    ) -> Self {
        Self {
            posts,
            contact: Arc::new(contact),
            vault: Arc::new(vault),
        }
    }
}

impl std::fmt::Debug for ApiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiState")
            .field("contact", &self.contact)
            .field("vault", &self.vault)
            .finish_non_exhaustive()
    }
}
