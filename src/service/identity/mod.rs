//! Identity provider: who may use the desk and under which name.

pub mod memory;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::{error::IdentityError, types::Account};

// Traits.

/// Generic identity provider trait that clients must implement.
///
/// The provider owns account ids and guarantees their uniqueness; the queue
/// trusts whatever id it hands out.
#[async_trait]
pub trait GenericIdentityProvider: Send + Sync + 'static {
    /// Registers a new patient account.
    async fn register(&self, id: &str, password: &str, name: &str) -> Result<Account, IdentityError>;

    /// Checks credentials and returns the matching account, patient or staff.
    async fn authenticate(&self, id: &str, password: &str) -> Result<Account, IdentityError>;
}

// Structs.

/// Identity client for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct IdentityClient {
    inner: Arc<dyn GenericIdentityProvider>,
}

impl Deref for IdentityClient {
    type Target = dyn GenericIdentityProvider;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl IdentityClient {
    pub fn new(inner: Arc<dyn GenericIdentityProvider>) -> Self {
        Self { inner }
    }
}
