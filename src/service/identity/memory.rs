//! In-memory identity provider with staff accounts seeded from config.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::base::{
    config::Config,
    error::IdentityError,
    types::{Account, Role},
};

use super::{GenericIdentityProvider, IdentityClient};

// Extra methods on `IdentityClient` applied by the in-memory implementation.

impl IdentityClient {
    /// Creates an in-memory provider holding the configured staff accounts.
    pub fn memory(config: &Config) -> Self {
        Self::new(Arc::new(MemoryIdentityProvider::new(config)))
    }
}

// Structs.

struct Credential {
    password: String,
    account: Account,
}

/// Identity provider that keeps patients and staff in one table, so an id is
/// unique across both.
pub struct MemoryIdentityProvider {
    min_id_len: usize,
    accounts: RwLock<HashMap<String, Credential>>,
}

impl MemoryIdentityProvider {
    pub fn new(config: &Config) -> Self {
        let accounts = config
            .staff
            .iter()
            .map(|staff| {
                let credential = Credential {
                    password: staff.password.clone(),
                    account: Account {
                        id: staff.id.clone(),
                        name: staff.name.clone(),
                        role: Role::Staff { title: staff.title.clone() },
                    },
                };

                (staff.id.clone(), credential)
            })
            .collect();

        Self {
            min_id_len: config.min_patient_id_len,
            accounts: RwLock::new(accounts),
        }
    }
}

#[async_trait]
impl GenericIdentityProvider for MemoryIdentityProvider {
    #[instrument(skip(self, password, name))]
    async fn register(&self, id: &str, password: &str, name: &str) -> Result<Account, IdentityError> {
        let id = id.trim();
        let name = name.trim();

        if id.is_empty() {
            return Err(IdentityError::MissingField("id"));
        }

        if password.is_empty() {
            return Err(IdentityError::MissingField("password"));
        }

        if name.is_empty() {
            return Err(IdentityError::MissingField("name"));
        }

        if id.chars().count() < self.min_id_len {
            return Err(IdentityError::IdTooShort { min: self.min_id_len });
        }

        let mut accounts = self.accounts.write().await;

        if accounts.contains_key(id) {
            warn!("Registration rejected, id already taken.");

            return Err(IdentityError::IdTaken(id.to_string()));
        }

        let account = Account {
            id: id.to_string(),
            name: name.to_string(),
            role: Role::Patient,
        };

        accounts.insert(
            id.to_string(),
            Credential {
                password: password.to_string(),
                account: account.clone(),
            },
        );

        info!("Patient registered.");

        Ok(account)
    }

    #[instrument(skip(self, password))]
    async fn authenticate(&self, id: &str, password: &str) -> Result<Account, IdentityError> {
        let accounts = self.accounts.read().await;

        let credential = accounts.get(id.trim()).ok_or_else(|| IdentityError::UnknownUser(id.trim().to_string()))?;

        if credential.password != password {
            return Err(IdentityError::WrongPassword);
        }

        Ok(credential.account.clone())
    }
}

// Tests.
