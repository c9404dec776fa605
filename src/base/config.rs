//! Load configuration via `config` crate with env-override support.

use std::{collections::HashSet, ops::Deref, sync::Arc};

use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;

use super::types::{Res, Void};

/// Default minimum length for patient ids.
fn default_min_patient_id_len() -> usize {
    8
}

/// Default for withdrawing a patient's request when they log out.
fn default_withdraw_on_logout() -> bool {
    true
}

/// Default `chrono` format for submission times.
fn default_timestamp_format() -> String {
    "%Y-%m-%d %H:%M:%S".to_string()
}

/// Staff accounts available when none are configured.
fn default_staff() -> Vec<StaffAccount> {
    vec![
        StaffAccount {
            id: "doc123".to_string(),
            password: "admin123".to_string(),
            name: "Dr. Juan Pérez".to_string(),
            title: "Physician".to_string(),
        },
        StaffAccount {
            id: "doc456".to_string(),
            password: "admin456".to_string(),
            name: "Dra. María Gómez".to_string(),
            title: "Head Nurse".to_string(),
        },
    ]
}

/// Configuration for the clinic desk.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// A staff login seeded into the identity provider at startup.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct StaffAccount {
    pub id: String,
    pub password: String,
    pub name: String,
    pub title: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ConfigInner {
    /// Minimum length of a patient id at registration (`MIN_PATIENT_ID_LEN`).
    #[serde(default = "default_min_patient_id_len")]
    pub min_patient_id_len: usize,
    /// Withdraw the patient's pending request when they log out (`WITHDRAW_ON_LOGOUT`).
    #[serde(default = "default_withdraw_on_logout")]
    pub withdraw_on_logout: bool,
    /// `chrono` format string used when rendering submission times (`TIMESTAMP_FORMAT`).
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
    /// Staff accounts; only settable from the config file.
    #[serde(default = "default_staff")]
    pub staff: Vec<StaffAccount>,
}

impl Default for ConfigInner {
    fn default() -> Self {
        Self {
            min_patient_id_len: default_min_patient_id_len(),
            withdraw_on_logout: default_withdraw_on_logout(),
            timestamp_format: default_timestamp_format(),
            staff: default_staff(),
        }
    }
}

impl Config {
    pub fn new(inner: ConfigInner) -> Res<Self> {
        let result = Config { inner: Arc::new(inner) };
        result.validate()?;

        Ok(result)
    }

    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        let mut cfg = config::Config::builder().add_source(config::Environment::default().prefix("CLINIC_TRIAGE").try_parsing(true));

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        Self::new(cfg.build()?.try_deserialize()?)
    }

    fn validate(&self) -> Void {
        if self.min_patient_id_len < 1 {
            return Err(anyhow::anyhow!("Minimum patient id length must be at least 1."));
        }

        if self.timestamp_format.trim().is_empty() {
            return Err(anyhow::anyhow!("Timestamp format must not be empty."));
        }

        if StrftimeItems::new(&self.timestamp_format).any(|item| matches!(item, Item::Error)) {
            return Err(anyhow::anyhow!("Timestamp format `{}` is not a valid strftime format.", self.timestamp_format));
        }

        let mut seen = HashSet::new();
        for staff in &self.staff {
            if staff.id.is_empty() || staff.password.is_empty() {
                return Err(anyhow::anyhow!("Staff accounts need a non-empty id and password."));
            }

            if !seen.insert(staff.id.as_str()) {
                return Err(anyhow::anyhow!("Duplicate staff id `{}`.", staff.id));
            }
        }

        Ok(())
    }
}
