//! Source of submission timestamps.

use std::{ops::Deref, sync::Arc};

use chrono::{DateTime, Local};

// Traits.

/// Generic clock trait.
///
/// The desk stamps every new request with `now()`, so tests can pin time by
/// swapping the implementation.
pub trait GenericClock: Send + Sync + 'static {
    /// The current local time.
    fn now(&self) -> DateTime<Local>;
}

// Structs.

/// Clock handle for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Clock {
    inner: Arc<dyn GenericClock>,
}

impl Deref for Clock {
    type Target = dyn GenericClock;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl Clock {
    pub fn new(inner: Arc<dyn GenericClock>) -> Self {
        Self { inner }
    }

    /// The wall clock.
    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

/// Reads the system clock.
pub struct SystemClock;

impl GenericClock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
