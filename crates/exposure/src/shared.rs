//! Shared handle for use across schedules
//!
//! `ExposureManager` is not internally synchronized and its state is
//! replaced wholesale by each `update`. When more than one schedule touches
//! the same manager, the update and the queries that follow it must happen
//! under one lock so the reads see the snapshot they were computed from.

use parking_lot::Mutex;
use std::sync::Arc;
use tiller_core::{OpenOrders, PortfolioSnapshot};
use tiller_ports::PriceSource;

use crate::config::ExposureConfig;
use crate::manager::{ExposureManager, ExposureState};

/// Cloneable, lock-protected `ExposureManager`
#[derive(Debug, Clone)]
pub struct SharedExposureManager {
    inner: Arc<Mutex<ExposureManager>>,
}

impl SharedExposureManager {
    pub fn new(manager: ExposureManager) -> Self {
        Self {
            inner: Arc::new(Mutex::new(manager)),
        }
    }

    pub fn with_config(config: ExposureConfig) -> Self {
        Self::new(ExposureManager::with_config(config))
    }

    /// Update, then run `query` against the fresh state without releasing the lock
    pub fn update_then<R>(
        &self,
        portfolio: &PortfolioSnapshot,
        open_orders: &OpenOrders,
        prices: &impl PriceSource,
        query: impl FnOnce(&ExposureManager) -> R,
    ) -> R {
        let mut manager = self.inner.lock();
        manager.update(portfolio, open_orders, prices);
        query(&*manager)
    }

    /// Run a read-only query against the last computed state
    pub fn with<R>(&self, query: impl FnOnce(&ExposureManager) -> R) -> R {
        query(&*self.inner.lock())
    }

    pub fn state(&self) -> ExposureState {
        self.inner.lock().state()
    }
}
