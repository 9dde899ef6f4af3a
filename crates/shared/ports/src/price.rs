use std::collections::{BTreeMap, HashMap};

use tiller_core::{InstrumentId, Price};

/// Port for current market prices
///
/// Lookups may come back empty: no trade yet, data gap, delisting. Callers
/// treat `None` as "unknown" and must never substitute zero.
pub trait PriceSource {
    /// Current price for an instrument, if one is available
    fn price(&self, instrument_id: &InstrumentId) -> Option<Price>;

    /// Whether the instrument can be traded right now
    fn can_trade(&self, instrument_id: &InstrumentId) -> bool {
        self.price(instrument_id).is_some()
    }
}

impl<T: PriceSource + ?Sized> PriceSource for &T {
    fn price(&self, instrument_id: &InstrumentId) -> Option<Price> {
        (**self).price(instrument_id)
    }

    fn can_trade(&self, instrument_id: &InstrumentId) -> bool {
        (**self).can_trade(instrument_id)
    }
}

impl PriceSource for HashMap<InstrumentId, Price> {
    fn price(&self, instrument_id: &InstrumentId) -> Option<Price> {
        self.get(instrument_id).copied()
    }
}

impl PriceSource for BTreeMap<InstrumentId, Price> {
    fn price(&self, instrument_id: &InstrumentId) -> Option<Price> {
        self.get(instrument_id).copied()
    }
}
