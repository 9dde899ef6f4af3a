mod instrument;
mod order;
mod portfolio;
mod position;

pub use instrument::InstrumentId;
pub use order::{OpenOrder, OpenOrders};
pub use portfolio::PortfolioSnapshot;
pub use position::Position;
