pub mod binance;
pub mod cycle;
pub mod dispatch;
pub mod gate;
pub mod store;

pub use binance::BinanceClient;
pub use cycle::{CycleOutcome, RunOutcome, SignalCycle};
pub use dispatch::{DispatchReport, Dispatcher};
pub use gate::WeekendGate;
pub use store::{SignalState, SignalStore};
