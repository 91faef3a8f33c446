pub mod aggregator;
pub mod indicators;
pub mod poller;
pub mod signals;

pub use aggregator::DashboardAggregator;
pub use poller::Poller;
pub use signals::{decide_signal, explain_signal};
