//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies: order, spend,
//! ad-group and snapshot storage, plus the spreadsheet sync sink.

pub mod ad_group;
pub mod change;
pub mod order;
pub mod sheets;
pub mod snapshot;
pub mod spend;

pub use ad_group::AdGroupRepository;
pub use change::{ChangeNotifier, NoopChangeNotifier};
pub use order::OrderRepository;
pub use sheets::SheetPublisher;
pub use snapshot::SnapshotRepository;
pub use spend::AdSpendRepository;
