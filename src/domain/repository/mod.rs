pub mod duration;
pub mod notification;
pub mod snapshot;

pub use duration::DurationRepository;
pub use notification::NotificationRepository;
pub use snapshot::SnapshotStore;
