pub mod duration;
pub mod mode;
pub mod notification;
pub mod snapshot;

pub use duration::TimerDuration;
pub use mode::RunMode;
pub use notification::NotificationMessage;
pub use snapshot::TimerSnapshot;
