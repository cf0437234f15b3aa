mod clock;
mod observer;
mod scheduler;
mod shell;

pub use clock::SystemClock;
pub use observer::{ConsoleObserver, RefreshWidgetError, WidgetRefresher};
pub use scheduler::DesktopScheduler;
pub use shell::{ParseShellCommandError, Shell, ShellCommand, ShellError};
