mod reader;

pub use reader::{WidgetEntry, WidgetSnapshotReader};
