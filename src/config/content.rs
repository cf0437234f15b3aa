use std::path::PathBuf;

use serde::Deserialize;

/// Parsed content of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub timer: TimerContent,
    pub notification: NotificationContent,
    pub storage: StorageContent,
    #[serde(default)]
    pub widget: WidgetContent,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimerContent {
    pub selected: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationContent {
    pub identifier: String,
    pub summary: String,
    pub body: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageContent {
    pub suite: String,
    pub key: String,
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WidgetContent {
    pub refresh: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::reader::DEFAULT_CONTENT;

    #[test]
    fn parse_default_content() {
        let config: Configuration = toml::from_str(DEFAULT_CONTENT).unwrap();
        assert_eq!(config.timer.selected, None);
        assert_eq!(config.notification.identifier, "TimerNotification");
        assert_eq!(config.notification.summary, "Timer Completed");
        assert_eq!(
            config.notification.body.as_deref(),
            Some("Your timer has finished!")
        );
        assert_eq!(config.storage.suite, "com.test.widgetData");
        assert_eq!(config.storage.key, "SavedSeconds");
        assert_eq!(config.storage.path, None);
        assert_eq!(config.widget.refresh, None);
    }

    #[test]
    fn parse_custom_content() {
        let content = r#"
            [timer]
            selected = 15

            [notification]
            identifier = "Countdown"
            summary = "Done"

            [storage]
            suite = "group.example"
            key = "Remaining"
            path = "/tmp/shared.json"

            [widget]
            refresh = ["countdown-widget", "--format", "clock"]
        "#;
        let config: Configuration = toml::from_str(content).unwrap();
        assert_eq!(config.timer.selected, Some(15));
        assert_eq!(config.notification.body, None);
        assert_eq!(config.storage.path, Some(PathBuf::from("/tmp/shared.json")));
        assert_eq!(config.widget.refresh.unwrap().len(), 3);
    }
}
