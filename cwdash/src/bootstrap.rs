use std::{fs, path::Path};

use log::debug;

use crate::models::WidgetPayload;

/// Readiness report of the chat widget integration.
///
/// Without a payload file the widget counts as ready with no payload. A file
/// that cannot be read or parsed leaves the widget not ready, with the reason
/// in `error`.
#[derive(Debug, Default)]
pub struct WidgetBootstrap {
    pub ready: bool,
    pub payload: Option<WidgetPayload>,
    pub error: Option<String>,
}

impl WidgetBootstrap {
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self {
                ready: true,
                ..Self::default()
            };
        };

        let parsed = fs::read_to_string(path)
            .map_err(|e| format!("cannot read widget payload {}: {}", path.display(), e))
            .and_then(|content| {
                serde_json::from_str::<WidgetPayload>(&content).map_err(|e| {
                    format!("invalid widget payload {}: {}", path.display(), e)
                })
            });

        match parsed {
            Ok(payload) => {
                debug!("widget payload loaded: {:?}", payload);
                Self {
                    ready: true,
                    payload: Some(payload),
                    error: None,
                }
            }
            Err(error) => Self {
                ready: false,
                payload: None,
                error: Some(error),
            },
        }
    }

    /// Account id from the payload, or `fallback` when the payload has none.
    pub fn account_id(&self, fallback: u64) -> u64 {
        self.payload
            .as_ref()
            .and_then(WidgetPayload::account_id)
            .unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_payload(content: &str) -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), content).unwrap();
        file
    }

    #[test]
    fn test_no_payload_is_ready() {
        let bootstrap = WidgetBootstrap::load(None);

        assert!(bootstrap.ready);
        assert!(bootstrap.error.is_none());
        assert_eq!(bootstrap.account_id(1), 1);
    }

    #[test]
    fn test_account_id_from_payload() {
        let file = write_payload(
            r#"{ "event": "loaded", "data": { "conversation": { "id": 99, "account_id": 7 } } }"#,
        );

        let bootstrap = WidgetBootstrap::load(Some(file.path()));

        assert!(bootstrap.ready);
        assert_eq!(bootstrap.account_id(1), 7);
    }

    #[test]
    fn test_missing_or_zero_account_id_falls_back() {
        let file = write_payload(r#"{ "data": { "conversation": {} } }"#);
        assert_eq!(WidgetBootstrap::load(Some(file.path())).account_id(1), 1);

        let file = write_payload(r#"{ "data": { "conversation": { "account_id": 0 } } }"#);
        assert_eq!(WidgetBootstrap::load(Some(file.path())).account_id(3), 3);

        let file = write_payload(r#"{}"#);
        assert_eq!(WidgetBootstrap::load(Some(file.path())).account_id(1), 1);
    }

    #[test]
    fn test_invalid_payload_is_not_ready() {
        let file = write_payload("not json");

        let bootstrap = WidgetBootstrap::load(Some(file.path()));

        assert!(!bootstrap.ready);
        assert!(bootstrap.error.unwrap().contains("invalid widget payload"));
    }

    #[test]
    fn test_missing_file_is_not_ready() {
        let dir = tempfile::tempdir().unwrap();

        let bootstrap = WidgetBootstrap::load(Some(&dir.path().join("absent.json")));

        assert!(!bootstrap.ready);
        assert!(bootstrap.error.unwrap().contains("cannot read widget payload"));
    }
}
