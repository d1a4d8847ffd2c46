use serde::Deserialize;

/// Payload reported by the chat widget once it has loaded.
///
/// Only the account id is read; everything else in the payload is ignored.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct WidgetPayload {
    #[serde(default)]
    pub data: Option<WidgetData>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WidgetData {
    #[serde(default)]
    pub conversation: Option<WidgetConversation>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WidgetConversation {
    #[serde(default)]
    pub account_id: Option<u64>,
}

impl WidgetPayload {
    /// Account id carried by the payload. Zero counts as absent.
    pub fn account_id(&self) -> Option<u64> {
        self.data
            .as_ref()?
            .conversation
            .as_ref()?
            .account_id
            .filter(|id| *id != 0)
    }
}
