pub mod chatwoot;
pub mod widget;

pub use chatwoot::*;
pub use widget::WidgetPayload;
