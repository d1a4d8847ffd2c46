pub mod chatwoot;
