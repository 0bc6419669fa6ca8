pub mod chat;
pub mod follow_ups;
pub mod markdown;
pub mod message_log;
pub mod pdf_viewer;
pub mod sources;
pub mod status_indicator;
