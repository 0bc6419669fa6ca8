/// How bot replies are revealed in the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealMode {
    /// Render the whole reply at once, as markdown.
    #[default]
    Instant,
    /// Reveal plain text one character at a time.
    Typewriter,
}

/// Widget settings, provided once as context from the app root. Everything
/// here is compile-time default; there is no client-side env surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatConfig {
    pub ask_url: String,
    pub status_url: String,
    /// URL prefix the cited documents are served under.
    pub data_prefix: String,
    pub status_poll_interval_ms: u64,
    /// Pause between the bot reply landing and its follow-ups appearing.
    pub follow_up_delay_ms: u64,
    /// Cap on rendered follow-up buttons; `None` shows all of them.
    pub follow_up_limit: Option<usize>,
    pub reveal: RevealMode,
    /// How long the viewer pane's width transition runs before unmount.
    pub close_animation_ms: u64,
    pub typewriter_interval_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            ask_url: "/ask".to_string(),
            status_url: "/status".to_string(),
            data_prefix: "/data".to_string(),
            status_poll_interval_ms: 5000,
            follow_up_delay_ms: 1000,
            follow_up_limit: None,
            reveal: RevealMode::Instant,
            close_animation_ms: 300,
            typewriter_interval_ms: 10,
        }
    }
}
