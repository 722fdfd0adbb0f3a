//! Default values for configuration fields.

pub(super) fn default_delay_secs() -> u64 {
    5
}

pub(super) fn default_failure_reply() -> String {
    "Sorry, I encountered an error processing your request.".to_string()
}

pub(super) fn default_backend() -> String {
    "memory".to_string()
}

pub(super) fn default_key_prefix() -> String {
    "pending_text:".to_string()
}

pub(super) fn default_pending_ttl_secs() -> u64 {
    600
}

pub(super) fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}
