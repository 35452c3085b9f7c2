//! The pair of reserved URL paths used for live reload.
//!
//! Both paths derive from a random UUID generated once per server instance.
//! This only keeps other pages on the network from guessing the endpoints; it
//! is obfuscation, not access control.

use uuid::Uuid;

/// Live-update stream path and client script path for one server instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveEndpoints {
    stream_path: String,
    script_path: String,
}

impl LiveEndpoints {
    /// Generate a fresh endpoint pair from a random v4 UUID.
    pub fn generate() -> Self {
        Self::from_id(Uuid::new_v4())
    }

    /// Derive the endpoint pair from a known identifier.
    pub fn from_id(id: Uuid) -> Self {
        let stream_path = format!("/{}", id);
        let script_path = format!("{}.js", stream_path);
        Self {
            stream_path,
            script_path,
        }
    }

    /// Path of the event stream, e.g. `/3f2c…`.
    pub fn stream_path(&self) -> &str {
        &self.stream_path
    }

    /// Path of the client script, e.g. `/3f2c….js`.
    pub fn script_path(&self) -> &str {
        &self.script_path
    }

    /// The tag injected into served HTML pages.
    pub fn script_tag(&self) -> String {
        format!(r#"<script src="{}"></script>"#, self.script_path)
    }

    /// Body of the client script: open an event stream, reload on any message.
    pub fn client_script(&self) -> String {
        format!(
            "new EventSource('{}').onmessage = location.reload.bind(location)",
            self.stream_path
        )
    }
}
