//! Per-request context

use echo_scaffolder_protocol::Implementation;
use std::collections::HashMap;
use uuid::Uuid;

/// What the handler knows about the request it is serving
///
/// Built fresh for every request and dropped with its response.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Server-side id, recorded on the request's tracing span
    pub request_id: Uuid,
    pub method: String,
    pub metadata: HashMap<String, String>,
    /// Set once a client has completed `initialize`
    pub client_info: Option<Implementation>,
}

impl RequestContext {
    pub fn new(method: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), method)
    }

    pub fn with_id(request_id: Uuid, method: impl Into<String>) -> Self {
        Self {
            request_id,
            method: method.into(),
            metadata: HashMap::new(),
            client_info: None,
        }
    }

    pub fn with_client_info(mut self, client_info: Implementation) -> Self {
        self.client_info = Some(client_info);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn get_metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Name of the connected client, or `"unknown"`
    pub fn client_name(&self) -> &str {
        self.client_info
            .as_ref()
            .map_or("unknown", |info| info.name.as_str())
    }
}
