use anyhow::anyhow;
use rustc_hash::FxHashMap;

use crate::seq_no::SeqNo;

/// The two supported protocol revisions, identified by their namespace
pub const NAMESPACE_V2: &str = "urn:xmpp:sm:2";
pub const NAMESPACE_V3: &str = "urn:xmpp:sm:3";

/// The `failed` element requires *some* namespace even when a violation occurs before
///  negotiation fixed one. We answer in the newer supported revision in that case.
pub const FALLBACK_NAMESPACE: &str = NAMESPACE_V3;

const NAMESPACE_STANZA_ERRORS: &str = "urn:ietf:params:xml:ns:xmpp-stanzas";

/// An inbound control element, pre-parsed by the session's stanza layer: tag name, namespace
///  and flat attribute map. This crate never parses XML itself, it only interprets elements
///  that the surrounding session has already decoded.
#[derive(Debug, Clone)]
pub struct ControlElement {
    pub name: String,
    pub namespace: String,
    pub attributes: FxHashMap<String, String>,
}

impl ControlElement {
    pub fn new(name: &str, namespace: &str) -> ControlElement {
        ControlElement {
            name: name.to_string(),
            namespace: namespace.to_string(),
            attributes: FxHashMap::default(),
        }
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> ControlElement {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// The acknowledged count carried in the `h` attribute. An absent attribute is not an
    ///  error (the element is simply ignored by the caller), a present but non-numeric value
    ///  fails the decode of this one element.
    pub fn ack_count(&self) -> anyhow::Result<Option<SeqNo>> {
        match self.attribute("h") {
            None => Ok(None),
            Some(raw) => {
                let value = raw.parse::<u32>()
                    .map_err(|_| anyhow!("ack count is not a 32-bit unsigned integer: {:?}", raw))?;
                Ok(Some(SeqNo::from_raw(value)))
            }
        }
    }
}

pub fn enabled_text(namespace: &str) -> String {
    format!("<enabled xmlns='{}'/>", namespace)
}

pub fn ack_request_text(namespace: &str) -> String {
    format!("<r xmlns='{}'/>", namespace)
}

pub fn ack_text(namespace: &str, processed_count: SeqNo) -> String {
    format!("<a xmlns='{}' h='{}'/>", namespace, processed_count)
}

pub fn failed_text(namespace: &str) -> String {
    format!(
        "<failed xmlns='{}'><unexpected-request xmlns='{}'/></failed>",
        namespace, NAMESPACE_STANZA_ERRORS,
    )
}
