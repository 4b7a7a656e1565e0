use std::fmt::{Debug, Formatter};

/// The session-level address of an entity: a domain, an optional local part and an optional
///  resource. The resource is bound by a separate session setup step, and its presence is
///  what gates negotiation of the acknowledgement extension.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct PeerAddress {
    pub local: Option<String>,
    pub domain: String,
    pub resource: Option<String>,
}

impl Debug for PeerAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.resource {
            Some(resource) => write!(f, "[{}/{}]", self.bare(), resource),
            None => write!(f, "[{}]", self.bare()),
        }
    }
}

impl PeerAddress {
    pub fn new(local: Option<&str>, domain: &str, resource: Option<&str>) -> PeerAddress {
        PeerAddress {
            local: local.map(|s| s.to_string()),
            domain: domain.to_string(),
            resource: resource.map(|s| s.to_string()),
        }
    }

    /// The address without its resource part, which is the form used as the origin of
    ///  redelivered stanzas.
    pub fn bare(&self) -> String {
        match &self.local {
            Some(local) => format!("{}@{}", local, self.domain),
            None => self.domain.clone(),
        }
    }

    pub fn is_bound(&self) -> bool {
        self.resource.is_some()
    }

    #[cfg(test)]
    pub fn bound(local: &str) -> PeerAddress {
        PeerAddress::new(Some(local), "example.org", Some("work"))
    }

    #[cfg(test)]
    pub fn unbound(local: &str) -> PeerAddress {
        PeerAddress::new(Some(local), "example.org", None)
    }
}
