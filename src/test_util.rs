//! Hand-rolled doubles for the collaborator seams, for tests that assert on call sequences
//!  rather than individual expectations.

use async_trait::async_trait;
use std::fmt::{Debug, Formatter};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use crate::router::PacketRouter;
use crate::stanza::Stanza;
use crate::transport::SessionTransport;

/// Records every raw text written to the transport, in order.
#[derive(Default)]
pub struct RecordingTransport {
    texts: Mutex<Vec<String>>,
}

impl RecordingTransport {
    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionTransport for RecordingTransport {
    async fn deliver_raw_text(&self, text: &str) {
        self.texts.lock().unwrap().push(text.to_string());
    }

    fn remote_address(&self) -> Option<SocketAddr> {
        Some(SocketAddr::from(([127, 0, 0, 1], 5222)))
    }
}

/// Records the debug rendering of every routed stanza, in order.
#[derive(Default)]
pub struct RecordingRouter {
    routed: Mutex<Vec<String>>,
}

impl RecordingRouter {
    pub fn routed(&self) -> Vec<String> {
        self.routed.lock().unwrap().clone()
    }
}

#[async_trait]
impl PacketRouter for RecordingRouter {
    async fn route(&self, stanza: Box<dyn Stanza>) {
        self.routed.lock().unwrap().push(format!("{:?}", stanza));
    }
}

/// A stanza double. Deep copies share their delay state with the original, so a test can
///  observe what happened to the buffered copy through the handle it kept.
pub struct TestStanza {
    label: &'static str,
    message: bool,
    state: Arc<Mutex<DelayState>>,
}

#[derive(Default)]
struct DelayState {
    stamp: Option<(SystemTime, String)>,
    apply_count: u32,
}

impl TestStanza {
    pub fn message(label: &'static str) -> TestStanza {
        TestStanza {
            label,
            message: true,
            state: Default::default(),
        }
    }

    pub fn non_message(label: &'static str) -> TestStanza {
        TestStanza {
            label,
            message: false,
            state: Default::default(),
        }
    }

    pub fn with_delay_stamp(label: &'static str, from: &str) -> TestStanza {
        let stanza = TestStanza::message(label);
        stanza.state.lock().unwrap().stamp = Some((SystemTime::UNIX_EPOCH, from.to_string()));
        stanza
    }

    pub fn delay_stamp(&self) -> Option<(SystemTime, String)> {
        self.state.lock().unwrap().stamp.clone()
    }

    /// how often `apply_delay_stamp` was called, on this stanza or any copy of it
    pub fn apply_count(&self) -> u32 {
        self.state.lock().unwrap().apply_count
    }
}

impl Debug for TestStanza {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock().unwrap();
        match &state.stamp {
            Some((_, from)) => write!(f, "{}(delayed from {})", self.label, from),
            None => write!(f, "{}", self.label),
        }
    }
}

impl Stanza for TestStanza {
    fn deep_copy(&self) -> Box<dyn Stanza> {
        Box::new(TestStanza {
            label: self.label,
            message: self.message,
            state: self.state.clone(),
        })
    }

    fn is_message(&self) -> bool {
        self.message
    }

    fn has_delay_stamp(&self) -> bool {
        self.state.lock().unwrap().stamp.is_some()
    }

    fn apply_delay_stamp(&mut self, stamp: SystemTime, from: &str) {
        let mut state = self.state.lock().unwrap();
        state.apply_count += 1;
        state.stamp = Some((stamp, from.to_string()));
    }
}
