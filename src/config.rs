/// Configuration for the acknowledgement extension. The surrounding session owns the actual
///  property store, this struct is the decoded view this crate works with.
pub struct AckConfig {
    /// Number of outbound stanzas after which the peer is proactively asked to report its
    ///  processed count. 0 means "never ask" - acknowledgements then only happen when the
    ///  peer volunteers them.
    pub request_frequency: u32,
}

impl AckConfig {
    pub const DEFAULT_REQUEST_FREQUENCY: u32 = 5;

    /// Decodes the raw integer property. The property is documented as a positive integer,
    ///  but a misconfigured zero or negative value must disable proactive requests rather
    ///  than divide by zero; values beyond u32 saturate.
    pub fn from_request_frequency_property(raw: i64) -> AckConfig {
        AckConfig {
            request_frequency: raw.clamp(0, u32::MAX as i64) as u32,
        }
    }
}

impl Default for AckConfig {
    fn default() -> Self {
        AckConfig {
            request_frequency: Self::DEFAULT_REQUEST_FREQUENCY,
        }
    }
}
