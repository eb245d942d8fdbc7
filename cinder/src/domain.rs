use shared::TtlSeconds;

/// Successful cache read: the stored value plus the remaining TTL the store
/// reported at read time, rounded to whole seconds and clamped to >= 0.
///
/// The response header values are rendered here rather than in the transport
/// layer: they are informational projections of store state at read time and
/// a client relying on them must tolerate staleness up to the round-trip
/// time of the request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheHit {
    pub value: String,
    pub remaining_ttl: TtlSeconds,
}

impl CacheHit {
    pub fn new(value: impl Into<String>, remaining_ttl: TtlSeconds) -> Self {
        Self {
            value: value.into(),
            remaining_ttl,
        }
    }

    /// Advisory `Cache-Control` header value.
    pub fn cache_control(&self) -> String {
        format!("public, max-age={}", self.remaining_ttl.0)
    }

    /// `X-CACHE-TTL` header value: the remaining whole seconds, verbatim.
    pub fn ttl_header(&self) -> String {
        self.remaining_ttl.0.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_values_render_the_remaining_ttl() {
        let hit = CacheHit::new("payload", TtlSeconds(600));

        assert_eq!(hit.cache_control(), "public, max-age=600");
        assert_eq!(hit.ttl_header(), "600");
    }

    #[test]
    fn zero_ttl_renders_as_zero() {
        let hit = CacheHit::new("payload", TtlSeconds(0));

        assert_eq!(hit.cache_control(), "public, max-age=0");
        assert_eq!(hit.ttl_header(), "0");
    }
}
