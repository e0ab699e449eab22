/// Origin allow-list applied before the WebSocket handshake.
///
/// Requests without an `Origin` header (non-browser peers, same-process
/// tooling) pass; requests carrying one must match the configured list
/// exactly. The default empty list therefore rejects every cross-origin
/// browser request.
#[derive(Debug, Clone, Default)]
pub struct OriginPolicy {
    allowed: Vec<String>,
}

impl OriginPolicy {
    pub fn new(allowed: Vec<String>) -> Self {
        Self { allowed }
    }

    pub fn allows(&self, origin: Option<&str>) -> bool {
        match origin {
            None => true,
            Some(origin) => self.allowed.iter().any(|a| a == origin),
        }
    }
}
