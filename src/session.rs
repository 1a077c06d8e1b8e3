//! Parse-once analysis sessions.
//!
//! A dashboard asks for many tables from the same upload. [`AnalysisSession`]
//! keeps the parsed log keyed by the SHA-256 digest of the raw transcript, so
//! repeated loads of unchanged content reuse it, and a new upload replaces it.
//!
//! ```
//! use chatstats::session::AnalysisSession;
//!
//! let raw = "1/2/24, 9:00 - Alice: hi\n1/2/24, 9:01 - Bob: hello";
//! let mut session = AnalysisSession::new();
//!
//! let first = session.load(raw)?;
//! let second = session.load(raw)?;
//! assert!(std::sync::Arc::ptr_eq(&first, &second));
//! # Ok::<(), chatstats::ChatstatsError>(())
//! ```

use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::Message;
use crate::error::Result;
use crate::parser::TranscriptParser;

#[derive(Debug, Clone)]
struct CachedLog {
    digest: [u8; 32],
    messages: Arc<[Message]>,
}

/// Holds at most one parsed transcript.
#[derive(Debug, Clone, Default)]
pub struct AnalysisSession {
    parser: TranscriptParser,
    cached: Option<CachedLog>,
}

fn digest(raw: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(raw);
    hasher.finalize().into()
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a configured parser.
    pub fn with_parser(parser: TranscriptParser) -> Self {
        Self {
            parser,
            cached: None,
        }
    }

    /// Returns the log for `raw`, parsing only if the content changed.
    pub fn load(&mut self, raw: &str) -> Result<Arc<[Message]>> {
        self.load_with(raw.as_bytes(), |parser| parser.parse_str(raw))
    }

    /// Like [`load`](Self::load) for undecoded bytes.
    pub fn load_bytes(&mut self, raw: &[u8]) -> Result<Arc<[Message]>> {
        self.load_with(raw, |parser| parser.parse_bytes(raw))
    }

    fn load_with<F>(&mut self, raw: &[u8], parse: F) -> Result<Arc<[Message]>>
    where
        F: FnOnce(&TranscriptParser) -> Result<Vec<Message>>,
    {
        let key = digest(raw);
        if let Some(cached) = self.cached.as_ref().filter(|c| c.digest == key) {
            debug!(digest = %hex::encode(&key[..8]), "session cache hit");
            return Ok(Arc::clone(&cached.messages));
        }

        // A failed upload must not leave the previous transcript in place.
        self.cached = None;
        let messages: Arc<[Message]> = parse(&self.parser)?.into();
        debug!(digest = %hex::encode(&key[..8]), records = messages.len(), "session cache miss");
        self.cached = Some(CachedLog {
            digest: key,
            messages: Arc::clone(&messages),
        });
        Ok(messages)
    }

    /// The current log, if one is loaded.
    pub fn messages(&self) -> Option<Arc<[Message]>> {
        self.cached.as_ref().map(|c| Arc::clone(&c.messages))
    }

    /// Hex SHA-256 of the loaded transcript.
    pub fn digest_hex(&self) -> Option<String> {
        self.cached.as_ref().map(|c| hex::encode(c.digest))
    }

    /// Drops the loaded transcript.
    pub fn clear(&mut self) {
        self.cached = None;
    }
}
