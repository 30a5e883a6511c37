use std::{collections::BTreeMap, fs::File, io::BufReader, path::Path};

use anyhow::Context;

use crate::foundation::error::{SharecardError, SharecardResult};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// One scheduled session as supplied by the session data source.
pub struct SessionRecord {
    /// Identifier unique within an event, e.g. `LVC21-101`.
    pub session_id: String,
    /// Session title.
    pub name: String,
    /// Event type or track label.
    #[serde(default)]
    pub event_type: String,
    /// Speakers in billing order.
    #[serde(default)]
    pub speakers: Vec<SpeakerRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// A speaker attached to a session.
pub struct SpeakerRecord {
    /// Display name.
    pub name: String,
    /// Remote avatar URL; empty when the speaker has none.
    #[serde(default)]
    pub avatar: String,
    /// Local image path, filled in by avatar resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl SpeakerRecord {
    /// Speaker without a resolved image.
    pub fn new(name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: avatar.into(),
            image: None,
        }
    }
}

/// Sessions keyed by session id, iterated in id order.
pub type SessionMap = BTreeMap<String, SessionRecord>;

/// Read a JSON object mapping session id to session record.
pub fn load_sessions(path: &Path) -> SharecardResult<SessionMap> {
    let f = File::open(path).with_context(|| format!("open sessions '{}'", path.display()))?;
    parse_sessions(BufReader::new(f))
        .map_err(|e| SharecardError::serde(format!("parse sessions '{}': {e}", path.display())))
}

/// Parse sessions from any JSON reader.
pub fn parse_sessions(r: impl std::io::Read) -> Result<SessionMap, serde_json::Error> {
    serde_json::from_reader(r)
}

#[cfg(test)]
#[path = "../../tests/unit/session/model.rs"]
mod tests;
