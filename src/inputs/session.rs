//! Save and restore scenario inputs between sessions
//!
//! Only the two config structs are persisted, never projection output.

use super::data::{BuyConfig, RentConfig};
use crate::error::SessionError;
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Current on-disk format version
pub const SESSION_VERSION: u32 = 1;

/// Default session file name in the working directory
pub const DEFAULT_SESSION_PATH: &str = "rent_vs_buy_session.json";

/// A saved pair of inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub buy_inputs: BuyConfig,
    pub rent_inputs: RentConfig,
}

impl Session {
    pub fn new(buy_inputs: BuyConfig, rent_inputs: RentConfig) -> Self {
        Self {
            version: SESSION_VERSION,
            saved_at: Utc::now(),
            buy_inputs,
            rent_inputs,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        let buy = BuyConfig::default();
        let rent = RentConfig::for_buy(&buy);
        Self::new(buy, rent)
    }
}

/// Load a session from a JSON file
pub fn load_session<P: AsRef<Path>>(path: P) -> Result<Session, SessionError> {
    let path = path.as_ref();
    debug!("loading session from {}", path.display());
    let file = File::open(path)?;
    load_session_from_reader(BufReader::new(file))
}

/// Load a session from any reader (e.g., string buffer)
pub fn load_session_from_reader<R: Read>(reader: R) -> Result<Session, SessionError> {
    let session: Session = serde_json::from_reader(reader)?;
    if session.version != SESSION_VERSION {
        return Err(SessionError::Version {
            found: session.version,
            expected: SESSION_VERSION,
        });
    }
    Ok(session)
}

/// Write a session to a JSON file, replacing any existing file
pub fn save_session<P: AsRef<Path>>(path: P, session: &Session) -> Result<(), SessionError> {
    let path = path.as_ref();
    debug!("saving session to {}", path.display());
    let file = File::create(path)?;
    save_session_to_writer(BufWriter::new(file), session)
}

pub fn save_session_to_writer<W: Write>(mut writer: W, session: &Session) -> Result<(), SessionError> {
    serde_json::to_writer_pretty(&mut writer, session)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_round_trip_in_memory() {
        let mut session = Session::default();
        session.buy_inputs.mortgage_rate = "5.75".to_string();

        let mut buf = Vec::new();
        save_session_to_writer(&mut buf, &session).unwrap();
        let loaded = load_session_from_reader(buf.as_slice()).unwrap();

        assert_eq!(loaded, session);
    }

    #[test]
    fn test_session_file_round_trip() {
        let path = std::env::temp_dir().join(format!("rent_vs_buy_session_{}.json", std::process::id()));
        let session = Session::default();

        save_session(&path, &session).unwrap();
        let loaded = load_session(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.buy_inputs, session.buy_inputs);
        assert_eq!(loaded.rent_inputs, session.rent_inputs);
    }

    #[test]
    fn test_unknown_version_rejected() {
        let mut session = Session::default();
        session.version = 99;
        let json = serde_json::to_string(&session).unwrap();

        let err = load_session_from_reader(json.as_bytes()).unwrap_err();
        assert!(matches!(err, SessionError::Version { found: 99, .. }));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = load_session_from_reader("{ not json".as_bytes()).unwrap_err();
        assert!(matches!(err, SessionError::Json(_)));
    }
}
