use std::path::PathBuf;

use thiserror::Error;

pub type PrefsResult<T> = Result<T, PrefsError>;

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("preference file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not a valid preference document.
    #[error("preference file {path:?} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("preferences for {path:?} could not be encoded: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no platform data directory available")]
    NoDataDir,
}

impl PrefsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::notice::{Notice, NoticeLevel};

    #[test]
    fn encode_failure_is_not_reported_as_corruption() {
        // Non-string map keys are rejected by the JSON writer.
        let source = serde_json::to_vec(&BTreeMap::from([(vec![1u8], 1u8)])).unwrap_err();
        let err = PrefsError::Encode {
            path: PathBuf::from("prefs.json"),
            source,
        };
        let shown = err.to_string();
        assert!(shown.contains("could not be encoded"));
        assert!(!shown.contains("corrupt"));

        let notice = Notice::from(&err);
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.message.starts_with("Failed to save: "));
    }
}
