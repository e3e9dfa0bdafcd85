//! JSON-file preference store.
//!
//! The file holds two arrays of ids, `bookmarks` and `liked`. It is read once on
//! open and rewritten wholesale after every toggle.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PrefsError, PrefsResult};
use crate::notice::Notice;

const APP_DIR: &str = "sao-site";
const FILE_NAME: &str = "preferences.json";

/// `{data_dir}/sao-site/preferences.json`.
pub fn default_path() -> PrefsResult<PathBuf> {
    let mut dir = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .ok_or(PrefsError::NoDataDir)?;
    dir.push(APP_DIR);
    dir.push(FILE_NAME);
    Ok(dir)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub bookmarks: Vec<String>,
    #[serde(default)]
    pub liked: Vec<String>,
}

/// Outcome of a toggle: the new flag and the notice to show, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggle {
    pub active: bool,
    pub notice: Option<Notice>,
}

#[derive(Debug)]
pub struct PreferenceStore {
    path: PathBuf,
    prefs: Preferences,
}

impl PreferenceStore {
    /// Load the store at `path`. A missing file is an empty store; nothing is
    /// written until the first toggle.
    pub fn open(path: impl Into<PathBuf>) -> PrefsResult<Self> {
        let path = path.into();
        let prefs = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| PrefsError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Preferences::default(),
            Err(e) => return Err(PrefsError::io(path, e)),
        };
        tracing::debug!(
            path = %path.display(),
            bookmarks = prefs.bookmarks.len(),
            liked = prefs.liked.len(),
            "preferences loaded"
        );
        Ok(Self { path, prefs })
    }

    pub fn open_default() -> PrefsResult<Self> {
        Self::open(default_path()?)
    }

    /// Replace a corrupt or unwanted file with empty lists.
    pub fn reset(path: impl Into<PathBuf>) -> PrefsResult<Self> {
        let store = Self {
            path: path.into(),
            prefs: Preferences::default(),
        };
        store.save()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    pub fn bookmarks(&self) -> &[String] {
        &self.prefs.bookmarks
    }

    pub fn liked(&self) -> &[String] {
        &self.prefs.liked
    }

    pub fn is_bookmarked(&self, id: &str) -> bool {
        self.prefs.bookmarks.iter().any(|b| b == id)
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.prefs.liked.iter().any(|l| l == id)
    }

    /// Displayed like count: the authored count plus one when liked here.
    pub fn like_count(&self, id: &str, initial: u32) -> u32 {
        initial + u32::from(self.is_liked(id))
    }

    pub fn toggle_bookmark(&mut self, id: &str, name: &str) -> PrefsResult<Toggle> {
        let active = flip(&mut self.prefs.bookmarks, id);
        self.commit(|p| &mut p.bookmarks, id)?;
        let notice = if active {
            Notice::success(format!("{name} bookmarked!"))
        } else {
            Notice::info("Bookmark removed")
        };
        Ok(Toggle {
            active,
            notice: Some(notice),
        })
    }

    pub fn toggle_like(&mut self, id: &str) -> PrefsResult<Toggle> {
        let active = flip(&mut self.prefs.liked, id);
        self.commit(|p| &mut p.liked, id)?;
        Ok(Toggle {
            active,
            notice: active.then(|| Notice::success("Added to favorites!")),
        })
    }

    /// Persist after a flip; on failure the flip is undone so memory matches disk.
    fn commit(&mut self, list: fn(&mut Preferences) -> &mut Vec<String>, id: &str) -> PrefsResult<()> {
        if let Err(e) = self.save() {
            flip(list(&mut self.prefs), id);
            return Err(e);
        }
        Ok(())
    }

    pub fn save(&self) -> PrefsResult<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| PrefsError::io(dir, e))?;
        }
        let json = serde_json::to_vec_pretty(&self.prefs).map_err(|source| PrefsError::Encode {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, json).map_err(|e| PrefsError::io(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), "preferences saved");
        Ok(())
    }
}

/// Remove `id` if present, else append it. Returns whether it is now present.
fn flip(list: &mut Vec<String>, id: &str) -> bool {
    match list.iter().position(|x| x == id) {
        Some(i) => {
            list.remove(i);
            false
        }
        None => {
            list.push(id.to_owned());
            true
        }
    }
}
