//! Locally persisted bookmark and like flags.

pub mod error;
pub mod notice;
pub mod store;

pub use error::{PrefsError, PrefsResult};
pub use notice::{Notice, NoticeLevel};
pub use store::{PreferenceStore, Preferences, Toggle, default_path};
