use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

pub const SESSION_FILE: &str = ".tehthuconfig";

/// Remembers the last dictionary that loaded, one absolute path per file
#[derive(Debug, Clone, Default)]
pub struct Session {
    file: Option<PathBuf>,
}

impl Session {
    /// Record under the user config directory
    pub fn user() -> Self {
        let file = dirs::config_dir().map(|dir| dir.join(SESSION_FILE));
        if file.is_none() {
            tracing::warn!("No user config directory; dictionary choice won't be remembered");
        }
        Self { file }
    }

    pub fn at(file: impl Into<PathBuf>) -> Self {
        Self {
            file: Some(file.into()),
        }
    }

    /// Session that never reads or writes anything
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn last_dictionary(&self) -> Option<PathBuf> {
        let file = self.file.as_ref()?;
        let data = fs::read_to_string(file).ok()?;
        let line = data.lines().next()?.trim();
        if line.is_empty() {
            return None;
        }

        let path = PathBuf::from(line);
        if path.exists() {
            Some(path)
        } else {
            tracing::warn!("Last dictionary {} no longer exists", path.display());
            None
        }
    }

    pub fn remember(&self, dictionary: &Path) -> anyhow::Result<()> {
        let Some(file) = &self.file else {
            return Ok(());
        };

        let absolute = fs::canonicalize(dictionary)
            .with_context(|| format!("resolving {}", dictionary.display()))?;
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(file, format!("{}\n", absolute.display()))
            .with_context(|| format!("writing {}", file.display()))?;
        tracing::debug!("Remembered {} in {}", absolute.display(), file.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remember_then_recall() {
        let dir = tempfile::tempdir().unwrap();
        let dict = dir.path().join("maren.teh");
        fs::write(&dict, "hello|hola\n").unwrap();

        let session = Session::at(dir.path().join("conf").join(SESSION_FILE));
        assert_eq!(session.last_dictionary(), None);

        session.remember(&dict).unwrap();
        assert_eq!(session.last_dictionary(), Some(fs::canonicalize(&dict).unwrap()));
    }

    #[test]
    fn test_vanished_dictionary_is_forgotten() {
        let dir = tempfile::tempdir().unwrap();
        let record = dir.path().join(SESSION_FILE);
        fs::write(&record, "/no/such/dictionary.teh\n").unwrap();

        assert_eq!(Session::at(&record).last_dictionary(), None);
    }

    #[test]
    fn test_disabled_session_is_inert() {
        let session = Session::disabled();
        assert!(session.file().is_none());
        assert!(session.remember(Path::new("/whatever.teh")).is_ok());
        assert_eq!(session.last_dictionary(), None);
    }
}
