//! Generated audio artifacts.
//!
//! Each synthesized reply is written once to `response_{uuid}.mp3` inside
//! the static directory and served from `/static/`. Files are never
//! rewritten or cleaned up by the gateway.

use std::io;
use std::path::PathBuf;

use tracing::debug;
use uuid::Uuid;

/// URL prefix the static directory is mounted under.
pub const STATIC_URL_PREFIX: &str = "/static";

/// A stored audio reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioArtifact {
    pub file_name: String,
    pub path: PathBuf,
    /// Browser-facing URL, e.g. `/static/response_<uuid>.mp3`
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct AudioStore {
    dir: PathBuf,
}

impl AudioStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write `audio` under a fresh name.
    pub async fn save(&self, audio: &[u8]) -> io::Result<AudioArtifact> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let file_name = format!("response_{}.mp3", Uuid::new_v4());
        let path = self.dir.join(&file_name);
        tokio::fs::write(&path, audio).await?;
        debug!("Wrote {} bytes to {}", audio.len(), path.display());

        Ok(AudioArtifact {
            url: format!("{STATIC_URL_PREFIX}/{file_name}"),
            file_name,
            path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_writes_unique_files() {
        let dir = TempDir::new().unwrap();
        let store = AudioStore::new(dir.path());

        let first = store.save(b"one").await.unwrap();
        let second = store.save(b"two").await.unwrap();

        assert_ne!(first.file_name, second.file_name);
        assert!(first.file_name.starts_with("response_"));
        assert!(first.file_name.ends_with(".mp3"));
        assert_eq!(first.url, format!("/static/{}", first.file_name));
        assert_eq!(std::fs::read(&first.path).unwrap(), b"one");
        assert_eq!(std::fs::read(&second.path).unwrap(), b"two");
    }

    #[tokio::test]
    async fn test_save_creates_missing_dir() {
        let dir = TempDir::new().unwrap();
        let store = AudioStore::new(dir.path().join("static"));
        let artifact = store.save(b"mp3").await.unwrap();
        assert!(artifact.path.exists());
    }
}
