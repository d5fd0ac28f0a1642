//! History and settings persistence

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Row, Sqlite};
use std::path::PathBuf;
use tracing::debug;

use crate::utils::config::{AppSettings, AudioBitrate};

/// One finished download
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub path: PathBuf,
    pub kind: String,
    pub created_at: DateTime<Utc>,
}

/// Store for download history and persisted settings
#[derive(Debug, Clone)]
pub struct HistoryStore {
    pool: Pool<Sqlite>,
}

impl HistoryStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Append a history entry; entries are never mutated afterwards
    pub async fn add_entry(&self, title: &str, url: &str, path: &PathBuf, kind: &str) -> Result<()> {
        sqlx::query("INSERT INTO history (title, url, path, kind) VALUES (?, ?, ?, ?)")
            .bind(title)
            .bind(url)
            .bind(path.to_string_lossy())
            .bind(kind)
            .execute(&self.pool)
            .await?;

        debug!("Recorded history entry: {}", title);
        Ok(())
    }

    /// Most recent entries, newest first
    pub async fn recent(&self, limit: i64) -> Result<Vec<HistoryEntry>> {
        let rows = sqlx::query("SELECT * FROM history ORDER BY created_at DESC, id DESC LIMIT ?")
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            entries.push(HistoryEntry {
                id: row.get("id"),
                title: row.get("title"),
                url: row.get("url"),
                path: PathBuf::from(row.get::<&str, _>("path")),
                kind: row.get("kind"),
                created_at: row.get("created_at"),
            });
        }

        Ok(entries)
    }

    /// Save setting
    pub async fn save_setting(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO settings (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(&self.pool)
            .await?;

        debug!("Saved setting: {} = {}", key, value);
        Ok(())
    }

    /// Get setting
    pub async fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.get("value")))
    }

    /// Load application settings, falling back to env/platform defaults for
    /// anything not stored yet
    pub async fn load_settings(&self) -> Result<AppSettings> {
        let mut settings = AppSettings::default();

        if let Some(dir) = self.get_setting("download_dir").await? {
            if !dir.trim().is_empty() {
                settings.download_dir = PathBuf::from(dir);
            }
        }

        if let Some(bitrate) = self.get_setting("audio_bitrate").await? {
            settings.audio_bitrate = AudioBitrate::from_setting(&bitrate);
        }

        Ok(settings)
    }

    /// Persist application settings
    pub async fn save_settings(&self, settings: &AppSettings) -> Result<()> {
        self.save_setting("download_dir", &settings.download_dir.to_string_lossy())
            .await?;
        self.save_setting("audio_bitrate", settings.audio_bitrate.as_arg())
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema::initialize_database;

    async fn memory_store() -> HistoryStore {
        let pool = initialize_database("sqlite::memory:")
            .await
            .expect("init db");
        HistoryStore::new(pool)
    }

    #[tokio::test]
    async fn history_is_append_only_and_ordered() {
        let store = memory_store().await;

        store
            .add_entry(
                "First",
                "https://example.com/1",
                &PathBuf::from("/tmp/first.mp4"),
                "video",
            )
            .await
            .expect("add first");
        store
            .add_entry(
                "Second",
                "https://example.com/2",
                &PathBuf::from("/tmp/second.mp3"),
                "audio",
            )
            .await
            .expect("add second");

        let entries = store.recent(10).await.expect("recent");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Second");
        assert_eq!(entries[0].kind, "audio");
        assert_eq!(entries[1].title, "First");
        assert_eq!(entries[1].path, PathBuf::from("/tmp/first.mp4"));
    }

    #[tokio::test]
    async fn duplicate_entries_are_not_deduplicated() {
        let store = memory_store().await;
        let path = PathBuf::from("/tmp/video.mp4");

        for _ in 0..2 {
            store
                .add_entry("Same", "https://example.com/v", &path, "video")
                .await
                .expect("add");
        }

        assert_eq!(store.recent(10).await.expect("recent").len(), 2);
    }

    #[tokio::test]
    async fn recent_respects_limit() {
        let store = memory_store().await;
        for i in 0..5 {
            store
                .add_entry(
                    &format!("Video {}", i),
                    "https://example.com",
                    &PathBuf::from("/tmp/v.mp4"),
                    "video",
                )
                .await
                .expect("add");
        }

        assert_eq!(store.recent(3).await.expect("recent").len(), 3);
    }

    #[tokio::test]
    async fn settings_roundtrip() {
        let store = memory_store().await;

        let settings = AppSettings {
            download_dir: PathBuf::from("/media/videos"),
            audio_bitrate: AudioBitrate::Kbps320,
        };
        store.save_settings(&settings).await.expect("save");

        let loaded = store.load_settings().await.expect("load");
        assert_eq!(loaded.download_dir, PathBuf::from("/media/videos"));
        assert_eq!(loaded.audio_bitrate, AudioBitrate::Kbps320);
    }

    #[tokio::test]
    async fn missing_settings_fall_back_to_defaults() {
        let store = memory_store().await;
        let loaded = store.load_settings().await.expect("load");
        assert_eq!(loaded.audio_bitrate, AudioBitrate::Kbps192);
        assert!(!loaded.download_dir.as_os_str().is_empty());
    }
}
