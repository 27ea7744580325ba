// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CineAssist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of CineAssist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Local persistence: a data folder holding two JSON records.
//!
//! Recent queries (most-recent-first, de-duplicated, capped) and saved camera
//! setups. Writes are atomic (temp file + rename); unreadable or corrupt
//! state loads as empty — logged, never surfaced.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::model::{CameraSetup, SetupId};

const HISTORY_FILENAME: &str = "cineassist-history.json";
const SETUPS_FILENAME: &str = "cineassist-setups.json";

/// Recent-query list cap.
pub const RECENT_QUERY_CAP: usize = 15;

/// Failures while writing state. Reading never fails: missing or corrupt
/// files load as empty state.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The on-disk data folder.
#[derive(Debug, Clone)]
pub struct DataFolder {
    root: PathBuf,
}

impl DataFolder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Recent queries, most recent first.
    pub fn load_recent_queries(&self) -> Vec<String> {
        self.load_or_empty(HISTORY_FILENAME)
    }

    /// Records a query and returns the updated list. Blank queries are not
    /// recorded. An exact repeat moves to the front instead of duplicating.
    pub fn record_query(&self, query: &str) -> Result<Vec<String>, StoreError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(self.load_recent_queries());
        }

        let mut queries = self.load_recent_queries();
        promote_recent(&mut queries, query);
        self.save(HISTORY_FILENAME, &queries)?;
        Ok(queries)
    }

    /// Saved setups, newest first.
    pub fn load_setups(&self) -> Vec<CameraSetup> {
        self.load_or_empty(SETUPS_FILENAME)
    }

    pub fn add_setup(&self, setup: &CameraSetup) -> Result<Vec<CameraSetup>, StoreError> {
        let mut setups = self.load_setups();
        setups.insert(0, setup.clone());
        self.save(SETUPS_FILENAME, &setups)?;
        Ok(setups)
    }

    pub fn delete_setup(&self, id: &SetupId) -> Result<Vec<CameraSetup>, StoreError> {
        let mut setups = self.load_setups();
        setups.retain(|setup| setup.id() != id);
        self.save(SETUPS_FILENAME, &setups)?;
        Ok(setups)
    }

    fn load_or_empty<T: DeserializeOwned + Default>(&self, filename: &str) -> T {
        let path = self.root.join(filename);

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return T::default(),
            Err(err) => {
                warn!(path = %path.display(), %err, "cannot read state file; treating as empty");
                return T::default();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(err) => {
                warn!(path = %path.display(), %err, "corrupt state file; treating as empty");
                T::default()
            }
        }
    }

    fn save<T: Serialize>(&self, filename: &str, value: &T) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).map_err(|source| StoreError::Io {
            path: self.root.clone(),
            source,
        })?;

        let path = self.root.join(filename);
        let body = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Encode {
            path: path.clone(),
            source,
        })?;

        write_atomic(&self.root, filename, &body)
    }
}

fn promote_recent(queries: &mut Vec<String>, query: &str) {
    queries.retain(|existing| existing != query);
    queries.insert(0, query.to_owned());
    queries.truncate(RECENT_QUERY_CAP);
}

fn write_atomic(root: &Path, filename: &str, contents: &[u8]) -> Result<(), StoreError> {
    let path = root.join(filename);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_path = root.join(format!(".cineassist.tmp.{filename}.{nanos}"));

    fs::write(&tmp_path, contents).map_err(|source| StoreError::Io {
        path: tmp_path.clone(),
        source,
    })?;

    fs::rename(&tmp_path, &path).map_err(|source| {
        let _ = fs::remove_file(&tmp_path);
        StoreError::Io { path, source }
    })
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    use rstest::{fixture, rstest};

    use super::{promote_recent, DataFolder, RECENT_QUERY_CAP};
    use crate::model::{CameraSetup, SetupFields};

    static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

    struct TempDir {
        path: std::path::PathBuf,
    }

    impl TempDir {
        fn new(prefix: &str) -> Self {
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos();
            let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
            let mut path = env::temp_dir();
            path.push(format!(
                "cineassist-{prefix}-{}-{nanos}-{counter}",
                std::process::id()
            ));
            std::fs::create_dir_all(&path).unwrap();
            Self { path }
        }

        fn path(&self) -> &std::path::Path {
            &self.path
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.path);
        }
    }

    struct StoreTestCtx {
        _tmp: TempDir,
        folder: DataFolder,
    }

    #[fixture]
    fn ctx() -> StoreTestCtx {
        let tmp = TempDir::new("store");
        let folder = DataFolder::new(tmp.path().join("data"));
        StoreTestCtx { _tmp: tmp, folder }
    }

    fn setup(name: &str) -> CameraSetup {
        CameraSetup::new(name, "Sony Venice 2", SetupFields::default())
    }

    #[rstest]
    fn duplicate_queries_collapse_to_most_recent_position(ctx: StoreTestCtx) {
        for query in ["A", "B", "A", "C"] {
            ctx.folder.record_query(query).expect("record query");
        }
        assert_eq!(ctx.folder.load_recent_queries(), ["C", "A", "B"]);
    }

    #[rstest]
    fn recent_queries_cap_at_fifteen(ctx: StoreTestCtx) {
        for n in 0..20 {
            ctx.folder.record_query(&format!("query {n}")).expect("record query");
        }
        let queries = ctx.folder.load_recent_queries();
        assert_eq!(queries.len(), RECENT_QUERY_CAP);
        assert_eq!(queries[0], "query 19");
        assert_eq!(queries[RECENT_QUERY_CAP - 1], "query 5");
    }

    #[rstest]
    fn blank_queries_are_not_recorded(ctx: StoreTestCtx) {
        ctx.folder.record_query("   ").expect("record query");
        assert!(ctx.folder.load_recent_queries().is_empty());
        assert!(!ctx.folder.root().join("cineassist-history.json").exists());
    }

    #[rstest]
    fn missing_folder_loads_as_empty_state(ctx: StoreTestCtx) {
        assert!(ctx.folder.load_recent_queries().is_empty());
        assert!(ctx.folder.load_setups().is_empty());
    }

    #[rstest]
    fn corrupt_history_is_treated_as_empty_and_recoverable(ctx: StoreTestCtx) {
        std::fs::create_dir_all(ctx.folder.root()).unwrap();
        std::fs::write(ctx.folder.root().join("cineassist-history.json"), b"{nope").unwrap();

        assert!(ctx.folder.load_recent_queries().is_empty());

        ctx.folder.record_query("fresh start").expect("record query");
        assert_eq!(ctx.folder.load_recent_queries(), ["fresh start"]);
    }

    #[rstest]
    fn setups_persist_newest_first(ctx: StoreTestCtx) {
        ctx.folder.add_setup(&setup("First")).expect("add setup");
        ctx.folder.add_setup(&setup("Second")).expect("add setup");

        let setups = ctx.folder.load_setups();
        assert_eq!(setups.len(), 2);
        assert_eq!(setups[0].name(), "Second");
        assert_eq!(setups[1].name(), "First");
    }

    #[rstest]
    fn deleting_a_setup_removes_only_that_setup(ctx: StoreTestCtx) {
        let keep = setup("Keep");
        let drop = setup("Drop");
        ctx.folder.add_setup(&keep).expect("add setup");
        ctx.folder.add_setup(&drop).expect("add setup");

        let remaining = ctx.folder.delete_setup(drop.id()).expect("delete setup");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name(), "Keep");
        assert_eq!(ctx.folder.load_setups().len(), 1);
    }

    #[rstest]
    fn deleting_an_unknown_setup_is_a_no_op(ctx: StoreTestCtx) {
        let stored = setup("Stored");
        let stray = setup("Stray");
        ctx.folder.add_setup(&stored).expect("add setup");

        let remaining = ctx.folder.delete_setup(stray.id()).expect("delete setup");
        assert_eq!(remaining.len(), 1);
    }

    #[test]
    fn promote_recent_is_pure_mru() {
        let mut list = vec!["b".to_owned(), "a".to_owned()];
        promote_recent(&mut list, "a");
        assert_eq!(list, ["a", "b"]);
        promote_recent(&mut list, "c");
        assert_eq!(list, ["c", "a", "b"]);
    }
}
