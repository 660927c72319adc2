//! JSONL persistence, one JSON Lines file per collection.
//!
//! Files live under the workspace data directory (`.trak/`): `tickets.jsonl`,
//! `sprints.jsonl`, `users.jsonl`. Loading is strict: a malformed line fails
//! the whole load naming the file and line, because silently dropping
//! records from a tracker loses work. A missing file is an empty collection
//! (first run). Writes go to a temp file in the same directory and are
//! renamed into place so a crash never leaves a half-written file.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::debug;

use crate::domain::{Sprint, Ticket, User};
use crate::error::{Error, Result};

use super::StoreSnapshot;

/// File name for the ticket collection
pub const TICKETS_FILE: &str = "tickets.jsonl";

/// File name for the sprint collection
pub const SPRINTS_FILE: &str = "sprints.jsonl";

/// File name for the user collection
pub const USERS_FILE: &str = "users.jsonl";

/// Load all three collections from the data directory.
pub async fn load_snapshot(dir: &Path) -> Result<StoreSnapshot> {
    let tickets: Vec<Ticket> = read_records(&dir.join(TICKETS_FILE)).await?;
    let sprints: Vec<Sprint> = read_records(&dir.join(SPRINTS_FILE)).await?;
    let users: Vec<User> = read_records(&dir.join(USERS_FILE)).await?;

    debug!(
        tickets = tickets.len(),
        sprints = sprints.len(),
        users = users.len(),
        "loaded workspace data"
    );

    Ok(StoreSnapshot {
        tickets,
        sprints,
        users,
    })
}

/// Write all three collections to the data directory atomically.
pub async fn save_snapshot(dir: &Path, snapshot: &StoreSnapshot) -> Result<()> {
    tokio::fs::create_dir_all(dir).await?;
    write_records(&dir.join(TICKETS_FILE), &snapshot.tickets).await?;
    write_records(&dir.join(SPRINTS_FILE), &snapshot.sprints).await?;
    write_records(&dir.join(USERS_FILE), &snapshot.users).await?;
    Ok(())
}

/// Read one record per line from a JSONL file.
///
/// # Errors
///
/// `Error::Storage` naming the file and 1-based line number when a line is
/// not valid JSON for the record type. Blank lines are tolerated (a trailing
/// newline is normal).
pub async fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let contents = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut records = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(line).map_err(|e| {
            Error::Storage(format!(
                "malformed record in {} at line {}: {}",
                path.display(),
                index + 1,
                e
            ))
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Write records to a JSONL file atomically (temp file + rename).
pub async fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let temp_path = temp_path_for(path);

    {
        let file = File::create(&temp_path).await?;
        let mut writer = BufWriter::new(file);
        for record in records {
            let line = serde_json::to_string(record)?;
            writer.write_all(line.as_bytes()).await?;
            writer.write_all(b"\n").await?;
        }
        writer.flush().await?;
        writer.into_inner().sync_all().await?;
    }

    tokio::fs::rename(&temp_path, path).await?;
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
