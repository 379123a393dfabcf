use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::demo::demo_snapshot;
use super::records::{ConnectionRecord, NewConnection, Snapshot};
use crate::graph::build_graph;

/// Backend the graph view reads domain records from and writes connections to.
pub trait GraphSource: Send + Sync {
    fn describe(&self) -> String;

    fn load(&self) -> Result<Snapshot>;

    fn create_connection(&self, request: &NewConnection) -> Result<ConnectionRecord>;
}

pub struct JsonWorkspace {
    path: PathBuf,
}

impl JsonWorkspace {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_demo_if_missing(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }

        self.write(&demo_snapshot())?;
        Ok(true)
    }

    fn read_raw(&self) -> Result<String> {
        fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read workspace {}", self.path.display()))
    }

    fn read(&self) -> Result<Snapshot> {
        parse_snapshot(&self.read_raw()?)
            .with_context(|| format!("failed to parse workspace {}", self.path.display()))
    }

    fn write<T: Serialize>(&self, document: &T) -> Result<()> {
        let raw = serde_json::to_string_pretty(document).context("failed to encode workspace")?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, raw)
            .with_context(|| format!("failed to write {}", staging.display()))?;
        fs::rename(&staging, &self.path)
            .with_context(|| format!("failed to replace workspace {}", self.path.display()))
    }
}

impl GraphSource for JsonWorkspace {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Snapshot> {
        let snapshot = self.read()?;
        log::info!(
            "loaded {} records and {} connections from {}",
            snapshot.record_count(),
            snapshot.connections.len(),
            self.path.display()
        );
        Ok(snapshot)
    }

    fn create_connection(&self, request: &NewConnection) -> Result<ConnectionRecord> {
        if request.source_id == request.target_id {
            return Err(anyhow!("cannot connect {} to itself", request.source_id));
        }

        let raw = self.read_raw()?;
        let snapshot = parse_snapshot(&raw)
            .with_context(|| format!("failed to parse workspace {}", self.path.display()))?;
        let graph = build_graph(&snapshot);
        for id in [&request.source_id, &request.target_id] {
            if graph.index_of(id).is_none() {
                return Err(anyhow!("unknown node {id}"));
            }
        }

        let record = ConnectionRecord {
            id: Uuid::new_v4().to_string(),
            source_id: request.source_id.clone(),
            target_id: request.target_id.clone(),
            connection_type: request.connection_type,
        };

        // Only the connection list is touched; every other key is written back as read.
        let mut document: Value = serde_json::from_str(&raw).context("invalid workspace JSON")?;
        append_connection(&mut document, &record)?;
        self.write(&document)?;

        log::info!(
            "stored {} connection {} -> {}",
            record.connection_type.label(),
            record.source_id,
            record.target_id
        );
        Ok(record)
    }
}

fn parse_snapshot(raw: &str) -> Result<Snapshot> {
    serde_json::from_str(raw).context("invalid workspace JSON")
}

fn append_connection(document: &mut Value, record: &ConnectionRecord) -> Result<()> {
    let root = document
        .as_object_mut()
        .ok_or_else(|| anyhow!("workspace root is not a JSON object"))?;
    let entry = serde_json::to_value(record).context("failed to encode connection")?;

    let Value::Array(connections) = root
        .entry("connections")
        .or_insert_with(|| Value::Array(Vec::new()))
    else {
        return Err(anyhow!("workspace `connections` is not an array"));
    };
    connections.push(entry);
    Ok(())
}
