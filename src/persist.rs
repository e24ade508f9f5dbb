//! JSON persistence for graphs.
//!
//! Structure, payloads, entry/exit and evaluator config are stored. Cached
//! orders and results are not: a loaded graph recomputes both on first use.
use crate::error::GraphResult;
use serde::{de::DeserializeOwned, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

pub fn to_json<T: Serialize>(graph: &T) -> GraphResult<String> {
    Ok(serde_json::to_string_pretty(graph)?)
}

pub fn from_json<T: DeserializeOwned>(json: &str) -> GraphResult<T> {
    Ok(serde_json::from_str(json)?)
}

pub fn save<T: Serialize>(graph: &T, path: impl AsRef<Path>) -> GraphResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, graph)?;
    writer.flush()?;
    Ok(())
}

pub fn load<T: DeserializeOwned>(path: impl AsRef<Path>) -> GraphResult<T> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
