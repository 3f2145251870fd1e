use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::LoadError;
use crate::model::MolecularGraph;

/// Read a JSON array of graphs. Every graph is validated while parsing.
///
/// # Errors
///
/// Returns [`LoadError`] if the file cannot be read or holds invalid graphs.
pub fn load_graphs_from(path: impl AsRef<Path>) -> Result<Vec<MolecularGraph>, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let graphs: Vec<MolecularGraph> =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), graphs = graphs.len(), "loaded graphs");
    Ok(graphs)
}

/// Write graphs as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be written.
pub fn save_graphs_to(path: impl AsRef<Path>, graphs: &[MolecularGraph]) -> Result<(), LoadError> {
    let path = path.as_ref();
    let io_err = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, graphs)
        .map_err(|e| io_err(std::io::Error::other(e)))?;
    writer.write_all(b"\n").map_err(io_err)?;
    writer.flush().map_err(io_err)?;
    Ok(())
}
