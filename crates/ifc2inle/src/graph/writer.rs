//! Persist a [`Graph`] through a [`TriplesEmitter`].

use std::io::{self, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use super::{Graph, RdfFormat};
use crate::emitter::ntriples::NTriplesEmitter;
use crate::emitter::turtle::TurtleEmitter;
use crate::emitter::TriplesEmitter;
use crate::error::GraphError;

/// Stream every prefix and triple of `graph` into `emitter`.
pub fn write_graph<E: TriplesEmitter>(graph: &Graph, emitter: &mut E) -> io::Result<u64> {
    for (prefix, iri) in graph.prefixes() {
        emitter.add_prefix(prefix, iri)?;
    }
    for triple in graph.triples() {
        emitter.emit(triple)?;
    }
    emitter.flush()?;
    Ok(emitter.triple_count())
}

/// Serialize `graph` in `format` to any writer.
pub fn write_to<W: Write>(graph: &Graph, writer: W, format: RdfFormat) -> io::Result<u64> {
    match format {
        RdfFormat::NTriples => write_graph(graph, &mut NTriplesEmitter::new(writer)),
        RdfFormat::Turtle => write_graph(graph, &mut TurtleEmitter::new(writer)),
    }
}

/// Save `graph` to `path`.
///
/// The graph is written to a temporary file next to `path` and renamed into
/// place, so a failure never leaves a truncated output behind.
pub fn save_graph(graph: &Graph, path: &Path, format: RdfFormat) -> Result<u64, GraphError> {
    let io_err = |source: io::Error| GraphError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    let count = {
        let writer = BufWriter::new(tmp.as_file_mut());
        write_to(graph, writer, format).map_err(io_err)?
    };
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(count)
}
