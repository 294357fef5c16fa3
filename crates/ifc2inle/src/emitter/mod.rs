pub mod ntriples;
pub mod turtle;

use std::io;

use crate::graph::Triple;

/// Trait for writing RDF triples in different serialization formats.
pub trait TriplesEmitter {
    /// Write one triple.
    fn emit(&mut self, triple: &Triple) -> io::Result<()>;
    /// Register a namespace prefix (used by Turtle format).
    fn add_prefix(&mut self, prefix: &str, iri: &str) -> io::Result<()>;
    /// Flush any buffered output.
    fn flush(&mut self) -> io::Result<()>;
    /// Return the number of triples emitted so far.
    fn triple_count(&self) -> u64;
}

/// Escape a string for a quoted literal (RDF 1.1 N-Triples / Turtle ECHAR).
pub(crate) fn escape_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                // Control chars: \uXXXX
                out.push_str(&format!("\\u{:04X}", c as u32));
            }
            _ => out.push(c),
        }
    }
    out
}
