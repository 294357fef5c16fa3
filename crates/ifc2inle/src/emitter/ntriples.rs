use std::io::{self, Write};

use super::{escape_literal, TriplesEmitter};
use crate::graph::{Term, Triple};

/// N-Triples format emitter. Streams triples as `<s> <p> <o> .` lines.
pub struct NTriplesEmitter<W: Write> {
    writer: W,
    count: u64,
}

impl<W: Write> NTriplesEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, count: 0 }
    }

    fn format_term(term: &Term) -> String {
        match term {
            Term::Iri(iri) => format!("<{iri}>"),
            Term::BlankNode(id) => format!("_:{id}"),
            Term::Literal(lit) => {
                let escaped = escape_literal(&lit.value);
                match (&lit.language, &lit.datatype) {
                    (Some(lang), _) => format!("\"{escaped}\"@{lang}"),
                    (None, Some(dt)) => format!("\"{escaped}\"^^<{dt}>"),
                    (None, None) => format!("\"{escaped}\""),
                }
            }
        }
    }
}

impl<W: Write> TriplesEmitter for NTriplesEmitter<W> {
    fn emit(&mut self, triple: &Triple) -> io::Result<()> {
        let s = Self::format_term(&triple.subject);
        let o = Self::format_term(&triple.object);
        writeln!(self.writer, "{s} <{}> {o} .", triple.predicate)?;
        self.count += 1;
        Ok(())
    }

    fn add_prefix(&mut self, prefix: &str, iri: &str) -> io::Result<()> {
        // N-Triples doesn't use prefixes, but emit as comment for readability
        writeln!(self.writer, "# @prefix {prefix}: <{iri}> .")
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    fn triple_count(&self) -> u64 {
        self.count
    }
}
