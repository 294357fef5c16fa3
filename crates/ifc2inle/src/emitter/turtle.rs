use std::collections::BTreeMap;
use std::io::{self, Write};

use super::{escape_literal, TriplesEmitter};
use crate::graph::{Term, Triple};

/// Turtle emitter. Prefixes are declared up front, IRIs are compacted where
/// the local name allows it, and consecutive triples sharing a subject are
/// written as one predicate list.
///
/// A statement stays open until the next subject starts or the emitter is
/// flushed, so callers must call [`TriplesEmitter::flush`] at the end.
pub struct TurtleEmitter<W: Write> {
    writer: W,
    count: u64,
    prefixes: BTreeMap<String, String>,
    prefix_written: bool,
    open_subject: Option<Term>,
}

impl<W: Write> TurtleEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            count: 0,
            prefixes: BTreeMap::new(),
            prefix_written: false,
            open_subject: None,
        }
    }

    fn write_prefixes(&mut self) -> io::Result<()> {
        if self.prefix_written {
            return Ok(());
        }
        self.prefix_written = true;
        for (prefix, iri) in &self.prefixes {
            writeln!(self.writer, "@prefix {prefix}: <{iri}> .")?;
        }
        if !self.prefixes.is_empty() {
            writeln!(self.writer)?;
        }
        Ok(())
    }

    /// `prefix:local` for the longest matching namespace, or `<iri>`.
    ///
    /// Only ASCII letters, digits and `_` are written as prefixed names; the
    /// Turtle grammar rejects many other Unicode alphanumerics (`²`, `µ`).
    fn compact_iri(&self, iri: &str) -> String {
        let best = self
            .prefixes
            .iter()
            .filter(|(_, ns)| iri.starts_with(ns.as_str()))
            .max_by_key(|(_, ns)| ns.len());
        if let Some((prefix, ns)) = best {
            let local = &iri[ns.len()..];
            let plain = local.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_');
            if !local.is_empty() && plain {
                return format!("{prefix}:{local}");
            }
        }
        format!("<{iri}>")
    }

    fn format_term(&self, term: &Term) -> String {
        match term {
            Term::Iri(iri) => self.compact_iri(iri),
            Term::BlankNode(id) => format!("_:{id}"),
            Term::Literal(lit) => {
                let escaped = escape_literal(&lit.value);
                match (&lit.language, &lit.datatype) {
                    (Some(lang), _) => format!("\"{escaped}\"@{lang}"),
                    (None, Some(dt)) => format!("\"{escaped}\"^^{}", self.compact_iri(dt)),
                    (None, None) => format!("\"{escaped}\""),
                }
            }
        }
    }

    fn close_statement(&mut self) -> io::Result<()> {
        if self.open_subject.take().is_some() {
            writeln!(self.writer, " .")?;
        }
        Ok(())
    }
}

impl<W: Write> TriplesEmitter for TurtleEmitter<W> {
    fn emit(&mut self, triple: &Triple) -> io::Result<()> {
        self.write_prefixes()?;
        let p = self.compact_iri(&triple.predicate);
        let o = self.format_term(&triple.object);
        if self.open_subject.as_ref() == Some(&triple.subject) {
            write!(self.writer, " ;\n    {p} {o}")?;
        } else {
            self.close_statement()?;
            let s = self.format_term(&triple.subject);
            write!(self.writer, "{s} {p} {o}")?;
            self.open_subject = Some(triple.subject.clone());
        }
        self.count += 1;
        Ok(())
    }

    fn add_prefix(&mut self, prefix: &str, iri: &str) -> io::Result<()> {
        self.prefixes.insert(prefix.to_string(), iri.to_string());
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.write_prefixes()?;
        self.close_statement()?;
        self.writer.flush()
    }

    fn triple_count(&self) -> u64 {
        self.count
    }
}
