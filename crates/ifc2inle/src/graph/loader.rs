//! Load Turtle and N-Triples files into a [`Graph`].

use std::convert::Infallible;
use std::path::Path;

use sophia_api::source::TripleSource;
use sophia_api::term::{Term as SophiaTerm, TermKind};
use sophia_api::triple::Triple as SophiaTriple;
use sophia_turtle::parser::{nt, turtle};

use super::{Graph, Literal, RdfFormat, Term, Triple};
use crate::error::GraphError;
use crate::model::ontology::standard;

/// Load an RDF file, detecting its format from the extension.
pub fn load_graph(path: &Path) -> Result<Graph, GraphError> {
    let format = RdfFormat::from_path(path).ok_or_else(|| GraphError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let content = std::fs::read_to_string(path).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_graph(&content, format).map_err(|message| GraphError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

/// Parse RDF text in the given format.
pub fn parse_graph(content: &str, format: RdfFormat) -> Result<Graph, String> {
    let mut graph = Graph::new();
    match format {
        RdfFormat::NTriples => nt::parse_str(content)
            .try_for_each_triple(|t| -> Result<(), Infallible> {
                push_triple(&mut graph, t.s(), t.p(), t.o());
                Ok(())
            })
            .map_err(|e| e.to_string())?,
        RdfFormat::Turtle => {
            turtle::parse_str(content)
                .try_for_each_triple(|t| -> Result<(), Infallible> {
                    push_triple(&mut graph, t.s(), t.p(), t.o());
                    Ok(())
                })
                .map_err(|e| e.to_string())?;
            for (prefix, iri) in scan_prefixes(content) {
                graph.add_prefix(&prefix, &iri);
            }
        }
    }
    Ok(graph)
}

fn push_triple<S, P, O>(graph: &mut Graph, s: S, p: P, o: O)
where
    S: SophiaTerm,
    P: SophiaTerm,
    O: SophiaTerm,
{
    let predicate = match p.iri() {
        Some(iri) => iri.as_str().to_string(),
        None => return,
    };
    if let (Some(subject), Some(object)) = (convert_term(s), convert_term(o)) {
        graph.insert(Triple {
            subject,
            predicate,
            object,
        });
    }
}

/// Convert a parsed term. Quoted triples and variables are not representable
/// and are dropped.
fn convert_term<T: SophiaTerm>(term: T) -> Option<Term> {
    match term.kind() {
        TermKind::Iri => term.iri().map(|iri| Term::Iri(iri.as_str().to_string())),
        TermKind::BlankNode => term
            .bnode_id()
            .map(|id| Term::BlankNode(id.as_str().to_string())),
        TermKind::Literal => {
            let value = term.lexical_form()?.to_string();
            let language = term.language_tag().map(|tag| tag.as_str().to_string());
            let datatype = match language {
                Some(_) => None,
                None => term
                    .datatype()
                    .map(|dt| dt.as_str().to_string())
                    .filter(|dt| dt != standard::XSD_STRING),
            };
            Some(Term::Literal(Literal {
                value,
                datatype,
                language,
            }))
        }
        _ => None,
    }
}

/// Collect `@prefix` / `PREFIX` declarations so a rewritten file keeps them.
fn scan_prefixes(content: &str) -> Vec<(String, String)> {
    let mut prefixes = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        let rest = if let Some(rest) = line.strip_prefix("@prefix") {
            rest
        } else if line.get(..6).is_some_and(|kw| kw.eq_ignore_ascii_case("PREFIX")) {
            &line[6..]
        } else {
            continue;
        };
        let Some((name, iri)) = rest.split_once(':') else {
            continue;
        };
        let iri = iri.trim();
        let Some(iri) = iri.strip_prefix('<').and_then(|i| i.split_once('>')).map(|(i, _)| i) else {
            continue;
        };
        prefixes.push((name.trim().to_string(), iri.to_string()));
    }
    prefixes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_prefixes() {
        let ttl = "@prefix ifc: <http://ifc.example/OWL#> .\nPREFIX ex: <http://example.org/>\n<a> <b> <c> .";
        let prefixes = scan_prefixes(ttl);
        assert_eq!(
            prefixes,
            vec![
                ("ifc".to_string(), "http://ifc.example/OWL#".to_string()),
                ("ex".to_string(), "http://example.org/".to_string()),
            ]
        );
    }
}
