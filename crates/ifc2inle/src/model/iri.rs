//! IRI minting for INLE individuals and namespace helpers.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use super::ontology::nln;

/// Characters that need percent-encoding in an IRI local name.
/// We keep alphanumeric, -, _, ., ~ as unreserved per RFC 3987.
const IRI_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'!')
    .add(b'"')
    .add(b'#')
    .add(b'$')
    .add(b'%')
    .add(b'&')
    .add(b'\'')
    .add(b'(')
    .add(b')')
    .add(b'*')
    .add(b'+')
    .add(b',')
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Generates consistent IRIs for INLE individuals.
#[derive(Debug, Clone)]
pub struct IriMinter {
    namespace: String,
}

impl IriMinter {
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Escape a string for use as an IRI local name.
    fn escape(value: &str) -> String {
        utf8_percent_encode(value, IRI_ENCODE_SET).to_string()
    }

    /// IRI of a term local to the namespace.
    pub fn term(&self, local: &str) -> String {
        format!("{}{}", self.namespace, local)
    }

    /// IRI of an instance name (`nln_InstanceName_<basename>`).
    pub fn instance_name_iri(&self, basename: &str) -> String {
        format!("{}{}{}", self.namespace, nln::INSTANCE_NAME_PREFIX, basename)
    }

    /// IRI of the `index`-th variant of an instance (`nln_Variant_<basename>_<index>`).
    pub fn variant_iri(&self, basename: &str, index: usize) -> String {
        format!(
            "{}{}{}_{}",
            self.namespace,
            nln::VARIANT_PREFIX,
            basename,
            index
        )
    }
}

/// Turn a root name into the basename used inside instance and variant IRIs.
///
/// Spaces are dropped and brackets become underscores, then whatever is still
/// reserved gets percent-encoded.
pub fn basename(root_name: &str) -> String {
    let cleaned: String = root_name
        .chars()
        .filter(|c| *c != ' ')
        .map(|c| match c {
            '(' | ')' | '[' | ']' => '_',
            other => other,
        })
        .collect();
    IriMinter::escape(&cleaned)
}

/// Split an IRI into its namespace (up to and including the last `#` or `/`)
/// and its local name.
pub fn split_iri(iri: &str) -> (&str, &str) {
    match iri.rfind(['#', '/']) {
        Some(pos) => iri.split_at(pos + 1),
        None => ("", iri),
    }
}

/// Local name of an IRI (see [`split_iri`]).
pub fn local_name(iri: &str) -> &str {
    split_iri(iri).1
}
