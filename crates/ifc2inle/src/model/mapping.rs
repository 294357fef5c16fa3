//! Class mapping table: which IFC classes are converted, and into what.
//!
//! The table is a `;`-delimited file with a header naming (at least) the
//! columns `Class`, `Keep`, `MapTo` and `ExtraVariant`:
//!
//! ```text
//! Class;Keep;MapTo;ExtraVariant
//! IfcBuildingStorey;1;;synonym
//! IfcWallStandardCase;1;IfcWall;
//! IfcWall;0;;
//! ```

use std::collections::HashMap;
use std::path::Path;

use crate::error::ConfigError;

const DELIMITER: char = ';';

const COL_CLASS: &str = "Class";
const COL_KEEP: &str = "Keep";
const COL_MAP_TO: &str = "MapTo";
const COL_EXTRA_VARIANT: &str = "ExtraVariant";

/// One row of the mapping table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassMappingEntry {
    pub source_class: String,
    pub keep: bool,
    pub map_to: Option<String>,
    pub extra_variant: Option<String>,
}

impl ClassMappingEntry {
    /// Name of the class instances are converted into.
    pub fn target_class(&self) -> &str {
        self.map_to.as_deref().unwrap_or(&self.source_class)
    }
}

/// All mapping rows, in file order, indexed by source class name.
#[derive(Debug, Clone, Default)]
pub struct ClassMappingTable {
    entries: Vec<ClassMappingEntry>,
    by_class: HashMap<String, usize>,
}

impl ClassMappingTable {
    /// Load and parse a mapping table file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse mapping table text. Any malformed row fails the whole table.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut lines = content
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim_end_matches('\r')))
            .filter(|(_, line)| !line.trim().is_empty());

        let header: Vec<String> = match lines.next() {
            Some((_, line)) => split_fields(line),
            None => return Err(ConfigError::MissingColumn(COL_CLASS.to_string())),
        };
        let column = |name: &str| {
            header
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| ConfigError::MissingColumn(name.to_string()))
        };
        let class_col = column(COL_CLASS)?;
        let keep_col = column(COL_KEEP)?;
        let map_to_col = column(COL_MAP_TO)?;
        let extra_col = column(COL_EXTRA_VARIANT)?;

        let mut table = ClassMappingTable::default();
        for (line_no, line) in lines {
            let fields = split_fields(line);
            if fields.len() != header.len() {
                return Err(ConfigError::MalformedRow {
                    line: line_no,
                    reason: format!("expected {} columns, found {}", header.len(), fields.len()),
                });
            }

            let source_class = fields[class_col].clone();
            if source_class.is_empty() {
                return Err(ConfigError::MalformedRow {
                    line: line_no,
                    reason: "empty class name".to_string(),
                });
            }
            let keep = parse_flag(&fields[keep_col]).ok_or_else(|| ConfigError::MalformedRow {
                line: line_no,
                reason: format!("invalid Keep value `{}`", fields[keep_col]),
            })?;
            if table.by_class.contains_key(&source_class) {
                return Err(ConfigError::MalformedRow {
                    line: line_no,
                    reason: format!("duplicate class {source_class}"),
                });
            }

            table.by_class.insert(source_class.clone(), table.entries.len());
            table.entries.push(ClassMappingEntry {
                source_class,
                keep,
                map_to: non_empty(&fields[map_to_col]),
                extra_variant: non_empty(&fields[extra_col]),
            });
        }
        Ok(table)
    }

    pub fn entries(&self) -> &[ClassMappingEntry] {
        &self.entries
    }

    pub fn get(&self, source_class: &str) -> Option<&ClassMappingEntry> {
        self.by_class.get(source_class).map(|&idx| &self.entries[idx])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Extra variant kind for records of `target_class`.
    ///
    /// The row named after the target class wins; a target class without a row
    /// of its own inherits the flag of the source row that produced it.
    pub fn extra_variant_for<'a>(
        &'a self,
        target_class: &str,
        source: &'a ClassMappingEntry,
    ) -> Option<&'a str> {
        match self.get(target_class) {
            Some(entry) => entry.extra_variant.as_deref(),
            None => source.extra_variant.as_deref(),
        }
    }
}

fn split_fields(line: &str) -> Vec<String> {
    line.split(DELIMITER)
        .map(|field| {
            let field = field.trim();
            field
                .strip_prefix('"')
                .and_then(|f| f.strip_suffix('"'))
                .unwrap_or(field)
                .trim()
                .to_string()
        })
        .collect()
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
