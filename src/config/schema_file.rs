use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

use compio::fs;
use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::{debug, warn};

use crate::schema::{NodeKind, SchemaError, SchemaNode, dir, file, link, root_dir};

const ROOT_KEY: &str = "root";
const STRICT_KEY: &str = "strict";
const CHILDREN_KEY: &str = "children";
const OPTIONAL_KEY: &str = "optional";
const ANY_CHILDREN_KEY: &str = "any_children";
const KIND_KEYS: [(&str, NodeKind); 3] = [
    ("dir", NodeKind::Directory),
    ("file", NodeKind::File),
    ("link", NodeKind::Link),
];

/// An expected layout declared in YAML.
///
/// ```yaml
/// root: testDir
/// strict: false
/// children:
///   - dir: folder1
///     children:
///       - file: file1.1
///   - dir: folder3
///     any_children: true
///   - file: file4
///     optional: true
/// ```
#[derive(Debug, Clone)]
pub struct SchemaFile {
    pub root: Option<PathBuf>,
    pub strict: Option<bool>,
    pub children: Vec<SchemaNode>,
}

impl SchemaFile {
    pub async fn read(path: &Path) -> Result<Self, SchemaFileError> {
        debug!("Opening schema file: {}", path.display());
        let bytes = fs::read(path).await.context(ReadSnafu {
            file_path: path.to_path_buf(),
        })?;
        debug!("Successfully read schema file: {} bytes", bytes.len());

        let contents = String::from_utf8(bytes).context(EncodingSnafu {
            file_path: path.to_path_buf(),
        })?;
        contents.as_str().try_into()
    }

    /// Builds the expected tree. `default_root` is used when the file does not
    /// name a root.
    pub fn into_schema(self, default_root: &Path) -> Result<SchemaNode, SchemaFileError> {
        let root = self.root.unwrap_or_else(|| default_root.to_path_buf());
        root_dir(Some(root.as_path()))
            .add_children(self.children)
            .context(SchemaSnafu)
    }

    fn parse_children(
        mapping: &LinkedHashMap<Yaml, Yaml>,
        parent: &str,
    ) -> Result<Vec<SchemaNode>, SchemaFileError> {
        let children = match get(mapping, CHILDREN_KEY) {
            None | Some(Yaml::Value(Scalar::Null)) => return Ok(Vec::new()),
            Some(children) => children
                .as_sequence()
                .context(ChildrenNotSequenceSnafu { parent })?,
        };

        children
            .iter()
            .map(|entry| Self::parse_entry(entry, parent))
            .collect()
    }

    fn parse_entry(entry: &Yaml, parent: &str) -> Result<SchemaNode, SchemaFileError> {
        let mapping = entry.as_mapping().context(EntryNotMapSnafu { parent })?;

        let declared = KIND_KEYS
            .iter()
            .filter_map(|&(key, kind)| get(mapping, key).map(|name| (kind, name)))
            .collect::<Vec<_>>();
        let (kind, name) = match declared.as_slice() {
            [single] => *single,
            [] => return MissingEntryKindSnafu { parent }.fail(),
            _ => return AmbiguousEntryKindSnafu { parent }.fail(),
        };
        let name = name.as_str().context(InvalidNameSnafu { parent })?;

        let mut node = match kind {
            NodeKind::Directory => dir(name),
            NodeKind::File => file(name),
            NodeKind::Link => link(name),
        };
        if flag(mapping, OPTIONAL_KEY, name)? {
            node = node.mark_optional();
        }
        if flag(mapping, ANY_CHILDREN_KEY, name)? {
            node = node.mark_wildcard_children();
        }

        let children = Self::parse_children(mapping, name)?;
        if !children.is_empty() && kind != NodeKind::Directory {
            warn!("Ignoring children declared under {} '{}'", kind, name);
        }
        node.add_children(children).context(SchemaSnafu)
    }
}

impl TryFrom<&str> for SchemaFile {
    type Error = SchemaFileError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let document = documents.first().context(MalformedSchemaSnafu)?;
        let top_level = document.as_mapping().context(TopLevelNotMapSnafu)?;

        let root = match get(top_level, ROOT_KEY) {
            None | Some(Yaml::Value(Scalar::Null)) => None,
            Some(root) => Some(PathBuf::from(
                root.as_str().context(InvalidRootSnafu)?,
            )),
        };
        let strict = match get(top_level, STRICT_KEY) {
            None => None,
            Some(Yaml::Value(Scalar::Boolean(strict))) => Some(*strict),
            Some(_) => {
                return InvalidFlagSnafu {
                    key: STRICT_KEY,
                    entry: "<top level>",
                }
                .fail();
            }
        };
        let children = Self::parse_children(top_level, "<root>")?;

        debug!(
            "Loaded schema with root {:?}, strict {:?} and {} top level entries",
            root,
            strict,
            children.len()
        );
        Ok(SchemaFile {
            root,
            strict,
            children,
        })
    }
}

fn get<'a, 'input>(
    mapping: &'a LinkedHashMap<Yaml<'input>, Yaml<'input>>,
    key: &'static str,
) -> Option<&'a Yaml<'input>> {
    mapping.get(&Yaml::Value(Scalar::String(Cow::Borrowed(key))))
}

fn flag(
    mapping: &LinkedHashMap<Yaml, Yaml>,
    key: &'static str,
    entry: &str,
) -> Result<bool, SchemaFileError> {
    match get(mapping, key) {
        None => Ok(false),
        Some(Yaml::Value(Scalar::Boolean(value))) => Ok(*value),
        Some(_) => InvalidFlagSnafu { key, entry }.fail(),
    }
}

#[derive(Debug, Snafu)]
pub enum SchemaFileError {
    #[snafu(display("Failed to read the schema file: {}", file_path.display()))]
    ReadError {
        file_path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Schema file {} is not valid UTF-8", file_path.display()))]
    EncodingError {
        file_path: PathBuf,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Failed to parse the schema file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted schema file"))]
    MalformedSchema,
    #[snafu(display("Top level of the schema should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Root of the schema should be a path"))]
    InvalidRoot,
    #[snafu(display("Children of '{}' should be a list", parent))]
    ChildrenNotSequence { parent: String },
    #[snafu(display("Entry under '{}' should be a map", parent))]
    EntryNotMap { parent: String },
    #[snafu(display("Entry under '{}' should declare one of dir, file or link", parent))]
    MissingEntryKind { parent: String },
    #[snafu(display("Entry under '{}' declares more than one of dir, file or link", parent))]
    AmbiguousEntryKind { parent: String },
    #[snafu(display("Entry under '{}' should be named with a string", parent))]
    InvalidName { parent: String },
    #[snafu(display("'{}' of '{}' should be true or false", key, entry))]
    InvalidFlag { key: String, entry: String },
    #[snafu(display("Schema declares an invalid tree"))]
    SchemaError { source: SchemaError },
}
