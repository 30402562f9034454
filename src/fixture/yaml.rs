use std::{io::Cursor, path::PathBuf};

use compio::{fs::File, io::AsyncReadExt, io::BufReader};
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::debug;

use crate::fixture::Entry;

use hashlink::LinkedHashMap;

/// Reads and parses a fixture file.
pub async fn from_path(path: PathBuf) -> Result<Vec<Entry>, FixtureLoadError> {
    debug!("Opening fixture file: {}", path.display());
    let file = File::open(&path).await.context(ReadSnafu {
        file_path: path.display().to_string(),
    })?;

    let cursor = Cursor::new(file);
    let mut reader = BufReader::new(cursor);
    let res = reader.read_to_string(String::new()).await;
    match res.0 {
        Ok(n) => debug!("Successfully read fixture file: {n} bytes"),
        _ => {
            res.0.context(ReadSnafu {
                file_path: path.display().to_string(),
            })?;
        }
    }
    parse_str(&res.1)
}

/// Parses a fixture document: the top level is a mapping, a mapping value is
/// a directory, a string scalar is a file's contents and a null value is an
/// empty directory.
pub fn parse_str(contents: &str) -> Result<Vec<Entry>, FixtureLoadError> {
    let documents =
        Yaml::load_from_str(contents).map_err(|e| FixtureLoadError::ParseError { source: e })?;
    let document = documents.first().ok_or(FixtureLoadError::EmptyFixture)?;

    let top_level = document
        .as_mapping()
        .ok_or(FixtureLoadError::TopLevelNotMap)?;

    parse_entries(top_level)
}

fn parse_entries(mapping: &LinkedHashMap<Yaml, Yaml>) -> Result<Vec<Entry>, FixtureLoadError> {
    mapping
        .iter()
        .map(|(key, value)| {
            let Yaml::Value(Scalar::String(name)) = key else {
                return Err(FixtureLoadError::EntryNameNotString {
                    key: format!("{:?}", key),
                });
            };
            match value {
                Yaml::Value(Scalar::String(contents)) => {
                    Ok(Entry::file(name.to_string(), contents.to_string()))
                }
                Yaml::Value(Scalar::Null) => Ok(Entry::dir(name.to_string(), [])),
                Yaml::Mapping(inner) => Ok(Entry::dir(name.to_string(), parse_entries(inner)?)),
                _ => Err(FixtureLoadError::UnsupportedContents {
                    name: name.to_string(),
                }),
            }
        })
        .collect()
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum FixtureLoadError {
    #[snafu(display("Failed to read the fixture file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Failed to parse the fixture file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("The fixture file contains no document"))]
    EmptyFixture,
    #[snafu(display("Top level of a fixture should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Entry name {} is not a string", key))]
    EntryNameNotString { key: String },
    #[snafu(display("Entry '{}' must hold a string, a map or null", name))]
    UnsupportedContents { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::Path;
    use tempfile::NamedTempFile;

    #[test]
    fn fixture_parses_nested_directories_and_files() {
        let yaml = r#"
docs:
  report.txt: "quarterly numbers"
pics:
  large-pics:
    backup: null
empty.txt: ""
"#;
        let entries = parse_str(yaml).unwrap();
        assert_eq!(
            entries,
            vec![
                Entry::dir("docs", [Entry::file("report.txt", "quarterly numbers")]),
                Entry::dir(
                    "pics",
                    [Entry::dir("large-pics", [Entry::dir("backup", [])])]
                ),
                Entry::file("empty.txt", ""),
            ]
        );
    }

    #[test]
    fn fixture_preserves_document_order() {
        let entries = parse_str("b.txt: 'b'\na.txt: 'a'\n").unwrap();
        let names: Vec<&str> = entries.iter().map(Entry::name).collect();
        assert_eq!(names, ["b.txt", "a.txt"]);
    }

    #[test]
    fn fixture_returns_error_on_invalid_yaml() {
        let invalid_yaml = "invalid: yaml: content: [unclosed";
        assert!(matches!(
            parse_str(invalid_yaml),
            Err(FixtureLoadError::ParseError { .. })
        ));
    }

    #[test]
    fn fixture_returns_error_on_empty_document() {
        assert!(matches!(
            parse_str(""),
            Err(FixtureLoadError::EmptyFixture)
        ));
    }

    #[test]
    fn fixture_returns_error_when_top_level_is_not_map() {
        assert!(matches!(
            parse_str("- item1\n- item2"),
            Err(FixtureLoadError::TopLevelNotMap)
        ));
        assert!(matches!(
            parse_str("just a string"),
            Err(FixtureLoadError::TopLevelNotMap)
        ));
    }

    #[test]
    fn fixture_rejects_non_string_contents() {
        assert!(matches!(
            parse_str("count.txt: 3"),
            Err(FixtureLoadError::UnsupportedContents { .. })
        ));
    }

    #[test]
    fn fixture_rejects_non_string_names() {
        assert!(matches!(
            parse_str("123: 'numeric key'"),
            Err(FixtureLoadError::EntryNameNotString { .. })
        ));
    }

    #[compio::test]
    async fn fixture_loads_from_a_file() {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        write!(temp_file, "docs:\n  note.txt: 'hi'\n").expect("Failed to write to temp file");
        temp_file.flush().expect("Failed to flush temp file");

        let entries = from_path(temp_file.path().to_path_buf()).await.unwrap();
        assert_eq!(
            entries,
            vec![Entry::dir("docs", [Entry::file("note.txt", "hi")])]
        );
    }

    #[compio::test]
    async fn fixture_returns_error_on_nonexistent_file() {
        let result = from_path(Path::new("nonexistent.yaml").to_path_buf()).await;
        assert!(matches!(result, Err(FixtureLoadError::ReadError { .. })));
    }
}
