//! Error types for lingua tools - thin wrapper over engine errors

use std::path::{Path, PathBuf};

use lingua_fragments::FragmentError;
use miette::{Diagnostic, NamedSource, SourceOffset, SourceSpan};

/// Main error type for lingua tools
#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum LinguaError {
    /// Engine error: a rejected mutation or malformed fragment data
    #[error(transparent)]
    #[diagnostic(transparent)]
    Fragment(#[from] FragmentError),

    #[error("could not access {}", path.display())]
    #[diagnostic(code(lingua::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Parse error with source location
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error("invalid configuration: {0}")]
    #[diagnostic(code(lingua::config))]
    Config(String),
}

impl LinguaError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        LinguaError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// JSON parse error pointing into the file it came from
#[derive(thiserror::Error, Debug, Diagnostic)]
#[error("could not parse {name}: {message}")]
#[diagnostic(code(lingua::parse))]
pub struct ParseError {
    name: String,
    message: String,
    #[source_code]
    src: NamedSource<String>,
    #[label("here")]
    location: SourceSpan,
    #[help]
    advice: Option<String>,
}

impl ParseError {
    pub fn json(name: impl Into<String>, source: impl Into<String>, err: &serde_json::Error) -> Self {
        let name = name.into();
        let source = source.into();
        let offset = if err.line() == 0 {
            SourceOffset::from(0)
        } else {
            SourceOffset::from_location(&source, err.line(), err.column())
        };
        let advice = err
            .is_eof()
            .then(|| "the file ends before the JSON document does".to_string());
        Self {
            message: err.to_string(),
            src: NamedSource::new(name.clone(), source),
            location: SourceSpan::new(offset, 0),
            advice,
            name,
        }
    }

    /// `(line, column)` of the error, 1-based.
    pub fn line_col(&self) -> (usize, usize) {
        offset_to_line_col(self.location.offset(), self.src.inner())
    }
}

fn offset_to_line_col(offset: usize, src: &str) -> (usize, usize) {
    let mut line_start = 0usize;
    for (i, line) in src.split_inclusive('\n').enumerate() {
        let line_end = line_start + line.len();
        if offset < line_end {
            let column = src.get(line_start..offset).map_or(0, |s| s.chars().count()) + 1;
            return (i + 1, column);
        }
        line_start = line_end;
    }
    (src.lines().count().max(1), 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_points_at_json_location() {
        let src = "{\n  \"id\": \"p\",\n  \"root\": 12\n}";
        let err = serde_json::from_str::<Strict>(src).unwrap_err();
        let parse = ParseError::json("doc.json", src, &err);
        assert_eq!(parse.line_col().0, 3);
        assert!(parse.to_string().starts_with("could not parse doc.json"));
    }

    #[test]
    fn test_eof_gets_advice() {
        let src = "{\"id\": ";
        let err = serde_json::from_str::<Strict>(src).unwrap_err();
        let parse = ParseError::json("doc.json", src, &err);
        assert!(parse.advice.is_some());
    }

    #[test]
    fn test_fragment_errors_keep_their_code() {
        let err = LinguaError::from(FragmentError::DuplicateId("w1".into()));
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("lingua::fragment::duplicate_id"));
    }

    #[derive(Debug, serde::Deserialize)]
    #[allow(dead_code)]
    struct Strict {
        id: String,
        root: String,
    }
}
