//! Handler file parsing (YAML/JSON/JSONC) and loading.

use crate::config::error::ConfigError;
use crate::types::handler::HandlerDefinition;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFileType {
    Yaml,
    Json,
    Jsonc,
    Unknown,
}

/// Get config file type from path extension
pub fn get_file_type(path: &str) -> ConfigFileType {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "yaml" | "yml" => ConfigFileType::Yaml,
        "json" => ConfigFileType::Json,
        "jsonc" => ConfigFileType::Jsonc,
        _ => ConfigFileType::Unknown,
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Scan {
    Code,
    Str { escaped: bool },
    LineComment,
    BlockComment,
}

/// Strip `//` and `/* */` comments from JSONC content, leaving strings intact.
pub fn strip_json_comments(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut state = Scan::Code;

    while let Some(c) = chars.next() {
        state = match state {
            Scan::Code => match (c, chars.peek()) {
                ('/', Some('/')) => {
                    chars.next();
                    Scan::LineComment
                }
                ('/', Some('*')) => {
                    chars.next();
                    Scan::BlockComment
                }
                _ => {
                    result.push(c);
                    if c == '"' {
                        Scan::Str { escaped: false }
                    } else {
                        Scan::Code
                    }
                }
            },
            Scan::Str { escaped } => {
                result.push(c);
                match c {
                    '"' if !escaped => Scan::Code,
                    '\\' => Scan::Str { escaped: !escaped },
                    _ => Scan::Str { escaped: false },
                }
            }
            Scan::LineComment => {
                if c == '\n' || c == '\r' {
                    result.push(c);
                    Scan::Code
                } else {
                    Scan::LineComment
                }
            }
            Scan::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    Scan::Code
                } else {
                    Scan::BlockComment
                }
            }
        };
    }

    result
}

/// Parse JSON content
pub fn parse_json<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    serde_json::from_str(content).map_err(ConfigError::from)
}

/// Parse JSONC content (JSON with comments)
pub fn parse_jsonc<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    parse_json(&strip_json_comments(content))
}

/// Parse YAML content
pub fn parse_yaml<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    serde_yaml::from_str(content).map_err(ConfigError::from)
}

/// Parse config content based on file type
pub fn parse_config<T: DeserializeOwned>(content: &str, path: &str) -> Result<T, ConfigError> {
    match get_file_type(path) {
        ConfigFileType::Yaml => parse_yaml(content),
        ConfigFileType::Json => parse_json(content),
        ConfigFileType::Jsonc => parse_jsonc(content),
        ConfigFileType::Unknown => Err(ConfigError::UnknownFileType(path.to_string())),
    }
}

/// A handler file is either a bare list or an object with a `handlers` list.
#[derive(Deserialize)]
#[serde(untagged)]
enum HandlerFile {
    List(Vec<HandlerDefinition>),
    Wrapped { handlers: Vec<HandlerDefinition> },
}

impl From<HandlerFile> for Vec<HandlerDefinition> {
    fn from(file: HandlerFile) -> Self {
        match file {
            HandlerFile::List(handlers) | HandlerFile::Wrapped { handlers } => handlers,
        }
    }
}

/// Parse handler definitions from file content.
pub fn parse_handlers(content: &str, path: &str) -> Result<Vec<HandlerDefinition>, ConfigError> {
    parse_config::<HandlerFile>(content, path).map(Vec::from)
}

/// Load handler definitions from a single file.
pub async fn load_handler_file(path: &Path) -> Result<Vec<HandlerDefinition>, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let handlers = parse_handlers(&content, &path.to_string_lossy())?;
    debug!(path = %path.display(), count = handlers.len(), "loaded handler file");
    Ok(handlers)
}

/// Load handler definitions from every file matching a path or glob pattern.
///
/// Files are read in sorted path order; their handlers are concatenated so
/// registration order follows file order.
pub async fn load_handlers(pattern: &str) -> Result<Vec<HandlerDefinition>, ConfigError> {
    let mut paths = glob::glob(pattern)?
        .map(|entry| {
            entry.map_err(|e| ConfigError::Io {
                path: e.path().to_path_buf(),
                source: e.into_error(),
            })
        })
        .collect::<Result<Vec<PathBuf>, ConfigError>>()?;

    if paths.is_empty() {
        return Err(ConfigError::NoFilesMatched(pattern.to_string()));
    }
    paths.sort();

    let mut handlers = Vec::new();
    for path in &paths {
        handlers.extend(load_handler_file(path).await?);
    }
    Ok(handlers)
}
