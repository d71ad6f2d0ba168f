//! Configuration primitives and loader for markdown-toc-gen.
//!
//! Settings are resolved from a precedence stack:
//! override flag → working directory → git root → built-in defaults.
//! Each layer is parsed from `.markdown-toc.toml` and merged field by field,
//! then validated into typed settings so the CLI never touches raw TOML.

use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};
use log::debug;
use serde::Deserialize;
use thiserror::Error;

const CONFIG_FILE_NAME: &str = ".markdown-toc.toml";

/// Default heading depth: `##` through `######`.
pub const DEFAULT_MAX_DEPTH: u8 = 6;

const DEFAULT_EXCLUDE: &[&str] = &["**/node_modules/**"];
const DEFAULT_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Complete configuration resolved from defaults and on-disk overrides.
#[derive(Clone, Debug)]
pub struct Config {
    pub toc: TocSettings,
    pub files: FileSettings,
    pub sources: ConfigSources,
}

/// Settings that shape TOC generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocSettings {
    pub max_depth: u8,
}

/// Settings that decide which files a run touches.
#[derive(Clone, Debug)]
pub struct FileSettings {
    pub exclude: PatternList,
    pub extensions: Vec<String>,
}

impl FileSettings {
    /// Returns true when `path` matches any exclude pattern.
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.exclude.iter().any(|pattern| pattern.is_match(path))
    }

    /// Returns true when `path` carries one of the configured markdown extensions.
    pub fn is_markdown(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.extensions
                    .iter()
                    .any(|candidate| candidate.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}

/// Compiled glob together with its original spelling.
#[derive(Clone, Debug)]
pub struct Pattern {
    original: String,
    matcher: GlobMatcher,
}

impl Pattern {
    fn new(source: ConfigSource, value: String) -> Result<Self, ConfigValidationError> {
        match Glob::new(&value) {
            Ok(glob) => Ok(Pattern {
                matcher: glob.compile_matcher(),
                original: value,
            }),
            Err(err) => Err(ConfigValidationError::new(
                Some(source),
                format!("invalid glob pattern '{value}': {err}"),
            )),
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn is_match(&self, path: &Path) -> bool {
        self.matcher.is_match(path)
    }
}

#[derive(Clone, Debug, Default)]
pub struct PatternList {
    patterns: Vec<Pattern>,
}

impl PatternList {
    fn new(patterns: Vec<Pattern>) -> Self {
        Self { patterns }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }
}

/// Provenance information for resolved configuration.
#[derive(Clone, Debug)]
pub struct ConfigSources {
    pub working_directory: PathBuf,
    pub layers: Vec<ConfigSource>,
}

/// Specific layer of configuration (default/git/local/override).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigSource {
    pub kind: ConfigSourceKind,
    pub path: Option<PathBuf>,
}

impl ConfigSource {
    fn builtin() -> Self {
        ConfigSource {
            kind: ConfigSourceKind::Default,
            path: None,
        }
    }

    fn for_file(kind: ConfigSourceKind, path: PathBuf) -> Self {
        ConfigSource {
            kind,
            path: Some(path),
        }
    }

    pub fn describe(&self) -> String {
        match (&self.kind, &self.path) {
            (ConfigSourceKind::Default, _) => "built-in defaults".to_owned(),
            (kind, Some(path)) => format!("{} at {}", kind, path.display()),
            (kind, None) => kind.to_string(),
        }
    }
}

/// Kinds of configuration sources, ordered from lowest to highest precedence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigSourceKind {
    Default,
    GitRoot,
    Local,
    Override,
}

impl fmt::Display for ConfigSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConfigSourceKind::Default => "defaults",
            ConfigSourceKind::GitRoot => "git-root config",
            ConfigSourceKind::Local => "local config",
            ConfigSourceKind::Override => "override config",
        };
        f.write_str(label)
    }
}

/// Loader options, typically supplied by the CLI layer.
#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub override_path: Option<PathBuf>,
    pub working_dir: Option<PathBuf>,
}

impl LoadOptions {
    pub fn with_override_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.override_path = Some(path.into());
        self
    }

    pub fn with_working_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(path.into());
        self
    }
}

/// Errors surfaced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to resolve working directory {attempted}: {source}")]
    WorkingDirectory {
        attempted: PathBuf,
        source: io::Error,
    },
    #[error("override config {path} not found")]
    OverrideNotFound { path: PathBuf },
    #[error("failed to read config {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("configuration validation failed:\n{0}")]
    Validation(ConfigValidationErrors),
}

impl Config {
    /// Loads configuration using the precedence rules and returns typed settings.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let working_dir = resolve_working_dir(options.working_dir)?;
        let override_path = options
            .override_path
            .map(|path| make_absolute(&path, &working_dir));

        if let Some(path) = &override_path {
            if !path.exists() {
                return Err(ConfigError::OverrideNotFound { path: path.clone() });
            }
        }

        let default_source = ConfigSource::builtin();
        let mut merged = PartialConfig::default();
        merged.merge(defaults_layer(default_source.clone()));

        let mut source_layers = vec![default_source];

        let local_config_path = working_dir.join(CONFIG_FILE_NAME);
        let git_config_path =
            find_git_root(&working_dir).map(|root| root.join(CONFIG_FILE_NAME));

        if let Some(path) = git_config_path.as_ref() {
            if path.exists() && Some(path) != override_path.as_ref() && path != &local_config_path {
                let source = ConfigSource::for_file(ConfigSourceKind::GitRoot, path.clone());
                merged.merge(load_layer(path, source.clone())?);
                source_layers.push(source);
            }
        }

        if local_config_path.exists() && Some(&local_config_path) != override_path.as_ref() {
            let source = ConfigSource::for_file(ConfigSourceKind::Local, local_config_path.clone());
            merged.merge(load_layer(&local_config_path, source.clone())?);
            source_layers.push(source);
        }

        if let Some(path) = override_path {
            let source = ConfigSource::for_file(ConfigSourceKind::Override, path.clone());
            merged.merge(load_layer(&path, source.clone())?);
            source_layers.push(source);
        }

        debug!("resolved {} configuration layer(s)", source_layers.len());

        let (toc, files) = merged.finalize().map_err(ConfigError::Validation)?;
        Ok(Config {
            toc,
            files,
            sources: ConfigSources {
                working_directory: working_dir,
                layers: source_layers,
            },
        })
    }
}

fn resolve_working_dir(override_dir: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    match override_dir {
        Some(path) => fs::canonicalize(&path).map_err(|source| ConfigError::WorkingDirectory {
            attempted: path,
            source,
        }),
        None => env::current_dir().map_err(|source| ConfigError::WorkingDirectory {
            attempted: PathBuf::from("."),
            source,
        }),
    }
}

fn make_absolute(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn load_layer(path: &Path, source: ConfigSource) -> Result<PartialConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.into(),
        source,
    })?;
    let raw: RawConfig = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.into(),
        source,
    })?;
    Ok(raw.into_partial(source))
}

fn defaults_layer(source: ConfigSource) -> PartialConfig {
    PartialConfig {
        max_depth: Some(Located::new(DEFAULT_MAX_DEPTH, source.clone())),
        exclude: Some(Located::new(
            DEFAULT_EXCLUDE.iter().map(|s| s.to_string()).collect(),
            source.clone(),
        )),
        extensions: Some(Located::new(
            DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            source,
        )),
    }
}

fn find_git_root(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(".git").exists() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}

#[derive(Clone, Debug, Default)]
struct PartialConfig {
    max_depth: Option<Located<u8>>,
    exclude: Option<Located<Vec<String>>>,
    extensions: Option<Located<Vec<String>>>,
}

impl PartialConfig {
    fn merge(&mut self, other: PartialConfig) {
        if other.max_depth.is_some() {
            self.max_depth = other.max_depth;
        }
        if other.exclude.is_some() {
            self.exclude = other.exclude;
        }
        if other.extensions.is_some() {
            self.extensions = other.extensions;
        }
    }

    fn finalize(self) -> Result<(TocSettings, FileSettings), ConfigValidationErrors> {
        let mut errors = Vec::new();

        let max_depth = self
            .max_depth
            .unwrap_or_else(|| Located::new(DEFAULT_MAX_DEPTH, ConfigSource::builtin()));

        if max_depth.value == 0 || max_depth.value > 7 {
            errors.push(ConfigValidationError::new(
                Some(max_depth.source.clone()),
                format!(
                    "toc.max_depth must be between 1 and 7 (received {})",
                    max_depth.value
                ),
            ));
        }

        let exclude = compile_patterns(self.exclude.unwrap_or_default(), "files.exclude", &mut errors);

        let extensions = self.extensions.unwrap_or_default();
        let mut normalized_extensions = Vec::new();
        for ext in extensions.value {
            let trimmed = ext.trim().trim_start_matches('.');
            if trimmed.is_empty() {
                errors.push(
                    ConfigValidationError::new(
                        Some(extensions.source.clone()),
                        "extensions cannot be empty".into(),
                    )
                    .with_context("files.extensions"),
                );
                continue;
            }
            normalized_extensions.push(trimmed.to_string());
        }

        if !errors.is_empty() {
            return Err(ConfigValidationErrors(errors));
        }

        Ok((
            TocSettings {
                max_depth: max_depth.value,
            },
            FileSettings {
                exclude: PatternList::new(exclude),
                extensions: normalized_extensions,
            },
        ))
    }
}

#[derive(Clone, Debug)]
struct Located<T> {
    value: T,
    source: ConfigSource,
}

impl<T> Located<T> {
    fn new(value: T, source: ConfigSource) -> Self {
        Located { value, source }
    }
}

impl Default for Located<Vec<String>> {
    fn default() -> Self {
        Located::new(Vec::new(), ConfigSource::builtin())
    }
}

fn compile_patterns(
    located: Located<Vec<String>>,
    context: &str,
    errors: &mut Vec<ConfigValidationError>,
) -> Vec<Pattern> {
    let mut patterns = Vec::new();
    for pattern in located.value {
        match Pattern::new(located.source.clone(), pattern) {
            Ok(compiled) => patterns.push(compiled),
            Err(err) => errors.push(err.with_context(context)),
        }
    }
    patterns
}

/// Container for validation failures, formatted as a bullet list.
#[derive(Debug)]
pub struct ConfigValidationErrors(pub Vec<ConfigValidationError>);

impl fmt::Display for ConfigValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, err) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "- {err}")?;
        }
        Ok(())
    }
}

/// Validation failure with optional provenance.
#[derive(Clone, Debug)]
pub struct ConfigValidationError {
    pub source: Option<ConfigSource>,
    pub message: String,
    pub context: Option<String>,
}

impl ConfigValidationError {
    fn new(source: Option<ConfigSource>, message: String) -> Self {
        ConfigValidationError {
            source,
            message,
            context: None,
        }
    }

    fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(context) = &self.context {
            write!(f, "{}: {}", context, self.message)?;
        } else {
            write!(f, "{}", self.message)?;
        }
        if let Some(source) = &self.source {
            write!(f, " ({})", source.describe())?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    toc: Option<RawToc>,
    #[serde(default)]
    files: Option<RawFiles>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawToc {
    #[serde(default)]
    max_depth: Option<u8>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFiles {
    #[serde(default)]
    exclude: Option<Vec<String>>,
    #[serde(default)]
    extensions: Option<Vec<String>>,
}

impl RawConfig {
    fn into_partial(self, source: ConfigSource) -> PartialConfig {
        let (exclude, extensions) = match self.files {
            Some(files) => (files.exclude, files.extensions),
            None => (None, None),
        };
        PartialConfig {
            max_depth: self
                .toc
                .and_then(|toc| toc.max_depth)
                .map(|value| Located::new(value, source.clone())),
            exclude: exclude.map(|value| Located::new(value, source.clone())),
            extensions: extensions.map(|value| Located::new(value, source)),
        }
    }
}
