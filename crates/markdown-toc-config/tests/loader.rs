use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use markdown_toc_config::{Config, ConfigError, ConfigSourceKind, LoadOptions, Pattern};
use tempfile::TempDir;

fn write_file(path: impl AsRef<Path>, contents: &str) {
    let mut file = fs::File::create(path).expect("create config");
    file.write_all(contents.as_bytes()).expect("write config");
}

fn canonical(path: impl AsRef<Path>) -> PathBuf {
    fs::canonicalize(path).expect("canonicalize path")
}

fn pattern_strings<'a, I>(patterns: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Pattern>,
{
    patterns
        .into_iter()
        .map(|p| p.original().to_string())
        .collect()
}

#[test]
fn loads_defaults_when_no_files_present() {
    let temp = TempDir::new().expect("tempdir");
    let working_dir = canonical(temp.path());

    let config = Config::load(LoadOptions::default().with_working_dir(working_dir.clone()))
        .expect("load defaults");

    assert_eq!(config.toc.max_depth, 6);
    assert_eq!(
        pattern_strings(config.files.exclude.iter()),
        vec!["**/node_modules/**".to_string()]
    );
    assert_eq!(config.files.extensions, vec!["md", "markdown"]);
    assert_eq!(config.sources.working_directory, working_dir);
    assert_eq!(config.sources.layers.len(), 1);
    assert_eq!(config.sources.layers[0].kind, ConfigSourceKind::Default);
}

#[test]
fn applies_precedence_and_merges_fields() {
    let temp = TempDir::new().expect("tempdir");
    let git_root = canonical(temp.path());
    fs::create_dir(git_root.join(".git")).expect("create .git");

    write_file(
        git_root.join(".markdown-toc.toml"),
        r#"
        [toc]
        max_depth = 4

        [files]
        exclude = ["**/vendor/**"]
        "#,
    );

    let nested = git_root.join("docs");
    fs::create_dir(&nested).expect("create docs");
    write_file(
        nested.join(".markdown-toc.toml"),
        r#"
        [toc]
        max_depth = 3
        "#,
    );

    let config =
        Config::load(LoadOptions::default().with_working_dir(&nested)).expect("load layered");

    assert_eq!(config.toc.max_depth, 3);
    assert_eq!(
        pattern_strings(config.files.exclude.iter()),
        vec!["**/vendor/**".to_string()]
    );
    let kinds: Vec<_> = config.sources.layers.iter().map(|l| l.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ConfigSourceKind::Default,
            ConfigSourceKind::GitRoot,
            ConfigSourceKind::Local
        ]
    );
}

#[test]
fn override_path_wins_over_local_config() {
    let temp = TempDir::new().expect("tempdir");
    let root = canonical(temp.path());

    write_file(root.join(".markdown-toc.toml"), "[toc]\nmax_depth = 3\n");
    write_file(root.join("custom.toml"), "[toc]\nmax_depth = 5\n");

    let config = Config::load(
        LoadOptions::default()
            .with_working_dir(&root)
            .with_override_path("custom.toml"),
    )
    .expect("load override");

    assert_eq!(config.toc.max_depth, 5);
    assert_eq!(
        config.sources.layers.last().map(|l| l.kind),
        Some(ConfigSourceKind::Override)
    );
}

#[test]
fn missing_override_is_reported() {
    let temp = TempDir::new().expect("tempdir");
    let err = Config::load(
        LoadOptions::default()
            .with_working_dir(temp.path())
            .with_override_path("absent.toml"),
    )
    .expect_err("override must exist");

    assert!(matches!(err, ConfigError::OverrideNotFound { .. }));
}

#[test]
fn collects_validation_errors() {
    let temp = TempDir::new().expect("tempdir");
    let root = canonical(temp.path());
    write_file(
        root.join(".markdown-toc.toml"),
        r#"
        [toc]
        max_depth = 9

        [files]
        exclude = ["[unterminated"]
        extensions = [""]
        "#,
    );

    let err = Config::load(LoadOptions::default().with_working_dir(&root))
        .expect_err("invalid config");

    match err {
        ConfigError::Validation(errors) => {
            assert_eq!(errors.0.len(), 3);
            let rendered = errors.to_string();
            assert!(rendered.contains("toc.max_depth must be between 1 and 7 (received 9)"));
            assert!(rendered.contains("files.exclude: invalid glob pattern"));
            assert!(rendered.contains("files.extensions: extensions cannot be empty"));
            assert!(rendered.contains("local config at"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn rejects_unknown_keys() {
    let temp = TempDir::new().expect("tempdir");
    let root = canonical(temp.path());
    write_file(root.join(".markdown-toc.toml"), "[toc]\nstyle = \"star\"\n");

    let err = Config::load(LoadOptions::default().with_working_dir(&root))
        .expect_err("unknown key");
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn file_settings_filter_paths() {
    let temp = TempDir::new().expect("tempdir");
    let config = Config::load(LoadOptions::default().with_working_dir(canonical(temp.path())))
        .expect("load defaults");

    assert!(config
        .files
        .is_excluded(Path::new("project/node_modules/pkg/README.md")));
    assert!(!config.files.is_excluded(Path::new("docs/README.md")));
    assert!(config.files.is_markdown(Path::new("docs/guide.MD")));
    assert!(config.files.is_markdown(Path::new("notes.markdown")));
    assert!(!config.files.is_markdown(Path::new("notes.txt")));
}
