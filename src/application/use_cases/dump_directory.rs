use std::fs;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::domain::value_objects::exclude_pattern::{ExcludePattern, ExcludePatternError};

/// 常に除外されるパターン
pub const DEFAULT_EXCLUSIONS: [&str; 6] = [
    ".git",
    "node_modules",
    "vendor",
    "*.log",
    "composer.lock",
    "package-lock.json",
];

/// テキスト判定で読むバイト数
const TEXT_SNIFF_BYTES: usize = 8 * 1024;

const TREE_INDENT: &str = "    ";

/// DumpDirectory関連のエラー
#[derive(Debug, Error)]
pub enum DumpDirectoryError {
    #[error("Cannot dump {}: not a named directory", .0.display())]
    InvalidRoot(PathBuf),

    #[error(transparent)]
    InvalidPattern(#[from] ExcludePatternError),

    #[error("Failed to read {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory traversal failed: {0}")]
    WalkFailed(#[from] walkdir::Error),
}

/// ダンプの設定
#[derive(Debug, Clone)]
pub struct DumpOptions {
    /// 出力ファイルの拡張子
    pub extension: String,

    /// ユーザー指定の除外パターン（各要素はカンマ区切り）
    pub exclude: Vec<String>,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            extension: "md".to_string(),
            exclude: Vec::new(),
        }
    }
}

/// ダンプの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpResult {
    pub output_path: PathBuf,

    /// 本文に含めたファイル数
    pub files_included: usize,

    /// テキストでないため本文から外したファイル数
    pub files_skipped: usize,
}

/// ディレクトリ構成とファイル内容をMarkdownにまとめる
pub struct DumpDirectoryUseCase {
    root: PathBuf,
}

impl DumpDirectoryUseCase {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn root_name(&self) -> Result<String, DumpDirectoryError> {
        self.root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| DumpDirectoryError::InvalidRoot(self.root.clone()))
    }

    /// `<ディレクトリ名>.<拡張子>`
    pub fn output_file_name(&self, options: &DumpOptions) -> Result<String, DumpDirectoryError> {
        let extension = options.extension.trim_start_matches('.');
        Ok(format!("{}.{}", self.root_name()?, extension))
    }

    /// 既定値、ユーザー指定、.gitignore、出力ファイル名の順に除外パターンを集める
    pub fn exclusion_patterns(
        &self,
        options: &DumpOptions,
    ) -> Result<Vec<ExcludePattern>, DumpDirectoryError> {
        let gitignore = self.gitignore_patterns()?;
        let mut raw: Vec<(String, bool)> = DEFAULT_EXCLUSIONS
            .iter()
            .map(|p| p.to_string())
            .chain(parse_exclusions(&options.exclude))
            .map(|p| (p, false))
            .collect();
        raw.extend(gitignore.into_iter().map(|p| (p, true)));
        raw.push((self.output_file_name(options)?, false));

        debug!("Exclusion patterns: {:?}", raw.iter().map(|(p, _)| p).collect::<Vec<_>>());

        let mut patterns = Vec::with_capacity(raw.len());
        for (pattern, from_gitignore) in &raw {
            match ExcludePattern::new(pattern) {
                Ok(pattern) => patterns.push(pattern),
                // "/" alone in .gitignore trims down to nothing
                Err(ExcludePatternError::Empty) => continue,
                Err(e) if *from_gitignore => warn!("Ignoring .gitignore entry: {}", e),
                Err(e) => return Err(e.into()),
            }
        }
        Ok(patterns)
    }

    fn gitignore_patterns(&self) -> Result<Vec<String>, DumpDirectoryError> {
        let path = self.root.join(".gitignore");
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(DumpDirectoryError::ReadFailed { path, source }),
        };

        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
            .map(str::to_string)
            .collect())
    }

    /// Markdown文書を生成する（ファイルには書き込まない）
    pub fn render(&self, patterns: &[ExcludePattern]) -> Result<(String, usize, usize), DumpDirectoryError> {
        let name = self.root_name()?;
        let mut tree = String::new();
        let mut contents = String::new();
        let mut included = 0;
        let mut skipped = 0;

        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_excluded(entry, patterns));

        for entry in walker {
            let entry = entry?;
            let relative = self.relative_path(entry.path());

            tree.push_str(&TREE_INDENT.repeat(entry.depth() - 1));
            tree.push_str(&entry.file_name().to_string_lossy());
            tree.push('\n');

            if !entry.file_type().is_file() {
                continue;
            }

            match read_text_file(entry.path())? {
                Some(text) => {
                    contents.push_str(&format!(
                        "### `{}`\n```\n{}\n```\n\n",
                        display_path(&relative),
                        text
                    ));
                    included += 1;
                }
                None => {
                    debug!("Skipped non-text file: {}", relative.display());
                    skipped += 1;
                }
            }
        }

        let document = format!(
            "# Directory Structure and File Contents for `{}`\n\n## Directory Structure\n\n```\n{}```\n\n## File Contents\n\n{}",
            name, tree, contents
        );
        Ok((document, included, skipped))
    }

    pub fn execute(&self, options: &DumpOptions) -> Result<DumpResult, DumpDirectoryError> {
        let output_path = self.root.join(self.output_file_name(options)?);
        match fs::remove_file(&output_path) {
            Ok(()) => debug!("Removed previous dump {}", output_path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(source) => {
                return Err(DumpDirectoryError::WriteFailed {
                    path: output_path,
                    source,
                })
            }
        }

        let patterns = self.exclusion_patterns(options)?;
        let (document, files_included, files_skipped) = self.render(&patterns)?;

        fs::write(&output_path, document).map_err(|source| DumpDirectoryError::WriteFailed {
            path: output_path.clone(),
            source,
        })?;

        Ok(DumpResult {
            output_path,
            files_included,
            files_skipped,
        })
    }

    fn relative_path(&self, path: &Path) -> PathBuf {
        pathdiff::diff_paths(path, &self.root).unwrap_or_else(|| path.to_path_buf())
    }

    fn is_excluded(&self, entry: &DirEntry, patterns: &[ExcludePattern]) -> bool {
        let relative = self.relative_path(entry.path());
        match patterns.iter().find(|pattern| pattern.matches(&relative)) {
            Some(pattern) => {
                debug!("Excluded {} (pattern {})", relative.display(), pattern);
                true
            }
            None => false,
        }
    }
}

/// `--exclude a,b --exclude c` を個別パターンに分解
fn parse_exclusions(options: &[String]) -> Vec<String> {
    options
        .iter()
        .flat_map(|option| option.split(','))
        .map(str::trim)
        .filter(|pattern| !pattern.is_empty())
        .map(str::to_string)
        .collect()
}

/// 先頭8KiBにNULがなくUTF-8として読めるファイルだけをテキストとみなす
fn read_text_file(path: &Path) -> Result<Option<String>, DumpDirectoryError> {
    let read_failed = |source| DumpDirectoryError::ReadFailed {
        path: path.to_path_buf(),
        source,
    };

    let mut bytes = Vec::new();
    fs::File::open(path)
        .and_then(|mut file| file.read_to_end(&mut bytes))
        .map_err(read_failed)?;

    let sniff = &bytes[..bytes.len().min(TEXT_SNIFF_BYTES)];
    if sniff.contains(&0) {
        return Ok(None);
    }
    Ok(String::from_utf8(bytes).ok())
}

fn display_path(path: &Path) -> String {
    path.components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn project() -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("demo");
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("src/main.rs"), "fn main() {}").unwrap();
        fs::write(root.join("README.md"), "# Demo").unwrap();
        (temp, root)
    }

    #[test]
    fn test_parse_exclusions() {
        let parsed = parse_exclusions(&["a, b,,".to_string(), " c ".to_string()]);
        assert_eq!(parsed, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_output_file_name() {
        let use_case = DumpDirectoryUseCase::new("/work/my-app");
        let options = DumpOptions {
            extension: "txt".to_string(),
            ..Default::default()
        };
        assert_eq!(use_case.output_file_name(&options).unwrap(), "my-app.txt");
        assert_eq!(
            use_case.output_file_name(&DumpOptions::default()).unwrap(),
            "my-app.md"
        );
    }

    #[test]
    fn test_gitignore_lines_are_filtered() {
        let (_temp, root) = project();
        fs::write(root.join(".gitignore"), "# comment\n\n/target/\n!keep.log\n  dist  \n").unwrap();

        let patterns = DumpDirectoryUseCase::new(&root)
            .exclusion_patterns(&DumpOptions::default())
            .unwrap();
        let raw: Vec<&str> = patterns.iter().map(ExcludePattern::as_str).collect();
        assert_eq!(
            raw,
            vec![
                ".git",
                "node_modules",
                "vendor",
                "*.log",
                "composer.lock",
                "package-lock.json",
                "/target/",
                "dist",
                "demo.md"
            ]
        );
    }

    #[test]
    fn test_invalid_gitignore_glob_is_skipped() {
        let (_temp, root) = project();
        fs::write(root.join(".gitignore"), "[z-a]\ndist\n").unwrap();

        let use_case = DumpDirectoryUseCase::new(&root);
        let patterns = use_case.exclusion_patterns(&DumpOptions::default()).unwrap();
        let raw: Vec<&str> = patterns.iter().map(ExcludePattern::as_str).collect();
        assert!(raw.contains(&"dist"));
        assert!(!raw.contains(&"[z-a]"));

        let result = use_case.execute(&DumpOptions::default()).unwrap();
        assert_eq!(result.files_included, 3);
    }

    #[test]
    fn test_invalid_user_glob_is_an_error() {
        let (_temp, root) = project();
        let options = DumpOptions {
            exclude: vec!["[z-a]".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            DumpDirectoryUseCase::new(&root).exclusion_patterns(&options),
            Err(DumpDirectoryError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_render_document() {
        let (_temp, root) = project();
        let use_case = DumpDirectoryUseCase::new(&root);
        let patterns = use_case.exclusion_patterns(&DumpOptions::default()).unwrap();
        let (document, included, skipped) = use_case.render(&patterns).unwrap();

        assert_eq!(
            document,
            "# Directory Structure and File Contents for `demo`\n\n\
             ## Directory Structure\n\n\
             ```\nREADME.md\nsrc\n    main.rs\n```\n\n\
             ## File Contents\n\n\
             ### `README.md`\n```\n# Demo\n```\n\n\
             ### `src/main.rs`\n```\nfn main() {}\n```\n\n"
        );
        assert_eq!((included, skipped), (2, 0));
    }

    #[test]
    fn test_binary_files_are_listed_but_not_dumped() {
        let (_temp, root) = project();
        fs::write(root.join("logo.png"), [0x89, b'P', b'N', b'G', 0, 0, 1]).unwrap();
        fs::write(root.join("latin1.txt"), [0xe9, b't', b'e']).unwrap();

        let use_case = DumpDirectoryUseCase::new(&root);
        let patterns = use_case.exclusion_patterns(&DumpOptions::default()).unwrap();
        let (document, included, skipped) = use_case.render(&patterns).unwrap();

        assert!(document.contains("logo.png\n"));
        assert!(!document.contains("### `logo.png`"));
        assert!(!document.contains("### `latin1.txt`"));
        assert_eq!((included, skipped), (2, 2));
    }
}
