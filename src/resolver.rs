//! Multi-file import resolution.
//!
//! The parser itself only ever sees one file at a time; this module is the
//! depth-first walk across `import` statements that the public
//! [`parse_files`] entry point exposes. It is a thin collaborator around
//! [`crate::parse_source`], not part of the grammar/table/driver core.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::ast;
use crate::error::ParseError;
use crate::parse_source;

/// The result of resolving an entrypoint set: every file reached, keyed by
/// its canonicalized absolute path.
#[derive(Debug, Clone)]
pub struct ParsedFiles {
    pub files: HashMap<PathBuf, ast::File>,
}

/// Parses `entrypoints` and everything they (transitively) import.
///
/// Each `import "p";` is searched against `import_paths`, in order, then
/// alongside the file doing the importing. A file already reached by an
/// earlier import is not re-parsed.
pub fn parse_files<P: AsRef<Path>, Q: AsRef<Path>>(
    entrypoints: &[P],
    import_paths: &[Q],
) -> Result<ParsedFiles, ParseError> {
    let mut files = HashMap::new();
    for entry in entrypoints {
        parse_one(entry.as_ref(), import_paths, &mut files)?;
    }
    Ok(ParsedFiles { files })
}

fn parse_one<Q: AsRef<Path>>(
    path: &Path,
    import_paths: &[Q],
    files: &mut HashMap<PathBuf, ast::File>,
) -> Result<(), ParseError> {
    let canonical = canonical_path(path);
    if files.contains_key(&canonical) {
        return Ok(());
    }
    let text = fs::read_to_string(path).map_err(|e| io_error(path, &e))?;
    let file_label = path.to_string_lossy().into_owned();
    let file_ast = parse_source(&text, &file_label)?;
    let dir = path.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
    let imports = file_ast.imports.clone();
    files.insert(canonical, file_ast);
    for import in &imports {
        let resolved = resolve_import(&import.path, &dir, import_paths)
            .ok_or_else(|| import_not_found(import))?;
        parse_one(&resolved, import_paths, files)?;
    }
    Ok(())
}

fn resolve_import<Q: AsRef<Path>>(
    import_path: &str,
    importing_dir: &Path,
    import_paths: &[Q],
) -> Option<PathBuf> {
    for base in import_paths {
        let candidate = base.as_ref().join(import_path);
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    let alongside = importing_dir.join(import_path);
    if alongside.is_file() {
        return Some(alongside);
    }
    None
}

fn canonical_path(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn import_not_found(import: &ast::Import) -> ParseError {
    ParseError::new(import.span.clone(), format!("import not found: {}", import.path))
}

fn io_error(path: &Path, err: &std::io::Error) -> ParseError {
    let span = ast::Span::new(path.to_string_lossy().into_owned(), 0, 0, 1, 1);
    ParseError::new(span, format!("could not read {}: {}", path.display(), err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn resolves_sibling_import() {
        let dir = std::env::temp_dir().join("protolalr_resolver_test_ok");
        fs::create_dir_all(&dir).unwrap();
        write_file(&dir, "dep.proto", r#"syntax = "proto3"; message Dep {}"#);
        let root = write_file(
            &dir,
            "root.proto",
            r#"syntax = "proto3"; import "dep.proto"; message Root {}"#,
        );
        let empty: [&str; 0] = [];
        let parsed = parse_files(&[root], &empty).unwrap();
        assert_eq!(parsed.files.len(), 2);
    }

    #[test]
    fn missing_import_is_reported() {
        let dir = std::env::temp_dir().join("protolalr_resolver_test_missing");
        fs::create_dir_all(&dir).unwrap();
        let root = write_file(
            &dir,
            "root.proto",
            r#"syntax = "proto3"; import "missing.proto"; message Root {}"#,
        );
        let empty: [&str; 0] = [];
        let err = parse_files(&[root], &empty).unwrap_err();
        assert!(err.message.contains("import not found"));
    }
}
