//! Rendering generated source and persisting artifacts.

use crate::errors::{DatagenError, DatagenResult};
use crate::source::{create_dir, Domain};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const HEADER: &str =
    "//! Code generated by `pokemon-datagen` - manual edits will be overwritten.";

const INDENT: &str = "    ";

/// An indentation-aware line buffer.
#[derive(Debug, Default)]
pub struct CodeWriter {
    buf: String,
    indent: usize,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one line at the current indentation. Empty lines carry no indentation.
    pub fn line(&mut self, line: impl AsRef<str>) -> &mut Self {
        let line = line.as_ref();
        if !line.is_empty() {
            for _ in 0..self.indent {
                self.buf.push_str(INDENT);
            }
            self.buf.push_str(line);
        }
        self.buf.push('\n');
        self
    }

    pub fn lines<S: AsRef<str>>(&mut self, lines: &[S]) -> &mut Self {
        for line in lines {
            self.line(line);
        }
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.line("")
    }

    /// Write `///` doc lines.
    pub fn doc(&mut self, text: &str) -> &mut Self {
        for line in text.lines() {
            self.line(format!("/// {line}"));
        }
        self
    }

    pub fn indent(&mut self) -> &mut Self {
        self.indent += 1;
        self
    }

    pub fn dedent(&mut self) -> &mut Self {
        self.indent = self.indent.saturating_sub(1);
        self
    }

    /// Write `open`, the indented body, then `close`.
    pub fn block(&mut self, open: &str, close: &str, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.line(open);
        self.indent();
        body(self);
        self.dedent();
        self.line(close)
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

/// Start a generated file with the standard header and a module doc line.
pub fn generated_file(summary: &str) -> CodeWriter {
    let mut w = CodeWriter::new();
    w.line(HEADER);
    w.line("//!");
    w.line(format!("//! {summary}"));
    w.blank();
    w
}

/// Render a `name -> identifier` `phf` map over `entries`.
///
/// Keys must be unique; a duplicate is reported rather than handed to the
/// map builder.
pub fn lookup_map(
    domain: Domain,
    map_name: &str,
    value_type: &str,
    entries: &[(String, String)],
) -> DatagenResult<String> {
    let mut seen = BTreeSet::new();
    for (key, _) in entries {
        if !seen.insert(key.as_str()) {
            return Err(DatagenError::DuplicateName {
                domain,
                name: key.clone(),
            });
        }
    }

    let mut map = phf_codegen::Map::<&str>::new();
    for (key, value) in entries {
        map.entry(key.as_str(), value);
    }

    let mut out = String::from("/// Lookup by id (lowercase letters and digits only).\n");
    out.push_str(&format!(
        "pub static {map_name}: phf::Map<&'static str, {value_type}> = {};\n",
        map.build()
    ));
    Ok(out)
}

/// A generated file, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Write every artifact under `out`.
pub fn write_all(out: &Path, artifacts: &[Artifact]) -> DatagenResult<()> {
    for artifact in artifacts {
        let path = out.join(&artifact.path);
        if let Some(parent) = path.parent() {
            create_dir(parent)?;
        }
        fs::write(&path, &artifact.contents)?;
        info!(path = %path.display(), bytes = artifact.contents.len(), "wrote artifact");
    }
    Ok(())
}
