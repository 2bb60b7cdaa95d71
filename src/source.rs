//! Raw listings: retrieval, line matching and the filtered-line cache.

use crate::errors::{DatagenError, DatagenResult};
use schema::Generation;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::Split;
use tracing::{debug, info};

/// The kinds of upstream listing a generation can provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Domain {
    Moves,
    Species,
    Types,
    Items,
    Effects,
}

impl Domain {
    pub fn file_stem(self) -> &'static str {
        match self {
            Domain::Moves => "moves",
            Domain::Species => "species",
            Domain::Types => "types",
            Domain::Items => "items",
            Domain::Effects => "effects",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

/// Lazily matches the lines of one listing.
///
/// The matcher sees each raw line, the raw line before it (empty for the first
/// line) and how many records have been accepted so far. Lookback always
/// refers to the previous raw line, whether or not that line was accepted.
/// Lines are split on `'\n'` alone, so text ending in a newline yields a
/// final empty line and the last real line still serves as lookback.
/// Iteration stops after the first error.
pub struct Records<'a, F> {
    lines: Split<'a, char>,
    last: &'a str,
    accepted: usize,
    matcher: F,
    failed: bool,
}

/// Start a fresh pass over `text`. Passes share no state, so a listing can be
/// parsed any number of times.
pub fn parse_lines<'a, T, F>(text: &'a str, matcher: F) -> Records<'a, F>
where
    F: FnMut(&'a str, &'a str, usize) -> DatagenResult<Option<T>>,
{
    Records {
        lines: text.split('\n'),
        last: "",
        accepted: 0,
        matcher,
        failed: false,
    }
}

impl<'a, T, F> Iterator for Records<'a, F>
where
    F: FnMut(&'a str, &'a str, usize) -> DatagenResult<Option<T>>,
{
    type Item = DatagenResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        for line in self.lines.by_ref() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let last = std::mem::replace(&mut self.last, line);
            match (self.matcher)(line, last, self.accepted) {
                Ok(Some(record)) => {
                    self.accepted += 1;
                    return Some(Ok(record));
                }
                Ok(None) => continue,
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            }
        }
        None
    }
}

/// A record that survives a trip through the cache as one line of text.
pub trait CacheLine: Sized {
    fn to_line(&self) -> String;
    fn from_line(line: &str) -> DatagenResult<Self>;
}

/// Retrieval of raw listings.
pub trait Fetch {
    fn fetch(&self, generation: Generation, domain: Domain) -> DatagenResult<String>;
}

/// Reads listings from `<root>/gen{n}/<domain>.asm`.
#[derive(Debug, Clone)]
pub struct DirectoryFetch {
    root: PathBuf,
}

impl DirectoryFetch {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self, generation: Generation, domain: Domain) -> PathBuf {
        self.root
            .join(generation.to_string())
            .join(format!("{}.asm", domain.file_stem()))
    }
}

impl Fetch for DirectoryFetch {
    fn fetch(&self, generation: Generation, domain: Domain) -> DatagenResult<String> {
        let path = self.path(generation, domain);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(DatagenError::MissingSource(path))
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Filtered records, one per line, under `<dir>/gen{n}/<domain>.txt`.
#[derive(Debug, Clone)]
pub struct Cache {
    dir: PathBuf,
    refresh: bool,
}

impl Cache {
    /// Open the cache. A directory that did not exist yet forces a refresh.
    pub fn open(dir: impl Into<PathBuf>, force: bool) -> DatagenResult<Self> {
        let dir = dir.into();
        let created = create_dir(&dir)?;
        Ok(Self {
            dir,
            refresh: force || created,
        })
    }

    pub fn path(&self, generation: Generation, domain: Domain) -> PathBuf {
        self.dir
            .join(generation.to_string())
            .join(format!("{}.txt", domain.file_stem()))
    }

    /// Return the cached records for a listing, or fetch, match and cache them.
    pub fn get_or_update<T, F>(
        &self,
        fetch: &dyn Fetch,
        generation: Generation,
        domain: Domain,
        matcher: F,
    ) -> DatagenResult<Vec<T>>
    where
        T: CacheLine,
        F: for<'a> FnMut(&'a str, &'a str, usize) -> DatagenResult<Option<T>>,
    {
        let path = self.path(generation, domain);
        let fresh = create_dir(path.parent().unwrap_or(&self.dir))?;

        if !(self.refresh || fresh) {
            if let Some(cached) = read_cached(&path)?.filter(|text| !text.trim().is_empty()) {
                debug!(%generation, %domain, path = %path.display(), "cache hit");
                return cached
                    .lines()
                    .filter(|line| !line.is_empty())
                    .map(|line| T::from_line(line.trim_end()))
                    .collect();
            }
        }

        let text = fetch.fetch(generation, domain)?;
        let records = parse_lines(&text, matcher).collect::<DatagenResult<Vec<T>>>()?;

        let mut contents = String::new();
        for record in &records {
            contents.push_str(&record.to_line());
            contents.push('\n');
        }
        fs::write(&path, contents)?;
        info!(%generation, %domain, records = records.len(), "refreshed listing");
        Ok(records)
    }
}

fn read_cached(path: &Path) -> DatagenResult<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Create `dir` (and its parents), reporting whether it was newly created.
pub fn create_dir(dir: &Path) -> DatagenResult<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(dir)?;
    Ok(true)
}
