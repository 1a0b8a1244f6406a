//! Fragment sources of a template.
//!
//! A template is a set of fragments (one per placeholder, loop header, or file).
//! Each fragment is stored once, with its common indentation margin removed,
//! and addressed by a [`SourceId`].

use vellum_core::utils::dedent;

/// Lightweight handle to a fragment.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
pub struct SourceId(pub(crate) u32);

impl SourceId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Describes the origin of a fragment.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SourceKind {
    /// Inline fragment (CLI `-f`, tests, host applications).
    Inline,
    /// Read from stdin.
    Stdin,
    /// A file with its path.
    File(String),
}

impl SourceKind {
    /// Name shown in diagnostics.
    pub fn display_name(&self) -> &str {
        match self {
            SourceKind::Inline => "<fragment>",
            SourceKind::Stdin => "<stdin>",
            SourceKind::File(path) => path,
        }
    }
}

/// A borrowed view of a fragment.
#[derive(Clone, Debug)]
pub struct Source<'t> {
    pub id: SourceId,
    pub kind: &'t SourceKind,
    pub content: &'t str,
}

impl<'t> Source<'t> {
    pub fn as_str(&self) -> &'t str {
        self.content
    }
}

#[derive(Clone, Debug)]
struct SourceEntry {
    kind: SourceKind,
    content: String,
}

#[derive(Clone, Debug, Default)]
pub struct SourceMap {
    entries: Vec<SourceEntry>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_inline(&mut self, content: &str) -> SourceId {
        self.push_entry(SourceKind::Inline, content)
    }

    pub fn add_stdin(&mut self, content: &str) -> SourceId {
        self.push_entry(SourceKind::Stdin, content)
    }

    pub fn add_file(&mut self, path: &str, content: &str) -> SourceId {
        self.push_entry(SourceKind::File(path.to_owned()), content)
    }

    /// Single inline fragment.
    pub fn one_liner(content: &str) -> Self {
        let mut map = Self::new();
        map.add_inline(content);
        map
    }

    /// One inline source per fragment, in order.
    pub fn from_fragments<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = Self::new();
        for fragment in fragments {
            map.add_inline(fragment.as_ref());
        }
        map
    }

    pub fn try_get(&self, id: SourceId) -> Option<Source<'_>> {
        self.entries.get(id.index()).map(|entry| Source {
            id,
            kind: &entry.kind,
            content: &entry.content,
        })
    }

    /// Content of a fragment, empty for an unknown id.
    pub fn content(&self, id: SourceId) -> &str {
        self.try_get(id).map_or("", |s| s.content)
    }

    pub fn kind(&self, id: SourceId) -> Option<&SourceKind> {
        self.entries.get(id.index()).map(|e| &e.kind)
    }

    pub fn path(&self, id: SourceId) -> Option<&str> {
        match self.kind(id)? {
            SourceKind::File(path) => Some(path),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Source<'_>> {
        self.entries.iter().enumerate().map(|(idx, entry)| Source {
            id: SourceId(idx as u32),
            kind: &entry.kind,
            content: &entry.content,
        })
    }

    fn push_entry(&mut self, kind: SourceKind, content: &str) -> SourceId {
        let id = SourceId(self.entries.len() as u32);
        self.entries.push(SourceEntry {
            kind,
            content: dedent(content),
        });
        id
    }
}
