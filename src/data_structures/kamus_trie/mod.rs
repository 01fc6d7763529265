// Copyright (c) 2025 Kamus Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Kamus Trie Implementation
//!
//! A prefix tree that maps words to their meanings, with exact lookup,
//! prefix queries, deletion that prunes dead branches, ordered enumeration
//! and persistence to a two-field CSV file.
//!
//! # Example
//!
//! ```
//! use kamus_lib::data_structures::kamus_trie::{KamusTrie, Lookup};
//!
//! let mut trie = KamusTrie::new();
//! trie.insert("cat", "a small domesticated feline");
//! trie.insert("car", "a road vehicle");
//! trie.insert("care", "close attention");
//!
//! assert!(trie.starts_with("ca"));
//! assert_eq!(trie.search("ca"), None);
//! assert_eq!(trie.lookup("ca"), Lookup::Prefix);
//!
//! trie.delete("car");
//! assert_eq!(trie.search("car"), None);
//! assert!(trie.starts_with("car"));
//! assert_eq!(trie.search("care"), Some("close attention"));
//! ```

pub mod codec;
mod error;
mod node;

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

pub use error::{KamusTrieError, KamusTrieResult};
use codec::RecordWriter;
use node::TrieNode;

/// Outcome of walking the path of a word.
///
/// [`KamusTrie::search`] collapses the first two variants into `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// Some character of the word has no transition.
    Absent,
    /// The path exists but no word ends there.
    Prefix,
    /// The word is stored with this meaning.
    Word(&'a str),
}

impl<'a> Lookup<'a> {
    /// The meaning, if the word is stored.
    pub fn meaning(self) -> Option<&'a str> {
        match self {
            Lookup::Word(meaning) => Some(meaning),
            Lookup::Absent | Lookup::Prefix => None,
        }
    }
}

/// Kamus Trie is a word→meaning dictionary backed by a prefix tree.
///
/// Key features:
/// * Children ordered by code point, so enumeration is lexicographic
/// * Deletion removes every node that is no longer part of a stored word
/// * Lazy, restartable enumeration of all words or of a prefix subtree
/// * Save/load to a `word,meaning` CSV file
/// * No recursion along a word, so words of any length are safe
#[derive(Clone, Default, PartialEq, Eq)]
pub struct KamusTrie {
    /// The root node of the trie, representing the empty prefix
    root: TrieNode,
}

impl KamusTrie {
    /// Creates a new empty `KamusTrie`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a word and its meaning.
    ///
    /// Missing nodes along the path are created. Inserting a word that is
    /// already stored overwrites its meaning. The empty word is stored on the
    /// root.
    ///
    /// # Returns
    ///
    /// The previous meaning of `word`, if it was already stored.
    pub fn insert<K, V>(&mut self, word: K, meaning: V) -> Option<String>
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let node = word
            .as_ref()
            .chars()
            .fold(&mut self.root, |node, c| node.children.entry(c).or_default());
        node.meaning.replace(meaning.into())
    }

    /// Looks up the meaning of a word.
    ///
    /// Returns `None` both when the path does not exist and when the word is
    /// only a prefix of stored words; use [`lookup`](Self::lookup) to tell
    /// those apart.
    pub fn search<K: AsRef<str>>(&self, word: K) -> Option<&str> {
        self.lookup(word).meaning()
    }

    /// Walks the path of `word` and reports how far it got.
    pub fn lookup<K: AsRef<str>>(&self, word: K) -> Lookup<'_> {
        match self.find_node(word.as_ref()) {
            None => Lookup::Absent,
            Some(node) => node.meaning().map_or(Lookup::Prefix, Lookup::Word),
        }
    }

    /// Checks whether some path in the trie spells `prefix`.
    ///
    /// The empty prefix always matches.
    pub fn starts_with<P: AsRef<str>>(&self, prefix: P) -> bool {
        self.find_node(prefix.as_ref()).is_some()
    }

    /// Removes a word.
    ///
    /// Does nothing if the word is not stored, including when it is only a
    /// prefix of stored words. Nodes left without children and without a
    /// word of their own are detached, bottom-up, until an ancestor is still
    /// needed. The root is never removed.
    ///
    /// # Returns
    ///
    /// The meaning of the removed word.
    pub fn delete<K: AsRef<str>>(&mut self, word: K) -> Option<String> {
        let chars: Vec<char> = word.as_ref().chars().collect();
        self.root.remove_path(&chars)
    }

    /// Enumerates every stored `(word, meaning)` pair in lexicographic order.
    ///
    /// A word is yielded before any longer word it is a prefix of. The
    /// iterator borrows the trie and can be recreated at any time.
    pub fn display_all_words(&self) -> Words<'_> {
        Words::new(String::new(), &self.root)
    }

    /// Enumerates the stored words that start with `prefix`, in order.
    ///
    /// Yields nothing if no path spells `prefix`.
    pub fn words_with_prefix<P: AsRef<str>>(&self, prefix: P) -> Words<'_> {
        let prefix = prefix.as_ref();
        match self.find_node(prefix) {
            Some(node) => Words::new(prefix.to_string(), node),
            None => Words::empty(),
        }
    }

    /// Alias of [`display_all_words`](Self::display_all_words).
    pub fn iter(&self) -> Words<'_> {
        self.display_all_words()
    }

    /// Returns the number of stored words.
    ///
    /// This requires traversing the entire trie, so it's an O(n) operation.
    pub fn len(&self) -> usize {
        self.root.count_words()
    }

    /// Checks if the trie stores no words.
    pub fn is_empty(&self) -> bool {
        self.root.is_prunable()
    }

    /// Returns the number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.root.count_nodes()
    }

    /// Removes every word.
    pub fn clear(&mut self) {
        self.root = TrieNode::new();
    }

    /// Writes every stored word as a `word,meaning` record.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - The number of records written.
    /// * `Err(KamusTrieError)` - If writing failed.
    pub fn save_to_writer<W: Write>(&self, writer: W) -> KamusTrieResult<usize> {
        let mut records = RecordWriter::new(writer);
        for (word, meaning) in self.display_all_words() {
            records.write_record(&word, meaning)?;
        }
        Ok(records.finish()?)
    }

    /// Saves the trie to a CSV file, replacing any existing file.
    ///
    /// # Arguments
    ///
    /// * `path` - Destination of the dictionary file.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - The number of records written.
    /// * `Err(KamusTrieError)` - If the file could not be created or written.
    pub fn save_to_csv<P: AsRef<Path>>(&self, path: P) -> KamusTrieResult<usize> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| KamusTrieError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let written = self.save_to_writer(BufWriter::new(file))?;
        tracing::info!(path = %path.display(), records = written, "Dictionary saved");
        Ok(written)
    }

    /// Reads `word,meaning` records and inserts each one.
    ///
    /// The whole input is decoded before anything is inserted, so a malformed
    /// record leaves the trie unchanged. Records with the same word overwrite
    /// each other in order.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - The number of records inserted.
    /// * `Err(KamusTrieError)` - If reading failed or a record is malformed.
    pub fn load_from_reader<R: Read>(&mut self, mut reader: R) -> KamusTrieResult<usize> {
        let mut input = Vec::new();
        reader.read_to_end(&mut input)?;

        let records = codec::decode_records(&input)?;
        let count = records.len();
        self.extend(records);
        Ok(count)
    }

    /// Loads records from a CSV file into this trie.
    ///
    /// A missing file is not an error: the trie is left as it is.
    ///
    /// # Arguments
    ///
    /// * `path` - Location of the dictionary file.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - The number of records inserted, `0` for a missing file.
    /// * `Err(KamusTrieError)` - If the file could not be read or decoded.
    pub fn load_from_csv<P: AsRef<Path>>(&mut self, path: P) -> KamusTrieResult<usize> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    path = %path.display(),
                    "Dictionary file not found, starting with the current contents"
                );
                return Ok(0);
            }
            Err(source) => {
                return Err(KamusTrieError::Open {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let loaded = self.load_from_reader(file)?;
        tracing::info!(path = %path.display(), records = loaded, "Dictionary loaded");
        Ok(loaded)
    }

    fn find_node(&self, key: &str) -> Option<&TrieNode> {
        key.chars().try_fold(&self.root, |node, c| node.child(c))
    }
}

impl fmt::Debug for KamusTrie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.display_all_words()).finish()
    }
}

impl<K, V> Extend<(K, V)> for KamusTrie
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (word, meaning) in iter {
            self.insert(word, meaning);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for KamusTrie
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut trie = Self::new();
        trie.extend(iter);
        trie
    }
}

impl<'a> IntoIterator for &'a KamusTrie {
    type Item = (String, &'a str);
    type IntoIter = Words<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.display_all_words()
    }
}

/// Ordered, depth-first iterator over stored words.
///
/// Created by [`KamusTrie::display_all_words`] and
/// [`KamusTrie::words_with_prefix`].
#[derive(Debug, Clone)]
pub struct Words<'a> {
    /// The word spelled up to the node visited last
    word: String,
    /// Nodes still to visit, each with the length `word` must be cut back to
    /// and the character leading into the node
    stack: Vec<(usize, Option<char>, &'a TrieNode)>,
}

impl<'a> Words<'a> {
    fn new(prefix: String, node: &'a TrieNode) -> Self {
        Self {
            stack: vec![(prefix.len(), None, node)],
            word: prefix,
        }
    }

    fn empty() -> Self {
        Self {
            word: String::new(),
            stack: Vec::new(),
        }
    }
}

impl<'a> Iterator for Words<'a> {
    type Item = (String, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((len, edge, node)) = self.stack.pop() {
            self.word.truncate(len);
            if let Some(c) = edge {
                self.word.push(c);
            }
            let len = self.word.len();
            // Reversed so the smallest character is popped first.
            for (&c, child) in node.children.iter().rev() {
                self.stack.push((len, Some(c), child));
            }
            if let Some(meaning) = node.meaning() {
                return Some((self.word.clone(), meaning));
            }
        }
        None
    }
}

impl std::iter::FusedIterator for Words<'_> {}
