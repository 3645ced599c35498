use core::{marker::PhantomPinned, ptr::NonNull};

use cordyceps::Linked;

use crate::{AvlTree, Links, TreeNode};

/// A word-autocomplete index backed by an [AVL tree].
///
/// The index stores words in sorted order and answers exact lookups, prefix
/// completion queries and ordered listing. It is an ordinary value: callers
/// construct one and pass it to whatever command layer drives it.
///
/// [AVL tree]: AvlTree
pub struct WordIndex {
    tree: AvlTree<WordNode>,
}

struct WordNode {
    links: Links<WordNode>,
    word: String,
    _unpin: PhantomPinned,
}

impl WordNode {
    fn new(word: String) -> Box<WordNode> {
        Box::new(WordNode {
            links: Links::new(),
            word,
            _unpin: PhantomPinned,
        })
    }
}

unsafe impl Linked<Links<WordNode>> for WordNode {
    type Handle = Box<Self>;

    fn into_ptr(r: Self::Handle) -> NonNull<Self> {
        Box::leak(r).into()
    }

    unsafe fn from_ptr(ptr: NonNull<Self>) -> Self::Handle {
        unsafe { Box::from_raw(ptr.as_ptr()) }
    }

    unsafe fn links(ptr: NonNull<Self>) -> NonNull<Links<WordNode>> {
        let ptr = ptr.as_ptr();
        NonNull::new(core::ptr::addr_of_mut!((*ptr).links)).unwrap()
    }
}

impl TreeNode<Links<WordNode>> for WordNode {
    type Key = String;

    fn key(&self) -> &Self::Key {
        &self.word
    }
}

impl WordIndex {
    /// Creates a new, empty `WordIndex`.
    pub const fn new() -> Self {
        Self {
            tree: AvlTree::new(),
        }
    }

    /// Builds an index from a collection of words.
    ///
    /// The words are sorted and inserted middle-first, so the initial tree is
    /// balanced without any rotation work.
    pub fn from_words<I>(words: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut words: Vec<String> = words.into_iter().collect();
        words.sort();

        Self {
            tree: AvlTree::from_sorted_handles(words.into_iter().map(WordNode::new)),
        }
    }

    /// Returns `true` if the index contains no words.
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the number of words in the index.
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Inserts a word into the index.
    pub fn insert(&mut self, word: impl Into<String>) {
        self.tree.insert(WordNode::new(word.into()));
    }

    /// Returns `true` if the index contains `word`.
    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.tree.contains_key(word)
    }

    /// Removes one occurrence of `word` from the index, returning it.
    pub fn remove(&mut self, word: &str) -> Option<String> {
        self.tree.remove(word).map(|node| node.word)
    }

    /// Returns the first word in sorted order.
    #[inline]
    pub fn first(&self) -> Option<&str> {
        self.tree.first().map(|node| node.get_ref().word.as_str())
    }

    /// Returns the last word in sorted order.
    #[inline]
    pub fn last(&self) -> Option<&str> {
        self.tree.last().map(|node| node.get_ref().word.as_str())
    }

    /// Returns every word starting with `prefix`, in sorted order.
    pub fn complete(&self, prefix: &str) -> Vec<&str> {
        self.tree
            .completions(prefix)
            .map(|node| node.word.as_str())
            .collect()
    }

    /// Returns an iterator over all words in sorted order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.tree.iter().map(|node| node.word.as_str())
    }

    /// Returns the maximum depth of the backing tree, or 0 when empty.
    #[inline]
    pub fn depth(&self) -> usize {
        self.tree.depth()
    }

    /// Checks the local ordering of the backing tree.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.tree.is_valid()
    }

    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        self.tree.assert_invariants();
    }
}

impl Default for WordIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<String> for WordIndex {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::from_words(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(words: &[&str]) -> WordIndex {
        let mut index = WordIndex::new();
        for word in words {
            index.insert(*word);
            index.assert_invariants();
        }
        index
    }

    #[test]
    fn contains_inserted_words() {
        let index = index_of(&["banana", "apple", "cherry"]);

        assert_eq!(index.len(), 3);
        assert!(index.contains("apple"));
        assert!(index.contains("banana"));
        assert!(index.contains("cherry"));
        assert!(!index.contains("durian"));
        assert!(!index.contains("app"));
    }

    #[test]
    fn words_are_sorted() {
        let index = index_of(&["pear", "apple", "quince", "banana", "fig"]);

        let words: Vec<&str> = index.words().collect();
        assert_eq!(words, ["apple", "banana", "fig", "pear", "quince"]);
        assert_eq!(index.first(), Some("apple"));
        assert_eq!(index.last(), Some("quince"));
    }

    #[test]
    fn complete_returns_all_matches_sorted() {
        let index = index_of(&["apple", "app", "apt", "banana"]);

        assert_eq!(index.complete("ap"), ["app", "apple", "apt"]);
        assert_eq!(index.complete("app"), ["app", "apple"]);
        assert_eq!(index.complete("banana"), ["banana"]);
        assert!(index.complete("c").is_empty());
    }

    #[test]
    fn complete_with_empty_prefix_lists_everything() {
        let index = index_of(&["cherry", "apple", "banana"]);

        assert_eq!(index.complete(""), ["apple", "banana", "cherry"]);
    }

    #[test]
    fn empty_index() {
        let index = WordIndex::new();

        assert!(index.is_empty());
        assert_eq!(index.depth(), 0);
        assert!(index.is_valid());
        assert_eq!(index.first(), None);
        assert_eq!(index.words().count(), 0);
        assert!(index.complete("a").is_empty());
    }

    #[test]
    fn remove_word() {
        let mut index = index_of(&["apple", "app", "apt", "banana"]);

        assert_eq!(index.remove("apt"), Some("apt".to_string()));
        index.assert_invariants();

        assert_eq!(index.remove("apt"), None);
        assert_eq!(index.len(), 3);
        assert_eq!(index.complete("ap"), ["app", "apple"]);
    }

    #[test]
    fn from_words_builds_balanced() {
        let words: Vec<String> = ["fig", "date", "apple", "grape", "cherry", "elder", "banana"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let index = WordIndex::from_words(words);
        index.assert_invariants();

        // Seven words fit a perfectly balanced tree of depth 3.
        assert_eq!(index.depth(), 3);
        let words: Vec<&str> = index.words().collect();
        assert_eq!(
            words,
            ["apple", "banana", "cherry", "date", "elder", "fig", "grape"]
        );
    }
}
