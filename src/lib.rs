//! An intrusive AVL tree backing a word-autocomplete index.

// Conventions used in comments:
// - h(x) is the cached height of the subtree rooted at `x`; h(missing) = 0.
// - The balance factor of `x` is h(left(x)) - h(right(x)).
//
// The fundamental invariants are:
// 1. Keys in a node's left subtree are <= the node's key; keys in its right
//    subtree are greater. Equal keys are placed leftward on insertion, but
//    removal may re-seat an equal key to the right of an equal parent (see
//    `swap_links`).
// 2. Every balance factor is -1, 0 or 1.
// 3. h(x) = 1 + max(h(left(x)), h(right(x))) after every mutation.
// 4. `p.left == c` or `p.right == c` if and only if `c.parent == p`. The
//    root's parent link is empty.

use core::{
    cell::UnsafeCell, cmp::Ordering, fmt, marker::PhantomPinned, mem, ops::Not, pin::Pin,
    ptr::NonNull,
};
use std::borrow::Borrow;

use cordyceps::Linked;

mod debug;
mod iter;
#[cfg(any(test, feature = "model"))]
pub mod model;
mod words;

pub use iter::{Iter, PrefixIter};
pub use words::WordIndex;

pub trait TreeNode<L>: Linked<L> {
    type Key: Ord;

    fn key(&self) -> &Self::Key;
}

/// An intrusive AVL tree.
///
/// Nodes embed their links (parent, children, cached subtree height) via
/// [`Links`]; the tree owns every reachable node through the handles produced
/// by [`Linked::into_ptr`]. Equal keys are permitted and bias leftward.
pub struct AvlTree<T>
where
    T: TreeNode<Links<T>> + ?Sized,
{
    root: Link<T>,
    len: usize,
}

pub struct Links<T: ?Sized> {
    inner: UnsafeCell<LinksInner<T>>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Dir {
    Left = 0,
    Right = 1,
}

impl Not for Dir {
    type Output = Dir;

    fn not(self) -> Self::Output {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

#[repr(C)]
struct LinksInner<T: ?Sized> {
    parent: Link<T>,
    children: [Link<T>; 2],
    height: usize,
    _unpin: PhantomPinned,
}

type Link<T> = Option<NonNull<T>>;

impl<T> AvlTree<T>
where
    T: TreeNode<Links<T>> + ?Sized,
{
    /// Returns a new empty tree.
    pub const fn new() -> AvlTree<T> {
        AvlTree { root: None, len: 0 }
    }

    /// Returns `true` if the tree contains no elements.
    pub const fn is_empty(&self) -> bool {
        let empty = self.len() == 0;

        if cfg!(debug_assertions) {
            // Can't use assert_eq!() in const fn.
            assert!(empty == self.root.is_none());
        }

        empty
    }

    /// Returns the number of elements in the tree.
    pub const fn len(&self) -> usize {
        self.len
    }

    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        if let Some(root) = self.root {
            unsafe {
                assert_eq!(T::links(root).as_ref().parent(), None);
                self.assert_invariants_at(root);
            }
        }
    }

    // Returns the true height of the subtree rooted at `node`, checking the
    // cached height, the balance factor, parent/child link consistency and
    // local key ordering along the way.
    unsafe fn assert_invariants_at(&self, node: NonNull<T>) -> usize {
        unsafe {
            let mut child_heights = [0usize; 2];

            for dir in [Dir::Left, Dir::Right] {
                if let Some(child) = T::links(node).as_ref().child(dir) {
                    let parent = T::links(child)
                        .as_ref()
                        .parent()
                        .expect("child parent pointer not set");
                    assert_eq!(parent, node);

                    // Removal can re-seat equal keys on either side, so both
                    // ordering checks are non-strict.
                    match dir {
                        Dir::Left => assert!(child.as_ref().key() <= node.as_ref().key()),
                        Dir::Right => assert!(node.as_ref().key() <= child.as_ref().key()),
                    }

                    child_heights[dir as usize] = self.assert_invariants_at(child);
                }
            }

            let [left, right] = child_heights;
            assert_eq!(T::links(node).as_ref().height(), 1 + left.max(right));
            assert!(left.abs_diff(right) <= 1);

            1 + left.max(right)
        }
    }

    /// Returns a reference to the node corresponding to `key`.
    ///
    /// The descent mirrors insertion: equal keys branch leftward, so any
    /// node placed by [`insert`](AvlTree::insert) is reachable.
    pub fn get<Q>(&self, key: &Q) -> Option<Pin<&T>>
    where
        T::Key: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        let ptr = self.get_raw(key)?;
        unsafe { Some(Pin::new_unchecked(ptr.as_ref())) }
    }

    /// Returns `true` if the tree contains a node with `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        T::Key: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        self.get_raw(key).is_some()
    }

    pub(crate) fn get_raw<Q>(&self, key: &Q) -> Link<T>
    where
        T::Key: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        let mut opt_cur = self.root;

        loop {
            let cur = opt_cur?;

            unsafe {
                match key.cmp(cur.as_ref().key().borrow()) {
                    Ordering::Less => opt_cur = T::links(cur).as_ref().left(),
                    Ordering::Equal => return Some(cur),
                    Ordering::Greater => opt_cur = T::links(cur).as_ref().right(),
                }
            }
        }
    }

    /// Returns the minimum element of the tree.
    pub fn first(&self) -> Option<Pin<&T>> {
        let root = self.root?;
        let first = self.min_in_subtree(root);
        unsafe { Some(Pin::new_unchecked(first.as_ref())) }
    }

    /// Returns the maximum element of the tree.
    pub fn last(&self) -> Option<Pin<&T>> {
        let root = self.root?;
        let last = self.max_in_subtree(root);
        unsafe { Some(Pin::new_unchecked(last.as_ref())) }
    }

    /// Removes and returns the minimum element of the tree.
    pub fn pop_first(&mut self) -> Option<T::Handle> {
        let root = self.root?;
        let first = self.min_in_subtree(root);
        Some(unsafe { self.remove_at(first) })
    }

    /// Removes and returns the maximum element of the tree.
    pub fn pop_last(&mut self) -> Option<T::Handle> {
        let root = self.root?;
        let last = self.max_in_subtree(root);
        Some(unsafe { self.remove_at(last) })
    }

    /// Returns the node with the greatest key that is `<= limit`.
    pub fn floor<Q>(&self, limit: &Q) -> Option<Pin<&T>>
    where
        T::Key: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        let ptr = self.floor_raw(limit)?;
        unsafe { Some(Pin::new_unchecked(ptr.as_ref())) }
    }

    /// Returns the node with the least key that is `>= limit`.
    pub fn ceiling<Q>(&self, limit: &Q) -> Option<Pin<&T>>
    where
        T::Key: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        let ptr = self.ceiling_raw(limit)?;
        unsafe { Some(Pin::new_unchecked(ptr.as_ref())) }
    }

    // Descends tracking the best candidate seen so far: a node satisfying
    // the bound is recorded and the descent continues toward the side that
    // can still improve on it.
    fn floor_raw<Q>(&self, limit: &Q) -> Link<T>
    where
        T::Key: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        let mut best = None;
        let mut cur = self.root;

        while let Some(node) = cur {
            unsafe {
                if node.as_ref().key().borrow() <= limit {
                    best = Some(node);
                    cur = T::links(node).as_ref().right();
                } else {
                    cur = T::links(node).as_ref().left();
                }
            }
        }

        best
    }

    fn ceiling_raw<Q>(&self, limit: &Q) -> Link<T>
    where
        T::Key: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        let mut best = None;
        let mut cur = self.root;

        while let Some(node) = cur {
            unsafe {
                if node.as_ref().key().borrow() >= limit {
                    best = Some(node);
                    cur = T::links(node).as_ref().left();
                } else {
                    cur = T::links(node).as_ref().right();
                }
            }
        }

        best
    }

    /// Inserts an item into the tree.
    ///
    /// Duplicate keys are permitted; a key equal to an existing key descends
    /// into the existing node's left subtree.
    ///
    /// This operation completes in _O(log(n))_ time.
    pub fn insert(&mut self, item: T::Handle) {
        let ptr = T::into_ptr(item);

        unsafe {
            let links = T::links(ptr).as_mut();
            links.set_parent(None);
            links.set_left(None);
            links.set_right(None);
            links.set_height(1);
        }

        let Some(root) = self.root else {
            self.root = Some(ptr);
            self.len += 1;
            return;
        };

        // Descend to a free slot: left on <=, right otherwise.
        let mut cur = root;
        loop {
            let dir = match unsafe { ptr.as_ref().key().cmp(cur.as_ref().key()) } {
                Ordering::Greater => Dir::Right,
                _ => Dir::Left,
            };

            unsafe {
                match T::links(cur).as_ref().child(dir) {
                    Some(child) => cur = child,
                    None => {
                        T::links(cur).as_mut().set_child(dir, Some(ptr));
                        T::links(ptr).as_mut().set_parent(Some(cur));
                        break;
                    }
                }
            }
        }

        self.len += 1;
        self.rebalance_from(Some(ptr));
    }

    /// Removes the node associated with `key`, if any, and returns its
    /// handle.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<T::Handle>
    where
        T::Key: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        let node = self.get_raw(key)?;
        Some(unsafe { self.remove_at(node) })
    }

    /// Removes `node` from the tree, returning its handle.
    ///
    /// The node exchanges link sets with its in-order predecessor (or its
    /// successor when it has no left subtree) until it occupies a leaf
    /// position, then is detached. The rebalancing walk starts at the
    /// detached node's former parent.
    ///
    /// # Safety
    ///
    /// The caller must ensure that `node` is an element of `self`, and not
    /// any other tree.
    pub unsafe fn remove_at(&mut self, node: NonNull<T>) -> T::Handle {
        unsafe {
            loop {
                let left = T::links(node).as_ref().left();
                let right = T::links(node).as_ref().right();

                let neighbor = match (left, right) {
                    (Some(left), _) => Some(self.max_in_subtree(left)),
                    (None, Some(right)) => Some(self.min_in_subtree(right)),
                    (None, None) => None,
                };

                match neighbor {
                    Some(neighbor) => self.swap_links(node, neighbor),
                    None => {
                        let parent = T::links(node).as_ref().parent();
                        self.replace_child_or_set_root(parent, node, None);

                        let links = T::links(node).as_mut();
                        links.set_parent(None);
                        links.set_height(1);

                        self.len -= 1;
                        self.rebalance_from(parent);

                        return T::from_ptr(node);
                    }
                }
            }
        }
    }

    /// Builds a balanced tree from handles pre-sorted by key.
    pub fn from_sorted_handles<I>(handles: I) -> Self
    where
        I: IntoIterator<Item = T::Handle>,
    {
        let mut tree = Self::new();
        tree.insert_balanced(handles.into_iter().collect());
        tree
    }

    // Divide and conquer: insert the middle element, then build each half
    // the same way.
    fn insert_balanced(&mut self, handles: Vec<T::Handle>) {
        if handles.is_empty() {
            return;
        }

        let mut left = handles;
        let mut right = left.split_off((left.len() - 1) / 2);
        let middle = right.remove(0);

        self.insert(middle);
        self.insert_balanced(left);
        self.insert_balanced(right);
    }

    /// Returns an in-order iterator over the tree's elements.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Returns the maximum depth of the tree in nodes, or 0 for an empty
    /// tree.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;

        let mut stack = Vec::new();
        if let Some(root) = self.root {
            stack.push((root, 1));
        }

        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);

            unsafe {
                if let Some(left) = T::links(node).as_ref().left() {
                    stack.push((left, depth + 1));
                }
                if let Some(right) = T::links(node).as_ref().right() {
                    stack.push((right, depth + 1));
                }
            }
        }

        max_depth
    }

    /// Checks that each node's immediate children are ordered with respect
    /// to it: left key <= node key <= right key.
    ///
    /// The check is local; grandchildren are not compared against their
    /// grandparents.
    pub fn is_valid(&self) -> bool {
        let mut valid = true;

        let mut stack = Vec::new();
        if let Some(root) = self.root {
            stack.push(root);
        }

        while let Some(node) = stack.pop() {
            unsafe {
                let key = node.as_ref().key();

                if let Some(left) = T::links(node).as_ref().left() {
                    valid &= left.as_ref().key() <= key;
                    stack.push(left);
                }
                if let Some(right) = T::links(node).as_ref().right() {
                    valid &= key <= right.as_ref().key();
                    stack.push(right);
                }
            }
        }

        valid
    }

    /// Clears the tree, removing all elements.
    pub fn clear(&mut self) {
        let mut opt_cur = self.root;

        while let Some(cur) = opt_cur {
            unsafe {
                // Descend to the minimum node and elevate its right child
                // (which may be absent). No rebalancing: every node is on
                // its way out.
                let cur = self.min_in_subtree(cur);
                let parent = T::links(cur).as_ref().parent();
                let right = T::links(cur).as_ref().right();

                self.replace_child_or_set_root(parent, cur, right);
                self.maybe_set_parent(right, parent);

                drop(T::from_ptr(cur));
                self.len -= 1;

                // If the node had no right child, climb to the parent. If it
                // had no parent either, the tree is empty.
                opt_cur = right.or(parent);
            }
        }

        debug_assert!(self.root.is_none());
        debug_assert_eq!(self.len(), 0);
    }

    // Link surgery ===========================================================

    fn min_in_subtree(&self, root: NonNull<T>) -> NonNull<T> {
        let mut cur = root;

        while let Some(left) = unsafe { T::links(cur).as_ref().left() } {
            cur = left;
        }

        cur
    }

    fn max_in_subtree(&self, root: NonNull<T>) -> NonNull<T> {
        let mut cur = root;

        while let Some(right) = unsafe { T::links(cur).as_ref().right() } {
            cur = right;
        }

        cur
    }

    unsafe fn maybe_set_parent(&mut self, opt_node: Link<T>, parent: Link<T>) {
        let Some(node) = opt_node else {
            return;
        };

        unsafe { T::links(node).as_mut().set_parent(parent) };
    }

    #[inline]
    unsafe fn replace_child_or_set_root(
        &mut self,
        parent: Link<T>,
        old_child: NonNull<T>,
        new_child: Link<T>,
    ) {
        match parent {
            Some(parent) => unsafe { self.replace_child(parent, old_child, new_child) },
            None => self.root = new_child,
        }
    }

    // Replaces the child pointer of `parent` pointing at `old_child` with
    // `new_child`.
    //
    // `new_child`'s parent pointer is not updated.
    //
    // # Safety
    //
    // The caller must ensure that `old_child` is a child node of `parent`.
    unsafe fn replace_child(
        &mut self,
        parent: NonNull<T>,
        old_child: NonNull<T>,
        new_child: Link<T>,
    ) {
        unsafe {
            if T::links(parent).as_ref().child(Dir::Left) == Some(old_child) {
                T::links(parent).as_mut().set_child(Dir::Left, new_child);
            } else {
                debug_assert_eq!(
                    T::links(parent).as_ref().child(Dir::Right),
                    Some(old_child),
                    "`old_child` must be a child of `parent`"
                );
                T::links(parent).as_mut().set_child(Dir::Right, new_child);
            }
        }
    }

    // Seats `child` in `parent`'s child slot, picking the side by key
    // comparison exactly as insertion does, and points `child`'s parent
    // link back at `parent`.
    unsafe fn attach_by_key(&mut self, parent: NonNull<T>, child: NonNull<T>) {
        unsafe {
            let dir = match child.as_ref().key().cmp(parent.as_ref().key()) {
                Ordering::Greater => Dir::Right,
                _ => Dir::Left,
            };

            T::links(parent).as_mut().set_child(dir, Some(child));
            T::links(child).as_mut().set_parent(Some(parent));
        }
    }

    // Exchanges the complete link sets of `a` and `b`, then repairs every
    // neighbor's view of the pair.
    //
    // A raw exchange between a node and its direct child leaves links
    // pointing at their own node; those are redirected to the other node of
    // the pair. Each node is then re-seated in its new parent's child slot
    // by key comparison; for equal keys the chosen side can differ from the
    // side the displaced node occupied, so removal does not preserve the
    // leftward placement of duplicates.
    //
    // Cached heights travel with their node and go stale; the caller's
    // rebalancing walk recomputes them.
    unsafe fn swap_links(&mut self, a: NonNull<T>, b: NonNull<T>) {
        fn redirect<T: ?Sized>(link: Link<T>, this: NonNull<T>, other: NonNull<T>) -> Link<T> {
            if link == Some(this) {
                Some(other)
            } else {
                link
            }
        }

        unsafe {
            let (a_parent, a_left, a_right) = {
                let links = T::links(a).as_ref();
                (links.parent(), links.left(), links.right())
            };
            let (b_parent, b_left, b_right) = {
                let links = T::links(b).as_ref();
                (links.parent(), links.left(), links.right())
            };

            {
                let links = T::links(a).as_mut();
                links.set_parent(redirect(b_parent, a, b));
                links.set_left(redirect(b_left, a, b));
                links.set_right(redirect(b_right, a, b));
            }
            {
                let links = T::links(b).as_mut();
                links.set_parent(redirect(a_parent, b, a));
                links.set_left(redirect(a_left, b, a));
                links.set_right(redirect(a_right, b, a));
            }

            if self.root == Some(a) {
                self.root = Some(b);
            } else if self.root == Some(b) {
                self.root = Some(a);
            }

            for (node, other) in [(a, b), (b, a)] {
                let (parent, left, right) = {
                    let links = T::links(node).as_ref();
                    (links.parent(), links.left(), links.right())
                };

                // A parent within the pair already holds the correct child
                // link from the redirect above.
                if let Some(parent) = parent {
                    if parent != other {
                        self.attach_by_key(parent, node);
                    }
                }
                self.maybe_set_parent(left, Some(node));
                self.maybe_set_parent(right, Some(node));
            }
        }
    }

    // Balancing ==============================================================

    fn height_of(link: Link<T>) -> usize {
        link.map(|node| unsafe { T::links(node).as_ref().height() })
            .unwrap_or(0)
    }

    fn balance_factor(&self, link: Link<T>) -> isize {
        let Some(node) = link else {
            return 0;
        };

        unsafe {
            let left = Self::height_of(T::links(node).as_ref().left());
            let right = Self::height_of(T::links(node).as_ref().right());
            left as isize - right as isize
        }
    }

    unsafe fn update_height(&mut self, node: NonNull<T>) {
        unsafe {
            let left = Self::height_of(T::links(node).as_ref().left());
            let right = Self::height_of(T::links(node).as_ref().right());
            T::links(node).as_mut().set_height(1 + left.max(right));
        }
    }

    // Walks from `start` up to the root, recomputing each cached height and
    // resolving the rotation its balance factor calls for.
    fn rebalance_from(&mut self, start: Link<T>) {
        let mut cur = start;

        while let Some(node) = cur {
            unsafe {
                self.update_height(node);
                self.resolve_rotation(node);

                // If `node` was rotated below a promoted child, its parent
                // link now points at that child, which is visited next.
                cur = T::links(node).as_ref().parent();
            }
        }
    }

    // Applies the rotation called for by `node`'s balance factor, if any.
    //
    // Factor >= 2 (left-heavy): single right rotation, or a left rotation
    // of the left child followed by a right rotation of `node` when the
    // left child leans rightward. Factor <= -2 is the mirror image.
    unsafe fn resolve_rotation(&mut self, node: NonNull<T>) {
        let factor = self.balance_factor(Some(node));

        unsafe {
            if factor >= 2 {
                let left = T::links(node)
                    .as_ref()
                    .left()
                    .expect("left-heavy node must have a left child");

                if self.balance_factor(Some(left)) >= 0 {
                    self.rotate_at(node, left);
                } else {
                    let pivot = T::links(left)
                        .as_ref()
                        .right()
                        .expect("rightward-leaning child must have a right child");
                    self.rotate_at(left, pivot);
                    self.rotate_at(node, pivot);
                }
            } else if factor <= -2 {
                let right = T::links(node)
                    .as_ref()
                    .right()
                    .expect("right-heavy node must have a right child");

                if self.balance_factor(Some(right)) <= 0 {
                    self.rotate_at(node, right);
                } else {
                    let pivot = T::links(right)
                        .as_ref()
                        .left()
                        .expect("leftward-leaning child must have a left child");
                    self.rotate_at(right, pivot);
                    self.rotate_at(node, pivot);
                }
            }
        }
    }

    // Performs a single rotation, moving `up` into `down`'s position.
    //
    // `up` must be a child of `down`. Heights of both nodes are recomputed,
    // child before parent, since the parent's height depends on the child's
    // new height.
    fn rotate_at(&mut self, down: NonNull<T>, up: NonNull<T>) {
        unsafe {
            // `down` becomes the `dir` child of `up`; the displaced subtree
            // moves from the `dir` child of `up` to the `!dir` child of
            // `down`.
            let dir = if T::links(down).as_ref().right() == Some(up) {
                Dir::Left
            } else {
                Dir::Right
            };

            let across = T::links(up).as_ref().child(dir);
            T::links(down).as_mut().set_child(!dir, across);
            self.maybe_set_parent(across, Some(down));

            T::links(up).as_mut().set_child(dir, Some(down));
            let parent = T::links(down).as_mut().set_parent(Some(up));
            T::links(up).as_mut().set_parent(parent);

            match parent {
                Some(parent) => self.replace_child(parent, down, Some(up)),
                None => self.root = Some(up),
            }

            self.update_height(down);
            self.update_height(up);
        }
    }
}

impl<T> AvlTree<T>
where
    T: TreeNode<Links<T>> + ?Sized,
    T::Key: Borrow<str>,
{
    /// Returns the first node found whose key starts with `prefix`, or
    /// `None` if no key does.
    ///
    /// "First" means the first match on the descent from the root, not the
    /// least matching key; [`completions`](AvlTree::completions) yields all
    /// matches in sorted order.
    pub fn first_with_prefix(&self, prefix: &str) -> Option<Pin<&T>> {
        let ptr = self.first_with_prefix_raw(prefix)?;
        unsafe { Some(Pin::new_unchecked(ptr.as_ref())) }
    }

    pub(crate) fn first_with_prefix_raw(&self, prefix: &str) -> Link<T> {
        let mut cur = self.root;

        while let Some(node) = cur {
            unsafe {
                let key: &str = node.as_ref().key().borrow();

                if key.starts_with(prefix) {
                    return Some(node);
                }

                cur = if key >= prefix {
                    T::links(node).as_ref().left()
                } else {
                    T::links(node).as_ref().right()
                };
            }
        }

        None
    }

    /// Returns an iterator over every node whose key starts with `prefix`,
    /// in sorted key order.
    pub fn completions<'tree, 'prefix>(
        &'tree self,
        prefix: &'prefix str,
    ) -> PrefixIter<'tree, 'prefix, T> {
        PrefixIter::new(self.first_with_prefix_raw(prefix), prefix)
    }
}

impl<T> Drop for AvlTree<T>
where
    T: TreeNode<Links<T>> + ?Sized,
{
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: ?Sized> Links<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: UnsafeCell::new(LinksInner {
                parent: None,
                children: [None; 2],
                height: 1,
                _unpin: PhantomPinned,
            }),
        }
    }

    #[inline]
    fn height(&self) -> usize {
        unsafe { (*self.inner.get()).height }
    }

    #[inline]
    fn parent(&self) -> Link<T> {
        unsafe { (*self.inner.get()).parent }
    }

    #[inline]
    fn child(&self, dir: Dir) -> Link<T> {
        unsafe { (*self.inner.get()).children[dir as usize] }
    }

    #[inline]
    fn left(&self) -> Link<T> {
        self.child(Dir::Left)
    }

    #[inline]
    fn right(&self) -> Link<T> {
        self.child(Dir::Right)
    }

    #[inline]
    fn set_parent(&mut self, parent: Link<T>) -> Link<T> {
        mem::replace(&mut self.inner.get_mut().parent, parent)
    }

    #[inline]
    fn set_child(&mut self, dir: Dir, child: Link<T>) -> Link<T> {
        mem::replace(&mut self.inner.get_mut().children[dir as usize], child)
    }

    #[inline]
    fn set_left(&mut self, left: Link<T>) -> Link<T> {
        self.set_child(Dir::Left, left)
    }

    #[inline]
    fn set_right(&mut self, right: Link<T>) -> Link<T> {
        self.set_child(Dir::Right, right)
    }

    #[inline]
    fn set_height(&mut self, height: usize) {
        self.inner.get_mut().height = height;
    }
}

impl<T: ?Sized> fmt::Debug for Links<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Links")
            .field("parent", &self.parent())
            .field("left", &self.left())
            .field("right", &self.right())
            .field("height", &self.height())
            .finish()
    }
}
