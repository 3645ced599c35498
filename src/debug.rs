use core::{fmt, ptr::NonNull};
use std::collections::VecDeque;

use crate::{AvlTree, Dir, Links, TreeNode};

impl<T> AvlTree<T>
where
    T: TreeNode<Links<T>>,
{
    /// Renders the tree as a Graphviz digraph, labeling each node with its
    /// key and cached subtree height.
    pub fn dotgraph<'a, W, K>(&'a self, name: &str, mut w: W) -> fmt::Result
    where
        W: fmt::Write,
        K: fmt::Display + From<&'a T::Key>,
    {
        let root = match self.root {
            Some(root) => root,
            None => return write!(w, "digraph \"graph-{name}\" {{}}"),
        };

        enum Item<T> {
            Node(NonNull<T>),
            Missing(u32),
        }

        let mut queue = VecDeque::new();
        queue.push_back(Item::Node(root));

        write!(
            w,
            "digraph \"graph-{name}\" {{\n subgraph \"subgraph-{name}\" {{"
        )?;

        let mut missing = 0;
        let mut links = String::new();

        while !queue.is_empty() {
            use fmt::Write;

            let row = queue.len();
            write!(w, "{{rank=same; ")?;

            for _row_node in 0..row {
                let node = match queue.pop_front().unwrap() {
                    Item::Node(node) => node,
                    Item::Missing(id) => {
                        write!(w, "\"graph{name}-missing{id}\" [shape=point]; ")?;
                        continue;
                    }
                };

                let key: K = unsafe { node.as_ref().key().into() };
                let height = unsafe { T::links(node).as_ref().height() };
                write!(w, "\"graph{name}-{key}\" [label=\"{key}:{height}\"]; ")?;

                for dir in [Dir::Left, Dir::Right] {
                    if let Some(child) = unsafe { T::links(node).as_ref().child(dir) } {
                        let child_key: K = unsafe { child.as_ref().key().into() };

                        queue.push_back(Item::Node(child));
                        writeln!(
                            links,
                            "\"graph{name}-{key}\" -> \"graph{name}-{child_key}\";"
                        )?;
                    } else {
                        queue.push_back(Item::Missing(missing));
                        writeln!(
                            links,
                            "\"graph{name}-{key}\" -> \"graph{name}-missing{missing}\";"
                        )?;
                        missing += 1;
                    }
                }
            }

            writeln!(w, "}}")?;
        }

        w.write_str(&links)?;

        w.write_str(" }\n}")
    }
}

#[cfg(test)]
mod tests {
    use core::fmt;

    use crate::model::TestNode;
    use crate::AvlTree;

    struct Key(u32);

    impl From<&u32> for Key {
        fn from(key: &u32) -> Self {
            Key(*key)
        }
    }

    impl fmt::Display for Key {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    #[test]
    fn dotgraph_renders_keys_and_heights() {
        let mut tree: AvlTree<TestNode> = AvlTree::new();
        for key in [2u32, 1, 3] {
            tree.insert(TestNode::new(key));
        }

        let mut out = String::new();
        tree.dotgraph::<_, Key>("t", &mut out).unwrap();

        assert!(out.contains("\"grapht-2\" [label=\"2:2\"]"));
        assert!(out.contains("\"grapht-1\" [label=\"1:1\"]"));
        assert!(out.contains("\"grapht-3\" [label=\"3:1\"]"));
        assert!(out.contains("\"grapht-2\" -> \"grapht-1\";"));
        assert!(out.contains("\"grapht-2\" -> \"grapht-3\";"));
    }

    #[test]
    fn dotgraph_renders_empty_tree() {
        let tree: AvlTree<TestNode> = AvlTree::new();

        let mut out = String::new();
        tree.dotgraph::<_, Key>("empty", &mut out).unwrap();

        assert_eq!(out, "digraph \"graph-empty\" {}");
    }
}
