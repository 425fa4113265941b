use std::sync::atomic::{AtomicU64, Ordering};

use gdscript_token::Token;
use thiserror::Error;

use crate::kind::NodeKind;

static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(1);

/// Handle into a [`Tree`]'s arena. Only meaningful paired with the `Tree`
/// that produced it — a `Tree` and its clone never share element identity
/// even when their indices happen to coincide numerically (spec.md §3's
/// "fresh node identities" requirement), because every `Tree` carries its
/// own generation stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub(crate) usize);

#[derive(Debug, Clone)]
enum Element {
    Node { kind: NodeKind, children: Vec<ElementId> },
    Token(Token),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("element {0:?} is not a node")]
    NotANode(ElementId),
    #[error("element {0:?} does not exist in this tree")]
    UnknownElement(ElementId),
    #[error("the root node has no parent to detach from")]
    CannotRemoveRoot,
}

/// A fully-reversible syntax tree: an arena of nodes and tokens where every
/// token's ownership is unique and parent links are non-owning back
/// references (spec.md §9's re-architecture of the cyclic parent/child
/// tree pattern).
#[derive(Debug, Clone)]
pub struct Tree {
    id: u64,
    elements: Vec<Element>,
    parents: Vec<Option<ElementId>>,
    root: ElementId,
}

impl Tree {
    pub fn identity(&self) -> u64 {
        self.id
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn parent_of(&self, id: ElementId) -> Option<ElementId> {
        self.parents.get(id.0).copied().flatten()
    }

    pub fn kind_of(&self, id: ElementId) -> Option<NodeKind> {
        match self.elements.get(id.0)? {
            Element::Node { kind, .. } => Some(*kind),
            Element::Token(_) => None,
        }
    }

    pub fn token_of(&self, id: ElementId) -> Option<&Token> {
        match self.elements.get(id.0)? {
            Element::Token(t) => Some(t),
            Element::Node { .. } => None,
        }
    }

    pub fn children_of(&self, id: ElementId) -> &[ElementId] {
        match self.elements.get(id.0) {
            Some(Element::Node { children, .. }) => children,
            _ => &[],
        }
    }

    pub fn is_node(&self, id: ElementId) -> bool {
        matches!(self.elements.get(id.0), Some(Element::Node { .. }))
    }

    /// Concatenates every leaf token's text in depth-first, left-to-right
    /// order. This must reproduce the original source text exactly
    /// (spec.md §3's round-trip invariant).
    pub fn to_string_lossless(&self) -> String {
        let mut out = String::new();
        for token in self.all_tokens() {
            out.push_str(&token.text);
        }
        out
    }

    /// Depth-first, left-to-right, lazy, restartable sequence of tokens.
    pub fn all_tokens(&self) -> impl Iterator<Item = &Token> + '_ {
        self.preorder(self.root).filter_map(move |id| self.token_of(id))
    }

    /// Depth-first, left-to-right, lazy, restartable sequence of node ids
    /// (tokens excluded).
    pub fn all_nodes(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.preorder(self.root).filter(move |id| self.is_node(*id))
    }

    fn preorder(&self, start: ElementId) -> Preorder<'_> {
        Preorder { tree: self, stack: vec![start] }
    }

    /// Detaches `id` from its parent, preserving the remaining siblings'
    /// order and tokens. Fails for the root, which has no parent.
    pub fn remove_from_parent(&mut self, id: ElementId) -> Result<(), SyntaxError> {
        let parent = self.parent_of(id).ok_or(SyntaxError::CannotRemoveRoot)?;
        if let Some(Element::Node { children, .. }) = self.elements.get_mut(parent.0) {
            children.retain(|c| *c != id);
        }
        if let Some(slot) = self.parents.get_mut(id.0) {
            *slot = None;
        }
        Ok(())
    }

    /// Deep-copies the tree with a fresh identity stamp. No element index
    /// is shared in meaning with the original — see [`Tree::identity`].
    pub fn deep_clone(&self) -> Tree {
        Tree {
            id: NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed),
            elements: self.elements.clone(),
            parents: self.parents.clone(),
            root: self.root,
        }
    }

    /// Replaces the subtree rooted at `old` with `replacement`'s tree,
    /// re-parenting the inserted root in place of `old` in its parent's
    /// child list. Used by the incremental parser's member-splice step
    /// (spec.md §4.3). The detached subtree's elements remain allocated
    /// but unreachable from `root` — cheap to leave behind, since a tree
    /// is rebuilt wholesale on the next full reparse rather than garbage
    /// collected in place.
    pub fn replace_node(&mut self, old: ElementId, replacement: Tree) -> Result<ElementId, SyntaxError> {
        if !self.is_node(old) {
            return Err(SyntaxError::NotANode(old));
        }
        let parent = self.parent_of(old);
        let offset = self.elements.len();
        self.elements.extend(replacement.elements);
        self.parents.extend(replacement.parents.into_iter().map(|p| p.map(|p| ElementId(p.0 + offset))));
        for element in &mut self.elements[offset..] {
            if let Element::Node { children, .. } = element {
                for child in children.iter_mut() {
                    *child = ElementId(child.0 + offset);
                }
            }
        }
        let new_root = ElementId(replacement.root.0 + offset);

        match parent {
            Some(parent_id) => {
                if let Some(Element::Node { children, .. }) = self.elements.get_mut(parent_id.0) {
                    if let Some(slot) = children.iter_mut().find(|c| **c == old) {
                        *slot = new_root;
                    }
                }
                self.parents[new_root.0] = Some(parent_id);
                self.parents[old.0] = None;
            }
            None => {
                // Replacing the root itself.
                self.root = new_root;
                self.parents[new_root.0] = None;
            }
        }
        Ok(new_root)
    }

    /// Extracts the subtree rooted at `id` as a standalone [`Tree`] with
    /// its own fresh identity, preserving the internal structure exactly.
    pub fn subtree(&self, id: ElementId) -> Tree {
        let mut elements = Vec::new();
        let mut parents = Vec::new();
        let mut remap = std::collections::HashMap::new();

        // Assign new indices in the same depth-first order `preorder` visits,
        // then rebuild each node's children list under the new indices.
        for old_id in self.preorder(id) {
            let new_id = ElementId(elements.len());
            remap.insert(old_id, new_id);
            match &self.elements[old_id.0] {
                Element::Node { kind, .. } => elements.push(Element::Node { kind: *kind, children: Vec::new() }),
                Element::Token(t) => elements.push(Element::Token(t.clone())),
            }
            parents.push(None);
        }
        for old_id in self.preorder(id) {
            let new_id = remap[&old_id];
            if let Element::Node { children: old_children, .. } = &self.elements[old_id.0] {
                let new_children: Vec<ElementId> = old_children.iter().map(|c| remap[c]).collect();
                for c in &new_children {
                    parents[c.0] = Some(new_id);
                }
                if let Element::Node { children, .. } = &mut elements[new_id.0] {
                    *children = new_children;
                }
            }
        }

        Tree { id: NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed), elements, parents, root: ElementId(0) }
    }

    /// Top-level members of a class body: the root's direct children whose
    /// kind is a member kind (spec.md's glossary definition of "member").
    pub fn members(&self) -> Vec<ElementId> {
        self.children_of(self.root)
            .iter()
            .copied()
            .filter(|id| self.kind_of(*id).is_some_and(NodeKind::is_member))
            .collect()
    }
}

struct Preorder<'a> {
    tree: &'a Tree,
    stack: Vec<ElementId>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        let id = self.stack.pop()?;
        let children = self.tree.children_of(id);
        for child in children.iter().rev() {
            self.stack.push(*child);
        }
        Some(id)
    }
}

/// Builds a [`Tree`] bottom-up via a stack of currently-open nodes. This is
/// the construction surface the external parser façade `P` (spec.md §6)
/// uses to hand a freshly parsed tree to the rest of the pipeline.
pub struct TreeBuilder {
    elements: Vec<Element>,
    parents: Vec<Option<ElementId>>,
    open: Vec<ElementId>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self { elements: Vec::new(), parents: Vec::new(), open: Vec::new() }
    }

    fn attach_child(&mut self, child: ElementId) {
        if let Some(&parent) = self.open.last() {
            if let Some(Element::Node { children, .. }) = self.elements.get_mut(parent.0) {
                children.push(child);
            }
            self.parents[child.0] = Some(parent);
        }
    }

    /// Opens a new interior node; subsequent `token`/`start_node` calls
    /// become its children until the matching `finish_node`.
    pub fn start_node(&mut self, kind: NodeKind) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(Element::Node { kind, children: Vec::new() });
        self.parents.push(None);
        self.attach_child(id);
        self.open.push(id);
        id
    }

    /// Closes the most recently opened node.
    pub fn finish_node(&mut self) {
        self.open.pop();
    }

    /// Appends a leaf token as a child of the currently open node.
    pub fn token(&mut self, token: Token) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(Element::Token(token));
        self.parents.push(None);
        self.attach_child(id);
        id
    }

    /// Finalizes the tree. The first node opened (and never attached to a
    /// parent) becomes the root.
    pub fn finish(self) -> Tree {
        Tree {
            id: NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed),
            elements: self.elements,
            parents: self.parents,
            root: ElementId(0),
        }
    }
}
