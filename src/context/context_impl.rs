// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core Context implementation.

use crate::error::Result;
use crate::field::Field;
use crate::logger::Logger;
use crate::sink::Sink;
use crate::value::Value;
use serde::Serialize;
use std::fmt::Display;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::builder::ContextBuilder;

static CONTEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Unique identifier for a context node.
///
/// Ids are handed out from a process-wide counter, so a node created later always
/// has a larger id than its parent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContextId(pub(crate) u64);

impl Display for ContextId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Internal node data, shared between every handle to the node.
#[derive(Debug)]
pub(crate) struct ContextInner {
    pub(crate) parent: Option<Context>,
    pub(crate) context_id: u64,
    /// Fields added by this node only.  Frozen at construction.
    pub(crate) fields: Box<[Field]>,
}

impl Drop for ContextInner {
    // Frees a long chain of uniquely owned ancestors in a loop rather than one
    // stack frame per node.  Stops at the first ancestor someone else still holds.
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(context) = next {
            next = Arc::into_inner(context.inner).and_then(|mut inner| inner.parent.take());
        }
    }
}

/// A node in the field-inheritance tree.
///
/// Contexts are cheap to clone (Arc-based), immutable and thread-safe.  Two handles
/// are equal when they point at the same node; two distinct nodes holding identical
/// fields are not equal.
///
/// # Examples
///
/// ```rust
/// use branchlog::context::Context;
///
/// let root = Context::root();
/// assert_eq!(root.depth(), 0);
///
/// let request = root.branch([("request_id", 42)]);
/// let handler = request.branch([("handler", "upload")]);
/// assert_eq!(handler.depth(), 2);
/// assert_eq!(handler.parent(), Some(&request));
/// assert_eq!(handler.own_fields().len(), 1);
/// assert_eq!(handler.flatten().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Context {
    pub(crate) inner: Arc<ContextInner>,
}

impl PartialEq for Context {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Context {}

impl Hash for Context {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.inner).hash(state);
    }
}

impl Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", "  ".repeat(self.depth()), self.context_id())?;
        for field in self.own_fields() {
            write!(f, " {}", field.name())?;
        }
        Ok(())
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::root()
    }
}

impl Context {
    fn new_node(parent: Option<Context>, fields: Box<[Field]>) -> Context {
        Context {
            inner: Arc::new(ContextInner {
                parent,
                context_id: CONTEXT_ID.fetch_add(1, Ordering::Relaxed),
                fields,
            }),
        }
    }

    /// Creates an empty root context.
    #[inline]
    pub fn root() -> Context {
        Self::new_node(None, Box::new([]))
    }

    /// Creates a child of this context that adds `fields`.
    ///
    /// The child's effective fields are this node's effective fields followed by
    /// `fields`.  Names may repeat names already present higher up; the collision is
    /// resolved when a record is encoded (last wins), not here.
    ///
    /// An empty `fields` list yields a new node that adds nothing.
    ///
    /// ```rust
    /// use branchlog::{Field, context::Context};
    ///
    /// let parent = Context::root().branch([("parent", true)]);
    /// let child = parent.branch([Field::new("child", 1), Field::new("parent", false)]);
    /// assert_eq!(child.flatten().len(), 3);
    /// assert_eq!(parent.flatten().len(), 1);
    /// ```
    pub fn branch<I, F>(&self, fields: I) -> Context
    where
        I: IntoIterator<Item = F>,
        F: Into<Field>,
    {
        let fields: Box<[Field]> = fields.into_iter().map(Into::into).collect();
        Self::new_node(Some(self.clone()), fields)
    }

    /// Like [`branch`](Context::branch), but accepts any serializable values.
    ///
    /// Fails with [`Error::UnsupportedValueKind`](crate::Error::UnsupportedValueKind)
    /// if any value falls outside the supported kinds.  On failure no node is created.
    ///
    /// ```rust
    /// use branchlog::context::Context;
    ///
    /// let root = Context::root();
    /// assert!(root.try_branch([("count", 3)]).is_ok());
    /// assert!(root.try_branch([("ratio", 0.25)]).is_err());
    /// ```
    pub fn try_branch<I, K, V>(&self, fields: I) -> Result<Context>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Serialize,
    {
        let fields = fields
            .into_iter()
            .map(|(name, value)| {
                let name: String = name.into();
                let value = Value::from_serialize(&name, &value)?;
                Ok(Field::new(name, value))
            })
            .collect::<Result<Box<[Field]>>>()?;
        Ok(Self::new_node(Some(self.clone()), fields))
    }

    /// Starts a builder whose result will be a child of this context.
    pub fn with(&self) -> ContextBuilder {
        ContextBuilder::new(self.clone())
    }

    /// Binds a logger with the default encoder and configuration to this context.
    pub fn logger(&self, sink: Arc<dyn Sink>) -> Logger {
        Logger::new(self.clone(), sink)
    }

    /// The fields added by this node, excluding ancestors.
    #[inline]
    pub fn own_fields(&self) -> &[Field] {
        &self.inner.fields
    }

    #[inline]
    pub fn parent(&self) -> Option<&Context> {
        self.inner.parent.as_ref()
    }

    #[inline]
    pub fn context_id(&self) -> ContextId {
        ContextId(self.inner.context_id)
    }

    /// Number of branches between this node and its root.  A root has depth 0.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self;
        while let Some(parent) = &current.inner.parent {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Walks from this node towards the root, yielding this node first.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors {
            next: Some(self),
        }
    }

    /// Every field visible from this node, root first, in append order.
    ///
    /// Duplicate names are all retained; see [`field::resolve`](crate::field::resolve)
    /// for how they collapse when encoded.
    pub fn flatten(&self) -> Vec<&Field> {
        let mut chain: Vec<&Context> = self.ancestors().collect();
        chain.reverse();
        chain
            .into_iter()
            .flat_map(|node| node.own_fields().iter())
            .collect()
    }

    /// Returns true if `other` is this node or one of its ancestors.
    pub fn descends_from(&self, other: &Context) -> bool {
        self.ancestors().any(|node| node == other)
    }
}

/// Iterator returned by [`Context::ancestors`].
#[derive(Debug, Clone)]
pub struct Ancestors<'c> {
    next: Option<&'c Context>,
}

impl<'c> Iterator for Ancestors<'c> {
    type Item = &'c Context;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}

/*
Boilerplate notes.

Clone is cheap (Arc).  Copy is impossible.
PartialEq/Eq/Hash are by node identity, since two nodes with equal fields are still
different places in the tree.
Ord makes no sense; ContextId is ordered instead.
Default is an empty root.
Send/Sync are automatic: the node is immutable.
*/
