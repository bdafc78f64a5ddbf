// SPDX-License-Identifier: MIT OR Apache-2.0

//! Immutable, branchable logging contexts.
//!
//! A [`Context`] is a node in a tree of structured fields.  Each node holds only the
//! fields it added, plus a shared pointer to the node it branched from.  Nothing is
//! ever mutated after a node is built, so:
//!
//! - a child sees every field of every ancestor,
//! - a parent never sees a field added to one of its children, no matter whether the
//!   child was created before or after the parent's logger,
//! - siblings never see each other's fields.
//!
//! # Branching
//!
//! ```rust
//! use branchlog::context::Context;
//!
//! let root = Context::root();
//! let parent = root.branch([("parent", "parent")]);
//! let child_1 = parent.branch([("child_1", true)]);
//! let child_2 = parent.branch([("child_2", true)]);
//!
//! let names = |c: &Context| c.flatten().iter().map(|f| f.name().to_string()).collect::<Vec<_>>();
//! assert_eq!(names(&parent), ["parent"]);
//! assert_eq!(names(&child_1), ["parent", "child_1"]);
//! assert_eq!(names(&child_2), ["parent", "child_2"]);
//! ```
//!
//! # Builders
//!
//! [`ContextBuilder`] offers typed setters for building up a branch before freezing it.
//! Builders are plain values: cloning one and extending both copies produces two
//! independent branches.
//!
//! ```rust
//! use branchlog::context::Context;
//!
//! let parent = Context::root().with().str("parent", "parent");
//! let child = parent.clone().str("child", "child").finish();
//! let parent = parent.finish();
//!
//! assert_eq!(parent.flatten().len(), 1);
//! assert_eq!(child.flatten().len(), 2);
//! ```

mod builder;
mod context_impl;


pub use builder::ContextBuilder;
pub use context_impl::{Ancestors, Context, ContextId};
