//! Child lists for tree-based layout engines.
//!
//! A [`NodeList`] is a growable, order-preserving sequence of node handles.
//! A layout tree keeps one per parent node to hold its children in order.
//!
//! # Design Philosophy
//!
//! The tree owns the nodes. The list only coordinates handles:
//!
//! ```text
//! Tree (arena, slab, taffy) - owns nodes, hands out handles
//! NodeList                  - orders handles, owns only its buffer
//! ```
//!
//! Consequences:
//! - **No lifetime coupling**: removing a child from a list, clearing the list
//!   or dropping it never frees a node
//! - **Identity only**: handles are compared as references, never by node
//!   contents (see [`Handle`])
//! - **One allocation**: handles live in a single contiguous buffer that
//!   doubles when full and never shrinks
//!
//! # Quick Start
//!
//! ```
//! use nexus_nodelist::NodeList;
//!
//! // Nodes live in the tree's arena; the list stores their keys
//! let mut arena = vec!["root", "header", "body", "footer"];
//! let mut children: NodeList<usize> = NodeList::new();
//!
//! children.push(1);
//! children.push(3);
//! children.insert(1, 2);
//!
//! let names: Vec<_> = children.iter().map(|key| arena[key]).collect();
//! assert_eq!(names, ["header", "body", "footer"]);
//!
//! // Detach a child; the node itself is still in the arena
//! assert_eq!(children.remove_node(2), Some(2));
//! assert_eq!(arena[2], "body");
//! # arena.clear();
//! ```
//!
//! # Contract Violations
//!
//! Out-of-range indices and allocation failures are programmer or environment
//! errors. Each operation that can hit one has two forms:
//!
//! | Form | Example | On violation |
//! |------|---------|--------------|
//! | Fail-fast | [`NodeList::insert`], [`NodeList::remove`], `list[i]` | `log::error!` then panic |
//! | Checked | [`NodeList::try_insert`], [`NodeList::try_remove`], [`NodeList::try_get`] | `Err`, list unchanged |
//!
//! Not finding a handle in [`NodeList::remove_node`] is *not* a violation; it
//! returns `None`.
//!
//! # Feature Flags
//!
//! - `taffy` - Implement [`Handle`] for `taffy::NodeId`

#![warn(missing_docs)]

mod buffer;
pub mod error;
pub mod handle;
pub mod list;

pub use buffer::MIN_NON_ZERO_CAPACITY;
pub use error::{GrowError, InsertError, OutOfBounds};
pub use handle::Handle;
pub use list::{Iter, NodeList};
