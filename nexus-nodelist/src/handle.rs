//! Handle trait for node references stored in a [`NodeList`](crate::NodeList).
//!
//! A handle is an opaque, non-owning reference to a node that lives in a tree
//! owned by someone else: an arena index, a raw pointer, a layout engine's
//! node id. The list copies handles in and out and compares them, nothing more.

use core::ptr::NonNull;

/// Trait for node handle types.
///
/// Handles must be cheap to copy and compare by **identity**. The list never
/// uses `==` directly: every lookup goes through [`same_node`](Handle::same_node),
/// which defaults to `==` and must return `true` if and only if both handles
/// refer to the same node. This is why `&T` is not a `Handle` (its `Eq`
/// compares the pointees) while `NonNull<T>` is.
///
/// For fat `NonNull<T>` (slices, trait objects) `same_node` compares the
/// address only, while `==` also compares metadata, so the two can disagree.
/// Two pointers to the same node with different vtables are the same node to
/// the list.
///
/// # Example
///
/// ```
/// use nexus_nodelist::{Handle, NodeList};
///
/// // Arena indices are handles
/// let mut children: NodeList<u32> = NodeList::new();
/// children.push(7);
/// assert_eq!(children.index_of(7), Some(0));
/// ```
///
/// # Custom Handle Types
///
/// ```
/// use nexus_nodelist::{Handle, NodeList};
///
/// #[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// struct LayoutId(u32);
///
/// impl Handle for LayoutId {}
///
/// let mut children: NodeList<LayoutId> = NodeList::with_capacity(4);
/// children.push(LayoutId(1));
/// children.push(LayoutId(2));
/// assert_eq!(children.remove_node(LayoutId(1)), Some(LayoutId(1)));
/// assert_eq!(children.remove_node(LayoutId(1)), None);
/// ```
pub trait Handle: Copy + Eq {
    /// Returns `true` if `self` and `other` refer to the same node.
    #[inline]
    fn same_node(&self, other: &Self) -> bool {
        self == other
    }
}

macro_rules! impl_handle_for_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Handle for $ty {}
        )*
    };
}

impl_handle_for_unsigned!(u8, u16, u32, u64, usize);

impl<T: ?Sized> Handle for NonNull<T> {
    #[inline]
    fn same_node(&self, other: &Self) -> bool {
        // Address only, ignoring fat pointer metadata
        core::ptr::addr_eq(self.as_ptr(), other.as_ptr())
    }
}

#[cfg(feature = "taffy")]
impl Handle for taffy::NodeId {}
