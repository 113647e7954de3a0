//! N-ary tree over an index-addressed arena.
//!
//! Elements live in an allocator and their [`Node`] records (parent, next
//! sibling, previous sibling, first child) in a table of equal length.
//! Children are reached only by walking the sibling chain from
//! `first_child`, so child lookups are O(k) in the number of children.
//!
//! Every node may have at most `max_children` children, fixed at
//! construction; [`NO_MAXIMUM_CHILDREN`] disables the limit.

mod iter;
mod node;

use std::cmp::Ordering;
use std::fmt;

use smallvec::SmallVec;

use quimera_alloc::{PoolAllocator, PoolConfig, SlotAllocator};
use quimera_core::{
    contract, contract_error, contract_warning, Comparator, ContainerError, ContainerId, Cursor,
    DefaultComparator, IterationDirection, Position, TraversalOrder,
};

use crate::arena::SlotArena;
use crate::cursor::{check_owner, element_slot, try_element_slot};
use iter::{children, deepest_last, pre_order_next, pre_order_prev};
pub use iter::{Iter, IterMut};
use node::Node;

/// Child limit value that disables the limit.
pub const NO_MAXIMUM_CHILDREN: usize = usize::MAX;

/// A tree of `T` with a per-node child limit.
///
/// Structural operations keep the tree acyclic: nodes are only ever
/// created as children of existing nodes, and removing a node removes its
/// whole subtree.
///
/// Elements are stored in an `A` allocator, a [`PoolAllocator`] unless
/// the tree is built with [`with_allocator`](Self::with_allocator).
pub struct NTree<T, C = DefaultComparator, A = PoolAllocator<T>> {
    arena: SlotArena<T, Node, A>,
    root: Option<usize>,
    max_children: usize,
    id: ContainerId,
    comparator: C,
}

impl<T> NTree<T> {
    /// An empty tree whose nodes hold at most `max_children` children.
    ///
    /// # Panics
    ///
    /// Contract error if `max_children` is zero.
    pub fn new(max_children: usize) -> Self {
        Self::with_capacity(max_children, PoolConfig::DEFAULT_CAPACITY)
    }

    /// An empty tree with room for `capacity` nodes.
    ///
    /// # Panics
    ///
    /// Contract error if `max_children` or `capacity` is zero.
    pub fn with_capacity(max_children: usize, capacity: usize) -> Self {
        Self::with_comparator(max_children, capacity, DefaultComparator)
    }
}

impl<T, C> NTree<T, C> {
    /// An empty tree with room for `capacity` nodes, comparing elements
    /// with `comparator`.
    ///
    /// # Panics
    ///
    /// Contract error if `max_children` or `capacity` is zero.
    pub fn with_comparator(max_children: usize, capacity: usize, comparator: C) -> Self {
        contract_error!(capacity > 0, "initial capacity must be greater than zero");
        Self::with_allocator(
            max_children,
            PoolAllocator::with_capacity(capacity),
            comparator,
        )
    }
}

impl<T, C, A: SlotAllocator<T>> NTree<T, C, A> {
    /// An empty tree storing its elements in `allocator`, comparing them
    /// with `comparator`. The tree starts with the allocator's capacity.
    ///
    /// # Panics
    ///
    /// Contract error if `max_children` is zero or `allocator` already
    /// holds values.
    pub fn with_allocator(max_children: usize, allocator: A, comparator: C) -> Self {
        contract_error!(
            max_children > 0,
            "the maximum number of children must be greater than zero"
        );
        Self {
            arena: SlotArena::from_allocator(allocator),
            root: None,
            max_children,
            id: ContainerId::next(),
            comparator,
        }
    }

    /// This tree's identity, recorded in every cursor it hands out.
    pub fn id(&self) -> ContainerId {
        self.id
    }

    /// The comparator used by equality and search.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Number of nodes.
    pub fn count(&self) -> usize {
        self.arena.count()
    }

    /// Number of nodes the tree can hold before it grows.
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Whether the tree has no root.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Per-node child limit.
    pub fn max_children(&self) -> usize {
        self.max_children
    }

    /// The element allocator.
    pub fn allocator(&self) -> &A {
        self.arena.elements()
    }

    /// Grow to hold at least `capacity` nodes. Never shrinks.
    pub fn reserve(&mut self, capacity: usize) {
        self.arena.reserve(capacity);
    }

    // ── Structure ─────────────────────────────────────────────────────

    /// Create the root holding `value`, or overwrite the existing root's
    /// value. Returns a cursor to the root.
    pub fn set_root_value(&mut self, value: T) -> Cursor {
        let slot = match self.root {
            Some(root) => {
                *self.arena.value_mut(root) = value;
                root
            }
            None => {
                let root = self.arena.allocate(value, Node::default());
                self.root = Some(root);
                root
            }
        };
        self.cursor(Position::Index(slot))
    }

    /// Cursor at the root, or the forward end if the tree is empty.
    pub fn root(&self) -> Cursor {
        self.cursor(Position::from_slot(self.root, Position::ForwardEnd))
    }

    /// Append `value` as the last child of `parent`.
    ///
    /// A `parent` that already has [`max_children`](Self::max_children)
    /// children is a contract warning: the call fails with
    /// [`ContainerError::ChildLimitReached`], the tree is left unchanged and
    /// `value` is dropped.
    pub fn add_child(&mut self, parent: Cursor, value: T) -> Result<Cursor, ContainerError> {
        let parent_slot = self.live_slot(parent);
        self.check_room(parent_slot)?;
        let slot = self.attach(parent_slot, value, None);
        Ok(self.cursor(Position::Index(slot)))
    }

    /// Insert `value` as the child of `parent` at ordinal `index` among its
    /// siblings. An index past the last child is a contract warning and
    /// appends. Same child limit as [`add_child`](Self::add_child).
    pub fn insert_child(
        &mut self,
        parent: Cursor,
        value: T,
        index: usize,
    ) -> Result<Cursor, ContainerError> {
        let parent_slot = self.live_slot(parent);
        self.check_room(parent_slot)?;
        let before = children(&self.arena, parent_slot).nth(index);
        contract_warning!(
            before.is_some() || index == self.children_of(parent_slot),
            "index {index} is out of bounds for {} children, appending",
            self.children_of(parent_slot)
        );
        let slot = self.attach(parent_slot, value, before);
        Ok(self.cursor(Position::Index(slot)))
    }

    /// Remove `node` and its whole subtree. Returns the number of nodes
    /// removed. Removing the root empties the tree.
    pub fn remove(&mut self, node: Cursor) -> usize {
        let slot = self.live_slot(node);
        self.detach(slot);
        self.destroy_subtree(slot)
    }

    /// Remove the child of `parent` at ordinal `index`, with its subtree.
    /// A missing child is a contract warning and removes nothing.
    pub fn remove_child(&mut self, parent: Cursor, index: usize) -> usize {
        let parent_slot = self.live_slot(parent);
        let Some(child) = children(&self.arena, parent_slot).nth(index) else {
            contract::warning(
                "index < children_count",
                format_args!("the node has no child at index {index}, there is nothing to remove"),
            );
            return 0;
        };
        self.detach(child);
        self.destroy_subtree(child)
    }

    /// Drop every node. Capacity is kept.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    // ── Navigation ────────────────────────────────────────────────────

    /// The parent of `node`, or the forward end for the root.
    pub fn parent(&self, node: Cursor) -> Cursor {
        let slot = self.live_slot(node);
        self.cursor(Position::from_slot(
            self.arena.record(slot).parent,
            Position::ForwardEnd,
        ))
    }

    /// The child of `node` at ordinal `index`, or the forward end.
    pub fn child(&self, node: Cursor, index: usize) -> Cursor {
        let slot = self.live_slot(node);
        self.cursor(Position::from_slot(
            children(&self.arena, slot).nth(index),
            Position::ForwardEnd,
        ))
    }

    /// The first child of `node`, or the forward end.
    pub fn first_child(&self, node: Cursor) -> Cursor {
        let slot = self.live_slot(node);
        self.cursor(Position::from_slot(
            self.arena.record(slot).first_child,
            Position::ForwardEnd,
        ))
    }

    /// The last child of `node`, or the forward end.
    pub fn last_child(&self, node: Cursor) -> Cursor {
        let slot = self.live_slot(node);
        self.cursor(Position::from_slot(
            children(&self.arena, slot).last(),
            Position::ForwardEnd,
        ))
    }

    /// Whether `node` has at least one child.
    pub fn has_children(&self, node: Cursor) -> bool {
        let slot = self.live_slot(node);
        self.arena.record(slot).first_child.is_some()
    }

    /// Whether `node` has a parent, i.e. is not the root.
    pub fn has_parent(&self, node: Cursor) -> bool {
        let slot = self.live_slot(node);
        self.arena.record(slot).parent.is_some()
    }

    /// Number of children of `node`.
    pub fn children_count(&self, node: Cursor) -> usize {
        let slot = self.live_slot(node);
        self.children_of(slot)
    }

    // ── Traversal ─────────────────────────────────────────────────────

    /// The first node in `order`, or the forward end if empty.
    pub fn first(&self, order: TraversalOrder) -> Cursor {
        match order {
            TraversalOrder::DepthFirstPreOrder => self.root(),
        }
    }

    /// The last node in `order`, or the forward end if empty. For
    /// pre-order this is the root's deepest last descendant, found without
    /// visiting the rest of the tree.
    pub fn last(&self, order: TraversalOrder) -> Cursor {
        match order {
            TraversalOrder::DepthFirstPreOrder => self.cursor(Position::from_slot(
                self.root.map(|root| deepest_last(&self.arena, root)),
                Position::ForwardEnd,
            )),
        }
    }

    /// One step forward in pre-order. The backward end steps to the root;
    /// advancing the forward end is a contract warning and returns it
    /// unchanged.
    pub fn advance(&self, cursor: Cursor) -> Cursor {
        check_owner(self.id, cursor);
        if !contract_warning!(
            !cursor.is_end_in(IterationDirection::Forward),
            "the cursor points to the forward end, it cannot be advanced"
        ) {
            return cursor;
        }
        let next = match cursor.position() {
            Position::Index(slot) => {
                self.check_live(slot);
                pre_order_next(&self.arena, slot)
            }
            Position::BackwardEnd => self.root,
            Position::ForwardEnd => None,
        };
        cursor.with_position(Position::from_slot(next, Position::ForwardEnd))
    }

    /// One step backward in pre-order; the mirror of
    /// [`advance`](Self::advance).
    pub fn retreat(&self, cursor: Cursor) -> Cursor {
        check_owner(self.id, cursor);
        if !contract_warning!(
            !cursor.is_end_in(IterationDirection::Backward),
            "the cursor points to the backward end, it cannot be retreated"
        ) {
            return cursor;
        }
        let prev = match cursor.position() {
            Position::Index(slot) => {
                self.check_live(slot);
                pre_order_prev(&self.arena, slot)
            }
            Position::ForwardEnd => self.root.map(|root| deepest_last(&self.arena, root)),
            Position::BackwardEnd => None,
        };
        cursor.with_position(Position::from_slot(prev, Position::BackwardEnd))
    }

    /// Move `cursor` to the pre-order first node.
    pub fn move_first(&self, cursor: Cursor) -> Cursor {
        check_owner(self.id, cursor);
        self.first(TraversalOrder::DepthFirstPreOrder)
    }

    /// Move `cursor` to the pre-order last node.
    pub fn move_last(&self, cursor: Cursor) -> Cursor {
        check_owner(self.id, cursor);
        self.last(TraversalOrder::DepthFirstPreOrder)
    }

    /// Whether `cursor` belongs to this tree and is an end or a live slot.
    pub fn is_valid(&self, cursor: Cursor) -> bool {
        cursor.owner() == self.id
            && match cursor.position() {
                Position::Index(slot) => self.arena.is_live(slot),
                Position::ForwardEnd | Position::BackwardEnd => true,
            }
    }

    /// Order two cursors by pre-order position, ends outermost.
    pub fn compare_cursors(&self, a: Cursor, b: Cursor) -> Ordering {
        check_owner(self.id, a);
        check_owner(self.id, b);
        match (a.position(), b.position()) {
            (x, y) if x == y => Ordering::Equal,
            (Position::BackwardEnd, _) | (_, Position::ForwardEnd) => Ordering::Less,
            (Position::ForwardEnd, _) | (_, Position::BackwardEnd) => Ordering::Greater,
            (Position::Index(x), Position::Index(y)) => {
                self.check_live(x);
                self.check_live(y);
                let reachable = std::iter::successors(Some(x), |&slot| {
                    pre_order_next(&self.arena, slot)
                })
                .any(|slot| slot == y);
                if reachable {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
        }
    }

    /// The element at `cursor`.
    ///
    /// # Panics
    ///
    /// Contract error if the cursor is foreign, at an end, or at a vacant
    /// slot.
    pub fn get_at(&self, cursor: Cursor) -> &T {
        self.arena.value(self.live_slot(cursor))
    }

    /// Mutable access to the element at `cursor`.
    pub fn get_at_mut(&mut self, cursor: Cursor) -> &mut T {
        let slot = self.live_slot(cursor);
        self.arena.value_mut(slot)
    }

    /// The element at `cursor`, or why there is none.
    pub fn try_get_at(&self, cursor: Cursor) -> Result<&T, ContainerError> {
        let slot = try_element_slot(self.id, cursor)?;
        self.arena
            .elements()
            .get(slot)
            .ok_or(ContainerError::VacantSlot { slot })
    }

    /// Elements in `order`.
    pub fn iter(&self, order: TraversalOrder) -> Iter<'_, T, A> {
        match order {
            TraversalOrder::DepthFirstPreOrder => Iter::new(&self.arena, self.root),
        }
    }

    /// Mutable references to the elements in `order`.
    pub fn iter_mut(&mut self, order: TraversalOrder) -> IterMut<'_, T> {
        let slots: Vec<usize> = match order {
            TraversalOrder::DepthFirstPreOrder => self.pre_order_slots().collect(),
        };
        IterMut::new(self.arena.values_mut_in(&slots))
    }

    // ── Internals ─────────────────────────────────────────────────────

    fn cursor(&self, position: Position) -> Cursor {
        Cursor::new(self.id, position)
    }

    fn pre_order_slots(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(self.root, move |&slot| pre_order_next(&self.arena, slot))
    }

    fn children_of(&self, slot: usize) -> usize {
        children(&self.arena, slot).count()
    }

    fn check_live(&self, slot: usize) {
        contract_error!(
            self.arena.is_live(slot),
            "the cursor at slot {slot} does not point to a live node"
        );
    }

    fn live_slot(&self, cursor: Cursor) -> usize {
        let slot = element_slot(self.id, cursor);
        self.check_live(slot);
        slot
    }

    fn check_room(&self, parent: usize) -> Result<(), ContainerError> {
        let has_room = self.max_children == NO_MAXIMUM_CHILDREN
            || self.children_of(parent) < self.max_children;
        if !contract_warning!(
            has_room,
            "node at slot {parent} already has {} children, the new child was rejected",
            self.max_children
        ) {
            return Err(ContainerError::ChildLimitReached {
                max_children: self.max_children,
            });
        }
        Ok(())
    }

    /// Store `value` as a child of `parent`, before the sibling `before`
    /// (`None` appends).
    fn attach(&mut self, parent: usize, value: T, before: Option<usize>) -> usize {
        let prev = match before {
            Some(next) => self.arena.record(next).prev,
            None => children(&self.arena, parent).last(),
        };
        let slot = self
            .arena
            .allocate(value, Node::child_of(parent, prev, before));
        match prev {
            Some(p) => self.arena.record_mut(p).next = Some(slot),
            None => self.arena.record_mut(parent).first_child = Some(slot),
        }
        if let Some(next) = before {
            self.arena.record_mut(next).prev = Some(slot);
        }
        slot
    }

    /// Unhook `slot` from its parent and siblings. Its subtree stays
    /// attached to it.
    fn detach(&mut self, slot: usize) {
        let node = self.arena.record(slot);
        match (node.prev, node.parent) {
            (Some(prev), _) => self.arena.record_mut(prev).next = node.next,
            (None, Some(parent)) => self.arena.record_mut(parent).first_child = node.next,
            (None, None) => self.root = None,
        }
        if let Some(next) = node.next {
            self.arena.record_mut(next).prev = node.prev;
        }
    }

    /// Release `slot` and every descendant, each exactly once, using an
    /// explicit work-list.
    fn destroy_subtree(&mut self, slot: usize) -> usize {
        let mut pending: SmallVec<[usize; 16]> = SmallVec::new();
        pending.push(slot);
        let mut destroyed = 0;
        while let Some(current) = pending.pop() {
            pending.extend(children(&self.arena, current));
            self.arena.release(current);
            destroyed += 1;
        }
        log::debug!("removed a subtree of {destroyed} nodes");
        destroyed
    }
}

impl<T, C: Comparator<T>, A: SlotAllocator<T>> NTree<T, C, A> {
    /// Whether some node's element compares equal to `value`.
    pub fn contains(&self, value: &T) -> bool {
        !self.position_of(value).is_end()
    }

    /// Cursor at the first node in pre-order whose element equals `value`,
    /// or the forward end.
    pub fn position_of(&self, value: &T) -> Cursor {
        let found = self
            .pre_order_slots()
            .find(|&slot| self.comparator.equals(self.arena.value(slot), value));
        self.cursor(Position::from_slot(found, Position::ForwardEnd))
    }
}

impl<T: Clone, C, A: SlotAllocator<T>> NTree<T, C, A> {
    /// Bulk-copy this tree into `dest`, slot for slot. `dest` grows first
    /// if it is smaller.
    ///
    /// # Panics
    ///
    /// Contract error if `dest` allows fewer children per node.
    pub fn clone_to<C2>(&self, dest: &mut NTree<T, C2, A>) {
        contract_error!(
            dest.max_children >= self.max_children,
            "the destination tree allows {} children per node, the source needs {}",
            dest.max_children,
            self.max_children
        );
        self.arena.copy_to(&mut dest.arena);
        dest.root = self.root;
    }

    /// Make this tree a copy of `source`, keeping this tree's child limit
    /// and comparator.
    ///
    /// # Panics
    ///
    /// Contract error if this tree allows fewer children per node than
    /// `source`.
    pub fn assign_from<C2>(&mut self, source: &NTree<T, C2, A>) {
        source.clone_to(self);
    }
}

impl<T: Clone, C: Clone, A: SlotAllocator<T> + Clone> Clone for NTree<T, C, A> {
    /// A deep copy with a fresh identity.
    fn clone(&self) -> Self {
        Self {
            arena: self.arena.clone(),
            root: self.root,
            max_children: self.max_children,
            id: ContainerId::next(),
            comparator: self.comparator.clone(),
        }
    }
}

impl<T, C: Comparator<T>, A: SlotAllocator<T>> PartialEq for NTree<T, C, A> {
    /// Equal when both trees have the same shape and equal elements at
    /// every pre-order position.
    fn eq(&self, other: &Self) -> bool {
        self.count() == other.count()
            && self
                .pre_order_slots()
                .zip(other.pre_order_slots())
                .all(|(a, b)| {
                    self.arena.record(a).shape() == other.arena.record(b).shape()
                        && self
                            .comparator
                            .equals(self.arena.value(a), other.arena.value(b))
                })
    }
}

impl<T: fmt::Debug, C, A: SlotAllocator<T>> fmt::Debug for NTree<T, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NTree")
            .field("max_children", &self.max_children)
            .field(
                "pre_order",
                &self
                    .iter(TraversalOrder::DepthFirstPreOrder)
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
