//! Cursor positions and the two end sentinels.
//!
//! A [`Cursor`] is a detached token: it does not borrow its container.
//! The container interprets it (`advance`, `retreat`, `get_at`, ...) and
//! rejects cursors that carry another container's [`ContainerId`].

use std::fmt;

use crate::id::ContainerId;

/// Where a cursor stands.
///
/// Replaces the pair of reserved out-of-range integers with a closed
/// enumeration, so an end state can never be mistaken for a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Position {
    /// A live slot in the container's backing pool.
    Index(usize),
    /// One past the last element in forward traversal order.
    ForwardEnd,
    /// One before the first element in forward traversal order.
    BackwardEnd,
}

impl Position {
    /// The slot index, if this is not an end sentinel.
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Index(i) => Some(i),
            Self::ForwardEnd | Self::BackwardEnd => None,
        }
    }

    /// Whether this is either end sentinel.
    pub fn is_end(self) -> bool {
        self.index().is_none()
    }

    /// Map an optional slot to a position, using `end` for `None`.
    pub fn from_slot(slot: Option<usize>, end: Position) -> Self {
        slot.map_or(end, Self::Index)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "slot {i}"),
            Self::ForwardEnd => write!(f, "forward end"),
            Self::BackwardEnd => write!(f, "backward end"),
        }
    }
}

/// Traversal direction, used to ask which end a cursor has reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IterationDirection {
    /// First to last.
    Forward,
    /// Last to first.
    Backward,
}

/// Tree traversal orders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
    /// Visit a node, then each child subtree left to right.
    #[default]
    DepthFirstPreOrder,
}

/// A detached iterator token over some container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cursor {
    owner: ContainerId,
    position: Position,
}

impl Cursor {
    /// Create a cursor owned by `owner`. Containers mint these; client code
    /// normally obtains cursors from a container rather than building them.
    pub fn new(owner: ContainerId, position: Position) -> Self {
        Self { owner, position }
    }

    /// The container this cursor belongs to.
    pub fn owner(&self) -> ContainerId {
        self.owner
    }

    /// Current position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// The slot index, if the cursor is not at an end.
    pub fn index(&self) -> Option<usize> {
        self.position.index()
    }

    /// Same owner, new position.
    pub fn with_position(self, position: Position) -> Self {
        Self { position, ..self }
    }

    /// Whether the cursor is at either end.
    pub fn is_end(&self) -> bool {
        self.position.is_end()
    }

    /// Whether the cursor has run off the container in `direction`.
    pub fn is_end_in(&self, direction: IterationDirection) -> bool {
        matches!(
            (direction, self.position),
            (IterationDirection::Forward, Position::ForwardEnd)
                | (IterationDirection::Backward, Position::BackwardEnd)
        )
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in container {}", self.position, self.owner)
    }
}
