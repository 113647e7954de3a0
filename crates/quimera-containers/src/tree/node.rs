//! Node records of the tree topology.

/// Position of one element in the tree. `None` means "no such neighbour".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Node {
    pub(crate) parent: Option<usize>,
    pub(crate) next: Option<usize>,
    pub(crate) prev: Option<usize>,
    pub(crate) first_child: Option<usize>,
}

impl Node {
    /// A node appended under `parent` after `prev`, before `next`.
    pub(crate) fn child_of(parent: usize, prev: Option<usize>, next: Option<usize>) -> Self {
        Self {
            parent: Some(parent),
            next,
            prev,
            first_child: None,
        }
    }

    /// Which links are present, in (parent, next, prev, first child) order.
    pub(crate) fn shape(&self) -> [bool; 4] {
        [
            self.parent.is_some(),
            self.next.is_some(),
            self.prev.is_some(),
            self.first_child.is_some(),
        ]
    }
}
