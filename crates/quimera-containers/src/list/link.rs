//! Link records of the list chain.

/// Position of one element in the chain. `None` in `prev` is the backward
/// end; `None` in `next` is the forward end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Link {
    pub(crate) prev: Option<usize>,
    pub(crate) next: Option<usize>,
}

impl Link {
    pub(crate) fn new(prev: Option<usize>, next: Option<usize>) -> Self {
        Self { prev, next }
    }
}
