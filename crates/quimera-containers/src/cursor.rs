//! Ownership checks shared by every container's cursor operations.

use quimera_core::{contract, contract_error, ContainerError, ContainerId, Cursor};

#[track_caller]
pub(crate) fn check_owner(owner: ContainerId, cursor: Cursor) {
    contract_error!(
        cursor.owner() == owner,
        "the cursor belongs to container {}, not to container {owner}",
        cursor.owner()
    );
}

/// The slot a cursor designates. Ends have no element.
#[track_caller]
pub(crate) fn element_slot(owner: ContainerId, cursor: Cursor) -> usize {
    check_owner(owner, cursor);
    let Some(slot) = cursor.index() else {
        contract::error(
            "!cursor.is_end()",
            format_args!(
                "the cursor points to the {}, there is no element there",
                cursor.position()
            ),
        );
    };
    slot
}

/// Non-panicking variant of [`element_slot`].
pub(crate) fn try_element_slot(
    owner: ContainerId,
    cursor: Cursor,
) -> Result<usize, ContainerError> {
    if cursor.owner() != owner {
        return Err(ContainerError::ForeignCursor {
            expected: owner,
            found: cursor.owner(),
        });
    }
    cursor.index().ok_or(ContainerError::EndPosition)
}
