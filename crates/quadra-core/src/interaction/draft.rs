//! Draft/saved editing state.

/// Holds the last-saved copy of an entity and, while editing, a draft.
///
/// The draft is promoted to saved only by [`EditDraft::commit`], which
/// callers invoke after the backend accepted the save. A failed save
/// leaves the draft (and the user's input) intact; cancel discards it.
#[derive(Debug, Clone, PartialEq)]
pub struct EditDraft<T: Clone> {
    saved: T,
    draft: Option<T>,
}

impl<T: Clone> EditDraft<T> {
    pub fn new(saved: T) -> Self {
        Self { saved, draft: None }
    }

    /// The last-saved copy.
    pub fn saved(&self) -> &T {
        &self.saved
    }

    /// Whether an edit is in progress.
    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// Enters edit mode, seeding the draft from the saved copy.
    /// Re-entering while already editing keeps the current draft.
    pub fn begin_edit(&mut self) {
        if self.draft.is_none() {
            self.draft = Some(self.saved.clone());
        }
    }

    /// The draft being edited, if in edit mode.
    pub fn draft(&self) -> Option<&T> {
        self.draft.as_ref()
    }

    /// Mutable access to the draft for field edits.
    pub fn draft_mut(&mut self) -> Option<&mut T> {
        self.draft.as_mut()
    }

    /// Promotes the draft to saved and exits edit mode.
    ///
    /// Call only after the save round-trip succeeded. A commit outside
    /// edit mode is a no-op.
    pub fn commit(&mut self) {
        if let Some(draft) = self.draft.take() {
            self.saved = draft;
        }
    }

    /// Discards the draft and reverts to the saved copy.
    pub fn cancel(&mut self) {
        self.draft = None;
    }
}
