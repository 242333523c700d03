use crate::exp_core::draft::DraftError;
use crate::exp_core::variant::{BranchField, FieldSetVariant};

/// Stable, position-independent identity for a branch. Keys are assigned from
/// a per-list monotonic counter and survive reorders and sibling removals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchKey(u64);

impl BranchKey {
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// One experiment arm. `ratio` is edited as text and validated as an integer
/// percentage; `addon_release_url` is only meaningful under the branched
/// add-on variant but is retained (not stripped) when the mode changes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Branch {
    pub name: String,
    pub slug: String,
    pub ratio: String,
    pub description: String,
    pub is_control: bool,
    pub addon_release_url: String,
}

/// Validation messages for one branch, mirroring the branch's field shape.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BranchErrors {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub ratio: Option<String>,
    pub description: Option<String>,
    pub addon_release_url: Option<String>,
}

impl BranchErrors {
    pub fn is_clean(&self) -> bool {
        self.name.is_none()
            && self.slug.is_none()
            && self.ratio.is_none()
            && self.description.is_none()
            && self.addon_release_url.is_none()
    }

    pub fn get(&self, field: BranchField) -> Option<&str> {
        match field {
            BranchField::Name => self.name.as_deref(),
            BranchField::Slug => self.slug.as_deref(),
            BranchField::Ratio => self.ratio.as_deref(),
            BranchField::Description => self.description.as_deref(),
            BranchField::AddonReleaseUrl => self.addon_release_url.as_deref(),
            BranchField::IsControl => None,
        }
    }

    pub fn set(&mut self, field: BranchField, msg: Option<String>) {
        match field {
            BranchField::Name => self.name = msg,
            BranchField::Slug => self.slug = msg,
            BranchField::Ratio => self.ratio = msg,
            BranchField::Description => self.description = msg,
            BranchField::AddonReleaseUrl => self.addon_release_url = msg,
            // The control flag has no message slot
            BranchField::IsControl => {}
        }
    }
}

/// A branch and its validation errors as one record. Keeping the pair in a
/// single entry makes index drift between data and errors unrepresentable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BranchEntry {
    pub key: BranchKey,
    pub data: Branch,
    pub errors: BranchErrors,
}

/// The ordered branch collection. All structural mutation goes through the
/// methods below; each either succeeds atomically or leaves the list intact.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BranchList {
    entries: Vec<BranchEntry>,
    next_key: u64,
}

impl BranchList {
    /// An experiment needs a control and at least one treatment.
    pub const MIN_BRANCHES: usize = 2;

    pub fn new() -> Self {
        Self::default()
    }

    /// Build from externally supplied branches, padding with defaults up to
    /// the minimum so the form never shows an empty arm list.
    pub fn from_branches(branches: Vec<Branch>, variant: FieldSetVariant) -> Self {
        let mut list = Self::new();
        for b in branches {
            list.push(b);
        }
        while list.len() < Self::MIN_BRANCHES {
            list.push(variant.default_branch());
        }
        list
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&BranchEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BranchEntry> {
        self.entries.iter()
    }

    #[allow(dead_code)]
    pub fn position_of(&self, key: BranchKey) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }

    /// Append a branch with a fresh key and an empty error set.
    pub fn push(&mut self, data: Branch) -> BranchKey {
        let key = BranchKey(self.next_key);
        self.next_key += 1;
        self.entries.push(BranchEntry {
            key,
            data,
            errors: BranchErrors::default(),
        });
        key
    }

    pub fn push_default(&mut self, variant: FieldSetVariant) -> BranchKey {
        self.push(variant.default_branch())
    }

    /// Remove the entry at `index`. Refuses to drop below the minimum.
    pub fn remove(&mut self, index: usize) -> Result<BranchEntry, DraftError> {
        if index >= self.entries.len() {
            return Err(DraftError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        if self.entries.len() <= Self::MIN_BRANCHES {
            return Err(DraftError::MinimumBranchCount {
                min: Self::MIN_BRANCHES,
            });
        }
        Ok(self.entries.remove(index))
    }

    /// Move the entry at `from` so it ends up at `to`; siblings keep order.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), DraftError> {
        let len = self.entries.len();
        if from >= len {
            return Err(DraftError::IndexOutOfRange { index: from, len });
        }
        if to >= len {
            return Err(DraftError::IndexOutOfRange { index: to, len });
        }
        if from != to {
            let entry = self.entries.remove(from);
            self.entries.insert(to, entry);
        }
        Ok(())
    }

    /// Replace one text field value on the branch at `index`.
    pub fn set_text(
        &mut self,
        index: usize,
        field: BranchField,
        value: String,
    ) -> Result<(), DraftError> {
        let entry = self.entry_mut(index)?;
        match field {
            BranchField::Name => entry.data.name = value,
            BranchField::Slug => entry.data.slug = value,
            BranchField::Ratio => entry.data.ratio = value,
            BranchField::Description => entry.data.description = value,
            BranchField::AddonReleaseUrl => entry.data.addon_release_url = value,
            // The control flag is not a text field; see mark_control
            BranchField::IsControl => {}
        }
        Ok(())
    }

    /// Radio semantics: mark one branch as control, clear the rest.
    pub fn mark_control(&mut self, index: usize) -> Result<(), DraftError> {
        if index >= self.entries.len() {
            return Err(DraftError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.data.is_control = i == index;
        }
        Ok(())
    }

    pub(crate) fn entry_mut(&mut self, index: usize) -> Result<&mut BranchEntry, DraftError> {
        let len = self.entries.len();
        self.entries
            .get_mut(index)
            .ok_or(DraftError::IndexOutOfRange { index, len })
    }
}
