use crate::exp_core::branch::Branch;

/// Which group of input fields a branch shows, chosen by experiment shape.
/// Selected per render from `is_branched_addon`; never stored on a branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldSetVariant {
    Generic,
    BranchedAddon,
}

pub const DEFAULT_RATIO: &str = "50";

impl FieldSetVariant {
    pub fn from_flag(is_branched_addon: bool) -> Self {
        if is_branched_addon {
            FieldSetVariant::BranchedAddon
        } else {
            FieldSetVariant::Generic
        }
    }

    /// The field subset this variant owns, in display order.
    pub fn fields(self) -> &'static [BranchField] {
        match self {
            FieldSetVariant::Generic => &[
                BranchField::Name,
                BranchField::Slug,
                BranchField::Ratio,
                BranchField::Description,
                BranchField::IsControl,
            ],
            FieldSetVariant::BranchedAddon => &[
                BranchField::Name,
                BranchField::Slug,
                BranchField::Ratio,
                BranchField::Description,
                BranchField::AddonReleaseUrl,
                BranchField::IsControl,
            ],
        }
    }

    pub fn owns(self, field: BranchField) -> bool {
        self.fields().contains(&field)
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldSetVariant::Generic => "Single add-on",
            FieldSetVariant::BranchedAddon => "Branched add-on",
        }
    }

    /// Defaults for a freshly added branch under this variant.
    pub fn default_branch(self) -> Branch {
        match self {
            FieldSetVariant::Generic => Branch {
                ratio: DEFAULT_RATIO.into(),
                ..Branch::default()
            },
            FieldSetVariant::BranchedAddon => Branch {
                ratio: DEFAULT_RATIO.into(),
                ..Branch::default()
            },
        }
    }
}

/// One editable field on a branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BranchField {
    Name,
    Slug,
    Ratio,
    Description,
    IsControl,
    AddonReleaseUrl,
}

impl BranchField {
    pub fn label(self) -> &'static str {
        match self {
            BranchField::Name => "Name",
            BranchField::Slug => "Slug",
            BranchField::Ratio => "Ratio",
            BranchField::Description => "Description",
            BranchField::IsControl => "Control branch",
            BranchField::AddonReleaseUrl => "Add-on release URL",
        }
    }

    pub fn is_flag(self) -> bool {
        matches!(self, BranchField::IsControl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_follows_mode_flag() {
        assert_eq!(FieldSetVariant::from_flag(false), FieldSetVariant::Generic);
        assert_eq!(
            FieldSetVariant::from_flag(true),
            FieldSetVariant::BranchedAddon
        );
    }

    #[test]
    fn generic_does_not_own_addon_url() {
        assert!(!FieldSetVariant::Generic.owns(BranchField::AddonReleaseUrl));
        assert!(FieldSetVariant::BranchedAddon.owns(BranchField::AddonReleaseUrl));
        // Both shapes carry the shared fields
        for v in [FieldSetVariant::Generic, FieldSetVariant::BranchedAddon] {
            assert!(v.owns(BranchField::Name));
            assert!(v.owns(BranchField::Slug));
            assert!(v.owns(BranchField::Ratio));
            assert!(v.owns(BranchField::Description));
            assert!(v.owns(BranchField::IsControl));
        }
    }

    #[test]
    fn default_branch_seeds_ratio() {
        let b = FieldSetVariant::BranchedAddon.default_branch();
        assert_eq!(b.ratio, DEFAULT_RATIO);
        assert!(b.name.is_empty());
        assert!(!b.is_control);
    }
}
