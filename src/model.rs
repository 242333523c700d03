use crate::exp_core::branch::Branch;
use crate::exp_core::draft::DraftState;
use crate::exp_core::validate::{RATIO_MAX, RATIO_MIN};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// On-disk experiment design document (YAML or JSON).
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct DesignFile {
    #[serde(default)]
    pub is_branched_addon: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addon_experiment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addon_release_url: Option<String>,
    #[serde(default)]
    pub variants: Vec<VariantFile>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VariantFile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default = "default_ratio")]
    pub ratio: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_control: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addon_release_url: Option<String>,
}

fn default_ratio() -> u32 {
    50
}

/// Derive a slug from a display name: lowercase, runs of anything that is not
/// alphanumeric collapse to a single dash.
pub fn slugify(name: &str) -> String {
    let mut out = String::new();
    let mut pending_dash = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            for c in ch.to_lowercase() {
                out.push(c);
            }
        } else {
            pending_dash = true;
        }
    }
    out
}

impl VariantFile {
    fn into_branch(self) -> Branch {
        let slug = match self.slug {
            Some(s) if !s.trim().is_empty() => s,
            _ => slugify(&self.name),
        };
        Branch {
            name: self.name,
            slug,
            ratio: self.ratio.to_string(),
            description: self.description,
            is_control: self.is_control,
            addon_release_url: self.addon_release_url.unwrap_or_default(),
        }
    }
}

impl DesignFile {
    pub fn into_draft(self) -> DraftState {
        let is_branched = self.is_branched_addon;
        let branches: Vec<Branch> = self.variants.into_iter().map(|v| v.into_branch()).collect();
        let mut draft = DraftState::from_branches(is_branched, branches);
        draft.addon_experiment_id = self.addon_experiment_id.unwrap_or_default();
        draft.addon_release_url = self.addon_release_url.unwrap_or_default();
        draft
    }

    /// Build the wire document from a draft. Only variant-owned fields are
    /// written, so values retained across a mode switch never leak into the
    /// document. Expects a validated draft; a non-numeric ratio is an error.
    pub fn from_draft(draft: &DraftState) -> Result<Self> {
        let branched = draft.is_branched_addon;
        let mut variants = Vec::with_capacity(draft.branches.len());
        for (i, entry) in draft.branches.iter().enumerate() {
            let ratio: u32 = entry
                .data
                .ratio
                .trim()
                .parse()
                .with_context(|| format!("variants[{i}]: ratio is not an integer"))?;
            variants.push(VariantFile {
                name: entry.data.name.clone(),
                slug: Some(entry.data.slug.clone()),
                ratio,
                description: entry.data.description.clone(),
                is_control: entry.data.is_control,
                addon_release_url: branched.then(|| entry.data.addon_release_url.clone()),
            });
        }
        Ok(DesignFile {
            is_branched_addon: branched,
            addon_experiment_id: (!branched).then(|| draft.addon_experiment_id.clone()),
            addon_release_url: (!branched).then(|| draft.addon_release_url.clone()),
            variants,
        })
    }
}

/// Structural checks applied when a document is loaded, before it is turned
/// into form state. Errors name the offending variant by index.
pub(crate) fn validate_design_file(file: &DesignFile) -> std::result::Result<(), String> {
    use std::collections::HashSet;
    let mut slugs = HashSet::new();
    for (i, v) in file.variants.iter().enumerate() {
        if let Some(slug) = v.slug.as_deref() {
            if !slug.trim().is_empty() && !slugs.insert(slug.trim().to_string()) {
                return Err(format!("duplicate variant slug '{slug}' at index {i}"));
            }
        }
        if !(RATIO_MIN..=RATIO_MAX).contains(&v.ratio) {
            return Err(format!(
                "variants[{}] ('{}'): ratio {} outside {}..={}",
                i, v.name, v.ratio, RATIO_MIN, RATIO_MAX
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_document_round_trips_through_draft() {
        let yaml = r#"
is_branched_addon: false
addon_experiment_id: exp-42
addon_release_url: https://example.com/addon.xpi
variants:
  - name: Control
    slug: control
    ratio: 50
    description: baseline
    is_control: true
  - name: Treatment
    slug: treatment
    ratio: 50
    description: the change
"#;
        let file: DesignFile = serde_yaml::from_str(yaml).unwrap();
        validate_design_file(&file).unwrap();
        let draft = file.into_draft();
        assert_eq!(draft.addon_experiment_id, "exp-42");
        assert_eq!(draft.branches.len(), 2);
        assert!(draft.branches.get(0).unwrap().data.is_control);

        let out = DesignFile::from_draft(&draft).unwrap();
        assert_eq!(out.variants.len(), 2);
        assert_eq!(out.variants[1].slug.as_deref(), Some("treatment"));
        assert_eq!(out.variants[1].ratio, 50);
        // Generic mode: per-branch add-on URLs are not written
        assert!(out.variants.iter().all(|v| v.addon_release_url.is_none()));
    }

    #[test]
    fn missing_slugs_are_derived_from_names() {
        let file = DesignFile {
            variants: vec![VariantFile {
                name: "Terrific Branch 2".into(),
                slug: None,
                ratio: 50,
                description: String::new(),
                is_control: false,
                addon_release_url: None,
            }],
            ..DesignFile::default()
        };
        let draft = file.into_draft();
        assert_eq!(
            draft.branches.get(0).unwrap().data.slug,
            "terrific-branch-2"
        );
        // Padded up to the two-branch minimum
        assert_eq!(draft.branches.len(), 2);
    }

    #[test]
    fn validate_detects_duplicate_slugs() {
        let v = VariantFile {
            name: "A".into(),
            slug: Some("same".into()),
            ratio: 50,
            description: String::new(),
            is_control: false,
            addon_release_url: None,
        };
        let file = DesignFile {
            variants: vec![v.clone(), v],
            ..DesignFile::default()
        };
        let err = validate_design_file(&file).unwrap_err();
        assert!(err.contains("duplicate variant slug"));
    }

    #[test]
    fn validate_rejects_out_of_range_ratio() {
        let file = DesignFile {
            variants: vec![VariantFile {
                name: "A".into(),
                slug: Some("a".into()),
                ratio: 0,
                description: String::new(),
                is_control: true,
                addon_release_url: None,
            }],
            ..DesignFile::default()
        };
        let err = validate_design_file(&file).unwrap_err();
        assert!(err.contains("ratio 0"));
    }

    #[test]
    fn branched_draft_writes_per_branch_urls_only() {
        let mut draft = DesignFile {
            is_branched_addon: true,
            variants: vec![
                VariantFile {
                    name: "A".into(),
                    slug: Some("a".into()),
                    ratio: 50,
                    description: "d".into(),
                    is_control: true,
                    addon_release_url: Some("https://example.com/a.xpi".into()),
                },
                VariantFile {
                    name: "B".into(),
                    slug: Some("b".into()),
                    ratio: 50,
                    description: "d".into(),
                    is_control: false,
                    addon_release_url: Some("https://example.com/b.xpi".into()),
                },
            ],
            ..DesignFile::default()
        }
        .into_draft();
        draft.addon_experiment_id = "stale-from-single-mode".into();
        let out = DesignFile::from_draft(&draft).unwrap();
        assert!(out.addon_experiment_id.is_none());
        assert_eq!(
            out.variants[0].addon_release_url.as_deref(),
            Some("https://example.com/a.xpi")
        );
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Great Branch"), "great-branch");
        assert_eq!(slugify("  spaced   out  "), "spaced-out");
        assert_eq!(slugify("Mixed_CASE-3"), "mixed-case-3");
    }
}
