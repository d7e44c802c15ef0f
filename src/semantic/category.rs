//! Canonical filter categories and their lookup tables.
//!
//! The tables here are the whole domain contract of the filter language:
//! which category names exist, which spellings are accepted for them, and
//! which keys the fixed-schema categories expose. They are plain statics and
//! are never written to.

use smol_str::SmolStr;
use std::fmt;
use std::str::FromStr;

use super::error::ValidationError;

/// Searchable columns of the runs table.
pub static SEARCHABLE_RUN_ATTRIBUTES: &[&str] = &[
    "run_id",
    "experiment_id",
    "run_name",
    "user_id",
    "status",
    "start_time",
    "end_time",
    "artifact_uri",
    "lifecycle_stage",
];

/// Alternate spellings accepted for `start_time`.
pub static ALTERNATE_NUMERIC_ATTRIBUTES: &[&str] = &["created", "Created"];

/// Alternate spellings accepted for `run_name`.
pub static ALTERNATE_STRING_ATTRIBUTES: &[&str] = &["run name", "Run name", "Run Name"];

/// Attribute keys that hold timestamps (milliseconds since the epoch).
pub static NUMERIC_ATTRIBUTES: &[&str] = &["start_time", "end_time", "created", "Created"];

/// Keys exposed by the dataset category.
pub static DATASET_ATTRIBUTES: &[&str] = &["name", "digest", "context"];

/// One of the five buckets a comparison's left-hand side resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Logged metrics; numeric values.
    Metric,
    /// Logged parameters; string values.
    Parameter,
    /// Run tags; string values.
    Tag,
    /// Run columns such as `status` or `start_time`.
    Attribute,
    /// Input datasets of a run.
    Dataset,
}

/// Which keys a category accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRule {
    /// User-defined names; any non-empty key.
    Unrestricted,
    /// A fixed schema.
    AllowList(&'static [&'static str]),
}

impl Category {
    /// All categories in alias-resolution priority order.
    pub const ALL: [Category; 5] = [
        Category::Metric,
        Category::Parameter,
        Category::Tag,
        Category::Attribute,
        Category::Dataset,
    ];

    /// Canonical name written back into validated comparisons.
    pub const fn name(self) -> &'static str {
        match self {
            Category::Metric => "metric",
            Category::Parameter => "parameter",
            Category::Tag => "tag",
            Category::Attribute => "attribute",
            Category::Dataset => "dataset",
        }
    }

    /// Alternate spellings that resolve to this category.
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Category::Metric => &["metrics"],
            Category::Parameter => &["parameters", "param", "params"],
            Category::Tag => &["tags"],
            Category::Attribute => &["attr", "attributes", "run"],
            Category::Dataset => &["datasets"],
        }
    }

    /// Key vocabulary for this category.
    pub const fn key_rule(self) -> KeyRule {
        match self {
            Category::Attribute => KeyRule::AllowList(SEARCHABLE_RUN_ATTRIBUTES),
            Category::Dataset => KeyRule::AllowList(DATASET_ATTRIBUTES),
            Category::Metric | Category::Parameter | Category::Tag => KeyRule::Unrestricted,
        }
    }

    /// Matches a canonical name exactly; aliases are not considered.
    pub fn from_canonical(name: &str) -> Option<Category> {
        Self::ALL.into_iter().find(|category| category.name() == name)
    }

    /// Matches an alias exactly, honoring the priority order.
    pub fn from_alias(alias: &str) -> Option<Category> {
        Self::ALL
            .into_iter()
            .find(|category| category.aliases().contains(&alias))
    }

    /// Canonical name as a `SmolStr`, without allocating.
    pub fn to_smol_str(self) -> SmolStr {
        SmolStr::new_static(self.name())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    /// Resolves canonical names and aliases, see
    /// [`resolve_category`](super::validator::resolve_category).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::validator::resolve_category(s)
    }
}

/// Returns true if `key` names a timestamp attribute.
pub fn is_numeric_attribute(key: &str) -> bool {
    NUMERIC_ATTRIBUTES.contains(&key)
}
