//! @ai:module:intent Declared alternative input field names for catalog metrics
//! @ai:module:layer domain
//! @ai:module:public_api AliasRule, aliases_for, is_alias_key
//! @ai:module:stateless true
//!
//! Older form revisions stored some measurements under different field names.
//! Each rule maps those fields onto a canonical metric key. The canonical key
//! wins when it carries a non-zero reading. Otherwise rules are tried in
//! declaration order and the first one with a non-zero reading is used; a
//! canonical zero stands when no rule has anything better.

use crate::catalog::metric::Category;
use serde::Serialize;

/// @ai:intent One mapping from legacy input fields to a canonical metric key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum AliasRule {
    /// The value under `from` is used for `to`.
    Rename {
        from: &'static str,
        to: &'static str,
    },
    /// The largest of the `sources` values is used for `to` (worst case wins).
    MaxOf {
        sources: &'static [&'static str],
        to: &'static str,
    },
    /// The value under `value_key` is routed to the target whose case matches
    /// the text under `selector_key` (case-insensitive).
    Selector {
        value_key: &'static str,
        selector_key: &'static str,
        cases: &'static [(&'static str, &'static str)],
    },
}

impl AliasRule {
    /// @ai:intent Input keys this rule reads
    /// @ai:effects pure
    pub fn source_keys(&self) -> Vec<&'static str> {
        match self {
            AliasRule::Rename { from, .. } => vec![*from],
            AliasRule::MaxOf { sources, .. } => sources.to_vec(),
            AliasRule::Selector {
                value_key,
                selector_key,
                ..
            } => vec![*value_key, *selector_key],
        }
    }

    /// @ai:intent Canonical keys this rule can fill
    /// @ai:effects pure
    pub fn target_keys(&self) -> Vec<&'static str> {
        match self {
            AliasRule::Rename { to, .. } | AliasRule::MaxOf { to, .. } => vec![*to],
            AliasRule::Selector { cases, .. } => cases.iter().map(|(_, target)| *target).collect(),
        }
    }
}

static AIR_ALIASES: [AliasRule; 1] = [AliasRule::Rename {
    from: "tvocs",
    to: "tvoc",
}];

static WATER_ALIASES: [AliasRule; 1] = [AliasRule::Rename {
    from: "leadInWater",
    to: "lead",
}];

static SURFACE_ALIASES: [AliasRule; 2] = [
    AliasRule::MaxOf {
        sources: &["leadPaintRoom1", "leadPaintRoom2"],
        to: "leadPaintXRF",
    },
    AliasRule::Rename {
        from: "mold",
        to: "surfaceMold",
    },
];

static DUST_ALIASES: [AliasRule; 1] = [AliasRule::Selector {
    value_key: "leadDust",
    selector_key: "surfaceType",
    cases: &[
        ("floor", "floorDust"),
        ("window sill", "windowSill"),
        ("window trough", "windowTrough"),
    ],
}];

/// @ai:intent Alias rules declared for a category, in precedence order
/// @ai:effects pure
pub fn aliases_for(category: Category) -> &'static [AliasRule] {
    match category {
        Category::Air => &AIR_ALIASES,
        Category::Water => &WATER_ALIASES,
        Category::Surface => &SURFACE_ALIASES,
        Category::Dust => &DUST_ALIASES,
    }
}

/// @ai:intent Check whether an input key is read by any alias rule of a category
/// @ai:effects pure
pub fn is_alias_key(category: Category, key: &str) -> bool {
    aliases_for(category)
        .iter()
        .any(|rule| rule.source_keys().contains(&key))
}
