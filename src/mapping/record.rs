//! Upstream species records and their typed classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One species entry from the PvPoke gamemaster.
///
/// Only the fields the mapping needs are read; everything else in the
/// upstream object is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSpeciesRecord {
    /// Display name, possibly with a parenthetical form suffix.
    pub species_name: String,

    /// National dex number.
    pub dex: u32,

    /// Stable upstream slug (e.g. `pikachu_libre`).
    pub species_id: String,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl RawSpeciesRecord {
    pub fn new(species_name: &str, dex: u32, species_id: &str, tags: &[&str]) -> Self {
        Self {
            species_name: species_name.to_string(),
            dex,
            species_id: species_id.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Classify the record's tags.
    pub fn classification(&self) -> Classification {
        Classification::from_tags(&self.tags)
    }
}

/// Why a record was left out of the mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Exclusion {
    /// Shadow variants render as an effect over the normal sprite.
    Shadow,
    /// Alternate competitive entry for an already-listed species.
    Duplicate,
    /// Duplicate that only exists for the max-rank league.
    DuplicateAtMaxRank,
    /// Hidden from the upstream team builder.
    TeambuilderExclude,
}

impl Exclusion {
    pub const ALL: [Exclusion; 4] = [
        Exclusion::Shadow,
        Exclusion::Duplicate,
        Exclusion::DuplicateAtMaxRank,
        Exclusion::TeambuilderExclude,
    ];

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "shadow" => Some(Exclusion::Shadow),
            "duplicate" => Some(Exclusion::Duplicate),
            "duplicate1500" => Some(Exclusion::DuplicateAtMaxRank),
            "teambuilderexclude" | "teambuilder-exclude" => Some(Exclusion::TeambuilderExclude),
            _ => None,
        }
    }

    /// The upstream tag for this reason.
    pub fn tag(&self) -> &'static str {
        match self {
            Exclusion::Shadow => "shadow",
            Exclusion::Duplicate => "duplicate",
            Exclusion::DuplicateAtMaxRank => "duplicate1500",
            Exclusion::TeambuilderExclude => "teambuilderexclude",
        }
    }
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Tags carried through to the mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Legendary,
    Mythical,
    Mega,
    #[serde(rename = "ultrabeast")]
    UltraBeast,
}

impl Tag {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "legendary" => Some(Tag::Legendary),
            "mythical" => Some(Tag::Mythical),
            "mega" => Some(Tag::Mega),
            "ultrabeast" => Some(Tag::UltraBeast),
            _ => None,
        }
    }
}

/// Tag-derived flags, computed once per record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// First matching exclusion reason, in [`Exclusion::ALL`] order.
    pub exclusion: Option<Exclusion>,
    /// Retained tags in upstream order, without repeats.
    pub tags: Vec<Tag>,
}

impl Classification {
    pub fn from_tags(raw: &[String]) -> Self {
        let exclusion = Exclusion::ALL
            .into_iter()
            .find(|reason| raw.iter().any(|t| Exclusion::from_tag(t) == Some(*reason)));

        let mut tags = Vec::new();
        for tag in raw.iter().filter_map(|t| Tag::from_tag(t)) {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        Self { exclusion, tags }
    }
}
