//! Species mapping: upstream records to the canonical sprite mapping.
//!
//! The mapping is the single source of truth for every later step. It is
//! rebuilt from scratch on each run, sorted by `(dex, form)`, and carries
//! the exact sprite filenames that fetching, optimizing, and stylesheet
//! generation use.
//!
//! # Example
//!
//! ```ignore
//! use pogo_icons::mapping::build_mapping;
//!
//! let output = build_mapping(&records, &form_codes);
//! println!("Mapped {} species", output.entries.len());
//! ```

mod entry;
mod form;
mod normalize;
mod record;

use std::collections::{BTreeMap, HashSet};

use crate::config::FormCodeTable;

pub use entry::{read_mapping, write_mapping, MappingEntry};
pub use form::{fallback_code, resolve_form_code, FormCode, Resolution, ResolutionSource};
pub use normalize::{class_name, parse_name_and_form};
pub use record::{Classification, Exclusion, RawSpeciesRecord, Tag};

/// Counts for one mapping build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingStats {
    /// Records received from upstream.
    pub input: usize,
    /// Entries in the mapping.
    pub mapped: usize,
    /// Excluded records per reason.
    pub excluded: BTreeMap<Exclusion, usize>,
}

impl MappingStats {
    pub fn excluded_total(&self) -> usize {
        self.excluded.values().sum()
    }

    pub fn excluded_for(&self, reason: Exclusion) -> usize {
        self.excluded.get(&reason).copied().unwrap_or(0)
    }
}

/// A class name seen again after its first occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateClassName {
    pub class_name: String,
    /// Upstream id of the repeated (not the first) entry.
    pub upstream_id: String,
}

/// An entry whose sprite code came from the fallback synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackForm {
    pub dex: u32,
    pub name: String,
    pub form: String,
    pub code: FormCode,
    pub sprite_file: String,
}

/// Result of building the mapping.
#[derive(Debug, Clone, Default)]
pub struct MappingOutput {
    pub entries: Vec<MappingEntry>,
    pub stats: MappingStats,
    pub duplicates: Vec<DuplicateClassName>,
    pub fallback_forms: Vec<FallbackForm>,
}

/// Build the canonical mapping from upstream records.
pub fn build_mapping(records: &[RawSpeciesRecord], table: &FormCodeTable) -> MappingOutput {
    let mut stats = MappingStats {
        input: records.len(),
        ..Default::default()
    };
    let mut entries = Vec::with_capacity(records.len());

    for record in records {
        let classification = record.classification();
        if let Some(reason) = classification.exclusion {
            *stats.excluded.entry(reason).or_insert(0) += 1;
            continue;
        }

        entries.push(map_record(record, classification.tags, table));
    }

    // Stable: equal (dex, form) keep upstream order
    entries.sort_by(|a, b| a.dex.cmp(&b.dex).then_with(|| a.form.cmp(&b.form)));
    stats.mapped = entries.len();

    let duplicates = find_duplicates(&entries);
    let fallback_forms = entries
        .iter()
        .filter(|e| e.form_fallback)
        .map(|e| FallbackForm {
            dex: e.dex,
            name: e.name.clone(),
            form: e.form.clone(),
            code: resolve_form_code(e.dex, &e.form, table).code,
            sprite_file: e.sprite_file.clone(),
        })
        .collect();

    MappingOutput {
        entries,
        stats,
        duplicates,
        fallback_forms,
    }
}

fn map_record(record: &RawSpeciesRecord, tags: Vec<Tag>, table: &FormCodeTable) -> MappingEntry {
    let (name, form) = parse_name_and_form(&record.species_name);
    let resolution = resolve_form_code(record.dex, &form, table);

    MappingEntry {
        class_name: class_name(&name, &form),
        dex: record.dex,
        upstream_id: record.species_id.clone(),
        sprite_file: resolution.code.sprite_file(record.dex),
        shiny_sprite_file: resolution.code.shiny_sprite_file(record.dex),
        tags,
        form_fallback: resolution.is_fallback(),
        name,
        form,
    }
}

/// Every class name occurrence after the first, in mapping order.
pub fn find_duplicates(entries: &[MappingEntry]) -> Vec<DuplicateClassName> {
    let mut seen = HashSet::new();

    entries
        .iter()
        .filter(|e| !seen.insert(e.class_name.as_str()))
        .map(|e| DuplicateClassName {
            class_name: e.class_name.clone(),
            upstream_id: e.upstream_id.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table() -> FormCodeTable {
        FormCodeTable::parse(
            r#"{
                "formMap": {
                    "Libre": "cLIBRE",
                    "Mega X": "MEGA_X",
                    "Mega Y": "MEGA_Y",
                    "Normal": null
                },
                "defaultForms": { "386": "Normal" }
            }"#,
        )
        .unwrap()
    }

    fn sample() -> Vec<RawSpeciesRecord> {
        vec![
            RawSpeciesRecord::new("Charizard (Mega Y)", 6, "charizard_mega_y", &["mega"]),
            RawSpeciesRecord::new("Pikachu (Libre)", 25, "pikachu_libre", &[]),
            RawSpeciesRecord::new("Charizard (Shadow)", 6, "charizard_shadow", &["shadow"]),
            RawSpeciesRecord::new("Bulbasaur", 1, "bulbasaur", &["starter"]),
            RawSpeciesRecord::new("Charizard (Mega X)", 6, "charizard_mega_x", &["mega"]),
            RawSpeciesRecord::new("Charizard", 6, "charizard", &[]),
            RawSpeciesRecord::new("Deoxys (Normal)", 386, "deoxys", &["mythical"]),
            RawSpeciesRecord::new("Bulbasaur", 1, "bulbasaur_xl", &["duplicate"]),
            RawSpeciesRecord::new("Pikachu", 25, "pikachu_xs", &["duplicate1500"]),
            RawSpeciesRecord::new("Mewtwo (Armored)", 150, "mewtwo_a", &["legendary"]),
            RawSpeciesRecord::new(
                "Pikachu (5th Anniversary)",
                25,
                "pikachu_5th",
                &["teambuilderexclude"],
            ),
        ]
    }

    #[test]
    fn test_excluded_plus_mapped_equals_input() {
        let output = build_mapping(&sample(), &table());

        assert_eq!(output.stats.input, 11);
        assert_eq!(output.stats.mapped, 7);
        assert_eq!(output.stats.excluded_total(), 4);
        assert_eq!(output.stats.excluded_for(Exclusion::Shadow), 1);
        assert_eq!(output.stats.excluded_for(Exclusion::Duplicate), 1);
        assert_eq!(output.stats.excluded_for(Exclusion::DuplicateAtMaxRank), 1);
        assert_eq!(output.stats.excluded_for(Exclusion::TeambuilderExclude), 1);
        assert_eq!(
            output.stats.input,
            output.stats.mapped + output.stats.excluded_total()
        );
        assert!(output.entries.iter().all(|e| e.upstream_id != "charizard_shadow"));
    }

    #[test]
    fn test_sorted_by_dex_then_form() {
        let output = build_mapping(&sample(), &table());
        let order: Vec<(u32, &str)> = output
            .entries
            .iter()
            .map(|e| (e.dex, e.form.as_str()))
            .collect();

        assert_eq!(
            order,
            vec![
                (1, ""),
                (6, ""),
                (6, "Mega X"),
                (6, "Mega Y"),
                (25, "Libre"),
                (150, "Armored"),
                (386, "Normal"),
            ]
        );
    }

    #[test]
    fn test_rebuild_is_identical() {
        let a = build_mapping(&sample(), &table());
        let b = build_mapping(&sample(), &table());

        assert_eq!(
            serde_json::to_string_pretty(&a.entries).unwrap(),
            serde_json::to_string_pretty(&b.entries).unwrap()
        );
    }

    #[test]
    fn test_entry_fields() {
        let output = build_mapping(&sample(), &table());

        let mega_x = &output.entries[2];
        assert_eq!(mega_x.name, "Charizard");
        assert_eq!(mega_x.form, "Mega X");
        assert_eq!(mega_x.class_name, "charizard-mega-x");
        assert_eq!(mega_x.sprite_file, "pm6.fMEGA_X.icon.png");
        assert_eq!(mega_x.shiny_sprite_file, "pm6.fMEGA_X.s.icon.png");
        assert_eq!(mega_x.tags, vec![Tag::Mega]);
        assert!(!mega_x.form_fallback);

        let libre = &output.entries[4];
        assert_eq!(libre.sprite_file, "pm25.cLIBRE.icon.png");
        assert_eq!(libre.upstream_id, "pikachu_libre");

        let deoxys = &output.entries[6];
        assert_eq!(deoxys.class_name, "deoxys-normal");
        assert_eq!(deoxys.sprite_file, "pm386.icon.png");
        assert_eq!(deoxys.tags, vec![Tag::Mythical]);

        let bulbasaur = &output.entries[0];
        assert_eq!(bulbasaur.sprite_file, "pm1.icon.png");
        assert!(bulbasaur.tags.is_empty());
    }

    #[test]
    fn test_fallback_forms_are_flagged() {
        let output = build_mapping(&sample(), &table());

        assert_eq!(output.fallback_forms.len(), 1);
        let fallback = &output.fallback_forms[0];
        assert_eq!(fallback.dex, 150);
        assert_eq!(fallback.form, "Armored");
        assert_eq!(fallback.code, FormCode::Form("ARMORED".to_string()));
        assert_eq!(fallback.sprite_file, "pm150.fARMORED.icon.png");

        let flagged: Vec<&str> = output
            .entries
            .iter()
            .filter(|e| e.form_fallback)
            .map(|e| e.upstream_id.as_str())
            .collect();
        assert_eq!(flagged, vec!["mewtwo_a"]);
    }

    #[test]
    fn test_duplicate_class_names_reported_per_extra_occurrence() {
        let records = vec![
            RawSpeciesRecord::new("Mr. Mime", 122, "mr_mime", &[]),
            RawSpeciesRecord::new("Mr Mime", 122, "mr_mime_alt", &[]),
            RawSpeciesRecord::new("Mr: Mime", 122, "mr_mime_third", &[]),
            RawSpeciesRecord::new("Mime Jr.", 439, "mime_jr", &[]),
        ];

        let output = build_mapping(&records, &FormCodeTable::default());

        assert_eq!(output.entries.len(), 4);
        assert_eq!(
            output.duplicates,
            vec![
                DuplicateClassName {
                    class_name: "mr-mime".to_string(),
                    upstream_id: "mr_mime_alt".to_string(),
                },
                DuplicateClassName {
                    class_name: "mr-mime".to_string(),
                    upstream_id: "mr_mime_third".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_no_duplicates_for_distinct_names() {
        let output = build_mapping(&sample(), &table());
        assert!(output.duplicates.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let output = build_mapping(&[], &table());
        assert!(output.entries.is_empty());
        assert_eq!(output.stats, MappingStats::default());
    }
}
