//! Mapping command implementation.
//!
//! Loads the upstream dataset and the form code table, builds the
//! canonical species mapping, and writes it to the data directory.

use clap::Args;

use crate::config::Project;
use crate::dataset::{load_dataset, DatasetSource};
use crate::error::Result;
use crate::mapping::{build_mapping, write_mapping, Exclusion, FallbackForm, MappingOutput};
use crate::output::{display_path, plural, Printer};
use crate::validation::{print_diagnostics, validate_mapping};

/// Fallback forms listed before truncating.
const FALLBACK_PREVIEW: usize = 20;

/// Diagnostics listed per code before truncating.
const DIAGNOSTIC_PREVIEW: usize = 5;

/// Build the species mapping from the upstream dataset
#[derive(Args, Debug, Default, Clone)]
pub struct MappingArgs {
    /// Dataset URL or local JSON file (overrides dataset_url in pogo.yaml)
    #[arg(long)]
    pub dataset: Option<String>,
}

pub async fn run(
    project: &Project,
    args: &MappingArgs,
    printer: &Printer,
) -> Result<MappingOutput> {
    let manifest = &project.manifest;

    let form_codes_path = manifest.form_codes_path();
    printer.status("Loading", &display_path(&form_codes_path));
    let table = project.form_codes()?;

    let source = DatasetSource::parse(args.dataset.as_deref().unwrap_or(&manifest.dataset_url));
    printer.status("Fetching", &source.to_string());
    let records = load_dataset(&source).await?;
    printer.info("Loaded", &plural(records.len(), "entry", "entries"));

    let output = build_mapping(&records, &table);

    if !output.fallback_forms.is_empty() {
        printer.info(
            "Unmapped",
            &format!(
                "{} using a synthesized code",
                plural(output.fallback_forms.len(), "form", "forms")
            ),
        );
        printer.preview(
            output
                .fallback_forms
                .iter()
                .map(|f| {
                    let dex = printer.dim(&format!("dex {}", f.dex));
                    format!("{} {}", fallback_line(f), dex)
                }),
            FALLBACK_PREVIEW,
        );
    }

    let map_path = manifest.species_map_path();
    write_mapping(&map_path, &output.entries)?;

    printer.success(
        "Mapped",
        &format!(
            "{} -> {}",
            plural(output.stats.mapped, "species", "species"),
            display_path(&map_path)
        ),
    );
    printer.info("Skipped", &skip_summary(&output));

    let diagnostics = validate_mapping(&output.entries);
    print_diagnostics(&diagnostics, printer, DIAGNOSTIC_PREVIEW);

    Ok(output)
}

/// e.g. "Mewtwo (Armored) -> pm150.fARMORED.icon.png [ARMORED]"
fn fallback_line(form: &FallbackForm) -> String {
    format!("{} ({}) -> {} [{}]", form.name, form.form, form.sprite_file, form.code)
}

/// e.g. "412 (shadow: 380, duplicate: 30, duplicate1500: 2)"
fn skip_summary(output: &MappingOutput) -> String {
    let reasons: Vec<String> = Exclusion::ALL
        .iter()
        .filter_map(|reason| {
            let n = output.stats.excluded_for(*reason);
            (n > 0).then(|| format!("{}: {}", reason, n))
        })
        .collect();

    if reasons.is_empty() {
        output.stats.excluded_total().to_string()
    } else {
        format!("{} ({})", output.stats.excluded_total(), reasons.join(", "))
    }
}
