//! Form code resolution and sprite filename construction.
//!
//! PokeMiners names sprites `pm{dex}[.{suffix}][.s].icon.png`. The suffix is
//! absent for a species' default look, `c…` for costumes, and `f…` for
//! forms.

use std::fmt;

use crate::config::FormCodeTable;

/// The resolved suffix shape for a species variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormCode {
    /// Default look, no suffix.
    NoSuffix,
    /// Costume code, written verbatim (e.g. `cLIBRE`).
    Costume(String),
    /// Form code, written with an `f` prefix (e.g. `MEGA_X` -> `fMEGA_X`).
    Form(String),
}

impl FormCode {
    /// Classify a raw short code. Costume codes start with a lowercase `c`.
    pub fn from_code(code: &str) -> Self {
        if code.is_empty() {
            FormCode::NoSuffix
        } else if code.starts_with('c') {
            FormCode::Costume(code.to_string())
        } else {
            FormCode::Form(code.to_string())
        }
    }

    /// Filename of the regular sprite.
    pub fn sprite_file(&self, dex: u32) -> String {
        format!("{}.icon.png", self.stem(dex))
    }

    /// Filename of the shiny sprite.
    pub fn shiny_sprite_file(&self, dex: u32) -> String {
        format!("{}.s.icon.png", self.stem(dex))
    }

    fn stem(&self, dex: u32) -> String {
        match self {
            FormCode::NoSuffix => format!("pm{dex}"),
            FormCode::Costume(code) => format!("pm{dex}.{code}"),
            FormCode::Form(code) => format!("pm{dex}.f{code}"),
        }
    }
}

impl fmt::Display for FormCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormCode::NoSuffix => write!(f, "none"),
            FormCode::Costume(code) | FormCode::Form(code) => write!(f, "{code}"),
        }
    }
}

/// Which rule of the resolution chain produced a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    /// Form text was empty.
    BaseForm,
    /// Form is this species' listed default.
    DefaultForm,
    /// Form was found in the form map.
    Mapped,
    /// Form was unknown; the code was synthesized from its text.
    Fallback,
}

/// A resolved form code and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub code: FormCode,
    pub source: ResolutionSource,
}

impl Resolution {
    pub fn is_fallback(&self) -> bool {
        self.source == ResolutionSource::Fallback
    }
}

/// Resolve a form name to its sprite code. First match wins:
///
/// 1. empty form: no suffix
/// 2. the species' default form: no suffix
/// 3. a form map entry, which may itself be an explicit "no suffix"
/// 4. a code synthesized from the form text
pub fn resolve_form_code(dex: u32, form: &str, table: &FormCodeTable) -> Resolution {
    if form.is_empty() {
        return Resolution {
            code: FormCode::NoSuffix,
            source: ResolutionSource::BaseForm,
        };
    }

    if table.default_form(dex) == Some(form) {
        return Resolution {
            code: FormCode::NoSuffix,
            source: ResolutionSource::DefaultForm,
        };
    }

    if let Some(mapped) = table.lookup(form) {
        return Resolution {
            code: mapped.map_or(FormCode::NoSuffix, FormCode::from_code),
            source: ResolutionSource::Mapped,
        };
    }

    Resolution {
        code: FormCode::from_code(&fallback_code(form)),
        source: ResolutionSource::Fallback,
    }
}

/// Synthesize a code from unmapped form text: upper-case, whitespace and
/// hyphen runs become `_`, anything outside `[A-Z0-9_]` is dropped.
pub fn fallback_code(form: &str) -> String {
    let mut out = String::with_capacity(form.len());
    let mut in_gap = false;

    for c in form.chars().flat_map(char::to_uppercase) {
        if c.is_whitespace() || c == '-' {
            if !in_gap {
                out.push('_');
                in_gap = true;
            }
            continue;
        }

        in_gap = false;
        if c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_' {
            out.push(c);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> FormCodeTable {
        FormCodeTable::parse(
            r#"{
                "formMap": {
                    "Libre": "cLIBRE",
                    "Mega X": "MEGA_X",
                    "Alolan": "ALOLA",
                    "Normal": null,
                    "Blank": ""
                },
                "defaultForms": {
                    "386": "Normal",
                    "412": "Plant"
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_filename_shapes() {
        assert_eq!(FormCode::NoSuffix.sprite_file(1), "pm1.icon.png");
        assert_eq!(FormCode::NoSuffix.shiny_sprite_file(1), "pm1.s.icon.png");

        let costume = FormCode::from_code("cLIBRE");
        assert_eq!(costume, FormCode::Costume("cLIBRE".to_string()));
        assert_eq!(costume.sprite_file(25), "pm25.cLIBRE.icon.png");
        assert_eq!(costume.shiny_sprite_file(25), "pm25.cLIBRE.s.icon.png");

        let form = FormCode::from_code("MEGA_X");
        assert_eq!(form, FormCode::Form("MEGA_X".to_string()));
        assert_eq!(form.sprite_file(6), "pm6.fMEGA_X.icon.png");
        assert_eq!(form.shiny_sprite_file(6), "pm6.fMEGA_X.s.icon.png");
    }

    #[test]
    fn test_display_shows_raw_code() {
        assert_eq!(FormCode::NoSuffix.to_string(), "none");
        assert_eq!(FormCode::from_code("cLIBRE").to_string(), "cLIBRE");
        assert_eq!(FormCode::from_code("MEGA_X").to_string(), "MEGA_X");
    }

    #[test]
    fn test_uppercase_c_is_a_form() {
        assert_eq!(
            FormCode::from_code("COSTUME_2020"),
            FormCode::Form("COSTUME_2020".to_string())
        );
    }

    #[test]
    fn test_resolve_empty_form() {
        let r = resolve_form_code(1, "", &table());
        assert_eq!(r.code, FormCode::NoSuffix);
        assert_eq!(r.source, ResolutionSource::BaseForm);
    }

    #[test]
    fn test_resolve_default_form_wins_over_map() {
        // "Normal" is also mapped, but the default check comes first
        let r = resolve_form_code(386, "Normal", &table());
        assert_eq!(r.source, ResolutionSource::DefaultForm);

        let r = resolve_form_code(412, "Plant", &table());
        assert_eq!(r.code, FormCode::NoSuffix);
        assert_eq!(r.source, ResolutionSource::DefaultForm);
    }

    #[test]
    fn test_default_form_is_per_species() {
        // Plant is only the default for 412
        let r = resolve_form_code(413, "Plant", &table());
        assert_eq!(r.source, ResolutionSource::Fallback);
        assert_eq!(r.code, FormCode::Form("PLANT".to_string()));
    }

    #[test]
    fn test_resolve_mapped() {
        let r = resolve_form_code(25, "Libre", &table());
        assert_eq!(r.code, FormCode::Costume("cLIBRE".to_string()));
        assert_eq!(r.source, ResolutionSource::Mapped);

        let r = resolve_form_code(52, "Normal", &table());
        assert_eq!(r.code, FormCode::NoSuffix);
        assert_eq!(r.source, ResolutionSource::Mapped);

        let r = resolve_form_code(52, "Blank", &table());
        assert_eq!(r.code, FormCode::NoSuffix);
    }

    #[test]
    fn test_resolve_fallback() {
        let r = resolve_form_code(150, "Armored - Form", &table());
        assert!(r.is_fallback());
        assert_eq!(r.code, FormCode::Form("ARMORED_FORM".to_string()));
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let t = table();
        for form in ["", "Normal", "Libre", "Galarian Standard", "???"] {
            assert_eq!(resolve_form_code(386, form, &t), resolve_form_code(386, form, &t));
        }
    }

    #[test]
    fn test_fallback_code() {
        assert_eq!(fallback_code("Galarian"), "GALARIAN");
        assert_eq!(fallback_code("Mega X"), "MEGA_X");
        assert_eq!(fallback_code("Hero of Many Battles"), "HERO_OF_MANY_BATTLES");
        assert_eq!(fallback_code("10% Forme"), "10_FORME");
        assert_eq!(fallback_code("Pom-Pom"), "POM_POM");
        assert_eq!(fallback_code("a -  b"), "A_B");
        assert_eq!(fallback_code("Pa'u"), "PAU");
        assert_eq!(fallback_code("Été"), "T");
    }

    #[test]
    fn test_fallback_that_strips_to_nothing_has_no_suffix() {
        let r = resolve_form_code(1, "???", &table());
        assert!(r.is_fallback());
        assert_eq!(r.code, FormCode::NoSuffix);
    }
}
