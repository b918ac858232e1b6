//! Display name parsing and CSS identifier normalization.

/// Split a display name into `(name, form)`.
///
/// The form is the content of the last balanced parenthetical group that
/// closes the string, e.g. `"Pikachu (Libre)"` gives `("Pikachu", "Libre")`.
/// Names without a trailing group, or where the group would leave the name
/// empty, yield an empty form.
pub fn parse_name_and_form(display: &str) -> (String, String) {
    let trimmed = display.trim();

    if let Some(open) = trailing_group_start(trimmed) {
        let name = trimmed[..open].trim();
        let form = trimmed[open + 1..trimmed.len() - 1].trim();
        if !name.is_empty() && !form.is_empty() {
            return (name.to_string(), form.to_string());
        }
    }

    (display.to_string(), String::new())
}

/// Byte offset of the `(` matching a trailing `)`, if balanced.
fn trailing_group_start(s: &str) -> Option<usize> {
    if !s.ends_with(')') {
        return None;
    }

    let mut depth = 0usize;
    for (i, c) in s.char_indices().rev() {
        match c {
            ')' => depth += 1,
            '(' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    None
}

/// Build the CSS class fragment for a species variant.
///
/// The name and form are slugged independently and joined with `-` when
/// the form is non-empty.
pub fn class_name(name: &str, form: &str) -> String {
    let mut class = slug(name, false);

    if !form.is_empty() {
        class.push('-');
        class.push_str(&slug(form, true));
    }

    class
}

/// Lowercase, strip punctuation, and hyphenate.
///
/// `%` survives only in form slugs (e.g. "10% Forme").
fn slug(text: &str, keep_percent: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_gap = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        let keep = match c {
            'a'..='z' | '0'..='9' | '-' => true,
            '%' => keep_percent,
            c if c.is_whitespace() => {
                pending_gap = true;
                continue;
            }
            _ => false,
        };

        // Dropped characters do not split a word: "Farfetch'd" -> "farfetchd"
        if !keep {
            continue;
        }

        if pending_gap {
            push_hyphen(&mut out);
            pending_gap = false;
        }

        if c == '-' {
            push_hyphen(&mut out);
        } else {
            out.push(c);
        }
    }

    if pending_gap {
        push_hyphen(&mut out);
    }

    out
}

fn push_hyphen(out: &mut String) {
    if !out.ends_with('-') {
        out.push('-');
    }
}
