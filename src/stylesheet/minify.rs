//! Minimal CSS minifier.

/// Characters that never need surrounding whitespace.
const DELIMITERS: &[char] = &['{', '}', ':', ';', ',', '>', '~', '+'];

/// Minify a stylesheet.
///
/// Strips comments, collapses whitespace, removes whitespace around
/// delimiters, and drops `;` before `}`. The output is a fixed point:
/// minifying it again changes nothing.
pub fn minify_css(css: &str) -> String {
    let stripped = strip_comments(css);
    let mut out = String::with_capacity(stripped.len());
    let mut pending_space = false;

    for c in stripped.chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }

        if DELIMITERS.contains(&c) {
            if c == '}' {
                while out.ends_with(';') {
                    out.pop();
                }
            }
            out.push(c);
        } else {
            let after_delimiter = out.ends_with(DELIMITERS);
            if pending_space && !out.is_empty() && !after_delimiter {
                out.push(' ');
            }
            out.push(c);
        }

        pending_space = false;
    }

    out
}

/// Remove `/* ... */` blocks until none remain. An unterminated comment is
/// kept as text.
fn strip_comments(css: &str) -> String {
    let mut text = css.to_string();

    loop {
        let mut out = String::with_capacity(text.len());
        let mut rest = text.as_str();
        let mut changed = false;

        while let Some(start) = rest.find("/*") {
            match rest[start + 2..].find("*/") {
                Some(len) => {
                    out.push_str(&rest[..start]);
                    rest = &rest[start + 2 + len + 2..];
                    changed = true;
                }
                None => break,
            }
        }
        out.push_str(rest);

        if !changed {
            return out;
        }
        text = out;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minify_rule() {
        let css = ".pogo-bulbasaur {\n  --pogo-sprite: url('sprites/go/regular/pm1.icon.png');\n}\n";
        insta::assert_snapshot!(
            minify_css(css),
            @".pogo-bulbasaur{--pogo-sprite:url('sprites/go/regular/pm1.icon.png')}"
        );
    }

    #[test]
    fn test_minify_strips_comments() {
        let css = "/*!\n * header\n */\n/* === Base === */\n.a { color: red; }";
        assert_eq!(minify_css(css), ".a{color:red}");
    }

    #[test]
    fn test_minify_keeps_descendant_space() {
        assert_eq!(minify_css(".a   .b  > .c { top : 0 }"), ".a .b>.c{top:0}");
        assert_eq!(minify_css(".a ~ .b + .c , .d {}"), ".a~.b+.c,.d{}");
    }

    #[test]
    fn test_minify_drops_separator_before_spaced_close() {
        assert_eq!(minify_css(".a{x:1; }"), ".a{x:1}");
        assert_eq!(minify_css(".a { x: 1 ;\n}"), ".a{x:1}");
        assert_eq!(minify_css(".a{x:1;y:2}"), ".a{x:1;y:2}");
    }

    #[test]
    fn test_minify_drops_repeated_separators_before_close() {
        assert_eq!(minify_css(".a { top: 0;; }"), ".a{top:0}");
    }

    #[test]
    fn test_minify_nested_looking_comment() {
        assert_eq!(minify_css("/* a /* b */ .x{}"), ".x{}");
        assert_eq!(minify_css("/*/**/*/ .x{}"), "*/ .x{}");
    }

    #[test]
    fn test_minify_unterminated_comment_kept() {
        assert_eq!(minify_css(".x{} /* open"), ".x{}/* open");
    }

    #[test]
    fn test_minify_idempotent() {
        let inputs = [
            "/*! header */\n.pogo-1 {\n  --pogo-sprite: url('a.png');\n  --pogo-sprite-shiny: url('b.png');\n}\n",
            ".a  .b { margin : 0 auto ; }\n\n.c{}",
            "  leading and trailing  ",
            "/*/**/*/ .x{}",
            ".x{} /* open",
            ".a { top: 0;; } ; }",
            "",
        ];

        for css in inputs {
            let once = minify_css(css);
            assert_eq!(minify_css(&once), once, "input {css:?}");
        }
    }
}
