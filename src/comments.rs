use crate::ir::Line;
use crate::scan::skip_literal;

fn push_trimmed(out: &mut String, segment: &str) {
    out.push_str(segment);
    let kept = out.trim_end().len();
    out.truncate(kept);
}

/// Remove comments from one line. `in_block` says whether the line starts
/// inside a `/* ... */` comment; the returned flag says whether it ends inside
/// one.
fn strip_comments(text: &str, mut in_block: bool) -> (String, bool) {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut seg = 0;
    let mut i = 0;

    while i < bytes.len() {
        if in_block {
            match text[i..].find("*/") {
                Some(p) => {
                    i += p + 2;
                    in_block = false;
                }
                None => i = bytes.len(),
            }
            seg = i;
            continue;
        }
        match bytes[i] {
            b'"' | b'\'' => i = skip_literal(bytes, i),
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                push_trimmed(&mut out, &text[seg..i]);
                in_block = true;
                i += 2;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                push_trimmed(&mut out, &text[seg..i]);
                i = bytes.len();
                seg = i;
            }
            _ => i += 1,
        }
    }
    if seg < bytes.len() {
        out.push_str(&text[seg..]);
    }
    (out, in_block)
}

fn strip_terminator(text: &str) -> String {
    let t = text.trim_end();
    t.strip_suffix(';').unwrap_or(t).trim_end().to_string()
}

pub fn stage2(lines: &[Line]) -> Vec<Line> {
    let mut in_block = false;
    lines
        .iter()
        .map(|line| {
            let (text, still_open) = strip_comments(&line.text, in_block);
            in_block = still_open;
            line.with_text(strip_terminator(&text))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(v: &[&str]) -> Vec<Line> {
        v.iter().enumerate().map(|(i, t)| Line::new(i, *t)).collect()
    }

    fn texts(v: &[Line]) -> Vec<&str> {
        v.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_line_comment() {
        let out = stage2(&lines(&["    x = 1;   // set x"]));
        assert_eq!(texts(&out), vec!["    x = 1"]);
    }

    #[test]
    fn test_inline_block_comment() {
        let out = stage2(&lines(&["a /* first */ + b;"]));
        assert_eq!(texts(&out), vec!["a + b"]);
    }

    #[test]
    fn test_multiline_block_comment() {
        let out = stage2(&lines(&[
            "x = 1; /* start",
            "   still comment",
            "end */ y = 2;",
            "z = 3;",
        ]));
        assert_eq!(texts(&out), vec!["x = 1", "", " y = 2", "z = 3"]);
    }

    #[test]
    fn test_comment_markers_in_strings() {
        let out = stage2(&lines(&[r#"printf("// not a comment");"#]));
        assert_eq!(texts(&out), vec![r#"printf("// not a comment")"#]);
    }

    #[test]
    fn test_single_terminator_only() {
        let out = stage2(&lines(&["for (;;);;  "]));
        assert_eq!(texts(&out), vec!["for (;;);"]);
    }

    #[test]
    fn test_blank_lines_preserved() {
        let out = stage2(&lines(&["", "// only a comment", "x"]));
        assert_eq!(texts(&out), vec!["", "", "x"]);
    }

    #[test]
    fn test_cyrillic_comment() {
        let out = stage2(&lines(&["    n = 5; // количество элементов"]));
        assert_eq!(texts(&out), vec!["    n = 5"]);
    }
}
