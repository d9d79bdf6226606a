//! Lint: key hints like `[C]` or `[3]` must be tappable.
//!
//! Every `[X]` hint drawn by a `render.rs` has to go through
//! `ClickableList::push_clickable()` so that tapping it on a phone does the
//! same thing as pressing the key. A plain `cl.push(...)` draws the hint but
//! registers no click target.
//!
//! Calls are followed across lines until their parentheses balance, so a
//! `cl.push(Line::from(Span::styled(` spread over several lines is still
//! checked as one call.

use std::fs;
use std::path::Path;

/// `[X]` where X is a single key character.
fn contains_bracket_key(s: &str) -> bool {
    s.as_bytes().windows(3).any(|w| {
        w[0] == b'[' && w[2] == b']' && (w[1].is_ascii_alphanumeric() || b"-=!~".contains(&w[1]))
    })
}

/// Net parenthesis depth of a line, ignoring anything inside string literals.
fn paren_delta(line: &str) -> i32 {
    let mut depth = 0;
    let mut in_str = false;
    let mut prev = '\0';
    for ch in line.chars() {
        match ch {
            '"' if prev != '\\' => in_str = !in_str,
            '(' if !in_str => depth += 1,
            ')' if !in_str => depth -= 1,
            _ => {}
        }
        prev = ch;
    }
    depth
}

/// Returns (line number, first line) of each plain `.push(` call whose
/// arguments contain a bracket key.
fn find_bracket_key_in_push(source: &str) -> Vec<(usize, String)> {
    let mut violations = Vec::new();
    let lines: Vec<&str> = source.lines().collect();
    let mut i = 0;

    while i < lines.len() {
        let trimmed = lines[i].trim();
        let is_plain_push = trimmed.contains(".push(") && !trimmed.contains("push_clickable(");
        if trimmed.starts_with("//") || !is_plain_push {
            i += 1;
            continue;
        }

        let start = i;
        let mut depth = 0;
        let mut hit = false;
        loop {
            let line = lines[i];
            if !line.trim().starts_with("//") {
                hit |= contains_bracket_key(line);
                depth += paren_delta(line);
            }
            i += 1;
            if depth <= 0 || i >= lines.len() {
                break;
            }
        }
        if hit {
            violations.push((start + 1, lines[start].trim().to_string()));
        }
    }

    violations
}

fn visit_render_files(dir: &Path, violations: &mut Vec<(String, usize, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            visit_render_files(&path, violations);
        } else if path.file_name().is_some_and(|n| n == "render.rs") {
            let Ok(source) = fs::read_to_string(&path) else {
                continue;
            };
            let display_path = path.display().to_string();
            for (line_num, line) in find_bracket_key_in_push(&source) {
                violations.push((display_path.clone(), line_num, line));
            }
        }
    }
}

#[test]
fn no_bracket_keys_in_non_clickable_push() {
    let src_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut all_violations = Vec::new();

    visit_render_files(&src_dir, &mut all_violations);

    if !all_violations.is_empty() {
        let mut msg = String::from(
            "Found key hints [X] in non-clickable cl.push() calls.\n\
             Use push_clickable() with an action id from actions.rs.\n\n",
        );
        for (file, line_num, line) in &all_violations {
            msg.push_str(&format!("  {}:{}: {}\n", file, line_num, line));
        }
        panic!("{}", msg);
    }
}

#[test]
fn render_files_are_found() {
    let meat_render = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/meat/render.rs");
    assert!(meat_render.is_file());
}

#[test]
fn detects_single_line_push() {
    let source = r#"cl.push(Line::from(" [R] Prestige"));"#;
    assert_eq!(find_bracket_key_in_push(source).len(), 1);
}

#[test]
fn detects_multi_line_push() {
    let source = r#"
cl.push(Line::from(Span::styled(
    " [C] Découper",
    style,
)));
cl.push(Line::from(""));
"#;
    let violations = find_bracket_key_in_push(source);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].0, 2);
}

#[test]
fn allows_push_clickable() {
    let source = r#"
cl.push_clickable(
    Line::from(Span::styled(" [R] Prestige", style)),
    PRESTIGE_RESET,
);
"#;
    assert!(find_bracket_key_in_push(source).is_empty());
}

#[test]
fn parens_inside_strings_do_not_end_the_call() {
    let source = r#"
cl.push(Line::from(Span::styled(
    "  ✔  Boost (x2)",
    style,
)));
cl.push_clickable(Line::from(" [A] Boost"), BUY);
"#;
    assert!(find_bracket_key_in_push(source).is_empty());
}

#[test]
fn ignores_comments() {
    let source = r#"// cl.push(Line::from(" [C] Découper"));"#;
    assert!(find_bracket_key_in_push(source).is_empty());
}

#[test]
fn bracket_key_detection() {
    assert!(contains_bracket_key("[C]"));
    assert!(contains_bracket_key("[1]"));
    assert!(contains_bracket_key("[-]"));
    assert!(!contains_bracket_key("[]"));
    assert!(!contains_bracket_key("[{}]"));
    assert!(!contains_bracket_key("[CC]"));
    assert!(!contains_bracket_key("abc"));
}
