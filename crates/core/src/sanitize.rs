use std::sync::LazyLock;

use regex::Regex;

struct Patterns {
    block_comment: Regex,
    line_comment: Regex,
    declarations: Regex,
    blank_line: Regex,
    blank_run: Regex,
}

static PATTERNS: LazyLock<Patterns> = LazyLock::new(|| Patterns {
    block_comment: Regex::new(r"(?s)/\*.*?\*/").expect("block comment pattern"),
    line_comment: Regex::new(r"//.*").expect("line comment pattern"),
    // Every `import`/`package` declaration sharing the line goes in one match.
    declarations: Regex::new(r"(?m)^\s*(?:(?:import|package)\s+[^;\n]*;[ \t]*)+")
        .expect("declaration pattern"),
    blank_line: Regex::new(r"(?m)^\s*$").expect("blank line pattern"),
    blank_run: Regex::new(r"\n\s*\n").expect("blank run pattern"),
});

/// Strips comments, `import`/`package` declarations and blank lines from
/// Java source.
///
/// The comment patterns know nothing about string literals: `"a/*b"` or
/// `"http://x"` inside a string is cut like a real comment.
pub fn sanitize_java_source(source: &str) -> String {
    let p = &*PATTERNS;
    let text = p.block_comment.replace_all(source, "");
    let text = p.line_comment.replace_all(&text, "");
    let text = p.declarations.replace_all(&text, "");
    let text = p.blank_line.replace_all(&text, "");
    let text = p.blank_run.replace_all(&text, "\n");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "/*\n * Licensed under the Apache License.\n */\npackage org.antlr;\n\nimport java.util.List;\nimport static java.lang.Math.max;\n\n/** Entry point. */\npublic class Tool {\n    // counter\n    private int count; // trailing\n\n\n    public int next() {\n        return count++;\n    }\n}\n";

    #[test]
    fn strips_comments_declarations_and_blank_lines() {
        assert_eq!(
            sanitize_java_source(SAMPLE),
            "public class Tool {\n    private int count; \n    public int next() {\n        return count++;\n    }\n}"
        );
    }

    #[test]
    fn sanitize_is_idempotent() {
        let once = sanitize_java_source(SAMPLE);
        assert_eq!(sanitize_java_source(&once), once);

        let crlf = SAMPLE.replace('\n', "\r\n");
        let once = sanitize_java_source(&crlf);
        assert_eq!(sanitize_java_source(&once), once);
    }

    #[test]
    fn keeps_identifiers_that_start_with_keywords() {
        let src = "int important = 1;\nString packageName = \"x\";\n";
        assert_eq!(
            sanitize_java_source(src),
            "int important = 1;\nString packageName = \"x\";"
        );
    }

    #[test]
    fn removes_indented_imports() {
        let src = "   import a.b.C;\nclass A {}\n\t package x.y;\n";
        let out = sanitize_java_source(src);
        assert!(!out.contains("import"));
        assert!(!out.contains("package"));
        assert_eq!(out, "class A {}");
    }

    #[test]
    fn declarations_sharing_a_line_are_all_removed() {
        for src in [
            "import java.util.List; import java.util.Map;\nclass X {}\n",
            "package a.b; import c.D;\nclass X {}\n",
            "import a.B; class X {}\n",
        ] {
            let once = sanitize_java_source(src);
            assert_eq!(once, "class X {}", "{src:?}");
            assert_eq!(sanitize_java_source(&once), once, "{src:?}");
        }
    }

    #[test]
    fn block_comment_is_non_greedy() {
        let src = "int a; /* one */ int b; /* two */ int c;";
        assert_eq!(sanitize_java_source(src), "int a;  int b;  int c;");
    }

    #[test]
    fn comment_markers_inside_strings_are_not_special() {
        let src = "String url = \"http://example.org\";\nint x;";
        assert_eq!(sanitize_java_source(src), "String url = \"http:\nint x;");

        let src = "String s = \"/*\"; int y; /* c */ int z;";
        assert_eq!(sanitize_java_source(src), "String s = \" int z;");
    }

    #[test]
    fn code_lines_keep_their_content() {
        let src = "class A {\n  void f() { g(1, 2); }\n}\n";
        let out = sanitize_java_source(src);
        for line in src.lines() {
            let compact: String = line.split_whitespace().collect();
            let found = out
                .lines()
                .any(|o| o.split_whitespace().collect::<String>() == compact);
            assert!(found, "lost line {line:?}");
        }
    }

    #[test]
    fn empty_and_comment_only_input_becomes_empty() {
        assert_eq!(sanitize_java_source(""), "");
        assert_eq!(sanitize_java_source("// nothing\n/* here */\n\n"), "");
    }
}
