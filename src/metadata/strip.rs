/// Drop everything from the first `//` to the end of each line.
///
/// This is line-based and knows nothing about JSON strings, so a `//` inside a
/// string value (a URL, say) cuts that line short too.
pub fn strip_line_comments(text: &str) -> String {
    if !text.contains("//") {
        return text.to_string();
    }
    text.split('\n')
        .map(|line| line.split_once("//").map_or(line, |(keep, _)| keep))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_comment_removed() {
        assert_eq!(
            strip_line_comments(r#""airports": {"comment": "Air"} // note"#),
            r#""airports": {"comment": "Air"} "#
        );
    }

    #[test]
    fn whole_line_comments_keep_line_count() {
        let text = "// header\n{\n  // inside\n}\n";
        let stripped = strip_line_comments(text);
        assert_eq!(stripped, "\n{\n  \n}\n");
        assert_eq!(stripped.lines().count(), text.lines().count());
    }

    #[test]
    fn untouched_without_comments() {
        let text = "{\"a\": {}}";
        assert_eq!(strip_line_comments(text), text);
    }
}
