/// Splits a raw input line into whitespace-separated tokens.
///
/// Leading and trailing whitespace is ignored and runs of whitespace count as
/// a single separator. Token content is preserved verbatim; there is no quote
/// or escape handling.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_whitespace_lines_produce_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t  ").is_empty());
    }

    #[test]
    fn test_splits_on_whitespace_runs() {
        assert_eq!(tokenize("cp  -r   src dest"), vec!["cp", "-r", "src", "dest"]);
    }

    #[test]
    fn test_tokens_kept_verbatim() {
        // No quote handling: quotes are part of the token.
        assert_eq!(tokenize("echo \"a b\""), vec!["echo", "\"a", "b\""]);
    }

    #[test]
    fn test_first_token_is_command_name() {
        let tokens = tokenize("  grep pattern file.txt ");
        assert_eq!(tokens[0], "grep");
        assert_eq!(tokens.len(), 3);
    }
}
