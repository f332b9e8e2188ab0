/// Splits a user-typed argument string into a vector of process arguments.
///
/// The rules are deliberately forgiving, since the input comes straight from a
/// settings field and nothing is ever rejected:
/// - Spaces and tabs outside quotes separate arguments. Runs of them collapse.
/// - Single (`'...'`) and double (`"..."`) quotes group text. The quote that
///   opened a span is the only one that closes it, so the other kind is literal.
/// - Inside quotes, `\"`, `\'` and `\\` produce the escaped character. Any other
///   backslash is kept as-is.
/// - An unclosed quote runs to the end of the input.
/// - Empty quotes (`""`, `''`) do not produce an empty argument.
///
/// # Example
/// ```
/// use scriptlink::parse_arguments;
///
/// let args = parse_arguments("'one two' three");
/// assert_eq!(args, vec!["one two", "three"]);
/// ```
pub fn parse_arguments(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match quote {
            None => match c {
                '"' | '\'' => quote = Some(c),
                ' ' | '\t' => {
                    if !current.is_empty() {
                        args.push(std::mem::take(&mut current));
                    }
                    while i + 1 < chars.len() && is_separator(chars[i + 1]) {
                        i += 1;
                    }
                }
                _ => current.push(c),
            },
            Some(q) if c == q => quote = None,
            Some(_) => {
                if c == '\\'
                    && let Some(&next) = chars.get(i + 1)
                    && matches!(next, '"' | '\'' | '\\')
                {
                    current.push(next);
                    i += 1;
                } else {
                    current.push(c);
                }
            }
        }
        i += 1;
    }

    if !current.is_empty() {
        args.push(current);
    }
    args
}

fn is_separator(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Stateless handle around [`parse_arguments`], for callers that want to hold
/// a parser value (for instance behind a field or a trait object).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ArgumentStringParser;

impl ArgumentStringParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, literal: &str) -> Vec<String> {
        parse_arguments(literal)
    }
}

/// Converts an optional settings value into script arguments.
///
/// A missing or empty setting means "no arguments" and never reaches the parser.
pub fn arguments_from_setting(setting: Option<&str>) -> Vec<String> {
    match setting {
        Some(literal) if !literal.is_empty() => parse_arguments(literal),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(input: &str) -> Vec<String> {
        ArgumentStringParser::new().parse(input)
    }

    #[test]
    fn single_argument() {
        assert_eq!(parse("hello"), vec!["hello"]);
    }

    #[test]
    fn multiple_arguments() {
        assert_eq!(parse("arg1 arg2 arg3"), vec!["arg1", "arg2", "arg3"]);
        assert_eq!(parse("42 100"), vec!["42", "100"]);
    }

    #[test]
    fn empty_and_blank_input() {
        assert!(parse("").is_empty());
        assert!(parse("   ").is_empty());
        assert!(parse("\t\t").is_empty());
        assert!(parse(" \t ").is_empty());
    }

    #[test]
    fn quoted_arguments() {
        assert_eq!(parse("'hello world'"), vec!["hello world"]);
        assert_eq!(parse("\"hello world\""), vec!["hello world"]);
        assert_eq!(parse("'one two' three"), vec!["one two", "three"]);
        assert_eq!(
            parse("one \"two three\" four"),
            vec!["one", "two three", "four"]
        );
    }

    #[test]
    fn empty_quotes_produce_nothing() {
        assert!(parse("\"\"").is_empty());
        assert!(parse("''").is_empty());
        assert_eq!(parse("a '' b"), vec!["a", "b"]);
    }

    #[test]
    fn quoted_whitespace_is_kept() {
        assert_eq!(parse("\"   \""), vec!["   "]);
        assert_eq!(parse("'   '"), vec!["   "]);
        assert_eq!(parse("'a\tb'"), vec!["a\tb"]);
    }

    #[test]
    fn escaped_quotes() {
        assert_eq!(parse(r#""say \"hello\"""#), vec![r#"say "hello""#]);
        assert_eq!(parse(r"'say \'hello\''"), vec!["say 'hello'"]);
        assert_eq!(parse(r#""\"wrapped\"""#), vec![r#""wrapped""#]);
    }

    #[test]
    fn escaped_backslashes() {
        assert_eq!(parse(r#""path\\to\\file""#), vec![r"path\to\file"]);
        assert_eq!(parse(r#""file\\"with\"spaces""#), vec![r"file\with\spaces"]);
    }

    #[test]
    fn other_escapes_are_literal() {
        assert_eq!(parse(r#""hello\nworld""#), vec![r"hello\nworld"]);
        assert_eq!(parse(r#""tab\there""#), vec![r"tab\there"]);
        assert_eq!(parse(r#""\1""#), vec![r"\1"]);
    }

    #[test]
    fn trailing_backslash_inside_quotes() {
        assert_eq!(parse("\"end\\"), vec!["end\\"]);
    }

    #[test]
    fn backslash_outside_quotes_is_plain() {
        assert_eq!(parse(r"C:\temp \x"), vec![r"C:\temp", r"\x"]);
        assert_eq!(parse(r"a\ b"), vec![r"a\", "b"]);
    }

    #[test]
    fn mixed_quote_types() {
        assert_eq!(parse(r#"'"wrapped"'"#), vec![r#""wrapped""#]);
        assert_eq!(parse(r#"'"mixed quotes"'"#), vec![r#""mixed quotes""#]);
        assert_eq!(parse(r#""'mixed quotes'""#), vec!["'mixed quotes'"]);
    }

    #[test]
    fn whitespace_runs_collapse() {
        assert_eq!(parse("arg1    arg2     arg3"), vec!["arg1", "arg2", "arg3"]);
        assert_eq!(parse("arg1\t\targ2\targ3"), vec!["arg1", "arg2", "arg3"]);
        assert_eq!(parse("arg1 \t arg2\t  arg3"), vec!["arg1", "arg2", "arg3"]);
        assert_eq!(parse("  arg1 arg2  "), vec!["arg1", "arg2"]);
        assert_eq!(parse("\targ1\targ2\t"), vec!["arg1", "arg2"]);
    }

    #[test]
    fn newlines_are_not_separators() {
        assert_eq!(parse("a\nb c"), vec!["a\nb", "c"]);
    }

    #[test]
    fn unclosed_quotes_run_to_end() {
        assert_eq!(parse("\"unclosed quote"), vec!["unclosed quote"]);
        assert_eq!(parse("'unclosed quote"), vec!["unclosed quote"]);
        assert_eq!(parse("a \"b c"), vec!["a", "b c"]);
    }

    #[test]
    fn quotes_inside_words() {
        assert_eq!(parse(r#"arg"with"quote"#), vec!["argwithquote"]);
        assert_eq!(parse("arg'with'quote"), vec!["argwithquote"]);
        assert_eq!(parse(r#"--name="John Smith" x"#), vec!["--name=John Smith", "x"]);
    }

    #[test]
    fn adjacent_quoted_spans_concatenate() {
        assert_eq!(parse(r#""hello""world""#), vec!["helloworld"]);
        assert_eq!(parse("'hello''world'"), vec!["helloworld"]);
        assert_eq!(parse(r#"'a b'"c d""#), vec!["a bc d"]);
    }

    #[test]
    fn non_ascii_content_passes_through() {
        assert_eq!(parse("héllo 'wörld ✓'"), vec!["héllo", "wörld ✓"]);
    }

    #[test]
    fn setting_conversion() {
        assert!(arguments_from_setting(None).is_empty());
        assert!(arguments_from_setting(Some("")).is_empty());
        assert!(arguments_from_setting(Some("  ")).is_empty());
        assert_eq!(arguments_from_setting(Some("3 a b")), vec!["3", "a", "b"]);
    }
}
