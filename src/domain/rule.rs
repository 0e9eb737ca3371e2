use std::{borrow::Cow, fmt, sync::LazyLock};

use regex::Regex;

/// Compiles a pattern that is known to be valid at build time.
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in patterns are valid")
}

static TAG: LazyLock<Regex> = LazyLock::new(|| compile(r"<[^>]+>"));
static HEADER: LazyLock<Regex> = LazyLock::new(|| compile(r"(?m)^#+ "));
static STRONG: LazyLock<Regex> = LazyLock::new(|| compile(r"\*\*(.*?)\*\*|__(.*?)__"));
static EMPHASIS: LazyLock<Regex> = LazyLock::new(|| compile(r"\*(.*?)\*|_(.*?)_"));
static LINK: LazyLock<Regex> = LazyLock::new(|| compile(r"\[([^\]]*)\]\([^)]*\)"));
static IMAGE: LazyLock<Regex> = LazyLock::new(|| compile(r"!\[([^\]]*)\]\([^)]*\)"));
static BACKTICK_FENCE: LazyLock<Regex> = LazyLock::new(|| compile(r"```[\s\S]*?```"));
static TILDE_FENCE: LazyLock<Regex> = LazyLock::new(|| compile(r"~~~[\s\S]*?~~~"));
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| compile(r"`([^`]+)`"));
// Whitespace includes the information separators U+001C to U+001F.
// List markers only consume whitespace on their own line.
static UNORDERED_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?m)^[[\s\x1C-\x1F]&&[^\n]]*[-*+][[\s\x1C-\x1F]&&[^\n]]+")
});
static ORDERED_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?m)^[[\s\x1C-\x1F]&&[^\n]]*\d+\.[[\s\x1C-\x1F]&&[^\n]]+")
});
static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| compile(r"\n[\s\x1C-\x1F]*\n"));

fn is_whitespace(c: char) -> bool {
    c.is_whitespace() || matches!(c, '\x1C'..='\x1F')
}

/// A single text rewrite.
///
/// Each rule is a pure function over the whole buffer. Rules share no state;
/// the only coupling between them is the order a [`Pipeline`] runs them in.
///
/// [`Pipeline`]: super::Pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Deletes every `<...>` span, attributes included.
    Tags,
    /// Deletes `#` runs followed by a space at the start of a line.
    Headers,
    /// Unwraps `**text**` and `__text__`.
    Strong,
    /// Unwraps `*text*` and `_text_`.
    Emphasis,
    /// Replaces `[label](target)` with `label`.
    Links,
    /// Replaces `![alt](target)` with `alt`.
    Images,
    /// Deletes ```` ``` ```` and `~~~` fenced blocks, fences included.
    FencedCode,
    /// Unwraps `` `code` ``.
    InlineCode,
    /// Deletes `-`, `*` and `+` list markers at the start of a line.
    UnorderedLists,
    /// Deletes `1.` style list markers at the start of a line.
    OrderedLists,
    /// Collapses runs of blank lines to a single blank line.
    BlankLines,
    /// Removes leading and trailing whitespace.
    Trim,
}

impl Rule {
    /// Every rule, in the order the default pipeline applies them.
    pub const ALL: [Self; 12] = [
        Self::Tags,
        Self::Headers,
        Self::Strong,
        Self::Emphasis,
        Self::Links,
        Self::Images,
        Self::FencedCode,
        Self::InlineCode,
        Self::UnorderedLists,
        Self::OrderedLists,
        Self::BlankLines,
        Self::Trim,
    ];

    /// A stable, kebab-case name for the rule.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tags => "tags",
            Self::Headers => "headers",
            Self::Strong => "strong",
            Self::Emphasis => "emphasis",
            Self::Links => "links",
            Self::Images => "images",
            Self::FencedCode => "fenced-code",
            Self::InlineCode => "inline-code",
            Self::UnorderedLists => "unordered-lists",
            Self::OrderedLists => "ordered-lists",
            Self::BlankLines => "blank-lines",
            Self::Trim => "trim",
        }
    }

    /// Applies the rule to `text`.
    ///
    /// Returns the input unchanged (borrowed) when the rule matches nothing.
    #[must_use]
    pub fn apply(self, text: &str) -> Cow<'_, str> {
        match self {
            Self::Tags => TAG.replace_all(text, ""),
            Self::Headers => HEADER.replace_all(text, ""),
            Self::Strong => STRONG.replace_all(text, "${1}${2}"),
            Self::Emphasis => EMPHASIS.replace_all(text, "${1}${2}"),
            Self::Links => LINK.replace_all(text, "${1}"),
            Self::Images => IMAGE.replace_all(text, "${1}"),
            Self::FencedCode => match BACKTICK_FENCE.replace_all(text, "") {
                Cow::Borrowed(text) => TILDE_FENCE.replace_all(text, ""),
                Cow::Owned(text) => Cow::Owned(TILDE_FENCE.replace_all(&text, "").into_owned()),
            },
            Self::InlineCode => INLINE_CODE.replace_all(text, "${1}"),
            Self::UnorderedLists => UNORDERED_ITEM.replace_all(text, ""),
            Self::OrderedLists => ORDERED_ITEM.replace_all(text, ""),
            Self::BlankLines => BLANK_LINES.replace_all(text, "\n\n"),
            Self::Trim => Cow::Borrowed(text.trim_matches(is_whitespace)),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(Rule::Tags, "<p>Hello</p>", "Hello"; "simple tags")]
    #[test_case(Rule::Tags, "<a href=\"http://example.com\">Link</a>", "Link"; "tag attributes")]
    #[test_case(Rule::Tags, "Hello<br/>World", "HelloWorld"; "self closing tag")]
    #[test_case(Rule::Tags, "a <b\nc> d", "a  d"; "tag across lines")]
    #[test_case(Rule::Tags, "1 < 2", "1 < 2"; "unclosed angle bracket")]
    #[test_case(Rule::Headers, "###### Six", "Six"; "deep header")]
    #[test_case(Rule::Headers, "text # not a header", "text # not a header"; "mid line hash")]
    #[test_case(Rule::Headers, "#tag", "#tag"; "hash without space")]
    #[test_case(Rule::Headers, "a\n## b", "a\nb"; "header on later line")]
    #[test_case(Rule::Strong, "**bold**", "bold"; "asterisks")]
    #[test_case(Rule::Strong, "__bold__", "bold"; "underscores")]
    #[test_case(Rule::Strong, "**a** and **b**", "a and b"; "non greedy")]
    #[test_case(Rule::Strong, "**a__", "**a__"; "mismatched delimiters")]
    #[test_case(Rule::Emphasis, "*it*", "it"; "single asterisk")]
    #[test_case(Rule::Emphasis, "_it_", "it"; "single underscore")]
    #[test_case(Rule::Emphasis, "*a\nb*", "*a\nb*"; "does not span lines")]
    #[test_case(Rule::Emphasis, "a * b * c * d", "a  b  c * d"; "odd delimiter count")]
    #[test_case(Rule::Links, "[One](url1) and [Two](url2)", "One and Two"; "two links")]
    #[test_case(Rule::Links, "[Link](http://example.com \"Title\")", "Link"; "link title")]
    #[test_case(Rule::Links, "![Alt](img.png)", "!Alt"; "image bang survives")]
    #[test_case(Rule::Images, "![Alt](img.png)", "Alt"; "image")]
    #[test_case(Rule::Images, "![](img.png)", ""; "empty alt")]
    #[test_case(Rule::FencedCode, "a\n```rust\nlet x;\n```\nb", "a\n\nb"; "backtick fence")]
    #[test_case(Rule::FencedCode, "a\n~~~\nx\n~~~\nb", "a\n\nb"; "tilde fence")]
    #[test_case(Rule::FencedCode, "```a``` keep ```b```", " keep "; "first match span")]
    #[test_case(Rule::FencedCode, "```\nunterminated", "```\nunterminated"; "unterminated fence")]
    #[test_case(Rule::InlineCode, "Use `print()` function", "Use print() function"; "inline code")]
    #[test_case(Rule::InlineCode, "``", "``"; "empty backticks")]
    #[test_case(Rule::UnorderedLists, "- a\n* b\n+ c", "a\nb\nc"; "bullets")]
    #[test_case(Rule::UnorderedLists, "  - nested", "nested"; "indented bullet")]
    #[test_case(Rule::UnorderedLists, "x\n\n- item", "x\n\nitem"; "keeps preceding blank line")]
    #[test_case(Rule::UnorderedLists, "a - b", "a - b"; "mid line dash")]
    #[test_case(Rule::UnorderedLists, "-1", "-1"; "dash without space")]
    #[test_case(Rule::UnorderedLists, "-\n\nfoo", "-\n\nfoo"; "marker before line break")]
    #[test_case(Rule::UnorderedLists, "\u{1f}- item", "item"; "separator before marker")]
    #[test_case(Rule::OrderedLists, "1. First", "First"; "single digit")]
    #[test_case(Rule::OrderedLists, "10. Tenth", "Tenth"; "multi digit")]
    #[test_case(Rule::OrderedLists, "x\n\n1. item", "x\n\nitem"; "numbered keeps preceding blank line")]
    #[test_case(Rule::OrderedLists, "3.14 is pi", "3.14 is pi"; "decimal number")]
    #[test_case(Rule::BlankLines, "a\n\n\n\nb", "a\n\nb"; "many newlines")]
    #[test_case(Rule::BlankLines, "a\n  \n\t\nb", "a\n\nb"; "whitespace only lines")]
    #[test_case(Rule::BlankLines, "a\n\u{1f}\nb", "a\n\nb"; "separator only line")]
    #[test_case(Rule::BlankLines, "a\nb", "a\nb"; "single newline")]
    #[test_case(Rule::Trim, "  Hello \n", "Hello"; "trim")]
    #[test_case(Rule::Trim, "\u{1c}hi\u{1c}", "hi"; "trim information separators")]
    #[test_case(Rule::Trim, "\u{a0}hi\u{2003}", "hi"; "trim unicode spaces")]
    fn apply(rule: Rule, input: &str, expected: &str) {
        assert_eq!(rule.apply(input), expected);
    }

    #[test]
    fn unmatched_input_is_borrowed() {
        for rule in Rule::ALL {
            assert!(
                matches!(rule.apply("plain"), Cow::Borrowed("plain")),
                "{rule} allocated for plain input"
            );
        }
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = Rule::ALL.iter().map(|rule| rule.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Rule::ALL.len());
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(Rule::FencedCode.to_string(), "fenced-code");
    }
}
