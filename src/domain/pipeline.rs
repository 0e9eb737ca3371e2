use std::sync::LazyLock;

use tracing::instrument;

use super::{Config, Rule};

static DEFAULT: LazyLock<Pipeline> = LazyLock::new(Pipeline::default);

/// Strips markup from `text` using the default rule order.
///
/// This never fails. Markup that the rules do not recognise is passed through
/// as-is.
///
/// ```
/// assert_eq!(demarkup::strip("# Title\n\n**bold** and `code`"), "Title\n\nbold and code");
/// ```
#[must_use]
pub fn strip(text: &str) -> String {
    DEFAULT.strip(text)
}

/// An ordered sequence of [`Rule`]s.
///
/// Every rule is applied to the whole buffer, and each rule sees the output of
/// the one before it. The order is significant: the same rules run in a
/// different order produce different text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    rules: Vec<Rule>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            rules: Rule::ALL.to_vec(),
        }
    }
}

impl Pipeline {
    /// Builds the pipeline described by `config`.
    ///
    /// With `image_before_link` set, images are unwrapped before links so
    /// that the leading `!` of an image is removed along with the brackets.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let mut pipeline = Self::default();
        if config.image_before_link {
            pipeline.swap(Rule::Links, Rule::Images);
        }
        pipeline
    }

    fn swap(&mut self, a: Rule, b: Rule) {
        let position = |rule| self.rules.iter().position(|r| *r == rule);
        if let (Some(i), Some(j)) = (position(a), position(b)) {
            self.rules.swap(i, j);
        }
    }

    /// The rules, in the order they are applied.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Runs every rule over `text` and returns the resulting plain text.
    #[must_use]
    #[instrument(level = "debug", skip_all, fields(bytes = text.len()))]
    pub fn strip(&self, text: &str) -> String {
        self.rules.iter().fold(text.to_owned(), |text, rule| {
            let output = rule.apply(&text).into_owned();
            tracing::trace!(%rule, before = text.len(), after = output.len(), "applied rule");
            output
        })
    }
}
