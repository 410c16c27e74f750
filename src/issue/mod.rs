pub mod extract;
pub mod types;

pub use types::{Author, Difficulty, Info, Issue, ParsedSubmission, Submission};

use tracing::{debug, instrument, warn};

use crate::locale::Locale;

/// Parse the four submission sections out of an issue body.
///
/// Headings are looked up in `locale`'s strings. Missing sections and yaml that
/// does not fit the [`Info`] schema come back as `None`, never as an error.
#[instrument(skip(body, locale), fields(locale = %locale, body_len = body.len()))]
pub fn parse(body: &str, locale: Locale) -> ParsedSubmission {
    let messages = locale.messages();

    let info = extract::yaml_block(body, messages.info_heading).and_then(|raw| {
        serde_yaml::from_str::<Info>(&raw)
            .map_err(|err| warn!(error = %err, "info block is not valid challenge metadata"))
            .ok()
    });
    let template = extract::code_block(body, messages.template_heading);
    let tests = extract::code_block(body, messages.tests_heading);
    let question = extract::comment_range(body, "question");

    let parsed = ParsedSubmission {
        info,
        template,
        tests,
        question,
    };
    debug!(missing = ?parsed.missing_sections(), "parsed issue body");
    parsed
}
