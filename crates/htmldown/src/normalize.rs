//! Markdown normalization.
//!
//! The renderer emits fragments with generous blank-line padding so that
//! adjacent blocks stay separated; this pass squeezes the concatenated result
//! into its canonical form.

/// Normalize raw rendered Markdown.
///
/// Line endings become `\n`, trailing whitespace before a newline is
/// stripped, runs of three or more newlines collapse to exactly two, and the
/// whole text is trimmed. A non-empty result always ends with exactly one
/// newline; an empty result stays the empty string.
///
/// Normalization is idempotent: re-running it on its own output is a no-op.
pub fn normalize_markdown(markdown: &str) -> String {
    let unified = markdown.replace("\r\n", "\n").replace('\r', "\n");

    let mut cleaned = String::with_capacity(unified.len());
    let mut blank_run = 0;

    for line in unified.split('\n') {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }

        if !cleaned.is_empty() {
            cleaned.push('\n');
        }
        cleaned.push_str(line);
    }

    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{trimmed}\n")
    }
}
