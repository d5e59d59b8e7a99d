// ABOUTME: Script splitter that turns dump text into discrete statements
// ABOUTME: Naive terminator split with comment stripping, in input order

/// One unit of replay: the raw statement text plus its position in the
/// script. Produced only by [`split_script`], consumed by the restore
/// executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// Zero-based position among the statements extracted from the script.
    pub index: usize,
    pub text: String,
}

/// Split a script into an ordered sequence of statements.
///
/// The split is naive and non-lexical: the text is cut at every literal `;`,
/// with no awareness of terminators inside string literals or inside a DDL
/// default clause. That is safe for dumps produced by this crate's own
/// writer as long as values contain no `;`, and is a documented limitation
/// for arbitrary SQL input.
///
/// Each candidate is trimmed; leading `--` comment lines are stripped so
/// that the statement following a structure comment survives. Candidates
/// that are empty after that (blank segments, comment-only segments) are
/// dropped. Output order matches input order exactly.
pub fn split_script(script: &str) -> Vec<Statement> {
    let mut statements = Vec::new();

    for candidate in script.split(';') {
        let text = strip_leading_comments(candidate).trim();
        if text.is_empty() {
            continue;
        }
        statements.push(Statement {
            index: statements.len(),
            text: text.to_string(),
        });
    }

    statements
}

/// Drop full comment lines from the front of a candidate. Comments after
/// the statement has started are left in place.
fn strip_leading_comments(candidate: &str) -> &str {
    let mut rest = candidate;
    loop {
        let trimmed = rest.trim_start();
        if !trimmed.starts_with("--") {
            return trimmed;
        }
        match trimmed.find('\n') {
            Some(pos) => rest = &trimmed[pos + 1..],
            // comment runs to the end of the candidate
            None => return "",
        }
    }
}
