use crate::types::internal::Submission;

/// Whether a query filters anything at all
pub fn is_blank_query(query: &str) -> bool {
    query.trim().is_empty()
}

/// Case-insensitive substring match over name, description, city and state
///
/// The query is lowercased but not trimmed, so surrounding spaces take part
/// in the match once the query has any non-space content.
pub fn matches(submission: &Submission, query: &str) -> bool {
    if is_blank_query(query) {
        return true;
    }

    let needle = query.to_lowercase();
    let contains = |field: &str| field.to_lowercase().contains(&needle);

    contains(&submission.name)
        || contains(&submission.description)
        || submission.location_city.as_deref().is_some_and(contains)
        || submission.location_state.as_deref().is_some_and(contains)
}

/// Filter in memory, keeping the input order
pub fn filter_submissions<'a>(submissions: &'a [Submission], query: &str) -> Vec<&'a Submission> {
    submissions.iter().filter(|s| matches(s, query)).collect()
}
