//! "Did you mean" suggestions for unknown language names.

/// Suggestions at or above this distance ratio are dropped.
pub const MAX_RATIO: f64 = 0.33;

/// At most this many suggestions are returned.
pub const MAX_SUGGESTIONS: usize = 4;

/// A candidate name and its distance from the query.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion<'a> {
    pub name: &'a str,
    /// Edit distance divided by the query's length in characters.
    pub ratio: f64,
}

/// Names close to `query`, best first.
///
/// Candidates keep their relative order when their ratios tie.
pub fn suggest<'a, I>(query: &str, names: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    suggest_with(query, names, MAX_RATIO, MAX_SUGGESTIONS)
        .into_iter()
        .map(|s| s.name)
        .collect()
}

/// Like [`suggest`], with a custom threshold and limit.
pub fn suggest_with<'a, I>(query: &str, names: I, max_ratio: f64, limit: usize) -> Vec<Suggestion<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    let query_len = query.chars().count();
    if query_len == 0 {
        return Vec::new();
    }

    let mut scored: Vec<Suggestion<'a>> = names
        .into_iter()
        .map(|name| Suggestion {
            name,
            ratio: levenshtein(query, name) as f64 / query_len as f64,
        })
        .filter(|s| s.ratio < max_ratio)
        .collect();

    // `sort_by` is stable, so ties keep input order.
    scored.sort_by(|a, b| a.ratio.total_cmp(&b.ratio));
    scored.truncate(limit);
    scored
}

/// Edit distance between two strings, counted in characters.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}
