//! "Did you mean" suggestions for mistyped element names

/// Edit distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }

    // Single rolling row
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = diagonal + usize::from(ca != cb);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(row[j + 1] + 1);
        }
    }
    row[b.len()]
}

/// Up to three known names within `max_distance` edits of `target`, closest first
pub(crate) fn similar_names<'a>(
    known: impl IntoIterator<Item = &'a str>,
    target: &str,
    max_distance: usize,
) -> Vec<String> {
    let mut candidates: Vec<(&str, usize)> = known
        .into_iter()
        .filter_map(|name| {
            let dist = levenshtein_distance(name, target);
            (dist > 0 && dist <= max_distance).then_some((name, dist))
        })
        .collect();

    candidates.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(b.0)));
    candidates.dedup_by(|a, b| a.0 == b.0);
    candidates
        .into_iter()
        .take(3)
        .map(|(name, _)| name.to_string())
        .collect()
}
