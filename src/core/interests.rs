use std::collections::HashSet;

/// Interest similarity (0-1) as the Jaccard coefficient of two tag sets
///
/// Tags are compared case-insensitively. If either side has no tags the
/// score is 0.0: there is nothing to compare, which is not a match.
pub fn interest_score<A, B>(a: &[A], b: &[B]) -> f64
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let set_a = tag_set(a);
    let set_b = tag_set(b);

    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();

    intersection as f64 / union as f64
}

/// Tags present on both sides, in the order they appear in `target`
pub fn shared_interests<A, B>(target: &[A], candidate: &[B]) -> Vec<String>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let candidate_set = tag_set(candidate);
    let mut shared: Vec<String> = Vec::new();

    for tag in target {
        let tag = tag.as_ref().trim().to_lowercase();
        if candidate_set.contains(&tag) && !shared.contains(&tag) {
            shared.push(tag);
        }
    }

    shared
}

fn tag_set<T: AsRef<str>>(tags: &[T]) -> HashSet<String> {
    tags.iter()
        .map(|t| t.as_ref().trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}
