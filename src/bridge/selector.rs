//! Matching of schema paths against change selectors.
//!
//! A selector is a schema path in which a segment may omit its key
//! predicate to match every entry of a list:
//!
//! ```text
//! /m:profiles/profile/name                    matches /m:profiles/profile[name='a']/name
//! /m:profiles/profile[name='a']/ports/port/name  matches only under profile 'a'
//! ```

/// One `/`-separated segment, split into node name and predicate text.
#[derive(Debug, PartialEq, Eq)]
struct Segment<'a> {
    name: &'a str,
    predicates: &'a str,
}

/// Splits a path into segments, ignoring `/` inside predicates and quotes.
fn segments(path: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0usize;

    for (i, ch) in path.char_indices() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') if depth > 0 => quote = Some(ch),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.saturating_sub(1),
            (None, '/') if depth == 0 => {
                if i > start {
                    out.push(split_segment(&path[start..i]));
                }
                start = i + 1;
            }
            _ => {}
        }
    }
    if start < path.len() {
        out.push(split_segment(&path[start..]));
    }
    out
}

fn split_segment(raw: &str) -> Segment<'_> {
    match raw.find('[') {
        Some(at) => Segment { name: &raw[..at], predicates: &raw[at..] },
        None => Segment { name: raw, predicates: "" },
    }
}

/// Returns `true` if `path` is addressed by `selector`.
///
/// Both must have the same depth. Segment names must be equal; a selector
/// segment without predicates accepts any predicates on the path segment.
#[must_use]
pub fn matches(selector: &str, path: &str) -> bool {
    let sel = segments(selector);
    let target = segments(path);
    sel.len() == target.len()
        && sel.iter().zip(&target).all(|(s, t)| {
            s.name == t.name && (s.predicates.is_empty() || s.predicates == t.predicates)
        })
}

/// Returns `true` if `path` is `prefix` itself or lies anywhere below it.
#[must_use]
pub fn is_under(prefix: &str, path: &str) -> bool {
    let pre = segments(prefix);
    let target = segments(path);
    pre.len() <= target.len()
        && pre.iter().zip(&target).all(|(p, t)| {
            p.name == t.name && (p.predicates.is_empty() || p.predicates == t.predicates)
        })
}
