//! Canonical ordering of course identifiers
//!
//! Ids of the form `PREFIX + DIGITS` order by prefix, then numerically by
//! code, so `COMP999` comes before `COMP1001`. Ids without that shape fall
//! back to plain string comparison and sort after the well-formed ones, which
//! keeps the comparator a total order.

use coursemap_domain::CourseId;
use std::cmp::Ordering;

/// Compare two ids in canonical order
pub fn canonical_cmp(a: &CourseId, b: &CourseId) -> Ordering {
    match (a.code_parts(), b.code_parts()) {
        (Some(left), Some(right)) => left.cmp(&right).then_with(|| a.as_str().cmp(b.as_str())),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.as_str().cmp(b.as_str()),
    }
}

/// Sort ids in place in canonical order
pub fn sort_ids(ids: &mut [CourseId]) {
    ids.sort_by(canonical_cmp);
}

/// Return the ids in canonical order
///
/// # Examples
///
/// ```
/// use coursemap_domain::CourseId;
/// use coursemap_engine::sort::sorted;
///
/// let ids = ["COMP3506", "COMP1001", "MATH1051"].map(CourseId::from);
/// let ordered: Vec<String> = sorted(ids).iter().map(|id| id.to_string()).collect();
/// assert_eq!(ordered, ["COMP1001", "COMP3506", "MATH1051"]);
/// ```
pub fn sorted<I>(ids: I) -> Vec<CourseId>
where
    I: IntoIterator<Item = CourseId>,
{
    let mut ids: Vec<CourseId> = ids.into_iter().collect();
    sort_ids(&mut ids);
    ids
}
