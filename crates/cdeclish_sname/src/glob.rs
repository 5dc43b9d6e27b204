//! Glob matching over scoped names.
//!
//! `*` matches exactly one scope segment; `**` matches any run of zero or
//! more scope segments (typically used as a leading `**::x` meaning "x at
//! any depth"). Segments are separated by `::`, same as an [`crate::SName`]'s
//! own separator.

use crate::SName;

/// Does `sname` match the glob `pattern`?
///
/// Worked cases from the design: `s::*::foo` matches any single-scope
/// nesting inside top-level `s`; `**::x` matches any name whose local name
/// is `x`; `*` matches any single, unscoped name.
pub fn matches(sname: &SName, pattern: &str) -> bool {
    let pattern_segments: Vec<&str> = if pattern.is_empty() {
        Vec::new()
    } else {
        pattern.split("::").collect()
    };
    let name_segments: Vec<&str> = sname.scopes().iter().map(|s| s.name.as_str()).collect();
    match_segments(&pattern_segments, &name_segments)
}

fn match_segments(pattern: &[&str], name: &[&str]) -> bool {
    match pattern.first() {
        None => name.is_empty(),
        Some(&"**") => {
            // `**` may absorb zero or more segments; try every split point.
            (0..=name.len()).any(|skip| match_segments(&pattern[1..], &name[skip..]))
        }
        Some(&"*") => {
            !name.is_empty() && match_segments(&pattern[1..], &name[1..])
        }
        Some(lit) => {
            !name.is_empty() && name[0] == *lit && match_segments(&pattern[1..], &name[1..])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScopeKind;

    fn sname(parts: &[&str]) -> SName {
        let mut s = SName::empty();
        for p in parts {
            s.append_name(*p, ScopeKind::Scope);
        }
        s
    }

    #[test]
    fn star_matches_single_unscoped_name() {
        assert!(matches(&sname(&["foo"]), "*"));
        assert!(!matches(&sname(&["A", "foo"]), "*"));
    }

    #[test]
    fn double_star_matches_any_depth() {
        assert!(matches(&sname(&["foo"]), "**::foo"));
        assert!(matches(&sname(&["A", "foo"]), "**::foo"));
        assert!(matches(&sname(&["A", "B", "foo"]), "**::foo"));
        assert!(!matches(&sname(&["A", "B", "bar"]), "**::foo"));
    }

    #[test]
    fn worked_case_single_scope_nesting_inside_top_level() {
        assert!(matches(&sname(&["s", "X", "foo"]), "s::*::foo"));
        assert!(!matches(&sname(&["s", "foo"]), "s::*::foo"));
        assert!(!matches(&sname(&["s", "X", "Y", "foo"]), "s::*::foo"));
    }

    #[test]
    fn literal_segments_must_match_exactly() {
        assert!(matches(&sname(&["A", "B"]), "A::B"));
        assert!(!matches(&sname(&["A", "C"]), "A::B"));
    }

    #[test]
    fn property_p4_star_iff_single_segment() {
        for parts in [vec!["x"], vec!["A", "x"], vec!["A", "B", "x"]] {
            let s = sname(&parts);
            assert_eq!(matches(&s, "*"), s.count() == 1);
        }
    }

    #[test]
    fn property_p4_double_star_iff_local_name_matches() {
        for parts in [vec!["x"], vec!["A", "x"], vec!["A", "B", "y"]] {
            let s = sname(&parts);
            assert_eq!(matches(&s, "**::x"), s.local_name() == "x");
        }
    }
}
