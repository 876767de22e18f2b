//! Dot-delimited event name patterns.
//!
//! `*` matches exactly one segment, `**` matches zero or more segments, any
//! other segment matches literally:
//!
//! | pattern | matches | does not match |
//! |---|---|---|
//! | `animal.*` | `animal.created` | `animal.relationship.created` |
//! | `animal.**` | `animal.created`, `animal.relationship.created` | `customer.created` |
//! | `*.deleted` | `animal.deleted` | `resource.type.deleted` |
//! | `**.deleted` | `resource.type.deleted` | `animal.created` |

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    One,
    Many,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventPattern {
    segments: Vec<Segment>,
}

impl EventPattern {
    pub fn new(pattern: &str) -> Self {
        let segments = pattern
            .split('.')
            .map(|s| match s {
                "*" => Segment::One,
                "**" => Segment::Many,
                other => Segment::Literal(other.to_string()),
            })
            .collect();
        Self { segments }
    }

    /// Pattern matching every event.
    pub fn all() -> Self {
        Self::new("**")
    }

    pub fn matches(&self, event_name: &str) -> bool {
        let name: Vec<&str> = event_name.split('.').collect();
        matches_segments(&self.segments, &name)
    }
}

fn matches_segments(pattern: &[Segment], name: &[&str]) -> bool {
    match (pattern.split_first(), name.split_first()) {
        (None, None) => true,
        (None, Some(_)) => false,
        (Some((Segment::Many, rest)), _) => {
            matches_segments(rest, name)
                || (!name.is_empty() && matches_segments(pattern, &name[1..]))
        }
        (Some(_), None) => false,
        (Some((Segment::One, rest)), Some((_, name_rest))) => matches_segments(rest, name_rest),
        (Some((Segment::Literal(lit), rest)), Some((head, name_rest))) => {
            lit == head && matches_segments(rest, name_rest)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_pattern_matches_exactly() {
        let p = EventPattern::new("animal.created");
        assert!(p.matches("animal.created"));
        assert!(!p.matches("animal.updated"));
        assert!(!p.matches("animal.created.extra"));
    }

    #[test]
    fn single_wildcard_matches_one_segment() {
        let p = EventPattern::new("animal.*");
        assert!(p.matches("animal.created"));
        assert!(!p.matches("animal.relationship.created"));
        assert!(!p.matches("animal"));

        let suffix = EventPattern::new("*.deleted");
        assert!(suffix.matches("animal.deleted"));
        assert!(!suffix.matches("resource.type.deleted"));
    }

    #[test]
    fn double_wildcard_matches_any_depth() {
        let p = EventPattern::new("animal.**");
        assert!(p.matches("animal.created"));
        assert!(p.matches("animal.relationship.created"));
        assert!(!p.matches("customer.created"));

        let suffix = EventPattern::new("**.deleted");
        assert!(suffix.matches("resource.type.deleted"));
        assert!(suffix.matches("document.deleted"));
        assert!(!suffix.matches("document.created"));
    }

    #[test]
    fn all_matches_everything() {
        let p = EventPattern::all();
        assert!(p.matches("organization.group.association.updated"));
        assert!(p.matches("service.created"));
    }
}
