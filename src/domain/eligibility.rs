//! Eligibility rule gating every (child, resource) pairing.
//!
//! The same predicate must gate variable creation, constraint
//! construction, and result extraction; filtering inconsistently between
//! those stages is a correctness bug, so everything routes through
//! [`is_eligible`].

use super::child::Child;
use super::resource::Resource;

/// Whether a child may receive a resource.
///
/// A child is eligible unless the resource restricts by gender and the
/// child's gender differs from the restriction. No side effects.
#[must_use]
pub fn is_eligible(child: &Child, resource: &Resource) -> bool {
    resource.gender_specific.admits(child.gender)
}

/// Children from `children` eligible for `resource`, in input order.
#[must_use]
pub fn eligible_children<'a>(children: &'a [Child], resource: &Resource) -> Vec<&'a Child> {
    children
        .iter()
        .filter(|c| is_eligible(c, resource))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use crate::domain::child::Gender;
    use crate::domain::resource::{GenderRule, ResourceKind};

    use super::*;

    fn child(id: &str, gender: Gender) -> Child {
        Child::new(
            id,
            id,
            8,
            gender,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        )
    }

    fn resource(rule: GenderRule) -> Resource {
        Resource::new(
            "Uniforms",
            ResourceKind::Clothing,
            dec!(20),
            "sets",
            dec!(12),
            rule,
        )
    }

    #[test]
    fn unrestricted_resource_admits_everyone() {
        let r = resource(GenderRule::All);
        assert!(is_eligible(&child("a", Gender::Male), &r));
        assert!(is_eligible(&child("b", Gender::Female), &r));
    }

    #[test]
    fn restricted_resource_excludes_other_gender() {
        let r = resource(GenderRule::FemaleOnly);
        assert!(!is_eligible(&child("a", Gender::Male), &r));
        assert!(is_eligible(&child("b", Gender::Female), &r));
    }

    #[test]
    fn eligible_children_preserves_order() {
        let children = vec![
            child("a", Gender::Male),
            child("b", Gender::Female),
            child("c", Gender::Female),
        ];
        let r = resource(GenderRule::FemaleOnly);
        let eligible = eligible_children(&children, &r);
        let ids: Vec<&str> = eligible.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }
}
