//! The fixed catalog of expression-quality rules.

use crate::errors::ReviewError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Declaration order is the catalog order used when rendering rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvaluationRule {
    Conciseness,
    #[serde(alias = "missing_elements")]
    MissingElements,
    Ambiguity,
    Typos,
    #[serde(alias = "dependency")]
    DependencyAmbiguity,
}

impl EvaluationRule {
    pub const ALL: [EvaluationRule; 5] = [
        EvaluationRule::Conciseness,
        EvaluationRule::MissingElements,
        EvaluationRule::Ambiguity,
        EvaluationRule::Typos,
        EvaluationRule::DependencyAmbiguity,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Conciseness => "conciseness",
            Self::MissingElements => "missing-elements",
            Self::Ambiguity => "ambiguity",
            Self::Typos => "typos",
            Self::DependencyAmbiguity => "dependency-ambiguity",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Conciseness => "Concise sentences",
            Self::MissingElements => "Missing elements",
            Self::Ambiguity => "Ambiguous wording",
            Self::Typos => "Typos",
            Self::DependencyAmbiguity => "Modifier attachment",
        }
    }

    /// Instruction text embedded verbatim in prompts.
    pub fn description(self) -> &'static str {
        match self {
            Self::Conciseness => {
                "Concise sentences: the sentence does not use passive voice, double negatives, partial negation or causative constructions."
            }
            Self::MissingElements => {
                "Missing elements: the subject, predicate and object of the sentence are explicit and none of them is missing."
            }
            Self::Ambiguity => {
                "Ambiguous wording: the sentence avoids vague expressions such as \"appropriately\" or \"as far as possible\"."
            }
            Self::Typos => "Typos: the sentence contains no misspellings and no omitted characters or words.",
            Self::DependencyAmbiguity => {
                "Modifier attachment: every modifier attaches to exactly one word, so the sentence has a single reading."
            }
        }
    }
}

impl fmt::Display for EvaluationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for EvaluationRule {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        match key.as_str() {
            "conciseness" => Ok(Self::Conciseness),
            "missing-elements" => Ok(Self::MissingElements),
            "ambiguity" => Ok(Self::Ambiguity),
            "typos" => Ok(Self::Typos),
            "dependency-ambiguity" | "dependency" => Ok(Self::DependencyAmbiguity),
            _ => Err(ReviewError::UnknownRule(s.to_string())),
        }
    }
}

/// Non-empty set of active rules, iterated in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RuleSet(BTreeSet<EvaluationRule>);

#[allow(clippy::len_without_is_empty)]
impl RuleSet {
    pub fn new(rules: impl IntoIterator<Item = EvaluationRule>) -> Result<Self, ReviewError> {
        let set: BTreeSet<_> = rules.into_iter().collect();
        if set.is_empty() {
            return Err(ReviewError::NoRulesSelected);
        }
        Ok(Self(set))
    }

    pub fn parse_keys<S: AsRef<str>>(keys: &[S]) -> Result<Self, ReviewError> {
        let rules = keys
            .iter()
            .map(|k| k.as_ref().parse::<EvaluationRule>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(rules)
    }

    pub fn all() -> Self {
        Self(EvaluationRule::ALL.into_iter().collect())
    }

    pub fn contains(&self, rule: EvaluationRule) -> bool {
        self.0.contains(&rule)
    }

    pub fn iter(&self) -> impl Iterator<Item = EvaluationRule> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.iter().map(EvaluationRule::label).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_rule_has_distinct_key_and_description() {
        let keys: BTreeSet<_> = EvaluationRule::ALL.iter().map(|r| r.key()).collect();
        let descs: BTreeSet<_> = EvaluationRule::ALL
            .iter()
            .map(|r| r.description())
            .collect();
        assert_eq!(keys.len(), EvaluationRule::ALL.len());
        assert_eq!(descs.len(), EvaluationRule::ALL.len());
    }

    #[test]
    fn keys_round_trip_and_legacy_keys_parse() {
        for rule in EvaluationRule::ALL {
            assert_eq!(rule.key().parse::<EvaluationRule>().unwrap(), rule);
        }
        assert_eq!(
            "missing_elements".parse::<EvaluationRule>().unwrap(),
            EvaluationRule::MissingElements
        );
        assert_eq!(
            "dependency".parse::<EvaluationRule>().unwrap(),
            EvaluationRule::DependencyAmbiguity
        );
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = "politeness".parse::<EvaluationRule>().unwrap_err();
        assert!(matches!(err, ReviewError::UnknownRule(ref k) if k == "politeness"));
    }

    #[test]
    fn empty_rule_set_is_a_validation_error() {
        let err = RuleSet::new(Vec::new()).unwrap_err();
        assert!(matches!(err, ReviewError::NoRulesSelected));
        assert_eq!(err.to_string(), "select at least one evaluation rule");

        let empty: [&str; 0] = [];
        assert!(RuleSet::parse_keys(&empty).is_err());
    }

    #[test]
    fn rule_set_iterates_in_catalog_order_without_duplicates() {
        let set = RuleSet::parse_keys(&["typos", "conciseness", "typos"]).unwrap();
        let got: Vec<_> = set.iter().collect();
        assert_eq!(
            got,
            vec![EvaluationRule::Conciseness, EvaluationRule::Typos]
        );
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn serde_accepts_legacy_snake_case_keys() {
        let rules: Vec<EvaluationRule> =
            serde_yaml::from_str("[missing_elements, dependency, ambiguity]").unwrap();
        assert_eq!(
            rules,
            vec![
                EvaluationRule::MissingElements,
                EvaluationRule::DependencyAmbiguity,
                EvaluationRule::Ambiguity
            ]
        );
    }
}
