//! Organism deciders
//!
//! Records are loaded only for the organisms enabled for a run. A decider
//! recognizes one organism by a case-insensitive substring of the record's
//! classification section; the checker combines the enabled deciders.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Organism classes a sequence source can fall into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Organism {
    Mouse,
    Human,
    Rat,
    Other,
}

/// Decider expressions, in the order they are tried
const DECIDERS: [(Organism, &str); 3] = [
    (Organism::Mouse, "mus musculus"),
    (Organism::Human, "sapiens"),
    (Organism::Rat, "rattus"),
];

impl Organism {
    /// Organism name as stored in MGD
    pub fn mgi_name(self) -> &'static str {
        match self {
            Organism::Mouse => "mouse, laboratory",
            Organism::Human => "human",
            Organism::Rat => "rat",
            Organism::Other => "Not Specified",
        }
    }

    /// Classify one organism name; anything no decider claims is `Other`
    pub fn classify(text: &str) -> Organism {
        DECIDERS
            .iter()
            .map(|(organism, _)| OrganismDecider::new(*organism))
            .find(|decider| decider.is(text))
            .map(|decider| decider.organism())
            .unwrap_or(Organism::Other)
    }
}

impl fmt::Display for Organism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Organism::Mouse => write!(f, "mouse"),
            Organism::Human => write!(f, "human"),
            Organism::Rat => write!(f, "rat"),
            Organism::Other => write!(f, "other"),
        }
    }
}

impl FromStr for Organism {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mouse" => Ok(Organism::Mouse),
            "human" => Ok(Organism::Human),
            "rat" => Ok(Organism::Rat),
            other => Err(format!("unknown organism '{}'", other)),
        }
    }
}

/// Recognizes one organism in classification text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrganismDecider {
    organism: Organism,
    expression: &'static str,
}

impl OrganismDecider {
    /// Decider for `organism`; `Other` has no expression and never matches
    pub fn new(organism: Organism) -> Self {
        let expression = DECIDERS
            .iter()
            .find(|(o, _)| *o == organism)
            .map(|(_, expression)| *expression)
            .unwrap_or("");
        Self {
            organism,
            expression,
        }
    }

    pub fn organism(&self) -> Organism {
        self.organism
    }

    pub fn is(&self, text: &str) -> bool {
        !self.expression.is_empty() && text.to_lowercase().contains(self.expression)
    }
}

/// The deciders enabled for one run
#[derive(Debug, Clone)]
pub struct OrganismChecker {
    deciders: Vec<OrganismDecider>,
}

impl OrganismChecker {
    pub fn new(enabled: &[Organism]) -> Self {
        let deciders = DECIDERS
            .iter()
            .filter(|(organism, _)| enabled.contains(organism))
            .map(|(organism, _)| OrganismDecider::new(*organism))
            .collect();
        Self { deciders }
    }

    /// First enabled organism the classification section matches
    pub fn matching(&self, classification: &str) -> Option<Organism> {
        self.deciders
            .iter()
            .find(|decider| decider.is(classification))
            .map(OrganismDecider::organism)
    }

    /// True iff the section exists and matches any enabled decider
    ///
    /// A record without a classification section is an expected no-match.
    pub fn check_organism(&self, classification: Option<&str>) -> bool {
        classification.is_some_and(|text| self.matching(text).is_some())
    }
}
