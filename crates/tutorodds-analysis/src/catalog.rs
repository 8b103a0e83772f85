//! Tutoring strategy catalog
//!
//! Maps strategy IDs to their canonical names and to the natural-language
//! labels shown in figures. Each strategy is recorded in the annotated dataset
//! as a binary indicator column named `strategies-<id>`.
//!
//! The catalog is an ordinary value: build it once (usually with
//! [`StrategyCatalog::builtin`]) and pass it to whatever needs it.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// Prefix of strategy indicator column names.
pub const INDICATOR_COLUMN_PREFIX: &str = "strategies-";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct StrategyId(pub u32);

impl fmt::Display for StrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl StrategyId {
    /// Name of the indicator column recording this strategy.
    #[must_use]
    pub fn column_name(self) -> String {
        format!("{INDICATOR_COLUMN_PREFIX}{}", self.0)
    }

    /// Parses an indicator column name back into a strategy ID.
    #[must_use]
    pub fn from_column_name(column: &str) -> Option<Self> {
        column
            .strip_prefix(INDICATOR_COLUMN_PREFIX)?
            .parse()
            .ok()
            .map(Self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strategy {
    pub id: StrategyId,
    /// Canonical snake-case name, e.g. `Ask_a_question`.
    pub name: String,
    /// Natural-language label used in figures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Strategy {
    #[must_use]
    pub fn new(id: u32, name: &str, label: Option<&str>) -> Self {
        Self {
            id: StrategyId(id),
            name: name.to_owned(),
            label: label.map(str::to_owned),
        }
    }

    #[must_use]
    pub fn column_name(&self) -> String {
        self.id.column_name()
    }

    /// The label shown in figures, falling back to the canonical name.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum CatalogError {
    #[display("strategy ID {id} is defined more than once")]
    DuplicateId { id: StrategyId },
}

/// Immutable set of strategies, ordered by ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyCatalog {
    strategies: BTreeMap<StrategyId, Strategy>,
}

impl StrategyCatalog {
    /// Builds a catalog, rejecting duplicate IDs.
    pub fn new<I>(strategies: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = Strategy>,
    {
        let mut map = BTreeMap::new();
        for strategy in strategies {
            let id = strategy.id;
            if map.insert(id, strategy).is_some() {
                return Err(CatalogError::DuplicateId { id });
            }
        }
        Ok(Self { strategies: map })
    }

    /// The strategy scheme used to annotate tutor utterances.
    ///
    /// "Provide a hint" (3) is left out because it occurs too rarely, and "NA"
    /// (10) is not a strategy.
    #[must_use]
    pub fn builtin() -> Self {
        let strategies = [
            Strategy::new(1, "Explanation_of_concept", None),
            Strategy::new(2, "Ask_a_question", Some("Ask Question to Guide Thinking")),
            Strategy::new(4, "Provide_a_solution_strategy", Some("Give Solution Strategy")),
            Strategy::new(5, "Prompt_an_explanation", Some("Prompt Student to Explain")),
            Strategy::new(6, "Encourage_student", Some("Encourage Student in Generic Way")),
            Strategy::new(7, "Affirm_correct_answer", Some("Affirm Student's Correct Attempt")),
            Strategy::new(8, "Give_away_answer_explanation", Some("Give Away Answer/Explanation")),
            Strategy::new(9, "Retry", Some("Ask Student to Retry")),
        ];
        Self {
            strategies: strategies.into_iter().map(|s| (s.id, s)).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// All strategies in ascending ID order.
    pub fn strategies(&self) -> impl Iterator<Item = &Strategy> {
        self.strategies.values()
    }

    #[must_use]
    pub fn get(&self, id: StrategyId) -> Option<&Strategy> {
        self.strategies.get(&id)
    }

    #[must_use]
    pub fn strategy_for_column(&self, column: &str) -> Option<&Strategy> {
        self.get(StrategyId::from_column_name(column)?)
    }

    /// Natural-language label for an indicator column.
    #[must_use]
    pub fn display_label(&self, column: &str) -> Option<&str> {
        self.strategy_for_column(column).map(Strategy::display_label)
    }

    /// Strategies to evaluate, in ID order, skipping `excluded` IDs.
    pub fn evaluated<'a>(
        &'a self,
        excluded: &'a [StrategyId],
    ) -> impl Iterator<Item = &'a Strategy> + 'a {
        self.strategies().filter(|s| !excluded.contains(&s.id))
    }

    /// Indicator column names expected in the dataset, skipping `excluded` IDs.
    #[must_use]
    pub fn indicator_columns(&self, excluded: &[StrategyId]) -> Vec<String> {
        self.evaluated(excluded).map(Strategy::column_name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_ids() {
        let catalog = StrategyCatalog::builtin();
        let ids = catalog.strategies().map(|s| s.id.0).collect::<Vec<_>>();
        assert_eq!(ids, [1, 2, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_indicator_columns_skip_excluded() {
        let catalog = StrategyCatalog::builtin();
        let columns = catalog.indicator_columns(&[StrategyId(1)]);
        assert_eq!(
            columns,
            [
                "strategies-2",
                "strategies-4",
                "strategies-5",
                "strategies-6",
                "strategies-7",
                "strategies-8",
                "strategies-9",
            ]
        );
    }

    #[test]
    fn test_display_labels() {
        let catalog = StrategyCatalog::builtin();
        assert_eq!(
            catalog.display_label("strategies-4"),
            Some("Give Solution Strategy")
        );
        assert_eq!(
            catalog.display_label("strategies-9"),
            Some("Ask Student to Retry")
        );
        // no natural-language label, falls back to the canonical name
        assert_eq!(
            catalog.display_label("strategies-1"),
            Some("Explanation_of_concept")
        );
        assert_eq!(catalog.display_label("strategies-3"), None);
        assert_eq!(catalog.display_label("TUTOR_COPILOT_ASSIGNMENT"), None);
    }

    #[test]
    fn test_column_name_round_trip() {
        assert_eq!(StrategyId(7).column_name(), "strategies-7");
        assert_eq!(
            StrategyId::from_column_name("strategies-7"),
            Some(StrategyId(7))
        );
        assert_eq!(StrategyId::from_column_name("strategies-x"), None);
        assert_eq!(StrategyId::from_column_name("other-7"), None);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = StrategyCatalog::new([
            Strategy::new(2, "Ask_a_question", None),
            Strategy::new(2, "Ask_again", None),
        ])
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { id: StrategyId(2) }));
    }
}
