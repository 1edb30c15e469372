use crate::BodyPart;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A body-part-tagged free-text medical note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub body_part: BodyPart,
    pub description: String,
}

impl Condition {
    pub fn new(body_part: BodyPart, description: impl Into<String>) -> Self {
        Self {
            body_part,
            description: description.into(),
        }
    }
}

/// A condition list indexed by body part.
///
/// Only presence is tracked per part; when several conditions name the same part, the first one
/// in input order is the one shown in detail views.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionIndex {
    conditions: Vec<Condition>,
    first_by_part: IndexMap<BodyPart, usize>,
}

impl ConditionIndex {
    pub fn new(conditions: Vec<Condition>) -> Self {
        let mut first_by_part = IndexMap::new();
        for (idx, condition) in conditions.iter().enumerate() {
            first_by_part.entry(condition.body_part).or_insert(idx);
        }
        Self {
            conditions,
            first_by_part,
        }
    }

    /// Parses a JSON array of `{ "bodyPart": ..., "description": ... }` objects.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let conditions: Vec<Condition> =
            serde_json::from_str(text).map_err(|e| Error::InvalidConditionsJson {
                message: e.to_string(),
            })?;
        Ok(Self::new(conditions))
    }

    pub fn is_affected(&self, part: BodyPart) -> bool {
        self.first_by_part.contains_key(&part)
    }

    pub fn first_for(&self, part: BodyPart) -> Option<&Condition> {
        let idx = *self.first_by_part.get(&part)?;
        self.conditions.get(idx)
    }

    /// Affected parts in order of first appearance.
    pub fn affected(&self) -> impl Iterator<Item = BodyPart> + '_ {
        self.first_by_part.keys().copied()
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl From<Vec<Condition>> for ConditionIndex {
    fn from(value: Vec<Condition>) -> Self {
        Self::new(value)
    }
}

impl FromIterator<Condition> for ConditionIndex {
    fn from_iter<T: IntoIterator<Item = Condition>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affected_iff_some_condition_references_the_part() {
        let index = ConditionIndex::new(vec![
            Condition::new(BodyPart::Heart, "Arrhythmia"),
            Condition::new(BodyPart::LeftLeg, "Fracture"),
        ]);
        for part in BodyPart::ALL {
            let expected = matches!(part, BodyPart::Heart | BodyPart::LeftLeg);
            assert_eq!(index.is_affected(part), expected, "{part}");
        }
    }

    #[test]
    fn first_match_wins_for_detail() {
        let index = ConditionIndex::new(vec![
            Condition::new(BodyPart::Liver, "Fatty liver"),
            Condition::new(BodyPart::Heart, "Arrhythmia"),
            Condition::new(BodyPart::Liver, "Hepatitis B"),
        ]);
        assert_eq!(
            index.first_for(BodyPart::Liver).map(|c| c.description.as_str()),
            Some("Fatty liver")
        );
        assert_eq!(
            index.affected().collect::<Vec<_>>(),
            vec![BodyPart::Liver, BodyPart::Heart]
        );
        assert_eq!(index.conditions().len(), 3);
    }

    #[test]
    fn parses_camel_case_json() {
        let index = ConditionIndex::from_json_str(
            r#"[{"bodyPart":"largeIntestine","description":"Colitis"}]"#,
        )
        .unwrap();
        assert_eq!(
            index.first_for(BodyPart::LargeIntestine),
            Some(&Condition::new(BodyPart::LargeIntestine, "Colitis"))
        );
    }

    #[test]
    fn rejects_unknown_parts_in_json() {
        let err = ConditionIndex::from_json_str(r#"[{"bodyPart":"tail","description":"x"}]"#)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConditionsJson { .. }));
    }
}
