//! Case-insensitive list filtering.

use crate::entities::{EnvironmentalHazardRecord, ErgonomicAssessment, ExamRecord};

/// A record that can be matched against a free-text filter term.
pub trait Searchable {
    /// The text fields the filter looks at.
    fn haystack(&self) -> Vec<&str>;

    /// True when `term` is blank or any haystack field contains it,
    /// ignoring case.
    fn matches(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        needle.is_empty()
            || self
                .haystack()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
    }
}

impl Searchable for ExamRecord {
    fn haystack(&self) -> Vec<&str> {
        vec![&self.name, &self.function, &self.sector]
    }
}

impl Searchable for ErgonomicAssessment {
    fn haystack(&self) -> Vec<&str> {
        vec![&self.sector, &self.function, self.band.label()]
    }
}

impl Searchable for EnvironmentalHazardRecord {
    fn haystack(&self) -> Vec<&str> {
        vec![&self.company, &self.sector, &self.function, &self.agent]
    }
}

/// Keep the records matching `term`, in their original order.
#[must_use]
pub fn filter<'a, T: Searchable>(items: &'a [T], term: &str) -> Vec<&'a T> {
    items.iter().filter(|item| item.matches(term)).collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::enums::RiskBand;

    fn assessment(id: i64, sector: &str, function: &str, band: RiskBand) -> ErgonomicAssessment {
        ErgonomicAssessment {
            id,
            company: None,
            sector: sector.into(),
            function: function.into(),
            worker: None,
            workstation_type: "Industrial".into(),
            assessed_on: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            score: 18,
            band,
            notes: None,
        }
    }

    #[test]
    fn matches_ignores_case_and_blank_terms() {
        let a = assessment(1, "Solda", "Welder", RiskBand::High);
        assert!(a.matches("sOLDa"));
        assert!(a.matches("alto"));
        assert!(a.matches("   "));
        assert!(!a.matches("pintura"));
    }

    #[test]
    fn filter_keeps_order() {
        let items = vec![
            assessment(1, "Solda", "Welder", RiskBand::High),
            assessment(2, "Pintura", "Painter", RiskBand::Low),
            assessment(3, "Solda", "Helper", RiskBand::Medium),
        ];
        let ids: Vec<i64> = filter(&items, "solda").iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
