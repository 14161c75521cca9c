//! Cascading selection over the PGR hierarchy.
//!
//! ```text
//! Company → Sector → Hazard → Risk → Action
//! ```
//!
//! Selecting an entry at one level empties every table below it before the
//! child list is loaded. Deleting the selected entry clears its own and all
//! descendant selections. This module holds only the state transitions; the
//! fetching is done by `sst-client`'s navigator.

use serde::Serialize;

use crate::entities::{Action, Company, Hazard, Keyed, Risk, Sector, find_by_id};
use crate::errors::CoreError;

/// One level of the PGR hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PgrLevel {
    Company,
    Sector,
    Hazard,
    Risk,
    Action,
}

impl PgrLevel {
    pub const ALL: [Self; 5] = [
        Self::Company,
        Self::Sector,
        Self::Hazard,
        Self::Risk,
        Self::Action,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn child(self) -> Option<Self> {
        match self {
            Self::Company => Some(Self::Sector),
            Self::Sector => Some(Self::Hazard),
            Self::Hazard => Some(Self::Risk),
            Self::Risk => Some(Self::Action),
            Self::Action => None,
        }
    }

    #[must_use]
    pub const fn parent(self) -> Option<Self> {
        match self {
            Self::Company => None,
            Self::Sector => Some(Self::Company),
            Self::Hazard => Some(Self::Sector),
            Self::Risk => Some(Self::Hazard),
            Self::Action => Some(Self::Risk),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Sector => "sector",
            Self::Hazard => "hazard",
            Self::Risk => "risk",
            Self::Action => "action",
        }
    }
}

impl std::fmt::Display for PgrLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which chain of ids is currently selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PgrSelection {
    #[default]
    NothingSelected,
    CompanySelected {
        company: i64,
    },
    SectorSelected {
        company: i64,
        sector: i64,
    },
    HazardSelected {
        company: i64,
        sector: i64,
        hazard: i64,
    },
    RiskSelected {
        company: i64,
        sector: i64,
        hazard: i64,
        risk: i64,
    },
}

impl PgrSelection {
    /// Selected ids from the company down.
    #[must_use]
    pub fn chain(&self) -> Vec<i64> {
        match *self {
            Self::NothingSelected => vec![],
            Self::CompanySelected { company } => vec![company],
            Self::SectorSelected { company, sector } => vec![company, sector],
            Self::HazardSelected {
                company,
                sector,
                hazard,
            } => vec![company, sector, hazard],
            Self::RiskSelected {
                company,
                sector,
                hazard,
                risk,
            } => vec![company, sector, hazard, risk],
        }
    }

    /// Build a selection from a chain of ids. Anything past the risk level
    /// is ignored.
    #[must_use]
    pub fn from_chain(chain: &[i64]) -> Self {
        match *chain {
            [] => Self::NothingSelected,
            [company] => Self::CompanySelected { company },
            [company, sector] => Self::SectorSelected { company, sector },
            [company, sector, hazard] => Self::HazardSelected {
                company,
                sector,
                hazard,
            },
            [company, sector, hazard, risk, ..] => Self::RiskSelected {
                company,
                sector,
                hazard,
                risk,
            },
        }
    }

    #[must_use]
    pub fn selected(&self, level: PgrLevel) -> Option<i64> {
        self.chain().get(level.index()).copied()
    }

    /// Keep the selections above `level`, dropping `level` and below.
    #[must_use]
    pub fn truncate(&self, level: PgrLevel) -> Self {
        let chain = self.chain();
        Self::from_chain(&chain[..level.index().min(chain.len())])
    }
}

/// Table contents for every level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PgrTables {
    pub companies: Vec<Company>,
    pub sectors: Vec<Sector>,
    pub hazards: Vec<Hazard>,
    pub risks: Vec<Risk>,
    pub actions: Vec<Action>,
}

impl PgrTables {
    /// Empty every table strictly below `level`.
    pub fn clear_below(&mut self, level: PgrLevel) {
        for lower in PgrLevel::ALL.into_iter().filter(|l| *l > level) {
            self.clear(lower);
        }
    }

    pub fn clear(&mut self, level: PgrLevel) {
        match level {
            PgrLevel::Company => self.companies.clear(),
            PgrLevel::Sector => self.sectors.clear(),
            PgrLevel::Hazard => self.hazards.clear(),
            PgrLevel::Risk => self.risks.clear(),
            PgrLevel::Action => self.actions.clear(),
        }
    }

    #[must_use]
    pub fn len(&self, level: PgrLevel) -> usize {
        match level {
            PgrLevel::Company => self.companies.len(),
            PgrLevel::Sector => self.sectors.len(),
            PgrLevel::Hazard => self.hazards.len(),
            PgrLevel::Risk => self.risks.len(),
            PgrLevel::Action => self.actions.len(),
        }
    }

    fn contains(&self, level: PgrLevel, id: i64) -> Result<(), CoreError> {
        let entity = level.as_str();
        match level {
            PgrLevel::Company => find_by_id(&self.companies, entity, id).map(|_| ()),
            PgrLevel::Sector => find_by_id(&self.sectors, entity, id).map(|_| ()),
            PgrLevel::Hazard => find_by_id(&self.hazards, entity, id).map(|_| ()),
            PgrLevel::Risk => find_by_id(&self.risks, entity, id).map(|_| ()),
            PgrLevel::Action => find_by_id(&self.actions, entity, id).map(|_| ()),
        }
    }
}

/// Selection plus tables: everything the PGR view shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PgrState {
    pub selection: PgrSelection,
    pub tables: PgrTables,
}

impl PgrState {
    /// Select `id` at `level`. Returns the child level whose list must be
    /// loaded next.
    ///
    /// On success every table below `level` is empty.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotSelectable`] for actions.
    /// - [`CoreError::MissingSelection`] when the parent is not selected.
    /// - [`CoreError::NotFound`] when `id` is not in the level's table.
    pub fn select(&mut self, level: PgrLevel, id: i64) -> Result<PgrLevel, CoreError> {
        let child = level.child().ok_or_else(|| CoreError::NotSelectable {
            level: level.as_str().to_string(),
        })?;
        self.parent_for_create(level)?;
        self.tables.contains(level, id)?;

        let mut chain = self.selection.truncate(level).chain();
        chain.push(id);
        self.selection = PgrSelection::from_chain(&chain);
        self.tables.clear_below(level);
        Ok(child)
    }

    /// Record that `id` was deleted at `level`. Returns true when it was the
    /// selected entry, in which case its selection and every descendant
    /// selection and table is cleared.
    pub fn apply_deleted(&mut self, level: PgrLevel, id: i64) -> bool {
        if self.selection.selected(level) != Some(id) {
            return false;
        }
        self.selection = self.selection.truncate(level);
        self.tables.clear_below(level);
        true
    }

    /// Id of the selected parent required to create an entry at `level`.
    /// Companies have no parent.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingSelection`] naming the parent level.
    pub fn parent_for_create(&self, level: PgrLevel) -> Result<Option<i64>, CoreError> {
        let Some(parent) = level.parent() else {
            return Ok(None);
        };
        self.selection
            .selected(parent)
            .map(Some)
            .ok_or_else(|| CoreError::MissingSelection {
                parent: parent.as_str().to_string(),
            })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn selected_company(&self) -> Option<&Company> {
        self.lookup(&self.tables.companies, PgrLevel::Company)
    }

    #[must_use]
    pub fn selected_risk(&self) -> Option<&Risk> {
        self.lookup(&self.tables.risks, PgrLevel::Risk)
    }

    fn lookup<'a, T: Keyed>(&self, items: &'a [T], level: PgrLevel) -> Option<&'a T> {
        let id = self.selection.selected(level)?;
        items.iter().find(|item| item.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn company(id: i64) -> Company {
        Company {
            id,
            name: format!("company {id}"),
            tax_id: None,
            address: None,
            activity: None,
            risk_grade: None,
        }
    }

    fn sector(id: i64, company_id: i64) -> Sector {
        Sector {
            id,
            company_id,
            name: format!("sector {id}"),
            description: None,
        }
    }

    fn hazard(id: i64, sector_id: i64) -> Hazard {
        Hazard {
            id,
            sector_id,
            name: format!("hazard {id}"),
            agent: None,
            source: None,
            description: None,
        }
    }

    fn risk(id: i64, hazard_id: i64) -> Risk {
        Risk {
            id,
            hazard_id,
            probability: 2,
            severity: 3,
            existing_measures: None,
        }
    }

    fn loaded_down_to_risk() -> PgrState {
        let mut state = PgrState::default();
        state.tables.companies = vec![company(1), company(2)];
        state.select(PgrLevel::Company, 1).unwrap();
        state.tables.sectors = vec![sector(10, 1)];
        state.select(PgrLevel::Sector, 10).unwrap();
        state.tables.hazards = vec![hazard(100, 10)];
        state.select(PgrLevel::Hazard, 100).unwrap();
        state.tables.risks = vec![risk(1000, 100)];
        state.select(PgrLevel::Risk, 1000).unwrap();
        state
    }

    #[test]
    fn chain_roundtrips_through_from_chain() {
        for chain in [vec![], vec![1], vec![1, 2], vec![1, 2, 3], vec![1, 2, 3, 4]] {
            assert_eq!(PgrSelection::from_chain(&chain).chain(), chain);
        }
    }

    #[test]
    fn selecting_company_empties_lower_tables_before_load() {
        let mut state = loaded_down_to_risk();
        assert_eq!(state.tables.risks.len(), 1);

        let next = state.select(PgrLevel::Company, 2).unwrap();

        assert_eq!(next, PgrLevel::Sector);
        assert_eq!(state.selection, PgrSelection::CompanySelected { company: 2 });
        for level in [
            PgrLevel::Sector,
            PgrLevel::Hazard,
            PgrLevel::Risk,
            PgrLevel::Action,
        ] {
            assert_eq!(state.tables.len(level), 0, "{level} table not cleared");
        }
        assert_eq!(state.tables.companies.len(), 2);
    }

    #[test]
    fn deleting_selected_entry_clears_descendants() {
        let mut state = loaded_down_to_risk();

        assert!(state.apply_deleted(PgrLevel::Sector, 10));

        assert_eq!(state.selection, PgrSelection::CompanySelected { company: 1 });
        assert_eq!(state.selection.selected(PgrLevel::Sector), None);
        assert_eq!(state.tables.hazards.len(), 0);
        assert_eq!(state.tables.risks.len(), 0);
    }

    #[test]
    fn deleting_unselected_entry_keeps_selection() {
        let mut state = loaded_down_to_risk();
        let before = state.selection;

        assert!(!state.apply_deleted(PgrLevel::Hazard, 999));

        assert_eq!(state.selection, before);
        assert_eq!(state.tables.risks.len(), 1);
    }

    #[test]
    fn create_requires_parent_selection() {
        let state = PgrState::default();
        assert_eq!(state.parent_for_create(PgrLevel::Company).unwrap(), None);
        let err = state.parent_for_create(PgrLevel::Sector).unwrap_err();
        assert_eq!(err.to_string(), "select a company first");

        let state = loaded_down_to_risk();
        assert_eq!(state.parent_for_create(PgrLevel::Action).unwrap(), Some(1000));
    }

    #[test]
    fn select_rejects_actions_orphans_and_unknown_ids() {
        let mut state = loaded_down_to_risk();
        assert!(matches!(
            state.select(PgrLevel::Action, 1),
            Err(CoreError::NotSelectable { .. })
        ));

        let mut fresh = PgrState::default();
        assert!(matches!(
            fresh.select(PgrLevel::Hazard, 1),
            Err(CoreError::MissingSelection { .. })
        ));
        assert!(matches!(
            fresh.select(PgrLevel::Company, 42),
            Err(CoreError::NotFound { .. })
        ));
    }

    #[test]
    fn reselecting_sibling_keeps_ancestors() {
        let mut state = loaded_down_to_risk();
        state.tables.sectors.push(sector(11, 1));
        state.select(PgrLevel::Sector, 11).unwrap();
        assert_eq!(
            state.selection,
            PgrSelection::SectorSelected {
                company: 1,
                sector: 11
            }
        );
        assert_eq!(state.selected_company().map(|c| c.id), Some(1));
        assert!(state.selected_risk().is_none());
    }

    #[test]
    fn reset_clears_everything() {
        let mut state = loaded_down_to_risk();
        state.reset();
        assert_eq!(state, PgrState::default());
    }
}
