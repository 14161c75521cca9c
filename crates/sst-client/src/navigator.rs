//! PGR navigator: the cascading selection driven against a data source.
//!
//! [`PgrState`] owns the transition rules; the navigator adds the fetches.
//! Selecting an entry empties every lower table first, then loads the child
//! list. Deleting reloads the level's list and, when the deleted entry was
//! selected, drops the selection below it.

use sst_core::entities::{Action, Company, Hazard, Risk, Sector};
use sst_core::selection::{PgrLevel, PgrState};

use crate::{ApiClient, ClientError, NavigatorError};

/// Where the navigator reads PGR lists from.
#[allow(async_fn_in_trait)]
pub trait PgrSource {
    async fn companies(&self) -> Result<Vec<Company>, ClientError>;
    async fn sectors(&self, company_id: i64) -> Result<Vec<Sector>, ClientError>;
    async fn hazards(&self, sector_id: i64) -> Result<Vec<Hazard>, ClientError>;
    async fn risks(&self, hazard_id: i64) -> Result<Vec<Risk>, ClientError>;
    async fn actions(&self, risk_id: i64) -> Result<Vec<Action>, ClientError>;
    async fn delete(&self, level: PgrLevel, id: i64) -> Result<(), ClientError>;
}

impl PgrSource for ApiClient {
    async fn companies(&self) -> Result<Vec<Company>, ClientError> {
        self.list_companies().await
    }

    async fn sectors(&self, company_id: i64) -> Result<Vec<Sector>, ClientError> {
        self.list_sectors(company_id).await
    }

    async fn hazards(&self, sector_id: i64) -> Result<Vec<Hazard>, ClientError> {
        self.list_hazards(sector_id).await
    }

    async fn risks(&self, hazard_id: i64) -> Result<Vec<Risk>, ClientError> {
        self.list_risks(hazard_id).await
    }

    async fn actions(&self, risk_id: i64) -> Result<Vec<Action>, ClientError> {
        self.list_actions(risk_id).await
    }

    async fn delete(&self, level: PgrLevel, id: i64) -> Result<(), ClientError> {
        self.pgr_delete(level, id).await
    }
}

impl<T: PgrSource> PgrSource for &T {
    async fn companies(&self) -> Result<Vec<Company>, ClientError> {
        (**self).companies().await
    }

    async fn sectors(&self, company_id: i64) -> Result<Vec<Sector>, ClientError> {
        (**self).sectors(company_id).await
    }

    async fn hazards(&self, sector_id: i64) -> Result<Vec<Hazard>, ClientError> {
        (**self).hazards(sector_id).await
    }

    async fn risks(&self, hazard_id: i64) -> Result<Vec<Risk>, ClientError> {
        (**self).risks(hazard_id).await
    }

    async fn actions(&self, risk_id: i64) -> Result<Vec<Action>, ClientError> {
        (**self).actions(risk_id).await
    }

    async fn delete(&self, level: PgrLevel, id: i64) -> Result<(), ClientError> {
        (**self).delete(level, id).await
    }
}

pub struct PgrNavigator<S> {
    source: S,
    state: PgrState,
}

impl<S: PgrSource> PgrNavigator<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: PgrState::default(),
        }
    }

    pub const fn source(&self) -> &S {
        &self.source
    }

    pub const fn state(&self) -> &PgrState {
        &self.state
    }

    /// # Errors
    ///
    /// Returns [`NavigatorError::Client`] when the request fails.
    pub async fn load_companies(&mut self) -> Result<(), NavigatorError> {
        self.fetch(PgrLevel::Company, None).await
    }

    /// Select `id` at `level` and load its children.
    ///
    /// # Errors
    ///
    /// [`NavigatorError::Selection`] (no request is sent) when the level is
    /// not selectable, its parent is not selected or `id` is not listed;
    /// [`NavigatorError::Client`] when the child list fails to load. In the
    /// latter case the selection stands and the child table stays empty.
    pub async fn select(&mut self, level: PgrLevel, id: i64) -> Result<(), NavigatorError> {
        let child = self.state.select(level, id)?;
        self.fetch(child, Some(id)).await
    }

    /// Re-fetch the list at `level` under the current selection.
    ///
    /// # Errors
    ///
    /// [`NavigatorError::Selection`] when the parent is not selected.
    pub async fn reload(&mut self, level: PgrLevel) -> Result<(), NavigatorError> {
        let parent = self.state.parent_for_create(level)?;
        self.fetch(level, parent).await
    }

    /// Delete `id` at `level`, then reload that level. Returns true when the
    /// deleted entry was selected.
    ///
    /// # Errors
    ///
    /// [`NavigatorError::Selection`] (no request is sent) when the level's
    /// parent is not selected; [`NavigatorError::Client`] when the delete or
    /// the reload fails. A failed delete leaves the state untouched.
    pub async fn delete(&mut self, level: PgrLevel, id: i64) -> Result<bool, NavigatorError> {
        let parent = self.state.parent_for_create(level)?;
        self.source.delete(level, id).await?;
        let was_selected = self.state.apply_deleted(level, id);
        self.fetch(level, parent).await?;
        Ok(was_selected)
    }

    /// Clear everything and reload companies.
    ///
    /// # Errors
    ///
    /// As [`Self::load_companies`].
    pub async fn reset(&mut self) -> Result<(), NavigatorError> {
        self.state.reset();
        self.load_companies().await
    }

    /// Parent id a new entry at `level` must carry.
    ///
    /// # Errors
    ///
    /// [`NavigatorError::Selection`] naming the parent level to select.
    pub fn parent_for_create(&self, level: PgrLevel) -> Result<Option<i64>, NavigatorError> {
        Ok(self.state.parent_for_create(level)?)
    }

    async fn fetch(&mut self, level: PgrLevel, parent: Option<i64>) -> Result<(), NavigatorError> {
        let tables = &mut self.state.tables;
        match (level, parent) {
            (PgrLevel::Company, _) => tables.companies = self.source.companies().await?,
            (PgrLevel::Sector, Some(id)) => tables.sectors = self.source.sectors(id).await?,
            (PgrLevel::Hazard, Some(id)) => tables.hazards = self.source.hazards(id).await?,
            (PgrLevel::Risk, Some(id)) => tables.risks = self.source.risks(id).await?,
            (PgrLevel::Action, Some(id)) => tables.actions = self.source.actions(id).await?,
            (_, None) => tables.clear(level),
        }
        tracing::debug!(%level, ?parent, rows = tables.len(level), "pgr list loaded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;
    use sst_core::CoreError;
    use sst_core::selection::PgrSelection;

    use super::*;

    #[derive(Default)]
    struct FakeSource {
        companies: Mutex<Vec<Company>>,
        sectors: Vec<Sector>,
        hazards: Vec<Hazard>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeSource {
        fn log(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl PgrSource for FakeSource {
        async fn companies(&self) -> Result<Vec<Company>, ClientError> {
            self.log("companies".into());
            Ok(self.companies.lock().unwrap().clone())
        }

        async fn sectors(&self, company_id: i64) -> Result<Vec<Sector>, ClientError> {
            self.log(format!("sectors {company_id}"));
            Ok(self
                .sectors
                .iter()
                .filter(|s| s.company_id == company_id)
                .cloned()
                .collect())
        }

        async fn hazards(&self, sector_id: i64) -> Result<Vec<Hazard>, ClientError> {
            self.log(format!("hazards {sector_id}"));
            Ok(self
                .hazards
                .iter()
                .filter(|h| h.sector_id == sector_id)
                .cloned()
                .collect())
        }

        async fn risks(&self, hazard_id: i64) -> Result<Vec<Risk>, ClientError> {
            self.log(format!("risks {hazard_id}"));
            Ok(vec![])
        }

        async fn actions(&self, risk_id: i64) -> Result<Vec<Action>, ClientError> {
            self.log(format!("actions {risk_id}"));
            Ok(vec![])
        }

        async fn delete(&self, level: PgrLevel, id: i64) -> Result<(), ClientError> {
            self.log(format!("delete {level} {id}"));
            if level == PgrLevel::Company {
                self.companies.lock().unwrap().retain(|c| c.id != id);
            }
            Ok(())
        }
    }

    fn company(id: i64) -> Company {
        Company {
            id,
            name: format!("Empresa {id}"),
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
            name: format!("Setor {id}"),
            description: None,
        }
    }

    fn hazard(id: i64, sector_id: i64) -> Hazard {
        Hazard {
            id,
            sector_id,
            name: format!("Perigo {id}"),
            agent: None,
            source: None,
            description: None,
        }
    }

    fn navigator() -> PgrNavigator<FakeSource> {
        PgrNavigator::new(FakeSource {
            companies: Mutex::new(vec![company(1), company(2)]),
            sectors: vec![sector(10, 1), sector(11, 1), sector(20, 2)],
            hazards: vec![hazard(100, 10)],
            ..FakeSource::default()
        })
    }

    #[tokio::test]
    async fn selecting_walks_down_and_loads_children() {
        let mut nav = navigator();
        nav.load_companies().await.unwrap();
        nav.select(PgrLevel::Company, 1).await.unwrap();
        assert_eq!(nav.state().tables.sectors.len(), 2);

        nav.select(PgrLevel::Sector, 10).await.unwrap();
        assert_eq!(nav.state().tables.hazards.len(), 1);
        assert_eq!(
            nav.state().selection,
            PgrSelection::SectorSelected {
                company: 1,
                sector: 10
            }
        );

        // Switching company drops the sector selection and its hazards.
        nav.select(PgrLevel::Company, 2).await.unwrap();
        assert_eq!(nav.state().selection, PgrSelection::CompanySelected { company: 2 });
        assert!(nav.state().tables.hazards.is_empty());
        assert_eq!(nav.state().tables.sectors, vec![sector(20, 2)]);
        assert_eq!(
            nav.source().calls(),
            ["companies", "sectors 1", "hazards 10", "sectors 2"]
        );
    }

    #[tokio::test]
    async fn selection_errors_send_no_request() {
        let mut nav = navigator();
        nav.load_companies().await.unwrap();

        let err = nav.select(PgrLevel::Sector, 10).await.unwrap_err();
        assert!(matches!(
            err,
            NavigatorError::Selection(CoreError::MissingSelection { .. })
        ));
        let err = nav.select(PgrLevel::Company, 99).await.unwrap_err();
        assert!(matches!(err, NavigatorError::Selection(CoreError::NotFound { .. })));
        assert_eq!(nav.source().calls(), ["companies"]);

        assert_eq!(
            nav.parent_for_create(PgrLevel::Hazard).unwrap_err().to_string(),
            "select a sector first"
        );
    }

    #[tokio::test]
    async fn deleting_selected_company_clears_descendants_and_reloads() {
        let mut nav = navigator();
        nav.load_companies().await.unwrap();
        nav.select(PgrLevel::Company, 1).await.unwrap();
        nav.select(PgrLevel::Sector, 10).await.unwrap();

        let was_selected = nav.delete(PgrLevel::Company, 1).await.unwrap();
        assert!(was_selected);
        assert_eq!(nav.state().selection, PgrSelection::NothingSelected);
        assert!(nav.state().tables.sectors.is_empty());
        assert!(nav.state().tables.hazards.is_empty());
        assert_eq!(nav.state().tables.companies, vec![company(2)]);
    }

    #[tokio::test]
    async fn deleting_unselected_sector_keeps_selection() {
        let mut nav = navigator();
        nav.load_companies().await.unwrap();
        nav.select(PgrLevel::Company, 1).await.unwrap();
        nav.select(PgrLevel::Sector, 10).await.unwrap();

        let was_selected = nav.delete(PgrLevel::Sector, 11).await.unwrap();
        assert!(!was_selected);
        assert_eq!(nav.state().selection.selected(PgrLevel::Sector), Some(10));
        assert!(nav.source().calls().ends_with(&["delete sector 11".into(), "sectors 1".into()]));
    }

    #[tokio::test]
    async fn delete_without_parent_selection_sends_nothing() {
        let mut nav = navigator();
        nav.load_companies().await.unwrap();

        let err = nav.delete(PgrLevel::Sector, 10).await.unwrap_err();
        assert_eq!(err.to_string(), "select a company first");
        assert_eq!(nav.source().calls(), ["companies"]);
    }

    #[tokio::test]
    async fn reset_clears_and_reloads_companies() {
        let mut nav = navigator();
        nav.load_companies().await.unwrap();
        nav.select(PgrLevel::Company, 1).await.unwrap();
        nav.reset().await.unwrap();
        assert_eq!(nav.state().selection, PgrSelection::NothingSelected);
        assert_eq!(nav.state().tables.companies.len(), 2);
        assert!(nav.state().tables.sectors.is_empty());
    }
}
