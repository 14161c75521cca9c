//! Status handling and PGR navigation over HTTP.

mod common;

use std::sync::Arc;

use pretty_assertions::assert_eq;
use sst_auth::{MemoryTokenStore, TokenStore};
use sst_client::ClientError;
use sst_client::navigator::PgrNavigator;
use sst_core::entities::RiskDraft;
use sst_core::selection::PgrLevel;

use common::FakeBackend;

#[tokio::test]
async fn unauthorized_clears_token_once_then_fails_fast() {
    let backend = FakeBackend::start(|_| (401, r#"{"detail":"Token inválido"}"#.to_string()));
    let store = Arc::new(MemoryTokenStore::with_token("expired"));
    let client = backend.client(Arc::clone(&store));

    let err = client.list_exams().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));
    assert_eq!(store.clear_count(), 1);
    assert!(store.load().is_none());

    // With the token gone the next call never reaches the server.
    let err = client.list_hazard_records().await.unwrap_err();
    assert!(matches!(err, ClientError::NotAuthenticated));
    assert_eq!(store.clear_count(), 1);
    assert_eq!(backend.requests().len(), 1);
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let backend = FakeBackend::start(|_| (200, "[]".to_string()));
    let base = backend.base_url.clone();
    drop(backend);

    let api = sst_config::ApiConfig {
        base_url: base,
        ..sst_config::ApiConfig::default()
    };
    let client =
        sst_client::ApiClient::new(&api, Arc::new(MemoryTokenStore::with_token("tok"))).unwrap();
    let err = client.list_companies().await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}

fn pgr_backend() -> FakeBackend {
    FakeBackend::start(|req| {
        let body = match (req.method.as_str(), req.url.as_str()) {
            ("GET", "/pgr/companies") => {
                r#"[{"id":1,"name":"Metalúrgica Alfa","cnpj":"00.000.000/0001-00","grau_risco":3}]"#
            }
            ("GET", "/pgr/sectors/by-company/1") => {
                r#"[{"id":5,"company_id":1,"nome":"Caldeiraria"}]"#
            }
            ("GET", "/pgr/hazards/by-sector/5") => {
                r#"[{"id":8,"sector_id":5,"nome":"Ruído contínuo","agente":"Ruído"}]"#
            }
            ("GET", "/pgr/risks/by-hazard/8") => {
                r#"[{"id":13,"hazard_id":8,"probabilidade":4,"severidade":4,"medidas_existentes":"Protetor auricular"}]"#
            }
            ("GET", "/pgr/actions/by-risk/13") => {
                r#"[{"id":21,"risk_id":13,"recomendacao":"Enclausurar prensa","prazo":"2025-09-30","status":"pendente"}]"#
            }
            ("POST", "/pgr/risks") => {
                r#"{"id":14,"hazard_id":8,"probabilidade":2,"severidade":3}"#
            }
            ("DELETE", "/pgr/sectors/5") => r#"{"ok":true}"#,
            _ => return (404, r#"{"detail":"Not Found"}"#.to_string()),
        };
        (200, body.to_string())
    })
}

#[tokio::test]
async fn navigator_walks_the_hierarchy_through_by_parent_routes() {
    let backend = pgr_backend();
    let client = backend.client(Arc::new(MemoryTokenStore::with_token("tok")));
    let mut nav = PgrNavigator::new(client);

    nav.load_companies().await.unwrap();
    nav.select(PgrLevel::Company, 1).await.unwrap();
    nav.select(PgrLevel::Sector, 5).await.unwrap();
    nav.select(PgrLevel::Hazard, 8).await.unwrap();
    nav.select(PgrLevel::Risk, 13).await.unwrap();

    let state = nav.state();
    assert_eq!(state.tables.companies[0].risk_grade, Some(3));
    assert_eq!(state.tables.risks[0].level(), 16);
    assert_eq!(state.tables.actions[0].recommendation, "Enclausurar prensa");
    assert_eq!(state.selected_risk().map(|r| r.id), Some(13));

    // A new risk goes under the selected hazard.
    let hazard_id = nav.parent_for_create(PgrLevel::Risk).unwrap().unwrap();
    let created = nav
        .source()
        .create_risk(&RiskDraft {
            hazard_id,
            probability: 2,
            severity: 3,
            existing_measures: None,
        })
        .await
        .unwrap();
    assert_eq!(created.level(), 6);

    // Deleting the selected sector drops hazard and risk selections.
    let was_selected = nav.delete(PgrLevel::Sector, 5).await.unwrap();
    assert!(was_selected);
    assert_eq!(nav.state().selection.chain(), vec![1]);
    assert!(nav.state().tables.hazards.is_empty());
    assert!(nav.state().tables.actions.is_empty());

    let urls: Vec<String> = backend.requests().into_iter().map(|r| r.url).collect();
    assert_eq!(
        urls,
        [
            "/pgr/companies",
            "/pgr/sectors/by-company/1",
            "/pgr/hazards/by-sector/5",
            "/pgr/risks/by-hazard/8",
            "/pgr/actions/by-risk/13",
            "/pgr/risks",
            "/pgr/sectors/5",
            "/pgr/sectors/by-company/1",
        ]
    );
}

#[tokio::test]
async fn dashboard_summary_decodes_and_charts() {
    let backend = FakeBackend::start(|req| {
        assert_eq!(req.url, "/api/dashboard/nr17");
        (
            200,
            r#"{"perfil_risco_nr17":{"baixo":4,"medio":3,"alto":1},"scores_por_setor":[{"nome":"Solda","score_medio":7.8}]}"#
                .to_string(),
        )
    });
    let client = backend.client(Arc::new(MemoryTokenStore::with_token("tok")));

    let summary = client.dashboard_nr17().await.unwrap();
    let charts = summary.charts();
    assert_eq!(charts[0].data, [4.0, 3.0, 1.0]);
    assert_eq!(charts[1].labels, ["Solda"]);
}
