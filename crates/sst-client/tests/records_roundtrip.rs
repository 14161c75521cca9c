//! Record modules against a stateful fake backend.

mod common;

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use sst_auth::MemoryTokenStore;
use sst_client::ClientError;
use sst_client::mirror::{LocalMirror, RecordModule};
use sst_core::entities::{AssessmentDraft, ErgonomicAssessment, ExamDraft, HazardRecordDraft};
use sst_core::enums::RiskBand;
use sst_core::risk::{Nr17Ratings, Nr17Thresholds};

use common::FakeBackend;

/// A `/{module}/records` collection that assigns ids and lists newest first.
fn collection_backend(path: &'static str) -> FakeBackend {
    let rows: Arc<Mutex<Vec<Value>>> = Arc::default();
    FakeBackend::start(move |req| {
        let mut rows = rows.lock().expect("rows lock");
        match (req.method.as_str(), req.url.as_str()) {
            ("GET", url) if url == path => {
                let newest_first: Vec<Value> = rows.iter().rev().cloned().collect();
                (200, Value::Array(newest_first).to_string())
            }
            ("POST", url) if url == path => {
                let mut row: Value = serde_json::from_str(&req.body).expect("json body");
                row["id"] = json!(rows.len() + 1);
                rows.push(row.clone());
                (200, row.to_string())
            }
            _ => (404, r#"{"detail":"Not Found"}"#.to_string()),
        }
    })
}

fn welder_draft() -> AssessmentDraft {
    AssessmentDraft {
        company: None,
        sector: "Solda".into(),
        function: "Welder".into(),
        worker: None,
        workstation_type: "Industrial".into(),
        assessed_on: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
        ratings: Nr17Ratings::uniform(3),
        notes: None,
    }
}

#[tokio::test]
async fn nr17_created_assessment_is_visible_after_reload() {
    let backend = collection_backend("/nr17/records");
    let client = backend.client(Arc::new(MemoryTokenStore::with_token("tok")));

    let created = client
        .create_assessment(&welder_draft(), Nr17Thresholds::default())
        .await
        .unwrap();
    assert_eq!(created.score, 18);
    assert_eq!(created.band, RiskBand::High);

    let rows = client.list_assessments(Nr17Thresholds::default()).await.unwrap();
    assert_eq!(
        rows,
        vec![ErgonomicAssessment {
            id: created.id,
            company: None,
            sector: "Solda".into(),
            function: "Welder".into(),
            worker: None,
            workstation_type: "Industrial".into(),
            assessed_on: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            score: 18,
            band: RiskBand::High,
            notes: None,
        }]
    );

    let requests = backend.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer tok"));
    let sent: Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(sent["score"], 18);
    assert_eq!(sent["risco"], "Alto");
}

#[tokio::test]
async fn invalid_draft_sends_nothing() {
    let backend = collection_backend("/nr17/records");
    let client = backend.client(Arc::new(MemoryTokenStore::with_token("tok")));

    let mut draft = welder_draft();
    draft.ratings.posture = 9;
    let err = client
        .create_assessment(&draft, Nr17Thresholds::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Invalid(_)));
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn aso_round_trip_and_mirror() {
    let backend = collection_backend("/aso/records");
    let client = backend.client(Arc::new(MemoryTokenStore::with_token("tok")));
    let dir = tempfile::tempdir().unwrap();
    let mirror = LocalMirror::new(Some(dir.path().to_path_buf()), true);

    for name in ["Ana", "Bruno"] {
        let saved = client
            .create_exam(&ExamDraft {
                name: name.into(),
                document_id: "000.000.000-00".into(),
                function: "Operador".into(),
                sector: "Produção".into(),
                exam_type: "Admissional".into(),
                exam_date: NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
                examiner: Some("Dra. Lima".into()),
                outcome: "Apto".into(),
            })
            .await
            .unwrap();
        mirror.remember_last_id(RecordModule::Aso, saved.id);
    }

    let rows = client.list_exams().await.unwrap();
    mirror.remember_list(RecordModule::Aso, &rows);

    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Bruno", "Ana"]);

    let cached: Vec<sst_core::entities::ExamRecord> = mirror.recall_list(RecordModule::Aso);
    assert_eq!(cached, rows);
    let last = sst_core::entities::pick_last(&cached, mirror.recall_last_id(RecordModule::Aso));
    assert_eq!(last.map(|r| r.name.as_str()), Some("Bruno"));
}

#[tokio::test]
async fn ltcat_update_of_missing_record_surfaces_backend_message() {
    let backend = FakeBackend::start(|_| {
        (404, r#"{"detail":"Registro LTCAT não encontrado."}"#.to_string())
    });
    let client = backend.client(Arc::new(MemoryTokenStore::with_token("tok")));

    let draft = HazardRecordDraft {
        company: "Alfa".into(),
        sector: "Caldeiraria".into(),
        function: "Caldeireiro".into(),
        agent: "Ruído".into(),
        classification: "Físico".into(),
        ..HazardRecordDraft::default()
    };
    let err = client.update_hazard_record(99, &draft).await.unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 404);
            assert!(message.contains("Registro LTCAT não encontrado."));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(backend.requests()[0].method, "PUT");
    assert_eq!(backend.requests()[0].url, "/ltcat/records/99");
}

#[tokio::test]
async fn malformed_row_is_reported_not_defaulted() {
    let backend = FakeBackend::start(|_| {
        (
            200,
            r#"[{"id":1,"setor":"Solda","funcao":"Welder","data_avaliacao":"10/01/2025","score":18,"risco":"Alto"}]"#
                .to_string(),
        )
    });
    let client = backend.client(Arc::new(MemoryTokenStore::with_token("tok")));

    let err = client.list_assessments(Nr17Thresholds::default()).await.unwrap_err();
    assert!(matches!(err, ClientError::Malformed(ref m) if m.contains("data_avaliacao")));
}

#[tokio::test]
async fn listed_band_is_rederived_from_score() {
    let backend = FakeBackend::start(|_| {
        (
            200,
            r#"[{"id":7,"setor":"Expedição","funcao":"Conferente","data_avaliacao":"2025-03-02","score":8,"risco":"Baixo"}]"#
                .to_string(),
        )
    });
    let client = backend.client(Arc::new(MemoryTokenStore::with_token("tok")));

    let rows = client.list_assessments(Nr17Thresholds::default()).await.unwrap();
    assert_eq!(rows[0].score, 8);
    assert_eq!(rows[0].band, RiskBand::Medium);

    let strict = Nr17Thresholds::new(9, 12).unwrap();
    let rows = client.list_assessments(strict).await.unwrap();
    assert_eq!(rows[0].band, RiskBand::Low);
}

#[tokio::test]
async fn delete_with_empty_body_succeeds() {
    let backend = FakeBackend::start(|_| (200, String::new()));
    let client = backend.client(Arc::new(MemoryTokenStore::with_token("tok")));

    client.delete_exam(4).await.unwrap();
    let raw = client.get("/aso/records").await.unwrap();
    assert!(raw.is_none());
    assert_eq!(backend.requests()[0].url, "/aso/records/4");
}
