use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use rrunlogger::models::record::header_row;
use rrunlogger::store::LedgerStore;
use rrunlogger::utils::date::FixedClock;
use rrunlogger::web::{AppState, build_router};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

mod common;
use common::{FORM_TOKEN, JANE_FORM, day, details_with_setup, jane_details, read_file, sample_refs};

struct Harness {
    _dir: TempDir,
    store: LedgerStore,
    app: Router,
}

fn harness() -> Harness {
    let dir = TempDir::new().unwrap();
    let store = LedgerStore::new(dir.path());
    let state = AppState::new(store.clone(), sample_refs(), Arc::new(FixedClock(day())))
        .with_form_token(FORM_TOKEN);
    Harness {
        _dir: dir,
        store,
        app: build_router(state),
    }
}

impl Harness {
    async fn get(&self, uri: &str) -> Response {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.app.clone().oneshot(req).await.unwrap()
    }

    async fn post(&self, uri: &str, form: &str) -> Response {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        self.app.clone().oneshot(req).await.unwrap()
    }
}

async fn body_text(resp: Response) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(resp: &Response) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

#[tokio::test]
async fn test_home_lists_operators() {
    let h = harness();
    let resp = h.get("/").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_text(resp).await;
    assert!(body.contains("href=\"/add/Jane\""));
    assert!(body.contains("href=\"/machine/Bob\""));
}

#[tokio::test]
async fn test_add_form_renders_choices_without_touching_disk() {
    let h = harness();
    let resp = h.get("/add/Jane").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_text(resp).await;
    assert!(body.contains("<option value=\"M2\">M2</option>"));
    assert!(body.contains("name=\"operation_number\""));
    assert!(!h.store.exists("Jane", day()).unwrap());
}

#[tokio::test]
async fn test_add_redirects_and_appends() {
    let h = harness();
    let resp = h.post("/add/Jane", JANE_FORM).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/machine/Jane");

    let rows = h.store.list("Jane", day()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], header_row());
    assert_eq!(
        rows[1],
        vec!["03-09-26", "Jane", "M1", "I1", "5", "2", "1", "10", "20", "10", "", "", ""]
    );
}

#[tokio::test]
async fn test_add_with_missing_field_rerenders_form() {
    let h = harness();
    h.store.append("Jane", day(), &jane_details()).unwrap();
    let path = h.store.ledger_path("Jane", day()).unwrap();
    let before = read_file(&path);

    let form = JANE_FORM.replace("setup_time=5", "setup_time=").replace("notes=", "notes=keep+me");
    let resp = h.post("/add/Jane", &form).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_text(resp).await;
    assert!(body.contains("This field is required."));
    assert!(body.contains("value=\"keep me\""));
    assert_eq!(read_file(&path), before);
}

#[tokio::test]
async fn test_add_rejected_does_not_create_ledger() {
    let h = harness();
    let form = JANE_FORM.replace("machine=M1", "machine=M9");
    let resp = h.post("/add/Jane", &form).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(resp).await.contains("Not a valid choice."));
    assert!(!h.store.exists("Jane", day()).unwrap());
}

#[tokio::test]
async fn test_listing_without_ledger_is_no_data() {
    let h = harness();
    let resp = h.get("/machine/Jane").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(resp).await, "No data available for Jane today.");
    assert!(!h.store.exists("Jane", day()).unwrap());
}

#[tokio::test]
async fn test_listing_shows_rows_with_links() {
    let h = harness();
    h.store.append("Jane", day(), &details_with_setup("11")).unwrap();
    h.store.append("Jane", day(), &details_with_setup("22")).unwrap();

    let resp = h.get("/machine/Jane").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_text(resp).await;
    assert!(body.contains("<th>Op #</th>"));
    assert!(body.contains("<td>11</td>"));
    assert!(body.contains("href=\"/edit/Jane/2\""));
    assert!(body.contains("href=\"/delete/Jane/1\""));
    assert!(!body.contains("href=\"/delete/Jane/0\""));
}

#[tokio::test]
async fn test_edit_form_is_prefilled() {
    let h = harness();
    h.store.append("Jane", day(), &details_with_setup("42")).unwrap();

    let resp = h.get("/edit/Jane/1").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_text(resp).await;
    assert!(body.contains("name=\"setup_time\" value=\"42\""));
    assert!(body.contains("<option value=\"M1\" selected>M1</option>"));
    assert!(body.contains("action=\"/edit/Jane/1\""));
}

#[tokio::test]
async fn test_edit_replaces_row_in_place() {
    let h = harness();
    for setup in ["1", "2", "3"] {
        h.store.append("Jane", day(), &details_with_setup(setup)).unwrap();
    }
    let before = h.store.list("Jane", day()).unwrap();

    let form = JANE_FORM.replace("setup_time=5", "setup_time=8");
    let resp = h.post("/edit/Jane/2", &form).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/machine/Jane");

    let after = h.store.list("Jane", day()).unwrap();
    assert_eq!(after.len(), before.len());
    assert_eq!(after[1], before[1]);
    assert_eq!(after[3], before[3]);
    assert_eq!(after[2][4], "8");
}

#[tokio::test]
async fn test_edit_invalid_submission_keeps_file() {
    let h = harness();
    h.store.append("Jane", day(), &jane_details()).unwrap();
    let path = h.store.ledger_path("Jane", day()).unwrap();
    let before = read_file(&path);

    let form = JANE_FORM.replace("job_time=20", "job_time=");
    let resp = h.post("/edit/Jane/1", &form).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(read_file(&path), before);
}

#[tokio::test]
async fn test_edit_and_delete_out_of_range() {
    let h = harness();
    h.store.append("Jane", day(), &jane_details()).unwrap();
    let path = h.store.ledger_path("Jane", day()).unwrap();
    let before = read_file(&path);

    let resp = h.get("/edit/Jane/2").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_text(resp).await.starts_with("Invalid index 2"));

    let resp = h.post("/edit/Jane/5", JANE_FORM).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = h.get("/delete/Jane/2").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = h.get("/delete/Jane/0").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    assert_eq!(read_file(&path), before);
}

#[tokio::test]
async fn test_edit_and_delete_without_ledger_are_no_data() {
    let h = harness();
    for resp in [h.get("/edit/Bob/1").await, h.get("/delete/Bob/1").await] {
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(resp).await, "No data available for Bob today.");
    }
    assert!(!h.store.exists("Bob", day()).unwrap());
}

#[tokio::test]
async fn test_add_then_delete_scenario() {
    let h = harness();
    let resp = h.post("/add/Jane", JANE_FORM).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let resp = h.get("/delete/Jane/1").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/machine/Jane");

    assert_eq!(h.store.list("Jane", day()).unwrap(), vec![header_row()]);
}

#[tokio::test]
async fn test_operator_names_with_spaces_round_trip() {
    let h = harness();
    let resp = h.post("/add/Mary%20Ann", JANE_FORM).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/machine/Mary%20Ann");
    assert_eq!(h.store.list("Mary Ann", day()).unwrap().len(), 2);
}

#[tokio::test]
async fn test_traversal_operator_rejected() {
    let h = harness();
    let resp = h.post("/add/..", JANE_FORM).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = h.get("/machine/..%2Fetc").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_forms_embed_the_token() {
    let h = harness();
    let body = body_text(h.get("/add/Jane").await).await;
    assert!(body.contains("<input type=\"hidden\" name=\"csrf_token\" value=\"t0k3n\">"));

    h.store.append("Jane", day(), &jane_details()).unwrap();
    let body = body_text(h.get("/edit/Jane/1").await).await;
    assert!(body.contains("name=\"csrf_token\" value=\"t0k3n\""));
}

#[tokio::test]
async fn test_post_without_valid_token_is_forbidden() {
    let h = harness();

    let missing = JANE_FORM.replace("&csrf_token=t0k3n", "");
    let resp = h.post("/add/Jane", &missing).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let stale = JANE_FORM.replace("csrf_token=t0k3n", "csrf_token=other");
    let resp = h.post("/add/Jane", &stale).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert!(!h.store.exists("Jane", day()).unwrap());

    h.store.append("Jane", day(), &jane_details()).unwrap();
    let before = read_file(&h.store.ledger_path("Jane", day()).unwrap());
    let edit = stale.replace("setup_time=5", "setup_time=9");
    let resp = h.post("/edit/Jane/1", &edit).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(read_file(&h.store.ledger_path("Jane", day()).unwrap()), before);
}
