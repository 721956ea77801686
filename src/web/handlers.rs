use crate::core::Submit;
use crate::core::add::AddLogic;
use crate::core::del::DeleteLogic;
use crate::core::edit::EditLogic;
use crate::core::form::{FormErrors, Submission};
use crate::errors::{AppError, AppResult};
use crate::utils::date::ledger_stamp;
use crate::web::{AppState, FORM_TOKEN_FIELD};
use crate::web::render;
use axum::Form;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use std::collections::HashMap;

/// Run synchronous ledger I/O on the blocking pool.
async fn blocking<T, F>(f: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Other(format!("blocking task failed: {e}")))?
}

/// Reject a POST that does not echo the token of a form this server rendered.
fn check_form_token(state: &AppState, form: &mut HashMap<String, String>) -> AppResult<()> {
    match form.remove(FORM_TOKEN_FIELD) {
        Some(token) if token == *state.form_token => Ok(()),
        _ => Err(AppError::FormToken),
    }
}

fn redirect_to_listing(operator: &str) -> Response {
    Redirect::to(&render::listing_url(operator)).into_response()
}

fn rejected_form(
    state: &AppState,
    title: &str,
    action: String,
    operator: &str,
    submission: &Submission,
    errors: &FormErrors,
) -> Response {
    let html = render::form_page(
        title,
        &action,
        operator,
        &state.refs,
        &state.form_token,
        submission,
        Some(errors),
    );
    (StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response()
}

pub async fn home(State(state): State<AppState>) -> Html<String> {
    Html(render::home_page(&state.refs))
}

pub async fn add_form(
    State(state): State<AppState>,
    Path(operator): Path<String>,
) -> AppResult<Html<String>> {
    state.store.ledger_path(&operator, state.clock.today())?;

    let action = format!("/add/{}", render::encode_segment(&operator));
    Ok(Html(render::form_page(
        "Add record",
        &action,
        &operator,
        &state.refs,
        &state.form_token,
        &Submission::default(),
        None,
    )))
}

pub async fn add_submit(
    State(state): State<AppState>,
    Path(operator): Path<String>,
    Form(mut form): Form<HashMap<String, String>>,
) -> AppResult<Response> {
    check_form_token(&state, &mut form)?;
    let submission = Submission::from_pairs(form);
    let date = state.clock.today();

    let outcome = {
        let (store, refs, operator, submission) = (
            state.store.clone(),
            state.refs.clone(),
            operator.clone(),
            submission.clone(),
        );
        blocking(move || AddLogic::apply(&store, &refs, &operator, date, &submission)).await?
    };

    match outcome {
        Submit::Saved => Ok(redirect_to_listing(&operator)),
        Submit::Rejected(errors) => {
            let action = format!("/add/{}", render::encode_segment(&operator));
            Ok(rejected_form(&state, "Add record", action, &operator, &submission, &errors))
        }
    }
}

pub async fn list_records(
    State(state): State<AppState>,
    Path(operator): Path<String>,
) -> AppResult<Html<String>> {
    let date = state.clock.today();
    let rows = {
        let (store, operator) = (state.store.clone(), operator.clone());
        blocking(move || store.list(&operator, date)).await?
    };

    Ok(Html(render::listing_page(&operator, &ledger_stamp(date), &rows)))
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path((operator, index)): Path<(String, usize)>,
) -> AppResult<Html<String>> {
    let date = state.clock.today();
    let submission = {
        let (store, operator) = (state.store.clone(), operator.clone());
        blocking(move || EditLogic::load(&store, &operator, date, index)).await?
    };

    let action = format!("/edit/{}/{index}", render::encode_segment(&operator));
    Ok(Html(render::form_page(
        "Edit record",
        &action,
        &operator,
        &state.refs,
        &state.form_token,
        &submission,
        None,
    )))
}

pub async fn edit_submit(
    State(state): State<AppState>,
    Path((operator, index)): Path<(String, usize)>,
    Form(mut form): Form<HashMap<String, String>>,
) -> AppResult<Response> {
    check_form_token(&state, &mut form)?;
    let submission = Submission::from_pairs(form);
    let date = state.clock.today();

    let outcome = {
        let (store, refs, operator, submission) = (
            state.store.clone(),
            state.refs.clone(),
            operator.clone(),
            submission.clone(),
        );
        blocking(move || EditLogic::apply(&store, &refs, &operator, date, index, &submission))
            .await?
    };

    match outcome {
        Submit::Saved => Ok(redirect_to_listing(&operator)),
        Submit::Rejected(errors) => {
            let action = format!("/edit/{}/{index}", render::encode_segment(&operator));
            Ok(rejected_form(&state, "Edit record", action, &operator, &submission, &errors))
        }
    }
}

/// Mutating GET, kept for link-driven deletes from the listing page.
pub async fn delete_record(
    State(state): State<AppState>,
    Path((operator, index)): Path<(String, usize)>,
) -> AppResult<Response> {
    let date = state.clock.today();
    {
        let (store, operator) = (state.store.clone(), operator.clone());
        blocking(move || DeleteLogic::apply(&store, &operator, date, index)).await?;
    }

    Ok(redirect_to_listing(&operator))
}
