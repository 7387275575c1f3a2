use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::net::TcpListener;

pub const PER_PAGE: usize = 6;
pub const TOKEN: &str = "QpwL5tke4Pnpja7X4";
pub const SUPPORT_URL: &str = "https://reqres.in/#support-heading";
const SUPPORT_TEXT: &str =
    "To keep ReqRes free, contributions towards server costs are appreciated!";
const MAX_DELAY_SECS: u64 = 30;

/// (email, first_name, last_name) for ids 1..=12.
const USERS: [(&str, &str, &str); 12] = [
    ("george.bluth@reqres.in", "George", "Bluth"),
    ("janet.weaver@reqres.in", "Janet", "Weaver"),
    ("emma.wong@reqres.in", "Emma", "Wong"),
    ("eve.holt@reqres.in", "Eve", "Holt"),
    ("charles.morris@reqres.in", "Charles", "Morris"),
    ("tracey.ramos@reqres.in", "Tracey", "Ramos"),
    ("michael.lawson@reqres.in", "Michael", "Lawson"),
    ("lindsay.ferguson@reqres.in", "Lindsay", "Ferguson"),
    ("tobias.funke@reqres.in", "Tobias", "Funke"),
    ("byron.fields@reqres.in", "Byron", "Fields"),
    ("george.edwards@reqres.in", "George", "Edwards"),
    ("rachel.howell@reqres.in", "Rachel", "Howell"),
];

/// (name, color, pantone_value) for ids 1..=12; year is 1999 + id.
const RESOURCES: [(&str, &str, &str); 12] = [
    ("cerulean", "#98B2D1", "15-4020"),
    ("fuchsia rose", "#C74375", "17-2031"),
    ("true red", "#BF1932", "19-1664"),
    ("aqua sky", "#7BC4C4", "14-4811"),
    ("tigerlily", "#E2583E", "17-1456"),
    ("blue turquoise", "#53B0AE", "15-5217"),
    ("sand dollar", "#DECDBE", "13-1106"),
    ("chili pepper", "#9B1B30", "19-1557"),
    ("blue iris", "#5A5B9F", "18-3943"),
    ("mimosa", "#F0C05A", "14-0848"),
    ("turquoise", "#45B5AA", "15-5519"),
    ("honeysuckle", "#D94F70", "18-2120"),
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: u32,
    pub name: String,
    pub year: u32,
    pub color: String,
    pub pantone_value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Support {
    pub url: String,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
    pub data: Vec<T>,
    pub support: Support,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Single<T> {
    pub data: T,
    pub support: Support,
}

/// Query parameters every route accepts; `page` only matters to the lists.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<usize>,
    pub delay: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Credentials {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Ids handed out by `POST /api/users`.
pub type IdCounter = Arc<AtomicU64>;

pub fn users() -> Vec<User> {
    USERS
        .iter()
        .zip(1u32..)
        .map(|(&(email, first, last), id)| User {
            id,
            email: email.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            avatar: format!("https://reqres.in/img/faces/{id}-image.jpg"),
        })
        .collect()
}

pub fn resources() -> Vec<Resource> {
    RESOURCES
        .iter()
        .zip(1u32..)
        .map(|(&(name, color, pantone), id)| Resource {
            id,
            name: name.to_string(),
            year: 1999 + id,
            color: color.to_string(),
            pantone_value: pantone.to_string(),
        })
        .collect()
}

fn support() -> Support {
    Support {
        url: SUPPORT_URL.to_string(),
        text: SUPPORT_TEXT.to_string(),
    }
}

/// Slice `items` into the requested 1-based page. Pages past the end are empty.
pub fn paginate<T: Clone>(items: &[T], page: Option<usize>) -> Page<T> {
    let page = page.unwrap_or(1).max(1);
    let data = items
        .iter()
        .skip((page - 1) * PER_PAGE)
        .take(PER_PAGE)
        .cloned()
        .collect();
    Page {
        page,
        per_page: PER_PAGE,
        total: items.len(),
        total_pages: items.len().div_ceil(PER_PAGE),
        data,
        support: support(),
    }
}

pub fn app() -> Router {
    let ids: IdCounter = Arc::new(AtomicU64::new(1));
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/{id}",
            get(get_user)
                .put(update_user)
                .patch(update_user)
                .delete(delete_user),
        )
        .route("/api/unknown", get(list_resources))
        .route("/api/unknown/{id}", get(get_resource))
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .with_state(ids)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn pause(delay: Option<u64>) {
    if let Some(secs) = delay.filter(|s| *s > 0) {
        tracing::debug!(secs, "delaying response");
        tokio::time::sleep(Duration::from_secs(secs.min(MAX_DELAY_SECS))).await;
    }
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}

async fn list_users(Query(query): Query<ListQuery>) -> Json<Page<User>> {
    pause(query.delay).await;
    Json(paginate(&users(), query.page))
}

async fn get_user(
    Path(id): Path<u32>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Single<User>>, StatusCode> {
    pause(query.delay).await;
    users()
        .into_iter()
        .find(|u| u.id == id)
        .map(|data| {
            Json(Single {
                data,
                support: support(),
            })
        })
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_resources(Query(query): Query<ListQuery>) -> Json<Page<Resource>> {
    pause(query.delay).await;
    Json(paginate(&resources(), query.page))
}

async fn get_resource(
    Path(id): Path<u32>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Single<Resource>>, StatusCode> {
    pause(query.delay).await;
    resources()
        .into_iter()
        .find(|r| r.id == id)
        .map(|data| {
            Json(Single {
                data,
                support: support(),
            })
        })
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_user(
    State(ids): State<IdCounter>,
    Query(query): Query<ListQuery>,
    Json(mut input): Json<Map<String, Value>>,
) -> (StatusCode, Json<Map<String, Value>>) {
    pause(query.delay).await;
    let id = ids.fetch_add(1, Ordering::Relaxed);
    input.insert("id".to_string(), Value::String(id.to_string()));
    input.insert("createdAt".to_string(), Value::String(now()));
    tracing::debug!(id, "created user");
    (StatusCode::CREATED, Json(input))
}

async fn update_user(
    Path(_id): Path<u32>,
    Query(query): Query<ListQuery>,
    Json(mut input): Json<Map<String, Value>>,
) -> Json<Map<String, Value>> {
    pause(query.delay).await;
    input.insert("updatedAt".to_string(), Value::String(now()));
    Json(input)
}

async fn delete_user(Path(_id): Path<u32>, Query(query): Query<ListQuery>) -> StatusCode {
    pause(query.delay).await;
    StatusCode::NO_CONTENT
}

/// Shared validation for `register` and `login`; returns the seed user.
fn authenticate(input: &Credentials, unknown_user: &str) -> Result<User, Response> {
    let Some(login) = input.email.as_deref().or(input.username.as_deref()) else {
        return Err(bad_request("Missing email or username"));
    };
    if input.password.as_deref().unwrap_or("").is_empty() {
        return Err(bad_request("Missing password"));
    }
    users()
        .into_iter()
        .find(|u| u.email == login)
        .ok_or_else(|| bad_request(unknown_user))
}

async fn register(Query(query): Query<ListQuery>, Json(input): Json<Credentials>) -> Response {
    pause(query.delay).await;
    match authenticate(&input, "Note: Only defined users succeed registration") {
        Ok(user) => Json(serde_json::json!({ "id": user.id, "token": TOKEN })).into_response(),
        Err(response) => response,
    }
}

async fn login(Query(query): Query<ListQuery>, Json(input): Json<Credentials>) -> Response {
    pause(query.delay).await;
    match authenticate(&input, "user not found") {
        Ok(_) => Json(serde_json::json!({ "token": TOKEN })).into_response(),
        Err(response) => response,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_data_has_twelve_of_each() {
        assert_eq!(users().len(), 12);
        assert_eq!(resources().len(), 12);
        assert_eq!(users()[1].email, "janet.weaver@reqres.in");
        assert_eq!(resources()[1].year, 2001);
    }

    #[test]
    fn paginate_second_page() {
        let page = paginate(&users(), Some(2));
        assert_eq!(page.page, 2);
        assert_eq!(page.total, 12);
        assert_eq!(page.total_pages, 2);
        let ids: Vec<u32> = page.data.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![7, 8, 9, 10, 11, 12]);
    }

    #[test]
    fn paginate_defaults_to_first_page() {
        let page = paginate(&resources(), None);
        assert_eq!(page.page, 1);
        assert_eq!(page.data.first().map(|r| r.id), Some(1));
        assert_eq!(paginate(&resources(), Some(0)).page, 1);
    }

    #[test]
    fn paginate_past_end_is_empty() {
        let page = paginate(&users(), Some(3));
        assert!(page.data.is_empty());
        assert_eq!(page.total, 12);
    }

    #[test]
    fn authenticate_requires_password() {
        let input = Credentials {
            email: Some("sydney@fife".to_string()),
            ..Credentials::default()
        };
        let err = authenticate(&input, "unknown").unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn authenticate_accepts_username_alias() {
        let input = Credentials {
            username: Some("eve.holt@reqres.in".to_string()),
            password: Some("pistol".to_string()),
            ..Credentials::default()
        };
        let id = authenticate(&input, "unknown").ok().map(|u| u.id);
        assert_eq!(id, Some(4));
    }
}
