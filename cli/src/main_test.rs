use std::cell::RefCell;

use super::*;
use portal::http::{ApiRequest, RawResponse};
use portal::types::LoginIdentity;
use serde_json::json;

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["agriboard"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

fn list_args(cli: Cli) -> ListArgs {
    match cli.command {
        Command::List(args) => args,
        other => panic!("expected list command, got {other:?}"),
    }
}

/// Serves one canned response per request and records the query strings.
struct CannedPages {
    responses: RefCell<Vec<RawResponse>>,
    seen: RefCell<Vec<Vec<(String, String)>>>,
}

impl CannedPages {
    fn new(responses: Vec<RawResponse>) -> Self {
        Self { responses: RefCell::new(responses), seen: RefCell::new(Vec::new()) }
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for CannedPages {
    async fn execute(&self, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        self.seen.borrow_mut().push(request.query.clone());
        let mut responses = self.responses.borrow_mut();
        if responses.is_empty() {
            return Err(ApiError::Transport("no canned response left".into()));
        }
        Ok(responses.remove(0))
    }
}

fn cursors(seen: &[Vec<(String, String)>]) -> Vec<String> {
    seen.iter()
        .filter_map(|query| query.iter().find(|(k, _)| k == "cursor").map(|(_, v)| v.clone()))
        .collect()
}

#[test]
fn timeouts_from_flags_reach_client_config() {
    let cli = parse(&["--api-url", "http://api.test/", "--request-timeout", "5", "--connect-timeout", "2", "whoami"]);
    let config = client_config(&cli).unwrap();
    assert_eq!(config.base_url, "http://api.test");
    assert_eq!(config.timeouts, Timeouts { request_secs: 5, connect_secs: 2 });
}

#[test]
fn zero_timeout_is_rejected_by_the_parser() {
    assert!(Cli::try_parse_from(["agriboard", "--request-timeout", "0", "whoami"]).is_err());
}

#[test]
fn invalid_api_url_is_a_config_error() {
    let cli = parse(&["--api-url", "ftp://api.test", "whoami"]);
    assert!(client_config(&cli).is_err());
}

#[test]
fn login_with_at_sign_signs_in_by_email() {
    let cli = parse(&["--login", "ana@example.com", "--password", "pw", "login"]);
    let creds = credentials(&cli).unwrap();
    assert_eq!(creds.identity, LoginIdentity::Email("ana@example.com".into()));
    assert_eq!(creds.password, "pw");

    let cli = parse(&["--login", " ana ", "--password", "pw", "login"]);
    assert_eq!(credentials(&cli).unwrap().identity, LoginIdentity::Login("ana".into()));
}

#[test]
fn credentials_need_both_login_and_password() {
    assert!(credentials(&parse(&["--login", "ana", "login"])).is_none());
    assert!(credentials(&parse(&["--password", "pw", "login"])).is_none());
    assert!(credentials(&parse(&["--login", "  ", "--password", "pw", "login"])).is_none());
}

#[test]
fn auth_failure_keeps_message_and_field_errors() {
    let mut errors = FieldErrors::new();
    errors.insert("email".into(), vec!["Unknown account.".into()]);
    let err = auth_result(AuthOutcome::Failure { message: "Login failed".into(), errors: errors.clone() }).unwrap_err();
    assert_eq!(err.to_string(), "Login failed");
    match err {
        CliError::Auth { errors: kept, .. } => assert_eq!(kept, errors),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn list_flags_build_user_and_farmer_queries() {
    let args = list_args(parse(&["list", "users", "--search", "ana", "--role", "admin", "--sort-by", "name", "--asc"]));
    assert_eq!(args.resource, Resource::Users);
    assert_eq!(
        user_query(&args),
        UserQuery {
            search: "ana".into(),
            role: Some("admin".into()),
            sort: Sort { by: "name".into(), direction: SortDirection::Asc },
        }
    );

    let args = list_args(parse(&["list", "farmers", "--association", "north"]));
    assert_eq!(
        farmer_query(&args),
        FarmerQuery { search: String::new(), association: Some("north".into()), sort: Sort::default() }
    );
}

#[test]
fn crop_planting_flags_map_to_filters() {
    let args = list_args(parse(&[
        "list",
        "crop-plantings",
        "--status",
        "planted",
        "--category",
        "4",
        "--from",
        "2024-01-01",
        "--to",
        "2024-06-30",
    ]));
    let query = crop_planting_query(&args);
    assert_eq!(query.status.as_deref(), Some("planted"));
    assert_eq!(query.category.as_deref(), Some("4"));
    assert_eq!(query.date_from.as_deref(), Some("2024-01-01"));
    assert_eq!(query.date_to.as_deref(), Some("2024-06-30"));
    assert_eq!(query.sort, Sort::default());
}

#[test]
fn payloads_must_be_json_objects() {
    assert_eq!(parse_object(r#"{"name":"Ana"}"#).unwrap(), json!({"name": "Ana"}));
    assert!(matches!(parse_object("[1]"), Err(CliError::NotAnObject)));
    assert!(matches!(parse_object("{"), Err(CliError::InvalidJson(_))));
}

#[tokio::test]
async fn collect_pages_follows_cursors_to_the_end() {
    let client = HttpClient::new(CannedPages::new(vec![
        RawResponse::new(200, json!({"data": [{"id": 1}], "nextCursor": "c2"})),
        RawResponse::new(200, json!({"data": [{"id": 2}], "nextCursor": null})),
    ]));
    let items = collect_pages(&client, TechnicianQuery::default(), None).await.unwrap();
    let ids: Vec<&str> = items.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["1", "2"]);
    assert_eq!(cursors(&client.transport().seen.borrow()), ["0", "c2"]);
}

#[tokio::test]
async fn collect_pages_stops_at_page_limit() {
    let client = HttpClient::new(CannedPages::new(vec![
        RawResponse::new(200, json!({"data": [{"id": 1}], "nextCursor": "c2"})),
        RawResponse::new(200, json!({"data": [{"id": 2}], "nextCursor": null})),
    ]));
    let items = collect_pages(&client, NotificationQuery, Some(1)).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(client.transport().seen.borrow().len(), 1);
}

#[tokio::test]
async fn collect_pages_surfaces_page_errors() {
    let client = HttpClient::new(CannedPages::new(vec![
        RawResponse::new(200, json!({"data": [{"id": 1}], "nextCursor": "c2"})),
        RawResponse::new(500, json!({"message": "boom"})),
    ]));
    let err = collect_pages(&client, TechnicianQuery::default(), None).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
}
