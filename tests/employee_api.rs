//! End-to-end tests: façade in front of a mock upstream.

use std::time::Duration;

use employee_sdk::{ClientError, EmployeeClient};
use reqwest::StatusCode;
use serde_json::{json, Value};

mod common;

const TOP_TEN: [&str; 10] = [
    "Paul Byrd",
    "Yuri Berry",
    "Charde Marshall",
    "Cedric Kelly",
    "Tatyana Fitzpatrick",
    "Brielle Williamson",
    "Jenette Caldwell",
    "Quinn Flynn",
    "Rhona Davidson",
    "Tiger Nixon",
];

#[tokio::test]
async fn test_list_all_employees() {
    let upstream = common::start_fixture_upstream().await;
    let (addr, shutdown) = common::start_facade(&upstream.base_url()).await;

    let res = reqwest::get(format!("http://{}/employees", addr)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let employees: Vec<Value> = res.json().await.unwrap();
    assert_eq!(employees.len(), 24);
    assert_eq!(employees[0]["id"], "1");
    assert_eq!(employees[0]["employee_name"], "Tiger Nixon");
    assert_eq!(upstream.calls(), ["GET /employees"]);

    shutdown.trigger();
}

#[tokio::test]
async fn test_case_insensitive_search() {
    let upstream = common::start_fixture_upstream().await;
    let (addr, shutdown) = common::start_facade(&upstream.base_url()).await;
    let client = EmployeeClient::new(&format!("http://{}", addr));

    let found = client.search("rr").await.unwrap();
    let names: Vec<&str> = found.iter().map(|e| e.employee_name.as_str()).collect();
    assert_eq!(names, ["Garrett Winters", "Herrod Chandler", "Yuri Berry"]);

    assert_eq!(client.search("RR").await.unwrap().len(), 3);
    assert!(client.search("nobody").await.unwrap().is_empty());

    // Reserved characters stay inside the one path segment.
    assert!(client.search("rr/x?y#z").await.unwrap().is_empty());
    let found = client.search("Garrett Winters").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "2");

    shutdown.trigger();
}

#[tokio::test]
async fn test_get_employee_by_id() {
    let upstream = common::start_fixture_upstream().await;
    let (addr, shutdown) = common::start_facade(&upstream.base_url()).await;
    let client = EmployeeClient::new(&format!("http://{}", addr));

    let employee = client.get("1").await.unwrap();
    assert_eq!(employee.employee_name, "Tiger Nixon");
    assert_eq!(employee.employee_salary, 320800);
    assert_eq!(employee.employee_age, 61);
    assert_eq!(upstream.calls(), ["GET /employee/1"]);

    shutdown.trigger();
}

#[tokio::test]
async fn test_highest_salary() {
    let upstream = common::start_fixture_upstream().await;
    let (addr, shutdown) = common::start_facade(&upstream.base_url()).await;

    let res = reqwest::get(format!("http://{}/employees/highestSalary", addr))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "725000");

    shutdown.trigger();
}

#[tokio::test]
async fn test_top_ten_earner_names() {
    let upstream = common::start_fixture_upstream().await;
    let (addr, shutdown) = common::start_facade(&upstream.base_url()).await;
    let client = EmployeeClient::new(&format!("http://{}", addr));

    assert_eq!(client.top_ten_names().await.unwrap(), TOP_TEN);

    shutdown.trigger();
}

#[tokio::test]
async fn test_create_employee_forwards_body() {
    let upstream = common::start_fixture_upstream().await;
    let (addr, shutdown) = common::start_facade(&upstream.base_url()).await;

    let res = reqwest::Client::new()
        .post(format!("http://{}/employees", addr))
        .json(&json!({"name": "Tiger Nixon", "salary": 320800, "age": 61}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let employee: Value = res.json().await.unwrap();
    assert_eq!(employee["employee_name"], "Tiger Nixon");
    assert_eq!(employee["employee_salary"], 320800);

    let requests = upstream.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/create");
    let forwarded: Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(forwarded, json!({"name": "Tiger Nixon", "salary": 320800, "age": 61}));

    shutdown.trigger();
}

#[tokio::test]
async fn test_create_rejects_non_object_body() {
    let upstream = common::start_fixture_upstream().await;
    let (addr, shutdown) = common::start_facade(&upstream.base_url()).await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("http://{}/employees", addr))
        .json(&json!(["not", "an", "object"]))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Bad Request");

    let res = client
        .post(format!("http://{}/employees", addr))
        .header("content-type", "application/json")
        .body("{broken")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    assert!(upstream.calls().is_empty(), "upstream must not be called");

    shutdown.trigger();
}

#[tokio::test]
async fn test_delete_returns_plain_name() {
    let upstream = common::start_fixture_upstream().await;
    let (addr, shutdown) = common::start_facade(&upstream.base_url()).await;

    let res = reqwest::Client::new()
        .delete(format!("http://{}/employees/1", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "Tiger Nixon");
    assert_eq!(upstream.calls(), ["GET /employee/1", "DELETE /delete/1"]);

    shutdown.trigger();
}

#[tokio::test]
async fn test_delete_unknown_id_skips_upstream_delete() {
    let upstream = common::start_fixture_upstream().await;
    let (addr, shutdown) = common::start_facade(&upstream.base_url()).await;
    let client = EmployeeClient::new(&format!("http://{}", addr));

    let err = client.delete("99").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert!(matches!(err, ClientError::Api { ref error, .. } if error == "Not Found"));
    assert_eq!(upstream.calls(), ["GET /employee/99"]);

    shutdown.trigger();
}

#[tokio::test]
async fn test_by_id_without_data_is_not_found() {
    let upstream = common::start_programmable_upstream(|_| async {
        (200, r#"{"status":"success","data":null,"message":"Successfully! Record has been fetched."}"#.to_string())
    })
    .await;
    let (addr, shutdown) = common::start_facade(&upstream.base_url()).await;

    let res = reqwest::get(format!("http://{}/employees/5", addr)).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Not Found");

    shutdown.trigger();
}

#[tokio::test]
async fn test_upstream_503_passes_through() {
    let upstream = common::start_programmable_upstream(|_| async {
        (503, "upstream overloaded".to_string())
    })
    .await;
    let (addr, shutdown) = common::start_facade(&upstream.base_url()).await;

    let res = reqwest::get(format!("http://{}/employees", addr)).await.unwrap();
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!({"error": "Service Unavailable", "message": "upstream overloaded"})
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_upstream_client_errors_map_through() {
    let upstream = common::start_programmable_upstream(|req| async move {
        match req.path.as_str() {
            "/employee/400" => (400, "bad".to_string()),
            "/employee/403" => (403, "nope".to_string()),
            "/employee/418" => (418, "teapot".to_string()),
            _ => (429, "slow down".to_string()),
        }
    })
    .await;
    let (addr, shutdown) = common::start_facade(&upstream.base_url()).await;

    let cases = [
        ("400", 400, "Bad Request", "bad"),
        ("403", 403, "Forbidden", "nope"),
        ("418", 418, "I'm a teapot", "teapot"),
        ("1", 429, "Too Many Requests", "slow down"),
    ];
    for (id, status, error, message) in cases {
        let res = reqwest::get(format!("http://{}/employees/{}", addr, id)).await.unwrap();
        assert_eq!(res.status().as_u16(), status, "id {}", id);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body, json!({"error": error, "message": message}), "id {}", id);
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_unreachable_upstream_is_503() {
    let dead = common::closed_port().await;
    let (addr, shutdown) = common::start_facade(&format!("http://{}/api/v1", dead)).await;

    let res = reqwest::get(format!("http://{}/employees/highestSalary", addr))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Service is unavailable");

    shutdown.trigger();
}

#[tokio::test]
async fn test_slow_upstream_times_out_as_unreachable() {
    let upstream = common::start_programmable_upstream(|_| async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        (200, common::ALL_EMPLOYEES.to_string())
    })
    .await;
    let (addr, shutdown) =
        common::start_facade_with(&upstream.base_url(), |c| c.timeouts.upstream_secs = 1).await;

    let res = reqwest::get(format!("http://{}/employees", addr)).await.unwrap();
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Service is unavailable");

    shutdown.trigger();
}

#[tokio::test]
async fn test_non_json_upstream_body_is_500() {
    let upstream = common::start_programmable_upstream(|_| async {
        (200, "<html>maintenance</html>".to_string())
    })
    .await;
    let (addr, shutdown) = common::start_facade(&upstream.base_url()).await;

    let res = reqwest::get(format!("http://{}/employees", addr)).await.unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "An error occurred while processing your request");

    shutdown.trigger();
}

#[tokio::test]
async fn test_unknown_route_and_request_id() {
    let upstream = common::start_fixture_upstream().await;
    let (addr, shutdown) = common::start_facade(&upstream.base_url()).await;

    let res = reqwest::get(format!("http://{}/departments", addr)).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.headers().contains_key("x-request-id"));
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Not Found");

    let res = reqwest::Client::new()
        .get(format!("http://{}/employees", addr))
        .header("x-request-id", "caller-supplied")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "caller-supplied");

    shutdown.trigger();
}
