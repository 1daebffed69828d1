use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub employee_name: String,
    pub employee_salary: u64,
    pub employee_age: u64,
    #[serde(default)]
    pub profile_image: String,
}

/// Error body the façade returns on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid façade URL: {0}")]
    InvalidUrl(String),

    #[error("façade returned {status}: {error}: {message}")]
    Api {
        status: StatusCode,
        error: String,
        message: String,
    },
}

impl ClientError {
    /// Status code of an API error, if this is one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status(),
            Self::InvalidUrl(_) => None,
        }
    }
}

pub struct EmployeeClient {
    client: Client,
    base_url: String,
}

impl EmployeeClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Append percent-encoded path segments to the base URL.
    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(format!("{} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn list(&self) -> Result<Vec<Employee>, ClientError> {
        self.get_json(&["employees"]).await
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Employee>, ClientError> {
        self.get_json(&["employees", "search", query]).await
    }

    pub async fn get(&self, id: &str) -> Result<Employee, ClientError> {
        self.get_json(&["employees", id]).await
    }

    pub async fn highest_salary(&self) -> Result<u64, ClientError> {
        self.get_json(&["employees", "highestSalary"]).await
    }

    pub async fn top_ten_names(&self) -> Result<Vec<String>, ClientError> {
        self.get_json(&["employees", "topTenHighestEarningEmployeeNames"])
            .await
    }

    /// Create an employee from arbitrary fields (`name`, `salary`, `age`, ...).
    pub async fn create(&self, input: &Map<String, Value>) -> Result<Employee, ClientError> {
        let resp = self
            .client
            .post(self.url(&["employees"])?)
            .json(input)
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    /// Delete an employee; returns the deleted employee's name.
    pub async fn delete(&self, id: &str) -> Result<String, ClientError> {
        let resp = self
            .client
            .delete(self.url(&["employees", id])?)
            .send()
            .await?;
        Ok(check(resp).await?.text().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ClientError> {
        let resp = self.client.get(self.url(segments)?).send().await?;
        Ok(check(resp).await?.json().await?)
    }
}

/// Turn a non-success response into `ClientError::Api`.
async fn check(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let text = resp.text().await?;
    let body = serde_json::from_str::<ErrorBody>(&text).unwrap_or(ErrorBody {
        error: status.canonical_reason().unwrap_or("Error").to_string(),
        message: text,
    });
    Err(ClientError::Api {
        status,
        error: body.error,
        message: body.message,
    })
}
