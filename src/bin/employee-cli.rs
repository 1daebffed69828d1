use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use url::Url;

#[derive(Parser)]
#[command(name = "employee-cli")]
#[command(about = "Command-line client for the employee façade", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every employee
    List,
    /// Search employees by name fragment
    Search { query: String },
    /// Show one employee
    Get { id: String },
    /// Print the highest salary
    HighestSalary,
    /// Print the ten highest earners
    TopTen,
    /// Create an employee
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        salary: u64,
        #[arg(long)]
        age: u64,
    },
    /// Delete an employee and print its name
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.as_str();

    let res = match cli.command {
        Commands::List => client.get(endpoint(base, &["employees"])?).send().await?,
        Commands::Search { query } => {
            client
                .get(endpoint(base, &["employees", "search", query.as_str()])?)
                .send()
                .await?
        }
        Commands::Get { id } => {
            client
                .get(endpoint(base, &["employees", id.as_str()])?)
                .send()
                .await?
        }
        Commands::HighestSalary => {
            client
                .get(endpoint(base, &["employees", "highestSalary"])?)
                .send()
                .await?
        }
        Commands::TopTen => {
            client
                .get(endpoint(base, &["employees", "topTenHighestEarningEmployeeNames"])?)
                .send()
                .await?
        }
        Commands::Create { name, salary, age } => {
            client
                .post(endpoint(base, &["employees"])?)
                .json(&json!({ "name": name, "salary": salary, "age": age }))
                .send()
                .await?
        }
        Commands::Delete { id } => {
            let res = client
                .delete(endpoint(base, &["employees", id.as_str()])?)
                .send()
                .await?;
            if res.status().is_success() {
                println!("{}", res.text().await?);
                return Ok(());
            }
            res
        }
    };

    print_response(res).await
}

/// Append percent-encoded path segments to the façade base URL.
fn endpoint(base: &str, segments: &[&str]) -> Result<Url, Box<dyn std::error::Error>> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| format!("{} cannot carry a path", base))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Err(format!("façade returned status {}", status).into());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            axum::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let url = endpoint("http://localhost:8080/", &["employees", "search", "a/b?c#d"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/employees/search/a%2Fb%3Fc%23d");
        assert!(endpoint("localhost", &["employees"]).is_err());
    }

    #[tokio::test]
    async fn test_error_status_fails_the_command() {
        let err = print_response(response(404, r#"{"error":"Not Found","message":"gone"}"#))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("404"));

        assert!(print_response(response(200, "[]")).await.is_ok());
    }
}
