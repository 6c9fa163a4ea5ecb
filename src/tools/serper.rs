use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{Tool, ToolError, ToolSpec};

const DEFAULT_RESULT_COUNT: usize = 10;
const DEFAULT_BASE_URL: &str = "https://google.serper.dev";

/// Web search tool backed by the Serper.dev Google Search API
pub(crate) fn serper_tool() -> Tool {
    Tool {
        spec: ToolSpec {
            name: "serper_search".to_string(),
            description: "Search the web for current information on a topic. \
                          Returns titles, links and snippets of the top results."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The search query"
                    }
                },
                "required": ["query"]
            }),
        },
        handler: |args| Box::pin(run_search(args)),
    }
}

async fn run_search(args: String) -> Result<String, ToolError> {
    #[derive(Deserialize)]
    struct SearchArgs {
        query: String,
    }

    let args: SearchArgs = serde_json::from_str(&args)?;
    let api_key = std::env::var("SERPER_API_KEY")
        .map_err(|_| ToolError::MissingApiKey("SERPER_API_KEY".to_string()))?;
    let base_url =
        std::env::var("SERPER_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

    let client = reqwest::Client::new();
    search_with_base_url(&client, &base_url, &api_key, &args.query, DEFAULT_RESULT_COUNT).await
}

pub(crate) async fn search_with_base_url(
    client: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    query: &str,
    num: usize,
) -> Result<String, ToolError> {
    #[derive(Serialize)]
    struct SearchRequest<'a> {
        q: &'a str,
        num: usize,
    }

    #[derive(Deserialize)]
    struct SearchResponse {
        #[serde(default)]
        organic: Vec<OrganicResult>,
    }

    #[derive(Deserialize)]
    struct OrganicResult {
        title: String,
        link: String,
        #[serde(default)]
        snippet: String,
    }

    let response = client
        .post(format!("{}/search", base_url))
        .header("X-API-KEY", api_key)
        .header("Content-Type", "application/json")
        .json(&SearchRequest { q: query, num })
        .send()
        .await?;

    if !response.status().is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ToolError::ApiError { message });
    }

    let results: SearchResponse = response.json().await?;
    if results.organic.is_empty() {
        return Ok(format!("No search results found for '{}'.", query));
    }

    let mut rendered = format!("Search results for '{}':\n", query);
    for (i, result) in results.organic.iter().enumerate() {
        rendered.push_str(&format!(
            "{}. {}\n   {}\n   {}\n",
            i + 1,
            result.title,
            result.link,
            result.snippet
        ));
    }
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn test_search_renders_organic_results() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/search")
            .match_header("x-api-key", "test-key")
            .with_status(200)
            .with_body(
                r#"{
                    "organic": [
                        {"title": "Rust", "link": "https://rust-lang.org", "snippet": "A language"},
                        {"title": "Crates", "link": "https://crates.io", "snippet": "Registry"}
                    ]
                }"#,
            )
            .create_async()
            .await;

        let client = reqwest::Client::new();
        let result =
            search_with_base_url(&client, &server.url(), "test-key", "rust", 10)
                .await
                .unwrap();

        mock.assert_async().await;
        assert!(result.contains("1. Rust"));
        assert!(result.contains("https://crates.io"));
    }

    #[tokio::test]
    async fn test_search_empty_results() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/search")
            .with_status(200)
            .with_body(r#"{"organic": []}"#)
            .create_async()
            .await;

        let client = reqwest::Client::new();
        let result = search_with_base_url(&client, &server.url(), "key", "nothing", 10)
            .await
            .unwrap();
        assert!(result.contains("No search results found"));
    }

    #[tokio::test]
    async fn test_search_api_error() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/search")
            .with_status(403)
            .with_body("forbidden")
            .create_async()
            .await;

        let client = reqwest::Client::new();
        let result = search_with_base_url(&client, &server.url(), "bad-key", "rust", 10).await;
        assert!(matches!(result, Err(ToolError::ApiError { .. })));
    }
}
