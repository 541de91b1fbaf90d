//! API Client

/// Origin of the backend, taken from wherever this page was served.
fn origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| "http://localhost:3000".into())
}

/// Create a Stripe checkout session for the caller behind the bearer
/// token. Returns the hosted checkout URL to redirect the browser to.
pub async fn create_checkout(bearer_token: &str) -> Result<String, String> {
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/checkout", origin()))
        .bearer_auth(bearer_token)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status().is_success() {
        let data: serde_json::Value = response.json().await.map_err(|e| e.to_string())?;
        Ok(data["url"].as_str().unwrap_or_default().to_string())
    } else {
        let data: serde_json::Value = response.json().await.unwrap_or_default();
        Err(data["error"]
            .as_str()
            .unwrap_or("Checkout request failed")
            .to_string())
    }
}
