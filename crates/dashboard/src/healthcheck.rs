//! Liveness probe for the dashboard server.

use salvo::prelude::*;
use serde::Serialize;

/// Body of a healthy response. The store is not consulted.
#[derive(Debug, Serialize)]
pub(crate) struct Health {
    status: &'static str,
}

impl Health {
    const UP: Self = Self { status: "ok" };
}

#[handler]
pub(crate) async fn handler() -> Json<Health> {
    Json(Health::UP)
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn reports_ok_without_touching_the_store() -> TestResult {
        let service = Service::new(Router::with_path("healthcheck").get(handler));

        let body: Value = TestClient::get("http://example.com/healthcheck")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(body, json!({ "status": "ok" }));

        Ok(())
    }
}
