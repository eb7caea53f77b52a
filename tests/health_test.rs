mod common;

use common::TestApp;

#[tokio::test]
async fn test_health_endpoint() {
    let app = TestApp::new().await;

    let resp = app.client.get("/api/health").send().await;

    resp.assert_status_is_ok();
    let json = resp.json().await;
    json.value().object().get("status").assert_string("healthy");
}
