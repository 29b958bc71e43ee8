use anyhow::Result;
use std::sync::Arc;
use titanic_survival::{load_classifier, serve, AppState, LocalStorage};
use tokio::net::TcpListener;

/// 在隨機埠啟動服務，回傳 base URL
async fn spawn_server() -> Result<String> {
    let storage = LocalStorage::new(env!("CARGO_MANIFEST_DIR"));
    let classifier = load_classifier(&storage, "models/best_model.json").await?;
    let state = AppState::new(Arc::new(classifier))?;

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = serve(listener, state).await;
    });

    Ok(format!("http://{}", addr))
}

fn passenger(overrides: &[(&'static str, &'static str)]) -> Vec<(&'static str, &'static str)> {
    let mut fields = vec![
        ("pclass", "1"),
        ("sex", "female"),
        ("age", "30"),
        ("sibsp", "0"),
        ("parch", "0"),
        ("fare", "100.0"),
        ("class", "First"),
        ("who", "woman"),
        ("adult_male", "false"),
        ("alone", "true"),
    ];
    for &(key, value) in overrides {
        if let Some(slot) = fields.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        }
    }
    fields
}

#[tokio::test]
async fn test_index_renders_form_with_defaults() -> Result<()> {
    let base = spawn_server().await?;

    let response = reqwest::get(format!("{}/", base)).await?;
    assert_eq!(response.status(), 200);
    let html = response.text().await?;

    assert!(html.contains(r#"<form method="post" action="/predict">"#));
    assert!(html.contains(r#"name="fare""#));
    assert!(html.contains(r#"value="50.0""#));
    assert!(!html.contains("probability-chart"));
    Ok(())
}

#[tokio::test]
async fn test_predict_renders_chart_verdict_and_table() -> Result<()> {
    let base = spawn_server().await?;
    let client = reqwest::Client::new();

    let html = client
        .post(format!("{}/predict", base))
        .form(&passenger(&[]))
        .send()
        .await?
        .text()
        .await?;

    assert!(html.contains("probability-chart"));
    assert!(html.contains(r##"fill="#2ecc71""##));
    assert!(html.contains("The passenger survived (probability: "));
    assert!(html.contains("<details>"));
    assert!(html.contains("<th>who</th>"));
    // 送出的值會保留在表單中
    assert!(html.contains(r#"<option value="female" selected>"#));
    Ok(())
}

#[tokio::test]
async fn test_low_survival_renders_negative_bar() -> Result<()> {
    let base = spawn_server().await?;
    let client = reqwest::Client::new();

    let form = passenger(&[
        ("pclass", "3"),
        ("sex", "male"),
        ("age", "25"),
        ("fare", "7.0"),
        ("class", "Third"),
        ("who", "man"),
        ("adult_male", "true"),
    ]);
    let html = client
        .post(format!("{}/predict", base))
        .form(&form)
        .send()
        .await?
        .text()
        .await?;

    assert!(html.contains(r##"fill="#e74c3c""##));
    assert!(html.contains("The passenger did not survive (survival probability: "));
    Ok(())
}

#[tokio::test]
async fn test_invalid_input_is_inline_and_service_stays_usable() -> Result<()> {
    let base = spawn_server().await?;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/predict", base))
        .form(&passenger(&[("age", "250")]))
        .send()
        .await?;
    assert_eq!(response.status(), 200);
    let html = response.text().await?;
    assert!(html.contains(r#"id="error""#));
    assert!(!html.contains("probability-chart"));

    let html = client
        .post(format!("{}/predict", base))
        .form(&passenger(&[]))
        .send()
        .await?
        .text()
        .await?;
    assert!(html.contains("probability-chart"));
    assert!(!html.contains(r#"id="error""#));
    Ok(())
}

#[tokio::test]
async fn test_missing_field_reports_field_name() -> Result<()> {
    let base = spawn_server().await?;
    let client = reqwest::Client::new();

    let mut form = passenger(&[]);
    form.retain(|(key, _)| *key != "who");
    let html = client
        .post(format!("{}/predict", base))
        .form(&form)
        .send()
        .await?
        .text()
        .await?;

    assert!(html.contains(r#"id="error""#));
    assert!(html.contains("who"));
    Ok(())
}

#[tokio::test]
async fn test_health_reports_model_name() -> Result<()> {
    let base = spawn_server().await?;

    let body = reqwest::get(format!("{}/health", base)).await?.text().await?;
    let health: serde_json::Value = serde_json::from_str(&body)?;

    assert_eq!(health["status"], "ok");
    assert_eq!(health["model"], "titanic-logreg");
    Ok(())
}
