use cucumber::gherkin::Step;
use cucumber::{given, then, when};
use cucumber_tests::StudioWorld;
use serde_json::{json, Value};

fn docstring(step: &Step) -> Value {
    let text = step.docstring.as_deref().expect("step needs a JSON docstring");
    serde_json::from_str(text).expect("docstring is not valid JSON")
}

// ==================== SERVER ====================

#[given("a running Mongo Studio server")]
async fn given_server(world: &mut StudioWorld) {
    world.start_server().await.expect("server failed to start");
}

#[given(expr = "the model {string} exists with schema:")]
async fn given_model(world: &mut StudioWorld, step: &Step, name: String) {
    let body = json!({ "name": name, "schema": docstring(step) });
    world.request("POST", "/api/models", Some(body)).await.unwrap();
    assert_eq!(world.last.status, 201, "setup failed: {}", world.last.body);
}

// ==================== REQUESTS ====================

#[when(expr = "I create the model {string} with schema:")]
async fn when_create_model(world: &mut StudioWorld, step: &Step, name: String) {
    let body = json!({ "name": name, "schema": docstring(step) });
    world.request("POST", "/api/models", Some(body)).await.unwrap();
}

#[when("I post to /api/models:")]
async fn when_post_raw(world: &mut StudioWorld, step: &Step) {
    world.request("POST", "/api/models", Some(docstring(step))).await.unwrap();
}

#[when("I validate the schema:")]
async fn when_validate(world: &mut StudioWorld, step: &Step) {
    let body = json!({ "schema": docstring(step) });
    world.request("POST", "/api/schemas/validate", Some(body)).await.unwrap();
}

#[when(expr = "I send a {word} request to {string}")]
async fn when_request(world: &mut StudioWorld, method: String, path: String) {
    world.request(&method, &path, None).await.unwrap();
}

#[when(expr = "{int} clients create the model {string} at the same time")]
async fn when_concurrent_create(world: &mut StudioWorld, clients: usize, name: String) {
    let url = world.url("/api/models");
    let body = json!({ "name": name, "schema": { "title": { "type": "string" } } });
    let requests = (0..clients).map(|_| world.client.post(&url).json(&body).send());

    world.batch_statuses = futures::future::join_all(requests)
        .await
        .into_iter()
        .map(|r| r.expect("request failed").status().as_u16())
        .collect();
}

// ==================== ASSERTIONS ====================

#[then(expr = "the response status should be {int}")]
async fn then_status(world: &mut StudioWorld, status: u16) {
    assert_eq!(world.last.status, status, "body: {}", world.last.body);
}

#[then(expr = "the response message should be {string}")]
async fn then_message(world: &mut StudioWorld, message: String) {
    assert_eq!(world.last.body["message"], json!(message), "body: {}", world.last.body);
}

#[then(expr = "the response field {string} should contain {string}")]
async fn then_field_contains(world: &mut StudioWorld, field: String, needle: String) {
    let value = world.last.body[field.as_str()].as_str().unwrap_or_default();
    assert!(value.contains(&needle), "{} does not contain {:?}:\n{}", field, needle, value);
}

#[then(expr = "the schema should be invalid with {int} error(s)")]
async fn then_invalid(world: &mut StudioWorld, count: usize) {
    assert_eq!(world.last.body["isValid"], json!(false));
    assert_eq!(world.last.body["errors"].as_array().map(Vec::len), Some(count));
}

#[then(expr = "error {int} should mention {string}")]
async fn then_error_mentions(world: &mut StudioWorld, index: usize, needle: String) {
    let error = world.last.body["errors"][index - 1].as_str().unwrap_or_default();
    assert!(error.contains(&needle), "{:?} does not mention {:?}", error, needle);
}

#[then("the schema should be valid")]
async fn then_valid(world: &mut StudioWorld) {
    assert_eq!(world.last.body, json!({ "isValid": true, "errors": [] }));
}

#[then(expr = "the model file for {string} should exist")]
async fn then_file_exists(world: &mut StudioWorld, name: String) {
    assert!(world.artifact_path(&name).expect("no server").exists());
}

#[then(expr = "the model file for {string} should not exist")]
async fn then_file_missing(world: &mut StudioWorld, name: String) {
    assert!(!world.artifact_path(&name).expect("no server").exists());
}

#[then(expr = "exactly {int} of them should get status {int}")]
async fn then_batch_count(world: &mut StudioWorld, expected: usize, status: u16) {
    let matching = world.batch_statuses.iter().filter(|s| **s == status).count();
    assert_eq!(matching, expected, "statuses: {:?}", world.batch_statuses);
}
