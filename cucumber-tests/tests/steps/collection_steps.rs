use cucumber::gherkin::Step;
use cucumber::{then, when};
use cucumber_tests::StudioWorld;
use serde_json::{json, Value};

fn document(step: &Step) -> Value {
    let text = step.docstring.as_deref().expect("step needs a JSON docstring");
    serde_json::from_str(text).expect("docstring is not valid JSON")
}

fn remember_id(world: &mut StudioWorld, collection: &str) {
    if let Some(id) = world.last.body["_id"].as_str() {
        world.last_ids.insert(collection.to_string(), id.to_string());
    }
}

fn last_id(world: &StudioWorld, collection: &str) -> String {
    world.last_ids.get(collection).cloned().expect("no document written to this collection yet")
}

#[when(expr = "I insert into {string}:")]
async fn when_insert(world: &mut StudioWorld, step: &Step, collection: String) {
    let path = format!("/api/collections/{}", collection);
    world.request("POST", &path, Some(document(step))).await.unwrap();
    remember_id(world, &collection);
}

#[when(expr = "I update the last {string} document:")]
async fn when_update(world: &mut StudioWorld, step: &Step, collection: String) {
    let path = format!("/api/collections/{}/{}", collection, last_id(world, &collection));
    world.request("PUT", &path, Some(document(step))).await.unwrap();
}

#[when(expr = "I fetch the last {string} document")]
async fn when_fetch(world: &mut StudioWorld, collection: String) {
    let path = format!("/api/collections/{}/{}", collection, last_id(world, &collection));
    world.request("GET", &path, None).await.unwrap();
}

#[when(expr = "I delete the last {string} document")]
async fn when_delete(world: &mut StudioWorld, collection: String) {
    let path = format!("/api/collections/{}/{}", collection, last_id(world, &collection));
    world.request("DELETE", &path, None).await.unwrap();
}

#[then(expr = "the document field {string} should be {string}")]
async fn then_document_field(world: &mut StudioWorld, field: String, expected: String) {
    assert_eq!(world.last.body[field.as_str()], json!(expected), "body: {}", world.last.body);
}

#[then(expr = "the collection {string} should hold {int} document(s)")]
async fn then_collection_size(world: &mut StudioWorld, collection: String, count: usize) {
    world.request("GET", &format!("/api/collections/{}", collection), None).await.unwrap();
    assert_eq!(world.last.status, 200);
    assert_eq!(world.last.body["total"], json!(count));
}
