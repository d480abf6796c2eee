use bloggraph_core::api::BlogApi;
use bloggraph_core::rpc_types::RpcResponse;
use bloggraph_core::selection::Selection;
use bloggraph_core::stdio::{handle_line, serve};
use bloggraph_core::{ApiError, BlogError, BlogStore};
use serde_json::{json, Value};
use std::sync::Arc;

fn seeded_api() -> BlogApi {
    BlogApi::new(Arc::new(BlogStore::seeded()))
}

fn call(api: &BlogApi, name: &str, arguments: Value, select: Value) -> RpcResponse {
    let request = json!({
        "jsonrpc": "2.0",
        "id": 7,
        "method": "operations/call",
        "params": { "name": name, "arguments": arguments, "select": select }
    });
    handle_line(api, &request.to_string())
}

fn data(response: RpcResponse) -> Value {
    assert!(response.error.is_none(), "unexpected error: {:?}", response.error);
    response.result.expect("result")["data"].clone()
}

#[test]
fn test_default_selection_returns_scalars_only() {
    let api = seeded_api();
    let users = data(call(&api, "users", json!({ "query": "ar" }), Value::Null));
    assert_eq!(
        users,
        json!([
            { "id": "1", "name": "Arya", "email": "arya@example.com", "age": 19 },
            { "id": "3", "name": "Sarah", "email": "sarah@example.com", "age": null }
        ])
    );
}

#[test]
fn test_nested_selection_resolves_relationships() {
    let api = seeded_api();
    let posts = data(call(
        &api,
        "posts",
        json!({ "query": "course 2" }),
        json!({ "title": true, "author": { "name": true }, "comments": { "text": true } }),
    ));
    assert_eq!(
        posts,
        json!([{
            "title": "Course2",
            "author": { "name": "Arya" },
            "comments": [{ "text": "This is the second comment" }]
        }])
    );
}

#[test]
fn test_relationships_are_only_resolved_when_selected() {
    // The placeholder post points at an author that is not in the store, so
    // selecting `author` fails while the scalar view succeeds.
    let api = seeded_api();

    let post = data(call(&api, "post", Value::Null, json!({ "id": true })));
    assert_eq!(post, json!({ "id": "abcdef123456" }));

    let response = call(&api, "post", Value::Null, json!({ "author": { "id": true } }));
    let error = response.error.expect("integrity error");
    assert_eq!(error.code, -32000);
    assert_eq!(error.data, Some(json!({ "kind": "integrity" })));
}

#[test]
fn test_mutation_errors_carry_kind() {
    let api = seeded_api();

    let response = call(
        &api,
        "createUser",
        json!({ "data": { "name": "A", "email": "arya@example.com" } }),
        Value::Null,
    );
    assert_eq!(response.id, Some(json!(7)));
    let error = response.error.expect("conflict");
    assert_eq!(error.message, "Email taken!");
    assert_eq!(error.data, Some(json!({ "kind": "conflict" })));

    let response = call(
        &api,
        "createComment",
        json!({ "data": { "text": "hi", "author": "2", "post": "1" } }),
        Value::Null,
    );
    let error = response.error.expect("reference");
    assert_eq!(error.message, "Post does not exist!");
    assert_eq!(error.data, Some(json!({ "kind": "reference" })));
}

#[test]
fn test_created_records_are_visible_to_later_reads() {
    let api = seeded_api();
    let created = data(call(
        &api,
        "createPost",
        json!({
            "data": { "title": "Course4", "body": "fresh", "published": true, "author": "3" }
        }),
        json!({ "id": true, "author": { "name": true } }),
    ));
    assert_eq!(created["author"], json!({ "name": "Sarah" }));
    let post_id = created["id"].as_str().unwrap().to_string();

    let comment = data(call(
        &api,
        "createComment",
        json!({ "data": { "text": "first!", "author": "2", "post": post_id } }),
        json!({ "post": { "title": true } }),
    ));
    assert_eq!(comment, json!({ "post": { "title": "Course4" } }));

    let sarah = data(call(
        &api,
        "users",
        json!({ "query": "sarah" }),
        json!({ "posts": { "title": true } }),
    ));
    assert_eq!(sarah, json!([{ "posts": [{ "title": "Course4" }] }]));
}

#[test]
fn test_request_errors() {
    let api = seeded_api();

    let unknown_field = call(&api, "comments", Value::Null, json!({ "body": true }));
    let error = unknown_field.error.unwrap();
    assert_eq!(error.code, -32602);
    assert!(error.message.contains("'body'"));
    assert!(error.message.contains("'Comment'"));

    let missing_data = call(&api, "createUser", json!({}), Value::Null);
    assert_eq!(missing_data.error.unwrap().code, -32602);

    let unknown_op = call(&api, "deleteUser", Value::Null, Value::Null);
    assert_eq!(unknown_op.error.unwrap().code, -32601);

    let parse = handle_line(&api, "{not json");
    assert_eq!(parse.error.unwrap().code, -32700);

    let unknown_method = handle_line(&api, r#"{"jsonrpc":"2.0","id":1,"method":"shutdown"}"#);
    assert_eq!(unknown_method.error.unwrap().code, -32601);
}

#[test]
fn test_api_call_exposes_domain_errors() {
    let api = seeded_api();
    let err = api
        .call(
            "createPost",
            json!({ "data": { "title": "t", "body": "b", "published": true, "author": "9" } }),
            &Selection::scalars(),
        )
        .unwrap_err();
    assert!(matches!(err, ApiError::Blog(BlogError::Reference(_))));
    assert_eq!(api.store().posts().len(), 3);
}

#[test]
fn test_selection_builder_matches_json() {
    let built = Selection::scalars()
        .field("name")
        .with("posts", Selection::scalars().field("title"));
    let parsed =
        Selection::from_json(&json!({ "name": true, "posts": { "title": true } })).unwrap();
    assert_eq!(built, parsed);
    assert!(Selection::from_json(&json!({ "name": 3 })).is_err());
    assert!(Selection::from_json(&json!(["name"])).is_err());
}

#[tokio::test]
async fn test_serve_answers_each_line() {
    let api = Arc::new(seeded_api());
    let input = [
        json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize" }).to_string(),
        String::new(),
        json!({ "jsonrpc": "2.0", "id": 2, "method": "operations/list" }).to_string(),
        json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "operations/call",
            "params": { "name": "me", "select": { "name": true } }
        })
        .to_string(),
    ]
    .join("\n");

    let mut output: Vec<u8> = Vec::new();
    serve(api, input.as_bytes(), &mut output).await.unwrap();

    let responses: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(responses.len(), 3);

    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "bloggraph");

    let operations = responses[1]["result"]["operations"].as_array().unwrap();
    assert_eq!(operations.len(), 8);
    assert!(operations
        .iter()
        .any(|op| op["name"] == "createComment" && op["kind"] == "mutation"));

    assert_eq!(responses[2]["id"], 3);
    assert_eq!(responses[2]["result"]["data"], json!({ "name": "Mike Hannigan" }));
}

#[test]
fn test_fields_come_back_in_selection_order() {
    let api = seeded_api();
    let posts = data(call(
        &api,
        "posts",
        json!({ "query": "course 2" }),
        json!({ "title": true, "id": true, "author": { "name": true, "email": true } }),
    ));
    assert_eq!(
        posts.to_string(),
        r#"[{"title":"Course2","id":"2","author":{"name":"Arya","email":"arya@example.com"}}]"#
    );

    let built = Selection::scalars().field("title").field("id");
    assert_eq!(Selection::from_json(&json!({ "title": true, "id": true })).unwrap(), built);
}

#[test]
fn test_requests_must_declare_jsonrpc_2() {
    let api = seeded_api();

    let old = handle_line(&api, r#"{"jsonrpc":"1.0","id":4,"method":"initialize"}"#);
    assert_eq!(old.id, Some(json!(4)));
    assert_eq!(old.error.unwrap().code, -32600);

    let missing = handle_line(&api, r#"{"id":5,"method":"operations/list"}"#);
    assert_eq!(missing.error.unwrap().code, -32600);
}

#[tokio::test]
async fn test_serve_survives_non_utf8_line() {
    let api = Arc::new(seeded_api());
    let input: &[u8] =
        b"\xff\xfe garbage\n{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"initialize\"}\n";

    let mut output: Vec<u8> = Vec::new();
    serve(api, input, &mut output).await.unwrap();

    let responses: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(responses.len(), 2);

    assert_eq!(responses[0]["error"]["code"], -32700);
    assert_eq!(responses[0]["id"], Value::Null);

    assert_eq!(responses[1]["id"], 2);
    assert_eq!(responses[1]["result"]["serverInfo"]["name"], "bloggraph");
}
