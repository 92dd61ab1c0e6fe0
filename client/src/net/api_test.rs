use futures::executor::block_on;

use super::*;
use crate::auth::AUTH_COOKIE;
use crate::net::http::Method;
use crate::net::http::RequestBody;
use crate::net::test_helpers::{TOKEN_42, harness, response};

fn post(id: usize, author: &str) -> Post {
    Post {
        id: format!("p{id}"),
        title: format!("title {id}"),
        body: "body".to_owned(),
        created: format!("2020-01-01T00:00:{id:02}Z"),
        updated: None,
        author: User { id: author.to_owned(), name: format!("user{author}"), avatar: String::new(), created: None },
    }
}

/// Feed page JSON for posts `ids`, all written by `author`.
fn page_json(ids: std::ops::Range<usize>, author: &str) -> String {
    let posts: Vec<Post> = ids.map(|id| post(id, author)).collect();
    serde_json::to_string(&posts).expect("encode page")
}

#[test]
fn search_endpoint_encodes_query_and_cursor() {
    assert_eq!(search_endpoint("al ice", None), "/api/search?q=al%20ice");
    assert_eq!(
        search_endpoint("bob", Some("2020-01-02T03:04:05+00:00")),
        "/api/search?q=bob&prev=2020-01-02T03%3A04%3A05%2B00%3A00"
    );
    assert_eq!(search_endpoint("bob", Some("  ")), "/api/search?q=bob");
}

#[test]
fn posts_endpoint_with_and_without_cursor() {
    assert_eq!(posts_endpoint(None), "/api/posts");
    assert_eq!(posts_endpoint(Some("2020")), "/api/posts?prev=2020");
}

#[test]
fn delete_endpoints_format_ids() {
    assert_eq!(post_endpoint("p-1"), "/api/post/p-1");
    assert_eq!(profile_endpoint("u-1"), "/api/profile/u-1");
    assert_eq!(profile_photo_endpoint("u-1"), "/api/profilephoto/u-1");
}

// =============================================================
// Feed paging
// =============================================================

#[test]
fn next_post_cursor_uses_last_created_on_full_page() {
    let page: Vec<Post> = (0..POSTS_PAGE_SIZE).map(|id| post(id, "7")).collect();
    assert_eq!(next_post_cursor(&page).as_deref(), Some("2020-01-01T00:00:09Z"));
}

#[test]
fn next_post_cursor_stops_on_short_page() {
    let page: Vec<Post> = (0..4).map(|id| post(id, "7")).collect();
    assert_eq!(next_post_cursor(&page), None);
    assert_eq!(next_post_cursor(&[]), None);
}

#[test]
fn posts_page_passes_cursor_and_reports_next() {
    let h = harness();
    h.transport.push(Ok(response(200, &[], &page_json(10..20, "7"))));

    let page = block_on(posts_page(&h.client, Some("2020-01-01T00:00:10Z"))).expect("page");

    assert_eq!(page.posts.len(), POSTS_PAGE_SIZE);
    assert_eq!(page.next.as_deref(), Some("2020-01-01T00:00:19Z"));
    assert_eq!(h.transport.sent()[0].url, "/api/posts?prev=2020-01-01T00%3A00%3A10Z");
}

#[test]
fn author_posts_page_skips_pages_without_matches() {
    let h = harness();
    h.transport.push(Ok(response(200, &[], &page_json(0..10, "8"))));
    let mut mixed: Vec<Post> = (10..20).map(|id| post(id, "8")).collect();
    mixed[3].author.id = "7".to_owned();
    h.transport.push(Ok(response(200, &[], &serde_json::to_string(&mixed).expect("encode"))));

    let page = block_on(author_posts_page(&h.client, "7", None)).expect("page");

    let ids: Vec<String> = page.posts.into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec!["p13"]);
    assert_eq!(page.next.as_deref(), Some("2020-01-01T00:00:19Z"));
    let urls: Vec<String> = h.transport.sent().into_iter().map(|r| r.url).collect();
    assert_eq!(urls, vec!["/api/posts", "/api/posts?prev=2020-01-01T00%3A00%3A09Z"]);
}

#[test]
fn author_posts_page_stops_when_feed_runs_out() {
    let h = harness();
    h.transport.push(Ok(response(200, &[], &page_json(0..10, "8"))));
    h.transport.push(Ok(response(200, &[], &page_json(10..13, "8"))));

    let page = block_on(author_posts_page(&h.client, "7", None)).expect("page");

    assert!(page.posts.is_empty());
    assert_eq!(page.next, None);
    assert_eq!(h.transport.sent().len(), 2);
}

#[test]
fn author_posts_page_scan_is_bounded() {
    let h = harness();
    for start in 0..MAX_AUTHOR_SCAN_PAGES + 1 {
        h.transport.push(Ok(response(200, &[], &page_json(start * 10..start * 10 + 10, "8"))));
    }

    let page = block_on(author_posts_page(&h.client, "7", None)).expect("page");

    assert!(page.posts.is_empty());
    assert!(page.next.is_some());
    assert_eq!(h.transport.sent().len(), MAX_AUTHOR_SCAN_PAGES);
}

#[test]
fn author_posts_page_keeps_feed_order() {
    let h = harness();
    let mut posts: Vec<Post> = (0..3).map(|id| post(id, "7")).collect();
    posts[1].author.id = "8".to_owned();
    h.transport.push(Ok(response(200, &[], &serde_json::to_string(&posts).expect("encode"))));

    let page = block_on(author_posts_page(&h.client, "7", None)).expect("page");

    let ids: Vec<String> = page.posts.into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec!["p0", "p2"]);
    assert_eq!(page.next, None);
}

// =============================================================
// Mutations
// =============================================================

#[test]
fn edit_post_puts_full_post_with_author() {
    let h = harness();
    h.transport.push(Ok(response(200, &[], "post edited!")));
    let original = post(1, "42");
    let edit = PostSubmission { title: "new title".to_owned(), body: "new body".to_owned() };

    block_on(edit_post(&h.client, &original, &edit)).expect("edit");

    let sent = h.transport.sent();
    assert_eq!(sent[0].method, Method::Put);
    assert_eq!(sent[0].url, "/api/post");
    assert_eq!(sent[0].header("content-type"), Some("application/json"));
    let body: serde_json::Value = serde_json::from_str(sent[0].text_body().expect("json body")).expect("json");
    assert_eq!(
        body,
        serde_json::json!({ "id": "p1", "title": "new title", "body": "new body", "author": { "id": "42" } })
    );
}

#[test]
fn edit_post_surfaces_backend_rejection() {
    let h = harness();
    h.transport.push(Ok(response(401, &[], "unauthorized")));
    let edit = PostSubmission { title: "t".to_owned(), body: "b".to_owned() };

    let err = block_on(edit_post(&h.client, &post(1, "9"), &edit)).expect_err("rejected");

    assert_eq!(error_message(&err), "unauthorized");
}

#[test]
fn update_avatar_sends_multipart_and_decodes_user() {
    let h = harness();
    h.transport.push(Ok(response(200, &[], r#"{"id":"42","name":"bob","avatar":"0a1b2c.png"}"#)));
    let upload = AvatarUpload {
        file_name: "me.png".to_owned(),
        content_type: "image/png".to_owned(),
        bytes: vec![0x89, b'P', b'N', b'G'],
    };

    let user = block_on(update_avatar(&h.client, "42", &upload)).expect("upload");

    assert_eq!(user.avatar, "0a1b2c.png");
    let sent = h.transport.sent();
    assert_eq!(sent[0].method, Method::Put);
    assert_eq!(sent[0].url, "/api/profilephoto/42");
    assert_eq!(sent[0].header("content-type"), None);
    let Some(RequestBody::Multipart(parts)) = &sent[0].body else {
        panic!("expected multipart body, got {:?}", sent[0].body);
    };
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0].name, AVATAR_FIELD);
    assert_eq!(parts[0].file_name, "me.png");
    assert_eq!(parts[0].content_type, "image/png");
    assert_eq!(parts[0].bytes, upload.bytes);
}

#[test]
fn all_posts_decodes_feed() {
    let h = harness();
    h.transport.push(Ok(response(
        200,
        &[],
        r#"[{"id":"p","title":"t","body":"b","created":"c","author":{"id":"u","name":"n","avatar":""}}]"#,
    )));

    let posts = block_on(all_posts(&h.client, None)).expect("feed");

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].author.id, "u");
    assert_eq!(h.transport.sent()[0].url, "/api/posts");
}

#[test]
fn signup_posts_json_and_adopts_new_session() {
    let h = harness();
    // The backend sets the cookie on the signup response.
    h.cookies.insert(AUTH_COOKIE, TOKEN_42);
    h.transport.push(Ok(response(200, &[], "account created!")));

    let request = SignupRequest {
        name: "bob".to_owned(),
        email: "bob@example.com".to_owned(),
        password: "Secret123!".to_owned(),
    };
    block_on(signup(&h.client, &request)).expect("signup");

    let sent = h.transport.sent();
    assert_eq!(sent[0].method, Method::Post);
    assert_eq!(sent[0].url, "/api/signup");
    assert!(sent[0].text_body().is_some_and(|b| b.contains("\"email\":\"bob@example.com\"")));
    assert_eq!(h.session.user_untracked(), "42");
}

#[test]
fn delete_post_uses_delete_method() {
    let h = harness();
    block_on(delete_post(&h.client, "p-9")).expect("delete");
    let sent = h.transport.sent();
    assert_eq!(sent[0].method, Method::Delete);
    assert_eq!(sent[0].url, "/api/post/p-9");
}

#[test]
fn error_message_prefers_backend_text() {
    let err = ApiError::Status(response(400, &[], "invalid name\n"));
    assert_eq!(error_message(&err), "invalid name");

    let err = ApiError::Status(response(500, &[], ""));
    assert_eq!(error_message(&err), "request failed with status 500");

    let err = ApiError::Network("offline".to_owned());
    assert_eq!(error_message(&err), "network error: offline");
}
