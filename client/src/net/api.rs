//! REST API helpers for communicating with the backend.
//!
//! All calls go through [`ApiClient`], so every one of them is stamped with
//! the default headers and feeds the interceptor's post-hook.
//!
//! ERROR HANDLING
//! ==============
//! Helpers return `Result<_, ApiError>`; pages turn errors into inline
//! messages instead of panicking.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::http::{ApiClient, ApiError, ApiRequest, FormPart, Transport};
use super::types::{AuthorRef, AvatarUpload, Post, PostEdit, PostSubmission, SignupRequest, User};

/// The backend returns at most this many posts per feed page.
pub const POSTS_PAGE_SIZE: usize = 10;

/// Feed pages one author "load more" may scan before handing control back.
pub const MAX_AUTHOR_SCAN_PAGES: usize = 5;

/// Multipart field the backend reads the avatar from.
pub const AVATAR_FIELD: &str = "avatar";

/// One page of posts plus the cursor for the next one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeedPage {
    pub posts: Vec<Post>,
    /// `None` once the feed is exhausted.
    pub next: Option<String>,
}

/// Cursor for the feed page after `page`, or `None` when `page` was the last.
pub fn next_post_cursor(page: &[Post]) -> Option<String> {
    if page.len() < POSTS_PAGE_SIZE {
        return None;
    }
    page.last().map(|post| post.created.clone()).filter(|created| !created.is_empty())
}

fn search_endpoint(query: &str, prev: Option<&str>) -> String {
    let mut url = format!("/api/search?q={}", urlencoding::encode(query));
    if let Some(prev) = prev.filter(|p| !p.trim().is_empty()) {
        url.push_str("&prev=");
        url.push_str(&urlencoding::encode(prev));
    }
    url
}

fn posts_endpoint(prev: Option<&str>) -> String {
    match prev.filter(|p| !p.trim().is_empty()) {
        Some(prev) => format!("/api/posts?prev={}", urlencoding::encode(prev)),
        None => "/api/posts".to_owned(),
    }
}

fn post_endpoint(post_id: &str) -> String {
    format!("/api/post/{}", urlencoding::encode(post_id))
}

fn profile_endpoint(user_id: &str) -> String {
    format!("/api/profile/{}", urlencoding::encode(user_id))
}

fn profile_photo_endpoint(user_id: &str) -> String {
    format!("/api/profilephoto/{}", urlencoding::encode(user_id))
}

/// `GET /api/search`: users whose name contains `query`, newest first.
/// Pass the `created` of the last result as `prev` for the next page.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the body is not a user list.
pub async fn search_users<T: Transport>(client: &ApiClient<T>, query: &str, prev: Option<&str>) -> Result<Vec<User>, ApiError> {
    client.get_json(&search_endpoint(query, prev)).await
}

/// `GET /api/posts`: the post feed, newest first.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the body is not a post list.
pub async fn all_posts<T: Transport>(client: &ApiClient<T>, prev: Option<&str>) -> Result<Vec<Post>, ApiError> {
    client.get_json(&posts_endpoint(prev)).await
}

/// One page of the feed with its next cursor.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the body is not a post list.
pub async fn posts_page<T: Transport>(client: &ApiClient<T>, prev: Option<&str>) -> Result<FeedPage, ApiError> {
    let posts = all_posts(client, prev).await?;
    let next = next_post_cursor(&posts);
    Ok(FeedPage { posts, next })
}

/// Posts by `author_id`, walked out of the global feed.
///
/// The backend has no per-author listing, so this reads feed pages from
/// `prev` until one yields a match, the feed runs out, or
/// [`MAX_AUTHOR_SCAN_PAGES`] pages were read. `next` continues the scan.
///
/// # Errors
///
/// Returns an [`ApiError`] if any page request fails.
pub async fn author_posts_page<T: Transport>(
    client: &ApiClient<T>,
    author_id: &str,
    prev: Option<&str>,
) -> Result<FeedPage, ApiError> {
    let mut cursor = prev.map(str::to_owned);
    let mut posts = Vec::new();
    for _ in 0..MAX_AUTHOR_SCAN_PAGES {
        let page = posts_page(client, cursor.as_deref()).await?;
        cursor = page.next;
        posts.extend(page.posts.into_iter().filter(|post| post.author.id == author_id));
        if !posts.is_empty() || cursor.is_none() {
            break;
        }
    }
    Ok(FeedPage { posts, next: cursor })
}

/// `POST /api/signup`. On success the backend sets the auth cookies, which
/// the interceptor picks up before this returns.
///
/// # Errors
///
/// Returns [`ApiError::Status`] with the backend's message on rejection.
pub async fn signup<T: Transport>(client: &ApiClient<T>, request: &SignupRequest) -> Result<(), ApiError> {
    client.post_json("/api/signup", request).await.map(|_| ())
}

/// `POST /api/post`: publish a post as the current user.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails.
pub async fn submit_post<T: Transport>(client: &ApiClient<T>, submission: &PostSubmission) -> Result<(), ApiError> {
    client.post_json("/api/post", submission).await.map(|_| ())
}

/// `PUT /api/post`: replace the title and body of `post`, which must belong
/// to the signed-in user.
///
/// # Errors
///
/// Returns [`ApiError::Status`] with the backend's message on rejection.
pub async fn edit_post<T: Transport>(client: &ApiClient<T>, post: &Post, edit: &PostSubmission) -> Result<(), ApiError> {
    let body = PostEdit {
        id: post.id.clone(),
        title: edit.title.clone(),
        body: edit.body.clone(),
        author: AuthorRef { id: post.author.id.clone() },
    };
    client.put_json("/api/post", &body).await.map(|_| ())
}

/// `PUT /api/profilephoto/{id}`: upload a new avatar as multipart form data.
/// Returns the user record carrying the stored avatar name.
///
/// # Errors
///
/// Returns [`ApiError::Status`] with the backend's message on rejection, or
/// [`ApiError::Decode`] if the body is not a user.
pub async fn update_avatar<T: Transport>(
    client: &ApiClient<T>,
    user_id: &str,
    upload: &AvatarUpload,
) -> Result<User, ApiError> {
    let part = FormPart {
        name: AVATAR_FIELD.to_owned(),
        file_name: upload.file_name.clone(),
        content_type: upload.content_type.clone(),
        bytes: upload.bytes.clone(),
    };
    let request = ApiRequest::put(profile_photo_endpoint(user_id)).with_multipart(vec![part]);
    client.send(request).await?.json()
}

/// `DELETE /api/post/{id}`.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails.
pub async fn delete_post<T: Transport>(client: &ApiClient<T>, post_id: &str) -> Result<(), ApiError> {
    client.send(ApiRequest::delete(post_endpoint(post_id))).await.map(|_| ())
}

/// `DELETE /api/profile/{id}`: delete the account. The backend expires the
/// auth cookies in the same response.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails.
pub async fn delete_account<T: Transport>(client: &ApiClient<T>, user_id: &str) -> Result<(), ApiError> {
    client.send(ApiRequest::delete(profile_endpoint(user_id))).await.map(|_| ())
}

/// Human-readable message for an API error, preferring the backend's text body.
pub fn error_message(err: &ApiError) -> String {
    match err {
        ApiError::Status(response) if !response.body.trim().is_empty() => response.body.trim().to_owned(),
        other => other.to_string(),
    }
}
