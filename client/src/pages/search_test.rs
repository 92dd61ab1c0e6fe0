use super::*;

fn user(id: usize) -> User {
    User {
        id: id.to_string(),
        name: format!("user{id}"),
        avatar: String::new(),
        created: Some(format!("2020-01-01T00:00:{id:02}Z")),
    }
}

#[test]
fn next_cursor_uses_last_created_on_full_page() {
    let page: Vec<User> = (0..SEARCH_PAGE_SIZE).map(user).collect();
    assert_eq!(next_cursor(&page).as_deref(), Some("2020-01-01T00:00:09Z"));
}

#[test]
fn next_cursor_stops_on_short_page() {
    let page: Vec<User> = (0..3).map(user).collect();
    assert_eq!(next_cursor(&page), None);
    assert_eq!(next_cursor(&[]), None);
}

#[test]
fn next_cursor_needs_created_timestamp() {
    let mut page: Vec<User> = (0..SEARCH_PAGE_SIZE).map(user).collect();
    if let Some(last) = page.last_mut() {
        last.created = None;
    }
    assert_eq!(next_cursor(&page), None);
}
