//! Page Routes
//!
//! Three pages, addressed by pathname with the card id carried in the `id`
//! query parameter.

use crate::api;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// Card list (the landing page).
    List,
    /// Create/edit form; with an id, the card is preloaded for editing.
    Edit { id: Option<String> },
    /// Grid viewer; a missing id is reported on the page.
    View { id: Option<String> },
}

/// Map a pathname plus the parsed `id` parameter to a route. Accepts both
/// the bare page names and their `.html` spellings; anything else lands on
/// the list.
pub fn parse(path: &str, id: Option<String>) -> Route {
    let page = path.trim_end_matches('/').rsplit('/').next().unwrap_or("");
    match page {
        "edit" | "edit.html" | "index.html" => Route::Edit { id },
        "view" | "view.html" => Route::View { id },
        _ => Route::List,
    }
}

/// Read the route from the browser location.
pub fn current_route() -> Route {
    let Some(window) = web_sys::window() else {
        return Route::List;
    };
    let location = window.location();
    let path = location.pathname().unwrap_or_default();
    let id = location
        .search()
        .ok()
        .and_then(|search| web_sys::UrlSearchParams::new_with_str(&search).ok())
        .and_then(|params| params.get("id"))
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty());
    parse(&path, id)
}

pub fn view_href(id: &str) -> String {
    format!("/view?id={}", api::encode_id(id))
}

pub fn edit_href(id: &str) -> String {
    format!("/edit?id={}", api::encode_id(id))
}

/// Full page navigation, as the original multi-page frontend does it.
pub fn navigate(href: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().set_href(href) {
            web_sys::console::error_1(&format!("[NAV] navigation failed: {e:?}").into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_page_paths() {
        assert_eq!(parse("/", None), Route::List);
        assert_eq!(parse("/list", None), Route::List);
        assert_eq!(parse("/edit", None), Route::Edit { id: None });
        assert_eq!(
            parse("/edit", Some("abc".into())),
            Route::Edit {
                id: Some("abc".into())
            }
        );
        assert_eq!(
            parse("/view/", Some("abc".into())),
            Route::View {
                id: Some("abc".into())
            }
        );
        assert_eq!(parse("/view.html", None), Route::View { id: None });
        assert_eq!(parse("/index.html", None), Route::Edit { id: None });
        assert_eq!(parse("/unknown", None), Route::List);
    }

    #[test]
    fn hrefs_encode_ids() {
        assert_eq!(view_href("a1b2"), "/view?id=a1b2");
        assert_eq!(edit_href("a b"), "/edit?id=a%20b");
    }
}
