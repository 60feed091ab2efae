//! Host page for the widget. The regions are filled from the current view;
//! `/static/widget.js` forwards DOM events and mirrors later view changes.

use crate::view::HtmlView;

pub fn render_page(view: &HtmlView) -> String {
    let wrapper_class = if view.input_focused {
        "search-wrapper focused"
    } else {
        "search-wrapper"
    };
    let welcome_class = if view.welcome_visible {
        "welcome-section"
    } else {
        "welcome-section hidden"
    };
    let spinner_style = if view.spinner_visible {
        "display: block;"
    } else {
        "display: none;"
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Wikipedia Search</title>
</head>
<body>
<main class="container">
<div class="{wrapper_class}" id="searchWrapper">
<span class="search-icon" id="searchIcon"></span>
<input type="search" id="searchInput" placeholder="Search Wikipedia (Ctrl+K)" autocomplete="off">
<div class="loading-spinner" id="loadingSpinner" style="{spinner_style}"></div>
</div>
<section class="{welcome_class}" id="welcomeSection">
<h2>Search Wikipedia</h2>
<p>Type a query and press Enter.</p>
</section>
<div class="search-results" id="searchResults">{results}</div>
</main>
<script src="/static/widget.js"></script>
</body>
</html>
"#,
        results = view.results_html,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::View;

    #[test]
    fn welcome_is_hidden_once_a_search_starts() {
        let mut view = HtmlView::default();
        assert!(render_page(&view).contains(r#"class="welcome-section" "#));

        view.set_welcome_visible(false);
        view.set_spinner_visible(true);
        let page = render_page(&view);
        assert!(page.contains(r#"class="welcome-section hidden""#));
        assert!(page.contains(r#"style="display: block;""#));
    }
}
