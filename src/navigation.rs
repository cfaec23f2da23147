#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationTarget {
    /// Navigate an already open application window and bring it to front.
    FocusExisting { route: String },
    /// No suitable window is open, a new one has to be opened at the url.
    OpenWindow { url: String },
}

///
/// Decides where a notification click should take the user.
///
/// An open application window always wins: it is navigated to the in-app
/// route and focused. The external link is only followed when no route is
/// set, or when no application window is open and a link is present.
/// With neither window nor link, a new window is opened at the
/// application origin extended with the route.
///
pub fn resolve_click(
    origin: &str,
    route: Option<&str>,
    link: Option<&str>,
    app_window_open: bool,
) -> NavigationTarget {
    if app_window_open {
        match (route, link) {
            (None, Some(link)) => NavigationTarget::OpenWindow {
                url: link.to_string(),
            },
            (route, _) => NavigationTarget::FocusExisting {
                route: route.unwrap_or_default().to_string(),
            },
        }
    } else if let Some(link) = link {
        NavigationTarget::OpenWindow {
            url: link.to_string(),
        }
    } else {
        NavigationTarget::OpenWindow {
            url: format!("{origin}{}", route.unwrap_or_default()),
        }
    }
}
