/// Page routes served by the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    About,
    Events,
    Projects,
    ProjectDetail(u32),
    Submit,
    NotFound(String),
}

impl Route {
    /// Resolves a request path. Query strings, fragments and a trailing `/` are ignored.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["about"] => Route::About,
            ["events"] => Route::Events,
            ["projects"] => Route::Projects,
            ["projects", id] => match id.parse() {
                Ok(id) => Route::ProjectDetail(id),
                Err(_) => Route::NotFound(path.to_string()),
            },
            ["submit"] => Route::Submit,
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::About => "/about".to_string(),
            Route::Events => "/events".to_string(),
            Route::Projects => "/projects".to_string(),
            Route::ProjectDetail(id) => format!("/projects/{id}"),
            Route::Submit => "/submit".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::About => "about",
            Route::Events => "events",
            Route::Projects => "projects",
            Route::ProjectDetail(_) => "project",
            Route::Submit => "submit",
            Route::NotFound(_) => "not-found",
        }
    }
}
