use askama::Template;

/// One row on the status page.
pub struct ResourceRow {
    pub kind: &'static str,
    pub name: String,
    pub state: String,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub namespace: String,
    pub version: &'static str,
    pub generated_at: String,
    pub rows: Vec<ResourceRow>,
}
