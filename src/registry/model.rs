/// Synthesized category for external posts; never part of the authored
/// category list.
pub const POSTS_CATEGORY_KEY: &str = "writing";
pub const POSTS_CATEGORY_NAME: &str = "Writing";

/// One navigable section of the site.
#[derive(Clone, Debug)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub label: String,
    pub summary: String,
    pub tags: Vec<String>,
}

/// Ordered grouping of sections for the sidebar; declaration order is the
/// tie-break order when a section is listed more than once.
#[derive(Clone, Debug)]
pub struct Category {
    pub key: String,
    pub name: String,
    pub sections: Vec<String>,
}

/// Hand-authored semantic relation between two sections.
#[derive(Clone, Debug)]
pub struct ContentLink {
    pub source: String,
    pub target: String,
    pub reason: String,
    pub weight: f32,
}

/// External content item shown only by the posts variant of the graph.
#[derive(Clone, Debug)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub label: String,
    pub url: String,
    pub tags: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct Registry {
    pub sections: Vec<Section>,
    pub categories: Vec<Category>,
    pub default_category: String,
    pub links: Vec<ContentLink>,
    pub posts: Vec<Post>,
}

impl Registry {
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == id)
    }

    /// First declared category listing the section, falling back to the
    /// default category.
    pub fn category_for(&self, section_id: &str) -> &str {
        self.categories
            .iter()
            .find(|category| category.sections.iter().any(|id| id == section_id))
            .map(|category| category.key.as_str())
            .unwrap_or(self.default_category.as_str())
    }
}
