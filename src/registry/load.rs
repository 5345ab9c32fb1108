use std::collections::HashSet;

use anyhow::{Result, anyhow};

use super::model::{Category, ContentLink, POSTS_CATEGORY_KEY, Post, Registry, Section};
use super::parse::{RawDocument, normalize_id, normalize_tags, parse_document};

const PORTFOLIO_JSON: &str = include_str!("portfolio.json");

/// Build the registry from the document embedded at compile time.
///
/// Identity problems (duplicate ids, an undeclared default category) are
/// errors; links pointing at unknown ids are not, because the graph builder
/// drops those per variant.
pub fn load_registry() -> Result<Registry> {
    build_registry(parse_document(PORTFOLIO_JSON)?)
}

fn build_registry(raw: RawDocument) -> Result<Registry> {
    let mut seen_ids = HashSet::new();

    let mut sections = Vec::with_capacity(raw.sections.len());
    for raw_section in raw.sections {
        let id = normalize_id(&raw_section.id);
        if id.is_empty() {
            return Err(anyhow!("section with an empty id"));
        }
        if !seen_ids.insert(id.clone()) {
            return Err(anyhow!("duplicate section id {id}"));
        }
        sections.push(Section {
            id,
            title: raw_section.title,
            label: raw_section.label,
            summary: raw_section.summary,
            tags: normalize_tags(raw_section.tags),
        });
    }
    let section_ids = sections
        .iter()
        .map(|section| section.id.as_str())
        .collect::<HashSet<_>>();

    let mut posts = Vec::with_capacity(raw.posts.len());
    for raw_post in raw.posts {
        let id = normalize_id(&raw_post.id);
        if id.is_empty() {
            return Err(anyhow!("post with an empty id"));
        }
        if !seen_ids.insert(id.clone()) {
            return Err(anyhow!("post id {id} collides with another entry"));
        }
        posts.push(Post {
            id,
            title: raw_post.title,
            label: raw_post.label,
            url: raw_post.url,
            tags: normalize_tags(raw_post.tags),
        });
    }

    let mut categories = Vec::with_capacity(raw.categories.len());
    let mut category_keys = HashSet::new();
    for raw_category in raw.categories {
        let key = normalize_id(&raw_category.key);
        if key.is_empty() {
            return Err(anyhow!("category with an empty key"));
        }
        if key == POSTS_CATEGORY_KEY {
            return Err(anyhow!("category key {key} is reserved for posts"));
        }
        if !category_keys.insert(key.clone()) {
            return Err(anyhow!("duplicate category key {key}"));
        }

        let members = raw_category
            .sections
            .iter()
            .map(|id| normalize_id(id))
            .collect::<Vec<_>>();
        for member in &members {
            if !section_ids.contains(member.as_str()) {
                log::debug!("category {key} lists unknown section {member}");
            }
        }

        categories.push(Category {
            key,
            name: raw_category.name,
            sections: members,
        });
    }

    let default_category = normalize_id(&raw.default_category);
    if !category_keys.contains(&default_category) {
        return Err(anyhow!("default category {default_category} is not declared"));
    }

    let links = raw
        .links
        .into_iter()
        .map(|raw_link| ContentLink {
            source: normalize_id(&raw_link.source),
            target: normalize_id(&raw_link.target),
            reason: raw_link.reason,
            weight: if raw_link.weight.is_finite() && raw_link.weight > 0.0 {
                raw_link.weight
            } else {
                1.0
            },
        })
        .collect();

    Ok(Registry {
        sections,
        categories,
        default_category,
        links,
        posts,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{build_registry, load_registry, parse_document};

    fn registry_from(json: &str) -> anyhow::Result<super::Registry> {
        build_registry(parse_document(json)?)
    }

    #[test]
    fn embedded_document_loads() {
        let registry = load_registry().expect("embedded document is valid");
        assert_eq!(registry.section_count(), 9);
        assert_eq!(registry.categories.len(), 4);
        assert_eq!(registry.links.len(), 12);
        assert!(registry.post_count() >= 1);
        assert!(
            registry
                .categories
                .iter()
                .any(|category| category.key == registry.default_category)
        );
    }

    #[test]
    fn shipped_sections_stay_in_single_category() {
        let registry = load_registry().expect("embedded document is valid");
        let mut listed = HashSet::new();
        for category in &registry.categories {
            for id in &category.sections {
                assert!(
                    listed.insert(id.clone()),
                    "section {id} is listed under more than one category"
                );
            }
        }
    }

    #[test]
    fn shipped_links_reference_known_sections() {
        let registry = load_registry().expect("embedded document is valid");
        for link in &registry.links {
            assert!(registry.section(&link.source).is_some(), "{}", link.source);
            assert!(registry.section(&link.target).is_some(), "{}", link.target);
        }
    }

    #[test]
    fn duplicate_section_ids_rejected() {
        let result = registry_from(
            r#"{
                "defaultCategory": "main",
                "sections": [
                    { "id": "a", "title": "A", "label": "a" },
                    { "id": "a", "title": "Again", "label": "a2" }
                ],
                "categories": [{ "key": "main", "name": "Main", "sections": ["a"] }]
            }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn post_id_collision_rejected() {
        let result = registry_from(
            r#"{
                "defaultCategory": "main",
                "sections": [{ "id": "a", "title": "A", "label": "a" }],
                "categories": [{ "key": "main", "name": "Main", "sections": ["a"] }],
                "posts": [{ "id": "a", "title": "A post", "label": "a", "url": "https://example.dev/a" }]
            }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn unknown_default_category_rejected() {
        let result = registry_from(
            r#"{
                "defaultCategory": "missing",
                "sections": [{ "id": "a", "title": "A", "label": "a" }],
                "categories": [{ "key": "main", "name": "Main", "sections": ["a"] }]
            }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn reserved_category_key_rejected() {
        let result = registry_from(
            r#"{
                "defaultCategory": "writing",
                "sections": [{ "id": "a", "title": "A", "label": "a" }],
                "categories": [{ "key": "writing", "name": "Writing", "sections": ["a"] }]
            }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn link_weights_default_and_reject_nonsense() {
        let registry = registry_from(
            r#"{
                "defaultCategory": "main",
                "sections": [
                    { "id": "a", "title": "A", "label": "a" },
                    { "id": "b", "title": "B", "label": "b" }
                ],
                "categories": [{ "key": "main", "name": "Main", "sections": ["a", "b"] }],
                "links": [
                    { "source": "a", "target": "b" },
                    { "source": "b", "target": "a", "weight": -3.0 }
                ]
            }"#,
        )
        .expect("valid document");
        assert_eq!(registry.links[0].weight, 1.0);
        assert_eq!(registry.links[1].weight, 1.0);
    }

    #[test]
    fn tags_are_normalized() {
        let registry = registry_from(
            r#"{
                "defaultCategory": "main",
                "sections": [
                    { "id": "a", "title": "A", "label": "a", "tags": [" Books ", "books", "Travel"] }
                ],
                "categories": [{ "key": "main", "name": "Main", "sections": ["a"] }]
            }"#,
        )
        .expect("valid document");
        assert_eq!(registry.sections[0].tags, vec!["books", "travel"]);
    }
}
