use std::collections::HashSet;
use std::sync::Arc;

use eframe::egui::{self, RichText, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::registry::{POSTS_CATEGORY_KEY, POSTS_CATEGORY_NAME};

use super::super::{GraphVariant, SearchMatchCache, ViewModel};

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

impl ViewModel {
    /// Categorized tree over the registry. Expand/collapse state lives on
    /// the model, not egui memory, so a variant toggle never resets it.
    /// Rows share the hover highlight with the graph and navigate on click.
    pub(in crate::app) fn draw_sidebar(&mut self, ui: &mut Ui) {
        ui.heading("Sections");
        ui.add_space(4.0);

        ui.text_edit_singleline(&mut self.search)
            .on_hover_text("Fuzzy-filter sections and posts; matches are ringed in the graph.");
        let search_matches = self.cached_search_matches();

        ui.add_space(4.0);
        ui.separator();

        let mut categories = self
            .registry
            .categories
            .iter()
            .map(|category| (category.key.clone(), category.name.clone()))
            .collect::<Vec<_>>();
        if self.variant == GraphVariant::WithPosts {
            categories.push((
                POSTS_CATEGORY_KEY.to_string(),
                POSTS_CATEGORY_NAME.to_string(),
            ));
        }

        let mut hovered_id = None;
        let mut clicked_index = None;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (key, name) in categories {
                    let is_expanded = self.expanded.contains(&key);
                    let marker = if is_expanded { "⏷" } else { "⏵" };
                    if ui
                        .selectable_label(false, format!("{marker} {name}"))
                        .clicked()
                    {
                        if is_expanded {
                            self.expanded.remove(&key);
                        } else {
                            self.expanded.insert(key.clone());
                        }
                    }
                    if !self.expanded.contains(&key) {
                        continue;
                    }

                    ui.indent(key.as_str(), |ui| {
                        for (index, node) in self.graph.nodes.iter().enumerate() {
                            if node.category != key {
                                continue;
                            }

                            let is_highlighted =
                                self.highlighted.as_deref() == Some(node.id.as_str());
                            let is_match = search_matches
                                .as_ref()
                                .is_some_and(|matches| matches.contains(&index));
                            let text = if is_match {
                                RichText::new(&node.label).strong()
                            } else {
                                RichText::new(&node.label)
                            };

                            let row = ui.selectable_label(is_highlighted, text);
                            if row.hovered() {
                                hovered_id = Some(node.id.clone());
                            }
                            if row.clicked() {
                                clicked_index = Some(index);
                            }
                        }
                    });
                }

                ui.add_space(8.0);
                ui.separator();
                self.draw_tuning_controls(ui);
            });

        if hovered_id.is_some() {
            self.sidebar_hover = hovered_id;
        }
        if let Some(index) = clicked_index {
            self.navigate_to(ui, index);
        }
    }

    /// Live scale factors for the four layout forces. Changing one perturbs
    /// the running layout; it never rebuilds the graph.
    fn draw_tuning_controls(&mut self, ui: &mut Ui) {
        ui.collapsing("Layout tuning", |ui| {
            let mut changed = false;
            changed |= ui
                .add(
                    egui::Slider::new(&mut self.tuning.repulsion_scale, 0.25..=2.5)
                        .text("Repulsion"),
                )
                .on_hover_text("How strongly nodes push away from each other.")
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut self.tuning.spring_scale, 0.25..=2.5).text("Springs"))
                .on_hover_text("How strongly linked sections pull toward their rest distance.")
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(&mut self.tuning.center_scale, 0.25..=2.5).text("Centering"),
                )
                .on_hover_text("Pull toward the canvas midpoint.")
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(&mut self.tuning.collision_scale, 0.25..=2.5)
                        .text("Collision"),
                )
                .on_hover_text("Extra separation between overlapping nodes.")
                .changed();

            // Nudge the cooled layout so the new factors take effect, then
            // let it settle again on its own.
            if changed {
                self.sim.reheat();
                self.sim.cool();
            }
        });
    }

    pub(in crate::app) fn cached_search_matches(&mut self) -> Option<Arc<HashSet<usize>>> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        if let Some(cached) = &self.search_match_cache
            && cached.graph_revision == self.graph_revision
            && cached.query == query
        {
            return Some(Arc::clone(&cached.matches));
        }

        let matcher = SkimMatcherV2::default();
        let matches = self
            .graph
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                let hit = fuzzy_match_score(&matcher, &node.label, query).is_some()
                    || fuzzy_match_score(&matcher, &node.title, query).is_some();
                hit.then_some(index)
            })
            .collect::<HashSet<_>>();
        let matches = Arc::new(matches);

        self.search_match_cache = Some(SearchMatchCache {
            query: query.to_owned(),
            graph_revision: self.graph_revision,
            matches: Arc::clone(&matches),
        });

        Some(matches)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use eframe::egui::vec2;

    use crate::registry::{Category, ContentLink, Post, Registry, Section};

    use super::super::super::{GraphVariant, ViewModel};

    fn section(id: &str, tags: &[&str]) -> Section {
        Section {
            id: id.to_string(),
            title: id.to_uppercase(),
            label: id.to_string(),
            summary: format!("{id} summary"),
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
        }
    }

    fn test_registry() -> Registry {
        Registry {
            sections: vec![
                section("alpha", &["travel"]),
                section("beta", &["tools", "travel"]),
                section("gamma", &[]),
            ],
            categories: vec![
                Category {
                    key: "main".to_string(),
                    name: "Main".to_string(),
                    sections: vec!["alpha".to_string(), "beta".to_string()],
                },
                Category {
                    key: "other".to_string(),
                    name: "Other".to_string(),
                    sections: vec!["gamma".to_string()],
                },
            ],
            default_category: "main".to_string(),
            links: vec![ContentLink {
                source: "alpha".to_string(),
                target: "beta".to_string(),
                reason: "related".to_string(),
                weight: 1.0,
            }],
            posts: vec![Post {
                id: "post-trip".to_string(),
                title: "A Trip".to_string(),
                label: "trip".to_string(),
                url: "https://example.dev/posts/trip".to_string(),
                tags: vec!["travel".to_string()],
            }],
        }
    }

    #[test]
    fn search_cache_reused_until_graph_revision_changes() {
        let mut model = ViewModel::new(test_registry(), GraphVariant::SectionsOnly);
        model.ensure_graph(vec2(800.0, 480.0));
        model.search = "trip".to_string();

        // "trip" is not a subsequence of any section name, only of the post
        // label, so the match set is observably different per variant.
        let first = model.cached_search_matches().unwrap();
        assert!(first.is_empty());

        let again = model.cached_search_matches().unwrap();
        assert!(Arc::ptr_eq(&first, &again));

        model.set_variant(GraphVariant::WithPosts);
        model.ensure_graph(vec2(800.0, 480.0));

        let rebuilt = model.cached_search_matches().unwrap();
        assert!(!Arc::ptr_eq(&first, &rebuilt));
        assert!(rebuilt.contains(&model.graph.index_by_id["post-trip"]));
    }

    #[test]
    fn search_cache_recomputes_when_query_changes() {
        let mut model = ViewModel::new(test_registry(), GraphVariant::SectionsOnly);
        model.ensure_graph(vec2(800.0, 480.0));

        model.search = "alpha".to_string();
        let alpha = model.cached_search_matches().unwrap();
        assert!(alpha.contains(&model.graph.index_by_id["alpha"]));

        model.search = "gamma".to_string();
        let gamma = model.cached_search_matches().unwrap();
        assert!(!Arc::ptr_eq(&alpha, &gamma));
        assert!(gamma.contains(&model.graph.index_by_id["gamma"]));

        model.search.clear();
        assert!(model.cached_search_matches().is_none());
    }
}
