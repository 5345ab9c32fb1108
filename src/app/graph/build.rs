use std::collections::{HashMap, HashSet};

use crate::registry::{POSTS_CATEGORY_KEY, Registry};

use super::super::render_utils::node_radius;
use super::super::{EdgeKind, GraphEdge, GraphNode, GraphVariant, NodeKind, SectionGraph};

/// Derive the render graph for a variant. Node order follows the registry
/// (sections, then posts); edges keep authored order after deduplication.
/// Links whose endpoints are not in this variant's node set are dropped.
pub(in crate::app) fn build_section_graph(
    registry: &Registry,
    variant: GraphVariant,
) -> SectionGraph {
    let with_posts = variant == GraphVariant::WithPosts;

    let mut nodes = Vec::with_capacity(
        registry.section_count() + if with_posts { registry.post_count() } else { 0 },
    );
    for section in &registry.sections {
        nodes.push(GraphNode {
            id: section.id.clone(),
            title: section.title.clone(),
            label: section.label.clone(),
            category: registry.category_for(&section.id).to_string(),
            kind: NodeKind::Section,
            url: None,
            connection_count: 0,
            radius: 0.0,
        });
    }
    if with_posts {
        for post in &registry.posts {
            nodes.push(GraphNode {
                id: post.id.clone(),
                title: post.title.clone(),
                label: post.label.clone(),
                category: POSTS_CATEGORY_KEY.to_string(),
                kind: NodeKind::Post,
                url: Some(post.url.clone()),
                connection_count: 0,
                radius: 0.0,
            });
        }
    }

    let mut index_by_id = HashMap::with_capacity(nodes.len());
    for (index, node) in nodes.iter().enumerate() {
        index_by_id.insert(node.id.clone(), index);
    }

    // Edges are unordered pairs; the first authored occurrence wins.
    let mut edges: Vec<GraphEdge> = Vec::new();
    let mut seen_pairs: HashSet<(usize, usize)> = HashSet::new();

    for link in &registry.links {
        let (Some(&source), Some(&target)) =
            (index_by_id.get(&link.source), index_by_id.get(&link.target))
        else {
            log::debug!(
                "dropping link {} -> {}: unknown endpoint",
                link.source,
                link.target
            );
            continue;
        };
        if source == target {
            log::debug!("dropping self link on {}", link.source);
            continue;
        }
        if !seen_pairs.insert(pair_key(source, target)) {
            continue;
        }

        edges.push(GraphEdge {
            source,
            target,
            kind: EdgeKind::Content,
            weight: link.weight,
            reason: (!link.reason.is_empty()).then(|| link.reason.clone()),
        });
    }

    if with_posts {
        for post in &registry.posts {
            let Some(&post_index) = index_by_id.get(&post.id) else {
                continue;
            };
            for section in &registry.sections {
                if !shares_tag(&post.tags, &section.tags) {
                    continue;
                }
                let Some(&section_index) = index_by_id.get(&section.id) else {
                    continue;
                };
                if !seen_pairs.insert(pair_key(post_index, section_index)) {
                    continue;
                }

                edges.push(GraphEdge {
                    source: post_index,
                    target: section_index,
                    kind: EdgeKind::Tag,
                    weight: 1.0,
                    reason: None,
                });
            }
        }
    }

    let mut adjacent = vec![Vec::new(); nodes.len()];
    for edge in &edges {
        adjacent[edge.source].push(edge.target);
        adjacent[edge.target].push(edge.source);
    }

    for (index, node) in nodes.iter_mut().enumerate() {
        node.connection_count = adjacent[index].len();
        node.radius = node_radius(node.connection_count);
    }

    // Hubs draw last so they sit on top of their spokes.
    let mut draw_order = (0..nodes.len()).collect::<Vec<_>>();
    draw_order.sort_by_key(|&index| nodes[index].connection_count);

    SectionGraph {
        nodes,
        edges,
        index_by_id,
        adjacent,
        draw_order,
    }
}

fn pair_key(a: usize, b: usize) -> (usize, usize) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Tag lists arrive normalized and sorted from the registry loader.
fn shares_tag(post_tags: &[String], section_tags: &[String]) -> bool {
    post_tags
        .iter()
        .any(|tag| section_tags.binary_search(tag).is_ok())
}
