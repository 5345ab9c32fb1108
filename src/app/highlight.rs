use super::{EdgeKind, GraphEdge, SectionGraph};

/// Visual emphasis for one node under the current shared highlight. Pure
/// function of (graph, highlighted), so hovering and clearing always round
/// back to the exact neutral state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct NodeEmphasis {
    pub(super) opacity: f32,
    pub(super) label_opacity: f32,
    pub(super) radius_scale: f32,
    pub(super) glow: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct EdgeEmphasis {
    pub(super) opacity: f32,
    pub(super) width: f32,
}

pub(super) fn node_emphasis(
    graph: &SectionGraph,
    highlighted: Option<usize>,
    index: usize,
) -> NodeEmphasis {
    let neutral_glow = if graph.nodes[index].connection_count >= 3 {
        0.35
    } else {
        0.0
    };

    match highlighted {
        None => NodeEmphasis {
            opacity: 1.0,
            label_opacity: 1.0,
            radius_scale: 1.0,
            glow: neutral_glow,
        },
        Some(target) if target == index => NodeEmphasis {
            opacity: 1.0,
            label_opacity: 1.0,
            radius_scale: 1.4,
            glow: 1.0,
        },
        Some(target) if graph.connected(target, index) => NodeEmphasis {
            opacity: 1.0,
            label_opacity: 1.0,
            radius_scale: 1.0,
            glow: neutral_glow,
        },
        Some(_) => NodeEmphasis {
            opacity: 0.25,
            label_opacity: 0.15,
            radius_scale: 1.0,
            glow: 0.0,
        },
    }
}

pub(super) fn edge_emphasis(
    highlighted: Option<usize>,
    edge: &GraphEdge,
) -> EdgeEmphasis {
    let neutral = match edge.kind {
        EdgeKind::Content => EdgeEmphasis {
            opacity: 0.6,
            width: 2.0,
        },
        EdgeKind::Tag => EdgeEmphasis {
            opacity: 0.25,
            width: 1.0,
        },
    };

    match highlighted {
        None => neutral,
        Some(target) if edge.source == target || edge.target == target => EdgeEmphasis {
            opacity: 1.0,
            width: neutral.width + 1.0,
        },
        Some(_) => EdgeEmphasis {
            opacity: 0.08,
            width: neutral.width,
        },
    }
}

#[cfg(test)]
mod tests {
    use crate::registry::{Category, ContentLink, Registry, Section};

    use super::super::{GraphVariant, build_section_graph};
    use super::{edge_emphasis, node_emphasis};

    fn triangle_graph() -> super::SectionGraph {
        let ids = ["hero", "about", "work"];
        let registry = Registry {
            sections: ids
                .iter()
                .map(|id| Section {
                    id: id.to_string(),
                    title: id.to_uppercase(),
                    label: id.to_string(),
                    summary: String::new(),
                    tags: Vec::new(),
                })
                .collect(),
            categories: vec![Category {
                key: "main".to_string(),
                name: "Main".to_string(),
                sections: ids.iter().map(|id| id.to_string()).collect(),
            }],
            default_category: "main".to_string(),
            links: vec![
                ContentLink {
                    source: "hero".to_string(),
                    target: "about".to_string(),
                    reason: String::new(),
                    weight: 1.0,
                },
                ContentLink {
                    source: "hero".to_string(),
                    target: "work".to_string(),
                    reason: String::new(),
                    weight: 1.0,
                },
            ],
            posts: Vec::new(),
        };
        build_section_graph(&registry, GraphVariant::SectionsOnly)
    }

    #[test]
    fn highlight_enlarges_target_and_dims_strangers() {
        let graph = triangle_graph();
        let hero = graph.index_by_id["hero"];
        let about = graph.index_by_id["about"];
        let work = graph.index_by_id["work"];

        let target = node_emphasis(&graph, Some(about), about);
        assert_eq!(target.radius_scale, 1.4);
        assert_eq!(target.glow, 1.0);

        // about connects only to hero; work is a stranger to it.
        let neighbor = node_emphasis(&graph, Some(about), hero);
        assert_eq!(neighbor.opacity, 1.0);
        let stranger = node_emphasis(&graph, Some(about), work);
        assert_eq!(stranger.opacity, 0.25);
        assert_eq!(stranger.label_opacity, 0.15);
    }

    #[test]
    fn clearing_highlight_restores_neutral_exactly() {
        let graph = triangle_graph();
        let hero = graph.index_by_id["hero"];

        let before = (0..graph.nodes.len())
            .map(|index| node_emphasis(&graph, None, index))
            .collect::<Vec<_>>();
        let during = node_emphasis(&graph, Some(hero), hero);
        assert_ne!(before[hero], during);

        let after = (0..graph.nodes.len())
            .map(|index| node_emphasis(&graph, None, index))
            .collect::<Vec<_>>();
        assert_eq!(before, after);

        let edges_before = graph
            .edges
            .iter()
            .map(|edge| edge_emphasis(None, edge))
            .collect::<Vec<_>>();
        assert!(
            graph
                .edges
                .iter()
                .any(|edge| edge_emphasis(Some(hero), edge) != edge_emphasis(None, edge))
        );
        let edges_after = graph
            .edges
            .iter()
            .map(|edge| edge_emphasis(None, edge))
            .collect::<Vec<_>>();
        assert_eq!(edges_before, edges_after);
    }

    #[test]
    fn incident_edges_brighten_and_widen() {
        let graph = triangle_graph();
        let about = graph.index_by_id["about"];

        let mut saw_incident = false;
        let mut saw_faded = false;
        for edge in &graph.edges {
            let emphasis = edge_emphasis(Some(about), edge);
            if edge.source == about || edge.target == about {
                assert_eq!(emphasis.opacity, 1.0);
                assert_eq!(emphasis.width, 3.0);
                saw_incident = true;
            } else {
                assert_eq!(emphasis.opacity, 0.08);
                saw_faded = true;
            }
        }
        assert!(saw_incident && saw_faded);
    }

    #[test]
    fn hubs_carry_a_soft_neutral_glow() {
        let mut graph = triangle_graph();
        let hero = graph.index_by_id["hero"];
        let about = graph.index_by_id["about"];

        // hero has 2 connections in the fixture, below the glow threshold.
        assert_eq!(node_emphasis(&graph, None, hero).glow, 0.0);

        graph.nodes[hero].connection_count = 3;
        assert_eq!(node_emphasis(&graph, None, hero).glow, 0.35);
        assert_eq!(node_emphasis(&graph, None, about).glow, 0.0);
    }
}
