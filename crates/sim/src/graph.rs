//! Pathway graphs.
//!
//! A final state laid out as nodes and edges for a graph renderer. Proteins
//! form a chain in synthesis order; environment variables and viruses hang
//! off a root protein chosen by [`GraphConfig`].

use crate::simulation::{GraphConfig, SimulationState};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
}

/// Node/edge list. Serializes as `{"nodes":[..],"edges":[..]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathwayGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

fn protein_id(index: usize) -> String {
    format!("Protein_{index}")
}

impl PathwayGraph {
    /// Lay out `state`.
    ///
    /// Root edges are only emitted when the configured root protein exists.
    pub fn from_state(state: &SimulationState, config: &GraphConfig) -> Self {
        let mut graph = Self::default();

        for (i, protein) in state.proteins.iter().enumerate() {
            graph.add_node(protein_id(i), protein.clone());
            if i > 0 {
                graph.add_edge(protein_id(i - 1), protein_id(i));
            }
        }

        let root = config
            .root()
            .filter(|&idx| state.root_protein(idx).is_some())
            .map(protein_id);
        if root.is_none() && !state.proteins.is_empty() && config.connect_root {
            log::warn!(
                "Root protein index {} is out of range for {} protein(s); no root edges",
                config.root_node_index,
                state.proteins.len()
            );
        }

        for (key, value) in &state.environment {
            let id = format!("Env_{key}");
            graph.add_node(id.clone(), format!("{key}: {value}"));
            if let Some(root) = &root {
                graph.add_edge(id, root.clone());
            }
        }

        for (i, virus) in state.viruses.iter().enumerate() {
            let id = format!("Virus_{i}");
            graph.add_node(id.clone(), virus.clone());
            if let Some(root) = &root {
                graph.add_edge(id, root.clone());
            }
        }

        graph
    }

    fn add_node(&mut self, id: String, label: String) {
        self.nodes.push(GraphNode { id, label });
    }

    fn add_edge(&mut self, source: String, target: String) {
        self.edges.push(GraphEdge { source, target });
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Edges that end at `id`.
    pub fn edges_into<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a GraphEdge> + 'a {
        self.edges.iter().filter(move |e| e.target == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{Environment, Scalar};

    fn state() -> SimulationState {
        let mut environment = Environment::new();
        environment.insert("TEMP".to_string(), Scalar::from("HIGH"));
        SimulationState {
            proteins: vec!["Protein_X".to_string(), "Synthesis".to_string()],
            environment,
            viruses: vec!["Virus_Addition".to_string()],
        }
    }

    #[test]
    fn test_chain_and_root_edges() {
        let graph = PathwayGraph::from_state(&state(), &GraphConfig::default());

        assert_eq!(graph.nodes.len(), 4);
        assert_eq!(graph.node("Protein_1").unwrap().label, "Synthesis");
        assert_eq!(graph.node("Env_TEMP").unwrap().label, "TEMP: HIGH");
        assert_eq!(graph.node("Virus_0").unwrap().label, "Virus_Addition");

        assert_eq!(
            graph.edges[0],
            GraphEdge {
                source: "Protein_0".to_string(),
                target: "Protein_1".to_string()
            }
        );
        let into_root: Vec<_> = graph.edges_into("Protein_0").map(|e| e.source.as_str()).collect();
        assert_eq!(into_root, vec!["Env_TEMP", "Virus_0"]);
    }

    #[test]
    fn test_custom_root_index() {
        let config = GraphConfig {
            root_node_index: 1,
            connect_root: true,
        };
        let graph = PathwayGraph::from_state(&state(), &config);
        assert_eq!(graph.edges_into("Protein_1").count(), 3);
        assert_eq!(graph.edges_into("Protein_0").count(), 0);
    }

    #[test]
    fn test_no_root_edges_without_root() {
        let mut empty = state();
        empty.proteins.clear();
        let graph = PathwayGraph::from_state(&empty, &GraphConfig::default());
        assert_eq!(graph.nodes.len(), 2);
        assert!(graph.edges.is_empty());

        let out_of_range = GraphConfig {
            root_node_index: 9,
            connect_root: true,
        };
        let graph = PathwayGraph::from_state(&state(), &out_of_range);
        assert_eq!(graph.edges.len(), 1);

        let disabled = GraphConfig {
            root_node_index: 0,
            connect_root: false,
        };
        let graph = PathwayGraph::from_state(&state(), &disabled);
        assert_eq!(graph.edges.len(), 1);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&PathwayGraph::from_state(&state(), &GraphConfig::default()))
            .unwrap();
        assert!(json.starts_with(r#"{"nodes":[{"id":"Protein_0","label":"Protein_X"}"#));
        assert!(json.contains(r#""edges":[{"source":"Protein_0","target":"Protein_1"}"#));
    }
}
