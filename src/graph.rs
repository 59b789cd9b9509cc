//! Dependency graph export in DOT format
//!
//! [`Container::graph`](crate::Container::graph) snapshots the registered
//! entries and their declared dependency edges into a [`DependencyGraph`],
//! which renders to Graphviz DOT via [`to_dot`](DependencyGraph::to_dot).

use crate::lifecycle::Lifecycle;

/// One node of the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
	name: String,
	lifecycle: Lifecycle,
}

impl GraphNode {
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn lifecycle(&self) -> Lifecycle {
		self.lifecycle
	}
}

/// A dependency graph snapshot.
///
/// # Examples
///
/// ```
/// use wirebox::Lifecycle;
/// use wirebox::graph::DependencyGraph;
///
/// let mut graph = DependencyGraph::new();
/// graph.add_node("Database", Lifecycle::Singleton);
/// graph.add_node("UserService", Lifecycle::Transient);
/// graph.add_dependency("UserService", "Database");
///
/// let dot = graph.to_dot();
/// assert!(dot.contains("digraph"));
/// assert!(dot.contains("\"UserService\" -> \"Database\""));
/// ```
#[derive(Debug, Default)]
pub struct DependencyGraph {
	nodes: Vec<GraphNode>,
	edges: Vec<(String, String)>,
}

impl DependencyGraph {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a node; a second node with the same name replaces the first,
	/// keeping its position.
	pub fn add_node(&mut self, name: impl Into<String>, lifecycle: Lifecycle) {
		let name = name.into();
		match self.nodes.iter_mut().find(|node| node.name == name) {
			Some(node) => node.lifecycle = lifecycle,
			None => self.nodes.push(GraphNode { name, lifecycle }),
		}
	}

	/// Adds a dependency edge from `from` to `to`.
	pub fn add_dependency(&mut self, from: impl Into<String>, to: impl Into<String>) {
		self.edges.push((from.into(), to.into()));
	}

	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	pub fn edges(&self) -> &[(String, String)] {
		&self.edges
	}

	/// Renders DOT for Graphviz. Edges may reference undeclared nodes
	/// (unregistered dependencies); DOT renders those with default styling,
	/// which makes the broken edge easy to spot.
	pub fn to_dot(&self) -> String {
		let mut output = String::from("digraph DependencyGraph {\n");
		output.push_str("  rankdir=LR;\n");
		output.push_str("  node [shape=box, style=rounded];\n\n");

		for node in &self.nodes {
			let color = match node.lifecycle {
				Lifecycle::Singleton => "lightblue",
				Lifecycle::Transient => "lightyellow",
			};
			output.push_str(&format!(
				"  \"{}\" [label=\"{}\\n({})\", fillcolor={}, style=filled];\n",
				node.name, node.name, node.lifecycle, color
			));
		}

		output.push('\n');

		for (from, to) in &self.edges {
			output.push_str(&format!("  \"{}\" -> \"{}\";\n", from, to));
		}

		output.push_str("}\n");
		output
	}
}
