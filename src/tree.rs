use std::collections::HashSet;
use std::fmt::Write;

use crate::maven::coordinates::MavenCoordinates;
use crate::resolve::dependency_map::{DependencyMap, Resolution};

/// Annotation for a node whose children are not shown
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Marker {
    /// the node is its own ancestor
    Cycle,
    /// the node's subtree was shown further up
    AlreadyPrinted,
    NonResolvable,
    FailedToResolve,
}
impl Marker {
    pub const ALL: [Marker; 4] = [Marker::Cycle, Marker::AlreadyPrinted, Marker::NonResolvable, Marker::FailedToResolve];

    pub fn glyph(&self) -> &'static str {
        match self {
            Marker::Cycle => "🔁",
            Marker::AlreadyPrinted => "↩️",
            Marker::NonResolvable => "⛔",
            Marker::FailedToResolve => "💀",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Marker::Cycle => "Cyclic dependency",
            Marker::AlreadyPrinted => "Already printed",
            Marker::NonResolvable => "Non resolvable",
            Marker::FailedToResolve => "Failed to resolve",
        }
    }
}

pub fn legend() -> String {
    let mut result = String::from("\n🔣 Legend:\n");
    for marker in Marker::ALL {
        let _ = writeln!(result, "- {} {}", marker.glyph(), marker.description());
    }
    result
}

/// Renders a dependency map as a box-drawing tree.
///
/// Every subtree is expanded once only, at its first occurrence in depth-first order; later
///  occurrences are marked as already printed, and occurrences on their own ancestor path as
///  cycles. The rendering uses an explicit stack, so deep graphs do not exhaust the call stack.
pub struct TreePrinter<'a> {
    dependencies: &'a DependencyMap,
    legend: bool,
}

enum Step<'a> {
    Node {
        coordinates: &'a MavenCoordinates,
        /// `None` for the root
        is_last: Option<bool>,
        indent: String,
    },
    /// all children of this node have been rendered
    Leave(&'a MavenCoordinates),
}

impl <'a> TreePrinter<'a> {
    pub fn new(dependencies: &'a DependencyMap) -> TreePrinter<'a> {
        TreePrinter {
            dependencies,
            legend: true,
        }
    }

    pub fn with_legend(mut self, legend: bool) -> TreePrinter<'a> {
        self.legend = legend;
        self
    }

    pub fn render(&self, root: &'a MavenCoordinates) -> String {
        let mut out = String::new();

        let mut printed: HashSet<&MavenCoordinates> = HashSet::new();
        let mut ancestors: HashSet<&MavenCoordinates> = HashSet::new();

        let mut stack = vec![Step::Node { coordinates: root, is_last: None, indent: String::new() }];
        while let Some(step) = stack.pop() {
            let (coordinates, is_last, indent) = match step {
                Step::Node { coordinates, is_last, indent } => (coordinates, is_last, indent),
                Step::Leave(coordinates) => {
                    ancestors.remove(coordinates);
                    continue;
                }
            };

            let branch = match is_last {
                None => "",
                Some(true) => "└─ ",
                Some(false) => "├─ ",
            };
            let _ = write!(out, "{}{}{}", indent, branch, coordinates);

            let resolution = self.dependencies.get(coordinates);
            let marker = if ancestors.contains(coordinates) {
                Some(Marker::Cycle)
            }
            else if printed.contains(coordinates) {
                Some(Marker::AlreadyPrinted)
            }
            else if !coordinates.is_resolvable() {
                Some(Marker::NonResolvable)
            }
            else {
                match resolution {
                    Some(Resolution::Resolved(_)) => None,
                    Some(Resolution::Failed) | None => Some(Marker::FailedToResolve),
                }
            };

            if let Some(marker) = marker {
                let _ = writeln!(out, " {}", marker.glyph());
                continue;
            }
            out.push('\n');

            let children = resolution.and_then(Resolution::children).unwrap_or_default();

            printed.insert(coordinates);
            ancestors.insert(coordinates);
            stack.push(Step::Leave(coordinates));

            let child_indent = match is_last {
                None => indent,
                Some(true) => indent + "   ",
                Some(false) => indent + "│  ",
            };

            // reversed, so that the first child is popped first
            for (index, child) in children.iter().enumerate().rev() {
                stack.push(Step::Node {
                    coordinates: child,
                    is_last: Some(index == children.len() - 1),
                    indent: child_indent.clone(),
                });
            }
        }

        if self.legend {
            out.push_str(&legend());
        }
        out
    }
}
