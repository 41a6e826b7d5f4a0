use std::borrow::Cow;
use std::fs;
use std::io;
use std::process::Command;

use dot::{self, Edges, GraphWalk, Id, LabelText, Labeller, Nodes, Style};

use crate::map::Board;
use crate::solver::a_star::SearchNode;

type Nd = usize;
type Ed = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Type {
    Queued,
    Duplicate,
    Expanded,
}

/// Search graph of one A* run, node indices are the same as in the search.
#[derive(Debug)]
pub(crate) struct Graph<'a> {
    board: &'a Board,
    nodes: Vec<(SearchNode<'a>, Type)>,
    edges: Vec<Ed>,
}

impl<'a> Graph<'a> {
    pub(crate) fn new(board: &'a Board) -> Self {
        Self {
            board,
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, node: SearchNode<'a>, prev: Option<usize>) {
        let node_index = self.nodes.len();
        self.nodes.push((node, Type::Queued));
        if let Some(prev_index) = prev {
            self.edges.push((prev_index, node_index));
        }
    }

    pub(crate) fn mark_duplicate(&mut self, index: usize) {
        self.nodes[index].1 = Type::Duplicate;
    }

    pub(crate) fn mark_expanded(&mut self, index: usize) {
        self.nodes[index].1 = Type::Expanded;
    }

    /// Writes `state-space.dot` and renders it to SVG if graphviz is installed.
    pub(crate) fn draw_states(&self) {
        if let Err(err) = self.try_draw_states() {
            warn!("Failed to draw the search graph: {}", err);
        }
    }

    fn try_draw_states(&self) -> io::Result<()> {
        let mut writer = Vec::new();
        dot::render(self, &mut writer)?;
        let s = String::from_utf8_lossy(&writer);
        let s = s.replace("digraph G {", "digraph G {\n    graph [fontname = \"hack\"];\n    node [fontname = \"hack\"];\n    edge [fontname = \"hack\"];");
        fs::write("state-space.dot", &s)?;

        let status = Command::new("dot")
            .args(&["-Tsvg", "-O", "state-space.dot"])
            .status()?;
        if !status.success() {
            return Err(io::Error::new(io::ErrorKind::Other, "dot failed"));
        }
        Ok(())
    }
}

impl<'a> GraphWalk<'a, Nd, Ed> for Graph<'a> {
    fn nodes(&'a self) -> Nodes<'a, Nd> {
        (0..self.nodes.len()).collect()
    }

    fn edges(&'a self) -> Edges<'a, Ed> {
        Cow::from(&self.edges)
    }

    fn source(&'a self, e: &Ed) -> Nd {
        e.0
    }

    fn target(&'a self, e: &Ed) -> Nd {
        e.1
    }
}

impl<'a> Labeller<'a, Nd, Ed> for Graph<'a> {
    fn graph_id(&'a self) -> Id<'a> {
        Id::new("G").unwrap()
    }

    fn node_id(&'a self, n: &Nd) -> Id<'a> {
        Id::new(format!("N{}", n)).unwrap()
    }

    fn node_label(&'a self, n: &Nd) -> LabelText<'a> {
        let node = self.nodes[*n].0;
        let push = node.push.map(|p| p.to_string()).unwrap_or_default();
        LabelText::EscStr(
            format!(
                "d: {}, h: {}\npush: {}\n{}",
                node.dist,
                node.h,
                push,
                self.board.xsb_with_state(node.state)
            )
            .into(),
        )
    }

    fn node_style(&'a self, n: &Nd) -> Style {
        if self.nodes[*n].1 == Type::Queued {
            Style::Solid
        } else {
            Style::Filled
        }
    }

    fn node_color(&'a self, n: &Nd) -> Option<LabelText<'a>> {
        Some(LabelText::LabelStr(
            match self.nodes[*n].1 {
                Type::Expanded => "red",
                Type::Duplicate => "gray",
                Type::Queued => return None,
            }
            .into(),
        ))
    }
}
