use std::collections::HashSet;

use crate::data::{ConnectionType, Record, Snapshot};
use crate::util::{format_journal_date, truncate_chars};

use super::{Edge, Graph, Node, NodeKind, node_id};

const TASK_LABEL_CHARS: usize = 30;

fn journal_label(entry_date: Option<&str>) -> String {
    match entry_date {
        Some(date) if !date.trim().is_empty() => format!("Journal - {}", format_journal_date(date)),
        _ => "Journal - undated".to_string(),
    }
}

fn collect_nodes(snapshot: &Snapshot) -> Vec<Node> {
    let mut nodes = Vec::with_capacity(snapshot.record_count());

    for pillar in &snapshot.pillars {
        nodes.push(Node::new(
            NodeKind::Pillar,
            &pillar.id,
            pillar.name.clone(),
            Record::Pillar(pillar.clone()),
        ));
    }
    for goal in &snapshot.goals {
        nodes.push(Node::new(
            NodeKind::Goal,
            &goal.id,
            goal.title.clone(),
            Record::Goal(goal.clone()),
        ));
    }
    for project in &snapshot.projects {
        nodes.push(Node::new(
            NodeKind::Project,
            &project.id,
            project.title.clone(),
            Record::Project(project.clone()),
        ));
    }
    for task in &snapshot.tasks {
        nodes.push(Node::new(
            NodeKind::Task,
            &task.id,
            truncate_chars(&task.description, TASK_LABEL_CHARS),
            Record::Task(task.clone()),
        ));
    }
    for habit in &snapshot.habits {
        nodes.push(Node::new(
            NodeKind::Habit,
            &habit.id,
            habit.name.clone(),
            Record::Habit(habit.clone()),
        ));
    }
    for journal in &snapshot.journals {
        nodes.push(Node::new(
            NodeKind::Journal,
            &journal.id,
            journal_label(journal.entry_date.as_deref()),
            Record::Journal(journal.clone()),
        ));
    }
    for note in &snapshot.knowledge {
        nodes.push(Node::new(
            NodeKind::Knowledge,
            &note.id,
            note.title.clone(),
            Record::Knowledge(note.clone()),
        ));
    }
    for value in &snapshot.values {
        nodes.push(Node::new(
            NodeKind::Value,
            &value.id,
            value.name.clone(),
            Record::Value(value.clone()),
        ));
    }

    nodes
}

struct DirectEdges<'a> {
    known: HashSet<&'a str>,
    edges: Vec<Edge>,
}

impl DirectEdges<'_> {
    fn link(
        &mut self,
        parent: NodeKind,
        parent_record: Option<&str>,
        child: NodeKind,
        child_record: &str,
    ) {
        let Some(parent_record) = parent_record.filter(|id| !id.is_empty()) else {
            return;
        };

        let source = node_id(parent, parent_record);
        if !self.known.contains(source.as_str()) {
            return;
        }

        let target = node_id(child, child_record);
        self.edges.push(Edge {
            id: format!("{source}->{target}"),
            source,
            target,
            kind: ConnectionType::Direct,
        });
    }
}

fn collect_direct_edges(snapshot: &Snapshot, nodes: &[Node]) -> Vec<Edge> {
    let mut direct = DirectEdges {
        known: nodes.iter().map(|node| node.id.as_str()).collect(),
        edges: Vec::new(),
    };

    for goal in &snapshot.goals {
        direct.link(
            NodeKind::Pillar,
            goal.pillar_id.as_deref(),
            NodeKind::Goal,
            &goal.id,
        );
    }
    for project in &snapshot.projects {
        direct.link(
            NodeKind::Goal,
            project.goal_id.as_deref(),
            NodeKind::Project,
            &project.id,
        );
        direct.link(
            NodeKind::Pillar,
            project.pillar_id.as_deref(),
            NodeKind::Project,
            &project.id,
        );
    }
    for task in &snapshot.tasks {
        direct.link(
            NodeKind::Project,
            task.project_id.as_deref(),
            NodeKind::Task,
            &task.id,
        );
        direct.link(
            NodeKind::Goal,
            task.goal_id.as_deref(),
            NodeKind::Task,
            &task.id,
        );
    }
    for habit in &snapshot.habits {
        direct.link(
            NodeKind::Goal,
            habit.goal_id.as_deref(),
            NodeKind::Habit,
            &habit.id,
        );
    }
    for note in &snapshot.knowledge {
        direct.link(
            NodeKind::Goal,
            note.goal_id.as_deref(),
            NodeKind::Knowledge,
            &note.id,
        );
        direct.link(
            NodeKind::Project,
            note.project_id.as_deref(),
            NodeKind::Knowledge,
            &note.id,
        );
    }

    direct.edges
}

/// Builds a fresh graph from the domain collections and stored connections.
///
/// Nodes come back without positions; callers that want to keep a previous
/// arrangement go through `Graph::adopt_positions`.
pub fn build_graph(snapshot: &Snapshot) -> Graph {
    let nodes = collect_nodes(snapshot);
    let mut edges = collect_direct_edges(snapshot, &nodes);

    edges.extend(snapshot.connections.iter().map(|connection| Edge {
        id: format!("connection-{}", connection.id),
        source: connection.source_id.clone(),
        target: connection.target_id.clone(),
        kind: connection.connection_type,
    }));

    Graph::new(nodes, edges)
}
