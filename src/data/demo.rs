use super::records::{
    ConnectionRecord, ConnectionType, CoreValue, Goal, Habit, Journal, Knowledge, Pillar, Project,
    Snapshot, Task,
};

fn some(id: &str) -> Option<String> {
    Some(id.to_string())
}

pub fn demo_snapshot() -> Snapshot {
    Snapshot {
        pillars: vec![
            Pillar {
                id: "health".into(),
                name: "Health".into(),
                ..Default::default()
            },
            Pillar {
                id: "craft".into(),
                name: "Craft".into(),
                ..Default::default()
            },
            Pillar {
                id: "family".into(),
                name: "Family".into(),
                ..Default::default()
            },
        ],
        goals: vec![
            Goal {
                id: "marathon".into(),
                title: "Finish a marathon".into(),
                pillar_id: some("health"),
                ..Default::default()
            },
            Goal {
                id: "book".into(),
                title: "Publish a short book".into(),
                pillar_id: some("craft"),
                ..Default::default()
            },
            Goal {
                id: "dinners".into(),
                title: "Weekly family dinners".into(),
                pillar_id: some("family"),
                ..Default::default()
            },
        ],
        projects: vec![
            Project {
                id: "training".into(),
                title: "16 week training block".into(),
                goal_id: some("marathon"),
                pillar_id: some("health"),
                ..Default::default()
            },
            Project {
                id: "draft".into(),
                title: "First draft".into(),
                goal_id: some("book"),
                ..Default::default()
            },
        ],
        tasks: vec![
            Task {
                id: "shoes".into(),
                description: "Buy new running shoes before the long runs start".into(),
                project_id: some("training"),
                goal_id: some("marathon"),
                ..Default::default()
            },
            Task {
                id: "outline".into(),
                description: "Outline chapters".into(),
                project_id: some("draft"),
                ..Default::default()
            },
        ],
        habits: vec![
            Habit {
                id: "morning-run".into(),
                name: "Morning run".into(),
                goal_id: some("marathon"),
                ..Default::default()
            },
            Habit {
                id: "pages".into(),
                name: "Write 500 words".into(),
                goal_id: some("book"),
                ..Default::default()
            },
        ],
        journals: vec![Journal {
            id: "j-2025-03-02".into(),
            entry_date: some("2025-03-02"),
            ..Default::default()
        }],
        knowledge: vec![Knowledge {
            id: "periodization".into(),
            title: "Notes on periodization".into(),
            goal_id: some("marathon"),
            project_id: some("training"),
            ..Default::default()
        }],
        values: vec![
            CoreValue {
                id: "curiosity".into(),
                name: "Curiosity".into(),
                ..Default::default()
            },
            CoreValue {
                id: "presence".into(),
                name: "Presence".into(),
                ..Default::default()
            },
        ],
        connections: vec![
            ConnectionRecord {
                id: "demo-1".into(),
                source_id: "value-presence".into(),
                target_id: "goal-dinners".into(),
                connection_type: ConnectionType::Related,
            },
            ConnectionRecord {
                id: "demo-2".into(),
                source_id: "journal-j-2025-03-02".into(),
                target_id: "habit-morning-run".into(),
                connection_type: ConnectionType::Related,
            },
        ],
    }
}
