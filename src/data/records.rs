use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pillar {
    pub id: String,
    #[serde(default, alias = "title")]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    #[serde(default, alias = "name")]
    pub title: String,
    #[serde(default)]
    pub pillar_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    #[serde(default, alias = "name")]
    pub title: String,
    #[serde(default)]
    pub goal_id: Option<String>,
    #[serde(default)]
    pub pillar_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub goal_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    #[serde(default, alias = "title")]
    pub name: String,
    #[serde(default)]
    pub goal_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Journal {
    pub id: String,
    #[serde(default, alias = "date")]
    pub entry_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Knowledge {
    pub id: String,
    #[serde(default, alias = "name")]
    pub title: String,
    #[serde(default)]
    pub goal_id: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CoreValue {
    pub id: String,
    #[serde(default, alias = "title")]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    Direct,
    #[default]
    Related,
}

impl ConnectionType {
    pub const ALL: [Self; 2] = [Self::Related, Self::Direct];

    pub fn label(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Related => "related",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub id: String,
    pub source_id: String,
    pub target_id: String,
    pub connection_type: ConnectionType,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewConnection {
    pub source_id: String,
    pub target_id: String,
    pub connection_type: ConnectionType,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub pillars: Vec<Pillar>,
    pub goals: Vec<Goal>,
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
    pub habits: Vec<Habit>,
    pub journals: Vec<Journal>,
    pub knowledge: Vec<Knowledge>,
    pub values: Vec<CoreValue>,
    pub connections: Vec<ConnectionRecord>,
}

impl Snapshot {
    pub fn record_count(&self) -> usize {
        self.pillars.len()
            + self.goals.len()
            + self.projects.len()
            + self.tasks.len()
            + self.habits.len()
            + self.journals.len()
            + self.knowledge.len()
            + self.values.len()
    }
}

/// Full source record carried by a graph node for the detail panel.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Pillar(Pillar),
    Goal(Goal),
    Project(Project),
    Task(Task),
    Habit(Habit),
    Journal(Journal),
    Knowledge(Knowledge),
    Value(CoreValue),
}

impl Record {
    pub fn fields(&self) -> Vec<(String, String)> {
        let Ok(Value::Object(object)) = serde_json::to_value(self) else {
            return Vec::new();
        };

        object
            .into_iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| {
                let text = match value {
                    Value::String(text) => text,
                    other => other.to_string(),
                };
                (key, text)
            })
            .collect()
    }
}
