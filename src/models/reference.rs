use serde::Serialize;
use std::fmt;

/// The three lookup categories loaded at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReferenceKind {
    Operator,
    Machine,
    Item,
}

impl ReferenceKind {
    /// Column that must exist in the source table.
    pub fn column(&self) -> &'static str {
        match self {
            ReferenceKind::Operator => "Operator",
            ReferenceKind::Machine => "Machine",
            ReferenceKind::Item => "Item",
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Ordered set of selectable values. First occurrence wins, blanks are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceList {
    kind: ReferenceKind,
    values: Vec<String>,
}

impl ReferenceList {
    pub fn new<I, S>(kind: ReferenceKind, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for v in values {
            let v = v.into().trim().to_string();
            if !v.is_empty() && !out.contains(&v) {
                out.push(v);
            }
        }
        Self { kind, values: out }
    }

    pub fn kind(&self) -> ReferenceKind {
        self.kind
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Process-wide lookup data. Built once, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct ReferenceData {
    pub operators: ReferenceList,
    pub machines: ReferenceList,
    pub items: ReferenceList,
}

impl ReferenceData {
    pub fn new(operators: ReferenceList, machines: ReferenceList, items: ReferenceList) -> Self {
        Self {
            operators,
            machines,
            items,
        }
    }

    pub fn list(&self, kind: ReferenceKind) -> &ReferenceList {
        match kind {
            ReferenceKind::Operator => &self.operators,
            ReferenceKind::Machine => &self.machines,
            ReferenceKind::Item => &self.items,
        }
    }
}
