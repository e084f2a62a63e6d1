use super::GridField;

/// Horizontal slices of one variable at several heights, ordered by `z`.
///
/// Levels without a height tag sort after every tagged level.
#[derive(Clone, Debug)]
pub struct FieldStack {
    levels: Vec<GridField>,
}

impl FieldStack {
    pub fn new(mut levels: Vec<GridField>) -> Self {
        levels.sort_by(|a, b| level_key(a).total_cmp(&level_key(b)));
        Self { levels }
    }

    pub fn levels(&self) -> &[GridField] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn heights(&self) -> Vec<Option<f64>> {
        self.levels.iter().map(|l| l.meta.z).collect()
    }
}

fn level_key(field: &GridField) -> f64 {
    field.meta.z.unwrap_or(f64::INFINITY)
}
