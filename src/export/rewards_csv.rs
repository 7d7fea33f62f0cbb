use std::{hash::Hash, path::Path};

use serde::Serialize;

use crate::{
    Result,
    ports::EpisodeSummary,
    q_learning::ValueTable,
    types::Action,
};

/// One row of an exported value table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueRecord<'a, S> {
    pub state: &'a S,
    pub action: Action,
    pub value: f64,
}

/// Write `episode,total_reward,steps,epsilon` rows, one per episode
pub fn export_learning_curve<P: AsRef<Path>>(summaries: &[EpisodeSummary], path: P) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for summary in summaries {
        writer.serialize(summary)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write every stored Q-value as `state,action,value`, sorted by state then action
pub fn export_value_table<S, P>(table: &ValueTable<S>, path: P) -> Result<usize>
where
    S: Eq + Hash + Ord + Serialize,
    P: AsRef<Path>,
{
    let mut records: Vec<ValueRecord<'_, S>> = table
        .iter()
        .map(|(state, action, value)| ValueRecord {
            state,
            action,
            value,
        })
        .collect();
    records.sort_by(|a, b| a.state.cmp(b.state).then(a.action.cmp(&b.action)));

    let mut writer = csv::Writer::from_path(path)?;
    for record in &records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envs::ChainState;

    #[test]
    fn test_learning_curve_csv() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let summaries = [
            EpisodeSummary {
                episode: 0,
                total_reward: -1.0,
                steps: 2,
                epsilon: 0.5,
            },
            EpisodeSummary {
                episode: 1,
                total_reward: 1.0,
                steps: 1,
                epsilon: 0.25,
            },
        ];
        export_learning_curve(&summaries, file.path()).unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "episode,total_reward,steps,epsilon");
        assert_eq!(lines[1], "0,-1.0,2,0.5");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_value_table_csv_is_sorted() {
        let mut table = ValueTable::new();
        table.set_value(ChainState::B, 0, 0.0);
        table.set_value(ChainState::A, 1, -0.5);
        table.set_value(ChainState::A, 0, 0.75);

        let file = tempfile::NamedTempFile::new().unwrap();
        let written = export_value_table(&table, file.path()).unwrap();
        assert_eq!(written, 3);

        let contents = std::fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "state,action,value");
        assert_eq!(lines[1], "A,0,0.75");
        assert_eq!(lines[2], "A,1,-0.5");
        assert_eq!(lines[3], "B,0,0.0");
    }
}
