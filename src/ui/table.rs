use crate::record::LocationRecord;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct TableRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "Id")]
    id: i64,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Note")]
    note: String,
    #[tabled(rename = "GPS")]
    gps: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Time")]
    time: String,
}

impl From<&LocationRecord> for RecordRow {
    fn from(record: &LocationRecord) -> Self {
        Self {
            id: record.id,
            label: record.label.clone(),
            note: record.note.clone(),
            gps: record
                .coordinates()
                .map(|(lat, lon)| format!("{}, {}", lat, lon))
                .unwrap_or_else(|| "-".to_string()),
            date: record.date.clone().unwrap_or_else(|| "-".to_string()),
            time: record.time.clone().unwrap_or_else(|| "-".to_string()),
        }
    }
}

#[derive(Default)]
struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    fn new() -> Self {
        Self::default()
    }

    fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

pub fn stats_table(stats: &[(&str, &str)]) -> String {
    let mut builder = TableBuilder::new();
    for (label, value) in stats {
        builder.add_row(label, value);
    }
    builder.build()
}

/// Compact one-row-per-record view of a snapshot
pub fn records_table(records: &[LocationRecord]) -> String {
    if records.is_empty() {
        return String::new();
    }
    let rows: Vec<RecordRow> = records.iter().map(RecordRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}
