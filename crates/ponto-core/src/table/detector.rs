//! Line grouping, cell merging and column clustering.

use std::cmp::Ordering;

use tracing::debug;

use super::{DetectedTable, LineCell, TextLine};
use crate::models::config::TableConfig;
use crate::pdf::TextFragment;

/// Gap (in ems) above which merged fragments are separated by a space.
const WORD_GAP: f32 = 0.15;

/// Finds tables in the text fragments of a page.
pub struct TableDetector {
    config: TableConfig,
}

impl TableDetector {
    /// Create a detector with the given thresholds.
    pub fn new(config: TableConfig) -> Self {
        Self { config }
    }

    /// Detect all tables on a page.
    pub fn detect(&self, page: u32, fragments: &[TextFragment]) -> Vec<DetectedTable> {
        let lines = self.group_lines(fragments);

        let mut tables = Vec::new();
        let mut run: Vec<&TextLine> = Vec::new();

        for line in &lines {
            if line.cells.len() >= self.config.min_columns {
                run.push(line);
                continue;
            }
            if let Some(table) = self.build_table(page, &run) {
                tables.push(table);
            }
            run.clear();
        }
        if let Some(table) = self.build_table(page, &run) {
            tables.push(table);
        }

        debug!(
            "Page {}: {} lines, {} tables",
            page,
            lines.len(),
            tables.len()
        );
        tables
    }

    /// Group fragments into lines, top to bottom, and merge adjacent
    /// fragments into cells.
    pub fn group_lines(&self, fragments: &[TextFragment]) -> Vec<TextLine> {
        let mut sorted: Vec<&TextFragment> = fragments.iter().collect();
        sorted.sort_by(|a, b| {
            b.y.partial_cmp(&a.y)
                .unwrap_or(Ordering::Equal)
                .then(a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal))
        });

        let mut grouped: Vec<(f32, Vec<&TextFragment>)> = Vec::new();
        for fragment in sorted {
            match grouped.last_mut() {
                Some((y, members)) if (*y - fragment.y).abs() <= self.config.row_tolerance => {
                    members.push(fragment);
                }
                _ => grouped.push((fragment.y, vec![fragment])),
            }
        }

        grouped
            .into_iter()
            .map(|(y, mut members)| {
                members.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));
                TextLine {
                    y,
                    cells: self.merge_cells(&members),
                }
            })
            .collect()
    }

    fn merge_cells(&self, members: &[&TextFragment]) -> Vec<LineCell> {
        let mut cells: Vec<LineCell> = Vec::new();

        for fragment in members {
            let em = fragment.font_size.max(1.0);
            let text = fragment.text.trim();

            if let Some(last) = cells.last_mut() {
                let gap = fragment.x - last.right;
                if gap <= self.config.cell_gap * em {
                    if gap > WORD_GAP * em {
                        last.text.push(' ');
                    }
                    last.text.push_str(text);
                    last.right = last.right.max(fragment.right());
                    continue;
                }
            }

            cells.push(LineCell {
                x: fragment.x,
                right: fragment.right(),
                text: text.to_string(),
            });
        }

        cells
    }

    fn build_table(&self, page: u32, lines: &[&TextLine]) -> Option<DetectedTable> {
        if lines.len() < self.config.min_rows {
            return None;
        }

        let anchors = self.column_anchors(lines);
        let num_cols = anchors.len();

        let rows = lines
            .iter()
            .map(|line| {
                let mut row = vec![String::new(); num_cols];
                for cell in &line.cells {
                    let col = anchors
                        .partition_point(|&anchor| anchor <= cell.x)
                        .saturating_sub(1);
                    if !row[col].is_empty() {
                        row[col].push(' ');
                    }
                    row[col].push_str(&cell.text);
                }
                row
            })
            .collect();

        Some(DetectedTable {
            page,
            num_cols,
            rows,
        })
    }

    /// Left edges of the columns: each anchor starts a cluster of cell
    /// edges no further apart than the column tolerance.
    fn column_anchors(&self, lines: &[&TextLine]) -> Vec<f32> {
        let mut edges: Vec<f32> = lines
            .iter()
            .flat_map(|line| line.cells.iter().map(|c| c.x))
            .collect();
        edges.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        let mut anchors = Vec::new();
        let mut cluster_end = f32::NEG_INFINITY;
        for x in edges {
            if x - cluster_end > self.config.column_tolerance {
                anchors.push(x);
            }
            cluster_end = x;
        }
        anchors
    }
}

impl Default for TableDetector {
    fn default() -> Self {
        Self::new(TableConfig::default())
    }
}
