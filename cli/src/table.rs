// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

/// A column of a table over rows of type `T`.
pub trait TableColumn<T> {
    /// Header of the column, also the key in JSON output.
    fn name(&self) -> Cow<'_, str>;

    fn format<'a>(&self, data: &'a T) -> Cow<'a, str>;

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn color(&self, _data: &T) -> Option<Color> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDirection {
    Left,
    Right,
}

/// Table rendering, one of [`TableStyleBasic`] or [`TableStyleJson`].
pub trait TableStyle {
    fn write<T, C: TableColumn<T>>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        data: &[T],
    ) -> fmt::Result;
}

pub struct Table<'a, S, T, C> {
    style: S,
    columns: &'a [C],
    data: &'a [T],
}

impl<'a, S, T, C> Table<'a, S, T, C>
where
    S: TableStyle,
    C: TableColumn<T>,
{
    pub fn new(style: S, columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            style,
            columns,
            data,
        }
    }
}

impl<S, T, C> fmt::Display for Table<'_, S, T, C>
where
    S: TableStyle,
    C: TableColumn<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.style.write(f, self.columns, self.data)
    }
}

/// Aligned columns separated by spaces, one row per line.
#[derive(Debug, Clone)]
pub struct TableStyleBasic {
    separator: &'static str,
    padding: bool,
}

impl TableStyleBasic {
    pub fn new() -> Self {
        Self {
            separator: " ",
            padding: true,
        }
    }
}

impl TableStyle for TableStyleBasic {
    fn write<T, C: TableColumn<T>>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        data: &[T],
    ) -> fmt::Result {
        let table = data
            .iter()
            .map(|row| columns.iter().map(|col| col.format(row)).collect::<Vec<_>>())
            .collect::<Vec<_>>();

        let widths = if self.padding {
            column_max_width(columns.len(), &table)
        } else {
            vec![0; columns.len()]
        };

        for (i, (cells, row)) in table.iter().zip(data).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }

            for (j, (col, cell)) in columns.iter().zip(cells).enumerate() {
                let last = j + 1 == columns.len();
                let cell = match col.padding_direction() {
                    // last column does not need padding if it's left-aligned
                    PaddingDirection::Left if last => cell.to_string(),
                    PaddingDirection::Left => pad(cell, widths[j], false),
                    PaddingDirection::Right => pad(cell, widths[j], true),
                };
                match col.color(row) {
                    Some(color) => write!(f, "{}", cell.color(color))?,
                    None => write!(f, "{cell}")?,
                }

                if !last {
                    write!(f, "{}", self.separator)?;
                }
            }
        }
        Ok(())
    }
}

/// A JSON array of objects keyed by column name.
#[derive(Debug, Clone)]
pub struct TableStyleJson;

impl TableStyleJson {
    pub fn new() -> Self {
        Self
    }
}

impl TableStyle for TableStyleJson {
    fn write<T, C: TableColumn<T>>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        data: &[T],
    ) -> fmt::Result {
        let rows = data
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|col| {
                        let value = serde_json::Value::String(col.format(row).into_owned());
                        (col.name().into_owned(), value)
                    })
                    .collect::<serde_json::Map<_, _>>()
            })
            .collect::<Vec<_>>();

        let json = serde_json::to_string_pretty(&rows).map_err(|_| fmt::Error)?;
        write!(f, "{json}")
    }
}

fn column_max_width(len: usize, table: &[Vec<Cow<'_, str>>]) -> Vec<usize> {
    let mut max_width = vec![0; len];
    for row in table {
        for (max, cell) in max_width.iter_mut().zip(row) {
            *max = (*max).max(cell.width());
        }
    }
    max_width
}

fn pad(cell: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(cell.width()));
    if right_align {
        format!("{fill}{cell}")
    } else {
        format!("{cell}{fill}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Col(usize, PaddingDirection);

    impl TableColumn<[&'static str; 2]> for Col {
        fn name(&self) -> Cow<'_, str> {
            ["Left", "Right"][self.0].into()
        }

        fn format<'a>(&self, data: &'a [&'static str; 2]) -> Cow<'a, str> {
            data[self.0].into()
        }

        fn padding_direction(&self) -> PaddingDirection {
            self.1
        }
    }

    fn columns() -> [Col; 2] {
        [Col(0, PaddingDirection::Right), Col(1, PaddingDirection::Left)]
    }

    #[test]
    fn pads_columns_to_widest_cell() {
        let data = [["1", "short"], ["100", "longer"]];
        let columns = columns();
        let table = Table::new(TableStyleBasic::new(), &columns, &data).to_string();
        assert_eq!(table, "  1 short\n100 longer");
    }

    #[test]
    fn pads_by_display_width() {
        let data = [["会议", "a"], ["ab", "b"]];
        let columns = [Col(0, PaddingDirection::Left), Col(1, PaddingDirection::Left)];
        let table = Table::new(TableStyleBasic::new(), &columns, &data).to_string();
        assert_eq!(table, "会议 a\nab   b");
    }

    #[test]
    fn renders_json_objects() {
        let data = [["1", "one"]];
        let columns = columns();
        let table = Table::new(TableStyleJson::new(), &columns, &data).to_string();
        let json: serde_json::Value = serde_json::from_str(&table).unwrap();
        assert_eq!(json, serde_json::json!([{ "Left": "1", "Right": "one" }]));
    }

    #[test]
    fn renders_empty_table() {
        let data: [[&str; 2]; 0] = [];
        let columns = columns();
        assert_eq!(
            Table::new(TableStyleBasic::new(), &columns, &data).to_string(),
            ""
        );
        assert_eq!(
            Table::new(TableStyleJson::new(), &columns, &data).to_string(),
            "[]"
        );
    }
}
