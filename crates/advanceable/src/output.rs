use std::io::{IsTerminal, Write};

use advanceable_cursor::Encoding;
use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

use crate::layout::FieldValue;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// A decoded field and where it sat in the input.
#[derive(Debug, Serialize)]
pub struct FieldRecord {
    pub offset: usize,
    pub field: String,
    pub size: usize,
    pub value: FieldValue,
}

#[derive(Serialize)]
struct DecodeOutput<'a> {
    capacity: usize,
    consumed: usize,
    fields: &'a [FieldRecord],
}

#[derive(Serialize)]
struct EncodeOutput {
    capacity: usize,
    written: usize,
    hex: String,
}

pub fn print_fields(
    records: &[FieldRecord],
    capacity: usize,
    consumed: usize,
    format: OutputFormat,
) {
    match format {
        OutputFormat::Json => {
            let out = DecodeOutput {
                capacity,
                consumed,
                fields: records,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["OFFSET", "FIELD", "SIZE", "VALUE"]);
            for record in records {
                table.add_row(vec![
                    record.offset.to_string(),
                    record.field.clone(),
                    record.size.to_string(),
                    record.value.to_string(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for record in records {
                println!(
                    "offset={} field={} size={} value={}",
                    record.offset, record.field, record.size, record.value
                );
            }
            println!("consumed={consumed} capacity={capacity}");
        }
        OutputFormat::Raw => {
            for record in records {
                println!("{}", record.value);
            }
        }
    }
}

/// Print an encoded buffer. `bytes` may be shorter than `capacity` when
/// unwritten bytes are withheld.
pub fn print_buffer(bytes: &[u8], capacity: usize, written: usize, format: OutputFormat) {
    let hex = Encoding::Hex.decode(bytes);
    match format {
        OutputFormat::Json => {
            let out = EncodeOutput {
                capacity,
                written,
                hex,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["CAPACITY", "WRITTEN", "HEX"])
                .add_row(vec![capacity.to_string(), written.to_string(), hex]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("capacity={capacity} written={written} hex={hex}");
        }
        OutputFormat::Raw => print_raw(bytes),
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}
