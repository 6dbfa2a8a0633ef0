use std::fs;

use advanceable_cursor::Cursor;
use tracing::{debug, info};

use crate::cmd::DecodeArgs;
use crate::exit::{cursor_error, io_error, CliError, CliResult, SUCCESS};
use crate::layout::{parse_hex, Field};
use crate::output::{print_fields, FieldRecord, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let input = load_input(&args)?;
    let mut cursor = Cursor::new(input);

    let records = decode_fields(&mut cursor, &args.fields)?;
    if !cursor.is_exhausted() {
        info!(remaining = cursor.remaining(), "input has trailing bytes");
    }

    print_fields(&records, cursor.capacity(), cursor.offset(), format);
    Ok(SUCCESS)
}

fn load_input(args: &DecodeArgs) -> CliResult<Vec<u8>> {
    if let Some(hex) = &args.hex {
        return parse_hex(hex).map_err(CliError::usage);
    }
    if let Some(path) = &args.file {
        return fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }
    Err(CliError::usage("either --hex or --file is required"))
}

/// Read `fields` in order, stopping at the first one that does not fit.
fn decode_fields<B: AsRef<[u8]>>(
    cursor: &mut Cursor<B>,
    fields: &[Field],
) -> CliResult<Vec<FieldRecord>> {
    let mut records = Vec::with_capacity(fields.len());
    for (index, field) in fields.iter().enumerate() {
        let offset = cursor.offset();
        let value = field.read(cursor).map_err(|err| {
            cursor_error(
                &format!("field {} ({field}) at offset {offset}", index + 1),
                err,
            )
        })?;
        debug!(index, %field, offset, "decoded field");
        records.push(FieldRecord {
            offset,
            field: field.to_string(),
            size: cursor.offset() - offset,
            value,
        });
    }
    Ok(records)
}
