use advanceable_cursor::{Allocation, Cursor};
use tracing::debug;

use crate::cmd::EncodeArgs;
use crate::exit::{cursor_error, CliResult, SUCCESS};
use crate::layout::EncodeItem;
use crate::output::{print_buffer, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let allocation = args.allocation.as_allocation();
    let mut cursor = Cursor::alloc(args.size, allocation);
    encode_items(&mut cursor, &args.items)?;

    let capacity = cursor.capacity();
    let written = cursor.offset();
    let bytes = emitted_bytes(&mut cursor, allocation)?;
    print_buffer(bytes, capacity, written, format);
    Ok(SUCCESS)
}

/// Bytes safe to print once encoding is done.
///
/// A zeroed buffer is printed whole. An uninitialized one is read back
/// through the cursor up to the final offset, so a skipped gap fails
/// instead of leaking bytes that were never written.
fn emitted_bytes<B>(cursor: &mut Cursor<B>, allocation: Allocation) -> CliResult<&[u8]>
where
    B: AsRef<[u8]>,
{
    match allocation {
        Allocation::Zeroed => Ok(cursor.as_slice()),
        Allocation::Uninitialized => {
            let written = cursor.offset();
            cursor
                .set_offset(0)
                .map_err(|err| cursor_error("rewind", err))?;
            cursor
                .read(written)
                .map_err(|err| cursor_error("written bytes", err))
        }
    }
}

/// Write `items` in order, stopping at the first one that does not fit.
fn encode_items<B>(cursor: &mut Cursor<B>, items: &[EncodeItem]) -> CliResult<()>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    for (index, item) in items.iter().enumerate() {
        let offset = cursor.offset();
        item.write(cursor).map_err(|err| {
            cursor_error(
                &format!("item {} ({item}) at offset {offset}", index + 1),
                err,
            )
        })?;
        debug!(index, %item, offset, size = cursor.offset() - offset, "encoded item");
    }
    Ok(())
}
