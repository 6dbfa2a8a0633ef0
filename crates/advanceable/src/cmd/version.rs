use advanceable_cursor::{Encoding, MAX_VAR_WIDTH};

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("advanceable {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: advanceable");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!("native_endian: {}", native_endian());
    println!("int_widths: 1..={MAX_VAR_WIDTH},8");
    println!("encodings: {}", encoding_names());

    Ok(SUCCESS)
}

fn native_endian() -> &'static str {
    if cfg!(target_endian = "big") {
        "big"
    } else {
        "little"
    }
}

fn encoding_names() -> String {
    Encoding::ALL
        .iter()
        .map(|encoding| encoding.name())
        .collect::<Vec<_>>()
        .join(",")
}
