//! Demonstration driver for the list.
//!
//! Builds a 100-element list of sequential integers, shortens it by 25,
//! truncates it to 56, overwrites every element with 42, and prints the
//! sequence after each step.
//!
//! Run with:
//!   cargo run --features demo --bin linked-demo
//!   RUST_LOG=trace cargo run --features demo --bin linked-demo

use std::error::Error;

use linked::{Advance, List, ListError};
use log::{LevelFilter, info};
use simple_logger::SimpleLogger;

const COUNT: i32 = 100;
const SHORTEN_BY: usize = 25;
const TRUNCATE_TO: usize = 56;
const FILL: i32 = 42;

fn decode(payload: &[u8]) -> Option<i32> {
    Some(i32::from_le_bytes(payload.try_into().ok()?))
}

fn print_list(list: &List) {
    println!("print list of length {}", list.len());

    let mut cursor = list.cursor();
    let mut line = Vec::with_capacity(list.len());
    loop {
        if let Some(value) = cursor.current().and_then(decode) {
            line.push(value.to_string());
        }
        if cursor.advance() == Advance::Stop {
            break;
        }
    }
    println!("{}", line.join(" "));
}

fn run() -> Result<(), ListError> {
    let mut list: List = List::new();

    println!("generating list");
    for i in 0..COUNT {
        list.append(&i.to_le_bytes())?;
    }
    print_list(&list);

    println!("shorten list by {}", SHORTEN_BY);
    list.shorten(SHORTEN_BY)?;
    print_list(&list);

    println!("truncate list to {}", TRUNCATE_TO);
    list.truncate(TRUNCATE_TO)?;
    print_list(&list);

    println!("set every element to {}", FILL);
    for pos in 0..list.len() {
        list.set(pos, &FILL.to_le_bytes())?;
    }
    print_list(&list);

    info!("consistent: {}", list.is_consistent());
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .env()
        .init()?;

    run()?;
    Ok(())
}
