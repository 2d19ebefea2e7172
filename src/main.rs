//! Course Catalog - ordered course listing and prerequisite lookup

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = course_catalog::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
