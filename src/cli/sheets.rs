use std::path::Path;

use crate::error::Result;
use crate::session::Session;

pub fn run(file: &str) -> Result<()> {
    let session = Session::open(Path::new(file))?;
    for (i, name) in session.sheet_names().iter().enumerate() {
        println!("{i}: {name}");
    }
    Ok(())
}
