// output formatting - readable report or raw json

use crate::Error;
use crate::core::Analysis;

pub struct Output;

impl Output {
    // the same report the tui copies to the clipboard
    pub fn pretty(analysis: &Analysis) {
        print!("{}", analysis.report());
    }

    // raw json for scripts
    pub fn raw(analysis: &Analysis) -> Result<(), Error> {
        println!("{}", analysis.to_json()?);
        Ok(())
    }
}
