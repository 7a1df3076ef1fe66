use crate::error::Result;
use crate::models::BUDGET_ITEMS;

pub fn run() -> Result<()> {
    for item in BUDGET_ITEMS {
        println!("{item}");
    }
    Ok(())
}
