//! Given steps for relay routing BDD scenarios.

use super::world::{RelayWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given("a relay with an initialised ban set")]
fn relay_with_ban_set(world: &mut RelayWorld) -> Result<(), eyre::Report> {
    run_async(world.gate.initialize()).wrap_err("seed the ban set")?;
    Ok(())
}
