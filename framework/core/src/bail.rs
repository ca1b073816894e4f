/// Return this error from a scenario behaviour to indicate that the scenario is giving up.
///
/// This should be used when a scenario cannot produce a meaningful record, for example because the
/// page has no elements for it to interact with. The runner logs the bail at warning level and moves
/// on to the next scenario without treating it as a malfunction.
#[derive(derive_more::Error, derive_more::Display, Debug)]
pub struct ScenarioBailError {
    msg: String,
}

impl ScenarioBailError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

impl Default for ScenarioBailError {
    fn default() -> Self {
        Self {
            msg: "Scenario is bailing".to_string(),
        }
    }
}
