pub mod pool;
pub mod probe;

pub use pool::create_lazy_pool;
pub use probe::{DatabaseProbe, NoDatabase, PostgresProbe, ProbeOutcome, probe_from_config};
