//! Calibration Binary
//!
//! Offline seed calibration: staged evaluation, difficulty bucketing, and
//! artifact emission for the runtime seed pools.
//!
//! Options: --seeds, --start, --run-id, --rollouts, --candidates, --out

fn main() -> anyhow::Result<()> {
    svh_core::log();
    svh_calibration::Cli::run()
}
