//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so release
//! builds remain quiet. Call sites additionally gate on `cfg!(debug_assertions)`.

pub struct DebugFlags {
    /// Emit the indicator snapshot and levels every time scenarios are built.
    pub print_scenario_inputs: bool,
    /// Emit job dispatch / completion lines from the forecast engine.
    pub print_engine_jobs: bool,
    /// Emit a one-line summary after each synthetic history is generated.
    pub print_generator_summary: bool,
    /// Emit a line whenever the error journal is written to disk.
    pub print_journal_writes: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_scenario_inputs: false,
    print_engine_jobs: true,
    print_generator_summary: false,
    print_journal_writes: false,
};
