//! Exit status policy.

use crate::config::{ExitPolicy, EXIT_COUNT_CAP};
use crate::lookup::RunTally;

/// Maps a finished run onto a process exit status.
///
/// - `Count`: the number of listings, capped at [`EXIT_COUNT_CAP`]
/// - `AnyListed`: 1 when listed anywhere, 0 otherwise
pub fn evaluate_exit_code(policy: ExitPolicy, tally: &RunTally) -> i32 {
    match policy {
        // Safe cast: value is capped well below i32::MAX
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        ExitPolicy::Count => tally.listed.min(EXIT_COUNT_CAP) as i32,
        ExitPolicy::AnyListed => i32::from(tally.listed > 0),
    }
}
