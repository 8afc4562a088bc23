use indicatif::{ProgressBar, ProgressStyle};

/// Constant xored with the user-provided random state so that low seeds
/// still produce a good mixture of zeros and ones.
pub(crate) const SEED_XOR: u64 = 0xbad5eed;

/// Return a loading bar, hidden unless verbosity was requested.
///
/// # Arguments
///
/// * `verbose`: bool - Whether to show the loading bar.
/// * `desc`: &str - Description to prefix the bar with.
/// * `total_iterations`: usize - Number of iterations the bar covers.
pub(crate) fn get_loading_bar(verbose: bool, desc: &str, total_iterations: usize) -> ProgressBar {
    if verbose {
        let pb = ProgressBar::new(total_iterations as u64);
        pb.set_draw_delta(total_iterations as u64 / 100 + 1);
        pb.set_style(ProgressStyle::default_bar().template(&format!(
            "{} {{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] ({{pos}}/{{len}}, ETA {{eta}})",
            desc
        )));
        pb
    } else {
        ProgressBar::hidden()
    }
}

/// Mix the given random state with a per-task index into a new seed.
///
/// Seeds produced for consecutive indices are decorrelated by the
/// multiplicative constant before being fed to `SmallRng::seed_from_u64`,
/// which runs its own SplitMix64 round on top.
#[inline(always)]
pub(crate) fn task_seed(random_state: u64, task_index: u64) -> u64 {
    (random_state ^ SEED_XOR).wrapping_add(task_index.wrapping_mul(0x9e37_79b9_7f4a_7c15))
}
