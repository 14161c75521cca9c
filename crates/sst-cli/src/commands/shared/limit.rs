/// Rows to show: `--limit` on the subcommand, then the global `--limit`,
/// then `general.default_limit`. A limit of 0 shows every row.
#[must_use]
pub fn effective_limit(local: Option<u32>, global: Option<u32>, fallback: u32) -> usize {
    match local.or(global).unwrap_or(fallback) {
        0 => usize::MAX,
        n => usize::try_from(n).unwrap_or(usize::MAX),
    }
}
