use std::env;

/// Returns the runtime page size (`sysconf(_SC_PAGESIZE)` on Unix).
#[inline]
pub(crate) fn page_size() -> usize {
    let n = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if n <= 0 {
        4096
    } else {
        n as usize
    }
}

/// Rounds `n` up to the next multiple of `align` (`align` must be a power of two).
#[inline]
pub(crate) fn round_up(n: usize, align: usize) -> usize {
    debug_assert!(align.is_power_of_two());
    (n + align - 1) & !(align - 1)
}

/// Name of the environment variable consulted by [`env_override`] when the
/// process has opted into it with [`enable_env_override`].
///
/// This is a testability affordance only (see `Scanner::open`'s docs): it
/// lets test harnesses exercise boundary cases with very small buffers
/// without recompiling. It must not be relied upon in production code, and
/// is off by default.
pub const BUFSZ_ENV_VAR: &str = "LINESCAN_BUFSZ";

use std::sync::atomic::{AtomicBool, Ordering};

static ENV_OVERRIDE_ENABLED: AtomicBool = AtomicBool::new(false);

/// Process-wide opt-in for the `bufsz` environment override.
///
/// Off by default. Intended for test harnesses that want to sweep buffer
/// capacities without threading the value through every call site. See
/// [`BUFSZ_ENV_VAR`].
pub fn enable_env_override(enabled: bool) {
    ENV_OVERRIDE_ENABLED.store(enabled, Ordering::Relaxed);
}

/// If the opt-in is set and `LINESCAN_BUFSZ` holds a positive integer no
/// larger than `2^31`, returns that value. Otherwise returns `requested`
/// unchanged.
pub(crate) fn resolve_bufsz(requested: usize) -> usize {
    if !ENV_OVERRIDE_ENABLED.load(Ordering::Relaxed) {
        return requested;
    }
    match env::var(BUFSZ_ENV_VAR) {
        Ok(val) => match val.parse::<u64>() {
            Ok(n) if n > 0 && n <= (1u64 << 31) => n as usize,
            _ => requested,
        },
        Err(_) => requested,
    }
}
