use std::sync::OnceLock;

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_env_bool_u8(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}

static PARALLEL_MASK_TRIALS: OnceLock<bool> = OnceLock::new();

/// Score the eight mask candidates on the rayon pool (`QR_PARALLEL_MASKS`)
pub fn parallel_mask_trials() -> bool {
    *PARALLEL_MASK_TRIALS.get_or_init(|| parse_env_bool_u8("QR_PARALLEL_MASKS", false))
}

static MODULE_PIXELS: OnceLock<usize> = OnceLock::new();

/// Default rendered pixels per module (`QR_MODULE_PIXELS`)
pub fn module_pixels() -> usize {
    *MODULE_PIXELS.get_or_init(|| parse_env_usize("QR_MODULE_PIXELS", 8).clamp(1, 64))
}

static QUIET_ZONE: OnceLock<usize> = OnceLock::new();

/// Default quiet-zone width in modules (`QR_QUIET_ZONE`)
pub fn quiet_zone() -> usize {
    *QUIET_ZONE.get_or_init(|| parse_env_usize("QR_QUIET_ZONE", 4).min(16))
}
