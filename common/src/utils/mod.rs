use crate::config::{COIN_DECIMALS, COIN_VALUE};

/// Format an amount in smallest units as FIO with all decimals
pub fn format_fio(value: u64) -> String {
    format!(
        "{}.{:0width$}",
        value / COIN_VALUE,
        value % COIN_VALUE,
        width = COIN_DECIMALS as usize
    )
}
