/// Normalize a FIO address or domain for storage and comparison
pub fn normalize_name(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// Split an address into its name and domain parts
pub fn split_address(address: &str) -> Option<(&str, &str)> {
    address.split_once('@')
}

/// Domain part of an address, lowercased
pub fn domain_of(address: &str) -> Option<String> {
    split_address(address).map(|(_, domain)| normalize_name(domain))
}
