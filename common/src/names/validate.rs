use lazy_static::lazy_static;
use regex::Regex;

use super::normalize_name;
use crate::{
    config::{
        MAX_FIO_ADDRESS_LENGTH, MAX_FIO_DOMAIN_LENGTH, MIN_FIO_ADDRESS_LENGTH,
        MIN_FIO_DOMAIN_LENGTH,
    },
    error::{ErrorKind, FioError},
};

lazy_static! {
    // Look-around is not supported by the regex crate:
    // the length bound and the positional double hyphen rule are checked in code
    static ref ADDRESS_PATTERN: Regex =
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9-]*@[A-Za-z0-9][A-Za-z0-9-]*$")
            .expect("valid address pattern");
    static ref DOMAIN_PATTERN: Regex =
        Regex::new(r"(?i)^[a-z0-9\-]+$").expect("valid domain pattern");
}

// The two characters following the first one of a part must not be "--"
fn has_leading_double_hyphen(part: &str) -> bool {
    part.as_bytes().get(1..3) == Some(b"--".as_slice())
}

/// Check a FIO address (`name@domain`) against the address grammar
/// - Length: 3-64 characters, `@` included
/// - Each part starts with a letter or digit
/// - Only letters, digits and `-` allowed
/// - A part cannot continue with `--` right after its first character
pub fn is_valid_fio_address(address: &str) -> bool {
    let len = address.len();
    if !(MIN_FIO_ADDRESS_LENGTH..=MAX_FIO_ADDRESS_LENGTH).contains(&len) {
        return false;
    }

    if !ADDRESS_PATTERN.is_match(address) {
        return false;
    }

    match address.split_once('@') {
        Some((name, domain)) => {
            !has_leading_double_hyphen(name) && !has_leading_double_hyphen(domain)
        }
        None => false,
    }
}

/// Check a FIO domain against the domain grammar (1-62 characters, letters, digits, `-`)
pub fn is_valid_fio_domain(domain: &str) -> bool {
    let len = domain.len();
    (MIN_FIO_DOMAIN_LENGTH..=MAX_FIO_DOMAIN_LENGTH).contains(&len)
        && DOMAIN_PATTERN.is_match(domain)
}

/// Validate an address and return its normalized form
pub fn validate_fio_address(address: &str) -> Result<String, FioError> {
    if !is_valid_fio_address(address) {
        return Err(FioError::with_value(ErrorKind::InvalidFioAddress, address));
    }
    Ok(normalize_name(address))
}

/// Validate a domain and return its normalized form
pub fn validate_fio_domain(domain: &str) -> Result<String, FioError> {
    if !is_valid_fio_domain(domain) {
        return Err(FioError::with_value(ErrorKind::InvalidDomain, domain));
    }
    Ok(normalize_name(domain))
}

/// A TPID is either empty or a valid FIO address
pub fn validate_tpid(tpid: &str) -> Result<Option<String>, FioError> {
    if tpid.is_empty() {
        return Ok(None);
    }
    if !is_valid_fio_address(tpid) {
        return Err(FioError::with_value(ErrorKind::InvalidTpid, tpid));
    }
    Ok(Some(normalize_name(tpid)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_addresses() {
        assert!(is_valid_fio_address("a@b"));
        assert!(is_valid_fio_address("alice@smoketest"));
        assert!(is_valid_fio_address("Alice-1@Smoke-Test"));
        assert!(is_valid_fio_address("a-b--c@domain"));
        assert!(is_valid_fio_address("abc@d-e"));
    }

    #[test]
    fn test_invalid_addresses() {
        assert!(!is_valid_fio_address(""));
        assert!(!is_valid_fio_address("@b"));
        assert!(!is_valid_fio_address("a@"));
        assert!(!is_valid_fio_address("alice"));
        assert!(!is_valid_fio_address("-alice@smoketest"));
        assert!(!is_valid_fio_address("a--lice@smoketest"));
        assert!(!is_valid_fio_address("alice@s--moketest"));
        assert!(!is_valid_fio_address("al ice@smoketest"));
        assert!(!is_valid_fio_address("alice@smoke@test"));
        assert!(!is_valid_fio_address("alice@smoke.test"));
        assert!(!is_valid_fio_address("invalidfioaddress@@@"));
    }

    #[test]
    fn test_address_length_bounds() {
        let max = format!("{}@{}", "a".repeat(32), "b".repeat(31));
        assert_eq!(max.len(), 64);
        assert!(is_valid_fio_address(&max));

        let too_long = format!("{}@{}", "a".repeat(32), "b".repeat(32));
        assert!(!is_valid_fio_address(&too_long));
    }

    #[test]
    fn test_domains() {
        assert!(is_valid_fio_domain("smoketest"));
        assert!(is_valid_fio_domain("Smoke-Test"));
        assert!(is_valid_fio_domain("a"));
        assert!(!is_valid_fio_domain(""));
        assert!(!is_valid_fio_domain("smoke_test"));
        assert!(!is_valid_fio_domain(&"a".repeat(63)));
        assert!(is_valid_fio_domain(&"a".repeat(62)));
    }

    #[test]
    fn test_tpid() {
        assert_eq!(validate_tpid(""), Ok(None));
        assert_eq!(
            validate_tpid("Rewards@Smoketest"),
            Ok(Some("rewards@smoketest".to_string()))
        );
        let err = validate_tpid("invalid-tpid").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTpid);
    }

    #[test]
    fn test_validate_normalizes() {
        assert_eq!(
            validate_fio_address("Alice@SmokeTest").unwrap(),
            "alice@smoketest"
        );
        let err = validate_fio_address("bad").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFioAddress);
        assert_eq!(err.value(), Some("bad"));
    }
}
