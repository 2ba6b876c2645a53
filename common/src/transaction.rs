use serde::Serialize;

/// Compute the id of a pushed transaction
/// id = blake3(actor || action || data || sequence), hex encoded
pub fn compute_transaction_id<T: Serialize>(
    actor: &str,
    action: &str,
    data: &T,
    sequence: u64,
) -> Result<String, serde_json::Error> {
    let mut hasher = blake3::Hasher::new();
    hasher.update(actor.as_bytes());
    hasher.update(action.as_bytes());
    hasher.update(&serde_json::to_vec(data)?);
    hasher.update(&sequence.to_le_bytes());
    Ok(hex::encode(hasher.finalize().as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transaction_id_uniqueness() {
        let data = json!({ "fio_address": "alice@smoketest" });
        let id1 = compute_transaction_id("actor", "burnaddress", &data, 1).unwrap();
        let id2 = compute_transaction_id("actor", "burnaddress", &data, 2).unwrap();
        let id3 = compute_transaction_id("other", "burnaddress", &data, 1).unwrap();

        assert_eq!(id1.len(), 64);
        assert_ne!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(
            id1,
            compute_transaction_id("actor", "burnaddress", &data, 1).unwrap()
        );
    }
}
