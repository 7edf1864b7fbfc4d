use crate::address::TronAddress;

use super::{AbiError, AbiType, AbiValue};

pub const WORD_LEN: usize = 32;

/// Selector of Solidity's `Error(string)` revert payload.
const ERROR_STRING_SELECTOR: [u8; 4] = [0x08, 0xc3, 0x79, 0xa0];

/// Encodes a parameter tuple (head/tail layout).
pub fn encode(values: &[AbiValue]) -> Vec<u8> {
    let head_len = values.len() * WORD_LEN;
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for value in values {
        match value {
            AbiValue::Address(addr) => head.extend_from_slice(&address_word(addr)),
            AbiValue::Uint(n) => head.extend_from_slice(&uint_word(*n)),
            AbiValue::Bool(b) => head.extend_from_slice(&uint_word(u128::from(*b))),
            AbiValue::AddressArray(items) => {
                head.extend_from_slice(&uint_word((head_len + tail.len()) as u128));
                tail.extend_from_slice(&uint_word(items.len() as u128));
                for item in items {
                    tail.extend_from_slice(&address_word(item));
                }
            }
        }
    }

    head.extend_from_slice(&tail);
    head
}

/// Decodes a result tuple of the given types.
pub fn decode(types: &[AbiType], data: &[u8]) -> Result<Vec<AbiValue>, AbiError> {
    if data.len() % WORD_LEN != 0 {
        return Err(AbiError::Misaligned(data.len()));
    }

    types
        .iter()
        .enumerate()
        .map(|(index, ty)| {
            let word = word_at(data, index * WORD_LEN)?;
            match ty {
                AbiType::Address => read_address(word).map(AbiValue::Address),
                AbiType::Uint256 => read_uint(word).map(AbiValue::Uint),
                AbiType::Bool => read_bool(word).map(AbiValue::Bool),
                AbiType::AddressArray => {
                    let offset = read_usize(word)?;
                    let len = read_usize(word_at(data, offset)?)?;
                    (0..len)
                        .map(|i| {
                            let at = offset + WORD_LEN + i * WORD_LEN;
                            read_address(word_at(data, at)?)
                        })
                        .collect::<Result<Vec<_>, _>>()
                        .map(AbiValue::AddressArray)
                }
            }
        })
        .collect()
}

/// Extracts the message of a Solidity `Error(string)` revert payload.
pub fn decode_revert_reason(data: &[u8]) -> Option<String> {
    let body = data.strip_prefix(&ERROR_STRING_SELECTOR)?;
    let offset = read_usize(word_at(body, 0).ok()?).ok()?;
    let len = read_usize(word_at(body, offset).ok()?).ok()?;
    let start = offset.checked_add(WORD_LEN)?;
    let bytes = body.get(start..start.checked_add(len)?)?;
    String::from_utf8(bytes.to_vec()).ok()
}

fn word_at(data: &[u8], offset: usize) -> Result<&[u8], AbiError> {
    offset
        .checked_add(WORD_LEN)
        .and_then(|end| data.get(offset..end))
        .ok_or(AbiError::Truncated {
            offset,
            needed: WORD_LEN,
            available: data.len().saturating_sub(offset),
        })
}

fn address_word(addr: &TronAddress) -> [u8; WORD_LEN] {
    let mut word = [0u8; WORD_LEN];
    word[12..].copy_from_slice(&addr.account_id());
    word
}

fn uint_word(value: u128) -> [u8; WORD_LEN] {
    let mut word = [0u8; WORD_LEN];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

fn read_uint(word: &[u8]) -> Result<u128, AbiError> {
    if word[..16].iter().any(|b| *b != 0) {
        return Err(AbiError::Overflow(format!("0x{}", hex::encode(word))));
    }
    let mut low = [0u8; 16];
    low.copy_from_slice(&word[16..]);
    Ok(u128::from_be_bytes(low))
}

fn read_usize(word: &[u8]) -> Result<usize, AbiError> {
    let value = read_uint(word)?;
    usize::try_from(value).map_err(|_| AbiError::Overflow(value.to_string()))
}

fn read_bool(word: &[u8]) -> Result<bool, AbiError> {
    match read_uint(word) {
        Ok(0) => Ok(false),
        Ok(1) => Ok(true),
        _ => Err(AbiError::InvalidBool),
    }
}

fn read_address(word: &[u8]) -> Result<TronAddress, AbiError> {
    // Some nodes leave the 0x41 prefix in byte 11; anything else is garbage.
    if word[..11].iter().any(|b| *b != 0) || !matches!(word[11], 0x00 | 0x41) {
        return Err(AbiError::InvalidAddress(hex::encode(word)));
    }
    let mut id = [0u8; 20];
    id.copy_from_slice(&word[12..]);
    Ok(TronAddress::from_account_id(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> TronAddress {
        TronAddress::from_account_id([byte; 20])
    }

    #[test]
    fn test_encode_static_words() {
        let encoded = encode(&[AbiValue::Uint(0x2a), AbiValue::Bool(true)]);
        assert_eq!(encoded.len(), 2 * WORD_LEN);
        assert_eq!(encoded[31], 0x2a);
        assert_eq!(encoded[63], 1);
        assert!(encoded[..31].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_address_word_drops_prefix() {
        let encoded = encode(&[AbiValue::Address(addr(0xab))]);
        assert!(encoded[..12].iter().all(|b| *b == 0));
        assert!(encoded[12..].iter().all(|b| *b == 0xab));
    }

    #[test]
    fn test_decode_matrix_shaped_tuple() {
        // (uint256 positionId, address upline, address[] children, uint256 cycles, bool active)
        let children = vec![addr(1), addr(2), addr(3)];
        let values = vec![
            AbiValue::Uint(7),
            AbiValue::Address(addr(9)),
            AbiValue::AddressArray(children.clone()),
            AbiValue::Uint(2),
            AbiValue::Bool(true),
        ];
        let types = [
            AbiType::Uint256,
            AbiType::Address,
            AbiType::AddressArray,
            AbiType::Uint256,
            AbiType::Bool,
        ];

        let encoded = encode(&values);
        // Head is five words, the array offset points right after it.
        assert_eq!(encoded[2 * WORD_LEN + 31], (5 * WORD_LEN) as u8);
        assert_eq!(decode(&types, &encoded).unwrap(), values);
    }

    #[test]
    fn test_decode_empty_array() {
        let encoded = encode(&[AbiValue::AddressArray(Vec::new())]);
        let decoded = decode(&[AbiType::AddressArray], &encoded).unwrap();
        assert_eq!(decoded, vec![AbiValue::AddressArray(Vec::new())]);
    }

    #[test]
    fn test_decode_rejects_short_payload() {
        let err = decode(&[AbiType::Uint256, AbiType::Uint256], &[0u8; WORD_LEN]).unwrap_err();
        assert!(matches!(err, AbiError::Truncated { offset: 32, .. }));
        assert!(matches!(
            decode(&[AbiType::Uint256], &[0u8; 5]),
            Err(AbiError::Misaligned(5))
        ));
    }

    #[test]
    fn test_decode_rejects_bad_bool_and_overflow() {
        let mut word = [0u8; WORD_LEN];
        word[31] = 2;
        assert_eq!(decode(&[AbiType::Bool], &word), Err(AbiError::InvalidBool));

        let mut big = [0u8; WORD_LEN];
        big[0] = 1;
        assert!(matches!(
            decode(&[AbiType::Uint256], &big),
            Err(AbiError::Overflow(_))
        ));
    }

    #[test]
    fn test_decode_accepts_prefixed_address_word() {
        let mut word = [0u8; WORD_LEN];
        word[11] = 0x41;
        word[12..].copy_from_slice(&[5u8; 20]);
        let decoded = decode(&[AbiType::Address], &word).unwrap();
        assert_eq!(decoded, vec![AbiValue::Address(addr(5))]);
    }

    #[test]
    fn test_decode_revert_reason() {
        let reason = "Already registered";
        let mut payload = ERROR_STRING_SELECTOR.to_vec();
        payload.extend_from_slice(&uint_word(WORD_LEN as u128));
        payload.extend_from_slice(&uint_word(reason.len() as u128));
        let mut padded = reason.as_bytes().to_vec();
        padded.resize(WORD_LEN, 0);
        payload.extend_from_slice(&padded);

        assert_eq!(decode_revert_reason(&payload).as_deref(), Some(reason));
        assert_eq!(decode_revert_reason(&[0u8; 36]), None);
    }
}
