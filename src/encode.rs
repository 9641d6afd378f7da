use bytes::BufMut;

use crate::value::{Dictionary, Integer, Value};

/// Encode a value to its canonical bencode form.
///
/// Any well-formed tree encodes, however deep. The decoder only accepts
/// nesting up to [`MAX_DEPTH`](crate::MAX_DEPTH), so deeper trees do not
/// decode back.
pub fn encode(value: &Value) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(encoded_len(value));
    encode_into(value, &mut buffer);
    buffer
}

/// Encode a root dictionary to its canonical bencode form.
///
/// As with [`encode`], nesting is not limited here.
pub fn to_vec(dict: &Dictionary) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(dict_len(dict));
    write_dict(dict, &mut buffer);
    buffer
}

/// Append the canonical encoding of `value` to `buffer`.
///
/// Dictionary entries are written in byte-wise key order regardless of how
/// the dictionary was built.
pub fn encode_into<B: BufMut>(value: &Value, buffer: &mut B) {
    match value {
        Value::Integer(n) => write_integer(*n, buffer),
        Value::Bytes(b) => write_bytes(b, buffer),
        Value::List(items) => {
            buffer.put_u8(b'l');
            for item in items {
                encode_into(item, buffer);
            }
            buffer.put_u8(b'e');
        }
        Value::Dict(dict) => write_dict(dict, buffer),
    }
}

/// Returns the exact number of bytes `encode` produces for `value`.
pub fn encoded_len(value: &Value) -> usize {
    match value {
        Value::Integer(n) => 2 + integer_digits_len(*n),
        Value::Bytes(b) => bytes_len(b),
        Value::List(items) => 2 + items.iter().map(encoded_len).sum::<usize>(),
        Value::Dict(dict) => dict_len(dict),
    }
}

fn write_integer<B: BufMut>(n: Integer, buffer: &mut B) {
    buffer.put_u8(b'i');
    match n {
        Integer::Signed(n) => buffer.put_slice(n.to_string().as_bytes()),
        Integer::Unsigned(n) => buffer.put_slice(n.to_string().as_bytes()),
    }
    buffer.put_u8(b'e');
}

fn write_bytes<B: BufMut>(bytes: &[u8], buffer: &mut B) {
    buffer.put_slice(bytes.len().to_string().as_bytes());
    buffer.put_u8(b':');
    buffer.put_slice(bytes);
}

fn write_dict<B: BufMut>(dict: &Dictionary, buffer: &mut B) {
    buffer.put_u8(b'd');
    for (key, value) in dict {
        write_bytes(key, buffer);
        encode_into(value, buffer);
    }
    buffer.put_u8(b'e');
}

fn dict_len(dict: &Dictionary) -> usize {
    2 + dict
        .iter()
        .map(|(key, value)| bytes_len(key) + encoded_len(value))
        .sum::<usize>()
}

fn bytes_len(bytes: &[u8]) -> usize {
    decimal_len(bytes.len() as u64) + 1 + bytes.len()
}

fn integer_digits_len(n: Integer) -> usize {
    match n {
        Integer::Signed(n) if n < 0 => 1 + decimal_len(n.unsigned_abs()),
        Integer::Signed(n) => decimal_len(n.unsigned_abs()),
        Integer::Unsigned(n) => decimal_len(n),
    }
}

fn decimal_len(n: u64) -> usize {
    n.checked_ilog10().map_or(1, |digits| digits as usize + 1)
}

#[cfg(test)]
mod tests {
    use bytes::{Bytes, BytesMut};

    use super::{encode, encode_into, encoded_len, to_vec};
    use crate::value::{Dictionary, Integer, Value};

    fn assert_encodes(cases: &[(Value, &[u8])]) {
        for (value, bytes) in cases {
            assert_eq!(encode(value), *bytes);
            assert_eq!(encoded_len(value), bytes.len());
        }
    }

    #[test]
    fn test_integers() {
        assert_encodes(&[
            (Value::from(0), b"i0e"),
            (Value::from(42), b"i42e"),
            (Value::from(-42), b"i-42e"),
            (Value::from(i64::MAX), b"i9223372036854775807e"),
            (Value::from(i64::MIN), b"i-9223372036854775808e"),
            (Value::from(u64::MAX), b"i18446744073709551615e"),
            (Value::Integer(Integer::Unsigned(7)), b"i7e"),
        ]);
    }

    #[test]
    fn test_bytes() {
        assert_encodes(&[
            (Value::from(""), b"0:"),
            (Value::from("spam"), b"4:spam"),
            (Value::from(vec![0x00u8, 0xFF]), b"2:\x00\xFF"),
            (Value::from(vec![b'x'; 10]), b"10:xxxxxxxxxx"),
        ]);
    }

    #[test]
    fn test_lists() {
        assert_encodes(&[
            (Value::List(vec![]), b"le"),
            (
                Value::List(vec![Value::from("spam"), Value::from(1), Value::List(vec![])]),
                b"l4:spami1elee",
            ),
        ]);
    }

    #[test]
    fn test_dict_keys_sorted() {
        let mut dict = Dictionary::new();
        dict.insert("zebra", 1);
        dict.insert("apple", Value::List(vec![Value::from("x")]));
        dict.insert(Bytes::from_static(b"\xFF"), 2);
        dict.insert("Zoo", 3);

        assert_encodes(&[
            (Value::Dict(Dictionary::new()), b"de"),
            (
                Value::Dict(dict),
                b"d3:Zooi3e5:applel1:xe5:zebrai1e1:\xFFi2ee",
            ),
        ]);
    }

    #[test]
    fn test_to_vec_matches_encode() {
        let dict: Dictionary = [("b", 2), ("a", 1)].into_iter().collect();
        assert_eq!(to_vec(&dict), b"d1:ai1e1:bi2ee");
        assert_eq!(to_vec(&dict), encode(&Value::Dict(dict)));
    }

    #[test]
    fn test_encode_into_appends() {
        let mut buffer = BytesMut::from(&b"prefix"[..]);
        encode_into(&Value::from(5), &mut buffer);
        assert_eq!(&buffer[..], b"prefixi5e");
    }
}
