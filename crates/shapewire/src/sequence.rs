//! Length-prefixed sequences: `Vec<T>`, `[T]`, `String` and `str`.
//!
//! Wire form: `usize` element count in host layout, then the elements. When
//! the element type is Primitive the elements go out as one raw block;
//! otherwise each element encodes itself. Both paths produce identical bytes
//! for primitive elements, the block path is simply one copy instead of `n`.
//!
//! Decoding reads the count, lets the source veto it, then reads the
//! elements. Text must be valid UTF-8.

use crate::{
    error::{DecodeError, Result},
    io::{ByteSink, ByteSource},
    shape::{SequenceLayout, Shape, Shaped},
    wire::{Decode, Encode, decode_len, encode_len},
};

impl<T: Shaped> Shaped for [T] {
    const SHAPE: Shape = Shape::Sequence(T::SHAPE.sequence_layout());
}

impl<T: Encode> Encode for [T] {
    fn encode<S: ByteSink + ?Sized>(&self, sink: &mut S) {
        encode_len(self.len(), sink);
        T::encode_slice(self, sink);
    }
}

impl<T: Shaped> Shaped for Vec<T> {
    const SHAPE: Shape = Shape::Sequence(T::SHAPE.sequence_layout());
}

impl<T: Encode> Encode for Vec<T> {
    #[inline]
    fn encode<S: ByteSink + ?Sized>(&self, sink: &mut S) {
        self.as_slice().encode(sink);
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode<R: ByteSource + ?Sized>(source: &mut R) -> Result<Self> {
        let len = decode_len(source)?;
        T::decode_many(len, source)
    }
}

impl Shaped for str {
    const SHAPE: Shape = Shape::Sequence(SequenceLayout::Contiguous);
}

impl Encode for str {
    fn encode<S: ByteSink + ?Sized>(&self, sink: &mut S) {
        encode_len(self.len(), sink);
        sink.put(self.as_bytes());
    }
}

impl Shaped for String {
    const SHAPE: Shape = Shape::Sequence(SequenceLayout::Contiguous);
}

impl Encode for String {
    #[inline]
    fn encode<S: ByteSink + ?Sized>(&self, sink: &mut S) {
        self.as_str().encode(sink);
    }
}

impl Decode for String {
    fn decode<R: ByteSource + ?Sized>(source: &mut R) -> Result<Self> {
        let len = decode_len(source)?;
        let bytes = u8::decode_many(len, source)?;
        Self::from_utf8(bytes).map_err(|_| DecodeError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: usize = size_of::<usize>();

    fn encode<T: Encode + ?Sized>(value: &T) -> Vec<u8> {
        let mut sink = Vec::new();
        value.encode(&mut sink);
        sink
    }

    #[test]
    fn text_is_count_then_bytes() {
        let bytes = encode("brown");
        assert_eq!(bytes.len(), PREFIX + 5);
        assert_eq!(bytes[..PREFIX], 5usize.to_ne_bytes());
        assert_eq!(&bytes[PREFIX..], b"brown");

        let mut source: &[u8] = &bytes;
        assert_eq!(String::decode(&mut source).as_deref(), Ok("brown"));
        assert!(source.is_empty());
    }

    #[test]
    fn str_and_string_agree() {
        assert_eq!(encode("over"), encode(&String::from("over")));
    }

    #[test]
    fn primitive_vector_is_one_block() {
        let bytes = encode(&vec![1i32, 2, 3]);
        assert_eq!(bytes.len(), PREFIX + 4 * 3);

        let mut expected = 3usize.to_ne_bytes().to_vec();
        for v in [1i32, 2, 3] {
            expected.extend_from_slice(&v.to_ne_bytes());
        }
        assert_eq!(bytes, expected);
    }

    #[test]
    fn general_vector_is_count_then_elements() {
        let words = vec![String::from("jumps"), String::from("over"), String::from("the")];
        let bytes = encode(&words);
        assert_eq!(bytes.len(), PREFIX + (PREFIX + 5) + (PREFIX + 4) + (PREFIX + 3));

        let mut source: &[u8] = &bytes;
        assert_eq!(Vec::<String>::decode(&mut source), Ok(words));
    }

    #[test]
    fn empty_sequence_reads_only_the_count() {
        let bytes = encode(&Vec::<u64>::new());
        assert_eq!(bytes, 0usize.to_ne_bytes());

        let mut source: &[u8] = &bytes;
        assert_eq!(Vec::<u64>::decode(&mut source), Ok(Vec::new()));
    }

    #[test]
    fn truncated_block_fails() {
        let bytes = encode(&vec![1u32, 2, 3]);
        let mut source: &[u8] = &bytes[..bytes.len() - 1];
        assert_eq!(Vec::<u32>::decode(&mut source), Err(DecodeError));
    }

    #[test]
    fn truncated_element_fails_whole_sequence() {
        let words = vec![String::from("a"), String::from("bc")];
        let bytes = encode(&words);
        let mut source: &[u8] = &bytes[..bytes.len() - 1];
        assert_eq!(Vec::<String>::decode(&mut source), Err(DecodeError));
    }

    #[test]
    fn missing_count_fails() {
        let mut source: &[u8] = &[3, 0];
        assert_eq!(String::decode(&mut source), Err(DecodeError));
    }

    #[test]
    fn invalid_utf8_fails() {
        let mut bytes = 2usize.to_ne_bytes().to_vec();
        bytes.extend_from_slice(&[0xc3, 0x28]);
        let mut source: &[u8] = &bytes;
        assert_eq!(String::decode(&mut source), Err(DecodeError));
    }

    #[test]
    fn huge_declared_count_fails_without_reading() {
        let mut bytes = usize::MAX.to_ne_bytes().to_vec();
        bytes.extend_from_slice(&[1, 2, 3]);
        let mut source: &[u8] = &bytes;
        assert_eq!(Vec::<u16>::decode(&mut source), Err(DecodeError));
        assert_eq!(source.len(), 3);
    }

    #[test]
    fn zero_sized_elements_are_capped() {
        let mut source: &[u8] = &usize::MAX.to_ne_bytes();
        assert_eq!(Vec::<()>::decode(&mut source), Err(DecodeError));

        let mut source: &[u8] = &usize::MAX.to_ne_bytes();
        assert_eq!(Vec::<[String; 0]>::decode(&mut source), Err(DecodeError));

        let over = encode(&vec![(); crate::wire::MAX_ZERO_SIZED_LEN + 1]);
        let mut source: &[u8] = &over;
        assert_eq!(Vec::<()>::decode(&mut source), Err(DecodeError));
    }

    #[test]
    fn zero_sized_elements_round_trip_under_cap() {
        let units = vec![(); 3];
        let bytes = encode(&units);
        assert_eq!(bytes.len(), PREFIX);
        let mut source: &[u8] = &bytes;
        assert_eq!(Vec::<()>::decode(&mut source), Ok(units));

        let empties: Vec<[String; 0]> = vec![[], []];
        let bytes = encode(&empties);
        let mut source: &[u8] = &bytes;
        assert_eq!(Vec::<[String; 0]>::decode(&mut source), Ok(empties));
    }

    #[test]
    fn layout_follows_element_shape() {
        assert_eq!(Vec::<f32>::SHAPE, Shape::Sequence(SequenceLayout::Contiguous));
        assert_eq!(Vec::<bool>::SHAPE, Shape::Sequence(SequenceLayout::Contiguous));
        assert_eq!(Vec::<String>::SHAPE, Shape::Sequence(SequenceLayout::General));
        assert_eq!(<[Vec<u8>]>::SHAPE, Shape::Sequence(SequenceLayout::General));
        assert_eq!(String::SHAPE, Shape::Sequence(SequenceLayout::Contiguous));
    }

    proptest::proptest! {
        /// The one-block copy is byte-identical to writing each element.
        #[test]
        fn prop_block_matches_elementwise(items in proptest::collection::vec(proptest::prelude::any::<u16>(), 0..64)) {
            let mut each = items.len().to_ne_bytes().to_vec();
            for item in &items {
                item.encode(&mut each);
            }
            proptest::prop_assert_eq!(encode(&items), each);
        }

        #[test]
        fn prop_text_round_trips(text in "\\PC*") {
            let bytes = encode(text.as_str());
            let mut source: &[u8] = &bytes;
            proptest::prop_assert_eq!(String::decode(&mut source), Ok(text));
            proptest::prop_assert!(source.is_empty());
        }
    }
}
