//! Registering types from outside the crate.
//!
//! The registration macros expand in the caller's crate, so everything they
//! name must resolve through `$crate`. These types exercise each arm.

use shapewire::{
    ByteSink, ByteSource, CompositeStyle, CustomCodec, Decode, DecodeError, Encode, SequenceLayout, Shape, Shaped,
    classify, composite, from_slice, primitive, to_vec,
};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
struct Rgba {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

primitive!(Rgba);

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(transparent)]
struct EntityId(u64);

primitive!(EntityId);

#[derive(Debug, Clone, PartialEq)]
struct Sprite {
    id: EntityId,
    palette: Vec<Rgba>,
    layers: [Option<String>; 2],
}

composite!(Sprite { id, palette, layers });

#[derive(Debug, Clone, PartialEq)]
struct Label(String, u16);

composite!(Label { 0, 1 });

#[derive(Debug, Clone, PartialEq, Default)]
struct Settings {
    volume: u8,
    muted: bool,
    session_cache: Vec<u64>,
}

composite!(Settings { volume, muted } ..Default);

/// Run-length encoded bytes: `(count, byte)` pairs.
#[derive(Debug, Clone, PartialEq)]
struct Runs(Vec<u8>);

impl CustomCodec for Runs {
    fn write<S: ByteSink + ?Sized>(&self, sink: &mut S) {
        let mut runs: Vec<(u8, u8)> = Vec::new();
        for &byte in &self.0 {
            match runs.last_mut() {
                Some((count, last)) if *last == byte && *count < u8::MAX => *count += 1,
                _ => runs.push((1, byte)),
            }
        }
        runs.encode(sink);
    }

    fn read<R: ByteSource + ?Sized>(source: &mut R) -> shapewire::Result<Self> {
        let runs = Vec::<(u8, u8)>::decode(source)?;
        if runs.iter().any(|(count, _)| *count == 0) {
            return Err(DecodeError);
        }
        Ok(Self(runs.into_iter().flat_map(|(count, byte)| std::iter::repeat_n(byte, count.into())).collect()))
    }
}

composite!(Runs => custom);

#[test]
fn primitive_structs_are_raw() {
    assert_eq!(classify::<Rgba>(), Shape::Primitive { size: 4 });
    assert_eq!(classify::<EntityId>(), Shape::Primitive { size: 8 });
    assert_eq!(to_vec(&Rgba { r: 1, g: 2, b: 3, a: 4 }), [1, 2, 3, 4]);
    assert_eq!(classify::<Vec<Rgba>>(), Shape::Sequence(SequenceLayout::Contiguous));
    assert_eq!(classify::<[Rgba; 3]>(), Shape::Primitive { size: 12 });
}

#[test]
fn nested_composite_round_trips() {
    let sprite = Sprite {
        id: EntityId(42),
        palette: vec![Rgba { r: 0, g: 0, b: 0, a: 255 }, Rgba { r: 255, g: 128, b: 0, a: 255 }],
        layers: [Some(String::from("base")), None],
    };
    let bytes = to_vec(&sprite);
    assert_eq!(bytes.len(), 8 + (size_of::<usize>() + 8) + (1 + size_of::<usize>() + 4) + 1);
    assert_eq!(from_slice::<Sprite>(&bytes), Ok(sprite));
    assert_eq!(
        Sprite::SHAPE,
        Shape::Composite(CompositeStyle::Fields { names: &["id", "palette", "layers"] })
    );
}

#[test]
fn tuple_struct_lists_indices() {
    let label = Label(String::from("hud"), 3);
    assert_eq!(from_slice::<Label>(&to_vec(&label)), Ok(label));
    assert_eq!(Label::SHAPE, Shape::Composite(CompositeStyle::Fields { names: &["0", "1"] }));
}

#[test]
fn unlisted_fields_decode_as_default() {
    let settings = Settings { volume: 9, muted: true, session_cache: vec![1, 2, 3] };
    let bytes = to_vec(&settings);
    assert_eq!(bytes, [9, 1]);
    assert_eq!(from_slice::<Settings>(&bytes), Ok(Settings { volume: 9, muted: true, session_cache: Vec::new() }));
}

#[test]
fn custom_routine_owns_the_wire() {
    let runs = Runs(vec![7, 7, 7, 7, 1, 2, 2]);
    let bytes = to_vec(&runs);
    assert_eq!(bytes.len(), size_of::<usize>() + 3 * 2);
    assert_eq!(from_slice::<Runs>(&bytes), Ok(runs));
    assert_eq!(Runs::SHAPE, Shape::Composite(CompositeStyle::Custom { fields: &[] }));

    let zero_run = to_vec(&vec![(0u8, 5u8)]);
    assert_eq!(from_slice::<Runs>(&zero_run), Err(DecodeError));
}
